/// Dynamic bitset tracking which tiles a partial layout has consumed
pub mod bitset;
/// Validated position-to-tile assignments
pub mod permutation;
/// Pairwise edge-compatibility cost tables
pub mod scoring;
/// Beam search over partial grid assignments
pub mod search;
