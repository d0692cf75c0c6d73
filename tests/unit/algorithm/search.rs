//! Tests for beam search transitions, pruning, tie-breaking and validation

#[cfg(test)]
mod tests {
    use crate::unit::{gradient_tiles, permutations, random_tiles};
    use ndarray::Array2;
    use unshuffle::PuzzleError;
    use unshuffle::algorithm::scoring::{CostTables, EdgeScorer, ScoringConfig};
    use unshuffle::algorithm::search::{BeamSearch, SearchConfig, solve, solve_tiles};
    use unshuffle::io::configuration::SELF_ADJACENCY_COST;
    use unshuffle::spatial::GridLayout;

    // One row of three tiles where the chain 2 -> 0 -> 1 is cheap
    fn chain_tables() -> CostTables {
        let mut right = Array2::from_elem((3, 3), 10.0);
        for i in 0..3 {
            right[(i, i)] = SELF_ADJACENCY_COST;
        }
        right[(2, 0)] = 1.0;
        right[(0, 1)] = 1.0;
        CostTables::from_arrays(right, Array2::zeros((3, 3))).unwrap()
    }

    fn flat_tables(tile_count: usize) -> CostTables {
        let mut table = Array2::zeros((tile_count, tile_count));
        for i in 0..tile_count {
            table[(i, i)] = SELF_ADJACENCY_COST;
        }
        CostTables::from_arrays(table.clone(), table).unwrap()
    }

    // Tests a single-state beam commits greedily to the first tile
    // Verified by keeping every successor regardless of width
    #[test]
    fn test_beam_of_one_is_greedy() {
        let tables = chain_tables();
        let layout = GridLayout::new(1, 3).unwrap();

        let solution = solve(&tables, layout, SearchConfig::new(1)).unwrap();
        assert_eq!(solution.permutation.as_slice(), &[0, 1, 2]);
        assert_eq!(solution.cost, 11.0);
    }

    // Tests a wider beam keeps the cheaper chain alive
    // Verified by truncating to one state after sorting
    #[test]
    fn test_wider_beam_finds_chain() {
        let tables = chain_tables();
        let layout = GridLayout::new(1, 3).unwrap();

        let solution = solve(&tables, layout, SearchConfig::new(3)).unwrap();
        assert_eq!(solution.permutation.as_slice(), &[2, 0, 1]);
        assert_eq!(solution.cost, 2.0);
    }

    // Tests equal costs resolve to generation order, giving the identity
    // Verified by switching to an unstable sort
    #[test]
    fn test_ties_follow_generation_order() {
        let tables = flat_tables(6);
        let layout = GridLayout::new(2, 3).unwrap();

        for beam_width in [1, 2, 7, 100] {
            let solution = solve(&tables, layout, SearchConfig::new(beam_width)).unwrap();
            assert_eq!(solution.permutation.as_slice(), &[0, 1, 2, 3, 4, 5]);
            assert_eq!(solution.cost, 0.0);
        }
    }

    // Tests candidate pre-filtering still reaches the chain with enough states
    // Verified by keeping the most expensive candidates instead
    #[test]
    fn test_candidate_limit() {
        let tables = chain_tables();
        let layout = GridLayout::new(1, 3).unwrap();

        let config = SearchConfig::new(3).with_candidate_limit(1);
        let solution = solve(&tables, layout, config).unwrap();
        assert_eq!(solution.permutation.as_slice(), &[2, 0, 1]);
    }

    // Tests the first position is never filtered, so every start tile is tried
    // Verified by applying the limit at position 0
    #[test]
    fn test_candidate_limit_skips_first_position() {
        let tables = flat_tables(4);
        let layout = GridLayout::new(2, 2).unwrap();
        let config = SearchConfig::new(10).with_candidate_limit(1);

        let mut search = BeamSearch::new(&tables, layout, config).unwrap();
        assert!(search.step());
        assert_eq!(search.states().len(), 4);
        assert!(search.step());
        assert_eq!(search.states().len(), 4);
    }

    // Tests every state is a valid partial permutation at every step
    // Verified by skipping the used-tile check on expansion
    #[test]
    fn test_step_invariants() {
        let tiles = random_tiles(9, 4, 4, 21);
        let tables = EdgeScorer::new(ScoringConfig::new(2, 1))
            .score(&tiles)
            .unwrap();
        let layout = GridLayout::new(3, 3).unwrap();
        let mut search = BeamSearch::new(&tables, layout, SearchConfig::new(25)).unwrap();

        assert_eq!(search.position(), 0);
        assert_eq!(search.best_cost(), 0.0);

        let mut previous_best = 0.0;
        while search.step() {
            let position = search.position();
            assert!(search.states().len() <= 25);
            for state in search.states() {
                assert_eq!(state.placed().len(), position);
                assert_eq!(state.used().count(), position);
                for &tile in state.placed() {
                    assert!(state.used().contains(tile));
                }
            }
            let costs: Vec<f64> = search.states().iter().map(|s| s.cost()).collect();
            assert!(costs.windows(2).all(|pair| pair[0] <= pair[1]));
            // Costs only accumulate, so the best cost never drops
            assert!(search.best_cost() >= previous_best);
            previous_best = search.best_cost();
        }

        assert!(search.is_complete());
        assert!(!search.step());
        assert_eq!(search.position(), 9);

        let best = search.best_cost();
        let solution = search.finish().unwrap();
        assert_eq!(solution.cost, best);
    }

    // Tests the returned cost matches the arrangement's recomputed cost
    // Verified by omitting the up neighbour from the running cost
    #[test]
    fn test_solution_cost_matches_arrangement() {
        let tiles = random_tiles(6, 3, 3, 5);
        let tables = EdgeScorer::new(ScoringConfig::new(1, 1))
            .score(&tiles)
            .unwrap();
        let layout = GridLayout::new(2, 3).unwrap();

        let solution = solve(&tables, layout, SearchConfig::new(40)).unwrap();
        assert_eq!(
            solution.cost,
            tables.arrangement_cost(layout, solution.permutation.as_slice())
        );
    }

    // Tests an exhaustive beam on a 2x2 grid matches brute force
    // Verified by returning the last state instead of the cheapest
    #[test]
    fn test_exhaustive_beam_matches_brute_force() {
        let layout = GridLayout::new(2, 2).unwrap();
        for seed in 0..5 {
            let tiles = random_tiles(4, 3, 3, seed);
            let tables = EdgeScorer::new(ScoringConfig::new(1, 1))
                .score(&tiles)
                .unwrap();

            let brute_force = permutations(4)
                .iter()
                .map(|arrangement| tables.arrangement_cost(layout, arrangement))
                .fold(f64::INFINITY, f64::min);

            let solution = solve(&tables, layout, SearchConfig::new(24)).unwrap();
            assert_eq!(solution.cost, brute_force, "seed {seed}");
        }
    }

    // Tests scoring and search in one call recover an intact gradient
    // Verified by swapping the right and down tables
    #[test]
    fn test_solve_tiles_gradient() {
        let layout = GridLayout::new(2, 3).unwrap();
        let tiles = gradient_tiles(layout, 4);

        let solution =
            solve_tiles(&tiles, layout, ScoringConfig::new(1, 1), SearchConfig::new(50)).unwrap();
        assert_eq!(solution.permutation.as_slice(), &[0, 1, 2, 3, 4, 5]);
    }

    // Tests a zero beam width is rejected
    // Verified by removing the beam width check
    #[test]
    fn test_zero_beam_rejected() {
        let tables = flat_tables(4);
        let layout = GridLayout::new(2, 2).unwrap();
        let result = BeamSearch::new(&tables, layout, SearchConfig::new(0));
        assert!(matches!(
            result,
            Err(PuzzleError::InvalidParameter {
                parameter: "beam_width",
                ..
            })
        ));

        let result = BeamSearch::new(
            &tables,
            layout,
            SearchConfig::new(5).with_candidate_limit(0),
        );
        assert!(matches!(
            result,
            Err(PuzzleError::InvalidParameter {
                parameter: "candidate_limit",
                ..
            })
        ));
    }

    // Tests more positions than the configured limit fail fast
    // Verified by removing the capacity check
    #[test]
    fn test_capacity_exceeded() {
        let tables = flat_tables(4);
        let layout = GridLayout::new(2, 2).unwrap();
        let config = SearchConfig {
            max_tiles: 3,
            ..SearchConfig::new(10)
        };

        let result = BeamSearch::new(&tables, layout, config);
        assert!(matches!(
            result,
            Err(PuzzleError::CapacityExceeded { tiles: 4, limit: 3 })
        ));

        let tiles = random_tiles(4, 2, 2, 1);
        let result = solve_tiles(&tiles, layout, ScoringConfig::new(1, 1), config);
        assert!(matches!(result, Err(PuzzleError::CapacityExceeded { .. })));
    }

    // Tests tables and grid must describe the same number of tiles
    // Verified by removing the size agreement check
    #[test]
    fn test_mismatched_tables_rejected() {
        let tables = flat_tables(4);
        let layout = GridLayout::new(2, 3).unwrap();
        assert!(BeamSearch::new(&tables, layout, SearchConfig::new(5)).is_err());

        let tiles = random_tiles(4, 2, 2, 1);
        let result = solve_tiles(&tiles, layout, ScoringConfig::new(1, 1), SearchConfig::new(5));
        assert!(matches!(result, Err(PuzzleError::InvalidTileSet { .. })));
    }

    // Tests a single tile is trivially placed
    // Verified by starting the search at position 1
    #[test]
    fn test_single_tile() {
        let tables = flat_tables(1);
        let layout = GridLayout::new(1, 1).unwrap();
        let solution = solve(&tables, layout, SearchConfig::new(1)).unwrap();
        assert_eq!(solution.permutation.as_slice(), &[0]);
        assert_eq!(solution.cost, 0.0);
    }
}
