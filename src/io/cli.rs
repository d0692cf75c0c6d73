//! Command-line interface for solving, rebuilding and shuffling tile puzzles

use crate::algorithm::permutation::Permutation;
use crate::algorithm::scoring::{EdgeScorer, ScoringConfig};
use crate::algorithm::search::{BeamSearch, SearchConfig, Solution};
use crate::io::configuration::{
    ANSWER_SUFFIX, DEFAULT_BAND, DEFAULT_COLS, DEFAULT_HEIGHT_MARGIN, DEFAULT_ROWS, DEFAULT_STEP,
    DEFAULT_WIDTH_MARGIN, MAPPING_SUFFIX, OUTPUT_SUFFIX, SCRAMBLE_SUFFIX, default_beam_width,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{compose, load_image, save_image};
use crate::io::mapping::{read_mapping_file, write_mapping_file};
use crate::io::progress::{Phase, ProgressManager};
use crate::io::scramble::scramble;
use crate::spatial::{CellGrid, GridLayout, Margins, TileSet};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

#[derive(Parser, Debug)]
#[command(name = "unshuffle")]
#[command(
    author,
    version,
    about = "Reassemble an image whose grid of tiles has been shuffled"
)]
/// Command-line arguments for the tile solver
pub struct Cli {
    /// Shuffled PNG/JPEG image, or a directory of them
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Number of tile rows
    #[arg(short, long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    /// Number of tile columns
    #[arg(short, long, default_value_t = DEFAULT_COLS)]
    pub cols: usize,

    /// Pixels trimmed from each cell's width
    #[arg(long = "wm", default_value_t = DEFAULT_WIDTH_MARGIN)]
    pub width_margin: u32,

    /// Pixels trimmed from each cell's height
    #[arg(long = "hm", default_value_t = DEFAULT_HEIGHT_MARGIN)]
    pub height_margin: u32,

    /// Depth of the border strip compared between neighbours
    #[arg(long, default_value_t = DEFAULT_BAND)]
    pub band: usize,

    /// Sampling stride along each border
    #[arg(long, default_value_t = DEFAULT_STEP)]
    pub step: usize,

    /// States kept per search step (default depends on tile count)
    #[arg(short, long)]
    pub beam: Option<usize>,

    /// Only try this many cheapest tiles per state at each position
    #[arg(long = "cand")]
    pub candidates: Option<usize>,

    /// Rebuild from an existing mapping file instead of solving
    #[arg(short, long, value_name = "FILE", conflicts_with = "scramble")]
    pub map: Option<PathBuf>,

    /// Also write the solved mapping, to FILE or `<stem>_mapping.txt`
    #[arg(short, long, value_name = "FILE")]
    pub dump_map: Option<Option<PathBuf>>,

    /// Output image path (single target only)
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Shuffle an intact image with this seed instead of solving
    #[arg(long, value_name = "SEED")]
    pub scramble: Option<u64>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Grid shape requested on the command line
    ///
    /// # Errors
    ///
    /// Returns an error if rows or columns is zero
    pub fn layout(&self) -> Result<GridLayout> {
        GridLayout::new(self.rows, self.cols)
    }

    /// Margins trimmed from each cell
    pub const fn margins(&self) -> Margins {
        Margins {
            width: self.width_margin,
            height: self.height_margin,
        }
    }

    /// Border sampling parameters
    pub const fn scoring_config(&self) -> ScoringConfig {
        ScoringConfig::new(self.band, self.step)
    }

    /// Search parameters for a puzzle of `tile_count` tiles
    pub fn search_config(&self, tile_count: usize) -> SearchConfig {
        let config = SearchConfig::new(
            self.beam
                .unwrap_or_else(|| default_beam_width(tile_count)),
        );
        match self.candidates {
            Some(limit) => config.with_candidate_limit(limit),
            None => config,
        }
    }

    /// Where the solved mapping for `input_path` goes, if one was requested
    pub fn mapping_path(&self, input_path: &Path) -> Option<PathBuf> {
        self.dump_map.as_ref().map(|path| {
            path.clone()
                .unwrap_or_else(|| derived_path(input_path, MAPPING_SUFFIX))
        })
    }

    /// What to do with each target file
    pub fn mode(&self) -> Mode {
        match (&self.map, self.scramble) {
            (Some(path), _) => Mode::Rebuild(path.clone()),
            (None, Some(seed)) => Mode::Scramble(seed),
            (None, None) => Mode::Solve,
        }
    }
}

/// Operation applied to each target
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Score tiles and search for the best arrangement
    Solve,
    /// Composite tiles using an existing mapping file
    Rebuild(PathBuf),
    /// Shuffle an intact image with the given seed
    Scramble(u64),
}

impl Mode {
    const fn output_suffix(&self) -> &'static str {
        match self {
            Self::Solve | Self::Rebuild(_) => OUTPUT_SUFFIX,
            Self::Scramble(_) => SCRAMBLE_SUFFIX,
        }
    }
}

/// Orchestrates batch processing of puzzle images with progress tracking
pub struct FileProcessor {
    cli: Cli,
    mode: Mode,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);
        let mode = cli.mode();

        Self {
            cli,
            mode,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if argument validation, target collection or any
    /// file's processing fails
    pub fn process(&mut self) -> Result<()> {
        let layout = self.cli.layout()?;
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if self.cli.target.is_dir() {
            if let Some(ref out) = self.cli.out {
                return Err(invalid_parameter(
                    "out",
                    &out.display(),
                    &"an output path needs a single target file",
                ));
            }
            if let Some(Some(ref dump)) = self.cli.dump_map {
                return Err(invalid_parameter(
                    "dump-map",
                    &dump.display(),
                    &"a mapping output path needs a single target file",
                ));
            }
            if let Mode::Rebuild(ref map) = self.mode {
                return Err(invalid_parameter(
                    "map",
                    &map.display(),
                    &"a mapping file needs a single target file",
                ));
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            self.process_file(file, layout)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !is_image_path(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"must be a PNG or JPEG image",
                ));
            }
            if self.should_process_file(target) {
                Ok(vec![target.clone()])
            } else {
                Ok(vec![])
            }
        } else if target.is_dir() {
            let suffix = self.mode.output_suffix();
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target)? {
                let path = entry?.path();
                let is_own_output = path
                    .file_stem()
                    .is_some_and(|stem| stem.to_string_lossy().ends_with(suffix));
                if is_image_path(&path) && !is_own_output && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be an image file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.output_path(input_path);
        if output_path.exists() {
            log::warn!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, layout: GridLayout) -> Result<()> {
        let start_time = Instant::now();
        let output_path = self.output_path(input_path);

        let source = load_image(input_path)?;
        let cells = CellGrid::new(source.width(), source.height(), layout, self.cli.margins())?;
        let tiles = TileSet::extract(&source, &cells)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(input_path, layout.tile_count());
        }

        match self.mode.clone() {
            Mode::Solve => {
                let solution = self.solve(&tiles, layout)?;
                self.set_phase(Phase::Writing);
                save_image(&compose(&tiles, &solution.permutation, layout)?, &output_path)?;
                if let Some(mapping_path) = self.cli.mapping_path(input_path) {
                    write_mapping_file(&mapping_path, &solution.permutation, layout)?;
                    log::info!("Mapping saved: {}", mapping_path.display());
                }
                log::info!(
                    "Solved {} (cost {:.0}) in {:.2?}",
                    input_path.display(),
                    solution.cost,
                    start_time.elapsed()
                );
            }
            Mode::Rebuild(mapping_path) => {
                let permutation: Permutation = read_mapping_file(&mapping_path, layout)?;
                self.set_phase(Phase::Writing);
                save_image(&compose(&tiles, &permutation, layout)?, &output_path)?;
                log::info!(
                    "Rebuilt {} from {}",
                    input_path.display(),
                    mapping_path.display()
                );
            }
            Mode::Scramble(seed) => {
                self.set_phase(Phase::Writing);
                let scrambled = scramble(&tiles, layout, seed)?;
                save_image(&scrambled.image, &output_path)?;
                let answer_path = derived_path(input_path, ANSWER_SUFFIX);
                write_mapping_file(&answer_path, &scrambled.restoring, layout)?;
                log::info!("Answer saved: {}", answer_path.display());
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file();
        }
        log::info!("Saved: {}", output_path.display());

        Ok(())
    }

    fn solve(&self, tiles: &TileSet, layout: GridLayout) -> Result<Solution> {
        let search_config = self.cli.search_config(layout.tile_count());
        search_config.check_capacity(tiles.len())?;

        self.set_phase(Phase::Scoring);
        let tables = EdgeScorer::new(self.cli.scoring_config()).score(tiles)?;

        self.set_phase(Phase::Searching);
        let mut search = BeamSearch::new(&tables, layout, search_config)?;
        while search.step() {
            if let Some(ref pm) = self.progress_manager {
                pm.update_position(search.position(), search.best_cost());
            }
        }
        search.finish()
    }

    fn set_phase(&self, phase: Phase) {
        if let Some(ref pm) = self.progress_manager {
            pm.set_phase(phase);
        }
    }

    fn output_path(&self, input_path: &Path) -> PathBuf {
        match (&self.cli.out, &self.mode) {
            (Some(out), Mode::Solve | Mode::Rebuild(_)) => out.clone(),
            _ => derived_path(input_path, &format!("{}.png", self.mode.output_suffix())),
        }
    }
}

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Sibling of `input_path` named `<stem><suffix>`
pub fn derived_path(input_path: &Path, suffix: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}
