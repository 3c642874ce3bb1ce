//! Command-line interface for rendering solved tile maps as PNG or GIF

use crate::algorithm::cancellation::CancellationToken;
use crate::algorithm::executor::{SolveState, Solver};
use crate::io::configuration::{
    DEFAULT_CONFIG_PATH, DEFAULT_GIF_OUTPUT, DEFAULT_PNG_OUTPUT, DEFAULT_SEED,
    GIF_FRAME_DELAY_MS, MAX_GRID_DIMENSION, TilesetDocument,
};
use crate::io::error::{GenerationError, Result};
use crate::io::image::{export_png, render_snapshot};
use crate::io::progress::ProgressManager;
use crate::io::sprites::SpriteSheet;
use crate::io::visualization::FrameRecorder;
use clap::{Parser, ValueEnum};
use image::RgbaImage;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// What to produce once a grid is solved
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Single image of the solved grid
    Png,
    /// Animation with one frame per collapse of the successful attempt
    Gif,
}

#[derive(Parser, Debug)]
#[command(name = "sockettile")]
#[command(
    author,
    version,
    about = "Fill a tile grid with socket-compatible tiles using wave function collapse"
)]
/// Command-line arguments for the tile map generator
pub struct Cli {
    /// Output kind
    #[arg(value_enum, value_name = "MODE")]
    pub mode: OutputMode,

    /// Grid width in tiles
    #[arg(value_name = "WIDTH", value_parser = parse_dimension)]
    pub width: usize,

    /// Grid height in tiles
    #[arg(value_name = "HEIGHT", value_parser = parse_dimension)]
    pub height: usize,

    /// Tileset configuration document
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Give up after this many contradicted attempts (unbounded if omitted)
    #[arg(short, long, value_parser = parse_attempts)]
    pub attempts: Option<usize>,

    /// Output file (defaults to result.png or result.gif)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_dimension(value: &str) -> std::result::Result<usize, String> {
    let dimension: usize = value
        .parse()
        .map_err(|e| format!("'{value}' is not a cell count: {e}"))?;
    if dimension == 0 || dimension > MAX_GRID_DIMENSION {
        return Err(format!(
            "grid dimension must be between 1 and {MAX_GRID_DIMENSION}"
        ));
    }
    Ok(dimension)
}

fn parse_attempts(value: &str) -> std::result::Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("at least one attempt is required".to_string()),
        Ok(attempts) => Ok(attempts),
        Err(e) => Err(format!("'{value}' is not an attempt count: {e}")),
    }
}

impl Cli {
    /// Where the result is written
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            PathBuf::from(match self.mode {
                OutputMode::Png => DEFAULT_PNG_OUTPUT,
                OutputMode::Gif => DEFAULT_GIF_OUTPUT,
            })
        })
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Whether another attempt may follow attempt number `attempt`
    pub fn allows_retry_after(&self, attempt: usize) -> bool {
        self.attempts.is_none_or(|max| attempt < max)
    }
}

/// Loads a tileset, runs attempts until one solves and writes the output
pub struct TileMapGenerator {
    cli: Cli,
    cancel: CancellationToken,
}

impl TileMapGenerator {
    /// Create a generator for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            cancel: CancellationToken::new(),
        }
    }

    /// Handle that aborts the running attempt when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Load the tileset, solve and write the requested output
    ///
    /// Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration or sprites cannot be loaded or fail validation
    /// - The attempt limit is reached or the run is cancelled
    /// - Rendering or writing the output fails
    pub fn run(&self) -> Result<PathBuf> {
        let start_time = Instant::now();
        let document = TilesetDocument::load(&self.cli.config)?;
        let catalog = document.catalog()?;
        let connections = document.connection_table(&catalog)?;
        let sheet = SpriteSheet::for_document(&document)?;
        let sprites = sheet.variant_sprites(&catalog, &document)?;

        info!(
            "Loaded {} tiles expanded to {} variants, {} socket kinds",
            document.tiles.len(),
            catalog.len(),
            connections.socket_count()
        );

        let mut solver = Solver::new(
            catalog,
            connections,
            self.cli.width,
            self.cli.height,
            self.cli.seed,
        )?;

        let cell_count = solver.grid().cell_count();
        let progress = if self.cli.should_show_progress() {
            ProgressManager::new(cell_count)
        } else {
            ProgressManager::hidden(cell_count)
        };

        let renderer = Renderer {
            sprites: &sprites,
            tile_size: sheet.tile_size(),
        };
        let output_path = self.cli.output_path();
        match self.cli.mode {
            OutputMode::Png => {
                self.write_image(&mut solver, &renderer, &progress, &output_path)?;
            }
            OutputMode::Gif => {
                self.write_animation(&mut solver, &renderer, &progress, &output_path)?;
            }
        }

        info!(
            "Saved {} after {} attempt(s) in {:.2?}",
            output_path.display(),
            solver.attempt(),
            start_time.elapsed()
        );
        Ok(output_path)
    }

    fn write_image(
        &self,
        solver: &mut Solver,
        renderer: &Renderer<'_>,
        progress: &ProgressManager,
        output_path: &Path,
    ) -> Result<()> {
        loop {
            progress.start_attempt(solver.attempt());
            let state = solver.solve_to_completion(&self.cancel)?;
            progress.update(solver.collapse_count());

            if state == SolveState::Solved {
                let image = renderer.render(solver)?;
                export_png(&image, output_path)?;
                progress.finish("solved");
                return Ok(());
            }
            self.retry(solver, progress, state)?;
        }
    }

    fn write_animation(
        &self,
        solver: &mut Solver,
        renderer: &Renderer<'_>,
        progress: &ProgressManager,
        output_path: &Path,
    ) -> Result<()> {
        let mut recorder = FrameRecorder::new();

        loop {
            progress.start_attempt(solver.attempt());
            recorder.discard();
            recorder.record(renderer.render(solver)?);

            let state = loop {
                if let Err(error) = self.cancel.check() {
                    solver.reset();
                    return Err(error);
                }
                let outcome = solver.step_once();
                if outcome.state != SolveState::Running {
                    break outcome.state;
                }
                recorder.record(render_snapshot(
                    &outcome.snapshot,
                    renderer.sprites,
                    renderer.tile_size,
                )?);
                progress.update(solver.collapse_count());
            };

            if state == SolveState::Solved {
                info!("Generated {} frames", recorder.len());
                recorder.export_gif(output_path, GIF_FRAME_DELAY_MS)?;
                progress.finish("solved");
                return Ok(());
            }
            self.retry(solver, progress, state)?;
        }
    }

    fn retry(
        &self,
        solver: &mut Solver,
        progress: &ProgressManager,
        state: SolveState,
    ) -> Result<()> {
        if let SolveState::Contradiction { cell } = state {
            let (x, y) = solver.grid().coordinates(cell);
            progress.contradiction(x, y);
            warn!(
                "Attempt {} reached a contradiction at ({x}, {y})",
                solver.attempt()
            );
        }
        if !self.cli.allows_retry_after(solver.attempt()) {
            progress.finish("gave up");
            return Err(GenerationError::AttemptsExhausted {
                attempts: solver.attempt(),
            });
        }
        solver.reset();
        Ok(())
    }
}

struct Renderer<'a> {
    sprites: &'a [RgbaImage],
    tile_size: u32,
}

impl Renderer<'_> {
    fn render(&self, solver: &Solver) -> Result<RgbaImage> {
        render_snapshot(&solver.grid().snapshot(), self.sprites, self.tile_size)
    }
}
