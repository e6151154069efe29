//! Word Groups - CLI
//!
//! Category-merging word puzzle with TUI and text modes, plus allocation and simulation tools.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use word_groups::{
    commands::{SimulationSettings, run_allocate, run_simple, run_simulation},
    config::GameConfig,
    game::CategorySource,
    output::{print_allocation, print_categories, print_simulation_result},
    repository::{CategoryRepository, load_from_file},
};

#[derive(Parser)]
#[command(
    name = "word_groups",
    about = "Drag tiles of the same category together until every group is found",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Level to play (1-5)
    #[arg(short, long, global = true, default_value_t = 1)]
    level: usize,

    /// Comma-separated category names to deal from instead of a level
    #[arg(short = 'C', long, global = true, value_delimiter = ',')]
    categories: Vec<String>,

    /// Deal random words from any category
    #[arg(long, global = true, conflicts_with = "categories")]
    random: bool,

    /// Category file (`category<delimiter>word` per line); built-in data if omitted
    #[arg(short = 'f', long, global = true)]
    categories_file: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for reproducible deals
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Override shuffle intensity (0 = grouped, 1 = fully mixed)
    #[arg(long, global = true)]
    shuffle_intensity: Option<f64>,

    /// Override the total word count
    #[arg(short, long, global = true)]
    total: Option<usize>,

    /// Override starting lives
    #[arg(long, global = true)]
    lives: Option<u32>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write logs to this file (the TUI logs nowhere otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode with mouse dragging (default)
    Play,

    /// Simple CLI mode (pick tiles by number)
    Simple,

    /// Show the words the allocator picks for a round
    Allocate,

    /// List available categories
    Categories,

    /// Play many rounds automatically and report statistics
    Simulate {
        /// Number of rounds
        #[arg(short = 'n', long, default_value = "100")]
        games: usize,

        /// Probability per move of a deliberate mixed selection
        #[arg(short, long, default_value = "0.1")]
        mistake_rate: f64,
    },
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.take().unwrap_or(Commands::Play);
    init_tracing(&cli, matches!(command, Commands::Play))?;

    let config = load_config(&cli)?;
    let repository = load_repository(cli.categories_file.as_deref(), config.delimiter)?;
    let source = category_source(&cli);

    match command {
        Commands::Play => run_play_command(&repository, config, source, cli.seed),
        Commands::Simple => run_simple(&repository, &config, source, cli.seed),
        Commands::Allocate => {
            let report = run_allocate(&repository, &config, source, cli.seed)?;
            print_allocation(&report);
            Ok(())
        }
        Commands::Categories => {
            print_categories(&repository);
            Ok(())
        }
        Commands::Simulate {
            games,
            mistake_rate,
        } => {
            let settings = SimulationSettings {
                games,
                source,
                mistake_rate,
                seed: cli.seed.unwrap_or(0),
            };
            let stats = run_simulation(&repository, &config, &settings)?;
            print_simulation_result(&stats);
            Ok(())
        }
    }
}

/// Install the log subscriber
///
/// Logs go to `--log-file` when given. Otherwise they go to stderr, except in the TUI
/// where they would corrupt the screen.
fn init_tracing(cli: &Cli, tui: bool) -> Result<()> {
    let default = if cli.verbose {
        "word_groups=debug"
    } else {
        "word_groups=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if !tui {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
    Ok(())
}

/// Defaults, then the JSON file, then command-line overrides
fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if let Some(intensity) = cli.shuffle_intensity {
        config.shuffle_intensity = intensity;
    }
    if let Some(total) = cli.total {
        config.total_word_count = total;
    }
    if let Some(lives) = cli.lives {
        config.starting_lives = lives;
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn load_repository(path: Option<&Path>, delimiter: char) -> Result<CategoryRepository> {
    match path {
        Some(path) => Ok(load_from_file(path, delimiter)?),
        None => Ok(CategoryRepository::embedded()),
    }
}

fn category_source(cli: &Cli) -> CategorySource {
    if cli.random {
        CategorySource::Random
    } else if cli.categories.is_empty() {
        CategorySource::Level(cli.level)
    } else {
        CategorySource::Custom(cli.categories.clone())
    }
}

fn run_play_command(
    repository: &CategoryRepository,
    config: GameConfig,
    source: CategorySource,
    seed: Option<u64>,
) -> Result<()> {
    use word_groups::interactive::{App, run_tui};

    let app = App::new(repository, config, source, seed)?;
    run_tui(app)
}
