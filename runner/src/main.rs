mod config;
mod input;
mod render;
mod session_runner;

use std::path::PathBuf;

use autosnek_common::config::Validate;
use autosnek_common::games::SessionRng;
use autosnek_common::games::snake::{NavigationMode, SessionCommand, SnakeGameState};
use autosnek_common::{log, logger};
use clap::{Parser, ValueEnum};
use tokio::sync::mpsc;

use config::{RunnerConfig, get_config_manager};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Manual,
    Bfs,
    BfsManhattan,
    Dfs,
    Heuristic,
    LongestPath,
}

impl From<ModeArg> for NavigationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Manual => NavigationMode::Manual,
            ModeArg::Bfs => NavigationMode::Bfs,
            ModeArg::BfsManhattan => NavigationMode::BfsManhattan,
            ModeArg::Dfs => NavigationMode::Dfs,
            ModeArg::Heuristic => NavigationMode::Heuristic,
            ModeArg::LongestPath => NavigationMode::LongestPath,
        }
    }
}

#[derive(Parser)]
#[command(name = "autosnek", about = "Snake with pluggable autopilots")]
struct Args {
    /// Path to the YAML config; defaults to autosnek_config.yaml next to the binary
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks in total
    #[arg(long)]
    max_ticks: Option<u64>,

    #[arg(long)]
    auto_restart: bool,

    #[arg(long)]
    render: bool,

    /// Start at the fast tick rate
    #[arg(long)]
    fast: bool,

    #[arg(long)]
    verbose: bool,

    #[arg(long)]
    use_log_prefix: bool,

    /// Write the default config to the config path and exit
    #[arg(long)]
    write_default_config: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut RunnerConfig) {
        if let Some(mode) = self.mode {
            config.session.navigation = mode.into();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.auto_restart |= self.auto_restart;
        config.render |= self.render;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("AutoSnek".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    let config_manager = get_config_manager(args.config.clone());
    if args.write_default_config {
        config_manager.set_config(&RunnerConfig::default())?;
        log!("Default config written");
        return Ok(());
    }

    let mut config = config_manager.get_config()?;
    args.apply_overrides(&mut config);
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!(
        "Seed {}, navigation {}, field {}x{}",
        rng.seed(),
        config.session.navigation,
        config.session.field_width,
        config.session.field_height
    );

    let mut session = SnakeGameState::new(config.session.clone(), &mut rng)?;
    if args.fast {
        session.apply_command(SessionCommand::ToggleSpeed, &mut rng);
    }

    let (command_tx, mut command_rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || input::read_commands(command_tx));

    let summary =
        session_runner::run_session(session, rng, &config, &mut command_rx, args.max_ticks).await;
    log!(
        "Finished after {} ticks, {} games, best score {}",
        summary.ticks,
        summary.games,
        summary.best_score
    );

    Ok(())
}
