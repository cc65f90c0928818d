mod commands;
mod config;
mod display;
mod prompt;

use clap::{Parser, Subcommand};
use config::CliConfig;
use luck_core::GameMode;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "luck-sim")]
#[command(about = "Luck Simulator - turn-based scratch-card game")]
#[command(version)]
struct Cli {
    /// Seed for reproducible draws and ticket shuffles
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Game configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Single scratch card with one prize table
    Classic,
    /// Safe, Medium and Risky tiers with their own prize tables
    Tiered,
    /// A distributor creates finite ticket stock that the players buy
    Distributor,
    /// Show the prize tables, expected payout and return per tier
    Odds {
        /// Game mode (classic, tiered, distributor)
        #[arg(short, long, default_value = "tiered")]
        mode: GameMode,
    },
    /// Buy a batch of cards of one tier and compare against the odds
    Simulate {
        /// Game mode (classic, tiered)
        #[arg(short, long, default_value = "tiered")]
        mode: GameMode,
        /// Tier number
        #[arg(short, long, default_value_t = 2)]
        tier: u8,
        /// Number of cards to buy
        #[arg(short = 'n', long, default_value_t = 10_000)]
        cards: u32,
    },
    /// Print the effective game configuration as JSON
    Config,
}

fn main() {
    let cli = Cli::parse();
    let settings = CliConfig {
        config_path: cli.config,
        seed: cli.seed,
        verbose: cli.verbose,
    };

    // Logs go to stderr so they stay out of the game screen
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(settings.log_filter()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let game_config = match settings.game_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(path) = &settings.config_path {
                eprintln!("Check the config file at {}", path.display());
                eprintln!("Use 'luck-sim config' to print a valid starting point");
            }
            std::process::exit(1);
        }
    };

    tracing::debug!(
        "Starting with seed {:?} and {} config",
        settings.seed,
        if settings.config_path.is_some() { "file" } else { "built-in" }
    );

    let result = match cli.command {
        Commands::Classic => commands::run_game(GameMode::Classic, game_config, settings.seed),
        Commands::Tiered => commands::run_game(GameMode::Tiered, game_config, settings.seed),
        Commands::Distributor => {
            commands::run_game(GameMode::Distributor, game_config, settings.seed)
        }
        Commands::Odds { mode } => commands::show_odds(&game_config, mode),
        Commands::Simulate { mode, tier, cards } => {
            commands::run_simulation(&game_config, mode, tier, cards, settings.seed)
        }
        Commands::Config => commands::show_config(&game_config),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_simulate() {
        let cli = Cli::try_parse_from([
            "luck-sim", "--seed", "42", "simulate", "--mode", "classic", "-t", "1", "-n", "500",
        ])
        .unwrap();

        assert_eq!(cli.seed, Some(42));
        match cli.command {
            Commands::Simulate { mode, tier, cards } => {
                assert_eq!(mode, GameMode::Classic);
                assert_eq!(tier, 1);
                assert_eq!(cards, 500);
            }
            _ => panic!("expected simulate"),
        }
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["luck-sim", "odds", "--mode", "poker"]).is_err());
    }
}
