use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "habitual", version, about = "Habitual habit tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit list management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Daily log entries and mood
    Log {
        #[command(subcommand)]
        action: commands::log::LogAction,
    },
    /// Daily score, weekly average, streak and weekly progress
    Score {
        #[command(subcommand)]
        action: commands::score::ScoreAction,
    },
    /// Charts and KPIs
    Analytics {
        #[command(subcommand)]
        action: commands::analytics::AnalyticsAction,
    },
    /// Build profile and starter habits from survey answers
    Onboard(commands::onboard::OnboardArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Export or import all data
    Backup {
        #[command(subcommand)]
        action: commands::backup::BackupAction,
    },
    /// Coaching prompt
    Coach {
        #[command(subcommand)]
        action: commands::coach::CoachAction,
    },
    /// Public stats and ranking
    Leaderboard {
        #[command(subcommand)]
        action: commands::leaderboard::LeaderboardAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("HABITUAL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Log { action } => commands::log::run(action),
        Commands::Score { action } => commands::score::run(action),
        Commands::Analytics { action } => commands::analytics::run(action),
        Commands::Onboard(args) => commands::onboard::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Backup { action } => commands::backup::run(action),
        Commands::Coach { action } => commands::coach::run(action),
        Commands::Leaderboard { action } => commands::leaderboard::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
