use clap::{Parser, Subcommand};

mod commands;
mod util;

#[derive(Parser)]
#[command(
    name = "mindtrack",
    version,
    about = "MindTrack CLI — submit mood check-ins and view your 7-day stress trend"
)]
struct Cli {
    /// API base URL
    #[arg(long, env = "MINDTRACK_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API health
    Health,
    /// Submit a check-in for analysis
    Checkin {
        /// Free text about how you're feeling (max 2000 characters)
        text: String,
    },
    /// History operations
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// List past check-ins, newest first
    List,
    /// Render the 7-day stress trend
    Trend,
    /// Delete all stored check-ins
    Clear,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Health => commands::health::run(&cli.api_url).await,
        Commands::Checkin { text } => commands::checkin::run(&cli.api_url, &text).await,
        Commands::History { command } => match command {
            HistoryCommands::List => commands::history::list(&cli.api_url).await,
            HistoryCommands::Trend => commands::history::trend(&cli.api_url).await,
            HistoryCommands::Clear => commands::history::clear(&cli.api_url).await,
        },
    };

    std::process::exit(code);
}
