mod analyze;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "vidintel-cli")]
#[command(about = "Competitive title intelligence for topic video batches")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze recently published videos for a topic and print the report.
    Analyze(analyze::AnalyzeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze(args) => analyze::run(&args).await,
    }
}
