use anyhow::Result;
use cardcraft::core::log::init_logging;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Ignore today's cached prices and fetch them again
    #[arg(short, long, global = true)]
    refresh: bool,

    /// Number of rows in the ranked item views
    #[arg(short, long, global = true)]
    top: Option<usize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for cardcraft::AppCommand {
    fn from(cmd: Commands) -> cardcraft::AppCommand {
        match cmd {
            Commands::Report => cardcraft::AppCommand::Report,
            Commands::Items => cardcraft::AppCommand::Items,
            Commands::Dust => cardcraft::AppCommand::Dust,
            Commands::Recipes => cardcraft::AppCommand::Recipes,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display cheapest items, best dust value and profitable recipes
    Report,
    /// Display the cheapest items
    Items,
    /// Display the items with the best price per dust
    Dust,
    /// Display profitable crafting recipes
    Recipes,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let options = cardcraft::RunOptions {
        refresh: cli.refresh,
        top_n: cli.top,
    };
    let result = match cli.command.unwrap_or(Commands::Report) {
        Commands::Setup => cardcraft::cli::setup::setup(),
        cmd => cardcraft::run_command(cmd.into(), cli.config_path.as_deref(), options).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
        println!("{}", cardcraft::cli::ui::failure_message(e));
    }
    result
}
