use adcraft_core::config::StoreKind;
use adcraft_core::creative::CreativeKind;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

mod bootstrap;
mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "adcraft")]
#[command(version, about = "AdCraft CLI - AI-generated ad creatives with a per-user library", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Override the configured creative store
    #[arg(long, global = true)]
    store: Option<StoreKind>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write default config.toml and a secret.json template
    Init,
    /// Sign in as a user; the library is scoped to this id
    SignIn {
        /// Stable user id
        user_id: String,
        /// Display name
        #[arg(long)]
        name: Option<String>,
    },
    /// Sign out the current user
    SignOut,
    /// Show the signed-in user
    Whoami,
    /// Generate a creative and add it to the library
    Generate(GenerateArgs),
    /// List the signed-in user's creatives, newest first
    Library {
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// copy, visual or campaign
    kind: CreativeKind,
    #[arg(long, default_value = "")]
    industry: String,
    #[arg(long, default_value = "")]
    product: String,
    /// Target audience
    #[arg(long, default_value = "")]
    audience: String,
    /// Defaults to "professional"
    #[arg(long, default_value = "")]
    tone: String,
    /// Defaults to "general"
    #[arg(long, default_value = "")]
    platform: String,
    #[arg(long, default_value = "")]
    goals: String,
    #[arg(long, default_value = "")]
    constraints: String,
    /// Print the record as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = adcraft_infrastructure::AdcraftPaths::resolve()
        .context("Failed to resolve AdCraft directories")?;
    let _log_guard = logging::init(cli.log_level.as_deref(), &paths.logs_dir());

    match cli.command {
        Commands::Init => commands::init::run(&paths)?,
        Commands::SignIn { user_id, name } => commands::session::sign_in(&paths, user_id, name)?,
        Commands::SignOut => commands::session::sign_out(&paths)?,
        Commands::Whoami => commands::session::whoami(&paths)?,
        Commands::Generate(args) => {
            let app = bootstrap::build(paths, cli.store).await?;
            commands::generate::run(&app, args).await?
        }
        Commands::Library { json } => {
            let app = bootstrap::build(paths, cli.store).await?;
            commands::library::run(&app, json).await?
        }
    }

    Ok(())
}
