use anyhow::Result;
use clap::{Parser, Subcommand};
use cropmate_api::AdvisoryClient;
use cropmate_application::SessionService;
use cropmate_core::session::SessionHub;
use cropmate_infrastructure::{ConfigService, FileCredentialStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::history::HistoryArgs;
use commands::recommend::RecommendArgs;

#[derive(Parser)]
#[command(name = "cropmate")]
#[command(about = "CropMate CLI - crop recommendations and plant disease detection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to the advisory service
    Login {
        #[arg(long, short)]
        email: String,
        #[arg(long, short)]
        password: String,
    },
    /// Create an account (logs in on success)
    Register {
        #[arg(long, short)]
        name: String,
        #[arg(long, short)]
        email: String,
        #[arg(long, short)]
        password: String,
    },
    /// Clear the stored session
    Logout,
    /// Show the profile behind the current session
    Whoami,
    /// Show your profile and recent activity
    Dashboard,
    /// Submit soil and climate readings for a crop recommendation
    Recommend(RecommendArgs),
    /// Upload a plant image for a disease diagnosis
    Detect {
        /// Path to the plant image (max 10 MB)
        image: PathBuf,
    },
    /// Show past recommendations and detections
    History(HistoryArgs),
    /// Session utilities
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Print session transitions as they happen, until interrupted
    Watch,
}

/// Shared handles built once at startup.
pub(crate) struct AppContext {
    pub client: Arc<AdvisoryClient>,
    pub session: Arc<SessionService>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ConfigService::new().get_config();
    let store = Arc::new(FileCredentialStore::new()?);
    let hub = Arc::new(SessionHub::new(store));
    let client = Arc::new(AdvisoryClient::new(&config, Arc::clone(&hub))?);
    let session = Arc::new(SessionService::new(hub, client.clone()));
    let ctx = AppContext { client, session };

    let outcome = match cli.command {
        Commands::Login { email, password } => commands::auth::login(&ctx, &email, &password).await,
        Commands::Register {
            name,
            email,
            password,
        } => commands::auth::register(&ctx, &name, &email, &password).await,
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Whoami => commands::auth::whoami(&ctx).await,
        Commands::Dashboard => commands::dashboard::run(&ctx).await,
        Commands::Recommend(args) => commands::recommend::run(&ctx, args).await,
        Commands::Detect { image } => commands::detect::run(&ctx, &image).await,
        Commands::History(args) => commands::history::run(&ctx, args).await,
        Commands::Session { action } => match action {
            SessionAction::Watch => commands::session::watch(&ctx).await,
        },
    };

    if let Err(error) = outcome {
        commands::render::error(&error);
        std::process::exit(1);
    }

    Ok(())
}
