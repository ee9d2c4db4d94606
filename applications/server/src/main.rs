/// AudioShare Server - multi-user AAC sharing server
use audioshare_core::{CreateUser, CredentialStore};
use audioshare_server::{
    api,
    config::ServerConfig,
    services::{AuthService, FileStorage},
    state::AppState,
};
use audioshare_storage::LocalStorageContext;
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "audioshare-server")]
#[command(about = "AudioShare multi-user audio sharing server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "AUDIOSHARE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Create a new user
    AddUser {
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "audioshare_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await?,
        Commands::AddUser {
            name,
            username,
            password,
        } => add_user(config, name, username, password).await?,
        Commands::ListUsers => list_users(config).await?,
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting AudioShare Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let pool = audioshare_storage::connect(&config.storage.database_url).await?;
    let storage = LocalStorageContext::new(pool);
    tracing::info!("Database connected");

    // Initialize file storage
    let file_storage = FileStorage::new(config.storage.audio_storage_path.clone());
    file_storage.initialize().await?;
    let file_storage = Arc::new(file_storage);
    tracing::info!(
        "File storage initialized at {}",
        config.storage.audio_storage_path.display()
    );

    // Initialize auth service
    let auth_service = AuthService::new(
        config.auth.secret_key.as_bytes(),
        Arc::new(storage.clone()),
        config.auth.access_token_ttl(),
        config.auth.refresh_token_ttl(),
    )?;
    let auth_service = Arc::new(auth_service);
    tracing::info!("Auth service initialized");

    // Build application state and router
    let app_state = AppState::with_storage(storage, auth_service, file_storage);
    let app = api::router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(
    config: ServerConfig,
    name: String,
    username: String,
    password: String,
) -> anyhow::Result<()> {
    let pool = audioshare_storage::connect(&config.storage.database_url).await?;
    let storage = LocalStorageContext::new(pool);

    let user = CreateUser {
        name,
        username,
        password,
    };
    user.validate()?;

    let username = user.username.clone();
    let id = storage.create_user(user).await?;
    println!("Created user {} with id {}", username, id);

    Ok(())
}

async fn list_users(config: ServerConfig) -> anyhow::Result<()> {
    let pool = audioshare_storage::connect(&config.storage.database_url).await?;
    let storage = LocalStorageContext::new(pool);

    let users = storage.list_users().await?;

    println!("Users:");
    for user in users {
        println!("  {} - {} ({})", user.id, user.name, user.username);
    }

    Ok(())
}
