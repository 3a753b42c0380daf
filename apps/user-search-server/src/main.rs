use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use runtime::{AppConfig, CliArgs};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use user_search::{UserSearch, UserSearchConfig};

const MODULE_NAME: &str = "user_search";

/// User Search Server - substring search over a user dataset
#[derive(Parser)]
#[command(name = "user-search-server")]
#[command(about = "User Search Server - substring search over a user dataset")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Dataset file (overrides modules.user_search.dataset_path)
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration and dataset
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config/app
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (port / verbosity / dataset)
    config.apply_cli_overrides(&args);
    if let Some(dataset) = &cli.dataset {
        config.set_module_value(
            MODULE_NAME,
            "dataset_path",
            serde_json::Value::String(dataset.to_string_lossy().to_string()),
        );
    }

    // Initialize logging
    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, &config.home_dir());
    tracing::info!("User Search Server starting");

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    // Execute command
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config).await,
    }
}

fn init_module(config: &AppConfig) -> Result<UserSearch> {
    let module_cfg: UserSearchConfig = config.module_config(MODULE_NAME)?;
    Ok(UserSearch::init(module_cfg, &config.home_dir()))
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Initializing modules...");
    let module = init_module(&config)?;

    let timeout = match config.server.timeout_sec {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };
    let app = module.router(timeout)?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "invalid bind address {}:{}",
                config.server.host, config.server.port
            )
        })?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        "Listening on {} (search route {})",
        listener.local_addr()?,
        module.config().route
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    // AppConfig::load_* already normalized & created home_dir
    let module = init_module(&config)?;
    let count = module.check_dataset().await?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Dataset: {} records", count);
    println!("Home dir: {}", Path::new(&config.server.home_dir).display());

    Ok(())
}
