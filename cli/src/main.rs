//! Music catalog CLI server
//!
//! ```sh
//! # Run with default config (~/.config/music-catalog/config.toml)
//! music-catalog
//!
//! # Custom config path and port
//! music-catalog --config /etc/music-catalog/config.toml --port 8080
//!
//! # Write a default config file and exit
//! music-catalog --init
//!
//! # Validate config without starting
//! music-catalog --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use music_catalog::config::AppConfig;
use music_catalog::server::{init_tracing, ServerHandle, ServerOptions};

/// Music catalog REST backend.
#[derive(Parser, Debug)]
#[command(
    name = "music-catalog",
    version,
    about = "REST backend for a music catalog with uploads",
    long_about = "Music catalog: users, categories with types, and tracks with \
                  uploaded audio files.\n\n\
                  Default config: ~/.config/music-catalog/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "MUSIC_CATALOG_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Write the default configuration to the config path and exit.
    #[arg(long)]
    init: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default admin user.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .unwrap_or_else(music_catalog::default_config_path);

    if cli.init {
        if config_path.exists() {
            println!("Config already exists at {}", config_path.display());
        } else {
            AppConfig::default().save(&config_path)?;
            println!("Default config written to {}", config_path.display());
        }
        return Ok(());
    }

    // ── Load configuration ─────────────────────────────────────
    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            if cli.check {
                eprintln!("Invalid configuration {}: {}", config_path.display(), e);
                std::process::exit(1);
            }
            eprintln!(
                "Failed to load config from {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            AppConfig::default()
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.address());
        println!("   Database    : {}", config.database.connection_url());
        println!("   Uploads     : {}", config.uploads.dir.display());
        let smtp = if config.mail.is_configured() {
            config.mail.smtp_host.as_str()
        } else {
            "(log only)"
        };
        println!("   SMTP        : {}", smtp);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    // ── Start server ───────────────────────────────────────────
    let handle = match ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await
    {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start server: {}", e);
            return Err(e);
        }
    };

    handle.install_signal_handler();
    info!("Press Ctrl+C to shut down gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
