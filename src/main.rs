//! Tour booking service
//!
//! ```sh
//! # Default config (~/.config/tour-booking/config.toml)
//! tour-booking
//!
//! # Custom config path and port
//! tour-booking --config /etc/tour-booking/config.toml --api-port 9000
//!
//! # Validate config without starting
//! tour-booking --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use tour_booking::config::AppConfig;
use tour_booking::server::{init_tracing, ServerHandle, ServerOptions};

#[derive(Parser, Debug)]
#[command(
    name = "tour-booking",
    version,
    about = "Booking lifecycle service for tours, guides and drivers",
    long_about = "REST API for direct bookings, provider confirmation and \
                  multi-recipient inquiries.\n\n\
                  Default config: ~/.config/tour-booking/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "BOOKING_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Use in-process storage instead of the configured database.
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .unwrap_or_else(tour_booking::default_config_path);

    let loaded = AppConfig::load(&config_path);

    if cli.check {
        return match loaded {
            Ok(config) => {
                println!("✅ Configuration is valid");
                println!("   Config file : {}", config_path.display());
                println!("   API address : {}", config.api_address());
                println!("   Database    : {}", config.database.url);
                println!("   Log level   : {}", config.logging.level);
                println!("   Expiry days : {}", config.inquiries.expiry_days);
                Ok(())
            }
            Err(e) => {
                eprintln!("❌ {}", e);
                Err(e.into())
            }
        };
    }

    let mut config = match loaded {
        Ok(mut cfg) => {
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            AppConfig::default()
        }
    };

    if let Some(port) = cli.api_port {
        info!("CLI override: api_port = {}", port);
        config.server.api_port = port;
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        in_memory: cli.in_memory,
    })
    .await?;

    handle.install_signal_handler();
    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
