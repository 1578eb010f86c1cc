//! Collaborative pixel canvas server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hekiga-server
//! cargo run --bin hekiga-server -- --host 0.0.0.0 --port 3000 --snapshot canvas.png
//! ```

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use hekiga_server::{
    bootstrap::{Application, BootstrapError, authenticator_from_config},
    config::{QueueBackend, ServerConfig},
    ui::shutdown_signal,
};
use hekiga_shared::logger::setup_logger;
use reqwest::Url;

#[derive(Parser, Debug)]
#[command(name = "hekiga-server")]
#[command(about = "Collaborative pixel canvas server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Canvas width in pixels
    #[arg(long, default_value = "500")]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value = "250")]
    height: u32,

    /// Number of pixel events retained for slow subscribers
    #[arg(long, default_value = "1048576")]
    queue_capacity: usize,

    /// Broadcast queue implementation
    #[arg(long, value_enum, default_value_t = QueueBackend::Ring)]
    queue_backend: QueueBackend,

    /// Minimum time between two accepted paints of the same user, in milliseconds
    #[arg(long, default_value = "10000")]
    cooldown_ms: u64,

    /// PNG file to restore the canvas from and save it to
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Seconds between two snapshot saves
    #[arg(long, default_value = "60")]
    persist_interval_secs: u64,

    /// Authorization service queried with `?cookie=<session>`
    #[arg(long)]
    auth_endpoint: Option<Url>,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            width: args.width,
            height: args.height,
            queue_capacity: args.queue_capacity,
            queue_backend: args.queue_backend,
            cooldown: Duration::from_millis(args.cooldown_ms),
            snapshot_path: args.snapshot,
            persist_interval: Duration::from_secs(args.persist_interval_secs),
            auth_endpoint: args.auth_endpoint,
        }
    }
}

async fn run(config: ServerConfig) -> Result<(), BootstrapError> {
    let authenticator = authenticator_from_config(&config)?;
    let application = Application::build(&config, authenticator).await?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    application.run(listener, shutdown_signal()).await
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = ServerConfig::from(Args::parse());
    if let Err(e) = config.validate() {
        tracing::error!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
