//! Command-line client for the collaborative pixel canvas.
//!
//! Prints the canvas size from the initial snapshot and every pixel update,
//! and sends paint commands typed at the prompt.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//! A rejected session cookie exits immediately.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hekiga-client -- --session 42
//! cargo run --bin hekiga-client -- -u ws://127.0.0.1:3000/ws -s 7
//! ```

use clap::Parser;

use hekiga_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hekiga-client")]
#[command(about = "Collaborative pixel canvas client", long_about = None)]
struct Args {
    /// Value of the `session` cookie presented to the server
    #[arg(short = 's', long)]
    session: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = hekiga_client::run_client(args.url, args.session).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
