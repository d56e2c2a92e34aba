//! Terminal chat client for Tsudoi.
//!
//! Joins the room with a display name, then sends each input line as a
//! public message. `/msg`, `/nick`, `/who` and `/quit` are also available.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//! A rejected display name exits immediately.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tsudoi-client -- --name alice
//! cargo run --bin tsudoi-client -- -n bob -u ws://127.0.0.1:3000/ws
//! ```

use clap::Parser;

use tsudoi_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "tsudoi-client")]
#[command(about = "Terminal client for the Tsudoi chat server", long_about = None)]
struct Args {
    /// Display name (must be unique in the room)
    #[arg(short = 'n', long)]
    name: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = tsudoi_client::run_client(args.url, args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
