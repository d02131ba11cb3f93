//! Single-room chat relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roomcast-server
//! cargo run --bin roomcast-server -- --host 0.0.0.0 --port 3000 --category Ogólne --category Praca
//! ```

use std::sync::Arc;

use clap::Parser;
use roomcast_server::{
    RelayConfig, build_server,
    config::{DEFAULT_FALLBACK_CATEGORY, DEFAULT_MAX_ATTACHMENT_BYTES, DEFAULT_OUTBOUND_BUFFER},
};
use roomcast_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "roomcast-server")]
#[command(about = "Single-room chat relay over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Initial category; repeat for several (default: Ogólne, Praca, Rozrywka)
    #[arg(short = 'c', long = "category")]
    categories: Vec<String>,

    /// Category used when the room has none
    #[arg(long, default_value = DEFAULT_FALLBACK_CATEGORY)]
    fallback_category: String,

    /// Outbound queue capacity per connection
    #[arg(long, default_value_t = DEFAULT_OUTBOUND_BUFFER)]
    outbound_buffer: usize,

    /// Per-file attachment limit in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_ATTACHMENT_BYTES)]
    max_attachment_bytes: usize,

    /// Origin allowed by CORS; repeat for several (default: any origin)
    #[arg(long = "allow-origin")]
    allowed_origins: Vec<String>,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn relay_config(&self) -> RelayConfig {
        let defaults = RelayConfig::default();
        RelayConfig {
            initial_categories: if self.categories.is_empty() {
                defaults.initial_categories
            } else {
                self.categories.clone()
            },
            fallback_category: self.fallback_category.clone(),
            outbound_buffer: self.outbound_buffer,
            max_attachment_bytes: self.max_attachment_bytes,
            allowed_origins: self.allowed_origins.clone(),
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let server = match build_server(&args.relay_config(), Arc::new(SystemClock)) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
