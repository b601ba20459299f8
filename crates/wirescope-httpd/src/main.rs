//! Wirescope HTTP server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use wirescope_httpd::{app, AppState};

/// Wirescope decode server
#[derive(Parser, Debug)]
#[command(name = "wirescope-httpd")]
#[command(about = "HTTP server exposing the wirescope wire-format decoders")]
struct Args {
    /// Listen address
    #[arg(long, default_value = "0.0.0.0:8080", env = "WIRESCOPE_LISTEN")]
    listen: SocketAddr,

    /// Maximum request body size in bytes
    #[arg(
        long,
        default_value_t = wirescope_httpd::DEFAULT_MAX_BODY_BYTES,
        env = "WIRESCOPE_MAX_BODY_BYTES"
    )]
    max_body_bytes: usize,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wirescope_httpd=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();
    let mut state = AppState::new();
    state.max_body_bytes = args.max_body_bytes;
    let state = Arc::new(state);

    let listener = tokio::net::TcpListener::bind(args.listen)
        .await
        .expect("failed to bind listen address");
    info!(address = %args.listen, "server listening");
    axum::serve(listener, app(state)).await.expect("server error");
}
