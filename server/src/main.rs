use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use todo_server::{ServerConfig, Store};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_server=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::parse();
    let addr = config.socket_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, origins = ?config.cors_origins, "listening");

    let router = todo_server::router(Arc::new(Store::new()), &config);
    todo_server::run(listener, router).await
}
