use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use model_mock_server::{Cli, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "model_mock_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from(Cli::parse());
    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        max_request_bytes = config.max_request_bytes,
        "Mock server running on port {}",
        config.port
    );

    model_mock_server::run(listener, config).await
}
