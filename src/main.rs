use portal::config::AppConfig;
use portal::server::builder::AppBuilder;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("portal=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::load()?;
    AppBuilder::new(config).serve().await
}
