use storefront::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::from_env()?;
    let server = StorefrontServer::builder().config(config).build().await?;

    tracing::info!(addr = %server.local_addr()?, "listening");
    server.run().await?;
    Ok(())
}
