//! Binary entrypoint for the mtrack API server.
use mtrack_api::{run, AppState, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let state = ServerConfig::from_env().and_then(|config| {
        let state = AppState::from_config(&config)?;
        Ok((config, state))
    });

    let (config, state) = match state {
        Ok(ready) => ready,
        Err(e) => {
            tracing::error!(error = %e, "startup aborted");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(config.addr, state).await {
        tracing::error!(error = %e, "server stopped");
        std::process::exit(1);
    }
}
