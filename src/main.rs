//! Runs the relay on the configured address until Ctrl-C.

// crates.io
use color_eyre::Result;
use tracing_subscriber::EnvFilter;
// self
use spotify_token_relay::{config::RelayConfig, server};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
		.init();

	let config = RelayConfig::from_env()?;

	server::serve(config, async {
		if let Err(e) = tokio::signal::ctrl_c().await {
			tracing::error!(error = %e, "failed to listen for Ctrl-C");

			std::future::pending::<()>().await;
		}
	})
	.await?;

	Ok(())
}
