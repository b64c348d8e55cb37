pub mod routes;
pub mod state;

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use color_eyre::eyre;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(
	version = lcr_cli::VERSION,
	about = lcr_cli::ABOUT,
	rename_all = "kebab",
	styles = lcr_cli::styles(),
)]
pub struct Args {
	/// Path to the TOML config, see `lcr.example.toml`.
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = lcr_config::load(&args.config)?;

	init_tracing(&config)?;

	let http_addr = resolve_http_addr(&config)?;
	let state = AppState::new(&config).await?;
	let http_listener = TcpListener::bind(http_addr).await?;

	tracing::info!(%http_addr, "HTTP server listening.");

	axum::serve(http_listener, routes::router(state))
		.with_graceful_shutdown(shutdown_signal())
		.await?;

	tracing::info!("HTTP server stopped.");

	Ok(())
}

fn resolve_http_addr(config: &lcr_config::Config) -> color_eyre::Result<SocketAddr> {
	let http_addr: SocketAddr = config.service.http_bind.parse()?;

	if config.security.bind_localhost_only && !http_addr.ip().is_loopback() {
		return Err(eyre::eyre!(
			"http_bind {http_addr} must be a loopback address when bind_localhost_only is true."
		));
	}

	Ok(http_addr)
}

async fn shutdown_signal() {
	if let Err(err) = signal::ctrl_c().await {
		tracing::error!(error = %err, "Failed to listen for the shutdown signal.");

		// Never resolve; keep serving until the process is killed.
		std::future::pending::<()>().await;
	}

	tracing::info!("Shutdown signal received.");
}

fn init_tracing(config: &lcr_config::Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).try_init().map_err(|err| eyre::eyre!(err))?;

	Ok(())
}
