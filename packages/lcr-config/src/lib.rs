mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Postgres, Security, Service, Storage};

use std::{fs, net::SocketAddr, path::Path};

/// Reads, normalizes and validates the TOML config at `path`.
pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|source| Error::ReadConfig { path: path.to_path_buf(), source })?;
	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|source| Error::ParseConfig { path: path.to_path_buf(), source })?;

	normalize(&mut cfg);
	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	let http_bind = cfg.service.http_bind.trim();

	if http_bind.is_empty() {
		return Err(invalid("service.http_bind", "must be non-empty."));
	}
	if http_bind.parse::<SocketAddr>().is_err() {
		return Err(invalid(
			"service.http_bind",
			"must be a socket address such as 127.0.0.1:8080.",
		));
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(invalid("storage.postgres.dsn", "must be non-empty."));
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(invalid("storage.postgres.pool_max_conns", "must be greater than zero."));
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let service = &mut cfg.service;

	service.http_bind = service.http_bind.trim().to_string();
	service.log_level = match service.log_level.trim() {
		"" => types::default_log_level(),
		level => level.to_string(),
	};
}

fn invalid(key: &'static str, message: &str) -> Error {
	Error::Validation { key, message: message.to_string() }
}
