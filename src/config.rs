//! Environment-driven configuration loaded once at startup.

// std
use std::net::SocketAddr;
// self
use crate::{
	_prelude::*,
	auth::ClientCredentials,
	error::ConfigError,
	http::DEFAULT_UPSTREAM_TIMEOUT,
	provider::{ProviderDescriptor, SPOTIFY_AUTHORIZE_URL, SPOTIFY_TOKEN_URL, parse_endpoint},
};

/// Spotify application client identifier.
pub const ENV_CLIENT_ID: &str = "SPOTIFY_CLIENT_ID";
/// Spotify application client secret.
pub const ENV_CLIENT_SECRET: &str = "SPOTIFY_CLIENT_SECRET";
/// Redirect URI registered with the Spotify application.
pub const ENV_REDIRECT_URI: &str = "SPOTIFY_REDIRECT_URI";
/// Socket address the HTTP server listens on.
pub const ENV_BIND_ADDR: &str = "RELAY_BIND_ADDR";
/// Per-call token endpoint timeout, in whole seconds.
pub const ENV_UPSTREAM_TIMEOUT_SECS: &str = "RELAY_UPSTREAM_TIMEOUT_SECS";
/// Authorization endpoint override.
pub const ENV_AUTHORIZE_URL: &str = "SPOTIFY_AUTHORIZE_URL";
/// Token endpoint override.
pub const ENV_TOKEN_URL: &str = "SPOTIFY_TOKEN_URL";

/// Redirect URI used when [`ENV_REDIRECT_URI`] is unset.
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:5555/callback";
/// Listen address used when [`ENV_BIND_ADDR`] is unset.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5555";

/// Everything the relay needs to run, resolved and validated.
#[derive(Clone, Debug)]
pub struct RelayConfig {
	/// Client identifier, secret, and redirect URI.
	pub credentials: ClientCredentials,
	/// Provider endpoints and scopes.
	pub descriptor: ProviderDescriptor,
	/// Listen address for the HTTP server.
	pub bind_addr: SocketAddr,
	/// Bound on a single token endpoint call.
	pub upstream_timeout: Duration,
}
impl RelayConfig {
	/// Reads the configuration from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Reads the configuration through `lookup`, which returns the value of a variable.
	///
	/// Empty values count as unset.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let var = |name: &str| lookup(name).filter(|value| !value.is_empty());
		let required =
			|name: &'static str| var(name).ok_or(ConfigError::MissingEnv { name });
		let client_id = required(ENV_CLIENT_ID)?;
		let client_secret = required(ENV_CLIENT_SECRET)?;
		let redirect_uri = var(ENV_REDIRECT_URI).unwrap_or_else(|| DEFAULT_REDIRECT_URI.into());
		let credentials = ClientCredentials::new(client_id, client_secret, redirect_uri)
			.map_err(|e| invalid(ENV_REDIRECT_URI, e))?;
		let authorize_url = var(ENV_AUTHORIZE_URL).unwrap_or_else(|| SPOTIFY_AUTHORIZE_URL.into());
		let token_url = var(ENV_TOKEN_URL).unwrap_or_else(|| SPOTIFY_TOKEN_URL.into());
		let descriptor = ProviderDescriptor::spotify_builder()
			.authorization_endpoint(
				parse_endpoint("authorization", &authorize_url)
					.map_err(|e| invalid(ENV_AUTHORIZE_URL, e))?,
			)
			.token_endpoint(
				parse_endpoint("token", &token_url).map_err(|e| invalid(ENV_TOKEN_URL, e))?,
			)
			.build()?;
		let bind_addr = var(ENV_BIND_ADDR)
			.as_deref()
			.unwrap_or(DEFAULT_BIND_ADDR)
			.parse::<SocketAddr>()
			.map_err(|e| invalid(ENV_BIND_ADDR, e))?;
		let upstream_timeout = match var(ENV_UPSTREAM_TIMEOUT_SECS) {
			Some(raw) => parse_timeout(&raw)?,
			None => DEFAULT_UPSTREAM_TIMEOUT,
		};

		Ok(Self { credentials, descriptor, bind_addr, upstream_timeout })
	}
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
	let secs = raw.trim().parse::<i64>().map_err(|e| invalid(ENV_UPSTREAM_TIMEOUT_SECS, e))?;

	if secs <= 0 {
		return Err(invalid(ENV_UPSTREAM_TIMEOUT_SECS, "must be a positive number of seconds"));
	}

	Ok(Duration::seconds(secs))
}

fn invalid(name: &'static str, reason: impl Display) -> ConfigError {
	ConfigError::InvalidEnv { name, reason: reason.to_string() }
}
