//! Local OAuth 2.0 authorization-code relay for the Spotify Accounts service: send the browser
//! to the consent page, exchange the returned code, and refresh access tokens on demand.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod provider;
#[cfg(feature = "server")] pub mod server;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::ClientCredentials,
		flows::{ReqwestRelay, Relay},
		http::ReqwestHttpClient,
		oauth::ReqwestTransportErrorMapper,
		provider::{DefaultProviderStrategy, ProviderDescriptor, ProviderStrategy},
	};

	/// Client identifier shared by the test fixtures.
	pub const TEST_CLIENT_ID: &str = "abc";
	/// Client secret shared by the test fixtures.
	pub const TEST_CLIENT_SECRET: &str = "xyz";
	/// Redirect URI shared by the test fixtures.
	pub const TEST_REDIRECT_URI: &str = "http://localhost:5555/callback";

	/// Builds the credential fixture used across integration tests.
	pub fn test_credentials() -> ClientCredentials {
		ClientCredentials::new(TEST_CLIENT_ID, TEST_CLIENT_SECRET, TEST_REDIRECT_URI)
			.expect("Test credentials should be valid.")
	}

	/// Builds a Spotify-shaped descriptor whose endpoints live on `base` (usually an `httpmock`
	/// server URL).
	pub fn test_descriptor(base: &str) -> ProviderDescriptor {
		ProviderDescriptor::spotify_builder()
			.authorization_endpoint(
				Url::parse(&format!("{base}/authorize"))
					.expect("Failed to parse mock authorization endpoint URL."),
			)
			.token_endpoint(
				Url::parse(&format!("{base}/api/token"))
					.expect("Failed to parse mock token endpoint URL."),
			)
			.build()
			.expect("Failed to build mock provider descriptor.")
	}

	/// Constructs a [`Relay`] backed by the reqwest transport with a short timeout, pointed at
	/// the provided descriptor.
	pub fn build_reqwest_test_relay(descriptor: ProviderDescriptor) -> ReqwestRelay {
		let strategy: Arc<dyn ProviderStrategy> = Arc::new(DefaultProviderStrategy);
		let http_client = ReqwestHttpClient::new(Duration::seconds(2))
			.expect("Failed to build Reqwest client for tests.");

		Relay::with_http_client(
			descriptor,
			strategy,
			test_credentials(),
			http_client,
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(feature = "server")] use {color_eyre as _, tracing_subscriber as _};
#[cfg(test)] use {httpmock as _, parking_lot as _, tower as _};
#[cfg(all(test, not(feature = "server")))] use {color_eyre as _, tokio as _};
