//! Transport primitives for token endpoint calls.
//!
//! The module exposes [`TokenHttpClient`] so the relay can run against any HTTP stack that
//! speaks `oauth2`'s [`AsyncHttpClient`] contract. The default [`ReqwestHttpClient`] bounds
//! every call with a timeout and never follows redirects.

// crates.io
use oauth2::{AsyncHttpClient, HttpClientError};
#[cfg(feature = "reqwest")] use oauth2::{HttpRequest, HttpResponse};
#[cfg(feature = "reqwest")] use reqwest::redirect::Policy;
// self
#[cfg(feature = "reqwest")] use crate::error::ConfigError;
use crate::_prelude::*;

/// Default bound on a single token endpoint call.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::seconds(10);

/// Abstraction over HTTP transports capable of executing token endpoint calls.
///
/// The trait is the relay's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so a single instance can be shared by every request handler, and
/// the handles they return must own whatever state they need so request futures stay `Send`.
pub trait TokenHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle used for a single call.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Returns a handle ready to dispatch one request.
	fn handle(&self) -> Self::Handle;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Token requests must not follow redirects: the token endpoint answers directly, and a
/// redirect would replay client credentials to another origin. Custom clients passed through
/// [`ReqwestHttpClient::with_client`] should be configured the same way.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a client with the provided per-request timeout and redirects disabled.
	pub fn new(timeout: Duration) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.timeout(timeout.unsigned_abs())
			.redirect(Policy::none())
			.build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl TokenHttpClient for ReqwestHttpClient {
	type Handle = ReqwestHandle;
	type TransportError = ReqwestError;

	fn handle(&self) -> Self::Handle {
		ReqwestHandle(self.0.clone())
	}
}

/// Handle returned by [`ReqwestHttpClient`] that satisfies [`TokenHttpClient`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHandle(ReqwestClient);
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for ReqwestHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = self.0.clone();

		Box::pin(async move {
			let response =
				client.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
