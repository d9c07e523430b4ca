//! Relay operations: authorization redirect, code exchange, and token refresh.

pub mod authorize;
pub mod callback;
pub mod common;
pub mod refresh;

pub use callback::*;
pub use common::*;
pub use refresh::*;

// self
use crate::{
	_prelude::*,
	auth::ClientCredentials,
	http::TokenHttpClient,
	oauth::TransportErrorMapper,
	provider::{ProviderDescriptor, ProviderStrategy},
};
#[cfg(feature = "reqwest")]
use crate::{
	config::RelayConfig, http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper,
	provider::DefaultProviderStrategy,
};

#[cfg(feature = "reqwest")]
/// Relay specialized for the crate's default reqwest transport stack.
pub type ReqwestRelay = Relay<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Performs the authorization-code relay against a single provider descriptor.
///
/// The relay owns the HTTP client, descriptor, strategy, and client credentials. It holds no
/// per-request state, so one instance behind an [`Arc`] serves every request concurrently and
/// each operation is independent of the others.
#[derive(Clone)]
pub struct Relay<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Provider descriptor that defines endpoints, scopes, and quirks.
	pub descriptor: ProviderDescriptor,
	/// Strategy responsible for provider-specific form additions and error classification.
	pub strategy: Arc<dyn ProviderStrategy>,
	/// Client identifier, secret, and redirect URI used in every call.
	pub credentials: ClientCredentials,
}
impl<C, M> Relay<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a relay that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		descriptor: ProviderDescriptor,
		strategy: Arc<dyn ProviderStrategy>,
		credentials: ClientCredentials,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			descriptor,
			strategy,
			credentials,
		}
	}
}
#[cfg(feature = "reqwest")]
impl Relay<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a reqwest-backed relay whose token calls are bounded by `timeout`.
	pub fn new(
		descriptor: ProviderDescriptor,
		credentials: ClientCredentials,
		timeout: Duration,
	) -> Result<Self> {
		let http_client = ReqwestHttpClient::new(timeout)?;

		Ok(Self::with_http_client(
			descriptor,
			Arc::new(DefaultProviderStrategy),
			credentials,
			http_client,
			Arc::new(ReqwestTransportErrorMapper),
		))
	}

	/// Creates a reqwest-backed relay from loaded configuration.
	pub fn from_config(config: &RelayConfig) -> Result<Self> {
		Self::new(config.descriptor.clone(), config.credentials.clone(), config.upstream_timeout)
	}
}
impl<C, M> Debug for Relay<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Relay")
			.field("descriptor", &self.descriptor)
			.field("credentials", &self.credentials)
			.finish()
	}
}
