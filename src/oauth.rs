//! Transport error mapping between the HTTP layer and the relay taxonomy.

pub use oauth2;

// crates.io
use oauth2::HttpClientError;
// self
#[cfg(feature = "reqwest")] use crate::error::ConfigError;
use crate::{_prelude::*, error::TransportError, provider::GrantType};

/// Maps HTTP transport failures into relay [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a relay error.
	fn map_transport_error(&self, grant: GrantType, error: HttpClientError<E>) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, _grant: GrantType, err: HttpClientError<ReqwestError>) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(*inner),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) => map_generic_transport_error(message),
			_ => map_generic_transport_error("unclassified HTTP client failure"),
		}
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}

	TransportError::from(err).into()
}

/// Wraps a free-form transport message as an unreachable-upstream failure.
pub fn map_generic_transport_error(message: impl Display) -> Error {
	TransportError::unreachable(format!(
		"HTTP client error occurred while calling the token endpoint: {message}."
	))
	.into()
}
