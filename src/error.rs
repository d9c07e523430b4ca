//! Relay-level error types shared across flows, transports, and the HTTP surface.

// self
use crate::_prelude::*;

/// Relay-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical relay error exposed by public APIs.
///
/// Provider-side OAuth failures (`invalid_grant`, `invalid_client`, ...) are not represented
/// here: the relay forwards those bodies and statuses verbatim through
/// [`ProviderResponse`](crate::auth::ProviderResponse).
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration or request construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Provider answered with a payload the relay cannot forward.
	#[error(transparent)]
	Upstream(#[from] UpstreamError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Required query parameter was absent or empty.
	#[error("Missing required query parameter `{name}`.")]
	MissingParameter {
		/// Name of the missing parameter.
		name: &'static str,
	},
	/// Query string could not be decoded (e.g., a repeated `code`).
	#[error("Query string is malformed: {reason}.")]
	InvalidQuery {
		/// Decoder message.
		reason: String,
	},
	/// Provider redirected back with an `error` instead of an authorization code.
	#[error("Authorization was not granted: {error}.")]
	AuthorizationDenied {
		/// Provider-supplied OAuth error code (e.g., `access_denied`).
		error: String,
		/// Provider-supplied description, when present.
		description: Option<String>,
	},
	/// HTTP listener could not be bound or failed while serving.
	#[error("HTTP server failed on {addr}.")]
	Server {
		/// Address the listener was bound to.
		addr: std::net::SocketAddr,
		/// Underlying socket failure.
		#[source]
		source: std::io::Error,
	},
}

/// Configuration and validation failures raised by the relay.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Redirect URI cannot be parsed.
	#[error("Redirect URI is invalid.")]
	InvalidRedirect {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Provider descriptor failed validation.
	#[error(transparent)]
	Descriptor(#[from] crate::provider::ProviderDescriptorError),
	/// Required environment variable is not set.
	#[error("Environment variable `{name}` is required.")]
	MissingEnv {
		/// Variable name.
		name: &'static str,
	},
	/// Environment variable is set but cannot be used.
	#[error("Environment variable `{name}` is invalid: {reason}.")]
	InvalidEnv {
		/// Variable name.
		name: &'static str,
		/// Human-readable explanation.
		reason: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Provider responses that cannot be relayed.
#[derive(Debug, ThisError)]
pub enum UpstreamError {
	/// Token endpoint responded with a body that is not JSON.
	#[error("Token endpoint returned a non-JSON body with status {status}.")]
	MalformedBody {
		/// HTTP status code returned by the provider.
		status: u16,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Transport-level failures (network, IO, timeout).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Token endpoint could not be reached.
	#[error("Network error occurred while calling the token endpoint.")]
	Unreachable {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Token endpoint did not answer within the configured timeout.
	#[error("Token endpoint did not respond before the timeout elapsed.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the token endpoint.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn unreachable(src: impl Into<BoxError>) -> Self {
		Self::Unreachable { source: src.into() }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl Into<BoxError>) -> Self {
		Self::Timeout { source: src.into() }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::timeout(e) } else { Self::unreachable(e) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn messages_name_the_failing_input() {
		let err = Error::MissingParameter { name: "code" };

		assert_eq!(err.to_string(), "Missing required query parameter `code`.");

		let err = Error::InvalidQuery { reason: "duplicate field `code`".into() };

		assert_eq!(err.to_string(), "Query string is malformed: duplicate field `code`.");

		let err = Error::from(ConfigError::MissingEnv { name: "SPOTIFY_CLIENT_ID" });

		assert_eq!(err.to_string(), "Environment variable `SPOTIFY_CLIENT_ID` is required.");
	}

	#[test]
	fn transport_helpers_accept_plain_messages() {
		let err = TransportError::unreachable("connection refused");

		assert!(matches!(err, TransportError::Unreachable { .. }));
		assert_eq!(
			err.source().map(ToString::to_string).as_deref(),
			Some("connection refused")
		);
	}
}
