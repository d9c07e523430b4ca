//! Provider responses relayed back to the caller, plus typed views for inspection.

// crates.io
use serde_json::Value;
// self
use crate::{_prelude::*, auth::TokenSecret, error::UpstreamError};

/// Status and decoded JSON body returned by the token endpoint.
///
/// The body is forwarded to the caller as-is; [`token`](Self::token) and
/// [`oauth_error`](Self::oauth_error) only offer read-only typed views for logging and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct ProviderResponse {
	/// HTTP status code returned by the provider.
	pub status: u16,
	/// Decoded JSON body.
	pub body: Value,
}
impl ProviderResponse {
	/// Decodes a raw token endpoint response body.
	pub fn from_body(status: u16, body: &[u8]) -> Result<Self, UpstreamError> {
		let mut de = serde_json::Deserializer::from_slice(body);
		let body = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| UpstreamError::MalformedBody { status, source })?;

		Ok(Self { status, body })
	}

	/// Returns true for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Typed token view, available when the provider answered with a 2xx token payload.
	pub fn token(&self) -> Option<TokenResponse> {
		if !self.is_success() {
			return None;
		}

		TokenResponse::deserialize(&self.body).ok()
	}

	/// Typed OAuth error view, available when the body carries a string `error` field.
	pub fn oauth_error(&self) -> Option<OAuthErrorResponse> {
		OAuthErrorResponse::deserialize(&self.body).ok()
	}
}

/// Successful token endpoint payload (RFC 6749 §5.1).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
	/// Access token used against the Web API.
	pub access_token: TokenSecret,
	/// Token type, `Bearer` for Spotify.
	pub token_type: String,
	/// Lifetime of the access token in seconds.
	pub expires_in: u64,
	/// Refresh token, returned on code exchange and optionally rotated on refresh.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<TokenSecret>,
	/// Space-delimited granted scopes.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub scope: Option<String>,
}
impl TokenResponse {
	/// Instant the access token stops being valid, relative to `issued_at`.
	pub fn expires_at(&self, issued_at: OffsetDateTime) -> OffsetDateTime {
		let secs = i64::try_from(self.expires_in).unwrap_or(i64::MAX);

		issued_at.saturating_add(Duration::seconds(secs))
	}

	/// Iterator over the granted scopes.
	pub fn scopes(&self) -> impl Iterator<Item = &str> {
		self.scope.as_deref().unwrap_or_default().split_whitespace()
	}
}

/// Error payload returned by the token endpoint (RFC 6749 §5.2).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthErrorResponse {
	/// OAuth error code such as `invalid_grant`.
	pub error: String,
	/// Human-readable description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error_description: Option<String>,
}
impl OAuthErrorResponse {
	/// Builds an error payload.
	pub fn new(error: impl Into<String>, description: Option<String>) -> Self {
		Self { error: error.into(), error_description: description }
	}
}
