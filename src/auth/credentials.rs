//! Immutable client credentials shared by every relay operation.

// crates.io
use oauth2::{ClientId, RedirectUrl};
// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Client identifier, secret, and registered redirect URI for the Spotify application.
///
/// Built once at startup and handed to the relay by value; nothing mutates it afterwards.
/// Empty identifiers are accepted here because the provider, not the relay, rejects them.
#[derive(Clone)]
pub struct ClientCredentials {
	client_id: ClientId,
	client_secret: TokenSecret,
	redirect_uri: RedirectUrl,
}
impl ClientCredentials {
	/// Creates credentials after validating that `redirect_uri` is an absolute URL.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		redirect_uri: impl Into<String>,
	) -> Result<Self, ConfigError> {
		let redirect_uri = RedirectUrl::new(redirect_uri.into())
			.map_err(|source| ConfigError::InvalidRedirect { source })?;

		Ok(Self {
			client_id: ClientId::new(client_id.into()),
			client_secret: TokenSecret::new(client_secret),
			redirect_uri,
		})
	}

	/// OAuth 2.0 client identifier.
	pub fn client_id(&self) -> &str {
		self.client_id.as_str()
	}

	/// Confidential client secret.
	pub fn client_secret(&self) -> &TokenSecret {
		&self.client_secret
	}

	/// Redirect URI exactly as configured (not normalized).
	pub fn redirect_uri(&self) -> &str {
		self.redirect_uri.as_str()
	}

	/// `Authorization` header value for token endpoint calls.
	pub fn basic_authorization(&self) -> String {
		crate::auth::basic_authorization(self.client_id(), self.client_secret.expose())
	}
}
impl Debug for ClientCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentials")
			.field("client_id", &self.client_id())
			.field("client_secret", &self.client_secret)
			.field("redirect_uri", &self.redirect_uri())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn keeps_redirect_uri_verbatim() {
		let credentials = ClientCredentials::new("abc", "xyz", "http://localhost:5555/callback")
			.expect("Credentials should build.");

		assert_eq!(credentials.client_id(), "abc");
		assert_eq!(credentials.redirect_uri(), "http://localhost:5555/callback");
		assert_eq!(credentials.basic_authorization(), "Basic YWJjOnh5eg==");
	}

	#[test]
	fn rejects_relative_redirect_uri() {
		let err = ClientCredentials::new("abc", "xyz", "/callback")
			.expect_err("Relative redirect URIs should be rejected.");

		assert!(matches!(err, ConfigError::InvalidRedirect { .. }));
	}

	#[test]
	fn debug_redacts_secret() {
		let credentials = ClientCredentials::new("abc", "do-not-print", "http://localhost/cb")
			.expect("Credentials should build.");
		let rendered = format!("{credentials:?}");

		assert!(rendered.contains("abc"));
		assert!(!rendered.contains("do-not-print"));
	}
}
