//! Per-provider hooks applied around each token endpoint call.

// self
use crate::provider::descriptor::GrantType;

/// Provider hooks used by the relay.
///
/// `augment_token_request` may append fields to the outgoing form. `classify_token_error`
/// labels a failed call for the `warn` log line; the body sent back to the caller is never
/// changed by it.
pub trait ProviderStrategy: Send + Sync {
	/// Labels a failed token endpoint call.
	fn classify_token_error(&self, ctx: &ProviderErrorContext) -> ProviderErrorKind;

	/// Appends provider-specific form fields after the standard ones.
	fn augment_token_request(&self, _grant: GrantType, _form: &mut Vec<(String, String)>) {}
}

/// Log label for a failed token endpoint call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderErrorKind {
	/// Code or refresh token was rejected (expired, revoked, already used).
	InvalidGrant,
	/// Client id or secret was rejected.
	InvalidClient,
	/// Requested scopes were rejected.
	InsufficientScope,
	/// Provider or network trouble; the same request may succeed later.
	Transient,
}

/// What the relay knows about a failed call: the grant, and whatever the provider answered.
///
/// `http_status` is `None` when no HTTP answer arrived.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderErrorContext {
	/// Grant the failing request used.
	pub grant_type: GrantType,
	/// Status returned by the token endpoint.
	pub http_status: Option<u16>,
	/// OAuth `error` code from the body.
	pub oauth_error: Option<String>,
}
impl ProviderErrorContext {
	/// Context for a call that got no HTTP answer.
	pub fn new(grant_type: GrantType) -> Self {
		Self { grant_type, http_status: None, oauth_error: None }
	}

	/// Records the token endpoint status.
	pub fn with_http_status(mut self, status: u16) -> Self {
		self.http_status = Some(status);

		self
	}

	/// Records the OAuth `error` code.
	pub fn with_oauth_error(mut self, error: impl Into<String>) -> Self {
		self.oauth_error = Some(error.into());

		self
	}
}

/// Labels failures from the RFC 6749 `error` code, falling back to the HTTP status.
#[derive(Debug, Default)]
pub struct DefaultProviderStrategy;
impl ProviderStrategy for DefaultProviderStrategy {
	fn classify_token_error(&self, ctx: &ProviderErrorContext) -> ProviderErrorKind {
		ctx.oauth_error
			.as_deref()
			.and_then(classify_oauth_error)
			.unwrap_or_else(|| classify_status(ctx.http_status))
	}
}

fn classify_oauth_error(code: &str) -> Option<ProviderErrorKind> {
	match code {
		"invalid_grant" | "invalid_request" => Some(ProviderErrorKind::InvalidGrant),
		"invalid_client" | "unauthorized_client" => Some(ProviderErrorKind::InvalidClient),
		"invalid_scope" => Some(ProviderErrorKind::InsufficientScope),
		"server_error" | "temporarily_unavailable" => Some(ProviderErrorKind::Transient),
		_ => None,
	}
}

fn classify_status(status: Option<u16>) -> ProviderErrorKind {
	match status {
		Some(400) => ProviderErrorKind::InvalidGrant,
		Some(401) => ProviderErrorKind::InvalidClient,
		Some(403) => ProviderErrorKind::InsufficientScope,
		_ => ProviderErrorKind::Transient,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn oauth_code_wins_over_status() {
		let ctx = ProviderErrorContext::new(GrantType::RefreshToken)
			.with_http_status(400)
			.with_oauth_error("invalid_client");

		assert_eq!(DefaultProviderStrategy.classify_token_error(&ctx), ProviderErrorKind::InvalidClient);
	}

	#[test]
	fn unknown_codes_fall_back_to_status() {
		let ctx = ProviderErrorContext::new(GrantType::AuthorizationCode)
			.with_http_status(403)
			.with_oauth_error("spotify_specific");

		assert_eq!(
			DefaultProviderStrategy.classify_token_error(&ctx),
			ProviderErrorKind::InsufficientScope
		);
		assert_eq!(
			DefaultProviderStrategy.classify_token_error(&ProviderErrorContext::new(
				GrantType::AuthorizationCode
			)),
			ProviderErrorKind::Transient
		);
	}
}
