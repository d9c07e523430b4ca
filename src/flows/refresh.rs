//! Refresh token exchange.
//!
//! Every call goes to the provider: the relay keeps no cache, so two identical requests
//! produce two token endpoint calls and the provider decides whether to rotate the refresh
//! token.

// crates.io
use oauth2::RefreshToken;
// self
use crate::{
	_prelude::*,
	auth::ProviderResponse,
	flows::{Relay, common},
	http::TokenHttpClient,
	oauth::TransportErrorMapper,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::GrantType,
};

/// Query parameters accepted by the refresh route.
#[derive(Clone, Default, Deserialize)]
pub struct RefreshParams {
	/// Previously issued refresh token.
	pub refresh_token: Option<String>,
}
impl RefreshParams {
	/// Extracts the refresh token, or [`Error::MissingParameter`] when absent or empty.
	pub fn into_refresh_token(self) -> Result<RefreshToken> {
		common::require_param("refresh_token", self.refresh_token).map(RefreshToken::new)
	}
}
impl Debug for RefreshParams {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RefreshParams")
			.field("refresh_token_present", &self.refresh_token.is_some())
			.finish()
	}
}

impl<C, M> Relay<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Validates refresh parameters and performs the exchange; no outbound call is made when
	/// validation fails.
	pub async fn handle_refresh(&self, params: RefreshParams) -> Result<ProviderResponse> {
		match params.into_refresh_token() {
			Ok(refresh_token) => self.refresh_access_token(&refresh_token).await,
			Err(err) => {
				obs::record_flow_outcome(FlowKind::Refresh, FlowOutcome::Failure);
				obs::log_flow_error(FlowKind::Refresh, &err);

				Err(err)
			},
		}
	}

	/// Exchanges a refresh token for a new access token.
	///
	/// Sends `grant_type=refresh_token` and `refresh_token` to the token endpoint and returns
	/// the provider's status and JSON body unchanged.
	pub async fn refresh_access_token(
		&self,
		refresh_token: &RefreshToken,
	) -> Result<ProviderResponse> {
		const KIND: FlowKind = FlowKind::Refresh;

		let span = FlowSpan::new(KIND, "refresh_access_token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let form = vec![
			("grant_type".to_owned(), GrantType::RefreshToken.as_str().to_owned()),
			("refresh_token".to_owned(), refresh_token.secret().to_owned()),
		];
		let result = span
			.instrument(self.dispatch_token_request(KIND, GrantType::RefreshToken, form))
			.await;

		obs::record_exchange(KIND, &result);

		result
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn refresh_token_is_required() {
		assert!(matches!(
			RefreshParams::default().into_refresh_token(),
			Err(Error::MissingParameter { name: "refresh_token" })
		));

		let params = RefreshParams { refresh_token: Some("RT1".into()) };

		assert_eq!(params.into_refresh_token().expect("Token should be accepted.").secret(), "RT1");
	}
}
