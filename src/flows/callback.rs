//! Authorization code exchange performed when the provider redirects back to the relay.

// crates.io
use oauth2::AuthorizationCode;
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

/// Query parameters the provider appends to the redirect URI.
#[derive(Clone, Default, Deserialize)]
pub struct CallbackParams {
	/// Authorization code issued after consent.
	pub code: Option<String>,
	/// OAuth error code when consent was not granted.
	pub error: Option<String>,
	/// Optional error description accompanying `error`.
	pub error_description: Option<String>,
}
impl CallbackParams {
	/// Extracts the authorization code.
	///
	/// A provider-reported `error` without a code yields [`Error::AuthorizationDenied`]; any
	/// other absent or empty code yields [`Error::MissingParameter`].
	pub fn into_code(self) -> Result<AuthorizationCode> {
		if self.code.as_deref().is_none_or(str::is_empty) {
			if let Some(error) = self.error.filter(|error| !error.is_empty()) {
				return Err(Error::AuthorizationDenied {
					error,
					description: self.error_description,
				});
			}
		}

		common::require_param("code", self.code).map(AuthorizationCode::new)
	}
}
impl Debug for CallbackParams {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CallbackParams")
			.field("code_present", &self.code.is_some())
			.field("error", &self.error)
			.field("error_description", &self.error_description)
			.finish()
	}
}

impl<C, M> Relay<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Validates callback parameters and exchanges the code; no outbound call is made when
	/// validation fails.
	pub async fn handle_callback(&self, params: CallbackParams) -> Result<ProviderResponse> {
		match params.into_code() {
			Ok(code) => self.exchange_code(&code).await,
			Err(err) => {
				obs::record_flow_outcome(FlowKind::Callback, FlowOutcome::Failure);
				obs::log_flow_error(FlowKind::Callback, &err);

				Err(err)
			},
		}
	}

	/// Exchanges an authorization code for an access/refresh token pair.
	///
	/// Sends `grant_type=authorization_code`, `redirect_uri`, and `code` to the token
	/// endpoint and returns the provider's status and JSON body unchanged.
	pub async fn exchange_code(&self, code: &AuthorizationCode) -> Result<ProviderResponse> {
		const KIND: FlowKind = FlowKind::Callback;

		let span = FlowSpan::new(KIND, "exchange_code");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let form = vec![
			("grant_type".to_owned(), GrantType::AuthorizationCode.as_str().to_owned()),
			("redirect_uri".to_owned(), self.credentials.redirect_uri().to_owned()),
			("code".to_owned(), code.secret().to_owned()),
		];
		let result = span
			.instrument(self.dispatch_token_request(KIND, GrantType::AuthorizationCode, form))
			.await;

		obs::record_exchange(KIND, &result);

		result
	}
}
