//! Shared helpers for flow implementations (parameter validation, encoding, token dispatch).

// crates.io
use oauth2::{
	AsyncHttpClient, HttpRequest,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	auth::ProviderResponse,
	error::ConfigError,
	flows::Relay,
	http::TokenHttpClient,
	oauth::TransportErrorMapper,
	obs::{self, FlowKind},
	provider::{GrantType, ProviderErrorContext},
};

/// Content type of every token endpoint request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Returns the parameter value, or [`Error::MissingParameter`] when absent or empty.
pub fn require_param(name: &'static str, value: Option<String>) -> Result<String> {
	value.filter(|v| !v.is_empty()).ok_or(Error::MissingParameter { name })
}

/// Query-encodes a single value (`application/x-www-form-urlencoded` byte serialization).
pub fn encode_query_value(value: &str) -> String {
	form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Encodes each scope and joins them with the provider's delimiter.
///
/// A comma is a sub-delimiter that is legal inside a query, so it is emitted literally;
/// any other delimiter is query-encoded (a space becomes `+`).
pub fn format_scope(scopes: &[String], delimiter: char) -> Option<String> {
	if scopes.is_empty() {
		return None;
	}

	let delimiter = match delimiter {
		',' => String::from(","),
		other => encode_query_value(other.encode_utf8(&mut [0; 4])),
	};
	let encoded = scopes.iter().map(|scope| encode_query_value(scope)).collect::<Vec<_>>();

	Some(encoded.join(&delimiter))
}

/// Encodes ordered form pairs as an `application/x-www-form-urlencoded` body.
pub fn encode_form(form: &[(String, String)]) -> String {
	form_urlencoded::Serializer::new(String::new()).extend_pairs(form.iter()).finish()
}

/// Builds the POST request sent to the token endpoint.
pub fn build_token_request(
	token_endpoint: &Url,
	authorization: &str,
	body: String,
) -> Result<HttpRequest> {
	Request::builder()
		.method(Method::POST)
		.uri(token_endpoint.as_str())
		.header(AUTHORIZATION, authorization)
		.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
		.header(ACCEPT, "application/json")
		.body(body.into_bytes())
		.map_err(|e| ConfigError::from(e).into())
}

impl<C, M> Relay<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Sends one token request and decodes the provider's answer.
	///
	/// Exactly one outbound call is made; there are no retries. Non-2xx provider answers are
	/// returned as `Ok` so the caller can forward them verbatim.
	pub(crate) async fn dispatch_token_request(
		&self,
		kind: FlowKind,
		grant: GrantType,
		mut form: Vec<(String, String)>,
	) -> Result<ProviderResponse> {
		self.strategy.augment_token_request(grant, &mut form);

		let request = build_token_request(
			&self.descriptor.endpoints.token,
			&self.credentials.basic_authorization(),
			encode_form(&form),
		)?;
		let handle = self.http_client.handle();
		let response = handle.call(request).await.map_err(|err| {
			let ctx = ProviderErrorContext::new(grant);

			obs::log_upstream_rejection(kind, None, self.strategy.classify_token_error(&ctx));

			self.transport_mapper.map_transport_error(grant, err)
		})?;
		let status = response.status().as_u16();
		let decoded = ProviderResponse::from_body(status, response.body()).inspect_err(|_| {
			let ctx = ProviderErrorContext::new(grant).with_http_status(status);

			obs::log_upstream_rejection(kind, Some(status), self.strategy.classify_token_error(&ctx));
		})?;

		if !decoded.is_success() {
			let mut ctx = ProviderErrorContext::new(grant).with_http_status(status);

			if let Some(body) = decoded.oauth_error() {
				ctx = ctx.with_oauth_error(body.error);
			}

			obs::log_upstream_rejection(kind, Some(status), self.strategy.classify_token_error(&ctx));
		}

		Ok(decoded)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn scopes(values: &[&str]) -> Vec<String> {
		values.iter().map(|value| (*value).to_owned()).collect()
	}

	#[test]
	fn scope_formatting_handles_custom_delimiters() {
		let scope = scopes(&["user-read-currently-playing", "user-read-playback-state"]);

		assert_eq!(
			format_scope(&scope, ','),
			Some("user-read-currently-playing,user-read-playback-state".into())
		);
		assert_eq!(
			format_scope(&scope, ' '),
			Some("user-read-currently-playing+user-read-playback-state".into())
		);
		assert_eq!(format_scope(&[], ','), None);
	}

	#[test]
	fn scope_values_are_encoded_individually() {
		assert_eq!(format_scope(&scopes(&["a&b", "c=d"]), ','), Some("a%26b,c%3Dd".into()));
	}

	#[test]
	fn missing_and_empty_parameters_are_rejected() {
		assert!(matches!(
			require_param("code", None),
			Err(Error::MissingParameter { name: "code" })
		));
		assert!(matches!(
			require_param("refresh_token", Some(String::new())),
			Err(Error::MissingParameter { name: "refresh_token" })
		));
		assert_eq!(
			require_param("code", Some("AUTHCODE123".into())).expect("Present values pass."),
			"AUTHCODE123"
		);
	}

	#[test]
	fn form_keeps_pair_order() {
		let form = vec![
			("grant_type".to_owned(), "authorization_code".to_owned()),
			("redirect_uri".to_owned(), "http://localhost:5555/callback".to_owned()),
			("code".to_owned(), "AUTHCODE123".to_owned()),
		];

		assert_eq!(
			encode_form(&form),
			"grant_type=authorization_code&redirect_uri=http%3A%2F%2Flocalhost%3A5555%2Fcallback&code=AUTHCODE123"
		);
	}

	#[test]
	fn token_request_carries_auth_and_form_headers() {
		let endpoint = Url::parse("https://accounts.spotify.com/api/token")
			.expect("Token endpoint fixture should parse.");
		let request =
			build_token_request(&endpoint, "Basic YWJjOnh5eg==", "grant_type=refresh_token".into())
				.expect("Token request should build.");

		assert_eq!(request.method(), Method::POST);
		assert_eq!(request.uri(), "https://accounts.spotify.com/api/token");
		assert_eq!(request.headers()[AUTHORIZATION], "Basic YWJjOnh5eg==");
		assert_eq!(request.headers()[CONTENT_TYPE], FORM_CONTENT_TYPE);
		assert_eq!(request.body().as_slice(), b"grant_type=refresh_token");
	}
}
