//! Authorization URL construction for the browser redirect.

// self
use crate::{
	_prelude::*,
	auth::ClientCredentials,
	flows::{Relay, common},
	http::TokenHttpClient,
	oauth::TransportErrorMapper,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::ProviderDescriptor,
};

impl<C, M> Relay<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Builds the provider authorization URL the browser should be redirected to.
	///
	/// Parameters are emitted as `response_type`, `client_id`, `scope`, `redirect_uri`, with
	/// every value query-encoded.
	pub fn authorize_url(&self) -> Url {
		const KIND: FlowKind = FlowKind::Authorize;

		let _span = FlowSpan::new(KIND, "authorize_url").entered();

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let url = build_authorize_url(&self.descriptor, &self.credentials);

		obs::record_flow_outcome(KIND, FlowOutcome::Success);

		url
	}
}

fn build_authorize_url(descriptor: &ProviderDescriptor, credentials: &ClientCredentials) -> Url {
	let mut url = descriptor.endpoints.authorization.clone();
	let mut pairs = vec![
		("response_type", common::encode_query_value("code")),
		("client_id", common::encode_query_value(credentials.client_id())),
	];

	if let Some(scope) = common::format_scope(&descriptor.scopes, descriptor.quirks.scope_delimiter)
	{
		pairs.push(("scope", scope));
	}

	pairs.push(("redirect_uri", common::encode_query_value(credentials.redirect_uri())));

	let mut query = url.query().map(str::to_owned).unwrap_or_default();

	for (key, value) in pairs {
		if !query.is_empty() {
			query.push('&');
		}

		query.push_str(key);
		query.push('=');
		query.push_str(&value);
	}

	url.set_query(Some(&query));

	url
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::provider::{ProviderQuirks, parse_endpoint};

	fn credentials(id: &str, redirect: &str) -> ClientCredentials {
		ClientCredentials::new(id, "xyz", redirect).expect("Credential fixture should build.")
	}

	#[test]
	fn matches_reference_url_for_spotify() {
		let descriptor =
			ProviderDescriptor::spotify().expect("Spotify descriptor should always build.");
		let url = build_authorize_url(&descriptor, &credentials("abc", "http://localhost:5555/callback"));

		assert_eq!(
			url.as_str(),
			"https://accounts.spotify.com/authorize?response_type=code&client_id=abc&scope=user-read-currently-playing,user-read-playback-state&redirect_uri=http%3A%2F%2Flocalhost%3A5555%2Fcallback"
		);
	}

	#[test]
	fn encodes_hostile_configuration_values() {
		let descriptor =
			ProviderDescriptor::spotify().expect("Spotify descriptor should always build.");
		let url = build_authorize_url(
			&descriptor,
			&credentials("id&scope=admin", "https://app.example.com/cb?next=/home&x=1"),
		);
		let pairs = url.query_pairs().into_owned().collect::<Vec<_>>();

		assert_eq!(pairs.len(), 4);
		assert_eq!(pairs[1], ("client_id".into(), "id&scope=admin".into()));
		assert_eq!(
			pairs[3],
			("redirect_uri".into(), "https://app.example.com/cb?next=/home&x=1".into())
		);
	}

	#[test]
	fn keeps_existing_endpoint_query_and_skips_empty_scope() {
		let descriptor = ProviderDescriptor::builder()
			.authorization_endpoint(
				parse_endpoint("authorization", "https://provider.example.com/auth?show_dialog=true")
					.expect("Endpoint fixture should parse."),
			)
			.token_endpoint(
				parse_endpoint("token", "https://provider.example.com/token")
					.expect("Endpoint fixture should parse."),
			)
			.quirks(ProviderQuirks::default())
			.build()
			.expect("Descriptor fixture should build.");
		let url = build_authorize_url(&descriptor, &credentials("abc", "http://localhost/cb"));

		assert_eq!(
			url.query(),
			Some("show_dialog=true&response_type=code&client_id=abc&redirect_uri=http%3A%2F%2Flocalhost%2Fcb")
		);
	}
}
