//! HTTP Basic client authentication (RFC 7617) for token endpoint calls.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Builds the `Authorization` header value for `client_id`/`client_secret`.
///
/// The identifier and secret are joined with a single colon and the UTF-8 bytes are encoded
/// with padded standard base64. Neither value is form-encoded first, so the output matches
/// what the Spotify Accounts service expects byte for byte.
pub fn basic_authorization(client_id: &str, client_secret: &str) -> String {
	let mut header = String::from("Basic ");

	STANDARD.encode_string(format!("{client_id}:{client_secret}"), &mut header);

	header
}
