//! Provider descriptor data structures shared by all flows.

/// Builder API for assembling provider descriptors.
pub mod builder;
/// Grant helpers wired into token forms and observability labels.
pub mod grant;
/// Provider-specific quirk toggles.
pub mod quirks;

pub use builder::*;
pub use grant::*;
pub use quirks::*;

// self
use crate::_prelude::*;

/// Spotify Accounts authorization endpoint.
pub const SPOTIFY_AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";
/// Spotify Accounts token endpoint.
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
/// Scopes requested by the relay: read the currently playing track and playback state.
pub const SPOTIFY_SCOPES: [&str; 2] = ["user-read-currently-playing", "user-read-playback-state"];

/// Endpoint set declared by a provider descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Authorization endpoint the browser is redirected to.
	pub authorization: Url,
	/// Token endpoint used for code exchanges and refreshes.
	pub token: Url,
}

/// Immutable provider descriptor consumed by flows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Endpoint definitions exposed by the provider.
	pub endpoints: ProviderEndpoints,
	/// Scopes requested on the authorization URL, in request order.
	pub scopes: Vec<String>,
	/// Provider-specific quirks.
	pub quirks: ProviderQuirks,
}
impl ProviderDescriptor {
	/// Creates an empty builder.
	pub fn builder() -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new()
	}

	/// Creates a builder preloaded with the Spotify scopes and comma scope delimiter, but no
	/// endpoints.
	pub fn spotify_builder() -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new()
			.scopes(SPOTIFY_SCOPES)
			.quirks(ProviderQuirks { scope_delimiter: ',' })
	}

	/// Descriptor for the production Spotify Accounts service.
	pub fn spotify() -> Result<Self, ProviderDescriptorError> {
		Self::spotify_builder()
			.authorization_endpoint(parse_endpoint("authorization", SPOTIFY_AUTHORIZE_URL)?)
			.token_endpoint(parse_endpoint("token", SPOTIFY_TOKEN_URL)?)
			.build()
	}
}
