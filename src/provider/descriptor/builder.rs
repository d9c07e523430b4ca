// std
use std::iter::IntoIterator;
// self
use crate::{
	_prelude::*,
	provider::{ProviderDescriptor, ProviderEndpoints, ProviderQuirks},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ProviderDescriptorError {
	/// Authorization endpoint is required for the redirect.
	#[error("Missing authorization endpoint.")]
	MissingAuthorizationEndpoint,
	/// Token endpoint is mandatory for code exchanges and refreshes.
	#[error("Missing token endpoint.")]
	MissingTokenEndpoint,
	/// Endpoint string is not an absolute URL.
	#[error("The {endpoint} endpoint is not a valid URL.")]
	InvalidEndpoint {
		/// Which endpoint failed to parse.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoints must use HTTP(S).
	#[error("The {endpoint} endpoint must use http or https: {url}.")]
	UnsupportedScheme {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Scope entries cannot be empty or contain whitespace.
	#[error("Scope `{scope}` is empty or contains whitespace.")]
	InvalidScope {
		/// The offending scope string.
		scope: String,
	},
	/// Reject scope delimiters that are control characters.
	#[error("Scope delimiter must be a printable character.")]
	InvalidScopeDelimiter {
		/// Invalid delimiter that was supplied.
		delimiter: char,
	},
}

/// Builder for [`ProviderDescriptor`] values.
#[derive(Debug, Default)]
pub struct ProviderDescriptorBuilder {
	/// Authorization endpoint the browser is redirected to.
	pub authorization_endpoint: Option<Url>,
	/// Token endpoint used for exchanges and refreshes.
	pub token_endpoint: Option<Url>,
	/// Requested scopes, in request order.
	pub scopes: Vec<String>,
	/// Provider-specific quirks.
	pub quirks: ProviderQuirks,
}
impl ProviderDescriptorBuilder {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the authorization endpoint.
	pub fn authorization_endpoint(mut self, url: Url) -> Self {
		self.authorization_endpoint = Some(url);

		self
	}

	/// Sets the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Replaces the requested scopes.
	pub fn scopes<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scopes = scopes.into_iter().map(Into::into).collect();

		self
	}

	/// Overrides the provider quirks.
	pub fn quirks(mut self, quirks: ProviderQuirks) -> Self {
		self.quirks = quirks;

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let authorization = self
			.authorization_endpoint
			.ok_or(ProviderDescriptorError::MissingAuthorizationEndpoint)?;
		let token = self.token_endpoint.ok_or(ProviderDescriptorError::MissingTokenEndpoint)?;
		let descriptor = ProviderDescriptor {
			endpoints: ProviderEndpoints { authorization, token },
			scopes: self.scopes,
			quirks: self.quirks,
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl ProviderDescriptor {
	/// Validates invariants for the descriptor.
	fn validate(&self) -> Result<(), ProviderDescriptorError> {
		validate_endpoint("authorization", &self.endpoints.authorization)?;
		validate_endpoint("token", &self.endpoints.token)?;

		for scope in &self.scopes {
			if scope.is_empty() || scope.chars().any(char::is_whitespace) {
				return Err(ProviderDescriptorError::InvalidScope { scope: scope.clone() });
			}
		}

		validate_scope_delimiter(self.quirks.scope_delimiter)?;

		Ok(())
	}
}

/// Parses an endpoint string, tagging failures with the endpoint name.
pub fn parse_endpoint(name: &'static str, raw: &str) -> Result<Url, ProviderDescriptorError> {
	Url::parse(raw).map_err(|source| ProviderDescriptorError::InvalidEndpoint { endpoint: name, source })
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ProviderDescriptorError> {
	match url.scheme() {
		"https" | "http" => Ok(()),
		_ => Err(ProviderDescriptorError::UnsupportedScheme { endpoint: name, url: url.to_string() }),
	}
}

fn validate_scope_delimiter(delimiter: char) -> Result<(), ProviderDescriptorError> {
	if delimiter.is_control() {
		Err(ProviderDescriptorError::InvalidScopeDelimiter { delimiter })
	} else {
		Ok(())
	}
}
