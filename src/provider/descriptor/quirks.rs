// self
use crate::_prelude::*;

/// Provider-specific quirks that influence how flows behave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderQuirks {
	/// Character used to join scopes when constructing `scope` parameters.
	pub scope_delimiter: char,
}
impl Default for ProviderQuirks {
	fn default() -> Self {
		Self { scope_delimiter: ' ' }
	}
}
