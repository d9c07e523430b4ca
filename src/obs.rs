//! Optional observability helpers for relay flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `spotify_token_relay.flow` with the `flow`
//!   and `stage` (call site) fields.
//! - Enable `metrics` to increment the `spotify_token_relay_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow` + `outcome`.
//!
//! Token values, the client secret, and authorization codes are never logged.

mod metrics;
mod tracing;

pub use self::metrics::*;
pub use self::tracing::*;

// self
use crate::{_prelude::*, auth::ProviderResponse};

/// Records the outcome of one token exchange and logs it.
///
/// Provider rejections are logged where they are classified, so only the counter moves here.
pub fn record_exchange(kind: FlowKind, result: &Result<ProviderResponse>) {
	match result {
		Ok(response) if response.is_success() => {
			record_flow_outcome(kind, FlowOutcome::Success);
			log_token_issued(kind, response);
		},
		Ok(_) => record_flow_outcome(kind, FlowOutcome::Failure),
		Err(err) => {
			record_flow_outcome(kind, FlowOutcome::Failure);
			log_flow_error(kind, err);
		},
	}
}

/// Relay operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Authorization URL construction and browser redirect.
	Authorize,
	/// Authorization code exchange triggered by the callback.
	Callback,
	/// Refresh token exchange.
	Refresh,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Authorize => "authorize",
			FlowKind::Callback => "callback",
			FlowKind::Refresh => "refresh",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a relay operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
