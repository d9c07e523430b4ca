// self
use crate::{_prelude::*, auth::ProviderResponse, obs::FlowKind, provider::ProviderErrorKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// A span builder used by relay flows.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the provided flow kind + stage.
	pub fn new(kind: FlowKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("spotify_token_relay.flow", flow = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Enters the span for synchronous sections.
	pub fn entered(self) -> FlowSpanGuard {
		#[cfg(feature = "tracing")]
		{
			FlowSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			FlowSpanGuard {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// RAII guard returned by [`FlowSpan::entered`].
pub struct FlowSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for FlowSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("FlowSpanGuard(..)")
	}
}

/// Logs a successful token exchange. Token values are never logged, only their shape.
pub fn log_token_issued(kind: FlowKind, response: &ProviderResponse) {
	#[cfg(feature = "tracing")]
	{
		match response.token() {
			Some(token) => tracing::info!(
				flow = kind.as_str(),
				status = response.status,
				token_type = %token.token_type,
				expires_in = token.expires_in,
				refresh_token_issued = token.refresh_token.is_some(),
				"token endpoint issued an access token"
			),
			None => tracing::info!(
				flow = kind.as_str(),
				status = response.status,
				"token endpoint answered with an unrecognized success payload"
			),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, response);
	}
}

/// Logs a failed token endpoint call; `status` is `None` when no HTTP answer arrived.
pub fn log_upstream_rejection(
	kind: FlowKind,
	status: Option<u16>,
	classification: ProviderErrorKind,
) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			flow = kind.as_str(),
			status = ?status,
			classification = ?classification,
			"token endpoint rejected the request"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, status, classification);
	}
}

/// Logs a relay failure that never produced a forwardable provider answer.
pub fn log_flow_error(kind: FlowKind, error: &Error) {
	#[cfg(feature = "tracing")]
	{
		match error {
			Error::MissingParameter { .. }
			| Error::InvalidQuery { .. }
			| Error::AuthorizationDenied { .. } =>
				tracing::info!(flow = kind.as_str(), error = %error, "request rejected"),
			_ => tracing::error!(flow = kind.as_str(), error = %error, "flow failed"),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, error);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn flow_span_noop_without_tracing() {
		let _guard = FlowSpan::new(FlowKind::Authorize, "test").entered();
		// Compile-time smoke test ensures the guard exists even when tracing is disabled.
	}

	#[cfg(feature = "tracing")]
	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = FlowSpan::new(FlowKind::Refresh, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}

	#[test]
	fn log_helpers_accept_every_shape() {
		let response = ProviderResponse::from_body(
			200,
			br#"{"access_token":"AT","token_type":"Bearer","expires_in":3600}"#,
		)
		.expect("Token fixture should decode.");

		log_token_issued(FlowKind::Callback, &response);
		log_upstream_rejection(FlowKind::Refresh, Some(400), ProviderErrorKind::InvalidGrant);
		log_flow_error(FlowKind::Refresh, &Error::MissingParameter { name: "refresh_token" });
	}
}
