//! HTTP surface: three routes over a shared [`ReqwestRelay`].
//!
//! | Route | Query | Response |
//! |---|---|---|
//! | `GET /` | none | `302` to the provider authorization URL |
//! | `GET /callback` | `code` (or provider `error`) | provider status + provider JSON |
//! | `GET /refresh` | `refresh_token` | provider status + provider JSON |
//!
//! Local failures answer with an OAuth-shaped JSON body
//! (`{"error": ..., "error_description": ...}`).

// crates.io
use axum::{
	Json, Router,
	extract::{Query, State, rejection::QueryRejection},
	http::{StatusCode, header::LOCATION},
	response::{IntoResponse, Response},
	routing::get,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
// self
use crate::{
	_prelude::*,
	auth::{OAuthErrorResponse, ProviderResponse},
	config::RelayConfig,
	error::TransportError,
	flows::{CallbackParams, RefreshParams, ReqwestRelay},
	obs::{self, FlowKind, FlowOutcome},
};

type RelayState = State<Arc<ReqwestRelay>>;

/// Builds the router serving the authorize, callback, and refresh routes.
pub fn router(relay: Arc<ReqwestRelay>) -> Router {
	Router::new()
		.route("/", get(authorize))
		.route("/callback", get(callback))
		.route("/refresh", get(refresh))
		.layer(TraceLayer::new_for_http())
		.with_state(relay)
}

/// Binds `config.bind_addr` and serves until `shutdown` resolves.
pub async fn serve<F>(config: RelayConfig, shutdown: F) -> Result<()>
where
	F: 'static + Send + Future<Output = ()>,
{
	let relay = Arc::new(ReqwestRelay::from_config(&config)?);
	let addr = config.bind_addr;
	let listener =
		TcpListener::bind(addr).await.map_err(|source| Error::Server { addr, source })?;
	let addr = listener.local_addr().map_err(|source| Error::Server { addr, source })?;

	tracing::info!(%addr, authorize_url = %relay.authorize_url(), "spotify-token-relay listening");

	axum::serve(listener, router(relay))
		.with_graceful_shutdown(shutdown)
		.await
		.map_err(|source| Error::Server { addr, source })?;

	tracing::info!("spotify-token-relay stopped");

	Ok(())
}

async fn authorize(State(relay): RelayState) -> Response {
	(StatusCode::FOUND, [(LOCATION, relay.authorize_url().to_string())]).into_response()
}

async fn callback(
	State(relay): RelayState,
	query: Result<Query<CallbackParams>, QueryRejection>,
) -> Result<Response> {
	let Query(params) = decode_query(FlowKind::Callback, query)?;

	relay.handle_callback(params).await.map(relay_response)
}

async fn refresh(
	State(relay): RelayState,
	query: Result<Query<RefreshParams>, QueryRejection>,
) -> Result<Response> {
	let Query(params) = decode_query(FlowKind::Refresh, query)?;

	relay.handle_refresh(params).await.map(relay_response)
}

fn decode_query<T>(kind: FlowKind, query: Result<Query<T>, QueryRejection>) -> Result<Query<T>> {
	query.map_err(|rejection| {
		let err = Error::InvalidQuery { reason: rejection.body_text() };

		obs::record_flow_outcome(kind, FlowOutcome::Failure);
		obs::log_flow_error(kind, &err);

		err
	})
}

fn relay_response(response: ProviderResponse) -> Response {
	let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);

	(status, Json(response.body)).into_response()
}

impl Error {
	/// HTTP status and OAuth `error` code used when this error is returned to a client.
	pub fn status_and_code(&self) -> (StatusCode, &str) {
		match self {
			Error::MissingParameter { .. } | Error::InvalidQuery { .. } =>
				(StatusCode::BAD_REQUEST, "invalid_request"),
			Error::AuthorizationDenied { error, .. } => (StatusCode::BAD_REQUEST, error.as_str()),
			Error::Transport(TransportError::Timeout { .. }) =>
				(StatusCode::GATEWAY_TIMEOUT, "temporarily_unavailable"),
			Error::Transport(_) | Error::Upstream(_) => (StatusCode::BAD_GATEWAY, "server_error"),
			Error::Config(_) | Error::Server { .. } =>
				(StatusCode::INTERNAL_SERVER_ERROR, "server_error"),
		}
	}
}
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let (status, code) = self.status_and_code();
		let description = match &self {
			Error::AuthorizationDenied { description: Some(description), .. } =>
				description.clone(),
			_ => self.to_string(),
		};
		let body = OAuthErrorResponse::new(code, Some(description));

		(status, Json(body)).into_response()
	}
}
