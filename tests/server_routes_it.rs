#![cfg(all(feature = "server", feature = "test"))]

// crates.io
use axum::{
	Router,
	body::{Body, to_bytes},
	http::{Request, StatusCode, header::LOCATION},
	response::Response,
};
use httpmock::prelude::*;
use serde_json::{Value, json};
use tower::ServiceExt;
// self
use spotify_token_relay::{_preludet::*, server};

fn app(server: &MockServer) -> Router {
	server::router(Arc::new(build_reqwest_test_relay(test_descriptor(&server.base_url()))))
}

async fn get(app: Router, uri: &str) -> Response {
	app.oneshot(Request::get(uri).body(Body::empty()).expect("Request fixture should build."))
		.await
		.expect("Router should always produce a response.")
}

async fn json_body(response: Response) -> Value {
	let bytes =
		to_bytes(response.into_body(), usize::MAX).await.expect("Response body should be readable.");

	serde_json::from_slice(&bytes).expect("Response body should be JSON.")
}

#[tokio::test]
async fn root_redirects_to_authorize_url() {
	let server = MockServer::start_async().await;
	let response = get(app(&server), "/").await;

	assert_eq!(response.status(), StatusCode::FOUND);
	assert_eq!(
		response.headers()[LOCATION],
		format!(
			"{}/authorize?response_type=code&client_id=abc&scope=user-read-currently-playing,user-read-playback-state&redirect_uri=http%3A%2F%2Flocalhost%3A5555%2Fcallback",
			server.base_url()
		)
		.as_str()
	);
}

#[tokio::test]
async fn callback_relays_provider_tokens() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token").body(
				"grant_type=authorization_code&redirect_uri=http%3A%2F%2Flocalhost%3A5555%2Fcallback&code=AUTHCODE123",
			);
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"BQD\",\"token_type\":\"Bearer\",\"expires_in\":3600,\"refresh_token\":\"AQC\"}",
			);
		})
		.await;
	let response = get(app(&server), "/callback?code=AUTHCODE123").await;

	mock.assert_async().await;

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(
		json_body(response).await,
		json!({ "access_token": "BQD", "token_type": "Bearer", "expires_in": 3600, "refresh_token": "AQC" })
	);
}

#[tokio::test]
async fn upstream_rejection_keeps_status_and_body() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token");
			then.status(400)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid_grant\"}");
		})
		.await;
	let response = get(app(&server), "/refresh?refresh_token=revoked").await;

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(json_body(response).await, json!({ "error": "invalid_grant" }));
}

#[tokio::test]
async fn missing_parameters_answer_400_without_upstream_calls() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token");
			then.status(200);
		})
		.await;

	for uri in ["/callback", "/callback?code=", "/refresh", "/refresh?refresh_token="] {
		let response = get(app(&server), uri).await;

		assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");

		let body = json_body(response).await;

		assert_eq!(body["error"], "invalid_request", "{uri}");
		assert!(body["error_description"].is_string(), "{uri}");
	}

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn repeated_parameters_answer_invalid_request_json() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token");
			then.status(200);
		})
		.await;

	for uri in ["/callback?code=A&code=B", "/refresh?refresh_token=a&refresh_token=b"] {
		let response = get(app(&server), uri).await;

		assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");

		let body = json_body(response).await;

		assert_eq!(body["error"], "invalid_request", "{uri}");
		assert!(
			body["error_description"]
				.as_str()
				.is_some_and(|description| description.starts_with("Query string is malformed")),
			"{uri}"
		);
	}

	mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn denied_consent_is_reported_as_oauth_error() {
	let server = MockServer::start_async().await;
	let response =
		get(app(&server), "/callback?error=access_denied&error_description=User+declined").await;

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(
		json_body(response).await,
		json!({ "error": "access_denied", "error_description": "User declined" })
	);
}

#[tokio::test]
async fn non_json_upstream_body_answers_502() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token");
			then.status(200).header("content-type", "text/plain").body("not json");
		})
		.await;
	let response = get(app(&server), "/refresh?refresh_token=AQC").await;

	assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
	assert_eq!(json_body(response).await["error"], "server_error");
}
