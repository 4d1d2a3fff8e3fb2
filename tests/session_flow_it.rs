#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use ott_client::{
	_preludet::*,
	auth::Session,
	error::SessionError,
	store::{MemoryStore, SessionStore},
};

fn seed(store: &MemoryStore, access: &str, refresh: &str) {
	store.save(&Session::new(access, refresh)).expect("Seeding the memory store should succeed.");
}

fn friend_json(id: u64) -> serde_json::Value {
	json!({
		"id": id,
		"requesterEmail": "me@example.com",
		"requesterName": "Me",
		"accepterEmail": format!("friend{id}@example.com"),
		"accepterName": format!("Friend {id}"),
		"status": "ACCEPTED",
	})
}

#[tokio::test]
async fn stored_access_token_is_sent_as_bearer() {
	let server = MockServer::start_async().await;
	let (client, store, navigator) = build_reqwest_test_client(&server.base_url());

	seed(&store, "A1", "R1");

	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/members/info").header("authorization", "Bearer A1");
			then.status(200).json_body(json!({ "name": "Kim" }));
		})
		.await;
	let member = client.current_member().await.expect("Member lookup should succeed.");

	mock.assert_async().await;

	assert_eq!(member.name, "Kim");
	assert_eq!(navigator.location(), None);
}

#[tokio::test]
async fn expired_token_is_refreshed_and_request_retried_with_new_token() {
	let server = MockServer::start_async().await;
	let (client, store, navigator) = build_reqwest_test_client(&server.base_url());

	seed(&store, "A1", "R1");

	let expired = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/friend").header("authorization", "Bearer A1");
			then.status(461);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh").json_body(json!({ "refreshToken": "R1" }));
			then.status(200).json_body(json!({ "accessToken": "A2", "refreshToken": "R2" }));
		})
		.await;
	let retried = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/friend").header("authorization", "Bearer A2");
			then.status(200).json_body(json!([friend_json(1), friend_json(2)]));
		})
		.await;
	let friends = client.friends().await.expect("Friend list should succeed after refresh.");

	expired.assert_async().await;
	refresh.assert_async().await;
	retried.assert_async().await;

	assert_eq!(friends.len(), 2);
	assert_eq!(friends[1].counterpart("me@example.com").name, "Friend 2");
	assert_eq!(
		store.session().expect("Store should be readable."),
		Some(Session::new("A2", "R2"))
	);
	assert_eq!(navigator.location(), None);
	assert_eq!(client.session_metrics.refresh_attempts(), 1);
	assert_eq!(client.session_metrics.retries(), 1);
}

#[tokio::test]
async fn failed_refresh_clears_session_and_redirects_to_login() {
	let server = MockServer::start_async().await;
	let (client, store, navigator) = build_reqwest_test_client(&server.base_url());

	seed(&store, "A1", "R1");

	let expired = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/watch");
			then.status(461);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh");
			then.status(401).json_body(json!({ "message": "refresh token expired" }));
		})
		.await;
	let err = client.watch_history().await.expect_err("Failed refresh should fail the call.");

	expired.assert_calls_async(1).await;
	refresh.assert_calls_async(1).await;

	assert!(err.is_session_terminated());

	let Error::Session(SessionError::RefreshFailed { source }) = &err else {
		panic!("Expected a refresh failure, got {err:?}.");
	};

	assert_eq!(source.as_api().map(|api| api.status), Some(401));
	assert!(store.is_empty());
	assert_eq!(navigator.location().as_deref(), Some("/login"));
}

#[tokio::test]
async fn invalid_session_redirects_without_refreshing() {
	let server = MockServer::start_async().await;
	let (client, store, navigator) = build_reqwest_test_client(&server.base_url());

	seed(&store, "A1", "R1");

	let invalid = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/friend/pending");
			then.status(460);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh");
			then.status(200).json_body(json!({ "accessToken": "A2", "refreshToken": "R2" }));
		})
		.await;
	let err = client
		.pending_friend_requests()
		.await
		.expect_err("Invalid session should fail the call.");

	invalid.assert_calls_async(1).await;
	refresh.assert_calls_async(0).await;

	assert!(matches!(err, Error::Session(SessionError::Invalid)));
	assert!(store.is_empty());
	assert_eq!(navigator.location().as_deref(), Some("/login"));
}

#[tokio::test]
async fn other_error_statuses_pass_through_after_one_call() {
	let server = MockServer::start_async().await;
	let (client, store, navigator) = build_reqwest_test_client(&server.base_url());

	seed(&store, "A1", "R1");

	let conflict = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/friend/request");
			then.status(409).json_body(json!({ "message": "Friend request already sent." }));
		})
		.await;
	let email = ott_client::auth::EmailAddress::new("friend@example.com")
		.expect("Email fixture should be valid.");
	let err = client
		.send_friend_request(&email)
		.await
		.expect_err("Conflict should surface to the caller.");

	conflict.assert_calls_async(1).await;

	let api = err.as_api().expect("Conflict should be a business error.");

	assert_eq!(api.status, 409);
	assert_eq!(api.message.as_deref(), Some("Friend request already sent."));
	assert_eq!(
		store.session().expect("Store should be readable."),
		Some(Session::new("A1", "R1"))
	);
	assert_eq!(navigator.location(), None);
}

#[tokio::test]
async fn concurrent_expired_calls_share_one_refresh() {
	let server = MockServer::start_async().await;
	let (client, store, _) = build_reqwest_test_client(&server.base_url());

	seed(&store, "A1", "R1");

	let expired = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/friend").header("authorization", "Bearer A1");
			then.status(461);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh");
			then.status(200).json_body(json!({ "accessToken": "A2", "refreshToken": "R2" }));
		})
		.await;
	let retried = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/friend").header("authorization", "Bearer A2");
			then.status(200).json_body(json!([friend_json(1)]));
		})
		.await;
	let (first, second) = tokio::join!(client.friends(), client.friends());

	assert_eq!(first.expect("First call should succeed.").len(), 1);
	assert_eq!(second.expect("Second call should succeed.").len(), 1);

	expired.assert_calls_async(2).await;
	refresh.assert_calls_async(1).await;
	retried.assert_calls_async(2).await;

	assert_eq!(client.session_metrics.refresh_attempts(), 1);
	assert_eq!(client.session_metrics.refresh_coalesced(), 1);
	assert_eq!(client.session_metrics.retries(), 2);
}

#[tokio::test]
async fn concurrent_expired_calls_share_one_failed_refresh() {
	let server = MockServer::start_async().await;
	let (client, store, navigator) = build_reqwest_test_client(&server.base_url());

	seed(&store, "A1", "R1");

	let expired = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/friend");
			then.status(461);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh");
			then.status(401);
		})
		.await;
	let (first, second) = tokio::join!(client.friends(), client.friends());
	let errors = [
		first.expect_err("First call should fail with the refresh."),
		second.expect_err("Second call should fail with the refresh."),
	];

	expired.assert_calls_async(2).await;
	refresh.assert_calls_async(1).await;

	assert!(errors.iter().all(Error::is_session_terminated));
	assert_eq!(
		errors
			.iter()
			.filter(|e| matches!(e, Error::Session(SessionError::RefreshFailed { .. })))
			.count(),
		1
	);
	assert_eq!(
		errors.iter().filter(|e| matches!(e, Error::Session(SessionError::Ended))).count(),
		1
	);
	assert!(store.is_empty());
	assert_eq!(navigator.history(), vec!["/login".to_owned()]);
	assert_eq!(client.session_metrics.refresh_attempts(), 1);
	assert_eq!(client.session_metrics.refresh_failures(), 1);
	assert_eq!(client.session_metrics.terminations(), 1);
}

#[tokio::test]
async fn expired_token_without_refresh_token_terminates_session() {
	let server = MockServer::start_async().await;
	let (client, store, navigator) = build_reqwest_test_client(&server.base_url());

	store.insert_raw(ott_client::auth::ACCESS_TOKEN_KEY, "A1");

	let expired = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/like/true");
			then.status(461);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh");
			then.status(200);
		})
		.await;
	let err = client
		.preferred_contents(ott_client::model::Preference::Like)
		.await
		.expect_err("Missing refresh token should fail the call.");

	expired.assert_calls_async(1).await;
	refresh.assert_calls_async(0).await;

	assert!(err.is_session_terminated());
	assert!(store.is_empty());
	assert_eq!(navigator.location().as_deref(), Some("/login"));
}
