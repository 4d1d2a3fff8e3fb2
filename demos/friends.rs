//! Persists the session in a file store, mirrors the friend list locally, and recommends a
//! title to a friend.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
use url::Url;
// self
use ott_client::{
	auth::{ContentId, EmailAddress, Session},
	client::ReqwestApiClient,
	config::ClientConfig,
	model::{FriendBook, RecommendationDraft},
	navigator::{Navigator, RecordingNavigator},
	store::{FileStore, SessionStore},
};

const ME: &str = "demo@example.com";

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let friends = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/friend");
			then.status(200).json_body(json!([]));
		})
		.await;
	let pending = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/friend/pending");
			then.status(200).json_body(json!([{
				"id": 3,
				"requesterEmail": "lee@example.com",
				"requesterName": "Lee",
				"accepterEmail": ME,
				"accepterName": "Demo",
				"status": "PENDING",
			}]));
		})
		.await;
	let accept = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/friend/accept/3");
			then.status(200);
		})
		.await;
	let recommend = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/friend/recommend");
			then.status(200);
		})
		.await;
	let members = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/members/info");
			then.status(460);
		})
		.await;
	let path = std::env::temp_dir().join("ott-client-friends-demo.json");
	let store = Arc::new(FileStore::open(&path)?);

	store.save(&Session::new("demo-access", "demo-refresh"))?;

	let navigator = RecordingNavigator::default();
	let shared_navigator: Arc<dyn Navigator> = Arc::new(navigator.clone());
	let config = ClientConfig::builder(Url::parse(&server.base_url())?).build()?;
	let client = ReqwestApiClient::new(config, store.clone(), shared_navigator)?;
	let mut book = FriendBook::default();

	book.replace_friends(client.friends().await?);
	book.replace_pending(client.pending_friend_requests().await?);

	let request = book.pending()[0].id;

	client.accept_friend_request(request).await?;
	book.apply_accepted(request);

	for friend in book.friends() {
		let contact = friend.counterpart(ME);

		println!("Friend: {} <{}>.", contact.name, contact.email);

		let draft = RecommendationDraft::new(
			EmailAddress::new(contact.email)?,
			ContentId(42),
			"Great soundtrack.",
		);

		client.recommend_to_friend(&draft).await?;
	}

	if let Err(e) = client.current_member().await {
		println!("{e} Redirected to {:?}.", navigator.location());
	}

	let still_stored = store.session()?.is_some();

	println!("Session file {} still holds a session: {still_stored}.", path.display());

	friends.assert_async().await;
	pending.assert_async().await;
	accept.assert_async().await;
	recommend.assert_async().await;
	members.assert_async().await;

	Ok(())
}
