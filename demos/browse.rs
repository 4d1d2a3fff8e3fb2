//! Logs in through the development endpoint, browses the catalog, and shows the client
//! refreshing an expired access token behind the caller's back.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
use url::Url;
// self
use ott_client::{
	auth::LoginData,
	client::ReqwestApiClient,
	config::ClientConfig,
	model::group_watch_history_by_date,
	navigator::{LoggingNavigator, Navigator},
	store::{MemoryStore, SessionStore},
};

fn content(id: u64, title: &str) -> serde_json::Value {
	json!({
		"id": id,
		"showId": format!("s{id}"),
		"type": "Movie",
		"title": title,
		"director": "Bong Joon Ho",
		"cast": "Song Kang-ho",
		"country": "South Korea",
		"dateAdded": "June 23, 2020",
		"releaseYear": 2019,
		"rating": "R",
		"duration": "132 min",
		"listedIn": "Dramas, Thrillers",
		"description": "Demo title.",
	})
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let login = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/temp/login");
			then.status(200).json_body(json!({
				"accessToken": "demo-access-1",
				"refreshToken": "demo-refresh-1",
			}));
		})
		.await;
	let random = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/random/10")
				.header("authorization", "Bearer demo-access-1");
			then.status(461);
		})
		.await;
	let refresh = server
		.mock_async(|when, then| {
			when.method(POST).path("/auth/refresh");
			then.status(200).json_body(json!({
				"accessToken": "demo-access-2",
				"refreshToken": "demo-refresh-2",
			}));
		})
		.await;
	let random_retry = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/random/10")
				.header("authorization", "Bearer demo-access-2");
			then.status(200).json_body(json!([
				{ "content": content(1, "Parasite") },
				{ "content": content(2, "Memories of Murder") },
			]));
		})
		.await;
	let history = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/watch");
			then.status(200).json_body(json!([
				{ "watchedDateTime": "2024-11-21T21:10:00", "content": content(1, "Parasite") },
				{ "watchedDateTime": "2024-11-20T09:00:00", "content": content(2, "Mother") },
			]));
		})
		.await;
	let config = ClientConfig::builder(Url::parse(&server.base_url())?).build()?;
	let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::default());
	let navigator: Arc<dyn Navigator> = Arc::new(LoggingNavigator);
	let client = ReqwestApiClient::new(config, store, navigator)?;
	let session = client.dev_login(&LoginData::new("Demo", "demo@example.com")).await?;

	println!("Logged in with access token {}.", session.access_token.masked());

	for content in client.random_contents(10).await? {
		println!("{} ({}): {}", content.title, content.release_year, content.genres().join(" / "));
	}

	for (day, contents) in group_watch_history_by_date(&client.watch_history().await?) {
		println!("Watched on {day}: {} title(s).", contents.len());
	}

	println!(
		"Refreshes: {}, retries: {}.",
		client.session_metrics.refresh_successes(),
		client.session_metrics.retries()
	);

	login.assert_async().await;
	random.assert_async().await;
	refresh.assert_async().await;
	random_retry.assert_async().await;
	history.assert_async().await;

	Ok(())
}
