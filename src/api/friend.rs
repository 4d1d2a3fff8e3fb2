//! Friend list, pending requests, and request handling.

// self
use crate::{
	_prelude::*,
	api::observed,
	auth::{EmailAddress, FriendRequestId},
	client::{ApiClient, decode_list, expect_success},
	http::{ApiHttpClient, HttpRequest},
	model::FriendRequest,
	obs::CallKind,
};

#[derive(Serialize)]
struct FriendRequestBody<'a> {
	email: &'a str,
}

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Lists accepted friends (`GET api/friend`).
	pub async fn friends(&self) -> Result<Vec<FriendRequest>> {
		observed(CallKind::Api, "friends", async {
			let url = self.config.endpoint(["api", "friend"])?;

			decode_list(&self.send(HttpRequest::get(url)).await?)
		})
		.await
	}

	/// Lists friend requests waiting for the member's answer (`GET api/friend/pending`).
	pub async fn pending_friend_requests(&self) -> Result<Vec<FriendRequest>> {
		observed(CallKind::Api, "pending_friend_requests", async {
			let url = self.config.endpoint(["api", "friend", "pending"])?;

			decode_list(&self.send(HttpRequest::get(url)).await?)
		})
		.await
	}

	/// Sends a friend request to the member registered under `email`
	/// (`POST api/friend/request`).
	pub async fn send_friend_request(&self, email: &EmailAddress) -> Result<()> {
		observed(CallKind::Api, "send_friend_request", async {
			let url = self.config.endpoint(["api", "friend", "request"])?;
			let body = FriendRequestBody { email: email.as_ref() };
			let request = HttpRequest::post(url).with_body(&body)?;

			expect_success(&self.send(request).await?)
		})
		.await
	}

	/// Accepts a pending friend request (`POST api/friend/accept/{id}`).
	pub async fn accept_friend_request(&self, id: FriendRequestId) -> Result<()> {
		observed(CallKind::Api, "accept_friend_request", async {
			let id = id.to_string();
			let url = self.config.endpoint(["api", "friend", "accept", id.as_str()])?;

			expect_success(&self.send(HttpRequest::post(url)).await?)
		})
		.await
	}

	/// Rejects a pending request or removes a friend (`DELETE api/friend/{id}`).
	pub async fn delete_friend(&self, id: FriendRequestId) -> Result<()> {
		observed(CallKind::Api, "delete_friend", async {
			let id = id.to_string();
			let url = self.config.endpoint(["api", "friend", id.as_str()])?;

			expect_success(&self.send(HttpRequest::delete(url)).await?)
		})
		.await
	}
}
