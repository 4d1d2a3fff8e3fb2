//! Content recommendations exchanged between friends.

// self
use crate::{
	_prelude::*,
	api::observed,
	auth::RecommendationId,
	client::{ApiClient, decode_list, expect_success},
	http::{ApiHttpClient, HttpRequest},
	model::{FriendRecommendation, RecommendationDraft},
	obs::CallKind,
};

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Recommends a content to a friend (`POST api/friend/recommend`).
	pub async fn recommend_to_friend(&self, draft: &RecommendationDraft) -> Result<()> {
		observed(CallKind::Api, "recommend_to_friend", async {
			if draft.reason.trim().is_empty() {
				return Err(Error::InvalidInput {
					reason: "recommendation reason cannot be empty".into(),
				});
			}

			let url = self.config.endpoint(["api", "friend", "recommend"])?;

			expect_success(&self.send(HttpRequest::post(url).with_body(draft)?).await?)
		})
		.await
	}

	/// Lists contents friends recommended to the member (`GET api/friend/recommend`).
	pub async fn friend_recommendations(&self) -> Result<Vec<FriendRecommendation>> {
		observed(CallKind::Api, "friend_recommendations", async {
			let url = self.config.endpoint(["api", "friend", "recommend"])?;

			decode_list(&self.send(HttpRequest::get(url)).await?)
		})
		.await
	}

	/// Dismisses a received recommendation (`DELETE api/friend/recommend/{id}`).
	pub async fn delete_friend_recommendation(&self, id: RecommendationId) -> Result<()> {
		observed(CallKind::Api, "delete_friend_recommendation", async {
			let id = id.to_string();
			let url = self.config.endpoint(["api", "friend", "recommend", id.as_str()])?;

			expect_success(&self.send(HttpRequest::delete(url)).await?)
		})
		.await
	}
}
