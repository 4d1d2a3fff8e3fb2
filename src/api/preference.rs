//! Like and dislike marks on contents.

// self
use crate::{
	_prelude::*,
	api::observed,
	auth::ContentId,
	client::{ApiClient, decode_list, expect_success},
	http::{ApiHttpClient, HttpRequest},
	model::{Content, ContentEnvelope, Preference, unwrap_envelopes},
	obs::CallKind,
};

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Marks a content as liked or disliked (`POST api/like/{id}/{true|false}`).
	pub async fn set_preference(&self, id: ContentId, preference: Preference) -> Result<()> {
		observed(CallKind::Api, "set_preference", async {
			let id = id.to_string();
			let url = self.config.endpoint(["api", "like", id.as_str(), preference.as_path()])?;

			expect_success(&self.send(HttpRequest::post(url)).await?)
		})
		.await
	}

	/// Lists liked or disliked contents (`GET api/like/{true|false}`).
	pub async fn preferred_contents(&self, preference: Preference) -> Result<Vec<Content>> {
		observed(CallKind::Api, "preferred_contents", async {
			let url = self.config.endpoint(["api", "like", preference.as_path()])?;
			let response = self.send(HttpRequest::get(url)).await?;

			Ok(unwrap_envelopes(decode_list::<ContentEnvelope>(&response)?))
		})
		.await
	}

	/// Removes the like/dislike annotation (`DELETE api/like/{id}`).
	pub async fn remove_preference(&self, id: ContentId) -> Result<()> {
		observed(CallKind::Api, "remove_preference", async {
			let id = id.to_string();
			let url = self.config.endpoint(["api", "like", id.as_str()])?;

			expect_success(&self.send(HttpRequest::delete(url)).await?)
		})
		.await
	}
}
