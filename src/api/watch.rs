//! Watch history records.

// self
use crate::{
	_prelude::*,
	api::observed,
	auth::ContentId,
	client::{ApiClient, decode_list, expect_success},
	http::{ApiHttpClient, HttpRequest},
	model::WatchRecord,
	obs::CallKind,
};

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Records that the member watched a content (`POST api/watch/{id}`).
	pub async fn record_watch(&self, id: ContentId) -> Result<()> {
		observed(CallKind::Api, "record_watch", async {
			let id = id.to_string();
			let url = self.config.endpoint(["api", "watch", id.as_str()])?;

			expect_success(&self.send(HttpRequest::post(url)).await?)
		})
		.await
	}

	/// Fetches the watch history (`GET api/watch`); a `null` body is an empty history.
	pub async fn watch_history(&self) -> Result<Vec<WatchRecord>> {
		observed(CallKind::Api, "watch_history", async {
			let url = self.config.endpoint(["api", "watch"])?;

			decode_list(&self.send(HttpRequest::get(url)).await?)
		})
		.await
	}

	/// Removes one content from the watch history (`DELETE api/watch/{id}`).
	pub async fn remove_watch(&self, id: ContentId) -> Result<()> {
		observed(CallKind::Api, "remove_watch", async {
			let id = id.to_string();
			let url = self.config.endpoint(["api", "watch", id.as_str()])?;

			expect_success(&self.send(HttpRequest::delete(url)).await?)
		})
		.await
	}
}
