//! Catalog reads: random picks, the recommendation board, and field search.

// self
use crate::{
	_prelude::*,
	api::observed,
	client::{ApiClient, decode_json, decode_list},
	http::{ApiHttpClient, HttpRequest},
	model::{Content, ContentEnvelope, RecommendationBoard, SearchField, unwrap_envelopes},
	obs::CallKind,
};

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Fetches `count` random catalog titles (`GET api/random/{count}`).
	pub async fn random_contents(&self, count: usize) -> Result<Vec<Content>> {
		observed(CallKind::Api, "random_contents", async {
			ensure_count(count)?;

			let count = count.to_string();
			let url = self.config.endpoint(["api", "random", count.as_str()])?;
			let response = self.send(HttpRequest::get(url)).await?;

			Ok(unwrap_envelopes(decode_list::<ContentEnvelope>(&response)?))
		})
		.await
	}

	/// Fetches the personalized recommendation board (`GET api/recommend/{count}`).
	pub async fn recommended_contents(&self, count: usize) -> Result<RecommendationBoard> {
		observed(CallKind::Api, "recommended_contents", async {
			ensure_count(count)?;

			let count = count.to_string();
			let url = self.config.endpoint(["api", "recommend", count.as_str()])?;
			let response = self.send(HttpRequest::get(url)).await?;

			if response.is_success() && response.is_blank() {
				return Ok(RecommendationBoard::default());
			}

			decode_json(&response)
		})
		.await
	}

	/// Searches the catalog (`GET api/search/{field}/{query}`).
	///
	/// A blank query returns no results without contacting the backend.
	pub async fn search_contents(&self, field: SearchField, query: &str) -> Result<Vec<Content>> {
		let query = query.trim();

		if query.is_empty() {
			return Ok(Vec::new());
		}

		observed(CallKind::Api, "search_contents", async {
			let url = self.config.endpoint(["api", "search", field.as_str(), query])?;
			let response = self.send(HttpRequest::get(url)).await?;

			Ok(unwrap_envelopes(decode_list::<ContentEnvelope>(&response)?))
		})
		.await
	}
}

fn ensure_count(count: usize) -> Result<()> {
	if count == 0 {
		return Err(Error::InvalidInput { reason: "content count must be at least 1".into() });
	}

	Ok(())
}
