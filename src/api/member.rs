//! Profile of the logged-in member.

// self
use crate::{
	_prelude::*,
	api::observed,
	client::{ApiClient, decode_json},
	http::{ApiHttpClient, HttpRequest},
	model::MemberInfo,
	obs::CallKind,
};

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Fetches the logged-in member's profile (`GET api/members/info`).
	pub async fn current_member(&self) -> Result<MemberInfo> {
		observed(CallKind::Api, "current_member", async {
			let url = self.config.endpoint(["api", "members", "info"])?;
			let response = self.send(HttpRequest::get(url)).await?;

			decode_json(&response)
		})
		.await
	}
}
