//! Access token refresh with a singleflight guard.
//!
//! Every expired-token response funnels through [`ApiClient::refresh_session`]. The
//! first caller takes the client's refresh guard and rotates the token pair; callers
//! queued behind it notice the stored access token no longer matches the one their
//! request carried and reuse it instead of refreshing again. A failed refresh ends the
//! session once; queued callers that find the store emptied fail with
//! [`SessionError::Ended`] without refreshing or terminating again.

mod metrics;

pub use metrics::SessionMetrics;

// self
use crate::{
	_prelude::*,
	auth::{RefreshRequest, Session, TokenSecret},
	client::{ApiClient, decode_json},
	error::SessionError,
	http::{ApiHttpClient, HttpRequest},
	obs::{self, CallKind, CallOutcome, CallSpan, SessionEvent},
};

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Returns an access token newer than `sent_with`, refreshing the pair when needed.
	///
	/// On failure the session is terminated and the error is wrapped in
	/// [`SessionError::RefreshFailed`].
	pub async fn refresh_session(&self, sent_with: Option<&TokenSecret>) -> Result<TokenSecret> {
		const KIND: CallKind = CallKind::Refresh;

		let span = CallSpan::new(KIND, "refresh_session");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let _singleflight = self.refresh_guard.lock().await;

				match self.rotation_state(sent_with) {
					Ok(RotationState::Rotated(token)) => {
						self.session_metrics.record_coalesced();
						obs::log_session_event(SessionEvent::RefreshCoalesced);
						obs::record_session_event(SessionEvent::RefreshCoalesced);

						return Ok(token);
					},
					Ok(RotationState::Ended) => {
						self.session_metrics.record_coalesced();

						return Err(SessionError::Ended.into());
					},
					Ok(RotationState::Current) => {},
					Err(e) => return Err(self.fail_refresh(e)),
				}

				self.session_metrics.record_attempt();

				match self.rotate_tokens().await {
					Ok(session) => {
						self.session_metrics.record_success();
						obs::log_session_event(SessionEvent::Refreshed);
						obs::record_session_event(SessionEvent::Refreshed);

						Ok(session.access_token)
					},
					Err(e) => {
						self.session_metrics.record_failure();

						Err(self.fail_refresh(e))
					},
				}
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(e) => {
				obs::record_call_outcome(KIND, CallOutcome::Failure);
				obs::log_call_failure(KIND, e);
			},
		}

		result
	}

	/// Compares the stored access token with the token `sent_with` after taking the guard.
	fn rotation_state(&self, sent_with: Option<&TokenSecret>) -> Result<RotationState> {
		let state = match (self.store.access_token()?, sent_with) {
			(Some(current), Some(sent)) if &current == sent => RotationState::Current,
			(Some(current), _) => RotationState::Rotated(current),
			(None, Some(_)) => RotationState::Ended,
			(None, None) => RotationState::Current,
		};

		Ok(state)
	}

	async fn rotate_tokens(&self) -> Result<Session> {
		let refresh_token =
			self.store.refresh_token()?.ok_or(SessionError::MissingRefreshToken)?;
		let request = HttpRequest::post(self.config.refresh_url()?)
			.with_body(&RefreshRequest { refresh_token: refresh_token.expose() })?;
		let response = self.send_plain(request).await?;
		let session = decode_json::<Session>(&response)?;

		self.store.save(&session)?;

		Ok(session)
	}

	fn fail_refresh(&self, source: Error) -> Error {
		self.terminate_session(SessionEvent::RefreshFailed);

		SessionError::refresh_failed(source).into()
	}
}

enum RotationState {
	/// The token the request carried is still stored.
	Current,
	/// Another caller already rotated the pair.
	Rotated(TokenSecret),
	/// Another caller's refresh failed and cleared the store.
	Ended,
}
