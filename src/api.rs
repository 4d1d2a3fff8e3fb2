//! Typed backend operations built on the authenticated request wrapper.
//!
//! Every operation except the login helpers in [`auth`] goes through
//! [`ApiClient::send`](crate::client::ApiClient), so it carries the stored bearer token
//! and inherits the refresh/redirect handling. Each call is wrapped in an
//! `ott_client.call` span and counted by outcome.

pub mod auth;
pub mod content;
pub mod friend;
pub mod member;
pub mod preference;
pub mod recommend;
pub mod watch;

// self
use crate::{
	_prelude::*,
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// Runs `call` inside a span for `stage`, recording its outcome.
pub(crate) async fn observed<T, F>(kind: CallKind, stage: &'static str, call: F) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	let span = CallSpan::new(kind, stage);

	obs::record_call_outcome(kind, CallOutcome::Attempt);

	let result = span.instrument(call).await;

	match &result {
		Ok(_) => obs::record_call_outcome(kind, CallOutcome::Success),
		Err(e) => {
			obs::record_call_outcome(kind, CallOutcome::Failure);
			obs::log_call_failure(kind, e);
		},
	}

	result
}
