//! Optional observability helpers for backend calls and session events.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `ott_client.call` with the `call`
//!   (operation family) and `stage` (call site) fields, and to log session events and
//!   call failures.
//! - Enable `metrics` to increment the `ott_client_call_total` counter for every
//!   attempt/success/failure, labeled by `call` + `outcome`, and the
//!   `ott_client_session_event_total` counter labeled by `event`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Families of backend calls observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Intercepted API call carrying the member's bearer token.
	Api,
	/// Dedicated refresh-token call.
	Refresh,
	/// Login calls (OAuth callback, development login).
	Login,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::Api => "api",
			CallKind::Refresh => "refresh",
			CallKind::Login => "login",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Session lifecycle events worth recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionEvent {
	/// Tokens were stored after a login.
	LoggedIn,
	/// The access token was refreshed.
	Refreshed,
	/// A refresh was skipped because a concurrent one already rotated the tokens.
	RefreshCoalesced,
	/// The refresh call failed; the session was terminated.
	RefreshFailed,
	/// The backend reported the session as invalid; the session was terminated.
	Invalidated,
	/// The member logged out.
	LoggedOut,
}
impl SessionEvent {
	/// Returns a stable label suitable for log or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			SessionEvent::LoggedIn => "logged_in",
			SessionEvent::Refreshed => "refreshed",
			SessionEvent::RefreshCoalesced => "refresh_coalesced",
			SessionEvent::RefreshFailed => "refresh_failed",
			SessionEvent::Invalidated => "invalidated",
			SessionEvent::LoggedOut => "logged_out",
		}
	}

	/// Returns `true` for events that end the session involuntarily.
	pub const fn is_termination(self) -> bool {
		matches!(self, SessionEvent::RefreshFailed | SessionEvent::Invalidated)
	}
}
impl Display for SessionEvent {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
