// self
use crate::{
	_prelude::*,
	obs::{CallKind, SessionEvent},
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by client calls.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided call kind + stage.
	pub fn new(kind: CallKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("ott_client.call", call = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs a session event; terminations are warnings.
pub fn log_session_event(event: SessionEvent) {
	#[cfg(feature = "tracing")]
	{
		if event.is_termination() {
			tracing::warn!(event = event.as_str(), "session terminated");
		} else {
			tracing::info!(event = event.as_str(), "session event");
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = event;
	}
}

/// Logs a failed call at a level matching its category.
///
/// Business errors are expected traffic and stay at debug; unexpected failures are
/// errors.
pub fn log_call_failure(kind: CallKind, err: &Error) {
	#[cfg(feature = "tracing")]
	{
		use crate::error::ErrorCategory;

		match err.category() {
			ErrorCategory::Business =>
				tracing::debug!(call = kind.as_str(), error = %err, "call rejected"),
			ErrorCategory::Session =>
				tracing::warn!(call = kind.as_str(), error = %err, "call ended session"),
			ErrorCategory::Unexpected =>
				tracing::error!(call = kind.as_str(), error = %err, "call failed"),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, err);
	}
}
