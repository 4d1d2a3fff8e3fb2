//! Redirect capability invoked when the session ends.
//!
//! In a browser the session wrapper would assign `window.location`; here the side
//! effect is injected so callers decide what "go to the login entry point" means
//! (re-render a view, print a prompt, record it in a test).

// self
use crate::_prelude::*;

/// Capability that moves the user to another location.
pub trait Navigator
where
	Self: Send + Sync,
{
	/// Navigates to `location`.
	fn redirect(&self, location: &str);
}

/// Navigator that only reports the redirect through the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingNavigator;
impl Navigator for LoggingNavigator {
	fn redirect(&self, location: &str) {
		#[cfg(feature = "tracing")]
		{
			tracing::info!(location, "redirecting to login entry point");
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = location;
		}
	}
}

/// Navigator that remembers where it was sent.
#[derive(Clone, Debug, Default)]
pub struct RecordingNavigator {
	history: Arc<Mutex<Vec<String>>>,
}
impl RecordingNavigator {
	/// Returns the most recent location, if any redirect happened.
	pub fn location(&self) -> Option<String> {
		self.history.lock().last().cloned()
	}

	/// Returns every location in redirect order.
	pub fn history(&self) -> Vec<String> {
		self.history.lock().clone()
	}
}
impl Navigator for RecordingNavigator {
	fn redirect(&self, location: &str) {
		self.history.lock().push(location.to_owned());
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recording_navigator_tracks_history() {
		let navigator = RecordingNavigator::default();
		let shared: Arc<dyn Navigator> = Arc::new(navigator.clone());

		assert_eq!(navigator.location(), None);

		shared.redirect("/login");
		shared.redirect("/");

		assert_eq!(navigator.location().as_deref(), Some("/"));
		assert_eq!(navigator.history(), vec!["/login".to_owned(), "/".to_owned()]);
	}
}
