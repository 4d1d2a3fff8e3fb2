//! Thread-safe in-memory [`SessionStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, Session, TokenSecret},
	store::{SessionStore, StoreError},
};

type StoreMap = Arc<RwLock<BTreeMap<String, String>>>;

/// Thread-safe storage backend that keeps tokens in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Creates a store pre-populated with `session`.
	pub fn with_session(session: &Session) -> Self {
		let store = Self::default();

		store.write_session(session);

		store
	}

	/// Writes a raw entry, bypassing the session pairing.
	///
	/// Useful to model partially populated storage, such as an access token left behind
	/// without its refresh token.
	pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
		self.0.write().insert(key.into(), value.into());
	}

	/// Returns `true` when no entries are stored.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	fn read_key(&self, key: &str) -> Option<TokenSecret> {
		self.0.read().get(key).cloned().map(TokenSecret::new)
	}

	fn write_session(&self, session: &Session) {
		let mut guard = self.0.write();

		guard.insert(ACCESS_TOKEN_KEY.into(), session.access_token.expose().into());
		guard.insert(REFRESH_TOKEN_KEY.into(), session.refresh_token.expose().into());
	}
}
impl SessionStore for MemoryStore {
	fn access_token(&self) -> Result<Option<TokenSecret>, StoreError> {
		Ok(self.read_key(ACCESS_TOKEN_KEY))
	}

	fn refresh_token(&self) -> Result<Option<TokenSecret>, StoreError> {
		Ok(self.read_key(REFRESH_TOKEN_KEY))
	}

	fn save(&self, session: &Session) -> Result<(), StoreError> {
		self.write_session(session);

		Ok(())
	}

	fn clear(&self) -> Result<(), StoreError> {
		self.0.write().clear();

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn save_replaces_both_tokens_and_clear_empties() {
		let store = MemoryStore::with_session(&Session::new("access-1", "refresh-1"));

		store.save(&Session::new("access-2", "refresh-2")).expect("Save should succeed.");

		assert_eq!(
			store.access_token().expect("Access token read should succeed."),
			Some(TokenSecret::new("access-2"))
		);
		assert_eq!(
			store.refresh_token().expect("Refresh token read should succeed."),
			Some(TokenSecret::new("refresh-2"))
		);

		store.insert_raw("unrelated", "value");
		store.clear().expect("Clear should succeed.");

		assert!(store.is_empty());
		assert_eq!(store.access_token().expect("Access token read should succeed."), None);
	}

	#[test]
	fn clones_share_state() {
		let store = MemoryStore::default();
		let clone = store.clone();

		clone.save(&Session::new("shared", "shared-refresh")).expect("Save should succeed.");

		assert_eq!(
			store.access_token().expect("Access token read should succeed."),
			Some(TokenSecret::new("shared"))
		);
	}
}
