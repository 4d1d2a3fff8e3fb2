//! Session storage contracts and built-in store implementations.
//!
//! A store plays the role of browser local storage: two string entries keyed by
//! [`ACCESS_TOKEN_KEY`](crate::auth::ACCESS_TOKEN_KEY) and
//! [`REFRESH_TOKEN_KEY`](crate::auth::REFRESH_TOKEN_KEY), read and written
//! synchronously, and cleared together.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	auth::{Session, TokenSecret},
};

/// Storage backend contract implemented by session stores.
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Reads the stored access token, if any.
	fn access_token(&self) -> Result<Option<TokenSecret>, StoreError>;

	/// Reads the stored refresh token, if any.
	fn refresh_token(&self) -> Result<Option<TokenSecret>, StoreError>;

	/// Persists both tokens of `session`, replacing previous values.
	fn save(&self, session: &Session) -> Result<(), StoreError>;

	/// Removes both tokens in one step.
	fn clear(&self) -> Result<(), StoreError>;

	/// Returns the full session when both tokens are present.
	fn session(&self) -> Result<Option<Session>, StoreError> {
		match (self.access_token()?, self.refresh_token()?) {
			(Some(access_token), Some(refresh_token)) =>
				Ok(Some(Session { access_token, refresh_token })),
			_ => Ok(None),
		}
	}
}

/// Error type produced by [`SessionStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
