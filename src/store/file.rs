//! File-backed [`SessionStore`] that keeps tokens across process restarts.

// std
use std::{
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	auth::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, Session, TokenSecret},
	store::{SessionStore, StoreError},
};

/// Persists the token entries to a JSON object file after each mutation.
///
/// The on-disk layout mirrors browser local storage:
/// `{"accessToken": "...", "refreshToken": "..."}`.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
	inner: Arc<RwLock<BTreeMap<String, String>>>,
}
impl FileStore {
	/// Opens (or creates) a store at the provided path, eagerly loading existing data.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let snapshot = if path.exists() { Self::load_snapshot(&path)? } else { BTreeMap::new() };

		Ok(Self { path, inner: Arc::new(RwLock::new(snapshot)) })
	}

	/// Location of the backing file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn load_snapshot(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
		let metadata = path.metadata().map_err(|e| StoreError::Backend {
			message: format!("Failed to inspect {}: {e}", path.display()),
		})?;

		if metadata.len() == 0 {
			return Ok(BTreeMap::new());
		}

		let bytes = fs::read(path).map_err(|e| StoreError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;

		serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
			message: format!("Failed to parse {}: {e}", path.display()),
		})
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}
		Ok(())
	}

	fn persist_locked(&self, contents: &BTreeMap<String, String>) -> Result<(), StoreError> {
		Self::ensure_parent_exists(&self.path)?;

		let serialized =
			serde_json::to_vec_pretty(contents).map_err(|e| StoreError::Serialization {
				message: format!("Failed to serialize store snapshot: {e}"),
			})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}

	fn read_key(&self, key: &str) -> Option<TokenSecret> {
		self.inner.read().get(key).cloned().map(TokenSecret::new)
	}
}
impl SessionStore for FileStore {
	fn access_token(&self) -> Result<Option<TokenSecret>, StoreError> {
		Ok(self.read_key(ACCESS_TOKEN_KEY))
	}

	fn refresh_token(&self) -> Result<Option<TokenSecret>, StoreError> {
		Ok(self.read_key(REFRESH_TOKEN_KEY))
	}

	fn save(&self, session: &Session) -> Result<(), StoreError> {
		let mut guard = self.inner.write();
		let mut next = guard.clone();

		next.insert(ACCESS_TOKEN_KEY.into(), session.access_token.expose().into());
		next.insert(REFRESH_TOKEN_KEY.into(), session.refresh_token.expose().into());
		self.persist_locked(&next)?;

		*guard = next;

		Ok(())
	}

	fn clear(&self) -> Result<(), StoreError> {
		let mut guard = self.inner.write();

		self.persist_locked(&BTreeMap::new())?;
		guard.clear();

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{env, process};
	// self
	use super::*;

	fn temp_path(tag: &str) -> PathBuf {
		let unique = format!(
			"ott_client_file_store_{tag}_{}_{}.json",
			process::id(),
			OffsetDateTime::now_utc().unix_timestamp_nanos(),
		);

		env::temp_dir().join(unique)
	}

	#[test]
	fn save_and_reload_round_trip() {
		let path = temp_path("reload");
		let store = FileStore::open(&path).expect("Failed to open file store.");

		store
			.save(&Session::new("access-token", "refresh-token"))
			.expect("Failed to save session into file store.");
		drop(store);

		let reopened = FileStore::open(&path).expect("Failed to reopen file store.");

		assert_eq!(
			reopened.session().expect("Reading the reopened store should succeed."),
			Some(Session::new("access-token", "refresh-token"))
		);

		let raw: serde_json::Value = serde_json::from_slice(
			&fs::read(&path).expect("Store file should be readable after save."),
		)
		.expect("Store file should contain JSON.");

		assert_eq!(raw["accessToken"], "access-token");
		assert_eq!(raw["refreshToken"], "refresh-token");

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary file store {}: {e}", path.display())
		});
	}

	#[test]
	fn clear_persists_empty_storage() {
		let path = temp_path("clear");
		let store = FileStore::open(&path).expect("Failed to open file store.");

		store.save(&Session::new("a", "r")).expect("Failed to save session.");
		store.clear().expect("Failed to clear file store.");

		let reopened = FileStore::open(&path).expect("Failed to reopen file store.");

		assert_eq!(reopened.access_token().expect("Access token read should succeed."), None);
		assert_eq!(reopened.refresh_token().expect("Refresh token read should succeed."), None);

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary file store {}: {e}", path.display())
		});
	}

	#[test]
	fn corrupt_file_reports_serialization_error() {
		let path = temp_path("corrupt");

		fs::write(&path, b"not json").expect("Failed to seed corrupt store file.");

		let err = FileStore::open(&path).expect_err("Corrupt store should fail to open.");

		assert!(matches!(err, StoreError::Serialization { .. }));

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary file store {}: {e}", path.display())
		});
	}

	#[test]
	fn failed_write_leaves_memory_unchanged() {
		let path = temp_path("failed_write");
		let store = FileStore::open(&path).expect("Failed to open file store.");

		store.save(&Session::new("a", "r")).expect("Failed to save session.");
		fs::remove_file(&path).expect("Failed to remove store file.");
		fs::create_dir(&path).expect("Failed to block the store path with a directory.");

		assert!(store.save(&Session::new("b", "s")).is_err());
		assert!(store.clear().is_err());
		assert_eq!(
			store.session().expect("Reading the store should succeed."),
			Some(Session::new("a", "r"))
		);

		let mut tmp_path = path.clone();

		tmp_path.set_extension("tmp");

		let _ = fs::remove_file(&tmp_path);

		fs::remove_dir(&path).unwrap_or_else(|e| {
			panic!("Failed to remove blocking directory {}: {e}", path.display())
		});
	}
}
