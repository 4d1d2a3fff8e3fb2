// self
use crate::{
	_prelude::*,
	config::{ClientConfig, SessionStatusCodes},
};

/// Errors raised while constructing or validating client configurations.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ClientConfigError {
	/// Base URL must use HTTP or HTTPS.
	#[error("The base URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// Base URL that failed validation.
		url: String,
	},
	/// Base URL cannot carry path segments (for example `mailto:` URLs).
	#[error("The base URL cannot be used as a base: {url}.")]
	CannotBeABase {
		/// Base URL that failed validation.
		url: String,
	},
	/// A required text setting was empty.
	#[error("The {field} setting cannot be empty.")]
	EmptySetting {
		/// Which setting failed validation.
		field: &'static str,
	},
	/// The OAuth provider must be a single path segment.
	#[error("The OAuth provider must be a single path segment: {provider}.")]
	InvalidOAuthProvider {
		/// Provider value that failed validation.
		provider: String,
	},
	/// Session statuses must be client or server error codes.
	#[error("The {field} status must be within 400..=599, got {status}.")]
	SessionStatusOutOfRange {
		/// Which status failed validation.
		field: &'static str,
		/// Offending status value.
		status: u16,
	},
	/// Both session signals cannot share one status.
	#[error("Session statuses must differ, both are {status}.")]
	ConflictingSessionStatuses {
		/// Shared status value.
		status: u16,
	},
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	/// Backend base URL.
	pub base_url: Url,
	/// Refresh endpoint path relative to the base URL.
	pub refresh_path: String,
	/// Location used when the session ends.
	pub login_location: String,
	/// OAuth provider segment.
	pub oauth_provider: String,
	/// Session protocol status codes.
	pub statuses: SessionStatusCodes,
}
impl ClientConfigBuilder {
	/// Creates a new builder seeded with the provided base URL and default settings.
	pub fn new(base_url: Url) -> Self {
		Self {
			base_url,
			refresh_path: ClientConfig::DEFAULT_REFRESH_PATH.into(),
			login_location: ClientConfig::DEFAULT_LOGIN_LOCATION.into(),
			oauth_provider: ClientConfig::DEFAULT_OAUTH_PROVIDER.into(),
			statuses: SessionStatusCodes::default(),
		}
	}

	/// Overrides the refresh endpoint path.
	pub fn refresh_path(mut self, path: impl Into<String>) -> Self {
		self.refresh_path = path.into();

		self
	}

	/// Overrides the login entry point.
	pub fn login_location(mut self, location: impl Into<String>) -> Self {
		self.login_location = location.into();

		self
	}

	/// Overrides the OAuth provider segment.
	pub fn oauth_provider(mut self, provider: impl Into<String>) -> Self {
		self.oauth_provider = provider.into();

		self
	}

	/// Overrides the invalid-session status.
	pub fn invalid_session_status(mut self, status: u16) -> Self {
		self.statuses.invalid_session = status;

		self
	}

	/// Overrides the expired-access-token status.
	pub fn expired_access_token_status(mut self, status: u16) -> Self {
		self.statuses.expired_access_token = status;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ClientConfigError> {
		let config = ClientConfig {
			base_url: self.base_url,
			refresh_path: self.refresh_path.trim().to_owned(),
			login_location: self.login_location.trim().to_owned(),
			oauth_provider: self.oauth_provider.trim().to_owned(),
			statuses: self.statuses,
		};

		config.validate()?;

		Ok(config)
	}
}

impl ClientConfig {
	/// Validates invariants for the configuration.
	fn validate(&self) -> Result<(), ClientConfigError> {
		if !matches!(self.base_url.scheme(), "http" | "https") {
			return Err(ClientConfigError::UnsupportedScheme { url: self.base_url.to_string() });
		}
		if self.base_url.cannot_be_a_base() {
			return Err(ClientConfigError::CannotBeABase { url: self.base_url.to_string() });
		}
		if self.refresh_path.trim_matches('/').is_empty() {
			return Err(ClientConfigError::EmptySetting { field: "refresh_path" });
		}
		if self.login_location.is_empty() {
			return Err(ClientConfigError::EmptySetting { field: "login_location" });
		}
		if self.oauth_provider.is_empty() {
			return Err(ClientConfigError::EmptySetting { field: "oauth_provider" });
		}
		if self.oauth_provider.contains('/') {
			return Err(ClientConfigError::InvalidOAuthProvider {
				provider: self.oauth_provider.clone(),
			});
		}

		validate_status("invalid_session", self.statuses.invalid_session)?;
		validate_status("expired_access_token", self.statuses.expired_access_token)?;

		if self.statuses.invalid_session == self.statuses.expired_access_token {
			return Err(ClientConfigError::ConflictingSessionStatuses {
				status: self.statuses.invalid_session,
			});
		}

		Ok(())
	}
}

fn validate_status(field: &'static str, status: u16) -> Result<(), ClientConfigError> {
	if (400..=599).contains(&status) {
		Ok(())
	} else {
		Err(ClientConfigError::SessionStatusOutOfRange { field, status })
	}
}
