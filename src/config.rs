//! Client configuration: backend location, session protocol statuses, and login entry point.
//!
//! Configurations are assembled with [`ClientConfigBuilder`], which validates every
//! field, or loaded from `OTT_`-prefixed environment variables with
//! [`ClientConfig::from_env`].

/// Builder API for assembling client configurations.
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, error::ConfigError};

/// Status codes the backend uses to drive the session protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatusCodes {
	/// Session is unusable; clear local state and send the user to the login entry point.
	pub invalid_session: u16,
	/// Access token expired; refresh once and retry.
	pub expired_access_token: u16,
}
impl SessionStatusCodes {
	/// Default status for an invalid session.
	pub const DEFAULT_INVALID_SESSION: u16 = 460;
	/// Default status for an expired access token.
	pub const DEFAULT_EXPIRED_ACCESS_TOKEN: u16 = 461;

	/// Maps a response status onto a session signal, if it carries one.
	pub fn signal(&self, status: u16) -> Option<SessionSignal> {
		if status == self.invalid_session {
			Some(SessionSignal::Invalid)
		} else if status == self.expired_access_token {
			Some(SessionSignal::Expired)
		} else {
			None
		}
	}
}
impl Default for SessionStatusCodes {
	fn default() -> Self {
		Self {
			invalid_session: Self::DEFAULT_INVALID_SESSION,
			expired_access_token: Self::DEFAULT_EXPIRED_ACCESS_TOKEN,
		}
	}
}

/// Session-level meaning of a backend status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionSignal {
	/// Terminate the session without retrying.
	Invalid,
	/// Refresh the access token and retry once.
	Expired,
}

/// Immutable, validated client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
	/// Backend base URL every endpoint is resolved against.
	pub base_url: Url,
	/// Path of the refresh endpoint, relative to the base URL.
	pub refresh_path: String,
	/// Location the navigator is sent to when the session ends.
	pub login_location: String,
	/// OAuth provider segment used by the backend's login routes.
	pub oauth_provider: String,
	/// Session protocol status codes.
	pub statuses: SessionStatusCodes,
}
impl ClientConfig {
	/// Default refresh endpoint path.
	pub const DEFAULT_REFRESH_PATH: &'static str = "auth/refresh";
	/// Default login entry point.
	pub const DEFAULT_LOGIN_LOCATION: &'static str = "/login";
	/// Default OAuth provider.
	pub const DEFAULT_OAUTH_PROVIDER: &'static str = "kakao";
	/// Prefix shared by every environment variable read by [`ClientConfig::from_env`].
	pub const ENV_PREFIX: &'static str = "OTT_";

	/// Creates a new builder for the provided base URL.
	pub fn builder(base_url: Url) -> ClientConfigBuilder {
		ClientConfigBuilder::new(base_url)
	}

	/// Loads the configuration from `OTT_`-prefixed environment variables.
	pub fn from_env() -> Result<Self, ConfigError> {
		let env = envy::prefixed(Self::ENV_PREFIX).from_env::<EnvConfig>()?;

		Ok(env.into_builder().build()?)
	}

	/// Loads the configuration from `(name, value)` pairs using the same names as
	/// [`ClientConfig::from_env`].
	pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
	where
		I: IntoIterator<Item = (String, String)>,
	{
		let env = envy::prefixed(Self::ENV_PREFIX).from_iter::<_, EnvConfig>(vars)?;

		Ok(env.into_builder().build()?)
	}

	/// Resolves an endpoint from path segments, percent-encoding each segment.
	pub fn endpoint<I, S>(&self, segments: I) -> Result<Url, ConfigError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut url = self.base_url.clone();

		url.path_segments_mut()
			.map_err(|_| ConfigError::Endpoint { base: self.base_url.to_string() })?
			.pop_if_empty()
			.extend(segments);

		Ok(url)
	}

	/// Resolves the refresh endpoint.
	pub fn refresh_url(&self) -> Result<Url, ConfigError> {
		self.endpoint(self.refresh_path.split('/').filter(|s| !s.is_empty()))
	}
}

#[derive(Debug, Deserialize)]
struct EnvConfig {
	api_base_url: Url,
	refresh_path: Option<String>,
	login_location: Option<String>,
	oauth_provider: Option<String>,
	invalid_session_status: Option<u16>,
	expired_access_token_status: Option<u16>,
}
impl EnvConfig {
	fn into_builder(self) -> ClientConfigBuilder {
		let mut builder = ClientConfigBuilder::new(self.api_base_url);

		if let Some(path) = self.refresh_path {
			builder = builder.refresh_path(path);
		}
		if let Some(location) = self.login_location {
			builder = builder.login_location(location);
		}
		if let Some(provider) = self.oauth_provider {
			builder = builder.oauth_provider(provider);
		}
		if let Some(status) = self.invalid_session_status {
			builder = builder.invalid_session_status(status);
		}
		if let Some(status) = self.expired_access_token_status {
			builder = builder.expired_access_token_status(status);
		}

		builder
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn config(base: &str) -> ClientConfig {
		ClientConfig::builder(Url::parse(base).expect("Base URL fixture should parse."))
			.build()
			.expect("Default configuration should validate.")
	}

	#[test]
	fn endpoint_joins_and_encodes_segments() {
		let config = config("http://ott.example.com");
		let url = config
			.endpoint(["api", "search", "title", "The Crown / 2"])
			.expect("Endpoint should resolve.");

		assert_eq!(url.as_str(), "http://ott.example.com/api/search/title/The%20Crown%20%2F%202");
	}

	#[test]
	fn endpoint_keeps_base_path_prefix() {
		let config = config("https://gateway.example.com/ott/");

		assert_eq!(
			config.endpoint(["api", "watch"]).expect("Endpoint should resolve.").as_str(),
			"https://gateway.example.com/ott/api/watch"
		);
		assert_eq!(
			config.refresh_url().expect("Refresh endpoint should resolve.").as_str(),
			"https://gateway.example.com/ott/auth/refresh"
		);
	}

	#[test]
	fn status_codes_map_to_signals() {
		let statuses = SessionStatusCodes::default();

		assert_eq!(statuses.signal(460), Some(SessionSignal::Invalid));
		assert_eq!(statuses.signal(461), Some(SessionSignal::Expired));
		assert_eq!(statuses.signal(401), None);
	}

	#[test]
	fn from_vars_applies_overrides() {
		let config = ClientConfig::from_vars([
			("OTT_API_BASE_URL".to_owned(), "http://localhost:8080".to_owned()),
			("OTT_LOGIN_LOCATION".to_owned(), "/start".to_owned()),
			("OTT_EXPIRED_ACCESS_TOKEN_STATUS".to_owned(), "419".to_owned()),
		])
		.expect("Environment configuration should load.");

		assert_eq!(config.base_url.as_str(), "http://localhost:8080/");
		assert_eq!(config.login_location, "/start");
		assert_eq!(config.refresh_path, ClientConfig::DEFAULT_REFRESH_PATH);
		assert_eq!(config.statuses.expired_access_token, 419);
		assert_eq!(config.statuses.invalid_session, 460);
	}

	#[test]
	fn from_vars_requires_base_url() {
		let err = ClientConfig::from_vars([("OTT_LOGIN_LOCATION".to_owned(), "/".to_owned())])
			.expect_err("Missing base URL should fail.");

		assert!(matches!(err, ConfigError::Env { .. }));
	}

	#[test]
	fn from_vars_validates_through_builder() {
		let err = ClientConfig::from_vars([
			("OTT_API_BASE_URL".to_owned(), "http://localhost:8080".to_owned()),
			("OTT_INVALID_SESSION_STATUS".to_owned(), "461".to_owned()),
		])
		.expect_err("Conflicting statuses should fail.");

		assert!(matches!(
			err,
			ConfigError::Invalid(ClientConfigError::ConflictingSessionStatuses { status: 461 })
		));
	}
}
