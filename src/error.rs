//! Client-level error types shared across the session wrapper, stores, and API calls.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Session-store failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Backend response body could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	Encode {
		/// Serializer failure.
		#[source]
		source: serde_json::Error,
	},
	/// The session ended or could not be recovered.
	#[error(transparent)]
	Session(#[from] SessionError),
	/// Backend rejected the request with a non-session error status.
	#[error(transparent)]
	Api(#[from] ApiError),

	/// Caller supplied an argument the backend cannot accept.
	#[error("Invalid input: {reason}.")]
	InvalidInput {
		/// Human-readable reason string.
		reason: String,
	},
}
impl Error {
	/// Classifies the error the way callers are expected to surface it.
	pub fn category(&self) -> ErrorCategory {
		match self {
			Self::Session(_) => ErrorCategory::Session,
			Self::Api(_) => ErrorCategory::Business,
			_ => ErrorCategory::Unexpected,
		}
	}

	/// Returns the backend error payload when the failure is a business error.
	pub fn as_api(&self) -> Option<&ApiError> {
		match self {
			Self::Api(err) => Some(err),
			_ => None,
		}
	}

	/// Returns `true` when the error terminated the local session.
	pub fn is_session_terminated(&self) -> bool {
		matches!(
			self,
			Self::Session(
				SessionError::Invalid | SessionError::RefreshFailed { .. } | SessionError::Ended
			)
		)
	}
}

/// How an [`Error`] should be handled by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
	/// Session was invalidated or could not be refreshed; the user must log in again.
	Session,
	/// Request-specific rejection (duplicate friend request, not found, ...).
	Business,
	/// Network, decoding, storage, or configuration failure.
	Unexpected,
}

/// Session failures surfaced by the authenticated request wrapper.
#[derive(Debug, ThisError)]
pub enum SessionError {
	/// Backend signalled that the session is no longer valid.
	#[error("Backend reported the session as invalid.")]
	Invalid,
	/// The store holds no refresh token to recover an expired access token.
	#[error("No refresh token is stored for this session.")]
	MissingRefreshToken,
	/// The refresh cycle failed and the session was terminated.
	#[error("Access token refresh failed.")]
	RefreshFailed {
		/// Failure raised by the refresh call.
		#[source]
		source: Box<Error>,
	},
	/// A concurrent refresh failed and ended the session while this request waited on it.
	#[error("Session was ended by a concurrent refresh failure.")]
	Ended,
}
impl SessionError {
	/// Wraps a refresh failure.
	pub fn refresh_failed(source: Error) -> Self {
		Self::RefreshFailed { source: Box::new(source) }
	}
}

/// Coarse classification of backend error statuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
	/// `400`: malformed request or rejected input (for example a self friend request).
	BadRequest,
	/// `401`: missing or unrecognized credentials.
	Unauthorized,
	/// `403`: authenticated but not allowed.
	Forbidden,
	/// `404`: the addressed resource does not exist.
	NotFound,
	/// `409`: duplicate or conflicting state (for example a repeated friend request).
	Conflict,
	/// `429`: the backend is throttling this client.
	RateLimited,
	/// `5xx`: backend failure.
	Server,
	/// Any other non-success status.
	Other,
}
impl ApiErrorKind {
	/// Maps an HTTP status code onto a kind.
	pub const fn from_status(status: u16) -> Self {
		match status {
			400 | 422 => Self::BadRequest,
			401 => Self::Unauthorized,
			403 => Self::Forbidden,
			404 | 410 => Self::NotFound,
			409 => Self::Conflict,
			429 => Self::RateLimited,
			500..=599 => Self::Server,
			_ => Self::Other,
		}
	}

	/// Returns a stable label suitable for log fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::BadRequest => "bad_request",
			Self::Unauthorized => "unauthorized",
			Self::Forbidden => "forbidden",
			Self::NotFound => "not_found",
			Self::Conflict => "conflict",
			Self::RateLimited => "rate_limited",
			Self::Server => "server",
			Self::Other => "other",
		}
	}
}
impl Display for ApiErrorKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Non-success backend response passed through to the caller.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Backend returned status {status} ({kind}){}.", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct ApiError {
	/// HTTP status code.
	pub status: u16,
	/// Classified kind derived from the status.
	pub kind: ApiErrorKind,
	/// Backend-supplied message, when one could be extracted.
	pub message: Option<String>,
	/// Retry-After hint, if supplied.
	pub retry_after: Option<Duration>,
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Client configuration failed validation.
	#[error(transparent)]
	Invalid(#[from] crate::config::ClientConfigError),
	/// Environment variables could not be parsed into a configuration.
	#[error("Environment configuration is invalid.")]
	Env {
		/// Underlying envy failure.
		#[source]
		source: envy::Error,
	},
	/// An endpoint URL could not be derived from the base URL.
	#[error("Cannot derive an endpoint from base URL {base}.")]
	Endpoint {
		/// Configured base URL.
		base: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<envy::Error> for ConfigError {
	fn from(source: envy::Error) -> Self {
		Self::Env { source }
	}
}

/// Response decoding failures.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Backend responded with JSON that does not match the expected shape.
	#[error("Backend returned malformed JSON at `{}`.", .source.path())]
	Json {
		/// Structured parsing failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
}

/// Transport-level failures.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the backend.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn categories_follow_error_layers() {
		let api = Error::from(ApiError {
			status: 409,
			kind: ApiErrorKind::from_status(409),
			message: Some("already requested".into()),
			retry_after: None,
		});

		assert_eq!(api.category(), ErrorCategory::Business);
		assert_eq!(api.as_api().map(|e| e.kind), Some(ApiErrorKind::Conflict));
		assert_eq!(Error::from(SessionError::Invalid).category(), ErrorCategory::Session);
		assert_eq!(
			Error::InvalidInput { reason: "empty".into() }.category(),
			ErrorCategory::Unexpected
		);
	}

	#[test]
	fn refresh_failure_exposes_source_and_terminates() {
		let inner = Error::from(SessionError::MissingRefreshToken);
		let err = Error::from(SessionError::refresh_failed(inner));

		assert!(err.is_session_terminated());
		assert!(!Error::from(SessionError::MissingRefreshToken).is_session_terminated());

		let source = std::error::Error::source(&err).expect("Session error should have a source.");

		assert_eq!(source.to_string(), "No refresh token is stored for this session.");
	}

	#[test]
	fn api_error_display_includes_message_when_present() {
		let with_message = ApiError {
			status: 404,
			kind: ApiErrorKind::NotFound,
			message: Some("member not found".into()),
			retry_after: None,
		};
		let without_message = ApiError { message: None, ..with_message.clone() };

		assert_eq!(
			with_message.to_string(),
			"Backend returned status 404 (not_found): member not found."
		);
		assert_eq!(without_message.to_string(), "Backend returned status 404 (not_found).");
	}

	#[test]
	fn status_kinds_cover_common_codes() {
		assert_eq!(ApiErrorKind::from_status(400), ApiErrorKind::BadRequest);
		assert_eq!(ApiErrorKind::from_status(429), ApiErrorKind::RateLimited);
		assert_eq!(ApiErrorKind::from_status(503), ApiErrorKind::Server);
		assert_eq!(ApiErrorKind::from_status(418), ApiErrorKind::Other);
	}
}
