//! Authenticated request wrapper shared by every backend operation.
//!
//! [`ApiClient`] attaches the stored access token to each intercepted request and
//! reacts to the backend's session statuses:
//!
//! - the invalid-session status clears the store, redirects to the login entry point,
//!   and fails the call with [`SessionError::Invalid`];
//! - the expired-access-token status refreshes the token pair once (coalescing
//!   concurrent refreshes) and retries the original request with the new token. The
//!   retry itself is not intercepted, so its outcome is what the caller observes.

pub mod refresh;

pub use refresh::*;

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	config::{ClientConfig, SessionSignal},
	error::{ApiError, ApiErrorKind, DecodeError, SessionError},
	http::{ApiHttpClient, HttpRequest, HttpResponse},
	navigator::Navigator,
	obs::{self, SessionEvent},
	store::SessionStore,
};
#[cfg(feature = "reqwest")] use crate::{error::ConfigError, http::ReqwestHttpClient};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = ApiClient<ReqwestHttpClient>;

/// Typed client for the streaming backend.
///
/// The client owns the HTTP transport, the session store, and the navigator used when
/// the session ends. Clones share all three along with the refresh guard, so a clone
/// handed to another task still coalesces refreshes with the original.
#[derive(Clone)]
pub struct ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// HTTP client wrapper used for every outbound request.
	pub http_client: Arc<C>,
	/// Store holding the access/refresh token pair.
	pub store: Arc<dyn SessionStore>,
	/// Capability invoked with the login entry point when the session ends.
	pub navigator: Arc<dyn Navigator>,
	/// Validated backend configuration.
	pub config: ClientConfig,
	/// Shared counters for refresh, retry, and termination outcomes.
	pub session_metrics: Arc<SessionMetrics>,
	refresh_guard: Arc<AsyncMutex<()>>,
}
impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(
		config: ClientConfig,
		store: Arc<dyn SessionStore>,
		navigator: Arc<dyn Navigator>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			store,
			navigator,
			config,
			session_metrics: Default::default(),
			refresh_guard: Default::default(),
		}
	}

	/// Sends an intercepted request.
	///
	/// Non-success statuses other than the session statuses come back as `Ok` so the
	/// caller decides how to decode them.
	pub(crate) async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
		let bearer = self.store.access_token()?;
		let response =
			self.http_client.execute(request.clone().with_bearer(bearer.clone())).await?;

		match self.config.statuses.signal(response.status) {
			None => Ok(response),
			Some(SessionSignal::Invalid) => {
				self.terminate_session(SessionEvent::Invalidated);

				Err(SessionError::Invalid.into())
			},
			Some(SessionSignal::Expired) => {
				let token = self.refresh_session(bearer.as_ref()).await?;

				self.session_metrics.record_retry();

				Ok(self.http_client.execute(request.with_bearer(Some(token))).await?)
			},
		}
	}

	/// Sends a request without the session interception.
	pub(crate) async fn send_plain(&self, request: HttpRequest) -> Result<HttpResponse> {
		Ok(self.http_client.execute(request).await?)
	}

	/// Clears local session state, sends the navigator to the login entry point, and
	/// records `event`.
	pub(crate) fn terminate_session(&self, event: SessionEvent) {
		if let Err(e) = self.store.clear() {
			#[cfg(feature = "tracing")]
			{
				tracing::error!(error = %e, "failed to clear session store");
			}
			#[cfg(not(feature = "tracing"))]
			{
				let _ = e;
			}
		}

		self.navigator.redirect(&self.config.login_location);
		self.session_metrics.record_termination();
		obs::log_session_event(event);
		obs::record_session_event(event);
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestHttpClient> {
	/// Creates a client backed by a fresh reqwest transport.
	pub fn new(
		config: ClientConfig,
		store: Arc<dyn SessionStore>,
		navigator: Arc<dyn Navigator>,
	) -> Result<Self> {
		let client = ReqwestClient::builder().build().map_err(ConfigError::http_client_build)?;

		Ok(Self::with_http_client(config, store, navigator, ReqwestHttpClient::with_client(client)))
	}
}
impl<C> Debug for ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("base_url", &self.config.base_url.as_str())
			.field("login_location", &self.config.login_location)
			.field("session_metrics", &self.session_metrics)
			.finish()
	}
}

/// Decodes a successful JSON response, or turns a failure status into [`ApiError`].
pub(crate) fn decode_json<T>(response: &HttpResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	if !response.is_success() {
		return Err(api_error(response).into());
	}

	let mut deserializer = serde_json::Deserializer::from_slice(&response.body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| DecodeError::Json { source, status: response.status }.into())
}

/// Decodes a list endpoint; blank bodies and `null` are empty lists.
pub(crate) fn decode_list<T>(response: &HttpResponse) -> Result<Vec<T>>
where
	T: DeserializeOwned,
{
	if response.is_success() && response.is_blank() {
		return Ok(Vec::new());
	}

	Ok(decode_json::<Option<Vec<T>>>(response)?.unwrap_or_default())
}

/// Accepts any successful response, ignoring its body.
pub(crate) fn expect_success(response: &HttpResponse) -> Result<()> {
	if response.is_success() { Ok(()) } else { Err(api_error(response).into()) }
}

/// Builds the caller-facing error for a non-success response.
pub(crate) fn api_error(response: &HttpResponse) -> ApiError {
	ApiError {
		status: response.status,
		kind: ApiErrorKind::from_status(response.status),
		message: error_message(response),
		retry_after: response.retry_after,
	}
}

fn error_message(response: &HttpResponse) -> Option<String> {
	#[derive(Deserialize)]
	struct ErrorBody {
		message: Option<String>,
		error: Option<String>,
	}

	match serde_json::from_slice::<ErrorBody>(&response.body) {
		Ok(body) => body
			.message
			.or(body.error)
			.map(|message| message.trim().to_owned())
			.filter(|message| !message.is_empty()),
		Err(_) => response.body_preview(),
	}
}
