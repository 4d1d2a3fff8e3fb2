//! Login entry points and logout.
//!
//! These calls carry no bearer token and bypass the refresh handling.

// self
use crate::{
	_prelude::*,
	api::observed,
	auth::{LoginData, Session},
	client::{ApiClient, decode_json},
	http::{ApiHttpClient, HttpRequest},
	obs::{self, CallKind, SessionEvent},
};

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Returns the backend URL that starts the OAuth login (`{base}/api/auth/oauth/{provider}`).
	///
	/// The caller opens it in a browser; the provider redirects back with a `code`
	/// query parameter for [`ApiClient::complete_authorization`].
	pub fn authorization_url(&self) -> Result<Url> {
		Ok(self.config.endpoint(["api", "auth", "oauth", self.config.oauth_provider.as_str()])?)
	}

	/// Exchanges the OAuth authorization `code` for a session and stores it.
	pub async fn complete_authorization(&self, code: &str) -> Result<Session> {
		observed(CallKind::Login, "complete_authorization", async {
			let code = code.trim();

			if code.is_empty() {
				return Err(Error::InvalidInput {
					reason: "authorization code cannot be empty".into(),
				});
			}

			let mut url = self.config.endpoint([
				"api",
				"auth",
				"oauth",
				self.config.oauth_provider.as_str(),
				"callback",
			])?;

			url.query_pairs_mut().append_pair("code", code);

			let response = self.send_plain(HttpRequest::get(url)).await?;

			self.start_session(decode_json(&response)?)
		})
		.await
	}

	/// Extracts the `code` query parameter from the provider redirect and completes the
	/// login.
	pub async fn complete_authorization_from_redirect(&self, redirect: &Url) -> Result<Session> {
		let mut code = None;

		for (key, value) in redirect.query_pairs() {
			match key.as_ref() {
				"code" => code = Some(value.into_owned()),
				"error" =>
					return Err(Error::InvalidInput {
						reason: format!("authorization was denied: {value}"),
					}),
				_ => {},
			}
		}

		let code = code.ok_or_else(|| Error::InvalidInput {
			reason: "redirect URL carries no authorization code".into(),
		})?;

		self.complete_authorization(&code).await
	}

	/// Logs in through the development endpoint (`POST api/temp/login`) and stores the
	/// session.
	pub async fn dev_login(&self, login: &LoginData) -> Result<Session> {
		observed(CallKind::Login, "dev_login", async {
			let url = self.config.endpoint(["api", "temp", "login"])?;
			let response = self.send_plain(HttpRequest::post(url).with_body(login)?).await?;

			self.start_session(decode_json(&response)?)
		})
		.await
	}

	/// Clears both stored tokens.
	///
	/// The navigator is left alone; the caller decides where to go next.
	pub fn logout(&self) -> Result<()> {
		self.store.clear()?;
		obs::log_session_event(SessionEvent::LoggedOut);
		obs::record_session_event(SessionEvent::LoggedOut);

		Ok(())
	}

	/// Returns `true` when both tokens are stored.
	pub fn is_logged_in(&self) -> Result<bool> {
		Ok(self.store.session()?.is_some())
	}

	fn start_session(&self, session: Session) -> Result<Session> {
		self.store.save(&session)?;
		obs::log_session_event(SessionEvent::LoggedIn);
		obs::record_session_event(SessionEvent::LoggedIn);

		Ok(session)
	}
}
