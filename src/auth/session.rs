//! Session credential pair and the token payload exchanged with the backend.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Storage key holding the access token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Storage key holding the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Access/refresh token pair identifying a logged-in member.
///
/// The backend exposes no expiry metadata; the pair stays valid until the backend
/// answers with the expired or invalid session status.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
	/// Short-lived bearer credential for API calls.
	pub access_token: TokenSecret,
	/// Longer-lived credential used to mint a new access token.
	pub refresh_token: TokenSecret,
}
impl Session {
	/// Creates a session from raw token strings.
	pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
		Self {
			access_token: TokenSecret::new(access_token),
			refresh_token: TokenSecret::new(refresh_token),
		}
	}
}
impl Debug for Session {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Session")
			.field("access_token", &self.access_token.masked())
			.field("refresh_token", &self.refresh_token.masked())
			.finish()
	}
}

/// Body of the refresh call.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshRequest<'a> {
	pub(crate) refresh_token: &'a str,
}

/// Credentials accepted by the development login endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginData {
	/// Display name of the member.
	pub name: String,
	/// Account email of the member.
	pub email: String,
}
impl LoginData {
	/// Creates login data for the provided name and email.
	pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
		Self { name: name.into(), email: email.into() }
	}
}
