//! Current member profile.

// self
use crate::{_prelude::*, auth::EmailAddress};

/// Profile of the logged-in member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
	/// Display name.
	pub name: String,
	/// Account email, when the backend includes it.
	#[serde(default)]
	pub email: Option<EmailAddress>,
}
