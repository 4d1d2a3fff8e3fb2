//! Secure token secret wrapper that redacts sensitive material.

// self
use crate::_prelude::*;

/// Redacted token secret wrapper keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret(String);
impl TokenSecret {
	const MASK: &'static str = "********";
	const MASK_EDGE: usize = 4;

	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns a display-safe preview keeping only the first and last four characters.
	///
	/// Secrets of eight characters or fewer are fully masked.
	pub fn masked(&self) -> String {
		let count = self.0.chars().count();

		if count <= Self::MASK_EDGE * 2 {
			return Self::MASK.into();
		}

		let head = self.0.chars().take(Self::MASK_EDGE).collect::<String>();
		let tail = self.0.chars().skip(count - Self::MASK_EDGE).collect::<String>();

		format!("{head}...{tail}")
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = TokenSecret::new("super-secret");

		assert_eq!(format!("{secret:?}"), "TokenSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
	}

	#[test]
	fn masked_keeps_edges_of_long_secrets() {
		assert_eq!(TokenSecret::new("abcdefghijkl").masked(), "abcd...ijkl");
		assert_eq!(TokenSecret::new("abcdefgh").masked(), "********");
		assert_eq!(TokenSecret::new("").masked(), "********");
		assert_eq!(TokenSecret::new("토큰토큰토큰토큰토큰").masked(), "토큰토큰...토큰토큰");
	}
}
