//! Backend records decoded by the client, plus the small local helpers built on them.

pub mod content;
pub mod friend;
pub mod member;
pub mod watch;

pub use content::*;
pub use friend::*;
pub use member::*;
pub use watch::*;

// crates.io
use serde::Deserializer;
// self
use crate::_prelude::*;

/// Accepts a string, a number, or `null` for free-text catalog fields.
///
/// The catalog is imported from a public dataset where blank cells arrive as `null`
/// and years sometimes arrive as numbers.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Raw {
		Text(String),
		Number(serde_json::Number),
		Flag(bool),
	}

	Ok(match Option::<Raw>::deserialize(deserializer)? {
		Some(Raw::Text(text)) => text,
		Some(Raw::Number(number)) => number.to_string(),
		Some(Raw::Flag(flag)) => flag.to_string(),
		None => String::new(),
	})
}

/// Decodes `null` as an empty list.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de>,
{
	Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
