//! Watch history records and their per-day grouping.

// crates.io
use serde::Deserializer;
use time::{format_description::well_known::Rfc3339, macros::format_description};
// self
use crate::{_prelude::*, model::Content};

/// One entry of the member's watch history.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct WatchRecord {
	/// Moment the content was recorded as watched, in backend local time.
	#[serde(rename = "watchedDateTime", deserialize_with = "local_date_time")]
	pub watched_at: PrimitiveDateTime,
	/// Watched content.
	pub content: Content,
}
impl WatchRecord {
	/// Calendar day of [`WatchRecord::watched_at`].
	pub fn watched_on(&self) -> Date {
		self.watched_at.date()
	}
}

/// Groups records by watch day, keeping the order in which each day first appears.
///
/// Records inside a group keep their input order.
pub fn group_watch_history_by_date(records: &[WatchRecord]) -> Vec<(Date, Vec<&Content>)> {
	let mut groups = Vec::<(Date, Vec<&Content>)>::new();
	let mut positions = HashMap::<Date, usize>::new();

	for record in records {
		let day = record.watched_on();
		let index = *positions.entry(day).or_insert_with(|| {
			groups.push((day, Vec::new()));

			groups.len() - 1
		});

		groups[index].1.push(&record.content);
	}

	groups
}

fn local_date_time<'de, D>(deserializer: D) -> Result<PrimitiveDateTime, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;
	let raw = raw.trim();
	let local = format_description!(
		"[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
	);

	if let Ok(value) = PrimitiveDateTime::parse(raw, local) {
		return Ok(value);
	}

	OffsetDateTime::parse(raw, &Rfc3339)
		.map(|moment| PrimitiveDateTime::new(moment.date(), moment.time()))
		.map_err(|e| serde::de::Error::custom(format!("invalid watch timestamp {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::{date, datetime};
	// self
	use super::*;
	use crate::model::content::tests::content_json;

	fn record(at: &str, id: u64) -> WatchRecord {
		serde_json::from_value(serde_json::json!({
			"watchedDateTime": at,
			"content": content_json(id, &format!("Title {id}")),
		}))
		.expect("Watch record fixture should decode.")
	}

	#[test]
	fn timestamps_accept_fraction_and_offset() {
		assert_eq!(record("2024-11-20T13:45:12.123456", 1).watched_at.date(), date!(2024 - 11 - 20));
		assert_eq!(
			record("2024-11-20T13:45:12", 1).watched_at,
			datetime!(2024 - 11 - 20 13:45:12)
		);
		assert_eq!(
			record("2024-11-21T01:00:00+09:00", 1).watched_at,
			datetime!(2024 - 11 - 21 01:00:00)
		);

		let err = serde_json::from_value::<WatchRecord>(serde_json::json!({
			"watchedDateTime": "yesterday",
			"content": content_json(1, "x"),
		}))
		.expect_err("Free text timestamps should fail.");

		assert!(err.to_string().contains("invalid watch timestamp"));
	}

	#[test]
	fn grouping_keeps_first_appearance_order() {
		let records = vec![
			record("2024-11-21T09:00:00", 1),
			record("2024-11-20T23:00:00", 2),
			record("2024-11-21T08:00:00", 3),
		];
		let groups = group_watch_history_by_date(&records);

		assert_eq!(groups.len(), 2);
		assert_eq!(groups[0].0, date!(2024 - 11 - 21));
		assert_eq!(groups[0].1.iter().map(|c| c.id.get()).collect::<Vec<_>>(), vec![1, 3]);
		assert_eq!(groups[1].0, date!(2024 - 11 - 20));
		assert_eq!(groups[1].1[0].id.get(), 2);
		assert!(group_watch_history_by_date(&[]).is_empty());
	}
}
