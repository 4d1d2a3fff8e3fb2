//! Catalog content records and the recommendation board.

// self
use crate::{
	_prelude::*,
	auth::ContentId,
	model::{lenient_string, null_as_empty},
};

/// Read-only catalog record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
	/// Backend identifier used by like/watch/recommend calls.
	pub id: ContentId,
	/// Identifier of the title in the source catalog.
	#[serde(default, deserialize_with = "lenient_string")]
	pub show_id: String,
	/// Content type (`Movie`, `TV Show`).
	#[serde(rename = "type", default, deserialize_with = "lenient_string")]
	pub kind: String,
	/// Title.
	#[serde(default, deserialize_with = "lenient_string")]
	pub title: String,
	/// Director(s), comma separated.
	#[serde(default, deserialize_with = "lenient_string")]
	pub director: String,
	/// Cast, comma separated.
	#[serde(default, deserialize_with = "lenient_string")]
	pub cast: String,
	/// Production country.
	#[serde(default, deserialize_with = "lenient_string")]
	pub country: String,
	/// Date the title was added to the catalog, as sent by the backend.
	#[serde(default, deserialize_with = "lenient_string")]
	pub date_added: String,
	/// Release year.
	#[serde(default, deserialize_with = "lenient_string")]
	pub release_year: String,
	/// Audience rating.
	#[serde(default, deserialize_with = "lenient_string")]
	pub rating: String,
	/// Running time or season count.
	#[serde(default, deserialize_with = "lenient_string")]
	pub duration: String,
	/// Genres, comma separated.
	#[serde(default, deserialize_with = "lenient_string")]
	pub listed_in: String,
	/// Synopsis.
	#[serde(default, deserialize_with = "lenient_string")]
	pub description: String,
	/// Poster image URL.
	#[serde(default)]
	pub poster_path: Option<String>,
}
impl Content {
	/// Genres parsed from [`Content::listed_in`].
	pub fn genres(&self) -> Vec<&str> {
		split_list(&self.listed_in)
	}

	/// Cast members parsed from [`Content::cast`].
	pub fn cast_members(&self) -> Vec<&str> {
		split_list(&self.cast)
	}

	/// Poster URL, ignoring blank values.
	pub fn poster(&self) -> Option<&str> {
		self.poster_path.as_deref().map(str::trim).filter(|p| !p.is_empty())
	}
}

fn split_list(raw: &str) -> Vec<&str> {
	raw.split(',').map(str::trim).filter(|s| !s.is_empty()).collect()
}

/// Wire wrapper: list endpoints return `[{ "content": { ... } }, ...]`.
#[derive(Deserialize)]
pub(crate) struct ContentEnvelope {
	pub(crate) content: Content,
}

pub(crate) fn unwrap_envelopes(items: Vec<ContentEnvelope>) -> Vec<Content> {
	items.into_iter().map(|item| item.content).collect()
}

/// Categories of the personalized recommendation board, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecommendationCategory {
	/// Titles sharing cast with liked titles.
	SimilarCastFromLikes,
	/// Titles sharing genres with liked titles.
	SimilarGenreFromLikes,
	/// Titles by directors of liked titles.
	SameDirectorFromLikes,
	/// Titles sharing cast with watched titles.
	SimilarCastFromWatchHistory,
	/// Titles sharing genres with watched titles.
	SimilarGenreFromWatchHistory,
	/// Titles by directors of watched titles.
	SameDirectorFromWatchHistory,
}
impl RecommendationCategory {
	/// Every category in display order.
	pub const ALL: [Self; 6] = [
		Self::SimilarCastFromLikes,
		Self::SimilarGenreFromLikes,
		Self::SameDirectorFromLikes,
		Self::SimilarCastFromWatchHistory,
		Self::SimilarGenreFromWatchHistory,
		Self::SameDirectorFromWatchHistory,
	];

	/// Key used by the backend response.
	pub const fn key(self) -> &'static str {
		match self {
			Self::SimilarCastFromLikes => "similarCastFromLikes",
			Self::SimilarGenreFromLikes => "similarGenreFromLikes",
			Self::SameDirectorFromLikes => "sameDirectorFromLikes",
			Self::SimilarCastFromWatchHistory => "similarCastFromWatchHistory",
			Self::SimilarGenreFromWatchHistory => "similarGenreFromWatchHistory",
			Self::SameDirectorFromWatchHistory => "sameDirectorFromWatchHistory",
		}
	}

	/// Human-readable heading.
	pub const fn label(self) -> &'static str {
		match self {
			Self::SimilarCastFromLikes => "Similar cast to titles you liked",
			Self::SimilarGenreFromLikes => "Similar genres to titles you liked",
			Self::SameDirectorFromLikes => "Same director as titles you liked",
			Self::SimilarCastFromWatchHistory => "Similar cast to titles you watched",
			Self::SimilarGenreFromWatchHistory => "Similar genres to titles you watched",
			Self::SameDirectorFromWatchHistory => "Same director as titles you watched",
		}
	}
}
impl Display for RecommendationCategory {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.label())
	}
}

/// Personalized recommendations grouped by category.
///
/// Categories missing from the response decode as empty lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecommendationBoard {
	entries: BTreeMap<RecommendationCategory, Vec<Content>>,
}
impl RecommendationBoard {
	/// Contents recommended for `category`.
	pub fn get(&self, category: RecommendationCategory) -> &[Content] {
		self.entries.get(&category).map(Vec::as_slice).unwrap_or_default()
	}

	/// Every category in display order with its contents.
	pub fn categories(&self) -> impl Iterator<Item = (RecommendationCategory, &[Content])> {
		RecommendationCategory::ALL.into_iter().map(|category| (category, self.get(category)))
	}

	/// Returns `true` when no category holds any content.
	pub fn is_empty(&self) -> bool {
		self.entries.values().all(Vec::is_empty)
	}
}
impl<'de> Deserialize<'de> for RecommendationBoard {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		#[derive(Deserialize)]
		#[serde(rename_all = "camelCase")]
		struct Wire {
			#[serde(default, deserialize_with = "null_as_empty")]
			similar_cast_from_likes: Vec<ContentEnvelope>,
			#[serde(default, deserialize_with = "null_as_empty")]
			similar_genre_from_likes: Vec<ContentEnvelope>,
			#[serde(default, deserialize_with = "null_as_empty")]
			same_director_from_likes: Vec<ContentEnvelope>,
			#[serde(default, deserialize_with = "null_as_empty")]
			similar_cast_from_watch_history: Vec<ContentEnvelope>,
			#[serde(default, deserialize_with = "null_as_empty")]
			similar_genre_from_watch_history: Vec<ContentEnvelope>,
			#[serde(default, deserialize_with = "null_as_empty")]
			same_director_from_watch_history: Vec<ContentEnvelope>,
		}

		let wire = Wire::deserialize(deserializer)?;
		let entries = BTreeMap::from([
			(RecommendationCategory::SimilarCastFromLikes, wire.similar_cast_from_likes),
			(RecommendationCategory::SimilarGenreFromLikes, wire.similar_genre_from_likes),
			(RecommendationCategory::SameDirectorFromLikes, wire.same_director_from_likes),
			(
				RecommendationCategory::SimilarCastFromWatchHistory,
				wire.similar_cast_from_watch_history,
			),
			(
				RecommendationCategory::SimilarGenreFromWatchHistory,
				wire.similar_genre_from_watch_history,
			),
			(
				RecommendationCategory::SameDirectorFromWatchHistory,
				wire.same_director_from_watch_history,
			),
		])
		.into_iter()
		.map(|(category, items)| (category, unwrap_envelopes(items)))
		.collect();

		Ok(Self { entries })
	}
}

/// Catalog fields the backend search endpoint accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
	/// Match on title.
	#[default]
	Title,
	/// Match on director.
	Director,
	/// Match on cast.
	Cast,
	/// Match on genre.
	Genre,
}
impl SearchField {
	/// Path segment used by the search endpoint.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Title => "title",
			Self::Director => "director",
			Self::Cast => "cast",
			Self::Genre => "genre",
		}
	}
}
impl Display for SearchField {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Like or dislike annotation on a content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Preference {
	/// Thumbs up.
	Like,
	/// Thumbs down.
	Dislike,
}
impl Preference {
	/// Path segment (`true`/`false`) used by the like endpoints.
	pub const fn as_path(self) -> &'static str {
		match self {
			Self::Like => "true",
			Self::Dislike => "false",
		}
	}
}
impl From<bool> for Preference {
	fn from(liked: bool) -> Self {
		if liked { Self::Like } else { Self::Dislike }
	}
}

#[cfg(test)]
pub(crate) mod tests {
	// self
	use super::*;

	pub(crate) fn content_json(id: u64, title: &str) -> serde_json::Value {
		serde_json::json!({
			"id": id,
			"showId": format!("s{id}"),
			"type": "Movie",
			"title": title,
			"director": "Bong Joon Ho",
			"cast": "Song Kang-ho, Lee Sun-kyun , ",
			"country": "South Korea",
			"dateAdded": "June 23, 2020",
			"releaseYear": 2019,
			"rating": "R",
			"duration": "132 min",
			"listedIn": "Dramas, International Movies, Thrillers",
			"description": "Greed and class discrimination threaten a newly formed symbiotic relationship.",
			"posterPath": "https://image.example.com/parasite.jpg"
		})
	}

	#[test]
	fn content_decodes_lenient_fields() {
		let mut raw = content_json(7, "Parasite");

		raw["director"] = serde_json::Value::Null;
		raw.as_object_mut().expect("Fixture should be an object.").remove("posterPath");

		let content: Content = serde_json::from_value(raw).expect("Content should decode.");

		assert_eq!(content.id, ContentId(7));
		assert_eq!(content.kind, "Movie");
		assert_eq!(content.release_year, "2019");
		assert_eq!(content.director, "");
		assert_eq!(content.poster(), None);
		assert_eq!(content.genres(), vec!["Dramas", "International Movies", "Thrillers"]);
		assert_eq!(content.cast_members(), vec!["Song Kang-ho", "Lee Sun-kyun"]);
	}

	#[test]
	fn board_fills_missing_categories() {
		let raw = serde_json::json!({
			"similarCastFromLikes": [{ "content": content_json(1, "Mother") }],
			"sameDirectorFromWatchHistory": null,
		});
		let board: RecommendationBoard = serde_json::from_value(raw).expect("Board should decode.");
		let categories = board.categories().collect::<Vec<_>>();

		assert_eq!(categories.len(), 6);
		assert_eq!(categories[0].0, RecommendationCategory::SimilarCastFromLikes);
		assert_eq!(categories[0].1[0].title, "Mother");
		assert!(board.get(RecommendationCategory::SameDirectorFromWatchHistory).is_empty());
		assert!(!board.is_empty());
		assert!(RecommendationBoard::default().is_empty());
	}

	#[test]
	fn category_keys_match_backend() {
		let keys = RecommendationCategory::ALL.map(RecommendationCategory::key);

		assert_eq!(keys[3], "similarCastFromWatchHistory");
		assert_eq!(Preference::from(false).as_path(), "false");
		assert_eq!(SearchField::default().as_str(), "title");
	}
}
