//! Friend relationships, friend-to-friend recommendations, and the local friend mirror.

// self
use crate::{
	_prelude::*,
	auth::{ContentId, EmailAddress, FriendRequestId, RecommendationId},
	model::{Content, lenient_string},
};

/// State of a friend relationship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FriendStatus {
	/// Sent and awaiting the accepter's answer.
	#[serde(rename = "PENDING", alias = "pending")]
	Pending,
	/// Both members are friends.
	#[serde(rename = "ACCEPTED", alias = "accepted")]
	Accepted,
}

/// Directed relationship record between two members.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequest {
	/// Relationship identifier used by accept/delete calls.
	pub id: FriendRequestId,
	/// Email of the member who sent the request.
	#[serde(default, deserialize_with = "lenient_string")]
	pub requester_email: String,
	/// Name of the member who sent the request.
	#[serde(default, deserialize_with = "lenient_string")]
	pub requester_name: String,
	/// Email of the member who received the request.
	#[serde(default, deserialize_with = "lenient_string")]
	pub accepter_email: String,
	/// Name of the member who received the request.
	#[serde(default, deserialize_with = "lenient_string")]
	pub accepter_name: String,
	/// Current state.
	pub status: FriendStatus,
}
impl FriendRequest {
	/// Returns the other side of the relationship as seen by the member with email `me`.
	pub fn counterpart(&self, me: &str) -> FriendContact<'_> {
		if self.requester_email.eq_ignore_ascii_case(me) {
			FriendContact { name: &self.accepter_name, email: &self.accepter_email }
		} else {
			FriendContact { name: &self.requester_name, email: &self.requester_email }
		}
	}

	/// Returns `true` once the request was accepted.
	pub fn is_accepted(&self) -> bool {
		self.status == FriendStatus::Accepted
	}
}

/// Name and email of a friend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FriendContact<'a> {
	/// Display name.
	pub name: &'a str,
	/// Account email.
	pub email: &'a str,
}

/// Local mirror of the member's friend list and incoming requests.
///
/// The backend owns every transition; the mirror is updated after the matching call
/// succeeded so views do not need to refetch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FriendBook {
	friends: Vec<FriendRequest>,
	pending: Vec<FriendRequest>,
}
impl FriendBook {
	/// Accepted relationships.
	pub fn friends(&self) -> &[FriendRequest] {
		&self.friends
	}

	/// Requests waiting for an answer.
	pub fn pending(&self) -> &[FriendRequest] {
		&self.pending
	}

	/// Replaces the friend list with a freshly fetched one.
	pub fn replace_friends(&mut self, friends: Vec<FriendRequest>) {
		self.friends = friends;
	}

	/// Replaces the pending list with a freshly fetched one.
	pub fn replace_pending(&mut self, pending: Vec<FriendRequest>) {
		self.pending = pending;
	}

	/// Moves request `id` from pending to friends.
	///
	/// Returns `false` when no pending request carries that identifier.
	pub fn apply_accepted(&mut self, id: FriendRequestId) -> bool {
		let Some(index) = self.pending.iter().position(|request| request.id == id) else {
			return false;
		};
		let mut request = self.pending.remove(index);

		request.status = FriendStatus::Accepted;

		if !self.friends.iter().any(|friend| friend.id == id) {
			self.friends.push(request);
		}

		true
	}

	/// Drops relationship `id` from both lists (reject or unfriend).
	///
	/// Returns `false` when neither list held it.
	pub fn apply_deleted(&mut self, id: FriendRequestId) -> bool {
		let before = self.friends.len() + self.pending.len();

		self.friends.retain(|request| request.id != id);
		self.pending.retain(|request| request.id != id);

		self.friends.len() + self.pending.len() != before
	}

	/// Finds an accepted friend by email.
	pub fn find_friend(&self, me: &str, email: &str) -> Option<&FriendRequest> {
		self.friends
			.iter()
			.find(|request| request.counterpart(me).email.eq_ignore_ascii_case(email))
	}
}

/// Content recommended to the member by a friend.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRecommendation {
	/// Recommendation identifier used by the delete call.
	#[serde(rename = "RecommendId", alias = "recommendId")]
	pub id: RecommendationId,
	/// Name of the recommending friend.
	#[serde(default, deserialize_with = "lenient_string")]
	pub sender_name: String,
	/// Email of the recommending friend.
	#[serde(default, deserialize_with = "lenient_string")]
	pub sender_email: String,
	/// Recommended content.
	pub content: Content,
	/// Free-text reason written by the friend.
	#[serde(default, deserialize_with = "lenient_string")]
	pub reason: String,
}

/// Recommendation about to be sent to a friend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationDraft {
	/// Email of the receiving friend.
	pub friend_email: EmailAddress,
	/// Recommended content.
	pub content_id: ContentId,
	/// Free-text reason.
	pub reason: String,
}
impl RecommendationDraft {
	/// Creates a draft with a trimmed reason.
	pub fn new(friend_email: EmailAddress, content_id: ContentId, reason: impl AsRef<str>) -> Self {
		Self { friend_email, content_id, reason: reason.as_ref().trim().to_owned() }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::model::content::tests::content_json;

	fn request(id: u64, status: &str) -> FriendRequest {
		serde_json::from_value(serde_json::json!({
			"id": id,
			"requesterEmail": format!("friend{id}@example.com"),
			"requesterName": format!("Friend {id}"),
			"accepterEmail": "me@example.com",
			"accepterName": "Me",
			"status": status,
		}))
		.expect("Friend request fixture should decode.")
	}

	#[test]
	fn counterpart_picks_other_side() {
		let accepted = request(1, "ACCEPTED");

		assert_eq!(accepted.counterpart("me@example.com").name, "Friend 1");
		assert_eq!(accepted.counterpart("friend1@example.com").email, "me@example.com");
		assert!(accepted.is_accepted());
		assert_eq!(request(2, "pending").status, FriendStatus::Pending);
	}

	#[test]
	fn book_mirrors_accept_and_delete() {
		let mut book = FriendBook::default();

		book.replace_friends(vec![request(1, "ACCEPTED")]);
		book.replace_pending(vec![request(2, "PENDING"), request(3, "PENDING")]);

		assert!(book.apply_accepted(FriendRequestId(2)));
		assert!(!book.apply_accepted(FriendRequestId(2)));
		assert_eq!(book.friends().len(), 2);
		assert!(book.friends()[1].is_accepted());
		assert_eq!(book.pending().len(), 1);
		assert!(book.find_friend("me@example.com", "FRIEND2@example.com").is_some());
		assert!(book.apply_deleted(FriendRequestId(3)));
		assert!(book.apply_deleted(FriendRequestId(1)));
		assert!(!book.apply_deleted(FriendRequestId(9)));
		assert!(book.pending().is_empty());
		assert_eq!(book.friends().len(), 1);
	}

	#[test]
	fn recommendation_wire_format() {
		let received: FriendRecommendation = serde_json::from_value(serde_json::json!({
			"RecommendId": 5,
			"senderName": "Friend 1",
			"senderEmail": "friend1@example.com",
			"content": content_json(9, "Okja"),
			"reason": "You liked Mother",
		}))
		.expect("Recommendation should decode.");

		assert_eq!(received.id, RecommendationId(5));
		assert_eq!(received.content.title, "Okja");

		let draft = RecommendationDraft::new(
			EmailAddress::new("friend1@example.com").expect("Email fixture should be valid."),
			ContentId(9),
			"  Watch it  ",
		);

		assert_eq!(
			serde_json::to_value(&draft).expect("Draft should serialize."),
			serde_json::json!({
				"friendEmail": "friend1@example.com",
				"contentId": 9,
				"reason": "Watch it",
			})
		);
	}
}
