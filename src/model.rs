//! Entity records for the board.
//!
//! Field names serialize in camelCase so the persisted JSON layout matches
//! what the rendering layer and any pre-existing stored data expect
//! (`joinDate`, `authorId`, `isSample`).

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A registered account.
///
/// Created by signup and immutable afterwards. The password is stored
/// verbatim; this system has no security scope and makes no hashing claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Millisecond timestamp at creation, unique within the user list.
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    /// ISO `YYYY-MM-DD` date of signup.
    pub join_date: String,
}

/// Topic a question is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Science,
    History,
    Technology,
    General,
    Philosophy,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Science => "science",
            Self::History => "history",
            Self::Technology => "technology",
            Self::General => "general",
            Self::Philosophy => "philosophy",
        }
    }

    /// Parse a category token. Matching is exact, so `"Science"` is not a
    /// category even though `"science"` is.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "science" => Some(Self::Science),
            "history" => Some(Self::History),
            "technology" => Some(Self::Technology),
            "general" => Some(Self::General),
            "philosophy" => Some(Self::Philosophy),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owner reference on a question: a real user id, or the string sentinel
/// carried by seed data (`"sample1"` and friends).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorId {
    User(i64),
    Sample(String),
}

/// A posted (or seeded) question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Millisecond timestamp at creation, unique within the question list.
    pub id: i64,
    pub title: String,
    pub details: String,
    pub category: Category,
    /// Display-name snapshot of the author at posting time.
    pub author: String,
    pub author_id: AuthorId,
    pub likes: u32,
    /// Display-only; no operation in this crate increments it.
    pub comments: u32,
    /// ISO `YYYY-MM-DD` date of posting.
    pub date: String,
    pub is_sample: bool,
}

/// Millisecond clock used for record ids, the analog of `Date.now()`.
pub(crate) fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Today's date as `YYYY-MM-DD` (UTC).
pub(crate) fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_serializes_camel_case() {
        let question = Question {
            id: 1700000000000,
            title: "What if tests wrote themselves overnight?".to_string(),
            details: "No additional details provided.".to_string(),
            category: Category::Technology,
            author: "Ada Lovelace".to_string(),
            author_id: AuthorId::User(1700000000001),
            likes: 0,
            comments: 0,
            date: "2023-10-20".to_string(),
            is_sample: false,
        };

        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(value["authorId"], 1700000000001i64);
        assert_eq!(value["isSample"], false);
        assert_eq!(value["category"], "technology");
        assert!(value.get("author_id").is_none());
    }

    #[test]
    fn test_user_join_date_field_name() {
        let user = User {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@x.com".to_string(),
            password: "secret1".to_string(),
            join_date: "2023-10-20".to_string(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["joinDate"], "2023-10-20");
    }

    #[test]
    fn test_author_id_untagged_round_trip() {
        let seeded: AuthorId = serde_json::from_str("\"sample3\"").unwrap();
        assert_eq!(seeded, AuthorId::Sample("sample3".to_string()));

        let registered: AuthorId = serde_json::from_str("1700000000000").unwrap();
        assert_eq!(registered, AuthorId::User(1700000000000));
    }

    #[test]
    fn test_category_parse_is_case_sensitive() {
        assert_eq!(Category::parse("science"), Some(Category::Science));
        assert_eq!(Category::parse("Science"), None);
        assert_eq!(Category::parse("sports"), None);
    }
}
