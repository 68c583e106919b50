//! The domain store: users, questions, likes, and the current session.
//!
//! A [`Board`] owns the in-memory state and the storage handle it was
//! hydrated from. Every mutation re-persists the collections it touched
//! before returning, so a reload sees exactly what the last operation left
//! behind. There are no globals; embedders create as many independent boards
//! as they have storage instances.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{AuthError, Field, LikeError, PostError, ValidationError};
use crate::model::{now_millis, today, AuthorId, Category, Question, User};
use crate::query::{self, Filter};
use crate::seed;
use crate::storage::Storage;
use crate::validate;

/// Persisted key names, kept byte-for-byte stable across read and write.
pub const USERS_KEY: &str = "whatif_users";
pub const QUESTIONS_KEY: &str = "whatif_questions";
pub const CURRENT_USER_KEY: &str = "whatif_currentUser";
pub const LIKED_KEY: &str = "whatif_likedQuestions";
pub const VISITED_KEY: &str = "whatif_visited";

/// Stored in place of empty question details.
pub const DETAILS_PLACEHOLDER: &str = "No additional details provided.";

/// The community board: domain state plus the storage it persists to.
pub struct Board<S: Storage> {
    storage: S,
    users: Vec<User>,
    questions: Vec<Question>,
    current_user: Option<User>,
    liked: HashSet<i64>,
}

impl<S: Storage> Board<S> {
    /// Hydrate a board from storage. Absent or malformed collections fall
    /// back to defaults: empty users and liked set, no session, and the
    /// sample question set.
    pub fn open(storage: S) -> Self {
        let users: Vec<User> = storage.get_record(USERS_KEY).unwrap_or_default();
        let questions: Vec<Question> = storage
            .get_record(QUESTIONS_KEY)
            .unwrap_or_else(|| seed::sample_questions(now_millis()));
        let current_user: Option<User> = storage.get_record(CURRENT_USER_KEY);
        let liked: Vec<i64> = storage.get_record(LIKED_KEY).unwrap_or_default();

        debug!(
            users = users.len(),
            questions = questions.len(),
            logged_in = current_user.is_some(),
            "board hydrated"
        );

        Self {
            storage,
            users,
            questions,
            current_user,
            liked: liked.into_iter().collect(),
        }
    }

    /// Give the storage handle back, e.g. to reopen the board later.
    pub fn into_storage(self) -> S {
        self.storage
    }

    // ------------------------------------------------------------------
    // Session gate
    // ------------------------------------------------------------------

    /// The logged-in user, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    /// Sign up a new account and log it in.
    ///
    /// Collects every failing field so the form can mark them all at once.
    /// The duplicate-email check is exact and case-sensitive, and only runs
    /// once the field checks pass.
    pub fn register_user(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<User, Vec<ValidationError>> {
        let name = name.trim();
        let email = email.trim();

        let mut errors = Vec::new();
        errors.extend(validate::name(name));
        errors.extend(validate::email(email));
        errors.extend(validate::password(password));
        errors.extend(validate::confirm_password(password, confirm_password));
        if !errors.is_empty() {
            return Err(errors);
        }

        if self.users.iter().any(|u| u.email == email) {
            return Err(vec![ValidationError::new(
                Field::Email,
                "An account with this email already exists",
            )]);
        }

        let user = User {
            id: now_millis(),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            join_date: today(),
        };

        self.users.push(user.clone());
        persist(&mut self.storage, USERS_KEY, &self.users);
        self.set_session(user.clone());

        debug!(user_id = user.id, "user registered");
        Ok(user)
    }

    /// Log in with an email/password pair.
    ///
    /// Field syntax problems surface as `AuthError::Invalid`; a non-matching
    /// pair is the single generic `InvalidCredentials`, with no hint whether
    /// the email or the password was wrong.
    pub fn authenticate(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = email.trim();

        let mut errors = Vec::new();
        errors.extend(validate::email(email));
        errors.extend(validate::password(password));
        if !errors.is_empty() {
            return Err(AuthError::Invalid(errors));
        }

        let user = self
            .users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .cloned()
            .ok_or(AuthError::InvalidCredentials)?;

        self.set_session(user.clone());
        debug!(user_id = user.id, "user logged in");
        Ok(user)
    }

    /// Clear the session. Always succeeds, logged in or not.
    pub fn logout(&mut self) {
        self.current_user = None;
        self.storage.remove(CURRENT_USER_KEY);
        debug!("session cleared");
    }

    fn set_session(&mut self, user: User) {
        persist(&mut self.storage, CURRENT_USER_KEY, &user);
        self.current_user = Some(user);
    }

    // ------------------------------------------------------------------
    // Questions
    // ------------------------------------------------------------------

    /// All questions in stored order, newest-posted first.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Post a new question as the logged-in user. The question is prepended
    /// so the newest post renders first.
    pub fn post_question(
        &mut self,
        title: &str,
        details: &str,
        category: Category,
    ) -> Result<Question, PostError> {
        let author = self
            .current_user
            .as_ref()
            .ok_or(PostError::NotAuthenticated)?;

        let title = title.trim();
        if let Some(err) = validate::title(title) {
            return Err(PostError::Invalid(err));
        }

        let details = details.trim();
        let details = if details.is_empty() {
            DETAILS_PLACEHOLDER.to_string()
        } else {
            details.to_string()
        };

        let question = Question {
            id: now_millis(),
            title: title.to_string(),
            details,
            category,
            author: author.name.clone(),
            author_id: AuthorId::User(author.id),
            likes: 0,
            comments: 0,
            date: today(),
            is_sample: false,
        };

        self.questions.insert(0, question.clone());
        persist(&mut self.storage, QUESTIONS_KEY, &self.questions);

        debug!(question_id = question.id, "question posted");
        Ok(question)
    }

    // ------------------------------------------------------------------
    // Likes
    // ------------------------------------------------------------------

    /// Whether this storage instance has marked `question_id` liked.
    ///
    /// The liked set is scoped to the storage instance, not the logged-in
    /// user; a different account on the same instance sees the same likes.
    pub fn is_liked(&self, question_id: i64) -> bool {
        self.liked.contains(&question_id)
    }

    /// Drive a question's like state to `liked`.
    ///
    /// Idempotent per target state: asking for the state it is already in is
    /// a successful no-op. Otherwise the like count moves by one and the
    /// liked set toggles, and both collections persist.
    pub fn set_like(&mut self, question_id: i64, liked: bool) -> Result<Question, LikeError> {
        if self.current_user.is_none() {
            return Err(LikeError::NotAuthenticated);
        }

        let index = self
            .questions
            .iter()
            .position(|q| q.id == question_id)
            .ok_or(LikeError::NotFound(question_id))?;

        if liked == self.liked.contains(&question_id) {
            return Ok(self.questions[index].clone());
        }

        if liked {
            self.questions[index].likes += 1;
            self.liked.insert(question_id);
        } else {
            self.questions[index].likes = self.questions[index].likes.saturating_sub(1);
            self.liked.remove(&question_id);
        }

        persist(&mut self.storage, QUESTIONS_KEY, &self.questions);
        let mut liked_ids: Vec<i64> = self.liked.iter().copied().collect();
        liked_ids.sort_unstable();
        persist(&mut self.storage, LIKED_KEY, &liked_ids);

        debug!(question_id, liked, "like state changed");
        Ok(self.questions[index].clone())
    }

    /// Flip a question's like state, the single like-button gesture.
    pub fn toggle_like(&mut self, question_id: i64) -> Result<Question, LikeError> {
        let target = !self.is_liked(question_id);
        self.set_like(question_id, target)
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    /// Derive a view of the questions without mutating the store.
    pub fn list_questions(&self, filter: Filter) -> Vec<&Question> {
        query::list(&self.questions, filter)
    }

    /// Case-insensitive substring search across title, details, category,
    /// and author. An empty term (after trimming) lists everything; no match
    /// yields an empty view, never an error.
    pub fn search(&self, term: &str) -> Vec<&Question> {
        query::search(&self.questions, term)
    }

    // ------------------------------------------------------------------
    // Misc
    // ------------------------------------------------------------------

    /// True exactly once per storage instance; used to gate the one-time
    /// welcome notification. Marks the instance visited as a side effect.
    pub fn first_visit(&mut self) -> bool {
        if self.storage.get(VISITED_KEY).is_some() {
            return false;
        }
        persist(&mut self.storage, VISITED_KEY, &true);
        true
    }
}

/// Best-effort persistence. In-memory state stays authoritative for the
/// session when the adapter cannot write.
fn persist<S: Storage, T: serde::Serialize>(storage: &mut S, key: &str, record: &T) {
    if let Err(err) = storage.set_record(key, record) {
        warn!(key, error = %err, "failed to persist record");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn fresh_board() -> Board<MemoryStorage> {
        Board::open(MemoryStorage::new())
    }

    fn logged_in_board() -> Board<MemoryStorage> {
        let mut board = fresh_board();
        board
            .register_user("Ada Lovelace", "ada@x.com", "secret1", "secret1")
            .unwrap();
        board
    }

    #[test]
    fn test_fresh_board_gets_seed_questions() {
        let board = fresh_board();
        assert_eq!(board.questions().len(), 5);
        assert!(board.questions().iter().all(|q| q.is_sample));
        assert!(!board.is_authenticated());
    }

    #[test]
    fn test_register_then_authenticate_returns_same_id() {
        // Scenario B.
        let mut board = fresh_board();
        let registered = board
            .register_user("Ada Lovelace", "ada@x.com", "secret1", "secret1")
            .unwrap();
        assert_eq!(registered.email, "ada@x.com");
        assert!(board.is_authenticated());

        board.logout();
        assert!(!board.is_authenticated());

        let logged_in = board.authenticate("ada@x.com", "secret1").unwrap();
        assert_eq!(logged_in.id, registered.id);
        assert_eq!(board.current_user().unwrap().id, registered.id);
    }

    #[test]
    fn test_register_collects_every_failing_field() {
        let mut board = fresh_board();
        let errors = board
            .register_user("A", "not-an-email", "123", "456")
            .unwrap_err();
        let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                Field::Name,
                Field::Email,
                Field::Password,
                Field::ConfirmPassword
            ]
        );
        assert!(!board.is_authenticated());
    }

    #[test]
    fn test_register_rejects_duplicate_email_exactly() {
        let mut board = logged_in_board();

        let errors = board
            .register_user("Ada Again", "ada@x.com", "secret2", "secret2")
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, Field::Email);

        // Case differs, so this is a different address.
        assert!(board
            .register_user("Ada Caps", "ADA@x.com", "secret2", "secret2")
            .is_ok());
    }

    #[test]
    fn test_register_trims_name_and_email() {
        let mut board = fresh_board();
        let user = board
            .register_user("  Ada Lovelace  ", " ada@x.com ", "secret1", "secret1")
            .unwrap();
        assert_eq!(user.name, "Ada Lovelace");
        assert_eq!(user.email, "ada@x.com");
    }

    #[test]
    fn test_authenticate_wrong_password_is_invalid_credentials() {
        let mut board = logged_in_board();
        board.logout();

        assert_eq!(
            board.authenticate("ada@x.com", "wrong-password"),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            board.authenticate("nobody@x.com", "secret1"),
            Err(AuthError::InvalidCredentials)
        );
        assert!(!board.is_authenticated());
    }

    #[test]
    fn test_authenticate_pre_checks_field_syntax() {
        let mut board = logged_in_board();
        board.logout();

        match board.authenticate("not-an-email", "123") {
            Err(AuthError::Invalid(errors)) => {
                assert_eq!(errors.len(), 2);
            }
            other => panic!("expected field errors, got {:?}", other),
        }
    }

    #[test]
    fn test_logout_clears_persisted_session() {
        let mut board = logged_in_board();
        board.logout();

        let board = Board::open(board.into_storage());
        assert!(!board.is_authenticated());
    }

    #[test]
    fn test_post_question_prepends_newest_first() {
        let mut board = logged_in_board();
        let question = board
            .post_question(
                "What if gravity reversed every Tuesday?",
                "Asking for a friend.",
                Category::Science,
            )
            .unwrap();

        assert_eq!(board.questions()[0].id, question.id);
        assert_eq!(board.questions().len(), 6);
        assert_eq!(question.author, "Ada Lovelace");
        assert_eq!(question.likes, 0);
        assert!(!question.is_sample);
    }

    #[test]
    fn test_post_question_requires_session() {
        let mut board = fresh_board();
        let before = board.questions().len();

        let err = board
            .post_question("What if nobody was logged in?", "", Category::General)
            .unwrap_err();
        assert_eq!(err, PostError::NotAuthenticated);
        assert_eq!(board.questions().len(), before);
    }

    #[test]
    fn test_post_question_rejects_short_title() {
        // Scenario D: a 9-character title is too short.
        let mut board = logged_in_board();
        let before = board.questions().len();

        let err = board
            .post_question("Too short", "details", Category::General)
            .unwrap_err();
        assert!(matches!(err, PostError::Invalid(ref e) if e.field == Field::Title));
        assert_eq!(board.questions().len(), before);
    }

    #[test]
    fn test_post_question_defaults_empty_details() {
        let mut board = logged_in_board();
        let question = board
            .post_question("What if forms were left blank?", "   ", Category::General)
            .unwrap();
        assert_eq!(question.details, DETAILS_PLACEHOLDER);
    }

    #[test]
    fn test_set_like_requires_session() {
        // Scenario C.
        let mut board = fresh_board();
        let id = board.questions()[0].id;
        let likes_before: Vec<u32> = board.questions().iter().map(|q| q.likes).collect();

        assert_eq!(board.set_like(id, true), Err(LikeError::NotAuthenticated));

        let likes_after: Vec<u32> = board.questions().iter().map(|q| q.likes).collect();
        assert_eq!(likes_before, likes_after);
    }

    #[test]
    fn test_set_like_unknown_id_is_not_found() {
        let mut board = logged_in_board();
        assert_eq!(board.set_like(999, true), Err(LikeError::NotFound(999)));
    }

    #[test]
    fn test_set_like_is_idempotent() {
        let mut board = logged_in_board();
        let id = board.questions()[0].id;
        let base = board.questions()[0].likes;

        let once = board.set_like(id, true).unwrap();
        let twice = board.set_like(id, true).unwrap();
        assert_eq!(once.likes, base + 1);
        assert_eq!(twice.likes, base + 1);
        assert!(board.is_liked(id));

        let unliked = board.set_like(id, false).unwrap();
        assert_eq!(unliked.likes, base);
        assert!(!board.is_liked(id));

        // Unliking again stays a no-op.
        let again = board.set_like(id, false).unwrap();
        assert_eq!(again.likes, base);
    }

    #[test]
    fn test_toggle_like_flips_state() {
        let mut board = logged_in_board();
        let id = board.questions()[0].id;
        let base = board.questions()[0].likes;

        assert_eq!(board.toggle_like(id).unwrap().likes, base + 1);
        assert!(board.is_liked(id));
        assert_eq!(board.toggle_like(id).unwrap().likes, base);
        assert!(!board.is_liked(id));
    }

    #[test]
    fn test_liked_set_is_storage_scoped_not_per_user() {
        let mut board = logged_in_board();
        let id = board.questions()[0].id;
        board.set_like(id, true).unwrap();

        board.logout();
        board
            .register_user("Grace Hopper", "grace@x.com", "secret2", "secret2")
            .unwrap();

        // The new account sees the previous account's likes.
        assert!(board.is_liked(id));
    }

    #[test]
    fn test_state_round_trips_through_storage() {
        let mut board = logged_in_board();
        let posted = board
            .post_question(
                "What if state survived a reload?",
                "It should.",
                Category::Technology,
            )
            .unwrap();
        board.set_like(posted.id, true).unwrap();

        // Reopen from the same storage, simulating a fresh process start.
        let reopened = Board::open(board.into_storage());
        assert_eq!(reopened.questions().len(), 6);
        assert_eq!(reopened.questions()[0], posted_with_like(&posted));
        assert!(reopened.is_liked(posted.id));
        assert_eq!(reopened.current_user().unwrap().email, "ada@x.com");
    }

    fn posted_with_like(question: &Question) -> Question {
        let mut expected = question.clone();
        expected.likes += 1;
        expected
    }

    #[test]
    fn test_popular_orders_seed_by_descending_likes() {
        // Scenario A: seed likes [42, 37, 55, 28, 63] -> 63, 55, 42, 37, 28.
        let board = fresh_board();
        let likes: Vec<u32> = board
            .list_questions(Filter::Popular)
            .iter()
            .map(|q| q.likes)
            .collect();
        assert_eq!(likes, vec![63, 55, 42, 37, 28]);

        // The stored order is untouched afterwards.
        let stored: Vec<u32> = board.questions().iter().map(|q| q.likes).collect();
        assert_eq!(stored, vec![42, 37, 55, 28, 63]);
    }

    #[test]
    fn test_search_seed_for_mars() {
        // Scenario E.
        let board = fresh_board();
        let hits = board.search("mars");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "What if we discovered life on Mars?");
    }

    #[test]
    fn test_first_visit_is_true_exactly_once() {
        let mut board = fresh_board();
        assert!(board.first_visit());
        assert!(!board.first_visit());

        // The marker is durable across reopen.
        let mut board = Board::open(board.into_storage());
        assert!(!board.first_visit());
    }

    #[test]
    fn test_malformed_users_record_falls_back_to_empty() {
        let mut storage = MemoryStorage::new();
        storage
            .set(USERS_KEY, &serde_json::json!({"not": "a list"}))
            .unwrap();

        let mut board = Board::open(storage);
        assert_eq!(
            board.authenticate("ada@x.com", "secret1"),
            Err(AuthError::InvalidCredentials)
        );
    }
}
