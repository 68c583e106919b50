//! State and persistence core for the "What If?" community question board.
//!
//! All durable state (users, questions, the liked set, the current session)
//! lives in a key-value store of JSON records behind the [`Storage`] trait.
//! A [`Board`] hydrates from that store, owns the in-memory state, and
//! re-persists every collection it mutates before returning, so reloading
//! always reproduces the last operation's outcome.
//!
//! Rendering is someone else's job: operations return plain values or typed
//! errors and the UI layer consumes them. The crate opens no sockets, spawns
//! no threads, and installs no tracing subscriber.
//!
//! ```
//! use whatif_board::{Board, Category, Filter, MemoryStorage};
//!
//! let mut board = Board::open(MemoryStorage::new());
//! board
//!     .register_user("Ada Lovelace", "ada@x.com", "secret1", "secret1")
//!     .unwrap();
//! board
//!     .post_question(
//!         "What if boards kept their own state?",
//!         "",
//!         Category::Technology,
//!     )
//!     .unwrap();
//!
//! let popular = board.list_questions(Filter::Popular);
//! assert!(!popular.is_empty());
//! ```

pub mod error;
pub mod model;
pub mod query;
mod seed;
pub mod storage;
pub mod store;
pub mod validate;

pub use error::{AuthError, Field, LikeError, PostError, StorageError, ValidationError};
pub use model::{AuthorId, Category, Question, User};
pub use query::Filter;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::Board;
