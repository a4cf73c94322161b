//! Player profiles, persistence and high scores.
//!
//! ## Pieces
//!
//! - `UserRecord`: one player
//! - `UserStore` / `BlobStore`: persistence, with in-memory and file-backed
//!   implementations
//! - `AccountService`: login, logout, preferences, leaderboard
//! - `ScoreRecorder`: the engine's game-over hook; `ProfileRecorder` writes
//!   new bests for the logged-in user
//!
//! Store failures never reach the engine: the recorder logs them and the
//! game carries on unrecorded.
//!
//! ```
//! use std::sync::Arc;
//! use memory_match::profile::{AccountService, BlobUserStore};
//!
//! let accounts = AccountService::new(Arc::new(BlobUserStore::in_memory()));
//! let user = accounts.login("ada").unwrap();
//!
//! assert_eq!(accounts.current_user().unwrap(), Some(user));
//! ```

mod accounts;
mod leaderboard;
mod recorder;
mod store;
mod user;

pub use accounts::AccountService;
pub use leaderboard::{rank_users, LeaderboardEntry};
pub use recorder::{record_if_high_score, GameSummary, NoopRecorder, ProfileRecorder, ScoreRecorder};
pub use store::{
    BlobStore, BlobUserStore, FileBlobStore, MemoryBlobStore, StoreError, StoreResult, UserStore,
};
pub use user::UserRecord;
