//! Account operations: login, logout and per-user preferences.

use std::sync::Arc;

use tracing::info;

use super::leaderboard::{rank_users, LeaderboardEntry};
use super::recorder::ProfileRecorder;
use super::store::{StoreResult, UserStore};
use super::user::UserRecord;

/// Front door to the user store.
///
/// Every change is written to the store immediately; nothing is cached here,
/// so several services over one store always agree.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn UserStore>,
}

impl AccountService {
    #[must_use]
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// A score recorder writing to the same store.
    #[must_use]
    pub fn recorder(&self) -> ProfileRecorder {
        ProfileRecorder::new(Arc::clone(&self.store))
    }

    /// Log in as `username`, creating the user on first login.
    ///
    /// Names match case-insensitively; an existing record keeps the name it
    /// was created with.
    pub fn login(&self, username: &str) -> StoreResult<UserRecord> {
        let existing = self
            .store
            .get_all_users()?
            .into_iter()
            .find(|user| user.is_named(username));

        let user = match existing {
            Some(user) => user,
            None => {
                let user = UserRecord::new(username);
                self.store.save_user(&user)?;
                info!(user = %user.username, id = %user.id, "created user");
                user
            }
        };

        self.store.save_current_user(Some(&user))?;
        info!(user = %user.username, "logged in");
        Ok(user)
    }

    pub fn logout(&self) -> StoreResult<()> {
        self.store.save_current_user(None)
    }

    pub fn current_user(&self) -> StoreResult<Option<UserRecord>> {
        self.store.get_current_user()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        matches!(self.store.get_current_user(), Ok(Some(_)))
    }

    /// Flip the current user's dark-mode preference.
    ///
    /// Returns the updated user, or `None` when nobody is logged in.
    pub fn toggle_dark_mode(&self) -> StoreResult<Option<UserRecord>> {
        self.update_current(|user| user.is_dark_mode = !user.is_dark_mode)
    }

    /// Zero the current user's high scores.
    pub fn reset_high_scores(&self) -> StoreResult<Option<UserRecord>> {
        self.update_current(UserRecord::reset_high_scores)
    }

    /// All users ranked by their best score on the hardest difficulty.
    pub fn leaderboard(&self) -> StoreResult<Vec<LeaderboardEntry>> {
        Ok(rank_users(self.store.get_all_users()?))
    }

    fn update_current(
        &self,
        change: impl FnOnce(&mut UserRecord),
    ) -> StoreResult<Option<UserRecord>> {
        let Some(mut user) = self.store.get_current_user()? else {
            return Ok(None);
        };
        change(&mut user);
        self.store.save_user(&user)?;
        self.store.save_current_user(Some(&user))?;
        Ok(Some(user))
    }
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService").finish_non_exhaustive()
    }
}
