//! Leaderboard projection over stored users.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use super::user::UserRecord;
use crate::core::Difficulty;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based position.
    pub rank: usize,
    pub user: UserRecord,
}

impl LeaderboardEntry {
    /// The score the board is ranked by.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.user.high_score(Difficulty::HARDEST)
    }
}

/// Rank users by their best score on the hardest difficulty, highest first.
///
/// Ties keep their stored order.
#[must_use]
pub fn rank_users(mut users: Vec<UserRecord>) -> Vec<LeaderboardEntry> {
    users.sort_by_key(|user| Reverse(user.high_score(Difficulty::HARDEST)));
    users
        .into_iter()
        .enumerate()
        .map(|(index, user)| LeaderboardEntry {
            rank: index + 1,
            user,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, hard: u32, easy: u32) -> UserRecord {
        let mut user = UserRecord::new(name);
        user.set_high_score(Difficulty::Hard, hard);
        user.set_high_score(Difficulty::Easy, easy);
        user
    }

    #[test]
    fn test_ranked_by_hard_score() {
        let board = rank_users(vec![user("a", 10, 500), user("b", 90, 0), user("c", 40, 0)]);

        let names: Vec<_> = board.iter().map(|e| e.user.username.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[0].score(), 90);
        assert_eq!(board[2].rank, 3);
    }

    #[test]
    fn test_ties_keep_order() {
        let board = rank_users(vec![user("first", 20, 0), user("second", 20, 0)]);

        assert_eq!(board[0].user.username, "first");
        assert_eq!(board[1].user.username, "second");
    }

    #[test]
    fn test_empty() {
        assert!(rank_users(Vec::new()).is_empty());
    }
}
