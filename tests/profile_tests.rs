//! Profile, persistence and high-score integration tests.

use std::io;
use std::sync::Arc;

use memory_match::core::{Difficulty, EngineConfig};
use memory_match::engine::{MatchEngine, ResolveOutcome};
use memory_match::profile::{
    record_if_high_score, AccountService, BlobStore, BlobUserStore, FileBlobStore, StoreError,
    StoreResult, UserRecord, UserStore,
};

/// Store whose writes always fail.
struct ReadOnlyStore {
    current: UserRecord,
}

impl UserStore for ReadOnlyStore {
    fn get_current_user(&self) -> StoreResult<Option<UserRecord>> {
        Ok(Some(self.current.clone()))
    }

    fn save_current_user(&self, _user: Option<&UserRecord>) -> StoreResult<()> {
        Err(StoreError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "read-only")))
    }

    fn get_all_users(&self) -> StoreResult<Vec<UserRecord>> {
        Ok(vec![self.current.clone()])
    }

    fn save_user(&self, _user: &UserRecord) -> StoreResult<()> {
        Err(StoreError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "read-only")))
    }
}

/// Score one match on level 1 and end the game.
fn play_one_match(engine: &mut MatchEngine) {
    let session = engine.session();
    let criterion = session.match_criterion();
    let first = session.cards()[0].clone();
    let second = session
        .cards()
        .iter()
        .find(|card| first.pairs_with(card, criterion))
        .map(|card| card.id)
        .unwrap();

    engine.flip(first.id).unwrap();
    engine.flip(second).unwrap();
    assert!(matches!(engine.resolve_pending(), ResolveOutcome::Matched { .. }));
    engine.end_game();
}

#[test]
fn test_file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = Arc::new(BlobUserStore::new(FileBlobStore::open(dir.path()).unwrap()));
        let accounts = AccountService::new(store);
        accounts.login("ada").unwrap();
        accounts.toggle_dark_mode().unwrap();
    }

    let store = Arc::new(BlobUserStore::new(FileBlobStore::open(dir.path()).unwrap()));
    let accounts = AccountService::new(store);
    let current = accounts.current_user().unwrap().unwrap();

    assert_eq!(current.username, "ada");
    assert!(current.is_dark_mode);
    assert!(dir.path().join("currentUser.json").exists());
    assert!(dir.path().join("allUsers.json").exists());
}

#[test]
fn test_file_store_corrupt_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("allUsers.json"), "definitely not json").unwrap();

    let store = BlobUserStore::new(FileBlobStore::open(dir.path()).unwrap());

    assert!(store.get_all_users().unwrap().is_empty());
    assert_eq!(store.get_current_user().unwrap(), None);
}

#[test]
fn test_file_store_remove_missing_key() {
    let dir = tempfile::tempdir().unwrap();
    let blobs = FileBlobStore::open(dir.path().join("nested")).unwrap();

    assert!(blobs.remove("nothing").is_ok());
    assert_eq!(blobs.get("nothing").unwrap(), None);
}

#[test]
fn test_game_over_records_high_score() {
    let store = Arc::new(BlobUserStore::in_memory());
    let accounts = AccountService::new(store);
    accounts.login("ada").unwrap();

    let mut engine = MatchEngine::new(EngineConfig::default().with_seed(3), Difficulty::Medium)
        .unwrap()
        .with_recorder(accounts.recorder());
    play_one_match(&mut engine);

    let user = accounts.current_user().unwrap().unwrap();
    assert_eq!(user.high_score(Difficulty::Medium), 10);
    assert_eq!(user.high_score(Difficulty::Hard), 0);
    assert_eq!(accounts.leaderboard().unwrap()[0].user, user);

    // A worse game leaves the record alone
    engine.restart().unwrap();
    engine.end_game();
    let user = accounts.current_user().unwrap().unwrap();
    assert_eq!(user.high_score(Difficulty::Medium), 10);
}

#[test]
fn test_no_user_no_record() {
    let store = Arc::new(BlobUserStore::in_memory());
    let accounts = AccountService::new(store.clone());

    let mut engine = MatchEngine::new(EngineConfig::default().with_seed(3), Difficulty::Easy)
        .unwrap()
        .with_recorder(accounts.recorder());
    play_one_match(&mut engine);

    assert!(store.blobs().is_empty());
}

#[test]
fn test_store_failure_keeps_engine_playable() {
    let user = UserRecord::new("ada");
    let store = Arc::new(ReadOnlyStore {
        current: user.clone(),
    });
    let accounts = AccountService::new(store.clone());

    let mut engine = MatchEngine::new(EngineConfig::default().with_seed(3), Difficulty::Easy)
        .unwrap()
        .with_recorder(accounts.recorder());
    play_one_match(&mut engine);

    assert!(engine.session().is_over());
    assert_eq!(engine.session().score(), 10);

    engine.restart().unwrap();
    let first = engine.session().cards()[0].id;
    assert!(engine.flip(first).unwrap().has_update());

    // The failed write hands back the unchanged record
    let returned = record_if_high_score(store.as_ref(), &user, Difficulty::Easy, 500);
    assert_eq!(returned, user);
}

#[test]
fn test_leaderboard_ranks_by_hard() {
    let store = Arc::new(BlobUserStore::in_memory());
    let accounts = AccountService::new(store.clone());

    for (name, hard) in [("low", 10), ("high", 90), ("mid", 50)] {
        let user = accounts.login(name).unwrap();
        record_if_high_score(store.as_ref(), &user, Difficulty::Hard, hard);
    }

    let board = accounts.leaderboard().unwrap();
    let ranked: Vec<_> = board
        .iter()
        .map(|entry| (entry.rank, entry.user.username.as_str(), entry.score()))
        .collect();
    assert_eq!(ranked, vec![(1, "high", 90), (2, "mid", 50), (3, "low", 10)]);
}
