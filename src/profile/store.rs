//! Profile persistence.
//!
//! ## Layers
//!
//! - [`UserStore`]: what the rest of the crate talks to (current user, all
//!   users, upsert)
//! - [`BlobStore`]: a dumb key/value byte store underneath
//! - [`BlobUserStore`]: the bridge, keeping JSON blobs under `currentUser`
//!   and `allUsers`
//!
//! Stores take `&self` and are `Send + Sync` so one instance can be shared
//! between an account service and a score recorder.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use super::user::UserRecord;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Could not encode profile data: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persistence contract for user profiles.
pub trait UserStore: Send + Sync {
    /// The logged-in user, if any.
    fn get_current_user(&self) -> StoreResult<Option<UserRecord>>;

    /// Set (or with `None`, clear) the logged-in user.
    fn save_current_user(&self, user: Option<&UserRecord>) -> StoreResult<()>;

    fn get_all_users(&self) -> StoreResult<Vec<UserRecord>>;

    /// Insert or replace by id.
    fn save_user(&self, user: &UserRecord) -> StoreResult<()>;
}

/// Byte-level key/value storage.
pub trait BlobStore: Send + Sync {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;
    fn put(&self, key: &str, bytes: &[u8]) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}

// === In-memory ===

/// Blob store held in memory. Useful for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<FxHashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let blobs = self.blobs.read().unwrap_or_else(PoisonError::into_inner);
        Ok(blobs.get(key).cloned())
    }

    fn put(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        let mut blobs = self.blobs.write().unwrap_or_else(PoisonError::into_inner);
        blobs.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut blobs = self.blobs.write().unwrap_or_else(PoisonError::into_inner);
        blobs.remove(key);
        Ok(())
    }
}

// === Filesystem ===

/// Blob store with one `<key>.json` file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(self.path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn put(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        fs::write(self.path(key), bytes)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        match fs::remove_file(self.path(key)) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

// === Users over blobs ===

/// [`UserStore`] backed by JSON blobs.
#[derive(Debug, Default)]
pub struct BlobUserStore<B> {
    blobs: B,
}

impl<B: BlobStore> BlobUserStore<B> {
    pub const CURRENT_USER_KEY: &'static str = "currentUser";
    pub const ALL_USERS_KEY: &'static str = "allUsers";

    #[must_use]
    pub fn new(blobs: B) -> Self {
        Self { blobs }
    }

    #[must_use]
    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    /// Decode a blob. Undecodable data is logged and reads as absent.
    fn read_json<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let Some(bytes) = self.blobs.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(key, %err, "ignoring undecodable profile data");
                Ok(None)
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let bytes = serde_json::to_vec(value)?;
        self.blobs.put(key, &bytes)
    }
}

impl BlobUserStore<MemoryBlobStore> {
    /// A store that lives only as long as the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryBlobStore::new())
    }
}

impl<B: BlobStore> UserStore for BlobUserStore<B> {
    fn get_current_user(&self) -> StoreResult<Option<UserRecord>> {
        self.read_json(Self::CURRENT_USER_KEY)
    }

    fn save_current_user(&self, user: Option<&UserRecord>) -> StoreResult<()> {
        match user {
            Some(user) => self.write_json(Self::CURRENT_USER_KEY, user),
            None => self.blobs.remove(Self::CURRENT_USER_KEY),
        }
    }

    fn get_all_users(&self) -> StoreResult<Vec<UserRecord>> {
        Ok(self.read_json(Self::ALL_USERS_KEY)?.unwrap_or_default())
    }

    fn save_user(&self, user: &UserRecord) -> StoreResult<()> {
        let mut users = self.get_all_users()?;
        match users.iter_mut().find(|existing| existing.id == user.id) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        self.write_json(Self::ALL_USERS_KEY, &users)
    }
}
