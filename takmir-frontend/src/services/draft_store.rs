//! Persistence for unsaved journal and account forms.
//!
//! Drafts are opaque JSON documents keyed by a short identifier chosen by
//! the client (e.g. `jurnal-baru`). Last write wins; there is no
//! coordination between clients editing the same key.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use service_core::error::AppError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;

const MAX_KEY_LEN: usize = 128;

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("Invalid draft key: {0:?}")]
    InvalidKey(String),

    #[error("Draft storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Draft is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<DraftError> for AppError {
    fn from(err: DraftError) -> Self {
        match err {
            DraftError::InvalidKey(_) => AppError::BadRequest(anyhow::Error::new(err)),
            DraftError::Io(_) | DraftError::Serialization(_) => {
                AppError::StorageError(anyhow::Error::new(err))
            }
        }
    }
}

/// Keys double as file names, so only `[A-Za-z0-9_-]` is allowed.
pub fn validate_key(key: &str) -> Result<(), DraftError> {
    let valid = !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(DraftError::InvalidKey(key.to_string()))
    }
}

#[async_trait]
pub trait DraftStore: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<Value>, DraftError>;

    async fn save(&self, key: &str, draft: &Value) -> Result<(), DraftError>;

    /// Removing a missing draft is not an error.
    async fn clear(&self, key: &str) -> Result<(), DraftError>;
}

#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    drafts: DashMap<String, Value>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn load(&self, key: &str) -> Result<Option<Value>, DraftError> {
        validate_key(key)?;
        Ok(self.drafts.get(key).map(|entry| entry.value().clone()))
    }

    async fn save(&self, key: &str, draft: &Value) -> Result<(), DraftError> {
        validate_key(key)?;
        self.drafts.insert(key.to_string(), draft.clone());
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<(), DraftError> {
        validate_key(key)?;
        self.drafts.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per draft under a directory.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    directory: PathBuf,
}

impl FileDraftStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, DraftError> {
        validate_key(key)?;
        Ok(self.directory.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl DraftStore for FileDraftStore {
    async fn load(&self, key: &str) -> Result<Option<Value>, DraftError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, key: &str, draft: &Value) -> Result<(), DraftError> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.directory).await?;

        // Write-then-rename so readers never see a half-written draft.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec(draft)?).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<(), DraftError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Clone)]
struct PendingDraft {
    draft: Value,
    generation: u64,
}

/// Trailing-edge debounce in front of a [`DraftStore`]: a write is persisted
/// only after `delay` passes without a newer write for the same key. Reads
/// see the pending value until the store has it.
///
/// Store writes for one key are serialized by a per-key lock. A pending
/// entry leaves the map only after its save succeeds, and `clear` drops it
/// before taking the lock, so a save still in flight finishes before the
/// stored draft is removed and never resurrects it.
pub struct DraftDebouncer {
    store: Arc<dyn DraftStore>,
    delay: Duration,
    pending: Arc<DashMap<String, PendingDraft>>,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
    generation: AtomicU64,
}

impl DraftDebouncer {
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

    pub fn new(store: Arc<dyn DraftStore>, delay: Duration) -> Self {
        Self {
            store,
            delay,
            pending: Arc::new(DashMap::new()),
            locks: Arc::new(DashMap::new()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Queue `draft` for `key`, replacing any pending write for that key.
    pub fn schedule(&self, key: &str, draft: Value) -> Result<(), DraftError> {
        validate_key(key)?;

        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        self.pending
            .insert(key.to_string(), PendingDraft { draft, generation });

        let store = Arc::clone(&self.store);
        let pending = Arc::clone(&self.pending);
        let lock = key_lock(&self.locks, key);
        let delay = self.delay;
        let key = key.to_string();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            match persist(store.as_ref(), &pending, &lock, &key, Some(generation)).await {
                Ok(true) => tracing::debug!(key = %key, "Draft persisted"),
                // Superseded by a newer write or cleared.
                Ok(false) => {}
                Err(e) => tracing::error!(key = %key, error = %e, "Failed to persist draft"),
            }
        });

        Ok(())
    }

    pub async fn load(&self, key: &str) -> Result<Option<Value>, DraftError> {
        validate_key(key)?;
        if let Some(entry) = self.pending.get(key) {
            return Ok(Some(entry.draft.clone()));
        }
        self.store.load(key).await
    }

    /// Drop the pending write (if any) and the stored draft. Waits for a
    /// save of the same key that is already running.
    pub async fn clear(&self, key: &str) -> Result<(), DraftError> {
        validate_key(key)?;
        self.pending.remove(key);

        let lock = key_lock(&self.locks, key);
        let _guard = lock.lock().await;
        self.store.clear(key).await
    }

    /// Persist every pending write now. Returns how many were written. A
    /// failed save leaves its draft pending.
    pub async fn flush(&self) -> Result<usize, DraftError> {
        let keys: Vec<String> = self.pending.iter().map(|e| e.key().clone()).collect();
        let mut written = 0;

        for key in keys {
            let lock = key_lock(&self.locks, &key);
            if persist(self.store.as_ref(), &self.pending, &lock, &key, None).await? {
                written += 1;
            }
        }

        if written > 0 {
            tracing::info!(written, "Flushed pending drafts");
        }
        Ok(written)
    }
}

fn key_lock(locks: &DashMap<String, Arc<Mutex<()>>>, key: &str) -> Arc<Mutex<()>> {
    Arc::clone(locks.entry(key.to_string()).or_default().value())
}

/// Save the pending draft for `key` under its lock, then retire the entry if
/// no newer write replaced it meanwhile. With `expected` set, only that
/// generation is saved. Returns whether anything was written.
async fn persist(
    store: &dyn DraftStore,
    pending: &DashMap<String, PendingDraft>,
    lock: &Mutex<()>,
    key: &str,
    expected: Option<u64>,
) -> Result<bool, DraftError> {
    let _guard = lock.lock().await;

    let Some(entry) = pending.get(key).map(|e| e.value().clone()) else {
        return Ok(false);
    };
    if expected.is_some_and(|generation| generation != entry.generation) {
        return Ok(false);
    }

    store.save(key, &entry.draft).await?;
    pending.remove_if(key, |_, p| p.generation == entry.generation);
    Ok(true)
}
