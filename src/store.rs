//! Persistence side channel
//!
//! Layout writes are coalesced by a [`DebouncedWriter`] and performed
//! best-effort: a failed write is logged and dropped, and the next
//! submission supersedes it. Nothing here can block or corrupt the
//! in-memory layout.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, warn};

use crate::record::LayoutRecord;

/// Errors reported by store backends
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A key/value backend holding serialized layouts
pub trait LayoutStore {
    /// Read the value stored under `key`
    fn get_data(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`; `None` removes it
    fn set_data(&mut self, key: &str, value: Option<&str>) -> Result<(), StoreError>;
}

/// In-process store, mostly useful for tests and embedding
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    data: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set_data` calls received
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl LayoutStore for MemoryStore {
    fn get_data(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn set_data(&mut self, key: &str, value: Option<&str>) -> Result<(), StoreError> {
        self.writes += 1;
        match value {
            Some(v) => {
                self.data.insert(key.to_string(), v.to_string());
            }
            None => {
                self.data.remove(key);
            }
        }
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl LayoutStore for FileStore {
    fn get_data(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_data(&mut self, key: &str, value: Option<&str>) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match value {
            Some(v) => {
                std::fs::create_dir_all(&self.dir)?;
                std::fs::write(path, v)?;
            }
            None => match std::fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            },
        }
        Ok(())
    }
}

/// Read and decode the record under `key`.
///
/// Read failures and unusable records both come back as `None`.
pub fn load_record(store: &impl LayoutStore, key: &str) -> Option<LayoutRecord> {
    match store.get_data(key) {
        Ok(Some(text)) => LayoutRecord::load(&text),
        Ok(None) => None,
        Err(err) => {
            warn!(key, error = %err, "failed to read persisted layout");
            None
        }
    }
}

/// Coalesces layout writes until the input has been quiet for `interval`
#[derive(Debug)]
pub struct DebouncedWriter<S> {
    store: S,
    key: String,
    interval: Duration,
    pending: Option<(String, Instant)>,
}

impl<S: LayoutStore> DebouncedWriter<S> {
    pub fn new(store: S, key: impl Into<String>, interval: Duration) -> Self {
        Self {
            store,
            key: key.into(),
            interval,
            pending: None,
        }
    }

    /// Queue `value`, replacing anything pending and restarting the quiet period
    pub fn submit(&mut self, value: String, now: Instant) {
        self.pending = Some((value, now + self.interval));
    }

    /// Write the pending value if its quiet period has elapsed.
    ///
    /// Returns `true` if a write was attempted.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = matches!(&self.pending, Some((_, due)) if *due <= now);
        due && self.flush()
    }

    /// Write the pending value immediately. Returns `true` if a write was attempted.
    pub fn flush(&mut self) -> bool {
        let Some((value, _)) = self.pending.take() else {
            return false;
        };
        match self.store.set_data(&self.key, Some(&value)) {
            Ok(()) => debug!(key = %self.key, bytes = value.len(), "persisted layout"),
            Err(err) => warn!(key = %self.key, error = %err, "failed to persist layout"),
        }
        true
    }

    /// Whether a write is waiting
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
