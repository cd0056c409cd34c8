// src/storage.rs

use crate::errors::{MentorError, MentorResult};
use crate::transcript::Message;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// The one key the transcript mirror lives under.
pub const TRANSCRIPT_KEY: &str = "chat_messages";

/// Minimal durable key-value surface. The controller only ever talks to this
/// trait, so any durable store can be substituted without touching it.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> MentorResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> MentorResult<()>;
    fn remove(&self, key: &str) -> MentorResult<()>;
}

/// File-backed store: one JSON file per key under a directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Opens (creating if needed) the store in the platform data directory.
    pub fn in_data_dir() -> MentorResult<Self> {
        let dir = dirs::data_dir()
            .ok_or_else(|| MentorError::storage_error("could not determine data directory"))?
            .join("mentora");
        fs::create_dir_all(&dir).map_err(|e| {
            MentorError::storage_error(format!("failed to create {}: {}", dir.display(), e))
        })?;
        Ok(Self::new(dir))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> MentorResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MentorError::storage_error(format!(
                "failed to read key {}: {}",
                key, e
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> MentorResult<()> {
        fs::write(self.path_for(key), value).map_err(|e| {
            MentorError::storage_error(format!("failed to write key {}: {}", key, e))
        })
    }

    fn remove(&self, key: &str) -> MentorResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MentorError::storage_error(format!(
                "failed to remove key {}: {}",
                key, e
            ))),
        }
    }
}

/// In-memory store. Clones share the same map, which also makes it handy for
/// inspecting what the controller persisted in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> MentorResult<Option<String>> {
        Ok(self.inner.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> MentorResult<()> {
        self.inner
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> MentorResult<()> {
        self.inner.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Loads the persisted transcript. An absent key is an empty transcript;
/// malformed contents fail loudly instead of being silently discarded.
pub fn load_transcript(store: &dyn KeyValueStore) -> MentorResult<Vec<Message>> {
    match store.get(TRANSCRIPT_KEY)? {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| MentorError::storage_error(format!("malformed transcript: {}", e))),
        None => Ok(Vec::new()),
    }
}

/// Rewrites the persisted transcript mirror in full. An empty transcript is
/// never written; the key is removed instead, so a cleared chat leaves no
/// record to reload.
pub fn persist_transcript(store: &dyn KeyValueStore, messages: &[Message]) -> MentorResult<()> {
    if messages.is_empty() {
        return store.remove(TRANSCRIPT_KEY);
    }
    let json = serde_json::to_string_pretty(messages)
        .map_err(|e| MentorError::storage_error(format!("failed to serialize transcript: {}", e)))?;
    store.set(TRANSCRIPT_KEY, &json)
}
