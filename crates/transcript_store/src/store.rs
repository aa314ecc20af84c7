use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::TranscriptStoreError;
use crate::schema::Turn;

pub struct TranscriptStore {
    path: PathBuf,
}

impl TranscriptStore {
    /// Open the store at `path`, creating the parent directory and an empty
    /// `[]` document if the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, TranscriptStoreError> {
        let store = Self { path: path.into() };
        if !store.path.exists() {
            store.initialize_empty()?;
        }
        Ok(store)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full transcript from disk.
    ///
    /// An empty or missing file loads as `[]`; invalid JSON is propagated as
    /// [`TranscriptStoreError::Malformed`] and the file is left untouched.
    pub fn load(&self) -> Result<Vec<Turn>, TranscriptStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == ErrorKind::NotFound => {
                self.initialize_empty()?;
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(TranscriptStoreError::io("reading store file", &self.path, source));
            }
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw)
            .map_err(|source| TranscriptStoreError::malformed(&self.path, source))
    }

    /// Replace the store file with `transcript`, atomically.
    pub fn save(&self, transcript: &[Turn]) -> Result<(), TranscriptStoreError> {
        let json = serde_json::to_string_pretty(transcript).map_err(|source| {
            TranscriptStoreError::Serialize {
                path: self.path.clone(),
                source,
            }
        })?;
        self.write_atomic(json.as_bytes())
    }

    fn initialize_empty(&self) -> Result<(), TranscriptStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| {
                    TranscriptStoreError::io("creating store directory", &self.path, source)
                })?;
            }
        }
        self.write_atomic(b"[]")
    }

    // Temp file lands in the same directory as the target so the rename stays
    // on one filesystem.
    fn write_atomic(&self, bytes: &[u8]) -> Result<(), TranscriptStoreError> {
        let temp_path = temp_path_for(&self.path);
        fs::write(&temp_path, bytes)
            .map_err(|source| TranscriptStoreError::io("writing temp store file", &temp_path, source))?;
        fs::rename(&temp_path, &self.path)
            .map_err(|source| TranscriptStoreError::io("replacing store file", &self.path, source))
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
