/// Local reading store.
///
/// The whole history lives as one JSON array under a single storage
/// location. The store only ever grows (`append`) or is wiped (`clear`);
/// there is no per-record update or delete.
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::logging::{self, Component};
use crate::model::{RawReading, ReadingError};

/// Default file name for the store, derived from the app's storage key.
pub const DEFAULT_STORE_FILE: &str = "environmental_data.json";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The backing file could not be read, written, or removed.
    Io { kind: io::ErrorKind, message: String },
    /// The backing file exists but is not a JSON array.
    Corrupt(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { message, .. } => write!(f, "I/O error: {}", message),
            StoreError::Corrupt(msg) => write!(f, "Corrupt store: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Corrupt(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

/// Append-only persistence for raw readings.
pub trait ReadingStore {
    fn append(&self, reading: RawReading) -> Result<(), StoreError>;
    fn load_all(&self) -> Result<Vec<RawReading>, StoreError>;
    fn clear(&self) -> Result<(), StoreError>;

    /// Loads the history, degrading to an empty list on any failure.
    ///
    /// Consumers never see a store fault; the failure is logged instead.
    fn load_all_or_empty(&self) -> Vec<RawReading> {
        match self.load_all() {
            Ok(readings) => readings,
            Err(e) => {
                logging::log_store_failure("load", &e);
                Vec::new()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// JSON file implementation
// ---------------------------------------------------------------------------

/// Keeps the history as a single JSON array in one file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored array element by element, without interpreting records.
    fn read_records(&self) -> Result<Vec<serde_json::Value>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn write_records(&self, records: &[serde_json::Value]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string(records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Converts one stored element, excluding it with a warning if its shape is wrong.
fn decode_record(index: usize, record: serde_json::Value) -> Option<RawReading> {
    match serde_json::from_value::<RawReading>(record) {
        Ok(raw) => Some(raw),
        Err(e) => {
            let err = ReadingError::MalformedRecord(e.to_string());
            logging::warn(
                Component::Store,
                None,
                &format!("Excluding record #{}: {}", index, err),
            );
            None
        }
    }
}

impl ReadingStore for JsonFileStore {
    /// Records that no longer decode are kept on disk untouched.
    fn append(&self, reading: RawReading) -> Result<(), StoreError> {
        let mut records = self.read_records()?;
        records.push(serde_json::to_value(reading)?);
        self.write_records(&records)
    }

    /// A store that has never been written reads as empty. Elements that do
    /// not have the shape of a reading are skipped; only a file that is not a
    /// JSON array at all is `Corrupt`.
    fn load_all(&self) -> Result<Vec<RawReading>, StoreError> {
        Ok(self
            .read_records()?
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| decode_record(index, record))
            .collect())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
