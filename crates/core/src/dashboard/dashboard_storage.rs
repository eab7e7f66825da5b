//! Durable storage for the dashboard record.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::debug;
use serde::{Deserialize, Serialize};

use super::DashboardState;
use crate::errors::Result;

/// File name of the persisted dashboard record.
pub const STORAGE_FILE_NAME: &str = "finboard-dashboard.json";

/// Schema version of the persisted record envelope.
const RECORD_VERSION: u32 = 0;

/// Where the dashboard state lives between runs.
pub trait DashboardStorage: Send + Sync {
    /// Load the persisted state; `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<DashboardState>>;

    /// Replace the persisted state.
    fn save(&self, state: &DashboardState) -> Result<()>;
}

#[derive(Serialize, Deserialize)]
struct PersistedRecord {
    state: DashboardState,
    #[serde(default)]
    version: u32,
}

fn encode(state: &DashboardState) -> Result<String> {
    let record = PersistedRecord {
        state: state.clone(),
        version: RECORD_VERSION,
    };
    Ok(serde_json::to_string(&record)?)
}

fn decode(text: &str) -> Result<DashboardState> {
    let record: PersistedRecord = serde_json::from_str(text)?;
    Ok(record.state)
}

/// JSON file storage. Writes go to a sibling temp file that is then renamed
/// over the record, so a crash never leaves a half-written dashboard.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage for `finboard-dashboard.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::at(dir.as_ref().join(STORAGE_FILE_NAME))
    }

    /// Storage at an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DashboardStorage for FileStorage {
    fn load(&self) -> Result<Option<DashboardState>> {
        if !self.path.exists() {
            debug!("No dashboard record at {}", self.path.display());
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)?;
        decode(&text).map(Some)
    }

    fn save(&self, state: &DashboardState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, encode(state)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-process storage holding the serialized record.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    record: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw JSON of the last saved record.
    pub fn snapshot(&self) -> Option<String> {
        self.record
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl DashboardStorage for MemoryStorage {
    fn load(&self) -> Result<Option<DashboardState>> {
        self.snapshot().as_deref().map(decode).transpose()
    }

    fn save(&self, state: &DashboardState) -> Result<()> {
        let text = encode(state)?;
        *self
            .record
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(text);
        Ok(())
    }
}
