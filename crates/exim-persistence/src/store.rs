//! The backend-of-record boundary.
//!
//! The editor reaches its backend through [`JobStore`]: load the current
//! record for a job, or upsert a complete snapshot. Call sites always send
//! the full `products`/ledger arrays, never partial patches, so a save is
//! idempotent and a lost one is repaired by the next.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use exim_model::{CURRENT_SCHEMA_VERSION, Shipment};

use crate::error::{PersistenceError, Result};

/// Backend of record for shipment snapshots.
///
/// `load` returning `Ok(None)` means the job has no compliance record yet;
/// callers bootstrap a default shipment rather than treating it as an
/// error.
#[allow(async_fn_in_trait)]
pub trait JobStore {
    async fn load(&self, job_id: &str) -> Result<Option<Shipment>>;

    /// Idempotent upsert of the full snapshot.
    async fn save(&self, job_id: &str, snapshot: &Shipment) -> Result<()>;
}

/// File-backed store: one `<job_id>.json` document per job under a root
/// directory. Writes are atomic (temp file + rename) to prevent a torn
/// record on crash or power loss.
#[derive(Debug, Clone)]
pub struct JsonJobStore {
    root: PathBuf,
}

impl JsonJobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn record_path(&self, job_id: &str) -> PathBuf {
        self.root.join(format!("{job_id}.json"))
    }

    /// Load a shipment record, `None` if the job has none yet.
    pub fn load_sync(&self, job_id: &str) -> Result<Option<Shipment>> {
        let path = self.record_path(job_id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(PersistenceError::Io {
                    operation: "read",
                    path,
                    source: e,
                });
            }
        };

        let shipment: Shipment =
            serde_json::from_slice(&bytes).map_err(|e| PersistenceError::Deserialization {
                source: Box::new(e),
            })?;

        if shipment.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: shipment.schema_version,
                max_supported: CURRENT_SCHEMA_VERSION,
                path,
            });
        }

        tracing::info!(job_id, path = %path.display(), "Loaded shipment record");
        Ok(Some(shipment))
    }

    /// Save a shipment record, stamping `last_saved_at`.
    pub fn save_sync(&self, job_id: &str, snapshot: &Shipment) -> Result<()> {
        let mut record = snapshot.clone();
        record.touch();

        let bytes =
            serde_json::to_vec_pretty(&record).map_err(|e| PersistenceError::Serialization {
                source: Box::new(e),
            })?;

        let path = self.record_path(job_id);
        write_atomic(&path, &bytes)?;

        tracing::info!(job_id, path = %path.display(), "Saved shipment record");
        Ok(())
    }
}

impl JobStore for JsonJobStore {
    async fn load(&self, job_id: &str) -> Result<Option<Shipment>> {
        let store = self.clone();
        let job_id = job_id.to_string();
        tokio::task::spawn_blocking(move || store.load_sync(&job_id))
            .await
            .map_err(|e| PersistenceError::Deserialization {
                source: Box::new(e),
            })?
    }

    async fn save(&self, job_id: &str, snapshot: &Shipment) -> Result<()> {
        let store = self.clone();
        let job_id = job_id.to_string();
        let snapshot = snapshot.clone();
        tokio::task::spawn_blocking(move || store.save_sync(&job_id, &snapshot))
            .await
            .map_err(|e| PersistenceError::Serialization {
                source: Box::new(e),
            })?
    }
}

/// Write bytes to `path` via a temp file in the same directory, then
/// rename into place.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = path.with_extension("json.tmp");

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(bytes).map_err(|e| PersistenceError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;

    file.sync_all().map_err(|e| PersistenceError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| PersistenceError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
