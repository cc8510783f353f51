//! services/api/src/adapters/points_file.rs
//!
//! This module contains the flat-file points adapter, which is the concrete
//! implementation of the `PointsService` port from the `core` crate. The whole
//! record lives in a single JSON file that is read and rewritten wholesale on
//! every operation; at household scale that is plenty.

use async_trait::async_trait;
use points_tracker_core::domain::{MoneyByChild, PointsRecord};
use points_tracker_core::ports::{PointsService, PortError, PortResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// The file name under the data directory that holds the points record.
const POINTS_FILE: &str = "points.json";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A flat-file adapter that implements the `PointsService` port.
#[derive(Clone)]
pub struct FilePointsStore {
    path: PathBuf,
}

impl FilePointsStore {
    /// Creates a new `FilePointsStore` rooted at the given data directory.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(POINTS_FILE),
        }
    }

    /// Reads the stored record, falling back to the empty default when the
    /// file is missing, unreadable or corrupt. The default is also written
    /// back (best effort) so the next read finds a well-formed file.
    async fn read_or_default(&self) -> PointsRecord {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // First run: seed the file with the default record.
                return self.repair().await;
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Could not read points file, starting from the default record");
                return self.repair().await;
            }
        };

        match serde_json::from_slice::<PointsFileRecord>(&bytes) {
            Ok(record) => record.to_domain(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Points file is corrupt, starting from the default record");
                self.repair().await
            }
        }
    }

    /// Best-effort rewrite of the file with the default record. Failures are
    /// logged but not propagated: the caller still gets a usable record.
    async fn repair(&self) -> PointsRecord {
        let record = PointsRecord::default();
        if let Err(e) = self.write(&record).await {
            tracing::warn!(path = %self.path.display(), error = %e, "Could not rewrite points file");
        }
        record
    }

    /// Serializes and persists a record, creating the data directory on first
    /// use.
    async fn write(&self, record: &PointsRecord) -> PortResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| PortError::Unexpected(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(&PointsFileRecord::from_domain(record))
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        fs::write(&self.path, json)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" File Record Structs
//=========================================================================================

#[derive(Serialize, Deserialize)]
struct PointsFileRecord {
    adrian: Vec<u32>,
    emma: Vec<u32>,
    goals: MoneyFileRecord,
    savings: MoneyFileRecord,
}

impl PointsFileRecord {
    fn to_domain(self) -> PointsRecord {
        PointsRecord {
            adrian: self.adrian,
            emma: self.emma,
            goals: self.goals.to_domain(),
            savings: self.savings.to_domain(),
        }
    }

    fn from_domain(record: &PointsRecord) -> Self {
        Self {
            adrian: record.adrian.clone(),
            emma: record.emma.clone(),
            goals: MoneyFileRecord::from_domain(record.goals),
            savings: MoneyFileRecord::from_domain(record.savings),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct MoneyFileRecord {
    adrian: f64,
    emma: f64,
}

impl MoneyFileRecord {
    fn to_domain(self) -> MoneyByChild {
        MoneyByChild {
            adrian: self.adrian,
            emma: self.emma,
        }
    }

    fn from_domain(money: MoneyByChild) -> Self {
        Self {
            adrian: money.adrian,
            emma: money.emma,
        }
    }
}

//=========================================================================================
// `PointsService` Trait Implementation
//=========================================================================================

#[async_trait]
impl PointsService for FilePointsStore {
    async fn get_points(&self) -> PortResult<PointsRecord> {
        Ok(self.read_or_default().await)
    }

    async fn replace_points(&self, points: PointsRecord) -> PortResult<PointsRecord> {
        self.write(&points).await?;
        Ok(points)
    }

    async fn reset_points(&self) -> PortResult<PointsRecord> {
        let mut record = self.read_or_default().await;
        record.clear_points();
        self.write(&record).await?;
        Ok(record)
    }
}
