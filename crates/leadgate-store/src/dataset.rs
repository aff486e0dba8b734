use crate::csv::parse_csv;
use crate::error::{Result, StoreError};
use crate::json::parse_json;
use leadgate_core::domain::{DatasetFormat, RawSubmission, SubmissionRecord};
use leadgate_core::SubmissionSource;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;
use tracing::debug;

/// Records loaded from the dataset file together with the modification time
/// observed when they were read.
#[derive(Debug, Clone)]
pub struct Snapshot {
    modified: Option<SystemTime>,
    records: Arc<[SubmissionRecord]>,
}

impl Snapshot {
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    pub fn records(&self) -> &Arc<[SubmissionRecord]> {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// File-backed submission dataset, cached until the file's mtime changes.
///
/// Every query stats the file first. The stat, the optional reload and the
/// swap of the cached snapshot happen under one lock, so concurrent callers
/// never observe a partially replaced snapshot and a changed file is read once.
pub struct DatasetStore {
    path: PathBuf,
    format: DatasetFormat,
    cache: Mutex<Option<Snapshot>>,
}

impl DatasetStore {
    pub fn open(path: impl Into<PathBuf>, format: DatasetFormat) -> Self {
        Self {
            path: path.into(),
            format,
            cache: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> DatasetFormat {
        self.format
    }

    pub fn snapshot(&self) -> Result<Snapshot> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        let modified = self.modified_at()?;

        if let Some(snapshot) = cache.as_ref() {
            if snapshot.modified == modified {
                return Ok(snapshot.clone());
            }
        }

        let records = self.read_records()?;
        debug!(
            path = %self.path.display(),
            format = %self.format,
            rows = records.len(),
            "dataset loaded"
        );
        let snapshot = Snapshot {
            modified,
            records: records.into(),
        };
        *cache = Some(snapshot.clone());
        Ok(snapshot)
    }

    pub fn load_all(&self) -> Result<Arc<[SubmissionRecord]>> {
        Ok(Arc::clone(self.snapshot()?.records()))
    }

    fn modified_at(&self) -> Result<Option<SystemTime>> {
        let metadata = fs::metadata(&self.path)
            .map_err(|_| StoreError::DatasetUnavailable(self.path.clone()))?;
        Ok(metadata.modified().ok())
    }

    fn read_records(&self) -> Result<Vec<SubmissionRecord>> {
        let data = fs::read(&self.path)
            .map_err(|err| StoreError::parse_failed(&self.path, err.to_string()))?;

        let rows: Vec<RawSubmission> = match self.format {
            DatasetFormat::Json => {
                let text = String::from_utf8(data)
                    .map_err(|err| StoreError::parse_failed(&self.path, err.to_string()))?;
                parse_json(&text).map_err(|err| StoreError::parse_failed(&self.path, err.to_string()))?
            }
            DatasetFormat::Csv => {
                // Cells are decoded lossily; only the four known columns are read.
                let text = String::from_utf8_lossy(&data);
                let parsed = parse_csv(&text)
                    .map_err(|err| StoreError::parse_failed(&self.path, err.to_string()))?;
                if parsed.skipped > 0 {
                    debug!(
                        path = %self.path.display(),
                        skipped = parsed.skipped,
                        "skipped malformed csv rows"
                    );
                }
                parsed.rows
            }
        };

        Ok(rows.into_iter().map(RawSubmission::into_record).collect())
    }
}

impl SubmissionSource for DatasetStore {
    type Error = StoreError;

    fn load_all(&self) -> Result<Arc<[SubmissionRecord]>> {
        DatasetStore::load_all(self)
    }
}
