// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use crate::{Error, EventRecord, Result};

/// Where the event collection is kept between runs.
///
/// The whole collection is read and written at once.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Reads every stored record. An absent store is an empty collection.
    async fn load(&self) -> Result<Vec<EventRecord>>;

    /// Replaces the stored collection with `records`.
    async fn save(&self, records: &[EventRecord]) -> Result<()>;
}

/// A JSON array of flat records in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> Error {
        Error::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl EventRepository for JsonFileRepository {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Vec<EventRecord>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("event file does not exist yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        // Elements are decoded one by one so a damaged record cannot hide the others.
        let values: Vec<serde_json::Value> = serde_json::from_str(&content)?;
        let records: Vec<_> = values.into_iter().map(EventRecord::from_value).collect();
        let malformed = records.iter().filter(|r| r.malformed.is_some()).count();
        tracing::debug!(count = records.len(), malformed, "read event file");
        Ok(records)
    }

    #[tracing::instrument(skip_all, fields(path = %self.path.display(), count = records.len()))]
    async fn save(&self, records: &[EventRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let values = records
            .iter()
            .map(EventRecord::to_value)
            .collect::<Result<Vec<_>>>()?;
        let content = serde_json::to_string_pretty(&values)?;

        // Write next to the target, then rename over it.
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, content)
            .await
            .map_err(|e| self.io_error(e))?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            if let Err(err) = fs::remove_file(&tmp).await {
                tracing::warn!(tmp = %tmp.display(), %err, "failed to clean up temp file");
            }
            return Err(self.io_error(e));
        }

        tracing::debug!("saved event file");
        Ok(())
    }
}

/// Keeps the collection in memory only.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    records: Mutex<Vec<EventRecord>>,
}

impl MemoryRepository {
    pub fn new(records: Vec<EventRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    /// A copy of what was last saved.
    pub async fn records(&self) -> Vec<EventRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl EventRepository for MemoryRepository {
    async fn load(&self) -> Result<Vec<EventRecord>> {
        Ok(self.records.lock().await.clone())
    }

    async fn save(&self, records: &[EventRecord]) -> Result<()> {
        *self.records.lock().await = records.to_vec();
        Ok(())
    }
}
