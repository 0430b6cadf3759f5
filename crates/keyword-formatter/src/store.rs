//! Title storage
//!
//! The formatter reads the current title of a record and writes the new one
//! back through a [`TitleStore`].

use crate::errors::{Error, Result};
use crate::event::RecordRef;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Read and replace record titles
pub trait TitleStore {
    fn fetch_title(&self, record: &RecordRef) -> Result<String>;

    fn replace_title(&mut self, record: &RecordRef, title: &str) -> Result<()>;
}

/// A stored title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRecord {
    #[serde(flatten)]
    pub record: RecordRef,
    pub title: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    records: Vec<TitleRecord>,
}

/// Titles kept in a JSON file
#[derive(Debug)]
pub struct JsonTitleStore {
    path: PathBuf,
    records: Vec<TitleRecord>,
}

impl JsonTitleStore {
    /// Open the store; a missing file is an empty store
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            debug!("Store {} does not exist yet", path.display());
            return Ok(Self { path, records: Vec::new() });
        }

        let content = fs::read_to_string(&path).map_err(|source| Error::io(&path, source))?;
        let file: StoreFile = serde_json::from_str(&content)
            .map_err(|source| Error::Json { path: path.clone(), source })?;

        Ok(Self { path, records: file.records })
    }

    pub fn records(&self) -> &[TitleRecord] {
        &self.records
    }

    /// Add or update a record in memory
    pub fn upsert(&mut self, record: RecordRef, title: impl Into<String>) {
        let title = title.into();
        match self.records.iter_mut().find(|r| r.record == record) {
            Some(existing) => existing.title = title,
            None => self.records.push(TitleRecord { record, title }),
        }
    }

    /// Save to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::io(parent, source))?;
        }

        let file = StoreFile { records: self.records.clone() };
        let content = serde_json::to_string_pretty(&file)
            .map_err(|source| Error::Json { path: self.path.clone(), source })?;

        // Atomic write: write to temp file, then rename
        let mut temp_file = self.path.clone().into_os_string();
        temp_file.push(".tmp");
        let temp_file = PathBuf::from(temp_file);
        fs::write(&temp_file, content).map_err(|source| Error::io(&temp_file, source))?;
        fs::rename(&temp_file, &self.path).map_err(|source| Error::io(&self.path, source))?;

        Ok(())
    }
}

impl TitleStore for JsonTitleStore {
    fn fetch_title(&self, record: &RecordRef) -> Result<String> {
        self.records
            .iter()
            .find(|r| &r.record == record)
            .map(|r| r.title.clone())
            .ok_or_else(|| Error::RecordNotFound(record.to_string()))
    }

    fn replace_title(&mut self, record: &RecordRef, title: &str) -> Result<()> {
        let existing = self
            .records
            .iter_mut()
            .find(|r| &r.record == record)
            .ok_or_else(|| Error::RecordNotFound(record.to_string()))?;
        existing.title = title.to_string();
        self.save()
    }
}

/// Titles kept in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryTitleStore {
    titles: HashMap<RecordRef, String>,
}

impl MemoryTitleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, record: RecordRef, title: impl Into<String>) -> Self {
        self.titles.insert(record, title.into());
        self
    }

    pub fn title(&self, record: &RecordRef) -> Option<&str> {
        self.titles.get(record).map(String::as_str)
    }
}

impl TitleStore for MemoryTitleStore {
    fn fetch_title(&self, record: &RecordRef) -> Result<String> {
        self.title(record)
            .map(String::from)
            .ok_or_else(|| Error::RecordNotFound(record.to_string()))
    }

    fn replace_title(&mut self, record: &RecordRef, title: &str) -> Result<()> {
        match self.titles.get_mut(record) {
            Some(existing) => {
                *existing = title.to_string();
                Ok(())
            }
            None => Err(Error::RecordNotFound(record.to_string())),
        }
    }
}
