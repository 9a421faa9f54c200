// src/library/mod.rs
pub mod index;

pub use index::DraftIndex;

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};

use crate::draft::Draft;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct DraftEntry {
    pub file_name: String,
    pub path: PathBuf,
    pub source_url: String,
    pub created_at: DateTime<FixedOffset>,
    pub tags: Vec<String>,
    pub highlights: usize,
}

impl DraftEntry {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let draft = Draft::parse(&text)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(DraftEntry {
            file_name,
            path: path.to_path_buf(),
            source_url: draft.meta.source_url,
            created_at: draft.meta.created_at,
            tags: draft.meta.tags,
            highlights: draft.highlights.len(),
        })
    }

    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.file_name.to_lowercase().contains(&query)
            || self.source_url.to_lowercase().contains(&query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&query))
    }
}
