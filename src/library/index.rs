// src/library/index.rs
use super::DraftEntry;
use std::path::PathBuf;
use tracing::warn;
use walkdir::WalkDir;

/// Drafts stored directly inside one directory, newest first.
pub struct DraftIndex {
    pub dir: PathBuf,
    pub entries: Vec<DraftEntry>,
    pub filter: Option<String>,
}

impl DraftIndex {
    pub fn scan(dir: PathBuf) -> Self {
        let mut index = DraftIndex {
            dir,
            entries: Vec::new(),
            filter: None,
        };
        index.refresh();
        index
    }

    pub fn refresh(&mut self) {
        self.entries.clear();

        for entry in WalkDir::new(&self.dir).min_depth(1).max_depth(1).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            let is_markdown = path.extension().and_then(|e| e.to_str()).map(|e| e.eq_ignore_ascii_case("md")).unwrap_or(false);
            if !entry.file_type().is_file() || !is_markdown {
                continue;
            }

            match DraftEntry::from_path(path) {
                Ok(draft) => {
                    if let Some(ref filter) = self.filter {
                        if !draft.matches(filter) {
                            continue;
                        }
                    }
                    self.entries.push(draft);
                }
                Err(err) => warn!(path = %path.display(), error = %err, "skipping unreadable draft"),
            }
        }

        self.entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }

    pub fn search(&mut self, query: &str) {
        self.filter = Some(query.to_string());
        self.refresh();
    }
}
