use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Deserialize;

use crate::format::parse_timestamp;
use crate::model::memo::Memo;

/// Error type for reading a memo collection
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("duplicate memo id: {0}")]
    DuplicateId(String),
}

/// Accepted file shapes: a bare array, or an object with a `memos` array.
#[derive(Deserialize)]
#[serde(untagged)]
enum MemoFile {
    List(Vec<Memo>),
    Wrapped { memos: Vec<Memo> },
}

impl MemoFile {
    fn into_memos(self) -> Vec<Memo> {
        match self {
            MemoFile::List(memos) | MemoFile::Wrapped { memos } => memos,
        }
    }
}

/// In-memory memo collection. Read once from disk, never written back.
#[derive(Debug, Clone, Default)]
pub struct MemoStore {
    memos: Vec<Memo>,
}

impl MemoStore {
    pub fn new(memos: Vec<Memo>) -> Result<Self, StoreError> {
        let mut seen = HashSet::new();
        for memo in &memos {
            if !seen.insert(memo.id.as_str()) {
                return Err(StoreError::DuplicateId(memo.id.clone()));
            }
        }
        Ok(MemoStore { memos })
    }

    pub fn get(&self, id: &str) -> Option<&Memo> {
        self.memos.iter().find(|m| m.id == id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Memo> {
        let idx = self.memos.iter().position(|m| m.id == id)?;
        Some(self.memos.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.memos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memos.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Memo> {
        self.memos.iter()
    }

    /// Most recently updated first. Unparseable timestamps sort last, in file order.
    pub fn sorted_by_updated(&self) -> Vec<&Memo> {
        let mut keyed: Vec<(Option<chrono::DateTime<Utc>>, &Memo)> = self
            .memos
            .iter()
            .map(|m| (parse_timestamp(&m.updated_at, &Utc).ok(), m))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| match (a, b) {
            (Some(a), Some(b)) => b.cmp(a),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        keyed.into_iter().map(|(_, m)| m).collect()
    }
}

pub fn parse_memos(text: &str) -> Result<Vec<Memo>, serde_json::Error> {
    let file: MemoFile = serde_json::from_str(text)?;
    Ok(file.into_memos())
}

/// Load a memo collection from a JSON file.
pub fn load_memos(path: &Path) -> Result<MemoStore, StoreError> {
    let text = fs::read_to_string(path).map_err(|e| StoreError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let memos = parse_memos(&text).map_err(|e| StoreError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let store = MemoStore::new(memos)?;
    log::info!("loaded {} memos from {}", store.len(), path.display());
    Ok(store)
}
