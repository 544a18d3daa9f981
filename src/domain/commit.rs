use chrono::{DateTime, Utc};
use serde::Serialize;

use super::version::Version;

/// A commit recorded by the graph walker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    /// Full hex object id
    pub id: String,
    pub message: String,
    /// Author time
    pub time: DateTime<Utc>,
    /// Reached through at least one pre-release tag
    pub pre_released: bool,
}

impl Commit {
    /// First line of the message, trimmed
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("").trim()
    }

    /// Abbreviated object id for display
    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }
}

/// First seven characters of an object id, cut on a char boundary
pub fn short_id(id: &str) -> &str {
    let end = id.char_indices().nth(7).map(|(i, _)| i).unwrap_or(id.len());
    &id[..end]
}

/// Data collected from version control: the release boundary and
/// everything after it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VcsData {
    pub current_version: Version,
    /// Sorted by commit time, oldest first
    pub unreleased_commits: Vec<Commit>,
    /// Author time of HEAD
    pub time: DateTime<Utc>,
}
