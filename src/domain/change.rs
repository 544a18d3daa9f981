use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use super::version::{BumpLevel, Version};

/// Category used for changes that force a major release
pub const CATEGORY_BREAKING: &str = "breaking";
/// Category used for minor-level changes
pub const CATEGORY_FEATURE: &str = "feature";
/// Category used for patch-level changes
pub const CATEGORY_FIX: &str = "fix";
/// Category used for changes that do not bump the version
pub const CATEGORY_CHORE: &str = "chore";

/// One semantic unit extracted from a commit message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub category: String,
    pub bump_level: BumpLevel,
    pub pre_released: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breaking_message: Option<String>,
    /// Id of the commit the change came from, filled in during aggregation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_id: Option<String>,
}

impl Change {
    /// Create a change with only a category and bump level
    pub fn new(category: impl Into<String>, bump_level: BumpLevel) -> Self {
        Change {
            category: category.into(),
            bump_level,
            pre_released: false,
            commit_type: None,
            scope: None,
            subject: String::new(),
            breaking_message: None,
            commit_id: None,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }
}

/// Everything needed to cut the next release
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseData {
    pub current_version: Version,
    pub next_version: Version,
    pub bump_level: BumpLevel,
    pub changes: BTreeMap<String, Vec<Change>>,
    pub time: DateTime<Utc>,
}

impl ReleaseData {
    /// Changes in one category, empty if none were produced
    pub fn changes_in(&self, category: &str) -> &[Change] {
        self.changes
            .get(category)
            .map(|changes| changes.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the next version differs from the current one
    pub fn is_release(&self) -> bool {
        self.bump_level != BumpLevel::NoBump
    }
}
