use crate::analyzer::ChangeAnalyzer;
use crate::domain::{
    BumpLevel, Change, CATEGORY_BREAKING, CATEGORY_CHORE, CATEGORY_FEATURE, CATEGORY_FIX,
};
use crate::error::{Result, SemrelError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

/// Returns the default commit types that never bump the version.
fn default_chore_types() -> Vec<String> {
    vec!["chore".to_string(), "docs".to_string(), "test".to_string()]
}

/// Returns the default commit types that trigger patch bumps.
fn default_fix_types() -> Vec<String> {
    vec![
        "fix".to_string(),
        "refactor".to_string(),
        "perf".to_string(),
        "style".to_string(),
    ]
}

/// Returns the default commit types that trigger minor bumps.
fn default_feature_types() -> Vec<String> {
    vec!["feat".to_string()]
}

/// Returns the default breaking change markers (regular expressions).
fn default_breaking_change_markers() -> Vec<String> {
    vec![
        r"BREAKING\s+CHANGE:".to_string(),
        r"BREAKING\s+CHANGE".to_string(),
        r"BREAKING:".to_string(),
    ]
}

/// Configuration for the angular commit analyzer.
///
/// Maps commit types to bump levels; each breaking marker is a regular
/// expression searched across the whole message.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AnalyzerOptions {
    #[serde(default = "default_chore_types")]
    pub chore_types: Vec<String>,

    #[serde(default = "default_fix_types")]
    pub fix_types: Vec<String>,

    #[serde(default = "default_feature_types")]
    pub feature_types: Vec<String>,

    #[serde(default = "default_breaking_change_markers")]
    pub breaking_change_markers: Vec<String>,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        AnalyzerOptions {
            chore_types: default_chore_types(),
            fix_types: default_fix_types(),
            feature_types: default_feature_types(),
            breaking_change_markers: default_breaking_change_markers(),
        }
    }
}

/// Problems found when linting a commit message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LintViolation {
    #[error("invalid message head")]
    InvalidHead,

    #[error("invalid type '{0}'")]
    InvalidType(String),
}

/// Parsed header line of an angular-style commit message
#[derive(Debug, Clone, PartialEq, Eq)]
struct Head {
    is_angular: bool,
    commit_type: String,
    scope: Option<String>,
    subject: String,
}

fn full_head() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([a-zA-Z]+)\s*\(([^)]+)\):\s*([^\n]*)").expect("valid header regex")
    })
}

fn minimal_head() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*([a-zA-Z]+):\s*([^\n]*)").expect("valid header regex"))
}

fn parse_head(message: &str) -> Head {
    let text = message.replace('\r', "");

    if let Some(captures) = full_head().captures(&text) {
        return Head {
            is_angular: true,
            commit_type: captures[1].trim().to_lowercase(),
            scope: Some(captures[2].trim().to_lowercase()),
            subject: captures[3].trim().to_string(),
        };
    }

    if let Some(captures) = minimal_head().captures(&text) {
        return Head {
            is_angular: true,
            commit_type: captures[1].trim().to_lowercase(),
            scope: None,
            subject: captures[2].trim().to_string(),
        };
    }

    Head {
        is_angular: false,
        commit_type: String::new(),
        scope: None,
        subject: text.lines().next().unwrap_or("").trim().to_string(),
    }
}

fn is_listed(types: &[String], commit_type: &str) -> bool {
    types.iter().any(|t| t == commit_type)
}

/// Analyzer for angular-style commit messages.
///
/// Recognizes `type(scope): subject` and `type: subject` headers and
/// breaking change markers anywhere in the message:
/// - breaking marker present -> Major ("breaking")
/// - feature type -> Minor ("feature")
/// - fix type -> Patch ("fix")
/// - anything else -> NoBump ("chore")
///
/// Blank messages produce no change.
#[derive(Debug, Clone)]
pub struct AngularAnalyzer {
    options: AnalyzerOptions,
    breaking_markers: Vec<Regex>,
}

impl AngularAnalyzer {
    /// Create an analyzer, compiling the configured breaking markers
    pub fn new(options: AnalyzerOptions) -> Result<Self> {
        let breaking_markers = options
            .breaking_change_markers
            .iter()
            .map(|marker| {
                Regex::new(&format!(r"(?ms){}\s+(.*)", marker)).map_err(|e| {
                    SemrelError::config(format!("Invalid breaking change marker '{}': {}", marker, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(AngularAnalyzer {
            options,
            breaking_markers,
        })
    }

    /// Text following the first matching breaking marker, if any
    fn breaking_message(&self, message: &str) -> Option<String> {
        self.breaking_markers
            .iter()
            .find_map(|re| re.captures(message))
            .map(|captures| captures[1].trim().to_string())
    }

    fn type_level(&self, commit_type: &str) -> Option<BumpLevel> {
        if is_listed(&self.options.feature_types, commit_type) {
            Some(BumpLevel::Minor)
        } else if is_listed(&self.options.fix_types, commit_type) {
            Some(BumpLevel::Patch)
        } else if is_listed(&self.options.chore_types, commit_type) {
            Some(BumpLevel::NoBump)
        } else {
            None
        }
    }

    /// Check that the header is well formed and its type is configured
    pub fn lint(&self, message: &str) -> Vec<LintViolation> {
        let head = parse_head(message);
        if !head.is_angular {
            return vec![LintViolation::InvalidHead];
        }
        match self.type_level(&head.commit_type) {
            Some(_) => Vec::new(),
            None => vec![LintViolation::InvalidType(head.commit_type)],
        }
    }
}

impl Default for AngularAnalyzer {
    fn default() -> Self {
        // The built-in markers always compile
        AngularAnalyzer::new(AnalyzerOptions::default()).expect("default markers are valid")
    }
}

impl ChangeAnalyzer for AngularAnalyzer {
    fn analyze(&self, message: &str) -> Result<Vec<Change>> {
        if message.trim().is_empty() {
            return Ok(Vec::new());
        }

        let head = parse_head(message);
        let breaking_message = self.breaking_message(message);

        let bump_level = if breaking_message.is_some() {
            BumpLevel::Major
        } else {
            self.type_level(&head.commit_type).unwrap_or(BumpLevel::NoBump)
        };

        let category = match bump_level {
            BumpLevel::Major => CATEGORY_BREAKING,
            BumpLevel::Minor => CATEGORY_FEATURE,
            BumpLevel::Patch => CATEGORY_FIX,
            BumpLevel::NoBump => CATEGORY_CHORE,
        };

        let mut change = Change::new(category, bump_level).with_subject(head.subject);
        change.commit_type = Some(head.commit_type).filter(|t| !t.is_empty());
        change.scope = head.scope;
        change.breaking_message = breaking_message;

        Ok(vec![change])
    }
}
