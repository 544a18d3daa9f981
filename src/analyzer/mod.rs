//! Commit message analysis
//!
//! A [ChangeAnalyzer] turns one commit message into zero or more [Change]
//! records. It must be a pure function of the message so aggregation can be
//! repeated with the same result. Plain closures work too:
//!
//! ```rust
//! # use git_semrel::analyzer::ChangeAnalyzer;
//! # use git_semrel::domain::{BumpLevel, Change};
//! let analyzer = |message: &str| -> git_semrel::Result<Vec<Change>> {
//!     Ok(vec![Change::new("any", BumpLevel::Patch).with_subject(message)])
//! };
//! assert_eq!(analyzer.analyze("x").unwrap().len(), 1);
//! ```

pub mod angular;

pub use angular::{AnalyzerOptions, AngularAnalyzer, LintViolation};

use crate::domain::Change;
use crate::error::Result;

/// Classifies a commit message into release changes
pub trait ChangeAnalyzer {
    fn analyze(&self, message: &str) -> Result<Vec<Change>>;
}

impl<F> ChangeAnalyzer for F
where
    F: Fn(&str) -> Result<Vec<Change>>,
{
    fn analyze(&self, message: &str) -> Result<Vec<Change>> {
        self(message)
    }
}
