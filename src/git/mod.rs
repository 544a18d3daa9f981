//! Git access abstraction layer
//!
//! The version resolution engine only needs three read operations from a
//! repository: resolve HEAD, read a commit object, and list tags. They are
//! captured by the [Repository] trait so the engine can run against a real
//! repository or an in-memory graph.
//!
//! - [repository::Git2Repository]: backed by the `git2` crate
//! - [mock::MockRepository]: hand-built commit DAG for tests
//!
//! ```rust
//! # use git_semrel::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let head = repo.head()?;
//! let commit = repo.commit(head)?;
//! println!("{} has {} parent(s)", head, commit.parents.len());
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use chrono::{DateTime, Utc};
use git2::Oid;

/// A commit object as read from the store
#[derive(Debug, Clone, PartialEq)]
pub struct CommitObject {
    pub message: String,
    /// Author time
    pub time: DateTime<Utc>,
    /// Parent ids, first parent first
    pub parents: Vec<Oid>,
}

/// A tag name and the commit it ultimately points to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    /// Short tag name, without `refs/tags/`
    pub name: String,
    pub target: Oid,
}

impl TagRef {
    pub fn new(name: impl Into<String>, target: Oid) -> Self {
        TagRef {
            name: name.into(),
            target,
        }
    }
}

/// Read-only repository access used by the version resolution engine
///
/// ## Error Handling
///
/// Every failure is fatal for the caller: implementations should map
/// unresolvable HEAD to [crate::error::SemrelError::Head] and unreadable
/// commits to [crate::error::SemrelError::Commit].
pub trait Repository {
    /// Object id of the commit HEAD points to
    fn head(&self) -> Result<Oid>;

    /// Read one commit object
    fn commit(&self, oid: Oid) -> Result<CommitObject>;

    /// All tags, lightweight and annotated, peeled to their target commit.
    ///
    /// Tags that do not resolve to a commit are left out.
    fn tags(&self) -> Result<Vec<TagRef>>;
}
