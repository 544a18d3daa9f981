//! Collect the current version and unreleased commits from a repository

use crate::domain::VcsData;
use crate::error::Result;
use crate::git::{Git2Repository, Repository};
use crate::{registry, walker};
use std::path::Path;
use tracing::{debug, info};

/// Open the repository at `path` and find the previous release and the
/// commits made since.
///
/// `tag_prefix` is stripped from tag names before they are parsed as
/// versions; tags without the prefix are still recognized.
pub fn resolve<P: AsRef<Path>>(path: P, tag_prefix: &str) -> Result<VcsData> {
    let repo = Git2Repository::open(path)?;
    resolve_repository(&repo, tag_prefix)
}

/// Same as [resolve] for an already opened repository
pub fn resolve_repository<R: Repository>(repo: &R, tag_prefix: &str) -> Result<VcsData> {
    let head = repo.head()?;
    let tags = repo.tags()?;
    let versions = registry::build(&tags, tag_prefix);
    debug!(tags = tags.len(), versions = versions.len(), "version tags collected");

    let data = walker::walk(repo, head, &versions)?;
    info!(
        current_version = %data.current_version,
        unreleased = data.unreleased_commits.len(),
        "repository inspected"
    );
    Ok(data)
}
