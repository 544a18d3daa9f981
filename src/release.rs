//! Release aggregation: fold per-commit changes into the next version

use crate::analyzer::ChangeAnalyzer;
use crate::domain::{BumpLevel, Change, ReleaseData, VcsData};
use crate::error::Result;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Analyze every unreleased commit and compute the next release.
///
/// Stops at the first analyzer error and returns it; `input` is left
/// untouched so the call can be retried with another analyzer. Each change
/// inherits the pre-release flag and id of the commit it came from. A bump
/// that would overflow a version component is a version error.
pub fn aggregate<A: ChangeAnalyzer + ?Sized>(
    input: &VcsData,
    analyzer: &A,
) -> Result<ReleaseData> {
    let mut changes: BTreeMap<String, Vec<Change>> = BTreeMap::new();
    let mut bump_level = BumpLevel::NoBump;

    for commit in &input.unreleased_commits {
        let produced = analyzer.analyze(&commit.message)?;
        debug!(commit = commit.short_id(), changes = produced.len(), "analyzed commit");

        for mut change in produced {
            change.pre_released = commit.pre_released;
            change.commit_id = Some(commit.id.clone());
            bump_level = bump_level.combine(change.bump_level);
            changes.entry(change.category.clone()).or_default().push(change);
        }
    }

    let next_version = bump_level.apply(&input.current_version)?;
    info!(
        current = %input.current_version,
        next = %next_version,
        bump = %bump_level,
        "release computed"
    );

    Ok(ReleaseData {
        current_version: input.current_version.clone(),
        next_version,
        bump_level,
        changes,
        time: input.time,
    })
}
