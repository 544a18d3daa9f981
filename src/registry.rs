//! Version registry: which commit carries which semantic version

use crate::domain::{parse_tolerant, Version};
use crate::git::TagRef;
use git2::Oid;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// Build the mapping from commit id to the best version tagged on it.
///
/// `prefix` is stripped from tag names before parsing; tags without it are
/// still tried as-is. Tags that are not versions are skipped. When a commit
/// carries several version tags the highest by semver precedence wins, so a
/// pre-release tag can outrank a lower release tag on the same commit.
/// Build metadata does not count towards precedence: among equal versions
/// the one without metadata is kept, so `1.0.0` beats `1.0.0+ci.7`.
pub fn build(tags: &[TagRef], prefix: &str) -> HashMap<Oid, Version> {
    let mut versions: HashMap<Oid, Version> = HashMap::new();

    for tag in tags {
        let name = tag.name.strip_prefix(prefix).unwrap_or(&tag.name);
        let version = match parse_tolerant(name) {
            Ok(version) => version,
            Err(e) => {
                debug!(tag = %tag.name, reason = %e, "ignoring non-version tag");
                continue;
            }
        };

        let replace = match versions.get(&tag.target) {
            Some(existing) => outranks(&version, existing),
            None => true,
        };
        if replace {
            versions.insert(tag.target, version);
        }
    }

    versions
}

/// Whether `candidate` should replace `existing` on the same commit.
///
/// Independent of tag listing order.
fn outranks(candidate: &Version, existing: &Version) -> bool {
    match candidate.cmp_precedence(existing) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => {
            let rank = |v: &Version| (!v.build.is_empty(), v.build.clone());
            rank(candidate) < rank(existing)
        }
    }
}
