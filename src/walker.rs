//! Commit graph traversal
//!
//! Walks the parent DAG from HEAD and decides, for every reachable commit,
//! whether it is already covered by a release tag. Two flags travel along
//! each edge:
//!
//! - `unreleased`: no release tag has been crossed on this path yet
//! - `pre_released`: a pre-release or build tag has been crossed
//!
//! A commit is unreleased if *any* path reaches it unreleased, and
//! pre-released if any path reaches it pre-released. Each commit is
//! expanded again only when a visit flips one of its flags from false to
//! true, so total work is bounded by a small multiple of the edge count.

use crate::domain::{is_pre_release, Commit, VcsData, Version};
use crate::error::Result;
use crate::git::Repository;
use git2::Oid;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Flags carried along one path of the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PathState {
    unreleased: bool,
    pre_released: bool,
}

struct Visited {
    commit: Commit,
    parents: Vec<Oid>,
    unreleased: bool,
}

/// Traverse from `head` and collect the unreleased commits.
///
/// `versions` maps commit ids to their best tagged version (see
/// [crate::registry::build]). The returned commits are sorted by author
/// time, oldest first; ties keep discovery order. Any read failure aborts
/// the walk.
pub fn walk<R: Repository>(
    repo: &R,
    head: Oid,
    versions: &HashMap<Oid, Version>,
) -> Result<VcsData> {
    let mut current_version = Version::new(0, 0, 0);
    let mut order: Vec<Visited> = Vec::new();
    let mut index: HashMap<Oid, usize> = HashMap::new();
    let mut stack = vec![(
        head,
        PathState {
            unreleased: true,
            pre_released: false,
        },
    )];

    while let Some((oid, incoming)) = stack.pop() {
        let mut state = incoming;

        if let Some(tag) = versions.get(&oid) {
            if is_pre_release(tag) {
                state.pre_released = true;
            } else if incoming.unreleased {
                trace!(commit = %oid, version = %tag, "release boundary");
                state.unreleased = false;
                if *tag > current_version {
                    current_version = tag.clone();
                }
            }
        }

        let expand = match index.entry(oid) {
            Entry::Vacant(slot) => {
                let object = repo.commit(oid)?;
                slot.insert(order.len());
                order.push(Visited {
                    commit: Commit {
                        id: oid.to_string(),
                        message: object.message,
                        time: object.time,
                        pre_released: state.pre_released,
                    },
                    parents: object.parents,
                    unreleased: state.unreleased,
                });
                true
            }
            Entry::Occupied(slot) => {
                let visited = &mut order[*slot.get()];
                let newly_unreleased = state.unreleased && !visited.unreleased;
                let newly_pre_released = state.pre_released && !visited.commit.pre_released;

                visited.unreleased |= state.unreleased;
                visited.commit.pre_released |= state.pre_released;
                state = PathState {
                    unreleased: visited.unreleased,
                    pre_released: visited.commit.pre_released,
                };

                newly_unreleased || newly_pre_released
            }
        };

        if expand {
            let visited = &order[index[&oid]];
            // Reversed so the first parent is walked first
            for parent in visited.parents.iter().rev() {
                stack.push((*parent, state));
            }
        }
    }

    debug!(
        visited = order.len(),
        current_version = %current_version,
        "commit graph walk finished"
    );

    // HEAD is always the first commit recorded
    let time = order[0].commit.time;

    let mut unreleased_commits: Vec<Commit> = order
        .into_iter()
        .filter(|visited| visited.unreleased)
        .map(|visited| visited.commit)
        .collect();
    unreleased_commits.sort_by_key(|commit| commit.time);

    Ok(VcsData {
        current_version,
        unreleased_commits,
        time,
    })
}
