use crate::error::{Result, SemrelError};
use crate::git::{CommitObject, Repository, TagRef};
use chrono::{DateTime, TimeZone, Utc};
use git2::Oid;
use std::collections::HashMap;

/// In-memory commit DAG for testing without a git object store
pub struct MockRepository {
    commits: HashMap<Oid, CommitObject>,
    tags: Vec<TagRef>,
    head: Option<Oid>,
    next_id: u32,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: HashMap::new(),
            tags: Vec::new(),
            head: None,
            next_id: 1,
        }
    }

    /// Add a commit with the given parents and move HEAD to it.
    ///
    /// Ids are generated sequentially, and so are author times (one second
    /// apart), which keeps the commit order deterministic.
    pub fn make_commit(&mut self, message: &str, parents: &[Oid]) -> Oid {
        let id = self.next_id;
        self.next_id += 1;

        let mut bytes = [0u8; 20];
        bytes[16..].copy_from_slice(&id.to_be_bytes());
        let oid = Oid::from_bytes(&bytes).unwrap_or_else(|_| Oid::zero());

        self.add_commit(
            oid,
            CommitObject {
                message: message.to_string(),
                time: mock_time(i64::from(id)),
                parents: parents.to_vec(),
            },
        );
        self.head = Some(oid);
        oid
    }

    /// Add a commit object under an explicit id
    pub fn add_commit(&mut self, oid: Oid, object: CommitObject) {
        self.commits.insert(oid, object);
    }

    /// Add a tag pointing to a commit
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.push(TagRef::new(name, oid));
    }

    /// Point HEAD at a commit
    pub fn set_head(&mut self, oid: Oid) {
        self.head = Some(oid);
    }
}

fn mock_time(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_600_000_000 + seconds, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn head(&self) -> Result<Oid> {
        self.head
            .ok_or_else(|| SemrelError::head("reference 'refs/heads/main' not found"))
    }

    fn commit(&self, oid: Oid) -> Result<CommitObject> {
        self.commits
            .get(&oid)
            .cloned()
            .ok_or_else(|| SemrelError::commit(format!("object not found: {}", oid)))
    }

    fn tags(&self) -> Result<Vec<TagRef>> {
        Ok(self.tags.clone())
    }
}
