use crate::error::{Result, SemrelError};
use crate::git::{CommitObject, TagRef};
use chrono::{DateTime, TimeZone, Utc};
use git2::{Oid, Repository as Git2Repo};
use std::path::Path;
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open the repository at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::open(path)
            .map_err(|e| SemrelError::repository(format!("{}: {}", path.display(), e)))?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

fn to_utc(time: git2::Time) -> Result<DateTime<Utc>> {
    Utc.timestamp_opt(time.seconds(), 0)
        .single()
        .ok_or_else(|| SemrelError::commit(format!("Invalid commit time: {}", time.seconds())))
}

impl super::Repository for Git2Repository {
    fn head(&self) -> Result<Oid> {
        let head = self
            .repo
            .head()
            .map_err(|e| SemrelError::head(e.message().to_string()))?;

        let commit = head
            .peel_to_commit()
            .map_err(|e| SemrelError::head(format!("HEAD is not a commit: {}", e)))?;

        Ok(commit.id())
    }

    fn commit(&self, oid: Oid) -> Result<CommitObject> {
        let commit = self
            .repo
            .find_commit(oid)
            .map_err(|e| SemrelError::commit(format!("{}: {}", oid, e)))?;

        let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();
        let time = to_utc(commit.author().when())?;
        let parents = commit.parent_ids().collect();

        Ok(CommitObject {
            message,
            time,
            parents,
        })
    }

    fn tags(&self) -> Result<Vec<TagRef>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;

            // Annotated tags are peeled through the tag object(s) to the commit
            match reference.peel_to_commit() {
                Ok(commit) => tags.push(TagRef::new(name, commit.id())),
                Err(e) => debug!(tag = name, error = %e, "skipping tag that does not point to a commit"),
            }
        }

        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use git2::{Signature, Time};
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, Git2Repo) {
        let temp_dir = TempDir::new().expect("Could not create temp dir");
        let repo = Git2Repo::init(temp_dir.path()).expect("Could not init git repo");
        (temp_dir, repo)
    }

    fn commit(repo: &Git2Repo, message: &str, seconds: i64, parents: &[Oid]) -> Oid {
        let sig = Signature::new("Test User", "test@example.com", &Time::new(seconds, 0)).unwrap();
        let tree_id = repo.treebuilder(None).unwrap().write().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parents: Vec<_> = parents.iter().map(|p| repo.find_commit(*p).unwrap()).collect();
        let parent_refs: Vec<_> = parents.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .expect("Could not create commit")
    }

    #[test]
    fn test_open_non_repository_fails() {
        let temp_dir = TempDir::new().unwrap();
        let err = Git2Repository::open(temp_dir.path()).err().unwrap();
        assert!(matches!(err, SemrelError::Repository(_)));
    }

    #[test]
    fn test_unborn_head_fails() {
        let (_dir, repo) = init_repo();
        let repo = Git2Repository::from_git2(repo);
        assert!(matches!(repo.head(), Err(SemrelError::Head(_))));
    }

    #[test]
    fn test_read_commit() {
        let (_dir, repo) = init_repo();
        let first = commit(&repo, "initial", 1_000, &[]);
        let second = commit(&repo, "fix: second\n\nbody", 2_000, &[first]);
        let repo = Git2Repository::from_git2(repo);

        assert_eq!(repo.head().unwrap(), second);
        let object = repo.commit(second).unwrap();
        assert_eq!(object.message, "fix: second\n\nbody");
        assert_eq!(object.parents, vec![first]);
        assert_eq!(object.time.timestamp(), 2_000);
    }

    #[test]
    fn test_missing_commit_fails() {
        let (_dir, repo) = init_repo();
        commit(&repo, "initial", 1_000, &[]);
        let repo = Git2Repository::from_git2(repo);
        let missing = Oid::from_bytes(&[7; 20]).unwrap();
        assert!(matches!(repo.commit(missing), Err(SemrelError::Commit(_))));
    }

    #[test]
    fn test_tags_lightweight_and_annotated() {
        let (_dir, repo) = init_repo();
        let first = commit(&repo, "initial", 1_000, &[]);
        let second = commit(&repo, "second", 2_000, &[first]);
        let sig = Signature::new("Test User", "test@example.com", &Time::new(3_000, 0)).unwrap();
        repo.tag_lightweight("v1.0.0", &repo.find_object(first, None).unwrap(), false)
            .unwrap();
        repo.tag(
            "v1.1.0",
            &repo.find_object(second, None).unwrap(),
            &sig,
            "release 1.1.0",
            false,
        )
        .unwrap();
        let repo = Git2Repository::from_git2(repo);

        let mut tags = repo.tags().unwrap();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(
            tags,
            vec![TagRef::new("v1.0.0", first), TagRef::new("v1.1.0", second)]
        );
    }
}
