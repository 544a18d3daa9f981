use thiserror::Error;

/// Unified error type for git-semrel operations
#[derive(Error, Debug)]
pub enum SemrelError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Cannot open repository: {0}")]
    Repository(String),

    #[error("Cannot resolve HEAD: {0}")]
    Head(String),

    #[error("Cannot read commit: {0}")]
    Commit(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Change analysis failed: {0}")]
    Analyzer(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-semrel
pub type Result<T> = std::result::Result<T, SemrelError>;

impl SemrelError {
    /// Create a repository-open error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        SemrelError::Repository(msg.into())
    }

    /// Create a HEAD resolution error with context
    pub fn head(msg: impl Into<String>) -> Self {
        SemrelError::Head(msg.into())
    }

    /// Create a commit read error with context
    pub fn commit(msg: impl Into<String>) -> Self {
        SemrelError::Commit(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        SemrelError::Version(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SemrelError::Config(msg.into())
    }

    /// Create an analyzer error with context
    pub fn analyzer(msg: impl Into<String>) -> Self {
        SemrelError::Analyzer(msg.into())
    }

    /// Whether this error comes from reading the repository.
    ///
    /// These abort `resolve` outright; analyzer errors only abort aggregation.
    pub fn is_vcs_failure(&self) -> bool {
        matches!(
            self,
            SemrelError::Git(_)
                | SemrelError::Repository(_)
                | SemrelError::Head(_)
                | SemrelError::Commit(_)
        )
    }
}
