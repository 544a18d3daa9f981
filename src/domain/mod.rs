//! Domain types - pure data and semver rules independent of git access

pub mod change;
pub mod commit;
pub mod version;

pub use change::{
    Change, ReleaseData, CATEGORY_BREAKING, CATEGORY_CHORE, CATEGORY_FEATURE, CATEGORY_FIX,
};
pub use commit::{short_id, Commit, VcsData};
pub use version::{is_pre_release, parse_tolerant, BumpLevel, Version};
