use crate::error::{Result, SemrelError};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use semver::Version;

/// Severity of a release, ordered `NoBump < Patch < Minor < Major`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BumpLevel {
    #[default]
    #[serde(rename = "none")]
    NoBump,
    Patch,
    Minor,
    Major,
}

impl BumpLevel {
    /// Monoid combine: the more severe of the two levels
    pub fn combine(self, other: BumpLevel) -> BumpLevel {
        self.max(other)
    }

    /// Apply this bump to `version`.
    ///
    /// Pre-1.0 versions treat a major bump as a minor one. Bumped versions
    /// carry no pre-release or build metadata. Fails when the bumped
    /// component would overflow.
    pub fn apply(self, version: &Version) -> Result<Version> {
        let next = |component: u64| {
            component.checked_add(1).ok_or_else(|| {
                SemrelError::version(format!("Cannot apply {} bump to {}", self, version))
            })
        };
        Ok(match self {
            BumpLevel::NoBump => version.clone(),
            BumpLevel::Patch => Version::new(version.major, version.minor, next(version.patch)?),
            BumpLevel::Minor => Version::new(version.major, next(version.minor)?, 0),
            BumpLevel::Major if version.major == 0 => {
                Version::new(version.major, next(version.minor)?, 0)
            }
            BumpLevel::Major => Version::new(next(version.major)?, 0, 0),
        })
    }
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BumpLevel::NoBump => write!(f, "none"),
            BumpLevel::Patch => write!(f, "patch"),
            BumpLevel::Minor => write!(f, "minor"),
            BumpLevel::Major => write!(f, "major"),
        }
    }
}

/// Whether a tagged version only marks an in-progress release
pub fn is_pre_release(version: &Version) -> bool {
    !version.pre.is_empty() || !version.build.is_empty()
}

/// Parse a version leniently from a tag name.
///
/// Accepts a leading `v`/`V`, surrounding whitespace, leading zeros and
/// missing minor/patch components (`"v1"` -> 1.0.0, `"1.2"` -> 1.2.0).
/// A shortened version cannot carry pre-release or build metadata.
pub fn parse_tolerant(tag: &str) -> Result<Version> {
    let trimmed = tag.trim();
    let clean = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    let mut parts: Vec<String> = clean
        .splitn(3, '.')
        .map(|part| {
            if part.len() > 1 {
                let stripped = part.trim_start_matches('0');
                if stripped.starts_with(|c: char| c.is_ascii_digit()) {
                    stripped.to_string()
                } else {
                    format!("0{}", stripped)
                }
            } else {
                part.to_string()
            }
        })
        .collect();

    if parts.len() < 3 {
        if parts
            .last()
            .map(|last| last.contains(|c: char| c == '+' || c == '-'))
            .unwrap_or(false)
        {
            return Err(SemrelError::version(format!(
                "Short version '{}' cannot carry pre-release or build metadata",
                tag
            )));
        }
        parts.resize(3, "0".to_string());
    }

    Version::parse(&parts.join("."))
        .map_err(|e| SemrelError::version(format!("Invalid version '{}': {}", tag, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_parse_plain() {
        assert_eq!(parse_tolerant("1.2.3").unwrap(), v("1.2.3"));
    }

    #[test]
    fn test_parse_with_v_prefix() {
        assert_eq!(parse_tolerant("v1.2.3").unwrap(), v("1.2.3"));
        assert_eq!(parse_tolerant("V0.1.0").unwrap(), v("0.1.0"));
    }

    #[test]
    fn test_parse_missing_components() {
        assert_eq!(parse_tolerant("v1").unwrap(), v("1.0.0"));
        assert_eq!(parse_tolerant("1.2").unwrap(), v("1.2.0"));
    }

    #[test]
    fn test_parse_leading_zeros_and_whitespace() {
        assert_eq!(parse_tolerant(" 01.002.3 ").unwrap(), v("1.2.3"));
        assert_eq!(parse_tolerant("1.00.0").unwrap(), v("1.0.0"));
    }

    #[test]
    fn test_parse_pre_release_and_build() {
        let pre = parse_tolerant("v1.0.0-pre").unwrap();
        assert_eq!(pre.pre.as_str(), "pre");
        let build = parse_tolerant("1.0.0+build.5").unwrap();
        assert_eq!(build.build.as_str(), "build.5");
    }

    #[test]
    fn test_parse_short_with_metadata_rejected() {
        assert!(parse_tolerant("1.2-rc1").is_err());
        assert!(parse_tolerant("1+meta").is_err());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_tolerant("release-1.2.3").is_err());
        assert!(parse_tolerant("latest").is_err());
        assert!(parse_tolerant("").is_err());
        assert!(parse_tolerant("1.2.3.4").is_err());
    }

    #[test]
    fn test_is_pre_release() {
        assert!(is_pre_release(&v("1.0.0-pre")));
        assert!(is_pre_release(&v("1.0.0+build")));
        assert!(!is_pre_release(&v("1.0.0")));
    }

    #[test]
    fn test_pre_release_precedes_release() {
        assert!(v("1.0.0-pre") < v("1.0.0"));
        assert!(v("1.0.1") > v("1.0.0"));
    }

    #[test]
    fn test_bump_arithmetic() {
        let cases = [
            ("0.0.0", BumpLevel::NoBump, "0.0.0"),
            ("0.0.0", BumpLevel::Patch, "0.0.1"),
            ("0.2.1", BumpLevel::Minor, "0.3.0"),
            ("0.2.1", BumpLevel::Major, "0.3.0"),
            ("1.2.1", BumpLevel::Major, "2.0.0"),
            ("1.2.1", BumpLevel::Minor, "1.3.0"),
            ("1.2.1", BumpLevel::NoBump, "1.2.1"),
        ];
        for (orig, level, want) in cases {
            assert_eq!(
                level.apply(&v(orig)).unwrap().to_string(),
                want,
                "bumping {} by {}",
                orig,
                level
            );
        }
    }

    #[test]
    fn test_bump_drops_metadata() {
        assert_eq!(BumpLevel::Patch.apply(&v("1.0.0-rc.1")).unwrap(), v("1.0.1"));
    }

    #[test]
    fn test_bump_overflow_is_an_error() {
        let max = u64::MAX;
        let patch = v(&format!("1.0.{}", max));
        let err = BumpLevel::Patch.apply(&patch).unwrap_err();
        assert!(matches!(err, SemrelError::Version(_)));
        assert!(BumpLevel::Minor.apply(&v(&format!("1.{}.0", max))).is_err());
        assert!(BumpLevel::Major.apply(&v(&format!("0.{}.0", max))).is_err());
        assert!(BumpLevel::Major.apply(&v(&format!("{}.0.0", max))).is_err());

        // Untouched components may sit at the limit
        assert_eq!(BumpLevel::Minor.apply(&patch).unwrap(), v("1.1.0"));
        assert_eq!(BumpLevel::NoBump.apply(&patch).unwrap(), patch);
    }

    #[test]
    fn test_bump_level_order_and_combine() {
        assert!(BumpLevel::NoBump < BumpLevel::Patch);
        assert!(BumpLevel::Patch < BumpLevel::Minor);
        assert!(BumpLevel::Minor < BumpLevel::Major);
        assert_eq!(BumpLevel::Patch.combine(BumpLevel::Minor), BumpLevel::Minor);
        assert_eq!(BumpLevel::Major.combine(BumpLevel::NoBump), BumpLevel::Major);
        assert_eq!(BumpLevel::default(), BumpLevel::NoBump);
    }
}
