//! Formatting functions for CLI output.
//!
//! `format_*` functions are pure and return plain text; `display_*`
//! functions print with colors.

use crate::analyzer::LintViolation;
use crate::domain::{
    short_id, Change, ReleaseData, CATEGORY_BREAKING, CATEGORY_CHORE, CATEGORY_FEATURE,
    CATEGORY_FIX,
};
use console::style;

const CATEGORY_ORDER: [&str; 4] = [
    CATEGORY_BREAKING,
    CATEGORY_FEATURE,
    CATEGORY_FIX,
    CATEGORY_CHORE,
];

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

fn category_title(category: &str) -> String {
    match category {
        CATEGORY_BREAKING => "Breaking changes".to_string(),
        CATEGORY_FEATURE => "Features".to_string(),
        CATEGORY_FIX => "Fixes".to_string(),
        CATEGORY_CHORE => "Other".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

fn format_change(change: &Change) -> String {
    let mut line = String::from("- ");
    if let Some(scope) = &change.scope {
        line.push_str(&format!("**{}:** ", scope));
    }
    line.push_str(&change.subject);
    if let Some(id) = &change.commit_id {
        line.push_str(&format!(" ({})", short_id(id)));
    }
    if change.pre_released {
        line.push_str(" [pre-released]");
    }
    if let Some(breaking) = &change.breaking_message {
        for note in breaking.lines() {
            line.push_str(&format!("\n  {}", note.trim()));
        }
    }
    line
}

/// Render release notes in markdown, known categories first.
///
/// Categories produced by custom analyzers follow in alphabetical order.
pub fn format_release_notes(release: &ReleaseData) -> String {
    let mut out = format!(
        "## {} ({})\n",
        release.next_version,
        release.time.format("%Y-%m-%d")
    );

    let mut categories: Vec<&str> = CATEGORY_ORDER.to_vec();
    categories.extend(
        release
            .changes
            .keys()
            .map(String::as_str)
            .filter(|category| !CATEGORY_ORDER.iter().any(|known| known == category)),
    );

    for category in categories {
        let changes = release.changes_in(category);
        if changes.is_empty() {
            continue;
        }
        out.push_str(&format!("\n### {}\n\n", category_title(category)));
        for change in changes {
            out.push_str(&format_change(change));
            out.push('\n');
        }
    }

    out
}

/// One-line summary: `1.2.3 -> 1.3.0 (minor)`
pub fn format_summary(release: &ReleaseData) -> String {
    format!(
        "{} -> {} ({})",
        release.current_version, release.next_version, release.bump_level
    )
}

/// Print the outcome of linting a message.
///
/// Returns `true` when the message is clean.
pub fn display_lint_result(message: &str, violations: &[LintViolation]) -> bool {
    let head = message.lines().next().unwrap_or("");
    if violations.is_empty() {
        display_success(&format!("'{}' is valid", head));
        return true;
    }
    for violation in violations {
        display_error(&format!("'{}': {}", head, violation));
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BumpLevel, Version};
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    fn release() -> ReleaseData {
        let mut changes = BTreeMap::new();
        let mut fix = Change::new(CATEGORY_FIX, BumpLevel::Patch).with_subject("handle empty input");
        fix.scope = Some("parser".to_string());
        fix.commit_id = Some("abc1234def".to_string());
        let mut breaking =
            Change::new(CATEGORY_BREAKING, BumpLevel::Major).with_subject("drop old api");
        breaking.breaking_message = Some("use v2 endpoints".to_string());
        breaking.pre_released = true;
        changes.insert(CATEGORY_FIX.to_string(), vec![fix]);
        changes.insert(CATEGORY_BREAKING.to_string(), vec![breaking]);
        changes.insert(
            "docs".to_string(),
            vec![Change::new("docs", BumpLevel::NoBump).with_subject("typo")],
        );

        ReleaseData {
            current_version: Version::new(1, 4, 2),
            next_version: Version::new(2, 0, 0),
            bump_level: BumpLevel::Major,
            changes,
            time: Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_format_summary() {
        assert_eq!(format_summary(&release()), "1.4.2 -> 2.0.0 (major)");
    }

    #[test]
    fn test_format_release_notes() {
        let notes = format_release_notes(&release());
        let expected = "## 2.0.0 (2024-03-09)\n\
\n### Breaking changes\n\n\
- drop old api [pre-released]\n  use v2 endpoints\n\
\n### Fixes\n\n\
- **parser:** handle empty input (abc1234)\n\
\n### Docs\n\n\
- typo\n";
        assert_eq!(notes, expected);
    }

    #[test]
    fn test_format_change_non_ascii_commit_id() {
        let mut change = Change::new(CATEGORY_FIX, BumpLevel::Patch).with_subject("odd id");
        change.commit_id = Some("ünïcödé-id".to_string());
        assert_eq!(format_change(&change), "- odd id (ünïcödé)");
    }

    #[test]
    fn test_format_release_notes_empty() {
        let mut data = release();
        data.changes.clear();
        assert_eq!(format_release_notes(&data), "## 2.0.0 (2024-03-09)\n");
    }
}
