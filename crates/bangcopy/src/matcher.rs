//! Eligibility matching for bang-marked files
//!
//! A regular file is eligible when its name starts with one to three `!`
//! marks followed by at least one character that is not a mark. Four or
//! more marks, no marks, and names made only of marks are all rejected.

use regex::Regex;

use crate::error::Result;
use crate::scanner::DirEntrySnapshot;

/// The character that flags a file for triage
pub const MARK: char = '!';

/// Pattern for eligible names; group 1 holds the marks, group 2 the rest
const ELIGIBLE_PATTERN: &str = r"(?s)^(!{1,3})([^!].*)$";

/// A file from the source folder that qualified for copying
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchedFile {
    original_name: String,
    bang_count: usize,
    clean_basename: String,
}

impl MatchedFile {
    /// Name as found in the source folder, marks included
    #[must_use]
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    /// Number of leading marks, always in `1..=3`
    #[must_use]
    pub const fn bang_count(&self) -> usize {
        self.bang_count
    }

    /// Name with the leading marks removed; never empty, never starts with a mark
    #[must_use]
    pub fn clean_basename(&self) -> &str {
        &self.clean_basename
    }
}

/// Selects eligible files out of a source folder listing
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: Regex,
}

impl Matcher {
    /// Create a matcher for the `!` convention
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(ELIGIBLE_PATTERN)?,
        })
    }

    /// Match a single file name
    #[must_use]
    pub fn match_name(&self, name: &str) -> Option<MatchedFile> {
        let captures = self.pattern.captures(name)?;
        let marks = captures.get(1)?.as_str();
        let rest = captures.get(2)?.as_str();

        Some(MatchedFile {
            original_name: name.to_string(),
            bang_count: marks.chars().count(),
            clean_basename: rest.to_string(),
        })
    }

    /// Pick eligible files out of a listing, keeping listing order.
    ///
    /// Directories are excluded whatever their name, and so are names that
    /// are not valid UTF-8.
    #[must_use]
    pub fn match_entries(&self, entries: &[DirEntrySnapshot]) -> Vec<MatchedFile> {
        entries
            .iter()
            .filter(|entry| entry.is_file)
            .filter_map(|entry| {
                let Some(name) = entry.name.to_str() else {
                    tracing::debug!(name = ?entry.name, "skipping non UTF-8 file name");
                    return None;
                };
                let matched = self.match_name(name);
                if matched.is_none() {
                    tracing::debug!(name, "not eligible");
                }
                matched
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> Matcher {
        Matcher::new().unwrap()
    }

    #[test]
    fn test_accepts_one_to_three_marks() {
        let m = matcher();

        let one = m.match_name("!a.txt").unwrap();
        assert_eq!(one.bang_count(), 1);
        assert_eq!(one.clean_basename(), "a.txt");

        let two = m.match_name("!!b.txt").unwrap();
        assert_eq!(two.bang_count(), 2);
        assert_eq!(two.clean_basename(), "b.txt");

        let three = m.match_name("!!!c.txt").unwrap();
        assert_eq!(three.bang_count(), 3);
        assert_eq!(three.clean_basename(), "c.txt");
        assert_eq!(three.original_name(), "!!!c.txt");
    }

    #[test]
    fn test_rejects_four_or_more_marks() {
        let m = matcher();
        assert!(m.match_name("!!!!d.txt").is_none());
        assert!(m.match_name("!!!!!!e.txt").is_none());
    }

    #[test]
    fn test_rejects_unmarked_and_mark_only_names() {
        let m = matcher();
        assert!(m.match_name("normal.txt").is_none());
        assert!(m.match_name("a!.txt").is_none());
        assert!(m.match_name("!").is_none());
        assert!(m.match_name("!!!").is_none());
        assert!(m.match_name("").is_none());
    }

    #[test]
    fn test_marks_only_before_extension() {
        let matched = matcher().match_name("!!!.jpg").unwrap();
        assert_eq!(matched.bang_count(), 3);
        assert_eq!(matched.clean_basename(), ".jpg");
    }

    #[test]
    fn test_inner_marks_are_kept() {
        let matched = matcher().match_name("!wow!.txt").unwrap();
        assert_eq!(matched.clean_basename(), "wow!.txt");
    }

    #[test]
    fn test_multibyte_payload() {
        let matched = matcher().match_name("!!été.jpeg").unwrap();
        assert_eq!(matched.bang_count(), 2);
        assert_eq!(matched.clean_basename(), "été.jpeg");
    }

    #[test]
    fn test_match_entries_skips_directories_and_keeps_order() {
        let entries = vec![
            DirEntrySnapshot::new("!!!c.txt", true),
            DirEntrySnapshot::new("!dir", false),
            DirEntrySnapshot::new("normal.txt", true),
            DirEntrySnapshot::new("!a.txt", true),
            DirEntrySnapshot::new("!!!!d.txt", true),
            DirEntrySnapshot::new("!!b.txt", true),
        ];

        let matched = matcher().match_entries(&entries);
        let names: Vec<_> = matched.iter().map(MatchedFile::original_name).collect();

        assert_eq!(names, vec!["!!!c.txt", "!a.txt", "!!b.txt"]);
    }
}
