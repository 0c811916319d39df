//! Version string ordering
//!
//! Versions that both parse as semver are compared by semver rules. Anything
//! else is split into numeric and alphanumeric segments: numbers compare
//! numerically, words lexicographically, a number outranks a word at the
//! same position, and with all shared segments equal the longer version wins.

use semver::Version;
use std::cmp::Ordering;

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Number(u64),
    Word(&'a str),
}

impl Ord for Segment<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Segment::Number(a), Segment::Number(b)) => a.cmp(b),
            (Segment::Word(a), Segment::Word(b)) => a.cmp(b),
            (Segment::Number(_), Segment::Word(_)) => Ordering::Greater,
            (Segment::Word(_), Segment::Number(_)) => Ordering::Less,
        }
    }
}

impl PartialOrd for Segment<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn strip_prefix(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix('v').unwrap_or(s)
}

fn segments(s: &str) -> Vec<Segment<'_>> {
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|p| !p.is_empty())
        .map(|p| match p.parse::<u64>() {
            Ok(n) => Segment::Number(n),
            Err(_) => Segment::Word(p),
        })
        .collect()
}

/// Compare two version strings
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a = strip_prefix(a);
    let b = strip_prefix(b);

    if let (Ok(va), Ok(vb)) = (Version::parse(a), Version::parse(b)) {
        return va.cmp(&vb);
    }

    let parts_a = segments(a);
    let parts_b = segments(b);

    for (pa, pb) in parts_a.iter().zip(parts_b.iter()) {
        match pa.cmp(pb) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    parts_a.len().cmp(&parts_b.len())
}

/// Returns true if `candidate` is strictly newer than `current`
pub fn is_greater_than(candidate: &str, current: &str) -> bool {
    compare_versions(candidate, current) == Ordering::Greater
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_versions_basic() {
        assert_eq!(compare_versions("1.0.0", "1.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.0.0", "2.0.0"), Ordering::Less);
        assert_eq!(compare_versions("2.0.0", "1.0.0"), Ordering::Greater);
    }

    #[test]
    fn test_compare_versions_multi_digit() {
        assert_eq!(compare_versions("1.9.0", "1.10.0"), Ordering::Less);
        assert_eq!(compare_versions("10.0", "9.0"), Ordering::Greater);
    }

    #[test]
    fn test_compare_versions_two_part() {
        assert!(is_greater_than("2.0", "1.0"));
        assert!(!is_greater_than("1.0", "2.0"));
        assert!(!is_greater_than("1.0", "1.0"));
    }

    #[test]
    fn test_compare_versions_with_v_prefix() {
        assert_eq!(compare_versions("v1.0.0", "1.0.0"), Ordering::Equal);
        assert!(is_greater_than("v2.0.0", "v1.9.9"));
    }

    #[test]
    fn test_compare_versions_semver_prerelease() {
        assert_eq!(compare_versions("1.0.0-alpha", "1.0.0-beta"), Ordering::Less);
        assert_eq!(compare_versions("1.0.0-rc.1", "1.0.0"), Ordering::Less);
    }

    #[test]
    fn test_compare_versions_different_lengths() {
        assert_eq!(compare_versions("1.0", "1.0.1"), Ordering::Less);
        assert_eq!(compare_versions("1.2.3.4", "1.2.3"), Ordering::Greater);
    }

    #[test]
    fn test_compare_versions_words() {
        assert_eq!(compare_versions("1.0.beta", "1.0.alpha"), Ordering::Greater);
        assert_eq!(compare_versions("1.0.1", "1.0.beta"), Ordering::Greater);
    }

    #[test]
    fn test_compare_versions_empty() {
        assert!(is_greater_than("0.1", ""));
        assert_eq!(compare_versions("", ""), Ordering::Equal);
    }
}
