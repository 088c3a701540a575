//! RPM version ordering
//!
//! Implements rpmvercmp:
//! - version strings are split into alphabetic and numeric segments, anything
//!   else is a separator
//! - numeric segments compare as numbers and rank above alphabetic ones
//! - `~` sorts before everything, even the end of the string (pre-releases)
//! - `^` sorts after the end of the string but before any other segment
//! - when all shared segments are equal, the string with segments left wins

use std::cmp::Ordering;

use crate::version::ordering::{SortMode, VersionOrdering};
use crate::version::types::Version;

pub struct RpmOrdering;

impl VersionOrdering for RpmOrdering {
    fn sort_mode(&self) -> SortMode {
        SortMode::Rpm
    }

    fn compare(&self, a: &Version, b: &Version) -> Ordering {
        a.effective_epoch()
            .cmp(&b.effective_epoch())
            .then_with(|| rpmvercmp(&a.ver, &b.ver))
            .then_with(|| rpmvercmp(&a.rel, &b.rel))
    }
}

/// Compare two version or release strings the way rpm does
pub fn rpmvercmp(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let mut one = a.as_bytes();
    let mut two = b.as_bytes();

    loop {
        one = skip_separators(one);
        two = skip_separators(two);

        match (one.first(), two.first()) {
            (Some(b'~'), Some(b'~')) => {
                one = &one[1..];
                two = &two[1..];
                continue;
            }
            (Some(b'~'), _) => return Ordering::Less,
            (_, Some(b'~')) => return Ordering::Greater,
            _ => {}
        }

        match (one.first(), two.first()) {
            (Some(b'^'), Some(b'^')) => {
                one = &one[1..];
                two = &two[1..];
                continue;
            }
            (Some(b'^'), None) => return Ordering::Greater,
            (None, Some(b'^')) => return Ordering::Less,
            (Some(b'^'), _) => return Ordering::Less,
            (_, Some(b'^')) => return Ordering::Greater,
            _ => {}
        }

        if one.is_empty() || two.is_empty() {
            break;
        }

        let numeric = one[0].is_ascii_digit();
        let (seg_one, rest_one) = split_segment(one, numeric);
        let (seg_two, rest_two) = split_segment(two, numeric);

        // Segments of different kinds: numeric wins
        if seg_two.is_empty() {
            return if numeric {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }

        let ord = if numeric {
            compare_numeric(seg_one, seg_two)
        } else {
            seg_one.cmp(seg_two)
        };
        if ord != Ordering::Equal {
            return ord;
        }

        one = rest_one;
        two = rest_two;
    }

    match (one.is_empty(), two.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, _) => Ordering::Greater,
    }
}

fn skip_separators(s: &[u8]) -> &[u8] {
    let start = s
        .iter()
        .position(|c| c.is_ascii_alphanumeric() || *c == b'~' || *c == b'^')
        .unwrap_or(s.len());
    &s[start..]
}

fn split_segment(s: &[u8], numeric: bool) -> (&[u8], &[u8]) {
    let end = s
        .iter()
        .position(|c| {
            if numeric {
                !c.is_ascii_digit()
            } else {
                !c.is_ascii_alphabetic()
            }
        })
        .unwrap_or(s.len());
    s.split_at(end)
}

/// Compare digit strings of arbitrary length without parsing them
fn compare_numeric(a: &[u8], b: &[u8]) -> Ordering {
    let a = trim_leading_zeros(a);
    let b = trim_leading_zeros(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn trim_leading_zeros(s: &[u8]) -> &[u8] {
    let start = s.iter().position(|c| *c != b'0').unwrap_or(s.len());
    &s[start..]
}
