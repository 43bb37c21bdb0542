//! String comparison and measuring utilities.
//!
//! This module provides utility functions for:
//! - Case and accent insensitive, numeric-aware ("natural") text ordering used by sorting
//! - Plain case-aware ordering used when two sort keys have different kinds
//! - Display-width measuring and truncation for terminal output

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Compares two strings ignoring case and accents, with runs of ASCII digits
/// compared by numeric value when `numeric` is set.
///
/// With `numeric` enabled `"item2"` orders before `"item10"`, and digit runs
/// that differ only in leading zeros compare equal. Accented letters sort with
/// their base letter, so `"Álvaro"` comes before `"Bruno"`.
pub fn natural_compare(a: &str, b: &str, numeric: bool) -> Ordering {
    let a = fold(a);
    let b = fold(b);
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        let (l, r) = match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => (l, r),
        };

        if numeric && l.is_ascii_digit() && r.is_ascii_digit() {
            let l_digits = take_digits(&mut left);
            let r_digits = take_digits(&mut right);
            match compare_digit_runs(&l_digits, &r_digits) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }

        match l.cmp(&r) {
            Ordering::Equal => {
                left.next();
                right.next();
            }
            ord => return ord,
        }
    }
}

/// Compares two strings the way a case-aware locale comparison does:
/// letters first ignoring case, then lowercase before uppercase on ties.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    natural_compare(a, b, false).then_with(|| compare_case(a, b))
}

fn compare_case(a: &str, b: &str) -> Ordering {
    for (l, r) in a.chars().zip(b.chars()) {
        if l == r {
            continue;
        }
        return match (l.is_lowercase(), r.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => l.cmp(&r),
        };
    }
    a.chars().count().cmp(&b.chars().count())
}

/// Canonical decomposition without combining marks, lowercased
fn fold(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        digits.push(c);
    }
    digits
}

// Digit runs can exceed any integer type, so compare them as trimmed strings.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Width of a string in terminal columns.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncates a string to at most `max` terminal columns, ending with `…`
/// when anything was cut.
pub fn truncate_to_width(s: &str, max: usize) -> String {
    if display_width(s) <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max - 1 {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_compare_numeric_runs() {
        let mut items = vec!["item2", "item10", "item1"];
        items.sort_by(|a, b| natural_compare(a, b, true));
        assert_eq!(items, vec!["item1", "item2", "item10"]);
    }

    #[test]
    fn test_natural_compare_without_numeric_is_lexicographic() {
        let mut items = vec!["item2", "item10", "item1"];
        items.sort_by(|a, b| natural_compare(a, b, false));
        assert_eq!(items, vec!["item1", "item10", "item2"]);
    }

    #[test]
    fn test_natural_compare_ignores_case() {
        assert_eq!(natural_compare("Murilo", "murilo", true), Ordering::Equal);
        assert_eq!(natural_compare("alice", "Bob", true), Ordering::Less);
    }

    #[test]
    fn test_natural_compare_leading_zeros_and_long_runs() {
        assert_eq!(natural_compare("v007", "v7", true), Ordering::Equal);
        assert_eq!(
            natural_compare("n99999999999999999999999", "n100000000000000000000000", true),
            Ordering::Less
        );
    }

    #[test]
    fn test_locale_compare_lowercase_first_on_ties() {
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("B", "a"), Ordering::Greater);
        assert_eq!(locale_compare("10", "9"), Ordering::Less);
        assert_eq!(locale_compare("e", "é"), Ordering::Less);
    }

    #[test]
    fn test_natural_compare_folds_accents() {
        let mut names = vec!["Bruno", "Éder", "Carla", "Álvaro"];
        names.sort_by(|a, b| natural_compare(a, b, true));
        assert_eq!(names, vec!["Álvaro", "Bruno", "Carla", "Éder"]);

        assert_eq!(natural_compare("José", "jose", true), Ordering::Equal);
        assert_eq!(natural_compare("Zoë", "zoe2", true), Ordering::Less);

        let mut names = vec!["Éder", "Ana", "Édson"];
        names.sort_by(|a, b| locale_compare(a, b));
        assert_eq!(names, vec!["Ana", "Éder", "Édson"]);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
        assert_eq!(truncate_to_width("hello", 0), "");
        assert_eq!(display_width("日本"), 4);
    }
}
