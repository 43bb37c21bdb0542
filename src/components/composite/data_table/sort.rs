//! Sorting
//!
//! Sort descriptors, the tagged sort key and the type-aware comparator.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::helpers::{locale_compare, natural_compare};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// Apply the direction to an ascending ordering
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(Error::InvalidArgument {
                name: "direction".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Active sort: which column and which way
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortDescriptor {
    pub column_id: String,
    pub direction: SortDirection,
}

impl SortDescriptor {
    pub fn ascending(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Parses `column`, `column:asc` or `column:desc`.
impl FromStr for SortDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (column, direction) = match s.split_once(':') {
            Some((column, direction)) => (column, direction.parse()?),
            None => (s, SortDirection::Ascending),
        };
        let column = column.trim();
        if column.is_empty() {
            return Err(Error::InvalidArgument {
                name: "sort".to_string(),
                value: s.to_string(),
            });
        }
        Ok(Self {
            column_id: column.to_string(),
            direction,
        })
    }
}

/// Header decoration for a sortable column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Ascending,
    Descending,
    Unsorted,
}

impl From<SortDirection> for SortIndicator {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Ascending => SortIndicator::Ascending,
            SortDirection::Descending => SortIndicator::Descending,
        }
    }
}

/// Next sort after a header click on `column_id`.
///
/// Cycles unsorted → ascending → descending → unsorted on the same column;
/// a click on another column starts over at ascending.
pub fn next_sort(current: Option<&SortDescriptor>, column_id: &str) -> Option<SortDescriptor> {
    match current {
        Some(sort) if sort.column_id == column_id => match sort.direction {
            SortDirection::Ascending => Some(SortDescriptor::descending(column_id)),
            SortDirection::Descending => None,
        },
        _ => Some(SortDescriptor::ascending(column_id)),
    }
}

/// A comparable value extracted from a record for sorting
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Date(DateTime<Utc>),
    Boolean(bool),
    Text(String),
}

impl SortKey {
    /// String form used when comparing keys of different kinds.
    /// Dates are rendered as their instant in milliseconds.
    pub fn string_form(&self) -> String {
        match self {
            SortKey::Number(n) => number_string(*n),
            SortKey::Date(d) => d.timestamp_millis().to_string(),
            SortKey::Boolean(b) => b.to_string(),
            SortKey::Text(s) => s.clone(),
        }
    }
}

/// Shortest round-trip form with exponent notation outside `[1e-6, 1e21)`,
/// `-0` printed as `0` and infinities spelled out
fn number_string(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let abs = n.abs();
    if abs.is_finite() && (abs >= 1e21 || abs < 1e-6) {
        let formatted = format!("{n:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => formatted,
        };
    }
    n.to_string()
}

impl From<f64> for SortKey {
    fn from(value: f64) -> Self {
        SortKey::Number(value)
    }
}

impl From<i64> for SortKey {
    fn from(value: i64) -> Self {
        SortKey::Number(value as f64)
    }
}

impl From<i32> for SortKey {
    fn from(value: i32) -> Self {
        SortKey::Number(f64::from(value))
    }
}

impl From<u32> for SortKey {
    fn from(value: u32) -> Self {
        SortKey::Number(f64::from(value))
    }
}

impl From<bool> for SortKey {
    fn from(value: bool) -> Self {
        SortKey::Boolean(value)
    }
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        SortKey::Text(value.to_string())
    }
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        SortKey::Text(value)
    }
}

impl From<DateTime<Utc>> for SortKey {
    fn from(value: DateTime<Utc>) -> Self {
        SortKey::Date(value)
    }
}

/// Missing values sort as empty text.
impl<T: Into<SortKey>> From<Option<T>> for SortKey {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(|| SortKey::Text(String::new()), Into::into)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string_form())
    }
}

/// Ascending comparison of two sort keys.
///
/// Keys of different kinds fall back to comparing their string forms.
pub fn compare_sort_keys(a: &SortKey, b: &SortKey) -> Ordering {
    match (a, b) {
        (SortKey::Number(l), SortKey::Number(r)) => compare_f64(*l, *r),
        (SortKey::Date(l), SortKey::Date(r)) => l.cmp(r),
        (SortKey::Boolean(l), SortKey::Boolean(r)) => l.cmp(r),
        (SortKey::Text(l), SortKey::Text(r)) => natural_compare(l, r, true),
        _ => locale_compare(&a.string_form(), &b.string_form()),
    }
}

fn compare_f64(l: f64, r: f64) -> Ordering {
    if l == r { Ordering::Equal } else { l.total_cmp(&r) }
}

/// Stable sort of `indices` (positions into `rows`) by a per-row key.
///
/// Keys are computed once per row; equal keys keep their input order.
pub fn sort_indices<R>(
    rows: &[R],
    indices: &mut Vec<usize>,
    key: impl Fn(&R) -> SortKey,
    direction: SortDirection,
) {
    let mut keyed: Vec<(SortKey, usize)> = indices.iter().map(|&i| (key(&rows[i]), i)).collect();
    keyed.sort_by(|(a, _), (b, _)| direction.apply(compare_sort_keys(a, b)));
    *indices = keyed.into_iter().map(|(_, i)| i).collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn header_click_cycle() {
        let first = next_sort(None, "name");
        assert_eq!(first, Some(SortDescriptor::ascending("name")));
        let second = next_sort(first.as_ref(), "name");
        assert_eq!(second, Some(SortDescriptor::descending("name")));
        let third = next_sort(second.as_ref(), "name");
        assert_eq!(third, None);
    }

    #[test]
    fn header_click_on_other_column_starts_ascending() {
        let current = SortDescriptor::descending("name");
        assert_eq!(
            next_sort(Some(&current), "email"),
            Some(SortDescriptor::ascending("email"))
        );
    }

    #[test]
    fn same_kind_comparisons() {
        assert_eq!(compare_sort_keys(&2.0.into(), &10.0.into()), Ordering::Less);
        assert_eq!(compare_sort_keys(&false.into(), &true.into()), Ordering::Less);
        assert_eq!(compare_sort_keys(&"item2".into(), &"item10".into()), Ordering::Less);

        let early = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single();
        let late = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single();
        assert_eq!(compare_sort_keys(&early.into(), &late.into()), Ordering::Less);
    }

    #[test]
    fn mixed_kinds_compare_string_forms() {
        // "10" < "9" as strings, even though 10 > 9 as numbers
        assert_eq!(compare_sort_keys(&10.0.into(), &"9".into()), Ordering::Less);
        // "false" < "true" < "x"
        assert_eq!(compare_sort_keys(&true.into(), &"x".into()), Ordering::Less);
    }

    #[test]
    fn accented_text_sorts_with_base_letter() {
        let names = ["Bruno", "Éder", "Carla", "Álvaro"];
        let mut order: Vec<usize> = (0..names.len()).collect();
        sort_indices(&names, &mut order, |n| (*n).into(), SortDirection::Ascending);
        assert_eq!(order, vec![3, 0, 2, 1]);
    }

    #[test]
    fn number_string_form() {
        let form = |n: f64| SortKey::Number(n).string_form();
        assert_eq!(form(-0.0), "0");
        assert_eq!(form(42.0), "42");
        assert_eq!(form(-2.5), "-2.5");
        assert_eq!(form(1e21), "1e+21");
        assert_eq!(form(1.5e-7), "1.5e-7");
        assert_eq!(form(0.000001), "0.000001");
        assert_eq!(form(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(form(f64::NAN), "NaN");

        // "-0" would sort before "-1" as text
        assert_eq!(compare_sort_keys(&(-0.0).into(), &"-1".into()), Ordering::Greater);
        assert_eq!(compare_sort_keys(&1e21.into(), &"1e+21".into()), Ordering::Equal);
    }

    #[test]
    fn missing_values_are_empty_text() {
        let key: SortKey = None::<i64>.into();
        assert_eq!(key, SortKey::Text(String::new()));
        assert_eq!(compare_sort_keys(&key, &"a".into()), Ordering::Less);
    }

    #[test]
    fn sort_indices_is_stable_in_both_directions() {
        let rows = vec![(1, "b"), (2, "b"), (3, "a")];
        let mut asc: Vec<usize> = (0..rows.len()).collect();
        sort_indices(&rows, &mut asc, |r| r.1.into(), SortDirection::Ascending);
        assert_eq!(asc, vec![2, 0, 1]);

        let mut desc: Vec<usize> = (0..rows.len()).collect();
        sort_indices(&rows, &mut desc, |r| r.1.into(), SortDirection::Descending);
        assert_eq!(desc, vec![0, 1, 2]);
    }

    #[test]
    fn parse_descriptor() {
        let sort: SortDescriptor = "name:desc".parse().expect("valid sort");
        assert_eq!(sort, SortDescriptor::descending("name"));
        let sort: SortDescriptor = "email".parse().expect("valid sort");
        assert_eq!(sort, SortDescriptor::ascending("email"));
        assert!("name:sideways".parse::<SortDescriptor>().is_err());
        assert!(":asc".parse::<SortDescriptor>().is_err());
    }
}
