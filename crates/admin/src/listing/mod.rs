//! Filtering, sorting and searching for the list pages.
//!
//! Every list page follows the same shape: a query string is deserialized
//! into a `*Query`, turned into a filter with defaults applied, and the
//! filter is run over a snapshot of the repository. All of it is pure so it
//! can be tested without a server.

pub mod archive;
pub mod bills;
pub mod inventory;
pub mod orders;
pub mod returns;

use std::cmp::Ordering;

use chrono::NaiveDate;

/// Sort order of a list column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// Accepts `asc`/`desc` as well as the long forms.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" | "ascending" => Some(Self::Ascending),
            "desc" | "descending" => Some(Self::Descending),
            _ => None,
        }
    }

    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "↑",
            Self::Descending => "↓",
        }
    }

    /// Orient an ascending comparison.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// A sortable column of some list.
pub trait SortKey: Copy + Eq {
    /// Query string value.
    fn as_str(self) -> &'static str;

    fn parse(raw: &str) -> Option<Self>;
}

/// Current sort of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: SortKey> Sort<K> {
    #[must_use]
    pub const fn new(key: K, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Sort after clicking the header of `key`: the same column flips from
    /// ascending to descending, anything else starts ascending.
    #[must_use]
    pub fn toggled(self, key: K) -> Self {
        let direction = if self.key == key && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        Self { key, direction }
    }

    /// Read `sort`/`dir` query values. An unknown key yields `None`; a known
    /// key without a direction sorts ascending.
    #[must_use]
    pub fn parse(sort: Option<&str>, dir: Option<&str>) -> Option<Self> {
        let key = K::parse(non_blank(sort)?)?;
        let direction = dir.and_then(SortDirection::parse).unwrap_or_default();
        Some(Self { key, direction })
    }

    /// Arrow to show next to the header of `key`.
    #[must_use]
    pub fn indicator(&self, key: K) -> &'static str {
        if self.key == key { self.direction.arrow() } else { "" }
    }
}

/// Stable sort of `items` by an ascending comparator, oriented by `direction`.
pub fn sort_stable<T>(
    items: &mut [T],
    direction: SortDirection,
    compare: impl Fn(&T, &T) -> Ordering,
) {
    items.sort_by(|a, b| direction.apply(compare(a, b)));
}

/// Case-insensitive substring match of `term` against any of `fields`.
///
/// A blank term matches everything.
#[must_use]
pub fn matches_search(term: &str, fields: &[&str]) -> bool {
    let needle = term.trim().to_lowercase();
    needle.is_empty() || fields.iter().any(|f| f.to_lowercase().contains(&needle))
}

/// Inclusive date bounds; a missing side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    #[must_use]
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Self {
        Self {
            start: parse_date(start),
            end: parse_date(end),
        }
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }

    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// `YYYY-MM-DD` from a query value, ignoring blanks and junk.
#[must_use]
pub fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(non_blank(raw)?, "%Y-%m-%d").ok()
}

/// The trimmed value, or `None` when blank.
#[must_use]
pub fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

/// Missing dates sort after every real date.
#[must_use]
pub fn date_or_max(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX))
}

/// URL-encoded query string from pairs, skipping blank values.
#[must_use]
pub fn query_string(pairs: &[(&str, &str)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs.iter().filter(|(_, v)| !v.trim().is_empty()) {
        serializer.append_pair(key, value);
    }
    let encoded = serializer.finish();
    if encoded.is_empty() {
        encoded
    } else {
        format!("?{encoded}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Col {
        Name,
        Price,
    }

    impl SortKey for Col {
        fn as_str(self) -> &'static str {
            match self {
                Self::Name => "name",
                Self::Price => "price",
            }
        }

        fn parse(raw: &str) -> Option<Self> {
            match raw {
                "name" => Some(Self::Name),
                "price" => Some(Self::Price),
                _ => None,
            }
        }
    }

    #[test]
    fn test_toggle_same_key_flips_direction() {
        let sort = Sort::new(Col::Name, SortDirection::Ascending);
        let flipped = sort.toggled(Col::Name);
        assert_eq!(flipped.direction, SortDirection::Descending);
        assert_eq!(flipped.toggled(Col::Name).direction, SortDirection::Ascending);
    }

    #[test]
    fn test_toggle_other_key_starts_ascending() {
        let sort = Sort::new(Col::Name, SortDirection::Descending);
        let other = sort.toggled(Col::Price);
        assert_eq!(other, Sort::new(Col::Price, SortDirection::Ascending));
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(
            Sort::<Col>::parse(Some("price"), Some("desc")),
            Some(Sort::new(Col::Price, SortDirection::Descending))
        );
        assert_eq!(
            Sort::<Col>::parse(Some("name"), None),
            Some(Sort::new(Col::Name, SortDirection::Ascending))
        );
        assert_eq!(Sort::<Col>::parse(Some("colour"), Some("asc")), None);
        assert_eq!(Sort::<Col>::parse(None, Some("asc")), None);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut items = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')];
        sort_stable(&mut items, SortDirection::Ascending, |a, b| a.0.cmp(&b.0));
        assert_eq!(items, vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
        sort_stable(&mut items, SortDirection::Descending, |a, b| a.0.cmp(&b.0));
        assert_eq!(items, vec![(2, 'a'), (2, 'c'), (1, 'b'), (1, 'd')]);
    }

    #[test]
    fn test_matches_search() {
        assert!(matches_search("", &["anything"]));
        assert!(matches_search("  ", &[]));
        assert!(matches_search("DELL", &["Laptop", "Dell Inc."]));
        assert!(!matches_search("sony", &["Laptop", "Dell Inc."]));
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let range = DateRange::parse(Some("2023-11-01"), Some("2023-11-20"));
        assert!(range.contains(NaiveDate::from_ymd_opt(2023, 11, 1).unwrap()));
        assert!(range.contains(NaiveDate::from_ymd_opt(2023, 11, 20).unwrap()));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2023, 11, 21).unwrap()));

        let open = DateRange::parse(Some(""), Some("garbage"));
        assert!(open.is_unbounded());
        assert!(open.contains(NaiveDate::from_ymd_opt(1999, 1, 1).unwrap()));
    }

    #[test]
    fn test_missing_dates_sort_last() {
        let some = date_or_max(NaiveDate::from_ymd_opt(2023, 1, 1));
        assert!(some < date_or_max(None));
        assert_eq!(date_or_max(None).to_string(), "9999-12-31");
    }

    #[test]
    fn test_query_string_skips_blanks() {
        assert_eq!(query_string(&[("q", ""), ("sort", "")]), "");
        assert_eq!(
            query_string(&[("q", "office chair"), ("status", "all"), ("start", "")]),
            "?q=office+chair&status=all"
        );
    }
}
