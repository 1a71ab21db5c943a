//! Archive list: kind, archive date, relative period and column sort.

use chrono::{Days, Months, NaiveDate};
use serde::Deserialize;

use stockinvent_core::ArchiveKind;

use super::{DateRange, Sort, SortDirection, SortKey, matches_search, non_blank, sort_stable};
use crate::models::ArchiveEntry;

/// How long each kind of record is kept once archived.
pub const RETENTION_POLICY: [(&str, &str); 3] = [
    ("Products", "1 year after archiving"),
    ("Orders", "3 years after completion"),
    (
        "Invoices",
        "7 years after payment (for compliance with tax regulations)",
    ),
];

/// Query string of `/archives` and its CSV export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArchiveQuery {
    pub q: Option<String>,
    pub kind: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub period: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

/// Relative archive-date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchivePeriod {
    #[default]
    AllTime,
    Last30Days,
    Last3Months,
    Last6Months,
    Last12Months,
}

impl ArchivePeriod {
    pub const ALL: [Self; 5] = [
        Self::AllTime,
        Self::Last30Days,
        Self::Last3Months,
        Self::Last6Months,
        Self::Last12Months,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllTime => "all",
            Self::Last30Days => "30days",
            Self::Last3Months => "3months",
            Self::Last6Months => "6months",
            Self::Last12Months => "12months",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AllTime => "All Time",
            Self::Last30Days => "Last 30 Days",
            Self::Last3Months => "Last 3 Months",
            Self::Last6Months => "Last 6 Months",
            Self::Last12Months => "Last 12 Months",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == raw)
    }

    /// Earliest archive date inside the window ending `today`.
    #[must_use]
    pub fn cutoff(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::AllTime => None,
            Self::Last30Days => today.checked_sub_days(Days::new(30)),
            Self::Last3Months => today.checked_sub_months(Months::new(3)),
            Self::Last6Months => today.checked_sub_months(Months::new(6)),
            Self::Last12Months => today.checked_sub_months(Months::new(12)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveSortKey {
    ArchiveDate,
    Kind,
    Name,
    Reason,
    ArchivedBy,
}

impl ArchiveSortKey {
    pub const ALL: [Self; 5] = [
        Self::ArchiveDate,
        Self::Kind,
        Self::Name,
        Self::Reason,
        Self::ArchivedBy,
    ];
}

impl SortKey for ArchiveSortKey {
    fn as_str(self) -> &'static str {
        match self {
            Self::ArchiveDate => "archive_date",
            Self::Kind => "kind",
            Self::Name => "name",
            Self::Reason => "reason",
            Self::ArchivedBy => "archived_by",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveFilter {
    pub search: String,
    pub kind: Option<ArchiveKind>,
    pub dates: DateRange,
    pub period: ArchivePeriod,
    pub sort: Sort<ArchiveSortKey>,
    today: NaiveDate,
}

impl ArchiveFilter {
    pub const DEFAULT_SORT: Sort<ArchiveSortKey> =
        Sort::new(ArchiveSortKey::ArchiveDate, SortDirection::Descending);

    /// `today` anchors the relative period.
    #[must_use]
    pub fn from_query(query: &ArchiveQuery, today: NaiveDate) -> Self {
        Self {
            search: query.q.as_deref().unwrap_or_default().trim().to_string(),
            kind: non_blank(query.kind.as_deref()).and_then(|k| k.parse().ok()),
            dates: DateRange::parse(query.start.as_deref(), query.end.as_deref()),
            period: non_blank(query.period.as_deref())
                .and_then(ArchivePeriod::parse)
                .unwrap_or_default(),
            sort: Sort::parse(query.sort.as_deref(), query.dir.as_deref())
                .unwrap_or(Self::DEFAULT_SORT),
            today,
        }
    }

    #[must_use]
    pub fn kind_value(&self) -> &'static str {
        self.kind.as_ref().map_or("all", ArchiveKind::as_str)
    }

    #[must_use]
    pub fn matches(&self, entry: &ArchiveEntry) -> bool {
        matches_search(&self.search, &entry.search_fields())
            && self.kind.is_none_or(|kind| entry.kind() == kind)
            && self.dates.contains(entry.archive_date)
            && self
                .period
                .cutoff(self.today)
                .is_none_or(|cutoff| entry.archive_date >= cutoff)
    }

    #[must_use]
    pub fn apply(&self, entries: Vec<ArchiveEntry>) -> Vec<ArchiveEntry> {
        let mut rows: Vec<ArchiveEntry> = entries.into_iter().filter(|e| self.matches(e)).collect();
        sort_stable(&mut rows, self.sort.direction, |a, b| match self.sort.key {
            ArchiveSortKey::ArchiveDate => a.archive_date.cmp(&b.archive_date),
            ArchiveSortKey::Kind => a.kind().as_str().cmp(b.kind().as_str()),
            ArchiveSortKey::Name => a
                .display_name()
                .to_lowercase()
                .cmp(&b.display_name().to_lowercase()),
            ArchiveSortKey::Reason => a.reason.cmp(&b.reason),
            ArchiveSortKey::ArchivedBy => a.archived_by.cmp(&b.archived_by),
        });
        rows
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::fixtures;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
    }

    #[test]
    fn test_period_cutoffs() {
        let today = today();
        assert_eq!(ArchivePeriod::AllTime.cutoff(today), None);
        assert_eq!(
            ArchivePeriod::Last30Days.cutoff(today),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        // Month arithmetic clamps to the last day of the shorter month.
        assert_eq!(
            ArchivePeriod::Last3Months.cutoff(today),
            NaiveDate::from_ymd_opt(2023, 12, 31)
        );
        assert_eq!(
            ArchivePeriod::Last6Months.cutoff(today),
            NaiveDate::from_ymd_opt(2023, 9, 30)
        );
        assert_eq!(ArchivePeriod::parse("12months"), Some(ArchivePeriod::Last12Months));
        assert_eq!(ArchivePeriod::parse("forever"), None);
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let rows = ArchiveFilter::from_query(&ArchiveQuery::default(), today())
            .apply(fixtures::archive_entries());
        assert_eq!(rows.len(), fixtures::archive_entries().len());
        assert!(rows.windows(2).all(|w| w[0].archive_date >= w[1].archive_date));
    }

    #[test]
    fn test_kind_filter() {
        let query = ArchiveQuery {
            kind: Some("license".to_string()),
            ..ArchiveQuery::default()
        };
        let filter = ArchiveFilter::from_query(&query, today());
        assert_eq!(filter.kind_value(), "license");
        let rows = filter.apply(fixtures::archive_entries());
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|e| e.kind() == ArchiveKind::License));
    }

    #[test]
    fn test_period_relative_to_today() {
        let entries = fixtures::archive_entries();
        let newest = entries.iter().map(|e| e.archive_date).max().unwrap();
        let query = ArchiveQuery {
            period: Some("30days".to_string()),
            ..ArchiveQuery::default()
        };
        let recent = ArchiveFilter::from_query(&query, newest).apply(entries.clone());
        assert!(recent.iter().any(|e| e.archive_date == newest));

        let far_future = newest.checked_add_months(Months::new(24)).unwrap();
        assert!(ArchiveFilter::from_query(&query, far_future).apply(entries).is_empty());
    }

    #[test]
    fn test_search_type_specific_fields() {
        let entries = fixtures::archive_entries();
        let query = ArchiveQuery {
            q: Some(entries.first().unwrap().display_name().to_uppercase()),
            ..ArchiveQuery::default()
        };
        let rows = ArchiveFilter::from_query(&query, today()).apply(entries.clone());
        assert!(rows.iter().any(|e| e.id == entries.first().unwrap().id));
    }

    #[test]
    fn test_sort_by_name_ascending() {
        let query = ArchiveQuery {
            sort: Some("name".to_string()),
            dir: Some("asc".to_string()),
            ..ArchiveQuery::default()
        };
        let rows = ArchiveFilter::from_query(&query, today()).apply(fixtures::archive_entries());
        assert!(
            rows.windows(2)
                .all(|w| w[0].display_name().to_lowercase() <= w[1].display_name().to_lowercase())
        );
    }
}
