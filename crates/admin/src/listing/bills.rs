//! Billing list.

use serde::Deserialize;

use stockinvent_core::{BillStatus, Money};

use super::{DateRange, Sort, SortKey, matches_search, non_blank, sort_stable};
use crate::models::Bill;

/// Query string of `/billing` and its CSV export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BillsQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillSortKey {
    BillNumber,
    Retailer,
    IssueDate,
    DueDate,
    Total,
    Status,
}

impl BillSortKey {
    pub const ALL: [Self; 6] = [
        Self::BillNumber,
        Self::Retailer,
        Self::IssueDate,
        Self::DueDate,
        Self::Total,
        Self::Status,
    ];
}

impl SortKey for BillSortKey {
    fn as_str(self) -> &'static str {
        match self {
            Self::BillNumber => "bill_number",
            Self::Retailer => "retailer",
            Self::IssueDate => "issue_date",
            Self::DueDate => "due_date",
            Self::Total => "total",
            Self::Status => "status",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillFilter {
    pub search: String,
    pub status: Option<BillStatus>,
    pub dates: DateRange,
    /// Bills keep their book order until a column is picked.
    pub sort: Option<Sort<BillSortKey>>,
}

impl BillFilter {
    #[must_use]
    pub fn from_query(query: &BillsQuery) -> Self {
        Self {
            search: query.q.as_deref().unwrap_or_default().trim().to_string(),
            status: non_blank(query.status.as_deref()).and_then(|s| s.parse().ok()),
            dates: DateRange::parse(query.start.as_deref(), query.end.as_deref()),
            sort: Sort::parse(query.sort.as_deref(), query.dir.as_deref()),
        }
    }

    #[must_use]
    pub fn status_value(&self) -> &'static str {
        self.status.as_ref().map_or("all", BillStatus::as_str)
    }

    #[must_use]
    pub fn matches(&self, bill: &Bill) -> bool {
        matches_search(
            &self.search,
            &[bill.bill_number.as_str(), bill.retailer.name.as_str()],
        ) && self.status.is_none_or(|status| bill.status == status)
            && self.dates.contains(bill.issue_date)
    }

    #[must_use]
    pub fn apply(&self, bills: Vec<Bill>) -> Vec<Bill> {
        let mut rows: Vec<Bill> = bills.into_iter().filter(|b| self.matches(b)).collect();
        if let Some(sort) = self.sort {
            sort_stable(&mut rows, sort.direction, |a, b| match sort.key {
                BillSortKey::BillNumber => a.bill_number.cmp(&b.bill_number),
                BillSortKey::Retailer => a.retailer.name.cmp(&b.retailer.name),
                BillSortKey::IssueDate => a.issue_date.cmp(&b.issue_date),
                BillSortKey::DueDate => a.due_date.cmp(&b.due_date),
                BillSortKey::Total => a.total.cmp(&b.total),
                BillSortKey::Status => a.status.as_str().cmp(b.status.as_str()),
            });
        }
        rows
    }
}

/// Summary cards above the billing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BillStats {
    pub count: usize,
    pub total_billed: Money,
    pub total_paid: Money,
    pub outstanding: Money,
    pub overdue: usize,
}

impl BillStats {
    #[must_use]
    pub fn of(bills: &[Bill]) -> Self {
        let total_billed: Money = bills.iter().map(|b| b.total).sum();
        let total_paid: Money = bills.iter().filter(|b| b.is_paid()).map(|b| b.total).sum();
        Self {
            count: bills.len(),
            total_billed,
            total_paid,
            outstanding: total_billed - total_paid,
            overdue: bills.iter().filter(|b| b.status == BillStatus::Overdue).count(),
        }
    }
}
