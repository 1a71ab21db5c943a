//! Damage and returns list.

use serde::Deserialize;

use stockinvent_core::{Money, ReturnStatus};

use super::{matches_search, non_blank};
use crate::models::DamageReturn;

/// Query string of `/damage-returns` and its CSV export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReturnsQuery {
    pub q: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReturnFilter {
    pub search: String,
    pub status: Option<ReturnStatus>,
}

impl ReturnFilter {
    #[must_use]
    pub fn from_query(query: &ReturnsQuery) -> Self {
        Self {
            search: query.q.as_deref().unwrap_or_default().trim().to_string(),
            status: non_blank(query.status.as_deref()).and_then(|s| s.parse().ok()),
        }
    }

    /// Query value of the status select; empty is "all".
    #[must_use]
    pub fn status_value(&self) -> &'static str {
        self.status.as_ref().map_or("", ReturnStatus::as_str)
    }

    #[must_use]
    pub fn matches(&self, claim: &DamageReturn) -> bool {
        matches_search(
            &self.search,
            &[
                claim.invoice_no.as_str(),
                claim.product.as_str(),
                claim.issue.label(),
            ],
        ) && self.status.is_none_or(|status| claim.status == status)
    }

    /// Newest claims stay first.
    #[must_use]
    pub fn apply(&self, claims: Vec<DamageReturn>) -> Vec<DamageReturn> {
        claims.into_iter().filter(|c| self.matches(c)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReturnStats {
    pub total: usize,
    pub pending: usize,
    pub processed: usize,
    pub rejected: usize,
    /// Refunds still owed on pending claims.
    pub pending_refunds: Money,
}

impl ReturnStats {
    #[must_use]
    pub fn of(claims: &[DamageReturn]) -> Self {
        let count = |status: ReturnStatus| claims.iter().filter(|c| c.status == status).count();
        Self {
            total: claims.len(),
            pending: count(ReturnStatus::Pending),
            processed: count(ReturnStatus::Processed),
            rejected: count(ReturnStatus::Rejected),
            pending_refunds: claims
                .iter()
                .filter(|c| c.status == ReturnStatus::Pending)
                .map(|c| c.refund_amount)
                .sum(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::fixtures;

    #[test]
    fn test_empty_status_is_all() {
        let filter = ReturnFilter::from_query(&ReturnsQuery::default());
        assert_eq!(filter.status, None);
        assert_eq!(filter.status_value(), "");
        assert_eq!(
            filter.apply(fixtures::damage_returns()).len(),
            fixtures::damage_returns().len()
        );
    }

    #[test]
    fn test_status_is_case_insensitive() {
        let filter = ReturnFilter::from_query(&ReturnsQuery {
            q: None,
            status: Some("pending".to_string()),
        });
        assert_eq!(filter.status, Some(ReturnStatus::Pending));
        assert!(
            filter
                .apply(fixtures::damage_returns())
                .iter()
                .all(|c| c.status == ReturnStatus::Pending)
        );
    }

    #[test]
    fn test_search_matches_issue_label() {
        let claims = fixtures::damage_returns();
        let issue = claims.first().unwrap().issue;
        let filter = ReturnFilter::from_query(&ReturnsQuery {
            q: Some(issue.label().to_lowercase()),
            status: None,
        });
        let rows = filter.apply(claims);
        assert!(rows.iter().any(|c| c.issue == issue));
    }

    #[test]
    fn test_stats() {
        let claims = fixtures::damage_returns();
        let stats = ReturnStats::of(&claims);
        assert_eq!(stats.pending + stats.processed + stats.rejected, stats.total);
        let owed: Money = claims
            .iter()
            .filter(|c| c.status == ReturnStatus::Pending)
            .map(|c| c.refund_amount)
            .sum();
        assert_eq!(stats.pending_refunds, owed);
    }
}
