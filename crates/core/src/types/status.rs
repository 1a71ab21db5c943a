//! Status and category enums shared by the back office.
//!
//! Each enum carries its wire form (`as_str`, used by serde, query strings
//! and form values), a human `label` and a `badge_class` with the Tailwind
//! classes the list pages use for status pills.

use serde::{Deserialize, Serialize};

/// Purchase order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Delivered,
    InTransit,
    Processing,
    PendingApproval,
    Cancelled,
}

impl OrderStatus {
    /// Every status, in the order the filter dropdown lists them.
    pub const ALL: [Self; 5] = [
        Self::Delivered,
        Self::InTransit,
        Self::Processing,
        Self::PendingApproval,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Delivered => "delivered",
            Self::InTransit => "in-transit",
            Self::Processing => "processing",
            Self::PendingApproval => "pending-approval",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Delivered => "Delivered",
            Self::InTransit => "In Transit",
            Self::Processing => "Processing",
            Self::PendingApproval => "Pending Approval",
            Self::Cancelled => "Cancelled",
        }
    }

    #[must_use]
    pub const fn badge_class(&self) -> &'static str {
        match self {
            Self::Delivered => "bg-green-100 text-green-800",
            Self::InTransit => "bg-blue-100 text-blue-800",
            Self::Processing => "bg-yellow-100 text-yellow-800",
            Self::PendingApproval => "bg-purple-100 text-purple-800",
            Self::Cancelled => "bg-red-100 text-red-800",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("invalid order status: {s}"))
    }
}

/// Payment status of a bill issued to a retailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Paid,
    #[default]
    Pending,
    Overdue,
}

impl BillStatus {
    pub const ALL: [Self; 3] = [Self::Paid, Self::Pending, Self::Overdue];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Pending => "pending",
            Self::Overdue => "overdue",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Pending => "Pending",
            Self::Overdue => "Overdue",
        }
    }

    #[must_use]
    pub const fn badge_class(&self) -> &'static str {
        match self {
            Self::Paid => "bg-green-100 text-green-800",
            Self::Pending => "bg-yellow-100 text-yellow-800",
            Self::Overdue => "bg-red-100 text-red-800",
        }
    }
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BillStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paid" => Ok(Self::Paid),
            "pending" => Ok(Self::Pending),
            "overdue" => Ok(Self::Overdue),
            _ => Err(format!("invalid bill status: {s}")),
        }
    }
}

/// Processing state of a damage or return claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReturnStatus {
    #[default]
    Pending,
    Processed,
    Rejected,
}

impl ReturnStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::Processed, Self::Rejected];

    /// Wire form and label are the same word for returns.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processed => "Processed",
            Self::Rejected => "Rejected",
        }
    }

    #[must_use]
    pub const fn badge_class(&self) -> &'static str {
        match self {
            Self::Pending => "bg-yellow-100 text-yellow-800",
            Self::Processed => "bg-green-100 text-green-800",
            Self::Rejected => "bg-red-100 text-red-800",
        }
    }
}

impl std::fmt::Display for ReturnStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReturnStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("invalid return status: {s}"))
    }
}

/// Why goods came back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnIssue {
    #[serde(rename = "Damaged in Transit")]
    DamagedInTransit,
    #[serde(rename = "Defective Product")]
    DefectiveProduct,
    #[serde(rename = "Wrong Item")]
    WrongItem,
    #[serde(rename = "Customer Changed Mind")]
    CustomerChangedMind,
    Other,
}

impl ReturnIssue {
    pub const ALL: [Self; 5] = [
        Self::DamagedInTransit,
        Self::DefectiveProduct,
        Self::WrongItem,
        Self::CustomerChangedMind,
        Self::Other,
    ];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::DamagedInTransit => "Damaged in Transit",
            Self::DefectiveProduct => "Defective Product",
            Self::WrongItem => "Wrong Item",
            Self::CustomerChangedMind => "Customer Changed Mind",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for ReturnIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ReturnIssue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|issue| issue.label() == s)
            .ok_or_else(|| format!("invalid return issue: {s}"))
    }
}

/// What kind of record an archive entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveKind {
    Product,
    Order,
    Invoice,
    Supplier,
    License,
}

impl ArchiveKind {
    pub const ALL: [Self; 5] = [
        Self::Product,
        Self::Order,
        Self::Invoice,
        Self::Supplier,
        Self::License,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Order => "order",
            Self::Invoice => "invoice",
            Self::Supplier => "supplier",
            Self::License => "license",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::Order => "Order",
            Self::Invoice => "Invoice",
            Self::Supplier => "Supplier",
            Self::License => "License",
        }
    }

    #[must_use]
    pub const fn badge_class(&self) -> &'static str {
        match self {
            Self::Product => "bg-blue-100 text-blue-800",
            Self::Order => "bg-green-100 text-green-800",
            Self::Invoice => "bg-purple-100 text-purple-800",
            Self::Supplier => "bg-yellow-100 text-yellow-800",
            Self::License => "bg-pink-100 text-pink-800",
        }
    }
}

impl std::fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ArchiveKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("invalid archive kind: {s}"))
    }
}

/// Severity of a notification in the header panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Warning,
    Info,
    Success,
}

impl NotificationLevel {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Success => "success",
        }
    }

    #[must_use]
    pub const fn badge_class(&self) -> &'static str {
        match self {
            Self::Warning => "bg-yellow-100 text-yellow-800",
            Self::Info => "bg-blue-100 text-blue-800",
            Self::Success => "bg-green-100 text-green-800",
        }
    }
}

impl std::fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a user signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthProvider {
    Google,
    Phone,
    Password,
    Mock,
}

impl std::fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Google => write!(f, "google"),
            Self::Phone => write!(f, "phone"),
            Self::Password => write!(f, "password"),
            Self::Mock => write!(f, "mock"),
        }
    }
}
