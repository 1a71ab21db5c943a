//! Archived records of every kind.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use stockinvent_core::{ArchiveEntryId, ArchiveKind, BillStatus, Money, OrderStatus, ProductId};

use super::Product;

/// An entry in the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    /// e.g. `AP001` for a product, `AL003` for a license.
    pub id: ArchiveEntryId,
    pub archive_date: NaiveDate,
    pub reason: String,
    pub archived_by: String,
    pub record: ArchivedRecord,
}

impl ArchiveEntry {
    #[must_use]
    pub const fn kind(&self) -> ArchiveKind {
        self.record.kind()
    }

    /// Name shown in the archive table.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.record.display_name()
    }

    /// Text the archive search matches against.
    #[must_use]
    pub fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.reason.as_str(), self.archived_by.as_str()];
        fields.extend(self.record.search_fields());
        fields
    }
}

/// The archived record, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ArchivedRecord {
    Product(ArchivedProduct),
    Order(ArchivedOrder),
    Invoice(ArchivedInvoice),
    Supplier(ArchivedSupplier),
    License(ArchivedLicense),
}

impl ArchivedRecord {
    #[must_use]
    pub const fn kind(&self) -> ArchiveKind {
        match self {
            Self::Product(_) => ArchiveKind::Product,
            Self::Order(_) => ArchiveKind::Order,
            Self::Invoice(_) => ArchiveKind::Invoice,
            Self::Supplier(_) => ArchiveKind::Supplier,
            Self::License(_) => ArchiveKind::License,
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Product(p) => &p.name,
            Self::Order(o) => &o.order_number,
            Self::Invoice(i) => &i.invoice_number,
            Self::Supplier(s) => &s.name,
            Self::License(l) => &l.name,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        match self {
            Self::Product(p) => vec![
                p.product_id.as_str(),
                p.name.as_str(),
                p.category.as_str(),
                p.supplier.as_str(),
            ],
            Self::Order(o) => vec![o.order_number.as_str(), o.warehouse.as_str()],
            Self::Invoice(i) => vec![i.invoice_number.as_str(), i.retailer.as_str()],
            Self::Supplier(s) => vec![s.name.as_str(), s.contact.as_str(), s.email.as_str()],
            Self::License(l) => vec![
                l.license_id.as_str(),
                l.name.as_str(),
                l.category.as_str(),
                l.vendor.as_str(),
            ],
        }
    }

    /// One-line description for the table's details column.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Product(p) => format!(
                "{} · {} · {} · last qty {}",
                p.product_id, p.category, p.price, p.last_quantity
            ),
            Self::Order(o) => format!("{} · {} · {}", o.warehouse, o.total, o.status.label()),
            Self::Invoice(i) => format!("{} · {} · {}", i.retailer, i.total, i.status.label()),
            Self::Supplier(s) => format!("{} · {} · {}", s.contact, s.email, s.phone),
            Self::License(l) => format!(
                "{} · {} seats · {} · expires {}",
                l.vendor,
                l.seats,
                l.cost,
                l.expiry_label()
            ),
        }
    }
}

/// A product taken out of the active catalogue.
///
/// Products archived by the sweep carry their full record so a restore
/// gives back what was removed. Hand-archived entries may only have the
/// display fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedProduct {
    pub product_id: String,
    pub name: String,
    pub category: String,
    pub last_quantity: u32,
    pub price: Money,
    pub supplier: String,
    #[serde(default)]
    pub discontinued: bool,
    /// Store key the product had in the catalogue.
    #[serde(default)]
    pub key: Option<ProductId>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub reorder_level: Option<u32>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ArchivedProduct {
    /// Snapshot a catalogue product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.product_id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            last_quantity: product.quantity,
            price: product.price,
            supplier: product.supplier.clone(),
            discontinued: !product.is_active,
            key: Some(product.id.clone()),
            sku: product.sku.clone(),
            location: product.location.clone(),
            reorder_level: product.reorder_level,
            purchase_date: product.purchase_date,
            description: product.description.clone(),
            created_at: Some(product.created_at),
        }
    }

    /// Rebuild the catalogue product. `updated_at` is `now` so the restored
    /// product is not swept again straight away; `fallback_key` is used
    /// when the entry has no key of its own.
    #[must_use]
    pub fn to_product(&self, fallback_key: ProductId, now: DateTime<Utc>) -> Product {
        Product {
            id: self.key.clone().unwrap_or(fallback_key),
            product_id: self.product_id.clone(),
            sku: self.sku.clone(),
            name: self.name.clone(),
            category: self.category.clone(),
            quantity: self.last_quantity,
            price: self.price,
            supplier: self.supplier.clone(),
            location: self.location.clone(),
            reorder_level: self.reorder_level,
            purchase_date: self.purchase_date,
            description: self.description.clone(),
            is_active: !self.discontinued,
            created_at: self.created_at.unwrap_or(now),
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedOrder {
    pub order_number: String,
    pub warehouse: String,
    pub order_date: NaiveDate,
    pub total: Money,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedInvoice {
    pub invoice_number: String,
    pub retailer: String,
    pub issue_date: NaiveDate,
    pub total: Money,
    pub status: BillStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedSupplier {
    pub name: String,
    pub contact: String,
    pub email: String,
    pub phone: String,
    pub status: String,
}

/// A software license that lapsed or was retired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedLicense {
    pub license_id: String,
    pub name: String,
    pub category: String,
    pub purchase_date: NaiveDate,
    /// `None` for perpetual licenses.
    pub expiry_date: Option<NaiveDate>,
    pub seats: u32,
    pub cost: Money,
    pub vendor: String,
}

impl ArchivedLicense {
    #[must_use]
    pub fn expiry_label(&self) -> String {
        self.expiry_date
            .map_or_else(|| "Perpetual".to_string(), |d| d.to_string())
    }
}
