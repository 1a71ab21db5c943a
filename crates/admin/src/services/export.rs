//! CSV export of the filtered list views.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{ArchiveEntry, Bill, DamageReturn, Product, PurchaseOrder};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Download name, e.g. `inventory-2024-03-31.csv`.
#[must_use]
pub fn filename(prefix: &str, today: NaiveDate) -> String {
    format!("{prefix}-{today}.csv")
}

fn write_csv<I>(headers: &[&str], rows: I) -> Result<Vec<u8>, ExportError>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))
}

fn date_or_blank(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

/// # Errors
///
/// Returns `ExportError` if the CSV writer fails.
pub fn inventory(products: &[Product]) -> Result<Vec<u8>, ExportError> {
    write_csv(
        &["Product ID", "Product Name", "Category", "Quantity", "Price", "Supplier"],
        products.iter().map(|p| {
            vec![
                p.product_id.clone(),
                p.name.clone(),
                p.category.clone(),
                p.quantity.to_string(),
                p.price.to_plain_string(),
                p.supplier.clone(),
            ]
        }),
    )
}

/// # Errors
///
/// Returns `ExportError` if the CSV writer fails.
pub fn orders(orders: &[PurchaseOrder]) -> Result<Vec<u8>, ExportError> {
    write_csv(
        &[
            "Order ID",
            "Supplier",
            "Order Date",
            "Expected Delivery",
            "Actual Delivery",
            "Total",
            "Status",
            "Warehouse",
        ],
        orders.iter().map(|o| {
            vec![
                o.id.to_string(),
                o.supplier.clone(),
                o.order_date.to_string(),
                date_or_blank(o.expected_delivery),
                date_or_blank(o.actual_delivery),
                o.total.to_plain_string(),
                o.status.label().to_string(),
                o.warehouse.clone(),
            ]
        }),
    )
}

/// # Errors
///
/// Returns `ExportError` if the CSV writer fails.
pub fn bills(bills: &[Bill]) -> Result<Vec<u8>, ExportError> {
    write_csv(
        &[
            "Bill Number",
            "Retailer",
            "Issue Date",
            "Due Date",
            "Subtotal",
            "Tax",
            "Discount",
            "Total",
            "Status",
            "Payment Date",
        ],
        bills.iter().map(|b| {
            vec![
                b.bill_number.clone(),
                b.retailer.name.clone(),
                b.issue_date.to_string(),
                b.due_date.to_string(),
                b.subtotal.to_plain_string(),
                b.tax.to_plain_string(),
                b.discount.to_plain_string(),
                b.total.to_plain_string(),
                b.status.label().to_string(),
                date_or_blank(b.payment_date),
            ]
        }),
    )
}

/// # Errors
///
/// Returns `ExportError` if the CSV writer fails.
pub fn returns(claims: &[DamageReturn]) -> Result<Vec<u8>, ExportError> {
    write_csv(
        &[
            "ID",
            "Invoice No",
            "Product",
            "Issue",
            "Quantity",
            "Order Date",
            "Delivery Date",
            "Return Date",
            "Status",
            "Refund Amount",
            "Description",
        ],
        claims.iter().map(|c| {
            vec![
                c.id.to_string(),
                c.invoice_no.clone(),
                c.product.clone(),
                c.issue.label().to_string(),
                c.quantity.to_string(),
                c.order_date.to_string(),
                c.delivery_date.to_string(),
                c.return_date.to_string(),
                c.status.to_string(),
                c.refund_amount.to_plain_string(),
                c.description.clone(),
            ]
        }),
    )
}

/// # Errors
///
/// Returns `ExportError` if the CSV writer fails.
pub fn archive(entries: &[ArchiveEntry]) -> Result<Vec<u8>, ExportError> {
    write_csv(
        &[
            "Archive ID",
            "Type",
            "Name",
            "Archive Date",
            "Reason",
            "Archived By",
            "Details",
        ],
        entries.iter().map(|e| {
            vec![
                e.id.to_string(),
                e.kind().label().to_string(),
                e.display_name().to_string(),
                e.archive_date.to_string(),
                e.reason.clone(),
                e.archived_by.clone(),
                e.record.summary(),
            ]
        }),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::db::fixtures;

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_inventory_columns_and_price_format() {
        let products = fixtures::products(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let csv = text(inventory(&products[..1]).unwrap());
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Product ID,Product Name,Category,Quantity,Price,Supplier")
        );
        assert_eq!(
            lines.next(),
            Some("PRD-001,Laptop Dell XPS 15,Electronics,12,$1499.99,Dell Inc.")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_fields_with_quotes_are_escaped() {
        let products = fixtures::products(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let monitor: Vec<Product> = products.into_iter().filter(|p| p.name.contains('"')).collect();
        let csv = text(inventory(&monitor).unwrap());
        assert!(csv.contains(r#""Monitor 27""""#));
    }

    #[test]
    fn test_one_row_per_record() {
        let orders = fixtures::purchase_orders();
        assert_eq!(text(self::orders(&orders).unwrap()).lines().count(), orders.len() + 1);

        let bills = fixtures::bills();
        assert_eq!(text(self::bills(&bills).unwrap()).lines().count(), bills.len() + 1);

        let claims = fixtures::damage_returns();
        let csv = text(returns(&claims).unwrap());
        assert!(csv.starts_with("ID,Invoice No,Product,Issue"));

        let entries = fixtures::archive_entries();
        let csv = text(archive(&entries).unwrap());
        assert!(csv.lines().nth(1).unwrap().starts_with(entries[0].id.as_str()));
    }

    #[test]
    fn test_empty_export_has_header_only() {
        assert_eq!(text(bills(&[]).unwrap()).lines().count(), 1);
    }

    #[test]
    fn test_filename() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        assert_eq!(filename("inventory", today), "inventory-2024-03-31.csv");
    }
}
