//! Seed data loaded into the stores on first start.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use stockinvent_core::{
    ArchiveEntryId, BillId, BillStatus, Money, OrderId, OrderStatus, ProductId, RetailerId,
    ReturnId, ReturnIssue, ReturnStatus,
};

use crate::models::{
    ArchiveEntry, ArchivedInvoice, ArchivedLicense, ArchivedOrder, ArchivedProduct,
    ArchivedRecord, ArchivedSupplier, Bill, BillItem, DamageReturn, OrderItem, Product,
    PurchaseOrder, Retailer, ShipmentEvent,
};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn usd(cents: i64) -> Money {
    Money::from_cents(cents)
}

/// The starter catalogue, stamped with `now`.
#[must_use]
pub fn products(now: DateTime<Utc>) -> Vec<Product> {
    const CATALOGUE: [(&str, &str, &str, u32, i64, &str); 15] = [
        ("PRD-001", "Laptop Dell XPS 15", "Electronics", 12, 149_999, "Dell Inc."),
        ("PRD-002", "Office Chair", "Furniture", 25, 19_999, "Office Furniture Co."),
        ("PRD-003", "Wireless Mouse", "Electronics", 42, 4_999, "Logitech"),
        ("PRD-004", "Desk Lamp", "Office Supplies", 18, 3_999, "LightingX Corp"),
        ("PRD-005", "Filing Cabinet", "Storage", 7, 14_999, "StoragePlus Inc."),
        ("PRD-006", "Mechanical Keyboard", "Electronics", 30, 12_999, "Razer"),
        ("PRD-007", "Monitor 27\"", "Electronics", 15, 29_999, "LG Electronics"),
        ("PRD-008", "Whiteboard", "Office Supplies", 10, 8_999, "Office Depot"),
        ("PRD-009", "Ergonomic Desk", "Furniture", 8, 59_999, "ErgoWorks"),
        ("PRD-010", "Paper Shredder", "Office Supplies", 12, 7_999, "Office Depot"),
        ("PRD-011", "External SSD 1TB", "Electronics", 20, 15_999, "Samsung"),
        ("PRD-012", "Bookshelf", "Storage", 5, 17_999, "IKEA"),
        ("PRD-013", "Wireless Headphones", "Electronics", 18, 24_999, "Sony"),
        ("PRD-014", "Office Phone", "Electronics", 9, 12_999, "Cisco"),
        ("PRD-015", "Conference Table", "Furniture", 3, 89_999, "Office Furniture Co."),
    ];

    CATALOGUE
        .iter()
        .enumerate()
        .map(
            |(index, &(code, name, category, quantity, cents, supplier))| Product {
                id: ProductId::new((index + 1).to_string()),
                product_id: code.to_string(),
                sku: None,
                name: name.to_string(),
                category: category.to_string(),
                quantity,
                price: Money::from_cents(cents),
                supplier: supplier.to_string(),
                location: None,
                reorder_level: None,
                purchase_date: None,
                description: String::new(),
                is_active: true,
                created_at: now,
                updated_at: now,
            },
        )
        .collect()
}

fn specs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn item(
    name: &str,
    quantity: u32,
    price: Money,
    unit_of_measure: &str,
    specifications: &[(&str, &str)],
) -> OrderItem {
    OrderItem {
        name: name.to_string(),
        quantity,
        price,
        unit_of_measure: unit_of_measure.to_string(),
        specifications: specs(specifications),
    }
}

fn event(date: NaiveDate, status: &str, details: &str) -> ShipmentEvent {
    ShipmentEvent {
        date,
        status: status.to_string(),
        details: details.to_string(),
    }
}

const RECEIVED: &str = "Order received and processing begun";
const PACKED: &str = "Items packed and awaiting pickup";

/// Purchase orders placed with suppliers.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn purchase_orders() -> Vec<PurchaseOrder> {
    vec![
        PurchaseOrder {
            id: OrderId::new("PO-2023-001"),
            supplier: "Tech Components Inc.".to_string(),
            order_date: ymd(2023, 11, 15),
            total: usd(1_245_075),
            status: OrderStatus::Delivered,
            expected_delivery: Some(ymd(2023, 11, 22)),
            actual_delivery: Some(ymd(2023, 11, 21)),
            items: vec![
                item("Dell XPS Laptop", 5, usd(129_999), "unit", &[
                    ("processor", "Intel i7"),
                    ("ram", "16GB"),
                    ("storage", "512GB SSD"),
                    ("dimensions", "13.3\""),
                    ("warranty", "3 years"),
                ]),
                item("Wireless Mouse", 10, usd(4_999), "unit", &[
                    ("connectivity", "Bluetooth"),
                    ("battery", "AA x2"),
                    ("dimensions", "4.5\" x 2.3\" x 1.5\""),
                    ("warranty", "1 year"),
                ]),
                item("USB-C Docking Station", 5, usd(18_999), "unit", &[
                    ("ports", "6 USB, 2 HDMI, 1 Ethernet"),
                    ("power", "100W"),
                    ("dimensions", "6.7\" x 3.1\" x 1.1\""),
                    ("warranty", "2 years"),
                ]),
            ],
            shipment: vec![
                event(ymd(2023, 11, 16), "Processing", RECEIVED),
                event(ymd(2023, 11, 17), "Packed", PACKED),
                event(
                    ymd(2023, 11, 18),
                    "Shipped",
                    "Package picked up by courier - Tracking #TR5689214",
                ),
                event(
                    ymd(2023, 11, 21),
                    "Delivered",
                    "Package delivered and signed by J. Smith",
                ),
            ],
            warehouse: "Central Distribution".to_string(),
            notes: "First order from this supplier, excellent packaging and on-time delivery."
                .to_string(),
        },
        PurchaseOrder {
            id: OrderId::new("PO-2023-002"),
            supplier: "Office Furniture Co.".to_string(),
            order_date: ymd(2023, 11, 20),
            total: usd(578_050),
            status: OrderStatus::InTransit,
            expected_delivery: Some(ymd(2023, 12, 5)),
            actual_delivery: None,
            items: vec![
                item("Executive Chair", 3, usd(59_999), "unit", &[
                    ("material", "Leather"),
                    ("color", "Black"),
                    ("adjustable", "Yes"),
                    ("dimensions", "28\"W x 30\"D x 45\"H"),
                    ("warranty", "5 years"),
                ]),
                item("Conference Table", 1, usd(249_999), "unit", &[
                    ("material", "Oak"),
                    ("color", "Dark Brown"),
                    ("seating", "10 persons"),
                    ("dimensions", "96\"L x 48\"W x 30\"H"),
                    ("warranty", "7 years"),
                ]),
                item("Filing Cabinet", 5, usd(29_999), "unit", &[
                    ("material", "Steel"),
                    ("drawers", "4"),
                    ("locking", "Yes"),
                    ("dimensions", "18\"W x 25\"D x 52\"H"),
                    ("warranty", "10 years"),
                ]),
            ],
            shipment: vec![
                event(ymd(2023, 11, 21), "Processing", RECEIVED),
                event(ymd(2023, 11, 25), "Packed", PACKED),
                event(
                    ymd(2023, 11, 30),
                    "Shipped",
                    "Package picked up by freight service - Tracking #FR3385721",
                ),
            ],
            warehouse: "South Storage Facility".to_string(),
            notes: "Bulk furniture order, requested padded packaging for sensitive items."
                .to_string(),
        },
        PurchaseOrder {
            id: OrderId::new("PO-2023-003"),
            supplier: "Office Supplies Direct".to_string(),
            order_date: ymd(2023, 11, 25),
            total: usd(182_535),
            status: OrderStatus::Processing,
            expected_delivery: Some(ymd(2023, 12, 10)),
            actual_delivery: None,
            items: vec![
                item("Printer Paper", 50, usd(999), "ream", &[
                    ("weight", "20lb"),
                    ("sheets", "500"),
                    ("brightness", "96"),
                    ("size", "8.5\" x 11\""),
                ]),
                item("Ballpoint Pens", 100, usd(299), "box", &[
                    ("color", "Blue"),
                    ("quantity", "12/box"),
                    ("type", "Retractable"),
                    ("point", "Medium"),
                ]),
                item("Toner Cartridges", 10, usd(8_999), "unit", &[
                    ("compatibility", "HP LaserJet Pro"),
                    ("yield", "2,500 pages"),
                    ("color", "Black"),
                    ("warranty", "90 days"),
                ]),
            ],
            shipment: vec![event(ymd(2023, 11, 26), "Processing", RECEIVED)],
            warehouse: "East Coast Distribution".to_string(),
            notes: "Standing order for monthly office supplies.".to_string(),
        },
        PurchaseOrder {
            id: OrderId::new("PO-2023-004"),
            supplier: "Electronics Wholesale".to_string(),
            order_date: ymd(2023, 11, 5),
            total: usd(897_525),
            status: OrderStatus::PendingApproval,
            expected_delivery: None,
            actual_delivery: None,
            items: vec![
                item("Smart TV 55\"", 5, usd(79_999), "unit", &[
                    ("resolution", "4K UHD"),
                    ("connections", "HDMI x3, USB x2"),
                    ("smart", "Android TV"),
                    ("dimensions", "48.8\"W x 28.1\"H x 3.1\"D"),
                    ("warranty", "2 years"),
                ]),
                item("Sound Bar", 5, usd(34_999), "unit", &[
                    ("channels", "5.1"),
                    ("connectivity", "Bluetooth, HDMI, Optical"),
                    ("power", "500W"),
                    ("dimensions", "40\"W x 3\"H x 4\"D"),
                    ("warranty", "1 year"),
                ]),
                item("Wireless Headphones", 10, usd(22_999), "unit", &[
                    ("type", "Over-ear"),
                    ("noise_canceling", "Yes"),
                    ("battery", "30 hours"),
                    ("connectivity", "Bluetooth 5.0"),
                    ("warranty", "1 year"),
                ]),
            ],
            shipment: Vec::new(),
            warehouse: "West Region Warehouse".to_string(),
            notes: "Awaiting manager approval for budget allocation.".to_string(),
        },
        PurchaseOrder {
            id: OrderId::new("PO-2023-005"),
            supplier: "Industrial Equipment Co.".to_string(),
            order_date: ymd(2023, 10, 10),
            total: usd(1_578_550),
            status: OrderStatus::Cancelled,
            expected_delivery: Some(ymd(2023, 10, 30)),
            actual_delivery: None,
            items: vec![
                item("Forklift", 1, usd(1_250_000), "unit", &[
                    ("capacity", "5000 lbs"),
                    ("lift", "188\""),
                    ("power", "Electric"),
                    ("dimensions", "8'L x 4'W x 7'H"),
                    ("warranty", "2 years"),
                ]),
                item("Pallet Jack", 3, usd(69_950), "unit", &[
                    ("capacity", "5500 lbs"),
                    ("fork", "48\""),
                    ("wheels", "Polyurethane"),
                    ("dimensions", "63\"L x 27\"W x 47\"H"),
                    ("warranty", "1 year"),
                ]),
                item("Safety Vests", 20, usd(2_499), "unit", &[
                    ("standard", "ANSI Class 2"),
                    ("color", "High-vis Yellow"),
                    ("reflective", "Yes"),
                    ("size", "One Size Fits Most"),
                ]),
            ],
            shipment: vec![
                event(ymd(2023, 10, 12), "Processing", RECEIVED),
                event(
                    ymd(2023, 10, 20),
                    "Cancelled",
                    "Order cancelled due to supplier inventory shortages",
                ),
            ],
            warehouse: "North Distribution Center".to_string(),
            notes: "Order cancelled due to extended lead time on forklift. Will reorder when back in stock."
                .to_string(),
        },
    ]
}

fn retailer(id: &str, name: &str, address: &str, phone: &str, email: &str) -> Retailer {
    Retailer {
        id: RetailerId::new(id),
        name: name.to_string(),
        address: address.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
    }
}

fn line(product_id: &str, name: &str, quantity: u32, unit_price: Money) -> BillItem {
    BillItem {
        product_id: product_id.to_string(),
        name: name.to_string(),
        quantity,
        unit_price,
        total: unit_price * quantity,
    }
}

/// Bills issued to retailers.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn bills() -> Vec<Bill> {
    vec![
        Bill {
            id: BillId::new("B001"),
            bill_number: "INV-2023-001".to_string(),
            retailer: retailer(
                "R001",
                "SuperMart",
                "123 Main St, New York, NY",
                "212-555-1234",
                "accounts@supermart.com",
            ),
            items: vec![
                line("PRD-001", "Laptop Dell XPS 15", 5, usd(149_999)),
                line("PRD-006", "Mechanical Keyboard", 10, usd(12_999)),
            ],
            issue_date: ymd(2023, 10, 15),
            due_date: ymd(2023, 11, 15),
            subtotal: usd(879_985),
            tax: usd(70_399),
            discount: usd(50_000),
            total: usd(900_384),
            status: BillStatus::Paid,
            payment_date: Some(ymd(2023, 11, 10)),
            notes: "Paid via bank transfer".to_string(),
        },
        Bill {
            id: BillId::new("B002"),
            bill_number: "INV-2023-002".to_string(),
            retailer: retailer(
                "R002",
                "Tech Corner",
                "456 Oak Ave, Chicago, IL",
                "312-555-7890",
                "billing@techcorner.com",
            ),
            items: vec![
                line("PRD-007", "Monitor 27\"", 8, usd(29_999)),
                line("PRD-003", "Wireless Mouse", 15, usd(4_999)),
                line("PRD-013", "Wireless Headphones", 5, usd(24_999)),
            ],
            issue_date: ymd(2023, 11, 5),
            due_date: ymd(2023, 12, 5),
            subtotal: usd(439_972),
            tax: usd(35_198),
            discount: usd(20_000),
            total: usd(455_170),
            status: BillStatus::Pending,
            payment_date: None,
            notes: "Net 30 terms".to_string(),
        },
        Bill {
            id: BillId::new("B003"),
            bill_number: "INV-2023-003".to_string(),
            retailer: retailer(
                "R003",
                "Office Central",
                "789 Business Blvd, Austin, TX",
                "512-555-4321",
                "finance@officecentral.com",
            ),
            items: vec![
                line("PRD-002", "Office Chair", 12, usd(19_999)),
                line("PRD-005", "Filing Cabinet", 4, usd(14_999)),
                line("PRD-009", "Ergonomic Desk", 3, usd(59_999)),
            ],
            issue_date: ymd(2023, 11, 20),
            due_date: ymd(2023, 12, 20),
            subtotal: usd(479_981),
            tax: usd(38_398),
            discount: usd(30_000),
            total: usd(488_379),
            status: BillStatus::Overdue,
            payment_date: None,
            notes: "Second reminder sent on 2023-12-25".to_string(),
        },
        Bill {
            id: BillId::new("B004"),
            bill_number: "INV-2023-004".to_string(),
            retailer: retailer(
                "R004",
                "TechWorld",
                "101 Silicon Ave, San Francisco, CA",
                "415-555-9876",
                "accounts@techworld.com",
            ),
            items: vec![
                line("PRD-011", "External SSD 1TB", 10, usd(15_999)),
                line("PRD-014", "Office Phone", 6, usd(12_999)),
            ],
            issue_date: ymd(2023, 12, 1),
            due_date: ymd(2024, 1, 1),
            subtotal: usd(237_984),
            tax: usd(19_039),
            discount: usd(10_000),
            total: usd(247_023),
            status: BillStatus::Paid,
            payment_date: Some(ymd(2023, 12, 28)),
            notes: "Paid via credit card".to_string(),
        },
        Bill {
            id: BillId::new("B005"),
            bill_number: "INV-2023-005".to_string(),
            retailer: retailer(
                "R005",
                "Furniture Plus",
                "222 Comfort St, Miami, FL",
                "305-555-6543",
                "payments@furnitureplus.com",
            ),
            items: vec![
                line("PRD-015", "Conference Table", 2, usd(89_999)),
                line("PRD-002", "Office Chair", 8, usd(19_999)),
            ],
            issue_date: ymd(2023, 12, 15),
            due_date: ymd(2024, 1, 15),
            subtotal: usd(339_990),
            tax: usd(27_200),
            discount: usd(15_000),
            total: usd(352_190),
            status: BillStatus::Pending,
            payment_date: None,
            notes: "Net 30 terms".to_string(),
        },
    ]
}

/// Damage and return claims.
#[must_use]
pub fn damage_returns() -> Vec<DamageReturn> {
    #[allow(clippy::type_complexity)]
    const CLAIMS: [(
        i32,
        &str,
        (u32, u32),
        (u32, u32),
        ReturnIssue,
        &str,
        u32,
        (u32, u32),
        &str,
        ReturnStatus,
        i64,
    ); 5] = [
        (
            1,
            "INV-2023-001",
            (9, 15),
            (9, 18),
            ReturnIssue::DamagedInTransit,
            "Office Chair",
            2,
            (9, 22),
            "Product arrived with broken armrests",
            ReturnStatus::Pending,
            19_998,
        ),
        (
            2,
            "INV-2023-015",
            (9, 20),
            (9, 23),
            ReturnIssue::WrongItem,
            "Desk Lamp",
            1,
            (9, 25),
            "Received black lamp instead of white",
            ReturnStatus::Processed,
            4_599,
        ),
        (
            3,
            "INV-2023-022",
            (10, 1),
            (10, 4),
            ReturnIssue::DefectiveProduct,
            "Wireless Mouse",
            3,
            (10, 8),
            "Connectivity issues with all three mice",
            ReturnStatus::Rejected,
            8_997,
        ),
        (
            4,
            "INV-2023-030",
            (10, 10),
            (10, 13),
            ReturnIssue::CustomerChangedMind,
            "Whiteboard",
            1,
            (10, 15),
            "Customer found a cheaper alternative",
            ReturnStatus::Pending,
            12_000,
        ),
        (
            5,
            "INV-2023-042",
            (10, 18),
            (10, 21),
            ReturnIssue::DamagedInTransit,
            "Filing Cabinet",
            1,
            (10, 24),
            "Dented on the side during shipping",
            ReturnStatus::Processed,
            17_550,
        ),
    ];

    CLAIMS
        .iter()
        .map(
            |&(id, invoice, ordered, delivered, issue, product, quantity, returned, description, status, cents)| {
                DamageReturn {
                    id: ReturnId::new(id),
                    invoice_no: invoice.to_string(),
                    order_date: ymd(2023, ordered.0, ordered.1),
                    delivery_date: ymd(2023, delivered.0, delivered.1),
                    issue,
                    product: product.to_string(),
                    quantity,
                    return_date: ymd(2023, returned.0, returned.1),
                    description: description.to_string(),
                    status,
                    refund_amount: Money::from_cents(cents),
                }
            },
        )
        .collect()
}

fn entry(
    id: &str,
    archive_date: NaiveDate,
    reason: &str,
    archived_by: &str,
    record: ArchivedRecord,
) -> ArchiveEntry {
    ArchiveEntry {
        id: ArchiveEntryId::new(id),
        archive_date,
        reason: reason.to_string(),
        archived_by: archived_by.to_string(),
        record,
    }
}

fn archived_product(
    product_id: &str,
    name: &str,
    category: &str,
    price: Money,
    supplier: &str,
    discontinued: bool,
) -> ArchivedRecord {
    ArchivedRecord::Product(ArchivedProduct {
        product_id: product_id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        last_quantity: 0,
        price,
        supplier: supplier.to_string(),
        discontinued,
        ..ArchivedProduct::default()
    })
}

#[allow(clippy::too_many_arguments)]
fn archived_license(
    license_id: &str,
    name: &str,
    category: &str,
    purchase_date: NaiveDate,
    expiry_date: Option<NaiveDate>,
    seats: u32,
    cost: Money,
    vendor: &str,
) -> ArchivedRecord {
    ArchivedRecord::License(ArchivedLicense {
        license_id: license_id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        purchase_date,
        expiry_date,
        seats,
        cost,
        vendor: vendor.to_string(),
    })
}

const ZERO_INVENTORY: &str = "Zero inventory for over 90 days";
const OLD_PAID_INVOICE: &str = "Invoice paid and over 12 months old";

/// Archived products, orders, invoices, suppliers and licenses.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn archive_entries() -> Vec<ArchiveEntry> {
    vec![
        entry(
            "AP001",
            ymd(2023, 9, 15),
            "Discontinued product",
            "John Doe",
            archived_product("PRD-120", "Wireless Earbuds", "Electronics", usd(8_999), "Audio Tech Inc.", true),
        ),
        entry(
            "AP002",
            ymd(2023, 10, 22),
            ZERO_INVENTORY,
            "Jane Smith",
            archived_product("PRD-098", "Desktop Computer", "Electronics", usd(89_999), "Tech Solutions Ltd.", false),
        ),
        entry(
            "AP003",
            ymd(2023, 11, 5),
            ZERO_INVENTORY,
            "John Doe",
            archived_product("PRD-056", "Executive Desk", "Furniture", usd(44_999), "Office Furniture Co.", false),
        ),
        entry(
            "AO001",
            ymd(2023, 6, 10),
            "Order cancelled",
            "Jane Smith",
            ArchivedRecord::Order(ArchivedOrder {
                order_number: "PO-2023-027".to_string(),
                warehouse: "Main Warehouse".to_string(),
                order_date: ymd(2022, 12, 5),
                total: usd(257_895),
                status: OrderStatus::Cancelled,
            }),
        ),
        entry(
            "AO002",
            ymd(2023, 7, 20),
            "Order completed over 12 months ago",
            "Mike Johnson",
            ArchivedRecord::Order(ArchivedOrder {
                order_number: "PO-2022-156".to_string(),
                warehouse: "East Coast Storage".to_string(),
                order_date: ymd(2022, 7, 18),
                total: usd(549_050),
                status: OrderStatus::Delivered,
            }),
        ),
        entry(
            "AI001",
            ymd(2023, 6, 20),
            OLD_PAID_INVOICE,
            "John Doe",
            ArchivedRecord::Invoice(ArchivedInvoice {
                invoice_number: "INV-2022-089".to_string(),
                retailer: "ElectroMart".to_string(),
                issue_date: ymd(2022, 6, 15),
                total: usd(897_525),
                status: BillStatus::Paid,
            }),
        ),
        entry(
            "AI002",
            ymd(2023, 8, 5),
            OLD_PAID_INVOICE,
            "Jane Smith",
            ArchivedRecord::Invoice(ArchivedInvoice {
                invoice_number: "INV-2022-103".to_string(),
                retailer: "Office Central".to_string(),
                issue_date: ymd(2022, 8, 2),
                total: usd(329_575),
                status: BillStatus::Paid,
            }),
        ),
        entry(
            "AS001",
            ymd(2023, 5, 12),
            "No orders placed in 18 months",
            "Mike Johnson",
            ArchivedRecord::Supplier(ArchivedSupplier {
                name: "Global Tech Imports".to_string(),
                contact: "David Chen".to_string(),
                email: "david@globaltechimports.com".to_string(),
                phone: "123-456-7890".to_string(),
                status: "inactive".to_string(),
            }),
        ),
        entry(
            "AL001",
            ymd(2022, 10, 5),
            "License expired and not renewed",
            "John Doe",
            archived_license(
                "LIC-2022-001",
                "Microsoft Office 365",
                "Software",
                ymd(2021, 8, 15),
                Some(ymd(2022, 8, 14)),
                50,
                usd(499_950),
                "Microsoft",
            ),
        ),
        entry(
            "AL002",
            ymd(2022, 6, 30),
            "Switched to alternative software solution",
            "Jane Smith",
            archived_license(
                "LIC-2022-002",
                "Adobe Creative Cloud",
                "Software",
                ymd(2021, 5, 20),
                Some(ymd(2022, 5, 19)),
                10,
                usd(359_988),
                "Adobe",
            ),
        ),
        entry(
            "AL003",
            ymd(2022, 4, 15),
            "Department restructuring, no longer needed",
            "Mike Johnson",
            archived_license(
                "LIC-2022-003",
                "Autodesk AutoCAD",
                "Software",
                ymd(2021, 3, 10),
                Some(ymd(2022, 3, 9)),
                5,
                usd(749_500),
                "Autodesk",
            ),
        ),
        entry(
            "AL004",
            ymd(2023, 1, 10),
            "Server hardware replaced, license no longer needed",
            "John Doe",
            archived_license(
                "LIC-2022-004",
                "Windows Server 2019",
                "Operating System",
                ymd(2020, 11, 25),
                None,
                2,
                usd(179_998),
                "Microsoft",
            ),
        ),
        entry(
            "AL005",
            ymd(2023, 2, 15),
            "Migrated to different CRM solution",
            "Jane Smith",
            archived_license(
                "LIC-2022-005",
                "Salesforce Enterprise",
                "SaaS",
                ymd(2022, 1, 1),
                Some(ymd(2022, 12, 31)),
                25,
                usd(1_875_000),
                "Salesforce",
            ),
        ),
    ]
}
