//! Domain models for the back office.
//!
//! Records are flat serde structs. Form types hold the raw strings posted by
//! the HTML forms and validate them into typed inputs.

pub mod archive;
pub mod bill;
pub mod damage_return;
pub mod form;
pub mod order;
pub mod product;
pub mod session;

pub use archive::{
    ArchiveEntry, ArchivedInvoice, ArchivedLicense, ArchivedOrder, ArchivedProduct,
    ArchivedRecord, ArchivedSupplier,
};
pub use bill::{Bill, BillItem, Retailer};
pub use damage_return::{DamageReturn, NewReturn, ReturnForm};
pub use form::FormErrors;
pub use order::{OrderItem, PurchaseOrder, ShipmentEvent};
pub use product::{
    CATEGORIES, LOW_STOCK_THRESHOLD, MAX_PRICE_CENTS, NewProduct, Product, ProductForm, ProductPatch,
};
pub use session::{CurrentUser, PhoneVerification, keys as session_keys};
