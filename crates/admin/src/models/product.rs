//! Catalogue products kept in the local document store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use stockinvent_core::{Money, ProductId};

use super::form::{FormErrors, optional, required};

/// Categories offered by the product form and the inventory filter.
pub const CATEGORIES: [&str; 5] = [
    "Electronics",
    "Furniture",
    "Office Supplies",
    "Storage",
    "Accessories",
];

/// Quantity below which a product counts as low stock when it has no
/// reorder level of its own.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Highest accepted unit price, in cents ($1,000,000,000.00).
pub const MAX_PRICE_CENTS: i64 = 100_000_000_000;

fn price_error(price: Money) -> Option<String> {
    if !price.is_positive() {
        Some("Price must be a positive number".to_string())
    } else if price > Money::from_cents(MAX_PRICE_CENTS) {
        Some(format!(
            "Price must be at most {}",
            Money::from_cents(MAX_PRICE_CENTS)
        ))
    } else {
        None
    }
}

/// A product in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Store key.
    pub id: ProductId,
    /// Business identifier shown as "Product ID", e.g. `PRD-001`.
    pub product_id: String,
    pub sku: Option<String>,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub price: Money,
    pub supplier: String,
    pub location: Option<String>,
    pub reorder_level: Option<u32>,
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const fn default_active() -> bool {
    true
}

impl Product {
    /// Stock value at list price.
    #[must_use]
    pub fn stock_value(&self) -> Money {
        self.price * self.quantity
    }

    #[must_use]
    pub fn is_low_stock(&self) -> bool {
        self.quantity < self.low_stock_threshold()
    }

    /// Reorder level, or the shop-wide default.
    #[must_use]
    pub fn low_stock_threshold(&self) -> u32 {
        self.reorder_level.unwrap_or(LOW_STOCK_THRESHOLD)
    }

    #[must_use]
    pub const fn is_out_of_stock(&self) -> bool {
        self.quantity == 0
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    /// Store key to use; a timestamp key is generated when absent.
    #[serde(default)]
    pub id: Option<ProductId>,
    pub product_id: String,
    #[serde(default)]
    pub sku: Option<String>,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub price: Money,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub reorder_level: Option<u32>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl NewProduct {
    /// Check the rules that typed fields cannot express.
    ///
    /// # Errors
    ///
    /// Returns the messages for every failing field.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        self.collect_errors(&mut errors);
        errors.into_result(())
    }

    fn collect_errors(&self, errors: &mut FormErrors) {
        if self.product_id.trim().is_empty() {
            errors.add("product_id", "Product ID is required");
        }
        if self.name.trim().is_empty() {
            errors.add("name", "Product name is required");
        }
        if self.category.trim().is_empty() {
            errors.add("category", "Category is required");
        }
        if let Some(message) = price_error(self.price) {
            errors.add("price", message);
        }
    }

    /// Materialise the product under `id`, stamping both timestamps.
    #[must_use]
    pub fn into_product(self, id: ProductId, now: DateTime<Utc>) -> Product {
        Product {
            id,
            product_id: self.product_id,
            sku: self.sku,
            name: self.name,
            category: self.category,
            quantity: self.quantity,
            price: self.price,
            supplier: self.supplier,
            location: self.location,
            reorder_level: self.reorder_level,
            purchase_date: self.purchase_date,
            description: self.description,
            is_active: self.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update merged into an existing product.
///
/// `None` leaves the field unchanged. Optional product fields use a nested
/// option so an update can also clear them: in JSON a missing key leaves
/// the field alone and an explicit `null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub product_id: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub sku: Option<Option<String>>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<u32>,
    pub price: Option<Money>,
    pub supplier: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub reorder_level: Option<Option<u32>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<Option<NaiveDate>>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Only called for keys present in the document, so `null` becomes
/// `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl ProductPatch {
    /// Merge the patch into `product`.
    pub fn apply(self, product: &mut Product) {
        if let Some(v) = self.product_id {
            product.product_id = v;
        }
        if let Some(v) = self.sku {
            product.sku = v;
        }
        if let Some(v) = self.name {
            product.name = v;
        }
        if let Some(v) = self.category {
            product.category = v;
        }
        if let Some(v) = self.quantity {
            product.quantity = v;
        }
        if let Some(v) = self.price {
            product.price = v;
        }
        if let Some(v) = self.supplier {
            product.supplier = v;
        }
        if let Some(v) = self.location {
            product.location = v;
        }
        if let Some(v) = self.reorder_level {
            product.reorder_level = v;
        }
        if let Some(v) = self.purchase_date {
            product.purchase_date = v;
        }
        if let Some(v) = self.description {
            product.description = v;
        }
        if let Some(v) = self.is_active {
            product.is_active = v;
        }
    }

    /// Reject patches that would blank a required field or zero the price.
    ///
    /// # Errors
    ///
    /// Returns the messages for every failing field.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        let blank = |v: &Option<String>| v.as_deref().is_some_and(|s| s.trim().is_empty());
        if blank(&self.product_id) {
            errors.add("product_id", "Product ID is required");
        }
        if blank(&self.name) {
            errors.add("name", "Product name is required");
        }
        if blank(&self.category) {
            errors.add("category", "Category is required");
        }
        if let Some(message) = self.price.and_then(price_error) {
            errors.add("price", message);
        }
        errors.into_result(())
    }
}

impl From<NewProduct> for ProductPatch {
    fn from(input: NewProduct) -> Self {
        Self {
            product_id: Some(input.product_id),
            sku: Some(input.sku),
            name: Some(input.name),
            category: Some(input.category),
            quantity: Some(input.quantity),
            price: Some(input.price),
            supplier: Some(input.supplier),
            location: Some(input.location),
            reorder_level: Some(input.reorder_level),
            purchase_date: Some(input.purchase_date),
            description: Some(input.description),
            is_active: Some(input.is_active),
        }
    }
}

/// Raw values posted by the add/edit product form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub reorder_level: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Checkbox: present when ticked.
    #[serde(default)]
    pub is_active: Option<String>,
}

impl ProductForm {
    /// Prefill the edit form from a stored product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.product_id.clone(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            quantity: product.quantity.to_string(),
            price: product.price.to_input_string(),
            supplier: product.supplier.clone(),
            location: product.location.clone(),
            reorder_level: product.reorder_level.map(|r| r.to_string()),
            purchase_date: product.purchase_date.map(|d| d.to_string()),
            description: product.description.clone(),
            is_active: product.is_active.then(|| "on".to_string()),
        }
    }

    /// Blank form for a new product; new products start active.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            is_active: Some("on".to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_checked(&self) -> bool {
        self.is_active.is_some()
    }

    /// Validate every field and build the typed input.
    ///
    /// # Errors
    ///
    /// Returns one message per failing field.
    pub fn validate(&self) -> Result<NewProduct, FormErrors> {
        let mut errors = FormErrors::new();

        let product_id = required(&mut errors, "product_id", &self.product_id, "Product ID is required");
        let name = required(&mut errors, "name", &self.name, "Product name is required");
        let category = required(&mut errors, "category", &self.category, "Category is required");

        let quantity = match self.quantity.trim() {
            "" => {
                errors.add("quantity", "Quantity is required");
                0
            }
            raw => raw.parse::<u32>().unwrap_or_else(|_| {
                errors.add("quantity", "Quantity must be a non-negative number");
                0
            }),
        };

        let price = match self.price.trim() {
            "" => {
                errors.add("price", "Price is required");
                Money::ZERO
            }
            raw => Money::parse(raw).unwrap_or_else(|_| {
                errors.add("price", "Price must be a positive number");
                Money::ZERO
            }),
        };

        let reorder_level = optional(self.reorder_level.as_deref()).and_then(|raw| {
            raw.parse::<u32>().map_or_else(
                |_| {
                    errors.add("reorder_level", "Reorder level must be a non-negative number");
                    None
                },
                Some,
            )
        });

        let purchase_date = optional(self.purchase_date.as_deref()).and_then(|raw| {
            NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_or_else(
                |_| {
                    errors.add("purchase_date", "Purchase date must be a valid date");
                    None
                },
                Some,
            )
        });

        let input = NewProduct {
            id: None,
            product_id,
            sku: optional(self.sku.as_deref()),
            name,
            category,
            quantity,
            price,
            supplier: self.supplier.trim().to_string(),
            location: optional(self.location.as_deref()),
            reorder_level,
            purchase_date,
            description: self.description.trim().to_string(),
            is_active: self.is_checked(),
        };
        input.collect_errors(&mut errors);

        errors.into_result(input)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filled_form() -> ProductForm {
        ProductForm {
            product_id: "PRD-016".to_string(),
            name: "Standing Desk".to_string(),
            category: "Furniture".to_string(),
            quantity: "4".to_string(),
            price: "349.50".to_string(),
            supplier: " ErgoWorks ".to_string(),
            is_active: Some("on".to_string()),
            ..ProductForm::default()
        }
    }

    #[test]
    fn test_valid_form_builds_input() {
        let input = filled_form().validate().unwrap();
        assert_eq!(input.product_id, "PRD-016");
        assert_eq!(input.quantity, 4);
        assert_eq!(input.price, Money::from_cents(34_950));
        assert_eq!(input.supplier, "ErgoWorks");
        assert!(input.is_active);
        assert_eq!(input.location, None);
    }

    #[test]
    fn test_required_fields() {
        let errors = ProductForm::default().validate().unwrap_err();
        assert_eq!(errors.get("product_id"), "Product ID is required");
        assert_eq!(errors.get("name"), "Product name is required");
        assert_eq!(errors.get("category"), "Category is required");
        assert_eq!(errors.get("quantity"), "Quantity is required");
        assert_eq!(errors.get("price"), "Price is required");
    }

    #[test]
    fn test_numeric_rules() {
        let mut form = filled_form();
        form.quantity = "-3".to_string();
        form.price = "0".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("quantity"), "Quantity must be a non-negative number");
        assert_eq!(errors.get("price"), "Price must be a positive number");

        let mut form = filled_form();
        form.quantity = "2.5".to_string();
        form.price = "abc".to_string();
        let errors = form.validate().unwrap_err();
        assert!(errors.has("quantity"));
        assert_eq!(errors.get("price"), "Price must be a positive number");
    }

    #[test]
    fn test_optional_fields_are_checked_when_present() {
        let mut form = filled_form();
        form.reorder_level = Some("five".to_string());
        form.purchase_date = Some("2023-13-40".to_string());
        let errors = form.validate().unwrap_err();
        assert!(errors.has("reorder_level"));
        assert!(errors.has("purchase_date"));

        let mut form = filled_form();
        form.reorder_level = Some("6".to_string());
        form.purchase_date = Some("2023-11-15".to_string());
        let input = form.validate().unwrap();
        assert_eq!(input.reorder_level, Some(6));
        assert_eq!(input.purchase_date, NaiveDate::from_ymd_opt(2023, 11, 15));
    }

    #[test]
    fn test_patch_merges_and_clears() {
        let now = Utc::now();
        let mut product = filled_form()
            .validate()
            .unwrap()
            .into_product(ProductId::new("1"), now);
        product.location = Some("Aisle 4".to_string());

        ProductPatch {
            quantity: Some(0),
            location: Some(None),
            ..ProductPatch::default()
        }
        .apply(&mut product);

        assert_eq!(product.quantity, 0);
        assert_eq!(product.location, None);
        assert_eq!(product.name, "Standing Desk");
        assert!(product.is_out_of_stock());
        assert!(product.is_low_stock());
    }

    #[test]
    fn test_patch_validation() {
        let patch = ProductPatch {
            name: Some("  ".to_string()),
            price: Some(Money::ZERO),
            ..ProductPatch::default()
        };
        let errors = patch.validate().unwrap_err();
        assert!(errors.has("name"));
        assert!(errors.has("price"));
        assert!(ProductPatch::default().validate().is_ok());
    }

    #[test]
    fn test_price_upper_bound() {
        let mut form = filled_form();
        form.price = "79228162514264337593543950335".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("price"), "Price must be at most $1,000,000,000.00");

        let mut form = filled_form();
        form.price = "1000000000".to_string();
        assert!(form.validate().is_ok());

        let patch = ProductPatch {
            price: Some(Money::from_cents(MAX_PRICE_CENTS + 1)),
            ..ProductPatch::default()
        };
        assert!(patch.validate().unwrap_err().has("price"));
    }

    #[test]
    fn test_patch_json_null_clears_and_missing_keeps() {
        let patch: ProductPatch =
            serde_json::from_str(r#"{"sku": null, "reorder_level": 4}"#).unwrap();
        assert_eq!(patch.sku, Some(None));
        assert_eq!(patch.reorder_level, Some(Some(4)));
        assert_eq!(patch.location, None);
        assert_eq!(patch.purchase_date, None);

        let mut product = filled_form()
            .validate()
            .unwrap()
            .into_product(ProductId::new("1"), Utc::now());
        product.sku = Some("SKU-9".to_string());
        product.location = Some("Aisle 4".to_string());
        patch.apply(&mut product);
        assert_eq!(product.sku, None);
        assert_eq!(product.location.as_deref(), Some("Aisle 4"));
        assert_eq!(product.reorder_level, Some(4));
    }

    #[test]
    fn test_edit_form_round_trip() {
        let product = filled_form()
            .validate()
            .unwrap()
            .into_product(ProductId::new("1"), Utc::now());
        let form = ProductForm::from_product(&product);
        assert_eq!(form.price, "349.50");
        assert!(form.is_checked());
        assert_eq!(form.validate().unwrap().name, product.name);
    }
}
