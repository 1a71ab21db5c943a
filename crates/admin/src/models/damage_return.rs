//! Damage and return claims.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockinvent_core::{Money, ReturnId, ReturnIssue, ReturnStatus};

use super::form::{FormErrors, required};

/// A damage or return claim against an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageReturn {
    pub id: ReturnId,
    pub invoice_no: String,
    pub order_date: NaiveDate,
    pub delivery_date: NaiveDate,
    pub issue: ReturnIssue,
    pub product: String,
    pub quantity: u32,
    pub return_date: NaiveDate,
    pub description: String,
    pub status: ReturnStatus,
    pub refund_amount: Money,
}

/// A validated claim awaiting an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReturn {
    pub invoice_no: String,
    pub order_date: NaiveDate,
    pub delivery_date: NaiveDate,
    pub issue: ReturnIssue,
    pub product: String,
    pub quantity: u32,
    pub return_date: NaiveDate,
    pub description: String,
    pub refund_amount: Money,
}

impl NewReturn {
    /// New claims always start out pending.
    #[must_use]
    pub fn into_return(self, id: ReturnId) -> DamageReturn {
        DamageReturn {
            id,
            invoice_no: self.invoice_no,
            order_date: self.order_date,
            delivery_date: self.delivery_date,
            issue: self.issue,
            product: self.product,
            quantity: self.quantity,
            return_date: self.return_date,
            description: self.description,
            status: ReturnStatus::Pending,
            refund_amount: self.refund_amount,
        }
    }
}

/// Raw values posted by the "New Return" form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReturnForm {
    #[serde(default)]
    pub invoice_no: String,
    #[serde(default)]
    pub order_date: String,
    #[serde(default)]
    pub delivery_date: String,
    #[serde(default)]
    pub issue: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub return_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub refund_amount: String,
}

impl ReturnForm {
    /// # Errors
    ///
    /// Returns one message per failing field.
    pub fn validate(&self) -> Result<NewReturn, FormErrors> {
        let mut errors = FormErrors::new();

        let invoice_no = required(&mut errors, "invoice_no", &self.invoice_no, "Invoice number is required");
        let product = required(&mut errors, "product", &self.product, "Product is required");

        let order_date = date_field(&mut errors, "order_date", &self.order_date, "Order date");
        let delivery_date = date_field(&mut errors, "delivery_date", &self.delivery_date, "Delivery date");
        let return_date = date_field(&mut errors, "return_date", &self.return_date, "Return date");

        let issue = self.issue.trim().parse::<ReturnIssue>().ok();
        if issue.is_none() {
            errors.add("issue", "Please select an issue type");
        }

        let quantity = match self.quantity.trim().parse::<u32>() {
            Ok(q) if q >= 1 => q,
            _ => {
                errors.add("quantity", "Quantity must be at least 1");
                0
            }
        };

        let refund_amount = match self.refund_amount.trim() {
            "" => Money::ZERO,
            raw => match Money::parse(raw) {
                Ok(amount) if !amount.is_negative() => amount,
                _ => {
                    errors.add("refund_amount", "Refund amount must be a non-negative number");
                    Money::ZERO
                }
            },
        };

        match (order_date, delivery_date, return_date, issue) {
            (Some(order_date), Some(delivery_date), Some(return_date), Some(issue)) => errors
                .into_result(NewReturn {
                    invoice_no,
                    order_date,
                    delivery_date,
                    issue,
                    product,
                    quantity,
                    return_date,
                    description: self.description.trim().to_string(),
                    refund_amount,
                }),
            _ => Err(errors),
        }
    }
}

fn date_field(
    errors: &mut FormErrors,
    field: &'static str,
    value: &str,
    label: &str,
) -> Option<NaiveDate> {
    let raw = value.trim();
    if raw.is_empty() {
        errors.add(field, format!("{label} is required"));
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .inspect_err(|_| errors.add(field, format!("{label} must be a valid date")))
        .ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form() -> ReturnForm {
        ReturnForm {
            invoice_no: "INV-2023-050".to_string(),
            order_date: "2023-11-01".to_string(),
            delivery_date: "2023-11-04".to_string(),
            issue: "Defective Product".to_string(),
            product: "Desk Lamp".to_string(),
            quantity: "2".to_string(),
            return_date: "2023-11-09".to_string(),
            description: "Flickers".to_string(),
            refund_amount: "79.98".to_string(),
        }
    }

    #[test]
    fn test_valid_claim() {
        let claim = form().validate().unwrap();
        assert_eq!(claim.issue, ReturnIssue::DefectiveProduct);
        assert_eq!(claim.quantity, 2);
        assert_eq!(claim.refund_amount, Money::from_cents(7998));

        let stored = claim.into_return(ReturnId::new(6));
        assert_eq!(stored.status, ReturnStatus::Pending);
    }

    #[test]
    fn test_missing_fields() {
        let errors = ReturnForm::default().validate().unwrap_err();
        assert_eq!(errors.get("invoice_no"), "Invoice number is required");
        assert_eq!(errors.get("order_date"), "Order date is required");
        assert_eq!(errors.get("issue"), "Please select an issue type");
        assert_eq!(errors.get("quantity"), "Quantity must be at least 1");
        assert!(!errors.has("refund_amount"));
    }

    #[test]
    fn test_bad_values() {
        let mut bad = form();
        bad.quantity = "0".to_string();
        bad.refund_amount = "-5".to_string();
        bad.return_date = "09/25/2023".to_string();
        let errors = bad.validate().unwrap_err();
        assert!(errors.has("quantity"));
        assert!(errors.has("refund_amount"));
        assert_eq!(errors.get("return_date"), "Return date must be a valid date");
    }
}
