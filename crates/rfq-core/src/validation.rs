//! # Validation Module
//!
//! Payload validation for the RFQ aggregate.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (axum Json)                                   │
//! │  └── Shape: types, required numeric fields                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, length limits, non-negative amounts              │
//! │  ├── Path id == body id on update                                      │
//! │  └── Blank optional dates → None                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here runs before the store is touched.

use crate::error::ValidationError;
use crate::types::Rfq;
use crate::MAX_RFQ_ITEMS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_QUOTE_NUMBER: usize = 50;
const MAX_NAME: usize = 200;
const MAX_PHONE: usize = 50;
const MAX_EMAIL: usize = 254;
const MAX_TEXT: usize = 4000;

// =============================================================================
// Aggregate Validation
// =============================================================================

/// Validates a create or update payload.
///
/// ## Rules
/// - `customer.name` must not be blank
/// - Text fields are length-bounded
/// - At most [`MAX_RFQ_ITEMS`] items
/// - Every item's `qty` and `rate` must be non-negative
///
/// ## Example
/// ```rust
/// use rfq_core::validation::validate_rfq;
/// use rfq_core::{Customer, Rfq};
///
/// let mut rfq = Rfq::default();
/// assert!(validate_rfq(&rfq).is_err());
///
/// rfq.customer = Customer { name: "Acme".into(), ..Customer::default() };
/// assert!(validate_rfq(&rfq).is_ok());
/// ```
pub fn validate_rfq(rfq: &Rfq) -> ValidationResult<()> {
    if let Some(quote_number) = &rfq.quote_number {
        check_len("quoteNumber", quote_number, MAX_QUOTE_NUMBER)?;
    }
    for (field, value) in [
        ("rfqDate", &rfq.rfq_date),
        ("quoteDate", &rfq.quote_date),
        ("validUntil", &rfq.valid_until),
    ] {
        if let Some(value) = value {
            check_len(field, value, MAX_QUOTE_NUMBER)?;
        }
    }
    if let Some(description) = &rfq.description {
        check_len("description", description, MAX_TEXT)?;
    }
    if let Some(remarks) = &rfq.remarks {
        check_len("remarks", remarks, MAX_TEXT)?;
    }

    let customer = &rfq.customer;
    if customer.name.trim().is_empty() {
        return Err(ValidationError::required("customer.name"));
    }
    check_len("customer.name", &customer.name, MAX_NAME)?;
    check_len("customer.address", &customer.address, MAX_TEXT)?;
    check_len("customer.phone", &customer.phone, MAX_PHONE)?;
    check_len("customer.email", &customer.email, MAX_EMAIL)?;

    if rfq.items.len() > MAX_RFQ_ITEMS {
        return Err(ValidationError::TooManyItems { max: MAX_RFQ_ITEMS });
    }

    for (idx, item) in rfq.items.iter().enumerate() {
        check_len(&format!("items[{idx}].itemNo"), &item.item_no, MAX_NAME)?;
        check_len(&format!("items[{idx}].description"), &item.description, MAX_TEXT)?;

        if item.qty.is_sign_negative() && !item.qty.is_zero() {
            return Err(ValidationError::Negative {
                field: format!("items[{idx}].qty"),
            });
        }
        if item.rate.is_sign_negative() && !item.rate.is_zero() {
            return Err(ValidationError::Negative {
                field: format!("items[{idx}].rate"),
            });
        }
    }

    Ok(())
}

/// Requires the id in the request path to equal the id in the body.
///
/// ```rust
/// use rfq_core::validation::check_id_match;
///
/// assert!(check_id_match(3, 3).is_ok());
/// assert!(check_id_match(3, 4).is_err());
/// ```
pub fn check_id_match(path_id: i64, body_id: i64) -> ValidationResult<()> {
    if path_id != body_id {
        return Err(ValidationError::IdMismatch { path_id, body_id });
    }
    Ok(())
}

// =============================================================================
// Normalization
// =============================================================================

/// Maps a blank optional string to `None`.
///
/// Empty dates must reach the store as absence-of-value, never as `""`.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Coerces the three optional dates of an aggregate.
///
/// Applied on every write path (create and update).
pub fn normalize_rfq(mut rfq: Rfq) -> Rfq {
    rfq.rfq_date = blank_to_none(rfq.rfq_date);
    rfq.quote_date = blank_to_none(rfq.quote_date);
    rfq.valid_until = blank_to_none(rfq.valid_until);
    rfq
}

/// Validates then normalizes a payload in one step.
pub fn prepare_rfq(rfq: Rfq) -> ValidationResult<Rfq> {
    validate_rfq(&rfq)?;
    Ok(normalize_rfq(rfq))
}

fn check_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Customer, RfqItem};
    use rust_decimal::Decimal;

    fn valid_rfq() -> Rfq {
        Rfq {
            quote_number: Some("Q-1".to_string()),
            customer: Customer {
                name: "Acme".to_string(),
                ..Customer::default()
            },
            items: vec![RfqItem::new("1", "Bolt", Decimal::from(4), Decimal::new(125, 2))],
            ..Rfq::default()
        }
    }

    #[test]
    fn test_valid_rfq_passes() {
        assert!(validate_rfq(&valid_rfq()).is_ok());
    }

    #[test]
    fn test_blank_customer_name_is_required() {
        let mut rfq = valid_rfq();
        rfq.customer.name = "   ".to_string();
        assert_eq!(
            validate_rfq(&rfq),
            Err(ValidationError::required("customer.name"))
        );
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut rfq = valid_rfq();
        rfq.items[0].rate = Decimal::new(-1, 0);
        assert!(matches!(
            validate_rfq(&rfq),
            Err(ValidationError::Negative { field }) if field == "items[0].rate"
        ));
    }

    #[test]
    fn test_zero_quantity_allowed() {
        let mut rfq = valid_rfq();
        rfq.items[0].qty = Decimal::ZERO;
        assert!(validate_rfq(&rfq).is_ok());
    }

    #[test]
    fn test_too_many_items() {
        let mut rfq = valid_rfq();
        let line = rfq.items[0].clone();
        rfq.items = vec![line; MAX_RFQ_ITEMS + 1];
        assert_eq!(
            validate_rfq(&rfq),
            Err(ValidationError::TooManyItems { max: MAX_RFQ_ITEMS })
        );
    }

    #[test]
    fn test_quote_number_too_long() {
        let mut rfq = valid_rfq();
        rfq.quote_number = Some("Q".repeat(51));
        assert!(matches!(
            validate_rfq(&rfq),
            Err(ValidationError::TooLong { max: 50, .. })
        ));
    }

    #[test]
    fn test_id_mismatch() {
        assert_eq!(
            check_id_match(5, 6),
            Err(ValidationError::IdMismatch {
                path_id: 5,
                body_id: 6
            })
        );
    }

    #[test]
    fn test_normalize_blank_dates() {
        let rfq = Rfq {
            rfq_date: Some(String::new()),
            quote_date: Some("  ".to_string()),
            valid_until: Some("2024-12-31".to_string()),
            ..valid_rfq()
        };

        let rfq = normalize_rfq(rfq);
        assert_eq!(rfq.rfq_date, None);
        assert_eq!(rfq.quote_date, None);
        assert_eq!(rfq.valid_until.as_deref(), Some("2024-12-31"));
    }

    #[test]
    fn test_prepare_rejects_before_normalizing() {
        let mut rfq = valid_rfq();
        rfq.customer.name.clear();
        rfq.rfq_date = Some(String::new());
        assert!(prepare_rfq(rfq).is_err());
    }
}
