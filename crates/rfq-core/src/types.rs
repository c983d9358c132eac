//! # Domain Types
//!
//! The RFQ aggregate: one header, one customer, many line items.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Rfq Aggregate                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   1:1   ┌─────────────────┐                        │
//! │  │      Rfq        │────────►│    Customer     │                        │
//! │  │  ─────────────  │         │  ─────────────  │                        │
//! │  │  id             │         │  id             │                        │
//! │  │  quote_number   │         │  name           │                        │
//! │  │  rfq_date?      │         │  address        │                        │
//! │  │  quote_date?    │         │  phone, email   │                        │
//! │  │  valid_until?   │         └─────────────────┘                        │
//! │  │  description    │   1:N   ┌─────────────────┐                        │
//! │  │  remarks        │────────►│    RfqItem      │                        │
//! │  └─────────────────┘         │  item_no, desc  │                        │
//! │                              │  qty × rate     │                        │
//! │                              └─────────────────┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## JSON Shape
//! Field names are camelCase on the wire:
//! `{ id, quoteNumber, rfqDate, quoteDate, validUntil, description, remarks,
//!    customer: {id, name, address, phone, email},
//!    items: [{itemNo, description, qty, rate}] }`
//!
//! Ids default to 0 when a payload omits them (new aggregate, new customer).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Customer
// =============================================================================

/// The customer an RFQ was raised for.
///
/// Owned by exactly one RFQ: created with it, updated in place with it, and
/// only ever read through it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

impl Customer {
    /// Compares the contact fields, ignoring the store-assigned id.
    pub fn same_contact(&self, other: &Customer) -> bool {
        self.name == other.name
            && self.address == other.address
            && self.phone == other.phone
            && self.email == other.email
    }

    /// "phone | email" line used on the quotation.
    pub fn contact_line(&self) -> String {
        format!("{} | {}", self.phone, self.email)
    }
}

// =============================================================================
// RFQ Item
// =============================================================================

/// One quoted line.
///
/// Items have no identity outside their RFQ: every update deletes and
/// re-inserts the whole set, so `id` changes even when content does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RfqItem {
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub rfq_id: i64,

    /// Free text; not necessarily numeric or unique.
    #[serde(default)]
    pub item_no: String,

    #[serde(default)]
    pub description: String,

    /// May be fractional.
    #[ts(type = "number")]
    pub qty: Decimal,

    /// Unit rate at currency scale.
    #[ts(type = "number")]
    pub rate: Decimal,
}

impl RfqItem {
    /// Creates an item that has not been stored yet.
    pub fn new(
        item_no: impl Into<String>,
        description: impl Into<String>,
        qty: Decimal,
        rate: Decimal,
    ) -> Self {
        RfqItem {
            id: 0,
            rfq_id: 0,
            item_no: item_no.into(),
            description: description.into(),
            qty,
            rate,
        }
    }

    /// Returns the unit rate as Money.
    #[inline]
    pub fn rate(&self) -> Money {
        Money::new(self.rate)
    }

    /// quantity × rate. Derived, never persisted.
    #[inline]
    pub fn extended_cost(&self) -> Money {
        self.rate().extend(self.qty)
    }

    /// Compares the submitted fields, ignoring store-assigned ids.
    pub fn same_content(&self, other: &RfqItem) -> bool {
        self.item_no == other.item_no
            && self.description == other.description
            && self.qty == other.qty
            && self.rate == other.rate
    }
}

// =============================================================================
// RFQ (aggregate root)
// =============================================================================

/// A Request for Quotation: the aggregate root and the only entity callers
/// address directly.
///
/// Dates are free text and may be absent; they are never parsed as calendar
/// values. A blank date in a payload means "no date" (see
/// [`crate::validation::normalize_rfq`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct Rfq {
    pub id: i64,
    pub quote_number: Option<String>,
    pub rfq_date: Option<String>,
    pub quote_date: Option<String>,
    pub valid_until: Option<String>,
    pub description: Option<String>,
    pub remarks: Option<String>,
    pub customer: Customer,
    pub items: Vec<RfqItem>,
}

impl Rfq {
    /// Sum of every item's extended cost. Derived, never persisted.
    pub fn grand_total(&self) -> Money {
        self.items.iter().map(RfqItem::extended_cost).sum()
    }

    /// Suggested file name for the rendered quotation.
    pub fn document_file_name(&self) -> String {
        format!("RFQ-{}.pdf", self.id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(qty: Decimal, rate: Decimal) -> RfqItem {
        RfqItem::new("1", "Widget", qty, rate)
    }

    #[test]
    fn test_extended_cost() {
        let line = item(Decimal::from(3), Decimal::new(1250, 2));
        assert_eq!(line.extended_cost().to_string(), "37.50");
    }

    #[test]
    fn test_grand_total() {
        let rfq = Rfq {
            items: vec![
                item(Decimal::from(2), Decimal::new(1000, 2)),
                item(Decimal::from(1), Decimal::new(500, 2)),
            ],
            ..Rfq::default()
        };
        assert_eq!(rfq.grand_total().to_string(), "25.00");
    }

    #[test]
    fn test_grand_total_of_empty_rfq_is_zero() {
        assert!(Rfq::default().grand_total().is_zero());
    }

    #[test]
    fn test_deserialize_create_payload_without_ids() {
        let payload = json!({
            "quoteNumber": "Q-100",
            "rfqDate": "2024-05-01",
            "quoteDate": "",
            "description": "Pumps",
            "customer": {
                "name": "Acme",
                "address": "1 Main St",
                "phone": "555-0100",
                "email": "buyer@acme.test"
            },
            "items": [
                { "itemNo": "A1", "description": "Pump", "qty": 2, "rate": 10.5 }
            ]
        });

        let rfq: Rfq = serde_json::from_value(payload).unwrap();
        assert_eq!(rfq.id, 0);
        assert_eq!(rfq.customer.id, 0);
        assert_eq!(rfq.quote_date.as_deref(), Some(""));
        assert_eq!(rfq.valid_until, None);
        assert_eq!(rfq.items.len(), 1);
        assert_eq!(rfq.items[0].qty, Decimal::from(2));
        assert_eq!(rfq.items[0].rate, Decimal::new(105, 1));
    }

    #[test]
    fn test_serialize_uses_camel_case_and_numbers() {
        let rfq = Rfq {
            id: 4,
            quote_number: Some("Q-4".to_string()),
            items: vec![item(Decimal::from(3), Decimal::new(1250, 2))],
            ..Rfq::default()
        };

        let value = serde_json::to_value(&rfq).unwrap();
        assert_eq!(value["quoteNumber"], "Q-4");
        assert!(value["validUntil"].is_null());
        assert_eq!(value["items"][0]["itemNo"], "1");
        assert_eq!(value["items"][0]["qty"].as_f64(), Some(3.0));
        assert_eq!(value["items"][0]["rate"].as_f64(), Some(12.5));
    }

    #[test]
    fn test_same_content_ignores_ids() {
        let mut stored = item(Decimal::from(1), Decimal::from(5));
        stored.id = 42;
        stored.rfq_id = 9;
        assert!(stored.same_content(&item(Decimal::from(1), Decimal::from(5))));
        assert!(!stored.same_content(&item(Decimal::from(2), Decimal::from(5))));
    }

    #[test]
    fn test_contact_line_and_file_name() {
        let rfq = Rfq {
            id: 12,
            customer: Customer {
                phone: "555-0100".to_string(),
                email: "a@b.test".to_string(),
                ..Customer::default()
            },
            ..Rfq::default()
        };
        assert_eq!(rfq.customer.contact_line(), "555-0100 | a@b.test");
        assert_eq!(rfq.document_file_name(), "RFQ-12.pdf");
    }
}
