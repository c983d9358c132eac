//! # rfq-core: Pure Business Logic for RFQ Desk
//!
//! This crate holds the Request-for-Quotation aggregate and every rule that
//! can be expressed without touching a database, a socket or a file.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        RFQ Desk Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (apps/rfq-api)                      │   │
//! │  │    GET /rfq/{id}, GET /rfq/list, POST /rfq, PUT, GET .../pdf    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rfq-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   money   │  │ validation│                  │   │
//! │  │   │ Rfq       │  │  Money    │  │  payload  │                  │   │
//! │  │   │ Customer  │  │  totals   │  │  id match │                  │   │
//! │  │   │ RfqItem   │  │           │  │  dates    │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                    │                               │                    │
//! │  ┌─────────────────▼──────────────┐  ┌─────────────▼──────────────┐    │
//! │  │     rfq-db (Aggregate Store)   │  │  rfq-pdf (Document Render) │    │
//! │  └────────────────────────────────┘  └────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - The aggregate: `Rfq`, `Customer`, `RfqItem`
//! - [`money`] - Decimal money with two-digit display rounding
//! - [`error`] - Domain error types
//! - [`validation`] - Payload checks run before any store interaction
//!
//! ## Example Usage
//!
//! ```rust
//! use rfq_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! // 3 × 12.50 = 37.50
//! let rate = Money::new(Decimal::new(1250, 2));
//! let ext = rate.extend(Decimal::from(3));
//! assert_eq!(ext.to_string(), "37.50");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use rfq_core::Rfq` instead of
// `use rfq_core::types::Rfq`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// Callers building items need the decimal type without a direct dependency.
pub use rust_decimal::Decimal;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of line items accepted in a single RFQ.
///
/// ## Business Reason
/// A quotation with more lines than this is almost certainly a client bug
/// (e.g. a form submitting the same rows in a loop).
pub const MAX_RFQ_ITEMS: usize = 500;
