//! # rfq-db: Aggregate Store for RFQ Desk
//!
//! This crate translates between the three-table relational shape and the
//! single in-memory [`rfq_core::Rfq`] aggregate. It uses SQLite through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        RFQ Desk Data Flow                               │
//! │                                                                         │
//! │  HTTP handler (GET /rfq/{id})                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     rfq-db (THIS CRATE)                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │   (rfq.rs)    │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ RfqRepository │    │ 001_init.sql │  │   │
//! │  │   │ Transactions  │    │ join + items  │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   customers ◄── rfq ◄── rfq_items                               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded schema bootstrap
//! - [`error`] - Database error types
//! - [`repository`] - The RFQ aggregate repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rfq_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./rfq.db")).await?;
//!
//! let id = db.rfqs().create(&rfq).await?;
//! let stored = db.rfqs().fetch_by_id(id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::rfq::RfqRepository;
