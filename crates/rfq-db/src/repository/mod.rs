//! # Repository Module
//!
//! Database repository implementations for RFQ Desk.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.rfqs().fetch_by_id(7)                                      │
//! │       ▼                                                                 │
//! │  RfqRepository                                                         │
//! │  ├── fetch_by_id(&self, id)      → Option<Rfq>                         │
//! │  ├── list_ids(&self)             → Vec<i64>, newest first              │
//! │  ├── create(&self, rfq)          → new id                              │
//! │  └── update(&self, id, rfq)      → replace items wholesale             │
//! │       │                                                                 │
//! │       │  SQL (one transaction per write)                               │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`rfq::RfqRepository`] - The RFQ aggregate (header + customer + items)

pub mod rfq;
