//! # RFQ Desk API
//!
//! HTTP surface for the RFQ aggregate: fetch, list, create, update and
//! render-to-PDF.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           RFQ API                                       │
//! │                                                                         │
//! │  Gateway (auth) ──► x-authenticated-user ──► axum Router                │
//! │                                                  │                      │
//! │                  ┌───────────────────────────────┼──────────────┐       │
//! │                  ▼                               ▼              ▼       │
//! │           rfq-core::validation            rfq-db (SQLite)   rfq-pdf     │
//! │           shape, id match,                join + replace    blocking    │
//! │           blank dates                     in one tx         pool        │
//! │                                                  │                      │
//! │                                                  ▼                      │
//! │                                     Notifier (after commit, spawned)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `RFQ_BIND_ADDR` - listen address (default `0.0.0.0:8080`)
//! - `RFQ_DATABASE_PATH` - SQLite file (default `./rfq.db`)
//! - `RFQ_DB_MAX_CONNECTIONS` - pool size (default 5)
//! - `RFQ_DB_BUSY_TIMEOUT_MS` - how long a write waits for the write lock (default 5000)
//! - `RFQ_RUN_MIGRATIONS` - bootstrap schema on start-up (default true)
//! - `RFQ_REQUEST_TIMEOUT_SECS` - per-request deadline (default 30)
//! - `RFQ_PRINCIPAL_HEADER` - principal header (default `x-authenticated-user`)
//! - `RFQ_REQUIRE_PRINCIPAL` - reject anonymous requests (default true)
//! - `RUST_LOG` - log filter

pub mod config;
pub mod error;
pub mod notify;
pub mod principal;
pub mod routes;
pub mod state;

pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;
pub use notify::{Notifier, RfqEvent, TracingNotifier};
pub use routes::router;
pub use state::AppState;
