//! # rfq-pdf: Quotation Renderer for RFQ Desk
//!
//! Renders a fully materialized [`rfq_core::Rfq`] into a printable A4 PDF.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Render Pipeline                                  │
//! │                                                                         │
//! │  &Rfq                                                                   │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  quotation::layout ── blocks, table, totals ──► Canvas                  │
//! │    │                   (metrics: widths, wrapping, WinAnsi)             │
//! │    ▼                                                                    │
//! │  Canvas ── one operation list per page                                  │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  document::assemble ── lopdf object graph ──► Vec<u8>                   │
//! │                                                                         │
//! │  Pure: no file system, no clock, no randomness.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The renderer never sees a missing RFQ: callers resolve "not found" before
//! asking for a document.
//!
//! ## Usage
//! ```rust,ignore
//! let bytes = rfq_pdf::render(&rfq)?;
//!
//! // Pin CreationDate for archived copies
//! let options = RenderOptions { generated_at: Some(Utc::now()) };
//! let bytes = rfq_pdf::render_with(&rfq, &options)?;
//! ```

pub mod document;
pub mod error;
pub mod layout;
pub mod metrics;
pub mod quotation;

use chrono::{DateTime, Utc};
use rfq_core::Rfq;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub use error::{RenderError, RenderResult};

/// Knobs that affect the produced bytes.
///
/// The default output is fully reproducible; setting `generated_at` adds a
/// `CreationDate` to the document information dictionary.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub generated_at: Option<DateTime<Utc>>,

    /// Checked once per table row and before serialization. A cancelled
    /// render returns [`RenderError::Cancelled`].
    pub cancel: CancellationToken,
}

/// Renders `rfq` with default options.
pub fn render(rfq: &Rfq) -> RenderResult<Vec<u8>> {
    render_with(rfq, &RenderOptions::default())
}

/// Renders `rfq` into PDF bytes.
///
/// The document is built entirely in memory; on error nothing is returned.
pub fn render_with(rfq: &Rfq, options: &RenderOptions) -> RenderResult<Vec<u8>> {
    let pages = quotation::layout(rfq, &options.cancel)?.into_pages();
    let page_count = pages.len();

    if options.cancel.is_cancelled() {
        return Err(RenderError::Cancelled);
    }

    let bytes = document::assemble(pages, &format!("RFQ-{}", rfq.id), options)?;

    debug!(
        rfq_id = rfq.id,
        items = rfq.items.len(),
        pages = page_count,
        bytes = bytes.len(),
        "Quotation rendered"
    );
    Ok(bytes)
}

// =============================================================================
// Unit Tests
// =============================================================================
