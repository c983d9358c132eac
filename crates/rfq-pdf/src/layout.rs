//! # Page Layout
//!
//! A top-down cursor over a sequence of fixed-size pages.
//!
//! ## Coordinate System
//! ```text
//!   (0, 841.89) ┌──────────────────────────────┐
//!               │  ┌────────────────────────┐  │ ← TOP = height - margin
//!               │  │ cursor ↓               │  │
//!               │  │                        │  │
//!               │  │   content area         │  │
//!               │  │   515.28 pt wide       │  │
//!               │  │                        │  │
//!               │  └────────────────────────┘  │ ← BOTTOM = margin
//!       (0, 0)  └──────────────────────────────┘ (595.28, 0)
//! ```
//!
//! PDF space grows upwards, layout flows downwards: every block asks
//! [`Canvas::ensure_space`] for its height, draws relative to
//! [`Canvas::cursor`], then [`Canvas::advance`]s past itself.

use lopdf::content::Operation;
use lopdf::Object;

use crate::metrics::{self, Font};

/// A4 portrait, in points.
pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;

/// Uniform margin on all four sides.
pub const MARGIN: f32 = 40.0;

pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
pub const TOP: f32 = PAGE_HEIGHT - MARGIN;
pub const BOTTOM: f32 = MARGIN;

/// Line height as a multiple of font size.
pub const LEADING: f32 = 1.3;

/// Fill colour, components in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);

    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Height of one line of text at `size`.
pub fn line_height(size: f32) -> f32 {
    size * LEADING
}

/// Rounds to 1/100 pt so content streams stay short and stable.
fn pt(value: f32) -> Object {
    ((value * 100.0).round() / 100.0).into()
}

// =============================================================================
// Canvas
// =============================================================================

/// Accumulates drawing operations page by page.
#[derive(Debug)]
pub struct Canvas {
    pages: Vec<Vec<Operation>>,
    cursor: f32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Canvas {
            pages: vec![Vec::new()],
            cursor: TOP,
        }
    }

    /// Y coordinate of the top of the next block.
    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Vertical space left above the bottom margin.
    pub fn remaining(&self) -> f32 {
        self.cursor - BOTTOM
    }

    pub fn at_page_top(&self) -> bool {
        self.cursor >= TOP
    }

    /// Starts a new page unless `height` fits below the cursor.
    ///
    /// A block taller than a whole page is drawn at the top of the current
    /// page when that page is still empty, so this never loops.
    ///
    /// Returns true if a page break happened.
    pub fn ensure_space(&mut self, height: f32) -> bool {
        if height > self.remaining() && !self.at_page_top() {
            self.new_page();
            true
        } else {
            false
        }
    }

    pub fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor = TOP;
    }

    pub fn advance(&mut self, dy: f32) {
        self.cursor -= dy;
    }

    fn push(&mut self, op: Operation) {
        if let Some(page) = self.pages.last_mut() {
            page.push(op);
        }
    }

    // -------------------------------------------------------------------------
    // Primitives
    // -------------------------------------------------------------------------

    /// Draws a single line of text with its baseline at `(x, baseline)`.
    pub fn text(&mut self, x: f32, baseline: f32, font: Font, size: f32, text: &str) {
        if text.is_empty() {
            return;
        }
        self.push(Operation::new("BT", vec![]));
        self.push(Operation::new(
            "Tf",
            vec![Object::Name(font.resource_name().as_bytes().to_vec()), size.into()],
        ));
        self.push(Operation::new("Td", vec![pt(x), pt(baseline)]));
        self.push(Operation::new("Tj", vec![Object::string_literal(metrics::encode(text))]));
        self.push(Operation::new("ET", vec![]));
    }

    /// Draws text aligned inside the horizontal span `[left, left + width]`.
    #[allow(clippy::too_many_arguments)]
    pub fn text_in(
        &mut self,
        left: f32,
        width: f32,
        baseline: f32,
        align: Align,
        font: Font,
        size: f32,
        text: &str,
    ) {
        let x = match align {
            Align::Left => left,
            Align::Center => left + (width - metrics::text_width(text, font, size)) / 2.0,
            Align::Right => left + width - metrics::text_width(text, font, size),
        };
        self.text(x, baseline, font, size, text);
    }

    /// Fills a rectangle whose lower-left corner is `(x, y)`.
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.push(Operation::new("rg", vec![color.0.into(), color.1.into(), color.2.into()]));
        self.push(Operation::new("re", vec![pt(x), pt(y), pt(width), pt(height)]));
        self.push(Operation::new("f", vec![]));
        let Rgb(r, g, b) = Rgb::BLACK;
        self.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
    }

    /// Strokes a rectangle outline whose lower-left corner is `(x, y)`.
    pub fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, line_width: f32) {
        self.push(Operation::new("w", vec![line_width.into()]));
        self.push(Operation::new("re", vec![pt(x), pt(y), pt(width), pt(height)]));
        self.push(Operation::new("S", vec![]));
    }

    // -------------------------------------------------------------------------
    // Flowing text
    // -------------------------------------------------------------------------

    /// Writes `text` across the content width, wrapping and breaking pages
    /// line by line.
    pub fn paragraph(&mut self, text: &str, font: Font, size: f32) {
        let height = line_height(size);
        for line in metrics::wrap(text, font, size, CONTENT_WIDTH) {
            self.ensure_space(height);
            let baseline = self.cursor - size;
            self.text(MARGIN, baseline, font, size, &line);
            self.advance(height);
        }
    }

    /// Consumes the canvas, returning one operation list per page.
    pub fn into_pages(self) -> Vec<Vec<Operation>> {
        self.pages
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
