//! # Quotation Layout
//!
//! Lays the RFQ aggregate out as a priced quotation.
//!
//! ## Block Order
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                  Quotation                    │  title, centered
//! │ RFQ Date: …   Quote #: …   Quote Date: …      │  one per line
//! │ ▓▓ Customer Information ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓ │  band
//! │ name / address / phone | email                │
//! │ ▓▓ Description ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓ │
//! │ free text                                     │
//! │ ┌────┬────────────────┬────┬────┬──────┬────┐ │
//! │ │No  │Description     │Qty │Rate│Ext   │Rmk │ │  header repeats per page
//! │ ├────┼────────────────┼────┼────┼──────┼────┤ │
//! │ │... │...             │ ...│ ...│  ... │    │ │
//! │ ├────┴────────────────┴────┴────┼──────┼────┤ │
//! │ │                          TOTAL│ 25.00│    │ │
//! │ └───────────────────────────────┴──────┴────┘ │
//! │ ▓▓ Remarks ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓ │
//! │ free text                                     │
//! └───────────────────────────────────────────────┘
//! ```

use rfq_core::money::format_quantity;
use rfq_core::{Rfq, RfqItem};
use tokio_util::sync::CancellationToken;

use crate::error::{RenderError, RenderResult};
use crate::layout::{line_height, Align, Canvas, Rgb, BOTTOM, CONTENT_WIDTH, MARGIN, TOP};
use crate::metrics::{self, Font};

const TITLE_SIZE: f32 = 22.0;
const BODY_SIZE: f32 = 10.0;
const LABEL_SIZE: f32 = 11.0;
const TABLE_SIZE: f32 = 9.0;

/// Vertical gap between blocks.
const BLOCK_GAP: f32 = 12.0;

const BAND_PADDING: f32 = 5.0;
const CELL_PADDING: f32 = 3.0;
const BORDER_WIDTH: f32 = 0.5;

const COLUMN_RATIOS: [f32; 6] = [1.0, 4.0, 1.0, 1.0, 1.0, 1.0];
const COLUMN_HEADERS: [&str; 6] = ["Item No", "Description", "Qty", "Rate", "Ext Cost", "Remarks"];
const COLUMN_ALIGN: [Align; 6] = [
    Align::Left,
    Align::Left,
    Align::Right,
    Align::Right,
    Align::Right,
    Align::Left,
];

fn band_color() -> Rgb {
    Rgb::from_u8(221, 155, 68)
}

fn or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

// =============================================================================
// Entry Point
// =============================================================================

/// Lays out every block of the quotation for `rfq`.
///
/// Stops with [`RenderError::Cancelled`] as soon as `cancel` fires.
pub fn layout(rfq: &Rfq, cancel: &CancellationToken) -> RenderResult<Canvas> {
    let mut canvas = Canvas::new();

    title(&mut canvas, "Quotation");

    canvas.paragraph(&format!("RFQ Date: {}", or_empty(&rfq.rfq_date)), Font::Bold, BODY_SIZE);
    canvas.paragraph(&format!("Quote #: {}", or_empty(&rfq.quote_number)), Font::Regular, BODY_SIZE);
    canvas.paragraph(&format!("Quote Date: {}", or_empty(&rfq.quote_date)), Font::Regular, BODY_SIZE);
    canvas.advance(BLOCK_GAP);

    section_band(&mut canvas, "Customer Information");
    canvas.paragraph(&rfq.customer.name, Font::Regular, BODY_SIZE);
    canvas.paragraph(&rfq.customer.address, Font::Regular, BODY_SIZE);
    canvas.paragraph(&rfq.customer.contact_line(), Font::Regular, BODY_SIZE);
    canvas.advance(BLOCK_GAP);

    section_band(&mut canvas, "Description");
    canvas.paragraph(or_empty(&rfq.description), Font::Regular, BODY_SIZE);
    canvas.advance(BLOCK_GAP);

    item_table(&mut canvas, rfq, cancel)?;
    canvas.advance(BLOCK_GAP);

    section_band(&mut canvas, "Remarks");
    canvas.paragraph(or_empty(&rfq.remarks), Font::Regular, BODY_SIZE);

    Ok(canvas)
}

// =============================================================================
// Blocks
// =============================================================================

fn title(canvas: &mut Canvas, text: &str) {
    let height = line_height(TITLE_SIZE);
    canvas.ensure_space(height);
    let baseline = canvas.cursor() - TITLE_SIZE;
    canvas.text_in(MARGIN, CONTENT_WIDTH, baseline, Align::Center, Font::Bold, TITLE_SIZE, text);
    canvas.advance(height + BLOCK_GAP);
}

/// Section label on a coloured band, kept on the same page as the first
/// line that follows it.
fn section_band(canvas: &mut Canvas, label: &str) {
    let height = line_height(LABEL_SIZE) + 2.0 * BAND_PADDING;
    canvas.ensure_space(height + line_height(BODY_SIZE));

    let top = canvas.cursor();
    canvas.fill_rect(MARGIN, top - height, CONTENT_WIDTH, height, band_color());
    canvas.text(MARGIN + BAND_PADDING, top - BAND_PADDING - LABEL_SIZE, Font::Bold, LABEL_SIZE, label);
    canvas.advance(height);
}

// =============================================================================
// Item Table
// =============================================================================

/// One table cell; `span` counts grid columns.
#[derive(Debug, Clone)]
struct Cell {
    text: String,
    span: usize,
    align: Align,
    font: Font,
}

impl Cell {
    fn new(text: impl Into<String>, align: Align) -> Self {
        Cell {
            text: text.into(),
            span: 1,
            align,
            font: Font::Regular,
        }
    }

    fn bold(mut self) -> Self {
        self.font = Font::Bold;
        self
    }

    fn spanning(mut self, span: usize) -> Self {
        self.span = span;
        self
    }
}

/// A cell resolved against the grid: position, width and wrapped lines.
struct Placed<'a> {
    cell: &'a Cell,
    x: f32,
    width: f32,
    lines: Vec<String>,
}

fn column_widths() -> [f32; 6] {
    let total: f32 = COLUMN_RATIOS.iter().sum();
    COLUMN_RATIOS.map(|ratio| CONTENT_WIDTH * ratio / total)
}

fn header_row() -> Vec<Cell> {
    COLUMN_HEADERS
        .iter()
        .zip(COLUMN_ALIGN)
        .map(|(label, align)| Cell::new(*label, align).bold())
        .collect()
}

fn item_row(item: &RfqItem) -> Vec<Cell> {
    let values = [
        item.item_no.clone(),
        item.description.clone(),
        format_quantity(item.qty),
        item.rate().to_string(),
        item.extended_cost().to_string(),
        String::new(),
    ];
    values
        .into_iter()
        .zip(COLUMN_ALIGN)
        .map(|(text, align)| Cell::new(text, align))
        .collect()
}

fn total_row(rfq: &Rfq) -> Vec<Cell> {
    vec![
        Cell::new("TOTAL", Align::Right).bold().spanning(4),
        Cell::new(rfq.grand_total().to_string(), Align::Right),
        Cell::new("", Align::Left),
    ]
}

/// Wraps each cell to its column span, truncating any row that could never
/// fit on one page below a repeated header.
fn place<'a>(cells: &'a [Cell], widths: &[f32; 6], max_lines: usize) -> Vec<Placed<'a>> {
    let mut x = MARGIN;
    let mut column = 0;

    cells
        .iter()
        .map(|cell| {
            let end = (column + cell.span).min(widths.len());
            let width: f32 = widths[column..end].iter().sum();
            column = end;

            let mut lines = metrics::wrap(&cell.text, cell.font, TABLE_SIZE, width - 2.0 * CELL_PADDING);
            if lines.len() > max_lines {
                lines.truncate(max_lines);
                if let Some(last) = lines.last_mut() {
                    last.push('…');
                }
            }

            let placed = Placed { cell, x, width, lines };
            x += width;
            placed
        })
        .collect()
}

fn row_height(placed: &[Placed<'_>]) -> f32 {
    let lines = placed.iter().map(|p| p.lines.len()).max().unwrap_or(1);
    lines as f32 * line_height(TABLE_SIZE) + 2.0 * CELL_PADDING
}

fn draw_row(canvas: &mut Canvas, placed: &[Placed<'_>], height: f32) {
    let top = canvas.cursor();
    let step = line_height(TABLE_SIZE);

    for p in placed {
        canvas.stroke_rect(p.x, top - height, p.width, height, BORDER_WIDTH);
        for (i, line) in p.lines.iter().enumerate() {
            let baseline = top - CELL_PADDING - TABLE_SIZE - i as f32 * step;
            canvas.text_in(
                p.x + CELL_PADDING,
                p.width - 2.0 * CELL_PADDING,
                baseline,
                p.cell.align,
                p.cell.font,
                TABLE_SIZE,
                line,
            );
        }
    }

    canvas.advance(height);
}

fn item_table(canvas: &mut Canvas, rfq: &Rfq, cancel: &CancellationToken) -> RenderResult<()> {
    let widths = column_widths();

    let header_cells = header_row();
    let header = place(&header_cells, &widths, usize::MAX);
    let header_height = row_height(&header);

    let usable = TOP - BOTTOM - header_height - 2.0 * CELL_PADDING;
    let max_lines = ((usable / line_height(TABLE_SIZE)).floor() as usize).max(1);

    let mut body: Vec<Vec<Cell>> = rfq.items.iter().map(item_row).collect();
    body.push(total_row(rfq));

    let mut header_pending = true;
    for cells in &body {
        if cancel.is_cancelled() {
            return Err(RenderError::Cancelled);
        }

        let row = place(cells, &widths, max_lines);
        let height = row_height(&row);

        if header_pending {
            // keep the header with the first row
            canvas.ensure_space(header_height + height);
        } else if canvas.ensure_space(height) {
            header_pending = true;
        }

        if header_pending {
            draw_row(canvas, &header, header_height);
            header_pending = false;
        }

        draw_row(canvas, &row, height);
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::Operation;
    use lopdf::Object;
    use rfq_core::{Customer, Decimal};

    fn shown_text(ops: &[Operation]) -> Vec<String> {
        ops.iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                // WinAnsi bytes, read back as Latin-1 for comparison
                Some(Object::String(bytes, _)) => Some(bytes.iter().map(|&b| b as char).collect()),
                _ => None,
            })
            .collect()
    }

    fn rfq_with_items(count: usize) -> Rfq {
        Rfq {
            id: 1,
            customer: Customer {
                name: "Acme".to_string(),
                ..Customer::default()
            },
            items: (0..count)
                .map(|i| RfqItem::new(format!("{i}"), "Part", Decimal::ONE, Decimal::ONE))
                .collect(),
            ..Rfq::default()
        }
    }

    fn pages_of(rfq: &Rfq) -> Vec<Vec<Operation>> {
        layout(rfq, &CancellationToken::new()).unwrap().into_pages()
    }

    #[test]
    fn test_column_widths_follow_ratios() {
        let widths = column_widths();
        assert!((widths.iter().sum::<f32>() - CONTENT_WIDTH).abs() < 0.01);
        assert!((widths[1] - 4.0 * widths[0]).abs() < 0.01);
    }

    #[test]
    fn test_item_row_formatting() {
        let item = RfqItem::new("A-1", "Bolt", Decimal::new(25, 1), Decimal::new(4, 0));
        let texts: Vec<String> = item_row(&item).into_iter().map(|c| c.text).collect();

        assert_eq!(texts, ["A-1", "Bolt", "2.5", "4.00", "10.00", ""]);
    }

    #[test]
    fn test_total_row_spans_four_columns() {
        let rfq = rfq_with_items(2);
        let row = total_row(&rfq);

        assert_eq!(row[0].text, "TOTAL");
        assert_eq!(row[0].span, 4);
        assert_eq!(row[0].align, Align::Right);
        assert_eq!(row[1].text, "2.00");
        assert_eq!(row[2].text, "");
    }

    #[test]
    fn test_labels_in_order() {
        let pages = pages_of(&rfq_with_items(1));
        let texts = shown_text(&pages[0]);
        let position = |label: &str| texts.iter().position(|t| t == label).unwrap();

        assert!(position("Quotation") < position("Customer Information"));
        assert!(position("Customer Information") < position("Description"));
        assert!(position("Item No") < position("TOTAL"));
        let remarks_band = texts.iter().rposition(|t| t == "Remarks").unwrap();
        assert!(position("TOTAL") < remarks_band);
        assert!(texts.iter().any(|t| t == "RFQ Date:"));
    }

    #[test]
    fn test_empty_item_list_still_has_header_and_total() {
        let pages = pages_of(&rfq_with_items(0));
        let texts = shown_text(&pages[0]);

        assert!(texts.iter().any(|t| t == "Item No"));
        assert!(texts.iter().any(|t| t == "TOTAL"));
        assert!(texts.iter().any(|t| t == "0.00"));
    }

    #[test]
    fn test_header_repeats_on_continuation_pages() {
        let pages = pages_of(&rfq_with_items(120));
        assert!(pages.len() > 1);

        let table_pages: Vec<_> = pages
            .iter()
            .filter(|ops| shown_text(ops).iter().any(|t| t == "Part"))
            .collect();
        assert!(table_pages.len() > 1);
        for ops in table_pages {
            assert!(shown_text(ops).iter().any(|t| t == "Item No"));
        }
    }

    #[test]
    fn test_oversized_description_is_truncated_to_one_page() {
        let mut rfq = rfq_with_items(0);
        rfq.items.push(RfqItem::new("X", vec!["word"; 4000].join(" "), Decimal::ONE, Decimal::ONE));

        let pages = pages_of(&rfq);
        let texts: Vec<String> = pages.iter().flat_map(|ops| shown_text(ops)).collect();

        // '…' is 0x85 in WinAnsi
        assert!(texts.iter().any(|t| t.ends_with('\u{85}')));
        assert!(texts.iter().any(|t| t == "TOTAL"));
    }

    #[test]
    fn test_table_rows_follow_item_order() {
        let mut rfq = rfq_with_items(0);
        for item_no in ["c", "a", "b"] {
            rfq.items.push(RfqItem::new(item_no, "Part", Decimal::ONE, Decimal::ONE));
        }

        let texts = shown_text(&pages_of(&rfq)[0]);
        let item_numbers: Vec<&str> = texts
            .iter()
            .map(String::as_str)
            .filter(|t| ["a", "b", "c"].contains(t))
            .collect();

        assert_eq!(item_numbers, ["c", "a", "b"]);
    }

    #[test]
    fn test_cancelled_layout_stops() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = layout(&rfq_with_items(10), &cancel);
        assert!(matches!(result, Err(RenderError::Cancelled)));
    }
}
