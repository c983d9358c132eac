//! # Font Metrics
//!
//! Advance widths and text encoding for the two standard Type1 fonts the
//! quotation uses. Standard fonts are never embedded, so the widths below
//! (from the Adobe Helvetica AFM files, in 1/1000 em) are what lets the
//! layout measure, wrap and right-align text.
//!
//! ## Encoding
//! ```text
//! &str ──encode()──► WinAnsi bytes ──► Tj operand
//!   │                    │
//!   │                    └── width()  → points at a given size
//!   └── chars outside WinAnsi become '?'
//! ```

/// The fonts registered on every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    /// Resource name used in content streams.
    pub const fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    /// PDF BaseFont name.
    pub const fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            Font::Regular => &HELVETICA,
            Font::Bold => &HELVETICA_BOLD,
        }
    }
}

// =============================================================================
// Width Tables (codes 0x20..=0x7E)
// =============================================================================

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // p..~
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width used for WinAnsi codes above 0x7E (accented Latin, quotes, dashes).
const EXTENDED_WIDTH: u16 = 556;

/// Replacement byte for characters WinAnsi cannot represent.
pub const REPLACEMENT: u8 = b'?';

// =============================================================================
// Encoding
// =============================================================================

/// Maps one char to its WinAnsiEncoding byte.
pub fn encode_char(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\t' => b' ',
        '\u{a0}'..='\u{ff}' => c as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => REPLACEMENT,
    }
}

/// Encodes a whole string for a `Tj` operand.
pub fn encode(text: &str) -> Vec<u8> {
    text.chars().map(encode_char).collect()
}

// =============================================================================
// Measurement
// =============================================================================

fn byte_width(byte: u8, font: Font) -> u16 {
    match byte {
        0x20..=0x7E => font.widths()[(byte - 0x20) as usize],
        _ => EXTENDED_WIDTH,
    }
}

/// Advance width of `c` in points at `size`.
pub fn char_width(c: char, font: Font, size: f32) -> f32 {
    byte_width(encode_char(c), font) as f32 * size / 1000.0
}

/// Advance width of `text` in points at `size`.
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| byte_width(encode_char(c), font) as u32)
        .sum();
    units as f32 * size / 1000.0
}

// =============================================================================
// Wrapping
// =============================================================================

/// Greedy word wrap to `max_width` points.
///
/// Explicit newlines always break. Runs of spaces inside a line are kept as
/// typed; the spaces at a break and at the end of a paragraph are dropped. A
/// word wider than the whole line is split between characters. Always returns
/// at least one (possibly empty) line.
pub fn wrap(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        let mut line = String::new();
        let mut line_width = 0.0_f32;

        for (gap, word) in gaps_and_words(paragraph) {
            let gap_width = text_width(gap, font, size);
            let word_width = text_width(word, font, size);

            if line_width + gap_width + word_width <= max_width {
                line.push_str(gap);
                line.push_str(word);
                line_width += gap_width + word_width;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_width = 0.0;
            }

            if word_width <= max_width {
                line.push_str(word);
                line_width = word_width;
                continue;
            }

            // Hard-break an oversized word.
            for c in word.chars() {
                let w = char_width(c, font, size);
                if line_width + w > max_width && !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0.0;
                }
                line.push(c);
                line_width += w;
            }
        }

        lines.push(line);
    }

    lines
}

/// Splits a paragraph into (preceding spaces, word) pairs. Trailing spaces
/// belong to no word and are not yielded.
fn gaps_and_words(paragraph: &str) -> impl Iterator<Item = (&str, &str)> {
    let mut rest = paragraph;
    std::iter::from_fn(move || {
        let word_start = rest.len() - rest.trim_start_matches(' ').len();
        let (gap, after) = rest.split_at(word_start);
        if after.is_empty() {
            return None;
        }
        let word_end = after.find(' ').unwrap_or(after.len());
        let (word, tail) = after.split_at(word_end);
        rest = tail;
        Some((gap, word))
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
