//! # PDF Assembly
//!
//! Wraps laid-out pages into a PDF object graph and serializes it.
//!
//! ## Object Graph
//! ```text
//! trailer
//! ├── Root ──► Catalog ──► Pages { MediaBox A4, Resources }
//! │                          ├── Page 1 ──► content stream
//! │                          ├── Page 2 ──► content stream
//! │                          └── …
//! └── Info ──► { Title, Producer, CreationDate? }
//! ```
//!
//! Nothing here reads the clock or generates ids: the same pages and options
//! always serialize to the same bytes.

use chrono::{DateTime, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

use crate::error::{RenderError, RenderResult};
use crate::layout::{PAGE_HEIGHT, PAGE_WIDTH};
use crate::metrics::Font;
use crate::RenderOptions;

/// Producer entry of the document information dictionary.
pub const PRODUCER: &str = concat!("rfq-pdf ", env!("CARGO_PKG_VERSION"));

fn font_dictionary(font: Font) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

/// PDF date string, e.g. `D:20240501093000Z`.
pub fn pdf_date(at: DateTime<Utc>) -> String {
    at.format("D:%Y%m%d%H%M%SZ").to_string()
}

/// Builds the document for `pages` and returns the serialized bytes.
pub fn assemble(
    pages: Vec<Vec<Operation>>,
    title: &str,
    options: &RenderOptions,
) -> RenderResult<Vec<u8>> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(font_dictionary(Font::Regular));
    let bold_id = doc.add_object(font_dictionary(Font::Bold));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Font::Regular.resource_name() => regular_id,
            Font::Bold.resource_name() => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for (index, operations) in pages.into_iter().enumerate() {
        let content = Content { operations };
        let bytes = content
            .encode()
            .map_err(|e| RenderError::ContentEncoding {
                page: index + 1,
                message: e.to_string(),
            })?;

        let content_id = doc.add_object(Stream::new(dictionary! {}, bytes));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut info = dictionary! {
        "Title" => Object::string_literal(title),
        "Producer" => Object::string_literal(PRODUCER),
    };
    if let Some(at) = options.generated_at {
        info.set("CreationDate", Object::string_literal(pdf_date(at)));
    }
    let info_id = doc.add_object(info);
    doc.trailer.set("Info", info_id);

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| RenderError::Serialize(e.to_string()))?;
    Ok(out)
}
