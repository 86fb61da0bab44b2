//! Minimal PDF output for rendered invoice markup.
//!
//! [`TextPdfRenderer`] does not lay out HTML/CSS. It extracts the visible
//! text, wraps it and writes it as Helvetica text on A4 pages. Deployments
//! needing full HTML fidelity plug their own [`DocumentRenderer`] into the
//! service.

mod text;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};

use crate::core::{InvoicePdfError, Result};
use crate::document::DocumentRenderer;

pub use text::{markup_to_lines, wrap};

/// A4 width in points.
pub const PAGE_WIDTH: i64 = 595;
/// A4 height in points.
pub const PAGE_HEIGHT: i64 = 842;

/// Renders markup as plain text pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPdfRenderer {
    pub font_size: i64,
    pub leading: i64,
    pub margin: i64,
    /// Wrap width in characters.
    pub chars_per_line: usize,
    /// Written to the document info dictionary when set.
    pub title: Option<String>,
}

impl Default for TextPdfRenderer {
    fn default() -> Self {
        Self {
            font_size: 10,
            leading: 14,
            margin: 50,
            chars_per_line: 95,
            title: None,
        }
    }
}

impl TextPdfRenderer {
    fn lines_per_page(&self) -> usize {
        ((PAGE_HEIGHT - 2 * self.margin) / self.leading.max(1)).max(1) as usize
    }

    fn page_content(&self, lines: &[String]) -> Content {
        let top = PAGE_HEIGHT - self.margin - self.font_size;
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), self.font_size.into()]),
            Operation::new("TL", vec![self.leading.into()]),
            Operation::new("Td", vec![self.margin.into(), top.into()]),
        ];
        for line in lines {
            operations.push(Operation::new(
                "Tj",
                vec![Object::String(win_ansi(line), StringFormat::Literal)],
            ));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));
        Content { operations }
    }
}

impl DocumentRenderer for TextPdfRenderer {
    fn render(&self, markup: &str) -> Result<Vec<u8>> {
        let lines: Vec<String> = markup_to_lines(markup)
            .iter()
            .flat_map(|line| wrap(line, self.chars_per_line.max(1)))
            .collect();

        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => Object::Reference(font_id),
            },
        });

        // An empty document still gets one blank page.
        let empty: &[String] = &[];
        let chunks: Vec<&[String]> = if lines.is_empty() {
            vec![empty]
        } else {
            lines.chunks(self.lines_per_page()).collect()
        };

        let mut kids = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            let encoded = self
                .page_content(chunk)
                .encode()
                .map_err(|e| InvoicePdfError::Render(format!("failed to encode page content: {e}")))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
                "Contents" => Object::Reference(content_id),
                "Resources" => Object::Reference(resources_id),
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut info = dictionary! {
            "Producer" => Object::string_literal("comprobante"),
        };
        if let Some(title) = &self.title {
            info.set("Title", Object::String(win_ansi(title), StringFormat::Literal));
        }
        let info_id = doc.add_object(info);
        doc.trailer.set("Info", Object::Reference(info_id));

        let mut output = Vec::new();
        doc.save_to(&mut output)
            .map_err(|e| InvoicePdfError::Render(format!("failed to save PDF: {e}")))?;
        Ok(output)
    }
}

/// Encode text for a WinAnsi Helvetica font; characters outside Latin-1 become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            code @ (0x20..=0x7E | 0xA0..=0xFF) => code as u8,
            _ => b'?',
        })
        .collect()
}
