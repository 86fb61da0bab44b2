//! Invoice document pipeline.
//!
//! [`InvoiceDocumentService`] turns [`GenerateInvoiceParams`](crate::core::GenerateInvoiceParams)
//! into a rendered document:
//!
//! 1. derive the QR payload
//! 2. encode the QR URL as an image
//! 3. build the template context
//! 4. render the template
//! 5. render the document
//! 6. optionally persist it
//!
//! The QR encoder, template engine, document renderer and file access sit
//! behind the traits below so each stage can be swapped or faked.

mod service;
mod store;

use std::io;
use std::path::Path;

use serde_json::Value;

use crate::core::{Result, TextEncoding};

pub use service::{CreateFromPath, CreateFromTemplate, InvoiceDocumentService};
pub use store::LocalFileStore;

/// Encodes a URL into a displayable QR image (base64 / data URI).
pub trait QrEncoder: Send + Sync {
    fn encode(&self, content: &str) -> Result<String>;
}

/// Merges a JSON context into a template string.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, context: &Value) -> Result<String>;
}

/// Converts rendered markup into a binary document.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, markup: &str) -> Result<Vec<u8>>;
}

/// Template reads and document writes.
pub trait FileStore: Send + Sync {
    fn read_to_string(&self, path: &Path, encoding: TextEncoding) -> io::Result<String>;

    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}
