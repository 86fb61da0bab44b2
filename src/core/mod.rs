//! Invoice data types, AFIP invoice type lookup, QR payload derivation and
//! configuration.
//!
//! Everything here is pure; I/O lives in [`crate::document`].

mod config;
mod encoding;
mod error;
mod json_number;
pub mod invoice_type;
mod payload;
mod types;

pub use config::*;
pub use encoding::TextEncoding;
pub use error::*;
pub use invoice_type::InvoiceType;
pub use payload::*;
pub use types::*;
