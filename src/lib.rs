//! # comprobante
//!
//! Fiscal invoice documents for AFIP (Argentina): derives the QR payload the
//! regulator requires on every printed invoice, renders it into an HTML
//! template and turns the result into a PDF.
//!
//! Monetary QR fields use [`rust_decimal::Decimal`].
//! QR payload format: <https://www.afip.gob.ar/fe/qr/especificaciones.asp>.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use comprobante::core::*;
//!
//! let header = InvoiceHeader::new(
//!     "B",
//!     BusinessIdentity::new("30000000007", "10", "94"),
//!     ClientIdentity::new("20000000001"),
//! );
//! let info = InvoiceInfo::new(
//!     "70417054367476",
//!     NaiveDate::from_ymd_opt(2020, 10, 13).unwrap(),
//!     "12100",
//! );
//!
//! let payload = build_payload(&header, None, &info).unwrap();
//! assert_eq!(payload.tipo_cmp, 6);
//! assert_eq!(payload.moneda, "PES");
//!
//! let url = InvoiceConfig::default().qr_url(&payload.to_base64().unwrap());
//! assert!(url.starts_with("https://www.afip.gob.ar/fe/qr/?p="));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice types, QR payload, configuration, document service |
//! | `qr` | PNG QR code encoder |
//! | `template` | Handlebars template renderer with `row` / `sum` helpers |
//! | `pdf` | Text PDF renderer |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod document;

#[cfg(feature = "qr")]
pub mod qr;

#[cfg(feature = "template")]
pub mod template;

#[cfg(feature = "pdf")]
pub mod pdf;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;

#[cfg(feature = "core")]
pub use crate::document::{CreateFromPath, CreateFromTemplate, InvoiceDocumentService};
