//! AFIP comparison type codes ("tipo de comprobante").
//!
//! Maps the human-readable invoice type codes used in invoice headers
//! ("A", "B", "NCA", ...) to the numeric codes printed in the AFIP QR payload.

use std::fmt;

/// Check whether `code` is a known invoice type code.
pub fn has(code: &str) -> bool {
    lookup_index(code).is_some()
}

/// Look up the numeric comparison type for an invoice type code.
///
/// Returns `None` for unknown codes. Lookup is case-sensitive.
pub fn get(code: &str) -> Option<u16> {
    lookup_index(code).map(|i| INVOICE_TYPES[i].1)
}

fn lookup_index(code: &str) -> Option<usize> {
    INVOICE_TYPES
        .binary_search_by(|(candidate, _)| candidate.cmp(&code))
        .ok()
}

/// Sorted by code for binary search.
static INVOICE_TYPES: &[(&str, u16)] = &[
    ("A", 1),      // Factura A
    ("B", 6),      // Factura B
    ("C", 11),     // Factura C
    ("E", 19),     // Factura de exportación E
    ("FCEA", 201), // Factura de crédito electrónica MiPyMEs A
    ("FCEB", 206), // Factura de crédito electrónica MiPyMEs B
    ("FCEC", 211), // Factura de crédito electrónica MiPyMEs C
    ("M", 51),     // Factura M
    ("NCA", 3),    // Nota de crédito A
    ("NCB", 8),    // Nota de crédito B
    ("NCC", 13),   // Nota de crédito C
    ("NCE", 21),   // Nota de crédito E
    ("NCM", 53),   // Nota de crédito M
    ("NDA", 2),    // Nota de débito A
    ("NDB", 7),    // Nota de débito B
    ("NDC", 12),   // Nota de débito C
    ("NDE", 20),   // Nota de débito E
    ("NDM", 52),   // Nota de débito M
    ("RA", 4),     // Recibo A
    ("RB", 9),     // Recibo B
    ("RC", 15),    // Recibo C
];

/// Typed view over the invoice type table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvoiceType {
    code: &'static str,
    comparison_type: u16,
}

impl InvoiceType {
    /// Resolve an invoice type from its header code.
    pub fn from_code(code: &str) -> Option<Self> {
        lookup_index(code).map(|i| {
            let (code, comparison_type) = INVOICE_TYPES[i];
            Self {
                code,
                comparison_type,
            }
        })
    }

    /// Header code, e.g. "B".
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// AFIP numeric comparison type, e.g. 6 for "B".
    pub fn comparison_type(&self) -> u16 {
        self.comparison_type
    }

    /// All known invoice types in code order.
    pub fn all() -> impl Iterator<Item = InvoiceType> {
        INVOICE_TYPES
            .iter()
            .map(|&(code, comparison_type)| InvoiceType {
                code,
                comparison_type,
            })
    }
}

impl fmt::Display for InvoiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code, self.comparison_type)
    }
}
