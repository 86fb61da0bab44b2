use thiserror::Error;

/// Errors that can occur while deriving the QR payload or producing an invoice document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InvoicePdfError {
    /// The comparison type code could neither be taken from the metadata
    /// override nor looked up from the header's invoice type.
    #[error("invalid invoice type to generate the invoice QR code: {0:?}")]
    InvalidInvoiceType(String),

    /// A numeric source field did not contain a valid number.
    #[error("invalid number in `{field}`: {value:?}")]
    InvalidNumber {
        /// Dot-separated path of the offending source field (e.g. "header.business.cuit").
        field: &'static str,
        /// The raw value as received.
        value: String,
    },

    /// The invoice template could not be loaded.
    #[error("error reading invoice template: {0}")]
    TemplateRead(String),

    /// Template compilation or rendering failed.
    #[error("template error: {0}")]
    Template(String),

    /// QR image generation failed.
    #[error("QR encoding error: {0}")]
    QrEncode(String),

    /// Document rendering failed.
    #[error("render error: {0}")]
    Render(String),

    /// Persisting the rendered document failed.
    #[error("error saving invoice document: {0}")]
    Write(String),

    /// QR payload (de)serialization failed.
    #[error("payload error: {0}")]
    Payload(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = InvoicePdfError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_read_message_keeps_io_detail() {
        let err = InvoicePdfError::TemplateRead("No such file or directory (os error 2)".into());
        assert_eq!(
            err.to_string(),
            "error reading invoice template: No such file or directory (os error 2)"
        );
    }

    #[test]
    fn invalid_number_names_field() {
        let err = InvoicePdfError::InvalidNumber {
            field: "header.business.cuit",
            value: "30-ABC".into(),
        };
        assert_eq!(err.to_string(), "invalid number in `header.business.cuit`: \"30-ABC\"");
    }
}
