use std::env;
use std::path::{Path, PathBuf};

use log::warn;

use super::encoding::TextEncoding;

/// AFIP's published QR endpoint; the base64 payload is appended to it.
pub const DEFAULT_QR_BASE_URL: &str = "https://www.afip.gob.ar/fe/qr/?p=";
/// Template used when no explicit template file is requested.
pub const DEFAULT_TEMPLATE_NAME: &str = "invoice_b_c.html";

/// Settings shared by every document-generation request of a service.
///
/// ```
/// use comprobante::core::{InvoiceConfig, TextEncoding};
///
/// let config = InvoiceConfig::default()
///     .with_template_dir("/srv/templates")
///     .with_encoding(TextEncoding::Latin1);
///
/// assert_eq!(
///     config.template_path(Some("invoice_a.html")),
///     std::path::PathBuf::from("/srv/templates/invoice_a.html")
/// );
/// assert_eq!(config.qr_url("eyJ2ZXIiOjF9"), "https://www.afip.gob.ar/fe/qr/?p=eyJ2ZXIiOjF9");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceConfig {
    template_dir: PathBuf,
    encoding: TextEncoding,
    qr_base_url: String,
    default_template: String,
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        Self {
            template_dir: default_template_dir(),
            encoding: TextEncoding::Utf8,
            qr_base_url: DEFAULT_QR_BASE_URL.to_string(),
            default_template: DEFAULT_TEMPLATE_NAME.to_string(),
        }
    }
}

/// The `assets` directory shipped with the crate.
pub fn default_template_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"))
}

impl InvoiceConfig {
    /// Defaults overlaid with `COMPROBANTE_TEMPLATE_DIR`, `COMPROBANTE_ENCODING`,
    /// `COMPROBANTE_QR_BASE_URL` and `COMPROBANTE_DEFAULT_TEMPLATE` when set.
    ///
    /// An unparseable encoding is logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = env::var("COMPROBANTE_TEMPLATE_DIR") {
            config.set_template_path(dir);
        }
        if let Ok(encoding) = env::var("COMPROBANTE_ENCODING") {
            match encoding.parse() {
                Ok(encoding) => config.set_encoding(encoding),
                Err(e) => warn!("ignoring COMPROBANTE_ENCODING: {e}"),
            }
        }
        if let Ok(url) = env::var("COMPROBANTE_QR_BASE_URL") {
            config.set_qr_base_url(url);
        }
        if let Ok(name) = env::var("COMPROBANTE_DEFAULT_TEMPLATE") {
            config.set_default_template(name);
        }
        config
    }

    /// Directory templates are resolved against.
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = dir.into();
        self
    }

    /// Encoding used to decode template files.
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// URL prefix the base64 QR payload is appended to.
    pub fn with_qr_base_url(mut self, url: impl Into<String>) -> Self {
        self.qr_base_url = url.into();
        self
    }

    /// Template file used when a request names none.
    pub fn with_default_template(mut self, file_name: impl Into<String>) -> Self {
        self.default_template = file_name.into();
        self
    }

    /// Set the directory templates are resolved against.
    pub fn set_template_path(&mut self, dir: impl Into<PathBuf>) {
        self.template_dir = dir.into();
    }

    /// Set the encoding used to decode template files.
    pub fn set_encoding(&mut self, encoding: TextEncoding) {
        self.encoding = encoding;
    }

    /// Set the QR URL prefix.
    pub fn set_qr_base_url(&mut self, url: impl Into<String>) {
        self.qr_base_url = url.into();
    }

    /// Set the template file used when a request names none.
    pub fn set_default_template(&mut self, file_name: impl Into<String>) {
        self.default_template = file_name.into();
    }

    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn qr_base_url(&self) -> &str {
        &self.qr_base_url
    }

    pub fn default_template(&self) -> &str {
        &self.default_template
    }

    /// Resolve a template file inside the template directory, falling back
    /// to the default template name.
    pub fn template_path(&self, file_name: Option<&str>) -> PathBuf {
        self.template_dir
            .join(file_name.unwrap_or(&self.default_template))
    }

    /// Full QR URL for an already-encoded payload.
    pub fn qr_url(&self, encoded_payload: &str) -> String {
        format!("{}{}", self.qr_base_url, encoded_payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = InvoiceConfig::default();
        assert_eq!(config.encoding(), TextEncoding::Utf8);
        assert_eq!(config.qr_base_url(), DEFAULT_QR_BASE_URL);
        assert_eq!(config.default_template(), "invoice_b_c.html");
        assert!(config.template_dir().ends_with("assets"));
    }

    #[test]
    fn default_template_path() {
        let config = InvoiceConfig::default().with_template_dir("/tmp/tpl");
        assert_eq!(config.template_path(None), PathBuf::from("/tmp/tpl/invoice_b_c.html"));
        assert_eq!(config.template_path(Some("a.html")), PathBuf::from("/tmp/tpl/a.html"));
    }

    #[test]
    fn setters_mutate() {
        let mut config = InvoiceConfig::default();
        config.set_template_path("/opt/x");
        config.set_encoding(TextEncoding::Latin1);
        config.set_qr_base_url("https://example.test/qr?p=");
        config.set_default_template("factura.html");
        assert_eq!(config.template_path(None), PathBuf::from("/opt/x/factura.html"));
        assert_eq!(config.encoding(), TextEncoding::Latin1);
        assert_eq!(config.qr_url("abc"), "https://example.test/qr?p=abc");
    }

    #[test]
    fn shipped_default_template_exists() {
        assert!(InvoiceConfig::default().template_path(None).is_file());
    }
}
