use std::path::PathBuf;

use log::{debug, error, warn};
use serde_json::{Map, Value};

use super::{DocumentRenderer, FileStore, LocalFileStore, QrEncoder, TemplateRenderer};
use crate::core::{
    GenerateInvoiceParams, InvoiceConfig, InvoicePdfError, Result, TextEncoding, build_payload,
};

/// Context key holding the QR image.
pub(crate) const QR_CONTEXT_KEY: &str = "qr";

/// Render a document from an in-memory template.
#[derive(Debug, Clone)]
pub struct CreateFromTemplate {
    pub template: String,
    /// Where to persist the document; nothing is written when `None`.
    pub save_in: Option<PathBuf>,
}

impl CreateFromTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            save_in: None,
        }
    }

    pub fn save_in(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_in = Some(path.into());
        self
    }
}

/// Render a document from a template file.
///
/// Unset fields fall back to the service's [`InvoiceConfig`].
#[derive(Debug, Clone, Default)]
pub struct CreateFromPath {
    pub template_path: Option<PathBuf>,
    pub encoding: Option<TextEncoding>,
    pub save_in: Option<PathBuf>,
}

impl CreateFromPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn template_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_path = Some(path.into());
        self
    }

    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    pub fn save_in(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_in = Some(path.into());
        self
    }
}

/// Generates fiscal invoice documents with an embedded AFIP QR code.
///
/// Each call runs one linear pipeline; any failing stage aborts the request
/// and nothing is written to disk. Requests only need `&self`, changing the
/// configuration needs `&mut self`.
pub struct InvoiceDocumentService {
    config: InvoiceConfig,
    qr_encoder: Box<dyn QrEncoder>,
    template_renderer: Box<dyn TemplateRenderer>,
    document_renderer: Box<dyn DocumentRenderer>,
    file_store: Box<dyn FileStore>,
}

impl InvoiceDocumentService {
    /// Create a service reading and writing through the local filesystem.
    pub fn new(
        config: InvoiceConfig,
        qr_encoder: impl QrEncoder + 'static,
        template_renderer: impl TemplateRenderer + 'static,
        document_renderer: impl DocumentRenderer + 'static,
    ) -> Self {
        Self {
            config,
            qr_encoder: Box::new(qr_encoder),
            template_renderer: Box::new(template_renderer),
            document_renderer: Box::new(document_renderer),
            file_store: Box::new(LocalFileStore),
        }
    }

    /// Service wired to the bundled PNG QR encoder, handlebars renderer and
    /// text PDF renderer.
    #[cfg(all(feature = "qr", feature = "template", feature = "pdf"))]
    pub fn with_defaults(config: InvoiceConfig) -> Self {
        Self::new(
            config,
            crate::qr::PngQrEncoder::default(),
            crate::template::HandlebarsRenderer::new(),
            crate::pdf::TextPdfRenderer::default(),
        )
    }

    /// Replace the file store.
    pub fn with_file_store(mut self, store: impl FileStore + 'static) -> Self {
        self.file_store = Box::new(store);
        self
    }

    pub fn config(&self) -> &InvoiceConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut InvoiceConfig {
        &mut self.config
    }

    /// QR image for the invoice: payload JSON, base64, appended to the
    /// configured QR base URL, then encoded as an image.
    pub fn qr_image(&self, params: &GenerateInvoiceParams) -> Result<String> {
        let payload = build_payload(&params.header, params.meta.as_ref(), &params.info)?;
        let url = self.config.qr_url(&payload.to_base64()?);
        debug!(
            "encoding QR for invoice {}-{} (tipoCmp {})",
            payload.pto_vta, payload.nro_cmp, payload.tipo_cmp
        );
        self.qr_encoder.encode(&url)
    }

    /// Template context: `qr` plus every top-level field of `params`.
    ///
    /// Callers must not use `qr` as a field name; if they do, their value
    /// replaces the QR image.
    pub fn render_context(&self, params: &GenerateInvoiceParams) -> Result<Value> {
        let qr = self.qr_image(params)?;
        let fields = serde_json::to_value(params).map_err(|e| {
            InvoicePdfError::Payload(format!("failed to serialize invoice params: {e}"))
        })?;

        let mut context = Map::new();
        context.insert(QR_CONTEXT_KEY.to_string(), Value::String(qr));
        if let Value::Object(fields) = fields {
            for (key, value) in fields {
                if key == QR_CONTEXT_KEY {
                    warn!("invoice params field `{QR_CONTEXT_KEY}` overrides the generated QR image");
                }
                context.insert(key, value);
            }
        }
        Ok(Value::Object(context))
    }

    /// Render `template` with the invoice context.
    pub fn compile_template(&self, template: &str, params: &GenerateInvoiceParams) -> Result<String> {
        let context = self.render_context(params)?;
        self.template_renderer.render(template, &context)
    }

    /// Render a document from an in-memory template, persisting it when
    /// `request.save_in` is set.
    pub fn create_document_from_template(
        &self,
        params: &GenerateInvoiceParams,
        request: &CreateFromTemplate,
    ) -> Result<Vec<u8>> {
        let markup = self.compile_template(&request.template, params)?;
        let document = self.document_renderer.render(&markup)?;
        debug!("rendered invoice document ({} bytes)", document.len());

        if let Some(path) = &request.save_in {
            self.file_store.write(path, &document).map_err(|e| {
                InvoicePdfError::Write(format!("{}: {e}", path.display()))
            })?;
            debug!("saved invoice document to {}", path.display());
        }
        Ok(document)
    }

    /// Render a document from a template file.
    ///
    /// Without `template_path` the configured default template is used;
    /// without `encoding` the configured encoding.
    pub fn create_document_from_path(
        &self,
        params: &GenerateInvoiceParams,
        request: &CreateFromPath,
    ) -> Result<Vec<u8>> {
        let path = request
            .template_path
            .clone()
            .unwrap_or_else(|| self.config.template_path(None));
        let encoding = request.encoding.unwrap_or(self.config.encoding());

        let template = self.file_store.read_to_string(&path, encoding).map_err(|e| {
            error!("error reading invoice template {}: {e}", path.display());
            InvoicePdfError::TemplateRead(e.to_string())
        })?;

        self.create_document_from_template(
            params,
            &CreateFromTemplate {
                template,
                save_in: request.save_in.clone(),
            },
        )
    }
}

impl std::fmt::Debug for InvoiceDocumentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvoiceDocumentService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
