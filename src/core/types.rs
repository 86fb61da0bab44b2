use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Invoice header: type code plus the issuing business and the client.
///
/// Field names serialize in camelCase so templates address them as
/// `header.business.salesPoint`, `header.client.cuit`, etc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceHeader {
    /// Human-readable invoice type code ("A", "B", "NCC", ...).
    #[serde(rename = "type")]
    pub invoice_type: String,
    /// Issuing business.
    pub business: BusinessIdentity,
    /// Invoice recipient.
    pub client: ClientIdentity,
    /// Additional header fields passed through to the template.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InvoiceHeader {
    /// Header with no extra fields.
    pub fn new(
        invoice_type: impl Into<String>,
        business: BusinessIdentity,
        client: ClientIdentity,
    ) -> Self {
        Self {
            invoice_type: invoice_type.into(),
            business,
            client,
            extra: Map::new(),
        }
    }

    /// Add a header field for the template.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Issuing business identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessIdentity {
    /// CUIT (tax id), digits only.
    pub cuit: String,
    /// Registered point of sale.
    pub sales_point: String,
    /// Invoice number within the sales point.
    pub invoice_number: String,
    /// Name, address, VAT condition and similar display fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BusinessIdentity {
    /// Identity from the three fields the QR payload needs.
    pub fn new(
        cuit: impl Into<String>,
        sales_point: impl Into<String>,
        invoice_number: impl Into<String>,
    ) -> Self {
        Self {
            cuit: cuit.into(),
            sales_point: sales_point.into(),
            invoice_number: invoice_number.into(),
            extra: Map::new(),
        }
    }

    /// Add a display field such as `name` or `address`.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Invoice recipient identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientIdentity {
    /// Recipient document number (CUIT by default).
    pub cuit: String,
    /// Display fields passed through to the template.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClientIdentity {
    pub fn new(cuit: impl Into<String>) -> Self {
        Self {
            cuit: cuit.into(),
            extra: Map::new(),
        }
    }

    /// Add a display field such as `name` or `address`.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Explicit overrides for QR payload fields.
///
/// Every field is optional. An override only applies when it is "truthy":
/// zero numbers and empty strings fall back to the derived or default value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ver: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_cmp: Option<u16>,
    #[serde(
        default,
        with = "super::json_number::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub importe: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moneda: Option<String>,
    #[serde(
        default,
        with = "super::json_number::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub ctz: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_doc_rec: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nro_doc_rec: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_cod_aut: Option<String>,
}

/// Overrides used when a request carries no metadata.
pub(crate) static NO_OVERRIDES: InvoiceMeta = InvoiceMeta {
    ver: None,
    tipo_cmp: None,
    importe: None,
    moneda: None,
    ctz: None,
    tipo_doc_rec: None,
    nro_doc_rec: None,
    tipo_cod_aut: None,
};

/// Authorization facts obtained from the tax authority for an issued invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceInfo {
    /// CAE authorization code.
    pub cae_number: String,
    /// Date the CAE was granted.
    pub cae_date: NaiveDate,
    /// Invoice total as reported to the authority.
    pub total: String,
    /// Additional computed facts passed through to the template.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InvoiceInfo {
    /// `total` is parsed when the payload is built, not here.
    pub fn new(cae_number: impl Into<String>, cae_date: NaiveDate, total: impl Into<String>) -> Self {
        Self {
            cae_number: cae_number.into(),
            cae_date,
            total: total.into(),
            extra: Map::new(),
        }
    }

    /// Add a computed fact for the template.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// One document-generation request: header, optional overrides, authorization
/// info, plus any additional top-level template fields (items, notes, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateInvoiceParams {
    pub header: InvoiceHeader,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<InvoiceMeta>,
    pub info: InvoiceInfo,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GenerateInvoiceParams {
    pub fn new(header: InvoiceHeader, info: InvoiceInfo) -> Self {
        Self {
            header,
            meta: None,
            info,
            extra: Map::new(),
        }
    }

    /// Attach QR payload overrides.
    pub fn meta(mut self, meta: InvoiceMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Add a top-level template field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}
