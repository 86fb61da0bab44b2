//! AFIP invoice QR payload derivation.
//!
//! See <https://www.afip.gob.ar/fe/qr/especificaciones.asp>.

use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::{InvoicePdfError, Result};
use super::invoice_type;
use super::types::{InvoiceHeader, InvoiceInfo, InvoiceMeta, NO_OVERRIDES};

/// Payload format version used when no override is given.
pub const DEFAULT_VERSION: u32 = 1;
/// Currency code used when no override is given (Argentine peso).
pub const DEFAULT_CURRENCY: &str = "PES";
/// Recipient document type used when no override is given (80 = CUIT).
pub const DEFAULT_RECIPIENT_DOC_TYPE: u16 = 80;
/// Authorization code type used when no override is given ("E" = CAE).
pub const DEFAULT_AUTH_CODE_TYPE: &str = "E";

/// The fully-resolved record embedded in the invoice QR code.
///
/// Serializes to JSON with the key names and order the regulator expects.
/// Amounts are written and read back digit for digit, which requires JSON
/// text: decode with [`QrPayload::from_base64`] or `serde_json::from_str`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
    pub ver: u32,
    pub fecha: NaiveDate,
    pub cuit: u64,
    pub pto_vta: u32,
    pub tipo_cmp: u16,
    pub nro_cmp: u64,
    #[serde(
        serialize_with = "super::json_number::serialize",
        deserialize_with = "super::json_number::deserialize_exact"
    )]
    pub importe: Decimal,
    pub moneda: String,
    #[serde(
        serialize_with = "super::json_number::serialize",
        deserialize_with = "super::json_number::deserialize_exact"
    )]
    pub ctz: Decimal,
    pub tipo_doc_rec: u16,
    pub nro_doc_rec: u64,
    pub tipo_cod_aut: String,
    pub cod_aut: u64,
}

impl QrPayload {
    /// Compact JSON form.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| InvoicePdfError::Payload(format!("failed to serialize QR payload: {e}")))
    }

    /// Standard base64 of the compact JSON form, as appended to the QR URL.
    pub fn to_base64(&self) -> Result<String> {
        Ok(BASE64.encode(self.to_json()?))
    }

    /// Decode a payload previously produced by [`QrPayload::to_base64`].
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|e| InvoicePdfError::Payload(format!("invalid base64: {e}")))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| InvoicePdfError::Payload(format!("invalid QR payload JSON: {e}")))
    }
}

/// Derive the QR payload from invoice data.
///
/// Overrides in `meta` win when present and truthy. The comparison type is
/// resolved first: an unknown `header.invoice_type` without a `tipo_cmp`
/// override fails with [`InvoicePdfError::InvalidInvoiceType`].
pub fn build_payload(
    header: &InvoiceHeader,
    meta: Option<&InvoiceMeta>,
    info: &InvoiceInfo,
) -> Result<QrPayload> {
    let meta = meta.unwrap_or(&NO_OVERRIDES);

    let tipo_cmp = resolve(meta.tipo_cmp.as_ref(), || {
        invoice_type::get(&header.invoice_type)
            .ok_or_else(|| InvoicePdfError::InvalidInvoiceType(header.invoice_type.clone()))
    })?;

    Ok(QrPayload {
        ver: resolve_or(meta.ver.as_ref(), DEFAULT_VERSION),
        fecha: info.cae_date,
        cuit: parse_integer("header.business.cuit", &header.business.cuit)?,
        pto_vta: parse_integer("header.business.salesPoint", &header.business.sales_point)?,
        tipo_cmp,
        nro_cmp: parse_integer(
            "header.business.invoiceNumber",
            &header.business.invoice_number,
        )?,
        importe: resolve(meta.importe.as_ref(), || {
            parse_amount("info.total", &info.total)
        })?,
        moneda: resolve_or(meta.moneda.as_ref(), DEFAULT_CURRENCY.to_string()),
        ctz: resolve_or(meta.ctz.as_ref(), Decimal::ONE),
        tipo_doc_rec: resolve_or(meta.tipo_doc_rec.as_ref(), DEFAULT_RECIPIENT_DOC_TYPE),
        nro_doc_rec: resolve(meta.nro_doc_rec.as_ref(), || {
            parse_integer("header.client.cuit", &header.client.cuit)
        })?,
        tipo_cod_aut: resolve_or(
            meta.tipo_cod_aut.as_ref(),
            DEFAULT_AUTH_CODE_TYPE.to_string(),
        ),
        cod_aut: parse_integer("info.caeNumber", &info.cae_number)?,
    })
}

/// Whether an override value counts as set.
trait Present {
    fn is_present(&self) -> bool;
}

macro_rules! impl_present_nonzero {
    ($($t:ty),*) => {
        $(impl Present for $t {
            fn is_present(&self) -> bool {
                *self != 0
            }
        })*
    };
}

impl_present_nonzero!(u16, u32, u64);

impl Present for Decimal {
    fn is_present(&self) -> bool {
        !self.is_zero()
    }
}

impl Present for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

/// Take the override if it is present, otherwise compute the fallback.
fn resolve<T, F>(overridden: Option<&T>, fallback: F) -> Result<T>
where
    T: Present + Clone,
    F: FnOnce() -> Result<T>,
{
    match overridden.filter(|v| v.is_present()) {
        Some(v) => Ok(v.clone()),
        None => fallback(),
    }
}

/// Take the override if it is present, otherwise the fixed default.
fn resolve_or<T: Present + Clone>(overridden: Option<&T>, default: T) -> T {
    overridden.filter(|v| v.is_present()).cloned().unwrap_or(default)
}

fn parse_integer<T: FromStr>(field: &'static str, raw: &str) -> Result<T> {
    let trimmed = raw.trim();
    let invalid = || InvoicePdfError::InvalidNumber {
        field,
        value: raw.to_string(),
    };
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    // Digits only, so this fails only on overflow.
    trimmed.parse().map_err(|_| invalid())
}

/// Integer digits AFIP accepts in an invoice amount.
pub const AMOUNT_INTEGER_DIGITS: u32 = 13;
/// Decimal places AFIP accepts in an invoice amount.
pub const AMOUNT_DECIMAL_PLACES: u32 = 2;

/// Parse a decimal amount that fits AFIP's 13 integer digits and 2 decimals.
///
/// Trailing zeros past the second decimal are accepted ("10.500").
fn parse_amount(field: &'static str, raw: &str) -> Result<Decimal> {
    let invalid = || InvoicePdfError::InvalidNumber {
        field,
        value: raw.to_string(),
    };
    let amount = Decimal::from_str(raw.trim()).map_err(|_| invalid())?.normalize();
    let limit = Decimal::from(10u64.pow(AMOUNT_INTEGER_DIGITS));
    if amount.scale() > AMOUNT_DECIMAL_PLACES || amount.abs().trunc() >= limit {
        return Err(invalid());
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{BusinessIdentity, ClientIdentity};
    use rust_decimal_macros::dec;

    fn header(invoice_type: &str) -> InvoiceHeader {
        InvoiceHeader::new(
            invoice_type,
            BusinessIdentity::new("30000000007", "10", "94"),
            ClientIdentity::new("20000000001"),
        )
    }

    fn info() -> InvoiceInfo {
        InvoiceInfo::new(
            "70417054367476",
            NaiveDate::from_ymd_opt(2020, 10, 13).unwrap(),
            "999",
        )
    }

    #[test]
    fn defaults_without_meta() {
        let payload = build_payload(&header("B"), None, &info()).unwrap();
        assert_eq!(
            payload,
            QrPayload {
                ver: 1,
                fecha: NaiveDate::from_ymd_opt(2020, 10, 13).unwrap(),
                cuit: 30000000007,
                pto_vta: 10,
                tipo_cmp: 6,
                nro_cmp: 94,
                importe: dec!(999),
                moneda: "PES".into(),
                ctz: dec!(1),
                tipo_doc_rec: 80,
                nro_doc_rec: 20000000001,
                tipo_cod_aut: "E".into(),
                cod_aut: 70417054367476,
            }
        );
    }

    #[test]
    fn overrides_win() {
        let meta = InvoiceMeta {
            ver: Some(2),
            importe: Some(dec!(12100)),
            moneda: Some("DOL".into()),
            ctz: Some(dec!(350.5)),
            tipo_doc_rec: Some(96),
            nro_doc_rec: Some(12345678),
            tipo_cod_aut: Some("A".into()),
            ..Default::default()
        };
        let payload = build_payload(&header("B"), Some(&meta), &info()).unwrap();
        assert_eq!(payload.ver, 2);
        assert_eq!(payload.importe, dec!(12100));
        assert_eq!(payload.moneda, "DOL");
        assert_eq!(payload.ctz, dec!(350.5));
        assert_eq!(payload.tipo_doc_rec, 96);
        assert_eq!(payload.nro_doc_rec, 12345678);
        assert_eq!(payload.tipo_cod_aut, "A");
    }

    #[test]
    fn falsy_overrides_fall_back() {
        let meta = InvoiceMeta {
            ver: Some(0),
            tipo_cmp: Some(0),
            importe: Some(Decimal::ZERO),
            moneda: Some(String::new()),
            nro_doc_rec: Some(0),
            ..Default::default()
        };
        let payload = build_payload(&header("C"), Some(&meta), &info()).unwrap();
        assert_eq!(payload.ver, 1);
        assert_eq!(payload.tipo_cmp, 11);
        assert_eq!(payload.importe, dec!(999));
        assert_eq!(payload.moneda, "PES");
        assert_eq!(payload.nro_doc_rec, 20000000001);
    }

    #[test]
    fn tipo_cmp_override_beats_unknown_type() {
        let meta = InvoiceMeta {
            tipo_cmp: Some(13),
            ..Default::default()
        };
        let payload = build_payload(&header("??"), Some(&meta), &info()).unwrap();
        assert_eq!(payload.tipo_cmp, 13);
    }

    #[test]
    fn unknown_type_fails() {
        let err = build_payload(&header("Z"), None, &info()).unwrap_err();
        assert!(matches!(err, InvoicePdfError::InvalidInvoiceType(ref t) if t == "Z"));
    }

    #[test]
    fn unknown_type_reported_before_number_errors() {
        let mut h = header("Z");
        h.business.cuit = "not a number".into();
        let err = build_payload(&h, None, &info()).unwrap_err();
        assert!(matches!(err, InvoicePdfError::InvalidInvoiceType(_)));
    }

    #[test]
    fn non_numeric_cuit_is_rejected() {
        let mut h = header("A");
        h.business.cuit = "30-00000000-7".into();
        let err = build_payload(&h, None, &info()).unwrap_err();
        assert!(matches!(
            err,
            InvoicePdfError::InvalidNumber { field: "header.business.cuit", .. }
        ));
    }

    #[test]
    fn non_numeric_total_is_rejected() {
        let mut i = info();
        i.total = "twelve".into();
        let err = build_payload(&header("A"), None, &i).unwrap_err();
        assert!(matches!(err, InvoicePdfError::InvalidNumber { field: "info.total", .. }));
    }

    #[test]
    fn total_override_skips_total_parsing() {
        let mut i = info();
        i.total = String::new();
        let meta = InvoiceMeta {
            importe: Some(dec!(10.5)),
            ..Default::default()
        };
        let payload = build_payload(&header("A"), Some(&meta), &i).unwrap();
        assert_eq!(payload.importe, dec!(10.5));
    }

    #[test]
    fn whitespace_is_trimmed() {
        let mut h = header("A");
        h.business.sales_point = " 0010 ".into();
        let payload = build_payload(&h, None, &info()).unwrap();
        assert_eq!(payload.pto_vta, 10);
    }

    #[test]
    fn json_uses_regulator_keys_in_order() {
        let payload = build_payload(&header("B"), None, &info()).unwrap();
        assert_eq!(
            payload.to_json().unwrap(),
            r#"{"ver":1,"fecha":"2020-10-13","cuit":30000000007,"ptoVta":10,"tipoCmp":6,"nroCmp":94,"importe":999,"moneda":"PES","ctz":1,"tipoDocRec":80,"nroDocRec":20000000001,"tipoCodAut":"E","codAut":70417054367476}"#
        );
    }

    #[test]
    fn base64_roundtrip() {
        let payload = build_payload(&header("B"), None, &info()).unwrap();
        let encoded = payload.to_base64().unwrap();
        assert_eq!(QrPayload::from_base64(&encoded).unwrap(), payload);
    }

    #[test]
    fn from_base64_rejects_garbage() {
        assert!(matches!(
            QrPayload::from_base64("%%%"),
            Err(InvoicePdfError::Payload(_))
        ));
        let not_json = BASE64.encode("hello");
        assert!(matches!(
            QrPayload::from_base64(&not_json),
            Err(InvoicePdfError::Payload(_))
        ));
    }

    #[test]
    fn total_beyond_afip_precision_is_rejected() {
        for total in ["12345678901234567.89", "10000000000000", "10.005"] {
            let mut i = info();
            i.total = total.into();
            let err = build_payload(&header("B"), None, &i).unwrap_err();
            assert!(
                matches!(err, InvoicePdfError::InvalidNumber { field: "info.total", ref value } if value == total),
                "{total}: {err:?}"
            );
        }
    }

    #[test]
    fn largest_afip_total_roundtrips_exactly() {
        let mut i = info();
        i.total = "9999999999999.99".into();
        let payload = build_payload(&header("B"), None, &i).unwrap();
        assert!(payload.to_json().unwrap().contains(r#""importe":9999999999999.99,"#));
        let back = QrPayload::from_base64(&payload.to_base64().unwrap()).unwrap();
        assert_eq!(back.importe, dec!(9999999999999.99));
    }

    #[test]
    fn trailing_zero_decimals_are_accepted() {
        let mut i = info();
        i.total = "10.500".into();
        let payload = build_payload(&header("B"), None, &i).unwrap();
        assert_eq!(payload.importe, dec!(10.5));
    }

    #[test]
    fn long_override_amounts_roundtrip_exactly() {
        let meta = InvoiceMeta {
            importe: Some(dec!(12345678901234567.89)),
            ctz: Some(dec!(1234567890123.123456)),
            ..Default::default()
        };
        let payload = build_payload(&header("B"), Some(&meta), &info()).unwrap();
        let back = QrPayload::from_base64(&payload.to_base64().unwrap()).unwrap();
        assert_eq!(back, payload);
    }

    fn number_error(h: &InvoiceHeader, i: &InvoiceInfo) -> (&'static str, String) {
        match build_payload(h, None, i).unwrap_err() {
            InvoicePdfError::InvalidNumber { field, value } => (field, value),
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn each_numeric_field_reports_its_path() {
        let mut h = header("B");
        h.business.sales_point = "10a".into();
        assert_eq!(number_error(&h, &info()), ("header.business.salesPoint", "10a".into()));

        let mut h = header("B");
        h.business.invoice_number = "".into();
        assert_eq!(number_error(&h, &info()), ("header.business.invoiceNumber", "".into()));

        let mut h = header("B");
        h.client.cuit = "20-00000000-1".into();
        assert_eq!(number_error(&h, &info()), ("header.client.cuit", "20-00000000-1".into()));

        let mut i = info();
        i.cae_number = "-1".into();
        assert_eq!(number_error(&header("B"), &i), ("info.caeNumber", "-1".into()));
    }

    #[test]
    fn client_cuit_is_not_parsed_when_overridden() {
        let mut h = header("B");
        h.client.cuit = "Consumidor final".into();
        let meta = InvoiceMeta {
            nro_doc_rec: Some(99),
            ..Default::default()
        };
        let payload = build_payload(&h, Some(&meta), &info()).unwrap();
        assert_eq!(payload.nro_doc_rec, 99);
    }

    #[test]
    fn overflowing_integers_are_rejected() {
        let mut h = header("B");
        h.business.sales_point = "4294967296".into();
        assert_eq!(number_error(&h, &info()), ("header.business.salesPoint", "4294967296".into()));

        let mut h = header("B");
        h.business.sales_point = "4294967295".into();
        assert_eq!(build_payload(&h, None, &info()).unwrap().pto_vta, u32::MAX);

        let mut i = info();
        i.cae_number = "18446744073709551616".into();
        assert_eq!(number_error(&header("B"), &i), ("info.caeNumber", "18446744073709551616".into()));
    }
}
