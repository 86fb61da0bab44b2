//! End-to-end tests with the bundled QR encoder, handlebars renderer and PDF renderer.

#![cfg(all(feature = "qr", feature = "template", feature = "pdf"))]

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::NaiveDate;
use comprobante::core::*;
use comprobante::document::{CreateFromPath, CreateFromTemplate, InvoiceDocumentService};
use lopdf::Document;
use lopdf::content::Content;
use serde_json::json;

fn params() -> GenerateInvoiceParams {
    GenerateInvoiceParams::new(
        InvoiceHeader::new(
            "C",
            BusinessIdentity::new("30000000007", "10", "94")
                .with_field("name", "Empresa imaginaria S.A.")
                .with_field("address", "Calle falsa 123"),
            ClientIdentity::new("20000000001").with_field("name", "Juan Pérez"),
        )
        .with_field("date", "2020-10-13"),
        InvoiceInfo::new(
            "70417054367476",
            NaiveDate::from_ymd_opt(2020, 10, 13).unwrap(),
            "12100",
        ),
    )
    .with_field(
        "items",
        json!([
            {"description": "Servicio de consultoría", "quantity": 1, "price": 10000, "subtotal": 10000},
            {"description": "Soporte", "quantity": 2, "price": 1050, "subtotal": 2100}
        ]),
    )
}

fn pdf_lines(pdf: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(pdf).unwrap();
    let mut lines = Vec::new();
    for (_, page_id) in doc.get_pages() {
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        for op in content.operations.iter().filter(|op| op.operator == "Tj") {
            let bytes = op.operands[0].as_str().unwrap();
            lines.push(bytes.iter().map(|&b| char::from(b)).collect());
        }
    }
    lines
}

#[test]
fn compiled_template_embeds_png_qr() {
    let svc = InvoiceDocumentService::with_defaults(InvoiceConfig::default());
    let html = svc
        .compile_template(r#"<img src="{{{qr}}}">"#, &params())
        .unwrap();
    let b64 = html
        .strip_prefix(r#"<img src="data:image/png;base64,"#)
        .and_then(|rest| rest.split('"').next())
        .unwrap();
    let png = BASE64.decode(b64).unwrap();
    assert!(png.starts_with(b"\x89PNG"));
}

#[test]
fn qr_image_is_deterministic() {
    let svc = InvoiceDocumentService::with_defaults(InvoiceConfig::default());
    assert_eq!(svc.qr_image(&params()).unwrap(), svc.qr_image(&params()).unwrap());
}

#[test]
fn default_template_renders_to_pdf() {
    let svc = InvoiceDocumentService::with_defaults(InvoiceConfig::default());
    let pdf = svc.create_document_from_path(&params(), &CreateFromPath::new()).unwrap();

    assert!(pdf.starts_with(b"%PDF"));
    let lines = pdf_lines(&pdf);
    assert!(lines.iter().any(|l| l == "Empresa imaginaria S.A."));
    assert!(lines.iter().any(|l| l == "Punto de Venta: 10 Comp. Nro: 94"));
    assert!(lines.iter().any(|l| l == "1 Servicio de consultoría 1 10000 10000"));
    assert!(lines.iter().any(|l| l == "2 Soporte 2 1050 2100"));
    assert!(lines.iter().any(|l| l == "Importe Total: $ 12100"));
    assert!(lines.iter().any(|l| l == "CAE N°: 70417054367476"));
}

#[test]
fn sum_helper_in_default_template() {
    let svc = InvoiceDocumentService::with_defaults(InvoiceConfig::default());
    let p = params()
        .with_field("subtotal", 12100)
        .with_field("otherTaxes", 250.5);
    let pdf = svc.create_document_from_path(&p, &CreateFromPath::new()).unwrap();
    let lines = pdf_lines(&pdf);
    assert!(lines.iter().any(|l| l == "Importe Total: $ 12350.5"));
}

#[test]
fn saved_pdf_matches_returned_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("factura.pdf");
    let svc = InvoiceDocumentService::with_defaults(InvoiceConfig::default());

    let pdf = svc
        .create_document_from_template(
            &params(),
            &CreateFromTemplate::new("<p>{{header.business.name}}</p>").save_in(&out),
        )
        .unwrap();

    assert_eq!(std::fs::read(&out).unwrap(), pdf);
    assert_eq!(pdf_lines(&pdf), vec!["Empresa imaginaria S.A.".to_string()]);
}

#[test]
fn template_syntax_error_is_reported() {
    let svc = InvoiceDocumentService::with_defaults(InvoiceConfig::default());
    let err = svc
        .create_document_from_template(&params(), &CreateFromTemplate::new("{{#if}}"))
        .unwrap_err();
    assert!(matches!(err, InvoicePdfError::Template(_)));
}
