use std::path::PathBuf;

use chrono::NaiveDate;
use comprobante::core::*;
use comprobante::document::{CreateFromPath, InvoiceDocumentService};
use serde_json::json;

fn main() {
    env_logger::init();

    let params = GenerateInvoiceParams::new(
        InvoiceHeader::new(
            "C",
            BusinessIdentity::new("30000000007", "10", "94")
                .with_field("name", "Empresa imaginaria S.A.")
                .with_field("address", "Calle falsa 123"),
            ClientIdentity::new("20000000001").with_field("name", "Cliente de prueba"),
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
            {"description": "Soporte mensual", "quantity": 2, "price": 1050, "subtotal": 2100}
        ]),
    );

    let out = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("factura_c.pdf"));

    let service = InvoiceDocumentService::with_defaults(InvoiceConfig::from_env());
    match service.create_document_from_path(&params, &CreateFromPath::new().save_in(&out)) {
        Ok(pdf) => println!("Wrote {} bytes to {}", pdf.len(), out.display()),
        Err(e) => {
            eprintln!("Failed to generate invoice: {e}");
            std::process::exit(1);
        }
    }
}
