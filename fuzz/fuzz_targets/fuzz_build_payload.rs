#![no_main]

use chrono::NaiveDate;
use comprobante::core::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|fields: (String, String, String, String, String, String, String)| {
    let (invoice_type, cuit, sales_point, number, client, cae, total) = fields;
    let header = InvoiceHeader::new(
        invoice_type,
        BusinessIdentity::new(cuit, sales_point, number),
        ClientIdentity::new(client),
    );
    let info = InvoiceInfo::new(cae, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), total);
    // Arbitrary field text must yield a payload or an error, never a panic.
    if let Ok(payload) = build_payload(&header, None, &info) {
        let _ = payload.to_base64();
    }
});
