use chrono::NaiveDate;
use comprobante::core::*;
use rust_decimal_macros::dec;

fn main() {
    let header = InvoiceHeader::new(
        "B",
        BusinessIdentity::new("30000000007", "10", "94"),
        ClientIdentity::new("20000000001"),
    );
    let info = InvoiceInfo::new(
        "70417054367476",
        NaiveDate::from_ymd_opt(2020, 10, 13).unwrap(),
        "999",
    );
    let config = InvoiceConfig::default();

    // ── 1. Derived payload ────────────────────────────────────────────
    println!("=== Derived ===");
    let payload = build_payload(&header, None, &info).unwrap();
    println!("  JSON: {}", payload.to_json().unwrap());
    println!("  URL:  {}", config.qr_url(&payload.to_base64().unwrap()));

    // ── 2. Overrides ──────────────────────────────────────────────────
    println!("\n=== Overrides ===");
    let meta = InvoiceMeta {
        importe: Some(dec!(12100)),
        moneda: Some("DOL".into()),
        ctz: Some(dec!(350.5)),
        ..Default::default()
    };
    let payload = build_payload(&header, Some(&meta), &info).unwrap();
    println!("  JSON: {}", payload.to_json().unwrap());

    // ── 3. Errors ─────────────────────────────────────────────────────
    println!("\n=== Errors ===");
    let unknown = InvoiceHeader::new(
        "Z",
        BusinessIdentity::new("30000000007", "10", "94"),
        ClientIdentity::new("20000000001"),
    );
    match build_payload(&unknown, None, &info) {
        Ok(_) => println!("  unexpected success"),
        Err(e) => println!("  {e}"),
    }
    let malformed = InvoiceHeader::new(
        "A",
        BusinessIdentity::new("30-00000000-7", "10", "94"),
        ClientIdentity::new("20000000001"),
    );
    match build_payload(&malformed, None, &info) {
        Ok(_) => println!("  unexpected success"),
        Err(e) => println!("  {e}"),
    }

    // ── 4. Known invoice types ────────────────────────────────────────
    println!("\n=== Invoice Types ===");
    for t in InvoiceType::all() {
        println!("  {t}");
    }
}
