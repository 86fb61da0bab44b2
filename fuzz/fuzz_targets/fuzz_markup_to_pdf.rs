#![no_main]

use comprobante::document::DocumentRenderer;
use comprobante::pdf::TextPdfRenderer;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(markup) = std::str::from_utf8(data) {
        // Arbitrary markup must render without panicking.
        let _ = TextPdfRenderer::default().render(markup);
    }
});
