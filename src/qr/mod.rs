//! QR code images for the invoice QR URL.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};

use crate::core::{InvoicePdfError, Result};
use crate::document::QrEncoder;

/// Encodes content as a PNG QR code wrapped in a `data:image/png;base64,` URI,
/// ready for an `<img src>` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngQrEncoder {
    /// Minimum image side in pixels.
    pub min_size: u32,
    pub ec_level: EcLevel,
}

impl Default for PngQrEncoder {
    fn default() -> Self {
        Self {
            min_size: 200,
            ec_level: EcLevel::M,
        }
    }
}

impl PngQrEncoder {
    /// Raw PNG bytes of the QR code.
    pub fn png(&self, content: &str) -> Result<Vec<u8>> {
        let code = QrCode::with_error_correction_level(content.as_bytes(), self.ec_level)
            .map_err(|e| InvoicePdfError::QrEncode(e.to_string()))?;
        let image = code
            .render::<Luma<u8>>()
            .min_dimensions(self.min_size, self.min_size)
            .build();

        let mut png = Vec::new();
        DynamicImage::ImageLuma8(image)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| InvoicePdfError::QrEncode(format!("failed to write PNG: {e}")))?;
        Ok(png)
    }
}

impl QrEncoder for PngQrEncoder {
    fn encode(&self, content: &str) -> Result<String> {
        let png = self.png(content)?;
        Ok(format!("data:image/png;base64,{}", BASE64.encode(png)))
    }
}
