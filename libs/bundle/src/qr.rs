//! QR encoding of the bundle payload
//!
//! The payload is the bundle's pretty-printed JSON, unchanged: the scannable
//! image carries exactly the bytes shown on screen. Error-correction level L
//! at the largest QR version holds ~2.9 KB; the worst-case bundle for the
//! shipped record shapes is ~2.7 KB. Overflow therefore indicates a
//! configuration defect and surfaces as [`Error::QrEncode`].
//!
//! [`Error::QrEncode`]: crate::error::Error::QrEncode

use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};

use crate::error::Result;

/// Render `payload` as an SVG QR code.
pub fn qr_svg(payload: &str) -> Result<String> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::L)?;
    Ok(code
        .render::<svg::Color>()
        .min_dimensions(256, 256)
        .build())
}
