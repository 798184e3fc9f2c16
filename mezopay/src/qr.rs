//! SVG rendering of payment QR codes.
//!
//! The rendered code carries the `musd:pay` URI of a [`QrCodeData`] and
//! includes the standard four-module quiet zone.

use qrcode::QrCode;
use qrcode::render::svg;
use qrcode::types::QrError;

use crate::payment::QrCodeData;

/// Default edge length of a rendered code, in pixels.
pub const DEFAULT_QR_SIZE: u32 = 256;

/// The payment URI could not be encoded as a QR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("failed to encode QR code: {0}")]
pub struct QrRenderError(#[from] QrError);

impl QrRenderError {
    /// The underlying encoder error.
    #[must_use]
    pub const fn kind(&self) -> QrError {
        self.0
    }
}

/// Renders `data` as a square SVG QR code at least `size` pixels wide.
///
/// The edge is rounded up to a whole number of pixels per module, so the
/// result can be slightly larger than `size`.
///
/// # Errors
///
/// Returns [`QrRenderError`] when `data` is too long for any QR version.
pub fn render_svg(data: &str, size: u32) -> Result<String, QrRenderError> {
    let code = QrCode::new(data.as_bytes())?;
    Ok(code
        .render::<svg::Color<'_>>()
        .min_dimensions(size, size)
        .build())
}

impl QrCodeData {
    /// Renders the payment URI as an SVG QR code.
    ///
    /// # Errors
    ///
    /// See [`render_svg`].
    pub fn to_svg(&self, size: u32) -> Result<String, QrRenderError> {
        render_svg(&self.uri, size)
    }
}
