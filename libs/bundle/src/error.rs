//! Error types for bundle generation and encoding

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The serialized bundle exceeds QR capacity (or is otherwise
    /// unencodable). A configuration defect, not a data error: the chosen
    /// density comfortably exceeds worst-case bundle length.
    #[error("QR encoding error: {0}")]
    QrEncode(#[from] qrcode::types::QrError),
}

pub type Result<T> = std::result::Result<T, Error>;
