//! Decoding engine boundary
//!
//! The screen only sees [`DecodeEngine`]: one [`InputImage`] in, zero or more
//! [`DecodedSymbol`]s out. [`MultiFormatEngine`] reads every supported
//! symbology and is the default; [`QrEngine`] reads QR codes only.

/// Payload classification for raw decoded text
pub mod classify;
mod input;
mod luma;
mod multi;
mod qr;

pub use classify::classify;
pub use input::InputImage;
pub use luma::rgb_to_luma;
pub use multi::MultiFormatEngine;
pub use qr::QrEngine;

use crate::error::ScanError;
use crate::models::DecodedSymbol;

/// Barcode decoding engine
///
/// Called from a worker thread, hence `Send + Sync`.
pub trait DecodeEngine: Send + Sync {
    /// Decode every symbol found in `image`
    fn process(&self, image: &InputImage) -> Result<Vec<DecodedSymbol>, ScanError>;
}
