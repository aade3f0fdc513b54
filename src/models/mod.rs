/// Opaque image handles
pub mod image_ref;
/// Corner points
pub mod point;
/// Decoded symbols and their typed payloads
pub mod symbol;

pub use image_ref::ImageReference;
pub use point::Point;
pub use symbol::{
    BarcodeFormat, ContactInfo, DecodedSymbol, EmailInfo, EncryptionType, Phone, SymbolPayload, UrlBookmark,
    ValueType, WifiInfo,
};
