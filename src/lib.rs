//! qr_scan - single-screen barcode scanning core
//!
//! Capture or pick an image, decode it, and render what the barcode holds:
//! Wi-Fi credentials, links, emails, contact cards, or plain text.
//!
//! The flow is permission gate → image acquisition → decode → result view.
//! Host services (permissions, camera, gallery, media store, toasts) sit
//! behind traits; [`platform`] provides desktop implementations.
//!
//! # Example
//! ```
//! use qr_scan::{render_symbol, engine::classify, DecodedSymbol};
//!
//! let raw = "WIFI:S:Net1;T:WPA;P:pw;;";
//! let symbol = DecodedSymbol::new(Some(raw.to_string()), classify(raw));
//! assert!(render_symbol(&symbol).starts_with("TYPE_WIFI \nssid: Net1"));
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Camera and gallery flows
pub mod acquisition;
/// Environment-driven settings
pub mod config;
/// Decoding engine boundary and the bundled engines
pub mod engine;
/// User-visible error taxonomy
pub mod error;
/// Core data structures (DecodedSymbol, ImageReference, ...)
pub mod models;
/// Permission gate
pub mod permissions;
/// Desktop host bindings
pub mod platform;
/// Result view formatting
pub mod render;
/// Decode invocation
pub mod scanner;
/// Screen controller
pub mod screen;

pub use acquisition::{ActivityLauncher, ActivityOutcome, ActivityTag, MediaStore};
pub use config::ScanConfig;
pub use engine::{DecodeEngine, InputImage, MultiFormatEngine, QrEngine};
pub use error::ScanError;
pub use models::{BarcodeFormat, DecodedSymbol, ImageReference, SymbolPayload, ValueType};
pub use permissions::{Permission, PermissionProvider, RequestTag};
pub use render::{encryption_label, render, render_symbol};
pub use scanner::{PendingDecode, Scanner};
pub use screen::{Message, Notifier, ScanScreen, ScreenState, Task};
