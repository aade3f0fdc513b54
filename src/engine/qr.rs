use super::classify::classify;
use super::{DecodeEngine, InputImage};
use crate::error::ScanError;
use crate::models::{BarcodeFormat, DecodedSymbol, Point};
use tracing::debug;

/// QR-only engine backed by rqrr grid detection
#[derive(Debug, Clone, Copy, Default)]
pub struct QrEngine;

impl QrEngine {
    /// Create the engine
    pub fn new() -> Self {
        Self
    }
}

impl DecodeEngine for QrEngine {
    fn process(&self, image: &InputImage) -> Result<Vec<DecodedSymbol>, ScanError> {
        let width = image.width();
        let luma = image.luma();
        if width == 0 || image.height() == 0 {
            return Ok(Vec::new());
        }

        let mut prepared =
            rqrr::PreparedImage::prepare_from_greyscale(width, image.height(), |x, y| luma[y * width + x]);
        let grids = prepared.detect_grids();
        debug!(grids = grids.len(), "detected QR grids");

        let mut symbols = Vec::with_capacity(grids.len());
        for (idx, grid) in grids.iter().enumerate() {
            match grid.decode() {
                Ok((meta, content)) => {
                    debug!(
                        grid = idx,
                        version = meta.version.0,
                        ecc_level = meta.ecc_level,
                        raw_value = %content,
                        "decoded grid"
                    );
                    let corners = grid.bounds.iter().map(|p| Point::new(p.x, p.y)).collect();
                    let payload = classify(&content);
                    symbols.push(
                        DecodedSymbol::new(Some(content), payload)
                            .with_format(BarcodeFormat::QrCode)
                            .with_corners(corners),
                    );
                }
                Err(err) => debug!(grid = idx, error = ?err, "grid failed to decode"),
            }
        }

        Ok(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_image_has_no_symbols() {
        let image = InputImage::from_luma(64, 64, vec![255; 64 * 64]).unwrap();
        let symbols = QrEngine::new().process(&image).unwrap();
        assert!(symbols.is_empty());
    }

    #[test]
    fn test_zero_sized_image() {
        let image = InputImage::from_luma(0, 0, Vec::new()).unwrap();
        assert!(QrEngine::new().process(&image).unwrap().is_empty());
    }
}
