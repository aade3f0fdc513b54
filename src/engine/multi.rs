use super::classify::classify;
use super::{DecodeEngine, InputImage};
use crate::error::ScanError;
use crate::models::{BarcodeFormat, DecodedSymbol, Point};
use rxing::{Exceptions, RXingResult};
use tracing::debug;

/// Engine that reads every supported symbology, linear and 2D, backed by rxing
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiFormatEngine;

impl MultiFormatEngine {
    /// Create the engine
    pub fn new() -> Self {
        Self
    }
}

impl DecodeEngine for MultiFormatEngine {
    fn process(&self, image: &InputImage) -> Result<Vec<DecodedSymbol>, ScanError> {
        if image.width() == 0 || image.height() == 0 {
            return Ok(Vec::new());
        }
        let width = u32::try_from(image.width()).map_err(ScanError::decode)?;
        let height = u32::try_from(image.height()).map_err(ScanError::decode)?;

        let results = match rxing::helpers::detect_multiple_in_luma(image.luma().to_vec(), width, height) {
            Ok(results) => results,
            Err(Exceptions::NotFoundException(_)) => {
                debug!("no barcode found");
                return Ok(Vec::new());
            }
            Err(err) => return Err(ScanError::decode(err)),
        };
        debug!(found = results.len(), "decoded barcodes");

        Ok(results.iter().map(to_symbol).collect())
    }
}

fn to_symbol(result: &RXingResult) -> DecodedSymbol {
    let text = result.getText().to_string();
    let format = map_format(result.getBarcodeFormat());
    debug!(format = ?format, raw_value = %text, "decoded symbol");

    let corners = result
        .getPoints()
        .iter()
        .map(|p| Point::new(p.x.round() as i32, p.y.round() as i32))
        .collect();
    let payload = classify(&text);
    DecodedSymbol::new(Some(text), payload)
        .with_format(format)
        .with_corners(corners)
}

fn map_format(format: &rxing::BarcodeFormat) -> BarcodeFormat {
    use rxing::BarcodeFormat as Rx;

    match format {
        Rx::CODE_128 => BarcodeFormat::Code128,
        Rx::CODE_39 => BarcodeFormat::Code39,
        Rx::CODE_93 => BarcodeFormat::Code93,
        Rx::CODABAR => BarcodeFormat::Codabar,
        Rx::DATA_MATRIX => BarcodeFormat::DataMatrix,
        Rx::EAN_13 => BarcodeFormat::Ean13,
        Rx::EAN_8 => BarcodeFormat::Ean8,
        Rx::ITF => BarcodeFormat::Itf,
        Rx::QR_CODE | Rx::MICRO_QR_CODE => BarcodeFormat::QrCode,
        Rx::UPC_A => BarcodeFormat::UpcA,
        Rx::UPC_E => BarcodeFormat::UpcE,
        Rx::PDF_417 => BarcodeFormat::Pdf417,
        Rx::AZTEC => BarcodeFormat::Aztec,
        _ => BarcodeFormat::Unknown,
    }
}
