use super::luma::rgb_to_luma;
use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::models::ImageReference;
use image::{DynamicImage, GenericImageView};
use tracing::debug;

/// Decodable image: a luma plane built from an image reference
#[derive(Debug, Clone)]
pub struct InputImage {
    width: usize,
    height: usize,
    luma: Vec<u8>,
}

impl InputImage {
    /// Load the file behind `reference`
    ///
    /// The format is sniffed from content, so capture entries whose extension
    /// does not match the written data still open. Images larger than
    /// `config.max_dim` are downscaled first.
    pub fn from_reference(reference: &ImageReference, config: &ScanConfig) -> Result<Self, ScanError> {
        let path = reference
            .to_path()
            .ok_or_else(|| ScanError::decode(format!("cannot open image reference {}", reference)))?;

        let img = image::io::Reader::open(&path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(ScanError::decode)?
            .decode()?;

        Ok(Self::from_dynamic(img, config.max_dim))
    }

    /// Build from an already decoded image
    pub fn from_dynamic(img: DynamicImage, max_dim: Option<u32>) -> Self {
        let (orig_w, orig_h) = img.dimensions();
        let img = match max_dim {
            Some(max_dim) if orig_w.max(orig_h) > max_dim => {
                let resized = img.resize(max_dim, max_dim, image::imageops::FilterType::Triangle);
                debug!(
                    from = ?(orig_w, orig_h),
                    to = ?resized.dimensions(),
                    "downscaled input image"
                );
                resized
            }
            _ => img,
        };

        let rgb = img.to_rgb8();
        let (width, height) = (rgb.width() as usize, rgb.height() as usize);
        let luma = rgb_to_luma(rgb.as_raw(), width, height);
        Self { width, height, luma }
    }

    /// Wrap an existing luma plane; `luma.len()` must be `width * height`
    pub fn from_luma(width: usize, height: usize, luma: Vec<u8>) -> Option<Self> {
        (luma.len() == width * height).then_some(Self { width, height, luma })
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Luma plane, row-major
    pub fn luma(&self) -> &[u8] {
        &self.luma
    }
}
