use std::path::PathBuf;

/// Media store root override
pub const MEDIA_DIR_ENV: &str = "QR_SCAN_MEDIA_DIR";
/// Longest image side before downscaling; 0 disables
pub const MAX_DIM_ENV: &str = "QR_MAX_DIM";
/// Any value forces debug logging in the CLI
pub const DEBUG_ENV: &str = "QR_SCAN_DEBUG";

fn parse_env_u32(name: &str) -> Option<u32> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
}

fn parse_env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Runtime settings for the scanning screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Directory where capture entries are created
    pub media_dir: PathBuf,
    /// Downscale input images whose longest side exceeds this
    pub max_dim: Option<u32>,
    /// Verbose logging requested
    pub debug: bool,
}

impl ScanConfig {
    /// Defaults overlaid with `QR_SCAN_MEDIA_DIR`, `QR_MAX_DIM` and `QR_SCAN_DEBUG`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            media_dir: parse_env_path(MEDIA_DIR_ENV).unwrap_or(defaults.media_dir),
            max_dim: normalize_max_dim(parse_env_u32(MAX_DIM_ENV)),
            debug: std::env::var_os(DEBUG_ENV).is_some(),
        }
    }

    /// Replace the downscale limit; `Some(0)` disables it
    pub fn with_max_dim(mut self, max_dim: Option<u32>) -> Self {
        self.max_dim = normalize_max_dim(max_dim);
        self
    }

    /// Replace the media store root
    pub fn with_media_dir(mut self, media_dir: impl Into<PathBuf>) -> Self {
        self.media_dir = media_dir.into();
        self
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            media_dir: std::env::temp_dir().join("qr_scan").join("media"),
            max_dim: None,
            debug: false,
        }
    }
}

fn normalize_max_dim(value: Option<u32>) -> Option<u32> {
    match value {
        Some(0) | None => None,
        Some(v) => Some(v),
    }
}
