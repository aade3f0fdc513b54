use crate::acquisition::{ActivityLauncher, ActivityOutcome, ActivityTag};
use crate::models::ImageReference;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Camera and gallery stand-ins that work on local files
///
/// The "camera" copies `camera_source` into the capture target; the
/// "gallery" returns `gallery_selection`. Outcomes are queued and picked up
/// by the event loop with [`FileLauncher::take_result`].
#[derive(Debug, Clone, Default)]
pub struct FileLauncher {
    camera_source: Option<PathBuf>,
    gallery_selection: Option<ImageReference>,
    pending: Option<(ActivityTag, ActivityOutcome)>,
}

impl FileLauncher {
    /// Launcher with nothing configured; every flow cancels
    pub fn new() -> Self {
        Self::default()
    }

    /// Image the camera "captures"
    pub fn with_camera_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.camera_source = Some(source.into());
        self
    }

    /// Image the gallery "picks"
    pub fn with_gallery_selection(mut self, selection: ImageReference) -> Self {
        self.gallery_selection = Some(selection);
        self
    }

    /// Take the queued activity result, if any
    pub fn take_result(&mut self) -> Option<(ActivityTag, ActivityOutcome)> {
        self.pending.take()
    }

    fn capture_into(&self, target: &ImageReference) -> ActivityOutcome {
        let (Some(source), Some(dest)) = (&self.camera_source, target.to_path()) else {
            return ActivityOutcome::Cancelled;
        };
        match fs::copy(source, &dest) {
            Ok(bytes) => {
                debug!(source = %source.display(), dest = %dest.display(), bytes, "captured image");
                ActivityOutcome::Ok(None)
            }
            Err(err) => {
                warn!(source = %source.display(), error = %err, "camera capture failed");
                ActivityOutcome::Cancelled
            }
        }
    }
}

impl ActivityLauncher for FileLauncher {
    fn launch_camera(&mut self, target: &ImageReference) {
        let outcome = self.capture_into(target);
        self.pending = Some((ActivityTag::Camera, outcome));
    }

    fn launch_gallery(&mut self) {
        let outcome = match &self.gallery_selection {
            Some(selection) if selection.to_path().is_some_and(|p| p.exists()) => {
                ActivityOutcome::Ok(Some(selection.clone()))
            }
            _ => ActivityOutcome::Cancelled,
        };
        self.pending = Some((ActivityTag::Gallery, outcome));
    }
}
