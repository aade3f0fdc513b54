//! Camera and gallery image acquisition

use crate::error::ScanError;
use crate::models::ImageReference;
use crate::screen::ScreenState;
use tracing::debug;

/// Title stored on every capture entry
pub const CAPTURE_TITLE: &str = "Sample Image";
/// Description stored on every capture entry
pub const CAPTURE_DESCRIPTION: &str = "Sample Image Description";

/// Acquisition route chosen after a permission grant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionFlow {
    /// Capture a new photo
    Camera,
    /// Pick an existing image
    Gallery,
}

/// Identifies which launched activity a result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityTag {
    /// Camera capture
    Camera,
    /// Gallery picker
    Gallery,
}

/// Result delivered by a launched activity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityOutcome {
    /// Finished successfully, possibly returning a reference
    Ok(Option<ImageReference>),
    /// Backed out or failed
    Cancelled,
}

/// Host media store that hands out writable image entries
pub trait MediaStore {
    /// Create a new empty entry and return its reference
    fn create_entry(&mut self, title: &str, description: &str) -> Result<ImageReference, ScanError>;
}

/// Host activities for capturing and picking images
///
/// Launching returns immediately; the outcome is delivered later tagged
/// with the matching [`ActivityTag`].
pub trait ActivityLauncher {
    /// Start the camera, writing the capture into `target`
    fn launch_camera(&mut self, target: &ImageReference);

    /// Start the gallery picker for images
    fn launch_gallery(&mut self);
}

/// Drives the camera and gallery flows against [`ScreenState`]
#[derive(Debug)]
pub struct ImageAcquisition<M, L> {
    media: M,
    launcher: L,
}

impl<M: MediaStore, L: ActivityLauncher> ImageAcquisition<M, L> {
    /// Combine a media store and an activity launcher
    pub fn new(media: M, launcher: L) -> Self {
        Self { media, launcher }
    }

    /// The media store
    pub fn media(&self) -> &M {
        &self.media
    }

    /// The activity launcher
    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// The activity launcher, mutably
    pub fn launcher_mut(&mut self) -> &mut L {
        &mut self.launcher
    }

    /// Create a capture entry, make it the current image, and start the camera
    ///
    /// The entry becomes current before the camera returns and stays current
    /// even if the capture is cancelled.
    pub fn pick_from_camera(&mut self, state: &mut ScreenState) -> Result<(), ScanError> {
        let entry = self.media.create_entry(CAPTURE_TITLE, CAPTURE_DESCRIPTION)?;
        debug!(image = %entry, "created capture entry");
        state.image = Some(entry.clone());
        self.launcher.launch_camera(&entry);
        Ok(())
    }

    /// Start the gallery picker
    pub fn pick_from_gallery(&mut self) {
        self.launcher.launch_gallery();
    }

    /// Route an activity result to its flow
    pub fn on_activity_result(
        &self,
        tag: ActivityTag,
        state: &mut ScreenState,
        outcome: ActivityOutcome,
    ) -> Result<(), ScanError> {
        match tag {
            ActivityTag::Camera => {
                self.on_camera_result(state, outcome);
                Ok(())
            }
            ActivityTag::Gallery => self.on_gallery_result(state, outcome),
        }
    }

    /// Show the capture entry once the camera wrote into it
    pub fn on_camera_result(&self, state: &mut ScreenState, outcome: ActivityOutcome) {
        match outcome {
            ActivityOutcome::Ok(_) => {
                debug!(image = ?state.image, "camera capture finished");
                state.preview = state.image.clone();
            }
            ActivityOutcome::Cancelled => debug!("camera capture cancelled"),
        }
    }

    /// Adopt the picked image, or report the cancel and keep the current one
    pub fn on_gallery_result(
        &self,
        state: &mut ScreenState,
        outcome: ActivityOutcome,
    ) -> Result<(), ScanError> {
        match outcome {
            ActivityOutcome::Ok(picked) => {
                debug!(image = ?picked, "gallery pick finished");
                state.image = picked.clone();
                state.preview = picked;
                Ok(())
            }
            ActivityOutcome::Cancelled => Err(ScanError::AcquisitionCancelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingStore {
        created: usize,
        fail: bool,
    }

    impl MediaStore for CountingStore {
        fn create_entry(&mut self, title: &str, description: &str) -> Result<ImageReference, ScanError> {
            assert_eq!(title, CAPTURE_TITLE);
            assert_eq!(description, CAPTURE_DESCRIPTION);
            if self.fail {
                return Err(ScanError::acquisition("read-only media store"));
            }
            self.created += 1;
            Ok(ImageReference::new(format!("file:///media/IMG_{}.png", self.created)))
        }
    }

    #[derive(Default)]
    struct RecordingLauncher {
        camera_targets: Vec<ImageReference>,
        gallery_launches: usize,
    }

    impl ActivityLauncher for RecordingLauncher {
        fn launch_camera(&mut self, target: &ImageReference) {
            self.camera_targets.push(target.clone());
        }

        fn launch_gallery(&mut self) {
            self.gallery_launches += 1;
        }
    }

    fn acquisition() -> ImageAcquisition<CountingStore, RecordingLauncher> {
        ImageAcquisition::new(CountingStore::default(), RecordingLauncher::default())
    }

    #[test]
    fn test_camera_targets_new_entry() {
        let mut acq = acquisition();
        let mut state = ScreenState::default();
        acq.pick_from_camera(&mut state).unwrap();

        let entry = ImageReference::new("file:///media/IMG_1.png");
        assert_eq!(state.image, Some(entry.clone()));
        assert_eq!(acq.launcher().camera_targets, vec![entry.clone()]);
        assert_eq!(state.preview, None);

        acq.on_camera_result(&mut state, ActivityOutcome::Ok(None));
        assert_eq!(state.preview, Some(entry));
    }

    #[test]
    fn test_camera_cancel_keeps_entry() {
        let mut acq = acquisition();
        let mut state = ScreenState::default();
        acq.pick_from_camera(&mut state).unwrap();
        acq.on_camera_result(&mut state, ActivityOutcome::Cancelled);

        assert_eq!(state.image, Some(ImageReference::new("file:///media/IMG_1.png")));
        assert_eq!(state.preview, None);
    }

    #[test]
    fn test_media_store_failure_leaves_state() {
        let mut acq = ImageAcquisition::new(
            CountingStore {
                fail: true,
                ..Default::default()
            },
            RecordingLauncher::default(),
        );
        let previous = ImageReference::new("file:///old.png");
        let mut state = ScreenState {
            image: Some(previous.clone()),
            ..Default::default()
        };

        let err = acq.pick_from_camera(&mut state).unwrap_err();
        assert!(matches!(err, ScanError::Acquisition { .. }));
        assert_eq!(state.image, Some(previous));
        assert!(acq.launcher().camera_targets.is_empty());
    }

    #[test]
    fn test_gallery_success_sets_image() {
        let mut acq = acquisition();
        let mut state = ScreenState::default();
        acq.pick_from_gallery();
        assert_eq!(acq.launcher().gallery_launches, 1);

        let picked = ImageReference::new("file:///gallery/qr.jpg");
        acq.on_activity_result(
            ActivityTag::Gallery,
            &mut state,
            ActivityOutcome::Ok(Some(picked.clone())),
        )
        .unwrap();
        assert_eq!(state.image, Some(picked.clone()));
        assert_eq!(state.preview, Some(picked));
    }

    #[test]
    fn test_gallery_cancel_keeps_image() {
        let acq = acquisition();

        let mut empty = ScreenState::default();
        assert_eq!(
            acq.on_gallery_result(&mut empty, ActivityOutcome::Cancelled),
            Err(ScanError::AcquisitionCancelled)
        );
        assert_eq!(empty.image, None);

        let existing = ImageReference::new("file:///gallery/old.jpg");
        let mut state = ScreenState {
            image: Some(existing.clone()),
            ..Default::default()
        };
        assert!(acq.on_gallery_result(&mut state, ActivityOutcome::Cancelled).is_err());
        assert_eq!(state.image, Some(existing));
    }
}
