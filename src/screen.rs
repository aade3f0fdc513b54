//! Scanning screen controller
//!
//! The screen holds no view state of its own. The caller owns a
//! [`ScreenState`] and feeds it to [`ScanScreen::update`] together with every
//! [`Message`]: button presses, permission answers, activity results and
//! finished decodes. `update` applies the message and returns a [`Task`]
//! telling the caller whether a decode is now in flight.

use crate::acquisition::{
    AcquisitionFlow, ActivityLauncher, ActivityOutcome, ActivityTag, ImageAcquisition, MediaStore,
};
use crate::error::ScanError;
use crate::models::ImageReference;
use crate::permissions::{PermissionGate, PermissionProvider, RequestTag};
use crate::render::render;
use crate::scanner::{DecodeResult, PendingDecode, Scanner};
use tracing::{debug, warn};

/// Short user-visible notifications (toasts)
pub trait Notifier {
    /// Show `message` to the user
    fn notify(&mut self, message: &str);
}

/// Everything the screen displays
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenState {
    /// Image the next scan will decode
    pub image: Option<ImageReference>,
    /// Image shown in the preview
    pub preview: Option<ImageReference>,
    /// Multi-line result text
    pub result_text: String,
    /// Decodes submitted but not yet finished
    pub pending_scans: usize,
}

/// Input to the screen
#[derive(Debug)]
pub enum Message {
    /// "Capture image" button
    CaptureImagePressed,
    /// "Pick image" button
    PickImagePressed,
    /// "Scan" button
    ScanPressed,
    /// Answer to a permission request
    PermissionsResult {
        /// Request the answer belongs to
        tag: RequestTag,
        /// Grant flags in request order
        grants: Vec<bool>,
    },
    /// Camera or gallery activity finished
    ActivityResult {
        /// Activity the result belongs to
        tag: ActivityTag,
        /// What it returned
        outcome: ActivityOutcome,
    },
    /// A submitted decode completed
    DecodeFinished(DecodeResult),
}

/// Follow-up work requested by [`ScanScreen::update`]
#[derive(Debug)]
#[must_use]
pub enum Task {
    /// Nothing to do
    None,
    /// Wait for this decode, then send its result back as [`Message::DecodeFinished`]
    Decode(PendingDecode),
}

impl Task {
    /// True for [`Task::None`]
    pub fn is_none(&self) -> bool {
        matches!(self, Task::None)
    }
}

/// Wires the permission gate, acquisition, scanner and result view together
pub struct ScanScreen<P, M, L, N> {
    gate: PermissionGate<P>,
    acquisition: ImageAcquisition<M, L>,
    scanner: Scanner,
    notifier: N,
}

impl<P, M, L, N> ScanScreen<P, M, L, N>
where
    P: PermissionProvider,
    M: MediaStore,
    L: ActivityLauncher,
    N: Notifier,
{
    /// Assemble a screen from its host bindings
    pub fn new(permissions: P, media: M, launcher: L, scanner: Scanner, notifier: N) -> Self {
        Self {
            gate: PermissionGate::new(permissions),
            acquisition: ImageAcquisition::new(media, launcher),
            scanner,
            notifier,
        }
    }

    /// Permission provider
    pub fn permissions(&self) -> &P {
        self.gate.provider()
    }

    /// Permission provider, mutably
    pub fn permissions_mut(&mut self) -> &mut P {
        self.gate.provider_mut()
    }

    /// Media store
    pub fn media(&self) -> &M {
        self.acquisition.media()
    }

    /// Activity launcher
    pub fn launcher(&self) -> &L {
        self.acquisition.launcher()
    }

    /// Activity launcher, mutably
    pub fn launcher_mut(&mut self) -> &mut L {
        self.acquisition.launcher_mut()
    }

    /// Notifier
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Apply one message to `state`
    pub fn update(&mut self, state: &mut ScreenState, message: Message) -> Task {
        match message {
            Message::CaptureImagePressed => {
                if self.gate.has_camera_access() {
                    self.start(AcquisitionFlow::Camera, state);
                } else {
                    self.gate.request_camera_access();
                }
                Task::None
            }
            Message::PickImagePressed => {
                if self.gate.has_storage_access() {
                    self.start(AcquisitionFlow::Gallery, state);
                } else {
                    self.gate.request_storage_access();
                }
                Task::None
            }
            Message::ScanPressed => match self.scanner.submit(state.image.as_ref()) {
                Ok(pending) => {
                    state.pending_scans += 1;
                    Task::Decode(pending)
                }
                Err(err) => {
                    self.report(err);
                    Task::None
                }
            },
            Message::PermissionsResult { tag, grants } => {
                match self.gate.on_permissions_result(tag, &grants) {
                    Ok(Some(flow)) => self.start(flow, state),
                    Ok(None) => {}
                    Err(err) => self.report(err),
                }
                Task::None
            }
            Message::ActivityResult { tag, outcome } => {
                if let Err(err) = self.acquisition.on_activity_result(tag, state, outcome) {
                    self.report(err);
                }
                Task::None
            }
            Message::DecodeFinished(result) => {
                state.pending_scans = state.pending_scans.saturating_sub(1);
                match result {
                    Ok(symbols) => {
                        debug!(count = symbols.len(), "decode finished");
                        render(&symbols, &mut state.result_text);
                    }
                    Err(err) => self.report(err),
                }
                Task::None
            }
        }
    }

    fn start(&mut self, flow: AcquisitionFlow, state: &mut ScreenState) {
        match flow {
            AcquisitionFlow::Camera => {
                if let Err(err) = self.acquisition.pick_from_camera(state) {
                    self.report(err);
                }
            }
            AcquisitionFlow::Gallery => self.acquisition.pick_from_gallery(),
        }
    }

    fn report(&mut self, err: ScanError) {
        warn!(error = %err, "scan screen operation failed");
        self.notifier.notify(&err.to_string());
    }
}
