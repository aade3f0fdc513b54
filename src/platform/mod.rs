//! Desktop host bindings
//!
//! Stand-ins for the camera, gallery, media store, permission dialogs and
//! toasts, plus a small event loop that feeds their queued answers back into
//! the screen.

mod launcher;
mod media_store;
mod notifier;
mod permissions;

pub use launcher::FileLauncher;
pub use media_store::FsMediaStore;
pub use notifier::LogNotifier;
pub use permissions::ConfiguredPermissions;

use crate::config::ScanConfig;
use crate::engine::{DecodeEngine, MultiFormatEngine};
use crate::scanner::Scanner;
use crate::screen::{Message, ScanScreen, ScreenState, Task};
use std::collections::VecDeque;
use std::sync::Arc;

/// Screen wired to the desktop bindings
pub type DesktopScreen = ScanScreen<ConfiguredPermissions, FsMediaStore, FileLauncher, LogNotifier>;

/// Build a desktop screen that reads every supported barcode format
pub fn desktop_screen(
    config: &ScanConfig,
    permissions: ConfiguredPermissions,
    launcher: FileLauncher,
) -> DesktopScreen {
    desktop_screen_with_engine(config, Arc::new(MultiFormatEngine::new()), permissions, launcher)
}

/// Build a desktop screen around a specific engine
pub fn desktop_screen_with_engine(
    config: &ScanConfig,
    engine: Arc<dyn DecodeEngine>,
    permissions: ConfiguredPermissions,
    launcher: FileLauncher,
) -> DesktopScreen {
    ScanScreen::new(
        permissions,
        FsMediaStore::new(&config.media_dir),
        launcher,
        Scanner::new(engine, config.clone()),
        LogNotifier::stderr(),
    )
}

/// Deliver `message` and every follow-up it causes
///
/// Permission answers, activity results and decode results are fed back as
/// messages on this thread until the screen is idle again.
pub fn run_message(screen: &mut DesktopScreen, state: &mut ScreenState, message: Message) {
    let mut queue = VecDeque::from([message]);

    while let Some(message) = queue.pop_front() {
        if let Task::Decode(pending) = screen.update(state, message) {
            queue.push_back(Message::DecodeFinished(pending.wait()));
        }
        if let Some((tag, grants)) = screen.permissions_mut().take_answer() {
            queue.push_back(Message::PermissionsResult { tag, grants });
        }
        if let Some((tag, outcome)) = screen.launcher_mut().take_result() {
            queue.push_back(Message::ActivityResult { tag, outcome });
        }
    }
}
