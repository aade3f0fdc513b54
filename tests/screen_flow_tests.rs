//! Integration tests for the scanning screen
//!
//! Host services are replaced by recording fakes; the decoding engine returns
//! canned symbols so the tests exercise the flow rather than the decoder.

use qr_scan::models::{ContactInfo, WifiInfo};
use qr_scan::{
    ActivityLauncher, ActivityOutcome, ActivityTag, DecodeEngine, DecodedSymbol, ImageReference,
    InputImage, MediaStore, Message, Notifier, Permission, PermissionProvider, RequestTag,
    ScanConfig, ScanError, ScanScreen, Scanner, ScreenState, SymbolPayload, Task, ValueType,
};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakePermissions {
    granted: HashSet<Permission>,
    requests: Vec<RequestTag>,
}

impl PermissionProvider for FakePermissions {
    fn is_granted(&self, permission: Permission) -> bool {
        self.granted.contains(&permission)
    }

    fn request(&mut self, tag: RequestTag, _permissions: &[Permission]) {
        self.requests.push(tag);
    }
}

#[derive(Default)]
struct FakeMedia {
    created: usize,
}

impl MediaStore for FakeMedia {
    fn create_entry(&mut self, _title: &str, _description: &str) -> Result<ImageReference, ScanError> {
        self.created += 1;
        Ok(ImageReference::new(format!("file:///media/capture_{}.png", self.created)))
    }
}

#[derive(Default)]
struct FakeLauncher {
    camera: Vec<ImageReference>,
    gallery: usize,
}

impl ActivityLauncher for FakeLauncher {
    fn launch_camera(&mut self, target: &ImageReference) {
        self.camera.push(target.clone());
    }

    fn launch_gallery(&mut self) {
        self.gallery += 1;
    }
}

#[derive(Default)]
struct FakeNotifier {
    messages: Vec<String>,
}

impl Notifier for FakeNotifier {
    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

struct CannedEngine {
    symbols: Mutex<Vec<DecodedSymbol>>,
    calls: AtomicUsize,
}

impl CannedEngine {
    fn returning(symbols: Vec<DecodedSymbol>) -> Arc<Self> {
        Arc::new(Self {
            symbols: Mutex::new(symbols),
            calls: AtomicUsize::new(0),
        })
    }
}

impl DecodeEngine for CannedEngine {
    fn process(&self, _image: &InputImage) -> Result<Vec<DecodedSymbol>, ScanError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.symbols.lock().unwrap().clone())
    }
}

type TestScreen = ScanScreen<FakePermissions, FakeMedia, FakeLauncher, FakeNotifier>;

fn screen_with(engine: Arc<CannedEngine>, granted: &[Permission]) -> TestScreen {
    ScanScreen::new(
        FakePermissions {
            granted: granted.iter().copied().collect(),
            ..Default::default()
        },
        FakeMedia::default(),
        FakeLauncher::default(),
        Scanner::new(engine, ScanConfig::default()),
        FakeNotifier::default(),
    )
}

fn blank_png(name: &str) -> ImageReference {
    let dir = std::env::temp_dir().join(format!("qr_scan_flow_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path: PathBuf = dir.join(name);
    image::RgbImage::from_pixel(32, 32, image::Rgb([255, 255, 255]))
        .save(&path)
        .unwrap();
    ImageReference::from_path(path)
}

fn finish(screen: &mut TestScreen, state: &mut ScreenState, task: Task) {
    match task {
        Task::Decode(pending) => {
            let result = pending.wait();
            assert!(screen.update(state, Message::DecodeFinished(result)).is_none());
        }
        Task::None => panic!("expected a decode task"),
    }
}

fn wifi_symbol() -> DecodedSymbol {
    DecodedSymbol::new(
        Some("WIFI:...".into()),
        SymbolPayload::Wifi(WifiInfo {
            ssid: Some("Net1".into()),
            password: Some("pw".into()),
            encryption_type: Some(2),
        }),
    )
}

fn text_symbol(text: &str) -> DecodedSymbol {
    DecodedSymbol::new(Some(text.into()), SymbolPayload::Other(ValueType::Text))
}

#[test]
fn test_capture_with_access_launches_camera() {
    let mut screen = screen_with(CannedEngine::returning(vec![]), &[Permission::Camera, Permission::Storage]);
    let mut state = ScreenState::default();

    assert!(screen.update(&mut state, Message::CaptureImagePressed).is_none());
    let entry = ImageReference::new("file:///media/capture_1.png");
    assert_eq!(screen.launcher().camera, vec![entry.clone()]);
    assert_eq!(state.image, Some(entry.clone()));
    assert!(screen.permissions().requests.is_empty());

    let _ = screen.update(
        &mut state,
        Message::ActivityResult {
            tag: ActivityTag::Camera,
            outcome: ActivityOutcome::Ok(None),
        },
    );
    assert_eq!(state.preview, Some(entry));
    assert!(screen.notifier().messages.is_empty());
}

#[test]
fn test_capture_needs_camera_and_storage() {
    let combos: [&[Permission]; 4] = [
        &[],
        &[Permission::Camera],
        &[Permission::Storage],
        &[Permission::Camera, Permission::Storage],
    ];
    for granted in combos {
        let mut screen = screen_with(CannedEngine::returning(vec![]), granted);
        let mut state = ScreenState::default();
        let _ = screen.update(&mut state, Message::CaptureImagePressed);

        let both = granted.len() == 2;
        assert_eq!(screen.launcher().camera.len(), usize::from(both), "granted: {granted:?}");
        assert_eq!(
            screen.permissions().requests,
            if both { vec![] } else { vec![RequestTag::Camera] },
            "granted: {granted:?}"
        );
    }
}

#[test]
fn test_camera_permission_answers() {
    let mut screen = screen_with(CannedEngine::returning(vec![]), &[]);
    let mut state = ScreenState::default();

    let _ = screen.update(
        &mut state,
        Message::PermissionsResult {
            tag: RequestTag::Camera,
            grants: vec![true, false],
        },
    );
    assert!(screen.launcher().camera.is_empty());
    assert_eq!(
        screen.notifier().messages,
        vec!["Camera & Storage Permission are required".to_string()]
    );
    assert_eq!(state.image, None);

    let _ = screen.update(
        &mut state,
        Message::PermissionsResult {
            tag: RequestTag::Camera,
            grants: vec![true, true],
        },
    );
    assert_eq!(screen.launcher().camera.len(), 1);
    assert!(state.image.is_some());
}

#[test]
fn test_pick_requests_storage_then_opens_gallery() {
    let mut screen = screen_with(CannedEngine::returning(vec![]), &[]);
    let mut state = ScreenState::default();

    let _ = screen.update(&mut state, Message::PickImagePressed);
    assert_eq!(screen.permissions().requests, vec![RequestTag::Storage]);
    assert_eq!(screen.launcher().gallery, 0);

    let _ = screen.update(
        &mut state,
        Message::PermissionsResult {
            tag: RequestTag::Storage,
            grants: vec![false],
        },
    );
    assert_eq!(screen.launcher().gallery, 0);
    assert_eq!(
        screen.notifier().messages,
        vec!["Storage permission is required...".to_string()]
    );

    let _ = screen.update(
        &mut state,
        Message::PermissionsResult {
            tag: RequestTag::Storage,
            grants: vec![true],
        },
    );
    assert_eq!(screen.launcher().gallery, 1);
}

#[test]
fn test_dismissed_permission_dialog_is_silent() {
    let mut screen = screen_with(CannedEngine::returning(vec![]), &[]);
    let mut state = ScreenState::default();
    let _ = screen.update(
        &mut state,
        Message::PermissionsResult {
            tag: RequestTag::Camera,
            grants: vec![],
        },
    );
    assert!(screen.notifier().messages.is_empty());
    assert!(screen.launcher().camera.is_empty());
}

#[test]
fn test_gallery_result_sets_or_keeps_image() {
    let picked = ImageReference::new("file:///gallery/R.png");
    let previous = ImageReference::new("file:///gallery/V.png");

    let mut screen = screen_with(CannedEngine::returning(vec![]), &[Permission::Storage]);
    let mut state = ScreenState::default();
    let _ = screen.update(
        &mut state,
        Message::ActivityResult {
            tag: ActivityTag::Gallery,
            outcome: ActivityOutcome::Ok(Some(picked.clone())),
        },
    );
    assert_eq!(state.image, Some(picked));

    for prior in [None, Some(previous)] {
        let mut screen = screen_with(CannedEngine::returning(vec![]), &[Permission::Storage]);
        let mut state = ScreenState {
            image: prior.clone(),
            ..Default::default()
        };
        let _ = screen.update(
            &mut state,
            Message::ActivityResult {
                tag: ActivityTag::Gallery,
                outcome: ActivityOutcome::Cancelled,
            },
        );
        assert_eq!(state.image, prior);
        assert_eq!(screen.notifier().messages, vec!["Cancelled".to_string()]);
    }
}

#[test]
fn test_scan_without_image() {
    let engine = CannedEngine::returning(vec![wifi_symbol()]);
    let mut screen = screen_with(engine.clone(), &[]);
    let mut state = ScreenState::default();

    let task = screen.update(&mut state, Message::ScanPressed);
    assert!(task.is_none());
    assert_eq!(screen.notifier().messages, vec!["Pick Image First".to_string()]);
    assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    assert_eq!(state.pending_scans, 0);
}

#[test]
fn test_wifi_end_to_end_text() {
    let engine = CannedEngine::returning(vec![wifi_symbol()]);
    let mut screen = screen_with(engine.clone(), &[]);
    let mut state = ScreenState {
        image: Some(blank_png("wifi.png")),
        ..Default::default()
    };

    let task = screen.update(&mut state, Message::ScanPressed);
    assert_eq!(state.pending_scans, 1);
    finish(&mut screen, &mut state, task);

    assert_eq!(
        state.result_text,
        "TYPE_WIFI \nssid: Net1 \npassword: pw \nencryptionType: WPA \n\nrawValue: WIFI:..."
    );
    assert_eq!(state.pending_scans, 0);
    assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_empty_result_keeps_text() {
    let mut screen = screen_with(CannedEngine::returning(vec![]), &[]);
    let mut state = ScreenState {
        image: Some(blank_png("empty.png")),
        result_text: "earlier result".into(),
        ..Default::default()
    };
    let task = screen.update(&mut state, Message::ScanPressed);
    finish(&mut screen, &mut state, task);
    assert_eq!(state.result_text, "earlier result");
    assert!(screen.notifier().messages.is_empty());
}

#[test]
fn test_last_symbol_wins() {
    let second = text_symbol("second");
    let engine = CannedEngine::returning(vec![wifi_symbol(), second]);
    let mut screen = screen_with(engine, &[]);
    let mut state = ScreenState {
        image: Some(blank_png("two.png")),
        ..Default::default()
    };
    let task = screen.update(&mut state, Message::ScanPressed);
    finish(&mut screen, &mut state, task);
    assert_eq!(state.result_text, "rawValue: second ");
}

#[test]
fn test_contact_without_phone() {
    let contact = DecodedSymbol::new(
        Some("MECARD:N:Lovelace,Ada;;".into()),
        SymbolPayload::ContactInfo(ContactInfo {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            ..Default::default()
        }),
    );
    let mut screen = screen_with(CannedEngine::returning(vec![contact]), &[]);
    let mut state = ScreenState {
        image: Some(blank_png("contact.png")),
        ..Default::default()
    };
    let task = screen.update(&mut state, Message::ScanPressed);
    finish(&mut screen, &mut state, task);
    assert_eq!(
        state.result_text,
        "TYPE_CONTACT_INFO \ntitle: null \norganization: null \nname: Ada Lovelace \nphone:  \n\nrawValue: MECARD:N:Lovelace,Ada;;"
    );
}

#[test]
fn test_decode_failure_is_reported() {
    let engine = CannedEngine::returning(vec![wifi_symbol()]);
    let mut screen = screen_with(engine.clone(), &[]);
    let mut state = ScreenState {
        image: Some(ImageReference::from_path("/nonexistent/qr_scan/photo.png")),
        result_text: "kept".into(),
        ..Default::default()
    };
    let task = screen.update(&mut state, Message::ScanPressed);
    finish(&mut screen, &mut state, task);

    assert_eq!(state.result_text, "kept");
    assert_eq!(screen.notifier().messages.len(), 1);
    assert!(screen.notifier().messages[0].starts_with("Failed scanning due to "));
    assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_overlapping_scans_last_delivery_wins() {
    let mut screen = screen_with(CannedEngine::returning(vec![]), &[]);
    let mut state = ScreenState {
        image: Some(blank_png("overlap.png")),
        ..Default::default()
    };

    let first = screen.update(&mut state, Message::ScanPressed);
    let second = screen.update(&mut state, Message::ScanPressed);
    assert_eq!(state.pending_scans, 2);
    assert!(!first.is_none() && !second.is_none());

    let _ = screen.update(&mut state, Message::DecodeFinished(Ok(vec![text_symbol("late")])));
    let _ = screen.update(&mut state, Message::DecodeFinished(Ok(vec![text_symbol("early")])));
    assert_eq!(state.result_text, "rawValue: early ");
    assert_eq!(state.pending_scans, 0);

    // results of the real tasks are still delivered exactly once
    for task in [first, second] {
        if let Task::Decode(pending) = task {
            assert!(pending.wait().unwrap().is_empty());
        }
    }
}
