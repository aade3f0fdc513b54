//! Permission gate in front of the camera and gallery flows

use crate::acquisition::AcquisitionFlow;
use crate::error::ScanError;
use tracing::debug;

/// Host permission the screen depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Camera capture
    Camera,
    /// Read/write access to stored images
    Storage,
}

impl Permission {
    /// Short lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            Permission::Camera => "camera",
            Permission::Storage => "storage",
        }
    }
}

/// Identifies which permission request a result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestTag {
    /// Camera and storage, asked before capturing
    Camera = 100,
    /// Storage only, asked before picking from the gallery
    Storage = 101,
}

impl RequestTag {
    /// Numeric request code
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Permission set asked for under this tag, in grant-array order
    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            RequestTag::Camera => &[Permission::Camera, Permission::Storage],
            RequestTag::Storage => &[Permission::Storage],
        }
    }

    /// Message shown when the request is refused
    pub fn denial_message(&self) -> &'static str {
        match self {
            RequestTag::Camera => "Camera & Storage Permission are required",
            RequestTag::Storage => "Storage permission is required...",
        }
    }
}

/// Host permission system
///
/// `request` only starts the dialog. The answer comes back later as a
/// grant array matching [`RequestTag::permissions`].
pub trait PermissionProvider {
    /// Whether `permission` is currently granted
    fn is_granted(&self, permission: Permission) -> bool;

    /// Ask the user for `permissions`
    fn request(&mut self, tag: RequestTag, permissions: &[Permission]);
}

/// Checks and requests permissions, and turns grant results into the next step
#[derive(Debug)]
pub struct PermissionGate<P> {
    provider: P,
}

impl<P: PermissionProvider> PermissionGate<P> {
    /// Wrap a permission provider
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The wrapped provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The wrapped provider, mutably
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// True only when camera and storage are both granted
    pub fn has_camera_access(&self) -> bool {
        self.provider.is_granted(Permission::Camera) && self.provider.is_granted(Permission::Storage)
    }

    /// True when storage is granted
    pub fn has_storage_access(&self) -> bool {
        self.provider.is_granted(Permission::Storage)
    }

    /// Start the camera + storage dialog
    pub fn request_camera_access(&mut self) {
        self.request(RequestTag::Camera);
    }

    /// Start the storage dialog
    pub fn request_storage_access(&mut self) {
        self.request(RequestTag::Storage);
    }

    fn request(&mut self, tag: RequestTag) {
        debug!(tag = tag.code(), "requesting permissions");
        self.provider.request(tag, tag.permissions());
    }

    /// Decide what follows a permission answer
    ///
    /// An empty grant array means the dialog was dismissed and nothing happens.
    /// Entries missing from a short array count as denied.
    pub fn on_permissions_result(
        &self,
        tag: RequestTag,
        grants: &[bool],
    ) -> Result<Option<AcquisitionFlow>, ScanError> {
        if grants.is_empty() {
            debug!(tag = tag.code(), "permission dialog dismissed");
            return Ok(None);
        }

        let expected = tag.permissions().len();
        let all_granted = grants.len() >= expected && grants[..expected].iter().all(|g| *g);
        if !all_granted {
            return Err(ScanError::PermissionDenied { tag });
        }

        Ok(Some(match tag {
            RequestTag::Camera => AcquisitionFlow::Camera,
            RequestTag::Storage => AcquisitionFlow::Gallery,
        }))
    }
}
