use crate::permissions::{Permission, PermissionProvider, RequestTag};
use std::collections::HashSet;
use tracing::info;

/// Permission provider driven by configuration
///
/// `granted` is what the host already allows. `answers` is what the user
/// says yes to when asked; granted answers are remembered. The answer to
/// the latest request is queued for [`ConfiguredPermissions::take_answer`].
#[derive(Debug, Clone, Default)]
pub struct ConfiguredPermissions {
    granted: HashSet<Permission>,
    answers: HashSet<Permission>,
    pending: Option<(RequestTag, Vec<bool>)>,
}

impl ConfiguredPermissions {
    /// Nothing granted up front; the user agrees to every request
    pub fn grant_on_request() -> Self {
        Self {
            answers: [Permission::Camera, Permission::Storage].into_iter().collect(),
            ..Default::default()
        }
    }

    /// Nothing granted up front; the user agrees only to `answers`
    pub fn with_answers(answers: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Mark `permission` as already granted
    pub fn granted(mut self, permission: Permission) -> Self {
        self.granted.insert(permission);
        self
    }

    /// Take the queued request answer, if any
    pub fn take_answer(&mut self) -> Option<(RequestTag, Vec<bool>)> {
        self.pending.take()
    }
}

impl PermissionProvider for ConfiguredPermissions {
    fn is_granted(&self, permission: Permission) -> bool {
        self.granted.contains(&permission)
    }

    fn request(&mut self, tag: RequestTag, permissions: &[Permission]) {
        let grants: Vec<bool> = permissions
            .iter()
            .map(|p| self.answers.contains(p))
            .collect();
        for (permission, granted) in permissions.iter().zip(&grants) {
            info!(permission = permission.name(), granted, "permission answered");
            if *granted {
                self.granted.insert(*permission);
            }
        }
        self.pending = Some((tag, grants));
    }
}
