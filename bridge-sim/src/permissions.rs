//! Static Permission Probe

use async_trait::async_trait;
use bridge_traits::{error::Result, permissions::PermissionProbe};

/// Permission probe with a fixed grant state.
#[derive(Debug, Clone, Copy)]
pub struct StaticPermissionProbe {
    requires_grant: bool,
    granted: bool,
}

impl StaticPermissionProbe {
    /// Runtime grant required and currently granted.
    pub fn granted() -> Self {
        Self {
            requires_grant: true,
            granted: true,
        }
    }

    /// Runtime grant required but denied.
    pub fn denied() -> Self {
        Self {
            requires_grant: true,
            granted: false,
        }
    }

    /// Platform without a runtime grant requirement (pre-Android-10 class
    /// devices); the check is skipped entirely.
    pub fn not_required() -> Self {
        Self {
            requires_grant: false,
            granted: false,
        }
    }
}

#[async_trait]
impl PermissionProbe for StaticPermissionProbe {
    fn requires_runtime_grant(&self) -> bool {
        self.requires_grant
    }

    async fn activity_recognition_granted(&self) -> Result<bool> {
        Ok(self.granted)
    }
}
