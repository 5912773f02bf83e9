//! Runtime Permission Queries
//!
//! Read-only view of the OS permission state. The bridge never shows
//! permission dialogs itself; it only checks the current grant and falls back
//! when data is inaccessible.

use async_trait::async_trait;

use crate::error::Result;

/// Permission probe trait
///
/// Abstracts the OS runtime permission subsystem:
/// - **Android 10+**: `ACTIVITY_RECOGNITION` is a runtime permission
/// - **Older Android / simulation**: no runtime grant required
#[async_trait]
pub trait PermissionProbe: Send + Sync {
    /// Whether this platform gates activity-recognition data behind an
    /// explicit runtime grant at all.
    fn requires_runtime_grant(&self) -> bool;

    /// Current activity-recognition grant.
    ///
    /// The grant is owned by the OS and can change at any time, so callers
    /// query it per operation rather than caching the result.
    async fn activity_recognition_granted(&self) -> Result<bool>;
}
