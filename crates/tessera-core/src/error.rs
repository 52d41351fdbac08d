// Copyright 2026 the Tessera Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the error types for the rendering stack.
//!
//! Two classes of failure exist. Device loss ([`RenderError::DeviceLost`]) is
//! the recoverable one: every device-tier handle is invalid and the caller is
//! expected to tear down and rebuild the device and window tiers. Everything
//! else is either a programmer error ([`RenderError::NotInitialized`]) or an
//! environment failure that propagates to the top-level handler.

use thiserror::Error;

/// A convenient result alias for fallible rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// A high-level error produced by the device/surface manager or the frame
/// renderer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A window-tier or frame operation was attempted before the device tier
    /// was initialized. This is a programmer error, not an environment one.
    #[error("the rendering system is not initialized")]
    NotInitialized,

    /// Device-tier initialization failed (no adapter, device request denied).
    #[error("failed to initialize graphics device: {0}")]
    InitializationFailed(String),

    /// The surface could not be created or configured for the window.
    #[error("failed to configure window surface: {0}")]
    SurfaceConfigurationFailed(String),

    /// The surface refused to yield a back buffer for this frame.
    #[error("failed to acquire surface frame: {0}")]
    SurfaceAcquisitionFailed(String),

    /// The graphics device was removed or reset. All device-tier and
    /// window-tier handles are invalid until the tiers are rebuilt.
    #[error("the graphics device was lost and must be recreated")]
    DeviceLost,

    /// The device or driver ran out of memory. Not recoverable.
    #[error("the graphics device is out of memory")]
    OutOfMemory,

    /// A rendering operation failed mid-frame.
    #[error("rendering failed: {0}")]
    RenderingFailed(String),

    /// An internal invariant was broken.
    #[error("internal renderer error: {0}")]
    Internal(String),
}

impl RenderError {
    /// Builds an [`RenderError::InitializationFailed`] from any message.
    pub fn init(msg: impl Into<String>) -> Self {
        Self::InitializationFailed(msg.into())
    }

    /// Builds a [`RenderError::SurfaceConfigurationFailed`] from any message.
    pub fn surface_config(msg: impl Into<String>) -> Self {
        Self::SurfaceConfigurationFailed(msg.into())
    }

    /// Builds a [`RenderError::RenderingFailed`] from any message.
    pub fn rendering(msg: impl Into<String>) -> Self {
        Self::RenderingFailed(msg.into())
    }

    /// Builds an [`RenderError::Internal`] from any message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns `true` when the error is cleared by recreating the device and
    /// window tiers, rather than by aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DeviceLost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_initialized_display() {
        assert_eq!(
            format!("{}", RenderError::NotInitialized),
            "the rendering system is not initialized"
        );
    }

    #[test]
    fn initialization_failed_display() {
        let err = RenderError::init("no suitable adapter");
        assert_eq!(
            format!("{err}"),
            "failed to initialize graphics device: no suitable adapter"
        );
    }

    #[test]
    fn surface_configuration_failed_display() {
        let err = RenderError::surface_config("unsupported alpha mode");
        assert_eq!(
            format!("{err}"),
            "failed to configure window surface: unsupported alpha mode"
        );
    }

    #[test]
    fn device_lost_display_and_recoverability() {
        let err = RenderError::DeviceLost;
        assert_eq!(
            format!("{err}"),
            "the graphics device was lost and must be recreated"
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn only_device_loss_is_recoverable() {
        assert!(!RenderError::NotInitialized.is_recoverable());
        assert!(!RenderError::OutOfMemory.is_recoverable());
        assert!(!RenderError::init("x").is_recoverable());
        assert!(!RenderError::rendering("x").is_recoverable());
        assert!(!RenderError::internal("x").is_recoverable());
    }
}
