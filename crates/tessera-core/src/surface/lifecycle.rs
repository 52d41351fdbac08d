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

//! The surface lifecycle ledger: a pure model of the three resource tiers.
//!
//! The device/surface manager owns three nested tiers of GPU state:
//! device-independent, device-dependent, and window-dependent. Outer tiers
//! must outlive inner ones, window resources are replaced wholesale on
//! resize, and a lost device invalidates everything below it. This module
//! models those rules as plain data so they can be checked without a GPU:
//! `tessera-infra` consults the ledger before every surface operation and
//! reports every fault back into it.
//!
//! The device tier moves through an explicit state machine:
//!
//! ```text
//!   Vacant ──register_device──▶ Ready ◀──────────────┐
//!                                │                   │
//!                          fault: Lost          register_device
//!                                │                   │
//!                                ▼                   │
//!                              Lost ─────────────────┘
//! ```
//!
//! Each registered device gets a monotonically increasing [`DeviceEpoch`].
//! The window record remembers the epoch it was built against; a record
//! whose epoch differs from the live one is stale and must never be used,
//! only rebuilt.

use crate::error::{RenderError, RenderResult};
use crate::geometry::SurfaceExtent;
use std::fmt;

/// Identity of one device-tier incarnation.
///
/// Epochs are never reused; comparing a window record's epoch against the
/// live one is what detects stale window resources after device recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceEpoch(u64);

impl DeviceEpoch {
    /// Returns the raw epoch counter, for logging.
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for DeviceEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one swap chain incarnation.
///
/// Resizing an existing swap chain in place keeps its identity; only
/// creating a fresh surface allocates a new one. Tests use this to prove
/// that a resize did not silently recreate the swap chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapchainId(u64);

impl SwapchainId {
    /// Returns the raw swap chain counter, for logging.
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SwapchainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The observable phase of the device tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevicePhase {
    /// No device tier has ever been registered.
    Vacant,
    /// A device tier is live and usable.
    Ready,
    /// The device was lost; every device- and window-tier handle is invalid
    /// until a new device tier is registered.
    Lost,
}

/// The record of the current window-dependent tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRecord {
    /// Size of the swap chain buffers, depth buffer, and 2D target bitmap.
    pub extent: SurfaceExtent,
    /// Identity of the swap chain backing this record.
    pub swapchain: SwapchainId,
    /// Epoch of the device tier this record was built against.
    pub device_epoch: DeviceEpoch,
}

/// What a window-tier (re)build must do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowDirective {
    /// No swap chain exists for the live device; create one, then size it.
    CreateSwapchain,
    /// A swap chain already exists for the live device; resize its buffers
    /// in place, keeping the swap chain itself.
    ResizeInPlace,
}

/// A fault observed while configuring, acquiring, or presenting the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceFault {
    /// The surface no longer matches the window (typically a resize raced
    /// the frame). The window tier must be rebuilt; the device is fine.
    Outdated,
    /// The device backing the surface was removed or reset.
    Lost,
    /// The surface did not deliver a buffer in time.
    Timeout,
    /// The device or driver is out of memory.
    OutOfMemory,
    /// Any other surface failure.
    Other,
}

impl fmt::Display for SurfaceFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SurfaceFault::Outdated => "outdated",
            SurfaceFault::Lost => "lost",
            SurfaceFault::Timeout => "timeout",
            SurfaceFault::OutOfMemory => "out of memory",
            SurfaceFault::Other => "other",
        };
        f.write_str(name)
    }
}

/// The action a fault demands from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Rebuild the window tier against the live device.
    RebuildWindow,
    /// Tear down the window and device tiers and re-run the full
    /// initialization sequence.
    RecreateDevice,
    /// Drop this frame and try again next frame.
    SkipFrame,
    /// Unrecoverable; propagate to the top-level handler.
    Fatal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Vacant,
    Ready(DeviceEpoch),
    Lost(DeviceEpoch),
}

/// The pure three-tier lifecycle ledger.
///
/// The ledger never touches the GPU. The device/surface manager drives it in
/// lockstep with the real resources: register the device tier after building
/// it, plan and commit every window-tier build, and report every surface
/// fault. In exchange the ledger answers the questions the manager must not
/// get wrong: is the device live, can this window record still be trusted,
/// and what does this fault require.
#[derive(Debug, Clone)]
pub struct SurfaceLifecycle {
    phase: Phase,
    window: Option<WindowRecord>,
    next_epoch: u64,
    next_swapchain: u64,
}

impl Default for SurfaceLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceLifecycle {
    /// Creates a ledger with no device tier registered.
    pub const fn new() -> Self {
        Self {
            phase: Phase::Vacant,
            window: None,
            next_epoch: 0,
            next_swapchain: 0,
        }
    }

    /// Registers a freshly built device tier and returns its epoch.
    ///
    /// Valid from any phase: it covers both first initialization and
    /// recovery after loss. Registering does not touch the window record;
    /// the old record simply becomes stale because its epoch no longer
    /// matches, and the next [`SurfaceLifecycle::plan_window`] call demands
    /// a fresh swap chain.
    pub fn register_device(&mut self) -> DeviceEpoch {
        let epoch = DeviceEpoch(self.next_epoch);
        self.next_epoch += 1;
        self.phase = Phase::Ready(epoch);
        epoch
    }

    /// Returns the observable device phase.
    pub fn phase(&self) -> DevicePhase {
        match self.phase {
            Phase::Vacant => DevicePhase::Vacant,
            Phase::Ready(_) => DevicePhase::Ready,
            Phase::Lost(_) => DevicePhase::Lost,
        }
    }

    /// Returns `true` when the device tier is live.
    pub fn is_ready(&self) -> bool {
        matches!(self.phase, Phase::Ready(_))
    }

    /// Returns the epoch of the most recently registered device tier, if
    /// any. The epoch of a lost device is still reported so recovery can be
    /// logged against it.
    pub fn device_epoch(&self) -> Option<DeviceEpoch> {
        match self.phase {
            Phase::Vacant => None,
            Phase::Ready(epoch) | Phase::Lost(epoch) => Some(epoch),
        }
    }

    /// Plans the next window-tier build.
    ///
    /// ## Returns
    /// * `Ok(WindowDirective)` - whether to create a swap chain or resize
    ///   the existing one in place.
    ///
    /// ## Errors
    /// * [`RenderError::NotInitialized`] - no device tier was ever
    ///   registered. Configuring a window before the device is a programmer
    ///   error.
    /// * [`RenderError::DeviceLost`] - the device tier is lost; the caller
    ///   must recreate it before any window work.
    pub fn plan_window(&self) -> RenderResult<WindowDirective> {
        match self.phase {
            Phase::Vacant => Err(RenderError::NotInitialized),
            Phase::Lost(_) => Err(RenderError::DeviceLost),
            Phase::Ready(epoch) => match self.window {
                Some(record) if record.device_epoch == epoch => {
                    Ok(WindowDirective::ResizeInPlace)
                }
                _ => Ok(WindowDirective::CreateSwapchain),
            },
        }
    }

    /// Commits a successful window-tier build at `extent`.
    ///
    /// Call this only after the real resources exist. On a resize-in-place
    /// the swap chain identity is preserved; on a fresh creation a new
    /// identity is allocated.
    ///
    /// ## Errors
    /// Same conditions as [`SurfaceLifecycle::plan_window`].
    pub fn commit_window(&mut self, extent: SurfaceExtent) -> RenderResult<WindowRecord> {
        let directive = self.plan_window()?;
        let epoch = match self.phase {
            Phase::Ready(epoch) => epoch,
            // plan_window already rejected the other phases.
            _ => unreachable!(),
        };
        let swapchain = match (directive, self.window) {
            (WindowDirective::ResizeInPlace, Some(record)) => record.swapchain,
            _ => {
                let id = SwapchainId(self.next_swapchain);
                self.next_swapchain += 1;
                id
            }
        };
        let record = WindowRecord {
            extent,
            swapchain,
            device_epoch: epoch,
        };
        self.window = Some(record);
        Ok(record)
    }

    /// Records a surface fault and returns the action it demands.
    ///
    /// A [`SurfaceFault::Lost`] moves the device tier to
    /// [`DevicePhase::Lost`]; every other fault leaves the phase untouched.
    pub fn record_fault(&mut self, fault: SurfaceFault) -> Recovery {
        match fault {
            SurfaceFault::Outdated => Recovery::RebuildWindow,
            SurfaceFault::Lost => {
                if let Phase::Ready(epoch) = self.phase {
                    self.phase = Phase::Lost(epoch);
                }
                Recovery::RecreateDevice
            }
            SurfaceFault::Timeout => Recovery::SkipFrame,
            SurfaceFault::OutOfMemory | SurfaceFault::Other => Recovery::Fatal,
        }
    }

    /// Forgets the window record, e.g. when the surface's window goes away
    /// or a different window is bound.
    ///
    /// Swap chains never move between windows; after a release the next
    /// [`SurfaceLifecycle::plan_window`] call demands a fresh one.
    pub fn release_window(&mut self) {
        self.window = None;
    }

    /// Returns the current window record, live or stale.
    pub fn window(&self) -> Option<&WindowRecord> {
        self.window.as_ref()
    }

    /// Returns `true` when the window record exists, the device tier is
    /// live, and the record was built against that same device tier.
    ///
    /// This is the tier-nesting invariant: a window record from an older
    /// device epoch, or one observed while the device is lost, must never
    /// be rendered with.
    pub fn window_is_live(&self) -> bool {
        match (self.phase, self.window) {
            (Phase::Ready(epoch), Some(record)) => record.device_epoch == epoch,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extent(width: u32, height: u32) -> SurfaceExtent {
        SurfaceExtent::new(width, height)
    }

    #[test]
    fn window_before_device_is_a_programmer_error() {
        let ledger = SurfaceLifecycle::new();
        assert_eq!(ledger.phase(), DevicePhase::Vacant);
        assert_eq!(ledger.plan_window(), Err(RenderError::NotInitialized));
    }

    #[test]
    fn first_window_build_creates_a_swapchain() {
        let mut ledger = SurfaceLifecycle::new();
        let epoch = ledger.register_device();

        assert_eq!(ledger.plan_window(), Ok(WindowDirective::CreateSwapchain));
        let record = ledger.commit_window(extent(640, 480)).unwrap();
        assert_eq!(record.extent, extent(640, 480));
        assert_eq!(record.device_epoch, epoch);
        assert!(ledger.window_is_live());
    }

    #[test]
    fn resize_with_live_device_keeps_the_swapchain() {
        let mut ledger = SurfaceLifecycle::new();
        ledger.register_device();
        let first = ledger.commit_window(extent(640, 480)).unwrap();

        assert_eq!(ledger.plan_window(), Ok(WindowDirective::ResizeInPlace));
        let resized = ledger.commit_window(extent(1280, 720)).unwrap();
        assert_eq!(
            resized.swapchain, first.swapchain,
            "a resize with a live device must reuse the swap chain in place"
        );
        assert_eq!(resized.extent, extent(1280, 720));
        assert!(ledger.window_is_live());
    }

    #[test]
    fn repeated_resizes_never_allocate_new_swapchains() {
        let mut ledger = SurfaceLifecycle::new();
        ledger.register_device();
        let first = ledger.commit_window(extent(800, 600)).unwrap();
        for size in [(801, 600), (640, 480), (1, 1), (1920, 1080)] {
            let record = ledger.commit_window(extent(size.0, size.1)).unwrap();
            assert_eq!(record.swapchain, first.swapchain);
        }
    }

    #[test]
    fn lost_fault_demands_device_recreation() {
        let mut ledger = SurfaceLifecycle::new();
        ledger.register_device();
        ledger.commit_window(extent(640, 480)).unwrap();

        let action = ledger.record_fault(SurfaceFault::Lost);
        assert_eq!(action, Recovery::RecreateDevice);
        assert_eq!(ledger.phase(), DevicePhase::Lost);
        assert!(!ledger.window_is_live());
        assert_eq!(ledger.plan_window(), Err(RenderError::DeviceLost));
    }

    #[test]
    fn recovery_invalidates_the_stale_window_record() {
        let mut ledger = SurfaceLifecycle::new();
        let first_epoch = ledger.register_device();
        let stale = ledger.commit_window(extent(640, 480)).unwrap();
        ledger.record_fault(SurfaceFault::Lost);

        let second_epoch = ledger.register_device();
        assert_ne!(second_epoch, first_epoch, "epochs are never reused");
        assert_eq!(ledger.phase(), DevicePhase::Ready);
        assert!(
            !ledger.window_is_live(),
            "a window record from an older device epoch must read as stale"
        );

        assert_eq!(ledger.plan_window(), Ok(WindowDirective::CreateSwapchain));
        let rebuilt = ledger.commit_window(extent(640, 480)).unwrap();
        assert_ne!(
            rebuilt.swapchain, stale.swapchain,
            "the rebuilt window tier must not reuse the dead swap chain"
        );
        assert!(ledger.window_is_live());
    }

    #[test]
    fn outdated_fault_rebuilds_the_window_only() {
        let mut ledger = SurfaceLifecycle::new();
        ledger.register_device();
        let first = ledger.commit_window(extent(640, 480)).unwrap();

        let action = ledger.record_fault(SurfaceFault::Outdated);
        assert_eq!(action, Recovery::RebuildWindow);
        assert_eq!(ledger.phase(), DevicePhase::Ready);

        // Same device, so the rebuild is a resize in place.
        assert_eq!(ledger.plan_window(), Ok(WindowDirective::ResizeInPlace));
        let rebuilt = ledger.commit_window(extent(640, 480)).unwrap();
        assert_eq!(rebuilt.swapchain, first.swapchain);
    }

    #[test]
    fn timeout_skips_the_frame_without_transition() {
        let mut ledger = SurfaceLifecycle::new();
        ledger.register_device();
        ledger.commit_window(extent(640, 480)).unwrap();

        assert_eq!(
            ledger.record_fault(SurfaceFault::Timeout),
            Recovery::SkipFrame
        );
        assert_eq!(ledger.phase(), DevicePhase::Ready);
        assert!(ledger.window_is_live());
    }

    #[test]
    fn out_of_memory_and_other_faults_are_fatal() {
        let mut ledger = SurfaceLifecycle::new();
        ledger.register_device();
        ledger.commit_window(extent(640, 480)).unwrap();

        assert_eq!(
            ledger.record_fault(SurfaceFault::OutOfMemory),
            Recovery::Fatal
        );
        assert_eq!(ledger.record_fault(SurfaceFault::Other), Recovery::Fatal);
        // Fatal faults abort at a higher level; the ledger itself does not
        // transition on them.
        assert_eq!(ledger.phase(), DevicePhase::Ready);
    }

    #[test]
    fn releasing_the_window_forces_a_fresh_swapchain() {
        let mut ledger = SurfaceLifecycle::new();
        ledger.register_device();
        let first = ledger.commit_window(extent(640, 480)).unwrap();

        ledger.release_window();
        assert!(ledger.window().is_none());
        assert!(!ledger.window_is_live());
        assert_eq!(ledger.phase(), DevicePhase::Ready);

        assert_eq!(ledger.plan_window(), Ok(WindowDirective::CreateSwapchain));
        let rebuilt = ledger.commit_window(extent(640, 480)).unwrap();
        assert_ne!(rebuilt.swapchain, first.swapchain);
    }

    #[test]
    fn faultless_frames_leave_the_ledger_untouched() {
        let mut ledger = SurfaceLifecycle::new();
        ledger.register_device();
        let record = ledger.commit_window(extent(640, 480)).unwrap();

        // Planning is a read-only query: any number of faultless frames
        // leaves the phase, the record, and the liveness answer unchanged.
        for _ in 0..3 {
            assert_eq!(ledger.plan_window(), Ok(WindowDirective::ResizeInPlace));
            assert_eq!(ledger.phase(), DevicePhase::Ready);
            assert_eq!(ledger.window(), Some(&record));
            assert!(ledger.window_is_live());
        }
    }

    #[test]
    fn fault_display_names() {
        assert_eq!(format!("{}", SurfaceFault::Outdated), "outdated");
        assert_eq!(format!("{}", SurfaceFault::Lost), "lost");
        assert_eq!(format!("{}", SurfaceFault::Timeout), "timeout");
        assert_eq!(format!("{}", SurfaceFault::OutOfMemory), "out of memory");
        assert_eq!(format!("{}", SurfaceFault::Other), "other");
    }
}
