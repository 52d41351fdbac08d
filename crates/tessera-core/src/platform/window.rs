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

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use std::sync::Arc;

use crate::geometry::SurfaceExtent;

/// Combines the windowing handle traits a graphics backend needs into one
/// object-safe trait.
pub trait WindowHandleSource: HasWindowHandle + HasDisplayHandle {}

// Blanket implementation: anything that already provides both handle traits
// qualifies as a handle source.
impl<T: HasWindowHandle + HasDisplayHandle> WindowHandleSource for T {}

/// A shared, thread-safe handle to a platform window.
///
/// Surface creation takes shared ownership of the window so the surface can
/// never outlive it.
pub type SharedWindowHandle = Arc<dyn WindowHandleSource + Send + Sync>;

/// Abstraction over the platform window the renderer draws into.
///
/// Any windowing backend (winit, SDL2, ...) can implement this trait. The
/// device/surface manager only ever asks a window for its size and a handle;
/// it never drives the event loop.
pub trait TesseraWindow: HasWindowHandle + HasDisplayHandle + Send + Sync {
    /// Returns the physical size of the window's client area.
    fn inner_size(&self) -> SurfaceExtent;

    /// Returns the scale factor of the window.
    ///
    /// Drawing is done in physical pixels at a fixed 96-DPI mapping, so the
    /// renderer treats this as informational only.
    fn scale_factor(&self) -> f64;

    /// Requests that the window be redrawn.
    fn request_redraw(&self);

    /// Clones a shared, thread-safe handle to the window.
    /// This is what the renderer hands to surface creation.
    fn clone_handle(&self) -> SharedWindowHandle;

    /// Returns the unique identifier for the window.
    fn id(&self) -> u64;
}
