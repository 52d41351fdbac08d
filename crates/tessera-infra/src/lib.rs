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

//! # Tessera Infrastructure
//!
//! Concrete backends for the abstractions in `tessera-core`: the wgpu
//! device/surface stack, the vello scene rasterizer, and winit windows.
//!
//! The crate is organized by concern:
//!
//! - [`graphics`]: adapter selection, the three-tier [`GraphicsContext`],
//!   and the blit pipeline that moves a finished scene onto the screen.
//! - [`render`]: the per-frame [`FrameRenderer`] driving a
//!   [`tessera_core::ScenePainter`] through the context.
//! - [`platform`]: the winit-backed window implementation.

pub mod graphics;
pub mod platform;
pub mod render;

pub use graphics::{AdapterProfile, FrameOutcome, GraphicsContext};
pub use platform::window::winit::{WinitWindow, WinitWindowBuilder};
pub use render::FrameRenderer;
