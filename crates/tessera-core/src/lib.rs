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

//! # Tessera Core
//!
//! Foundational crate containing the contracts and pure logic of the Tessera
//! rendering skeleton: error types, the window abstraction, the surface
//! lifecycle ledger, tile-grid layout math, the embedded console glyph face,
//! and the static scene painters.
//!
//! Nothing in this crate talks to a GPU or a window system. The concrete
//! `wgpu`/`winit` implementations live in `tessera-infra`.

#![warn(missing_docs)]

pub mod console;
pub mod error;
pub mod geometry;
pub mod platform;
pub mod scene;
pub mod surface;

pub use error::{RenderError, RenderResult};
pub use geometry::{RgbaColor, SurfaceExtent, TileRect};
pub use scene::{Canvas2d, ScenePainter};
