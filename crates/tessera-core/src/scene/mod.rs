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

//! The scene contract and the built-in static scenes.
//!
//! A [`ScenePainter`] describes what a frame looks like; a [`Canvas2d`] is
//! the drawing surface it paints onto. Painters are pure: the same extent
//! always produces the same rectangles, which is what makes the tile layout
//! unit-testable. The concrete canvas (a vello scene adapter) lives in
//! `tessera-infra`.

pub mod painters;

pub use painters::{Checkerboard, ConsoleMapScene, GlyphFill};

use crate::geometry::{RgbaColor, SurfaceExtent, TileRect};

/// The colors shared by the built-in scenes.
pub mod palette {
    use crate::geometry::RgbaColor;

    /// The clear color behind every scene.
    pub const BACKGROUND: RgbaColor = RgbaColor::BLACK;
    /// The ink used for glyphs.
    pub const GLYPH: RgbaColor = RgbaColor::WHITE;
    /// The muted fill used for pattern tiles.
    pub const TILE: RgbaColor = RgbaColor::GRAY;
}

/// A 2D drawing surface that accepts filled rectangles.
///
/// Coordinates are physical pixels; rectangles may extend past the surface
/// and the canvas clips them. One primitive is enough for every built-in
/// scene, glyphs included, and keeps painters trivially recordable in
/// tests.
pub trait Canvas2d {
    /// Fills `rect` with `color`.
    fn fill_rect(&mut self, rect: TileRect, color: RgbaColor);
}

/// A static scene drawn fresh every frame.
///
/// Painters hold no per-frame state and never retain the canvas; the frame
/// renderer hands them a new one each frame.
pub trait ScenePainter: Send + Sync {
    /// Scene name, for logs and scene selection.
    fn name(&self) -> &'static str;

    /// Color the surface is cleared to before painting.
    fn clear_color(&self) -> RgbaColor {
        palette::BACKGROUND
    }

    /// Emits the scene for a surface of `extent` into `canvas`.
    fn paint(&self, extent: SurfaceExtent, canvas: &mut dyn Canvas2d);
}
