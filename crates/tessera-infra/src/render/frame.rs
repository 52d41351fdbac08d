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

//! The frame renderer: paints a scene and pushes it through the context.
//!
//! Painters describe frames in pure tile-rectangle terms
//! ([`tessera_core::Canvas2d`]); [`VelloCanvas`] translates those into vello
//! scene encoding, and [`FrameRenderer`] runs the whole
//! paint/raster/blit/present cycle against a [`GraphicsContext`].

use kurbo::{Affine, Rect};
use tessera_core::{Canvas2d, RenderResult, RgbaColor, ScenePainter, SurfaceExtent, TileRect};
use vello::peniko::Fill;
use vello::Scene;

use crate::graphics::context::{peniko_color, DeviceResources, SceneTarget};
use crate::graphics::{FrameOutcome, GraphicsContext};

/// A [`Canvas2d`] writing into a vello [`Scene`].
pub struct VelloCanvas<'a> {
    scene: &'a mut Scene,
}

impl<'a> VelloCanvas<'a> {
    /// Wraps a scene for one painter pass.
    pub fn new(scene: &'a mut Scene) -> Self {
        Self { scene }
    }
}

impl Canvas2d for VelloCanvas<'_> {
    fn fill_rect(&mut self, rect: TileRect, color: RgbaColor) {
        let shape = Rect::new(
            rect.x as f64,
            rect.y as f64,
            rect.right() as f64,
            rect.bottom() as f64,
        );
        self.scene
            .fill(Fill::NonZero, Affine::IDENTITY, peniko_color(color), None, &shape);
    }
}

/// Owns the scene buffer and renders one painter per frame.
///
/// The encoded scene is plain data with no device handles in it, so the
/// context is free to rebuild tiers (even the device) mid-call and render
/// the same scene afterwards.
#[derive(Default)]
pub struct FrameRenderer {
    scene: Scene,
}

impl FrameRenderer {
    /// Creates a renderer with an empty scene buffer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
        }
    }

    /// Paints one frame with `painter` and presents it.
    ///
    /// ## Errors
    ///
    /// Propagates [`GraphicsContext::render_frame`] errors; additionally
    /// returns [`tessera_core::RenderError::NotInitialized`] when no window
    /// was ever configured.
    pub fn render(
        &mut self,
        gfx: &mut GraphicsContext,
        painter: &dyn ScenePainter,
    ) -> RenderResult<FrameOutcome> {
        let extent = gfx.target_extent();
        log::trace!(
            "painting scene '{}' at {}x{}",
            painter.name(),
            extent.width,
            extent.height
        );

        self.scene.reset();
        let mut canvas = VelloCanvas::new(&mut self.scene);
        painter.paint(extent, &mut canvas);

        gfx.render_frame(&self.scene, painter.clear_color())
    }

    /// Paints one frame with `painter` into a fresh offscreen target.
    ///
    /// No window is involved; this is the windowless rendering path used by
    /// headless tests and thumbnailing.
    pub fn render_offscreen(
        &mut self,
        device: &mut DeviceResources,
        painter: &dyn ScenePainter,
        extent: SurfaceExtent,
    ) -> RenderResult<SceneTarget> {
        let extent = extent.clamped_nonzero();

        self.scene.reset();
        let mut canvas = VelloCanvas::new(&mut self.scene);
        painter.paint(extent, &mut canvas);

        let target = SceneTarget::create(device.device(), extent);
        device.render_scene_to(&self.scene, &target, painter.clear_color())?;
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_accepts_degenerate_and_offscreen_rects() {
        let mut scene = Scene::new();
        let mut canvas = VelloCanvas::new(&mut scene);
        canvas.fill_rect(TileRect::new(0, 0, 0, 0), RgbaColor::WHITE);
        canvas.fill_rect(TileRect::new(-20, -40, 14, 22), RgbaColor::GRAY);
        canvas.fill_rect(TileRect::new(10_000, 10_000, 14, 22), RgbaColor::BLACK);
    }
}
