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

//! The built-in static scenes: checkerboard, glyph stamp, and console map.
//!
//! All three lay the default tile grid over the surface and fill tile
//! rectangles; the glyph scenes additionally rasterize face dots inside
//! each tile. The painters iterate the grid (not the content), so content
//! larger than the grid clips cleanly at the grid edge.

use crate::console::{map, ConsoleGrid, GlyphBitmap, GlyphFace, GLYPH_COLS, GLYPH_ROWS};
use crate::geometry::{RgbaColor, SurfaceExtent, TileRect};
use crate::scene::{palette, Canvas2d, ScenePainter};

/// Alternating tile fill over the cleared background.
#[derive(Debug, Clone, Copy)]
pub struct Checkerboard {
    /// Fill color of the painted half of the tiles.
    pub tile: RgbaColor,
}

impl Default for Checkerboard {
    fn default() -> Self {
        Self {
            tile: palette::TILE,
        }
    }
}

impl ScenePainter for Checkerboard {
    fn name(&self) -> &'static str {
        "checkerboard"
    }

    fn paint(&self, extent: SurfaceExtent, canvas: &mut dyn Canvas2d) {
        let grid = ConsoleGrid::for_extent(extent);
        for col in 0..grid.cols() {
            for row in 0..grid.rows() {
                if (col + row) % 2 == 0 {
                    canvas.fill_rect(grid.cell_rect(col, row), self.tile);
                }
            }
        }
    }
}

/// One glyph stamped into every tile of the grid.
#[derive(Debug, Clone, Copy)]
pub struct GlyphFill {
    glyph: char,
    ink: RgbaColor,
    face: GlyphFace,
}

impl GlyphFill {
    /// Creates a stamp scene for `glyph`.
    ///
    /// A character the face does not cover produces an empty scene; the
    /// face covers letters, digits, and basic punctuation.
    pub fn new(glyph: char) -> Self {
        Self {
            glyph,
            ink: palette::GLYPH,
            face: GlyphFace::embedded(),
        }
    }

    /// The stamped character.
    pub fn glyph(&self) -> char {
        self.glyph
    }
}

impl Default for GlyphFill {
    fn default() -> Self {
        Self::new('@')
    }
}

impl ScenePainter for GlyphFill {
    fn name(&self) -> &'static str {
        "glyphs"
    }

    fn paint(&self, extent: SurfaceExtent, canvas: &mut dyn Canvas2d) {
        let Some(bitmap) = self.face.glyph(self.glyph) else {
            return;
        };
        let grid = ConsoleGrid::for_extent(extent);
        for col in 0..grid.cols() {
            for row in 0..grid.rows() {
                stamp_glyph(canvas, &self.face, bitmap, grid.cell_rect(col, row), self.ink);
            }
        }
    }
}

/// The fixed console map, centered on the surface.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleMapScene {
    ink: RgbaColor,
    face: GlyphFace,
}

impl Default for ConsoleMapScene {
    fn default() -> Self {
        Self {
            ink: palette::GLYPH,
            face: GlyphFace::embedded(),
        }
    }
}

impl ScenePainter for ConsoleMapScene {
    fn name(&self) -> &'static str {
        "map"
    }

    fn paint(&self, extent: SurfaceExtent, canvas: &mut dyn Canvas2d) {
        let grid = ConsoleGrid::for_extent(extent);
        let (offset_cols, offset_rows) = grid.centering_offset(map::MAP_COLS, map::MAP_ROWS);

        // Walk the visible grid and sample the map under it. On a grid
        // smaller than the map the offsets go negative and the walk lands
        // on the map's center region.
        for col in 0..grid.cols() {
            for row in 0..grid.rows() {
                let Some(ch) = map::glyph_at(col - offset_cols, row - offset_rows) else {
                    continue;
                };
                if ch == ' ' {
                    continue;
                }
                if let Some(bitmap) = self.face.glyph(ch) {
                    stamp_glyph(canvas, &self.face, bitmap, grid.cell_rect(col, row), self.ink);
                }
            }
        }
    }
}

/// Rasterizes one glyph into `cell`, centered, as filled dot rectangles.
fn stamp_glyph(
    canvas: &mut dyn Canvas2d,
    face: &GlyphFace,
    bitmap: &GlyphBitmap,
    cell: TileRect,
    ink: RgbaColor,
) {
    let cols = GLYPH_COLS as i32;
    let rows = GLYPH_ROWS as i32;
    // Leave one dot of margin on every side of the glyph box.
    let dot = (cell.width / (cols + 2))
        .min(cell.height / (rows + 2))
        .max(1);
    let x0 = cell.x + (cell.width - dot * cols) / 2;
    let y0 = cell.y + (cell.height - dot * rows) / 2;

    for row in 0..rows {
        for col in 0..cols {
            if face.dot(bitmap, col as u32, row as u32) {
                canvas.fill_rect(
                    TileRect::new(x0 + col * dot, y0 + row * dot, dot, dot),
                    ink,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Default)]
    struct RecordingCanvas {
        rects: Vec<(TileRect, RgbaColor)>,
    }

    impl Canvas2d for RecordingCanvas {
        fn fill_rect(&mut self, rect: TileRect, color: RgbaColor) {
            self.rects.push((rect, color));
        }
    }

    fn paint(painter: &dyn ScenePainter, width: u32, height: u32) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::default();
        painter.paint(SurfaceExtent::new(width, height), &mut canvas);
        canvas
    }

    /// Maps each emitted rectangle back to the grid cell containing it.
    fn touched_cells(canvas: &RecordingCanvas, extent: SurfaceExtent) -> HashSet<(i32, i32)> {
        let grid = ConsoleGrid::for_extent(extent);
        let (ox, oy) = grid.origin();
        canvas
            .rects
            .iter()
            .map(|(rect, _)| {
                (
                    (rect.x - ox).div_euclid(grid.tile_width()),
                    (rect.y - oy).div_euclid(grid.tile_height()),
                )
            })
            .collect()
    }

    #[test]
    fn checkerboard_paints_every_other_tile() {
        let canvas = paint(&Checkerboard::default(), 140, 110);
        // 10 × 5 grid: half of 50 cells, rounded up.
        assert_eq!(canvas.rects.len(), 25);
        for (rect, color) in &canvas.rects {
            assert_eq!((rect.width, rect.height), (14, 22));
            assert_eq!(*color, palette::TILE);
        }
        assert_eq!(canvas.rects[0].0, TileRect::new(0, 0, 14, 22));
    }

    #[test]
    fn checkerboard_keeps_parity_at_negative_origins() {
        let canvas = paint(&Checkerboard::default(), 15, 23);
        // 2 × 2 grid with overhang: cells (0,0) and (1,1).
        assert_eq!(canvas.rects.len(), 2);
        assert_eq!(canvas.rects[0].0, TileRect::new(-7, -11, 14, 22));
    }

    #[test]
    fn glyph_fill_rasterizes_the_stamp_in_each_tile() {
        let canvas = paint(&GlyphFill::default(), 14, 22);
        // A single 14×22 tile: each '@' dot becomes one 2×2 rectangle,
        // inside the tile.
        let face = GlyphFace::embedded();
        let bitmap = face.glyph('@').unwrap();
        let expected: u32 = bitmap.iter().map(|row| row.count_ones()).sum();
        assert_eq!(canvas.rects.len(), expected as usize);

        let tile = TileRect::new(0, 0, 14, 22);
        for (rect, _) in &canvas.rects {
            assert_eq!((rect.width, rect.height), (2, 2));
            assert!(tile.contains_rect(rect));
        }
    }

    #[test]
    fn glyph_fill_touches_every_tile() {
        let extent = SurfaceExtent::new(140, 110);
        let canvas = paint(&GlyphFill::new('H'), 140, 110);
        assert_eq!(touched_cells(&canvas, extent).len(), 10 * 5);
    }

    #[test]
    fn glyph_fill_without_a_glyph_is_empty() {
        let canvas = paint(&GlyphFill::new('~'), 140, 110);
        assert!(canvas.rects.is_empty());
    }

    #[test]
    fn console_map_covers_walls_and_greeting_on_a_large_surface() {
        let extent = SurfaceExtent::new(840, 440);
        let canvas = paint(&ConsoleMapScene::default(), 840, 440);
        // 58 wall cells plus the ten letters of the greeting.
        assert_eq!(touched_cells(&canvas, extent).len(), 68);

        let surface = TileRect::new(0, 0, 840, 440);
        for (rect, color) in &canvas.rects {
            assert!(surface.contains_rect(rect), "dot {rect:?} spilled out");
            assert_eq!(*color, palette::GLYPH);
        }
    }

    #[test]
    fn console_map_clips_to_the_center_on_a_small_surface() {
        // 10 × 5 grid against the 21 × 10 map: only the middle shows, and
        // the middle of this map is the greeting.
        let extent = SurfaceExtent::new(140, 110);
        let canvas = paint(&ConsoleMapScene::default(), 140, 110);
        let cells = touched_cells(&canvas, extent);
        assert_eq!(cells.len(), 10, "expected exactly the greeting letters");

        let grid = ConsoleGrid::for_extent(extent);
        for (col, row) in cells {
            assert!(grid.contains(col, row));
        }
    }

    #[test]
    fn scene_names_are_stable() {
        assert_eq!(Checkerboard::default().name(), "checkerboard");
        assert_eq!(GlyphFill::default().name(), "glyphs");
        assert_eq!(ConsoleMapScene::default().name(), "map");
    }
}
