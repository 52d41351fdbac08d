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

//! Tile-grid layout for a surface.
//!
//! The console scenes carve the surface into fixed-size tiles. The grid
//! always covers the whole surface: the tile span is rounded up, so the
//! outermost tiles may hang past the surface edges, and the grid origin is
//! shifted (to a zero or negative offset) so the overhang is split evenly
//! between the two sides. All coordinates are signed; clipping against the
//! surface happens downstream, in whole tiles or glyph dots.

use crate::geometry::{SurfaceExtent, TileRect};

/// The fixed console tile size in physical pixels.
pub const TILE_SIZE: SurfaceExtent = SurfaceExtent::new(14, 22);

/// Tile-grid layout computed for one surface size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleGrid {
    cols: i32,
    rows: i32,
    origin_x: i32,
    origin_y: i32,
    tile_width: i32,
    tile_height: i32,
}

impl ConsoleGrid {
    /// Lays out the default [`TILE_SIZE`] grid over `extent`.
    pub fn for_extent(extent: SurfaceExtent) -> Self {
        Self::with_tile(extent, TILE_SIZE)
    }

    /// Lays out a grid of `tile`-sized cells over `extent`.
    ///
    /// Degenerate inputs are clamped to one pixel per axis rather than
    /// rejected; a minimized window still gets a well-formed grid.
    pub fn with_tile(extent: SurfaceExtent, tile: SurfaceExtent) -> Self {
        let extent = extent.clamped_nonzero();
        let tile = tile.clamped_nonzero();

        let cols = extent.width.div_ceil(tile.width) as i32;
        let rows = extent.height.div_ceil(tile.height) as i32;
        let tile_width = tile.width as i32;
        let tile_height = tile.height as i32;

        // The span overshoots the surface; splitting the (non-positive)
        // remainder with floored division centers the overhang.
        let origin_x = (extent.width as i32 - cols * tile_width).div_euclid(2);
        let origin_y = (extent.height as i32 - rows * tile_height).div_euclid(2);

        Self {
            cols,
            rows,
            origin_x,
            origin_y,
            tile_width,
            tile_height,
        }
    }

    /// Number of tile columns. At least one.
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Number of tile rows. At least one.
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Pixel position of the grid's top-left corner. Zero or negative on
    /// each axis.
    pub fn origin(&self) -> (i32, i32) {
        (self.origin_x, self.origin_y)
    }

    /// Width of one tile in pixels.
    pub fn tile_width(&self) -> i32 {
        self.tile_width
    }

    /// Height of one tile in pixels.
    pub fn tile_height(&self) -> i32 {
        self.tile_height
    }

    /// Returns `true` when (`col`, `row`) addresses a cell of this grid.
    pub fn contains(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && col < self.cols && row < self.rows
    }

    /// Pixel rectangle of the cell at (`col`, `row`).
    ///
    /// The rectangle is well-defined for out-of-grid coordinates too;
    /// callers that only want on-grid cells check
    /// [`ConsoleGrid::contains`] first.
    pub fn cell_rect(&self, col: i32, row: i32) -> TileRect {
        TileRect::new(
            self.origin_x + col * self.tile_width,
            self.origin_y + row * self.tile_height,
            self.tile_width,
            self.tile_height,
        )
    }

    /// Cell offset that centers a `content_cols` × `content_rows` block on
    /// this grid.
    ///
    /// Negative when the content is wider or taller than the grid; the
    /// visible center of the content then remains aligned with the center
    /// of the surface.
    pub fn centering_offset(&self, content_cols: i32, content_rows: i32) -> (i32, i32) {
        ((self.cols - content_cols) / 2, (self.rows - content_rows) / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_fit_has_zero_origin() {
        let grid = ConsoleGrid::for_extent(SurfaceExtent::new(140, 110));
        assert_eq!(grid.cols(), 10);
        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.origin(), (0, 0));
        assert_eq!(grid.cell_rect(0, 0), TileRect::new(0, 0, 14, 22));
    }

    #[test]
    fn overhang_is_split_between_both_sides() {
        let grid = ConsoleGrid::for_extent(SurfaceExtent::new(800, 600));
        // 58 × 14 = 812 pixels across an 800-pixel surface.
        assert_eq!(grid.cols(), 58);
        assert_eq!(grid.rows(), 28);
        assert_eq!(grid.origin(), (-6, -8));
    }

    #[test]
    fn odd_overhang_floors_toward_negative() {
        let grid = ConsoleGrid::for_extent(SurfaceExtent::new(799, 600));
        assert_eq!(grid.cols(), 58);
        // 799 − 812 = −13; the floored half is −7, not −6.
        assert_eq!(grid.origin().0, -7);
    }

    #[test]
    fn grid_always_covers_the_surface() {
        for (w, h) in [(1, 1), (13, 21), (14, 22), (15, 23), (800, 600), (1919, 1079)] {
            let extent = SurfaceExtent::new(w, h);
            let grid = ConsoleGrid::for_extent(extent);
            let (ox, oy) = grid.origin();
            assert!(ox <= 0 && oy <= 0);
            assert!(ox + grid.cols() * grid.tile_width() >= w as i32);
            assert!(oy + grid.rows() * grid.tile_height() >= h as i32);
            // Never more than one extra tile of overhang per axis.
            assert!(ox + grid.cols() * grid.tile_width() < w as i32 + grid.tile_width());
            assert!(oy + grid.rows() * grid.tile_height() < h as i32 + grid.tile_height());
        }
    }

    #[test]
    fn cell_rects_tile_the_grid() {
        let grid = ConsoleGrid::for_extent(SurfaceExtent::new(800, 600));
        let first = grid.cell_rect(0, 0);
        let next = grid.cell_rect(1, 0);
        let below = grid.cell_rect(0, 1);
        assert_eq!(next.x, first.right());
        assert_eq!(below.y, first.bottom());
        assert_eq!(grid.cell_rect(1, 2), TileRect::new(8, 36, 14, 22));
    }

    #[test]
    fn contains_matches_the_span() {
        let grid = ConsoleGrid::for_extent(SurfaceExtent::new(140, 110));
        assert!(grid.contains(0, 0));
        assert!(grid.contains(9, 4));
        assert!(!grid.contains(-1, 0));
        assert!(!grid.contains(0, -1));
        assert!(!grid.contains(10, 0));
        assert!(!grid.contains(0, 5));
    }

    #[test]
    fn centering_offset_for_the_console_map() {
        let grid = ConsoleGrid::for_extent(SurfaceExtent::new(840, 440));
        assert_eq!(grid.cols(), 60);
        assert_eq!(grid.rows(), 20);
        assert_eq!(grid.centering_offset(21, 10), (19, 5));
    }

    #[test]
    fn centering_offset_goes_negative_on_small_grids() {
        let grid = ConsoleGrid::for_extent(SurfaceExtent::new(100, 60));
        assert_eq!(grid.cols(), 8);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.centering_offset(21, 10), (-6, -3));
    }

    #[test]
    fn degenerate_extents_are_clamped() {
        let grid = ConsoleGrid::for_extent(SurfaceExtent::new(0, 0));
        assert_eq!(grid.cols(), 1);
        assert_eq!(grid.rows(), 1);
    }
}
