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

//! Pixel-space geometry and color primitives.
//!
//! All drawing happens in physical pixels at a fixed 96-DPI mapping, so the
//! types here use plain integers: `u32` for surface sizes (a surface is never
//! negative) and `i32` for tile rectangles, which may legitimately start at
//! negative coordinates when an oversized tile grid is centered on a smaller
//! surface.

/// A two-dimensional surface size in physical pixels.
///
/// This is used for window client areas, swap chain buffers, and the 2D
/// target bitmap, which all share one size at any given moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SurfaceExtent {
    /// The width component of the extent.
    pub width: u32,
    /// The height component of the extent.
    pub height: u32,
}

impl SurfaceExtent {
    /// Creates a new extent from a width and height in physical pixels.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` when either dimension is zero.
    ///
    /// Zero-sized surfaces cannot be configured; minimized windows report
    /// them and the caller is expected to skip reconfiguration.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the extent with both dimensions clamped to at least one pixel.
    pub const fn clamped_nonzero(self) -> Self {
        Self {
            width: if self.width == 0 { 1 } else { self.width },
            height: if self.height == 0 { 1 } else { self.height },
        }
    }
}

/// An axis-aligned rectangle in physical pixels.
///
/// Coordinates are signed: a centered tile grid that overflows its surface
/// starts at a negative origin, and clipping happens in signed arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileRect {
    /// The x-coordinate of the left edge.
    pub x: i32,
    /// The y-coordinate of the top edge.
    pub y: i32,
    /// The rectangle width. Non-negative by construction.
    pub width: i32,
    /// The rectangle height. Non-negative by construction.
    pub height: i32,
}

impl TileRect {
    /// Creates a new rectangle from its top-left corner and size.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the x-coordinate one past the right edge.
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Returns the y-coordinate one past the bottom edge.
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Returns `true` when `other` lies entirely inside `self`.
    pub const fn contains_rect(&self, other: &TileRect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// A non-premultiplied RGBA color with `f32` components in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RgbaColor {
    /// The red component.
    pub r: f32,
    /// The green component.
    pub g: f32,
    /// The blue component.
    pub b: f32,
    /// The alpha component. The presented frame is opaque; alpha only
    /// matters while compositing the 2D scene.
    pub a: f32,
}

impl RgbaColor {
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::opaque(1.0, 1.0, 1.0);
    /// The mid-gray used for muted tile fills.
    pub const GRAY: Self = Self::opaque(0.5, 0.5, 0.5);

    /// Creates a new color from its four components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a fully opaque color from its RGB components.
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_emptiness() {
        assert!(SurfaceExtent::new(0, 480).is_empty());
        assert!(SurfaceExtent::new(640, 0).is_empty());
        assert!(!SurfaceExtent::new(640, 480).is_empty());
    }

    #[test]
    fn extent_clamping_preserves_nonzero_dimensions() {
        assert_eq!(
            SurfaceExtent::new(0, 0).clamped_nonzero(),
            SurfaceExtent::new(1, 1)
        );
        assert_eq!(
            SurfaceExtent::new(0, 480).clamped_nonzero(),
            SurfaceExtent::new(1, 480)
        );
        assert_eq!(
            SurfaceExtent::new(640, 480).clamped_nonzero(),
            SurfaceExtent::new(640, 480)
        );
    }

    #[test]
    fn rect_edges() {
        let rect = TileRect::new(-6, 10, 14, 22);
        assert_eq!(rect.right(), 8);
        assert_eq!(rect.bottom(), 32);
    }

    #[test]
    fn rect_containment() {
        let outer = TileRect::new(0, 0, 100, 100);
        assert!(outer.contains_rect(&TileRect::new(10, 10, 20, 20)));
        assert!(outer.contains_rect(&outer));
        assert!(!outer.contains_rect(&TileRect::new(-1, 0, 20, 20)));
        assert!(!outer.contains_rect(&TileRect::new(90, 90, 20, 20)));
    }
}
