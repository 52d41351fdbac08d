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

//! Console-style content: the tile grid, the glyph face, and the fixed map.
//!
//! Everything here is pure layout math and static data. The scene painters
//! in [`crate::scene`] combine these pieces into drawable tile rectangles.

pub mod face;
pub mod grid;
pub mod map;

pub use face::{GlyphBitmap, GlyphFace, GLYPH_COLS, GLYPH_ROWS};
pub use grid::{ConsoleGrid, TILE_SIZE};
