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

//! The embedded console glyph face.
//!
//! A fixed 5×7 dot-matrix face covering the characters the built-in scenes
//! use: uppercase letters, digits, and a handful of punctuation. It is the
//! device-independent text resource of the stack: created once, never
//! recreated, and entirely free of GPU state. Painters turn its dots into
//! filled rectangles, which keeps text rendering inside the one drawing
//! primitive the canvas contract has.

/// Number of dot columns in a glyph.
pub const GLYPH_COLS: u32 = 5;
/// Number of dot rows in a glyph.
pub const GLYPH_ROWS: u32 = 7;

/// The dot rows of one glyph, top row first.
///
/// Only the low five bits of each row are used; bit 4 is the leftmost
/// column.
pub type GlyphBitmap = [u8; GLYPH_ROWS as usize];

/// The embedded, process-lifetime console face.
///
/// Zero-sized: the glyph table is static data. Holding a `GlyphFace` value
/// marks a component as depending on the device-independent text resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlyphFace {
    _private: (),
}

impl GlyphFace {
    /// Returns the embedded face.
    pub const fn embedded() -> Self {
        Self { _private: () }
    }

    /// Looks up the bitmap for `ch`.
    ///
    /// Lowercase letters map onto their uppercase glyphs. Returns `None`
    /// for characters the face does not cover; callers skip those.
    pub fn glyph(&self, ch: char) -> Option<&'static GlyphBitmap> {
        let ch = ch.to_ascii_uppercase();
        let index = match ch {
            'A'..='Z' => (ch as usize) - ('A' as usize),
            '0'..='9' => 26 + (ch as usize) - ('0' as usize),
            ' ' => 36,
            '@' => 37,
            '.' => 38,
            '#' => 39,
            '!' => 40,
            '?' => 41,
            _ => return None,
        };
        Some(&GLYPHS[index])
    }

    /// Returns `true` when the dot at (`col`, `row`) of `bitmap` is set.
    pub fn dot(&self, bitmap: &GlyphBitmap, col: u32, row: u32) -> bool {
        if col >= GLYPH_COLS || row >= GLYPH_ROWS {
            return false;
        }
        let mask = 1u8 << (GLYPH_COLS - 1 - col);
        bitmap[row as usize] & mask != 0
    }
}

// A–Z, 0–9, space, then punctuation, in the index order `glyph` computes.
const GLYPHS: [GlyphBitmap; 42] = [
    // A
    [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
    // B
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
    // C
    [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
    // D
    [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
    // E
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
    // F
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
    // G
    [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
    // H
    [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
    // I
    [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
    // J
    [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
    // K
    [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
    // L
    [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
    // M
    [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
    // N
    [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
    // O
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
    // P
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
    // Q
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
    // R
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
    // S
    [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
    // T
    [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
    // U
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
    // V
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
    // W
    [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
    // X
    [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
    // Y
    [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100],
    // Z
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
    // 0
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
    // 1
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
    // 2
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
    // 3
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
    // 4
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
    // 5
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
    // 6
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
    // 7
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
    // 8
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
    // 9
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
    // space
    [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
    // @
    [0b01110, 0b10001, 0b00001, 0b01101, 0b10101, 0b10101, 0b01110],
    // .
    [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
    // #
    [0b01010, 0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b01010],
    // !
    [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
    // ?
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::map;

    #[test]
    fn covers_every_character_the_map_uses() {
        let face = GlyphFace::embedded();
        for row in map::MAP {
            for ch in row.chars() {
                assert!(
                    face.glyph(ch).is_some(),
                    "face is missing a glyph for {ch:?}"
                );
            }
        }
    }

    #[test]
    fn covers_letters_digits_and_listed_punctuation() {
        let face = GlyphFace::embedded();
        for ch in ('A'..='Z').chain('0'..='9').chain(" @.#!?".chars()) {
            assert!(face.glyph(ch).is_some(), "missing glyph for {ch:?}");
        }
        assert!(face.glyph('~').is_none());
        assert!(face.glyph('\n').is_none());
    }

    #[test]
    fn lowercase_maps_onto_uppercase() {
        let face = GlyphFace::embedded();
        assert_eq!(face.glyph('h'), face.glyph('H'));
        assert_eq!(face.glyph('z'), face.glyph('Z'));
    }

    #[test]
    fn dot_addressing_is_left_to_right_top_to_bottom() {
        let face = GlyphFace::embedded();
        let l = face.glyph('L').unwrap();
        // 'L': only the left column is set until the full bottom row.
        assert!(face.dot(l, 0, 0));
        assert!(!face.dot(l, 4, 0));
        for col in 0..GLYPH_COLS {
            assert!(face.dot(l, col, GLYPH_ROWS - 1));
        }
        assert!(!face.dot(l, GLYPH_COLS, 0));
        assert!(!face.dot(l, 0, GLYPH_ROWS));
    }

    #[test]
    fn space_has_no_dots() {
        let face = GlyphFace::embedded();
        let space = face.glyph(' ').unwrap();
        for row in 0..GLYPH_ROWS {
            for col in 0..GLYPH_COLS {
                assert!(!face.dot(space, col, row));
            }
        }
    }
}
