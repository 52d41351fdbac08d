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

//! The fixed console map: a walled room with a greeting in the middle.
//!
//! The map is static, ASCII-only content. Painters index it by signed cell
//! coordinates so that clipping an oversized map against a small tile grid
//! stays in well-defined arithmetic.

/// Width of the map in cells.
pub const MAP_COLS: i32 = 21;
/// Height of the map in cells.
pub const MAP_ROWS: i32 = 10;

/// The map rows, top to bottom. Every row is exactly [`MAP_COLS`] wide.
pub const MAP: [&str; MAP_ROWS as usize] = [
    "XXXXXXXXXXXXXXXXXXXXX",
    "X                   X",
    "X                   X",
    "X                   X",
    "X       HELLO       X",
    "X       WORLD       X",
    "X                   X",
    "X                   X",
    "X                   X",
    "XXXXXXXXXXXXXXXXXXXXX",
];

/// Returns the character at (`col`, `row`), or `None` outside the map.
pub fn glyph_at(col: i32, row: i32) -> Option<char> {
    if col < 0 || row < 0 || col >= MAP_COLS || row >= MAP_ROWS {
        return None;
    }
    MAP[row as usize].as_bytes().get(col as usize).map(|&b| b as char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_row_is_map_cols_wide() {
        for row in MAP {
            assert_eq!(row.len(), MAP_COLS as usize);
        }
        assert_eq!(MAP.len(), MAP_ROWS as usize);
    }

    #[test]
    fn border_is_solid_wall() {
        for col in 0..MAP_COLS {
            assert_eq!(glyph_at(col, 0), Some('X'));
            assert_eq!(glyph_at(col, MAP_ROWS - 1), Some('X'));
        }
        for row in 0..MAP_ROWS {
            assert_eq!(glyph_at(0, row), Some('X'));
            assert_eq!(glyph_at(MAP_COLS - 1, row), Some('X'));
        }
    }

    #[test]
    fn greeting_is_centered_in_the_room() {
        let hello: String = (0..5).filter_map(|i| glyph_at(8 + i, 4)).collect();
        let world: String = (0..5).filter_map(|i| glyph_at(8 + i, 5)).collect();
        assert_eq!(hello, "HELLO");
        assert_eq!(world, "WORLD");
        // Five letters in a 21-wide map leave eight cells on each side.
        assert_eq!(glyph_at(7, 4), Some(' '));
        assert_eq!(glyph_at(13, 4), Some(' '));
    }

    #[test]
    fn out_of_bounds_lookups_are_none() {
        assert_eq!(glyph_at(-1, 0), None);
        assert_eq!(glyph_at(0, -1), None);
        assert_eq!(glyph_at(MAP_COLS, 0), None);
        assert_eq!(glyph_at(0, MAP_ROWS), None);
        assert_eq!(glyph_at(i32::MIN, i32::MIN), None);
    }
}
