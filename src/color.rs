//! Palette reduction for terminals with fewer colors than a cell asks for.
//!
//! Cell colors are xterm palette indices (0-255). Before a color reaches
//! `set_a_foreground`/`set_a_background` it is reduced to what the terminal
//! advertises in `max_colors`: 256 → 16 → 8.
//!
//! ```
//! use cellterm::color::reduce;
//!
//! assert_eq!(reduce(196, 256), Some(196));
//! assert_eq!(reduce(196, 16), Some(9));
//! assert_eq!(reduce(196, 8), Some(1));
//! assert_eq!(reduce(3, 0), None);
//! ```

use crate::cell::Attr;

/// Approximate RGB of the 16 basic colors.
#[rustfmt::skip]
const BASIC: [(u8, u8, u8); 16] = [
    (0, 0, 0),       // 0 Black
    (128, 0, 0),     // 1 Red
    (0, 128, 0),     // 2 Green
    (128, 128, 0),   // 3 Yellow
    (0, 0, 128),     // 4 Blue
    (128, 0, 128),   // 5 Magenta
    (0, 128, 128),   // 6 Cyan
    (192, 192, 192), // 7 White
    (128, 128, 128), // 8 Bright Black
    (255, 0, 0),     // 9 Bright Red
    (0, 255, 0),     // 10 Bright Green
    (255, 255, 0),   // 11 Bright Yellow
    (0, 0, 255),     // 12 Bright Blue
    (255, 0, 255),   // 13 Bright Magenta
    (0, 255, 255),   // 14 Bright Cyan
    (255, 255, 255), // 15 Bright White
];

const CUBE: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// RGB value of a 256-color palette index.
#[must_use]
pub fn palette_rgb(index: u8) -> (u8, u8, u8) {
    match index {
        0..=15 => BASIC[index as usize],
        16..=231 => {
            let idx = index - 16;
            (
                CUBE[(idx / 36) as usize % 6],
                CUBE[(idx / 6) as usize % 6],
                CUBE[idx as usize % 6],
            )
        }
        232..=255 => {
            let gray = 8 + (index - 232) * 10;
            (gray, gray, gray)
        }
    }
}

/// Nearest basic color (0-15) by squared distance.
#[must_use]
pub fn nearest_basic(r: u8, g: u8, b: u8) -> u8 {
    let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
    let mut best_idx = 0;
    let mut min_dist = i32::MAX;
    for (i, &(pr, pg, pb)) in BASIC.iter().enumerate() {
        let (dr, dg, db) = (r - i32::from(pr), g - i32::from(pg), b - i32::from(pb));
        let dist = dr * dr + dg * dg + db * db;
        if dist < min_dist {
            min_dist = dist;
            best_idx = i;
        }
    }
    best_idx as u8
}

/// Reduce a palette index to a terminal with `max_colors` colors.
///
/// `None` means the color cannot be expressed and the terminal default
/// should be used instead: the index is [`Attr::DEFAULT_COLOR`], or the
/// terminal has no colors.
#[must_use]
pub fn reduce(index: u16, max_colors: i32) -> Option<u16> {
    if index >= Attr::DEFAULT_COLOR || max_colors <= 0 {
        return None;
    }
    if i32::from(index) < max_colors {
        return Some(index);
    }
    let basic = if index < 16 {
        index as u8
    } else {
        let (r, g, b) = palette_rgb(index.min(255) as u8);
        nearest_basic(r, g, b)
    };
    if max_colors >= 16 {
        return Some(u16::from(basic));
    }
    let normal = basic & 7;
    Some(u16::from(normal).min((max_colors - 1) as u16))
}
