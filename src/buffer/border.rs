//! Border joining.
//!
//! Widgets drawing borders record the spans they touched. Before a render,
//! every recorded light box-drawing glyph is replaced by the junction its
//! neighbors call for, so two boxes sharing an edge meet in `┬`, `┼`, `┴`
//! instead of overlapping corners. Neighbors with a different attribute do
//! not join.

use std::collections::BTreeMap;

use super::CellBuffer;
use crate::cell::Cell;

/// Inclusive column range within one row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: u16,
    pub end: u16,
}

/// Sparse row → span map of recorded border segments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BorderStops {
    rows: BTreeMap<u16, Span>,
}

impl BorderStops {
    /// Record `x_start..=x_end` on row `y`, widening any span already there.
    pub fn add(&mut self, y: u16, x_start: u16, x_end: u16) {
        let (start, end) = (x_start.min(x_end), x_start.max(x_end));
        self.rows
            .entry(y)
            .and_modify(|span| {
                span.start = span.start.min(start);
                span.end = span.end.max(end);
            })
            .or_insert(Span { start, end });
    }

    #[must_use]
    pub fn get(&self, y: u16) -> Option<Span> {
        self.rows.get(&y).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, Span)> + '_ {
        self.rows.iter().map(|(&y, &span)| (y, span))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

const LEFT: u8 = 8;
const UP: u8 = 4;
const RIGHT: u8 = 2;
const DOWN: u8 = 1;

/// Glyphs that reach their right edge (join a cell to their right).
const fn reaches_right(ch: char) -> bool {
    matches!(ch, '┌' | '└' | '┼' | '├' | '┴' | '┬' | '─')
}

/// Glyphs that reach their bottom edge.
const fn reaches_down(ch: char) -> bool {
    matches!(ch, '┐' | '┌' | '┼' | '├' | '┤' | '┬' | '│')
}

/// Glyphs that reach their left edge.
const fn reaches_left(ch: char) -> bool {
    matches!(ch, '┘' | '┐' | '┼' | '┤' | '┴' | '┬' | '─')
}

/// Glyphs that reach their top edge.
const fn reaches_up(ch: char) -> bool {
    matches!(ch, '┘' | '└' | '┼' | '├' | '┤' | '┴' | '│')
}

/// Light box-drawing glyphs taking part in joins.
#[must_use]
pub const fn is_border_glyph(ch: char) -> bool {
    matches!(
        ch,
        '┘' | '┐' | '┌' | '└' | '┼' | '├' | '┤' | '┴' | '┬' | '│' | '─'
    )
}

/// Junction for a left/up/right/down neighbor mask; 0 keeps the original.
const JUNCTIONS: [Option<char>; 16] = [
    None,
    Some('│'),
    Some('─'),
    Some('┌'),
    Some('│'),
    Some('│'),
    Some('└'),
    Some('├'),
    Some('─'),
    Some('┐'),
    Some('─'),
    Some('┬'),
    Some('┘'),
    Some('┤'),
    Some('┴'),
    Some('┼'),
];

/// Glyph the border cell at `(x, y)` should show given its neighbors.
///
/// Returns the cell's own glyph when any joining neighbor has a different
/// attribute.
#[must_use]
pub fn joined_glyph(buf: &CellBuffer, x: u16, y: u16) -> Option<char> {
    let cell = buf.get(x, y)?;
    let original = cell.glyph.as_char()?;

    let sides: [(i32, i32, fn(char) -> bool, u8); 4] = [
        (-1, 0, reaches_right, LEFT),
        (0, -1, reaches_down, UP),
        (1, 0, reaches_left, RIGHT),
        (0, 1, reaches_up, DOWN),
    ];
    let mut mask = 0u8;
    for (dx, dy, reaches, bit) in sides {
        if let Some(n) = neighbor(buf, x, y, dx, dy, reaches) {
            if n.attr != cell.attr {
                return Some(original);
            }
            mask |= bit;
        }
    }
    Some(JUNCTIONS[usize::from(mask)].unwrap_or(original))
}

fn neighbor(
    buf: &CellBuffer,
    x: u16,
    y: u16,
    dx: i32,
    dy: i32,
    reaches: fn(char) -> bool,
) -> Option<&Cell> {
    let nx = u16::try_from(i32::from(x) + dx).ok()?;
    let ny = u16::try_from(i32::from(y) + dy).ok()?;
    buf.get(nx, ny)
        .filter(|n| n.glyph.as_char().is_some_and(reaches))
}

/// Replace every recorded border glyph with its junction and drop the stops.
pub fn join_borders(buf: &mut CellBuffer) {
    let stops = buf.take_border_stops();
    for (y, span) in stops.iter() {
        for x in span.start..=span.end {
            let Some(cell) = buf.get(x, y).copied() else {
                continue;
            };
            if !cell.glyph.as_char().is_some_and(is_border_glyph) {
                continue;
            }
            if let Some(ch) = joined_glyph(buf, x, y) {
                buf.set(x, y, Cell::new(ch, cell.attr));
            }
        }
    }
}
