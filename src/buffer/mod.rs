//! Double-buffered cell grid.
//!
//! [`CellBuffer`] holds two equal-sized grids: `pending`, which widgets draw
//! into, and `committed`, what the terminal is believed to show. Each row
//! carries a dirty flag set by every mutation of `pending`; the renderer
//! walks dirty rows, diffs them against `committed` and updates `committed`
//! as it emits.
//!
//! Coordinates are `(x, y)`: `x` is the column, `y` the row, `(0, 0)` the
//! top-left corner.
//!
//! # Examples
//!
//! ```
//! use cellterm::{Attr, AttrFlags, CellBuffer};
//! use cellterm::buffer::BoxStyle;
//!
//! let mut buf = CellBuffer::new(20, 5);
//! buf.draw_box(0, 0, 20, 5, &BoxStyle::single(Attr::DEFAULT));
//! buf.draw_text(2, 2, "Hello", Attr::DEFAULT.with_flags(AttrFlags::BOLD));
//! assert!(buf.is_dirty(2));
//! assert_eq!(buf.get(2, 2).unwrap().glyph.as_char(), Some('H'));
//! ```

mod border;
mod drawing;

pub use border::{BorderStops, Span, join_borders, joined_glyph};
pub use drawing::BoxStyle;

use crate::cell::{Attr, AttrFlags, Cell, Glyph};

/// A rectangle of cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Intersection with a `width` x `height` grid anchored at the origin.
    #[must_use]
    pub fn clip(self, width: u16, height: u16) -> Option<Self> {
        let x2 = self.x.saturating_add(self.width).min(width);
        let y2 = self.y.saturating_add(self.height).min(height);
        (x2 > self.x && y2 > self.y).then(|| Self::new(self.x, self.y, x2 - self.x, y2 - self.y))
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Committed cell that never equals a drawable cell, forcing a redraw.
pub(crate) const UNKNOWN: Cell = Cell {
    attr: Attr::new(AttrFlags::all(), Attr::DEFAULT_COLOR, Attr::DEFAULT_COLOR),
    glyph: Glyph::Char('\u{ffff}'),
};

/// Pending and committed cell grids with per-row dirty flags.
#[derive(Clone, Debug)]
pub struct CellBuffer {
    width: u16,
    height: u16,
    pending: Vec<Cell>,
    committed: Vec<Cell>,
    dirty: Vec<bool>,
    borders: BorderStops,
}

impl CellBuffer {
    /// Allocate a blank buffer with every row dirty.
    ///
    /// Zero dimensions are clamped to 1.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let size = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            pending: vec![Cell::BLANK; size],
            committed: vec![Cell::BLANK; size],
            dirty: vec![true; usize::from(height)],
            borders: BorderStops::default(),
        }
    }

    #[must_use]
    pub const fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Pending cell at `(x, y)`.
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|idx| &self.pending[idx])
    }

    /// Cell the terminal is believed to show at `(x, y)`.
    #[must_use]
    pub fn committed(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|idx| &self.committed[idx])
    }

    /// Replace a pending cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(idx) = self.index(x, y) {
            if self.pending[idx] != cell {
                self.pending[idx] = cell;
                self.dirty[usize::from(y)] = true;
            }
        }
    }

    /// Write one character, adding a continuation cell after a wide one.
    ///
    /// Returns the number of columns used.
    pub fn put_char(&mut self, x: u16, y: u16, ch: char, attr: Attr) -> u16 {
        let cell = Cell::new(ch, attr);
        let width = cell.display_width().max(1) as u16;
        self.set(x, y, cell);
        for i in 1..width {
            self.set(x.saturating_add(i), y, Cell::continuation(attr));
        }
        width
    }

    /// Pending row `y`.
    #[must_use]
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        let start = self.index(0, y)?;
        Some(&self.pending[start..start + usize::from(self.width)])
    }

    /// Committed row `y`.
    #[must_use]
    pub fn committed_row(&self, y: u16) -> Option<&[Cell]> {
        let start = self.index(0, y)?;
        Some(&self.committed[start..start + usize::from(self.width)])
    }

    /// Pending row and mutable committed row, for diffing.
    pub(crate) fn diff_rows(&mut self, y: u16) -> Option<(&[Cell], &mut [Cell])> {
        let start = self.index(0, y)?;
        let end = start + usize::from(self.width);
        Some((&self.pending[start..end], &mut self.committed[start..end]))
    }

    #[must_use]
    pub fn is_dirty(&self, y: u16) -> bool {
        self.dirty.get(usize::from(y)).copied().unwrap_or(false)
    }

    /// Rows with pending changes, top to bottom.
    pub fn dirty_rows(&self) -> impl Iterator<Item = u16> + '_ {
        self.dirty
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d)
            .map(|(y, _)| y as u16)
    }

    pub(crate) fn clear_dirty(&mut self, y: u16) {
        if let Some(d) = self.dirty.get_mut(usize::from(y)) {
            *d = false;
        }
    }

    /// Mark every row touched by `rect` dirty.
    pub fn mark_dirty_rect(&mut self, rect: Rect) {
        if let Some(rect) = rect.clip(self.width, self.height) {
            for y in rect.y..rect.y + rect.height {
                self.dirty[usize::from(y)] = true;
            }
        }
    }

    pub fn mark_all_dirty(&mut self) {
        self.dirty.fill(true);
    }

    /// Forget what the terminal shows so the next render repaints everything.
    pub fn invalidate(&mut self) {
        self.committed.fill(UNKNOWN);
        self.mark_all_dirty();
    }

    /// Record that the terminal was just cleared to default blanks.
    pub(crate) fn assume_cleared(&mut self) {
        self.committed.fill(Cell::BLANK);
        self.mark_all_dirty();
    }

    /// Fill `pending` with blanks carrying `attr`.
    pub fn clear(&mut self, attr: Attr) {
        let blank = Cell::clear(attr);
        for y in 0..self.height {
            for x in 0..self.width {
                self.set(x, y, blank);
            }
        }
    }

    /// Fill a rectangle of `pending` with `cell`.
    pub fn fill_rect(&mut self, rect: Rect, cell: Cell) {
        let Some(rect) = rect.clip(self.width, self.height) else {
            return;
        };
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                self.set(x, y, cell);
            }
        }
    }

    /// Reallocate both grids. Contents are blanked and every row is dirty.
    ///
    /// Returns `false` when the size is unchanged and nothing was done.
    pub fn resize(&mut self, width: u16, height: u16) -> bool {
        let (width, height) = (width.max(1), height.max(1));
        if (width, height) == self.size() {
            return false;
        }
        tracing::debug!(width, height, "reallocating cell buffer");
        *self = Self::new(width, height);
        true
    }

    /// Border segments recorded since the last join.
    #[must_use]
    pub const fn border_stops(&self) -> &BorderStops {
        &self.borders
    }

    /// Record a border segment for joining.
    pub fn add_border_stop(&mut self, y: u16, x_start: u16, x_end: u16) {
        if y < self.height {
            self.borders.add(y, x_start, x_end.min(self.width - 1));
        }
    }

    pub(crate) fn take_border_stops(&mut self) -> BorderStops {
        std::mem::take(&mut self.borders)
    }

    /// Join recorded border glyphs into junctions and discard the stops.
    pub fn join_borders(&mut self) {
        border::join_borders(self);
    }
}

impl Default for CellBuffer {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_blank_and_dirty() {
        let buf = CellBuffer::new(4, 3);
        assert_eq!(buf.size(), (4, 3));
        assert_eq!(buf.dirty_rows().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(buf.get(3, 2), Some(&Cell::BLANK));
        assert_eq!(buf.committed(3, 2), Some(&Cell::BLANK));
        assert_eq!(buf.get(4, 0), None);
    }

    #[test]
    fn test_zero_size_clamped() {
        assert_eq!(CellBuffer::new(0, 0).size(), (1, 1));
    }

    #[test]
    fn test_set_marks_row_dirty_only_on_change() {
        let mut buf = CellBuffer::new(4, 3);
        for y in 0..3 {
            buf.clear_dirty(y);
        }
        buf.set(1, 1, Cell::BLANK);
        assert!(!buf.is_dirty(1));
        buf.set(1, 1, Cell::new('x', Attr::DEFAULT));
        assert!(buf.is_dirty(1));
        assert!(!buf.is_dirty(0));
        buf.set(9, 9, Cell::new('x', Attr::DEFAULT));
    }

    #[test]
    fn test_put_wide_char() {
        let mut buf = CellBuffer::new(4, 1);
        assert_eq!(buf.put_char(1, 0, '日', Attr::DEFAULT), 2);
        assert_eq!(buf.get(1, 0).unwrap().glyph, Glyph::Char('日'));
        assert!(buf.get(2, 0).unwrap().is_continuation());
        assert_eq!(buf.put_char(3, 0, 'a', Attr::DEFAULT), 1);
    }

    #[test]
    fn test_mark_dirty_rect_clips() {
        let mut buf = CellBuffer::new(4, 4);
        for y in 0..4 {
            buf.clear_dirty(y);
        }
        buf.mark_dirty_rect(Rect::new(2, 2, 10, 10));
        assert_eq!(buf.dirty_rows().collect::<Vec<_>>(), vec![2, 3]);
        buf.mark_dirty_rect(Rect::new(9, 0, 1, 1));
        assert_eq!(buf.dirty_rows().count(), 2);
    }

    #[test]
    fn test_fill_and_clear() {
        let attr = Attr::DEFAULT.with_bg(4);
        let mut buf = CellBuffer::new(5, 3);
        buf.fill_rect(Rect::new(1, 1, 2, 5), Cell::new('#', attr));
        assert_eq!(buf.get(2, 2).unwrap().glyph.as_char(), Some('#'));
        assert_eq!(buf.get(3, 1), Some(&Cell::BLANK));
        buf.clear(attr);
        assert_eq!(buf.get(2, 2), Some(&Cell::clear(attr)));
    }

    #[test]
    fn test_resize_reallocates() {
        let mut buf = CellBuffer::new(4, 2);
        buf.set(0, 0, Cell::new('x', Attr::DEFAULT));
        assert!(!buf.resize(4, 2));
        assert!(buf.resize(6, 3));
        assert_eq!(buf.size(), (6, 3));
        assert_eq!(buf.get(0, 0), Some(&Cell::BLANK));
        assert_eq!(buf.dirty_rows().count(), 3);
    }

    #[test]
    fn test_invalidate_forces_mismatch() {
        let mut buf = CellBuffer::new(2, 1);
        buf.invalidate();
        assert_ne!(buf.committed(0, 0), buf.get(0, 0));
        assert!(buf.is_dirty(0));
    }

    #[test]
    fn test_assume_cleared() {
        let mut buf = CellBuffer::new(2, 2);
        buf.invalidate();
        for y in 0..2 {
            buf.clear_dirty(y);
        }
        buf.assume_cleared();
        assert_eq!(buf.committed(1, 1), Some(&Cell::BLANK));
        assert_eq!(buf.dirty_rows().count(), 2);
    }

    #[test]
    fn test_rows() {
        let mut buf = CellBuffer::new(3, 2);
        buf.set(2, 1, Cell::new('z', Attr::DEFAULT));
        assert_eq!(buf.row(1).unwrap()[2].glyph.as_char(), Some('z'));
        assert_eq!(buf.committed_row(1).unwrap()[2], Cell::BLANK);
        assert!(buf.row(2).is_none());
    }
}
