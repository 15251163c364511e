//! Property-based tests for the diff renderer.
//!
//! Random buffers are rendered and the output is replayed through an
//! independent terminal model; the model must end up showing the buffer.

mod common;

use cellterm::{Attr, AttrFlags, CellBuffer, Glyph};
use common::{Screen, renderer, take_output};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn attr_strategy() -> impl Strategy<Value = Attr> {
    (any::<bool>(), any::<bool>(), 0u16..8, prop::option::of(0u16..8)).prop_map(
        |(bold, underline, fg, bg)| {
            let mut flags = AttrFlags::empty();
            if bold {
                flags |= AttrFlags::BOLD;
            }
            if underline {
                flags |= AttrFlags::UNDERLINE;
            }
            let attr = Attr::DEFAULT.with_flags(flags).with_fg(fg);
            match bg {
                Some(bg) => attr.with_bg(bg),
                None => attr,
            }
        },
    )
}

fn narrow_strategy() -> impl Strategy<Value = char> {
    prop::char::range('!', '~')
}

/// Mostly ASCII with some double-width glyphs.
fn mixed_strategy() -> impl Strategy<Value = char> {
    prop_oneof![
        4 => narrow_strategy(),
        1 => prop::sample::select(vec!['日', '本', '語', '한', '😀']),
    ]
}

type Edit = (u16, u16, char, Attr);

fn edits(
    w: u16,
    h: u16,
    glyphs: impl Strategy<Value = char>,
) -> impl Strategy<Value = Vec<Edit>> {
    let max = usize::from(w) * usize::from(h);
    prop::collection::vec((0..w, 0..h, glyphs, attr_strategy()), 0..=max)
}

fn dims() -> impl Strategy<Value = (u16, u16)> {
    (2u16..=16, 1u16..=6)
}

/// Text the terminal should show for row `y` of the pending buffer.
fn expected_row(buf: &CellBuffer, y: u16) -> String {
    let row = buf.row(y).unwrap_or_default();
    let mut line = String::new();
    for (x, cell) in row.iter().enumerate() {
        match cell.glyph {
            Glyph::Continuation => {
                if x == 0 || row[x - 1].display_width() != 2 {
                    line.push(' ');
                }
            }
            Glyph::Char(ch) if cell.display_width() == 2 => {
                if row.get(x + 1).is_some_and(|c| c.is_continuation()) {
                    line.push(ch);
                } else {
                    line.push(' ');
                }
            }
            Glyph::Char(ch) => line.push(ch),
        }
    }
    line
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// After one frame the terminal shows exactly the buffer text.
    #[test]
    fn terminal_matches_buffer(
        ((w, h), mods) in dims().prop_flat_map(|(w, h)| (Just((w, h)), edits(w, h, mixed_strategy())))
    ) {
        let mut r = renderer(w, h, true);
        let mut screen = Screen::new(w, h);
        for (x, y, ch, attr) in mods {
            r.buffer().put_char(x, y, ch, attr);
        }
        r.render().unwrap();
        screen.feed(&take_output(&mut r));

        for y in 0..h {
            prop_assert_eq!(screen.row(y), expected_row(r.buffer_ref(), y), "row {}", y);
        }
    }

    /// Rendering the same buffer twice writes nothing the second time.
    #[test]
    fn second_render_is_empty(
        ((w, h), mods) in dims().prop_flat_map(|(w, h)| (Just((w, h)), edits(w, h, mixed_strategy())))
    ) {
        let mut r = renderer(w, h, true);
        for (x, y, ch, attr) in mods {
            r.buffer().put_char(x, y, ch, attr);
        }
        r.render().unwrap();
        take_output(&mut r);

        prop_assert_eq!(r.render().unwrap(), 0);
        prop_assert!(take_output(&mut r).is_empty());
        prop_assert_eq!(r.buffer_ref().dirty_rows().count(), 0);
    }

    /// Incremental frames keep the terminal in sync with the buffer.
    #[test]
    fn incremental_frames_stay_in_sync(
        ((w, h), first, second) in dims().prop_flat_map(|(w, h)| {
            (Just((w, h)), edits(w, h, narrow_strategy()), edits(w, h, narrow_strategy()))
        })
    ) {
        let mut r = renderer(w, h, true);
        let mut screen = Screen::new(w, h);
        for frame in [first, second] {
            for (x, y, ch, attr) in frame {
                r.buffer().put_char(x, y, ch, attr);
            }
            r.render().unwrap();
            screen.feed(&take_output(&mut r));
        }

        for y in 0..h {
            prop_assert_eq!(screen.row(y), expected_row(r.buffer_ref(), y), "row {}", y);
        }
    }

    /// Committed cells mirror pending cells once a frame is flushed.
    #[test]
    fn committed_matches_pending_after_render(
        ((w, h), mods) in dims().prop_flat_map(|(w, h)| (Just((w, h)), edits(w, h, mixed_strategy())))
    ) {
        let mut r = renderer(w, h, true);
        for (x, y, ch, attr) in mods {
            r.buffer().put_char(x, y, ch, attr);
        }
        r.render().unwrap();

        let buf = r.buffer_ref();
        for y in 0..h {
            prop_assert_eq!(buf.row(y), buf.committed_row(y));
        }
    }
}
