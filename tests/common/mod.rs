//! Shared helpers for integration tests.

#![allow(dead_code)] // Not every integration test uses every helper
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry

use std::sync::Once;

use cellterm::terminfo::fallback;
use cellterm::{CapabilitySet, LoadOptions, Renderer, RendererOptions};

/// Route `tracing` output through the test harness.
pub fn setup_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// Bundled xterm capabilities with Unicode output forced on or off.
pub fn xterm_caps(unicode: bool) -> CapabilitySet {
    CapabilitySet::from_entry(
        fallback::xterm(),
        &LoadOptions::default().with_force_unicode(unicode),
    )
}

/// Options without batch bracketing so output can be compared exactly.
pub fn bare_options() -> RendererOptions {
    RendererOptions {
        hide_cursor_during_render: false,
        save_cursor: false,
        ..RendererOptions::default()
    }
}

/// Renderer writing to memory.
pub fn renderer(width: u16, height: u16, unicode: bool) -> Renderer<Vec<u8>> {
    setup_test_logging();
    Renderer::new(xterm_caps(unicode), Vec::new(), width, height, bare_options())
        .expect("valid dimensions")
}

/// Drain the bytes written so far.
pub fn take_output(renderer: &mut Renderer<Vec<u8>>) -> Vec<u8> {
    std::mem::take(renderer.writer_mut())
}

/// Independent terminal emulator fed with renderer output.
pub struct Screen {
    parser: vt100::Parser,
    width: u16,
}

impl Screen {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            parser: vt100::Parser::new(height, width, 0),
            width,
        }
    }

    pub fn feed(&mut self, bytes: &[u8]) {
        self.parser.process(bytes);
    }

    /// Text of one row, blanks as spaces, wide glyphs once.
    pub fn row(&self, row: u16) -> String {
        let screen = self.parser.screen();
        let mut line = String::new();
        for col in 0..self.width {
            let Some(cell) = screen.cell(row, col) else {
                continue;
            };
            if cell.is_wide_continuation() {
                continue;
            }
            let contents = cell.contents();
            if contents.is_empty() {
                line.push(' ');
            } else {
                line.push_str(&contents);
            }
        }
        line
    }

    pub fn cell_bold(&self, row: u16, col: u16) -> bool {
        self.parser
            .screen()
            .cell(row, col)
            .is_some_and(|c| c.bold())
    }

    pub fn cell_fg(&self, row: u16, col: u16) -> Option<vt100::Color> {
        self.parser.screen().cell(row, col).map(|c| c.fgcolor())
    }
}

/// Count non-overlapping occurrences of `needle` in `haystack`.
pub fn count(haystack: &[u8], needle: &[u8]) -> usize {
    if needle.is_empty() || haystack.len() < needle.len() {
        return 0;
    }
    let mut n = 0;
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        if &haystack[i..i + needle.len()] == needle {
            n += 1;
            i += needle.len();
        } else {
            i += 1;
        }
    }
    n
}
