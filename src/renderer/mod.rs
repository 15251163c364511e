//! Double-buffered terminal renderer with diff detection.
//!
//! [`Renderer`] owns a [`CellBuffer`] and the [`CapabilitySet`] of the
//! terminal it writes to. Widgets draw into the buffer; [`Renderer::render`]
//! joins recorded borders, diffs every dirty row against what the terminal
//! shows and writes the resulting escape sequences as one batch.
//!
//! A render cycle moves through [`RenderState::Idle`],
//! [`RenderState::Diffing`] and [`RenderState::Flushed`]; it runs to
//! completion before the buffer can be touched again.
//!
//! # Examples
//!
//! ```
//! use cellterm::{Attr, CapabilitySet, LoadOptions, Renderer, RendererOptions};
//! use cellterm::terminfo::fallback;
//!
//! let caps = CapabilitySet::from_entry(
//!     fallback::xterm(),
//!     &LoadOptions::default().with_force_unicode(true),
//! );
//! let mut renderer = Renderer::new(caps, Vec::new(), 20, 4, RendererOptions::default())?;
//! renderer.buffer().draw_text(1, 1, "Hello", Attr::DEFAULT);
//! assert!(renderer.render()? > 0);
//! // Nothing changed, so nothing is written.
//! assert_eq!(renderer.render()?, 0);
//! # Ok::<(), cellterm::Error>(())
//! ```

mod diff;
mod output;

pub use diff::{DiffRenderer, legacy_color};
pub use output::{Chunk, OutputBuffer, PaddedWriter};

use std::io::{self, Stdout, Write};

use crate::buffer::CellBuffer;
use crate::config::RendererOptions;
use crate::error::{Error, Result};
use crate::terminal;
use crate::terminfo::{CapabilitySet, StringCap};

/// Phase of the render cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderState {
    /// Widgets may mutate the buffer.
    #[default]
    Idle,
    /// Dirty rows are being diffed.
    Diffing,
    /// The last batch was written. Reading the buffer mutably returns to
    /// [`Idle`](Self::Idle).
    Flushed,
}

/// Rendering statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Completed render cycles.
    pub frames: u64,
    /// Bytes written by the last cycle.
    pub last_frame_bytes: usize,
    /// Rows that produced output in the last cycle.
    pub last_frame_rows: usize,
    /// Bytes written since creation.
    pub total_bytes: u64,
}

/// Terminal renderer writing to `W`.
pub struct Renderer<W: Write> {
    caps: CapabilitySet,
    buffer: CellBuffer,
    writer: PaddedWriter<W>,
    options: RendererOptions,
    width: u16,
    height: u16,
    state: RenderState,
    render_requested: bool,
    needs_clear: bool,
    destroyed: bool,
    stats: RenderStats,
}

impl Renderer<Stdout> {
    /// Renderer for standard output sized to the terminal.
    pub fn stdout(caps: CapabilitySet, options: RendererOptions) -> Result<Self> {
        let (width, height) = terminal::terminal_size()?;
        Self::new(caps, io::stdout(), width, height, options)
    }
}

impl<W: Write> Renderer<W> {
    /// Create a renderer for a `width` x `height` screen.
    ///
    /// The first render clears the screen and paints everything.
    pub fn new(
        caps: CapabilitySet,
        writer: W,
        width: u16,
        height: u16,
        options: RendererOptions,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        tracing::debug!(term = caps.name(), width, height, "creating renderer");
        Ok(Self {
            caps,
            buffer: CellBuffer::new(width, height),
            writer: PaddedWriter::new(writer),
            options,
            width,
            height,
            state: RenderState::Idle,
            render_requested: false,
            needs_clear: true,
            destroyed: false,
            stats: RenderStats::default(),
        })
    }

    /// Do not sleep for padding delays; output is still flushed at each one.
    #[must_use]
    pub fn without_padding_sleep(mut self) -> Self {
        self.writer.set_sleep(false);
        self
    }

    /// The buffer widgets draw into.
    pub fn buffer(&mut self) -> &mut CellBuffer {
        if self.state == RenderState::Flushed {
            self.state = RenderState::Idle;
        }
        &mut self.buffer
    }

    #[must_use]
    pub const fn buffer_ref(&self) -> &CellBuffer {
        &self.buffer
    }

    #[must_use]
    pub const fn capabilities(&self) -> &CapabilitySet {
        &self.caps
    }

    /// Mutable capabilities, e.g. to override detected feature flags.
    pub fn capabilities_mut(&mut self) -> &mut CapabilitySet {
        &mut self.caps
    }

    #[must_use]
    pub const fn options(&self) -> &RendererOptions {
        &self.options
    }

    #[must_use]
    pub const fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    #[must_use]
    pub const fn state(&self) -> RenderState {
        self.state
    }

    #[must_use]
    pub const fn stats(&self) -> &RenderStats {
        &self.stats
    }

    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[must_use]
    pub const fn writer(&self) -> &W {
        self.writer.get_ref()
    }

    pub fn writer_mut(&mut self) -> &mut W {
        self.writer.get_mut()
    }

    /// Change the screen size. The next render clears and repaints.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        if (width, height) == (self.width, self.height) {
            return Ok(());
        }
        self.width = width;
        self.height = height;
        self.buffer.resize(width, height);
        self.needs_clear = true;
        Ok(())
    }

    /// Resize to the current size of the terminal on standard output.
    pub fn resize_to_terminal(&mut self) -> Result<()> {
        let (width, height) = terminal::terminal_size()?;
        self.resize(width, height)
    }

    /// Clear and repaint everything on the next render.
    pub fn force_redraw(&mut self) {
        self.needs_clear = true;
    }

    /// Request a render. Any number of requests before
    /// [`run_scheduled`](Self::run_scheduled) produce one render.
    pub fn schedule_render(&mut self) {
        self.render_requested = true;
    }

    #[must_use]
    pub const fn render_pending(&self) -> bool {
        self.render_requested
    }

    /// Render if one was requested. Returns whether a render ran.
    pub fn run_scheduled(&mut self) -> Result<bool> {
        if !std::mem::take(&mut self.render_requested) {
            return Ok(false);
        }
        self.render()?;
        Ok(true)
    }

    /// Run one render cycle and return the number of bytes written.
    ///
    /// Rendering an unchanged buffer writes nothing. A destroyed renderer
    /// does nothing.
    pub fn render(&mut self) -> Result<usize> {
        if self.destroyed {
            return Ok(0);
        }
        self.render_requested = false;
        self.state = RenderState::Diffing;
        match self.render_frame() {
            Ok(written) => {
                self.state = RenderState::Flushed;
                Ok(written)
            }
            Err(err) => {
                // Rows were committed before the write failed; the terminal
                // contents are unknown, so the next frame repaints all of it.
                tracing::warn!(error = %err, "render failed, forcing full redraw");
                self.needs_clear = true;
                self.buffer.invalidate();
                self.state = RenderState::Idle;
                Err(err)
            }
        }
    }

    fn render_frame(&mut self) -> Result<usize> {
        if self.buffer.size() != (self.width, self.height) {
            tracing::warn!(
                buffer = ?self.buffer.size(),
                screen = ?(self.width, self.height),
                "buffer size mismatch, reallocating"
            );
            self.buffer.resize(self.width, self.height);
            self.needs_clear = true;
        }
        self.buffer.join_borders();

        let mut frame = OutputBuffer::new();
        let mut diff = DiffRenderer::new(&self.caps, &self.options);
        let mut started = false;
        let mut written = 0;

        if self.needs_clear {
            self.needs_clear = false;
            if self.caps.has_string(StringCap::ClearScreen) {
                self.begin_batch(&mut frame);
                started = true;
                let lines = u32::from(self.height);
                self.caps
                    .expand_into(StringCap::ClearScreen, &[], lines, &mut frame);
                self.buffer.assume_cleared();
                diff.set_cursor(Some((0, 0)));
            } else {
                self.buffer.invalidate();
            }
        }

        let setbuf = self.caps.features().setbuf;
        let rows: Vec<u16> = self.buffer.dirty_rows().collect();
        let mut emitted_rows = 0;
        for y in rows {
            let mut row = OutputBuffer::new();
            diff.render_row(&mut self.caps, &mut self.buffer, y, &mut row);
            if row.is_empty() {
                continue;
            }
            emitted_rows += 1;
            if !started {
                self.begin_batch(&mut frame);
                started = true;
            }
            frame.append(&mut row);
            if !setbuf {
                written += self.writer.write_batch(&frame)?;
                frame.clear();
            }
        }

        if started {
            self.end_batch(&mut frame);
        }
        if !frame.is_empty() {
            written += self.writer.write_batch(&frame)?;
        }
        if written > 0 {
            self.writer.flush()?;
        }

        self.stats.frames += 1;
        self.stats.last_frame_bytes = written;
        self.stats.last_frame_rows = emitted_rows;
        self.stats.total_bytes += written as u64;
        tracing::trace!(bytes = written, rows = emitted_rows, "frame rendered");
        Ok(written)
    }

    fn begin_batch(&mut self, frame: &mut OutputBuffer) {
        if self.options.save_cursor {
            self.caps.expand_into(StringCap::SaveCursor, &[], 1, frame);
        }
        if self.options.hide_cursor_during_render {
            self.caps
                .expand_into(StringCap::CursorInvisible, &[], 1, frame);
        }
    }

    fn end_batch(&mut self, frame: &mut OutputBuffer) {
        if self.options.hide_cursor_during_render {
            self.caps.expand_into(StringCap::CursorNormal, &[], 1, frame);
        }
        if self.options.save_cursor {
            self.caps.expand_into(StringCap::RestoreCursor, &[], 1, frame);
        }
    }

    /// Reset attributes, show the cursor and flush. Later calls do nothing.
    pub fn destroy(&mut self) -> Result<()> {
        if self.destroyed {
            return Ok(());
        }
        self.destroyed = true;
        self.render_requested = false;
        if self.stats.total_bytes > 0 {
            let mut out = OutputBuffer::new();
            self.caps
                .expand_into(StringCap::ExitAttributeMode, &[], 1, &mut out);
            self.caps.expand_into(StringCap::CursorNormal, &[], 1, &mut out);
            let written = self.writer.write_batch(&out)?;
            self.stats.total_bytes += written as u64;
        }
        self.writer.flush()?;
        tracing::debug!(frames = self.stats.frames, "renderer destroyed");
        Ok(())
    }
}

impl<W: Write> Drop for Renderer<W> {
    fn drop(&mut self) {
        if let Err(err) = self.destroy() {
            tracing::warn!(error = %err, "renderer teardown failed");
        }
    }
}
