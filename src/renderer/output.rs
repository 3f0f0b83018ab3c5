//! Output buffering and differential terminal presentation.
//!
//! These components optimize terminal output by:
//! - Batching writes so a frame reaches the terminal in one flush
//! - Tracking emitted style/cursor state to avoid redundant escape codes
//! - Only emitting cells that changed since the previous frame

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{
        Attribute, Attributes, Color, Print, SetAttribute, SetAttributes, SetBackgroundColor,
        SetForegroundColor,
    },
};

use super::buffer::{CONTINUATION, FrameBuffer};
use crate::error::Result;
use crate::layout::text_measure::char_width;
use crate::types::{Attr, Cell, Rgba};

// =============================================================================
// OutputBuffer
// =============================================================================

/// A buffer that accumulates output for batch writing.
///
/// Instead of many small writes to the terminal, we accumulate everything
/// and flush once. This reduces syscall overhead significantly.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(16384) // 16KB default
    }

    /// Create a buffer with specific capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Get current buffer length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Clear the buffer without deallocating.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Flush buffer to a writer.
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        writer.write_all(&self.data)?;
        self.data.clear();
        Ok(())
    }

    /// Get the accumulated data as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(()) // Buffering only - real flush via flush_to
    }
}

// =============================================================================
// Style conversion
// =============================================================================

/// Map a widget color to a crossterm color.
///
/// Terminal-default and transparent colors fall back to `Color::Reset`.
fn to_color(color: Rgba) -> Color {
    if color.is_terminal_default() || color.is_transparent() {
        Color::Reset
    } else {
        Color::Rgb {
            r: color.r as u8,
            g: color.g as u8,
            b: color.b as u8,
        }
    }
}

/// Map widget attribute flags to crossterm attributes.
fn to_attributes(attrs: Attr) -> Attributes {
    let mut result = Attributes::default();
    for (flag, attribute) in [
        (Attr::BOLD, Attribute::Bold),
        (Attr::DIM, Attribute::Dim),
        (Attr::ITALIC, Attribute::Italic),
        (Attr::UNDERLINE, Attribute::Underlined),
        (Attr::INVERSE, Attribute::Reverse),
        (Attr::STRIKETHROUGH, Attribute::CrossedOut),
    ] {
        if attrs.contains(flag) {
            result = result.with(attribute);
        }
    }
    result
}

// =============================================================================
// CellEmitter
// =============================================================================

/// Emits cells while tracking terminal state to minimize output.
///
/// Tracks the last cursor position (to skip redundant moves) and the last
/// emitted style triple (to skip redundant color/attribute codes).
#[derive(Debug, Default)]
struct CellEmitter {
    cursor: Option<(u16, u16)>,
    style: Option<(Rgba, Rgba, Attr)>,
}

impl CellEmitter {
    /// Forget tracked terminal state (start of a new frame).
    fn reset(&mut self) {
        self.cursor = None;
        self.style = None;
    }

    /// Queue one cell's escape codes and character.
    fn emit(&mut self, out: &mut OutputBuffer, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        if self.cursor != Some((x, y)) {
            queue!(out, MoveTo(x, y))?;
        }

        let style = (cell.fg, cell.bg, cell.attrs);
        if self.style != Some(style) {
            queue!(
                out,
                SetAttribute(Attribute::Reset),
                SetAttributes(to_attributes(cell.attrs)),
                SetForegroundColor(to_color(cell.fg)),
                SetBackgroundColor(to_color(cell.bg)),
            )?;
            self.style = Some(style);
        }

        queue!(out, Print(cell.ch))?;

        // Wide characters advance the terminal cursor by two columns.
        let advance = char_width(cell.ch).max(1);
        self.cursor = Some((x + advance, y));
        Ok(())
    }
}

// =============================================================================
// TerminalPresenter
// =============================================================================

/// Differential frame presenter.
///
/// Compares each frame to the previously presented one and only outputs
/// cells that changed, batched into a single flush.
#[derive(Debug, Default)]
pub struct TerminalPresenter {
    output: OutputBuffer,
    emitter: CellEmitter,
    previous: Option<FrameBuffer>,
}

impl TerminalPresenter {
    /// Create a new presenter with no frame history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the previous frame so the next present repaints everything.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Present a frame, outputting only changed cells.
    ///
    /// Returns `true` if anything was written.
    pub fn present<W: Write>(&mut self, frame: &FrameBuffer, out: &mut W) -> Result<bool> {
        self.emitter.reset();

        let width = frame.width();
        let height = frame.height();

        let comparable = matches!(
            &self.previous,
            Some(prev) if prev.width() == width && prev.height() == height
        );

        let mut changed = false;
        for y in 0..height {
            for x in 0..width {
                let cell = frame.get(x, y).unwrap();
                if cell.ch == CONTINUATION {
                    continue; // Trailing half of a wide character
                }

                let unchanged = comparable
                    && self
                        .previous
                        .as_ref()
                        .and_then(|prev| prev.get(x, y))
                        .is_some_and(|prev_cell| prev_cell == cell);
                if unchanged {
                    continue;
                }

                changed = true;
                self.emitter.emit(&mut self.output, x, y, cell)?;
            }
        }

        if changed {
            // Leave the terminal with clean styling after the frame.
            queue!(self.output, SetAttribute(Attribute::Reset))?;
            self.output.flush_to(out)?;
            out.flush().map_err(crate::error::MenuError::Io)?;
        }

        self.previous = Some(frame.clone());
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rect;

    fn frame_with_text(text: &str) -> FrameBuffer {
        let mut frame = FrameBuffer::new(10, 2);
        frame.draw_text(0, 0, text, Rgba::WHITE, Rgba::TRANSPARENT, Attr::NONE, None);
        frame
    }

    #[test]
    fn test_first_present_emits() {
        let mut presenter = TerminalPresenter::new();
        let mut sink = Vec::new();

        let changed = presenter.present(&frame_with_text("hi"), &mut sink).unwrap();
        assert!(changed);
        assert!(!sink.is_empty());
        let text = String::from_utf8_lossy(&sink);
        assert!(text.contains('h'));
        assert!(text.contains('i'));
    }

    #[test]
    fn test_identical_frame_emits_nothing() {
        let mut presenter = TerminalPresenter::new();
        let mut sink = Vec::new();
        let frame = frame_with_text("hi");

        presenter.present(&frame, &mut sink).unwrap();
        sink.clear();

        let changed = presenter.present(&frame, &mut sink).unwrap();
        assert!(!changed);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_changed_cell_reemits() {
        let mut presenter = TerminalPresenter::new();
        let mut sink = Vec::new();

        presenter.present(&frame_with_text("hi"), &mut sink).unwrap();
        sink.clear();

        let changed = presenter.present(&frame_with_text("ho"), &mut sink).unwrap();
        assert!(changed);
        let text = String::from_utf8_lossy(&sink);
        assert!(text.contains('o'));
        // The unchanged first column is not re-emitted.
        assert!(!text.contains('h'));
    }

    #[test]
    fn test_invalidate_forces_full_repaint() {
        let mut presenter = TerminalPresenter::new();
        let mut sink = Vec::new();
        let frame = frame_with_text("hi");

        presenter.present(&frame, &mut sink).unwrap();
        sink.clear();

        presenter.invalidate();
        let changed = presenter.present(&frame, &mut sink).unwrap();
        assert!(changed);
        assert!(!sink.is_empty());
    }

    #[test]
    fn test_resize_forces_full_repaint() {
        let mut presenter = TerminalPresenter::new();
        let mut sink = Vec::new();

        presenter.present(&frame_with_text("hi"), &mut sink).unwrap();
        sink.clear();

        let mut bigger = FrameBuffer::new(12, 3);
        bigger.fill_rect(Rect::new(0, 0, 12, 3), Rgba::rgb(1, 2, 3), None);
        let changed = presenter.present(&bigger, &mut sink).unwrap();
        assert!(changed);
    }
}
