//! FrameBuffer and drawing primitives.
//!
//! The FrameBuffer is a 2D grid of Cells that represents what should be
//! displayed on the terminal. All widget drawing works on this buffer.
//!
//! # Design Decisions
//!
//! - **Flat storage**: `Vec<Cell>` with row-major indexing for cache efficiency.
//! - **Clipping**: drawing functions accept an optional clip `Rect`.
//! - **Wide characters**: CJK/emoji occupy two cells; the trailing cell
//!   holds a `'\0'` continuation marker the presenter skips.

use crate::layout::text_measure::char_width;
use crate::types::{Attr, Cell, Rect, Rgba, TextAlign};

/// Continuation marker for the trailing cell of a wide character.
pub(crate) const CONTINUATION: char = '\0';

/// A 2D buffer of terminal cells.
///
/// Uses flat storage with row-major indexing: `index = y * width + x`
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    /// Get buffer width.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Get buffer height.
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Get the full buffer bounds.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Convert (x, y) to flat index.
    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Check if coordinates are in bounds.
    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Get a cell reference (returns None if out of bounds).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Get a mutable cell reference (returns None if out of bounds).
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Resize the buffer, resetting every cell to default.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(width as usize * height as usize, Cell::default());
    }

    /// Reset all cells to default without changing dimensions.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Effective drawing area: `rect` clipped to `clip` and buffer bounds.
    fn clip_area(&self, rect: &Rect, clip: Option<&Rect>) -> Option<Rect> {
        let area = rect.intersect(&self.bounds())?;
        match clip {
            Some(c) => area.intersect(c),
            None => Some(area),
        }
    }

    /// Fill a rectangle with a background color, clearing characters.
    ///
    /// A transparent `bg` leaves existing backgrounds untouched but still
    /// clears the characters.
    pub fn fill_rect(&mut self, rect: Rect, bg: Rgba, clip: Option<&Rect>) {
        let Some(area) = self.clip_area(&rect, clip) else {
            return;
        };

        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                let idx = self.index(x, y);
                let cell = &mut self.cells[idx];
                cell.ch = ' ';
                cell.fg = Rgba::TERMINAL_DEFAULT;
                cell.attrs = Attr::NONE;
                if !bg.is_transparent() {
                    cell.bg = bg;
                }
            }
        }
    }

    /// Draw a single line of text starting at (x, y).
    ///
    /// `x` is signed: a cell scrolled partly off the left edge starts at a
    /// negative column and only its visible tail is drawn. Wide characters
    /// take two cells; the trailing cell gets a continuation marker. A wide
    /// character that would straddle the clip edge is dropped. A transparent
    /// `bg` preserves the cell background.
    pub fn draw_text(
        &mut self,
        x: i32,
        y: u16,
        text: &str,
        fg: Rgba,
        bg: Rgba,
        attrs: Attr,
        clip: Option<&Rect>,
    ) {
        let bounds = self.bounds();
        let Some(area) = self.clip_area(&bounds, clip) else {
            return;
        };
        if y < area.y || y >= area.bottom() {
            return;
        }

        let mut cx = x;
        for c in text.chars() {
            let w = char_width(c) as i32;
            if w == 0 {
                continue;
            }
            let end = cx + w;
            if end > area.right() as i32 {
                break;
            }
            if cx >= area.x as i32 {
                let idx = self.index(cx as u16, y);
                let cell = &mut self.cells[idx];
                cell.ch = c;
                cell.fg = fg;
                cell.attrs = attrs;
                if !bg.is_transparent() {
                    cell.bg = bg;
                }
                if w == 2 {
                    let idx = self.index(cx as u16 + 1, y);
                    let cont = &mut self.cells[idx];
                    cont.ch = CONTINUATION;
                    cont.fg = fg;
                    cont.attrs = attrs;
                    if !bg.is_transparent() {
                        cont.bg = bg;
                    }
                }
            }
            cx = end;
        }
    }

    /// Draw text aligned within a rect row.
    ///
    /// `row` is relative to `rect.y`. Text wider than the rect falls back
    /// to left alignment and clips at the rect edge.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text_aligned(
        &mut self,
        rect: Rect,
        row: u16,
        text: &str,
        align: TextAlign,
        fg: Rgba,
        bg: Rgba,
        attrs: Attr,
        clip: Option<&Rect>,
    ) {
        if row >= rect.height {
            return;
        }
        let text_w = crate::layout::string_width(text);
        let x = match align {
            TextAlign::Left => rect.x,
            TextAlign::Center => rect.x + rect.width.saturating_sub(text_w) / 2,
            TextAlign::Right => rect.x + rect.width.saturating_sub(text_w),
        };

        let inner = match clip {
            Some(c) => rect.intersect(c),
            None => Some(rect),
        };
        let Some(inner) = inner else { return };
        self.draw_text(x as i32, rect.y + row, text, fg, bg, attrs, Some(&inner));
    }

    /// Draw a horizontal rule of `─` characters.
    pub fn draw_hrule(&mut self, x: u16, y: u16, width: u16, color: Rgba, clip: Option<&Rect>) {
        let Some(area) = self.clip_area(&Rect::new(x, y, width, 1), clip) else {
            return;
        };
        for cx in area.x..area.right() {
            let idx = self.index(cx, area.y);
            let cell = &mut self.cells[idx];
            cell.ch = '─';
            cell.fg = color;
            cell.attrs = Attr::NONE;
        }
    }
}
