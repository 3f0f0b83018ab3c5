//! Band geometry and title-strip arithmetic.
//!
//! The widget's layout is a fixed vertical split: a title strip band below
//! the host's top chrome, and a content pager filling the rest above the
//! bottom chrome. Geometry is recomputed from scratch on every resize
//! notification, never gated by an "already laid out" check.

pub mod text_measure;

pub use text_measure::{char_width, string_width};

use crate::types::Rect;

// =============================================================================
// Chrome
// =============================================================================

/// Host-provided chrome heights the widget must stay clear of.
///
/// `top` covers status/navigation rows, `bottom` covers tab-bar rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Chrome {
    pub top: u16,
    pub bottom: u16,
}

impl Chrome {
    pub const fn new(top: u16, bottom: u16) -> Self {
        Self { top, bottom }
    }
}

// =============================================================================
// MenuLayout
// =============================================================================

/// Computed band geometry for the two strips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuLayout {
    /// Full container bounds.
    pub container: Rect,
    /// Title strip band.
    pub title_strip: Rect,
    /// Content pager band. Its width is the page width.
    pub pager: Rect,
}

impl MenuLayout {
    /// Compute the band split for a container of `width` x `height` cells.
    ///
    /// The title strip sits directly below the top chrome at the configured
    /// height; the pager takes the remaining rows above the bottom chrome.
    /// Bands degrade to zero height rather than overlapping when the
    /// container is too small.
    pub fn compute(width: u16, height: u16, chrome: Chrome, title_height: u16) -> Self {
        let container = Rect::new(0, 0, width, height);

        let strip_y = chrome.top.min(height);
        let strip_h = title_height.min(height - strip_y);
        let title_strip = Rect::new(0, strip_y, width, strip_h);

        let pager_y = strip_y + strip_h;
        let pager_h = height
            .saturating_sub(pager_y)
            .saturating_sub(chrome.bottom);
        let pager = Rect::new(0, pager_y, width, pager_h);

        Self {
            container,
            title_strip,
            pager,
        }
    }

    /// Page width of the content pager (one page = one pager width).
    #[inline]
    pub fn page_width(&self) -> u16 {
        self.pager.width
    }
}

// =============================================================================
// Title strip arithmetic
// =============================================================================

/// X offsets of each title cell within the strip's scrollable content,
/// plus the total content width.
///
/// Cells are laid out left to right with `spacing` columns between them.
pub fn title_offsets(widths: &[u16], spacing: u16) -> (Vec<u16>, u16) {
    let mut offsets = Vec::with_capacity(widths.len());
    let mut x = 0u16;

    for (i, w) in widths.iter().enumerate() {
        if i > 0 {
            x = x.saturating_add(spacing);
        }
        offsets.push(x);
        x = x.saturating_add(*w);
    }

    (offsets, x)
}

/// Position of the title cell containing content-space column `x`.
///
/// Returns `None` when `x` lands in a spacing gap or past the last cell.
pub fn hit_title(x: u16, offsets: &[u16], widths: &[u16]) -> Option<usize> {
    for (i, (&cell_x, &cell_w)) in offsets.iter().zip(widths.iter()).enumerate() {
        if x >= cell_x && x < cell_x.saturating_add(cell_w) {
            return Some(i);
        }
    }
    None
}

/// Maximum horizontal scroll for content of `content_width` in a viewport
/// of `viewport_width`.
#[inline]
pub fn max_scroll(content_width: u16, viewport_width: u16) -> u16 {
    content_width.saturating_sub(viewport_width)
}
