//! Menu configuration.
//!
//! [`MenuOptions`] is a plain value read at render time. Replacing it on a
//! live controller requires a `reload()` to take full effect.

use crate::types::{Attr, Rgba, TextAlign};

/// Configuration for title-strip styling and geometry.
///
/// All dimensions are in terminal cells. The defaults mirror the widget's
/// traditional look: white titles, orange selection, a centered label row
/// and a one-row underline.
///
/// # Example
///
/// ```
/// use swipe_menu::options::MenuOptions;
/// use swipe_menu::types::{Attr, Rgba};
///
/// let options = MenuOptions {
///     title_selected_color: Rgba::from_hex("#ffcc00").unwrap(),
///     title_attrs: Attr::BOLD,
///     ..Default::default()
/// };
/// assert_eq!(options.title_height, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOptions {
    /// Title text color for unselected items.
    pub title_color: Rgba,
    /// Title text color for the selected item.
    pub title_selected_color: Rgba,
    /// Title text attributes (bold, italic, ...).
    pub title_attrs: Attr,
    /// Title text alignment within its cell.
    pub title_align: TextAlign,
    /// Title strip height in rows, underline rows included.
    pub title_height: u16,
    /// Spacing between title cells, in columns.
    pub title_spacing: u16,
    /// Underline color for the selected item.
    pub line_color: Rgba,
    /// Underline height in rows.
    pub line_height: u16,
    /// Background behind each title cell.
    pub title_background: Rgba,
    /// Background of the title strip band.
    pub strip_background: Rgba,
    /// Background of the content pager band.
    pub pager_background: Rgba,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            title_color: Rgba::WHITE,
            title_selected_color: Rgba::ORANGE,
            title_attrs: Attr::NONE,
            title_align: TextAlign::Center,
            title_height: 2,
            title_spacing: 2,
            line_color: Rgba::WHITE,
            line_height: 1,
            title_background: Rgba::TERMINAL_DEFAULT,
            strip_background: Rgba::TERMINAL_DEFAULT,
            pager_background: Rgba::TERMINAL_DEFAULT,
        }
    }
}

impl MenuOptions {
    /// Rows available for the label band (title height minus underline rows).
    ///
    /// Always at least one row so a degenerate configuration still shows text.
    pub fn label_rows(&self) -> u16 {
        self.title_height.saturating_sub(self.line_height).max(1)
    }
}
