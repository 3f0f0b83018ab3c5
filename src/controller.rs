//! SwipeMenuController - the widget.
//!
//! Owns the two strips (title strip + content pager), the selection state,
//! the title size cache, and the frame buffer the strips are painted into.
//! Every cross-strip mutation routes through the single selection
//! synchronization procedure in [`select_title`], so the strips can never
//! disagree about what is active.
//!
//! # Event flow
//!
//! - Host calls ([`update_current_index`], [`add_child`], ...) and input
//!   events ([`handle_event`]) mutate state and mark cells dirty.
//! - [`render`] repaints dirty cells into the owned frame buffer.
//! - [`draw`] presents the frame differentially to a terminal writer.
//! - [`tick`] advances the title-strip reveal glide one frame.
//!
//! [`select_title`]: SwipeMenuController::select_title
//! [`update_current_index`]: SwipeMenuController::update_current_index
//! [`add_child`]: SwipeMenuController::add_child
//! [`handle_event`]: SwipeMenuController::handle_event
//! [`render`]: SwipeMenuController::render
//! [`draw`]: SwipeMenuController::draw
//! [`tick`]: SwipeMenuController::tick

use std::io::Write;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use log::{debug, warn};

use crate::cache::{CellSize, TitleSizeCache};
use crate::child::{ChildId, ChildScreen};
use crate::delegate::SwipeMenuDelegate;
use crate::error::Result;
use crate::layout::{self, Chrome, MenuLayout, string_width};
use crate::options::MenuOptions;
use crate::renderer::{FrameBuffer, TerminalPresenter};
use crate::state::{ScrollState, SelectionState};
use crate::types::{Rect, Rgba, TextAlign};

// =============================================================================
// Constants
// =============================================================================

/// Horizontal padding added around a measured title (one cell per side).
const TITLE_PADDING: u16 = 2;

/// Scroll amount for mouse wheel over the title strip.
pub const WHEEL_SCROLL: u16 = 3;

// =============================================================================
// Internal types
// =============================================================================

/// The two strips an input or render request can target.
///
/// Exhaustive matches over this enum are what make a "neither strip"
/// dispatch a compile-time impossibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strip {
    Title,
    Content,
}

/// A child screen plus its stable identity.
struct ChildEntry {
    id: ChildId,
    screen: Box<dyn ChildScreen>,
}

/// In-flight pager drag (terminal swipe).
#[derive(Debug, Clone, Copy)]
struct DragState {
    start_x: u16,
    last_x: u16,
}

/// Pending repaint work, cell-granular for the title strip.
#[derive(Debug, Default)]
struct DirtyState {
    all_titles: bool,
    titles: Vec<usize>,
    pager: bool,
}

impl DirtyState {
    fn mark_title(&mut self, position: usize) {
        if !self.all_titles && !self.titles.contains(&position) {
            self.titles.push(position);
        }
    }

    fn mark_all_titles(&mut self) {
        self.all_titles = true;
        self.titles.clear();
    }

    fn mark_pager(&mut self) {
        self.pager = true;
    }

    fn mark_all(&mut self) {
        self.mark_all_titles();
        self.mark_pager();
    }
}

/// Pager offset of a page, saturating at the scroll range limit.
fn page_offset(page: usize, page_width: u16) -> u16 {
    (page as u32)
        .saturating_mul(page_width as u32)
        .min(u16::MAX as u32) as u16
}

// =============================================================================
// SwipeMenuController
// =============================================================================

/// A swipe menu: scrollable title strip synced with a paging content area.
///
/// # Example
///
/// ```
/// use swipe_menu::controller::SwipeMenuController;
/// use swipe_menu::child::ChildScreen;
/// use swipe_menu::delegate::SwipeMenuDelegate;
/// use swipe_menu::child::ChildId;
/// use swipe_menu::options::MenuOptions;
/// use swipe_menu::renderer::FrameBuffer;
/// use swipe_menu::types::Rect;
///
/// struct Page;
/// impl ChildScreen for Page {
///     fn render(&mut self, _frame: &mut FrameBuffer, _area: Rect) {}
/// }
///
/// struct Host;
/// impl SwipeMenuDelegate for Host {
///     fn title_for(&mut self, position: usize, _child: ChildId) -> Option<String> {
///         Some(format!("Page {position}"))
///     }
/// }
///
/// let mut menu = SwipeMenuController::new(MenuOptions::default(), Box::new(Host));
/// menu.resize(80, 24);
/// menu.add_child(Box::new(Page));
/// menu.add_child(Box::new(Page));
/// menu.update_current_index(0);
/// menu.render();
/// ```
pub struct SwipeMenuController {
    options: MenuOptions,
    delegate: Box<dyn SwipeMenuDelegate>,
    children: Vec<ChildEntry>,
    next_id: u64,
    chrome: Chrome,
    layout: MenuLayout,
    selection: SelectionState,
    title_scroll: ScrollState,
    pager_scroll: ScrollState,
    size_cache: TitleSizeCache,
    frame: FrameBuffer,
    presenter: TerminalPresenter,
    dirty: DirtyState,
    drag: Option<DragState>,
    last_content_width: u16,
}

impl SwipeMenuController {
    /// Create a controller with no children and zero size.
    ///
    /// Call [`resize`](Self::resize) with the container size before the
    /// first render.
    pub fn new(options: MenuOptions, delegate: Box<dyn SwipeMenuDelegate>) -> Self {
        Self {
            options,
            delegate,
            children: Vec::new(),
            next_id: 0,
            chrome: Chrome::default(),
            layout: MenuLayout::default(),
            selection: SelectionState::new(),
            title_scroll: ScrollState::new(),
            pager_scroll: ScrollState::new(),
            size_cache: TitleSizeCache::new(),
            frame: FrameBuffer::new(0, 0),
            presenter: TerminalPresenter::new(),
            dirty: DirtyState::default(),
            drag: None,
            last_content_width: 0,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Currently active position.
    pub fn current_index(&self) -> usize {
        self.selection.current()
    }

    /// Number of child screens.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Check if the menu has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Identity of the child at `index`, if in range.
    pub fn child_id(&self, index: usize) -> Option<ChildId> {
        self.children.get(index).map(|entry| entry.id)
    }

    /// Current configuration.
    pub fn options(&self) -> &MenuOptions {
        &self.options
    }

    /// Computed band geometry.
    pub fn layout(&self) -> &MenuLayout {
        &self.layout
    }

    /// The frame the strips are painted into.
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Replace the configuration. Drops cached sizes and re-renders.
    pub fn set_options(&mut self, options: MenuOptions) {
        self.options = options;
        self.size_cache.clear();
        self.resize(self.layout.container.width, self.layout.container.height);
    }

    /// Update the host chrome heights. Recomputes the band split.
    pub fn set_chrome(&mut self, chrome: Chrome) {
        self.chrome = chrome;
        self.resize(self.layout.container.width, self.layout.container.height);
    }

    /// Recompute geometry for a new container size.
    ///
    /// Runs on every resize notification; the bands are never gated by an
    /// "already laid out" check, so rotations and split changes always
    /// take effect.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.layout = MenuLayout::compute(width, height, self.chrome, self.options.title_height);
        self.frame.resize(width, height);
        self.presenter.invalidate();
        self.refresh_scroll_bounds();

        // Keep the pager on the current page at the new page width.
        let page_w = self.layout.page_width();
        self.pager_scroll
            .scroll_to(page_offset(self.selection.current(), page_w));
        self.dirty.mark_all();
    }

    // =========================================================================
    // Public contract
    // =========================================================================

    /// Programmatically select `index`.
    ///
    /// Same side effects as a tap on the title strip: pager jump, selected
    /// styling flip, animated title reveal, and exactly one of the two
    /// selection callbacks.
    pub fn update_current_index(&mut self, index: usize) {
        if index >= self.children.len() {
            warn!(
                "update_current_index: index {index} out of range (count {})",
                self.children.len()
            );
            return;
        }
        self.select_title(index);
    }

    /// Force a full re-render of both strips from current data.
    pub fn reload(&mut self) {
        self.dirty.mark_all();
    }

    /// Re-measure and re-render a single position.
    ///
    /// Drops the child's cached title size so the next paint re-measures.
    pub fn reload_index(&mut self, index: usize) {
        let Some(entry) = self.children.get(index) else {
            warn!(
                "reload_index: index {index} out of range (count {})",
                self.children.len()
            );
            return;
        };
        self.size_cache.invalidate(entry.id);
        self.dirty.mark_title(index);
        self.dirty.mark_pager();
    }

    /// Re-measure and re-render a single title. Alias for [`reload_index`].
    ///
    /// [`reload_index`]: Self::reload_index
    pub fn update_title(&mut self, index: usize) {
        self.reload_index(index);
    }

    /// Append a child screen and select it.
    ///
    /// The new last position becomes current, the old and new selected
    /// title cells re-render, and the title strip scrolls (animated) to
    /// reveal the new title. Selection callbacks do not fire.
    pub fn add_child(&mut self, screen: Box<dyn ChildScreen>) -> ChildId {
        let id = ChildId(self.next_id);
        self.next_id += 1;
        self.children.push(ChildEntry { id, screen });

        let new_index = self.children.len() - 1;
        let old = self.selection.last_selected();
        self.selection.set_current(new_index);
        self.dirty.mark_title(old);
        self.dirty.mark_title(new_index);
        self.selection.record_selected(new_index);

        self.refresh_scroll_bounds();
        let target = self.title_reveal_offset(new_index);
        self.title_scroll.animate_to(target);

        debug!("add_child: id {} at position {new_index}", id.raw());
        id
    }

    /// Remove the child at `index`.
    ///
    /// Clamps the selection back into range; removing the position
    /// immediately before the selection shifts the selection down one so
    /// it keeps tracking the same child. Out-of-range indices log a
    /// diagnostic and change nothing.
    pub fn remove_child(&mut self, index: usize) {
        let count = self.children.len();
        if index >= count {
            warn!("remove_child: index {index} out of range (count {count})");
            return;
        }

        let removed = self.children.remove(index);
        self.size_cache.invalidate(removed.id);
        debug!("remove_child: id {} at position {index}", removed.id.raw());

        let old_current = self.selection.current();
        let clamped = self.selection.clamp_to(self.children.len());
        let shifted = index + 1 == old_current;
        if shifted {
            self.selection.set_current(old_current - 1);
        }
        if clamped || shifted {
            self.dirty.mark_title(self.selection.current());
            self.selection.record_selected(self.selection.current());
        }

        self.refresh_scroll_bounds();
        self.dirty.mark_all();
    }

    /// Remove a child by identity. Returns `false` for an unknown id.
    pub fn remove_child_by_id(&mut self, id: ChildId) -> bool {
        match self.children.iter().position(|entry| entry.id == id) {
            Some(index) => {
                self.remove_child(index);
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Selection synchronization
    // =========================================================================

    /// The single synchronization procedure both strips are driven through.
    ///
    /// `position` must be in range; taps, swipes, and the public contract
    /// all guard before calling.
    fn select_title(&mut self, position: usize) {
        let id = self.children[position].id;

        if position == self.selection.last_selected() {
            debug!("repeat selected: position {position}");
            self.delegate.on_repeat_selected(position, id);
            return;
        }

        // Pager jumps to the landed page with no animation.
        let page_w = self.layout.page_width();
        if self.pager_scroll.scroll_to(page_offset(position, page_w)) {
            self.dirty.mark_pager();
        }

        let old = self.selection.last_selected();
        self.selection.set_current(position);
        self.dirty.mark_title(old);
        self.dirty.mark_title(position);
        self.selection.record_selected(position);

        // Title strip reveals the selection with an animated glide.
        let target = self.title_reveal_offset(position);
        self.title_scroll.animate_to(target);

        debug!("selected: position {position}");
        self.delegate.on_selected(position, id);
    }

    /// Settle the pager after a swipe: snap to the nearest page boundary,
    /// then derive the landed page by floor division and drive the title
    /// selection protocol if it changed.
    fn settle_pager(&mut self) {
        let page_w = self.layout.page_width();
        if page_w == 0 || self.children.is_empty() {
            return;
        }

        let offset = self.pager_scroll.offset() as u32;
        let snapped = ((offset + page_w as u32 / 2) / page_w as u32) as usize;
        let snapped = snapped.min(self.children.len() - 1);
        if self.pager_scroll.scroll_to(page_offset(snapped, page_w)) {
            self.dirty.mark_pager();
        }

        let landed = (self.pager_scroll.offset() / page_w) as usize;
        if landed == self.selection.current() {
            return;
        }
        self.selection.clamp_to(self.children.len());
        self.select_title(landed.min(self.children.len() - 1));
    }

    // =========================================================================
    // Input events
    // =========================================================================

    /// Feed a terminal event to the widget.
    ///
    /// Returns `true` when the event changed widget state (selection,
    /// scroll, or geometry) and a re-render is worthwhile.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Resize(width, height) => {
                self.resize(*width, *height);
                true
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Key(key) => self.handle_key(key),
            _ => false,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        match key.code {
            KeyCode::Left => self.page_by(-1),
            KeyCode::Right => self.page_by(1),
            _ => false,
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> bool {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => match self.strip_at(x, y) {
                Some(Strip::Title) => self.tap_title_at(x),
                Some(Strip::Content) => {
                    self.drag = Some(DragState {
                        start_x: x,
                        last_x: x,
                    });
                    false
                }
                None => false,
            },
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(drag) = &mut self.drag {
                    drag.last_x = x;
                }
                false
            }
            MouseEventKind::Up(MouseButton::Left) => match self.drag.take() {
                Some(drag) => self.finish_drag(drag),
                None => false,
            },
            MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => self.wheel(x, y, -1),
            MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => self.wheel(x, y, 1),
            _ => false,
        }
    }

    /// Which strip owns the point, if either.
    fn strip_at(&self, x: u16, y: u16) -> Option<Strip> {
        if self.layout.title_strip.contains(x, y) {
            Some(Strip::Title)
        } else if self.layout.pager.contains(x, y) {
            Some(Strip::Content)
        } else {
            None
        }
    }

    /// Tap on the title strip: hit-test the column and run the selection
    /// protocol. Clicks on spacing gaps select nothing.
    fn tap_title_at(&mut self, x: u16) -> bool {
        let strip = self.layout.title_strip;
        let content_x = (x - strip.x).saturating_add(self.title_scroll.offset());

        let widths = self.title_widths();
        let (offsets, _) = layout::title_offsets(&widths, self.options.title_spacing);
        match layout::hit_title(content_x, &offsets, &widths) {
            Some(position) => {
                self.select_title(position);
                true
            }
            None => false,
        }
    }

    fn wheel(&mut self, x: u16, y: u16, direction: i32) -> bool {
        match self.strip_at(x, y) {
            Some(Strip::Title) => {
                let moved = self.title_scroll.scroll_by(direction * WHEEL_SCROLL as i32);
                if moved {
                    self.dirty.mark_all_titles();
                }
                moved
            }
            Some(Strip::Content) => self.page_by(direction),
            None => false,
        }
    }

    /// Step the pager a whole page and settle.
    fn page_by(&mut self, step: i32) -> bool {
        let page_w = self.layout.page_width();
        if page_w == 0 || self.children.is_empty() {
            return false;
        }

        let page = (self.current_page() as i32 + step)
            .clamp(0, self.children.len() as i32 - 1) as usize;
        let changed = self.pager_scroll.scroll_to(page_offset(page, page_w));
        if changed {
            self.dirty.mark_pager();
        }
        self.settle_pager();
        changed
    }

    /// Release of a pager drag: apply the dragged distance, then settle.
    fn finish_drag(&mut self, drag: DragState) -> bool {
        let dx = drag.last_x as i32 - drag.start_x as i32;
        if dx != 0 {
            // Dragging left pulls the next page into view.
            if self.pager_scroll.scroll_by(-dx) {
                self.dirty.mark_pager();
            }
        }
        self.settle_pager();
        true
    }

    /// Advance the title-strip reveal glide one frame.
    ///
    /// Returns `true` if the strip moved and needs a re-render.
    pub fn tick(&mut self) -> bool {
        if self.title_scroll.tick() {
            self.dirty.mark_all_titles();
            true
        } else {
            false
        }
    }

    // =========================================================================
    // Sizing
    // =========================================================================

    /// Title-cell size for `position`: cache hit by child identity, else
    /// measured from the delegate title plus padding. Missing or empty
    /// titles get a minimal placeholder size, which is not cached.
    fn title_size(&mut self, position: usize) -> CellSize {
        let id = self.children[position].id;
        if let Some(size) = self.size_cache.get(id) {
            return size;
        }

        match self.delegate.title_for(position, id) {
            Some(ref title) if !title.is_empty() => {
                let size = CellSize::new(
                    string_width(title).saturating_add(TITLE_PADDING),
                    self.options.title_height,
                );
                self.size_cache.insert(id, size);
                size
            }
            _ => CellSize::new(self.options.title_spacing, self.options.title_height),
        }
    }

    fn title_widths(&mut self) -> Vec<u16> {
        (0..self.children.len())
            .map(|position| self.title_size(position).width)
            .collect()
    }

    /// Scroll offset that reveals `position` at the left edge of the strip
    /// (clamped to the scroll range by the animation).
    fn title_reveal_offset(&mut self, position: usize) -> u16 {
        let widths = self.title_widths();
        let (offsets, _) = layout::title_offsets(&widths, self.options.title_spacing);
        offsets.get(position).copied().unwrap_or(0)
    }

    fn refresh_scroll_bounds(&mut self) {
        let widths = self.title_widths();
        let (_, content_w) = layout::title_offsets(&widths, self.options.title_spacing);
        self.title_scroll
            .set_max(layout::max_scroll(content_w, self.layout.title_strip.width));

        let page_w = self.layout.page_width();
        let pages_w = page_offset(self.children.len(), page_w);
        self.pager_scroll.set_max(layout::max_scroll(pages_w, page_w));
    }

    /// Page derived from the pager offset (floor division).
    fn current_page(&self) -> usize {
        let page_w = self.layout.page_width();
        if page_w == 0 {
            return 0;
        }
        (self.pager_scroll.offset() / page_w) as usize
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Repaint pending dirty cells into the owned frame buffer.
    pub fn render(&mut self) {
        let widths = self.title_widths();
        let (offsets, content_w) = layout::title_offsets(&widths, self.options.title_spacing);

        // A size change shifts every later cell: repaint the whole band.
        if content_w != self.last_content_width {
            self.last_content_width = content_w;
            self.title_scroll
                .set_max(layout::max_scroll(content_w, self.layout.title_strip.width));
            self.dirty.mark_all_titles();
        }

        if self.dirty.all_titles {
            self.paint_title_strip(&widths, &offsets);
        } else {
            let positions = std::mem::take(&mut self.dirty.titles);
            for position in positions {
                self.paint_title_cell(position, &widths, &offsets);
            }
        }

        if self.dirty.pager {
            self.paint_pager();
        }

        self.dirty.all_titles = false;
        self.dirty.titles.clear();
        self.dirty.pager = false;
    }

    /// Render and present to a terminal writer in one call.
    ///
    /// Only cells that changed since the last draw are emitted.
    pub fn draw<W: Write>(&mut self, out: &mut W) -> Result<bool> {
        self.render();
        self.presenter.present(&self.frame, out)
    }

    fn paint_title_strip(&mut self, widths: &[u16], offsets: &[u16]) {
        let strip = self.layout.title_strip;
        if strip.is_empty() {
            return;
        }
        self.frame
            .fill_rect(strip, self.options.strip_background, None);
        for position in 0..widths.len() {
            self.paint_title_cell(position, widths, offsets);
        }
    }

    fn paint_title_cell(&mut self, position: usize, widths: &[u16], offsets: &[u16]) {
        let strip = self.layout.title_strip;
        if strip.is_empty() || position >= widths.len() {
            return;
        }

        let width = widths[position];
        let cell_x = strip.x as i32 + offsets[position] as i32 - self.title_scroll.offset() as i32;
        let cell_right = cell_x + width as i32;
        if cell_right <= strip.x as i32 || cell_x >= strip.right() as i32 {
            return; // Fully scrolled out of view
        }

        let visible_x = cell_x.max(strip.x as i32) as u16;
        let visible_right = cell_right.min(strip.right() as i32) as u16;
        let visible = Rect::new(visible_x, strip.y, visible_right - visible_x, strip.height);

        self.frame
            .fill_rect(visible, self.options.title_background, Some(&strip));

        let id = self.children[position].id;
        let selected = position == self.selection.current();
        let fg = if selected {
            self.options.title_selected_color
        } else {
            self.options.title_color
        };

        if let Some(title) = self.delegate.title_for(position, id) {
            let text_w = string_width(&title);
            let text_x = match self.options.title_align {
                TextAlign::Left => cell_x,
                TextAlign::Center => cell_x + width.saturating_sub(text_w) as i32 / 2,
                TextAlign::Right => cell_x + width.saturating_sub(text_w) as i32,
            };
            let label_rows = self.options.label_rows().min(strip.height);
            let label_y = strip.y + (label_rows - 1) / 2;
            self.frame.draw_text(
                text_x,
                label_y,
                &title,
                fg,
                Rgba::TRANSPARENT,
                self.options.title_attrs,
                Some(&visible),
            );
        }

        // Underline only under the selection; transparent otherwise.
        if selected && !self.options.line_color.is_transparent() {
            let line_rows = self.options.line_height.min(strip.height);
            for row in 0..line_rows {
                let y = strip.bottom() - 1 - row;
                self.frame
                    .draw_hrule(visible.x, y, visible.width, self.options.line_color, Some(&visible));
            }
        }
    }

    fn paint_pager(&mut self) {
        let pager = self.layout.pager;
        if pager.is_empty() {
            return;
        }

        // Detach-and-embed: clear the band, then the landed page's child
        // paints the full region.
        self.frame
            .fill_rect(pager, self.options.pager_background, None);
        if self.children.is_empty() {
            return;
        }

        let page = self.current_page().min(self.children.len() - 1);
        self.children[page].screen.render(&mut self.frame, pager);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FillChild(char);

    impl ChildScreen for FillChild {
        fn render(&mut self, frame: &mut FrameBuffer, area: Rect) {
            for y in area.y..area.bottom() {
                for x in area.x..area.right() {
                    if let Some(cell) = frame.get_mut(x, y) {
                        cell.ch = self.0;
                    }
                }
            }
        }
    }

    #[derive(Default)]
    struct Recorded {
        selected: Vec<usize>,
        repeated: Vec<usize>,
        title_queries: usize,
    }

    struct RecordingDelegate {
        titles: Vec<Option<String>>,
        recorded: Rc<RefCell<Recorded>>,
    }

    impl SwipeMenuDelegate for RecordingDelegate {
        fn title_for(&mut self, position: usize, _child: ChildId) -> Option<String> {
            self.recorded.borrow_mut().title_queries += 1;
            self.titles.get(position).cloned().flatten()
        }

        fn on_selected(&mut self, position: usize, _child: ChildId) {
            self.recorded.borrow_mut().selected.push(position);
        }

        fn on_repeat_selected(&mut self, position: usize, _child: ChildId) {
            self.recorded.borrow_mut().repeated.push(position);
        }
    }

    fn menu_with_titles(titles: &[&str]) -> (SwipeMenuController, Rc<RefCell<Recorded>>) {
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        let delegate = RecordingDelegate {
            titles: titles.iter().map(|t| Some((*t).to_string())).collect(),
            recorded: recorded.clone(),
        };
        let mut menu = SwipeMenuController::new(MenuOptions::default(), Box::new(delegate));
        menu.resize(40, 12);
        for (i, _) in titles.iter().enumerate() {
            menu.add_child(Box::new(FillChild(char::from(b'a' + i as u8))));
        }
        // Adding selects the last child; settle on position 0 for tests.
        if !titles.is_empty() {
            menu.update_current_index(0);
        }
        menu.render();
        recorded.borrow_mut().selected.clear();
        recorded.borrow_mut().repeated.clear();
        (menu, recorded)
    }

    #[test]
    fn test_update_current_index_fires_selected_once() {
        let (mut menu, recorded) = menu_with_titles(&["A", "B", "C"]);

        menu.update_current_index(2);
        assert_eq!(menu.current_index(), 2);
        assert_eq!(recorded.borrow().selected, vec![2]);
        assert!(recorded.borrow().repeated.is_empty());
    }

    #[test]
    fn test_update_current_index_repeat_fires_repeat() {
        let (mut menu, recorded) = menu_with_titles(&["A", "B", "C"]);

        menu.update_current_index(0);
        assert_eq!(menu.current_index(), 0);
        assert!(recorded.borrow().selected.is_empty());
        assert_eq!(recorded.borrow().repeated, vec![0]);
    }

    #[test]
    fn test_update_current_index_out_of_range_is_noop() {
        let (mut menu, recorded) = menu_with_titles(&["A", "B"]);

        menu.update_current_index(5);
        assert_eq!(menu.current_index(), 0);
        assert!(recorded.borrow().selected.is_empty());
        assert!(recorded.borrow().repeated.is_empty());
    }

    #[test]
    fn test_tap_repaints_exactly_two_title_cells() {
        let (mut menu, recorded) = menu_with_titles(&["A", "B", "C"]);
        recorded.borrow_mut().title_queries = 0;

        menu.update_current_index(2);
        menu.render();

        // Sizes are cached, so the only delegate queries are the repaints
        // of the deselected and newly selected cells.
        assert_eq!(recorded.borrow().title_queries, 2);
    }

    #[test]
    fn test_selection_moves_pager() {
        let (mut menu, _) = menu_with_titles(&["A", "B", "C"]);
        let page_w = menu.layout().page_width();

        menu.update_current_index(1);
        menu.render();

        // Page 1's child fills the pager band with 'b'.
        let pager = menu.layout().pager;
        assert_eq!(menu.frame().get(pager.x, pager.y).unwrap().ch, 'b');
        assert_eq!(menu.current_page(), 1);
        assert_eq!(menu.pager_scroll.offset(), page_w);
    }

    #[test]
    fn test_selected_styling_flips() {
        let (mut menu, _) = menu_with_titles(&["A", "B"]);
        menu.render();

        let options = menu.options().clone();
        let strip = menu.layout().title_strip;

        // "A" occupies columns 0..3 (1 pad + glyph + 1 pad); its label sits
        // in the first strip row, the underline in the last.
        let a_label = menu.frame().get(1, strip.y).unwrap();
        assert_eq!(a_label.ch, 'A');
        assert_eq!(a_label.fg, options.title_selected_color);
        assert_eq!(
            menu.frame().get(1, strip.bottom() - 1).unwrap().ch,
            '─'
        );

        menu.update_current_index(1);
        menu.render();

        let a_label = menu.frame().get(1, strip.y).unwrap();
        assert_eq!(a_label.fg, options.title_color);
        // A's underline is gone, B's is drawn under its cell (columns 5..8).
        assert_eq!(menu.frame().get(1, strip.bottom() - 1).unwrap().ch, ' ');
        assert_eq!(menu.frame().get(6, strip.bottom() - 1).unwrap().ch, '─');
    }

    #[test]
    fn test_add_child_selects_it() {
        let (mut menu, recorded) = menu_with_titles(&["A", "B"]);

        menu.add_child(Box::new(FillChild('z')));
        assert_eq!(menu.len(), 3);
        assert_eq!(menu.current_index(), 2);
        // Adding does not fire selection callbacks.
        assert!(recorded.borrow().selected.is_empty());
    }

    #[test]
    fn test_remove_child_out_of_range_is_noop() {
        let (mut menu, _) = menu_with_titles(&["A", "B"]);

        menu.remove_child(9);
        assert_eq!(menu.len(), 2);
        assert_eq!(menu.current_index(), 0);
    }

    #[test]
    fn test_remove_immediately_before_selection_shifts_down() {
        let (mut menu, _) = menu_with_titles(&["A", "B", "C", "D"]);
        menu.update_current_index(2);

        menu.remove_child(1);
        assert_eq!(menu.len(), 3);
        assert_eq!(menu.current_index(), 1); // still "C"
    }

    #[test]
    fn test_remove_selected_last_clamps() {
        let (mut menu, _) = menu_with_titles(&["A", "B"]);
        menu.update_current_index(1);

        menu.remove_child(1);
        assert_eq!(menu.current_index(), 0);
    }

    #[test]
    fn test_remove_last_child_then_reload_is_safe() {
        let (mut menu, _) = menu_with_titles(&["A"]);

        menu.remove_child(0);
        assert_eq!(menu.len(), 0);
        assert_eq!(menu.current_index(), 0);

        menu.reload();
        menu.render(); // must not panic with an empty sequence
    }

    #[test]
    fn test_remove_child_by_id() {
        let (mut menu, _) = menu_with_titles(&["A", "B"]);
        let id = menu.child_id(1).unwrap();

        assert!(menu.remove_child_by_id(id));
        assert_eq!(menu.len(), 1);
        assert!(!menu.remove_child_by_id(id));
    }

    #[test]
    fn test_key_paging_drives_selection() {
        let (mut menu, recorded) = menu_with_titles(&["A", "B", "C"]);

        let right = Event::Key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE));
        assert!(menu.handle_event(&right));
        assert_eq!(menu.current_index(), 1);
        assert_eq!(recorded.borrow().selected, vec![1]);

        let left = Event::Key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE));
        assert!(menu.handle_event(&left));
        assert_eq!(menu.current_index(), 0);
    }

    #[test]
    fn test_key_paging_clamps_at_edges() {
        let (mut menu, _) = menu_with_titles(&["A", "B"]);

        let left = Event::Key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE));
        assert!(!menu.handle_event(&left));
        assert_eq!(menu.current_index(), 0);
    }

    #[test]
    fn test_tap_title_selects() {
        let (mut menu, recorded) = menu_with_titles(&["A", "B", "C"]);
        let strip = menu.layout().title_strip;

        // Cells: A=0..3, gap, B=5..8. Click inside B.
        let tap = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 6,
            row: strip.y,
            modifiers: KeyModifiers::NONE,
        });
        assert!(menu.handle_event(&tap));
        assert_eq!(menu.current_index(), 1);
        assert_eq!(recorded.borrow().selected, vec![1]);
    }

    #[test]
    fn test_tap_on_spacing_gap_selects_nothing() {
        let (mut menu, recorded) = menu_with_titles(&["A", "B"]);
        let strip = menu.layout().title_strip;

        let tap = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3, // gap between A and B
            row: strip.y,
            modifiers: KeyModifiers::NONE,
        });
        assert!(!menu.handle_event(&tap));
        assert_eq!(menu.current_index(), 0);
        assert!(recorded.borrow().selected.is_empty());
    }

    #[test]
    fn test_drag_swipe_settles_on_next_page() {
        let (mut menu, recorded) = menu_with_titles(&["A", "B", "C"]);
        let pager = menu.layout().pager;
        let page_w = menu.layout().page_width();

        // Drag left by more than half a page: settles on page 1.
        let down = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: pager.x + page_w - 2,
            row: pager.y,
            modifiers: KeyModifiers::NONE,
        });
        let drag = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column: pager.x + 2,
            row: pager.y,
            modifiers: KeyModifiers::NONE,
        });
        let up = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: pager.x + 2,
            row: pager.y,
            modifiers: KeyModifiers::NONE,
        });

        menu.handle_event(&down);
        menu.handle_event(&drag);
        menu.handle_event(&up);

        assert_eq!(menu.current_index(), 1);
        assert_eq!(recorded.borrow().selected, vec![1]);
    }

    #[test]
    fn test_short_drag_snaps_back() {
        let (mut menu, recorded) = menu_with_titles(&["A", "B"]);
        let pager = menu.layout().pager;

        let down = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: pager.x + 10,
            row: pager.y,
            modifiers: KeyModifiers::NONE,
        });
        let up = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: pager.x + 8, // 2 cells, far under half a page
            row: pager.y,
            modifiers: KeyModifiers::NONE,
        });

        menu.handle_event(&down);
        menu.handle_event(&up);

        assert_eq!(menu.current_index(), 0);
        assert!(recorded.borrow().selected.is_empty());
        assert_eq!(menu.pager_scroll.offset(), 0);
    }

    #[test]
    fn test_reload_is_idempotent() {
        let (mut menu, _) = menu_with_titles(&["A", "B"]);
        menu.render();

        menu.reload();
        menu.render();
        let first = menu.frame().clone();

        menu.reload();
        menu.render();
        assert_eq!(*menu.frame(), first);
    }

    #[test]
    fn test_reload_index_out_of_range_is_noop() {
        let (mut menu, _) = menu_with_titles(&["A"]);
        let id = menu.child_id(0).unwrap();
        menu.render();
        let cached = menu.size_cache.get(id);
        assert!(cached.is_some());

        menu.reload_index(3);
        assert_eq!(menu.size_cache.get(id), cached);
    }

    #[test]
    fn test_reload_index_invalidates_size() {
        let (mut menu, _) = menu_with_titles(&["A", "B"]);
        menu.render();
        let id = menu.child_id(0).unwrap();
        assert!(menu.size_cache.get(id).is_some());

        menu.reload_index(0);
        assert!(menu.size_cache.get(id).is_none());
    }

    #[test]
    fn test_resize_recomputes_bands() {
        let (mut menu, _) = menu_with_titles(&["A"]);

        menu.resize(20, 6);
        assert_eq!(menu.layout().container.width, 20);
        assert_eq!(menu.layout().title_strip.width, 20);
        assert_eq!(menu.layout().page_width(), 20);

        menu.set_chrome(Chrome::new(1, 1));
        assert_eq!(menu.layout().title_strip.y, 1);
        assert_eq!(menu.layout().pager.height, 6 - 1 - 2 - 1);
    }

    #[test]
    fn test_tick_advances_reveal_glide() {
        let (mut menu, _) = menu_with_titles(&["Alpha", "Beta", "Gamma", "Delta", "Epsilon"]);
        menu.resize(12, 8); // narrow strip forces scrolling
        menu.update_current_index(4);

        assert!(menu.title_scroll.is_animating());
        let mut guard = 0;
        while menu.tick() {
            guard += 1;
            assert!(guard < 64, "reveal glide did not converge");
        }
        assert!(!menu.title_scroll.is_animating());
        assert!(menu.title_scroll.offset() > 0);
    }

    #[test]
    fn test_missing_title_gets_placeholder_size() {
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        let delegate = RecordingDelegate {
            titles: vec![None],
            recorded: recorded.clone(),
        };
        let mut menu = SwipeMenuController::new(MenuOptions::default(), Box::new(delegate));
        menu.resize(40, 12);
        menu.add_child(Box::new(FillChild('a')));

        let spacing = menu.options().title_spacing;
        assert_eq!(menu.title_size(0).width, spacing);
        // Placeholders are not cached; the next sizing asks again.
        let queries = recorded.borrow().title_queries;
        menu.title_size(0);
        assert_eq!(recorded.borrow().title_queries, queries + 1);
    }
}
