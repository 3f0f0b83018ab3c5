//! Delegate contract - how the widget talks back to its host.
//!
//! One required capability (titles) plus two optional notifications with
//! default no-op bodies. The controller owns the delegate and calls it
//! synchronously from whichever method triggered the event.

use crate::child::ChildId;

/// Host callbacks for the swipe menu.
///
/// # Example
///
/// ```
/// use swipe_menu::delegate::SwipeMenuDelegate;
/// use swipe_menu::child::ChildId;
///
/// struct Host {
///     titles: Vec<String>,
/// }
///
/// impl SwipeMenuDelegate for Host {
///     fn title_for(&mut self, position: usize, _child: ChildId) -> Option<String> {
///         self.titles.get(position).cloned()
///     }
///
///     fn on_selected(&mut self, position: usize, _child: ChildId) {
///         log::info!("selected {position}");
///     }
/// }
/// ```
pub trait SwipeMenuDelegate {
    /// Display text for the title at `position`.
    ///
    /// Returning `None` gives the cell a minimal placeholder size.
    fn title_for(&mut self, position: usize, child: ChildId) -> Option<String>;

    /// The active position changed (tap, swipe, or programmatic selection).
    fn on_selected(&mut self, position: usize, child: ChildId) {
        let _ = (position, child);
    }

    /// The already-active title was selected again. No position change.
    fn on_repeat_selected(&mut self, position: usize, child: ChildId) {
        let _ = (position, child);
    }
}
