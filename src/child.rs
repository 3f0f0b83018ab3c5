//! Child screens - host-owned content units.
//!
//! The widget embeds one child per content page. Children are opaque to the
//! widget apart from their ability to paint themselves into a buffer region;
//! titles are supplied separately through the delegate.

use crate::renderer::FrameBuffer;
use crate::types::Rect;

/// Stable identity of a child screen.
///
/// Assigned by the controller when the child is added and never reused.
/// Positions shift when earlier children are removed; ids do not, which is
/// why the title size cache is keyed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChildId(pub(crate) u64);

impl ChildId {
    /// Raw id value, useful as a map key on the host side.
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

/// A host-supplied unit of embeddable content.
///
/// Each child is rendered into the full page region of the content pager
/// whenever its page is visible. The region passed to [`render`] is the
/// page's on-screen bounds; drawing outside it is clipped by the buffer.
///
/// [`render`]: ChildScreen::render
pub trait ChildScreen {
    /// Paint this screen's content into `area` of the frame.
    fn render(&mut self, frame: &mut FrameBuffer, area: Rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_id_raw() {
        let id = ChildId(7);
        assert_eq!(id.raw(), 7);
    }

    #[test]
    fn test_child_id_ordering() {
        assert!(ChildId(1) < ChildId(2));
        assert_eq!(ChildId(3), ChildId(3));
    }
}
