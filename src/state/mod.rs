//! Widget state modules.

pub mod scroll;
pub mod selection;

pub use scroll::ScrollState;
pub use selection::SelectionState;
