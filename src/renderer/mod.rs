//! Cell-buffer rendering and terminal presentation.
//!
//! The widget paints into a [`FrameBuffer`]; a [`TerminalPresenter`] diffs
//! consecutive frames and emits only the changed cells, batched into a
//! single flush.

pub mod buffer;
pub mod output;

pub use buffer::FrameBuffer;
pub use output::{OutputBuffer, TerminalPresenter};
