//! # swipe-menu
//!
//! Swipe menu widget for terminal UIs.
//!
//! A horizontally scrollable *title strip* paired with a paging *content
//! area*: selecting a title scrolls the matching content page into view,
//! and swiping the content drives the title selection. The host supplies
//! child screens and titles; the widget owns selection, scrolling, sizing,
//! and rendering.
//!
//! ## Architecture
//!
//! One shared selection-state object drives both strips. Every cross-strip
//! mutation routes through a single synchronization procedure:
//! ```text
//! host call / input event → SwipeMenuController → dirty cells
//!                     render → FrameBuffer → TerminalPresenter (diff) → terminal
//! ```
//!
//! ## Modules
//!
//! - [`controller`] - The widget: public contract, events, rendering
//! - [`delegate`] - Host callback contract (titles, selection events)
//! - [`child`] - Child screen trait and stable identity
//! - [`options`] - Styling and geometry configuration
//! - [`layout`] - Band geometry and text measurement
//! - [`state`] - Selection and clamped scroll state
//! - [`cache`] - Title size memoization (keyed by child identity)
//! - [`renderer`] - Frame buffer and differential terminal output
//! - [`types`] - Colors, attributes, cells, rects

pub mod cache;
pub mod child;
pub mod controller;
pub mod delegate;
pub mod error;
pub mod layout;
pub mod options;
pub mod renderer;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use cache::{CellSize, TitleSizeCache};
pub use child::{ChildId, ChildScreen};
pub use controller::{SwipeMenuController, WHEEL_SCROLL};
pub use delegate::SwipeMenuDelegate;
pub use error::{MenuError, Result};
pub use layout::{Chrome, MenuLayout, string_width};
pub use options::MenuOptions;
pub use renderer::{FrameBuffer, OutputBuffer, TerminalPresenter};
pub use state::{ScrollState, SelectionState};
