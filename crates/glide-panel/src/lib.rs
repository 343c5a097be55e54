//! Draggable sliding panel.
//!
//! A [`SlidingPanel`] slides between the bottom and top of its draggable
//! range. It follows a finger while dragged, continues under momentum when
//! released (settling on snapping points if configured), animates on
//! `show`/`hide`, and moves out of the way of the on-screen keyboard.

pub mod config;
pub mod keyboard;
pub mod panel;

pub use config::{PanelConfig, PanelError};
pub use keyboard::{keyboard_overlap, ElementLayout, ElementMeasure};
pub use panel::{ShowRequest, SlidingPanel};

pub use glide_core::DraggableRange;
pub use glide_foundation::{GestureSample, PointerInput};
