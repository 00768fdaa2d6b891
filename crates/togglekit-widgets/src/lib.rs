//! Widgets for the ToggleKit library.
//!
//! The centerpiece is [`ToggleSwitch`], a draggable switch over N discrete
//! named states. [`TrackGeometry`] holds the pure pixel/index math it is
//! built on, usable on its own for custom widgets.

pub mod toggle;
pub mod track;

pub use toggle::{CommitOptions, ToggleChanged, ToggleError, ToggleSwitch};
pub use track::{GeometryMode, TrackGeometry};
