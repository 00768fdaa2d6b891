//! Core types and traits for the ToggleKit widget library.
//!
//! This crate provides the foundations the widgets build on:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`]
//! - Layout constraints: [`Constraints`]
//! - Input events: [`Event`]
//! - Painting: [`Canvas`], [`RecordingCanvas`], [`DrawCommand`]
//! - Transitions: [`Easing`], [`EasedValue`]
//! - Event emission: [`Emitter`]

pub mod animation;
pub mod canvas;
pub mod color;
pub mod constraints;
pub mod draw;
pub mod emitter;
pub mod event;
pub mod geometry;
pub mod widget;

pub use animation::{EasedValue, Easing};
pub use canvas::{Canvas, RecordingCanvas};
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use draw::{BoxStyle, DrawCommand, StrokeStyle, TextStyle};
pub use emitter::{Emitter, HandlerId};
pub use event::{Event, MouseButton, TouchId};
pub use geometry::{Point, Rect, Size};
pub use widget::{AccessibleRole, LayoutResult, TypeId, Widget, WidgetId};
