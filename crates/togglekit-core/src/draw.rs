//! Draw commands produced by widget painting.

use crate::color::Color;
use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Stroke parameters for outlined shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Fill and stroke styling for a box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BoxStyle {
    /// Fill color, if filled
    pub fill: Option<Color>,
    /// Stroke, if outlined
    pub stroke: Option<StrokeStyle>,
}

impl BoxStyle {
    /// A filled box with no stroke.
    #[must_use]
    pub const fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    /// A stroked box with no fill.
    #[must_use]
    pub const fn stroke(stroke: StrokeStyle) -> Self {
        Self {
            fill: None,
            stroke: Some(stroke),
        }
    }
}

/// Text styling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 14.0,
            color: Color::BLACK,
        }
    }
}

/// A single draw operation recorded during painting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// A rectangle with fill/stroke styling
    Rect {
        /// Bounds of the rectangle
        bounds: Rect,
        /// Styling
        style: BoxStyle,
    },
    /// A run of text
    Text {
        /// The text content
        text: String,
        /// Baseline-left position
        position: Point,
        /// Styling
        style: TextStyle,
    },
}
