//! Easing functions and deterministic value transitions.
//!
//! `EasedValue` stands in for a CSS transition: the owner advances it with
//! explicit `update(dt)` calls and observes completion, so tests drive time
//! without a real clock.

use serde::{Deserialize, Serialize};

/// Standard easing functions for transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// Linear interpolation (no easing)
    Linear,
    /// Ease in (slow start)
    EaseIn,
    /// Ease out (slow end)
    EaseOut,
    /// Ease in and out (slow start and end)
    #[default]
    EaseInOut,
    /// Cubic ease out
    CubicOut,
}

impl Easing {
    /// Apply easing to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => (1.0 - t).mul_add(-(1.0 - t), 1.0),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0f32).mul_add(t, 2.0).powi(2) / 2.0
                }
            }
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// A one-shot eased transition between two values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EasedValue {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl EasedValue {
    /// Create a transition from `from` to `to` over `duration` seconds.
    ///
    /// A non-positive duration yields an already-complete transition.
    #[must_use]
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        let duration = duration.max(0.0);
        Self {
            from,
            to,
            duration,
            elapsed: if duration == 0.0 { f32::EPSILON } else { 0.0 },
            easing: Easing::default(),
        }
    }

    /// Set the easing function.
    #[must_use]
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// The target value.
    #[must_use]
    pub const fn target(&self) -> f32 {
        self.to
    }

    /// Advance the transition by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    /// Normalized progress in `[0.0, 1.0]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Current eased value.
    #[must_use]
    pub fn value(&self) -> f32 {
        let t = self.easing.apply(self.progress());
        (self.to - self.from).mul_add(t, self.from)
    }

    /// Whether the transition has reached its target.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }
}
