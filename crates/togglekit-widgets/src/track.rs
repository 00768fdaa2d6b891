//! Track geometry: mapping between pixel offsets and state indices.
//!
//! Two layout conventions exist for multi-state switches. `Continuous`
//! spreads N states over N-1 intervals spanning the whole track, with the
//! handle centered on each stop. `Segmented` divides the track into N equal
//! segments and parks the handle at each segment's leading edge. Both share
//! one travel range: the handle never leaves the track.

use serde::{Deserialize, Serialize};

/// Which layout convention the track uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GeometryMode {
    /// N-1 intervals spanning the full track, handle centered on stops.
    #[default]
    Continuous,
    /// N equal segments, handle at each segment's leading edge.
    Segmented,
}

/// Pure geometry for one track configuration.
///
/// All functions clamp rather than panic, so degenerate sizes (zero track,
/// handle wider than track) stay inert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackGeometry {
    track_width: f32,
    handle_width: f32,
    state_count: usize,
    mode: GeometryMode,
}

impl TrackGeometry {
    /// Create geometry for a track.
    #[must_use]
    pub fn new(track_width: f32, handle_width: f32, state_count: usize, mode: GeometryMode) -> Self {
        Self {
            track_width: track_width.max(0.0),
            handle_width: handle_width.max(0.0),
            state_count,
            mode,
        }
    }

    /// Distance between adjacent stops.
    #[must_use]
    pub fn step_length(&self) -> f32 {
        let intervals = match self.mode {
            GeometryMode::Continuous => self.state_count.saturating_sub(1),
            GeometryMode::Segmented => self.state_count,
        };
        if intervals == 0 {
            self.track_width
        } else {
            self.track_width / intervals as f32
        }
    }

    /// Maximum handle travel distance.
    #[must_use]
    pub fn max_travel(&self) -> f32 {
        (self.track_width - self.handle_width).max(0.0)
    }

    /// Clamp a position to the valid travel range.
    #[must_use]
    pub fn clamp_position(&self, position: f32) -> f32 {
        position.clamp(0.0, self.max_travel())
    }

    /// Handle position for a state index.
    #[must_use]
    pub fn position_for_index(&self, index: usize) -> f32 {
        let index = index.min(self.state_count.saturating_sub(1)) as f32;
        let raw = match self.mode {
            GeometryMode::Continuous => index.mul_add(self.step_length(), -self.handle_width / 2.0),
            GeometryMode::Segmented => index * self.step_length(),
        };
        self.clamp_position(raw)
    }

    /// Nearest state index for a handle position.
    ///
    /// Positions at (or past) either rail force the boundary index, so a
    /// drag past the end always resolves to the first or last state.
    #[must_use]
    pub fn index_for_position(&self, position: f32) -> usize {
        let last = self.state_count.saturating_sub(1);
        if last == 0 || position <= 0.0 {
            return 0;
        }
        if position >= self.max_travel() {
            return last;
        }
        let step = self.step_length();
        if step <= 0.0 {
            return 0;
        }
        ((position / step).round() as usize).min(last)
    }

    /// Which of the N equal label segments contains `x`, for click-to-select.
    #[must_use]
    pub fn label_index_at(&self, x: f32) -> usize {
        let last = self.state_count.saturating_sub(1);
        if last == 0 || self.track_width <= 0.0 || x <= 0.0 {
            return 0;
        }
        let segment = self.track_width / self.state_count as f32;
        ((x / segment) as usize).min(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Reference track: 3 states, 90px track, 30px handle.
    fn three_state() -> TrackGeometry {
        TrackGeometry::new(90.0, 30.0, 3, GeometryMode::Continuous)
    }

    #[test]
    fn test_continuous_step_and_travel() {
        let g = three_state();
        assert_eq!(g.step_length(), 45.0);
        assert_eq!(g.max_travel(), 60.0);
    }

    #[test]
    fn test_segmented_step() {
        let g = TrackGeometry::new(90.0, 30.0, 3, GeometryMode::Segmented);
        assert_eq!(g.step_length(), 30.0);
        assert_eq!(g.max_travel(), 60.0);
    }

    #[test]
    fn test_continuous_positions() {
        let g = three_state();
        assert_eq!(g.position_for_index(0), 0.0); // clamped from -15
        assert_eq!(g.position_for_index(1), 30.0); // 45 - 15
        assert_eq!(g.position_for_index(2), 60.0); // clamped from 75
    }

    #[test]
    fn test_segmented_positions() {
        let g = TrackGeometry::new(90.0, 30.0, 3, GeometryMode::Segmented);
        assert_eq!(g.position_for_index(0), 0.0);
        assert_eq!(g.position_for_index(1), 30.0);
        assert_eq!(g.position_for_index(2), 60.0);
    }

    #[test]
    fn test_index_for_position_rounds_to_nearest() {
        let g = three_state();
        assert_eq!(g.index_for_position(50.0), 1); // round(50/45) = 1
        assert_eq!(g.index_for_position(20.0), 0);
        assert_eq!(g.index_for_position(25.0), 1);
    }

    #[test]
    fn test_index_forced_at_rails() {
        let g = three_state();
        assert_eq!(g.index_for_position(0.0), 0);
        assert_eq!(g.index_for_position(-100.0), 0);
        assert_eq!(g.index_for_position(60.0), 2);
        assert_eq!(g.index_for_position(1000.0), 2);
    }

    #[test]
    fn test_clamp_position() {
        let g = three_state();
        assert_eq!(g.clamp_position(-5.0), 0.0);
        assert_eq!(g.clamp_position(30.0), 30.0);
        assert_eq!(g.clamp_position(75.0), 60.0);
    }

    #[test]
    fn test_two_state_geometry() {
        let g = TrackGeometry::new(90.0, 30.0, 2, GeometryMode::Continuous);
        assert_eq!(g.step_length(), 90.0);
        assert_eq!(g.position_for_index(0), 0.0);
        assert_eq!(g.position_for_index(1), 60.0);
        assert_eq!(g.index_for_position(60.0), 1);
        assert_eq!(g.index_for_position(29.0), 0);
    }

    #[test]
    fn test_label_index_at() {
        let g = three_state();
        assert_eq!(g.label_index_at(10.0), 0);
        assert_eq!(g.label_index_at(45.0), 1);
        assert_eq!(g.label_index_at(85.0), 2);
        assert_eq!(g.label_index_at(-5.0), 0);
        assert_eq!(g.label_index_at(900.0), 2);
    }

    #[test]
    fn test_degenerate_track_does_not_panic() {
        let g = TrackGeometry::new(0.0, 30.0, 3, GeometryMode::Continuous);
        assert_eq!(g.max_travel(), 0.0);
        assert_eq!(g.position_for_index(2), 0.0);
        assert_eq!(g.index_for_position(0.0), 0);
        assert_eq!(g.label_index_at(10.0), 0);
    }

    #[test]
    fn test_handle_wider_than_track() {
        let g = TrackGeometry::new(40.0, 80.0, 2, GeometryMode::Continuous);
        assert_eq!(g.max_travel(), 0.0);
        assert_eq!(g.clamp_position(25.0), 0.0);
    }

    proptest! {
        #[test]
        fn prop_round_trip_continuous(
            track in 40.0f32..400.0,
            n in 2usize..8,
            handle_frac in 0.1f32..0.95,
        ) {
            let step = track / (n - 1) as f32;
            let handle = step * handle_frac;
            let g = TrackGeometry::new(track, handle, n, GeometryMode::Continuous);
            for i in 0..n {
                prop_assert_eq!(g.index_for_position(g.position_for_index(i)), i);
            }
        }

        #[test]
        fn prop_round_trip_segmented(
            track in 40.0f32..400.0,
            n in 2usize..8,
            handle_frac in 0.1f32..0.95,
        ) {
            let step = track / n as f32;
            let handle = step * handle_frac;
            let g = TrackGeometry::new(track, handle, n, GeometryMode::Segmented);
            for i in 0..n {
                prop_assert_eq!(g.index_for_position(g.position_for_index(i)), i);
            }
        }

        #[test]
        fn prop_positions_stay_in_travel_range(
            track in 0.0f32..400.0,
            handle in 0.0f32..100.0,
            n in 1usize..10,
            x in -500.0f32..500.0,
        ) {
            let g = TrackGeometry::new(track, handle, n, GeometryMode::Continuous);
            let p = g.clamp_position(x);
            prop_assert!(p >= 0.0 && p <= g.max_travel());
            let idx = g.index_for_position(x);
            prop_assert!(idx < n);
        }
    }
}
