//! Multi-state toggle switch widget.
//!
//! A handle slides along a track between N named states. Dragging moves the
//! handle continuously and highlights a candidate state; releasing snaps to
//! the nearest stop. Clicking a state label commits directly. The committed
//! state changes only on release, label click, or a programmatic
//! [`ToggleSwitch::set_state`] — never mid-drag.

use crate::track::{GeometryMode, TrackGeometry};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use togglekit_core::{
    widget::{AccessibleRole, LayoutResult},
    Canvas, Color, Constraints, EasedValue, Easing, Emitter, Event, HandlerId, MouseButton, Point,
    Rect, Size, TextStyle, TouchId, TypeId, Widget,
};

/// Message emitted when the committed state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleChanged {
    /// The new committed index
    pub index: usize,
    /// The new committed state name
    pub state: String,
}

/// Errors from toggle switch construction and state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleError {
    /// A switch needs at least two states.
    TooFewStates(usize),
    /// No state with the given name exists.
    UnknownState(String),
    /// No state with the given index exists.
    IndexOutOfRange(usize),
}

impl fmt::Display for ToggleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewStates(n) => {
                write!(f, "toggle switch needs at least 2 states, got {n}")
            }
            Self::UnknownState(name) => write!(f, "unknown state: {name:?}"),
            Self::IndexOutOfRange(i) => write!(f, "state index {i} out of range"),
        }
    }
}

impl std::error::Error for ToggleError {}

/// How a commit moves and announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitOptions {
    /// Animate the handle toward the target position.
    pub animate: bool,
    /// Move the handle at all (false for pure bookkeeping commits).
    pub move_handle: bool,
    /// Suppress the change notification.
    pub silent: bool,
}

impl Default for CommitOptions {
    fn default() -> Self {
        Self {
            animate: true,
            move_handle: true,
            silent: false,
        }
    }
}

/// Ephemeral drag state, alive between gesture start and end/cancel.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    /// Touch identity, `None` for mouse drags.
    touch_id: Option<TouchId>,
    /// Pointer position at gesture start.
    start_pointer: Point,
    /// Handle offset at gesture start.
    start_offset: f32,
    /// Current clamped handle position.
    distance: f32,
    /// Largest horizontal pointer travel seen, for tap detection.
    moved: f32,
}

/// Draggable toggle switch with N discrete named states.
#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleSwitch {
    /// Ordered state names, fixed at construction
    states: Vec<String>,
    /// Committed state index
    committed: usize,
    /// Per-state click veto flags
    disabled_states: Vec<bool>,
    /// Whole-widget disable
    disabled: bool,
    /// Track layout convention
    mode: GeometryMode,
    /// Transition duration in seconds
    transition_speed: f32,
    /// Transition easing
    easing: Easing,
    /// Handle width in pixels
    handle_width: f32,
    /// Maximum pointer travel still counted as a tap
    tap_slop: f32,
    /// Whether to paint the progress fill behind the handle
    show_progress: bool,
    /// Track color
    track_color: Color,
    /// Progress fill color
    progress_color: Color,
    /// Handle color
    handle_color: Color,
    /// Label text color
    label_color: Color,
    /// Label text color for active states
    active_label_color: Color,
    /// Label font size
    label_size: f32,
    /// Accessible name
    accessible_name_value: Option<String>,
    /// Test ID
    test_id_value: Option<String>,
    /// Cached bounds
    #[serde(skip)]
    bounds: Rect,
    /// Current handle offset in `[0, max_travel]`
    #[serde(skip)]
    position: f32,
    /// Candidate index shown during a drag (highlighting only)
    #[serde(skip)]
    candidate: Option<usize>,
    /// Active drag session
    #[serde(skip)]
    session: Option<DragSession>,
    /// Running handle transition
    #[serde(skip)]
    transition: Option<EasedValue>,
    /// Change notification armed to fire when the move settles
    #[serde(skip)]
    pending: Option<ToggleChanged>,
    /// Toggle event subscribers
    #[serde(skip)]
    emitter: Emitter<ToggleChanged>,
    /// Set by `destroy`; every operation is a no-op afterwards
    #[serde(skip)]
    destroyed: bool,
}

impl ToggleSwitch {
    /// Create a switch over the given ordered states.
    ///
    /// Fails fast with [`ToggleError::TooFewStates`] when fewer than two
    /// states are declared.
    pub fn new<I, S>(states: I) -> Result<Self, ToggleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let states: Vec<String> = states.into_iter().map(Into::into).collect();
        if states.len() < 2 {
            return Err(ToggleError::TooFewStates(states.len()));
        }
        let count = states.len();
        Ok(Self {
            states,
            committed: 0,
            disabled_states: vec![false; count],
            disabled: false,
            mode: GeometryMode::default(),
            transition_speed: 0.3,
            easing: Easing::default(),
            handle_width: 24.0,
            tap_slop: 4.0,
            show_progress: true,
            track_color: Color::new(0.7, 0.7, 0.7, 1.0),
            progress_color: Color::new(0.2, 0.47, 0.96, 1.0),
            handle_color: Color::WHITE,
            label_color: Color::new(0.25, 0.25, 0.25, 1.0),
            active_label_color: Color::WHITE,
            label_size: 12.0,
            accessible_name_value: None,
            test_id_value: None,
            bounds: Rect::default(),
            position: 0.0,
            candidate: None,
            session: None,
            transition: None,
            pending: None,
            emitter: Emitter::new(),
            destroyed: false,
        })
    }

    /// Set the initial state by name; unknown names fall back to the first
    /// declared state.
    #[must_use]
    pub fn initial_state(mut self, name: &str) -> Self {
        self.committed = self.index_of(name).unwrap_or(0);
        self
    }

    /// Set the track layout convention.
    #[must_use]
    pub const fn mode(mut self, mode: GeometryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the transition duration in seconds (0 disables animation).
    #[must_use]
    pub fn transition_speed(mut self, seconds: f32) -> Self {
        self.transition_speed = seconds.max(0.0);
        self
    }

    /// Set the transition easing.
    #[must_use]
    pub const fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the handle width.
    #[must_use]
    pub fn handle_width(mut self, width: f32) -> Self {
        self.handle_width = width.max(0.0);
        self
    }

    /// Set the tap threshold in pixels.
    #[must_use]
    pub fn tap_slop(mut self, slop: f32) -> Self {
        self.tap_slop = slop.max(0.0);
        self
    }

    /// Show or hide the progress fill.
    #[must_use]
    pub const fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Disable the whole widget.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Mark a state's label as disabled (clicks on it are vetoed).
    #[must_use]
    pub fn state_disabled(mut self, index: usize, disabled: bool) -> Self {
        if let Some(flag) = self.disabled_states.get_mut(index) {
            *flag = disabled;
        }
        self
    }

    /// Set the track color.
    #[must_use]
    pub const fn track_color(mut self, color: Color) -> Self {
        self.track_color = color;
        self
    }

    /// Set the progress fill color.
    #[must_use]
    pub const fn progress_color(mut self, color: Color) -> Self {
        self.progress_color = color;
        self
    }

    /// Set the handle color.
    #[must_use]
    pub const fn handle_color(mut self, color: Color) -> Self {
        self.handle_color = color;
        self
    }

    /// Set the accessible name.
    #[must_use]
    pub fn accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    /// Set the test ID.
    #[must_use]
    pub fn test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    // ---- accessors ----

    /// The ordered state names.
    #[must_use]
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Number of states.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// The committed state index.
    #[must_use]
    pub const fn committed_index(&self) -> usize {
        self.committed
    }

    /// The committed state name.
    #[must_use]
    pub fn current_state(&self) -> &str {
        &self.states[self.committed]
    }

    /// The candidate index highlighted during a drag, if any.
    #[must_use]
    pub const fn candidate_index(&self) -> Option<usize> {
        self.candidate
    }

    /// Current handle offset along the track.
    #[must_use]
    pub const fn handle_position(&self) -> f32 {
        self.position
    }

    /// Whether a drag session is active.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Whether a handle transition is running.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Whether the widget has been torn down.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Whether a state's label is disabled.
    #[must_use]
    pub fn is_state_disabled(&self, index: usize) -> bool {
        self.disabled_states.get(index).copied().unwrap_or(false)
    }

    /// Indices counted as active: every state up to and including the
    /// candidate while dragging, otherwise up to the committed state.
    #[must_use]
    pub fn active_states(&self) -> Vec<usize> {
        let upto = self.candidate.unwrap_or(self.committed);
        (0..=upto).collect()
    }

    /// Register a toggle handler; fires once per committed change, after
    /// any animation completes.
    pub fn on_toggle<F>(&mut self, handler: F) -> HandlerId
    where
        F: FnMut(&ToggleChanged) + Send + Sync + 'static,
    {
        self.emitter.on(handler)
    }

    /// Remove a toggle handler.
    pub fn off_toggle(&mut self, id: HandlerId) -> bool {
        self.emitter.off(id)
    }

    // ---- state changes ----

    /// Commit a state by name. Returns whether the committed index changed;
    /// the notification fires once the move settles.
    pub fn set_state(&mut self, name: &str, animate: bool) -> Result<bool, ToggleError> {
        self.set_state_opts(
            name,
            CommitOptions {
                animate,
                ..CommitOptions::default()
            },
        )
    }

    /// Commit a state by name with full commit options.
    pub fn set_state_opts(
        &mut self,
        name: &str,
        opts: CommitOptions,
    ) -> Result<bool, ToggleError> {
        let index = self
            .index_of(name)
            .ok_or_else(|| ToggleError::UnknownState(name.to_owned()))?;
        self.set_state_index_opts(index, opts)
    }

    /// Commit a state by index.
    pub fn set_state_index(&mut self, index: usize, animate: bool) -> Result<bool, ToggleError> {
        self.set_state_index_opts(
            index,
            CommitOptions {
                animate,
                ..CommitOptions::default()
            },
        )
    }

    /// Commit a state by index with full commit options.
    pub fn set_state_index_opts(
        &mut self,
        index: usize,
        opts: CommitOptions,
    ) -> Result<bool, ToggleError> {
        if index >= self.states.len() {
            return Err(ToggleError::IndexOutOfRange(index));
        }
        if self.destroyed {
            return Ok(false);
        }
        let changed = index != self.committed;
        self.commit(index, opts);
        Ok(changed)
    }

    /// Tear down the widget: drops all handlers, the drag session, and any
    /// running transition. The widget ignores everything afterwards.
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.session = None;
        self.transition = None;
        self.pending = None;
        self.candidate = None;
        self.emitter.clear();
    }

    /// Advance the running transition by `dt` seconds.
    ///
    /// Returns the change notification when a commit's transition completes.
    /// The same notification is also delivered to registered handlers.
    pub fn update(&mut self, dt: f32) -> Option<ToggleChanged> {
        if self.destroyed {
            return None;
        }
        let transition = self.transition.as_mut()?;
        transition.update(dt);
        self.position = transition.value();
        if transition.is_complete() {
            self.position = transition.target();
            self.transition = None;
            return self.flush_pending();
        }
        None
    }

    // ---- internals ----

    fn index_of(&self, name: &str) -> Option<usize> {
        self.states.iter().position(|s| s == name)
    }

    fn geometry(&self) -> TrackGeometry {
        TrackGeometry::new(
            self.bounds.width,
            self.handle_width,
            self.states.len(),
            self.mode,
        )
    }

    fn handle_rect(&self) -> Rect {
        Rect::new(
            self.bounds.x + self.position,
            self.bounds.y,
            self.handle_width,
            self.bounds.height,
        )
    }

    /// Deliver and clear the armed change notification.
    fn flush_pending(&mut self) -> Option<ToggleChanged> {
        let change = self.pending.take()?;
        self.emitter.emit(&change);
        Some(change)
    }

    /// Commit to `index`. The committed index and `current_state` update
    /// immediately; the notification is armed and fires when the handle
    /// settles (at once when not animating). A later commit supersedes any
    /// still-pending one: only the latest notification survives.
    fn commit(&mut self, index: usize, opts: CommitOptions) -> Option<ToggleChanged> {
        let index = index.min(self.states.len() - 1);
        if index != self.committed {
            self.committed = index;
            if !opts.silent {
                self.pending = Some(ToggleChanged {
                    index,
                    state: self.states[index].clone(),
                });
            }
        }
        self.candidate = None;

        if !opts.move_handle {
            // Pure bookkeeping: a running move (and its armed notification)
            // keeps going; otherwise the change is already settled.
            if self.transition.is_some() {
                return None;
            }
            return self.flush_pending();
        }

        let target = self.geometry().position_for_index(index);
        if opts.animate && self.transition_speed > 0.0 && (target - self.position).abs() > f32::EPSILON
        {
            self.transition =
                Some(EasedValue::new(self.position, target, self.transition_speed).with_easing(self.easing));
            return None;
        }
        self.position = target;
        self.transition = None;
        self.flush_pending()
    }

    fn pointer_down(&mut self, position: Point, touch: Option<TouchId>) -> Option<ToggleChanged> {
        if self.session.is_some() {
            // A second simultaneous touch aborts the drag interpretation.
            if touch.is_some() && touch != self.session.and_then(|s| s.touch_id) {
                self.abort_session();
            }
            return None;
        }

        if self.handle_rect().contains_point(&position) {
            // Any in-flight transition stops dead at the grab point; its
            // armed notification flushes now so it is not lost.
            let flushed = if self.transition.take().is_some() {
                self.flush_pending()
            } else {
                None
            };
            self.session = Some(DragSession {
                touch_id: touch,
                start_pointer: position,
                start_offset: self.position,
                distance: self.position,
                moved: 0.0,
            });
            return flushed;
        }

        if self.bounds.contains_point(&position) {
            // Click-to-select on a state label, bypassing the drag path.
            let index = self.geometry().label_index_at(position.x - self.bounds.x);
            if self.is_state_disabled(index) {
                return None;
            }
            return self.commit(index, CommitOptions::default());
        }

        None
    }

    fn pointer_move(&mut self, position: Point, touch: Option<TouchId>) -> Option<ToggleChanged> {
        let Some(mut session) = self.session else {
            return None;
        };
        if session.touch_id != touch {
            return None;
        }

        let dx = position.x - session.start_pointer.x;
        let dy = position.y - session.start_pointer.y;
        session.moved = session.moved.max(dx.abs());
        session.distance = self.geometry().clamp_position(session.start_offset + dx);
        self.session = Some(session);

        // Predominantly vertical movement is a scroll, not a drag: the
        // distance keeps tracking but the visuals stay put.
        if dy.abs() > dx.abs() {
            return None;
        }

        self.position = session.distance;
        self.candidate = Some(self.geometry().index_for_position(session.distance));
        None
    }

    fn pointer_up(&mut self, position: Point, touch: Option<TouchId>) -> Option<ToggleChanged> {
        let Some(session) = self.session else {
            return None;
        };
        if session.touch_id != touch {
            return None;
        }
        self.session = None;

        // The release point counts as the final move, so a down/up pair
        // with no moves in between still resolves its displacement.
        let dx = position.x - session.start_pointer.x;
        let moved = session.moved.max(dx.abs());
        let distance = self.geometry().clamp_position(session.start_offset + dx);

        // A tap on a two-state switch toggles directly.
        if self.states.len() == 2 && moved < self.tap_slop {
            let other = 1 - self.committed;
            return self.commit(other, CommitOptions::default());
        }

        let index = self.geometry().index_for_position(distance);
        self.commit(index, CommitOptions::default())
    }

    fn gesture_cancel(&mut self, touch: Option<TouchId>) {
        let Some(session) = self.session else {
            return;
        };
        if session.touch_id != touch {
            return;
        }
        self.abort_session();
    }

    /// Drop the session without committing; the handle reverts to the
    /// committed stop.
    fn abort_session(&mut self) {
        self.session = None;
        self.candidate = None;
        self.position = self.geometry().position_for_index(self.committed);
    }
}

impl Widget for ToggleSwitch {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let preferred = Size::new(self.states.len() as f32 * 48.0, 28.0);
        constraints.constrain(preferred)
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        let geometry = self.geometry();
        if self.session.is_none() && self.transition.is_none() {
            self.position = geometry.position_for_index(self.committed);
        } else {
            self.position = geometry.clamp_position(self.position);
        }
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.bounds, self.track_color);

        if self.show_progress {
            let fill = (self.position + self.handle_width / 2.0).min(self.bounds.width);
            canvas.fill_rect(
                Rect::new(self.bounds.x, self.bounds.y, fill.max(0.0), self.bounds.height),
                self.progress_color,
            );
        }

        canvas.fill_rect(self.handle_rect(), self.handle_color);

        let active = self.candidate.unwrap_or(self.committed);
        let segment = self.bounds.width / self.states.len() as f32;
        let baseline = self.bounds.y + (self.bounds.height + self.label_size) / 2.0;
        for (i, state) in self.states.iter().enumerate() {
            let style = TextStyle {
                size: self.label_size,
                color: if i <= active {
                    self.active_label_color
                } else {
                    self.label_color
                },
            };
            let x = (i as f32).mul_add(segment, self.bounds.x) + 4.0;
            canvas.draw_text(state, Point::new(x, baseline), &style);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if self.destroyed || self.disabled {
            return None;
        }

        let change = match event {
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => self.pointer_down(*position, None),
            Event::TouchStart { id, position } => self.pointer_down(*position, Some(*id)),
            Event::MouseMove { position } => self.pointer_move(*position, None),
            Event::TouchMove { id, position } => self.pointer_move(*position, Some(*id)),
            Event::MouseUp {
                position,
                button: MouseButton::Left,
            } => self.pointer_up(*position, None),
            Event::TouchEnd { id, position } => self.pointer_up(*position, Some(*id)),
            Event::TouchCancel { id } => {
                self.gesture_cancel(Some(*id));
                None
            }
            _ => None,
        };

        change.map(|c| Box::new(c) as Box<dyn Any + Send>)
    }

    fn is_interactive(&self) -> bool {
        !self.disabled && !self.destroyed
    }

    fn is_focusable(&self) -> bool {
        !self.disabled && !self.destroyed
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value.as_deref()
    }

    fn accessible_role(&self) -> AccessibleRole {
        if self.states.len() == 2 {
            AccessibleRole::Checkbox
        } else {
            AccessibleRole::Slider
        }
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }
}
