//! Fractional viewport and the zoom/pan gesture state machine.
//!
//! The viewport is a normalized window into the full data range: four
//! fractions in `[0, 1]` per axis pair, identity `{0, 1, 0, 1}`. Gestures
//! mutate it in two ways:
//!
//! - a primary-button drag selects a span on one axis (locked to whichever
//!   axis moves first) and, on release, narrows that axis pair
//!   proportionally; selections compose with prior zoom instead of
//!   replacing it;
//! - a secondary-button drag pans a zoomed viewport, shifting each axis pair
//!   while preserving its span, clamped into `[0, 1]`.
//!
//! All positions are container-relative pixels; the caller supplies the
//! current plot rectangle with every event.

use plotline_core::geometry::{Pos, Rect};
use plotline_render::Color;

use crate::events::{HandleStatus, PointerButton};

/// Cumulative pointer travel (px) before a selection locks to an axis.
const AXIS_LOCK_THRESHOLD: f32 = 5.0;
/// Minimum selection extent (px) on the locked axis for a zoom commit.
const COMMIT_THRESHOLD: f32 = 8.0;

/// Which chart axis a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// The visible slice of the full data range, one fraction pair per axis.
///
/// Invariant: `0 <= min < max <= 1` on both axes. The Y pair is expressed in
/// data direction (0 = bottom of the full range), so pixel-space callers
/// flip when mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomRange {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ZoomRange {
    pub const IDENTITY: ZoomRange = ZoomRange {
        x_min: 0.0,
        x_max: 1.0,
        y_min: 0.0,
        y_max: 1.0,
    };

    #[inline]
    pub fn span(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x_max - self.x_min,
            Axis::Y => self.y_max - self.y_min,
        }
    }

    /// Whether the viewport differs from identity beyond float noise.
    pub fn is_zoomed(&self) -> bool {
        const EPS: f64 = 1e-9;
        (self.x_min - 0.0).abs() > EPS
            || (self.x_max - 1.0).abs() > EPS
            || (self.y_min - 0.0).abs() > EPS
            || (self.y_max - 1.0).abs() > EPS
    }

    /// Interpolate the fraction pair onto a literal data range.
    pub fn apply_to_range(&self, data_min: f64, data_max: f64, axis: Axis) -> (f64, f64) {
        let extent = data_max - data_min;
        let (lo, hi) = match axis {
            Axis::X => (self.x_min, self.x_max),
            Axis::Y => (self.y_min, self.y_max),
        };
        (data_min + extent * lo, data_min + extent * hi)
    }

    /// Virtual extent for category axes.
    ///
    /// Returns `(start, size)` such that the full unzoomed category run
    /// would occupy `size = extent / span` pixels with the visible window
    /// aligned to the real plot extent. Off-window categories keep their
    /// positions (the renderer clips them via the scissor), which keeps
    /// position math continuous during drags.
    pub fn effective_extent(&self, axis: Axis, start: f32, size: f32) -> (f32, f32) {
        let span = self.span(axis).max(1e-9) as f32;
        let virtual_size = size / span;
        let offset = match axis {
            Axis::X => self.x_min as f32,
            // Pixel Y grows downward while the fraction pair is in data
            // direction, so the window anchors at the top = y_max.
            Axis::Y => 1.0 - self.y_max as f32,
        };
        (start - offset * virtual_size, virtual_size)
    }
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Shift a fraction pair into `[0, 1]` while preserving its span.
fn clamp_pair(mut lo: f64, mut hi: f64) -> (f64, f64) {
    if lo < 0.0 {
        hi -= lo;
        lo = 0.0;
    }
    if hi > 1.0 {
        lo -= hi - 1.0;
        hi = 1.0;
    }
    (lo.max(0.0), hi.min(1.0))
}

/// Style descriptor for the selection overlay rectangle.
#[derive(Debug, Clone, Copy)]
pub struct SelectionStyle {
    pub fill: Color,
    pub border: Color,
    pub border_width: f32,
}

impl Default for SelectionStyle {
    fn default() -> Self {
        Self {
            fill: Color::rgba(0.33, 0.53, 0.9, 0.15),
            border: Color::rgba(0.33, 0.53, 0.9, 0.85),
            border_width: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisLock {
    Undecided,
    Locked(Axis),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragMode {
    Select(AxisLock),
    Pan,
}

/// Transient per-gesture state; exactly one session per chart instance.
#[derive(Debug, Clone, Copy)]
struct DragSession {
    mode: DragMode,
    start: Pos,
    last: Pos,
    zoom_at_start: ZoomRange,
}

/// Pointer-gesture state machine producing the chart's [`ZoomRange`].
pub struct ViewportController {
    zoom: ZoomRange,
    session: Option<DragSession>,
    selection: Option<Rect>,
    style: SelectionStyle,
}

impl ViewportController {
    pub fn new() -> Self {
        Self {
            zoom: ZoomRange::IDENTITY,
            session: None,
            selection: None,
            style: SelectionStyle::default(),
        }
    }

    pub fn zoom(&self) -> ZoomRange {
        self.zoom
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoom.is_zoomed()
    }

    /// The in-progress selection rectangle, if a locked selection is active.
    pub fn selection(&self) -> Option<Rect> {
        self.selection
    }

    pub fn selection_style(&self) -> &SelectionStyle {
        &self.style
    }

    pub fn set_selection_style(&mut self, style: SelectionStyle) {
        self.style = style;
    }

    /// Pointer pressed inside the container.
    pub fn pointer_down(&mut self, plot: Rect, pos: Pos, button: PointerButton) -> HandleStatus {
        if !plot.contains(pos) {
            return HandleStatus::ignored();
        }
        match button {
            PointerButton::Primary => {
                self.session = Some(DragSession {
                    mode: DragMode::Select(AxisLock::Undecided),
                    start: pos,
                    last: pos,
                    zoom_at_start: self.zoom,
                });
                HandleStatus::consumed()
            }
            PointerButton::Secondary if self.zoom.is_zoomed() => {
                self.session = Some(DragSession {
                    mode: DragMode::Pan,
                    start: pos,
                    last: pos,
                    zoom_at_start: self.zoom,
                });
                HandleStatus::consumed()
            }
            _ => HandleStatus::ignored(),
        }
    }

    /// Pointer moved; advances the active session if any.
    pub fn pointer_move(&mut self, plot: Rect, pos: Pos) -> HandleStatus {
        let Some(mut session) = self.session else {
            return HandleStatus::ignored();
        };
        session.last = pos;

        match session.mode {
            DragMode::Select(AxisLock::Undecided) => {
                let dx = (pos.x - session.start.x).abs();
                let dy = (pos.y - session.start.y).abs();
                if dx.max(dy) >= AXIS_LOCK_THRESHOLD {
                    let axis = if dx >= dy { Axis::X } else { Axis::Y };
                    session.mode = DragMode::Select(AxisLock::Locked(axis));
                    self.selection = Some(self.selection_rect(plot, &session, axis));
                }
                // Consumed either way; no overlay is published before lock.
            }
            DragMode::Select(AxisLock::Locked(axis)) => {
                self.selection = Some(self.selection_rect(plot, &session, axis));
            }
            DragMode::Pan => {
                self.zoom = self.panned_zoom(plot, &session);
            }
        }

        self.session = Some(session);
        HandleStatus::consumed()
    }

    /// Pointer released; commits a selection zoom when large enough.
    pub fn pointer_up(&mut self, plot: Rect, _pos: Pos) -> HandleStatus {
        let Some(session) = self.session.take() else {
            return HandleStatus::ignored();
        };

        if let DragMode::Select(AxisLock::Locked(axis)) = session.mode {
            if let Some(selection) = self.selection {
                self.commit_selection(plot, selection, axis);
            }
        }
        // Pan deltas were already applied incrementally during moves.
        self.selection = None;
        HandleStatus::consumed()
    }

    /// Pointer left the container: abandon any session without side effect.
    pub fn pointer_leave(&mut self) -> HandleStatus {
        self.clear_session()
    }

    /// Window-level pointer release fallback: never leaves the machine stuck
    /// when the release happens outside the container.
    pub fn window_pointer_up(&mut self) -> HandleStatus {
        self.clear_session()
    }

    /// Primary double-click resets a zoomed viewport to identity.
    pub fn double_click(&mut self, plot: Rect, pos: Pos) -> HandleStatus {
        if plot.contains(pos) && self.zoom.is_zoomed() {
            tracing::debug!("viewport reset to identity");
            self.zoom = ZoomRange::IDENTITY;
            HandleStatus::consumed()
        } else {
            HandleStatus::ignored()
        }
    }

    /// Context-menu suppression over the plot area; the secondary button is
    /// reserved for panning, independent of drag state.
    pub fn context_menu(&self, plot: Rect, pos: Pos) -> HandleStatus {
        if plot.contains(pos) {
            HandleStatus::consumed()
        } else {
            HandleStatus::ignored()
        }
    }

    fn clear_session(&mut self) -> HandleStatus {
        if self.session.is_none() && self.selection.is_none() {
            return HandleStatus::ignored();
        }
        self.session = None;
        self.selection = None;
        HandleStatus::handled()
    }

    /// Selection rectangle spanning the full plot on the unlocked axis.
    fn selection_rect(&self, plot: Rect, session: &DragSession, axis: Axis) -> Rect {
        match axis {
            Axis::X => {
                let span = plot.span_clamped(
                    Pos::new(session.start.x, plot.y),
                    Pos::new(session.last.x, plot.bottom()),
                );
                Rect::new(span.x, plot.y, span.width, plot.height)
            }
            Axis::Y => {
                let span = plot.span_clamped(
                    Pos::new(plot.x, session.start.y),
                    Pos::new(plot.right(), session.last.y),
                );
                Rect::new(plot.x, span.y, plot.width, span.height)
            }
        }
    }

    fn panned_zoom(&self, plot: Rect, session: &DragSession) -> ZoomRange {
        let start = session.zoom_at_start;
        let dx = session.last.x - session.start.x;
        let dy = session.last.y - session.start.y;

        // Dragging right reveals lower x fractions; dragging down reveals
        // higher y fractions (pixel Y is inverted relative to data Y).
        let dx_frac = -(dx / plot.width.max(1.0)) as f64 * start.span(Axis::X);
        let dy_frac = (dy / plot.height.max(1.0)) as f64 * start.span(Axis::Y);

        let (x_min, x_max) = clamp_pair(start.x_min + dx_frac, start.x_max + dx_frac);
        let (y_min, y_max) = clamp_pair(start.y_min + dy_frac, start.y_max + dy_frac);
        ZoomRange {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    fn commit_selection(&mut self, plot: Rect, selection: Rect, axis: Axis) {
        match axis {
            Axis::X => {
                if selection.width < COMMIT_THRESHOLD || plot.width <= 0.0 {
                    return;
                }
                let lo = ((selection.x - plot.x) / plot.width) as f64;
                let hi = ((selection.right() - plot.x) / plot.width) as f64;
                let span = self.zoom.span(Axis::X);
                let base = self.zoom.x_min;
                self.zoom.x_min = base + span * lo;
                self.zoom.x_max = base + span * hi;
            }
            Axis::Y => {
                if selection.height < COMMIT_THRESHOLD || plot.height <= 0.0 {
                    return;
                }
                // Lower pixels are lower data fractions.
                let lo = (1.0 - (selection.bottom() - plot.y) / plot.height) as f64;
                let hi = (1.0 - (selection.y - plot.y) / plot.height) as f64;
                let span = self.zoom.span(Axis::Y);
                let base = self.zoom.y_min;
                self.zoom.y_min = base + span * lo;
                self.zoom.y_max = base + span * hi;
            }
        }
        tracing::debug!(zoom = ?self.zoom, "selection committed");
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new()
    }
}
