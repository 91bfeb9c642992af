use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{CoordinateMapper, Domain};
use crate::error::{ChartError, ChartResult};

/// Which bound a handle drag moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Lower bound.
    West,
    /// Upper bound.
    East,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrushState {
    #[default]
    Idle,
    DraggingHandle(HandleKind),
    /// Whole-range move.
    DraggingBody,
}

impl BrushState {
    #[must_use]
    pub fn is_dragging(self) -> bool {
        self != Self::Idle
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// Width of the hit region centered on each handle.
    pub handle_hit_width_px: f64,
    /// Allows moving the whole selection by pressing between the handles.
    pub body_drag: bool,
    /// Inset from both plotting-area edges that drags may not enter.
    pub extent_margin_px: f64,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            handle_hit_width_px: 30.0,
            body_drag: true,
            extent_margin_px: 0.0,
        }
    }
}

impl BrushConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.handle_hit_width_px.is_finite() || self.handle_hit_width_px <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "brush handle hit width must be finite and > 0".to_owned(),
            ));
        }
        if !self.extent_margin_px.is_finite() || self.extent_margin_px < 0.0 {
            return Err(ChartError::InvalidConfig(
                "brush extent margin must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Converts handle and body drags into an ordered price range.
///
/// All pixel values are in the zoomed space of the mapper passed to each
/// call. Emitted extents always satisfy `lo <= hi` and lie inside the pixel
/// drag bounds: the plotting area minus the configured margin, floored at the
/// pixel of price zero.
#[derive(Debug, Clone, PartialEq)]
pub struct BrushController {
    config: BrushConfig,
    enabled: bool,
    state: BrushState,
    extent: Domain,
    grab_offset_px: f64,
    last_pointer_x: f64,
}

impl BrushController {
    #[must_use]
    pub fn new(config: BrushConfig) -> Self {
        Self {
            config,
            enabled: true,
            state: BrushState::Idle,
            extent: Domain::point(0.0),
            grab_offset_px: 0.0,
            last_pointer_x: 0.0,
        }
    }

    #[must_use]
    pub fn config(&self) -> BrushConfig {
        self.config
    }

    #[must_use]
    pub fn state(&self) -> BrushState {
        self.state
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling aborts any drag in progress without emitting.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.pointer_cancel();
        }
    }

    /// In-progress extent while a drag is active.
    #[must_use]
    pub fn drag_extent(&self) -> Option<Domain> {
        self.state.is_dragging().then_some(self.extent)
    }

    /// Pixel interval drags are confined to.
    ///
    /// The pixel of price zero raises the lower bound but never past the
    /// upper one, so both bounds stay on the plotting area even when the
    /// visible domain lies entirely below zero.
    #[must_use]
    pub fn drag_bounds(&self, mapper: &CoordinateMapper) -> (f64, f64) {
        let (range_start, range_end) = mapper.range();
        let margin = self.config.extent_margin_px;
        let first = range_start + margin;
        let edges = Domain::new(first, (range_end - margin).max(first));
        let zero_px = mapper.to_pixel(0.0);
        let lower = if zero_px.is_finite() {
            edges.clamp_value(zero_px)
        } else {
            edges.lo()
        };
        (lower, edges.hi())
    }

    /// Handle under `pointer_x`, nearest first when hit regions overlap.
    ///
    /// Handles are tested where they are drawn: a bound left of the plotting
    /// area puts the west handle on the left edge, one right of it puts the
    /// east handle on the right edge.
    #[must_use]
    pub fn hit_test(
        &self,
        pointer_x: f64,
        extent: Domain,
        mapper: &CoordinateMapper,
    ) -> Option<HandleKind> {
        let (west_px, east_px) = mapper.domain_to_pixels(extent);
        let pixel_range = mapper.range();
        let west_px = pin_handle_px(HandleKind::West, west_px, pixel_range);
        let east_px = pin_handle_px(HandleKind::East, east_px, pixel_range);
        let half = self.config.handle_hit_width_px / 2.0;

        let mut candidates: SmallVec<[(OrderedFloat<f64>, u8, HandleKind); 2]> = SmallVec::new();
        let west_distance = (pointer_x - west_px).abs();
        if west_distance <= half {
            let inward = u8::from(pointer_x > west_px);
            candidates.push((OrderedFloat(west_distance), inward, HandleKind::West));
        }
        let east_distance = (pointer_x - east_px).abs();
        if east_distance <= half {
            let inward = u8::from(pointer_x < east_px);
            candidates.push((OrderedFloat(east_distance), inward, HandleKind::East));
        }

        candidates
            .into_iter()
            .min_by_key(|(distance, inward, _)| (*distance, *inward))
            .map(|(_, _, kind)| kind)
    }

    /// Starts a drag when the press lands on a handle or the selected body.
    ///
    /// Returns `true` when the brush took ownership of the pointer.
    pub fn pointer_down(
        &mut self,
        pointer_x: f64,
        extent: Domain,
        mapper: &CoordinateMapper,
    ) -> bool {
        if !self.enabled || !pointer_x.is_finite() {
            return false;
        }

        let (west_px, east_px) = mapper.domain_to_pixels(extent);
        if !west_px.is_finite() || !east_px.is_finite() {
            debug!(?extent, "ignoring press on a non-finite brush extent");
            return false;
        }
        let bounds = self.drag_bounds(mapper);
        let west_px = west_px.clamp(bounds.0, bounds.1);
        let east_px = east_px.clamp(bounds.0, bounds.1);

        let state = match self.hit_test(pointer_x, extent, mapper) {
            Some(kind) => {
                self.grab_offset_px = match kind {
                    HandleKind::West => pointer_x - west_px,
                    HandleKind::East => pointer_x - east_px,
                };
                BrushState::DraggingHandle(kind)
            }
            None if self.config.body_drag && pointer_x > west_px && pointer_x < east_px => {
                BrushState::DraggingBody
            }
            None => return false,
        };

        self.state = state;
        self.extent = clamp_extent(extent, mapper, bounds);
        self.last_pointer_x = pointer_x;
        debug!(?state, pointer_x, extent = ?self.extent, "brush drag started");
        true
    }

    /// Applies a pointer move to the active drag and returns the extent to emit.
    pub fn pointer_move(&mut self, pointer_x: f64, mapper: &CoordinateMapper) -> Option<Domain> {
        if !pointer_x.is_finite() {
            return None;
        }
        let next = match self.state {
            BrushState::Idle => return None,
            BrushState::DraggingHandle(kind) => self.move_handle(kind, pointer_x, mapper)?,
            BrushState::DraggingBody => self.move_body(pointer_x, mapper)?,
        };
        self.last_pointer_x = pointer_x;
        self.extent = next;
        trace!(lo = next.lo(), hi = next.hi(), "brush extent moved");
        Some(next)
    }

    /// Ends the drag; returns `true` when a drag was active.
    pub fn pointer_up(&mut self) -> bool {
        self.finish("brush drag ended")
    }

    /// Aborts the drag; nothing further is emitted.
    pub fn pointer_cancel(&mut self) -> bool {
        self.finish("brush drag cancelled")
    }

    fn finish(&mut self, message: &'static str) -> bool {
        let was_dragging = self.state.is_dragging();
        if was_dragging {
            debug!(state = ?self.state, "{message}");
        }
        self.state = BrushState::Idle;
        was_dragging
    }

    fn move_handle(
        &self,
        kind: HandleKind,
        pointer_x: f64,
        mapper: &CoordinateMapper,
    ) -> Option<Domain> {
        let bounds = self.drag_bounds(mapper);
        let pixel = (pointer_x - self.grab_offset_px).clamp(bounds.0, bounds.1);
        let value = mapper.to_domain(pixel);
        if !value.is_finite() {
            return None;
        }
        // A zoom since the last move may have pushed the held bound off the area.
        let held = clamp_extent(self.extent, mapper, bounds);
        // Handles stop at each other instead of swapping roles.
        let next = match kind {
            HandleKind::West => Domain::new(value.min(held.hi()), held.hi()),
            HandleKind::East => Domain::new(held.lo(), value.max(held.lo())),
        };
        Some(next)
    }

    // Pixels are re-derived from the extent on every move so the current
    // mapper is always authoritative.
    fn move_body(&self, pointer_x: f64, mapper: &CoordinateMapper) -> Option<Domain> {
        let (lower, upper) = self.drag_bounds(mapper);
        let (west_px, east_px) = mapper.domain_to_pixels(self.extent);
        let mut delta = pointer_x - self.last_pointer_x;
        if west_px + delta < lower {
            delta = lower - west_px;
        }
        if east_px + delta > upper {
            delta = upper - east_px;
        }

        // A zoom applied mid-drag can leave the span wider than the bounds.
        let shifted = (
            (west_px + delta).clamp(lower, upper),
            (east_px + delta).clamp(lower, upper),
        );
        let lo = mapper.to_domain(shifted.0);
        let hi = mapper.to_domain(shifted.1);
        if !lo.is_finite() || !hi.is_finite() {
            return None;
        }
        Some(Domain::new(lo, hi))
    }
}

/// Pixel a handle is drawn and grabbed at: the west handle never sits left of
/// `pixel_range.0`, the east handle never right of `pixel_range.1`.
#[must_use]
pub fn pin_handle_px(kind: HandleKind, x_px: f64, pixel_range: (f64, f64)) -> f64 {
    match kind {
        HandleKind::West => x_px.max(pixel_range.0),
        HandleKind::East => x_px.min(pixel_range.1),
    }
}

/// Pulls bounds lying outside the pixel `bounds` back in. Bounds already
/// inside keep their exact value.
fn clamp_extent(extent: Domain, mapper: &CoordinateMapper, bounds: (f64, f64)) -> Domain {
    let pixels = Domain::new(bounds.0, bounds.1);
    let (west_px, east_px) = mapper.domain_to_pixels(extent);
    let pull_in = |value: f64, px: f64| {
        if pixels.contains(px) {
            value
        } else {
            mapper.to_domain(pixels.clamp_value(px))
        }
    };
    Domain::new(pull_in(extent.lo(), west_px), pull_in(extent.hi(), east_px))
}
