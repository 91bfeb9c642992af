use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{CoordinateMapper, Domain, LinearScale};
use crate::error::{ChartError, ChartResult};

use super::WheelDeltaMode;

const WHEEL_PIXEL_MULTIPLIER: f64 = 0.002;
const WHEEL_LINE_MULTIPLIER: f64 = 0.05;
const WHEEL_PAGE_MULTIPLIER: f64 = 1.0;
const BUTTON_ZOOM_FACTOR: f64 = 2.0;

/// Pan/zoom state of the x axis: `pixel' = pixel * k + x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self { k: 1.0, x: 0.0 };

    #[must_use]
    pub fn new(k: f64, x: f64) -> Self {
        Self { k, x }
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    #[must_use]
    pub fn apply_x(self, pixel: f64) -> f64 {
        pixel * self.k + self.x
    }

    #[must_use]
    pub fn invert_x(self, pixel: f64) -> f64 {
        (pixel - self.x) / self.k
    }

    /// Scale set to `k` with the pixel under `anchor_x` kept in place.
    #[must_use]
    pub fn scale_to(self, k: f64, anchor_x: f64) -> Self {
        let anchored = self.invert_x(anchor_x);
        Self::new(k, anchor_x - anchored * k)
    }

    #[must_use]
    pub fn translate_by(self, delta_x: f64) -> Self {
        Self::new(self.k, self.x + delta_x)
    }

    /// Composes the transform with `base`: the output pixel range stays, the
    /// domain becomes whatever the range ends show after undoing the transform.
    #[must_use]
    pub fn rescale(self, base: LinearScale) -> LinearScale {
        let (range_start, range_end) = base.range();
        let lo = base.invert(self.invert_x(range_start));
        let hi = base.invert(self.invert_x(range_end));
        base.with_domain(Domain::new(lo, hi))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Smallest scale factor (furthest zoomed out).
    pub k_min: f64,
    /// Largest scale factor (furthest zoomed in).
    pub k_max: f64,
    /// Dragging the chart surface outside the brush pans the axis.
    pub drag_pan: bool,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            k_min: 0.3,
            k_max: 10.0,
            drag_pan: true,
        }
    }
}

impl ZoomConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.k_min.is_finite() || !self.k_max.is_finite() || self.k_min <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "zoom bounds must be finite and k_min must be > 0".to_owned(),
            ));
        }
        if self.k_min > 1.0 || self.k_max < 1.0 {
            return Err(ChartError::InvalidConfig(format!(
                "zoom bounds [{}, {}] must contain the identity scale",
                self.k_min, self.k_max
            )));
        }
        Ok(self)
    }

    #[must_use]
    pub fn clamp_k(self, k: f64) -> f64 {
        k.clamp(self.k_min, self.k_max)
    }
}

/// Multiplicative scale change for one wheel event, `None` for no-op input.
#[must_use]
pub fn resolve_wheel_zoom_factor(delta_y: f64, mode: WheelDeltaMode) -> Option<f64> {
    if delta_y == 0.0 || !delta_y.is_finite() {
        return None;
    }
    let multiplier = match mode {
        WheelDeltaMode::Pixel => WHEEL_PIXEL_MULTIPLIER,
        WheelDeltaMode::Line => WHEEL_LINE_MULTIPLIER,
        WheelDeltaMode::Page => WHEEL_PAGE_MULTIPLIER,
    };
    // Saturated so huge deltas still reach the k bounds.
    let factor = 2f64.powf(-delta_y * multiplier).clamp(f64::MIN_POSITIVE, f64::MAX);
    Some(factor)
}

/// Owns the zoom transform and turns surface gestures into updates of it.
///
/// The base scale is never mutated; consumers read the zoomed axis through
/// [`ZoomController::mapper`]. Every mutating call returns the new transform
/// when it actually changed.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomController {
    config: ZoomConfig,
    transform: ZoomTransform,
    pan_pointer_x: Option<f64>,
}

impl ZoomController {
    #[must_use]
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            config,
            transform: ZoomTransform::IDENTITY,
            pan_pointer_x: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> ZoomConfig {
        self.config
    }

    #[must_use]
    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.pan_pointer_x.is_some()
    }

    #[must_use]
    pub fn rescale(&self, base: LinearScale) -> LinearScale {
        self.transform.rescale(base)
    }

    #[must_use]
    pub fn mapper(&self, base: LinearScale) -> CoordinateMapper {
        CoordinateMapper::new(self.rescale(base))
    }

    /// Wheel zoom that keeps the price under `pointer_x` fixed.
    pub fn wheel(
        &mut self,
        pointer_x: f64,
        delta_y: f64,
        mode: WheelDeltaMode,
    ) -> Option<ZoomTransform> {
        let factor = resolve_wheel_zoom_factor(delta_y, mode)?;
        self.scale_by(factor, pointer_x)
    }

    pub fn scale_by(&mut self, factor: f64, anchor_x: f64) -> Option<ZoomTransform> {
        let k = (self.transform.k * factor).clamp(f64::MIN_POSITIVE, f64::MAX);
        self.scale_to(k, anchor_x)
    }

    /// Sets `k` (clamped to the configured bounds) keeping `anchor_x` fixed.
    pub fn scale_to(&mut self, k: f64, anchor_x: f64) -> Option<ZoomTransform> {
        if !k.is_finite() || !anchor_x.is_finite() {
            debug!(k, anchor_x, "ignoring non-finite zoom request");
            return None;
        }
        let clamped = self.config.clamp_k(k);
        if clamped == self.transform.k {
            return None;
        }
        self.transform = self.transform.scale_to(clamped, anchor_x);
        trace!(
            k = self.transform.k,
            x = self.transform.x,
            "zoom scale updated"
        );
        Some(self.transform)
    }

    pub fn zoom_in(&mut self, inner_width: f64) -> Option<ZoomTransform> {
        self.scale_by(BUTTON_ZOOM_FACTOR, inner_width / 2.0)
    }

    pub fn zoom_out(&mut self, inner_width: f64) -> Option<ZoomTransform> {
        self.scale_by(1.0 / BUTTON_ZOOM_FACTOR, inner_width / 2.0)
    }

    pub fn reset(&mut self) -> Option<ZoomTransform> {
        self.pan_pointer_x = None;
        if self.transform.is_identity() {
            return None;
        }
        self.transform = ZoomTransform::IDENTITY;
        debug!("zoom reset to identity");
        Some(self.transform)
    }

    /// Begins a drag pan; returns `false` when panning is disabled.
    pub fn pan_start(&mut self, pointer_x: f64) -> bool {
        if !self.config.drag_pan || !pointer_x.is_finite() {
            return false;
        }
        self.pan_pointer_x = Some(pointer_x);
        true
    }

    pub fn pan_move(&mut self, pointer_x: f64) -> Option<ZoomTransform> {
        let previous = self.pan_pointer_x?;
        if !pointer_x.is_finite() {
            return None;
        }
        self.pan_pointer_x = Some(pointer_x);
        let delta = pointer_x - previous;
        if delta == 0.0 {
            return None;
        }
        self.transform = self.transform.translate_by(delta);
        trace!(delta, x = self.transform.x, "zoom pan updated");
        Some(self.transform)
    }

    pub fn pan_end(&mut self) -> bool {
        self.pan_pointer_x.take().is_some()
    }
}
