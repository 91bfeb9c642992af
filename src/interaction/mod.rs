//! Pointer and wheel handling for the zoomable price axis and the range brush.
//!
//! Zoom is always resolved before the brush reads the axis: the brush only
//! ever sees a [`crate::core::CoordinateMapper`] built from the current
//! transform.

pub mod brush;
pub mod gesture;
pub mod zoom;

pub use brush::{BrushConfig, BrushController, BrushState, HandleKind, pin_handle_px};
pub use gesture::{GestureEvent, GestureSource, WheelDeltaMode};
pub use zoom::{ZoomConfig, ZoomController, ZoomTransform, resolve_wheel_zoom_factor};
