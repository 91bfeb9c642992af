use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Unit of a wheel delta as reported by the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WheelDeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

/// Pointer or wheel input on the chart surface.
///
/// `x` is measured in pixels from the left edge of the plotting area, i.e.
/// after the left margin has been subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    PointerDown {
        x: f64,
    },
    PointerMove {
        x: f64,
    },
    PointerUp,
    /// Pointer cancel or loss of pointer capture.
    PointerCancel,
    Wheel {
        x: f64,
        delta_y: f64,
        #[serde(default)]
        mode: WheelDeltaMode,
    },
}

/// Host-owned surface that delivers gestures in temporal order.
///
/// The chart borrows a source only while draining it and never retains it.
pub trait GestureSource {
    fn next_gesture(&mut self) -> Option<GestureEvent>;
}

impl GestureSource for VecDeque<GestureEvent> {
    fn next_gesture(&mut self) -> Option<GestureEvent> {
        self.pop_front()
    }
}
