use serde::{Deserialize, Serialize};

use crate::core::{CoordinateMapper, Domain, InnerArea};
use crate::interaction::{HandleKind, pin_handle_px};
use crate::render::path::{brush_handle_accent_path, brush_handle_path, text_width};

/// Handles closer than this to the chart edge draw their label on the other side.
pub const FLIP_HANDLE_THRESHOLD_PX: f64 = 20.0;

/// Handle colors, opaque to the core and passed through to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandleColors {
    pub west: String,
    pub east: String,
}

impl Default for HandleColors {
    fn default() -> Self {
        Self {
            west: "currentColor".to_owned(),
            east: "currentColor".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandleLabel {
    pub text: String,
    pub width_px: usize,
    /// Drawn on the inner side of the handle instead of the outer side.
    pub flipped: bool,
}

/// Everything needed to draw one handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandleGeometry {
    pub kind: HandleKind,
    /// Unclamped pixel of the bound; may lie off the plotting area.
    pub x_px: f64,
    /// Horizontal translation of the handle group, pinned to the plotting area.
    pub translate_x: f64,
    /// `true` when [`crate::render::WEST_HANDLE_MIRROR`] must be applied.
    pub mirrored: bool,
    pub in_view: bool,
    pub path: String,
    pub accent_path: String,
    pub color: String,
    pub label: Option<HandleLabel>,
}

/// Inputs for [`BrushRenderFrame::build`].
pub struct BrushFrameInput<'a> {
    pub mapper: &'a CoordinateMapper,
    pub extent: Domain,
    pub inner: InnerArea,
    /// Outer chart height, used for the clip rectangle.
    pub outer_height: f64,
    pub current_price: f64,
    pub colors: &'a HandleColors,
    pub label: &'a dyn Fn(f64) -> String,
}

/// Backend-agnostic brush overlay for one draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrushRenderFrame {
    pub west: HandleGeometry,
    pub east: HandleGeometry,
    /// Selection rectangle `(x, width)` clipped to the plotting area.
    pub selection_px: (f64, f64),
    /// Some bound lies left of the plotting area.
    pub show_west_arrow: bool,
    /// Some bound lies right of the plotting area.
    pub show_east_arrow: bool,
    pub current_price_x: Option<f64>,
    pub clip_width: f64,
    pub clip_height: f64,
}

impl BrushRenderFrame {
    #[must_use]
    pub fn build(input: BrushFrameInput<'_>) -> Self {
        let BrushFrameInput {
            mapper,
            extent,
            inner,
            outer_height,
            current_price,
            colors,
            label,
        } = input;

        let (west_px, east_px) = mapper.domain_to_pixels(extent);
        let width = inner.width;
        let in_view = |px: f64| (0.0..=width).contains(&px);

        let handle = |kind: HandleKind, x_px: f64, value: f64| {
            let (color, flipped) = match kind {
                HandleKind::West => (&colors.west, x_px > FLIP_HANDLE_THRESHOLD_PX),
                HandleKind::East => (&colors.east, x_px > width - FLIP_HANDLE_THRESHOLD_PX),
            };
            let text = label(value);
            let label = (!text.is_empty()).then(|| HandleLabel {
                width_px: text_width(Some(&text)),
                text,
                flipped,
            });
            HandleGeometry {
                kind,
                x_px,
                translate_x: pin_handle_px(kind, x_px, (0.0, width)),
                mirrored: kind == HandleKind::West,
                in_view: in_view(x_px),
                path: brush_handle_path(inner.height),
                accent_path: brush_handle_accent_path().to_owned(),
                color: color.clone(),
                label,
            }
        };

        let selection_start = west_px.clamp(0.0, width);
        let selection_end = east_px.clamp(0.0, width);
        let current_price_x = (current_price.is_finite() && current_price > 0.0)
            .then(|| mapper.to_pixel(current_price));

        Self {
            west: handle(HandleKind::West, west_px, extent.lo()),
            east: handle(HandleKind::East, east_px, extent.hi()),
            selection_px: (selection_start, (selection_end - selection_start).max(0.0)),
            show_west_arrow: west_px < 0.0 || east_px < 0.0,
            show_east_arrow: west_px > width || east_px > width,
            current_price_x,
            clip_width: width,
            clip_height: outer_height,
        }
    }
}
