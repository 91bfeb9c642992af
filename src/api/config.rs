use serde::{Deserialize, Serialize};

use crate::core::{Dimensions, Margins};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{BrushConfig, ZoomConfig};
use crate::render::HandleColors;

/// Public chart bootstrap configuration.
///
/// Serializable so hosts can ship chart setup as JSON next to their own
/// layout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeChartConfig {
    pub dimensions: Dimensions,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default = "default_interactive")]
    pub interactive: bool,
    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default)]
    pub brush: BrushConfig,
    #[serde(default)]
    pub handle_colors: HandleColors,
}

fn default_interactive() -> bool {
    true
}

impl RangeChartConfig {
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            margins: Margins::default(),
            interactive: default_interactive(),
            zoom: ZoomConfig::default(),
            brush: BrushConfig::default(),
            handle_colors: HandleColors::default(),
        }
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom: ZoomConfig) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_brush(mut self, brush: BrushConfig) -> Self {
        self.brush = brush;
        self
    }

    #[must_use]
    pub fn with_handle_colors(mut self, colors: HandleColors) -> Self {
        self.handle_colors = colors;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_layout(self.dimensions, self.margins)?;
        self.zoom.validate()?;
        self.brush.validate()?;
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub(super) fn validate_layout(dimensions: Dimensions, margins: Margins) -> ChartResult<()> {
    if !dimensions.is_valid() {
        return Err(ChartError::InvalidDimensions {
            width: dimensions.width,
            height: dimensions.height,
        });
    }
    if !margins.is_valid() {
        return Err(ChartError::InvalidConfig(
            "margins must be finite and >= 0".to_owned(),
        ));
    }
    Ok(())
}
