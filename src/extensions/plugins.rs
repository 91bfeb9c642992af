use serde::{Deserialize, Serialize};

use crate::core::{Dimensions, Domain, InnerArea};
use crate::interaction::{BrushState, ZoomTransform};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub dimensions: Dimensions,
    pub inner: InnerArea,
    pub current_price: f64,
    pub base_domain: Domain,
    pub visible_domain: Domain,
    pub zoom: ZoomTransform,
    pub brush_domain: Option<Domain>,
    pub brush_state: BrushState,
    pub interactive: bool,
}

/// Event stream exposed to plugins, in the order the chart processed it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    DataUpdated { points_len: usize },
    CurrentPriceChanged { price: f64 },
    ZoomChanged {
        transform: ZoomTransform,
        visible_domain: Domain,
    },
    PanStarted,
    PanEnded,
    BrushDragStarted { state: BrushState },
    BrushDomainChanged { domain: Domain },
    BrushDragEnded,
    BrushDragCancelled,
}

/// Observer hook for chart events.
///
/// Plugins see every event with a context snapshot but cannot mutate the
/// chart from inside the hook.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: PluginEvent, context: PluginContext);
}
