use std::cell::RefCell;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{
    ChartScales, CoordinateMapper, DataPoint, Dimensions, Domain, InnerArea, Margins, ScaleCache,
};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{ChartPlugin, PluginContext, PluginEvent};
use crate::interaction::{
    BrushController, BrushState, GestureEvent, GestureSource, ZoomController, ZoomTransform,
};
use crate::render::{BrushFrameInput, BrushRenderFrame};

use super::config::validate_layout;
use super::{RangeChartConfig, RangeChartSnapshot, brush_label_value};

/// Owner of the pointer between press and release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ActiveGesture {
    #[default]
    None,
    Brush,
    Pan,
}

/// What a single gesture did to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureOutcome {
    Ignored,
    ZoomChanged(ZoomTransform),
    PanStarted,
    BrushDragStarted(BrushState),
    BrushMoved(Domain),
    GestureEnded,
    GestureCancelled,
}

type BrushDomainHandler = Box<dyn FnMut(Domain)>;

/// Interactive price-range chart core.
///
/// Each event runs the stages in a fixed order: base scales are resolved
/// (memoized), zoom is applied to produce this pass's [`CoordinateMapper`],
/// and only then does the brush hit-test or drag against that mapper.
pub struct RangeChart {
    config: RangeChartConfig,
    series: Vec<DataPoint>,
    series_revision: u64,
    current_price: f64,
    scale_cache: RefCell<ScaleCache>,
    zoom: ZoomController,
    brush: BrushController,
    brush_domain: Option<Domain>,
    active_gesture: ActiveGesture,
    plugins: IndexMap<String, Box<dyn ChartPlugin>>,
    brush_domain_handler: Option<BrushDomainHandler>,
}

impl fmt::Debug for RangeChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeChart")
            .field("config", &self.config)
            .field("points", &self.series.len())
            .field("current_price", &self.current_price)
            .field("zoom", &self.zoom.transform())
            .field("brush_domain", &self.brush_domain)
            .field("brush_state", &self.brush.state())
            .field("plugins", &self.plugins.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl RangeChart {
    pub fn new(config: RangeChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let mut brush = BrushController::new(config.brush);
        brush.set_enabled(config.interactive);

        Ok(Self {
            zoom: ZoomController::new(config.zoom),
            brush,
            config,
            series: Vec::new(),
            series_revision: 0,
            current_price: 0.0,
            scale_cache: RefCell::new(ScaleCache::default()),
            brush_domain: None,
            active_gesture: ActiveGesture::None,
            plugins: IndexMap::new(),
            brush_domain_handler: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &RangeChartConfig {
        &self.config
    }

    /// Replaces the liquidity series.
    pub fn set_series(&mut self, series: Vec<DataPoint>) {
        debug!(points = series.len(), "set liquidity series");
        self.series = series;
        self.series_revision = self.series_revision.wrapping_add(1);
        self.emit_plugin_event(PluginEvent::DataUpdated {
            points_len: self.series.len(),
        });
    }

    #[must_use]
    pub fn series(&self) -> &[DataPoint] {
        &self.series
    }

    pub fn set_current_price(&mut self, price: f64) {
        if price == self.current_price {
            return;
        }
        if !price.is_finite() || price <= 0.0 {
            debug!(price, "current price is unusable; x domain collapses");
        }
        self.current_price = price;
        self.emit_plugin_event(PluginEvent::CurrentPriceChanged { price });
    }

    #[must_use]
    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    pub fn set_dimensions(&mut self, dimensions: Dimensions) -> ChartResult<()> {
        validate_layout(dimensions, self.config.margins)?;
        self.config.dimensions = dimensions;
        Ok(())
    }

    pub fn set_margins(&mut self, margins: Margins) -> ChartResult<()> {
        validate_layout(self.config.dimensions, margins)?;
        self.config.margins = margins;
        Ok(())
    }

    #[must_use]
    pub fn inner_area(&self) -> InnerArea {
        InnerArea::from_layout(self.config.dimensions, self.config.margins)
    }

    /// Toggles pointer input on the brush. Disabling aborts a running drag.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.config.interactive = interactive;
        let was_dragging = self.brush.state().is_dragging();
        self.brush.set_enabled(interactive);
        if !interactive && was_dragging {
            self.active_gesture = ActiveGesture::None;
            self.emit_plugin_event(PluginEvent::BrushDragCancelled);
        }
    }

    /// Installs the externally controlled range; `None` lets the next
    /// [`RangeChart::mount`] self-initialize it.
    pub fn set_brush_domain(&mut self, domain: Option<Domain>) {
        match domain {
            Some(domain) if !domain.is_finite() => {
                warn!(?domain, "ignoring non-finite brush domain");
            }
            domain => self.brush_domain = domain,
        }
    }

    #[must_use]
    pub fn brush_domain(&self) -> Option<Domain> {
        self.brush_domain
    }

    /// Registers the callback invoked with every accepted brush range.
    pub fn on_brush_domain_change(&mut self, handler: impl FnMut(Domain) + 'static) {
        self.brush_domain_handler = Some(Box::new(handler));
    }

    /// Self-initializes a missing brush domain to the base x domain and
    /// reports it once. Returns the reported domain.
    pub fn mount(&mut self) -> Option<Domain> {
        if self.brush_domain.is_some() {
            return None;
        }
        let domain = self.base_scales().x.domain();
        debug!(lo = domain.lo(), hi = domain.hi(), "initializing brush domain");
        self.commit_brush_domain(domain);
        Some(domain)
    }

    /// Base scales before zoom, rebuilt only when their inputs change.
    #[must_use]
    pub fn base_scales(&self) -> ChartScales {
        let inner = self.inner_area();
        self.scale_cache.borrow_mut().get_or_build(
            self.series_revision,
            &self.series,
            self.current_price,
            inner.width,
            inner.height,
        )
    }

    /// Number of times the base scales were recomputed.
    #[must_use]
    pub fn scale_rebuild_count(&self) -> u64 {
        self.scale_cache.borrow().rebuild_count()
    }

    /// Mapper for the zoomed x axis of the current pass.
    #[must_use]
    pub fn mapper(&self) -> CoordinateMapper {
        self.zoom.mapper(self.base_scales().x)
    }

    #[must_use]
    pub fn visible_domain(&self) -> Domain {
        self.mapper().visible_domain()
    }

    #[must_use]
    pub fn zoom_transform(&self) -> ZoomTransform {
        self.zoom.transform()
    }

    #[must_use]
    pub fn brush_state(&self) -> BrushState {
        self.brush.state()
    }

    /// Range the brush currently shows: the in-progress drag extent, else the
    /// controlled domain, else the visible domain.
    #[must_use]
    pub fn brush_extent(&self) -> Domain {
        self.brush
            .drag_extent()
            .or(self.brush_domain)
            .unwrap_or_else(|| self.visible_domain())
    }

    pub fn handle_gesture(&mut self, event: GestureEvent) -> GestureOutcome {
        trace!(?event, "handle gesture");
        match event {
            GestureEvent::PointerDown { x } => self.pointer_down(x),
            GestureEvent::PointerMove { x } => self.pointer_move(x),
            GestureEvent::PointerUp => self.pointer_release(false),
            GestureEvent::PointerCancel => self.pointer_release(true),
            GestureEvent::Wheel { x, delta_y, mode } => match self.zoom.wheel(x, delta_y, mode) {
                Some(transform) => self.after_zoom_change(transform),
                None => GestureOutcome::Ignored,
            },
        }
    }

    /// Processes every pending gesture of a host-owned source in order.
    pub fn drain_gestures<S: GestureSource + ?Sized>(&mut self, source: &mut S) -> usize {
        let mut processed = 0;
        while let Some(event) = source.next_gesture() {
            self.handle_gesture(event);
            processed += 1;
        }
        processed
    }

    pub fn zoom_in(&mut self) -> Option<ZoomTransform> {
        let transform = self.zoom.zoom_in(self.inner_area().width)?;
        self.after_zoom_change(transform);
        Some(transform)
    }

    pub fn zoom_out(&mut self) -> Option<ZoomTransform> {
        let transform = self.zoom.zoom_out(self.inner_area().width)?;
        self.after_zoom_change(transform);
        Some(transform)
    }

    pub fn reset_zoom(&mut self) -> Option<ZoomTransform> {
        if self.active_gesture == ActiveGesture::Pan {
            self.active_gesture = ActiveGesture::None;
            self.emit_plugin_event(PluginEvent::PanEnded);
        }
        let transform = self.zoom.reset()?;
        self.after_zoom_change(transform);
        Some(transform)
    }

    /// Percentage label for a bound relative to the current price.
    #[must_use]
    pub fn brush_label_value(&self, value: f64) -> String {
        brush_label_value(value, self.current_price)
    }

    #[must_use]
    pub fn brush_frame(&self) -> BrushRenderFrame {
        let mapper = self.mapper();
        let current_price = self.current_price;
        let label = |value| brush_label_value(value, current_price);
        BrushRenderFrame::build(BrushFrameInput {
            mapper: &mapper,
            extent: self.brush_extent(),
            inner: self.inner_area(),
            outer_height: self.config.dimensions.height,
            current_price,
            colors: &self.config.handle_colors,
            label: &label,
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> RangeChartSnapshot {
        RangeChartSnapshot {
            dimensions: self.config.dimensions,
            margins: self.config.margins,
            inner: self.inner_area(),
            current_price: self.current_price,
            points_len: self.series.len(),
            base_domain: self.base_scales().x.domain(),
            visible_domain: self.visible_domain(),
            zoom: self.zoom.transform(),
            brush_domain: self.brush_domain,
            brush_state: self.brush.state(),
            interactive: self.config.interactive,
        }
    }

    /// Registers a plugin with unique identifier.
    pub fn register_plugin(&mut self, plugin: Box<dyn ChartPlugin>) -> ChartResult<()> {
        let plugin_id = plugin.id().to_owned();
        if plugin_id.is_empty() {
            return Err(ChartError::InvalidData(
                "plugin id must not be empty".to_owned(),
            ));
        }
        if self.plugins.contains_key(&plugin_id) {
            return Err(ChartError::InvalidData(format!(
                "plugin with id `{plugin_id}` is already registered"
            )));
        }
        self.plugins.insert(plugin_id, plugin);
        Ok(())
    }

    /// Unregisters a plugin by id. Returns `true` when removed.
    pub fn unregister_plugin(&mut self, plugin_id: &str) -> bool {
        self.plugins.shift_remove(plugin_id).is_some()
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn has_plugin(&self, plugin_id: &str) -> bool {
        self.plugins.contains_key(plugin_id)
    }

    fn pointer_down(&mut self, x: f64) -> GestureOutcome {
        if self.active_gesture != ActiveGesture::None {
            trace!(x, "ignoring press while another gesture owns the pointer");
            return GestureOutcome::Ignored;
        }

        let mapper = self.mapper();
        let extent = self.brush_domain.unwrap_or_else(|| mapper.visible_domain());
        if self.brush.pointer_down(x, extent, &mapper) {
            let state = self.brush.state();
            self.active_gesture = ActiveGesture::Brush;
            self.emit_plugin_event(PluginEvent::BrushDragStarted { state });
            return GestureOutcome::BrushDragStarted(state);
        }
        if self.zoom.pan_start(x) {
            self.active_gesture = ActiveGesture::Pan;
            self.emit_plugin_event(PluginEvent::PanStarted);
            return GestureOutcome::PanStarted;
        }
        GestureOutcome::Ignored
    }

    fn pointer_move(&mut self, x: f64) -> GestureOutcome {
        match self.active_gesture {
            ActiveGesture::None => GestureOutcome::Ignored,
            ActiveGesture::Brush => {
                let mapper = self.mapper();
                match self.brush.pointer_move(x, &mapper) {
                    Some(domain) => {
                        self.commit_brush_domain(domain);
                        GestureOutcome::BrushMoved(domain)
                    }
                    None => GestureOutcome::Ignored,
                }
            }
            ActiveGesture::Pan => match self.zoom.pan_move(x) {
                Some(transform) => self.after_zoom_change(transform),
                None => GestureOutcome::Ignored,
            },
        }
    }

    fn pointer_release(&mut self, cancelled: bool) -> GestureOutcome {
        let gesture = std::mem::take(&mut self.active_gesture);
        match gesture {
            ActiveGesture::None => return GestureOutcome::Ignored,
            ActiveGesture::Brush if cancelled => {
                self.brush.pointer_cancel();
                self.emit_plugin_event(PluginEvent::BrushDragCancelled);
            }
            ActiveGesture::Brush => {
                self.brush.pointer_up();
                self.emit_plugin_event(PluginEvent::BrushDragEnded);
            }
            ActiveGesture::Pan => {
                self.zoom.pan_end();
                self.emit_plugin_event(PluginEvent::PanEnded);
            }
        }
        if cancelled {
            GestureOutcome::GestureCancelled
        } else {
            GestureOutcome::GestureEnded
        }
    }

    fn after_zoom_change(&mut self, transform: ZoomTransform) -> GestureOutcome {
        let visible_domain = self.visible_domain();
        debug!(
            k = transform.k,
            x = transform.x,
            lo = visible_domain.lo(),
            hi = visible_domain.hi(),
            "zoom changed"
        );
        self.emit_plugin_event(PluginEvent::ZoomChanged {
            transform,
            visible_domain,
        });
        GestureOutcome::ZoomChanged(transform)
    }

    fn commit_brush_domain(&mut self, domain: Domain) {
        self.brush_domain = Some(domain);
        if let Some(handler) = self.brush_domain_handler.as_mut() {
            handler(domain);
        }
        self.emit_plugin_event(PluginEvent::BrushDomainChanged { domain });
    }

    fn plugin_context(&self) -> PluginContext {
        let mapper = self.mapper();
        PluginContext {
            dimensions: self.config.dimensions,
            inner: self.inner_area(),
            current_price: self.current_price,
            base_domain: self.base_scales().x.domain(),
            visible_domain: mapper.visible_domain(),
            zoom: self.zoom.transform(),
            brush_domain: self.brush_domain,
            brush_state: self.brush.state(),
            interactive: self.config.interactive,
        }
    }

    fn emit_plugin_event(&mut self, event: PluginEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in self.plugins.values_mut() {
            plugin.on_event(event, context);
        }
    }
}
