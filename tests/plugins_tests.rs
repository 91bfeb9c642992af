use std::cell::RefCell;
use std::rc::Rc;

use liquidity_range_chart::ChartError;
use liquidity_range_chart::api::{RangeChart, RangeChartConfig};
use liquidity_range_chart::core::{DataPoint, Dimensions};
use liquidity_range_chart::extensions::{ChartPlugin, PluginContext, PluginEvent};
use liquidity_range_chart::interaction::{BrushState, GestureEvent, HandleKind};

#[derive(Clone)]
struct RecordingPlugin {
    id: String,
    events: Rc<RefCell<Vec<PluginEvent>>>,
    contexts: Rc<RefCell<Vec<PluginContext>>>,
}

impl RecordingPlugin {
    fn new(id: impl Into<String>, events: Rc<RefCell<Vec<PluginEvent>>>) -> Self {
        Self {
            id: id.into(),
            events,
            contexts: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl ChartPlugin for RecordingPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: PluginEvent, context: PluginContext) {
        self.events.borrow_mut().push(event);
        self.contexts.borrow_mut().push(context);
    }
}

fn event_kind(event: &PluginEvent) -> &'static str {
    match event {
        PluginEvent::DataUpdated { .. } => "data",
        PluginEvent::CurrentPriceChanged { .. } => "price",
        PluginEvent::ZoomChanged { .. } => "zoom",
        PluginEvent::PanStarted => "pan_start",
        PluginEvent::PanEnded => "pan_end",
        PluginEvent::BrushDragStarted { .. } => "brush_start",
        PluginEvent::BrushDomainChanged { .. } => "brush_domain",
        PluginEvent::BrushDragEnded => "brush_end",
        PluginEvent::BrushDragCancelled => "brush_cancel",
    }
}

fn chart() -> RangeChart {
    RangeChart::new(RangeChartConfig::new(Dimensions::new(200.0, 50.0))).expect("chart init")
}

#[test]
fn plugin_receives_deterministic_event_sequence() {
    let mut chart = chart();
    let events = Rc::new(RefCell::new(Vec::<PluginEvent>::new()));
    chart
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    chart.set_series(vec![DataPoint::new(110.0, 50.0)]);
    chart.set_current_price(110.0);
    chart.mount();
    chart.handle_gesture(GestureEvent::PointerDown { x: 200.0 });
    chart.handle_gesture(GestureEvent::PointerMove { x: 180.0 });
    chart.handle_gesture(GestureEvent::PointerUp);
    chart.zoom_in();

    let kinds: Vec<&str> = events.borrow().iter().map(event_kind).collect();
    assert_eq!(
        kinds,
        vec![
            "data",
            "price",
            "brush_domain",
            "brush_start",
            "brush_domain",
            "brush_end",
            "zoom"
        ]
    );
    assert_eq!(
        events.borrow()[3],
        PluginEvent::BrushDragStarted {
            state: BrushState::DraggingHandle(HandleKind::East)
        }
    );
}

#[test]
fn plugin_context_reflects_state_after_the_event() {
    let mut chart = chart();
    let events = Rc::new(RefCell::new(Vec::new()));
    let plugin = RecordingPlugin::new("ctx", events);
    let contexts = plugin.contexts.clone();
    chart.register_plugin(Box::new(plugin)).expect("register");

    chart.set_current_price(110.0);
    chart.zoom_in();

    let contexts = contexts.borrow();
    let last = contexts.last().expect("context");
    assert_eq!(last.zoom.k, 2.0);
    assert!(last.visible_domain.width() < last.base_domain.width());
    assert_eq!(last.current_price, 110.0);
}

#[test]
fn plugin_registry_rejects_duplicate_ids() {
    let mut chart = chart();
    let events = Rc::new(RefCell::new(Vec::new()));
    chart
        .register_plugin(Box::new(RecordingPlugin::new("dup", events.clone())))
        .expect("first registration");

    let err = chart
        .register_plugin(Box::new(RecordingPlugin::new("dup", events.clone())))
        .expect_err("duplicate id must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let err = chart
        .register_plugin(Box::new(RecordingPlugin::new("", events)))
        .expect_err("empty id must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert_eq!(chart.plugin_count(), 1);
}

#[test]
fn unregistered_plugin_stops_receiving_events() {
    let mut chart = chart();
    let events = Rc::new(RefCell::new(Vec::new()));
    chart
        .register_plugin(Box::new(RecordingPlugin::new("temp", events.clone())))
        .expect("register");
    chart.set_current_price(100.0);

    assert!(chart.unregister_plugin("temp"));
    assert!(!chart.has_plugin("temp"));
    assert!(!chart.unregister_plugin("temp"));

    chart.set_current_price(120.0);
    assert_eq!(events.borrow().len(), 1);
}
