use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use approx::assert_relative_eq;
use liquidity_range_chart::api::{GestureOutcome, RangeChart, RangeChartConfig};
use liquidity_range_chart::core::{DataPoint, Dimensions, Domain};
use liquidity_range_chart::interaction::{
    BrushState, GestureEvent, HandleKind, WheelDeltaMode, ZoomConfig,
};

fn config() -> RangeChartConfig {
    RangeChartConfig::new(Dimensions::new(200.0, 50.0))
}

fn mounted_chart(config: RangeChartConfig) -> (RangeChart, Rc<RefCell<Vec<Domain>>>) {
    let mut chart = RangeChart::new(config).expect("chart init");
    chart.set_series(vec![
        DataPoint::new(100.0, 10.0),
        DataPoint::new(110.0, 50.0),
        DataPoint::new(120.0, 5.0),
    ]);
    chart.set_current_price(110.0);

    let emitted = Rc::new(RefCell::new(Vec::new()));
    let sink = emitted.clone();
    chart.on_brush_domain_change(move |domain| sink.borrow_mut().push(domain));
    (chart, emitted)
}

fn press(chart: &mut RangeChart, x: f64) -> GestureOutcome {
    chart.handle_gesture(GestureEvent::PointerDown { x })
}

fn drag_to(chart: &mut RangeChart, x: f64) -> GestureOutcome {
    chart.handle_gesture(GestureEvent::PointerMove { x })
}

#[test]
fn mount_reports_base_domain_once() {
    let (mut chart, emitted) = mounted_chart(config());
    let reported = chart.mount().expect("initialized");
    assert_relative_eq!(reported.lo(), 77.0, max_relative = 1e-12);
    assert_relative_eq!(reported.hi(), 143.0, max_relative = 1e-12);
    assert!(chart.mount().is_none());
    assert_eq!(emitted.borrow().len(), 1);
}

#[test]
fn controlled_domain_is_not_overwritten_on_mount() {
    let (mut chart, emitted) = mounted_chart(config());
    chart.set_brush_domain(Some(Domain::new(90.0, 120.0)));
    assert!(chart.mount().is_none());
    assert!(emitted.borrow().is_empty());
    assert_eq!(chart.brush_extent(), Domain::new(90.0, 120.0));
}

#[test]
fn east_handle_dragged_past_edge_clamps_to_domain_upper_bound() {
    let (mut chart, emitted) = mounted_chart(config());
    chart.mount();

    assert_eq!(
        press(&mut chart, 200.0),
        GestureOutcome::BrushDragStarted(BrushState::DraggingHandle(HandleKind::East))
    );
    let GestureOutcome::BrushMoved(midway) = drag_to(&mut chart, 150.0) else {
        panic!("expected brush move");
    };
    assert_relative_eq!(midway.hi(), 126.5, max_relative = 1e-12);

    let GestureOutcome::BrushMoved(domain) = drag_to(&mut chart, 250.0) else {
        panic!("expected brush move");
    };
    assert_relative_eq!(domain.hi(), 143.0, max_relative = 1e-12);
    assert_relative_eq!(domain.lo(), 77.0, max_relative = 1e-12);

    assert_eq!(
        chart.handle_gesture(GestureEvent::PointerUp),
        GestureOutcome::GestureEnded
    );
    assert_eq!(chart.brush_state(), BrushState::Idle);
    assert_eq!(emitted.borrow().last().copied(), Some(domain));
}

#[test]
fn west_handle_dragged_beyond_east_collapses_to_a_point() {
    let (mut chart, _) = mounted_chart(config());
    chart.set_brush_domain(Some(Domain::new(100.0, 120.0)));
    let west_px = chart.mapper().to_pixel(100.0);

    press(&mut chart, west_px);
    assert_eq!(
        chart.brush_state(),
        BrushState::DraggingHandle(HandleKind::West)
    );
    let GestureOutcome::BrushMoved(domain) = drag_to(&mut chart, 190.0) else {
        panic!("expected brush move");
    };
    assert_eq!(domain.lo(), domain.hi());
    assert_eq!(domain.hi(), 120.0);
}

#[test]
fn body_drag_translates_range_until_an_edge() {
    let (mut chart, _) = mounted_chart(config());
    chart.set_brush_domain(Some(Domain::new(90.0, 120.0)));

    assert_eq!(
        press(&mut chart, 85.0),
        GestureOutcome::BrushDragStarted(BrushState::DraggingBody)
    );
    let GestureOutcome::BrushMoved(right) = drag_to(&mut chart, 1_085.0) else {
        panic!("expected brush move");
    };
    assert_relative_eq!(right.hi(), 143.0, max_relative = 1e-9);
    assert_relative_eq!(right.lo(), 113.0, max_relative = 1e-9);

    let GestureOutcome::BrushMoved(left) = drag_to(&mut chart, -1_000.0) else {
        panic!("expected brush move");
    };
    assert_relative_eq!(left.lo(), 77.0, max_relative = 1e-9);
    assert_relative_eq!(left.hi(), 107.0, max_relative = 1e-9);
}

#[test]
fn cancel_ends_drag_without_emitting() {
    let (mut chart, emitted) = mounted_chart(config());
    chart.mount();

    press(&mut chart, 200.0);
    drag_to(&mut chart, 150.0);
    assert_eq!(emitted.borrow().len(), 2);

    assert_eq!(
        chart.handle_gesture(GestureEvent::PointerCancel),
        GestureOutcome::GestureCancelled
    );
    assert_eq!(drag_to(&mut chart, 100.0), GestureOutcome::Ignored);
    assert_eq!(emitted.borrow().len(), 2);
    assert_eq!(chart.brush_state(), BrushState::Idle);
}

#[test]
fn non_interactive_chart_ignores_handle_presses() {
    let config = config()
        .with_interactive(false)
        .with_zoom(ZoomConfig {
            drag_pan: false,
            ..ZoomConfig::default()
        });
    let (mut chart, emitted) = mounted_chart(config);
    chart.mount();

    assert_eq!(press(&mut chart, 200.0), GestureOutcome::Ignored);
    assert_eq!(drag_to(&mut chart, 150.0), GestureOutcome::Ignored);
    assert_eq!(emitted.borrow().len(), 1);

    let frame = chart.brush_frame();
    assert!(frame.west.in_view && frame.east.in_view);
}

#[test]
fn disabling_interaction_mid_drag_cancels_it() {
    let (mut chart, emitted) = mounted_chart(config());
    chart.mount();
    press(&mut chart, 200.0);
    chart.set_interactive(false);

    assert_eq!(chart.brush_state(), BrushState::Idle);
    assert_eq!(drag_to(&mut chart, 150.0), GestureOutcome::Ignored);
    assert_eq!(emitted.borrow().len(), 1);
}

#[test]
fn second_press_during_drag_is_ignored() {
    let (mut chart, _) = mounted_chart(config());
    chart.mount();
    press(&mut chart, 200.0);
    assert_eq!(press(&mut chart, 0.0), GestureOutcome::Ignored);
    assert_eq!(
        chart.brush_state(),
        BrushState::DraggingHandle(HandleKind::East)
    );
}

#[test]
fn drag_uses_mapper_zoomed_mid_gesture() {
    let (mut chart, _) = mounted_chart(config());
    chart.set_brush_domain(Some(Domain::new(100.0, 120.0)));
    let east_px = chart.mapper().to_pixel(120.0);
    press(&mut chart, east_px);

    let mut gestures = VecDeque::from([
        GestureEvent::Wheel {
            x: 100.0,
            delta_y: -500.0,
            mode: WheelDeltaMode::Pixel,
        },
        GestureEvent::PointerMove { x: 200.0 },
    ]);
    assert_eq!(chart.drain_gestures(&mut gestures), 2);

    let extent = chart.brush_extent();
    let visible = chart.visible_domain();
    assert!(extent.lo() <= extent.hi());
    assert_relative_eq!(extent.hi(), visible.hi(), max_relative = 1e-9);
}

#[test]
fn handle_labels_follow_current_price() {
    let (mut chart, _) = mounted_chart(config());
    chart.mount();
    assert_eq!(chart.brush_label_value(110.0), "0.00%");

    let frame = chart.brush_frame();
    assert_eq!(frame.west.label.as_ref().map(|l| l.text.as_str()), Some("-43%"));
    let east_label = frame.east.label.expect("east label");
    assert_eq!(east_label.text, "30%");
    assert_eq!(east_label.width_px, 38);

    chart.set_current_price(0.0);
    assert_eq!(chart.brush_label_value(110.0), "");
}
