use liquidity_range_chart::api::{brush_label_value, format_percent_delta};

#[test]
fn label_at_current_price_reads_zero() {
    assert_eq!(brush_label_value(110.0, 110.0), "0.00%");
}

#[test]
fn label_without_current_price_is_empty() {
    assert_eq!(brush_label_value(110.0, 0.0), "");
    assert_eq!(brush_label_value(110.0, -1.0), "");
    assert_eq!(brush_label_value(110.0, f64::INFINITY), "");
    assert_eq!(brush_label_value(f64::NAN, 110.0), "");
}

#[test]
fn label_signs_distance_from_current_price() {
    assert_eq!(brush_label_value(143.0, 110.0), "30%");
    assert_eq!(brush_label_value(77.0, 110.0), "-43%");
    assert_eq!(brush_label_value(110.55, 110.0), "0.50%");
}

#[test]
fn label_of_zero_bound_is_empty() {
    // Relative to a zero lower price the ratio is infinite.
    assert_eq!(brush_label_value(0.0, 110.0), "");
}

#[test]
fn large_percentages_use_si_prefixes() {
    assert_eq!(format_percent_delta(12_345.0), "12k");
    assert_eq!(format_percent_delta(-2_500.0), "-2.5k");
    assert_eq!(format_percent_delta(999.0), "1k");
}
