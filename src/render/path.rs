//! SVG geometry for the brush handles.
//!
//! ```text
//!    |```````\
//!    |  | |  |
//!    |______/
//!    |
//!    |
//! ```
//!
//! The path describes the east handle. The west handle is the same path drawn
//! under `scale(-1, 1)` so both sides stay bit-identical.

/// Outer width of the handle head including its rounded corners.
pub const HANDLE_HEAD_WIDTH_PX: f64 = 13.0;
/// Height of the handle head.
pub const HANDLE_HEAD_HEIGHT_PX: f64 = 26.0;
/// Vertical offset of the head below the mounting point.
pub const HANDLE_HEAD_OFFSET_PX: f64 = 2.0;

const LABEL_PADDING_PX: usize = 10;
const LABEL_CHAR_WIDTH_PX: usize = 6;

/// Mirror transform applied to [`brush_handle_path`] for the west handle.
pub const WEST_HANDLE_MIRROR: &str = "scale(-1, 1)";

/// East handle: a stem from `height` up to the head, then a one-side rounded
/// rectangle.
#[must_use]
pub fn brush_handle_path(height: f64) -> String {
    [
        // stem
        format!("M 0 {height}"),
        "L 0 2".to_owned(),
        // head
        "h 11".to_owned(),
        "q 2 0, 2 2".to_owned(),
        "v 22".to_owned(),
        "q 0 2 -2 2".to_owned(),
        "h -11".to_owned(),
        "z".to_owned(),
    ]
    .join(" ")
}

/// Two grip lines inside the head; independent of the handle height.
#[must_use]
pub fn brush_handle_accent_path() -> &'static str {
    "m 5 8 v 14 M 0 0 m 9 8 v 14 z"
}

/// Approximate label background width: a fixed-width estimate from the
/// character count, not real font metrics.
#[must_use]
pub fn text_width(label: Option<&str>) -> usize {
    match label {
        Some(text) if !text.is_empty() => {
            text.chars().count() * LABEL_CHAR_WIDTH_PX + LABEL_PADDING_PX * 2
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::{brush_handle_accent_path, brush_handle_path, text_width};

    #[test]
    fn handle_path_for_fractional_height() {
        assert!(brush_handle_path(12.5).starts_with("M 0 12.5 L 0 2 "));
    }

    #[test]
    fn accent_path_is_height_independent() {
        assert_eq!(brush_handle_accent_path(), "m 5 8 v 14 M 0 0 m 9 8 v 14 z");
    }

    #[test]
    fn text_width_counts_characters_not_bytes() {
        assert_eq!(text_width(Some("−5%")), 3 * 6 + 20);
        assert_eq!(text_width(Some("")), 0);
    }
}
