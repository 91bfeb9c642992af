const SI_PREFIXES: [&str; 9] = ["", "k", "M", "G", "T", "P", "E", "Z", "Y"];

/// Signed percentage distance of `value` from `current_price`, formatted for
/// a handle label.
///
/// The distance is measured relative to the smaller of the two prices, so
/// moving up 2x and down 2x both read as 100%. Returns an empty string while
/// no usable current price is known or when the ratio is not finite.
#[must_use]
pub fn brush_label_value(value: f64, current_price: f64) -> String {
    if !current_price.is_finite() || current_price <= 0.0 || !value.is_finite() {
        return String::new();
    }

    let sign = if value < current_price { -1.0 } else { 1.0 };
    let lower = value.min(current_price);
    let percent = sign * (value.max(current_price) - lower) / lower * 100.0;
    if !percent.is_finite() {
        return String::new();
    }
    format!("{}%", format_percent_delta(percent))
}

/// Fixed two decimals up to a magnitude of one, two significant digits with
/// an SI prefix above it.
#[must_use]
pub fn format_percent_delta(percent: f64) -> String {
    if percent.abs() > 1.0 {
        format_two_significant_si(percent)
    } else {
        let text = format!("{percent:.2}");
        if text == "-0.00" {
            "0.00".to_owned()
        } else {
            text
        }
    }
}

fn format_two_significant_si(value: f64) -> String {
    // `{:.1e}` rounds to two significant digits and carries into the exponent.
    let scientific = format!("{:.1e}", value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let (Ok(mantissa), Ok(exponent)) = (mantissa.parse::<f64>(), exponent.parse::<i32>()) else {
        return scientific;
    };

    let group = exponent.div_euclid(3).clamp(0, SI_PREFIXES.len() as i32 - 1);
    let integer_digits = exponent - group * 3;
    let decimals = (1 - integer_digits).max(0) as usize;
    let scaled = mantissa * 10f64.powi(integer_digits);

    let mut text = format!("{scaled:.decimals$}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{text}{}", SI_PREFIXES[group as usize])
}
