use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{DataPoint, Domain, LinearScale};

/// Fraction of the current price shown on each side of it before any zoom.
pub const BASE_DOMAIN_PADDING_RATIO: f64 = 0.3;

/// Base x (price) and y (liquidity) scales for one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartScales {
    pub x: LinearScale,
    pub y: LinearScale,
}

/// Builds base scales from explicit inputs.
///
/// The x domain is centered on `current_price` with fixed padding and ignores
/// the spread of `series`. Non-positive or non-finite prices collapse the x
/// domain to `[0, 0]`; a series without positive finite liquidity yields a
/// flat `[0, 0]` y domain.
#[must_use]
pub fn build_scales(
    series: &[DataPoint],
    current_price: f64,
    inner_width: f64,
    inner_height: f64,
) -> ChartScales {
    let x_domain = base_price_domain(current_price);
    let liquidity_max = max_active_liquidity(series);
    if x_domain.is_degenerate() || liquidity_max == 0.0 {
        debug!(
            current_price,
            liquidity_max,
            points = series.len(),
            "building degenerate chart scales"
        );
    }

    ChartScales {
        x: LinearScale::new(x_domain, 0.0, inner_width),
        y: LinearScale::new(Domain::new(0.0, liquidity_max), inner_height, 0.0),
    }
}

#[must_use]
pub fn base_price_domain(current_price: f64) -> Domain {
    if !current_price.is_finite() || current_price <= 0.0 {
        return Domain::point(0.0);
    }
    Domain::new(
        (1.0 - BASE_DOMAIN_PADDING_RATIO) * current_price,
        (1.0 + BASE_DOMAIN_PADDING_RATIO) * current_price,
    )
}

/// Largest finite liquidity in `series`, floored at zero.
#[must_use]
pub fn max_active_liquidity(series: &[DataPoint]) -> f64 {
    series
        .iter()
        .map(|point| point.active_liquidity)
        .filter(|liquidity| liquidity.is_finite())
        .fold(0.0, f64::max)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ScaleKey {
    series_revision: u64,
    current_price: OrderedFloat<f64>,
    inner_width: OrderedFloat<f64>,
    inner_height: OrderedFloat<f64>,
}

/// Single-entry memo for [`build_scales`].
///
/// Callers bump `series_revision` whenever the series content changes; the
/// cache never inspects the series itself.
#[derive(Debug, Clone, Default)]
pub struct ScaleCache {
    entry: Option<(ScaleKey, ChartScales)>,
    rebuilds: u64,
}

impl ScaleCache {
    pub fn get_or_build(
        &mut self,
        series_revision: u64,
        series: &[DataPoint],
        current_price: f64,
        inner_width: f64,
        inner_height: f64,
    ) -> ChartScales {
        let key = ScaleKey {
            series_revision,
            current_price: OrderedFloat(current_price),
            inner_width: OrderedFloat(inner_width),
            inner_height: OrderedFloat(inner_height),
        };
        if let Some((cached_key, scales)) = self.entry {
            if cached_key == key {
                return scales;
            }
        }

        let scales = build_scales(series, current_price, inner_width, inner_height);
        self.rebuilds += 1;
        trace!(
            series_revision,
            current_price,
            inner_width,
            inner_height,
            rebuilds = self.rebuilds,
            "rebuilt chart scales"
        );
        self.entry = Some((key, scales));
        scales
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Number of times the cache had to call [`build_scales`].
    #[must_use]
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }
}
