use serde::{Deserialize, Serialize};

use crate::core::Domain;

/// Linear map from a domain interval onto a pixel range.
///
/// Unlike the domain, the range keeps its orientation: `(inner_height, 0)` is a
/// valid inverted y range. A zero-length domain maps every value to the range
/// start and a zero-length range inverts every pixel to the domain start, so
/// neither direction can yield NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: Domain,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    #[must_use]
    pub fn new(domain: Domain, range_start: f64, range_end: f64) -> Self {
        Self {
            domain,
            range_start,
            range_end,
        }
    }

    #[must_use]
    pub fn domain(self) -> Domain {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn range_span(self) -> f64 {
        self.range_end - self.range_start
    }

    /// Returns a copy mapping `domain` onto the same range.
    #[must_use]
    pub fn with_domain(self, domain: Domain) -> Self {
        Self { domain, ..self }
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.domain.is_degenerate() || self.range_span() == 0.0
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain.width();
        if span <= 0.0 || !span.is_finite() {
            return self.range_start;
        }
        let normalized = (value - self.domain.lo()) / span;
        self.range_start + normalized * self.range_span()
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_span();
        if span == 0.0 || !span.is_finite() {
            return self.domain.lo();
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain.lo() + normalized * self.domain.width()
    }
}
