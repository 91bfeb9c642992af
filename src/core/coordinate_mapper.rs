use crate::core::{Domain, LinearScale};

/// Forward/inverse mapping for the x scale that is active this pass.
///
/// Built once per event after zoom has been resolved and lent to every
/// consumer, so brush hit-testing and drawing agree on one scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    scale: LinearScale,
}

impl CoordinateMapper {
    #[must_use]
    pub fn new(scale: LinearScale) -> Self {
        Self { scale }
    }

    #[must_use]
    pub fn to_pixel(&self, domain_value: f64) -> f64 {
        self.scale.map(domain_value)
    }

    #[must_use]
    pub fn to_domain(&self, pixel: f64) -> f64 {
        self.scale.invert(pixel)
    }

    /// Price interval currently spanning the plotting area.
    #[must_use]
    pub fn visible_domain(&self) -> Domain {
        self.scale.domain()
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.scale.range()
    }

    #[must_use]
    pub fn scale(&self) -> LinearScale {
        self.scale
    }

    pub fn domain_to_pixels(&self, domain: Domain) -> (f64, f64) {
        (self.to_pixel(domain.lo()), self.to_pixel(domain.hi()))
    }
}
