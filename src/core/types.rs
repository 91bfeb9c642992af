use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One sample of the liquidity distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub price: f64,
    pub active_liquidity: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(price: f64, active_liquidity: f64) -> Self {
        Self {
            price,
            active_liquidity,
        }
    }

    /// Converts exact pool values; fails when either value does not fit an `f64`.
    pub fn from_decimal(price: Decimal, active_liquidity: Decimal) -> ChartResult<Self> {
        Ok(Self {
            price: lossy_decimal(price, "price")?,
            active_liquidity: lossy_decimal(active_liquidity, "active liquidity")?,
        })
    }
}

fn lossy_decimal(value: Decimal, field: &str) -> ChartResult<f64> {
    value
        .to_f64()
        .filter(|converted| converted.is_finite())
        .ok_or_else(|| ChartError::InvalidData(format!("{field} cannot be represented as f64")))
}

/// Ordered `(lo, hi)` pair on the price axis.
///
/// Every constructor, deserialization included, orders the bounds so
/// `lo <= hi` holds for any non-NaN value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDomain")]
pub struct Domain {
    lo: f64,
    hi: f64,
}

#[derive(Deserialize)]
struct RawDomain {
    lo: f64,
    hi: f64,
}

impl From<RawDomain> for Domain {
    fn from(raw: RawDomain) -> Self {
        Self::new(raw.lo, raw.hi)
    }
}

impl Domain {
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        if b < a {
            Self { lo: b, hi: a }
        } else {
            Self { lo: a, hi: b }
        }
    }

    /// Like [`Domain::new`] but rejects non-finite bounds.
    pub fn try_new(a: f64, b: f64) -> ChartResult<Self> {
        if !a.is_finite() || !b.is_finite() {
            return Err(ChartError::InvalidData(
                "domain bounds must be finite".to_owned(),
            ));
        }
        Ok(Self::new(a, b))
    }

    #[must_use]
    pub fn point(value: f64) -> Self {
        Self {
            lo: value,
            hi: value,
        }
    }

    #[must_use]
    pub fn lo(self) -> f64 {
        self.lo
    }

    #[must_use]
    pub fn hi(self) -> f64 {
        self.hi
    }

    #[must_use]
    pub fn as_tuple(self) -> (f64, f64) {
        (self.lo, self.hi)
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.hi - self.lo
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.width() <= 0.0
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.lo.is_finite() && self.hi.is_finite()
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.lo && value <= self.hi
    }

    /// Nearest point of the domain.
    #[must_use]
    pub fn clamp_value(self, value: f64) -> f64 {
        value.max(self.lo).min(self.hi)
    }
}

impl From<(f64, f64)> for Domain {
    fn from((a, b): (f64, f64)) -> Self {
        Self::new(a, b)
    }
}

/// Outer chart size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        [self.top, self.right, self.bottom, self.left]
            .into_iter()
            .all(|side| side.is_finite() && side >= 0.0)
    }
}

/// Plotting area left after subtracting margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InnerArea {
    pub width: f64,
    pub height: f64,
}

impl InnerArea {
    /// Each side is floored at zero so oversized margins degrade to an empty area.
    #[must_use]
    pub fn from_layout(dimensions: Dimensions, margins: Margins) -> Self {
        let width = dimensions.width - margins.left - margins.right;
        let height = dimensions.height - margins.top - margins.bottom;
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
        }
    }
}

fn sanitize_extent(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
