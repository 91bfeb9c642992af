//! liquidity-range-chart: headless core of an interactive price-range chart.
//!
//! The crate turns a liquidity series and a current price into pixel scales,
//! applies pan/zoom gestures to the price axis, converts handle drags into an
//! ordered price range and produces the SVG geometry for the handles.
//! Drawing, axis ticks and data fetching are left to the host.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{RangeChart, RangeChartConfig};
pub use error::{ChartError, ChartResult};
