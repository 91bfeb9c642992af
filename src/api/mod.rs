mod config;
mod engine;
mod label_format;
mod snapshot;

pub use config::RangeChartConfig;
pub use engine::{GestureOutcome, RangeChart};
pub use label_format::{brush_label_value, format_percent_delta};
pub use snapshot::{
    RANGE_CHART_SNAPSHOT_JSON_SCHEMA_V1, RangeChartSnapshot, RangeChartSnapshotJsonContractV1,
};
