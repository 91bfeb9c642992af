use serde::{Deserialize, Serialize};

use crate::core::{Dimensions, Domain, InnerArea, Margins};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{BrushState, ZoomTransform};

pub const RANGE_CHART_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable view of the chart state for diagnostics and host tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeChartSnapshot {
    pub dimensions: Dimensions,
    pub margins: Margins,
    pub inner: InnerArea,
    pub current_price: f64,
    pub points_len: usize,
    pub base_domain: Domain,
    pub visible_domain: Domain,
    pub zoom: ZoomTransform,
    pub brush_domain: Option<Domain>,
    pub brush_state: BrushState,
    pub interactive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeChartSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: RangeChartSnapshot,
}

impl RangeChartSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = RangeChartSnapshotJsonContractV1 {
            schema_version: RANGE_CHART_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: *self,
        };
        Ok(serde_json::to_string_pretty(&payload)?)
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<Self>(input) {
            return Ok(snapshot);
        }
        let payload: RangeChartSnapshotJsonContractV1 = serde_json::from_str(input)?;
        if payload.schema_version != RANGE_CHART_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
