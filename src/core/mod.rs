pub mod coordinate_mapper;
pub mod scale;
pub mod scale_manager;
pub mod types;

pub use coordinate_mapper::CoordinateMapper;
pub use scale::LinearScale;
pub use scale_manager::{ChartScales, ScaleCache, build_scales};
pub use types::{DataPoint, Dimensions, Domain, InnerArea, Margins};
