//! Observer extensions attached to a [`crate::api::RangeChart`].

mod plugins;

pub use plugins::{ChartPlugin, PluginContext, PluginEvent};
