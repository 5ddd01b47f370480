//! Statistical chart rendering.

mod component;
mod config;
mod render;

pub use component::{ChartCanvas, MaterialClusteringChart, MaterialUsageChart, MaterialUsagePieChart};
pub use config::{
	ChartConfig, flavor_chart, meridian_chart, property_chart, province_chart, top_materials_chart,
};
