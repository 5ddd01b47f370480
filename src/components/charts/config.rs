//! Typed chart configuration.
//!
//! Every statistics view builds one [`ChartConfig`] — title plus a bar, pie,
//! or scatter body — and hands it to the shared canvas painter. The original
//! per-chart options objects collapse into these constructors; sorting and
//! truncation policy lives here so it stays testable without a DOM.

use std::cmp::Ordering;

use crate::api::{Cluster, ClusterPoint, NamedValue};
use crate::i18n::tr;

/// Vertical two-stop gradient for bar fills. The painter places the stops at
/// 0 / 0.5 / 1 with the lower color doubled, matching the original styling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gradient {
	/// Color at the top of the bar.
	pub top: &'static str,
	/// Color from the midpoint down.
	pub bottom: &'static str,
}

/// A category bar chart.
#[derive(Clone, Debug)]
pub struct BarChart {
	/// Category labels along the x axis, drawn rotated.
	pub categories: Vec<String>,
	/// One value per category.
	pub values: Vec<f64>,
	/// Name shown on the value axis.
	pub axis_name: &'static str,
	/// Bar fill gradient.
	pub gradient: Gradient,
	/// Legend entry, when the chart carries one.
	pub legend: Option<&'static str>,
}

/// One pie slice.
#[derive(Clone, Debug, PartialEq)]
pub struct PieSlice {
	/// Slice label.
	pub name: String,
	/// Non-negative magnitude.
	pub value: f64,
}

/// A donut pie chart with a vertical legend.
#[derive(Clone, Debug)]
pub struct PieChart {
	/// Slices in display order.
	pub slices: Vec<PieSlice>,
	/// Inner radius as a fraction of the available radius.
	pub inner_ratio: f64,
	/// Outer radius as a fraction of the available radius.
	pub outer_ratio: f64,
	/// Slice colors; `None` uses the theme palette.
	pub palette: Option<&'static [&'static str]>,
	/// Series name used in tooltips.
	pub series_name: &'static str,
}

/// One scatter series (one cluster).
#[derive(Clone, Debug)]
pub struct ScatterSeries {
	/// Legend/tooltip label for the series.
	pub name: String,
	/// Member points.
	pub points: Vec<ClusterPoint>,
}

/// A multi-series scatter chart over two value axes.
#[derive(Clone, Debug)]
pub struct ScatterChart {
	/// Series in palette order.
	pub series: Vec<ScatterSeries>,
	/// X axis name.
	pub x_name: &'static str,
	/// Y axis name.
	pub y_name: &'static str,
}

/// The body of a chart.
#[derive(Clone, Debug)]
pub enum ChartKind {
	/// Category bars.
	Bar(BarChart),
	/// Donut pie.
	Pie(PieChart),
	/// Cluster scatter.
	Scatter(ScatterChart),
}

/// Complete declarative description of one chart.
#[derive(Clone, Debug)]
pub struct ChartConfig {
	/// Centered title text.
	pub title: String,
	/// Whether the title is an error message, drawn in the theme error color.
	pub error: bool,
	/// Chart body; `None` renders the title alone (loading/error states).
	pub kind: Option<ChartKind>,
}

impl ChartConfig {
	fn new(title: impl Into<String>, kind: ChartKind) -> Self {
		Self {
			title: title.into(),
			error: false,
			kind: Some(kind),
		}
	}
}

/// Placeholder config shown while a fetch is pending.
pub fn loading_chart() -> ChartConfig {
	ChartConfig {
		title: tr("loading"),
		error: false,
		kind: None,
	}
}

/// Error config replacing a chart whose data failed to load.
pub fn error_chart(title: impl Into<String>) -> ChartConfig {
	ChartConfig {
		title: title.into(),
		error: true,
		kind: None,
	}
}

/// Sort name/value pairs by value, descending. Ties keep their input order.
pub fn sort_desc(pairs: &mut [(String, f64)]) {
	pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
}

/// First `n` entries, preserving the source order.
pub fn top_n(data: &[NamedValue], n: usize) -> Vec<NamedValue> {
	data.iter().take(n).cloned().collect()
}

/// Scatter point radius derived from usage frequency, always within [5, 20].
pub fn symbol_size(usage_frequency: f64) -> f64 {
	(5.0 + usage_frequency / 5.0).clamp(5.0, 20.0)
}

fn fmt_value(value: f64) -> String {
	if value.fract() == 0.0 {
		format!("{}", value as i64)
	} else {
		format!("{value}")
	}
}

/// Axis-style tooltip: `{name}: {value}`.
pub fn bar_tooltip(name: &str, value: f64) -> String {
	format!("{name}: {}", fmt_value(value))
}

/// Item-style pie tooltip: `{series}\n{name}: {value} ({pct}%)`.
pub fn pie_tooltip(series: &str, name: &str, value: f64, total: f64) -> String {
	let pct = if total > 0.0 { value / total * 100.0 } else { 0.0 };
	format!("{series}\n{name}: {} ({pct:.2}%)", fmt_value(value))
}

/// Scatter tooltip; point identity is carried positionally by the point
/// itself rather than by field name.
pub fn scatter_tooltip(point: &ClusterPoint, series: &str) -> String {
	format!(
		"{}\nUsage: {}\nCluster: {series}",
		point.name,
		fmt_value(point.usage_frequency)
	)
}

/// Materials-per-province bar chart, sorted descending.
pub fn province_chart(data: &[(String, f64)]) -> ChartConfig {
	let mut pairs = data.to_vec();
	sort_desc(&mut pairs);
	ChartConfig::new(
		"Medicinal Materials by Province",
		ChartKind::Bar(BarChart {
			categories: pairs.iter().map(|(name, _)| name.clone()).collect(),
			values: pairs.iter().map(|(_, value)| *value).collect(),
			axis_name: "Number of Materials",
			gradient: Gradient {
				top: "#83bff6",
				bottom: "#188df0",
			},
			legend: None,
		}),
	)
}

/// Top-20 usage bar chart over the ranked usage list.
pub fn material_usage_chart(data: &[NamedValue]) -> ChartConfig {
	let limited = top_n(data, 20);
	ChartConfig::new(
		"Top 20 Medicinal Materials by Usage Frequency",
		ChartKind::Bar(BarChart {
			categories: limited.iter().map(|item| item.name.clone()).collect(),
			values: limited.iter().map(|item| item.value).collect(),
			axis_name: "Frequency",
			gradient: Gradient {
				top: "#f7a35c",
				bottom: "#e9632c",
			},
			legend: Some("Usage Frequency"),
		}),
	)
}

/// Top-10 usage donut over the ranked usage list.
pub fn material_usage_pie(data: &[NamedValue]) -> ChartConfig {
	let limited = top_n(data, 10);
	ChartConfig::new(
		"Top 10 Medicinal Materials",
		ChartKind::Pie(PieChart {
			slices: limited
				.iter()
				.map(|item| PieSlice {
					name: item.name.clone(),
					value: item.value,
				})
				.collect(),
			inner_ratio: 0.4,
			outer_ratio: 0.7,
			palette: None,
			series_name: "Usage Frequency",
		}),
	)
}

fn distribution_pie(
	title: &'static str,
	series_name: &'static str,
	palette: &'static [&'static str],
	data: &[(String, f64)],
) -> ChartConfig {
	ChartConfig::new(
		title,
		ChartKind::Pie(PieChart {
			slices: data
				.iter()
				.map(|(name, value)| PieSlice {
					name: name.clone(),
					value: *value,
				})
				.collect(),
			inner_ratio: 0.5,
			outer_ratio: 0.7,
			palette: Some(palette),
			series_name,
		}),
	)
}

/// Five-properties distribution donut.
pub fn property_chart(data: &[(String, f64)]) -> ChartConfig {
	distribution_pie(
		"Distribution of Five Properties (五性)",
		"Property",
		&["#dd6b66", "#759aa0", "#e69d87", "#8dc1a9", "#ea7e53"],
		data,
	)
}

/// Five-flavors distribution donut.
pub fn flavor_chart(data: &[(String, f64)]) -> ChartConfig {
	distribution_pie(
		"Distribution of Five Flavors (五味)",
		"Flavor",
		&["#73c0de", "#5470c6", "#91cc75", "#fac858", "#ee6666"],
		data,
	)
}

/// Meridian distribution bar chart, sorted descending.
pub fn meridian_chart(data: &[(String, f64)]) -> ChartConfig {
	let mut pairs = data.to_vec();
	sort_desc(&mut pairs);
	ChartConfig::new(
		"Distribution of Meridians (归经)",
		ChartKind::Bar(BarChart {
			categories: pairs.iter().map(|(name, _)| name.clone()).collect(),
			values: pairs.iter().map(|(_, value)| *value).collect(),
			axis_name: "Count",
			gradient: Gradient {
				top: "#91cc75",
				bottom: "#5ab34b",
			},
			legend: None,
		}),
	)
}

/// Most-used materials per efficacy category, sorted descending.
pub fn top_materials_chart(data: &[(String, f64)]) -> ChartConfig {
	let mut pairs = data.to_vec();
	sort_desc(&mut pairs);
	ChartConfig::new(
		"Top Medicinal Materials by Efficacy",
		ChartKind::Bar(BarChart {
			categories: pairs.iter().map(|(name, _)| name.clone()).collect(),
			values: pairs.iter().map(|(_, value)| *value).collect(),
			axis_name: "Count",
			gradient: Gradient {
				top: "#67e0e3",
				bottom: "#37a2da",
			},
			legend: None,
		}),
	)
}

/// Clustering scatter: one series per cluster, labeled by ordinal and the
/// cluster's dominant property/flavor descriptors.
pub fn clustering_chart(clusters: &[Cluster]) -> ChartConfig {
	ChartConfig::new(
		"Material Clustering by Properties",
		ChartKind::Scatter(ScatterChart {
			series: clusters
				.iter()
				.map(|cluster| ScatterSeries {
					name: format!(
						"Cluster {}: {}/{}",
						cluster.cluster_id + 1,
						cluster.common_properties,
						cluster.common_flavors
					),
					points: cluster.materials.clone(),
				})
				.collect(),
			x_name: "Component 1",
			y_name: "Component 2",
		}),
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn named(values: &[(&str, f64)]) -> Vec<NamedValue> {
		values
			.iter()
			.map(|(name, value)| NamedValue {
				name: (*name).to_owned(),
				value: *value,
			})
			.collect()
	}

	fn bar(config: &ChartConfig) -> &BarChart {
		match config.kind.as_ref() {
			Some(ChartKind::Bar(bar)) => bar,
			other => panic!("expected bar chart, got {other:?}"),
		}
	}

	fn assert_descending(values: &[f64]) {
		for pair in values.windows(2) {
			assert!(pair[0] >= pair[1], "not descending: {values:?}");
		}
	}

	#[test]
	fn province_chart_sorts_descending() {
		let data = vec![
			("Yunnan".to_owned(), 12.0),
			("Sichuan".to_owned(), 45.0),
			("Gansu".to_owned(), 30.0),
		];
		let config = province_chart(&data);
		let bar = bar(&config);
		assert_eq!(bar.categories, vec!["Sichuan", "Gansu", "Yunnan"]);
		assert_descending(&bar.values);
	}

	#[test]
	fn meridian_chart_sorts_descending() {
		let data = vec![
			("肝".to_owned(), 5.0),
			("肺".to_owned(), 9.0),
			("脾".to_owned(), 7.0),
		];
		let config = meridian_chart(&data);
		assert_descending(&bar(&config).values);
	}

	#[test]
	fn usage_bar_truncates_to_twenty_preserving_prefix() {
		let data: Vec<NamedValue> =
			named(&(0..50).map(|i| ("m", 100.0 - i as f64)).collect::<Vec<_>>())
				.into_iter()
				.enumerate()
				.map(|(i, mut item)| {
					item.name = format!("m{i}");
					item
				})
				.collect();
		let config = material_usage_chart(&data);
		let bar = bar(&config);
		assert_eq!(bar.values.len(), 20);
		assert_eq!(bar.categories[0], "m0");
		assert_eq!(bar.categories[19], "m19");
		assert_descending(&bar.values);
	}

	#[test]
	fn usage_pie_truncates_to_ten_preserving_prefix() {
		let data = named(
			&(0..15)
				.map(|i| ("x", 15.0 - i as f64))
				.collect::<Vec<_>>(),
		);
		let config = material_usage_pie(&data);
		match config.kind {
			Some(ChartKind::Pie(pie)) => {
				assert_eq!(pie.slices.len(), 10);
				assert_eq!(pie.slices[0].value, 15.0);
				assert_eq!(pie.slices[9].value, 6.0);
			}
			other => panic!("expected pie chart, got {other:?}"),
		}
	}

	#[test]
	fn short_inputs_are_not_padded() {
		let data = named(&[("a", 3.0), ("b", 1.0)]);
		assert_eq!(top_n(&data, 20).len(), 2);
	}

	#[test]
	fn symbol_size_stays_in_bounds_and_is_monotone() {
		assert_eq!(symbol_size(0.0), 5.0);
		assert_eq!(symbol_size(75.0), 20.0);
		assert_eq!(symbol_size(500.0), 20.0);
		assert_eq!(symbol_size(25.0), 10.0);
		let mut last = 0.0;
		for freq in 0..200 {
			let size = symbol_size(freq as f64);
			assert!(size >= last, "radius decreased at freq {freq}");
			assert!((5.0..=20.0).contains(&size));
			last = size;
		}
	}

	#[test]
	fn cluster_series_labeled_by_ordinal_and_descriptors() {
		let clusters = vec![Cluster {
			cluster_id: 0,
			common_properties: "warm".into(),
			common_flavors: "sweet".into(),
			materials: vec![ClusterPoint {
				x: 0.0,
				y: 0.0,
				usage_frequency: 10.0,
				name: "甘草".into(),
			}],
		}];
		let config = clustering_chart(&clusters);
		match config.kind {
			Some(ChartKind::Scatter(scatter)) => {
				assert_eq!(scatter.series[0].name, "Cluster 1: warm/sweet");
			}
			other => panic!("expected scatter chart, got {other:?}"),
		}
	}

	#[test]
	fn tooltips_format_like_the_charting_conventions() {
		assert_eq!(bar_tooltip("甘草", 12.0), "甘草: 12");
		assert_eq!(
			pie_tooltip("Flavor", "sweet", 25.0, 100.0),
			"Flavor\nsweet: 25 (25.00%)"
		);
		let point = ClusterPoint {
			x: 1.0,
			y: 2.0,
			usage_frequency: 8.0,
			name: "人参".into(),
		};
		assert_eq!(
			scatter_tooltip(&point, "Cluster 1: warm/sweet"),
			"人参\nUsage: 8\nCluster: Cluster 1: warm/sweet"
		);
	}

	#[test]
	fn error_chart_has_no_body() {
		let config = error_chart("Error Loading Data");
		assert!(config.error);
		assert!(config.kind.is_none());
	}
}
