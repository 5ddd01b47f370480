//! Statistics dashboard.

use leptos::prelude::*;

use crate::components::charts::{
	ChartCanvas, MaterialClusteringChart, MaterialUsageChart, MaterialUsagePieChart, flavor_chart,
	meridian_chart, property_chart, province_chart, top_materials_chart,
};

fn pairs(data: &[(&str, f64)]) -> Vec<(String, f64)> {
	data.iter().map(|(name, value)| ((*name).to_owned(), *value)).collect()
}

/// Distributions rendered into the page by the server. Until that wiring
/// lands, these mirror the shape of the real aggregates.
fn province_distribution() -> Vec<(String, f64)> {
	pairs(&[
		("四川", 126.0),
		("云南", 104.0),
		("广东", 87.0),
		("甘肃", 76.0),
		("河南", 68.0),
		("安徽", 54.0),
		("浙江", 49.0),
		("吉林", 31.0),
	])
}

fn property_distribution() -> Vec<(String, f64)> {
	pairs(&[("寒", 142.0), ("热", 38.0), ("温", 176.0), ("凉", 64.0), ("平", 120.0)])
}

fn flavor_distribution() -> Vec<(String, f64)> {
	pairs(&[("酸", 42.0), ("苦", 188.0), ("甘", 210.0), ("辛", 154.0), ("咸", 36.0)])
}

fn meridian_distribution() -> Vec<(String, f64)> {
	pairs(&[
		("肝", 168.0),
		("肺", 142.0),
		("脾", 130.0),
		("胃", 118.0),
		("肾", 96.0),
		("心", 88.0),
		("大肠", 54.0),
		("膀胱", 32.0),
	])
}

fn top_materials() -> Vec<(String, f64)> {
	pairs(&[
		("甘草", 118.0),
		("当归", 92.0),
		("人参", 85.0),
		("白术", 74.0),
		("茯苓", 71.0),
		("黄芪", 63.0),
		("陈皮", 55.0),
		("白芍", 52.0),
		("川芎", 48.0),
		("生姜", 44.0),
	])
}

/// Dashboard of the six statistical charts plus the clustering scatter.
#[component]
pub fn Home() -> impl IntoView {
	let province = Signal::derive(move || province_chart(&province_distribution()));
	let property = Signal::derive(move || property_chart(&property_distribution()));
	let flavor = Signal::derive(move || flavor_chart(&flavor_distribution()));
	let meridian = Signal::derive(move || meridian_chart(&meridian_distribution()));
	let top = Signal::derive(move || top_materials_chart(&top_materials()));

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="dashboard">
				<div class="chart-row">
					<div class="chart-cell">
						<ChartCanvas config=province />
					</div>
					<div class="chart-cell">
						<ChartCanvas config=top />
					</div>
				</div>
				<div class="chart-row">
					<div class="chart-cell">
						<ChartCanvas config=property />
					</div>
					<div class="chart-cell">
						<ChartCanvas config=flavor />
					</div>
				</div>
				<div class="chart-row">
					<div class="chart-cell">
						<ChartCanvas config=meridian />
					</div>
					<div class="chart-cell">
						<MaterialUsageChart />
					</div>
				</div>
				<div class="chart-row">
					<div class="chart-cell">
						<MaterialUsagePieChart />
					</div>
					<div class="chart-cell">
						<MaterialClusteringChart />
					</div>
				</div>
			</div>
		</ErrorBoundary>
	}
}
