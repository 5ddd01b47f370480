//! Chart canvas components.
//!
//! [`ChartCanvas`] owns one drawing surface behind a create/update/dispose
//! lifecycle; the fetch-driven wrappers load their data, then hand a typed
//! config to it. A superseded fetch can never write into the current chart.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use crate::api::{self, ApiError, RequestSeq};
use crate::theme::ChartTheme;

use super::config::{self, ChartConfig};
use super::render::{self, HitRegion};

/// One chart drawing surface. Replaced wholesale when the config changes.
struct ChartInstance {
	ctx: CanvasRenderingContext2d,
	width: f64,
	height: f64,
	config: ChartConfig,
	regions: Vec<HitRegion>,
	theme: ChartTheme,
}

impl ChartInstance {
	fn create(canvas: &HtmlCanvasElement, config: ChartConfig, height: f64) -> Option<Self> {
		let width = canvas
			.parent_element()
			.map(|p| p.client_width() as f64)
			.unwrap_or(600.0);
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;
		let mut instance = Self {
			ctx,
			width,
			height,
			config,
			regions: Vec::new(),
			theme: ChartTheme::light(),
		};
		instance.redraw();
		Some(instance)
	}

	fn redraw(&mut self) {
		self.regions = render::render(&self.config, &self.ctx, self.width, self.height, &self.theme);
	}

	/// Container width changed: re-measure and repaint.
	fn remeasure(&mut self, canvas: &HtmlCanvasElement) {
		self.width = canvas
			.parent_element()
			.map(|p| p.client_width() as f64)
			.unwrap_or(self.width);
		canvas.set_width(self.width as u32);
		canvas.set_height(self.height as u32);
		self.redraw();
	}

	/// Repaint and overlay a tooltip for whatever datum sits under the pointer.
	fn hover(&mut self, x: f64, y: f64) {
		self.redraw();
		if let Some(region) = self.regions.iter().rev().find(|r| r.contains(x, y)) {
			render::draw_tooltip(&self.ctx, region, x, y, &self.theme);
		}
	}
}

/// Canvas surface rendering a [`ChartConfig`].
///
/// The previous instance is dropped before each re-render; the resize
/// listener is registered once and lives with the window.
#[component]
pub fn ChartCanvas(
	#[prop(into)] config: Signal<ChartConfig>,
	#[prop(default = 400.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let instance: Rc<RefCell<Option<ChartInstance>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	let (instance_init, resize_cb_init) = (instance.clone(), resize_cb.clone());
	Effect::new(move |_| {
		let next = config.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		// Dispose the previous surface before re-rendering into a new one.
		instance_init.borrow_mut().take();
		*instance_init.borrow_mut() = ChartInstance::create(&canvas, next, height);

		if resize_cb_init.borrow().is_none() {
			let (instance_resize, canvas_resize) = (instance_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				if let Some(ref mut chart) = *instance_resize.borrow_mut() {
					chart.remeasure(&canvas_resize);
				}
			}));
			if let (Some(window), Some(ref cb)) = (web_sys::window(), resize_cb_init.borrow().as_ref())
			{
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
	});

	let instance_mm = instance.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		if let Some(ref mut chart) = *instance_mm.borrow_mut() {
			chart.hover(
				ev.client_x() as f64 - rect.left(),
				ev.client_y() as f64 - rect.top(),
			);
		}
	};

	let instance_ml = instance.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut chart) = *instance_ml.borrow_mut() {
			chart.redraw();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="stat-chart-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style="display: block;"
		/>
	}
}

/// Top-20 usage bar chart, fed by `/api/material-usage`.
#[component]
pub fn MaterialUsageChart() -> impl IntoView {
	let (chart, set_chart) = signal(config::loading_chart());
	let seq = RequestSeq::default();

	Effect::new(move |_| {
		let seq = seq.clone();
		let token = seq.begin();
		spawn_local(async move {
			let result = api::fetch_material_usage().await;
			if !seq.is_current(token) {
				return;
			}
			match result {
				Ok(data) => set_chart.set(config::material_usage_chart(&data)),
				Err(err) => {
					error!("error fetching material usage data: {err}");
					set_chart.set(config::error_chart("Error Loading Data"));
				}
			}
		});
	});

	view! { <ChartCanvas config=chart /> }
}

/// Top-10 usage donut, fed by `/api/material-usage`.
#[component]
pub fn MaterialUsagePieChart() -> impl IntoView {
	let (chart, set_chart) = signal(config::loading_chart());
	let seq = RequestSeq::default();

	Effect::new(move |_| {
		let seq = seq.clone();
		let token = seq.begin();
		spawn_local(async move {
			let result = api::fetch_material_usage().await;
			if !seq.is_current(token) {
				return;
			}
			match result {
				Ok(data) => set_chart.set(config::material_usage_pie(&data)),
				Err(err) => {
					error!("error fetching material usage data: {err}");
					set_chart.set(config::error_chart("Error Loading Data"));
				}
			}
		});
	});

	view! { <ChartCanvas config=chart /> }
}

/// Cluster scatter, fed by `/api/material-clusters`. A server-side logical
/// failure surfaces the server's message; transport failures get the generic
/// error title.
#[component]
pub fn MaterialClusteringChart() -> impl IntoView {
	let (chart, set_chart) = signal(config::loading_chart());
	let seq = RequestSeq::default();

	Effect::new(move |_| {
		let seq = seq.clone();
		let token = seq.begin();
		spawn_local(async move {
			let result = api::fetch_material_clusters().await;
			if !seq.is_current(token) {
				return;
			}
			match result {
				Ok(clusters) => set_chart.set(config::clustering_chart(&clusters)),
				Err(ApiError::Server(message)) => {
					set_chart.set(config::error_chart(format!("Error: {message}")));
				}
				Err(err) => {
					error!("error fetching clustering data: {err}");
					set_chart.set(config::error_chart("Error Loading Clustering Data"));
				}
			}
		});
	});

	view! { <ChartCanvas config=chart height=450.0 /> }
}
