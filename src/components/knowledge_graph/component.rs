//! Leptos component wiring the knowledge-graph canvas together: one fetch,
//! then an animation loop with drag, pan, zoom, and resize handling.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use crate::api::{self, RequestSeq};
use crate::theme::ChartTheme;

use super::render;
use super::state::GraphState;
use super::types::GraphFilter;

/// Navigate to the graph view filtered to one material.
pub fn filter_by_material(id: u64) {
	navigate(&GraphFilter::Material(id).page_url());
}

/// Navigate to the graph view filtered to one prescription.
pub fn filter_by_prescription(id: u64) {
	navigate(&GraphFilter::Prescription(id).page_url());
}

/// Navigate back to the unfiltered graph view.
pub fn reset_graph() {
	navigate("/knowledge-graph");
}

fn navigate(url: &str) {
	if let Some(window) = web_sys::window() {
		if let Err(err) = window.location().set_href(url) {
			error!("navigation failed: {err:?}");
		}
	}
}

/// Placeholder shown while no graph state exists. Redraws (e.g. on resize)
/// repaint whichever of these was last current.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CanvasStatus {
	Loading,
	Empty,
	Error,
}

impl CanvasStatus {
	fn text(self) -> &'static str {
		match self {
			CanvasStatus::Loading => "Loading Knowledge Graph...",
			CanvasStatus::Empty => "No graph data available",
			CanvasStatus::Error => "Error loading knowledge graph data",
		}
	}

	fn color(self, theme: &ChartTheme) -> &'static str {
		match self {
			CanvasStatus::Loading => theme.subtext_color,
			CanvasStatus::Empty => "#ccc",
			CanvasStatus::Error => theme.error_color,
		}
	}
}

fn canvas_size(canvas: &HtmlCanvasElement, height: f64) -> (f64, f64) {
	let width = canvas
		.parent_element()
		.map(|p| p.client_width() as f64)
		.unwrap_or(1000.0);
	(width, height)
}

/// Interactive force-directed rendering of the knowledge graph.
///
/// Issues a single request (optionally filtered), shows a placeholder for an
/// empty node set, and otherwise runs the simulation until it settles.
#[component]
pub fn KnowledgeGraphCanvas(
	#[prop(default = None)] filter: Option<GraphFilter>,
	#[prop(default = 600.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<GraphState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let status: Rc<RefCell<CanvasStatus>> = Rc::new(RefCell::new(CanvasStatus::Loading));
	let seq = RequestSeq::default();
	let theme = ChartTheme::light();

	let (state_init, animate_init, resize_cb_init, status_init, seq_init, theme_init) = (
		state.clone(),
		animate.clone(),
		resize_cb.clone(),
		status.clone(),
		seq.clone(),
		theme.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().expect("no window");

		let (w, h) = canvas_size(&canvas, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Ok(Some(ctx_obj)) = canvas.get_context("2d") else {
			return;
		};
		let ctx: CanvasRenderingContext2d = match ctx_obj.dyn_into() {
			Ok(ctx) => ctx,
			Err(_) => return,
		};

		*status_init.borrow_mut() = CanvasStatus::Loading;
		render::draw_status(
			&ctx,
			w,
			h,
			CanvasStatus::Loading.text(),
			CanvasStatus::Loading.color(&theme_init),
			&theme_init,
		);

		// Resize re-measures the container, re-aims the centering force, and
		// nudges the simulation. Without a simulation it repaints whatever
		// status was last drawn.
		{
			let (state_resize, canvas_resize, status_resize, theme_resize) = (
				state_init.clone(),
				canvas.clone(),
				status_init.clone(),
				theme_init.clone(),
			);
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let (nw, nh) = canvas_size(&canvas_resize, height);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw);
				} else if let Ok(Some(obj)) = canvas_resize.get_context("2d") {
					if let Ok(ctx) = obj.dyn_into::<CanvasRenderingContext2d>() {
						let current = *status_resize.borrow();
						render::draw_status(
							&ctx,
							nw,
							nh,
							current.text(),
							current.color(&theme_resize),
							&theme_resize,
						);
					}
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let token = seq_init.begin();
		let (state_fetch, animate_fetch, status_fetch, seq_fetch, theme_fetch) = (
			state_init.clone(),
			animate_init.clone(),
			status_init.clone(),
			seq_init.clone(),
			theme_init.clone(),
		);
		spawn_local(async move {
			let result = api::fetch_knowledge_graph(filter).await;
			if !seq_fetch.is_current(token) {
				return;
			}
			match result {
				Ok(data) if data.nodes.is_empty() => {
					*status_fetch.borrow_mut() = CanvasStatus::Empty;
					render::draw_status(
						&ctx,
						w,
						h,
						CanvasStatus::Empty.text(),
						CanvasStatus::Empty.color(&theme_fetch),
						&theme_fetch,
					);
				}
				Ok(data) => {
					*state_fetch.borrow_mut() = Some(GraphState::new(&data, w, h));

					let (state_anim, animate_inner) = (state_fetch.clone(), animate_fetch.clone());
					*animate_fetch.borrow_mut() = Some(Closure::new(move || {
						if let Some(ref mut s) = *state_anim.borrow_mut() {
							s.tick();
							render::render(s, &ctx, &theme_fetch);
						}
						if let Some(ref cb) = *animate_inner.borrow() {
							if let Some(win) = web_sys::window() {
								let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
							}
						}
					}));
					if let Some(ref cb) = *animate_fetch.borrow() {
						if let Some(win) = web_sys::window() {
							let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
						}
					}
				}
				Err(err) => {
					error!("error fetching graph data: {err}");
					*status_fetch.borrow_mut() = CanvasStatus::Error;
					render::draw_status(
						&ctx,
						w,
						h,
						CanvasStatus::Error.text(),
						CanvasStatus::Error.color(&theme_fetch),
						&theme_fetch,
					);
				}
			}
		});
	});

	let pointer = move |ev: &MouseEvent| -> (f64, f64) {
		let canvas: HtmlCanvasElement = canvas_ref.get().map(Into::into).expect("canvas mounted");
		let rect = canvas.get_bounding_client_rect();
		(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		)
	};

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let (x, y) = pointer(&ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			match s.node_at_position(x, y) {
				Some(idx) => s.drag_start(idx, x, y),
				None => s.pan_start(x, y),
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let (x, y) = pointer(&ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.drag.active {
				s.drag_move(x, y);
			} else if s.pan.active {
				s.pan_move(x, y);
			} else {
				s.hover = s.node_at_position(x, y);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			if s.drag.active {
				s.drag_end();
			}
			s.pan.active = false;
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			if s.drag.active {
				s.drag_end();
			}
			s.pan.active = false;
			s.hover = None;
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = match canvas_ref.get() {
			Some(c) => c.into(),
			None => return,
		};
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.zoom_at(x, y, ev.delta_y() <= 0.0);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="knowledge-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn each_status_keeps_its_own_text_and_color() {
		let theme = ChartTheme::light();
		assert_eq!(CanvasStatus::Loading.text(), "Loading Knowledge Graph...");
		assert_eq!(CanvasStatus::Loading.color(&theme), theme.subtext_color);
		assert_eq!(CanvasStatus::Empty.text(), "No graph data available");
		assert_eq!(CanvasStatus::Empty.color(&theme), "#ccc");
		assert_eq!(CanvasStatus::Error.text(), "Error loading knowledge graph data");
		assert_eq!(CanvasStatus::Error.color(&theme), theme.error_color);
	}

	#[test]
	fn error_status_never_repaints_as_no_data() {
		// A resize with no graph state repaints the recorded status, so the
		// error placeholder must stay distinguishable from the empty one.
		let theme = ChartTheme::light();
		assert_ne!(CanvasStatus::Error.text(), CanvasStatus::Empty.text());
		assert_ne!(CanvasStatus::Error.color(&theme), CanvasStatus::Empty.color(&theme));
	}
}
