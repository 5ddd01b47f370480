//! Owned view state for one knowledge-graph canvas.

use std::collections::HashMap;
use std::f64::consts::PI;

use log::warn;

use super::simulation::Simulation;
use super::types::{GraphData, LinkKind, NodeKind};

/// Per-node render payload, parallel to the simulation's node list.
#[derive(Clone, Debug)]
pub struct NodeSprite {
	/// Label drawn next to the circle.
	pub name: String,
	/// Drives fill color and radius.
	pub kind: NodeKind,
	/// Hover text.
	pub tooltip: String,
}

/// Pan/zoom applied to the whole rendered group.
#[derive(Clone, Debug)]
pub struct ViewTransform {
	/// Horizontal pan in screen units.
	pub x: f64,
	/// Vertical pan in screen units.
	pub y: f64,
	/// Scale factor, clamped to [0.1, 4].
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

/// In-progress node drag.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// Whether a node is currently being dragged.
	pub active: bool,
	/// Index of the dragged node.
	pub node: Option<usize>,
}

/// In-progress background pan.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// Whether the background is being dragged.
	pub active: bool,
	/// Pointer position when the pan started.
	pub start_x: f64,
	/// Pointer position when the pan started.
	pub start_y: f64,
	/// Transform at pan start.
	pub transform_start_x: f64,
	/// Transform at pan start.
	pub transform_start_y: f64,
}

const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 4.0;

/// Everything the graph canvas needs between animation frames.
pub struct GraphState {
	/// Layout engine owning positions for the render's duration.
	pub sim: Simulation,
	/// Render payload per node, indexed like the simulation.
	pub sprites: Vec<NodeSprite>,
	/// Resolved links as (source index, target index, kind).
	pub links: Vec<(usize, usize, LinkKind)>,
	/// Current pan/zoom.
	pub transform: ViewTransform,
	/// Node drag bookkeeping.
	pub drag: DragState,
	/// Background pan bookkeeping.
	pub pan: PanState,
	/// Hovered node index, if any.
	pub hover: Option<usize>,
	/// Surface width in CSS pixels.
	pub width: f64,
	/// Surface height in CSS pixels.
	pub height: f64,
}

impl GraphState {
	/// Build the view state from a non-empty payload. Nodes are seeded on a
	/// ring around the center so the first ticks fan them out evenly; links
	/// referencing unknown ids are dropped.
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut id_to_idx = HashMap::new();
		let mut positions = Vec::with_capacity(data.nodes.len());
		let mut sprites = Vec::with_capacity(data.nodes.len());

		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			positions.push((
				width / 2.0 + 100.0 * angle.cos(),
				height / 2.0 + 100.0 * angle.sin(),
			));
			sprites.push(NodeSprite {
				name: node.name.clone(),
				kind: node.kind,
				tooltip: node.tooltip(),
			});
			id_to_idx.insert(node.id.clone(), i);
		}

		let mut links = Vec::with_capacity(data.links.len());
		let mut sim_links = Vec::with_capacity(data.links.len());
		for link in &data.links {
			match (id_to_idx.get(&link.source), id_to_idx.get(&link.target)) {
				(Some(&src), Some(&tgt)) => {
					links.push((src, tgt, link.kind));
					sim_links.push((src, tgt));
				}
				_ => warn!(
					"dropping link with unknown endpoint: {} -> {}",
					link.source, link.target
				),
			}
		}

		Self {
			sim: Simulation::new(positions, sim_links, (width / 2.0, height / 2.0)),
			sprites,
			links,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			hover: None,
			width,
			height,
		}
	}

	/// Map a screen-space point into world space.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under a screen-space point, if any.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		for (idx, node) in self.sim.nodes().iter().enumerate() {
			let (dx, dy) = (node.x - gx, node.y - gy);
			if (dx * dx + dy * dy).sqrt() < self.sprites[idx].kind.radius() {
				found = Some(idx);
			}
		}
		found
	}

	/// Begin dragging a node: pin it and heat the simulation so neighbors
	/// keep re-settling around it.
	pub fn drag_start(&mut self, idx: usize, sx: f64, sy: f64) {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.drag.active = true;
		self.drag.node = Some(idx);
		self.sim.pin(idx, gx, gy);
		self.sim.set_alpha_target(0.3);
	}

	/// Move the dragged node's pin to follow the pointer.
	pub fn drag_move(&mut self, sx: f64, sy: f64) {
		if let Some(idx) = self.drag.node {
			let (gx, gy) = self.screen_to_graph(sx, sy);
			self.sim.pin(idx, gx, gy);
		}
	}

	/// End the drag: release the pin and let the simulation cool again.
	pub fn drag_end(&mut self) {
		if let Some(idx) = self.drag.node.take() {
			self.sim.unpin(idx);
		}
		self.drag.active = false;
		self.sim.set_alpha_target(0.0);
	}

	/// Begin panning the background.
	pub fn pan_start(&mut self, sx: f64, sy: f64) {
		self.pan.active = true;
		self.pan.start_x = sx;
		self.pan.start_y = sy;
		self.pan.transform_start_x = self.transform.x;
		self.pan.transform_start_y = self.transform.y;
	}

	/// Follow the pointer while panning.
	pub fn pan_move(&mut self, sx: f64, sy: f64) {
		self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
		self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
	}

	/// Zoom around a screen-space anchor, keeping the point under the cursor
	/// stationary. Scale stays within [0.1, 4].
	pub fn zoom_at(&mut self, sx: f64, sy: f64, zoom_in: bool) {
		let factor = if zoom_in { 1.1 } else { 0.9 };
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// The viewport width changed: re-aim the centering force and nudge the
	/// simulation to re-stabilize.
	pub fn resize(&mut self, width: f64) {
		self.width = width;
		self.sim.set_center(width / 2.0, self.height / 2.0);
		self.sim.reheat();
	}

	/// Advance the layout one frame.
	pub fn tick(&mut self) -> bool {
		self.sim.tick()
	}
}

#[cfg(test)]
mod tests {
	use super::super::types::{GraphLink, GraphNode};
	use super::*;

	fn payload() -> GraphData {
		let node = |id: &str, name: &str, kind: NodeKind| GraphNode {
			id: id.to_owned(),
			name: name.to_owned(),
			kind,
			property: None,
			flavor: None,
			meridian: None,
			efficacy: None,
		};
		GraphData {
			nodes: vec![
				node("m1", "甘草", NodeKind::Material),
				node("m2", "人参", NodeKind::Material),
				node("p1", "四君子汤", NodeKind::Prescription),
			],
			links: vec![
				GraphLink {
					source: "p1".into(),
					target: "m1".into(),
					kind: LinkKind::Contains,
				},
				GraphLink {
					source: "p1".into(),
					target: "m2".into(),
					kind: LinkKind::Contains,
				},
				GraphLink {
					source: "p1".into(),
					target: "ghost".into(),
					kind: LinkKind::Other,
				},
			],
		}
	}

	#[test]
	fn node_and_link_counts_match_payload_minus_dangling() {
		let state = GraphState::new(&payload(), 1000.0, 600.0);
		assert_eq!(state.sim.len(), 3);
		assert_eq!(state.sprites.len(), 3);
		// The "ghost" link has no endpoint and is dropped.
		assert_eq!(state.links.len(), 2);
	}

	#[test]
	fn drag_pins_then_releases() {
		let mut state = GraphState::new(&payload(), 1000.0, 600.0);
		state.drag_start(0, 200.0, 150.0);
		assert!(state.drag.active);
		assert_eq!(state.sim.nodes()[0].fx, Some(200.0));
		assert!(state.sim.alpha() <= 1.0);

		state.drag_move(240.0, 180.0);
		assert_eq!(state.sim.nodes()[0].fx, Some(240.0));

		state.drag_end();
		assert!(!state.drag.active);
		assert_eq!(state.sim.nodes()[0].fx, None);
	}

	#[test]
	fn zoom_is_clamped_to_bounds() {
		let mut state = GraphState::new(&payload(), 1000.0, 600.0);
		for _ in 0..100 {
			state.zoom_at(500.0, 300.0, true);
		}
		assert!(state.transform.k <= 4.0);
		for _ in 0..200 {
			state.zoom_at(500.0, 300.0, false);
		}
		assert!(state.transform.k >= 0.1);
	}

	#[test]
	fn screen_to_graph_round_trips_under_pan_and_zoom() {
		let mut state = GraphState::new(&payload(), 1000.0, 600.0);
		state.pan_start(0.0, 0.0);
		state.pan_move(50.0, -30.0);
		state.zoom_at(100.0, 100.0, true);
		let (gx, gy) = state.screen_to_graph(320.0, 240.0);
		let sx = gx * state.transform.k + state.transform.x;
		let sy = gy * state.transform.k + state.transform.y;
		assert!((sx - 320.0).abs() < 1e-9);
		assert!((sy - 240.0).abs() < 1e-9);
	}

	#[test]
	fn resize_recenters_and_reheats() {
		let mut state = GraphState::new(&payload(), 1000.0, 600.0);
		while state.tick() {}
		assert!(state.sim.settled());
		state.resize(1400.0);
		assert_eq!(state.width, 1400.0);
		assert!(!state.sim.settled());
	}

	#[test]
	fn hit_testing_respects_node_radius() {
		let mut state = GraphState::new(&payload(), 1000.0, 600.0);
		while state.tick() {}
		let node = &state.sim.nodes()[2];
		let (x, y) = (node.x, node.y);
		assert_eq!(state.node_at_position(x, y), Some(2));
		assert_eq!(state.node_at_position(x + 500.0, y + 500.0), None);
	}
}
