//! Force-directed layout for the graph view.
//!
//! Four combined forces: link attraction toward a fixed distance, pairwise
//! repulsion, centering on the viewport midpoint, and collision avoidance.
//! The simulation cools through an `alpha` scalar and stops moving once it
//! drops below `ALPHA_MIN`; interactions raise `alpha_target` to re-heat it.

/// Target length of every link, in world units.
pub const LINK_DISTANCE: f64 = 100.0;
/// Repulsion strength; negative pushes nodes apart.
pub const CHARGE_STRENGTH: f64 = -300.0;
/// Per-node collision radius. Two nodes collide when closer than twice this.
pub const COLLISION_RADIUS: f64 = 60.0;

const ALPHA_MIN: f64 = 0.001;
// 1 - ALPHA_MIN^(1/300): cools to ALPHA_MIN in roughly 300 ticks.
const ALPHA_DECAY: f64 = 0.022_799_280_4;
// Fraction of velocity retained each tick.
const VELOCITY_DECAY: f64 = 0.6;

/// A simulated node. Position and velocity are owned by the simulation for
/// the duration of rendering; `fx`/`fy` pin the node while set.
#[derive(Clone, Debug, Default)]
pub struct SimNode {
	/// Current x position.
	pub x: f64,
	/// Current y position.
	pub y: f64,
	/// Velocity along x.
	pub vx: f64,
	/// Velocity along y.
	pub vy: f64,
	/// Pinned x position, set while the node is dragged.
	pub fx: Option<f64>,
	/// Pinned y position, set while the node is dragged.
	pub fy: Option<f64>,
}

/// The layout engine driving node positions.
pub struct Simulation {
	nodes: Vec<SimNode>,
	links: Vec<(usize, usize)>,
	center: (f64, f64),
	alpha: f64,
	alpha_target: f64,
}

impl Simulation {
	/// Build a simulation from seed positions and index pairs for the links.
	pub fn new(positions: Vec<(f64, f64)>, links: Vec<(usize, usize)>, center: (f64, f64)) -> Self {
		let nodes = positions
			.into_iter()
			.map(|(x, y)| SimNode {
				x,
				y,
				..SimNode::default()
			})
			.collect();
		Self {
			nodes,
			links,
			center,
			alpha: 1.0,
			alpha_target: 0.0,
		}
	}

	/// Read access to the node positions.
	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	/// Number of simulated nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether the simulation holds no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Current heat.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Hold the simulation at `target` heat; 0.3 during a drag, 0 afterwards.
	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	/// Nudge a cooled simulation so it re-stabilizes, e.g. after a resize.
	pub fn reheat(&mut self) {
		self.alpha = self.alpha.max(0.3);
	}

	/// Move the centering force's target point.
	pub fn set_center(&mut self, cx: f64, cy: f64) {
		self.center = (cx, cy);
	}

	/// Pin a node to a position. It stops responding to forces until unpinned.
	pub fn pin(&mut self, idx: usize, x: f64, y: f64) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.fx = Some(x);
			node.fy = Some(y);
			node.x = x;
			node.y = y;
			node.vx = 0.0;
			node.vy = 0.0;
		}
	}

	/// Release a pinned node back to the forces.
	pub fn unpin(&mut self, idx: usize) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.fx = None;
			node.fy = None;
		}
	}

	/// Whether the simulation has cooled below the minimum heat.
	pub fn settled(&self) -> bool {
		self.alpha < ALPHA_MIN && self.alpha_target < ALPHA_MIN
	}

	/// Advance one step. Returns false once settled, at which point positions
	/// no longer change.
	pub fn tick(&mut self) -> bool {
		if self.settled() || self.nodes.is_empty() {
			return false;
		}
		self.alpha += (self.alpha_target - self.alpha) * ALPHA_DECAY;

		self.apply_links();
		self.apply_charge();
		self.apply_collision();
		self.apply_center();

		for node in &mut self.nodes {
			match (node.fx, node.fy) {
				(Some(fx), Some(fy)) => {
					node.x = fx;
					node.y = fy;
					node.vx = 0.0;
					node.vy = 0.0;
				}
				_ => {
					node.vx *= VELOCITY_DECAY;
					node.vy *= VELOCITY_DECAY;
					node.x += node.vx;
					node.y += node.vy;
				}
			}
		}
		true
	}

	fn apply_links(&mut self) {
		for &(src, tgt) in &self.links {
			let (dx, dy) = {
				let s = &self.nodes[src];
				let t = &self.nodes[tgt];
				(t.x - s.x, t.y - s.y)
			};
			let dist = (dx * dx + dy * dy).sqrt().max(1e-6);
			let k = (dist - LINK_DISTANCE) / dist * self.alpha * 0.5;
			let (fx, fy) = (dx * k, dy * k);
			self.nodes[tgt].vx -= fx;
			self.nodes[tgt].vy -= fy;
			self.nodes[src].vx += fx;
			self.nodes[src].vy += fy;
		}
	}

	// Quadratic pass; fine at the node counts the graph endpoint returns.
	fn apply_charge(&mut self) {
		for i in 0..self.nodes.len() {
			for j in (i + 1)..self.nodes.len() {
				let dx = self.nodes[j].x - self.nodes[i].x;
				let dy = self.nodes[j].y - self.nodes[i].y;
				let d2 = (dx * dx + dy * dy).max(1.0);
				let w = CHARGE_STRENGTH * self.alpha / d2;
				self.nodes[j].vx += dx * w;
				self.nodes[j].vy += dy * w;
				self.nodes[i].vx -= dx * w;
				self.nodes[i].vy -= dy * w;
			}
		}
	}

	fn apply_collision(&mut self) {
		let min_dist = COLLISION_RADIUS * 2.0;
		for i in 0..self.nodes.len() {
			for j in (i + 1)..self.nodes.len() {
				let mut dx = self.nodes[j].x - self.nodes[i].x;
				let mut dy = self.nodes[j].y - self.nodes[i].y;
				let mut dist = (dx * dx + dy * dy).sqrt();
				if dist >= min_dist {
					continue;
				}
				if dist < 1e-6 {
					// Coincident nodes get a deterministic nudge apart.
					dx = 1e-3 * (i as f64 + 1.0);
					dy = 1e-3;
					dist = (dx * dx + dy * dy).sqrt();
				}
				let push = (min_dist - dist) / dist * 0.5;
				self.nodes[j].x += dx * push;
				self.nodes[j].y += dy * push;
				self.nodes[i].x -= dx * push;
				self.nodes[i].y -= dy * push;
			}
		}
	}

	// Translates the whole layout so its centroid sits on the center point.
	fn apply_center(&mut self) {
		let n = self.nodes.len() as f64;
		let (sx, sy) = self
			.nodes
			.iter()
			.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
		let (shift_x, shift_y) = (sx / n - self.center.0, sy / n - self.center.1);
		for node in &mut self.nodes {
			node.x -= shift_x;
			node.y -= shift_y;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn two_linked(dist: f64) -> Simulation {
		Simulation::new(
			vec![(0.0, 0.0), (dist, 0.0)],
			vec![(0, 1)],
			(dist / 2.0, 0.0),
		)
	}

	fn gap(sim: &Simulation, a: usize, b: usize) -> f64 {
		let (na, nb) = (&sim.nodes()[a], &sim.nodes()[b]);
		((nb.x - na.x).powi(2) + (nb.y - na.y).powi(2)).sqrt()
	}

	#[test]
	fn linked_nodes_pull_toward_link_distance() {
		let mut sim = two_linked(400.0);
		for _ in 0..300 {
			sim.tick();
		}
		let d = gap(&sim, 0, 1);
		assert!(d < 400.0, "expected attraction, still at {d}");
	}

	#[test]
	fn unlinked_nodes_repel() {
		let mut sim = Simulation::new(
			vec![(140.0, 0.0), (160.0, 0.0)],
			vec![],
			(150.0, 0.0),
		);
		let before = gap(&sim, 0, 1);
		for _ in 0..50 {
			sim.tick();
		}
		assert!(gap(&sim, 0, 1) > before);
	}

	#[test]
	fn collision_separates_overlapping_nodes() {
		let mut sim = Simulation::new(
			vec![(0.0, 0.0), (30.0, 0.0), (500.0, 500.0)],
			vec![],
			(200.0, 200.0),
		);
		for _ in 0..200 {
			sim.tick();
		}
		assert!(gap(&sim, 0, 1) > 30.0);
	}

	#[test]
	fn centroid_converges_on_the_center() {
		let mut sim = Simulation::new(
			vec![(0.0, 0.0), (50.0, 10.0), (10.0, 80.0)],
			vec![(0, 1), (1, 2)],
			(300.0, 200.0),
		);
		for _ in 0..400 {
			sim.tick();
		}
		let n = sim.len() as f64;
		let (cx, cy) = sim
			.nodes()
			.iter()
			.fold((0.0, 0.0), |(x, y), node| (x + node.x / n, y + node.y / n));
		assert!((cx - 300.0).abs() < 1.0, "centroid x at {cx}");
		assert!((cy - 200.0).abs() < 1.0, "centroid y at {cy}");
	}

	#[test]
	fn pinned_node_ignores_forces_until_released() {
		let mut sim = two_linked(400.0);
		sim.pin(0, -50.0, -50.0);
		for _ in 0..100 {
			sim.tick();
		}
		assert_eq!(sim.nodes()[0].x, -50.0);
		assert_eq!(sim.nodes()[0].y, -50.0);

		sim.unpin(0);
		sim.set_alpha_target(0.3);
		for _ in 0..100 {
			sim.tick();
		}
		assert!(sim.nodes()[0].x != -50.0 || sim.nodes()[0].y != -50.0);
	}

	#[test]
	fn cools_to_a_stop_without_interaction() {
		let mut sim = two_linked(120.0);
		let mut ticks = 0;
		while sim.tick() {
			ticks += 1;
			assert!(ticks < 1000, "never settled");
		}
		assert!(sim.settled());
		assert!(!sim.tick());
	}

	#[test]
	fn alpha_target_keeps_the_simulation_hot() {
		let mut sim = two_linked(120.0);
		sim.set_alpha_target(0.3);
		for _ in 0..1000 {
			sim.tick();
		}
		assert!(sim.alpha() > 0.29);
		sim.set_alpha_target(0.0);
		for _ in 0..1000 {
			sim.tick();
		}
		assert!(sim.settled());
	}

	#[test]
	fn empty_simulation_never_starts() {
		let mut sim = Simulation::new(vec![], vec![], (0.0, 0.0));
		assert!(sim.is_empty());
		assert!(!sim.tick());
	}
}
