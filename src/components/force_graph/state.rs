use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::{GraphData, GraphLink, Point};

/// Drawn radius of a node circle.
pub const NODE_RADIUS: f64 = 5.0;
/// Pointer distance within which a node counts as hit.
pub const HIT_RADIUS: f64 = 12.0;

const NODE_MASS: f32 = 10.0;
const CHARGE_SCALE: f64 = 2.5;
const ALPHA_START: f64 = 0.1;
const ALPHA_DECAY: f64 = 0.99;
const ALPHA_MIN: f64 = 0.005;
const INITIAL_RADIUS: f64 = 10.0;

/// Tunables for the force layout, in d3 terms: negative charge repels.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	/// Surface width in pixels.
	pub width: f64,
	/// Surface height in pixels.
	pub height: f64,
	/// Rest length of a link.
	pub link_distance: f64,
	/// Node charge; negative repels.
	pub charge: f64,
	/// Pull toward the center, scaled by alpha.
	pub gravity: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			width: 960.0,
			height: 500.0,
			link_distance: 60.0,
			charge: -60.0,
			gravity: 0.1,
		}
	}
}

impl LayoutConfig {
	/// Tighter links for the click-to-insert playground.
	pub fn sandbox() -> Self {
		Self {
			link_distance: 30.0,
			..Self::default()
		}
	}

	/// Middle of the surface.
	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}

	fn parameters(&self) -> SimulationParameters {
		let force_charge = -self.charge * CHARGE_SCALE;
		let mass = NODE_MASS as f64;
		// Spring constant at which an isolated linked pair settles at `link_distance`.
		let force_spring = force_charge.abs() * mass * mass / self.link_distance.max(1.0).powi(3);
		SimulationParameters {
			force_charge: force_charge as f32,
			force_spring: force_spring as f32,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}
}

/// Drives a `force_graph` simulation bound, by index, to a [`GraphData`].
pub struct ForceLayout {
	config: LayoutConfig,
	graph: ForceGraph<usize, ()>,
	nodes: Vec<DefaultNodeIdx>,
	links: Vec<GraphLink>,
	alpha: f64,
}

impl ForceLayout {
	/// Empty layout using `config`.
	pub fn new(config: LayoutConfig) -> Self {
		Self {
			graph: ForceGraph::new(config.parameters()),
			config,
			nodes: Vec::new(),
			links: Vec::new(),
			alpha: 0.0,
		}
	}

	/// Tunables in use.
	pub fn config(&self) -> &LayoutConfig {
		&self.config
	}

	/// Number of bound nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of bound links, loops included.
	pub fn link_count(&self) -> usize {
		self.links.len()
	}

	/// Reconcile the simulation with `data`. Already-bound nodes keep their
	/// positions; new ones enter at their seed or on a spiral around the
	/// center. Shrinking or rewiring bound links rebuilds the simulation.
	pub fn bind(&mut self, data: &GraphData) {
		let bound = self.links.len();
		let intact = data.nodes.len() >= self.nodes.len()
			&& data.links.len() >= bound
			&& data.links[..bound] == self.links[..];
		if !intact {
			self.rebuild(data.nodes.len());
		}

		for i in self.nodes.len()..data.nodes.len() {
			let at = data.nodes[i].seed.unwrap_or_else(|| self.entry_point(i));
			self.add_node(i, at);
		}
		for &link in &data.links[self.links.len()..] {
			self.add_link(link);
		}
	}

	fn rebuild(&mut self, keep: usize) {
		let kept: Vec<Point> = self.positions().into_iter().take(keep).collect();
		self.graph = ForceGraph::new(self.config.parameters());
		self.nodes.clear();
		self.links.clear();
		for (i, at) in kept.into_iter().enumerate() {
			self.add_node(i, at);
		}
	}

	fn add_node(&mut self, i: usize, at: Point) {
		let idx = self.graph.add_node(NodeData {
			x: at.x as f32,
			y: at.y as f32,
			mass: NODE_MASS,
			is_anchor: false,
			user_data: i,
		});
		self.nodes.push(idx);
	}

	fn add_link(&mut self, link: GraphLink) {
		// Loops stay bound for rendering but get no spring.
		if !link.is_loop() {
			if let (Some(&src), Some(&tgt)) =
				(self.nodes.get(link.source), self.nodes.get(link.target))
			{
				self.graph.add_edge(src, tgt, EdgeData::default());
			}
		}
		self.links.push(link);
	}

	fn entry_point(&self, i: usize) -> Point {
		let angle = i as f64 * PI * (3.0 - 5f64.sqrt());
		let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
		let c = self.config.center();
		Point::new(c.x + radius * angle.cos(), c.y + radius * angle.sin())
	}

	/// Current position of every bound node, in data order.
	pub fn positions(&self) -> Vec<Point> {
		let mut out = vec![Point::default(); self.nodes.len()];
		self.graph.visit_nodes(|node| {
			if let Some(slot) = out.get_mut(node.data.user_data) {
				*slot = Point::new(node.x() as f64, node.y() as f64);
			}
		});
		out
	}

	/// Topmost node whose hit circle contains `at`.
	pub fn node_at(&self, at: Point) -> Option<usize> {
		self.positions()
			.iter()
			.rposition(|p| p.distance(at) < HIT_RADIUS)
	}

	/// Reheat the simulation from the starting alpha.
	pub fn start(&mut self) {
		self.alpha = ALPHA_START;
	}

	/// Reheat without cooling a simulation that is already hotter.
	pub fn resume(&mut self) {
		self.alpha = self.alpha.max(ALPHA_START);
	}

	/// Whether alpha is still above the stopping threshold.
	pub fn is_running(&self) -> bool {
		self.alpha >= ALPHA_MIN
	}

	/// Advance one step. Returns false once the layout has cooled down.
	pub fn tick(&mut self, dt: f32) -> bool {
		if !self.is_running() {
			return false;
		}
		self.graph.update(dt);

		let k = self.alpha * self.config.gravity;
		if k > 0.0 {
			let c = self.config.center();
			self.graph.visit_nodes_mut(|node| {
				if node.data.is_anchor {
					return;
				}
				node.data.x += ((c.x - node.data.x as f64) * k) as f32;
				node.data.y += ((c.y - node.data.y as f64) * k) as f32;
			});
		}

		self.alpha *= ALPHA_DECAY;
		true
	}

	/// Hold node `i` at `at` until [`ForceLayout::release`].
	pub fn pin(&mut self, i: usize, at: Point) {
		self.graph.visit_nodes_mut(|node| {
			if node.data.user_data == i {
				node.data.x = at.x as f32;
				node.data.y = at.y as f32;
				node.data.is_anchor = true;
			}
		});
	}

	/// Let a pinned node move again.
	pub fn release(&mut self, i: usize) {
		self.graph.visit_nodes_mut(|node| {
			if node.data.user_data == i {
				node.data.is_anchor = false;
			}
		});
	}
}
