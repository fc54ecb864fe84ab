use log::{debug, info};

use super::adjacency::AdjacencyList;
use super::error::GraphError;
use super::interaction::{Insertion, PROXIMITY, insert_near};
use super::state::{ForceLayout, LayoutConfig};
use super::transform::DanglingPolicy;
use super::types::{GraphData, Point};

/// What a pointer-down ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerAction {
	/// Background press outside interactive mode.
	None,
	/// Started dragging the node at this index.
	Drag(usize),
	/// Added a node.
	Inserted(Insertion),
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node: Option<usize>,
}

/// The logical graph plus the simulation laid out from it.
pub struct GraphSession {
	data: GraphData,
	layout: ForceLayout,
	policy: DanglingPolicy,
	drag: DragState,
	interactive: bool,
}

impl GraphSession {
	/// Empty session. `interactive` turns pointer-downs into insertions.
	pub fn new(config: LayoutConfig, interactive: bool) -> Self {
		Self {
			data: GraphData::default(),
			layout: ForceLayout::new(config),
			policy: DanglingPolicy::default(),
			drag: DragState::default(),
			interactive,
		}
	}

	/// Policy used by [`GraphSession::load`].
	pub fn with_policy(mut self, policy: DanglingPolicy) -> Self {
		self.policy = policy;
		self
	}

	/// The graph currently applied.
	pub fn data(&self) -> &GraphData {
		&self.data
	}

	/// The simulation laid out from [`GraphSession::data`].
	pub fn layout(&self) -> &ForceLayout {
		&self.layout
	}

	/// Index of the node being dragged.
	pub fn dragging(&self) -> Option<usize> {
		self.drag.node
	}

	/// Replace the graph wholesale and restart the simulation. Every data
	/// change, loaded or pointer-driven, goes through here.
	pub fn apply(&mut self, data: GraphData) -> Result<(), GraphError> {
		data.validate()?;
		self.layout.bind(&data);
		self.data = data;
		if self.drag.node.is_some_and(|i| i >= self.data.nodes.len()) {
			self.drag = DragState::default();
		}
		self.layout.start();
		info!(
			"graph applied: {} nodes, {} links",
			self.data.nodes.len(),
			self.data.links.len()
		);
		Ok(())
	}

	/// Transform `adj` and apply the result.
	pub fn load(&mut self, adj: &AdjacencyList) -> Result<(), GraphError> {
		let data = GraphData::from_adjacency(adj, self.policy)?;
		self.apply(data)
	}

	/// Add a node at `at`, linked to its close neighbors.
	pub fn insert_at(&mut self, at: Point) -> Result<Insertion, GraphError> {
		let mut next = self.data.clone();
		let inserted = insert_near(&mut next, &self.layout.positions(), at, PROXIMITY);
		self.apply(next)?;
		Ok(inserted)
	}

	/// In interactive mode every pointer-down inserts a node at `at`;
	/// otherwise a pointer-down on a node starts dragging it.
	pub fn pointer_down(&mut self, at: Point) -> Result<PointerAction, GraphError> {
		if self.interactive {
			return self.insert_at(at).map(PointerAction::Inserted);
		}
		if let Some(i) = self.layout.node_at(at) {
			debug!("drag start on node {i}");
			self.drag.node = Some(i);
			self.layout.pin(i, at);
			self.layout.resume();
			return Ok(PointerAction::Drag(i));
		}
		Ok(PointerAction::None)
	}

	/// Moves the dragged node, if any. Returns whether a drag is active.
	pub fn pointer_move(&mut self, at: Point) -> bool {
		let Some(i) = self.drag.node else {
			return false;
		};
		self.layout.pin(i, at);
		self.layout.resume();
		true
	}

	/// Ends a drag, letting the node move freely again.
	pub fn pointer_up(&mut self) {
		if let Some(i) = self.drag.node.take() {
			debug!("drag end on node {i}");
			self.layout.release(i);
		}
	}

	/// Advance the simulation; false once it has cooled down.
	pub fn tick(&mut self, dt: f32) -> bool {
		self.layout.tick(dt)
	}

	/// Live node positions, in data order.
	pub fn positions(&self) -> Vec<Point> {
		self.layout.positions()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode};

	fn seeded(points: &[(f64, f64)]) -> GraphData {
		GraphData {
			nodes: points
				.iter()
				.map(|&(x, y)| GraphNode::at(Point::new(x, y)))
				.collect(),
			links: Vec::new(),
		}
	}

	#[test]
	fn load_applies_transformed_graph() {
		let mut session = GraphSession::new(LayoutConfig::default(), false);
		session.load(&AdjacencyList::sample()).unwrap();
		assert_eq!(session.data().nodes.len(), 3);
		assert_eq!(session.data().links.len(), 4);
		assert_eq!(session.layout().node_count(), 3);
		assert!(session.layout().is_running());
	}

	#[test]
	fn load_honors_policy() {
		let adj = AdjacencyList::from_json(r#"{"a":["nope"]}"#).unwrap();
		let mut session =
			GraphSession::new(LayoutConfig::default(), false).with_policy(DanglingPolicy::Reject);
		assert!(matches!(
			session.load(&adj),
			Err(GraphError::DanglingNeighbor { .. })
		));
		assert!(session.data().nodes.is_empty());
	}

	#[test]
	fn apply_rejects_invalid_data_and_keeps_previous() {
		let mut session = GraphSession::new(LayoutConfig::default(), false);
		session.apply(GraphData::single()).unwrap();
		let bad = GraphData {
			nodes: vec![GraphNode::default()],
			links: vec![GraphLink::new(0, 5)],
		};
		assert!(session.apply(bad).is_err());
		assert_eq!(session.data(), &GraphData::single());
	}

	#[test]
	fn pointer_down_inserts_with_two_links() {
		let mut session = GraphSession::new(LayoutConfig::sandbox(), true);
		session.apply(seeded(&[(0.0, 0.0), (10.0, 0.0)])).unwrap();
		let action = session.pointer_down(Point::new(5.0, 0.0)).unwrap();

		assert_eq!(action, PointerAction::Inserted(Insertion { node: 2, links: 2 }));
		assert_eq!(session.data().nodes.len(), 3);
		assert_eq!(
			session.data().links,
			[GraphLink::new(2, 0), GraphLink::new(2, 1)]
		);
		assert_eq!(session.layout().link_count(), 2);
		assert_eq!(session.positions()[2], Point::new(5.0, 0.0));
		assert_eq!(session.dragging(), None);
	}

	#[test]
	fn pointer_down_far_away_inserts_without_links() {
		let mut session = GraphSession::new(LayoutConfig::sandbox(), true);
		session.apply(seeded(&[(0.0, 0.0)])).unwrap();
		let action = session.pointer_down(Point::new(40.0, 0.0)).unwrap();

		assert_eq!(action, PointerAction::Inserted(Insertion { node: 1, links: 0 }));
		assert_eq!(session.data().nodes.len(), 2);
		assert!(session.data().links.is_empty());
	}

	#[test]
	fn pointer_down_on_node_still_inserts_when_interactive() {
		let mut session = GraphSession::new(LayoutConfig::sandbox(), true);
		session.apply(seeded(&[(100.0, 100.0)])).unwrap();
		let action = session.pointer_down(Point::new(100.0, 100.0)).unwrap();

		assert_eq!(action, PointerAction::Inserted(Insertion { node: 1, links: 1 }));
		assert_eq!(session.data().nodes.len(), 2);
		assert_eq!(session.dragging(), None);
	}

	#[test]
	fn pointer_down_on_node_drags_when_not_interactive() {
		let mut session = GraphSession::new(LayoutConfig::default(), false);
		session.apply(seeded(&[(100.0, 100.0)])).unwrap();

		let action = session.pointer_down(Point::new(103.0, 100.0)).unwrap();
		assert_eq!(action, PointerAction::Drag(0));
		assert_eq!(session.data().nodes.len(), 1);

		assert!(session.pointer_move(Point::new(200.0, 150.0)));
		assert_eq!(session.positions()[0], Point::new(200.0, 150.0));

		session.pointer_up();
		assert_eq!(session.dragging(), None);
		assert!(!session.pointer_move(Point::new(0.0, 0.0)));
	}

	#[test]
	fn background_click_is_ignored_when_not_interactive() {
		let mut session = GraphSession::new(LayoutConfig::default(), false);
		session.apply(seeded(&[(0.0, 0.0)])).unwrap();
		let action = session.pointer_down(Point::new(400.0, 400.0)).unwrap();
		assert_eq!(action, PointerAction::None);
		assert_eq!(session.data().nodes.len(), 1);
	}

	#[test]
	fn replacing_with_smaller_graph_drops_stale_drag() {
		let mut session = GraphSession::new(LayoutConfig::default(), false);
		session.apply(seeded(&[(0.0, 0.0), (100.0, 0.0)])).unwrap();
		session.pointer_down(Point::new(100.0, 0.0)).unwrap();
		assert_eq!(session.dragging(), Some(1));

		session.apply(GraphData::single()).unwrap();
		assert_eq!(session.dragging(), None);
	}
}
