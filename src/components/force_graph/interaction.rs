use log::debug;

use super::types::{GraphData, GraphLink, GraphNode, Point};

/// Pointer-inserted nodes link to every node closer than this.
pub const PROXIMITY: f64 = 30.0;

/// Result of a pointer insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insertion {
	/// Index of the new node.
	pub node: usize,
	/// Number of links created from it.
	pub links: usize,
}

/// Append a node seeded at `at` and link it to every existing node within
/// `threshold`. `positions` holds the live position of each existing node.
pub fn insert_near(
	data: &mut GraphData,
	positions: &[Point],
	at: Point,
	threshold: f64,
) -> Insertion {
	let node = data.nodes.len();
	let before = data.links.len();
	data.links.extend(
		positions
			.iter()
			.take(node)
			.enumerate()
			.filter(|(_, p)| p.distance(at) < threshold)
			.map(|(target, _)| GraphLink::new(node, target)),
	);
	data.nodes.push(GraphNode::at(at));

	let links = data.links.len() - before;
	debug!("inserted node {node} at ({}, {}) with {links} links", at.x, at.y);
	Insertion { node, links }
}

#[cfg(test)]
mod tests {
	use super::*;

	fn unnamed(count: usize) -> GraphData {
		GraphData {
			nodes: vec![GraphNode::default(); count],
			links: Vec::new(),
		}
	}

	#[test]
	fn links_to_both_close_nodes() {
		let mut data = unnamed(2);
		let positions = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
		let ins = insert_near(&mut data, &positions, Point::new(5.0, 0.0), PROXIMITY);

		assert_eq!(ins, Insertion { node: 2, links: 2 });
		assert_eq!(data.nodes.len(), 3);
		assert_eq!(data.links, [GraphLink::new(2, 0), GraphLink::new(2, 1)]);
		assert_eq!(data.nodes[2].seed, Some(Point::new(5.0, 0.0)));
		assert!(data.validate().is_ok());
	}

	#[test]
	fn far_node_is_not_linked() {
		let mut data = unnamed(1);
		let ins = insert_near(&mut data, &[Point::new(0.0, 0.0)], Point::new(40.0, 0.0), 30.0);

		assert_eq!(ins, Insertion { node: 1, links: 0 });
		assert_eq!(data.nodes.len(), 2);
		assert!(data.links.is_empty());
	}

	#[test]
	fn threshold_is_exclusive() {
		let mut data = unnamed(1);
		let ins = insert_near(&mut data, &[Point::new(0.0, 0.0)], Point::new(30.0, 0.0), 30.0);
		assert_eq!(ins.links, 0);
	}

	#[test]
	fn existing_links_are_kept() {
		let mut data = unnamed(2);
		data.links.push(GraphLink::new(0, 1));
		let positions = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
		let ins = insert_near(&mut data, &positions, Point::new(95.0, 0.0), PROXIMITY);

		assert_eq!(ins.links, 1);
		assert_eq!(data.links, [GraphLink::new(0, 1), GraphLink::new(2, 1)]);
	}

	#[test]
	fn first_node_has_nothing_to_link() {
		let mut data = GraphData::default();
		let ins = insert_near(&mut data, &[], Point::new(1.0, 1.0), PROXIMITY);
		assert_eq!(ins, Insertion { node: 0, links: 0 });
	}
}
