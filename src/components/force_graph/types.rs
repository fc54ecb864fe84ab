use super::error::GraphError;

/// A position on the drawing surface, in SVG user units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal offset from the left edge.
	pub x: f64,
	/// Vertical offset from the top edge.
	pub y: f64,
}

impl Point {
	/// Point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance to `other`.
	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (other.x - self.x, other.y - self.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// A vertex handed to the layout. Its live position belongs to the simulation;
/// `seed` only says where it should enter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphNode {
	/// Label shown next to the node; fixed once created.
	pub name: Option<String>,
	/// Requested entry position.
	pub seed: Option<Point>,
}

impl GraphNode {
	/// Named node with no entry position.
	pub fn named(name: impl Into<String>) -> Self {
		Self {
			name: Some(name.into()),
			seed: None,
		}
	}

	/// Unnamed node entering at `seed`.
	pub fn at(seed: Point) -> Self {
		Self {
			name: None,
			seed: Some(seed),
		}
	}
}

/// Directed pair of indices into [`GraphData::nodes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphLink {
	/// Index of the node the link starts from.
	pub source: usize,
	/// Index of the node the link points to.
	pub target: usize,
}

impl GraphLink {
	/// Link from `source` to `target`.
	pub const fn new(source: usize, target: usize) -> Self {
		Self { source, target }
	}

	/// Whether both ends are the same node.
	pub const fn is_loop(&self) -> bool {
		self.source == self.target
	}
}

/// Node and link arrays handed to the layout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	/// Vertices, addressed by position.
	pub nodes: Vec<GraphNode>,
	/// Directed links between entries of `nodes`.
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// One unnamed node and nothing else; the sandbox starting point.
	pub fn single() -> Self {
		Self {
			nodes: vec![GraphNode::default()],
			links: Vec::new(),
		}
	}

	/// Every link endpoint must index an existing node.
	pub fn validate(&self) -> Result<(), GraphError> {
		let count = self.nodes.len();
		for (index, link) in self.links.iter().enumerate() {
			if link.source >= count || link.target >= count {
				return Err(GraphError::LinkOutOfRange {
					index,
					from: link.source,
					to: link.target,
					nodes: count,
				});
			}
		}
		Ok(())
	}

	/// Name of the node at `idx`, if it exists and has one.
	pub fn name_of(&self, idx: usize) -> Option<&str> {
		self.nodes.get(idx).and_then(|n| n.name.as_deref())
	}
}
