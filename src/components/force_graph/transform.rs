use indexmap::IndexMap;
use log::warn;

use super::adjacency::AdjacencyList;
use super::error::GraphError;
use super::types::{GraphData, GraphLink, GraphNode};

/// What to do with a neighbor name that is not a key of the adjacency list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DanglingPolicy {
	/// Drop the pair and log a warning.
	#[default]
	Skip,
	/// Fail the whole transform.
	Reject,
	/// Append an implicit node for the missing name.
	Materialize,
}

impl GraphData {
	/// One node per key (in key order), one link per (key, neighbor) pair.
	pub fn from_adjacency(adj: &AdjacencyList, policy: DanglingPolicy) -> Result<Self, GraphError> {
		let mut nodes: Vec<GraphNode> = adj.keys().map(GraphNode::named).collect();
		let mut links = Vec::new();
		let mut implicit: IndexMap<&str, usize> = IndexMap::new();

		for (source, neighbor) in adj.pairs() {
			// Keys are unique, so `position` also resolves the key's own node.
			let Some(src) = adj.position(source) else {
				continue;
			};
			let tgt = match adj.position(neighbor) {
				Some(tgt) => tgt,
				None => match policy {
					DanglingPolicy::Skip => {
						warn!("skipping link {source} -> {neighbor}: no such node");
						continue;
					}
					DanglingPolicy::Reject => {
						return Err(GraphError::DanglingNeighbor {
							node: source.to_owned(),
							neighbor: neighbor.to_owned(),
						});
					}
					DanglingPolicy::Materialize => *implicit.entry(neighbor).or_insert_with(|| {
						nodes.push(GraphNode::named(neighbor));
						nodes.len() - 1
					}),
				},
			};
			links.push(GraphLink::new(src, tgt));
		}

		Ok(Self { nodes, links })
	}
}
