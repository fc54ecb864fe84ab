use leptos::prelude::*;

use crate::components::force_graph::{AdjacencyList, DanglingPolicy, ForceGraphSvg, GraphData};

/// Path of the adjacency list served next to the app.
const GRAPH_URL: &str = "/graph.json";

/// Default Home Page: the sample graph, replaced by `/graph.json` once it loads.
#[component]
pub fn Home() -> impl IntoView {
	let initial = GraphData::from_adjacency(&AdjacencyList::sample(), DanglingPolicy::Skip)
		.unwrap_or_default();

	view! {
		<div class="graph-page">
			<div class="graph-overlay">
				<h1>"Force-Directed Graph"</h1>
				<p class="subtitle">"Loaded from " <code>{GRAPH_URL}</code> ". Drag nodes to reposition."</p>
			</div>
			<ForceGraphSvg src=GRAPH_URL initial=initial />
		</div>
	}
}
