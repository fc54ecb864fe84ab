use leptos::prelude::*;

use crate::components::force_graph::{ForceGraphSvg, GraphData, LayoutConfig, PROXIMITY};

/// Click-to-insert playground starting from a single node.
#[component]
pub fn Sandbox() -> impl IntoView {
	view! {
		<div class="graph-page">
			<div class="graph-overlay">
				<h1>"Sandbox"</h1>
				<p class="subtitle">
					{format!(
						"Click to add a node. It links to every node within {PROXIMITY} px.",
					)}
				</p>
			</div>
			<ForceGraphSvg initial=GraphData::single() config=LayoutConfig::sandbox() interactive=true />
		</div>
	}
}
