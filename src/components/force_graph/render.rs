use web_sys::{Document, Element};

use super::error::GraphError;
use super::scale::category20;
use super::state::{LayoutConfig, NODE_RADIUS};
use super::types::{GraphData, Point};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const CURSOR_RADIUS: f64 = 30.0;
const LABEL_OFFSET: (f64, f64) = (-8.0, 20.0);

/// SVG elements bound by index to a [`GraphData`].
///
/// Stacking order inside the `<svg>` is fixed: links, then nodes, then
/// labels, then the cursor indicator.
pub struct SvgSurface {
	document: Document,
	svg: Element,
	links: Vec<Element>,
	nodes: Vec<Element>,
	labels: Vec<Element>,
	cursor: Option<Element>,
}

impl SvgSurface {
	pub fn new(document: Document, config: &LayoutConfig, with_cursor: bool) -> Result<Self, GraphError> {
		let svg = create(&document, "svg", "force-graph-surface")?;
		set(&svg, "width", config.width)?;
		set(&svg, "height", config.height)?;

		let cursor = if with_cursor {
			let cursor = create(&document, "circle", "cursor")?;
			set(&cursor, "r", CURSOR_RADIUS)?;
			cursor
				.set_attribute("transform", "translate(-100,-100)")
				.map_err(GraphError::dom)?;
			svg.append_child(&cursor).map_err(GraphError::dom)?;
			Some(cursor)
		} else {
			None
		};

		Ok(Self {
			document,
			svg,
			links: Vec::new(),
			nodes: Vec::new(),
			labels: Vec::new(),
			cursor,
		})
	}

	pub fn element(&self) -> &Element {
		&self.svg
	}

	/// Bind elements to `data` by position: create elements for new items,
	/// keep existing ones, remove the surplus.
	pub fn reconcile(&mut self, data: &GraphData) -> Result<(), GraphError> {
		remove_from(&mut self.links, data.links.len());
		remove_from(&mut self.nodes, data.nodes.len());
		remove_from(&mut self.labels, data.nodes.len());

		while self.links.len() < data.links.len() {
			let line = create(&self.document, "line", "link")?;
			let before = self
				.nodes
				.first()
				.or(self.labels.first())
				.or(self.cursor.as_ref())
				.cloned();
			self.insert(&line, before)?;
			self.links.push(line);
		}

		while self.nodes.len() < data.nodes.len() {
			let circle = create(&self.document, "circle", "node")?;
			set(&circle, "r", NODE_RADIUS)?;
			circle
				.set_attribute("fill", category20(self.nodes.len()))
				.map_err(GraphError::dom)?;
			let before = self.labels.first().or(self.cursor.as_ref()).cloned();
			self.insert(&circle, before)?;
			self.nodes.push(circle);
		}

		while self.labels.len() < data.nodes.len() {
			let text = create(&self.document, "text", "label")?;
			self.insert(&text, self.cursor.clone())?;
			self.labels.push(text);
		}
		for (i, label) in self.labels.iter().enumerate() {
			label.set_text_content(data.name_of(i));
		}
		Ok(())
	}

	fn insert(&self, el: &Element, before: Option<Element>) -> Result<(), GraphError> {
		self.svg
			.insert_before(el, before.as_deref())
			.map_err(GraphError::dom)?;
		Ok(())
	}

	/// Copy simulated positions onto the bound elements.
	pub fn tick(&self, data: &GraphData, positions: &[Point]) -> Result<(), GraphError> {
		for (line, link) in self.links.iter().zip(&data.links) {
			let (Some(s), Some(t)) = (positions.get(link.source), positions.get(link.target)) else {
				continue;
			};
			set(line, "x1", s.x)?;
			set(line, "y1", s.y)?;
			set(line, "x2", t.x)?;
			set(line, "y2", t.y)?;
		}
		for (circle, p) in self.nodes.iter().zip(positions) {
			set(circle, "cx", p.x)?;
			set(circle, "cy", p.y)?;
		}
		for (label, p) in self.labels.iter().zip(positions) {
			set(label, "x", p.x + LABEL_OFFSET.0)?;
			set(label, "y", p.y + LABEL_OFFSET.1)?;
		}
		Ok(())
	}

	pub fn move_cursor(&self, at: Point) -> Result<(), GraphError> {
		if let Some(cursor) = &self.cursor {
			cursor
				.set_attribute("transform", &format!("translate({},{})", at.x, at.y))
				.map_err(GraphError::dom)?;
		}
		Ok(())
	}
}

fn create(document: &Document, tag: &str, class: &str) -> Result<Element, GraphError> {
	let el = document
		.create_element_ns(Some(SVG_NS), tag)
		.map_err(GraphError::dom)?;
	el.set_attribute("class", class).map_err(GraphError::dom)?;
	Ok(el)
}

fn set(el: &Element, name: &str, value: f64) -> Result<(), GraphError> {
	el.set_attribute(name, &value.to_string())
		.map_err(GraphError::dom)
}

fn remove_from(elements: &mut Vec<Element>, len: usize) {
	if elements.len() > len {
		for el in elements.drain(len..) {
			el.remove();
		}
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use wasm_bindgen_test::*;

	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode};

	wasm_bindgen_test_configure!(run_in_browser);

	fn surface() -> SvgSurface {
		let document = web_sys::window().unwrap().document().unwrap();
		SvgSurface::new(document, &LayoutConfig::default(), true).unwrap()
	}

	fn classes(surface: &SvgSurface) -> Vec<String> {
		let mut out = Vec::new();
		let mut child = surface.element().first_element_child();
		while let Some(el) = child {
			out.push(el.get_attribute("class").unwrap_or_default());
			child = el.next_element_sibling();
		}
		out
	}

	fn graph(names: &[&str], links: &[(usize, usize)]) -> GraphData {
		GraphData {
			nodes: names.iter().map(|n| GraphNode::named(*n)).collect(),
			links: links.iter().map(|&(s, t)| GraphLink::new(s, t)).collect(),
		}
	}

	#[wasm_bindgen_test]
	fn layers_links_nodes_labels_cursor() {
		let mut surface = surface();
		assert_eq!(classes(&surface), ["cursor"]);

		surface.reconcile(&graph(&["a", "b"], &[(0, 1)])).unwrap();
		assert_eq!(
			classes(&surface),
			["link", "node", "node", "label", "label", "cursor"]
		);

		// Growth inserts each new element at its layer, not at the end.
		surface
			.reconcile(&graph(&["a", "b", "c"], &[(0, 1), (1, 2), (2, 0)]))
			.unwrap();
		assert_eq!(
			classes(&surface),
			[
				"link", "link", "link", "node", "node", "node", "label", "label", "label", "cursor"
			]
		);
	}

	#[wasm_bindgen_test]
	fn keeps_existing_elements_and_removes_surplus() {
		let mut surface = surface();
		surface.reconcile(&graph(&["a", "b"], &[(0, 1)])).unwrap();
		let first = surface.nodes[0].clone();

		surface.reconcile(&graph(&["a", "b", "c"], &[(0, 1)])).unwrap();
		assert!(surface.nodes[0].is_same_node(Some(&*first)));

		surface.reconcile(&graph(&["z"], &[])).unwrap();
		assert_eq!(classes(&surface), ["node", "label", "cursor"]);
		assert!(surface.nodes[0].is_same_node(Some(&*first)));
		assert_eq!(surface.labels[0].text_content().as_deref(), Some("z"));
	}

	#[wasm_bindgen_test]
	fn tick_writes_positions() {
		let mut surface = surface();
		let data = graph(&["a", "b"], &[(0, 1)]);
		surface.reconcile(&data).unwrap();
		surface
			.tick(&data, &[Point::new(1.0, 2.0), Point::new(30.0, 40.0)])
			.unwrap();

		let line = &surface.links[0];
		assert_eq!(line.get_attribute("x1").as_deref(), Some("1"));
		assert_eq!(line.get_attribute("y2").as_deref(), Some("40"));
		assert_eq!(surface.nodes[1].get_attribute("cx").as_deref(), Some("30"));
		assert_eq!(surface.labels[0].get_attribute("x").as_deref(), Some("-7"));
		assert_eq!(surface.labels[0].get_attribute("y").as_deref(), Some("22"));
	}
}
