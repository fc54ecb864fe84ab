use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::{debug, error, info};
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent};

use super::error::GraphError;
use super::loader;
use super::render::SvgSurface;
use super::session::{GraphSession, PointerAction};
use super::state::LayoutConfig;
use super::types::{GraphData, Point};

const TICK_DT: f32 = 0.016;

type Shared<T> = Rc<RefCell<Option<T>>>;

struct GraphView {
	session: GraphSession,
	surface: SvgSurface,
}

impl GraphView {
	fn mount(
		container: &Element,
		config: &LayoutConfig,
		initial: &GraphData,
		interactive: bool,
	) -> Result<Self, GraphError> {
		let document = container
			.owner_document()
			.ok_or_else(|| GraphError::Dom("graph container has no document".into()))?;
		let surface = SvgSurface::new(document, config, interactive)?;
		container
			.append_child(surface.element())
			.map_err(GraphError::dom)?;

		let mut session = GraphSession::new(config.clone(), interactive);
		session.apply(initial.clone())?;
		let mut view = Self { session, surface };
		view.redraw()?;
		Ok(view)
	}

	/// Reconcile elements with the current data and paint current positions.
	fn redraw(&mut self) -> Result<(), GraphError> {
		self.surface.reconcile(self.session.data())?;
		self.paint()
	}

	fn paint(&self) -> Result<(), GraphError> {
		self.surface
			.tick(self.session.data(), &self.session.positions())
	}
}

fn pointer(ev: &MouseEvent, el: &Element) -> Point {
	let rect = el.get_bounding_client_rect();
	Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Force-directed graph drawn into an SVG surface.
///
/// Starts from `initial`, then replaces it with the adjacency list fetched
/// from `src` when one is given. With `interactive`, clicking the background
/// adds a node linked to its close neighbors and a cursor circle follows the
/// pointer; otherwise nodes can be dragged.
#[component]
pub fn ForceGraphSvg(
	/// Adjacency list to fetch once mounted.
	#[prop(optional, into)]
	src: Option<String>,
	/// Graph shown until `src` has loaded.
	#[prop(optional)]
	initial: GraphData,
	/// Surface size and force tunables.
	#[prop(optional)]
	config: LayoutConfig,
	/// Click to insert nodes instead of dragging them.
	#[prop(default = false)]
	interactive: bool,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let view_state: Shared<GraphView> = Rc::new(RefCell::new(None));
	let animate: Shared<Closure<dyn FnMut()>> = Rc::new(RefCell::new(None));
	let (status, set_status) = signal(None::<String>);
	let style = format!("width: {}px; height: {}px;", config.width, config.height);
	let unmounted = Arc::new(AtomicBool::new(false));
	let (view_init, animate_init, unmounted_init) =
		(view_state.clone(), animate.clone(), unmounted.clone());

	// The frame loop owns itself; this flag is how it learns to stop.
	on_cleanup(move || unmounted.store(true, Ordering::Relaxed));

	Effect::new(move |_| {
		let Some(container) = container_ref.get() else {
			return;
		};
		if view_init.borrow().is_some() {
			return;
		}

		match GraphView::mount(&container, &config, &initial, interactive) {
			Ok(view) => *view_init.borrow_mut() = Some(view),
			Err(e) => {
				error!("failed to mount graph: {e}");
				set_status.set(Some(e.to_string()));
				return;
			}
		}
		if let Some(url) = src.clone() {
			fetch_into(url, view_init.clone(), set_status, unmounted_init.clone());
		}
		start_animation(view_init.clone(), animate_init.clone(), unmounted_init.clone());
	});

	let view_md = view_state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some(ref mut v) = *view_md.borrow_mut() {
			let at = pointer(&ev, v.surface.element());
			match v.session.pointer_down(at) {
				Ok(PointerAction::Inserted(ins)) => {
					debug!("pointer insert: node {} with {} links", ins.node, ins.links);
					if let Err(e) = v.redraw() {
						error!("redraw after insert failed: {e}");
					}
				}
				Ok(_) => {}
				Err(e) => error!("pointer insert failed: {e}"),
			}
		}
	};

	let view_mm = view_state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some(ref mut v) = *view_mm.borrow_mut() {
			let at = pointer(&ev, v.surface.element());
			if v.session.pointer_move(at) {
				if let Err(e) = v.paint() {
					error!("drag repaint failed: {e}");
				}
			}
			if interactive {
				if let Err(e) = v.surface.move_cursor(at) {
					error!("cursor update failed: {e}");
				}
			}
		}
	};

	let view_mu = view_state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut v) = *view_mu.borrow_mut() {
			v.session.pointer_up();
		}
	};

	let view_ml = view_state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut v) = *view_ml.borrow_mut() {
			v.session.pointer_up();
		}
	};

	view! {
		<div
			node_ref=container_ref
			class="force-graph"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style=style
		/>
		{move || status.get().map(|msg| view! { <p class="graph-status">{msg}</p> })}
	}
}

/// Fetch `url` and, on success, replace the displayed graph with it. Failures
/// leave the current graph in place and show a status line.
fn fetch_into(
	url: String,
	view: Shared<GraphView>,
	set_status: WriteSignal<Option<String>>,
	unmounted: Arc<AtomicBool>,
) {
	set_status.set(Some(format!("Loading {url}")));
	let target = url.clone();
	let sent = loader::load(&url, move |loaded| {
		if unmounted.load(Ordering::Relaxed) || view.borrow().is_none() {
			debug!("dropping response for {target}: graph unmounted");
			return;
		}
		let applied = loaded.and_then(|adj| match view.borrow_mut().as_mut() {
			Some(v) => {
				v.session.load(&adj)?;
				v.redraw()
			}
			None => Ok(()),
		});
		match applied {
			Ok(()) => {
				info!("displaying graph from {target}");
				set_status.set(None);
			}
			Err(e) => {
				error!("failed to load {target}: {e}");
				set_status.set(Some(format!("Could not load {target}: {e}")));
			}
		}
	});
	if let Err(e) = sent {
		error!("failed to request {url}: {e}");
		set_status.set(Some(format!("Could not load {url}: {e}")));
	}
}

fn start_animation(
	view: Shared<GraphView>,
	animate: Shared<Closure<dyn FnMut()>>,
	unmounted: Arc<AtomicBool>,
) {
	let animate_inner = animate.clone();
	*animate.borrow_mut() = Some(Closure::new(move || {
		if unmounted.load(Ordering::Relaxed) {
			debug!("graph unmounted, stopping frame loop");
			view.borrow_mut().take();
			// Breaks the self-reference; the closure is freed once it returns.
			let _ = animate_inner.borrow_mut().take();
			return;
		}
		if let Some(ref mut v) = *view.borrow_mut() {
			if v.session.tick(TICK_DT) {
				if let Err(e) = v.paint() {
					error!("tick repaint failed: {e}");
				}
			}
		}
		request_frame(&animate_inner);
	}));
	request_frame(&animate);
}

fn request_frame(cb: &Shared<Closure<dyn FnMut()>>) {
	let Some(window) = web_sys::window() else {
		return;
	};
	if let Some(ref cb) = *cb.borrow() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}
