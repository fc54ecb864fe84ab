use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures raised while loading, transforming or displaying a graph.
#[derive(Debug, Error)]
pub enum GraphError {
	/// The response body was not a JSON object of name -> [names].
	#[error("malformed adjacency list: {0}")]
	Parse(#[from] serde_json::Error),

	/// A neighbor name is not a key of the adjacency list.
	#[error("node `{node}` lists unknown neighbor `{neighbor}`")]
	DanglingNeighbor {
		/// Key whose list holds the unknown name.
		node: String,
		/// The unknown name.
		neighbor: String,
	},

	/// A link endpoint does not index a node.
	#[error("link {index} ({from} -> {to}) points outside {nodes} nodes")]
	LinkOutOfRange {
		/// Position of the link.
		index: usize,
		/// Its source index.
		from: usize,
		/// Its target index.
		to: usize,
		/// Number of nodes present.
		nodes: usize,
	},

	/// The server answered with a non-success status.
	#[error("GET {url} returned status {status}")]
	Status {
		/// Requested path.
		url: String,
		/// HTTP status code.
		status: u16,
	},

	/// The request could not be sent or did not complete.
	#[error("request failed: {0}")]
	Request(String),

	/// A DOM call threw.
	#[error("DOM error: {0}")]
	Dom(String),
}

impl GraphError {
	/// Wrap an exception thrown by a DOM call.
	pub fn dom(err: JsValue) -> Self {
		Self::Dom(format!("{err:?}"))
	}

	/// Wrap an exception thrown by the request API.
	pub fn request(err: JsValue) -> Self {
		Self::Request(format!("{err:?}"))
	}
}
