use log::{debug, info};
use wasm_bindgen::prelude::*;
use web_sys::{XmlHttpRequest, XmlHttpRequestResponseType};

use super::adjacency::AdjacencyList;
use super::error::GraphError;

/// Fetch an adjacency list with a single asynchronous GET.
///
/// `on_done` runs exactly once, with the parsed list or the reason the
/// request failed. An `Err` return means the request was never sent.
pub fn load<F>(url: &str, on_done: F) -> Result<(), GraphError>
where
	F: FnOnce(Result<AdjacencyList, GraphError>) + 'static,
{
	let xhr = XmlHttpRequest::new().map_err(GraphError::request)?;
	xhr.open_with_async("GET", url, true)
		.map_err(GraphError::request)?;
	xhr.set_response_type(XmlHttpRequestResponseType::Text);

	// `loadend` fires once after success, error or abort, so the one-shot
	// closure is always consumed.
	let (xhr_done, url_done) = (xhr.clone(), url.to_owned());
	let onloadend = Closure::once_into_js(move || {
		xhr_done.set_onloadend(None);
		on_done(read_response(&xhr_done, &url_done));
	});
	xhr.set_onloadend(Some(onloadend.unchecked_ref()));

	xhr.send().map_err(GraphError::request)?;
	debug!("GET {url} sent");
	Ok(())
}

fn read_response(xhr: &XmlHttpRequest, url: &str) -> Result<AdjacencyList, GraphError> {
	let status = xhr.status().map_err(GraphError::request)?;
	check_status(url, status)?;
	let text = xhr
		.response_text()
		.map_err(GraphError::request)?
		.unwrap_or_default();
	let adj = AdjacencyList::from_json(&text)?;
	info!("loaded {} nodes from {url}", adj.len());
	Ok(adj)
}

/// Status 0 means the request never completed (network error or abort).
fn check_status(url: &str, status: u16) -> Result<(), GraphError> {
	match status {
		0 => Err(GraphError::Request(format!("network error fetching {url}"))),
		200..=299 => Ok(()),
		_ => Err(GraphError::Status {
			url: url.to_owned(),
			status,
		}),
	}
}
