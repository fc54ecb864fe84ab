//! Browser entry point: mounts the app into `<body>`.

use force_graph_svg::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App)
}
