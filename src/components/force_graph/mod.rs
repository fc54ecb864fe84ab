//! Force-directed graph: adjacency data, layout, SVG rendering and the
//! Leptos component that ties them together.

mod adjacency;
mod component;
mod error;
mod interaction;
mod loader;
mod render;
pub mod scale;
mod session;
mod state;
mod transform;
mod types;

pub use adjacency::AdjacencyList;
pub use component::ForceGraphSvg;
pub use error::GraphError;
pub use interaction::{Insertion, PROXIMITY, insert_near};
pub use session::{GraphSession, PointerAction};
pub use state::{ForceLayout, LayoutConfig};
pub use transform::DanglingPolicy;
pub use types::{GraphData, GraphLink, GraphNode, Point};
