//! Interactive knowledge-graph visualization.

mod component;
mod render;
mod simulation;
mod state;
mod types;

pub use component::{KnowledgeGraphCanvas, filter_by_material, filter_by_prescription, reset_graph};
pub use types::{GraphData, GraphFilter, GraphLink, GraphNode, LinkKind, NodeKind};
