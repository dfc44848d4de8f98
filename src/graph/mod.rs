//! Association graph for the visualization view
//!
//! This module derives a renderable graph from a set of enterprises:
//! - a center node labelled with the category
//! - subcategory nodes on a fixed-radius circle around it
//! - enterprise nodes at the mean of their subcategories, plus jitter
//!
//! Layout is deterministic except for the jitter, which comes from an
//! injected `JitterSource`.

pub mod builder;
pub mod layout;
pub mod types;

pub use builder::{build_graph, AssociationGraph};
pub use layout::{JitterSource, LayoutConfig, NoJitter, RngJitter, DEFAULT_JITTER, DEFAULT_RADIUS};
pub use types::{EdgeId, GraphEdge, GraphNode, NodeId, NodeKind, Position};
