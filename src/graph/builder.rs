//! Association graph construction
//!
//! Shape: one center node, one node per distinct subcategory on a circle
//! around it, and one node per enterprise placed near the mean of the
//! subcategories it belongs to. The result is a depth-2 tree plus fan-in
//! edges from several subcategories to the same enterprise.

use super::layout::{JitterSource, LayoutConfig};
use super::types::{EdgeId, GraphEdge, GraphNode, NodeId, NodeKind, Position};
use crate::model::Enterprise;
use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

/// Renderable center/subcategory/enterprise graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssociationGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl AssociationGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn center(&self) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.kind == NodeKind::Center)
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    /// Subcategory labels an enterprise node hangs off, in layout order
    pub fn parents_of(&self, id: &NodeId) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| &e.target == id)
            .filter_map(|e| self.node(&e.source))
            .map(|n| n.label.as_str())
            .collect()
    }
}

/// Build the association graph for `enterprises` around `center_label`.
///
/// Subcategory order is first-seen order over the input (enterprise order,
/// then tag order), and subcategory `i` of `n` sits at angle `2*PI*i/n`.
/// Blank tags are ignored, and an enterprise with no usable tag produces
/// neither a node nor an edge, so an empty or all-untagged input leaves a
/// lone center.
pub fn build_graph(
    enterprises: &[Enterprise],
    center_label: &str,
    layout: &LayoutConfig,
    jitter: &mut dyn JitterSource,
) -> AssociationGraph {
    let labels: IndexSet<&str> = enterprises
        .iter()
        .flat_map(|e| e.subcategories.iter())
        .map(String::as_str)
        .filter(|s| !s.trim().is_empty())
        .collect();

    let mut nodes = Vec::with_capacity(1 + labels.len() + enterprises.len());
    let mut edges = Vec::with_capacity(labels.len());

    nodes.push(GraphNode {
        id: NodeId::center(),
        label: center_label.to_string(),
        kind: NodeKind::Center,
        enterprise_id: None,
        position: Position::origin(),
    });

    let count = labels.len() as f64;
    let subcategory_positions: Vec<Position> = (0..labels.len())
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / count;
            Position::new(layout.radius * angle.cos(), layout.radius * angle.sin())
        })
        .collect();

    for (i, label) in labels.iter().enumerate() {
        nodes.push(GraphNode {
            id: NodeId::subcategory(i),
            label: label.to_string(),
            kind: NodeKind::Subcategory,
            enterprise_id: None,
            position: subcategory_positions[i],
        });
        edges.push(GraphEdge {
            id: EdgeId::from_center(i),
            source: NodeId::center(),
            target: NodeId::subcategory(i),
        });
    }

    let mut skipped = 0usize;
    for (index, enterprise) in enterprises.iter().enumerate() {
        let tags: FxHashSet<&str> = enterprise.subcategories.iter().map(String::as_str).collect();
        let matched: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, label)| tags.contains(*label))
            .map(|(i, _)| i)
            .collect();

        if matched.is_empty() {
            skipped += 1;
            continue;
        }

        let n = matched.len() as f64;
        let (sum_x, sum_y) = matched.iter().fold((0.0, 0.0), |(x, y), &i| {
            (x + subcategory_positions[i].x, y + subcategory_positions[i].y)
        });
        let position = Position::new(
            sum_x / n + jitter.offset(layout.jitter),
            sum_y / n + jitter.offset(layout.jitter),
        );

        let node_id = NodeId::enterprise(index);
        nodes.push(GraphNode {
            id: node_id.clone(),
            label: enterprise.name.clone(),
            kind: NodeKind::Enterprise,
            enterprise_id: Some(enterprise.id.clone()),
            position,
        });
        for (link, &i) in matched.iter().enumerate() {
            edges.push(GraphEdge {
                id: EdgeId::to_enterprise(index, link),
                source: NodeId::subcategory(i),
                target: node_id.clone(),
            });
        }
    }

    debug!(
        "Built association graph for {}: {} subcategories, {} nodes, {} edges, {} enterprises skipped",
        center_label,
        labels.len(),
        nodes.len(),
        edges.len(),
        skipped
    );

    AssociationGraph { nodes, edges }
}
