//! Node, edge and position types of the association graph

use crate::model::EnterpriseId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a graph node ("center", "subcategory-3", "enterprise-7")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn center() -> Self {
        NodeId("center".to_string())
    }

    pub fn subcategory(index: usize) -> Self {
        NodeId(format!("subcategory-{}", index))
    }

    /// `index` is the enterprise's position in the input collection
    pub fn enterprise(index: usize) -> Self {
        NodeId(format!("enterprise-{}", index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a graph edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    pub fn from_center(subcategory_index: usize) -> Self {
        EdgeId(format!("edge-center-{}", subcategory_index))
    }

    pub fn to_enterprise(enterprise_index: usize, link_index: usize) -> Self {
        EdgeId(format!("edge-{}-{}", enterprise_index, link_index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point in layout space (arbitrary distance units, origin at the center node)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    pub fn origin() -> Self {
        Position::default()
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Center,
    Subcategory,
    Enterprise,
}

/// A labelled, positioned node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    pub label: String,
    pub kind: NodeKind,
    /// Set on enterprise nodes so a click can open the detail view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enterprise_id: Option<EnterpriseId>,
    pub position: Position,
}

/// An undirected link, stored parent -> child
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
}
