//! Timeline node reference data.
//!
//! # Responsibility
//! - Define the fixed waypoints a sigil can be aligned to.
//! - Provide the running 3-node catalog while allowing callers to extend it.
//!
//! # Invariants
//! - Node ids are unique within one catalog.
//! - Catalogs are read-only once built.

use crate::model::chakra::ChakraType;
use crate::model::sigil::SigilId;
use serde::{Deserialize, Serialize};

/// Stable timeline node slug.
pub type TimelineNodeId = String;

/// Named waypoint with display position, chakra affinity and color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineNode {
    pub id: TimelineNodeId,
    pub name: String,
    /// Normalized 2D display position, `(x, y)` in `0.0..=1.0`.
    pub position: (f32, f32),
    pub chakra_affinity: ChakraType,
    /// Display color as `#RRGGBB`.
    pub color: String,
}

impl TimelineNode {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        position: (f32, f32),
        chakra_affinity: ChakraType,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
            chakra_affinity,
            color: color.into(),
        }
    }
}

/// Relation between one sigil and the single node it is aligned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigilAlignment {
    pub sigil_id: SigilId,
    pub node_id: TimelineNodeId,
}

/// Ordered, read-only set of timeline nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineCatalog {
    nodes: Vec<TimelineNode>,
}

impl TimelineCatalog {
    /// Builds a catalog, keeping the first node for any duplicated id.
    pub fn new(nodes: Vec<TimelineNode>) -> Self {
        let mut unique: Vec<TimelineNode> = Vec::with_capacity(nodes.len());
        for node in nodes {
            if unique.iter().all(|existing| existing.id != node.id) {
                unique.push(node);
            }
        }
        Self { nodes: unique }
    }

    pub fn get(&self, node_id: &str) -> Option<&TimelineNode> {
        self.nodes.iter().find(|node| node.id == node_id)
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.get(node_id).is_some()
    }

    pub fn nodes(&self) -> &[TimelineNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for TimelineCatalog {
    /// The running 3-node configuration.
    fn default() -> Self {
        Self::new(vec![
            TimelineNode::new(
                "origin",
                "Origin",
                (0.2, 0.8),
                ChakraType::Root,
                ChakraType::Root.color(),
            ),
            TimelineNode::new(
                "heart_gate",
                "Heart Gate",
                (0.5, 0.5),
                ChakraType::Heart,
                ChakraType::Heart.color(),
            ),
            TimelineNode::new(
                "crown_point",
                "Crown Point",
                (0.8, 0.2),
                ChakraType::Crown,
                ChakraType::Crown.color(),
            ),
        ])
    }
}
