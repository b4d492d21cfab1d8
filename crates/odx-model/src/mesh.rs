//! Mesh snapshot types: nodes, hexahedral elements, part instances.
//!
//! Labels are positive, unique and 1-based, but not necessarily
//! contiguous. Elements keep their connectivity in source order because
//! downstream mesh consumers interpret the order as the cell topology.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A node in the result mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node label (1-based, may have gaps)
    pub label: i32,
    /// Coordinates (x, y, z)
    pub coords: [f64; 3],
}

impl Node {
    /// Create a new node
    pub fn new(label: i32, x: f64, y: f64, z: f64) -> Self {
        Self {
            label,
            coords: [x, y, z],
        }
    }
}

/// An 8-node hexahedral element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Element label (1-based)
    pub label: i32,
    /// Node labels in topological order
    pub connectivity: [i32; 8],
}

impl Element {
    /// Create a new element
    pub fn new(label: i32, connectivity: [i32; 8]) -> Self {
        Self {
            label,
            connectivity,
        }
    }
}

/// A part instance: the mesh region all fields are sampled on.
///
/// Elements are stored in a `Vec`, not a map, because export output keeps
/// the source traversal order of the element collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// Instance name
    pub name: String,
    /// All nodes of the instance
    pub nodes: Vec<Node>,
    /// All elements of the instance, in source order
    pub elements: Vec<Element>,
    /// Named element sets (set name -> element labels)
    #[serde(default)]
    pub element_sets: BTreeMap<String, Vec<i32>>,
}

impl Instance {
    /// Get the element labels of a named set
    pub fn element_set(&self, name: &str) -> Option<&[i32]> {
        self.element_sets.get(name).map(|s| s.as_slice())
    }

    /// Largest node label present, `None` for an empty mesh
    pub fn max_node_label(&self) -> Option<i32> {
        self.nodes.iter().map(|n| n.label).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_creation() {
        let node = Node::new(3, 1.0, 2.0, 3.0);
        assert_eq!(node.label, 3);
        assert_eq!(node.coords, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn max_node_label_with_gaps() {
        let instance = Instance {
            name: "PART-1-1".to_string(),
            nodes: vec![
                Node::new(1, 0.0, 0.0, 0.0),
                Node::new(2, 1.0, 0.0, 0.0),
                Node::new(5, 0.0, 1.0, 0.0),
            ],
            elements: Vec::new(),
            element_sets: BTreeMap::new(),
        };
        assert_eq!(instance.max_node_label(), Some(5));
    }

    #[test]
    fn max_node_label_empty_mesh() {
        let instance = Instance {
            name: "EMPTY".to_string(),
            nodes: Vec::new(),
            elements: Vec::new(),
            element_sets: BTreeMap::new(),
        };
        assert_eq!(instance.max_node_label(), None);
    }

    #[test]
    fn element_set_lookup() {
        let mut element_sets = BTreeMap::new();
        element_sets.insert("SEAM".to_string(), vec![2, 4]);
        let instance = Instance {
            name: "PART-1-1".to_string(),
            nodes: Vec::new(),
            elements: Vec::new(),
            element_sets,
        };
        assert_eq!(instance.element_set("SEAM"), Some(&[2, 4][..]));
        assert!(instance.element_set("MISSING").is_none());
    }
}
