//! Mesh and field data model for simulation result extraction.
//!
//! This crate holds the snapshot types read from a result archive:
//! labeled nodes, 8-node hexahedral elements, part instances with named
//! element sets, and centroid stress tensors with principal-value
//! computation. The types carry serde derives because the archive is a
//! serialized document, not a live solver.

pub mod mesh;
pub mod tensor;

pub use mesh::{Element, Instance, Node};
pub use tensor::{Principal, StressTensor};
