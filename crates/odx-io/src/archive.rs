//! Result archive reader.
//!
//! The archive is a JSON document holding the mesh instances and the
//! saved solution frames of an analysis run. It replaces the binary
//! result database of the upstream workflow with a schema this pipeline
//! owns end to end.
//!
//! Field values are keyed by entity label, so a field can hold at most
//! one value per node or element. Dropping the `Archive` releases the
//! source; no lock outlives the value.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use odx_io::Archive;
//!
//! let archive = Archive::open("results.json")?;
//! let step = archive.step("Step-39")?;
//! let frame = step.last_frame()?;
//! # Ok::<(), odx_io::ExportError>(())
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use odx_model::{Instance, StressTensor};

use crate::error::{ExportError, Result};

/// One analysis result archive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archive {
    /// Analysis steps in run order
    pub steps: Vec<Step>,
    /// Part instances of the assembly
    pub instances: Vec<Instance>,
}

/// One analysis step with its saved frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Step name, e.g. "Step-39"
    pub name: String,
    /// Saved solution snapshots, oldest first
    pub frames: Vec<Frame>,
}

/// A saved solution snapshot at one analysis time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Analysis time of the snapshot
    pub time: f64,
    /// Field outputs by name, e.g. "U", "S"
    #[serde(default)]
    pub field_outputs: BTreeMap<String, FieldOutput>,
}

/// One field output: values for all entities that carry the field.
///
/// Externally tagged on the wire (`{"vector": {"values": ...}}`) so the
/// label-keyed maps deserialize directly; an internal tag would force
/// serde to buffer the content and lose the integer map keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldOutput {
    /// Per-node vector field (e.g. displacement)
    Vector {
        /// node label -> (x, y, z) components
        values: BTreeMap<i32, [f64; 3]>,
    },
    /// Per-element centroid-sampled tensor field (e.g. stress)
    Tensor {
        /// element label -> Voigt components
        values: BTreeMap<i32, StressTensor>,
    },
}

impl FieldOutput {
    /// Vector value for a node label, if this is a vector field
    pub fn vector_at(&self, label: i32) -> Option<[f64; 3]> {
        match self {
            FieldOutput::Vector { values } => values.get(&label).copied(),
            FieldOutput::Tensor { .. } => None,
        }
    }

    /// Tensor value for an element label, if this is a tensor field
    pub fn tensor_at(&self, label: i32) -> Option<StressTensor> {
        match self {
            FieldOutput::Tensor { values } => values.get(&label).copied(),
            FieldOutput::Vector { .. } => None,
        }
    }
}

impl Archive {
    /// Open an archive file.
    ///
    /// A missing file maps to `SourceNotFound`; malformed JSON surfaces
    /// as `Json`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                ExportError::SourceNotFound(path.to_path_buf())
            } else {
                ExportError::Io(err)
            }
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Look up a step by name
    pub fn step(&self, name: &str) -> Result<&Step> {
        self.steps
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ExportError::StepNotFound(name.to_string()))
    }

    /// Look up an instance by name
    pub fn instance(&self, name: &str) -> Result<&Instance> {
        self.instances
            .iter()
            .find(|i| i.name == name)
            .ok_or_else(|| ExportError::InstanceNotFound(name.to_string()))
    }
}

impl Step {
    /// The last saved frame of the step
    pub fn last_frame(&self) -> Result<&Frame> {
        self.frames
            .last()
            .ok_or_else(|| ExportError::FrameNotFound(self.name.clone()))
    }
}

impl Frame {
    /// Look up a field output by name
    pub fn field(&self, name: &str) -> Result<&FieldOutput> {
        self.field_outputs
            .get(name)
            .ok_or_else(|| ExportError::FieldNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_archive() -> Archive {
        let mut field_outputs = BTreeMap::new();
        let mut u = BTreeMap::new();
        u.insert(1, [0.1, 0.2, 0.3]);
        field_outputs.insert("U".to_string(), FieldOutput::Vector { values: u });
        let mut s = BTreeMap::new();
        s.insert(
            1,
            StressTensor {
                xx: -1e6,
                ..Default::default()
            },
        );
        field_outputs.insert("S".to_string(), FieldOutput::Tensor { values: s });

        Archive {
            steps: vec![Step {
                name: "Step-1".to_string(),
                frames: vec![
                    Frame {
                        time: 0.0,
                        field_outputs: BTreeMap::new(),
                    },
                    Frame {
                        time: 1.0,
                        field_outputs,
                    },
                ],
            }],
            instances: Vec::new(),
        }
    }

    #[test]
    fn step_lookup_by_name() {
        let archive = sample_archive();
        assert!(archive.step("Step-1").is_ok());
        let err = archive.step("Step-2").unwrap_err();
        assert!(matches!(err, ExportError::StepNotFound(name) if name == "Step-2"));
    }

    #[test]
    fn last_frame_is_final_snapshot() {
        let archive = sample_archive();
        let frame = archive.step("Step-1").unwrap().last_frame().unwrap();
        assert_eq!(frame.time, 1.0);
    }

    #[test]
    fn empty_step_has_no_frame() {
        let step = Step {
            name: "Step-9".to_string(),
            frames: Vec::new(),
        };
        let err = step.last_frame().unwrap_err();
        assert!(matches!(err, ExportError::FrameNotFound(name) if name == "Step-9"));
    }

    #[test]
    fn field_lookup_and_typed_access() {
        let archive = sample_archive();
        let frame = archive.step("Step-1").unwrap().last_frame().unwrap();

        let u = frame.field("U").unwrap();
        assert_eq!(u.vector_at(1), Some([0.1, 0.2, 0.3]));
        assert_eq!(u.vector_at(2), None);
        assert_eq!(u.tensor_at(1), None);

        let s = frame.field("S").unwrap();
        assert_eq!(s.tensor_at(1).unwrap().xx, -1e6);

        let err = frame.field("E").unwrap_err();
        assert!(matches!(err, ExportError::FieldNotFound(name) if name == "E"));
    }

    #[test]
    fn field_output_parses_from_wire_format() {
        let json = r#"{"vector": {"values": {"1": [0.1, 0.2, 0.3]}}}"#;
        let field: FieldOutput = serde_json::from_str(json).unwrap();
        assert_eq!(field.vector_at(1), Some([0.1, 0.2, 0.3]));

        let json = r#"{"tensor": {"values": {"2":
            {"xx": -1e6, "yy": 0.0, "zz": 0.0, "xy": 0.0, "yz": 0.0, "xz": 0.0}}}}"#;
        let field: FieldOutput = serde_json::from_str(json).unwrap();
        assert_eq!(field.tensor_at(2).unwrap().xx, -1e6);
    }

    #[test]
    fn archive_json_roundtrip() {
        let archive = sample_archive();
        let json = serde_json::to_string(&archive).unwrap();
        let loaded: Archive = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, archive);
    }

    #[test]
    fn open_missing_file_is_source_not_found() {
        let err = Archive::open("/nonexistent/results.json").unwrap_err();
        assert!(matches!(err, ExportError::SourceNotFound(_)));
    }
}
