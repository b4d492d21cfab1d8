//! Result exporter: one read pass over the archive, two Tecplot files.
//!
//! The exporter owns no persistent state. `run()` opens the configured
//! archive, samples the displacement and centroid stress fields from the
//! last frame of the configured step, drops elements in the exclusion
//! set, and writes the displacement and stress zones into the work
//! directory. Any failure aborts the batch; partially written files are
//! left as-is.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::archive::Archive;
use crate::error::{ExportError, Result};
use crate::tecplot::{NodeRow, StressRow, write_displacement_zone, write_stress_zone};

/// Everything the exporter needs to resolve the frame and name the output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory holding the archive; output files land here too
    pub work_dir: PathBuf,
    /// Archive filename inside `work_dir`
    pub archive_file: String,
    /// Step to sample; the last frame of the step is used
    pub step_name: String,
    /// Instance whose mesh and fields are exported
    pub instance_name: String,
    /// Element set to omit from both outputs; `None` exports everything
    #[serde(default)]
    pub excluded_set: Option<String>,
    /// Per-node vector field name, e.g. "U"
    pub displacement_field: String,
    /// Per-element centroid tensor field name, e.g. "S"
    pub stress_field: String,
    /// Output filename for the displacement zone
    pub displacement_file: String,
    /// Output filename for the stress zone
    pub stress_file: String,
    /// TITLE line of the displacement zone
    pub displacement_title: String,
    /// TITLE line of the stress zone
    pub stress_title: String,
}

impl ExportConfig {
    /// Load a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = fs::read(path.as_ref())?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Paths and row counts of a completed export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Resolved path of the displacement file
    pub displacement_path: PathBuf,
    /// Resolved path of the stress file
    pub stress_path: PathBuf,
    /// Node rows written (dense over 1..=max label)
    pub node_rows: usize,
    /// Element rows written after exclusion filtering
    pub element_rows: usize,
}

/// Zone data gathered in one pass over the archive
#[derive(Debug)]
struct GatheredZones {
    /// Dense node table; row i holds label i+1, zeros where no node exists
    node_rows: Vec<NodeRow>,
    /// Connectivity of surviving elements, source traversal order
    connectivity: Vec<[i32; 8]>,
    /// Principal stress pairs, one per surviving element, same order
    stresses: Vec<StressRow>,
}

/// One-shot batch exporter
pub struct ResultExporter {
    config: ExportConfig,
}

impl ResultExporter {
    /// Create an exporter for the given configuration
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Run the export: read the archive, write both zone files
    pub fn run(&self) -> Result<ExportReport> {
        let archive_path = self.config.work_dir.join(&self.config.archive_file);
        let archive = Archive::open(&archive_path)?;
        let zones = self.gather(&archive)?;
        // Archive handle released before any file is written
        drop(archive);

        let displacement_path = self.config.work_dir.join(&self.config.displacement_file);
        write_displacement_zone(
            &displacement_path,
            &self.config.displacement_title,
            &zones.node_rows,
            &zones.connectivity,
        )
        .map_err(|source| write_failure(&displacement_path, source))?;

        let stress_path = self.config.work_dir.join(&self.config.stress_file);
        write_stress_zone(
            &stress_path,
            &self.config.stress_title,
            &zones.node_rows,
            &zones.stresses,
            &zones.connectivity,
        )
        .map_err(|source| write_failure(&stress_path, source))?;

        Ok(ExportReport {
            displacement_path,
            stress_path,
            node_rows: zones.node_rows.len(),
            element_rows: zones.connectivity.len(),
        })
    }

    /// Sample mesh and fields from the configured step's last frame
    fn gather(&self, archive: &Archive) -> Result<GatheredZones> {
        let step = archive.step(&self.config.step_name)?;
        let frame = step.last_frame()?;
        let instance = archive.instance(&self.config.instance_name)?;

        let excluded: HashSet<i32> = match &self.config.excluded_set {
            Some(name) => instance
                .element_set(name)
                .ok_or_else(|| ExportError::ExclusionSetNotFound(name.clone()))?
                .iter()
                .copied()
                .collect(),
            None => HashSet::new(),
        };

        let displacements = frame.field(&self.config.displacement_field)?;
        let stresses = frame.field(&self.config.stress_field)?;

        // Nodes keyed by label; the dense table is built afterwards so a
        // sparse label space never allocates placeholder entries here.
        let mut rows_by_label = BTreeMap::<i32, NodeRow>::new();
        for node in &instance.nodes {
            let displacement = displacements.vector_at(node.label).ok_or_else(|| {
                ExportError::FieldValueMissing {
                    field: self.config.displacement_field.clone(),
                    label: node.label,
                }
            })?;
            rows_by_label.insert(
                node.label,
                NodeRow {
                    coords: node.coords,
                    displacement,
                },
            );
        }

        let max_label = instance.max_node_label().unwrap_or(0).max(0);

        let mut connectivity = Vec::new();
        let mut stress_rows = Vec::new();
        for element in &instance.elements {
            if excluded.contains(&element.label) {
                continue;
            }
            // Connectivity indexes the dense node table by 1-based row;
            // a label past the table would point outside the zone.
            if let Some(&node) = element
                .connectivity
                .iter()
                .find(|&&n| n < 1 || n > max_label)
            {
                return Err(ExportError::ConnectivityOutOfRange {
                    element: element.label,
                    node,
                    max: max_label,
                });
            }
            let tensor = stresses.tensor_at(element.label).ok_or_else(|| {
                ExportError::FieldValueMissing {
                    field: self.config.stress_field.clone(),
                    label: element.label,
                }
            })?;
            let principal = tensor.principal_values();
            connectivity.push(element.connectivity);
            // Sign flip + Pa -> MPa, compression positive
            stress_rows.push(StressRow {
                smax: principal.max / -1e6,
                smin: principal.min / -1e6,
            });
        }

        // Dense table over 1..=max label: connectivity references nodes
        // by 1-based row number, so label gaps become zero rows.
        let node_rows = (1..=max_label)
            .map(|label| rows_by_label.get(&label).copied().unwrap_or_default())
            .collect();

        Ok(GatheredZones {
            node_rows,
            connectivity,
            stresses: stress_rows,
        })
    }
}

fn write_failure(path: &Path, source: io::Error) -> ExportError {
    ExportError::WriteFailure {
        path: path.to_path_buf(),
        source,
    }
}
