//! I/O for the dam result extraction pipeline.
//!
//! This crate provides:
//! - **Archive** reader for the JSON result database (steps, frames,
//!   instances, field outputs)
//! - **Tecplot** ASCII zone writers (POINT displacement zone, BLOCK
//!   cell-centered stress zone)
//! - **ResultExporter**, the one-shot batch pipeline tying both together
//! - the fatal error taxonomy shared by all of the above

pub mod archive;
pub mod error;
pub mod exporter;
pub mod tecplot;

pub use archive::{Archive, FieldOutput, Frame, Step};
pub use error::{ExportError, Result};
pub use exporter::{ExportConfig, ExportReport, ResultExporter};
pub use tecplot::{NodeRow, StressRow, write_displacement_zone, write_stress_zone};
