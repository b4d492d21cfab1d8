//! Tecplot ASCII zone writers.
//!
//! Two fixed-grammar FEBRICK zone layouts:
//!
//! - **Displacement zone**: POINT packing, one line per node row with
//!   coordinates and displacement components, then the hexahedral
//!   connectivity block.
//! - **Stress zone**: BLOCK packing with `VARLOCATION=([4-5]=CELLCENTERED)`,
//!   coordinate blocks per axis followed by the two cell-centered stress
//!   blocks, then the same connectivity block.
//!
//! Node rows are dense over `1..=max_label` so that the 1-based node
//! labels in the connectivity block double as row numbers. Values arrive
//! already transformed; these writers only format.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// One dense node row: coordinates plus displacement vector.
///
/// A row standing in for a gap in the label space is all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeRow {
    /// Coordinates (x, y, z)
    pub coords: [f64; 3],
    /// Displacement components (ux, uy, uz)
    pub displacement: [f64; 3],
}

/// Cell-centered principal stress pair for one surviving element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StressRow {
    /// Max principal stress, already sign-flipped and rescaled
    pub smax: f64,
    /// Min principal stress, already sign-flipped and rescaled
    pub smin: f64,
}

/// Write the POINT-packed displacement zone
pub fn write_displacement_zone(
    path: &Path,
    title: &str,
    nodes: &[NodeRow],
    connectivity: &[[i32; 8]],
) -> io::Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "TITLE = {}", title)?;
    writeln!(
        file,
        "VARIABLES = \"XCoor\", \"YCoor\", \"ZCoor\", \"UX\", \"UY\", \"UZ\""
    )?;
    writeln!(file, "ZONE N={}, E={}", nodes.len(), connectivity.len())?;
    writeln!(file, "DATAPACKING = POINT, ZONETYPE = FEBRICK")?;

    for row in nodes {
        writeln!(
            file,
            "{:.6} {:.6} {:.6} {:.6} {:.6} {:.6}",
            row.coords[0],
            row.coords[1],
            row.coords[2],
            row.displacement[0],
            row.displacement[1],
            row.displacement[2]
        )?;
    }
    writeln!(file)?;
    write_connectivity(&mut file, connectivity)?;

    Ok(())
}

/// Write the BLOCK-packed, cell-centered stress zone
pub fn write_stress_zone(
    path: &Path,
    title: &str,
    nodes: &[NodeRow],
    stresses: &[StressRow],
    connectivity: &[[i32; 8]],
) -> io::Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "TITLE = {}", title)?;
    writeln!(
        file,
        "VARIABLES = \"XCoor\", \"YCoor\", \"ZCoor\", \"Smax\", \"Smin\""
    )?;
    writeln!(file, "ZONE N={}, E={}", nodes.len(), connectivity.len())?;
    writeln!(file, "DATAPACKING = BLOCK, ZONETYPE = FEBRICK")?;
    writeln!(file, "VARLOCATION = ([4-5] = CELLCENTERED)")?;

    for axis in 0..3 {
        for row in nodes {
            writeln!(file, "{:.6}", row.coords[axis])?;
        }
        writeln!(file)?;
    }
    for row in stresses {
        writeln!(file, "{:.6}", row.smax)?;
    }
    writeln!(file)?;
    for row in stresses {
        writeln!(file, "{:.6}", row.smin)?;
    }
    writeln!(file)?;
    write_connectivity(&mut file, connectivity)?;

    Ok(())
}

fn write_connectivity(file: &mut File, connectivity: &[[i32; 8]]) -> io::Result<()> {
    for nodes in connectivity {
        writeln!(
            file,
            "{} {} {} {} {} {} {} {}",
            nodes[0], nodes[1], nodes[2], nodes[3], nodes[4], nodes[5], nodes[6], nodes[7]
        )?;
    }
    Ok(())
}
