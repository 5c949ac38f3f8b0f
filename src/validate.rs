//! Validation passes for sampling grids and vessel networks.
//!
//! The derive and locate operations assume well-formed input by default,
//! matching how the mesh generator hands data to them. Strict mode runs
//! these checks at the API boundary instead, turning would-be undefined
//! behaviour (panics, nonsense indices) into explicit errors.

use nalgebra::Vector3;
use tracing::{debug, warn};

use crate::error::{VascError, VascResult};
use crate::grid::node_bounds;
use crate::types::{RectMesh, VesselNetwork};

/// Relative tolerance for comparing cell spans across elements.
const UNIFORM_REL_TOL: f64 = 1e-9;

/// Tolerance for per-axis element counts to be considered integral.
const COUNT_TOL: f64 = 1e-6;

/// How much input checking to perform at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Validate the full input before deriving anything.
    #[default]
    Strict,
    /// Assume the caller provides well-formed input; only guard accesses
    /// that would otherwise panic. Matches the legacy trusting behaviour.
    Trusting,
}

/// Summary of a validated rectangular sampling grid.
#[derive(Debug, Clone)]
pub struct GridReport {
    /// Total vertex count.
    pub node_count: usize,
    /// Total cell count.
    pub elem_count: usize,
    /// Cell size along each axis.
    pub cell_size: Vector3<f64>,
    /// Cell counts along each axis, rounded from the derived values.
    pub counts: [usize; 3],
    /// Box extent along each axis.
    pub extent: Vector3<f64>,
}

impl std::fmt::Display for GridReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Grid Report:")?;
        writeln!(f, "  Nodes: {}", self.node_count)?;
        writeln!(f, "  Elements: {}", self.elem_count)?;
        writeln!(
            f,
            "  Cells: {} x {} x {}",
            self.counts[0], self.counts[1], self.counts[2]
        )?;
        writeln!(
            f,
            "  Cell size: {:.4} x {:.4} x {:.4}",
            self.cell_size.x, self.cell_size.y, self.cell_size.z
        )?;
        writeln!(
            f,
            "  Extent: {:.4} x {:.4} x {:.4}",
            self.extent.x, self.extent.y, self.extent.z
        )?;
        Ok(())
    }
}

/// Summary of a validated vessel network.
#[derive(Debug, Clone)]
pub struct NetworkReport {
    /// Total node count.
    pub node_count: usize,
    /// Total segment count.
    pub segment_count: usize,
    /// Nodes with outgoing segments only (tree roots / inlets).
    pub inlet_count: usize,
    /// Nodes with incoming segments only (terminal branches / outlets).
    pub outlet_count: usize,
    /// Nodes referenced by no segment at all.
    pub isolated_node_count: usize,
    /// Largest number of segments incident at any node.
    pub max_fan_out: usize,
}

impl std::fmt::Display for NetworkReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Network Report:")?;
        writeln!(f, "  Nodes: {}", self.node_count)?;
        writeln!(f, "  Segments: {}", self.segment_count)?;
        writeln!(f, "  Inlets: {}", self.inlet_count)?;
        writeln!(f, "  Outlets: {}", self.outlet_count)?;
        writeln!(f, "  Isolated nodes: {}", self.isolated_node_count)?;
        writeln!(f, "  Max fan-out: {}", self.max_fan_out)?;
        Ok(())
    }
}

/// Validate that a mesh is a well-formed uniform rectangular grid.
///
/// Checks, in order: non-empty input, corner-node indices within the node
/// table, identical corner-1 to corner-8 span for every element, and
/// near-integral per-axis element counts.
pub fn validate_rect_mesh(mesh: &RectMesh) -> VascResult<GridReport> {
    if mesh.is_empty() {
        return Err(VascError::EmptyMesh {
            details: format!(
                "{} nodes, {} elements",
                mesh.node_count(),
                mesh.elem_count()
            ),
        });
    }

    let node_count = mesh.node_count();
    for (ne, elem) in mesh.elems.iter().enumerate() {
        for &corner in &elem[1..] {
            if corner >= node_count {
                return Err(VascError::InvalidNodeIndex {
                    element: ne,
                    node: corner,
                    node_count,
                });
            }
        }
    }

    let span_of = |elem: &[usize]| mesh.nodes[elem[8]] - mesh.nodes[elem[1]];
    let reference = span_of(&mesh.elems[0]);
    let scale = reference.amax().max(f64::MIN_POSITIVE);
    for (ne, elem) in mesh.elems.iter().enumerate().skip(1) {
        let span = span_of(elem);
        if (span - reference).amax() > UNIFORM_REL_TOL * scale {
            return Err(VascError::NonUniformGrid {
                details: format!(
                    "element {} spans ({:.6}, {:.6}, {:.6}), element 0 spans ({:.6}, {:.6}, {:.6})",
                    ne, span.x, span.y, span.z, reference.x, reference.y, reference.z
                ),
            });
        }
    }

    let (min, max) = node_bounds(&mesh.nodes);
    let extent = max - min;
    let mut counts = [0usize; 3];
    for (axis, (name, ext, side)) in [
        ("x", extent.x, reference.x),
        ("y", extent.y, reference.y),
        ("z", extent.z, reference.z),
    ]
    .into_iter()
    .enumerate()
    {
        if side <= 0.0 {
            return Err(VascError::NonUniformGrid {
                details: format!("cell size along {name} is {side:.6}, expected > 0"),
            });
        }
        let n = ext / side;
        if (n - n.round()).abs() > COUNT_TOL || n.round() < 1.0 {
            warn!(axis = name, count = n, "non-integral element count");
            return Err(VascError::NonUniformGrid {
                details: format!(
                    "extent along {name} is {n:.9} cells, expected an integral count"
                ),
            });
        }
        counts[axis] = n.round() as usize;
    }

    debug!(
        nodes = mesh.node_count(),
        elems = mesh.elem_count(),
        "validated rectangular grid"
    );

    Ok(GridReport {
        node_count: mesh.node_count(),
        elem_count: mesh.elem_count(),
        cell_size: reference,
        counts,
        extent,
    })
}

/// Validate a vessel network and summarise its topology.
///
/// Fails on segments referencing nodes outside the node table or on
/// self-loops; an empty network is valid and produces an all-zero report.
pub fn validate_network(network: &VesselNetwork) -> VascResult<NetworkReport> {
    let node_count = network.node_count();
    let mut in_degree = vec![0usize; node_count];
    let mut out_degree = vec![0usize; node_count];

    for (ne, seg) in network.segments.iter().enumerate() {
        for node in [seg.start, seg.end] {
            if node >= node_count {
                return Err(VascError::InvalidNodeIndex {
                    element: ne,
                    node,
                    node_count,
                });
            }
        }
        if seg.is_loop() {
            return Err(VascError::SelfLoopSegment {
                segment: ne,
                node: seg.start,
            });
        }
        out_degree[seg.start] += 1;
        in_degree[seg.end] += 1;
    }

    let mut inlet_count = 0;
    let mut outlet_count = 0;
    let mut isolated_node_count = 0;
    let mut max_fan_out = 0;
    for node in 0..node_count {
        let (inc, out) = (in_degree[node], out_degree[node]);
        match (inc, out) {
            (0, 0) => isolated_node_count += 1,
            (0, _) => inlet_count += 1,
            (_, 0) => outlet_count += 1,
            _ => {}
        }
        max_fan_out = max_fan_out.max(inc + out);
    }

    Ok(NetworkReport {
        node_count,
        segment_count: network.segment_count(),
        inlet_count,
        outlet_count,
        isolated_node_count,
        max_fan_out,
    })
}
