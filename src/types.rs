//! Core data types for sampling grids and 1D vessel networks.

use nalgebra::Point3;

/// Width of a hexahedral element record: an identifier slot followed by the
/// 8 corner-node indices.
pub const HEX_ELEM_WIDTH: usize = 9;

/// A regular rectangular (voxel-style) sampling mesh.
///
/// The mesh partitions an axis-aligned box into identically sized hexahedral
/// cells. It is produced by an external mesh generator; this crate only reads
/// it, primarily to derive [`GridParams`](crate::grid::GridParams) for point
/// location.
#[derive(Debug, Clone, Default)]
pub struct RectMesh {
    /// Vertex coordinates. Axis-sorted so that the per-axis minima and maxima
    /// equal the box extents.
    pub nodes: Vec<Point3<f64>>,

    /// Element records `[id, c1, .., c8]`. Corner 1 is the corner nearest the
    /// mesh origin and corner 8 is diagonally opposite it, so their
    /// coordinate difference along each axis is the cell size.
    pub elems: Vec<[usize; HEX_ELEM_WIDTH]>,
}

impl RectMesh {
    /// Create an empty mesh.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of hexahedral cells.
    #[inline]
    pub fn elem_count(&self) -> usize {
        self.elems.len()
    }

    /// Whether the mesh has no nodes or no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() || self.elems.is_empty()
    }
}

/// A directed segment of a 1D branching network.
///
/// Direction encodes flow direction: `start` is always upstream of `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    /// Application-assigned identifier.
    pub id: usize,
    /// Upstream node index.
    pub start: usize,
    /// Downstream node index.
    pub end: usize,
}

impl Segment {
    /// Create a segment from an identifier and its node indices.
    #[inline]
    pub fn new(id: usize, start: usize, end: usize) -> Self {
        Self { id, start, end }
    }

    /// Whether the segment starts and ends at the same node.
    #[inline]
    pub fn is_loop(&self) -> bool {
        self.start == self.end
    }
}

/// A 1D branching network: node positions plus directed segments.
///
/// Only the connectivity indices are used by the connectivity builder; node
/// positions are carried for the geometric utilities and for callers.
#[derive(Debug, Clone, Default)]
pub struct VesselNetwork {
    /// Node positions.
    pub nodes: Vec<Point3<f64>>,
    /// Directed segments between nodes.
    pub segments: Vec<Segment>,
}

impl VesselNetwork {
    /// Create an empty network.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of segments.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}
