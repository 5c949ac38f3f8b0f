//! Error types for vascular-mesh operations.
//!
//! Every failure here is a deterministic data or programming error, never a
//! transient condition, so there is no retry machinery. Each error carries:
//! - A machine-readable code in the format `VASC-XXXX`
//! - Context identifying the offending element, node, or point
//! - A help message via miette
//!
//! # Error Codes
//!
//! - `VASC-2xxx`: validation errors (empty input, bad indices, bad topology)
//! - `VASC-3xxx`: query errors (out-of-range lookups, capacity overruns)

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for vascular-mesh operations.
pub type VascResult<T> = Result<T, VascError>;

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors (2xxx)
    /// VASC-2001: Mesh or network has no usable nodes/elements
    EmptyMesh = 2001,
    /// VASC-2002: Element references a node index outside the node table
    InvalidNodeIndex = 2002,
    /// VASC-2003: Rectangular mesh is not a uniform axis-aligned grid
    NonUniformGrid = 2003,
    /// VASC-2004: Segment starts and ends at the same node
    SelfLoopSegment = 2004,

    // Query errors (3xxx)
    /// VASC-3001: Point lies outside the mesh envelope
    PointOutOfBounds = 3001,
    /// VASC-3002: Node fan-out exceeds the configured limit
    FanOutExceeded = 3002,
}

impl ErrorCode {
    /// Returns the error code as a string in the format `VASC-XXXX`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::EmptyMesh => "VASC-2001",
            ErrorCode::InvalidNodeIndex => "VASC-2002",
            ErrorCode::NonUniformGrid => "VASC-2003",
            ErrorCode::SelfLoopSegment => "VASC-2004",
            ErrorCode::PointOutOfBounds => "VASC-3001",
            ErrorCode::FanOutExceeded => "VASC-3002",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur during grid and network operations.
#[derive(Debug, Error, Diagnostic)]
pub enum VascError {
    /// Mesh or network has no nodes or no elements.
    #[error("input is empty: {details}")]
    #[diagnostic(
        code(vasc::validation::empty),
        help(
            "Grid parameters cannot be derived without at least one element and its corner nodes. Check that the mesh generator produced output."
        )
    )]
    EmptyMesh { details: String },

    /// Element references a node index outside the node table.
    #[error(
        "invalid node index: element {element} references node {node}, but the input only has {node_count} nodes"
    )]
    #[diagnostic(
        code(vasc::validation::node_index),
        help("Element node references are zero-based indices into the node table.")
    )]
    InvalidNodeIndex {
        element: usize,
        node: usize,
        node_count: usize,
    },

    /// Rectangular mesh is not a uniform axis-aligned grid.
    #[error("grid is not uniform: {details}")]
    #[diagnostic(
        code(vasc::validation::non_uniform),
        help(
            "Point location assumes identically sized axis-aligned cells. Regenerate the sampling grid with a uniform spacing."
        )
    )]
    NonUniformGrid { details: String },

    /// Segment starts and ends at the same node.
    #[error("segment {segment} is a self-loop at node {node}")]
    #[diagnostic(
        code(vasc::validation::self_loop),
        help(
            "Upstream/downstream connectivity is undefined for self-loops. Remove the segment, or set ConnectivityOptions::reject_self_loops = false to skip this check."
        )
    )]
    SelfLoopSegment { segment: usize, node: usize },

    /// Point lies outside the mesh envelope.
    #[error(
        "point outside mesh envelope: {axis} = {value:.6} is outside [{min:.6}, {max:.6})"
    )]
    #[diagnostic(
        code(vasc::locate::out_of_bounds),
        help(
            "Checked location only accepts points inside [start, start + n * side) on every axis. Use GridParams::locate for the unchecked legacy behaviour."
        )
    )]
    PointOutOfBounds {
        axis: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Node fan-out exceeds the configured limit.
    #[error(
        "fan-out exceeded at node {node}: {count} segments are incident but the configured limit is {limit}"
    )]
    #[diagnostic(
        code(vasc::connectivity::fan_out),
        help(
            "Vascular trees normally branch at most three ways. Raise ConnectivityOptions::max_fan_out, or use ConnectivityOptions::unbounded() if higher-order branch points are expected."
        )
    )]
    FanOutExceeded {
        node: usize,
        count: usize,
        limit: usize,
    },
}

impl VascError {
    /// Returns the machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            VascError::EmptyMesh { .. } => ErrorCode::EmptyMesh,
            VascError::InvalidNodeIndex { .. } => ErrorCode::InvalidNodeIndex,
            VascError::NonUniformGrid { .. } => ErrorCode::NonUniformGrid,
            VascError::SelfLoopSegment { .. } => ErrorCode::SelfLoopSegment,
            VascError::PointOutOfBounds { .. } => ErrorCode::PointOutOfBounds,
            VascError::FanOutExceeded { .. } => ErrorCode::FanOutExceeded,
        }
    }
}
