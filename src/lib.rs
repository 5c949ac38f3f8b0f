//! Geometric primitives for branching vascular networks embedded in
//! ellipsoidal volumes.
//!
//! This crate provides the building blocks used to construct and query
//! anatomically realistic 3D models of branching tubular structures, such as
//! placental vasculature, grown inside an ellipsoidal organ volume.
//!
//! # Features
//!
//! - **Point location**: reduce a uniform rectangular sampling mesh to nine
//!   grid parameters and locate the cell containing any point in O(1)
//! - **Network connectivity**: compute, for every segment of a 1D branching
//!   network, the segments directly upstream and downstream of it
//! - **Validation**: strict or trusting handling of input meshes and
//!   networks, with explicit errors instead of silent undefined behaviour
//! - **Geometry helpers**: ellipsoid sizing and containment, rotation
//!   matrices, vector angles, plane fitting, channel flow resistance
//!
//! # Conventions
//!
//! The library is unit-agnostic and uses a right-handed coordinate system.
//! Rectangular meshes are axis-aligned grids of identically sized hexahedral
//! cells; cell indices are row-major with x fastest. Network segments are
//! directed: the start node is always upstream of the end node.
//!
//! # Quick Start
//!
//! Locate points in a sampling grid:
//!
//! ```
//! use nalgebra::Point3;
//! use vascular_mesh::{GridParams, RectMesh, ValidationMode};
//!
//! // A 1 x 1 x 1 grid of unit cells from an external generator.
//! let mesh = RectMesh {
//!     nodes: vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!         Point3::new(1.0, 1.0, 0.0),
//!         Point3::new(0.0, 0.0, 1.0),
//!         Point3::new(1.0, 0.0, 1.0),
//!         Point3::new(0.0, 1.0, 1.0),
//!         Point3::new(1.0, 1.0, 1.0),
//!     ],
//!     elems: vec![[0, 0, 1, 2, 3, 4, 5, 6, 7]],
//! };
//!
//! let params = GridParams::from_mesh(&mesh, ValidationMode::Strict).unwrap();
//! assert_eq!(params.locate_checked(Point3::new(0.5, 0.5, 0.5)).unwrap(), 0);
//! ```
//!
//! Build upstream/downstream connectivity for a vessel tree:
//!
//! ```
//! use nalgebra::Point3;
//! use vascular_mesh::{element_connectivity, ConnectivityOptions, Segment, VesselNetwork};
//!
//! let network = VesselNetwork {
//!     nodes: vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(0.0, 0.0, -10.0),
//!         Point3::new(-5.0, 0.0, -15.0),
//!         Point3::new(5.0, 0.0, -15.0),
//!     ],
//!     segments: vec![
//!         Segment::new(0, 0, 1),
//!         Segment::new(1, 1, 2),
//!         Segment::new(2, 1, 3),
//!     ],
//! };
//!
//! let conn = element_connectivity(&network, &ConnectivityOptions::default()).unwrap();
//! assert_eq!(conn.downstream(0), &[1, 2]);
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`VascResult`]. Every failure is a
//! deterministic data error with a machine-readable [`ErrorCode`]
//! (`VASC-2xxx` for validation, `VASC-3xxx` for queries) and a miette help
//! message. There are no retries and no partial results.
//!
//! # Logging
//!
//! Operations emit `tracing` events (`debug` for derivations and builds,
//! `warn` for suspicious input). The library installs no subscriber; enable
//! one in the application, e.g. `RUST_LOG=vascular_mesh=debug`.

mod error;
mod types;

pub mod connectivity;
pub mod ellipsoid;
pub mod flow;
pub mod geometry;
pub mod grid;
pub mod validate;

pub use connectivity::{element_connectivity, ConnectivityOptions, ElementConnectivity};
pub use ellipsoid::Ellipsoid;
pub use error::{ErrorCode, VascError, VascResult};
pub use grid::GridParams;
pub use types::{RectMesh, Segment, VesselNetwork, HEX_ELEM_WIDTH};
pub use validate::{
    validate_network, validate_rect_mesh, GridReport, NetworkReport, ValidationMode,
};
