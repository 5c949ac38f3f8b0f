//! Point location in uniform rectangular sampling grids.
//!
//! A [`RectMesh`] produced by the sampling-grid generator is reduced to nine
//! numbers ([`GridParams`]): the box origin, the cell size per axis, and the
//! element count per axis. Locating the cell that contains an arbitrary point
//! is then a constant-time floor computation, with no search over elements.

use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::error::{VascError, VascResult};
use crate::types::RectMesh;
use crate::validate::{validate_rect_mesh, ValidationMode};

/// Geometry parameters of a uniform rectangular grid.
///
/// Derived once per mesh via [`GridParams::from_mesh`] and reused for any
/// number of [`locate`](GridParams::locate) queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParams {
    /// Minimum corner of the box (per-axis start coordinate).
    pub start: Point3<f64>,
    /// Cell size along each axis.
    pub side: Vector3<f64>,
    /// Element count along each axis, exactly as derived (not rounded).
    ///
    /// For a well-formed uniform grid each component is integral up to
    /// floating-point noise; [`counts`](GridParams::counts) rounds them.
    pub n_elem: Vector3<f64>,
}

impl GridParams {
    /// Derive grid parameters from a uniform rectangular mesh.
    ///
    /// The per-axis cell size is the coordinate difference between corner 1
    /// and corner 8 of the first element; the per-axis element count is the
    /// box extent divided by that size, left unrounded.
    ///
    /// With [`ValidationMode::Strict`] the mesh is checked for uniformity and
    /// index validity first; [`ValidationMode::Trusting`] assumes the mesh
    /// generator produced a well-formed grid and only guards the accesses
    /// needed to derive the parameters.
    pub fn from_mesh(mesh: &RectMesh, mode: ValidationMode) -> VascResult<Self> {
        if mode == ValidationMode::Strict {
            validate_rect_mesh(mesh)?;
        }

        if mesh.is_empty() {
            return Err(VascError::EmptyMesh {
                details: format!(
                    "{} nodes, {} elements",
                    mesh.node_count(),
                    mesh.elem_count()
                ),
            });
        }

        let first = &mesh.elems[0];
        let near = corner(mesh, 0, first[1])?;
        let far = corner(mesh, 0, first[8])?;
        let side = far - near;

        let (min, max) = node_bounds(&mesh.nodes);
        let n_elem = (max - min).component_div(&side);

        debug!(
            start = ?min,
            side = ?side,
            n_elem = ?n_elem,
            "derived grid parameters"
        );

        Ok(Self {
            start: min,
            side,
            n_elem,
        })
    }

    /// Per-axis element counts rounded to the nearest integer.
    pub fn counts(&self) -> [usize; 3] {
        [
            self.n_elem.x.round() as usize,
            self.n_elem.y.round() as usize,
            self.n_elem.z.round() as usize,
        ]
    }

    /// Total number of cells in the grid.
    pub fn cell_count(&self) -> usize {
        let [nx, ny, nz] = self.counts();
        nx * ny * nz
    }

    /// Locate the cell containing `point`, without bounds checking.
    ///
    /// Returns the row-major linear index
    /// `floor((x-sx)/dx) + floor((y-sy)/dy)*nx + floor((z-sz)/dz)*nx*ny`.
    /// Floor semantics break ties toward the positive side: a point exactly
    /// on an internal shared face belongs to the cell above/right of it.
    ///
    /// Points outside the envelope silently produce a negative or
    /// out-of-range index; use [`locate_checked`](GridParams::locate_checked)
    /// when the input is not guaranteed to lie inside the box.
    pub fn locate(&self, point: Point3<f64>) -> i64 {
        let ex = ((point.x - self.start.x) / self.side.x).floor();
        let ey = ((point.y - self.start.y) / self.side.y).floor();
        let ez = ((point.z - self.start.z) / self.side.z).floor();
        (ex + ey * self.n_elem.x + ez * self.n_elem.x * self.n_elem.y) as i64
    }

    /// Locate the cell containing `point`, failing on out-of-range input.
    ///
    /// The point must lie within `[start, start + n_elem * side)` on every
    /// axis; otherwise [`VascError::PointOutOfBounds`] names the first axis
    /// that falls outside.
    pub fn locate_checked(&self, point: Point3<f64>) -> VascResult<usize> {
        let axes: [(&'static str, f64, f64, f64, f64); 3] = [
            ("x", point.x, self.start.x, self.side.x, self.n_elem.x),
            ("y", point.y, self.start.y, self.side.y, self.n_elem.y),
            ("z", point.z, self.start.z, self.side.z, self.n_elem.z),
        ];
        for (axis, value, start, side, n) in axes {
            let max = start + side * n;
            if !(start..max).contains(&value) {
                return Err(VascError::PointOutOfBounds {
                    axis,
                    value,
                    min: start,
                    max,
                });
            }
        }
        Ok(self.locate(point) as usize)
    }
}

fn corner(mesh: &RectMesh, element: usize, node: usize) -> VascResult<Point3<f64>> {
    mesh.nodes
        .get(node)
        .copied()
        .ok_or(VascError::InvalidNodeIndex {
            element,
            node,
            node_count: mesh.node_count(),
        })
}

/// Per-axis minimum and maximum over a non-empty node list.
pub(crate) fn node_bounds(nodes: &[Point3<f64>]) -> (Point3<f64>, Point3<f64>) {
    let mut min = nodes[0];
    let mut max = nodes[0];
    for p in &nodes[1..] {
        min = Point3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
        max = Point3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HEX_ELEM_WIDTH;

    /// Build a uniform grid mesh with the given origin, cell size, and cell
    /// counts. Nodes are ordered x-fastest; corner 1 of each element is the
    /// corner nearest the origin and corner 8 is diagonally opposite.
    fn sample_grid(
        start: [f64; 3],
        side: [f64; 3],
        counts: [usize; 3],
    ) -> RectMesh {
        let [nx, ny, nz] = counts;
        let mut mesh = RectMesh::new();

        for k in 0..=nz {
            for j in 0..=ny {
                for i in 0..=nx {
                    mesh.nodes.push(Point3::new(
                        start[0] + i as f64 * side[0],
                        start[1] + j as f64 * side[1],
                        start[2] + k as f64 * side[2],
                    ));
                }
            }
        }

        let node_at = |i: usize, j: usize, k: usize| i + j * (nx + 1) + k * (nx + 1) * (ny + 1);
        let mut id = 0;
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let mut elem = [0usize; HEX_ELEM_WIDTH];
                    elem[0] = id;
                    elem[1] = node_at(i, j, k);
                    elem[2] = node_at(i + 1, j, k);
                    elem[3] = node_at(i, j + 1, k);
                    elem[4] = node_at(i + 1, j + 1, k);
                    elem[5] = node_at(i, j, k + 1);
                    elem[6] = node_at(i + 1, j, k + 1);
                    elem[7] = node_at(i, j + 1, k + 1);
                    elem[8] = node_at(i + 1, j + 1, k + 1);
                    mesh.elems.push(elem);
                    id += 1;
                }
            }
        }

        mesh
    }

    #[test]
    fn derives_parameters_from_uniform_grid() {
        let mesh = sample_grid([-1.0, -2.0, -3.0], [0.5, 1.0, 1.5], [4, 3, 2]);
        let params = GridParams::from_mesh(&mesh, ValidationMode::Strict).unwrap();

        assert_eq!(params.start, Point3::new(-1.0, -2.0, -3.0));
        assert!((params.side.x - 0.5).abs() < 1e-12);
        assert!((params.side.y - 1.0).abs() < 1e-12);
        assert!((params.side.z - 1.5).abs() < 1e-12);
        assert_eq!(params.counts(), [4, 3, 2]);
        assert_eq!(params.cell_count(), 24);
    }

    #[test]
    fn empty_mesh_is_rejected() {
        let mesh = RectMesh::new();
        let err = GridParams::from_mesh(&mesh, ValidationMode::Trusting).unwrap_err();
        assert!(matches!(err, VascError::EmptyMesh { .. }));
    }

    #[test]
    fn locates_every_cell_center() {
        let start = [2.0, -1.0, 0.0];
        let side = [0.25, 0.5, 2.0];
        let counts = [5, 4, 3];
        let mesh = sample_grid(start, side, counts);
        let params = GridParams::from_mesh(&mesh, ValidationMode::Strict).unwrap();

        let [nx, ny, nz] = counts;
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let center = Point3::new(
                        start[0] + (i as f64 + 0.5) * side[0],
                        start[1] + (j as f64 + 0.5) * side[1],
                        start[2] + (k as f64 + 0.5) * side[2],
                    );
                    let expected = (i + j * nx + k * nx * ny) as i64;
                    assert_eq!(params.locate(center), expected);
                    assert_eq!(params.locate_checked(center).unwrap(), expected as usize);
                }
            }
        }
    }

    #[test]
    fn boundary_point_goes_to_positive_side() {
        let mesh = sample_grid([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [4, 1, 1]);
        let params = GridParams::from_mesh(&mesh, ValidationMode::Strict).unwrap();

        // Exactly on the face between cell 0 and cell 1.
        let on_face = Point3::new(1.0, 0.5, 0.5);
        assert_eq!(params.locate(on_face), 1);
    }

    #[test]
    fn origin_belongs_to_first_cell() {
        let mesh = sample_grid([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2, 2, 2]);
        let params = GridParams::from_mesh(&mesh, ValidationMode::Strict).unwrap();
        assert_eq!(params.locate(Point3::new(0.0, 0.0, 0.0)), 0);
    }

    #[test]
    fn unchecked_locate_goes_negative_below_origin() {
        let mesh = sample_grid([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2, 2, 2]);
        let params = GridParams::from_mesh(&mesh, ValidationMode::Strict).unwrap();
        assert!(params.locate(Point3::new(-0.5, 0.5, 0.5)) < 0);
    }

    #[test]
    fn checked_locate_rejects_out_of_range_points() {
        let mesh = sample_grid([0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2, 2, 2]);
        let params = GridParams::from_mesh(&mesh, ValidationMode::Strict).unwrap();

        let err = params
            .locate_checked(Point3::new(2.5, 0.5, 0.5))
            .unwrap_err();
        match err {
            VascError::PointOutOfBounds { axis, .. } => assert_eq!(axis, "x"),
            other => panic!("unexpected error: {other}"),
        }

        // The upper envelope face itself is outside (half-open interval).
        let err = params
            .locate_checked(Point3::new(0.5, 2.0, 0.5))
            .unwrap_err();
        assert!(matches!(
            err,
            VascError::PointOutOfBounds { axis: "y", .. }
        ));
    }
}
