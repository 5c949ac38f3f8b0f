//! Upstream/downstream connectivity for 1D branching networks.
//!
//! Given the directed segments of a vessel tree, this module computes, for
//! every segment, which segments feed it (`elem_up`) and which segments it
//! feeds (`elem_down`). The build is two passes over the segment table:
//!
//! 1. **Incidence**: register every segment against both of its nodes in a
//!    per-node incidence list.
//! 2. **Linking**: for each segment, every *other* segment incident at its
//!    downstream node is a consumer; record the relation in both directions.
//!
//! Both passes are O(E) with a small constant fan-out factor. The incidence
//! lists are transient and rebuilt on every call; the input network is never
//! mutated.

use tracing::{debug, warn};

use crate::error::{VascError, VascResult};
use crate::types::VesselNetwork;

/// Options controlling connectivity construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectivityOptions {
    /// Maximum number of segments that may be incident at a single node, or
    /// `None` for no limit.
    ///
    /// The default of 3 admits bifurcations (one parent, two children) but
    /// rejects higher-order branch points, which in vascular trees usually
    /// indicate malformed input rather than anatomy. Exceeding the limit
    /// fails with [`VascError::FanOutExceeded`].
    pub max_fan_out: Option<usize>,

    /// Whether to reject self-loop segments (`start == end`). Default true;
    /// when disabled, self-loops are logged and contribute twice to their
    /// node's fan-out but never link to themselves.
    pub reject_self_loops: bool,
}

impl Default for ConnectivityOptions {
    fn default() -> Self {
        Self {
            max_fan_out: Some(3),
            reject_self_loops: true,
        }
    }
}

impl ConnectivityOptions {
    /// Options with no fan-out limit, for networks with higher-order branch
    /// points.
    pub fn unbounded() -> Self {
        Self {
            max_fan_out: None,
            ..Self::default()
        }
    }

    /// Set the per-node incidence limit.
    pub fn with_max_fan_out(mut self, limit: usize) -> Self {
        self.max_fan_out = Some(limit);
        self
    }

    /// Allow self-loop segments instead of rejecting them.
    pub fn allow_self_loops(mut self) -> Self {
        self.reject_self_loops = false;
        self
    }
}

/// Per-segment upstream and downstream adjacency of a network.
///
/// Rows are indexed by segment position in the input table. For any two
/// segments `a` and `b`, `b ∈ elem_down[a]` holds exactly when
/// `a ∈ elem_up[b]`, and every segment in `elem_down[a]` has `a`'s end node
/// among its own node references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementConnectivity {
    /// For each segment, the segments whose downstream node is this segment's
    /// upstream node (its producers).
    pub elem_up: Vec<Vec<usize>>,
    /// For each segment, the segments whose upstream node is this segment's
    /// downstream node (its consumers).
    pub elem_down: Vec<Vec<usize>>,
}

impl ElementConnectivity {
    /// Segments directly upstream of `segment`.
    #[inline]
    pub fn upstream(&self, segment: usize) -> &[usize] {
        &self.elem_up[segment]
    }

    /// Segments directly downstream of `segment`.
    #[inline]
    pub fn downstream(&self, segment: usize) -> &[usize] {
        &self.elem_down[segment]
    }

    /// Number of segments covered by the tables.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.elem_up.len()
    }
}

/// Build the upstream/downstream connectivity tables for a network.
///
/// Node indices are validated against the node table up front; a segment
/// referencing a node outside `[0, node_count)` fails with
/// [`VascError::InvalidNodeIndex`]. An empty network yields empty tables.
///
/// # Example
///
/// ```
/// use nalgebra::Point3;
/// use vascular_mesh::{element_connectivity, ConnectivityOptions, Segment, VesselNetwork};
///
/// // One stem bifurcating into two daughters at node 1.
/// let network = VesselNetwork {
///     nodes: vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(0.0, 0.0, -10.0),
///         Point3::new(-5.0, 0.0, -15.0),
///         Point3::new(5.0, 0.0, -15.0),
///     ],
///     segments: vec![
///         Segment::new(0, 0, 1),
///         Segment::new(1, 1, 2),
///         Segment::new(2, 1, 3),
///     ],
/// };
///
/// let conn = element_connectivity(&network, &ConnectivityOptions::default()).unwrap();
/// assert_eq!(conn.downstream(0), &[1, 2]);
/// assert_eq!(conn.upstream(1), &[0]);
/// assert!(conn.downstream(1).is_empty());
/// ```
pub fn element_connectivity(
    network: &VesselNetwork,
    options: &ConnectivityOptions,
) -> VascResult<ElementConnectivity> {
    let node_count = network.node_count();
    let segment_count = network.segment_count();

    // Incidence pass: register each segment at both of its nodes.
    let mut elems_at_node: Vec<Vec<usize>> = vec![Vec::new(); node_count];
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
            if options.reject_self_loops {
                return Err(VascError::SelfLoopSegment {
                    segment: ne,
                    node: seg.start,
                });
            }
            warn!(segment = ne, node = seg.start, "self-loop segment in network");
        }

        for node in [seg.start, seg.end] {
            let incident = &mut elems_at_node[node];
            incident.push(ne);
            if let Some(limit) = options.max_fan_out {
                if incident.len() > limit {
                    return Err(VascError::FanOutExceeded {
                        node,
                        count: incident.len(),
                        limit,
                    });
                }
            }
        }
    }

    // Linking pass: every other segment at a segment's end node is fed by it.
    let mut elem_up: Vec<Vec<usize>> = vec![Vec::new(); segment_count];
    let mut elem_down: Vec<Vec<usize>> = vec![Vec::new(); segment_count];
    for (ne, seg) in network.segments.iter().enumerate() {
        for &ne2 in &elems_at_node[seg.end] {
            if ne2 != ne {
                elem_up[ne2].push(ne);
                elem_down[ne].push(ne2);
            }
        }
    }

    debug!(
        segments = segment_count,
        nodes = node_count,
        "built element connectivity"
    );

    Ok(ElementConnectivity { elem_up, elem_down })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Segment;
    use nalgebra::Point3;

    fn network(node_count: usize, segments: &[(usize, usize, usize)]) -> VesselNetwork {
        VesselNetwork {
            nodes: (0..node_count)
                .map(|i| Point3::new(i as f64, 0.0, 0.0))
                .collect(),
            segments: segments
                .iter()
                .map(|&(id, start, end)| Segment::new(id, start, end))
                .collect(),
        }
    }

    #[test]
    fn bifurcation_links_parent_to_both_children() {
        let net = network(4, &[(0, 0, 1), (1, 1, 2), (2, 1, 3)]);
        let conn = element_connectivity(&net, &ConnectivityOptions::default()).unwrap();

        assert_eq!(conn.downstream(0), &[1, 2]);
        assert_eq!(conn.upstream(1), &[0]);
        assert_eq!(conn.upstream(2), &[0]);
        assert!(conn.downstream(1).is_empty());
        assert!(conn.downstream(2).is_empty());
        assert!(conn.upstream(0).is_empty());
    }

    #[test]
    fn linear_chain_links_neighbours_only() {
        let net = network(4, &[(0, 0, 1), (1, 1, 2), (2, 2, 3)]);
        let conn = element_connectivity(&net, &ConnectivityOptions::default()).unwrap();

        assert_eq!(conn.downstream(0), &[1]);
        assert_eq!(conn.downstream(1), &[2]);
        assert_eq!(conn.upstream(2), &[1]);
        assert!(conn.upstream(0).is_empty());
        assert!(conn.downstream(2).is_empty());
    }

    #[test]
    fn empty_network_yields_empty_tables() {
        let net = network(0, &[]);
        let conn = element_connectivity(&net, &ConnectivityOptions::default()).unwrap();
        assert_eq!(conn.segment_count(), 0);
    }

    #[test]
    fn downstream_segments_share_the_end_node() {
        let net = network(
            6,
            &[(0, 0, 1), (1, 1, 2), (2, 1, 3), (3, 3, 4), (4, 3, 5)],
        );
        let conn = element_connectivity(&net, &ConnectivityOptions::default()).unwrap();

        for (ne, seg) in net.segments.iter().enumerate() {
            for &ne2 in conn.downstream(ne) {
                let other = net.segments[ne2];
                assert!(other.start == seg.end || other.end == seg.end);
            }
        }
    }

    #[test]
    fn symmetry_between_up_and_down_tables() {
        let net = network(
            6,
            &[(0, 0, 1), (1, 1, 2), (2, 1, 3), (3, 3, 4), (4, 3, 5)],
        );
        let conn = element_connectivity(&net, &ConnectivityOptions::default()).unwrap();

        for ne in 0..conn.segment_count() {
            for &ne2 in conn.downstream(ne) {
                assert!(conn.upstream(ne2).contains(&ne));
            }
            for &ne2 in conn.upstream(ne) {
                assert!(conn.downstream(ne2).contains(&ne));
            }
        }
    }

    #[test]
    fn three_incident_segments_fit_within_default_cap() {
        // Bifurcation node: one incoming, two outgoing = 3 incident.
        let net = network(4, &[(0, 0, 1), (1, 1, 2), (2, 1, 3)]);
        assert!(element_connectivity(&net, &ConnectivityOptions::default()).is_ok());
    }

    #[test]
    fn four_incident_segments_exceed_default_cap() {
        // Trifurcation node: one incoming, three outgoing = 4 incident.
        let net = network(5, &[(0, 0, 1), (1, 1, 2), (2, 1, 3), (3, 1, 4)]);
        let err = element_connectivity(&net, &ConnectivityOptions::default()).unwrap_err();
        match err {
            VascError::FanOutExceeded { node, count, limit } => {
                assert_eq!(node, 1);
                assert_eq!(count, 4);
                assert_eq!(limit, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn trifurcation_allowed_with_raised_cap() {
        let net = network(5, &[(0, 0, 1), (1, 1, 2), (2, 1, 3), (3, 1, 4)]);
        let options = ConnectivityOptions::default().with_max_fan_out(4);
        let conn = element_connectivity(&net, &options).unwrap();
        assert_eq!(conn.downstream(0), &[1, 2, 3]);
    }

    #[test]
    fn unbounded_options_accept_any_fan_out() {
        let segments: Vec<(usize, usize, usize)> =
            (1..8).map(|i| (i - 1, 0, i)).collect();
        let net = network(8, &segments);
        let conn = element_connectivity(&net, &ConnectivityOptions::unbounded()).unwrap();
        assert!(conn.downstream(0).is_empty());
        assert!(conn.upstream(0).is_empty());
    }

    #[test]
    fn self_loop_rejected_by_default() {
        let net = network(2, &[(0, 0, 1), (1, 1, 1)]);
        let err = element_connectivity(&net, &ConnectivityOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            VascError::SelfLoopSegment { segment: 1, node: 1 }
        ));
    }

    #[test]
    fn self_loop_skipped_when_allowed() {
        let net = network(2, &[(0, 0, 1), (1, 1, 1)]);
        let options = ConnectivityOptions::unbounded().allow_self_loops();
        let conn = element_connectivity(&net, &options).unwrap();

        // The loop never links to itself. It is registered at node 1 twice,
        // so segment 0 sees it twice downstream, and the loop in turn sees
        // segment 0 (which ends at node 1) at its own end node.
        assert_eq!(conn.downstream(0), &[1, 1]);
        assert_eq!(conn.upstream(1), &[0, 0]);
        assert_eq!(conn.downstream(1), &[0]);
        assert_eq!(conn.upstream(0), &[1]);
    }

    #[test]
    fn out_of_range_node_index_is_rejected() {
        let net = network(2, &[(0, 0, 5)]);
        let err = element_connectivity(&net, &ConnectivityOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            VascError::InvalidNodeIndex {
                element: 0,
                node: 5,
                node_count: 2,
            }
        ));
    }
}
