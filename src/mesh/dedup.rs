use std::collections::HashMap;

use crate::error::{GeometryError, OperationError, Result};
use crate::math::{midpoint, project_to_sphere, Point3};
use crate::mesh::Index;

/// Deduplicates edge-midpoint vertices during subdivision.
///
/// Two triangles sharing an edge each ask for that edge's midpoint; both
/// requests must resolve to the same vertex index. The cache keys on the
/// unordered pair of parent vertex indices rather than on the midpoint's
/// floating-point coordinates: distinct edges can never produce the same
/// parent pair, so the lookup is collision-free by construction.
#[derive(Debug, Default)]
pub struct MidpointCache {
    by_edge: HashMap<(Index, Index), Index>,
}

impl MidpointCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct edges the cache has allocated midpoints for.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_edge.len()
    }

    /// Returns `true` if no midpoints have been allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_edge.is_empty()
    }

    /// Returns the vertex index of the midpoint of edge `(a, b)`.
    ///
    /// On first request for an edge, computes the midpoint of the two
    /// parent positions, projects it onto the sphere of radius `scale`,
    /// appends it to `vertices`, and records its index. Subsequent requests
    /// for the same edge (in either order) return the recorded index.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::IndexOutOfRange`] if either parent index
    /// is not a valid vertex, [`GeometryError::Degenerate`] if `a == b`,
    /// and propagates projection failures for antipodal parents (midpoint
    /// at the origin). The latter two indicate corrupted input rather than
    /// a recoverable condition.
    #[allow(clippy::cast_possible_truncation)]
    pub fn index_for(
        &mut self,
        a: Index,
        b: Index,
        vertices: &mut Vec<Point3>,
        scale: f64,
    ) -> Result<Index> {
        for index in [a, b] {
            if index as usize >= vertices.len() {
                return Err(OperationError::IndexOutOfRange {
                    kind: "vertex",
                    index,
                    len: vertices.len(),
                }
                .into());
            }
        }
        if a == b {
            return Err(
                GeometryError::Degenerate(format!("edge ({a}, {b}) has coincident endpoints"))
                    .into(),
            );
        }
        let key = (a.min(b), a.max(b));
        if let Some(&index) = self.by_edge.get(&key) {
            return Ok(index);
        }

        let mid = midpoint(&vertices[a as usize], &vertices[b as usize]);
        let projected = project_to_sphere(&mid, scale)?;
        let index = vertices.len() as Index;
        vertices.push(projected);
        self.by_edge.insert(key, index);
        Ok(index)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn base_vertices() -> Vec<Point3> {
        vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ]
    }

    #[test]
    fn allocates_new_index_past_existing_vertices() {
        let mut vertices = base_vertices();
        let mut cache = MidpointCache::new();
        let i = cache.index_for(0, 1, &mut vertices, 1.0).unwrap();
        assert_eq!(i, 3);
        assert_eq!(vertices.len(), 4);
        assert_relative_eq!(vertices[3].coords.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn edge_order_does_not_matter() {
        let mut vertices = base_vertices();
        let mut cache = MidpointCache::new();
        let first = cache.index_for(0, 1, &mut vertices, 1.0).unwrap();
        let second = cache.index_for(1, 0, &mut vertices, 1.0).unwrap();
        assert_eq!(first, second);
        assert_eq!(vertices.len(), 4);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn distinct_edges_get_distinct_indices() {
        let mut vertices = base_vertices();
        let mut cache = MidpointCache::new();
        let ab = cache.index_for(0, 1, &mut vertices, 1.0).unwrap();
        let bc = cache.index_for(1, 2, &mut vertices, 1.0).unwrap();
        let ca = cache.index_for(2, 0, &mut vertices, 1.0).unwrap();
        assert_eq!(vec![ab, bc, ca], vec![3, 4, 5]);
    }

    #[test]
    fn coincident_endpoints_fail() {
        let mut vertices = base_vertices();
        let mut cache = MidpointCache::new();
        assert!(cache.index_for(1, 1, &mut vertices, 1.0).is_err());
    }

    #[test]
    fn antipodal_parents_fail() {
        let mut vertices = vec![Point3::new(1.0, 0.0, 0.0), Point3::new(-1.0, 0.0, 0.0)];
        let mut cache = MidpointCache::new();
        assert!(cache.index_for(0, 1, &mut vertices, 1.0).is_err());
    }
}
