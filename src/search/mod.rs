use crate::adjacency::AdjacencyTable;
use crate::error::{OperationError, Result};
use crate::mesh::{Index, Triangle};

/// Depth-bounded breadth-first search over an [`AdjacencyTable`].
///
/// The result accumulates vertices in discovery order, starting with the
/// seeds themselves: depth 0 returns exactly the seeds, and each further
/// round adds the not-yet-visited neighbours of the previous frontier. The
/// traversal stops early once a round discovers nothing new, so on a
/// connected mesh the result saturates at the full vertex set.
#[derive(Debug, Clone)]
pub struct NeighbourhoodSearch {
    seeds: Vec<Index>,
    depth: usize,
}

impl NeighbourhoodSearch {
    /// Search seeded from a single vertex.
    #[must_use]
    pub fn from_vertex(vertex: Index, depth: usize) -> Self {
        Self {
            seeds: vec![vertex],
            depth,
        }
    }

    /// Search seeded from a triangle's three vertices simultaneously.
    #[must_use]
    pub fn from_triangle(triangle: Triangle, depth: usize) -> Self {
        Self {
            seeds: triangle.to_vec(),
            depth,
        }
    }

    /// Runs the traversal, returning the reachable vertex indices in
    /// discovery order, without duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::IndexOutOfRange`] if any seed is not a
    /// valid vertex of the table.
    pub fn execute(&self, adjacency: &AdjacencyTable) -> Result<Vec<Index>> {
        let vertex_count = adjacency.vertex_count();
        for &seed in &self.seeds {
            if seed as usize >= vertex_count {
                return Err(OperationError::IndexOutOfRange {
                    kind: "vertex",
                    index: seed,
                    len: vertex_count,
                }
                .into());
            }
        }

        let mut visited = vec![false; vertex_count];
        let mut found = Vec::new();
        let mut frontier = Vec::new();
        for &seed in &self.seeds {
            if !visited[seed as usize] {
                visited[seed as usize] = true;
                found.push(seed);
                frontier.push(seed);
            }
        }

        for _ in 0..self.depth {
            let mut next = Vec::new();
            for &vertex in &frontier {
                // Frontier entries are always valid table indices.
                if let Some(row) = adjacency.neighbours(vertex) {
                    for &neighbour in row {
                        if !visited[neighbour as usize] {
                            visited[neighbour as usize] = true;
                            found.push(neighbour);
                            next.push(neighbour);
                        }
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        Ok(found)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mesh::seed_icosahedron;

    fn icosahedron_adjacency() -> AdjacencyTable {
        let mesh = seed_icosahedron(1.0).unwrap();
        AdjacencyTable::build(mesh.vertex_count(), &mesh.triangles)
    }

    #[test]
    fn depth_zero_returns_only_the_seed() {
        let adj = icosahedron_adjacency();
        let found = NeighbourhoodSearch::from_vertex(7, 0).execute(&adj).unwrap();
        assert_eq!(found, vec![7]);
    }

    #[test]
    fn depth_one_returns_seed_plus_direct_neighbours() {
        let adj = icosahedron_adjacency();
        let found = NeighbourhoodSearch::from_vertex(0, 1).execute(&adj).unwrap();
        assert_eq!(found.len(), 6);
        assert_eq!(found[0], 0);
        for &v in &found[1..] {
            assert!(adj.contains_edge(0, v));
        }
    }

    #[test]
    fn result_grows_monotonically_with_depth() {
        let adj = icosahedron_adjacency();
        let mut previous = 0;
        for depth in 0..5 {
            let found = NeighbourhoodSearch::from_vertex(0, depth)
                .execute(&adj)
                .unwrap();
            assert!(found.len() >= previous);
            previous = found.len();
        }
    }

    #[test]
    fn search_saturates_on_connected_mesh() {
        let adj = icosahedron_adjacency();
        // Icosahedron diameter is 3; anything beyond covers all vertices.
        let found = NeighbourhoodSearch::from_vertex(0, 3).execute(&adj).unwrap();
        assert_eq!(found.len(), 12);
        let further = NeighbourhoodSearch::from_vertex(0, 10).execute(&adj).unwrap();
        assert_eq!(further.len(), 12);
    }

    #[test]
    fn no_duplicates_in_result() {
        let adj = icosahedron_adjacency();
        let found = NeighbourhoodSearch::from_vertex(0, 2).execute(&adj).unwrap();
        let mut sorted = found.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), found.len());
    }

    #[test]
    fn triangle_seed_at_depth_zero_returns_its_vertices() {
        let adj = icosahedron_adjacency();
        let found = NeighbourhoodSearch::from_triangle([0, 11, 5], 0)
            .execute(&adj)
            .unwrap();
        assert_eq!(found, vec![0, 11, 5]);
    }

    #[test]
    fn triangle_seed_expands_from_all_three_vertices() {
        let adj = icosahedron_adjacency();
        let found = NeighbourhoodSearch::from_triangle([0, 11, 5], 1)
            .execute(&adj)
            .unwrap();
        assert_eq!(&found[..3], &[0, 11, 5]);
        // Each result past the seeds neighbours at least one seed.
        for &v in &found[3..] {
            assert!(
                adj.contains_edge(0, v) || adj.contains_edge(11, v) || adj.contains_edge(5, v)
            );
        }
    }

    #[test]
    fn out_of_range_seed_fails() {
        let adj = icosahedron_adjacency();
        assert!(NeighbourhoodSearch::from_vertex(12, 1).execute(&adj).is_err());
        assert!(NeighbourhoodSearch::from_triangle([0, 1, 40], 0)
            .execute(&adj)
            .is_err());
    }
}
