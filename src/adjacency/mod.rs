use crate::mesh::{Index, Triangle};

/// Per-vertex neighbour lists derived from a triangle array.
///
/// Derived data: rebuilt from scratch whenever the mesh changes, never
/// edited directly. The neighbour relation is symmetric by construction,
/// since every triangle edge is inserted at both endpoints. Rows grow as
/// needed; regular geodesic subdivision keeps vertex degree at 5 or 6, but
/// partial tessellation states are not bounded by that and rows impose no
/// fixed capacity.
#[derive(Debug, Clone)]
pub struct AdjacencyTable {
    neighbours: Vec<Vec<Index>>,
}

impl AdjacencyTable {
    /// Builds the table for `vertex_count` vertices from a triangle array.
    ///
    /// Each undirected triangle edge is inserted into both endpoints'
    /// neighbour lists, skipping repeats from triangles sharing an edge.
    ///
    /// # Panics
    ///
    /// Panics if any triangle references a vertex index `>= vertex_count`;
    /// callers pass triangles from a validated [`crate::mesh::MeshSnapshot`].
    #[must_use]
    pub fn build(vertex_count: usize, triangles: &[Triangle]) -> Self {
        let mut neighbours = vec![Vec::new(); vertex_count];
        for t in triangles {
            for (a, b) in [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])] {
                Self::insert(&mut neighbours, a, b);
                Self::insert(&mut neighbours, b, a);
            }
        }
        Self { neighbours }
    }

    fn insert(neighbours: &mut [Vec<Index>], root: Index, other: Index) {
        let row = &mut neighbours[root as usize];
        if !row.contains(&other) {
            row.push(other);
        }
    }

    /// Number of vertices the table covers.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.neighbours.len()
    }

    /// Neighbour indices of `vertex`, or `None` if out of range.
    #[must_use]
    pub fn neighbours(&self, vertex: Index) -> Option<&[Index]> {
        self.neighbours.get(vertex as usize).map(Vec::as_slice)
    }

    /// Returns `true` if `a` and `b` share an edge.
    #[must_use]
    pub fn contains_edge(&self, a: Index, b: Index) -> bool {
        self.neighbours(a).is_some_and(|row| row.contains(&b))
    }
}
