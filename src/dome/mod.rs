use std::collections::{HashMap, HashSet};

use crate::adjacency::AdjacencyTable;
use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::mesh::{seed_icosahedron, Index, MeshSnapshot, Subdivide, Triangle};
use crate::search::NeighbourhoodSearch;

/// Stateful façade over the dome mesh engine.
///
/// Owns the current mesh snapshot together with its derived adjacency
/// table, a per-vertex annotation store, and the most recent
/// neighbourhood-search result (reused by custom partial tessellation when
/// no explicit vertex set is given).
///
/// Every tessellation builds a complete new snapshot before swapping it in,
/// and all argument validation happens up front, so a failed operation
/// never leaves partially-updated state. Annotations are keyed by *current*
/// vertex index; the engine makes no promise that an index survives a
/// tessellation call, so callers needing stable identity must maintain
/// their own remap.
#[derive(Debug)]
pub struct GeodesicDome<T> {
    mesh: MeshSnapshot,
    adjacency: AdjacencyTable,
    annotations: HashMap<Index, T>,
    last_neighbourhood: Option<Vec<Index>>,
}

impl<T> GeodesicDome<T> {
    /// Creates a unit-radius dome at the given frequency: the seed
    /// icosahedron with `frequency` full subdivisions applied.
    ///
    /// # Errors
    ///
    /// Propagates subdivision failures (unreachable from the well-formed
    /// seed, but not unwrapped).
    pub fn new(frequency: usize) -> Result<Self> {
        Self::with_scale(frequency, 1.0)
    }

    /// Creates a dome at the given frequency on a sphere of radius `scale`.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidArgument`] unless `scale` is finite
    /// and positive.
    pub fn with_scale(frequency: usize, scale: f64) -> Result<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(
                OperationError::InvalidArgument(format!("scale {scale} must be positive")).into(),
            );
        }
        let mut mesh = seed_icosahedron(scale)?;
        for _ in 0..frequency {
            mesh = Subdivide::all().execute(&mesh)?;
        }
        Ok(Self::from_snapshot(mesh))
    }

    /// Rehydrates a dome from caller-persisted vertex and triangle arrays,
    /// as returned by [`GeodesicDome::vertices`] and
    /// [`GeodesicDome::triangles`] on a previous instance.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidArgument`] for a non-positive
    /// scale, or a mesh validation error if any triangle references an
    /// out-of-range or repeated vertex index, or any vertex is non-finite
    /// or at the origin.
    pub fn from_parts(
        vertices: Vec<Point3>,
        triangles: Vec<Triangle>,
        scale: f64,
    ) -> Result<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(
                OperationError::InvalidArgument(format!("scale {scale} must be positive")).into(),
            );
        }
        let mesh = MeshSnapshot::from_parts(vertices, triangles, scale)?;
        Ok(Self::from_snapshot(mesh))
    }

    fn from_snapshot(mesh: MeshSnapshot) -> Self {
        let adjacency = AdjacencyTable::build(mesh.vertex_count(), &mesh.triangles);
        Self {
            mesh,
            adjacency,
            annotations: HashMap::new(),
            last_neighbourhood: None,
        }
    }

    /// Swaps in a new snapshot and rebuilds the derived adjacency table.
    fn replace_snapshot(&mut self, mesh: MeshSnapshot) {
        self.adjacency = AdjacencyTable::build(mesh.vertex_count(), &mesh.triangles);
        self.mesh = mesh;
    }

    /// Current vertex positions.
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.mesh.vertices
    }

    /// Current triangles, indexing into [`GeodesicDome::vertices`].
    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.mesh.triangles
    }

    /// Current adjacency table.
    #[must_use]
    pub fn adjacency(&self) -> &AdjacencyTable {
        &self.adjacency
    }

    /// Radius of the sphere the dome lies on.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.mesh.scale
    }

    /// Applies `times` full subdivisions.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidArgument`] if `times` is zero.
    /// On failure the dome is left unchanged.
    pub fn tessellate(&mut self, times: usize) -> Result<()> {
        if times == 0 {
            return Err(OperationError::InvalidArgument(
                "tessellation count must be at least 1".into(),
            )
            .into());
        }
        let mut mesh = Subdivide::all().execute(&self.mesh)?;
        for _ in 1..times {
            mesh = Subdivide::all().execute(&mesh)?;
        }
        self.replace_snapshot(mesh);
        Ok(())
    }

    /// Subdivides every triangle incident to the neighbourhood of `vertex`
    /// up to `depth`.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::IndexOutOfRange`] if `vertex` is out of
    /// range. On failure the dome is left unchanged.
    pub fn partial_tessellate_vertex(&mut self, vertex: Index, depth: usize) -> Result<()> {
        let neighbourhood = self.find_neighbours_vertex(vertex, depth)?.to_vec();
        let targets = self.incident_triangles(&neighbourhood);
        self.subdivide_targets(targets)
    }

    /// Subdivides around triangle `triangle`: at depth 0 only that
    /// triangle; at greater depths every triangle incident to the
    /// neighbourhood of its three vertices up to `depth - 1`.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::IndexOutOfRange`] if `triangle` is out of
    /// range. On failure the dome is left unchanged.
    pub fn partial_tessellate_triangle(&mut self, triangle: Index, depth: usize) -> Result<()> {
        if triangle as usize >= self.mesh.triangle_count() {
            return Err(OperationError::IndexOutOfRange {
                kind: "triangle",
                index: triangle,
                len: self.mesh.triangle_count(),
            }
            .into());
        }
        if depth == 0 {
            return self.subdivide_targets(vec![triangle]);
        }
        let neighbourhood = self.find_neighbours_triangle(triangle, depth - 1)?.to_vec();
        let targets = self.incident_triangles(&neighbourhood);
        self.subdivide_targets(targets)
    }

    /// Subdivides every triangle incident to the given vertex set. An
    /// empty set reuses the most recent neighbourhood-search result.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::NoCachedNeighbourhood`] if the set is
    /// empty and no search has run, or [`OperationError::IndexOutOfRange`]
    /// for an out-of-range vertex. On failure the dome is left unchanged.
    pub fn custom_partial_tessellate(&mut self, vertex_set: &[Index]) -> Result<()> {
        let cached;
        let vertex_set = if vertex_set.is_empty() {
            cached = self
                .last_neighbourhood
                .clone()
                .ok_or(OperationError::NoCachedNeighbourhood)?;
            cached.as_slice()
        } else {
            vertex_set
        };
        for &vertex in vertex_set {
            if vertex as usize >= self.mesh.vertex_count() {
                return Err(OperationError::IndexOutOfRange {
                    kind: "vertex",
                    index: vertex,
                    len: self.mesh.vertex_count(),
                }
                .into());
            }
        }
        let targets = self.incident_triangles(vertex_set);
        self.subdivide_targets(targets)
    }

    /// Finds all vertices within `depth` edge hops of `vertex`, in BFS
    /// discovery order. The result is cached as the dome's most recent
    /// neighbourhood for [`GeodesicDome::custom_partial_tessellate`].
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::IndexOutOfRange`] if `vertex` is out of
    /// range.
    pub fn find_neighbours_vertex(&mut self, vertex: Index, depth: usize) -> Result<&[Index]> {
        let found = NeighbourhoodSearch::from_vertex(vertex, depth).execute(&self.adjacency)?;
        Ok(self.last_neighbourhood.insert(found))
    }

    /// Finds all vertices within `depth` edge hops of the three vertices
    /// of triangle `triangle`, in BFS discovery order. The result is
    /// cached as the dome's most recent neighbourhood.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::IndexOutOfRange`] if `triangle` is out of
    /// range.
    pub fn find_neighbours_triangle(&mut self, triangle: Index, depth: usize) -> Result<&[Index]> {
        let seeds = *self.mesh.triangles.get(triangle as usize).ok_or(
            OperationError::IndexOutOfRange {
                kind: "triangle",
                index: triangle,
                len: self.mesh.triangle_count(),
            },
        )?;
        let found = NeighbourhoodSearch::from_triangle(seeds, depth).execute(&self.adjacency)?;
        Ok(self.last_neighbourhood.insert(found))
    }

    /// Stores an annotation at a vertex, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::IndexOutOfRange`] if `vertex` is out of
    /// range.
    pub fn store(&mut self, vertex: Index, value: T) -> Result<()> {
        if vertex as usize >= self.mesh.vertex_count() {
            return Err(OperationError::IndexOutOfRange {
                kind: "vertex",
                index: vertex,
                len: self.mesh.vertex_count(),
            }
            .into());
        }
        self.annotations.insert(vertex, value);
        Ok(())
    }

    /// Retrieves the annotation at a vertex, or `None` if the vertex has
    /// never been annotated.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::IndexOutOfRange`] if `vertex` is out of
    /// range; an unset annotation on a valid vertex is not an error.
    pub fn retrieve(&self, vertex: Index) -> Result<Option<&T>> {
        if vertex as usize >= self.mesh.vertex_count() {
            return Err(OperationError::IndexOutOfRange {
                kind: "vertex",
                index: vertex,
                len: self.mesh.vertex_count(),
            }
            .into());
        }
        Ok(self.annotations.get(&vertex))
    }

    /// Indices of all triangles referencing at least one vertex of the set.
    #[allow(clippy::cast_possible_truncation)]
    fn incident_triangles(&self, vertex_set: &[Index]) -> Vec<Index> {
        let members: HashSet<Index> = vertex_set.iter().copied().collect();
        self.mesh
            .triangles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.iter().any(|v| members.contains(v)))
            .map(|(i, _)| i as Index)
            .collect()
    }

    fn subdivide_targets(&mut self, targets: Vec<Index>) -> Result<()> {
        if targets.is_empty() {
            return Err(OperationError::InvalidArgument(
                "at least one target triangle is required".into(),
            )
            .into());
        }
        let mesh = Subdivide::targets(targets).execute(&self.mesh)?;
        self.replace_snapshot(mesh);
        Ok(())
    }
}
