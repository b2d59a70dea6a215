pub mod dedup;
pub mod seed;
pub mod subdivide;

pub use dedup::MidpointCache;
pub use seed::seed_icosahedron;
pub use subdivide::Subdivide;

use crate::error::{MeshError, Result};
use crate::math::{Point3, TOLERANCE};

/// Index of a vertex or triangle within a [`MeshSnapshot`].
pub type Index = u32;

/// A triangle as an ordered triple of vertex indices.
pub type Triangle = [Index; 3];

/// An immutable snapshot of dome geometry.
///
/// Vertices are identified solely by their position in `vertices`.
/// Operations never mutate a snapshot in place; each subdivision consumes
/// one snapshot and produces a new one.
#[derive(Debug, Clone)]
pub struct MeshSnapshot {
    /// Vertex positions, all at distance `scale` from the origin.
    pub vertices: Vec<Point3>,
    /// Triangles indexing into `vertices`.
    pub triangles: Vec<Triangle>,
    /// Radius of the sphere the vertices lie on.
    pub scale: f64,
}

impl MeshSnapshot {
    /// Builds a snapshot from caller-supplied arrays, validating that every
    /// triangle references three distinct in-range vertices and every
    /// vertex is finite and away from the origin (a zero-norm vertex could
    /// never have been projected onto the sphere, and would make any later
    /// midpoint projection through it degenerate).
    ///
    /// # Errors
    ///
    /// Returns a [`MeshError`] describing the first offending vertex or
    /// triangle.
    pub fn from_parts(vertices: Vec<Point3>, triangles: Vec<Triangle>, scale: f64) -> Result<Self> {
        for (i, v) in vertices.iter().enumerate() {
            if !(v.x.is_finite() && v.y.is_finite() && v.z.is_finite()) {
                return Err(MeshError::NonFiniteVertex { index: i }.into());
            }
            if v.coords.norm() < TOLERANCE {
                return Err(MeshError::ZeroNormVertex { index: i }.into());
            }
        }
        for (i, t) in triangles.iter().enumerate() {
            for &index in t {
                if index as usize >= vertices.len() {
                    return Err(MeshError::IndexOutOfBounds {
                        triangle: i,
                        index,
                        vertex_count: vertices.len(),
                    }
                    .into());
                }
            }
            if t[0] == t[1] || t[1] == t[2] || t[0] == t[2] {
                return Err(MeshError::RepeatedIndices { triangle: i }.into());
            }
        }
        Ok(Self {
            vertices,
            triangles,
            scale,
        })
    }

    /// Number of vertices in the snapshot.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles in the snapshot.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn square_vertices() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn from_parts_accepts_valid_arrays() {
        let snapshot =
            MeshSnapshot::from_parts(square_vertices(), vec![[0, 1, 2], [0, 2, 3]], 1.0).unwrap();
        assert_eq!(snapshot.vertex_count(), 4);
        assert_eq!(snapshot.triangle_count(), 2);
    }

    #[test]
    fn from_parts_rejects_out_of_range_index() {
        let r = MeshSnapshot::from_parts(square_vertices(), vec![[0, 1, 4]], 1.0);
        assert!(r.is_err());
    }

    #[test]
    fn from_parts_rejects_repeated_indices() {
        let r = MeshSnapshot::from_parts(square_vertices(), vec![[0, 1, 1]], 1.0);
        assert!(r.is_err());
    }

    #[test]
    fn from_parts_rejects_non_finite_vertex() {
        let mut vertices = square_vertices();
        vertices[2].y = f64::NAN;
        let r = MeshSnapshot::from_parts(vertices, vec![[0, 1, 2]], 1.0);
        assert!(r.is_err());
    }

    #[test]
    fn from_parts_rejects_zero_norm_vertex() {
        let mut vertices = square_vertices();
        vertices[1] = Point3::origin();
        let r = MeshSnapshot::from_parts(vertices, vec![[0, 1, 2]], 1.0);
        assert!(r.is_err());
    }
}
