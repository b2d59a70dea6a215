use crate::error::{OperationError, Result};
use crate::mesh::{Index, MeshSnapshot, MidpointCache};

/// Refines a mesh by splitting triangles into four at their edge midpoints.
///
/// Targets either every triangle (full subdivision) or a caller-selected
/// subset (partial subdivision). Untargeted triangles are copied through
/// with their vertex indices unchanged: the input vertices are preserved as
/// a prefix of the output vertex array, so existing indices stay valid.
#[derive(Debug, Clone)]
pub struct Subdivide {
    targets: Vec<Index>,
}

impl Subdivide {
    /// Creates a full subdivision: every triangle is split.
    #[must_use]
    pub fn all() -> Self {
        Self {
            targets: Vec::new(),
        }
    }

    /// Creates a partial subdivision restricted to the listed triangle
    /// indices. An empty list is equivalent to [`Subdivide::all`].
    /// Duplicate indices are collapsed.
    #[must_use]
    pub fn targets(targets: Vec<Index>) -> Self {
        Self { targets }
    }

    /// Executes the subdivision, producing a new snapshot.
    ///
    /// Each targeted triangle `(a, b, c)` is replaced by four children
    /// built from its projected edge midpoints. Midpoints on edges shared
    /// between two targeted triangles are allocated once via
    /// [`MidpointCache`], so the output vertex count grows by exactly the
    /// number of distinct edges touched by the target set.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::IndexOutOfRange`] if any target index is
    /// not a valid triangle index, before any geometry is computed.
    /// Propagates degenerate-geometry failures from midpoint projection.
    pub fn execute(&self, mesh: &MeshSnapshot) -> Result<MeshSnapshot> {
        let triangle_count = mesh.triangle_count();
        let mut is_target = vec![false; triangle_count];

        if self.targets.is_empty() {
            is_target.fill(true);
        } else {
            for &t in &self.targets {
                if t as usize >= triangle_count {
                    return Err(OperationError::IndexOutOfRange {
                        kind: "triangle",
                        index: t,
                        len: triangle_count,
                    }
                    .into());
                }
                is_target[t as usize] = true;
            }
        }

        let target_count = is_target.iter().filter(|&&hit| hit).count();
        let mut vertices = mesh.vertices.clone();
        let mut triangles = Vec::with_capacity(triangle_count + 3 * target_count);
        let mut cache = MidpointCache::new();

        for (i, tri) in mesh.triangles.iter().enumerate() {
            if !is_target[i] {
                triangles.push(*tri);
                continue;
            }
            let [a, b, c] = *tri;
            let m_ab = cache.index_for(a, b, &mut vertices, mesh.scale)?;
            let m_bc = cache.index_for(b, c, &mut vertices, mesh.scale)?;
            let m_ca = cache.index_for(c, a, &mut vertices, mesh.scale)?;

            triangles.push([a, m_ab, m_ca]);
            triangles.push([b, m_bc, m_ab]);
            triangles.push([c, m_ca, m_bc]);
            triangles.push([m_ab, m_bc, m_ca]);
        }

        Ok(MeshSnapshot {
            vertices,
            triangles,
            scale: mesh.scale,
        })
    }
}
