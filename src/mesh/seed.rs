use crate::error::Result;
use crate::math::{project_to_sphere, Point3};
use crate::mesh::{MeshSnapshot, Triangle};

/// The 20 faces of the icosahedron, indexing into the corner table below.
const ICOSAHEDRON_TRIANGLES: [Triangle; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Corner positions of a regular icosahedron: three mutually orthogonal
/// golden-ratio rectangles.
fn icosahedron_corners() -> [Point3; 12] {
    let g = (1.0 + 5.0_f64.sqrt()) / 2.0;
    [
        Point3::new(-1.0, g, 0.0),
        Point3::new(1.0, g, 0.0),
        Point3::new(-1.0, -g, 0.0),
        Point3::new(1.0, -g, 0.0),
        Point3::new(0.0, -1.0, g),
        Point3::new(0.0, 1.0, g),
        Point3::new(0.0, -1.0, -g),
        Point3::new(0.0, 1.0, -g),
        Point3::new(g, 0.0, -1.0),
        Point3::new(g, 0.0, 1.0),
        Point3::new(-g, 0.0, -1.0),
        Point3::new(-g, 0.0, 1.0),
    ]
}

/// Produces the frequency-0 dome: the 12 icosahedron corners projected onto
/// the sphere of radius `scale`, with the fixed 20-triangle connectivity.
///
/// Deterministic across runs: both the corner table and the connectivity
/// table are constants.
///
/// # Errors
///
/// Propagates projection failures; unreachable for the fixed corner table,
/// which contains no zero-length position.
pub fn seed_icosahedron(scale: f64) -> Result<MeshSnapshot> {
    let vertices = icosahedron_corners()
        .iter()
        .map(|corner| project_to_sphere(corner, scale))
        .collect::<Result<Vec<_>>>()?;

    Ok(MeshSnapshot {
        vertices,
        triangles: ICOSAHEDRON_TRIANGLES.to_vec(),
        scale,
    })
}
