use crate::error::{GeometryError, Result};
use crate::math::{Point3, TOLERANCE};

/// Projects a point radially onto the sphere of radius `scale` centered at
/// the origin.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] if the point is at (or within
/// tolerance of) the origin. This can only arise from corrupted input
/// upstream, such as two coincident triangle vertices, so it is treated as
/// fatal rather than recoverable.
pub fn project_to_sphere(point: &Point3, scale: f64) -> Result<Point3> {
    let length = point.coords.norm();
    if length < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    Ok(Point3::from(point.coords * (scale / length)))
}

/// Returns the midpoint of the segment between two points.
///
/// The computation is commutative in its arguments, so the two triangles
/// sharing an edge compute bit-identical midpoints for it.
#[must_use]
pub fn midpoint(a: &Point3, b: &Point3) -> Point3 {
    Point3::from((a.coords + b.coords) / 2.0)
}
