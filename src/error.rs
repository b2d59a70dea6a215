use thiserror::Error;

/// Top-level error type for the geodome kernel.
#[derive(Debug, Error)]
pub enum DomeError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroVector,

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to mesh structure, raised when validating
/// caller-supplied vertex and triangle arrays.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("triangle {triangle} references vertex {index} outside [0, {vertex_count})")]
    IndexOutOfBounds {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("triangle {triangle} has repeated vertex indices")]
    RepeatedIndices { triangle: usize },

    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteVertex { index: usize },

    #[error("vertex {index} is at the origin")]
    ZeroNormVertex { index: usize },
}

/// Errors related to dome operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{kind} index {index} is out of range [0, {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: u32,
        len: usize,
    },

    #[error("no target vertices provided and no cached neighbourhood result")]
    NoCachedNeighbourhood,
}

/// Convenience type alias for results using [`DomeError`].
pub type Result<T> = std::result::Result<T, DomeError>;
