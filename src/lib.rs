pub mod adjacency;
pub mod dome;
pub mod error;
pub mod math;
pub mod mesh;
pub mod search;

pub use adjacency::AdjacencyTable;
pub use dome::GeodesicDome;
pub use error::{DomeError, Result};
pub use mesh::{Index, MeshSnapshot, Triangle};
pub use search::NeighbourhoodSearch;
