pub mod builder;
pub mod mesh;
pub mod normals;
pub mod sphere;

pub use builder::PlanetMeshBuilder;
pub use mesh::{apply_planet_scale, PlanetMesh};
pub use normals::smooth_normals;
pub use sphere::BaseSphere;
