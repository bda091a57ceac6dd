use bevy::math::Vec3;
use pf_core::{PlanetError, MAX_ICO_SUBDIVISIONS, MAX_UV_SEGMENTS};
use std::collections::HashMap;
use std::f32::consts::{PI, TAU};
use std::sync::Arc;

/// Fixed-topology template mesh that planets are displaced from.
///
/// The index buffer is reference counted so every [`PlanetMesh`] built from
/// the template shares it instead of copying.
///
/// [`PlanetMesh`]: crate::PlanetMesh
#[derive(Clone, Debug)]
pub struct BaseSphere {
    positions: Vec<Vec3>,
    indices: Arc<[u32]>,
}

impl BaseSphere {
    /// Build a template from raw parts, checking that the index buffer is a
    /// whole number of triangles and only refers to existing vertices.
    pub fn from_parts(positions: Vec<Vec3>, indices: Vec<u32>) -> Result<Self, PlanetError> {
        if positions.is_empty() {
            return Err(PlanetError::EmptySphere);
        }
        if indices.len() % 3 != 0 {
            return Err(PlanetError::PartialTriangle(indices.len()));
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(PlanetError::IndexOutOfRange {
                index,
                vertex_count: positions.len(),
            });
        }
        Ok(Self {
            positions,
            indices: indices.into(),
        })
    }

    /// Unit UV sphere with the vertex and triangle layout of a classic
    /// latitude/longitude sphere: `(width + 1) * (height + 1)` vertices with
    /// a duplicated seam column and a full vertex ring at each pole.
    ///
    /// Segment counts are raised to at least 3 around and 2 from pole to pole
    /// and capped at [`MAX_UV_SEGMENTS`].
    pub fn uv(width_segments: u32, height_segments: u32) -> Self {
        let width = width_segments.clamp(3, MAX_UV_SEGMENTS);
        let height = height_segments.clamp(2, MAX_UV_SEGMENTS);
        let row = width + 1;

        let mut positions = Vec::with_capacity((row * (height + 1)) as usize);
        for iy in 0..=height {
            let theta = iy as f32 / height as f32 * PI;
            for ix in 0..=width {
                let phi = ix as f32 / width as f32 * TAU;
                positions.push(Vec3::new(
                    -phi.cos() * theta.sin(),
                    theta.cos(),
                    phi.sin() * theta.sin(),
                ));
            }
        }

        let mut indices = Vec::with_capacity((width * (height - 1) * 6) as usize);
        for iy in 0..height {
            for ix in 0..width {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;

                // The first and last rows collapse to a single triangle per quad.
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self {
            positions,
            indices: indices.into(),
        }
    }

    /// Unit icosphere: an icosahedron with each face split into four
    /// `subdivisions` times, midpoints pushed out to the sphere.
    /// Subdivisions are capped at [`MAX_ICO_SUBDIVISIONS`].
    pub fn icosphere(subdivisions: u32) -> Self {
        let subdivisions = subdivisions.min(MAX_ICO_SUBDIVISIONS);
        let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;

        let mut positions: Vec<Vec3> = [
            Vec3::new(-1.0, phi, 0.0),
            Vec3::new(1.0, phi, 0.0),
            Vec3::new(-1.0, -phi, 0.0),
            Vec3::new(1.0, -phi, 0.0),
            Vec3::new(0.0, -1.0, phi),
            Vec3::new(0.0, 1.0, phi),
            Vec3::new(0.0, -1.0, -phi),
            Vec3::new(0.0, 1.0, -phi),
            Vec3::new(phi, 0.0, -1.0),
            Vec3::new(phi, 0.0, 1.0),
            Vec3::new(-phi, 0.0, -1.0),
            Vec3::new(-phi, 0.0, 1.0),
        ]
        .iter()
        .map(|v| v.normalize())
        .collect();

        let mut faces: Vec<[u32; 3]> = vec![
            [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
            [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
            [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
            [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
        ];

        for _ in 0..subdivisions {
            let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
            let mut next = Vec::with_capacity(faces.len() * 4);

            for &[v0, v1, v2] in &faces {
                let m01 = midpoint(&mut positions, &mut midpoints, v0, v1);
                let m12 = midpoint(&mut positions, &mut midpoints, v1, v2);
                let m20 = midpoint(&mut positions, &mut midpoints, v2, v0);

                next.push([v0, m01, m20]);
                next.push([v1, m12, m01]);
                next.push([v2, m20, m12]);
                next.push([m01, m12, m20]);
            }
            faces = next;
        }

        Self {
            positions,
            indices: faces.into_iter().flatten().collect::<Vec<_>>().into(),
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// A new handle to the shared index buffer.
    pub fn shared_indices(&self) -> Arc<[u32]> {
        Arc::clone(&self.indices)
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

fn midpoint(
    positions: &mut Vec<Vec3>,
    cache: &mut HashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
) -> u32 {
    let key = if a < b { (a, b) } else { (b, a) };
    if let Some(&index) = cache.get(&key) {
        return index;
    }

    let mid = ((positions[a as usize] + positions[b as usize]) / 2.0).normalize();
    let index = positions.len() as u32;
    positions.push(mid);
    cache.insert(key, index);
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uv_sphere_counts() {
        let sphere = BaseSphere::uv(128, 128);
        assert_eq!(sphere.vertex_count(), 129 * 129);
        // Two triangles per quad, minus one per quad in the two pole rows.
        assert_eq!(sphere.triangle_count(), 128 * 128 * 2 - 2 * 128);
    }

    #[test]
    fn uv_sphere_is_unit_radius() {
        let sphere = BaseSphere::uv(16, 12);
        for p in sphere.positions() {
            assert!((p.length() - 1.0).abs() < 1e-5, "radius {}", p.length());
        }
        assert!((sphere.positions()[0] - Vec3::Y).length() < 1e-5);
        assert!((sphere.positions()[sphere.vertex_count() - 1] + Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn uv_sphere_clamps_segments() {
        let sphere = BaseSphere::uv(0, 0);
        assert_eq!(sphere.vertex_count(), 4 * 3);

        let wide = BaseSphere::uv(u32::MAX, 2);
        assert_eq!(wide.vertex_count(), (MAX_UV_SEGMENTS as usize + 1) * 3);
        let last = wide.vertex_count() as u32 - 1;
        assert!(wide.indices().iter().all(|&i| i <= last));
    }

    #[test]
    fn icosphere_counts() {
        let base = BaseSphere::icosphere(0);
        assert_eq!(base.vertex_count(), 12);
        assert_eq!(base.triangle_count(), 20);

        let subdivided = BaseSphere::icosphere(2);
        assert_eq!(subdivided.triangle_count(), 20 * 16);
        // V = 10 * 4^n + 2 for a subdivided icosahedron.
        assert_eq!(subdivided.vertex_count(), 10 * 16 + 2);
        for p in subdivided.positions() {
            assert!((p.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn triangles_face_outward() {
        for sphere in [BaseSphere::uv(24, 16), BaseSphere::icosphere(1)] {
            let p = sphere.positions();
            for tri in sphere.indices().chunks_exact(3) {
                let (a, b, c) = (p[tri[0] as usize], p[tri[1] as usize], p[tri[2] as usize]);
                let normal = (b - a).cross(c - a);
                let centroid = (a + b + c) / 3.0;
                assert!(normal.dot(centroid) > 0.0, "inward triangle {:?}", tri);
            }
        }
    }

    #[test]
    fn from_parts_validates_topology() {
        assert!(matches!(
            BaseSphere::from_parts(Vec::new(), Vec::new()),
            Err(PlanetError::EmptySphere)
        ));
        assert!(matches!(
            BaseSphere::from_parts(vec![Vec3::X, Vec3::Y], vec![0, 1]),
            Err(PlanetError::PartialTriangle(2))
        ));
        assert!(matches!(
            BaseSphere::from_parts(vec![Vec3::X, Vec3::Y, Vec3::Z], vec![0, 1, 3]),
            Err(PlanetError::IndexOutOfRange { index: 3, vertex_count: 3 })
        ));
        assert!(BaseSphere::from_parts(vec![Vec3::Z], Vec::new()).is_ok());
    }

    #[test]
    fn shared_indices_do_not_copy() {
        let sphere = BaseSphere::icosphere(1);
        let shared = sphere.shared_indices();
        assert!(std::ptr::eq(shared.as_ptr(), sphere.indices().as_ptr()));
    }
}
