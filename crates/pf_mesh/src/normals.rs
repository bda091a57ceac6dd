use bevy::math::Vec3;

/// Smooth per-vertex normals for an indexed triangle list.
///
/// Each face contributes its unnormalized cross product, so larger faces weigh
/// more. Vertices that no triangle touches fall back to their radial
/// direction, which is exact for an undisplaced sphere.
pub fn smooth_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }

    normals
        .iter()
        .zip(positions)
        .map(|(n, p)| {
            n.try_normalize()
                .unwrap_or_else(|| p.normalize_or_zero())
        })
        .collect()
}
