use crate::geometry::Triangle;
use crate::math::{Point3, Vec3};

use std::path::Path;

#[derive(Copy, Clone, Debug)]
pub struct MeshOptions {
    pub flip_normal: bool,
    /// negates z, converting between left and right handed assets
    pub flip_handedness: bool,
    pub scale: f32,
    pub offset: Vec3,
}

impl Default for MeshOptions {
    fn default() -> Self {
        MeshOptions {
            flip_normal: false,
            flip_handedness: false,
            scale: 1.0,
            offset: Vec3::ZERO,
        }
    }
}

/// Loads a Wavefront OBJ as a flat list of triangles, flat-shaded from
/// vertex positions with one normal per triangle. A missing or malformed
/// file is logged and yields an empty list; the caller treats that as "no
/// triangles".
pub fn load_triangle_mesh<P: AsRef<Path>>(path: P, options: &MeshOptions) -> Vec<Triangle> {
    let path = path.as_ref();
    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };

    let models = match tobj::load_obj(path, &load_options) {
        Ok((models, _materials)) => models,
        Err(e) => {
            error!("failed to load mesh {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    let mut triangles = Vec::new();
    for model in &models {
        let mesh = &model.mesh;
        for indices in mesh.indices.chunks_exact(3) {
            let position = |index: u32| {
                let base = 3 * index as usize;
                let mut p = Point3::new(
                    mesh.positions[base],
                    mesh.positions[base + 1],
                    mesh.positions[base + 2],
                );
                if options.flip_handedness {
                    p.z = -p.z;
                }
                Point3::from(Vec3::from(p) * options.scale + options.offset)
            };

            triangles.push(Triangle::new(
                position(indices[0]),
                position(indices[1]),
                position(indices[2]),
                options.flip_normal,
            ));
        }
    }

    info!(
        "loaded {} triangles from {}",
        triangles.len(),
        path.display()
    );
    triangles
}
