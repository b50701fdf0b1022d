use super::{Sample2D, Vec3};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

// https://www.pbr-book.org/3ed-2018/Monte_Carlo_Integration/2D_Sampling_with_Multidimensional_Transformations

pub fn concentric_disk_sample(s: Sample2D) -> (f32, f32) {
    // map to [-1, 1]^2
    let ox = 2.0 * s.x - 1.0;
    let oy = 2.0 * s.y - 1.0;

    if ox == 0.0 && oy == 0.0 {
        return (0.0, 0.0);
    }

    let (radius, theta) = if ox.abs() > oy.abs() {
        (ox, FRAC_PI_4 * (oy / ox))
    } else {
        (oy, FRAC_PI_2 - FRAC_PI_4 * (ox / oy))
    };

    (radius * theta.cos(), radius * theta.sin())
}

pub fn cosine_hemisphere_sample(s: Sample2D) -> Vec3 {
    let (x, y) = concentric_disk_sample(s);
    let z = (1.0 - x * x - y * y).max(0.0).sqrt();
    Vec3::new(x, y, z)
}

pub fn cosine_hemisphere_pdf(cos_theta: f32) -> f32 {
    cos_theta / PI
}

pub fn uniform_sphere_sample(s: Sample2D) -> Vec3 {
    let z = 1.0 - 2.0 * s.x;
    let radius = (1.0 - z * z).max(0.0).sqrt();
    let phi = 2.0 * PI * s.y;
    Vec3::new(radius * phi.cos(), radius * phi.sin(), z)
}

pub fn uniform_sphere_pdf() -> f32 {
    1.0 / (4.0 * PI)
}

pub fn uniform_cone_pdf(cos_theta_max: f32) -> f32 {
    1.0 / (2.0 * PI * (1.0 - cos_theta_max))
}

pub fn uniform_triangle_sample(s: Sample2D) -> (f32, f32) {
    let su0 = s.x.sqrt();
    (1.0 - su0, s.y * su0)
}

pub fn spherical_direction(sin_theta: f32, cos_theta: f32, phi: f32) -> Vec3 {
    Vec3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
}

pub fn spherical_direction_in(
    sin_theta: f32,
    cos_theta: f32,
    phi: f32,
    x: Vec3,
    y: Vec3,
    z: Vec3,
) -> Vec3 {
    x * (sin_theta * phi.cos()) + y * (sin_theta * phi.sin()) + z * cos_theta
}

pub fn spherical_theta(v: Vec3) -> f32 {
    v.z.clamp(-1.0, 1.0).acos()
}
