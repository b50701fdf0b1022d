use crate::aabb::HasBoundingBox;
use crate::math::{distance_squared, Point3, Ray, Sample2D, Vec3};

/*
  prev   n   light
  ----   ^   -----
    ^    |    ^
     \   |   /
   wo \  |  / wi is unknown, sampled from the bsdf or a light
       \ | /
        \|/
      -------
       isect
*/
#[derive(Copy, Clone, Debug)]
pub struct Intersection {
    pub point: Point3,
    pub normal: Vec3,
    pub wo: Vec3,
    /// index of the primitive that produced this hit, set by the scene
    pub primitive: usize,
}

impl Intersection {
    pub fn new(point: Point3, normal: Vec3, wo: Vec3) -> Self {
        Intersection {
            point,
            normal,
            wo,
            primitive: usize::MAX,
        }
    }

    pub fn spawn_ray(&self, direction: Vec3) -> Ray {
        Ray::new(self.point, direction)
    }

    pub fn spawn_ray_to(&self, target: Point3) -> Ray {
        self.spawn_ray((target - self.point).normalized())
    }
}

pub trait Hittable: HasBoundingBox {
    /// Narrows `ray.tmax` to the hit distance when a hit is found.
    fn hit(&self, ray: &mut Ray) -> Option<Intersection>;

    fn area(&self) -> f32;

    /// Uniform position on the surface: (point, normal, area-measure pdf).
    fn sample_surface(&self, s: Sample2D) -> (Point3, Vec3, f32);

    /// Position on the surface as seen from `from`:
    /// (point, normal, solid-angle pdf).
    fn sample_toward(&self, from: Point3, s: Sample2D) -> (Point3, Vec3, f32) {
        let (point, normal, area_pdf) = self.sample_surface(s);
        let wi = point - from;
        let dist_squared = wi.norm_squared();
        if dist_squared == 0.0 {
            return (point, normal, 0.0);
        }
        let wi = wi.normalized();
        // area measure to solid angle about the light surface normal
        let mut pdf = area_pdf * dist_squared / (normal * -wi).abs();
        if pdf.is_infinite() {
            pdf = 0.0;
        }
        (point, normal, pdf)
    }

    /// Solid-angle pdf of reaching this surface along `wi` from `from`.
    fn pdf_toward(&self, from: Point3, wi: Vec3) -> f32 {
        let mut ray = Ray::new(from, wi);
        let on_surface = match self.hit(&mut ray) {
            Some(isect) => isect,
            None => return 0.0,
        };

        let pdf = distance_squared(from, on_surface.point)
            / ((on_surface.normal * -wi).abs() * self.area());
        if pdf.is_infinite() {
            0.0
        } else {
            pdf
        }
    }
}
