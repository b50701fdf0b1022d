use crate::prelude::*;

#[derive(Copy, Clone, Debug)]
pub struct Sphere {
    pub center: Point3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Point3, radius: f32) -> Sphere {
        Sphere { center, radius }
    }
}

impl HasBoundingBox for Sphere {
    fn aabb(&self) -> AABB {
        let half = Vec3::from(self.radius);
        AABB::new(self.center - half, self.center + half)
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &mut Ray) -> Option<Intersection> {
        let oc: Vec3 = ray.origin - self.center;
        let a = ray.direction * ray.direction;
        let half_b = oc * ray.direction;
        let c = oc * oc - self.radius * self.radius;
        let discriminant = half_b * half_b - a * c;
        if discriminant <= 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let near = (-half_b - root) / a;
        let time = if near < ray.tmax && near > ray.tmin {
            near
        } else {
            let far = (-half_b + root) / a;
            if far < ray.tmax && far > ray.tmin {
                far
            } else {
                return None;
            }
        };

        ray.tmax = time;
        let point = ray.point_at_parameter(time);
        let normal = (point - self.center).normalized();
        Some(Intersection::new(point, normal, -ray.direction))
    }

    fn area(&self) -> f32 {
        4.0 * PI * self.radius * self.radius
    }

    fn sample_surface(&self, s: Sample2D) -> (Point3, Vec3, f32) {
        let normal = uniform_sphere_sample(s);
        let point = self.center + self.radius * normal;
        (point, normal, 1.0 / self.area())
    }

    fn sample_toward(&self, from: Point3, s: Sample2D) -> (Point3, Vec3, f32) {
        // inside or on the sphere: area-measure sampling converted to
        // solid angle about the sampled surface normal
        if distance_squared(from, self.center) <= self.radius * self.radius {
            let (point, normal, area_pdf) = self.sample_surface(s);
            let wi = point - from;
            let dist_squared = wi.norm_squared();
            if dist_squared == 0.0 {
                return (point, normal, 0.0);
            }
            let wi = wi.normalized();
            let mut pdf = area_pdf * dist_squared / (normal * -wi).abs();
            if pdf.is_infinite() {
                pdf = 0.0;
            }
            return (point, normal, pdf);
        }

        // sample the sphere uniformly inside the subtended cone
        let dist = distance(from, self.center);
        let inv_dist = 1.0 / dist;

        let sin_theta_max_sq = self.radius * self.radius * inv_dist * inv_dist;
        let inv_sin_theta_max = 1.0 / sin_theta_max_sq.sqrt();
        let cos_theta_max = (1.0 - sin_theta_max_sq).max(0.0).sqrt();

        let mut cos_theta = (cos_theta_max - 1.0) * s.x + 1.0;
        let mut sin_theta_sq = 1.0 - cos_theta * cos_theta;

        if sin_theta_max_sq < 0.00068523 {
            // sin^2(1.5 deg): fall back to a Taylor expansion for narrow
            // cones, where the standard approach suffers from severe
            // cancellation errors
            sin_theta_sq = sin_theta_max_sq * s.x;
            cos_theta = (1.0 - sin_theta_sq).sqrt();
        }

        let cos_alpha = sin_theta_sq * inv_sin_theta_max
            + cos_theta
                * (1.0 - sin_theta_sq * inv_sin_theta_max * inv_sin_theta_max)
                    .max(0.0)
                    .sqrt();
        let sin_alpha = (1.0 - cos_alpha * cos_alpha).max(0.0).sqrt();
        let phi = s.y * 2.0 * PI;

        let axis = (self.center - from) * inv_dist;
        let frame = TangentFrame::from_normal(axis);

        let world_normal = spherical_direction_in(
            sin_alpha,
            cos_alpha,
            phi,
            -frame.bitangent,
            -frame.tangent,
            -frame.normal,
        );
        let world_point = self.center + self.radius * world_normal;

        (world_point, world_normal, uniform_cone_pdf(cos_theta_max))
    }

    fn pdf_toward(&self, from: Point3, wi: Vec3) -> f32 {
        // uniform area pdf when the reference point is inside the sphere
        if distance_squared(from, self.center) <= self.radius * self.radius {
            let mut ray = Ray::new(from, wi);
            let on_surface = match self.hit(&mut ray) {
                Some(isect) => isect,
                None => return 0.0,
            };
            let pdf = distance_squared(from, on_surface.point)
                / ((on_surface.normal * -wi).abs() * self.area());
            return if pdf.is_infinite() { 0.0 } else { pdf };
        }

        let sin_theta_max_sq =
            self.radius * self.radius / distance_squared(from, self.center);
        let cos_theta_max = (1.0 - sin_theta_max_sq).max(0.0).sqrt();
        uniform_cone_pdf(cos_theta_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_narrows_tmax() {
        let sphere = Sphere::new(Point3::new(0.0, 0.0, 5.0), 1.0);
        let mut ray = Ray::new(Point3::ORIGIN, Vec3::Z);
        let isect = sphere.hit(&mut ray).unwrap();
        assert!((ray.tmax - 4.0).abs() < 1e-4);
        assert!((isect.normal - -Vec3::Z).norm() < 1e-4);
        assert!((isect.wo - -Vec3::Z).norm() < 1e-5);
    }

    #[test]
    fn test_spawned_ray_does_not_rehit_surface() {
        let sphere = Sphere::new(Point3::new(0.0, 0.0, 5.0), 1.0);
        let mut ray = Ray::new(Point3::ORIGIN, Vec3::Z);
        let isect = sphere.hit(&mut ray).unwrap();

        // reflect straight back toward the camera
        let mut bounce = isect.spawn_ray(-Vec3::Z);
        assert!(sphere.hit(&mut bounce).is_none());
    }

    #[test]
    fn test_sample_toward_from_inside_uses_area_measure() {
        let sphere = Sphere::new(Point3::ORIGIN, 2.0);
        let from = Point3::new(0.5, 0.0, 0.0);
        let (point, normal, pdf) = sphere.sample_toward(from, Sample2D::new(0.3, 0.7));

        let wi = (point - from).normalized();
        let expected =
            (1.0 / sphere.area()) * distance_squared(from, point) / (normal * -wi).abs();
        assert!((pdf - expected).abs() / expected < 1e-4);
    }

    #[test]
    fn test_sample_toward_outside_matches_cone_pdf() {
        let sphere = Sphere::new(Point3::ORIGIN, 1.0);
        let from = Point3::new(0.0, 0.0, 4.0);
        let (point, _, pdf) = sphere.sample_toward(from, Sample2D::new(0.25, 0.5));

        let sin2 = 1.0 / 16.0;
        let cos_theta_max = (1.0f32 - sin2).sqrt();
        assert!((pdf - uniform_cone_pdf(cos_theta_max)).abs() < 1e-4);

        let wi = (point - from).normalized();
        assert!((sphere.pdf_toward(from, wi) - pdf).abs() < 1e-4);
    }
}
