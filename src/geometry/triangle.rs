use crate::prelude::*;

/// Flat-shaded triangle; the normal comes from the winding of the three
/// vertices at construction time.
#[derive(Copy, Clone, Debug)]
pub struct Triangle {
    pub p0: Point3,
    pub p1: Point3,
    pub p2: Point3,
    pub normal: Vec3,
}

impl Triangle {
    pub fn new(p0: Point3, p1: Point3, p2: Point3, flip_normal: bool) -> Triangle {
        let mut normal = (p1 - p0).cross(p2 - p0).normalized();
        if flip_normal {
            normal = -normal;
        }
        Triangle { p0, p1, p2, normal }
    }
}

impl HasBoundingBox for Triangle {
    fn aabb(&self) -> AABB {
        let mut bounds = AABB::new(self.p0, self.p1);
        bounds.grow_mut(self.p2);
        bounds
    }
}

impl Hittable for Triangle {
    fn hit(&self, ray: &mut Ray) -> Option<Intersection> {
        // https://github.com/SmallVCM/SmallVCM/blob/master/src/geometry.hxx#L125-L156
        let oa = self.p0 - ray.origin;
        let ob = self.p1 - ray.origin;
        let oc = self.p2 - ray.origin;

        let v0 = oc.cross(ob);
        let v1 = ob.cross(oa);
        let v2 = oa.cross(oc);

        let v0d = v0 * ray.direction;
        let v1d = v1 * ray.direction;
        let v2d = v2 * ray.direction;

        let inside = (v0d < 0.0 && v1d < 0.0 && v2d < 0.0)
            || (v0d >= 0.0 && v1d >= 0.0 && v2d >= 0.0);
        if !inside {
            return None;
        }

        let distance = (self.normal * oa) / (self.normal * ray.direction);
        if distance <= ray.tmin || distance >= ray.tmax {
            return None;
        }

        ray.tmax = distance;
        let point = ray.point_at_parameter(distance);
        Some(Intersection::new(point, self.normal, -ray.direction))
    }

    fn area(&self) -> f32 {
        0.5 * (self.p1 - self.p0).cross(self.p2 - self.p0).norm()
    }

    fn sample_surface(&self, s: Sample2D) -> (Point3, Vec3, f32) {
        let (b0, b1) = uniform_triangle_sample(s);
        let point = Point3::from(
            Vec3::from(self.p0) * b0
                + Vec3::from(self.p1) * b1
                + Vec3::from(self.p2) * (1.0 - b0 - b1),
        );
        (point, self.normal, 1.0 / self.area())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            false,
        )
    }

    #[test]
    fn test_hit_inside_and_miss_outside() {
        let triangle = unit_triangle();

        let mut hit_ray = Ray::new(Point3::new(0.25, 0.25, 1.0), -Vec3::Z);
        assert!(triangle.hit(&mut hit_ray).is_some());
        assert!((hit_ray.tmax - 1.0).abs() < 1e-5);

        let mut miss_ray = Ray::new(Point3::new(0.75, 0.75, 1.0), -Vec3::Z);
        assert!(triangle.hit(&mut miss_ray).is_none());
    }

    #[test]
    fn test_area_and_normal() {
        let triangle = unit_triangle();
        assert!((triangle.area() - 0.5).abs() < 1e-6);
        assert!((triangle.normal - Vec3::Z).norm() < 1e-6);

        let flipped = Triangle::new(triangle.p0, triangle.p1, triangle.p2, true);
        assert!((flipped.normal + Vec3::Z).norm() < 1e-6);
    }

    #[test]
    fn test_sample_surface_on_triangle() {
        let triangle = unit_triangle();
        let (point, normal, pdf) = triangle.sample_surface(Sample2D::new(0.4, 0.9));
        assert!(point.x >= 0.0 && point.y >= 0.0 && point.x + point.y <= 1.0 + 1e-6);
        assert_eq!(point.z, 0.0);
        assert_eq!(normal, triangle.normal);
        assert!((pdf - 2.0).abs() < 1e-5);
    }
}
