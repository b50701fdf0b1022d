use crate::prelude::*;

// rectangle, a planar convex quad
//    p0------------p3
//     |            |
//     |            |
//    p1------------p2
//
// the containment test below relies on this winding; the axis-aligned
// constructors all emit their corners in p0 -> p1 -> p2 -> p3 order.
#[derive(Copy, Clone, Debug)]
pub struct Rectangle {
    pub p0: Point3,
    pub p1: Point3,
    pub p2: Point3,
    pub p3: Point3,
    pub normal: Vec3,
}

impl Rectangle {
    pub fn new(p0: Point3, p1: Point3, p2: Point3, p3: Point3, flip_normal: bool) -> Rectangle {
        let mut normal = (p1 - p0).cross(p2 - p0).normalized();
        if flip_normal {
            normal = -normal;
        }
        Rectangle {
            p0,
            p1,
            p2,
            p3,
            normal,
        }
    }

    pub fn from_xy(x0: f32, x1: f32, y0: f32, y1: f32, z: f32, flip_normal: bool) -> Rectangle {
        Rectangle::new(
            Point3::new(x0, y0, z),
            Point3::new(x1, y0, z),
            Point3::new(x1, y1, z),
            Point3::new(x0, y1, z),
            flip_normal,
        )
    }

    pub fn from_xz(x0: f32, x1: f32, z0: f32, z1: f32, y: f32, flip_normal: bool) -> Rectangle {
        Rectangle::new(
            Point3::new(x0, y, z0),
            Point3::new(x1, y, z0),
            Point3::new(x1, y, z1),
            Point3::new(x0, y, z1),
            flip_normal,
        )
    }

    pub fn from_yz(y0: f32, y1: f32, z0: f32, z1: f32, x: f32, flip_normal: bool) -> Rectangle {
        Rectangle::new(
            Point3::new(x, y0, z0),
            Point3::new(x, y1, z0),
            Point3::new(x, y1, z1),
            Point3::new(x, y0, z1),
            flip_normal,
        )
    }
}

impl HasBoundingBox for Rectangle {
    fn aabb(&self) -> AABB {
        let mut bounds = AABB::new(self.p0, self.p1);
        bounds.grow_mut(self.p2);
        bounds.grow_mut(self.p3);
        bounds
    }
}

impl Hittable for Rectangle {
    fn hit(&self, ray: &mut Ray) -> Option<Intersection> {
        let oa = self.p0 - ray.origin;
        let ob = self.p1 - ray.origin;
        let oc = self.p2 - ray.origin;
        let od = self.p3 - ray.origin;

        let v0 = oc.cross(ob);
        let v1 = ob.cross(oa);
        let v2 = oa.cross(od);
        let v3 = od.cross(oc);

        let v0d = v0 * ray.direction;
        let v1d = v1 * ray.direction;
        let v2d = v2 * ray.direction;
        let v3d = v3 * ray.direction;

        let inside = (v0d < 0.0 && v1d < 0.0 && v2d < 0.0 && v3d < 0.0)
            || (v0d >= 0.0 && v1d >= 0.0 && v2d >= 0.0 && v3d >= 0.0);
        if !inside {
            return None;
        }

        let distance = (self.normal * oa) / (self.normal * ray.direction);
        if distance <= ray.tmin || distance >= ray.tmax {
            return None;
        }

        ray.tmax = distance;
        let point = ray.point_at_parameter(distance);
        let normal = if self.normal * ray.direction <= 0.0 {
            self.normal
        } else {
            -self.normal
        };
        Some(Intersection::new(point, normal, -ray.direction))
    }

    fn area(&self) -> f32 {
        (self.p0 - self.p1).cross(self.p2 - self.p1).norm()
    }

    fn sample_surface(&self, s: Sample2D) -> (Point3, Vec3, f32) {
        let point = self.p1 + (self.p0 - self.p1) * s.x + (self.p2 - self.p1) * s.y;
        (point, self.normal, 1.0 / self.area())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_inside_and_miss_outside() {
        let rect = Rectangle::from_xy(-1.0, 1.0, -1.0, 1.0, 0.0, false);
        assert!((rect.normal - Vec3::Z).norm() < 1e-6);

        let mut hit_ray = Ray::new(Point3::new(0.5, -0.5, 2.0), -Vec3::Z);
        let isect = rect.hit(&mut hit_ray).unwrap();
        assert!((hit_ray.tmax - 2.0).abs() < 1e-5);
        // shading normal faces the ray
        assert!((isect.normal - Vec3::Z).norm() < 1e-6);

        let mut miss_ray = Ray::new(Point3::new(1.5, 0.0, 2.0), -Vec3::Z);
        assert!(rect.hit(&mut miss_ray).is_none());
    }

    #[test]
    fn test_hit_from_behind_flips_shading_normal() {
        let rect = Rectangle::from_xy(-1.0, 1.0, -1.0, 1.0, 0.0, false);
        let mut ray = Ray::new(Point3::new(0.0, 0.0, -2.0), Vec3::Z);
        let isect = rect.hit(&mut ray).unwrap();
        assert!((isect.normal + Vec3::Z).norm() < 1e-6);
    }

    #[test]
    fn test_area_and_sample() {
        let rect = Rectangle::from_xz(0.0, 2.0, 0.0, 3.0, 1.0, false);
        assert!((rect.area() - 6.0).abs() < 1e-5);

        let (point, _, pdf) = rect.sample_surface(Sample2D::new(0.5, 0.5));
        assert!((point.y - 1.0).abs() < 1e-6);
        assert!((pdf - 1.0 / 6.0).abs() < 1e-6);
    }
}
