use crate::prelude::*;

#[derive(Copy, Clone, Debug)]
pub struct Disk {
    pub position: Point3,
    pub normal: Vec3,
    pub radius: f32,
    frame: TangentFrame,
}

impl Disk {
    pub fn new(position: Point3, normal: Vec3, radius: f32) -> Disk {
        let normal = normal.normalized();
        Disk {
            position,
            normal,
            radius,
            frame: TangentFrame::from_normal(normal),
        }
    }
}

impl HasBoundingBox for Disk {
    fn aabb(&self) -> AABB {
        let rb = self.frame.bitangent * self.radius;
        let rt = self.frame.tangent * self.radius;

        let mut bounds = AABB::new(self.position + rb + rt, self.position + rb - rt);
        bounds.grow_mut(self.position - rb - rt);
        bounds.grow_mut(self.position - rb + rt);
        bounds
    }
}

impl Hittable for Disk {
    fn hit(&self, ray: &mut Ray) -> Option<Intersection> {
        let denom = ray.direction * self.normal;
        if denom.abs() < 1e-7 {
            return None;
        }

        let op = self.position - ray.origin;
        let distance = (self.normal * op) / denom;
        if distance <= ray.tmin || distance >= ray.tmax {
            return None;
        }

        let point = ray.point_at_parameter(distance);
        if crate::math::distance(self.position, point) > self.radius {
            return None;
        }

        ray.tmax = distance;
        Some(Intersection::new(point, self.normal, -ray.direction))
    }

    fn area(&self) -> f32 {
        PI * self.radius * self.radius
    }

    fn sample_surface(&self, s: Sample2D) -> (Point3, Vec3, f32) {
        let (x, y) = concentric_disk_sample(s);
        let point =
            self.position + (self.frame.bitangent * x + self.frame.tangent * y) * self.radius;
        (point, self.normal, 1.0 / self.area())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_within_radius() {
        let disk = Disk::new(Point3::ORIGIN, Vec3::Z, 1.0);

        let mut hit_ray = Ray::new(Point3::new(0.5, 0.0, 3.0), -Vec3::Z);
        assert!(disk.hit(&mut hit_ray).is_some());
        assert!((hit_ray.tmax - 3.0).abs() < 1e-5);

        let mut rim_miss = Ray::new(Point3::new(1.5, 0.0, 3.0), -Vec3::Z);
        assert!(disk.hit(&mut rim_miss).is_none());

        let mut parallel = Ray::new(Point3::new(0.0, -3.0, 0.5), Vec3::Y);
        assert!(disk.hit(&mut parallel).is_none());
    }

    #[test]
    fn test_sample_surface_within_radius() {
        let disk = Disk::new(Point3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 1.0, 0.0), 2.0);
        for (u, v) in [(0.1, 0.9), (0.5, 0.5), (0.99, 0.01)] {
            let (point, normal, pdf) = disk.sample_surface(Sample2D::new(u, v));
            assert!(crate::math::distance(disk.position, point) <= disk.radius + 1e-4);
            assert!(((point - disk.position) * normal).abs() < 1e-4);
            assert!((pdf - 1.0 / disk.area()).abs() < 1e-6);
        }
    }
}
