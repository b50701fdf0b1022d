use crate::math::{distance, Point3, Ray, Vec3};

pub trait HasBoundingBox {
    fn aabb(&self) -> AABB;
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AABB {
    pub min: Point3,
    pub max: Point3,
}

impl AABB {
    pub fn new(min: Point3, max: Point3) -> Self {
        AABB {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub const fn new_raw(min: Point3, max: Point3) -> Self {
        AABB { min, max }
    }

    // empty AABB contains nothing.
    pub fn empty() -> Self {
        AABB::new_raw(
            Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn contains(&self, point: Point3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    pub fn expand(mut self, other: &AABB) -> AABB {
        self.expand_mut(other);
        self
    }

    pub fn expand_mut(&mut self, other: &AABB) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn grow_mut(&mut self, point: Point3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Point3 {
        self.min.lerp(self.max, 0.5)
    }

    /// Sphere that holds this box; the degenerate empty box reports a zero
    /// radius.
    pub fn bounding_sphere(&self) -> (Point3, f32) {
        let center = self.center();
        let radius = if self.contains(center) {
            distance(center, self.max)
        } else {
            0.0
        };
        (center, radius)
    }

    /// Slab test against the ray's current `[tmin, tmax]` interval.
    pub fn hit(&self, ray: &Ray) -> bool {
        let mut tmin = ray.tmin;
        let mut tmax = ray.tmax;
        for axis in 0..3 {
            let inv = 1.0 / ray.direction[axis];
            let mut t0 = (self.min[axis] - ray.origin[axis]) * inv;
            let mut t1 = (self.max[axis] - ray.origin[axis]) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            tmin = tmin.max(t0);
            tmax = tmax.min(t1);
            if tmax <= tmin {
                return false;
            }
        }
        true
    }
}

impl Default for AABB {
    fn default() -> AABB {
        AABB::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slab_hit_and_miss() {
        let aabb = AABB::new(Point3::ORIGIN, Point3::new(1.0, 1.0, 1.0));

        let toward = Ray::new(
            Point3::new(3.0, 3.0, 3.0),
            -Vec3::new(1.0, 1.0, 1.0).normalized(),
        );
        assert!(aabb.hit(&toward));

        let away = Ray::new(
            Point3::new(3.0, 3.0, 3.0),
            Vec3::new(1.0, 1.0, 1.0).normalized(),
        );
        assert!(!aabb.hit(&away));
    }

    #[test]
    fn test_narrowed_interval_rejects() {
        let aabb = AABB::new(Point3::new(4.0, -1.0, -1.0), Point3::new(6.0, 1.0, 1.0));
        let mut ray = Ray::new(Point3::ORIGIN, Vec3::X);
        assert!(aabb.hit(&ray));
        // a closer hit has already narrowed tmax past the box
        ray.tmax = 2.0;
        assert!(!aabb.hit(&ray));
    }

    #[test]
    fn test_bounding_sphere() {
        let aabb = AABB::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let (center, radius) = aabb.bounding_sphere();
        assert_eq!(center, Point3::ORIGIN);
        assert!((radius - 3.0f32.sqrt()).abs() < 1e-6);

        let (_, empty_radius) = AABB::empty().bounding_sphere();
        assert_eq!(empty_radius, 0.0);
    }

    #[test]
    fn test_expand() {
        let mut a = AABB::empty();
        a.expand_mut(&AABB::new(Point3::ORIGIN, Point3::new(1.0, 1.0, 1.0)));
        a.expand_mut(&AABB::new(
            Point3::new(-2.0, 0.0, 0.0),
            Point3::new(-1.0, 1.0, 1.0),
        ));
        assert_eq!(a.min, Point3::new(-2.0, 0.0, 0.0));
        assert_eq!(a.max, Point3::new(1.0, 1.0, 1.0));
    }
}
