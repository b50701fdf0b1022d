use super::{Point3, Vec3};
use crate::RAY_TMIN;

/// `tmax` narrows in place as closer hits are found during traversal, so
/// later intersection tests are automatically pruned.
#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
    pub tmin: f32,
    pub tmax: f32,
}

impl Ray {
    pub fn new(origin: Point3, direction: Vec3) -> Ray {
        Ray {
            origin,
            direction,
            tmin: RAY_TMIN,
            tmax: f32::INFINITY,
        }
    }

    pub fn point_at_parameter(&self, t: f32) -> Point3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_at_parameter() {
        let r = Ray::new(Point3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(r.point_at_parameter(2.0), Point3::new(1.0, 2.0, 0.0));
        assert_eq!(r.tmin, RAY_TMIN);
        assert!(r.tmax.is_infinite());
    }
}
