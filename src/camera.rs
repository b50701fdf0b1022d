use crate::math::{Point3, Ray, Vec3};
use crate::sampler::CameraSample;

/*
  camera space:

  y (0, 1, 0)         z(0, 0, 1)
        |            /
        |          /
        |        /
        |      /
        |    /
        |  /
        |/_ _ _ _ _ _ x(1, 0, 0)
        o
*/
/// Pinhole camera. `right` and `up` are pre-scaled by the field of view
/// and aspect ratio so primary-ray generation is a couple of fused
/// multiply-adds per sample.
#[derive(Copy, Clone, Debug)]
pub struct Camera {
    pub position: Point3,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    resolution: (f32, f32),
}

impl Camera {
    pub fn new(
        position: Point3,
        front: Vec3,
        up: Vec3,
        fov_degrees: f32,
        resolution: (f32, f32),
    ) -> Camera {
        let front = front.normalized();
        let up = up.normalized();
        let tan_fov = (fov_degrees.to_radians() / 2.0).tan();
        let aspect = resolution.0 / resolution.1;

        // left handed, clockwise
        let right = up.cross(front).normalized() * (tan_fov * aspect);
        let up = front.cross(right).normalized() * tan_fov;

        Camera {
            position,
            front,
            right,
            up,
            resolution,
        }
    }

    pub fn look_at(
        position: Point3,
        target: Point3,
        up: Vec3,
        fov_degrees: f32,
        resolution: (f32, f32),
    ) -> Camera {
        Camera::new(position, target - position, up, fov_degrees, resolution)
    }

    pub fn resolution(&self) -> (f32, f32) {
        self.resolution
    }

    pub fn generate_ray(&self, sample: CameraSample) -> Ray {
        let direction = self.front
            + self.right * (sample.p_film.0 / self.resolution.0 - 0.5)
            + self.up * (0.5 - sample.p_film.1 / self.resolution.1);

        Ray::new(self.position, direction.normalized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_points_forward() {
        let camera = Camera::new(
            Point3::new(1.0, 2.0, 3.0),
            Vec3::Z,
            Vec3::Y,
            60.0,
            (200.0, 100.0),
        );
        let ray = camera.generate_ray(CameraSample {
            p_film: (100.0, 50.0),
        });
        assert_eq!(ray.origin, Point3::new(1.0, 2.0, 3.0));
        assert!((ray.direction - Vec3::Z).norm() < 1e-6);
    }

    #[test]
    fn test_raster_axes_orientation() {
        let camera = Camera::look_at(
            Point3::ORIGIN,
            Point3::new(0.0, 0.0, 10.0),
            Vec3::Y,
            90.0,
            (100.0, 100.0),
        );

        // left side of the film maps left of the view direction, the top
        // maps upward
        let left = camera.generate_ray(CameraSample { p_film: (0.0, 50.0) });
        let top = camera.generate_ray(CameraSample { p_film: (50.0, 0.0) });
        assert!(left.direction.x < 0.0);
        assert!(top.direction.y > 0.0);
        assert!((left.direction.norm() - 1.0).abs() < 1e-5);
    }
}
