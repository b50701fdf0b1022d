use super::{LightFlags, LightSample};
use crate::aabb::AABB;
use crate::hittable::Intersection;
use crate::math::{Point3, RGBColor, Sample2D, Vec3};
use std::f32::consts::PI;

/// Parallel illumination from an infinitely distant "sun disk". The emit
/// plane sits at twice the scene's bounding-sphere radius, which
/// `preprocess` computes once all geometry is known.
#[derive(Copy, Clone, Debug)]
pub struct DirectionalLight {
    pub irradiance: RGBColor,
    pub direction: Vec3,
    world_center: Point3,
    world_radius: f32,
    area: f32,
}

impl DirectionalLight {
    pub fn new(direction: Vec3, irradiance: RGBColor) -> DirectionalLight {
        DirectionalLight {
            irradiance,
            direction: direction.normalized(),
            world_center: Point3::ORIGIN,
            world_radius: 0.0,
            area: 0.0,
        }
    }

    pub fn flags(&self) -> LightFlags {
        LightFlags::DELTA_DIRECTION | LightFlags::INFINITE
    }

    pub fn preprocess(&mut self, world_bounds: &AABB) {
        let (center, radius) = world_bounds.bounding_sphere();
        self.world_center = center;
        self.world_radius = radius;
        self.area = PI * radius * radius;
    }

    pub fn power(&self) -> RGBColor {
        self.irradiance * self.area
    }

    pub fn sample_li(&self, isect: &Intersection, _s: Sample2D) -> LightSample {
        let wi = -self.direction;
        LightSample {
            position: isect.point + wi * (2.0 * self.world_radius),
            wi,
            pdf: 1.0,
            li: self.irradiance,
        }
    }

    pub fn pdf_li(&self, _isect: &Intersection, _wi: Vec3) -> f32 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_sets_power_and_emit_plane() {
        let mut light = DirectionalLight::new(Vec3::new(0.0, -1.0, 0.0), RGBColor::WHITE);
        let bounds = AABB::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        light.preprocess(&bounds);

        let radius = 3.0f32.sqrt();
        assert!((light.power().r - PI * radius * radius).abs() < 1e-4);

        let isect = Intersection::new(Point3::ORIGIN, Vec3::Y, Vec3::Y);
        let sample = light.sample_li(&isect, Sample2D::new(0.1, 0.2));
        assert!((sample.wi - Vec3::Y).norm() < 1e-6);
        assert_eq!(sample.pdf, 1.0);
        assert!((sample.position.y - 2.0 * radius).abs() < 1e-4);
        assert_eq!(sample.li, RGBColor::WHITE);
    }
}
