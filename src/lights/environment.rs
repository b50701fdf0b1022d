use super::{LightFlags, LightSample};
use crate::aabb::AABB;
use crate::hittable::Intersection;
use crate::math::{spherical_theta, Point3, RGBColor, Ray, Sample2D, Vec3};
use std::f32::consts::PI;

/// Constant-radiance environment, modeled as a sphere holding the whole
/// scene.
#[derive(Copy, Clone, Debug)]
pub struct EnvironmentLight {
    pub radiance: RGBColor,
    world_center: Point3,
    world_radius: f32,
    area: f32,
}

impl EnvironmentLight {
    pub fn new(radiance: RGBColor) -> EnvironmentLight {
        EnvironmentLight {
            radiance,
            world_center: Point3::ORIGIN,
            world_radius: 0.0,
            area: 0.0,
        }
    }

    pub fn flags(&self) -> LightFlags {
        LightFlags::INFINITE
    }

    pub fn preprocess(&mut self, world_bounds: &AABB) {
        let (center, radius) = world_bounds.bounding_sphere();
        self.world_center = center;
        self.world_radius = radius;
        self.area = PI * radius * radius;
    }

    pub fn power(&self) -> RGBColor {
        self.radiance * self.area
    }

    pub fn sample_li(&self, isect: &Intersection, s: Sample2D) -> LightSample {
        // map the sample square onto the sphere of directions
        let theta = s.y * PI;
        let phi = s.x * 2.0 * PI;
        let (sin_theta, cos_theta) = theta.sin_cos();
        let (sin_phi, cos_phi) = phi.sin_cos();

        let wi = Vec3::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta);

        let pdf = if sin_theta == 0.0 {
            0.0
        } else {
            1.0 / (2.0 * PI * PI * sin_theta)
        };

        LightSample {
            position: isect.point + wi * (2.0 * self.world_radius),
            wi,
            pdf,
            li: self.radiance,
        }
    }

    pub fn pdf_li(&self, _isect: &Intersection, wi: Vec3) -> f32 {
        let sin_theta = spherical_theta(wi).sin();
        if sin_theta == 0.0 {
            return 0.0;
        }
        1.0 / (2.0 * PI * PI * sin_theta)
    }

    pub fn le(&self, _ray: &Ray) -> RGBColor {
        self.radiance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_zero_at_poles() {
        let light = EnvironmentLight::new(RGBColor::WHITE);
        let isect = Intersection::new(Point3::ORIGIN, Vec3::Z, Vec3::Z);

        // v = 0 maps to the pole where sin(theta) = 0
        let polar = light.sample_li(&isect, Sample2D::new(0.25, 0.0));
        assert_eq!(polar.pdf, 0.0);

        assert_eq!(light.pdf_li(&isect, Vec3::Z), 0.0);
        assert_eq!(light.pdf_li(&isect, -Vec3::Z), 0.0);

        let equatorial = light.pdf_li(&isect, Vec3::X);
        assert!((equatorial - 1.0 / (2.0 * PI * PI)).abs() < 1e-6);
    }

    #[test]
    fn test_le_is_constant() {
        let light = EnvironmentLight::new(RGBColor::new(0.25, 0.5, 1.0));
        let ray = Ray::new(Point3::ORIGIN, Vec3::X);
        assert_eq!(light.le(&ray), RGBColor::new(0.25, 0.5, 1.0));
    }

    #[test]
    fn test_sample_direction_matches_uv_mapping() {
        let light = EnvironmentLight::new(RGBColor::WHITE);
        let isect = Intersection::new(Point3::ORIGIN, Vec3::Z, Vec3::Z);

        // v = 0.5 is the equator, u = 0 points along +x
        let sample = light.sample_li(&isect, Sample2D::new(0.0, 0.5));
        assert!((sample.wi - Vec3::X).norm() < 1e-5);
        assert!((sample.pdf - light.pdf_li(&isect, sample.wi)).abs() < 1e-6);
    }
}
