use super::{LightFlags, LightSample};
use crate::hittable::Intersection;
use crate::math::{distance_squared, Point3, RGBColor, Sample2D, Vec3};
use std::f32::consts::PI;

#[derive(Copy, Clone, Debug)]
pub struct PointLight {
    pub position: Point3,
    pub intensity: RGBColor,
}

impl PointLight {
    pub fn new(position: Point3, intensity: RGBColor) -> PointLight {
        PointLight {
            position,
            intensity,
        }
    }

    pub fn flags(&self) -> LightFlags {
        LightFlags::DELTA_POSITION
    }

    pub fn power(&self) -> RGBColor {
        self.intensity * 4.0 * PI
    }

    pub fn sample_li(&self, isect: &Intersection, _s: Sample2D) -> LightSample {
        LightSample {
            position: self.position,
            wi: (self.position - isect.point).normalized(),
            pdf: 1.0,
            li: self.intensity / distance_squared(self.position, isect.point),
        }
    }

    pub fn pdf_li(&self, _isect: &Intersection, _wi: Vec3) -> f32 {
        0.0
    }
}
