use super::{LightFlags, LightSample};
use crate::geometry::ShapeEnum;
use crate::hittable::{Hittable, Intersection};
use crate::math::{distance_squared, Point3, RGBColor, Sample2D, Vec3};
use std::f32::consts::PI;

/// Diffuse emitter wrapping a shape. Emits from the side the shape normal
/// points toward.
#[derive(Copy, Clone, Debug)]
pub struct AreaLight {
    pub radiance: RGBColor,
    pub shape: ShapeEnum,
    power: RGBColor,
}

impl AreaLight {
    pub fn new(radiance: RGBColor, shape: ShapeEnum) -> AreaLight {
        let power = radiance * shape.area() * PI;
        AreaLight {
            radiance,
            shape,
            power,
        }
    }

    pub fn flags(&self) -> LightFlags {
        LightFlags::AREA
    }

    pub fn power(&self) -> RGBColor {
        self.power
    }

    /// Emitted radiance leaving `point` (with surface normal `normal`)
    /// toward `wo`.
    pub fn l(&self, _point: Point3, normal: Vec3, wo: Vec3) -> RGBColor {
        if normal * wo > 0.0 {
            self.radiance
        } else {
            RGBColor::BLACK
        }
    }

    pub fn sample_li(&self, isect: &Intersection, s: Sample2D) -> LightSample {
        let (position, normal, pdf) = self.shape.sample_toward(isect.point, s);

        let mut sample = LightSample {
            position,
            wi: Vec3::ZERO,
            pdf,
            li: RGBColor::BLACK,
        };

        if pdf == 0.0 || distance_squared(position, isect.point) == 0.0 {
            return sample;
        }

        sample.wi = (position - isect.point).normalized();
        sample.li = self.l(position, normal, -sample.wi);
        sample
    }

    pub fn pdf_li(&self, isect: &Intersection, wi: Vec3) -> f32 {
        self.shape.pdf_toward(isect.point, wi)
    }
}
