mod area;
mod directional;
mod environment;
mod point;

pub use area::AreaLight;
pub use directional::DirectionalLight;
pub use environment::EnvironmentLight;
pub use point::PointLight;

use crate::aabb::AABB;
use crate::hittable::Intersection;
use crate::math::{Point3, RGBColor, Ray, Sample2D, Vec3};

use bitflags::bitflags;

bitflags! {
    pub struct LightFlags: u32 {
        const DELTA_POSITION = 1;
        const DELTA_DIRECTION = 2;
        const AREA = 4;
        const INFINITE = 8;
    }
}

impl LightFlags {
    pub fn is_delta(&self) -> bool {
        self.intersects(LightFlags::DELTA_POSITION | LightFlags::DELTA_DIRECTION)
    }
}

/// One draw of incident illumination toward a reference point.
#[derive(Copy, Clone, Debug)]
pub struct LightSample {
    pub position: Point3,
    pub wi: Vec3,
    pub pdf: f32,
    pub li: RGBColor,
}

#[derive(Copy, Clone, Debug)]
pub enum LightEnum {
    Point(PointLight),
    Directional(DirectionalLight),
    Area(AreaLight),
    Environment(EnvironmentLight),
}

impl From<PointLight> for LightEnum {
    fn from(value: PointLight) -> Self {
        LightEnum::Point(value)
    }
}

impl From<DirectionalLight> for LightEnum {
    fn from(value: DirectionalLight) -> Self {
        LightEnum::Directional(value)
    }
}

impl From<AreaLight> for LightEnum {
    fn from(value: AreaLight) -> Self {
        LightEnum::Area(value)
    }
}

impl From<EnvironmentLight> for LightEnum {
    fn from(value: EnvironmentLight) -> Self {
        LightEnum::Environment(value)
    }
}

impl LightEnum {
    pub fn flags(&self) -> LightFlags {
        match self {
            LightEnum::Point(inner) => inner.flags(),
            LightEnum::Directional(inner) => inner.flags(),
            LightEnum::Area(inner) => inner.flags(),
            LightEnum::Environment(inner) => inner.flags(),
        }
    }

    pub fn is_delta(&self) -> bool {
        self.flags().is_delta()
    }

    pub fn power(&self) -> RGBColor {
        match self {
            LightEnum::Point(inner) => inner.power(),
            LightEnum::Directional(inner) => inner.power(),
            LightEnum::Area(inner) => inner.power(),
            LightEnum::Environment(inner) => inner.power(),
        }
    }

    /// Finalizes parameters that depend on the scene's bounding sphere;
    /// called once on every light after all geometry is added.
    pub fn preprocess(&mut self, world_bounds: &AABB) {
        match self {
            LightEnum::Directional(inner) => inner.preprocess(world_bounds),
            LightEnum::Environment(inner) => inner.preprocess(world_bounds),
            LightEnum::Point(_) | LightEnum::Area(_) => {}
        }
    }

    pub fn sample_li(&self, isect: &Intersection, s: Sample2D) -> LightSample {
        match self {
            LightEnum::Point(inner) => inner.sample_li(isect, s),
            LightEnum::Directional(inner) => inner.sample_li(isect, s),
            LightEnum::Area(inner) => inner.sample_li(isect, s),
            LightEnum::Environment(inner) => inner.sample_li(isect, s),
        }
    }

    pub fn pdf_li(&self, isect: &Intersection, wi: Vec3) -> f32 {
        match self {
            LightEnum::Point(inner) => inner.pdf_li(isect, wi),
            LightEnum::Directional(inner) => inner.pdf_li(isect, wi),
            LightEnum::Area(inner) => inner.pdf_li(isect, wi),
            LightEnum::Environment(inner) => inner.pdf_li(isect, wi),
        }
    }

    /// Emission along a ray that escaped the scene; non-zero only for
    /// infinite lights.
    pub fn le(&self, ray: &Ray) -> RGBColor {
        match self {
            LightEnum::Environment(inner) => inner.le(ray),
            _ => RGBColor::BLACK,
        }
    }
}
