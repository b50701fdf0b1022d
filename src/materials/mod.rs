mod glass;
mod matte;
mod metal;
mod mirror;
mod plastic;

pub use glass::Glass;
pub use matte::Matte;
pub use metal::Metal;
pub use mirror::Mirror;
pub use plastic::Plastic;

use crate::bsdf::Bsdf;
use crate::hittable::Intersection;
use crate::sampler::Sampler;

/// Produces a freshly owned BSDF bound to the intersection's shading
/// frame. Randomness from the sampler is consumed only when the lobe
/// choice is stochastic.
pub trait Material: Send + Sync {
    fn scattering(&self, isect: &Intersection, sampler: &mut dyn Sampler) -> Bsdf;
}

#[derive(Copy, Clone, Debug)]
pub enum MaterialEnum {
    Matte(Matte),
    Mirror(Mirror),
    Glass(Glass),
    Plastic(Plastic),
    Metal(Metal),
}

impl From<Matte> for MaterialEnum {
    fn from(value: Matte) -> Self {
        MaterialEnum::Matte(value)
    }
}

impl From<Mirror> for MaterialEnum {
    fn from(value: Mirror) -> Self {
        MaterialEnum::Mirror(value)
    }
}

impl From<Glass> for MaterialEnum {
    fn from(value: Glass) -> Self {
        MaterialEnum::Glass(value)
    }
}

impl From<Plastic> for MaterialEnum {
    fn from(value: Plastic) -> Self {
        MaterialEnum::Plastic(value)
    }
}

impl From<Metal> for MaterialEnum {
    fn from(value: Metal) -> Self {
        MaterialEnum::Metal(value)
    }
}

impl Material for MaterialEnum {
    fn scattering(&self, isect: &Intersection, sampler: &mut dyn Sampler) -> Bsdf {
        match self {
            MaterialEnum::Matte(inner) => inner.scattering(isect, sampler),
            MaterialEnum::Mirror(inner) => inner.scattering(isect, sampler),
            MaterialEnum::Glass(inner) => inner.scattering(isect, sampler),
            MaterialEnum::Plastic(inner) => inner.scattering(isect, sampler),
            MaterialEnum::Metal(inner) => inner.scattering(isect, sampler),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsdf::BsdfFlags;
    use crate::math::{Point3, RGBColor, Vec3};
    use crate::sampler::RandomSampler;

    #[test]
    fn test_material_flags() {
        let isect = Intersection::new(Point3::ORIGIN, Vec3::Z, Vec3::Z);
        let mut sampler = RandomSampler::new(1, 7);

        let matte = MaterialEnum::from(Matte::new(RGBColor::WHITE));
        assert!(matte
            .scattering(&isect, &mut sampler)
            .flags()
            .contains(BsdfFlags::DIFFUSE));

        let mirror = MaterialEnum::from(Mirror::new(RGBColor::WHITE));
        assert!(mirror.scattering(&isect, &mut sampler).is_delta());

        let glass = MaterialEnum::from(Glass::new(1.5, RGBColor::WHITE, RGBColor::WHITE));
        let glass_flags = glass.scattering(&isect, &mut sampler).flags();
        assert!(glass_flags.contains(BsdfFlags::REFLECTION | BsdfFlags::TRANSMISSION));
        assert!(glass_flags.is_delta());

        let metal = MaterialEnum::from(Metal::new(
            RGBColor::new(0.2, 0.92, 1.1),
            RGBColor::new(3.9, 2.45, 2.14),
            0.05,
            0.1,
            true,
        ));
        assert!(metal
            .scattering(&isect, &mut sampler)
            .flags()
            .contains(BsdfFlags::GLOSSY));
    }
}
