use super::Material;
use crate::bsdf::{Bsdf, Lobe, SpecularReflection};
use crate::hittable::Intersection;
use crate::math::{RGBColor, TangentFrame};
use crate::sampler::Sampler;

#[derive(Copy, Clone, Debug)]
pub struct Mirror {
    pub specular: RGBColor,
}

impl Mirror {
    pub fn new(specular: RGBColor) -> Mirror {
        Mirror { specular }
    }
}

impl Material for Mirror {
    fn scattering(&self, isect: &Intersection, _sampler: &mut dyn Sampler) -> Bsdf {
        Bsdf::new(
            TangentFrame::from_normal(isect.normal),
            Lobe::Specular(SpecularReflection::new(self.specular)),
        )
    }
}
