use super::Material;
use crate::bsdf::{Bsdf, FresnelSpecular, Lobe};
use crate::hittable::Intersection;
use crate::math::{RGBColor, TangentFrame};
use crate::sampler::Sampler;

#[derive(Copy, Clone, Debug)]
pub struct Glass {
    pub eta: f32,
    pub kr: RGBColor,
    pub kt: RGBColor,
}

impl Glass {
    pub fn new(eta: f32, kr: RGBColor, kt: RGBColor) -> Glass {
        Glass { eta, kr, kt }
    }
}

impl Material for Glass {
    fn scattering(&self, isect: &Intersection, _sampler: &mut dyn Sampler) -> Bsdf {
        Bsdf::new(
            TangentFrame::from_normal(isect.normal),
            Lobe::FresnelSpecular(FresnelSpecular::new(1.0, self.eta, self.kr, self.kt)),
        )
    }
}
