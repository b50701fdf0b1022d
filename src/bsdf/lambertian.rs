use super::{abs_cos_theta, same_hemisphere, BsdfFlags, BsdfSample, LocalBsdf};
use crate::math::{cosine_hemisphere_pdf, cosine_hemisphere_sample, RGBColor, Sample2D, Vec3};
use std::f32::consts::PI;

#[derive(Copy, Clone, Debug)]
pub struct LambertianReflection {
    // directional-hemispherical reflectance
    pub albedo: RGBColor,
}

impl LambertianReflection {
    pub fn new(albedo: RGBColor) -> Self {
        LambertianReflection { albedo }
    }
}

impl LocalBsdf for LambertianReflection {
    fn flags(&self) -> BsdfFlags {
        BsdfFlags::REFLECTION | BsdfFlags::DIFFUSE
    }

    fn evaluate_local(&self, wo: Vec3, wi: Vec3) -> RGBColor {
        if !same_hemisphere(wo, wi) {
            return RGBColor::BLACK;
        }
        self.albedo / PI
    }

    fn pdf_local(&self, wo: Vec3, wi: Vec3) -> f32 {
        if same_hemisphere(wo, wi) {
            cosine_hemisphere_pdf(abs_cos_theta(wi))
        } else {
            0.0
        }
    }

    fn sample_local(&self, wo: Vec3, s: Sample2D) -> BsdfSample {
        // cosine-sample the hemisphere, flipping if wo is underneath
        let mut wi = cosine_hemisphere_sample(s);
        if wo.z < 0.0 {
            wi.z *= -1.0;
        }

        BsdfSample {
            wi,
            f: self.evaluate_local(wo, wi),
            pdf: self.pdf_local(wo, wi),
            flags: self.flags(),
        }
    }
}
