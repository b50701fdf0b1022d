use super::{reflect, same_hemisphere, BsdfFlags, BsdfSample, LocalBsdf};
use crate::math::{RGBColor, Sample2D, TangentFrame, Vec3};
use std::f32::consts::PI;

// Lafortune and Willems, "Using the modified Phong reflectance model for
// physically based rendering", http://graphics.cs.kuleuven.be/publications/Phong/
#[derive(Copy, Clone, Debug)]
pub struct PhongSpecularReflection {
    pub ks: RGBColor,
    pub exponent: f32,
}

impl PhongSpecularReflection {
    pub fn new(ks: RGBColor, exponent: f32) -> Self {
        PhongSpecularReflection { ks, exponent }
    }

    // cosine lobe hemisphere sampling around +z
    fn cosine_hemisphere_sample_phong(&self, s: Sample2D) -> Vec3 {
        let phi = 2.0 * PI * s.x;
        let cos_theta = s.y.powf(1.0 / (self.exponent + 1.0));
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
        Vec3::new(phi.cos() * sin_theta, phi.sin() * sin_theta, cos_theta)
    }

    fn cosine_hemisphere_pdf_phong(&self, lobe_axis: Vec3, direction: Vec3) -> f32 {
        let cos_theta = (lobe_axis * direction).max(0.0);
        (self.exponent + 1.0) * cos_theta.powf(self.exponent) / (2.0 * PI)
    }
}

impl LocalBsdf for PhongSpecularReflection {
    fn flags(&self) -> BsdfFlags {
        BsdfFlags::REFLECTION | BsdfFlags::GLOSSY
    }

    fn evaluate_local(&self, wo: Vec3, wi: Vec3) -> RGBColor {
        if !same_hemisphere(wo, wi) {
            return RGBColor::BLACK;
        }

        let wr = reflect(wo, Vec3::Z);
        let cos_alpha = (wr * wi).max(0.0);

        let rho = self.ks * ((self.exponent + 2.0) / (2.0 * PI));
        rho * cos_alpha.powf(self.exponent)
    }

    fn pdf_local(&self, wo: Vec3, wi: Vec3) -> f32 {
        let wr = reflect(wo, Vec3::Z);
        self.cosine_hemisphere_pdf_phong(wr, wi)
    }

    fn sample_local(&self, wo: Vec3, s: Sample2D) -> BsdfSample {
        let around_lobe = self.cosine_hemisphere_sample_phong(s);

        let wr = reflect(wo, Vec3::Z);
        let frame = TangentFrame::from_normal(wr);
        let mut wi = frame.to_world(&around_lobe);

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
