use super::{
    abs_cos_theta, cos_theta, fresnel_dielectric, refract, BsdfFlags, BsdfSample, LocalBsdf,
};
use crate::math::{RGBColor, Sample2D, Vec3};

/// Ideal specular reflection, ignoring the Fresnel effect. As a delta
/// lobe its contribution only comes through `sample_local`.
#[derive(Copy, Clone, Debug)]
pub struct SpecularReflection {
    pub reflectance: RGBColor,
}

impl SpecularReflection {
    pub fn new(reflectance: RGBColor) -> Self {
        SpecularReflection { reflectance }
    }
}

impl LocalBsdf for SpecularReflection {
    fn flags(&self) -> BsdfFlags {
        BsdfFlags::REFLECTION | BsdfFlags::SPECULAR
    }

    fn evaluate_local(&self, _wo: Vec3, _wi: Vec3) -> RGBColor {
        RGBColor::BLACK
    }

    fn pdf_local(&self, _wo: Vec3, _wi: Vec3) -> f32 {
        0.0
    }

    fn sample_local(&self, wo: Vec3, _s: Sample2D) -> BsdfSample {
        let wi = Vec3::new(-wo.x, -wo.y, wo.z);
        BsdfSample {
            wi,
            // (f / cos_theta) * Li * cos_theta / pdf => f * Li
            f: self.reflectance / abs_cos_theta(wi),
            pdf: 1.0,
            flags: self.flags(),
        }
    }
}

/// Smooth dielectric handling both reflection and transmission; the branch
/// is chosen stochastically in proportion to the Fresnel reflectance.
#[derive(Copy, Clone, Debug)]
pub struct FresnelSpecular {
    pub eta_i: f32,
    pub eta_t: f32,
    pub reflectance: RGBColor,
    pub transmittance: RGBColor,
}

impl FresnelSpecular {
    pub fn new(eta_i: f32, eta_t: f32, reflectance: RGBColor, transmittance: RGBColor) -> Self {
        FresnelSpecular {
            eta_i,
            eta_t,
            reflectance,
            transmittance,
        }
    }
}

impl LocalBsdf for FresnelSpecular {
    fn flags(&self) -> BsdfFlags {
        BsdfFlags::REFLECTION | BsdfFlags::TRANSMISSION | BsdfFlags::SPECULAR
    }

    fn evaluate_local(&self, _wo: Vec3, _wi: Vec3) -> RGBColor {
        RGBColor::BLACK
    }

    fn pdf_local(&self, _wo: Vec3, _wi: Vec3) -> f32 {
        0.0
    }

    fn sample_local(&self, wo: Vec3, s: Sample2D) -> BsdfSample {
        if cos_theta(wo) == 0.0 {
            return BsdfSample::default();
        }

        let fresnel = fresnel_dielectric(cos_theta(wo), self.eta_i, self.eta_t);

        if s.x < fresnel {
            // specular reflection
            let wi = Vec3::new(-wo.x, -wo.y, wo.z);
            return BsdfSample {
                wi,
                f: self.reflectance * fresnel / abs_cos_theta(wi),
                pdf: fresnel,
                flags: BsdfFlags::REFLECTION | BsdfFlags::SPECULAR,
            };
        }

        // specular transmission
        let entering = cos_theta(wo) > 0.0;
        let normal = if entering { Vec3::Z } else { -Vec3::Z };
        let (eta_i, eta_t) = if entering {
            (self.eta_i, self.eta_t)
        } else {
            (self.eta_t, self.eta_i)
        };

        match refract(wo, normal, eta_i / eta_t) {
            Some(wi) => {
                // the eta^2 factor accounts for radiance scaling across the
                // refractive boundary
                let ft =
                    self.transmittance * (1.0 - fresnel) * (eta_i * eta_i) / (eta_t * eta_t);
                BsdfSample {
                    wi,
                    f: ft / abs_cos_theta(wi),
                    pdf: 1.0 - fresnel,
                    flags: BsdfFlags::TRANSMISSION | BsdfFlags::SPECULAR,
                }
            }
            // total internal reflection
            None => BsdfSample::default(),
        }
    }
}
