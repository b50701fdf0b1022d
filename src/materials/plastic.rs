use super::Material;
use crate::bsdf::{
    Bsdf, Fresnel, LambertianReflection, Lobe, MicrofacetDistribution, MicrofacetReflection,
};
use crate::hittable::Intersection;
use crate::math::{RGBColor, TangentFrame};
use crate::sampler::Sampler;

/// Stochastic blend of a diffuse base and a glossy coat, split by the
/// relative luminance of the two reflectances.
#[derive(Copy, Clone, Debug)]
pub struct Plastic {
    pub kd: RGBColor,
    pub ks: RGBColor,
    pub roughness: f32,
    pub remap_roughness: bool,
    qd: f32,
}

impl Plastic {
    pub fn new(kd: RGBColor, ks: RGBColor, roughness: f32, remap_roughness: bool) -> Plastic {
        let diffuse_luminance = kd.luminance();
        let specular_luminance = ks.luminance();
        let qd = diffuse_luminance / (diffuse_luminance + specular_luminance);
        Plastic {
            kd,
            ks,
            roughness,
            remap_roughness,
            qd,
        }
    }

    pub fn diffuse_probability(&self) -> f32 {
        self.qd
    }
}

impl Material for Plastic {
    fn scattering(&self, isect: &Intersection, sampler: &mut dyn Sampler) -> Bsdf {
        let frame = TangentFrame::from_normal(isect.normal);
        let u = sampler.get_float();
        if u < self.qd {
            Bsdf::new(
                frame,
                Lobe::Lambertian(LambertianReflection::new(self.kd / self.qd)),
            )
        } else {
            let alpha = if self.remap_roughness {
                MicrofacetDistribution::roughness_to_alpha(self.roughness)
            } else {
                self.roughness
            };
            Bsdf::new(
                frame,
                Lobe::MicrofacetReflection(MicrofacetReflection::new(
                    self.ks / (1.0 - self.qd),
                    MicrofacetDistribution::trowbridge_reitz(alpha, alpha, true),
                    Fresnel::Dielectric {
                        eta_i: 1.5,
                        eta_t: 1.0,
                    },
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bsdf::BsdfFlags;
    use crate::math::{Point3, Vec3};
    use crate::sampler::RandomSampler;

    #[test]
    fn test_lobe_choice_follows_luminance_split() {
        let plastic = Plastic::new(
            RGBColor::new(0.5, 0.5, 0.5),
            RGBColor::new(0.25, 0.25, 0.25),
            0.1,
            true,
        );
        assert!((plastic.diffuse_probability() - 2.0 / 3.0).abs() < 1e-5);

        let isect = crate::hittable::Intersection::new(Point3::ORIGIN, Vec3::Z, Vec3::Z);
        let mut sampler = RandomSampler::new(1, 0x99);
        let mut diffuse_count = 0;
        let n = 20000;
        for _ in 0..n {
            let bsdf = plastic.scattering(&isect, &mut sampler);
            if bsdf.flags().contains(BsdfFlags::DIFFUSE) {
                diffuse_count += 1;
            } else {
                assert!(bsdf.flags().contains(BsdfFlags::GLOSSY));
            }
        }
        let fraction = diffuse_count as f32 / n as f32;
        assert!(
            (fraction - 2.0 / 3.0).abs() < 0.02,
            "diffuse fraction {}",
            fraction
        );
    }
}
