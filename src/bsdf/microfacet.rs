use super::{
    abs_cos_theta, cos_theta, face_forward, reflect, refract, same_hemisphere, BsdfFlags,
    BsdfSample, Fresnel, LocalBsdf, MicrofacetDistribution,
};
use crate::math::{RGBColor, Sample2D, Vec3};

#[derive(Copy, Clone, Debug)]
pub struct MicrofacetReflection {
    pub r: RGBColor,
    pub distribution: MicrofacetDistribution,
    pub fresnel: Fresnel,
}

impl MicrofacetReflection {
    pub fn new(r: RGBColor, distribution: MicrofacetDistribution, fresnel: Fresnel) -> Self {
        MicrofacetReflection {
            r,
            distribution,
            fresnel,
        }
    }
}

impl LocalBsdf for MicrofacetReflection {
    fn flags(&self) -> BsdfFlags {
        BsdfFlags::REFLECTION | BsdfFlags::GLOSSY
    }

    fn evaluate_local(&self, wo: Vec3, wi: Vec3) -> RGBColor {
        let cos_theta_o = abs_cos_theta(wo);
        let cos_theta_i = abs_cos_theta(wi);
        let wh = wi + wo;

        // degenerate cases at grazing angles
        if cos_theta_i == 0.0 || cos_theta_o == 0.0 {
            return RGBColor::BLACK;
        }
        if wh.is_zero() {
            return RGBColor::BLACK;
        }

        let wh = wh.normalized();
        // for the Fresnel call make sure wh points into the upper
        // hemisphere so TIR is handled on the correct side
        let fresnel = self.fresnel.evaluate(wi * face_forward(wh, Vec3::Z));
        self.r
            * fresnel
            * (self.distribution.d(wh) * self.distribution.g(wo, wi)
                / (4.0 * cos_theta_i * cos_theta_o))
    }

    fn pdf_local(&self, wo: Vec3, wi: Vec3) -> f32 {
        if !same_hemisphere(wo, wi) {
            return 0.0;
        }
        let wh = (wo + wi).normalized();
        self.distribution.pdf(wo, wh) / (4.0 * (wo * wh))
    }

    fn sample_local(&self, wo: Vec3, s: Sample2D) -> BsdfSample {
        if wo.z == 0.0 {
            return BsdfSample::default();
        }

        let wh = self.distribution.sample_wh(wo, s);
        if wo * wh < 0.0 {
            return BsdfSample::default();
        }

        let wi = reflect(wo, wh);
        if !same_hemisphere(wo, wi) {
            return BsdfSample::default();
        }

        BsdfSample {
            wi,
            f: self.evaluate_local(wo, wi),
            pdf: self.distribution.pdf(wo, wh) / (4.0 * (wo * wh)),
            flags: self.flags(),
        }
    }
}

/// Only valid for wo and wi in opposite hemispheres.
#[derive(Copy, Clone, Debug)]
pub struct MicrofacetTransmission {
    pub t: RGBColor,
    pub distribution: MicrofacetDistribution,
    pub eta_a: f32,
    pub eta_b: f32,
    fresnel: Fresnel,
}

impl MicrofacetTransmission {
    pub fn new(t: RGBColor, distribution: MicrofacetDistribution, eta_a: f32, eta_b: f32) -> Self {
        MicrofacetTransmission {
            t,
            distribution,
            eta_a,
            eta_b,
            fresnel: Fresnel::Dielectric {
                eta_i: eta_a,
                eta_t: eta_b,
            },
        }
    }
}

impl LocalBsdf for MicrofacetTransmission {
    fn flags(&self) -> BsdfFlags {
        BsdfFlags::TRANSMISSION | BsdfFlags::GLOSSY
    }

    fn evaluate_local(&self, wo: Vec3, wi: Vec3) -> RGBColor {
        if same_hemisphere(wo, wi) {
            return RGBColor::BLACK; // transmission only
        }

        let cos_theta_o = cos_theta(wo);
        let cos_theta_i = cos_theta(wi);
        if cos_theta_i == 0.0 || cos_theta_o == 0.0 {
            return RGBColor::BLACK;
        }

        let eta = if cos_theta(wo) > 0.0 {
            self.eta_b / self.eta_a
        } else {
            self.eta_a / self.eta_b
        };
        let mut wh = (wo + wi * eta).normalized();
        if wh.z < 0.0 {
            wh = -wh;
        }

        // same side?
        if (wo * wh) * (wi * wh) > 0.0 {
            return RGBColor::BLACK;
        }

        let fresnel = self.fresnel.evaluate(wo * wh);

        let sqrt_denom = wo * wh + eta * (wi * wh);
        let factor = 1.0 / eta;

        (RGBColor::WHITE - fresnel)
            * self.t
            * (self.distribution.d(wh) * self.distribution.g(wo, wi) * eta * eta
                * (wi * wh).abs()
                * (wo * wh).abs()
                * factor
                * factor
                / (cos_theta_i * cos_theta_o * sqrt_denom * sqrt_denom))
                .abs()
    }

    fn pdf_local(&self, wo: Vec3, wi: Vec3) -> f32 {
        if same_hemisphere(wo, wi) {
            return 0.0;
        }

        let eta = if cos_theta(wo) > 0.0 {
            self.eta_b / self.eta_a
        } else {
            self.eta_a / self.eta_b
        };
        let wh = (wo + wi * eta).normalized();

        if (wo * wh) * (wi * wh) > 0.0 {
            return 0.0;
        }

        // change of variables from wh to wi
        let sqrt_denom = wo * wh + eta * (wi * wh);
        let dwh_dwi = ((eta * eta * (wi * wh)) / (sqrt_denom * sqrt_denom)).abs();
        self.distribution.pdf(wo, wh) * dwh_dwi
    }

    fn sample_local(&self, wo: Vec3, s: Sample2D) -> BsdfSample {
        if wo.z == 0.0 {
            return BsdfSample::default();
        }

        let wh = self.distribution.sample_wh(wo, s);
        if wo * wh < 0.0 {
            return BsdfSample::default();
        }

        let eta = if cos_theta(wo) > 0.0 {
            self.eta_a / self.eta_b
        } else {
            self.eta_b / self.eta_a
        };
        match refract(wo, wh, eta) {
            Some(wi) => BsdfSample {
                wi,
                f: self.evaluate_local(wo, wi),
                pdf: self.pdf_local(wo, wi),
                flags: self.flags(),
            },
            None => BsdfSample::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_mt::Mt64;

    fn reflection_lobe() -> MicrofacetReflection {
        MicrofacetReflection::new(
            RGBColor::WHITE,
            MicrofacetDistribution::trowbridge_reitz(0.3, 0.3, true),
            Fresnel::NoOp,
        )
    }

    #[test]
    fn test_reflection_sample_pdf_consistency() {
        let lobe = reflection_lobe();
        let wo = Vec3::new(0.3, -0.1, 0.9).normalized();
        let mut rng = Mt64::seed_from_u64(0xc1);
        let mut accepted = 0;
        for _ in 0..2000 {
            let sample = lobe.sample_local(wo, Sample2D::new(rng.gen(), rng.gen()));
            if sample.pdf == 0.0 {
                continue;
            }
            accepted += 1;
            assert!(same_hemisphere(wo, sample.wi));
            let pdf = lobe.pdf_local(wo, sample.wi);
            assert!(
                (sample.pdf - pdf).abs() / pdf.max(1e-6) < 1e-3,
                "{} vs {}",
                sample.pdf,
                pdf
            );
            assert!(sample.f.r >= 0.0 && sample.f.g >= 0.0 && sample.f.b >= 0.0);
        }
        assert!(accepted > 1500);
    }

    #[test]
    fn test_reflection_energy_bounded() {
        let lobe = reflection_lobe();
        let wo = Vec3::new(0.0, 0.25, 0.97).normalized();
        let mut rng = Mt64::seed_from_u64(0xc2);
        let n = 200_000;
        let mut sum = 0.0f64;
        for _ in 0..n {
            let sample = lobe.sample_local(wo, Sample2D::new(rng.gen(), rng.gen()));
            if sample.pdf <= 0.0 {
                continue;
            }
            sum += (sample.f.luminance() * abs_cos_theta(sample.wi) / sample.pdf) as f64;
        }
        let estimate = sum / n as f64;
        assert!(estimate <= 1.0 + 5e-2, "energy was {}", estimate);
    }

    #[test]
    fn test_transmission_opposite_hemispheres_only() {
        let lobe = MicrofacetTransmission::new(
            RGBColor::WHITE,
            MicrofacetDistribution::trowbridge_reitz(0.2, 0.2, true),
            1.0,
            1.5,
        );
        let wo = Vec3::new(0.2, 0.1, 0.95).normalized();
        let wi_same = Vec3::new(-0.2, -0.1, 0.95).normalized();
        assert!(lobe.evaluate_local(wo, wi_same).is_black());
        assert_eq!(lobe.pdf_local(wo, wi_same), 0.0);

        let mut rng = Mt64::seed_from_u64(0xc3);
        let mut transmitted = 0;
        for _ in 0..2000 {
            let sample = lobe.sample_local(wo, Sample2D::new(rng.gen(), rng.gen()));
            if sample.pdf > 0.0 {
                transmitted += 1;
                assert!(!same_hemisphere(wo, sample.wi));
                let pdf = lobe.pdf_local(wo, sample.wi);
                assert!(
                    (sample.pdf - pdf).abs() / pdf.max(1e-6) < 1e-3,
                    "{} vs {}",
                    sample.pdf,
                    pdf
                );
            }
        }
        assert!(transmitted > 500);
    }
}
