pub mod distribution;
pub mod fresnel;
mod lambertian;
mod microfacet;
mod phong;
mod specular;

pub use distribution::MicrofacetDistribution;
pub use fresnel::{fresnel_conductor, fresnel_dielectric, Fresnel};
pub use lambertian::LambertianReflection;
pub use microfacet::{MicrofacetReflection, MicrofacetTransmission};
pub use phong::PhongSpecularReflection;
pub use specular::{FresnelSpecular, SpecularReflection};

use crate::math::{RGBColor, Sample2D, TangentFrame, Vec3};

use bitflags::bitflags;

// the functions below operate in the local shading frame, normal = +z

#[inline(always)]
pub fn cos_theta(w: Vec3) -> f32 {
    w.z
}
#[inline(always)]
pub fn cos2_theta(w: Vec3) -> f32 {
    w.z * w.z
}
#[inline(always)]
pub fn abs_cos_theta(w: Vec3) -> f32 {
    w.z.abs()
}
#[inline(always)]
pub fn sin2_theta(w: Vec3) -> f32 {
    (1.0 - cos2_theta(w)).max(0.0)
}
#[inline(always)]
pub fn sin_theta(w: Vec3) -> f32 {
    sin2_theta(w).sqrt()
}
#[inline(always)]
pub fn tan_theta(w: Vec3) -> f32 {
    sin_theta(w) / cos_theta(w)
}
#[inline(always)]
pub fn tan2_theta(w: Vec3) -> f32 {
    sin2_theta(w) / cos2_theta(w)
}
#[inline(always)]
pub fn cos_phi(w: Vec3) -> f32 {
    let sin_theta = sin_theta(w);
    if sin_theta == 0.0 {
        1.0
    } else {
        (w.x / sin_theta).clamp(-1.0, 1.0)
    }
}
#[inline(always)]
pub fn sin_phi(w: Vec3) -> f32 {
    let sin_theta = sin_theta(w);
    if sin_theta == 0.0 {
        0.0
    } else {
        (w.y / sin_theta).clamp(-1.0, 1.0)
    }
}
#[inline(always)]
pub fn cos2_phi(w: Vec3) -> f32 {
    cos_phi(w) * cos_phi(w)
}
#[inline(always)]
pub fn sin2_phi(w: Vec3) -> f32 {
    sin_phi(w) * sin_phi(w)
}

#[inline(always)]
pub fn same_hemisphere(w: Vec3, wp: Vec3) -> bool {
    w.z * wp.z > 0.0
}

#[inline(always)]
pub fn face_forward(v: Vec3, reference: Vec3) -> Vec3 {
    if v * reference < 0.0 {
        -v
    } else {
        v
    }
}

#[inline(always)]
pub fn reflect(wo: Vec3, normal: Vec3) -> Vec3 {
    -wo + 2.0 * (wo * normal) * normal
}

/// Snell refraction of `wi` about `normal` with `eta = eta_i / eta_t`.
/// Returns `None` on total internal reflection.
pub fn refract(wi: Vec3, normal: Vec3, eta: f32) -> Option<Vec3> {
    let cos_theta_i = normal * wi;
    let sin2_theta_i = (1.0 - cos_theta_i * cos_theta_i).max(0.0);
    let sin2_theta_t = eta * eta * sin2_theta_i;

    if sin2_theta_t >= 1.0 {
        return None;
    }

    let cos_theta_t = (1.0 - sin2_theta_t).sqrt();
    let wt = eta * -wi + (eta * cos_theta_i - cos_theta_t) * normal;
    debug_assert!(wt.is_finite() && !wt.is_zero());
    Some(wt)
}

bitflags! {
    pub struct BsdfFlags: u32 {
        const REFLECTION = 1;
        const TRANSMISSION = 2;
        // distribution
        const SPECULAR = 4;
        const DIFFUSE = 8;
        const GLOSSY = 16;
    }
}

impl BsdfFlags {
    pub fn is_delta(&self) -> bool {
        self.contains(BsdfFlags::SPECULAR)
    }
}

/// One draw from a BSDF. `wi` is in world space at the `Bsdf` API level;
/// the per-lobe `sample_local` implementations fill it in local space and
/// `Bsdf::sample` converts. A zeroed-out sample means the draw failed.
#[derive(Copy, Clone, Debug)]
pub struct BsdfSample {
    pub wi: Vec3,
    pub f: RGBColor,
    pub pdf: f32,
    pub flags: BsdfFlags,
}

impl Default for BsdfSample {
    fn default() -> Self {
        BsdfSample {
            wi: Vec3::Z,
            f: RGBColor::BLACK,
            pdf: 0.0,
            flags: BsdfFlags::empty(),
        }
    }
}

pub(crate) trait LocalBsdf {
    fn flags(&self) -> BsdfFlags;
    fn evaluate_local(&self, wo: Vec3, wi: Vec3) -> RGBColor;
    fn pdf_local(&self, wo: Vec3, wi: Vec3) -> f32;
    fn sample_local(&self, wo: Vec3, s: Sample2D) -> BsdfSample;
}

#[derive(Copy, Clone, Debug)]
pub enum Lobe {
    Lambertian(LambertianReflection),
    Specular(SpecularReflection),
    FresnelSpecular(FresnelSpecular),
    Phong(PhongSpecularReflection),
    MicrofacetReflection(MicrofacetReflection),
    MicrofacetTransmission(MicrofacetTransmission),
}

impl LocalBsdf for Lobe {
    fn flags(&self) -> BsdfFlags {
        match self {
            Lobe::Lambertian(inner) => inner.flags(),
            Lobe::Specular(inner) => inner.flags(),
            Lobe::FresnelSpecular(inner) => inner.flags(),
            Lobe::Phong(inner) => inner.flags(),
            Lobe::MicrofacetReflection(inner) => inner.flags(),
            Lobe::MicrofacetTransmission(inner) => inner.flags(),
        }
    }

    fn evaluate_local(&self, wo: Vec3, wi: Vec3) -> RGBColor {
        match self {
            Lobe::Lambertian(inner) => inner.evaluate_local(wo, wi),
            Lobe::Specular(inner) => inner.evaluate_local(wo, wi),
            Lobe::FresnelSpecular(inner) => inner.evaluate_local(wo, wi),
            Lobe::Phong(inner) => inner.evaluate_local(wo, wi),
            Lobe::MicrofacetReflection(inner) => inner.evaluate_local(wo, wi),
            Lobe::MicrofacetTransmission(inner) => inner.evaluate_local(wo, wi),
        }
    }

    fn pdf_local(&self, wo: Vec3, wi: Vec3) -> f32 {
        match self {
            Lobe::Lambertian(inner) => inner.pdf_local(wo, wi),
            Lobe::Specular(inner) => inner.pdf_local(wo, wi),
            Lobe::FresnelSpecular(inner) => inner.pdf_local(wo, wi),
            Lobe::Phong(inner) => inner.pdf_local(wo, wi),
            Lobe::MicrofacetReflection(inner) => inner.pdf_local(wo, wi),
            Lobe::MicrofacetTransmission(inner) => inner.pdf_local(wo, wi),
        }
    }

    fn sample_local(&self, wo: Vec3, s: Sample2D) -> BsdfSample {
        match self {
            Lobe::Lambertian(inner) => inner.sample_local(wo, s),
            Lobe::Specular(inner) => inner.sample_local(wo, s),
            Lobe::FresnelSpecular(inner) => inner.sample_local(wo, s),
            Lobe::Phong(inner) => inner.sample_local(wo, s),
            Lobe::MicrofacetReflection(inner) => inner.sample_local(wo, s),
            Lobe::MicrofacetTransmission(inner) => inner.sample_local(wo, s),
        }
    }
}

/// A BSDF bound to the shading frame of one intersection. Lives only for
/// the integrator's local computation at that hit. Directions at this API
/// are world space; conversion happens once on the way in and out.
#[derive(Copy, Clone, Debug)]
pub struct Bsdf {
    frame: TangentFrame,
    lobe: Lobe,
}

impl Bsdf {
    pub fn new(frame: TangentFrame, lobe: Lobe) -> Bsdf {
        Bsdf { frame, lobe }
    }

    pub fn flags(&self) -> BsdfFlags {
        self.lobe.flags()
    }

    pub fn is_delta(&self) -> bool {
        self.flags().is_delta()
    }

    pub fn evaluate(&self, world_wo: Vec3, world_wi: Vec3) -> RGBColor {
        self.lobe
            .evaluate_local(self.frame.to_local(&world_wo), self.frame.to_local(&world_wi))
    }

    pub fn pdf(&self, world_wo: Vec3, world_wi: Vec3) -> f32 {
        self.lobe
            .pdf_local(self.frame.to_local(&world_wo), self.frame.to_local(&world_wi))
    }

    pub fn sample(&self, world_wo: Vec3, s: Sample2D) -> BsdfSample {
        let mut sample = self.lobe.sample_local(self.frame.to_local(&world_wo), s);
        sample.wi = self.frame.to_world(&sample.wi);
        sample
    }
}
