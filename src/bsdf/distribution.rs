use super::{
    abs_cos_theta, cos2_phi, cos2_theta, cos_phi, cos_theta, same_hemisphere, sin2_phi, sin_phi,
    tan2_theta, tan_theta,
};
use crate::math::{spherical_direction, Sample2D, Vec3};
use std::f32::consts::PI;

fn erf_inv(x: f32) -> f32 {
    let x = x.clamp(-0.99999, 0.99999);
    let mut w = -((1.0 - x) * (1.0 + x)).ln();
    let mut p;
    if w < 5.0 {
        w -= 2.5;
        p = 2.810_226_36e-08;
        p = 3.432_739_39e-07 + p * w;
        p = -3.523_387_7e-06 + p * w;
        p = -4.391_506_54e-06 + p * w;
        p = 0.000_218_580_87 + p * w;
        p = -0.001_253_725_03 + p * w;
        p = -0.004_177_681_64 + p * w;
        p = 0.246_640_727 + p * w;
        p = 1.501_409_41 + p * w;
    } else {
        w = w.sqrt() - 3.0;
        p = -0.000_200_214_257;
        p = 0.000_100_950_558 + p * w;
        p = 0.001_349_343_22 + p * w;
        p = -0.003_673_428_44 + p * w;
        p = 0.005_739_507_73 + p * w;
        p = -0.007_622_461_3 + p * w;
        p = 0.009_438_870_47 + p * w;
        p = 1.001_674_06 + p * w;
        p = 2.832_976_82 + p * w;
    }
    p * x
}

fn erf(x: f32) -> f32 {
    // A&S formula 7.1.26
    let a1 = 0.254_829_592;
    let a2 = -0.284_496_736;
    let a3 = 1.421_413_741;
    let a4 = -1.453_152_027;
    let a5 = 1.061_405_429;
    let p = 0.327_591_1;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();

    sign * y
}

fn beckmann_sample11(cos_theta_i: f32, u1: f32, u2: f32) -> (f32, f32) {
    // special case (normal incidence)
    if cos_theta_i > 0.9999 {
        let r = (-(1.0 - u1).ln()).sqrt();
        let (sin_phi, cos_phi) = (2.0 * PI * u2).sin_cos();
        return (r * cos_phi, r * sin_phi);
    }

    /* The original inversion routine from the paper contained
       discontinuities, which causes issues for QMC integration
       and techniques like Kelemen-style MLT. The following code
       performs a numerical inversion with better behavior */
    let sin_theta_i = (1.0 - cos_theta_i * cos_theta_i).max(0.0).sqrt();
    let tan_theta_i = sin_theta_i / cos_theta_i;
    let cot_theta_i = 1.0 / tan_theta_i;

    // search interval, parameterized in the erf() domain
    let mut a = -1.0;
    let mut c = erf(cot_theta_i);
    let sample_x = u1.max(1e-6);

    // start with a good initial guess (inverse of an approximation
    // computed in Mathematica)
    let theta_i = cos_theta_i.acos();
    let fit = 1.0 + theta_i * (-0.876 + theta_i * (0.4265 - 0.0594 * theta_i));
    let mut b = c - (1.0 + c) * (1.0 - sample_x).powf(fit);

    // normalization factor for the CDF
    let sqrt_pi_inv = 1.0 / PI.sqrt();
    let normalization =
        1.0 / (1.0 + c + sqrt_pi_inv * tan_theta_i * (-cot_theta_i * cot_theta_i).exp());

    let mut it = 0;
    loop {
        it += 1;
        if it >= 10 {
            break;
        }

        if !(b >= a && b <= c) {
            b = 0.5 * (a + c);
        }

        // evaluate the CDF and its derivative (the density function)
        let inv_erf = erf_inv(b);
        let value = normalization * (1.0 + b + sqrt_pi_inv * tan_theta_i * (-inv_erf * inv_erf).exp())
            - sample_x;
        let derivative = normalization * (1.0 - inv_erf * tan_theta_i);

        if value.abs() < 1e-5 {
            break;
        }

        if value > 0.0 {
            c = b;
        } else {
            a = b;
        }

        b -= value / derivative;
    }

    let slope_x = erf_inv(b);
    let slope_y = erf_inv(2.0 * u2.max(1e-6) - 1.0);
    debug_assert!(slope_x.is_finite());
    debug_assert!(slope_y.is_finite());
    (slope_x, slope_y)
}

fn beckmann_sample(wi: Vec3, alpha_x: f32, alpha_y: f32, u1: f32, u2: f32) -> Vec3 {
    // 1. stretch wi
    let wi_stretched = Vec3::new(alpha_x * wi.x, alpha_y * wi.y, wi.z).normalized();

    // 2. simulate P22_{wi}(x_slope, y_slope, 1, 1)
    let (mut slope_x, mut slope_y) = beckmann_sample11(cos_theta(wi_stretched), u1, u2);

    // 3. rotate
    let tmp = cos_phi(wi_stretched) * slope_x - sin_phi(wi_stretched) * slope_y;
    slope_y = sin_phi(wi_stretched) * slope_x + cos_phi(wi_stretched) * slope_y;
    slope_x = tmp;

    // 4. unstretch
    slope_x *= alpha_x;
    slope_y *= alpha_y;

    // 5. compute normal
    Vec3::new(-slope_x, -slope_y, 1.0).normalized()
}

fn trowbridge_reitz_sample11(cos_theta: f32, u1: f32, mut u2: f32) -> (f32, f32) {
    // special case (normal incidence)
    if cos_theta > 0.9999 {
        let r = (u1 / (1.0 - u1)).sqrt();
        let phi = 2.0 * PI * u2;
        return (r * phi.cos(), r * phi.sin());
    }

    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let tan_theta = sin_theta / cos_theta;
    let a = 1.0 / tan_theta;
    let g1 = 2.0 / (1.0 + (1.0 + 1.0 / (a * a)).sqrt());

    // sample slope_x
    let a = 2.0 * u1 / g1 - 1.0;
    let mut tmp = 1.0 / (a * a - 1.0);
    if tmp > 1e10 {
        tmp = 1e10;
    }
    let b = tan_theta;
    let d = (b * b * tmp * tmp - (a * a - b * b) * tmp).max(0.0).sqrt();
    let slope_x_1 = b * tmp - d;
    let slope_x_2 = b * tmp + d;
    let slope_x = if a < 0.0 || slope_x_2 > 1.0 / tan_theta {
        slope_x_1
    } else {
        slope_x_2
    };

    // sample slope_y
    let s;
    if u2 > 0.5 {
        s = 1.0;
        u2 = 2.0 * (u2 - 0.5);
    } else {
        s = -1.0;
        u2 = 2.0 * (0.5 - u2);
    }
    let z = (u2 * (u2 * (u2 * 0.27385 - 0.73369) + 0.46341))
        / (u2 * (u2 * (u2 * 0.093073 + 0.309420) - 1.000000) + 0.597999);
    let slope_y = s * z * (1.0 + slope_x * slope_x).sqrt();

    debug_assert!(slope_y.is_finite());
    (slope_x, slope_y)
}

fn trowbridge_reitz_sample(wi: Vec3, alpha_x: f32, alpha_y: f32, u1: f32, u2: f32) -> Vec3 {
    let wi_stretched = Vec3::new(alpha_x * wi.x, alpha_y * wi.y, wi.z).normalized();

    let (mut slope_x, mut slope_y) = trowbridge_reitz_sample11(cos_theta(wi_stretched), u1, u2);

    let tmp = cos_phi(wi_stretched) * slope_x - sin_phi(wi_stretched) * slope_y;
    slope_y = sin_phi(wi_stretched) * slope_x + cos_phi(wi_stretched) * slope_y;
    slope_x = tmp;

    slope_x *= alpha_x;
    slope_y *= alpha_y;

    Vec3::new(-slope_x, -slope_y, 1.0).normalized()
}

#[derive(Copy, Clone, Debug)]
pub enum MicrofacetDistribution {
    Beckmann {
        alpha_x: f32,
        alpha_y: f32,
        sample_visible_area: bool,
    },
    TrowbridgeReitz {
        alpha_x: f32,
        alpha_y: f32,
        sample_visible_area: bool,
    },
}

impl MicrofacetDistribution {
    pub fn beckmann(alpha_x: f32, alpha_y: f32, sample_visible_area: bool) -> Self {
        MicrofacetDistribution::Beckmann {
            alpha_x: alpha_x.max(0.001),
            alpha_y: alpha_y.max(0.001),
            sample_visible_area,
        }
    }

    pub fn trowbridge_reitz(alpha_x: f32, alpha_y: f32, sample_visible_area: bool) -> Self {
        MicrofacetDistribution::TrowbridgeReitz {
            alpha_x: alpha_x.max(0.001),
            alpha_y: alpha_y.max(0.001),
            sample_visible_area,
        }
    }

    pub fn roughness_to_alpha(roughness: f32) -> f32 {
        let roughness = roughness.max(1e-3);
        let x = roughness.ln();
        1.62142 + 0.819955 * x + 0.1734 * x * x + 0.0171201 * x * x * x
            + 0.000640711 * x * x * x * x
    }

    fn parameters(&self) -> (f32, f32, bool) {
        match *self {
            MicrofacetDistribution::Beckmann {
                alpha_x,
                alpha_y,
                sample_visible_area,
            }
            | MicrofacetDistribution::TrowbridgeReitz {
                alpha_x,
                alpha_y,
                sample_visible_area,
            } => (alpha_x, alpha_y, sample_visible_area),
        }
    }

    /// Differential area of microfacets oriented along `wh`.
    pub fn d(&self, wh: Vec3) -> f32 {
        let tan2 = tan2_theta(wh);
        if tan2.is_infinite() {
            return 0.0;
        }
        let cos4 = cos2_theta(wh) * cos2_theta(wh);
        match *self {
            MicrofacetDistribution::Beckmann {
                alpha_x, alpha_y, ..
            } => {
                (-tan2 * (cos2_phi(wh) / (alpha_x * alpha_x) + sin2_phi(wh) / (alpha_y * alpha_y)))
                    .exp()
                    / (PI * alpha_x * alpha_y * cos4)
            }
            MicrofacetDistribution::TrowbridgeReitz {
                alpha_x, alpha_y, ..
            } => {
                let e = (cos2_phi(wh) / (alpha_x * alpha_x)
                    + sin2_phi(wh) / (alpha_y * alpha_y))
                    * tan2;
                1.0 / (PI * alpha_x * alpha_y * cos4 * (1.0 + e) * (1.0 + e))
            }
        }
    }

    /// Shadowing-masking auxiliary function.
    pub fn lambda(&self, w: Vec3) -> f32 {
        let abs_tan_theta = tan_theta(w).abs();
        if abs_tan_theta.is_infinite() {
            return 0.0;
        }
        match *self {
            MicrofacetDistribution::Beckmann {
                alpha_x, alpha_y, ..
            } => {
                let alpha =
                    (cos2_phi(w) * alpha_x * alpha_x + sin2_phi(w) * alpha_y * alpha_y).sqrt();
                let a = 1.0 / (alpha * abs_tan_theta);
                if a >= 1.6 {
                    return 0.0;
                }
                (1.0 - 1.259 * a + 0.396 * a * a) / (3.535 * a + 2.181 * a * a)
            }
            MicrofacetDistribution::TrowbridgeReitz {
                alpha_x, alpha_y, ..
            } => {
                let alpha =
                    (cos2_phi(w) * alpha_x * alpha_x + sin2_phi(w) * alpha_y * alpha_y).sqrt();
                let alpha2_tan2 = (alpha * abs_tan_theta) * (alpha * abs_tan_theta);
                (-1.0 + (1.0 + alpha2_tan2).sqrt()) / 2.0
            }
        }
    }

    pub fn g1(&self, w: Vec3) -> f32 {
        1.0 / (1.0 + self.lambda(w))
    }

    pub fn g(&self, wo: Vec3, wi: Vec3) -> f32 {
        1.0 / (1.0 + self.lambda(wo) + self.lambda(wi))
    }

    pub fn sample_wh(&self, wo: Vec3, u: Sample2D) -> Vec3 {
        let (alpha_x, alpha_y, sample_visible_area) = self.parameters();
        if sample_visible_area {
            let flip = wo.z < 0.0;
            let w = if flip { -wo } else { wo };
            let wh = match self {
                MicrofacetDistribution::Beckmann { .. } => {
                    beckmann_sample(w, alpha_x, alpha_y, u.x, u.y)
                }
                MicrofacetDistribution::TrowbridgeReitz { .. } => {
                    trowbridge_reitz_sample(w, alpha_x, alpha_y, u.x, u.y)
                }
            };
            return if flip { -wh } else { wh };
        }

        // sample the full distribution of normals
        match self {
            MicrofacetDistribution::Beckmann { .. } => {
                let (tan2, phi) = if alpha_x == alpha_y {
                    let log_sample = (1.0 - u.x).ln();
                    (-alpha_x * alpha_x * log_sample, u.y * 2.0 * PI)
                } else {
                    let log_sample = (1.0 - u.x).ln();
                    let mut phi = (alpha_y / alpha_x * (2.0 * PI * u.y + 0.5 * PI).tan()).atan();
                    if u.y > 0.5 {
                        phi += PI;
                    }
                    let (sin_phi, cos_phi) = phi.sin_cos();
                    let alpha_x2 = alpha_x * alpha_x;
                    let alpha_y2 = alpha_y * alpha_y;
                    (
                        -log_sample / (cos_phi * cos_phi / alpha_x2 + sin_phi * sin_phi / alpha_y2),
                        phi,
                    )
                };
                let cos_theta = 1.0 / (1.0 + tan2).sqrt();
                let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
                let wh = spherical_direction(sin_theta, cos_theta, phi);
                if !same_hemisphere(wo, wh) {
                    -wh
                } else {
                    wh
                }
            }
            MicrofacetDistribution::TrowbridgeReitz { .. } => {
                let (cos_theta, phi) = if alpha_x == alpha_y {
                    let tan_theta2 = alpha_x * alpha_x * u.x / (1.0 - u.x);
                    (1.0 / (1.0 + tan_theta2).sqrt(), 2.0 * PI * u.y)
                } else {
                    let mut phi = (alpha_y / alpha_x * (2.0 * PI * u.y + 0.5 * PI).tan()).atan();
                    if u.y > 0.5 {
                        phi += PI;
                    }
                    let (sin_phi, cos_phi) = phi.sin_cos();
                    let alpha_x2 = alpha_x * alpha_x;
                    let alpha_y2 = alpha_y * alpha_y;
                    let alpha2 =
                        1.0 / (cos_phi * cos_phi / alpha_x2 + sin_phi * sin_phi / alpha_y2);
                    let tan_theta2 = alpha2 * u.x / (1.0 - u.x);
                    (1.0 / (1.0 + tan_theta2).sqrt(), phi)
                };
                let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
                let wh = spherical_direction(sin_theta, cos_theta, phi);
                if !same_hemisphere(wo, wh) {
                    -wh
                } else {
                    wh
                }
            }
        }
    }

    pub fn pdf(&self, wo: Vec3, wh: Vec3) -> f32 {
        let (_, _, sample_visible_area) = self.parameters();
        if sample_visible_area {
            self.d(wh) * self.g1(wo) * (wo * wh).abs() / abs_cos_theta(wo)
        } else {
            self.d(wh) * abs_cos_theta(wh)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_mt::Mt64;

    fn distributions() -> Vec<MicrofacetDistribution> {
        vec![
            MicrofacetDistribution::beckmann(0.3, 0.3, true),
            MicrofacetDistribution::beckmann(0.2, 0.6, false),
            MicrofacetDistribution::trowbridge_reitz(0.3, 0.3, true),
            MicrofacetDistribution::trowbridge_reitz(0.15, 0.4, false),
        ]
    }

    #[test]
    fn test_sampled_wh_has_positive_density() {
        let mut rng = Mt64::seed_from_u64(0xd157);
        let wo = Vec3::new(0.3, -0.2, 0.8).normalized();
        for dist in distributions() {
            for _ in 0..1000 {
                let wh = dist.sample_wh(wo, Sample2D::new(rng.gen(), rng.gen()));
                assert!((wh.norm() - 1.0).abs() < 1e-3);
                assert!(dist.d(wh) > 0.0);
                assert!(dist.pdf(wo, wh) > 0.0);
            }
        }
    }

    #[test]
    fn test_d_integrates_to_projected_area() {
        // integral of D(wh) cos(theta_h) over the hemisphere should be 1
        let mut rng = Mt64::seed_from_u64(0xd158);
        for dist in distributions() {
            let n = 200_000;
            let mut sum = 0.0f64;
            for _ in 0..n {
                // uniform hemisphere sampling, pdf 1/(2 pi)
                let u: f32 = rng.gen();
                let v: f32 = rng.gen();
                let z = u;
                let r = (1.0 - z * z).max(0.0).sqrt();
                let phi = 2.0 * PI * v;
                let wh = Vec3::new(r * phi.cos(), r * phi.sin(), z);
                sum += (dist.d(wh) * cos_theta(wh) * 2.0 * PI) as f64;
            }
            let estimate = sum / n as f64;
            assert!(
                (estimate - 1.0).abs() < 0.05,
                "D normalization off: {} for {:?}",
                estimate,
                dist
            );
        }
    }

    #[test]
    fn test_g1_in_unit_range() {
        let mut rng = Mt64::seed_from_u64(0xd159);
        for dist in distributions() {
            for _ in 0..1000 {
                let w = crate::math::uniform_sphere_sample(Sample2D::new(rng.gen(), rng.gen()));
                let g1 = dist.g1(w);
                assert!((0.0..=1.0 + 1e-6).contains(&g1), "{} for {:?}", g1, w);
            }
        }
    }

    #[test]
    fn test_roughness_remap_monotonic() {
        let mut last = MicrofacetDistribution::roughness_to_alpha(1e-4);
        for roughness in [0.01f32, 0.05, 0.1, 0.3, 0.6, 1.0] {
            let alpha = MicrofacetDistribution::roughness_to_alpha(roughness);
            assert!(alpha > last);
            last = alpha;
        }
    }
}
