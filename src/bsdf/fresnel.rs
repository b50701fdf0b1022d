use crate::math::RGBColor;

/// Unpolarized Fresnel reflectance of a dielectric interface. `cos_theta_i`
/// is signed: a negative value means the ray is exiting the medium and the
/// indices swap.
pub fn fresnel_dielectric(cos_theta_i: f32, eta_i: f32, eta_t: f32) -> f32 {
    let mut cos_theta_i = cos_theta_i.clamp(-1.0, 1.0);
    let (eta_i, eta_t) = if cos_theta_i > 0.0 {
        (eta_i, eta_t)
    } else {
        cos_theta_i = cos_theta_i.abs();
        (eta_t, eta_i)
    };

    // Snell's law
    let sin_theta_i = (1.0 - cos_theta_i * cos_theta_i).max(0.0).sqrt();
    let sin_theta_t = eta_i / eta_t * sin_theta_i;

    // total internal reflection
    if sin_theta_t >= 1.0 {
        return 1.0;
    }

    let cos_theta_t = (1.0 - sin_theta_t * sin_theta_t).max(0.0).sqrt();

    let r_para = (eta_t * cos_theta_i - eta_i * cos_theta_t)
        / (eta_t * cos_theta_i + eta_i * cos_theta_t);
    let r_perp = (eta_i * cos_theta_i - eta_t * cos_theta_t)
        / (eta_i * cos_theta_i + eta_t * cos_theta_t);
    (r_para * r_para + r_perp * r_perp) / 2.0
}

// https://seblagarde.wordpress.com/2013/04/29/memo-on-fresnel-equations/
pub fn fresnel_conductor(
    cos_theta_i: f32,
    eta_i: RGBColor,
    eta_t: RGBColor,
    k: RGBColor,
) -> RGBColor {
    let cos_theta_i = cos_theta_i.clamp(-1.0, 1.0);
    let eta = eta_t / eta_i;
    let eta_k = k / eta_i;

    let cos2 = cos_theta_i * cos_theta_i;
    let sin2 = 1.0 - cos2;
    let eta2 = eta * eta;
    let eta_k2 = eta_k * eta_k;

    let t0 = eta2 - eta_k2 - RGBColor::from(sin2);
    let a2_plus_b2 = (t0 * t0 + 4.0 * eta2 * eta_k2).sqrt();
    let t1 = a2_plus_b2 + RGBColor::from(cos2);
    let a = (0.5 * (a2_plus_b2 + t0)).abs().sqrt();
    let t2 = 2.0 * cos_theta_i * a;
    let rs = (t1 - t2) / (t1 + t2);

    let t3 = cos2 * a2_plus_b2 + RGBColor::from(sin2 * sin2);
    let t4 = t2 * sin2;
    let rp = rs * (t3 - t4) / (t3 + t4);

    0.5 * (rp + rs)
}

#[derive(Copy, Clone, Debug)]
pub enum Fresnel {
    Dielectric {
        eta_i: f32,
        eta_t: f32,
    },
    Conductor {
        eta_i: RGBColor,
        eta_t: RGBColor,
        k: RGBColor,
    },
    NoOp,
}

impl Fresnel {
    pub fn evaluate(&self, cos_theta_i: f32) -> RGBColor {
        match self {
            Fresnel::Dielectric { eta_i, eta_t } => {
                RGBColor::from(fresnel_dielectric(cos_theta_i, *eta_i, *eta_t))
            }
            Fresnel::Conductor { eta_i, eta_t, k } => {
                fresnel_conductor(cos_theta_i.abs(), *eta_i, *eta_t, *k)
            }
            Fresnel::NoOp => RGBColor::WHITE,
        }
    }
}
