use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Sub};

/// Linear tristimulus radiance value. All arithmetic is componentwise
/// except `luminance`, which uses the Rec. 709 weights.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct RGBColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl RGBColor {
    pub const fn new(r: f32, g: f32, b: f32) -> RGBColor {
        RGBColor { r, g, b }
    }
    pub const BLACK: RGBColor = RGBColor::new(0.0, 0.0, 0.0);
    pub const WHITE: RGBColor = RGBColor::new(1.0, 1.0, 1.0);

    pub fn is_black(&self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0
    }

    pub fn luminance(&self) -> f32 {
        0.212671 * self.r + 0.715160 * self.g + 0.072169 * self.b
    }

    pub fn max_component(&self) -> f32 {
        self.r.max(self.g).max(self.b)
    }

    pub fn sqrt(&self) -> RGBColor {
        RGBColor::new(self.r.sqrt(), self.g.sqrt(), self.b.sqrt())
    }

    pub fn abs(&self) -> RGBColor {
        RGBColor::new(self.r.abs(), self.g.abs(), self.b.abs())
    }

    pub fn clamp01(&self) -> RGBColor {
        RGBColor::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }

    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }
}

impl Add for RGBColor {
    type Output = RGBColor;
    fn add(self, other: RGBColor) -> RGBColor {
        RGBColor::new(self.r + other.r, self.g + other.g, self.b + other.b)
    }
}

impl AddAssign for RGBColor {
    fn add_assign(&mut self, other: RGBColor) {
        *self = *self + other;
    }
}

impl Sub for RGBColor {
    type Output = RGBColor;
    fn sub(self, other: RGBColor) -> RGBColor {
        RGBColor::new(self.r - other.r, self.g - other.g, self.b - other.b)
    }
}

impl Mul for RGBColor {
    type Output = RGBColor;
    fn mul(self, other: RGBColor) -> RGBColor {
        RGBColor::new(self.r * other.r, self.g * other.g, self.b * other.b)
    }
}

impl MulAssign for RGBColor {
    fn mul_assign(&mut self, other: RGBColor) {
        *self = *self * other;
    }
}

impl Mul<f32> for RGBColor {
    type Output = RGBColor;
    fn mul(self, other: f32) -> RGBColor {
        RGBColor::new(self.r * other, self.g * other, self.b * other)
    }
}

impl Mul<RGBColor> for f32 {
    type Output = RGBColor;
    fn mul(self, other: RGBColor) -> RGBColor {
        other * self
    }
}

impl Div<f32> for RGBColor {
    type Output = RGBColor;
    fn div(self, other: f32) -> RGBColor {
        RGBColor::new(self.r / other, self.g / other, self.b / other)
    }
}

impl Div for RGBColor {
    type Output = RGBColor;
    fn div(self, other: RGBColor) -> RGBColor {
        RGBColor::new(self.r / other.r, self.g / other.g, self.b / other.b)
    }
}

impl From<f32> for RGBColor {
    fn from(s: f32) -> RGBColor {
        RGBColor::new(s, s, s)
    }
}
