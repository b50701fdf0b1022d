pub use crate::aabb::{HasBoundingBox, AABB};
pub use crate::hittable::{Hittable, Intersection};
pub use crate::math::*;
pub use crate::sampler::{CameraSample, RandomSampler, Sampler};
pub use crate::{RAY_TMIN, SHADOW_EPSILON};

pub use std::cmp::Ordering;
pub use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};
pub use std::f32::{EPSILON, INFINITY};
