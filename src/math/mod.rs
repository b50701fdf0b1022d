mod color;
mod point;
mod ray;
mod sample;
mod sampling;
mod tangent_frame;
mod vec;

pub use color::RGBColor;
pub use point::{distance, distance_squared, Point3};
pub use ray::Ray;
pub use sample::{Sample1D, Sample2D};
pub use sampling::*;
pub use tangent_frame::TangentFrame;
pub use vec::Vec3;
