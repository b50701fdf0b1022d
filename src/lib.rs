#[macro_use]
extern crate log;

pub mod aabb;
pub mod accelerator;
pub mod bsdf;
pub mod camera;
pub mod config;
pub mod film;
pub mod geometry;
pub mod hittable;
pub mod integrator;
pub mod lights;
pub mod materials;
pub mod math;
pub mod mesh;
pub mod output;
pub mod parallel;
pub mod prelude;
pub mod sampler;
pub mod scene;
pub mod scenes;

/// Rays spawned from a surface start at this offset to avoid re-hitting
/// the surface they left.
pub const RAY_TMIN: f32 = 1e-3;

/// Shadow rays stop this far short of the sampled light point so the light
/// surface itself does not register as a blocker.
pub const SHADOW_EPSILON: f32 = 1e-3;

#[cfg(test)]
pub fn log_test_setup() {
    use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

    let _ = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}
