use serde::Deserialize;

use std::io;
use std::path::Path;
use std::str::FromStr;

#[derive(Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum IntegratorKind {
    Debug,
    Whitted,
    Path,
    RecursivePath,
}

impl FromStr for IntegratorKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(IntegratorKind::Debug),
            "whitted" => Ok(IntegratorKind::Whitted),
            "path" => Ok(IntegratorKind::Path),
            "recursive-path" => Ok(IntegratorKind::RecursivePath),
            other => Err(format!("unknown integrator '{}'", other)),
        }
    }
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SceneKind {
    Cornell,
    Furnace,
    Spheres,
}

impl FromStr for SceneKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cornell" => Ok(SceneKind::Cornell),
            "furnace" => Ok(SceneKind::Furnace),
            "spheres" => Ok(SceneKind::Spheres),
            other => Err(format!("unknown scene '{}'", other)),
        }
    }
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Ppm,
    Bmp,
    Hdr,
}

impl FromStr for OutputFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ppm" => Ok(OutputFormat::Ppm),
            "bmp" => Ok(OutputFormat::Bmp),
            "hdr" => Ok(OutputFormat::Hdr),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

impl From<OutputFormat> for crate::output::ImageFormat {
    fn from(value: OutputFormat) -> Self {
        match value {
            OutputFormat::Ppm => crate::output::ImageFormat::Ppm,
            OutputFormat::Bmp => crate::output::ImageFormat::Bmp,
            OutputFormat::Hdr => crate::output::ImageFormat::Hdr,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(deny_unknown_fields, default)]
pub struct RenderSettings {
    pub width: usize,
    pub height: usize,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    /// 0 picks one worker per logical cpu
    pub threads: usize,
    pub seed: u64,
    pub integrator: IntegratorKind,
    pub scene: SceneKind,
    pub output: String,
    pub format: OutputFormat,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            width: 512,
            height: 512,
            samples_per_pixel: 64,
            max_depth: 5,
            threads: 0,
            seed: 0,
            integrator: IntegratorKind::Path,
            scene: SceneKind::Cornell,
            output: "render".to_string(),
            format: OutputFormat::Bmp,
        }
    }
}

pub fn load_settings<P: AsRef<Path>>(path: P) -> io::Result<RenderSettings> {
    let text = std::fs::read_to_string(path)?;
    toml::from_str(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
