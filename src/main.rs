use rust_raytracer::config::{self, IntegratorKind, RenderSettings, SceneKind};
use rust_raytracer::film::Film;
use rust_raytracer::integrator::{
    DebugIntegrator, Integrator, PathIntegrator, RecursivePathIntegrator, WhittedIntegrator,
};
use rust_raytracer::output;
use rust_raytracer::sampler::RandomSampler;
use rust_raytracer::scenes;

use log::info;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use structopt::StructOpt;

use std::path::PathBuf;
use std::time::Instant;

#[derive(StructOpt, Debug)]
#[structopt(name = "rust_raytracer", about = "offline whitted/path renderer")]
struct Opt {
    /// TOML settings file; flags below are ignored when present
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// built-in scene: cornell, furnace or spheres
    #[structopt(long, default_value = "cornell")]
    scene: SceneKind,

    /// integrator: debug, whitted, path or recursive-path
    #[structopt(long, default_value = "path")]
    integrator: IntegratorKind,

    #[structopt(long, default_value = "512")]
    width: usize,

    #[structopt(long, default_value = "512")]
    height: usize,

    #[structopt(long = "spp", default_value = "64")]
    samples_per_pixel: u32,

    #[structopt(long, default_value = "5")]
    max_depth: u32,

    /// worker threads; 0 uses one per logical cpu
    #[structopt(long, default_value = "0")]
    threads: usize,

    #[structopt(long, default_value = "0")]
    seed: u64,

    /// output file name, without extension
    #[structopt(long, default_value = "render")]
    output: String,

    /// image format: ppm, bmp or hdr
    #[structopt(long, default_value = "bmp")]
    format: config::OutputFormat,

    #[structopt(short, long)]
    verbose: bool,
}

impl From<&Opt> for RenderSettings {
    fn from(opt: &Opt) -> RenderSettings {
        RenderSettings {
            width: opt.width,
            height: opt.height,
            samples_per_pixel: opt.samples_per_pixel,
            max_depth: opt.max_depth,
            threads: opt.threads,
            seed: opt.seed,
            integrator: opt.integrator,
            scene: opt.scene,
            output: opt.output.clone(),
            format: opt.format,
        }
    }
}

fn main() {
    let opt = Opt::from_args();

    TermLogger::init(
        if opt.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .expect("failed to initialize logging");

    let settings = match &opt.config {
        Some(path) => match config::load_settings(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("could not read {}: {}", path.display(), e);
                return;
            }
        },
        None => RenderSettings::from(&opt),
    };

    let resolution = (settings.width as f32, settings.height as f32);
    let scene = match settings.scene {
        SceneKind::Cornell => scenes::cornell_box(resolution),
        SceneKind::Furnace => scenes::white_furnace(resolution),
        SceneKind::Spheres => scenes::material_spheres(resolution),
    };

    let threads = if settings.threads == 0 {
        num_cpus::get()
    } else {
        settings.threads
    };

    info!(
        "rendering {}x{} at {} spp, depth {}, {} threads",
        settings.width, settings.height, settings.samples_per_pixel, settings.max_depth, threads
    );

    let sampler = RandomSampler::new(settings.samples_per_pixel, settings.seed);
    let mut film = Film::new(settings.width, settings.height);

    let start = Instant::now();
    match settings.integrator {
        IntegratorKind::Debug => DebugIntegrator.render(&scene, &sampler, &mut film, threads),
        IntegratorKind::Whitted => WhittedIntegrator::new(settings.max_depth).render(
            &scene,
            &sampler,
            &mut film,
            threads,
        ),
        IntegratorKind::Path => PathIntegrator::new(settings.max_depth).render(
            &scene,
            &sampler,
            &mut film,
            threads,
        ),
        IntegratorKind::RecursivePath => RecursivePathIntegrator::new(settings.max_depth).render(
            &scene,
            &sampler,
            &mut film,
            threads,
        ),
    }
    let elapsed = start.elapsed().as_millis() as f32 / 1000.0;

    let camera_rays = settings.width * settings.height * settings.samples_per_pixel as usize;
    info!(
        "{} camera rays in {:.2}s ({:.0} rays/s)",
        camera_rays,
        elapsed,
        camera_rays as f32 / elapsed
    );

    let format = output::ImageFormat::from(settings.format);
    let path = format!("{}.{}", settings.output, format.extension());
    output::save_film(&film, &path, format);
}
