mod path;
mod whitted;

pub use path::{PathIntegrator, RecursivePathIntegrator};
pub use whitted::{DebugIntegrator, WhittedIntegrator};

use crate::bsdf::Bsdf;
use crate::film::{Film, FilmView};
use crate::parallel::{ParallelSystem, Task};
use crate::prelude::*;
use crate::scene::Scene;

use pbr::ProgressBar;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::time::Duration;

/// Scanlines per render task.
pub const STRIPE_HEIGHT: usize = 16;

/*
  Li = Lo = Le + ∫Li
          = Le + ∫(Le + ∫Li)
          = Le + ∫Le + ∫∫Le + ∫∫∫Le + ...

  solving the rendering equation, an integral equation, by Monte Carlo
  integration along sampled camera rays
*/
pub trait Integrator: Send + Sync {
    /// Radiance arriving along `ray`.
    fn li(&self, ray: Ray, scene: &Scene, sampler: &mut dyn Sampler) -> RGBColor;

    /// Renders the film. `num_threads` of 0 renders inline on the calling
    /// thread; the stripe decomposition and per-stripe sampler streams are
    /// identical either way, so the output does not depend on the thread
    /// count.
    fn render(&self, scene: &Scene, sampler: &dyn Sampler, film: &mut Film, num_threads: usize)
    where
        Self: Sized,
    {
        let height = film.height;
        let scanlines_done = AtomicUsize::new(0);

        let mut tasks: Vec<RenderTask<'_, Self>> = film
            .stripes_mut(STRIPE_HEIGHT)
            .into_iter()
            .enumerate()
            .map(|(index, view)| RenderTask {
                integrator: self,
                scene,
                sampler: sampler.clone_with_seed(index as u64),
                view,
                scanlines_done: &scanlines_done,
            })
            .collect();

        if num_threads < 1 {
            for task in &mut tasks {
                task.execute();
            }
            return;
        }

        info!(
            "rendering {} stripes on {} workers",
            tasks.len(),
            num_threads
        );

        let system = ParallelSystem::new();
        for task in tasks {
            system.add_task(Box::new(task));
        }

        crossbeam::thread::scope(|scope| {
            for _ in 0..num_threads {
                scope.spawn(|_| system.worker_loop());
            }

            scope.spawn(|_| {
                let mut progress = ProgressBar::new(height as u64);
                progress.message("scanlines ");
                loop {
                    let done = scanlines_done.load(AtomicOrdering::Relaxed);
                    progress.set(done as u64);
                    if done >= height {
                        break;
                    }
                    std::thread::sleep(Duration::from_millis(250));
                }
                progress.finish();
            });

            system.wait_for_finish();
        })
        .unwrap();
    }
}

struct RenderTask<'a, I: Integrator> {
    integrator: &'a I,
    scene: &'a Scene,
    sampler: Box<dyn Sampler>,
    view: FilmView<'a>,
    scanlines_done: &'a AtomicUsize,
}

impl<'a, I: Integrator> Task for RenderTask<'a, I> {
    fn execute(&mut self) {
        let ratio = 1.0 / self.sampler.samples_per_pixel() as f32;
        let width = self.view.width();

        for y in self.view.y_start..self.view.y_end {
            for x in 0..width {
                let mut color = RGBColor::BLACK;
                self.sampler.start_pixel();
                loop {
                    let camera_sample = self.sampler.get_camera_sample((x as f32, y as f32));
                    let ray = self.scene.camera.generate_ray(camera_sample);

                    let dl = self.integrator.li(ray, self.scene, &mut *self.sampler) * ratio;
                    debug_assert!(dl.is_finite(), "({}, {}) produced {:?}", x, y, dl);
                    color += dl;

                    if !self.sampler.next_sample() {
                        break;
                    }
                }
                self.view.add_color(x, y, color.clamp01());
            }
            self.scanlines_done.fetch_add(1, AtomicOrdering::Relaxed);
        }
    }
}

/// One-sample next-event estimation against every light in the scene.
/// Delta BSDFs evaluate to black and contribute nothing here; they are
/// handled through their sampling routines instead.
pub(crate) fn estimate_direct(
    scene: &Scene,
    isect: &Intersection,
    bsdf: &Bsdf,
    sampler: &mut dyn Sampler,
) -> RGBColor {
    let mut direct = RGBColor::BLACK;
    for light in &scene.lights {
        let light_sample = light.sample_li(isect, sampler.get_float2());
        if light_sample.li.is_black() || light_sample.pdf == 0.0 {
            continue;
        }

        let f = bsdf.evaluate(isect.wo, light_sample.wi);
        if !f.is_black() && !scene.occluded(isect, light_sample.position) {
            direct += f * light_sample.li * (light_sample.wi * isect.normal).abs()
                / light_sample.pdf;
        }
    }
    direct
}
