use super::{estimate_direct, Integrator};
use crate::bsdf::{Bsdf, BsdfFlags};
use crate::prelude::*;
use crate::scene::Scene;

/// Shows absolute shading normals; handy when a scene renders black.
pub struct DebugIntegrator;

impl Integrator for DebugIntegrator {
    fn li(&self, mut ray: Ray, scene: &Scene, _sampler: &mut dyn Sampler) -> RGBColor {
        match scene.intersect(&mut ray) {
            Some(isect) => RGBColor::new(
                isect.normal.x.abs(),
                isect.normal.y.abs(),
                isect.normal.z.abs(),
            ),
            None => RGBColor::BLACK,
        }
    }
}

/// Closed-form direct illumination plus mirror and glass recursion to a
/// fixed depth bound.
pub struct WhittedIntegrator {
    pub max_depth: u32,
}

impl WhittedIntegrator {
    pub fn new(max_depth: u32) -> WhittedIntegrator {
        WhittedIntegrator { max_depth }
    }

    fn li_depth(
        &self,
        mut ray: Ray,
        scene: &Scene,
        sampler: &mut dyn Sampler,
        depth: u32,
    ) -> RGBColor {
        let isect = match scene.intersect(&mut ray) {
            Some(isect) => isect,
            None => return scene.environment_lighting(&ray),
        };

        // a medium boundary scatters nothing; keep going straight through
        let bsdf = match scene.scattering(&isect, sampler) {
            Some(bsdf) => bsdf,
            None => return self.li_depth(isect.spawn_ray(ray.direction), scene, sampler, depth),
        };

        let mut radiance = scene.emitted(&isect);
        radiance += estimate_direct(scene, &isect, &bsdf, sampler);

        if depth + 1 < self.max_depth {
            radiance += self.specular_contribution(
                &isect,
                &bsdf,
                scene,
                sampler,
                depth,
                BsdfFlags::REFLECTION,
            );
            radiance += self.specular_contribution(
                &isect,
                &bsdf,
                scene,
                sampler,
                depth,
                BsdfFlags::TRANSMISSION,
            );
        }

        radiance
    }

    fn specular_contribution(
        &self,
        isect: &Intersection,
        bsdf: &Bsdf,
        scene: &Scene,
        sampler: &mut dyn Sampler,
        depth: u32,
        direction_flag: BsdfFlags,
    ) -> RGBColor {
        let match_flags = BsdfFlags::SPECULAR | direction_flag;

        let sample = bsdf.sample(isect.wo, sampler.get_float2());
        if !sample.flags.contains(match_flags) {
            return RGBColor::BLACK;
        }
        if sample.f.is_black() || sample.pdf == 0.0 {
            return RGBColor::BLACK;
        }

        sample.f
            * self.li_depth(isect.spawn_ray(sample.wi), scene, sampler, depth + 1)
            * (sample.wi * isect.normal).abs()
            / sample.pdf
    }
}

impl Integrator for WhittedIntegrator {
    fn li(&self, ray: Ray, scene: &Scene, sampler: &mut dyn Sampler) -> RGBColor {
        self.li_depth(ray, scene, sampler, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::geometry::Rectangle;
    use crate::lights::PointLight;
    use crate::materials::Matte;
    use crate::scene::Scene;

    /// Point light above a white floor with a small blocker in between.
    fn shadow_scene() -> Scene {
        let camera = Camera::look_at(
            Point3::new(0.0, 3.0, 4.0),
            Point3::ORIGIN,
            Vec3::Y,
            60.0,
            (32.0, 32.0),
        );
        let mut scene = Scene::new(camera);

        let white = scene.add_material(Matte::new(RGBColor::WHITE));
        let floor = scene.add_shape(Rectangle::from_xz(-4.0, 4.0, -4.0, 4.0, 0.0, true));
        scene.add_primitive(floor, Some(white));

        let blocker = scene.add_shape(Rectangle::from_xz(-0.2, 0.2, -0.2, 0.2, 1.0, true));
        scene.add_primitive(blocker, Some(white));

        scene.add_light(PointLight::new(
            Point3::new(0.0, 2.0, 0.0),
            RGBColor::new(10.0, 10.0, 10.0),
        ));

        scene.preprocess();
        scene
    }

    #[test]
    fn test_shadowed_pixel_is_black() {
        let scene = shadow_scene();
        let integrator = WhittedIntegrator::new(5);
        let mut sampler = RandomSampler::new(1, 0x5ade);

        // straight down onto the floor point under the blocker
        let shadowed = Ray::new(Point3::new(0.0, 0.5, 0.0), -Vec3::Y);
        let l = integrator.li(shadowed, &scene, &mut sampler);
        assert!(l.is_black(), "direct term in shadow was {:?}", l);

        // a floor point the blocker does not cover
        let lit = Ray::new(Point3::new(1.5, 0.5, 0.0), -Vec3::Y);
        let l = integrator.li(lit, &scene, &mut sampler);
        assert!(l.luminance() > 0.0, "unshadowed pixel was black");
    }

    #[test]
    fn test_miss_returns_environment() {
        let scene = shadow_scene();
        let integrator = WhittedIntegrator::new(5);
        let mut sampler = RandomSampler::new(1, 2);

        let escaping = Ray::new(Point3::new(0.0, 1.0, 0.0), Vec3::Y);
        assert!(integrator.li(escaping, &scene, &mut sampler).is_black());
    }

    #[test]
    fn test_debug_integrator_shows_normals() {
        let scene = shadow_scene();
        let mut sampler = RandomSampler::new(1, 3);

        let down = Ray::new(Point3::new(1.5, 0.5, 0.0), -Vec3::Y);
        let color = DebugIntegrator.li(down, &scene, &mut sampler);
        assert!((color.g - 1.0).abs() < 1e-5);
        assert!(color.r < 1e-5 && color.b < 1e-5);
    }
}
