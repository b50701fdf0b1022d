use crate::accelerator::Bvh;
use crate::bsdf::Bsdf;
use crate::camera::Camera;
use crate::geometry::{ShapeEnum, Triangle};
use crate::lights::{AreaLight, LightEnum};
use crate::materials::{Material, MaterialEnum};
use crate::prelude::*;
use crate::sampler::Sampler;

/// Scene entry: a shape with an optional material and an optional area
/// light, or a whole triangle mesh behind its own sub-BVH. References are
/// indices into the scene's tables.
pub enum Primitive {
    Geometric {
        shape: usize,
        material: Option<usize>,
        area_light: Option<usize>,
    },
    Mesh(TriangleMesh),
}

pub struct TriangleMesh {
    triangles: Vec<Triangle>,
    bvh: Bvh,
    material: Option<usize>,
    bounds: AABB,
}

impl TriangleMesh {
    pub fn new(triangles: Vec<Triangle>, material: Option<usize>) -> TriangleMesh {
        let triangle_bounds: Vec<AABB> = triangles.iter().map(|t| t.aabb()).collect();
        let mut bounds = AABB::empty();
        for b in &triangle_bounds {
            bounds.expand_mut(b);
        }
        TriangleMesh {
            bvh: Bvh::build(&triangle_bounds),
            triangles,
            material,
            bounds,
        }
    }

    fn intersect(&self, ray: &mut Ray) -> Option<Intersection> {
        let mut best = None;
        self.bvh.intersect(ray, |index, ray| {
            if let Some(isect) = self.triangles[index].hit(ray) {
                best = Some(isect);
                true
            } else {
                false
            }
        });
        best
    }
}

impl Primitive {
    fn world_bounds(&self, shapes: &[ShapeEnum]) -> AABB {
        match self {
            Primitive::Geometric { shape, .. } => shapes[*shape].aabb(),
            Primitive::Mesh(mesh) => mesh.bounds,
        }
    }

    fn intersect(&self, shapes: &[ShapeEnum], ray: &mut Ray) -> Option<Intersection> {
        match self {
            Primitive::Geometric { shape, .. } => shapes[*shape].hit(ray),
            Primitive::Mesh(mesh) => mesh.intersect(ray),
        }
    }

    pub fn material(&self) -> Option<usize> {
        match self {
            Primitive::Geometric { material, .. } => *material,
            Primitive::Mesh(mesh) => mesh.material,
        }
    }

    pub fn area_light(&self) -> Option<usize> {
        match self {
            Primitive::Geometric { area_light, .. } => *area_light,
            Primitive::Mesh(_) => None,
        }
    }
}

/// Owns all shapes, materials, lights and primitives. `preprocess` must
/// run after construction; thereafter the scene is immutable for the
/// duration of rendering and is shared read-only across workers.
pub struct Scene {
    pub camera: Camera,
    pub shapes: Vec<ShapeEnum>,
    pub materials: Vec<MaterialEnum>,
    pub lights: Vec<LightEnum>,
    pub primitives: Vec<Primitive>,
    bvh: Option<Bvh>,
    world_bounds: AABB,
}

impl Scene {
    pub fn new(camera: Camera) -> Scene {
        Scene {
            camera,
            shapes: Vec::new(),
            materials: Vec::new(),
            lights: Vec::new(),
            primitives: Vec::new(),
            bvh: None,
            world_bounds: AABB::empty(),
        }
    }

    pub fn add_shape(&mut self, shape: impl Into<ShapeEnum>) -> usize {
        self.shapes.push(shape.into());
        self.shapes.len() - 1
    }

    pub fn add_material(&mut self, material: impl Into<MaterialEnum>) -> usize {
        self.materials.push(material.into());
        self.materials.len() - 1
    }

    pub fn add_primitive(&mut self, shape: usize, material: Option<usize>) -> usize {
        self.primitives.push(Primitive::Geometric {
            shape,
            material,
            area_light: None,
        });
        self.primitives.len() - 1
    }

    pub fn add_light(&mut self, light: impl Into<LightEnum>) -> usize {
        self.lights.push(light.into());
        self.lights.len() - 1
    }

    /// Wraps an already-added shape in an area light and registers the
    /// emitting primitive.
    pub fn add_area_light(
        &mut self,
        shape: usize,
        radiance: RGBColor,
        material: Option<usize>,
    ) -> usize {
        let light_index = self.add_light(AreaLight::new(radiance, self.shapes[shape]));
        self.primitives.push(Primitive::Geometric {
            shape,
            material,
            area_light: Some(light_index),
        });
        light_index
    }

    pub fn add_mesh(&mut self, triangles: Vec<Triangle>, material: Option<usize>) -> usize {
        self.primitives
            .push(Primitive::Mesh(TriangleMesh::new(triangles, material)));
        self.primitives.len() - 1
    }

    /// Computes world bounds, finalizes the lights and builds the BVH.
    pub fn preprocess(&mut self) {
        let mut bounds = AABB::empty();
        for primitive in &self.primitives {
            bounds.expand_mut(&primitive.world_bounds(&self.shapes));
        }
        self.world_bounds = bounds;

        for light in &mut self.lights {
            light.preprocess(&bounds);
        }

        let primitive_bounds: Vec<AABB> = self
            .primitives
            .iter()
            .map(|p| p.world_bounds(&self.shapes))
            .collect();
        info!(
            "building scene bvh over {} primitives",
            primitive_bounds.len()
        );
        self.bvh = Some(Bvh::build(&primitive_bounds));
    }

    pub fn world_bounds(&self) -> AABB {
        self.world_bounds
    }

    pub fn intersect(&self, ray: &mut Ray) -> Option<Intersection> {
        let bvh = match &self.bvh {
            Some(bvh) => bvh,
            None => return None,
        };

        let mut best = None;
        bvh.intersect(ray, |index, ray| {
            if let Some(mut isect) = self.primitives[index].intersect(&self.shapes, ray) {
                isect.primitive = index;
                best = Some(isect);
                true
            } else {
                false
            }
        });
        best
    }

    /// Whether anything blocks the segment from the intersection to the
    /// target point. The ray stops just short of the target so the light
    /// surface being sampled does not occlude itself.
    pub fn occluded(&self, isect: &Intersection, target: Point3) -> bool {
        let dist = distance(isect.point, target);
        let mut ray = isect.spawn_ray_to(target);
        ray.tmax = dist - SHADOW_EPSILON;
        self.intersect(&mut ray).is_some()
    }

    /// BSDF at the intersection, or `None` at a pure medium boundary.
    pub fn scattering(&self, isect: &Intersection, sampler: &mut dyn Sampler) -> Option<Bsdf> {
        let material = self.primitives[isect.primitive].material()?;
        Some(self.materials[material].scattering(isect, sampler))
    }

    /// Emitted radiance from the hit itself, non-black only when the hit
    /// primitive carries an area light.
    pub fn emitted(&self, isect: &Intersection) -> RGBColor {
        match self.primitives[isect.primitive].area_light() {
            Some(light) => match &self.lights[light] {
                LightEnum::Area(area) => area.l(isect.point, isect.normal, isect.wo),
                _ => RGBColor::BLACK,
            },
            None => RGBColor::BLACK,
        }
    }

    /// Sum of infinite-light emission along an escaped ray.
    pub fn environment_lighting(&self, ray: &Ray) -> RGBColor {
        let mut radiance = RGBColor::BLACK;
        for light in &self.lights {
            radiance += light.le(ray);
        }
        radiance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rectangle, Sphere};
    use crate::materials::Matte;
    use crate::sampler::RandomSampler;

    fn test_camera() -> Camera {
        Camera::new(
            Point3::new(0.0, 0.0, -5.0),
            Vec3::Z,
            Vec3::Y,
            60.0,
            (64.0, 64.0),
        )
    }

    fn two_sphere_scene() -> Scene {
        let mut scene = Scene::new(test_camera());
        let matte = scene.add_material(Matte::new(RGBColor::WHITE));
        let near = scene.add_shape(Sphere::new(Point3::new(0.0, 0.0, 2.0), 1.0));
        let far = scene.add_shape(Sphere::new(Point3::new(0.0, 0.0, 8.0), 1.0));
        scene.add_primitive(near, Some(matte));
        scene.add_primitive(far, Some(matte));
        scene.preprocess();
        scene
    }

    #[test]
    fn test_intersect_returns_closest_primitive() {
        let scene = two_sphere_scene();
        let mut ray = Ray::new(Point3::ORIGIN, Vec3::Z);
        let isect = scene.intersect(&mut ray).unwrap();
        assert_eq!(isect.primitive, 0);
        assert!((ray.tmax - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_occlusion_respects_target_distance() {
        let scene = two_sphere_scene();
        let from = Intersection::new(Point3::new(0.0, 0.0, -1.0), -Vec3::Z, -Vec3::Z);

        // blocked by the near sphere
        assert!(scene.occluded(&from, Point3::new(0.0, 0.0, 5.0)));
        // target in front of all geometry
        assert!(!scene.occluded(&from, Point3::new(0.0, 0.0, 0.5)));
    }

    #[test]
    fn test_shadow_ray_stops_short_of_light_surface() {
        let mut scene = Scene::new(test_camera());
        let rect = scene.add_shape(Rectangle::from_xy(-1.0, 1.0, -1.0, 1.0, 3.0, true));
        scene.add_area_light(rect, RGBColor::WHITE, None);
        scene.preprocess();

        let from = Intersection::new(Point3::ORIGIN, Vec3::Z, Vec3::Z);
        // sampling a point on the light itself must not count as occluded
        assert!(!scene.occluded(&from, Point3::new(0.0, 0.0, 3.0)));
    }

    #[test]
    fn test_emitted_only_from_light_primitives() {
        let mut scene = Scene::new(test_camera());
        let matte = scene.add_material(Matte::new(RGBColor::WHITE));
        let plain = scene.add_shape(Sphere::new(Point3::new(0.0, 0.0, 2.0), 0.5));
        scene.add_primitive(plain, Some(matte));
        let glowing = scene.add_shape(Sphere::new(Point3::new(0.0, 3.0, 2.0), 0.5));
        scene.add_area_light(glowing, RGBColor::new(2.0, 2.0, 2.0), None);
        scene.preprocess();

        let mut toward_plain = Ray::new(Point3::ORIGIN, Vec3::Z);
        let isect = scene.intersect(&mut toward_plain).unwrap();
        assert!(scene.emitted(&isect).is_black());

        let mut toward_light = Ray::new(
            Point3::ORIGIN,
            (Point3::new(0.0, 3.0, 2.0) - Point3::ORIGIN).normalized(),
        );
        let isect = scene.intersect(&mut toward_light).unwrap();
        assert_eq!(scene.emitted(&isect), RGBColor::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_scattering_none_without_material() {
        let mut scene = Scene::new(test_camera());
        let shape = scene.add_shape(Sphere::new(Point3::new(0.0, 0.0, 2.0), 1.0));
        scene.add_primitive(shape, None);
        scene.preprocess();

        let mut ray = Ray::new(Point3::ORIGIN, Vec3::Z);
        let isect = scene.intersect(&mut ray).unwrap();
        let mut sampler = RandomSampler::new(1, 5);
        assert!(scene.scattering(&isect, &mut sampler).is_none());
    }

    #[test]
    fn test_mesh_primitive_intersection() {
        let mut scene = Scene::new(test_camera());
        let matte = scene.add_material(Matte::new(RGBColor::WHITE));
        let triangles = vec![
            Triangle::new(
                Point3::new(-1.0, -1.0, 4.0),
                Point3::new(1.0, -1.0, 4.0),
                Point3::new(0.0, 1.0, 4.0),
                false,
            ),
            Triangle::new(
                Point3::new(-1.0, -1.0, 6.0),
                Point3::new(1.0, -1.0, 6.0),
                Point3::new(0.0, 1.0, 6.0),
                false,
            ),
        ];
        scene.add_mesh(triangles, Some(matte));
        scene.preprocess();

        let mut ray = Ray::new(Point3::ORIGIN, Vec3::Z);
        let isect = scene.intersect(&mut ray).unwrap();
        assert!((ray.tmax - 4.0).abs() < 1e-4);
        assert_eq!(isect.primitive, 0);
    }
}
