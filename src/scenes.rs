use crate::camera::Camera;
use crate::geometry::{Rectangle, Sphere};
use crate::lights::{DirectionalLight, EnvironmentLight, PointLight};
use crate::materials::{Glass, Matte, Metal, Mirror, Plastic};
use crate::prelude::*;
use crate::scene::Scene;

/// Standard cornell box with a ceiling panel light and a mirror and a
/// glass sphere.
pub fn cornell_box(resolution: (f32, f32)) -> Scene {
    let camera = Camera::look_at(
        Point3::new(278.0, 278.0, -800.0),
        Point3::new(278.0, 278.0, 0.0),
        Vec3::Y,
        40.0,
        resolution,
    );
    let mut scene = Scene::new(camera);

    let white = scene.add_material(Matte::new(RGBColor::new(0.73, 0.73, 0.73)));
    let red = scene.add_material(Matte::new(RGBColor::new(0.65, 0.05, 0.05)));
    let green = scene.add_material(Matte::new(RGBColor::new(0.12, 0.45, 0.15)));

    let floor = scene.add_shape(Rectangle::from_xz(0.0, 555.0, 0.0, 555.0, 0.0, true));
    scene.add_primitive(floor, Some(white));

    let ceiling = scene.add_shape(Rectangle::from_xz(0.0, 555.0, 0.0, 555.0, 555.0, false));
    scene.add_primitive(ceiling, Some(white));

    let back = scene.add_shape(Rectangle::from_xy(0.0, 555.0, 0.0, 555.0, 555.0, true));
    scene.add_primitive(back, Some(white));

    let left = scene.add_shape(Rectangle::from_yz(0.0, 555.0, 0.0, 555.0, 0.0, false));
    scene.add_primitive(left, Some(red));

    let right = scene.add_shape(Rectangle::from_yz(0.0, 555.0, 0.0, 555.0, 555.0, true));
    scene.add_primitive(right, Some(green));

    let mirror = scene.add_material(Mirror::new(RGBColor::new(0.9, 0.9, 0.9)));
    let mirror_ball = scene.add_shape(Sphere::new(Point3::new(185.0, 100.0, 350.0), 100.0));
    scene.add_primitive(mirror_ball, Some(mirror));

    let glass = scene.add_material(Glass::new(1.5, RGBColor::WHITE, RGBColor::WHITE));
    let glass_ball = scene.add_shape(Sphere::new(Point3::new(380.0, 100.0, 170.0), 100.0));
    scene.add_primitive(glass_ball, Some(glass));

    let panel = scene.add_shape(Rectangle::from_xz(213.0, 343.0, 227.0, 332.0, 554.0, false));
    scene.add_area_light(panel, RGBColor::new(15.0, 15.0, 15.0), None);

    scene.preprocess();
    scene
}

/// Unit-albedo matte sphere inside a constant unit-radiance environment.
pub fn white_furnace(resolution: (f32, f32)) -> Scene {
    let camera = Camera::look_at(
        Point3::new(0.0, 0.0, -3.0),
        Point3::ORIGIN,
        Vec3::Y,
        20.0,
        resolution,
    );
    let mut scene = Scene::new(camera);

    let matte = scene.add_material(Matte::new(RGBColor::WHITE));
    let sphere = scene.add_shape(Sphere::new(Point3::ORIGIN, 1.0));
    scene.add_primitive(sphere, Some(matte));

    scene.add_light(EnvironmentLight::new(RGBColor::WHITE));

    scene.preprocess();
    scene
}

/// A row of spheres covering every material, lit by a point light, a sun
/// and a dim sky.
pub fn material_spheres(resolution: (f32, f32)) -> Scene {
    let camera = Camera::look_at(
        Point3::new(0.0, 2.5, -9.0),
        Point3::new(0.0, 1.0, 0.0),
        Vec3::Y,
        45.0,
        resolution,
    );
    let mut scene = Scene::new(camera);

    let ground = scene.add_material(Matte::new(RGBColor::new(0.6, 0.6, 0.6)));
    let floor = scene.add_shape(Rectangle::from_xz(-20.0, 20.0, -20.0, 20.0, 0.0, true));
    scene.add_primitive(floor, Some(ground));

    let materials = [
        scene.add_material(Matte::new(RGBColor::new(0.8, 0.25, 0.2))),
        scene.add_material(Mirror::new(RGBColor::new(0.9, 0.9, 0.9))),
        scene.add_material(Glass::new(1.5, RGBColor::WHITE, RGBColor::WHITE)),
        scene.add_material(Plastic::new(
            RGBColor::new(0.2, 0.3, 0.8),
            RGBColor::new(0.6, 0.6, 0.6),
            0.15,
            true,
        )),
        scene.add_material(Metal::new(
            RGBColor::new(0.2, 0.92, 1.1),
            RGBColor::new(3.9, 2.45, 2.14),
            0.05,
            0.15,
            true,
        )),
    ];

    for (index, &material) in materials.iter().enumerate() {
        let x = -5.0 + 2.5 * index as f32;
        let ball = scene.add_shape(Sphere::new(Point3::new(x, 1.0, 0.0), 1.0));
        scene.add_primitive(ball, Some(material));
    }

    scene.add_light(PointLight::new(
        Point3::new(0.0, 8.0, -4.0),
        RGBColor::new(60.0, 60.0, 60.0),
    ));
    scene.add_light(DirectionalLight::new(
        Vec3::new(-0.4, -1.0, 0.3),
        RGBColor::new(1.5, 1.4, 1.2),
    ));
    scene.add_light(EnvironmentLight::new(RGBColor::new(0.08, 0.09, 0.12)));

    scene.preprocess();
    scene
}
