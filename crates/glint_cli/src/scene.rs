//! The lamp room demo scene.
//!
//! A closed room with a mirror on the right wall, a glowing ceiling dome,
//! two small wall lamps, a box, a metal ball and a desk lamp. The ball,
//! box, wall lamps and desk lamp are placed with a seeded generator.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glint_renderer::{
    Camera, Color, Cuboid, Material, Plane, PointLight, Scene, SceneError, Shade, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Point the camera orbits around.
const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 1.5, 0.0);

/// Camera looking into the room through the open end wall.
pub fn room_camera(width: u32, height: u32) -> Camera {
    Camera::new(width as f32 / height as f32)
        .with_lens(FRAC_PI_4, 1.0, 1000.0)
        .with_orbit(1.5 + 1.5 * 2.0_f32.sqrt(), 0.0, FRAC_PI_2, CAMERA_TARGET)
}

fn rgb8(r: f32, g: f32, b: f32) -> Color {
    Color::new(r, g, b) / 255.0
}

fn add_materials(scene: &mut Scene, path_tracing: bool) {
    scene.add_material("ceiling", Material::diffuse(rgb8(280.0, 10.0, 10.0)));
    scene.add_material("floor", Material::diffuse(rgb8(0.0, 255.0, 127.0)));
    scene.add_material("front", Material::diffuse(Color::new(0.3, 0.8, 0.8)));
    scene.add_material("end", Material::diffuse(Color::new(0.8, 0.8, 0.3)));
    scene.add_material("side", Material::diffuse(Color::new(0.0, 0.1, 1.0)));

    // Integrator-specific variants
    if path_tracing {
        scene.add_material(
            "mirror",
            Material::mirror(rgb8(37.2, 24.4, 13.2), Color::splat(0.6)),
        );
        scene.add_material("yellow_light", Material::emitter(Color::new(1.0, 1.0, 0.5)));
        scene.add_material("lamp_outer", Material::diffuse(Color::new(0.8, 0.8, 0.0)));
    } else {
        scene.add_material(
            "mirror",
            Material::glossy(Color::ZERO, Color::splat(1.6), 30.0),
        );
        scene.add_material("yellow_light", Material::emitter(Color::new(10.0, 10.0, 5.0)));
        scene.add_material("lamp_outer", Material::diffuse(Color::new(1.8, 1.8, 0.0)));
    }

    scene.add_material("light", Material::emitter(Color::splat(20.0)));
    scene.add_material("small_light", Material::emitter(Color::splat(3.0)));
    scene.add_material(
        "metal",
        Material::glossy(Color::ZERO, Color::splat(0.8), 30.0),
    );
    scene.add_material("lamp_inner", Material::diffuse(Color::new(0.1, 0.1, 0.0)));
    scene.add_material("stick", Material::diffuse(Color::new(1.8, 1.8, 0.1)));
    scene.add_material(
        "cube",
        Material::glossy(Color::new(0.0, 0.0, 0.5), Color::splat(0.01), 0.0),
    );
}

/// Build the lamp room.
///
/// `path_tracing` selects the material variants tuned for each integrator.
/// `seed` drives the randomized placement.
pub fn lamp_room(path_tracing: bool, seed: u64) -> Result<Scene, SceneError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = Scene::new().with_ambient(Color::splat(0.05));
    add_materials(&mut scene, path_tracing);

    // Walls
    scene.add_named(Plane::new(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Y), "ceiling")?;
    scene.add_named(Plane::new(Vec3::ZERO, Vec3::Y), "floor")?;
    scene.add_named(Plane::new(Vec3::new(0.0, 0.0, -4.0), Vec3::Z), "front")?;
    scene.add_named(Plane::new(Vec3::ZERO, Vec3::NEG_Z), "end")?;
    scene.add_named(Plane::new(Vec3::new(-2.0, 0.0, 0.0), Vec3::X), "side")?;
    scene.add_named(Plane::new(Vec3::new(2.0, 0.0, 0.0), Vec3::NEG_X), "mirror")?;

    // Ceiling dome: a large sphere cut by the ceiling in a disc of radius 2/3
    let dome_radius = 10.0_f32;
    let dome_disc = 2.0_f32 / 3.0;
    let dome_offset = (dome_radius * dome_radius - dome_disc * dome_disc).sqrt();
    scene.add_named(
        Sphere::new(Vec3::new(0.0, 3.0 + dome_offset, -2.0), dome_radius),
        "light",
    )?;
    scene.add_light(PointLight::new(Vec3::new(0.0, 3.0, -2.0), Color::splat(2.0)));

    // Wall lamps on the front wall, mirrored across x = 0
    let lamp_radius = 0.1_f32;
    let lamp_disc = 0.02_f32;
    let lamp_offset = (lamp_radius * lamp_radius - lamp_disc * lamp_disc).sqrt();
    let right_lamp = Vec3::new(
        0.8 + 0.2 * rng.gen::<f32>(),
        1.6 + 0.2 * rng.gen::<f32>(),
        -4.0,
    );
    let left_lamp = Vec3::new(-right_lamp.x, right_lamp.y, right_lamp.z);
    for position in [right_lamp, left_lamp] {
        scene.add_named(
            Sphere::new(position - Vec3::new(0.0, 0.0, lamp_offset), lamp_radius),
            "small_light",
        )?;
        scene.add_light(PointLight::new(position, Color::splat(2.0)));
    }

    // Ball and box in one of three layouts
    let layout = rng.gen::<f32>();
    let ball_radius = 0.4 + 0.2 * rng.gen::<f32>();
    let (ball, cube) = if layout < 0.33 {
        (Vec3::new(0.0, ball_radius, -3.0), Vec3::new(-1.0, 0.8, -1.0))
    } else if layout < 0.67 {
        (Vec3::new(0.0, ball_radius, -1.2), Vec3::new(-0.2, 0.8, -3.0))
    } else {
        (Vec3::new(1.35, ball_radius, -2.5), Vec3::new(-1.0, 0.8, -2.0))
    };
    scene.add_named(Cuboid::new(cube, Vec3::new(0.6, 1.6, 0.8)), "cube")?;
    scene.add_named(Sphere::new(ball, ball_radius), "metal")?;

    // Desk lamp
    let apex = Vec3::new(
        1.35 + 0.05 * rng.gen::<f32>(),
        1.5,
        -1.2 - 0.1 * rng.gen::<f32>(),
    );
    let bulb = apex - Vec3::new(0.0, 0.25, 0.0);
    scene.add_named(Shade::outward(apex, 0.5), "lamp_outer")?;
    scene.add_named(Shade::inward(apex - Vec3::new(0.0, 0.01, 0.0), 0.5), "lamp_inner")?;
    scene.add_named(Sphere::new(bulb, 0.15), "yellow_light")?;
    scene.add_light(PointLight::new(bulb, Color::new(1.0, 1.0, 0.0) * 0.35));
    scene.add_named(
        Cuboid::new(Vec3::new(apex.x, 0.58, apex.z), Vec3::new(0.05, 1.06, 0.05)),
        "stick",
    )?;
    scene.add_named(
        Cuboid::new(Vec3::new(apex.x, 0.025, apex.z), Vec3::new(0.4, 0.05, 0.4)),
        "stick",
    )?;

    Ok(scene)
}
