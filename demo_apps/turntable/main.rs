//! Turntable demo
//!
//! Builds a small procedural scene (a base disc with a half cylinder, a cone
//! and a torus on top), spins the platter with a keyframed timeline and
//! prints the draw list for a few simulated frames.
//!
//! Run with `RUST_LOG=debug` to see the engine's own logging.

use std::f32::consts::{PI, TAU};

use glam::{Quat, Vec2, Vec3};
use tessera::animation::{Animator, KeyframeTrack, Ticker, Timeline};
use tessera::settings::EngineSettings;
use tessera::{Primitive, Scene};

const FRAME_TIME: f32 = 1.0 / 4.0;
const FRAMES: usize = 8;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = EngineSettings::from_json_str(
        r#"{
            "geometry": { "detail_level": 24 },
            "animation": { "rotation_interpolation": "spherical" }
        }"#,
    )?;
    let mut scene = Scene::with_settings(settings.scene);
    let root = scene.root();

    let metal = scene.add_color_material(180, 180, 190, 255);
    let paint = scene.add_color_material(200, 40, 30, 255);

    // === Platter ===
    let platter = scene.add_child(root, "Platter")?;
    let disc = Primitive::Disc { percent: 1.0 }.generate(&settings.geometry)?;
    scene.add_mesh(platter, disc, metal)?;
    scene.node_mut(platter)?.transform.scale = Vec3::new(4.0, 1.0, 4.0);

    // === Props ===
    let props: [(&str, Primitive, Vec3); 4] = [
        (
            "HalfCylinder",
            Primitive::Cylinder { percent: 0.5, top_diameter: 1.0 },
            Vec3::new(1.0, 0.5, 0.0),
        ),
        ("Cone", Primitive::Cone { percent: 1.0 }, Vec3::new(-1.0, 0.5, 0.0)),
        (
            "Ring",
            Primitive::Torus { percent: 0.75, tube_diameter: 1.0, rings: Some(12) },
            Vec3::new(0.0, 0.5, 1.0),
        ),
        (
            "Handle",
            Primitive::CurvedCylinder {
                control_points: vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.5), Vec2::new(0.0, 1.0)],
                percent: 1.0,
                diameter: 0.2,
            },
            Vec3::new(0.0, 0.0, -1.0),
        ),
    ];
    for (name, shape, position) in props {
        let node = scene.create_node(name)?;
        scene.node_mut(node)?.transform.position = position;
        scene.attach(platter, node)?;
        let mesh = shape.generate(&settings.geometry)?;
        log::info!(
            "{name}: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        scene.add_mesh(node, mesh, paint)?;
    }

    // The cone tips over around its own base rather than its centre.
    let cone = scene.node_by_name("Cone")?;
    scene.set_origin(cone, Vec3::new(-1.0, 0.0, 0.0))?;

    // === Animation ===
    let spin = KeyframeTrack::from_keys([
        (0.0, Quat::IDENTITY),
        (1.0, Quat::from_rotation_y(PI)),
        (2.0, Quat::from_rotation_y(TAU)),
    ])?;
    let timeline = Timeline::with_tracks(platter, KeyframeTrack::empty(), spin, KeyframeTrack::empty())
        .with_rotation_mode(settings.animation.rotation_interpolation);

    let mut animator = Animator::new();
    animator.register(Ticker::new(timeline, 1.0, 2.0)?);

    for frame in 0..FRAMES {
        animator.update(FRAME_TIME, &mut scene)?;
        let draws = scene.traverse()?;

        println!("frame {frame}: {} draws", draws.len());
        for draw in &draws {
            let name = scene.node(draw.node)?.name();
            let position = draw.transform.w_axis.truncate();
            println!(
                "  {name:<12} mesh {:>2} material {} at ({:>6.2}, {:>6.2}, {:>6.2})",
                draw.mesh_index, draw.material_index, position.x, position.y, position.z
            );
        }
    }

    animator.clear();
    Ok(())
}
