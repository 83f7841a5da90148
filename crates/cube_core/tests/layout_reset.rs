//! Monitor hot-plug drives the layout and respawns the cube.

use bevy::prelude::*;
use bevy::window::{Monitor, PrimaryMonitor};
use cube_core::displays::{sync_monitor_layout, DisplayLayout};
use cube_core::settings::CubeSettings;
use cube_core::surface::{reset_simulation, SimulationConfig};
use cube_physics::{PhysicsMode, Simulation, StepParams};

fn monitor(x: i32, width: u32, height: u32) -> Monitor {
    Monitor {
        name: None,
        physical_height: height,
        physical_width: width,
        physical_position: IVec2::new(x, 0),
        refresh_rate_millihertz: Some(60_000),
        scale_factor: 1.0,
        video_modes: Vec::new(),
    }
}

fn app(mode: PhysicsMode) -> App {
    let mut app = App::new();
    app.init_resource::<DisplayLayout>()
        .insert_resource(SimulationConfig {
            mode,
            params: StepParams {
                half_size: 50.0,
                celebration_enabled: false,
            },
            seed: Some(42),
            cube_scale: 0.1,
        })
        .add_systems(
            Update,
            (
                sync_monitor_layout,
                reset_simulation.run_if(resource_changed::<DisplayLayout>),
            )
                .chain(),
        );
    app
}

#[test]
fn test_no_monitors_means_no_cube() {
    let mut app = app(PhysicsMode::Extended);
    app.update();

    let simulation = app.world().resource::<Simulation>();
    assert!(simulation.cube().is_none());
}

#[test]
fn test_cube_spawns_on_primary_monitor() {
    let mut app = app(PhysicsMode::Extended);
    app.world_mut().spawn(monitor(0, 1920, 1080));
    app.world_mut().spawn((monitor(1920, 2560, 1440), PrimaryMonitor));
    app.update();

    let simulation = app.world().resource::<Simulation>();
    let cube = simulation.cube().expect("cube spawned");
    assert_eq!(cube.position, Vec2::new(1920.0 + 1280.0, 720.0));
    assert_eq!(simulation.physics_bounds().unwrap().right, 4480.0);
}

#[test]
fn test_hot_plug_respawns_cube() {
    let mut app = app(PhysicsMode::Mirrored);
    let primary = app
        .world_mut()
        .spawn((monitor(0, 1920, 1080), PrimaryMonitor))
        .id();
    app.update();

    // Let the cube wander away from the centre.
    for _ in 0..50 {
        app.world_mut().resource_mut::<Simulation>().tick();
    }
    assert_ne!(
        app.world().resource::<Simulation>().cube().unwrap().position,
        Vec2::new(960.0, 540.0)
    );

    app.world_mut().spawn(monitor(-1280, 1280, 1024));
    app.update();

    let simulation = app.world().resource::<Simulation>();
    assert_eq!(simulation.regions().len(), 2);
    assert_eq!(
        simulation.cube().unwrap().position,
        Vec2::new(960.0, 540.0),
        "cube resets to the primary centre"
    );

    app.world_mut().despawn(primary);
    app.update();
    let simulation = app.world().resource::<Simulation>();
    assert_eq!(simulation.regions().len(), 1);
    assert_eq!(
        simulation.cube().unwrap().position,
        Vec2::new(-640.0, 512.0),
        "falls back to the first monitor"
    );
}

#[test]
fn test_unchanged_layout_does_not_respawn() {
    let mut app = app(PhysicsMode::Extended);
    app.world_mut().spawn((monitor(0, 1920, 1080), PrimaryMonitor));
    app.update();

    for _ in 0..20 {
        app.world_mut().resource_mut::<Simulation>().tick();
    }
    let moved = app.world().resource::<Simulation>().cube().unwrap().position;

    app.update();
    assert_eq!(
        app.world().resource::<Simulation>().cube().unwrap().position,
        moved
    );
}

#[test]
fn test_large_cube_stays_inside_preview_window() {
    let mut settings = CubeSettings::default();
    settings.set_slider_position(100);

    let mut app = App::new();
    let window = app.world_mut().spawn_empty().id();
    app.insert_resource(DisplayLayout::single_window(window, 320.0, 240.0))
        .insert_resource(SimulationConfig {
            mode: settings.physics_mode(),
            params: settings.step_params(),
            seed: Some(3),
            cube_scale: settings.cube_scale,
        })
        .add_systems(Update, reset_simulation);
    app.update();

    let mut simulation = app.world_mut().resource_mut::<Simulation>();
    let h = simulation.params().half_size;
    assert!(
        h * 2.0 < 240.0,
        "half size {} does not fit a 320x240 window",
        h
    );

    let ticks = 2_000;
    let mut collisions = 0;
    for tick in 0..ticks {
        let report = simulation.tick().expect("cube exists");
        if report.collided() {
            collisions += 1;
        }
        let p = simulation.cube().unwrap().position;
        assert!(
            (h..=320.0 - h).contains(&p.x) && (h..=240.0 - h).contains(&p.y),
            "tick {}: {:?} escaped the window",
            tick,
            p
        );
    }
    assert!(
        collisions < ticks / 10,
        "{} collisions in {} ticks",
        collisions,
        ticks
    );
}
