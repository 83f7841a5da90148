//! Per-display render surfaces.
//!
//! Each [`LayoutEntry`] gets a window (spawned for monitors, reused in
//! preview), a camera targeting that window, a light and its own copy of
//! the cube. Every surface lives on a private render layer so a camera only
//! ever sees its own cube. All copies read the same [`Simulation`]; the
//! only per-surface difference is which rectangle the position is
//! projected against.
//!
//! Projection of a desktop position into a region of aspect `a`:
//!
//! ```text
//! x' = ((x - left) / width)  * 4a - 2a
//! y' = -(((y - top) / height) * 4 - 2)
//! z' = -5
//! ```
//!
//! With a 45° vertical field of view, the view is about 4.1 units tall at
//! `z = -5`, so the region spans most of the screen.

use bevy::camera::visibility::RenderLayers;
use bevy::camera::RenderTarget;
use bevy::prelude::*;
use bevy::window::{
    CursorOptions, MonitorSelection, WindowLevel, WindowMode, WindowPosition, WindowRef,
};
use cube_physics::{Bounds, PhysicsMode, Simulation, StdRandom, StepParams};

use crate::displays::{DisplayLayout, SurfaceSource};
use crate::exit::TrackedWindows;
use crate::run_mode::RunMode;

/// Depth the cube is drawn at.
pub const VIEW_DEPTH: f32 = -5.0;
/// View units spanned by a region's height after projection.
pub const VIEW_SPAN: f32 = 4.0;
pub const FIELD_OF_VIEW_DEGREES: f32 = 45.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;
/// Extra size at the peak of a celebration pulse.
pub const PULSE_SCALE_GAIN: f32 = 0.2;

/// Everything needed to (re)build the simulation when the layout changes.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub mode: PhysicsMode,
    pub params: StepParams,
    /// Fixed seed for reproducible runs.
    pub seed: Option<u64>,
    /// Edge half-length of the drawn cube in view units.
    pub cube_scale: f32,
}

/// Shared mesh and material for every cube copy.
#[derive(Resource)]
pub struct CubeAppearance {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
    last_rgb: Option<[f32; 3]>,
}

/// Entities owned by the current surface set.
#[derive(Component)]
pub struct SurfaceEntity;

/// A window spawned for a monitor (as opposed to the preview window).
#[derive(Component)]
pub struct SurfaceWindow;

/// One copy of the cube, drawn relative to `region`.
#[derive(Component, Debug, Clone, Copy)]
pub struct SurfaceCube {
    pub region: Bounds,
}

/// Map a desktop position into view space relative to `region`.
pub fn project_to_view(position: Vec2, region: &Bounds) -> Vec3 {
    let aspect = region.aspect();
    let rel_x = if region.width() > 0.0 {
        (position.x - region.left) / region.width()
    } else {
        0.5
    };
    let rel_y = if region.height() > 0.0 {
        (position.y - region.top) / region.height()
    } else {
        0.5
    };

    Vec3::new(
        rel_x * 4.0 * aspect - 2.0 * aspect,
        -(rel_y * 4.0 - 2.0),
        VIEW_DEPTH,
    )
}

/// The rectangle a surface projects against.
///
/// Mirrored surfaces all use the physics bounds so every display shows the
/// same picture; extended surfaces use their own monitor.
pub fn projection_region(mode: PhysicsMode, own: Bounds, physics: Option<Bounds>) -> Bounds {
    match mode {
        PhysicsMode::Extended => own,
        PhysicsMode::Mirrored => physics.unwrap_or(own),
    }
}

/// Whether a surface should draw the cube at all.
pub fn cube_visible(mode: PhysicsMode, own: &Bounds, position: Vec2, half_size: f32) -> bool {
    match mode {
        PhysicsMode::Extended => own.overlaps_square(position, half_size),
        PhysicsMode::Mirrored => true,
    }
}

/// Blend the cube colour halfway toward `pulse` grey.
pub fn tinted_color(rgb: [f32; 3], pulse: f32) -> [f32; 3] {
    rgb.map(|c| c * 0.5 + pulse * 0.5)
}

pub fn pulse_scale(pulse: f32) -> f32 {
    1.0 + PULSE_SCALE_GAIN * pulse
}

/// Render layer for the surface at `index`; layer 0 stays unused.
pub fn surface_layer(index: usize) -> usize {
    index + 1
}

pub fn setup_appearance(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(CubeAppearance {
        mesh: meshes.add(Cuboid::new(1.0, 1.0, 1.0)),
        material: materials.add(StandardMaterial {
            base_color: Color::WHITE,
            perceptual_roughness: 0.6,
            ..default()
        }),
        last_rgb: None,
    });
}

/// Tear down the previous surfaces and spawn one per layout entry.
#[allow(clippy::too_many_arguments)]
pub fn rebuild_surfaces(
    mut commands: Commands,
    layout: Res<DisplayLayout>,
    mode: Res<RunMode>,
    config: Res<SimulationConfig>,
    appearance: Res<CubeAppearance>,
    old: Query<Entity, Or<(With<SurfaceEntity>, With<SurfaceWindow>)>>,
    mut tracked: ResMut<TrackedWindows>,
) {
    for entity in &old {
        commands.entity(entity).despawn();
    }
    tracked.windows.clear();

    let physics = cube_physics::physics_bounds(&layout.regions(), config.mode);

    for (index, entry) in layout.entries.iter().enumerate() {
        let window = match entry.source {
            SurfaceSource::Monitor(monitor) => commands
                .spawn((
                    Window {
                        title: "Bouncing Cube".into(),
                        mode: WindowMode::BorderlessFullscreen(MonitorSelection::Entity(monitor)),
                        position: WindowPosition::Centered(MonitorSelection::Entity(monitor)),
                        decorations: false,
                        window_level: WindowLevel::AlwaysOnTop,
                        ..default()
                    },
                    CursorOptions {
                        visible: !mode.is_fullscreen(),
                        ..default()
                    },
                    SurfaceWindow,
                ))
                .id(),
            SurfaceSource::Window(window) => window,
        };
        tracked.windows.push(window);

        let layer = RenderLayers::layer(surface_layer(index));

        commands.spawn((
            Camera3d::default(),
            Camera {
                target: RenderTarget::Window(WindowRef::Entity(window)),
                clear_color: ClearColorConfig::Custom(Color::BLACK),
                ..default()
            },
            Projection::Perspective(PerspectiveProjection {
                fov: FIELD_OF_VIEW_DEGREES.to_radians(),
                near: NEAR_PLANE,
                far: FAR_PLANE,
                ..default()
            }),
            AmbientLight {
                color: Color::WHITE,
                brightness: 250.0,
                ..default()
            },
            Transform::IDENTITY,
            layer.clone(),
            SurfaceEntity,
        ));

        // Shines down -Z, straight into the screen.
        commands.spawn((
            DirectionalLight {
                illuminance: 4000.0,
                shadows_enabled: false,
                ..default()
            },
            Transform::IDENTITY,
            layer.clone(),
            SurfaceEntity,
        ));

        let region = projection_region(config.mode, entry.region.bounds, physics);
        commands.spawn((
            Mesh3d(appearance.mesh.clone()),
            MeshMaterial3d(appearance.material.clone()),
            Transform::from_translation(project_to_view(region.center(), &region)),
            Visibility::Hidden,
            SurfaceCube { region },
            layer,
            SurfaceEntity,
        ));
    }

    info!(
        "Spawned {} surface(s) in {:?} mode",
        layout.len(),
        config.mode
    );
}

/// Collision parameters for `layout`.
///
/// Monitors use the configured pixel half-size. A window standing in for
/// the whole desktop (preview) sizes the cube to match what is drawn in
/// it, since the monitor half-size can exceed a small window.
pub fn step_params_for_layout(config: &SimulationConfig, layout: &DisplayLayout) -> StepParams {
    match layout.entries.as_slice() {
        [entry] if matches!(entry.source, SurfaceSource::Window(_)) => StepParams {
            half_size: drawn_half_size(config.cube_scale, &entry.region.bounds),
            ..config.params
        },
        _ => config.params,
    }
}

/// Half the drawn cube's edge in pixels of `region`.
///
/// The region is `VIEW_SPAN` view units tall and the cube's half edge is
/// `cube_scale` view units.
pub fn drawn_half_size(cube_scale: f32, region: &Bounds) -> f32 {
    cube_scale * region.height() / VIEW_SPAN
}

/// Respawn the cube for the new layout, creating the simulation on first use.
pub fn reset_simulation(
    mut commands: Commands,
    layout: Res<DisplayLayout>,
    config: Res<SimulationConfig>,
    simulation: Option<ResMut<Simulation>>,
) {
    let params = step_params_for_layout(&config, &layout);
    match simulation {
        Some(mut simulation) => {
            simulation.set_params(params);
            simulation.set_regions(layout.regions());
        }
        None => commands.insert_resource(Simulation::new(
            layout.regions(),
            config.mode,
            params,
            Box::new(StdRandom::from_optional_seed(config.seed)),
        )),
    }
}

/// Place every cube copy from the current simulation state.
pub fn update_surfaces(
    simulation: Option<Res<Simulation>>,
    config: Res<SimulationConfig>,
    mut cubes: Query<(&SurfaceCube, &mut Transform, &mut Visibility)>,
) {
    let cube = simulation.as_ref().and_then(|s| s.cube());
    let half_size = simulation
        .as_ref()
        .map_or(config.params.half_size, |s| s.params().half_size);

    for (surface, mut transform, mut visibility) in &mut cubes {
        let Some(cube) = cube else {
            *visibility = Visibility::Hidden;
            continue;
        };

        let shown = cube_visible(
            config.mode,
            &surface.region,
            cube.position,
            half_size,
        );
        *visibility = if shown {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        if !shown {
            continue;
        }

        transform.translation = project_to_view(cube.position, &surface.region);
        transform.rotation = cube.rotation.to_quat();
        transform.scale =
            Vec3::splat(2.0 * config.cube_scale * pulse_scale(cube.celebration_pulse()));
    }
}

/// Apply the cube colour, blended toward the pulse while celebrating.
pub fn update_cube_material(
    simulation: Option<Res<Simulation>>,
    mut appearance: ResMut<CubeAppearance>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(cube) = simulation.as_ref().and_then(|s| s.cube()) else {
        return;
    };

    let base = cube.color.to_unit_rgb();
    let rgb = if cube.celebrating_corner {
        tinted_color(base, cube.celebration_pulse())
    } else {
        base
    };

    if appearance.last_rgb == Some(rgb) {
        return;
    }
    if let Some(material) = materials.get_mut(&appearance.material) {
        material.base_color = Color::srgb(rgb[0], rgb[1], rgb[2]);
        appearance.last_rgb = Some(rgb);
    }
}
