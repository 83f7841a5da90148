//! Monitor enumeration.
//!
//! Bevy exposes each connected monitor as a `Monitor` entity (the one the
//! OS considers primary also carries `PrimaryMonitor`). This module turns
//! them into [`DisplayRegion`]s in virtual-desktop pixels and keeps the
//! [`DisplayLayout`] resource current. Everything downstream (surfaces,
//! the simulation) reacts to `DisplayLayout` changing.

use bevy::prelude::*;
use bevy::window::{Monitor, PrimaryMonitor, PrimaryWindow};
use cube_physics::{Bounds, DisplayRegion};

/// What a layout entry is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceSource {
    /// A physical monitor; a fullscreen window is spawned for it.
    Monitor(Entity),
    /// An existing window that acts as the only display (preview mode).
    Window(Entity),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEntry {
    pub source: SurfaceSource,
    pub region: DisplayRegion,
}

/// Current set of display regions, sorted left to right then top to bottom.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct DisplayLayout {
    pub entries: Vec<LayoutEntry>,
}

impl DisplayLayout {
    pub fn regions(&self) -> Vec<DisplayRegion> {
        self.entries.iter().map(|entry| entry.region).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Build a layout from `(entity, bounds, primary)` triples.
    pub fn from_monitors(monitors: impl IntoIterator<Item = (Entity, Bounds, bool)>) -> Self {
        let mut entries: Vec<LayoutEntry> = monitors
            .into_iter()
            .map(|(entity, bounds, primary)| LayoutEntry {
                source: SurfaceSource::Monitor(entity),
                region: DisplayRegion::new(bounds, primary),
            })
            .collect();

        // Query order is not stable; sort so an unchanged desktop compares equal.
        entries.sort_by(|a, b| {
            let (a, b) = (a.region.bounds, b.region.bounds);
            a.left
                .total_cmp(&b.left)
                .then_with(|| a.top.total_cmp(&b.top))
        });

        Self { entries }
    }

    /// A single window of the given size is the whole desktop.
    pub fn single_window(window: Entity, width: f32, height: f32) -> Self {
        Self {
            entries: vec![LayoutEntry {
                source: SurfaceSource::Window(window),
                region: DisplayRegion::new(Bounds::new(0.0, 0.0, width, height), true),
            }],
        }
    }
}

/// A monitor's rectangle in physical virtual-desktop pixels.
pub fn monitor_bounds(monitor: &Monitor) -> Bounds {
    Bounds::from_origin_size(
        monitor.physical_position.as_vec2(),
        Vec2::new(
            monitor.physical_width as f32,
            monitor.physical_height as f32,
        ),
    )
}

/// Rebuild the layout from the current monitor entities.
///
/// Only writes the resource when the layout actually differs, so change
/// detection fires exactly on hot-plug or resolution changes.
pub fn sync_monitor_layout(
    monitors: Query<(Entity, &Monitor, Has<PrimaryMonitor>)>,
    mut layout: ResMut<DisplayLayout>,
) {
    let current = DisplayLayout::from_monitors(
        monitors
            .iter()
            .map(|(entity, monitor, primary)| (entity, monitor_bounds(monitor), primary)),
    );

    if layout.set_if_neq(current) {
        info!("Display layout changed: {} monitor(s)", layout.len());
        for entry in &layout.entries {
            let b = entry.region.bounds;
            info!(
                "  {}x{} at ({}, {}){}",
                b.width(),
                b.height(),
                b.left,
                b.top,
                if entry.region.primary { " [primary]" } else { "" }
            );
        }
    }
}

/// Use the primary window as the only display region.
pub fn sync_preview_layout(
    windows: Query<(Entity, &Window), With<PrimaryWindow>>,
    mut layout: ResMut<DisplayLayout>,
) {
    let Ok((entity, window)) = windows.single() else {
        return;
    };

    let current = DisplayLayout::single_window(
        entity,
        window.resolution.physical_width() as f32,
        window.resolution.physical_height() as f32,
    );

    if layout.set_if_neq(current) {
        debug!(
            "Preview layout: {}x{}",
            window.resolution.physical_width(),
            window.resolution.physical_height()
        );
    }
}
