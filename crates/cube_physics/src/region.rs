//! Display regions and physics bounds.
//!
//! Every monitor is a rectangle in one shared virtual-desktop pixel space
//! (x grows right, y grows down). The cube bounces inside either the
//! primary monitor or the union of all monitors.

use bevy::math::Vec2;

/// Axis-aligned rectangle in virtual-desktop pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle from a top-left corner and a size.
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, origin.x + size.x, origin.y + size.y)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// Width over height; 1.0 for a degenerate rectangle.
    pub fn aspect(&self) -> f32 {
        if self.height() <= 0.0 {
            1.0
        } else {
            self.width() / self.height()
        }
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Whether a square of half extent `half_size` centred at `center`
    /// touches this rectangle (edges inclusive).
    pub fn overlaps_square(&self, center: Vec2, half_size: f32) -> bool {
        center.x + half_size >= self.left
            && center.x - half_size <= self.right
            && center.y + half_size >= self.top
            && center.y - half_size <= self.bottom
    }
}

/// One physical display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRegion {
    pub bounds: Bounds,
    /// Reported as the primary display by the platform.
    pub primary: bool,
}

impl DisplayRegion {
    pub fn new(bounds: Bounds, primary: bool) -> Self {
        Self { bounds, primary }
    }
}

/// Which rectangle the cube bounces in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhysicsMode {
    /// Union of every display; the cube travels across monitors.
    #[default]
    Extended,
    /// Primary display only; every monitor shows the same view.
    Mirrored,
}

impl PhysicsMode {
    pub fn from_mirror_flag(mirror: bool) -> Self {
        if mirror {
            PhysicsMode::Mirrored
        } else {
            PhysicsMode::Extended
        }
    }
}

/// The primary region, or the first region when none is flagged.
pub fn primary_region(regions: &[DisplayRegion]) -> Option<&DisplayRegion> {
    regions
        .iter()
        .find(|region| region.primary)
        .or_else(|| regions.first())
}

/// Bounding rectangle of all regions.
pub fn union_bounds(regions: &[DisplayRegion]) -> Option<Bounds> {
    let mut iter = regions.iter();
    let first = iter.next()?.bounds;
    Some(iter.fold(first, |acc, region| acc.union(&region.bounds)))
}

/// Rectangle handed to the integrator for the given mode.
pub fn physics_bounds(regions: &[DisplayRegion], mode: PhysicsMode) -> Option<Bounds> {
    match mode {
        PhysicsMode::Mirrored => primary_region(regions).map(|region| region.bounds),
        PhysicsMode::Extended => union_bounds(regions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dual_layout() -> Vec<DisplayRegion> {
        vec![
            DisplayRegion::new(Bounds::new(1920.0, -200.0, 3200.0, 824.0), false),
            DisplayRegion::new(Bounds::new(0.0, 0.0, 1920.0, 1080.0), true),
        ]
    }

    #[test]
    fn test_primary_prefers_flagged_region() {
        let regions = dual_layout();
        let primary = primary_region(&regions).unwrap();
        assert_eq!(primary.bounds.left, 0.0);
        assert!(primary.primary);
    }

    #[test]
    fn test_primary_falls_back_to_first() {
        let mut regions = dual_layout();
        regions[1].primary = false;
        let primary = primary_region(&regions).unwrap();
        assert_eq!(primary.bounds.left, 1920.0);
        assert!(primary_region(&[]).is_none());
    }

    #[test]
    fn test_extended_bounds_is_union() {
        let bounds = physics_bounds(&dual_layout(), PhysicsMode::Extended).unwrap();
        assert_eq!(bounds, Bounds::new(0.0, -200.0, 3200.0, 1080.0));
    }

    #[test]
    fn test_union_does_not_include_origin() {
        // A layout entirely at positive coordinates must not be stretched to (0, 0).
        let regions = [DisplayRegion::new(Bounds::new(100.0, 50.0, 900.0, 650.0), true)];
        let bounds = union_bounds(&regions).unwrap();
        assert_eq!(bounds.left, 100.0);
        assert_eq!(bounds.top, 50.0);
    }

    #[test]
    fn test_mirrored_bounds_is_primary() {
        let bounds = physics_bounds(&dual_layout(), PhysicsMode::Mirrored).unwrap();
        assert_eq!(bounds, Bounds::new(0.0, 0.0, 1920.0, 1080.0));
        assert!(physics_bounds(&[], PhysicsMode::Mirrored).is_none());
        assert!(physics_bounds(&[], PhysicsMode::Extended).is_none());
    }

    #[test]
    fn test_overlaps_square_edges() {
        let b = Bounds::new(0.0, 0.0, 100.0, 100.0);
        assert!(b.overlaps_square(Vec2::new(50.0, 50.0), 10.0));
        assert!(b.overlaps_square(Vec2::new(110.0, 50.0), 10.0));
        assert!(!b.overlaps_square(Vec2::new(111.0, 50.0), 10.0));
        assert!(!b.overlaps_square(Vec2::new(50.0, -20.0), 10.0));
    }

    #[test]
    fn test_center_and_aspect() {
        let b = Bounds::from_origin_size(Vec2::new(-1920.0, 0.0), Vec2::new(1920.0, 1080.0));
        assert_eq!(b.center(), Vec2::new(-960.0, 540.0));
        assert!((b.aspect() - 16.0 / 9.0).abs() < 1e-6);
        assert_eq!(Bounds::new(0.0, 0.0, 10.0, 0.0).aspect(), 1.0);
    }
}
