//! Axis-aligned overlap regions.

use bevy::math::Vec2;

/// A collidable region: center plus half-extents.
///
/// Recomputed every frame, compared only by overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    pub center: Vec2,
    pub half: Vec2,
}

impl Capsule {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            half: Vec2::new(w, h),
        }
    }

    pub fn at(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    /// A region spanning `near..far` horizontally from `origin`, sharing
    /// `half_h` vertically. `near` and `far` are signed offsets, so a negative
    /// pair reaches backwards.
    pub fn ahead(origin: Vec2, near: f32, far: f32, half_h: f32) -> Self {
        let w = (far - near) / 2.0;
        Self::new(origin.x + near + w, origin.y, w.abs(), half_h)
    }

    /// Strict overlap on both axes. Touching edges do not count.
    pub fn overlaps(&self, other: &Capsule) -> bool {
        (self.center.x - other.center.x).abs() < self.half.x + other.half.x
            && (self.center.y - other.center.y).abs() < self.half.y + other.half.y
    }
}

/// Overlap test where either side may be absent. Absent never intersects.
pub fn intersect(a: Option<Capsule>, b: Option<Capsule>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.overlaps(&b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Capsule::new(0.0, 0.0, 2.0, 2.0), Capsule::new(3.0, 0.0, 2.0, 2.0), true)]
    #[case(Capsule::new(0.0, 0.0, 2.0, 2.0), Capsule::new(4.0, 0.0, 2.0, 2.0), false)]
    #[case(Capsule::new(0.0, 0.0, 2.0, 2.0), Capsule::new(0.0, -3.9, 1.0, 2.0), true)]
    #[case(Capsule::new(10.0, 0.0, 4.0, 16.0), Capsule::new(1.0, 0.0, 9.0, 12.0), true)]
    #[case(Capsule::new(0.0, 0.0, 1.0, 1.0), Capsule::new(5.0, 5.0, 1.0, 1.0), false)]
    fn overlap_is_symmetric(#[case] a: Capsule, #[case] b: Capsule, #[case] expected: bool) {
        assert_eq!(intersect(Some(a), Some(b)), expected);
        assert_eq!(intersect(Some(b), Some(a)), expected);
    }

    #[test]
    fn absent_never_intersects() {
        let a = Capsule::new(0.0, 0.0, 100.0, 100.0);
        assert!(!intersect(Some(a), None));
        assert!(!intersect(None, Some(a)));
        assert!(!intersect(None, None));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Capsule::new(0.0, 0.0, 2.0, 2.0);
        let b = Capsule::new(4.0, 0.0, 2.0, 2.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn ahead_reaches_in_the_signed_direction() {
        let forward = Capsule::ahead(Vec2::new(10.0, 5.0), 0.0, 40.0, 10.0);
        assert_eq!(forward, Capsule::new(30.0, 5.0, 20.0, 10.0));

        let backward = Capsule::ahead(Vec2::new(10.0, 5.0), 0.0, -12.0, 10.0);
        assert_eq!(backward, Capsule::new(4.0, 5.0, 6.0, 10.0));
    }
}
