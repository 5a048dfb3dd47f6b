//! Circle overlap detection
//!
//! Every entity collides as a circle. Touching circles (distance exactly
//! equal to the radius sum) do not collide.

use glam::Vec2;

/// A circle in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// True iff the circles strictly overlap
#[inline]
pub fn overlaps(a: Circle, b: Circle) -> bool {
    a.center.distance(b.center) < a.radius + b.radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_circles() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 10.0);
        let b = Circle::new(Vec2::new(15.0, 0.0), 10.0);
        assert!(overlaps(a, b));
    }

    #[test]
    fn test_separated_circles() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 10.0);
        let b = Circle::new(Vec2::new(0.0, 50.0), 10.0);
        assert!(!overlaps(a, b));
    }

    #[test]
    fn test_tangent_circles_do_not_collide() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 10.0);
        let b = Circle::new(Vec2::new(30.0, 0.0), 20.0);
        assert!(!overlaps(a, b));
        assert!(!overlaps(b, a));

        // 3-4-5 triangle keeps the distance exact
        let a = Circle::new(Vec2::new(100.0, 100.0), 2.0);
        let b = Circle::new(Vec2::new(103.0, 104.0), 3.0);
        assert!(!overlaps(a, b));
    }

    #[test]
    fn test_concentric_circles_collide() {
        let a = Circle::new(Vec2::new(5.0, 5.0), 1.0);
        let b = Circle::new(Vec2::new(5.0, 5.0), 40.0);
        assert!(overlaps(a, b));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -2000.0f32..2000.0, ay in -2000.0f32..2000.0, ar in 0.1f32..200.0,
            bx in -2000.0f32..2000.0, by in -2000.0f32..2000.0, br in 0.1f32..200.0,
        ) {
            let a = Circle::new(Vec2::new(ax, ay), ar);
            let b = Circle::new(Vec2::new(bx, by), br);
            prop_assert_eq!(overlaps(a, b), overlaps(b, a));
        }

        #[test]
        fn axis_aligned_tangency_never_collides(
            x in -1000i32..1000, y in -1000i32..1000,
            ar in 1i32..100, br in 1i32..100,
        ) {
            let a = Circle::new(Vec2::new(x as f32, y as f32), ar as f32);
            let b = Circle::new(Vec2::new((x + ar + br) as f32, y as f32), br as f32);
            prop_assert!(!overlaps(a, b));
        }
    }
}
