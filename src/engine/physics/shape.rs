use crate::common::math::rotate;
use glam::Vec2;

/// Axis-aligned bounding box in world space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Create a box from its two corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Closed-interval overlap test: boxes that only share an edge still overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Center of the box
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Half-size of the box along each axis
    pub fn extent(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }
}

/// Collision geometry attached to a rigid body
///
/// Dimensions are not validated; callers are expected to pass positive sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    Rectangle { half_extent: Vec2 },
}

impl Shape {
    /// Create a circle shape
    pub fn circle(radius: f32) -> Self {
        Shape::Circle { radius }
    }

    /// Create a rectangle shape from its full width and height
    pub fn rectangle(size: Vec2) -> Self {
        Shape::Rectangle {
            half_extent: size * 0.5,
        }
    }

    /// Moment of inertia about the center for the given mass
    pub fn moment_of_inertia(&self, mass: f32) -> f32 {
        match *self {
            Shape::Circle { radius } => 0.5 * mass * radius * radius,
            Shape::Rectangle { half_extent } => {
                let size = half_extent * 2.0;
                (1.0 / 12.0) * mass * (size.x * size.x + size.y * size.y)
            }
        }
    }

    /// Bounding box of the shape placed at `position` with `rotation` radians
    ///
    /// Circles ignore rotation. Rotated rectangles are bounded by the min/max of
    /// their four rotated corners.
    pub fn aabb(&self, position: Vec2, rotation: f32) -> Aabb {
        match *self {
            Shape::Circle { radius } => {
                let r = Vec2::splat(radius);
                Aabb::new(position - r, position + r)
            }
            Shape::Rectangle { half_extent } if rotation == 0.0 => {
                Aabb::new(position - half_extent, position + half_extent)
            }
            Shape::Rectangle { half_extent } => {
                let corners = [
                    Vec2::new(half_extent.x, half_extent.y),
                    Vec2::new(half_extent.x, -half_extent.y),
                    Vec2::new(-half_extent.x, -half_extent.y),
                    Vec2::new(-half_extent.x, half_extent.y),
                ];

                let first = position + rotate(corners[0], rotation);
                let mut aabb = Aabb::new(first, first);
                for corner in &corners[1..] {
                    let world = position + rotate(*corner, rotation);
                    aabb.min = aabb.min.min(world);
                    aabb.max = aabb.max.max(world);
                }
                aabb
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(2.0, 2.0));
        let b = Aabb::new(Vec2::new(1.0, 1.0), Vec2::new(3.0, 3.0));
        let c = Aabb::new(Vec2::new(5.0, 5.0), Vec2::new(6.0, 6.0));

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_aabb_shared_edge_overlaps() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        let b = Aabb::new(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0));

        assert!(a.overlaps(&b), "Boxes sharing an edge should overlap");
    }

    #[test]
    fn test_aabb_separated_on_one_axis() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        let b = Aabb::new(Vec2::new(0.0, 1.5), Vec2::new(1.0, 2.5));

        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_aabb_center_and_extent() {
        let aabb = Aabb::new(Vec2::new(-1.0, 2.0), Vec2::new(3.0, 6.0));
        assert_eq!(aabb.center(), Vec2::new(1.0, 4.0));
        assert_eq!(aabb.extent(), Vec2::new(2.0, 2.0));
    }

    #[test]
    fn test_circle_aabb() {
        let aabb = Shape::circle(2.0).aabb(Vec2::new(1.0, 1.0), 1.3);
        assert_eq!(aabb.min, Vec2::new(-1.0, -1.0));
        assert_eq!(aabb.max, Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_rectangle_aabb_unrotated() {
        let shape = Shape::rectangle(Vec2::new(4.0, 2.0));
        let aabb = shape.aabb(Vec2::new(10.0, 0.0), 0.0);
        assert_eq!(aabb.min, Vec2::new(8.0, -1.0));
        assert_eq!(aabb.max, Vec2::new(12.0, 1.0));
    }

    #[test]
    fn test_rectangle_aabb_quarter_turn_swaps_extents() {
        let shape = Shape::rectangle(Vec2::new(4.0, 2.0));
        let aabb = shape.aabb(Vec2::ZERO, FRAC_PI_2);
        assert!(aabb.min.abs_diff_eq(Vec2::new(-1.0, -2.0), 1e-5));
        assert!(aabb.max.abs_diff_eq(Vec2::new(1.0, 2.0), 1e-5));
    }

    #[test]
    fn test_rectangle_aabb_diagonal() {
        let shape = Shape::rectangle(Vec2::new(2.0, 2.0));
        let aabb = shape.aabb(Vec2::ZERO, FRAC_PI_4);
        let reach = 2.0_f32.sqrt();
        assert_relative_eq!(aabb.max.x, reach, epsilon = 1e-5);
        assert_relative_eq!(aabb.max.y, reach, epsilon = 1e-5);
        assert_relative_eq!(aabb.min.x, -reach, epsilon = 1e-5);
    }

    #[test]
    fn test_moment_of_inertia() {
        let circle = Shape::circle(2.0);
        let rectangle = Shape::rectangle(Vec2::new(3.0, 4.0));

        assert_relative_eq!(circle.moment_of_inertia(3.0), 6.0, epsilon = 1e-5);
        assert_relative_eq!(rectangle.moment_of_inertia(12.0), 25.0, epsilon = 1e-4);
    }
}
