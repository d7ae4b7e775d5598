// Narrow-phase collision detection

use super::body::RigidBody;
use super::handle::BodyHandle;
use super::shape::Shape;
use crate::common::math::sign_toward;
use glam::Vec2;

/// Geometry of a single contact between two bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from body A towards body B
    pub normal: Vec2,
    /// Overlap depth (never negative)
    pub penetration: f32,
    /// Approximate world-space contact point
    pub contact_point: Vec2,
}

impl Contact {
    /// The same contact seen from the other body
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }
}

/// Confirmed collision between two bodies during one step
///
/// Only lives for the duration of a single `update`; the handles are not
/// guaranteed to stay valid afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    pub contact: Contact,
}

impl Collision {
    /// Contact normal, pointing from `body_a` towards `body_b`
    pub fn normal(&self) -> Vec2 {
        self.contact.normal
    }

    /// Overlap depth along the normal
    pub fn penetration(&self) -> f32 {
        self.contact.penetration
    }

    /// Approximate world-space contact point
    pub fn contact_point(&self) -> Vec2 {
        self.contact.contact_point
    }
}

/// Test two bodies for overlap
///
/// Rejects early when the cached AABBs are disjoint, then dispatches on the
/// shape pair. Rotation is not taken into account for rectangles.
pub fn detect_collision(a: &RigidBody, b: &RigidBody) -> Option<Contact> {
    if !a.aabb().overlaps(b.aabb()) {
        return None;
    }

    match (*a.shape(), *b.shape()) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circle_vs_circle(a.position, ra, b.position, rb)
        }
        (Shape::Rectangle { half_extent: ha }, Shape::Rectangle { half_extent: hb }) => {
            rectangle_vs_rectangle(a.position, ha, b.position, hb)
        }
        (Shape::Circle { radius }, Shape::Rectangle { half_extent }) => {
            circle_vs_rectangle(a.position, radius, b.position, half_extent)
        }
        (Shape::Rectangle { half_extent }, Shape::Circle { radius }) => {
            circle_vs_rectangle(b.position, radius, a.position, half_extent)
                .map(Contact::flipped)
        }
    }
}

/// Circle against circle
///
/// Coincident centers fall back to the `(1, 0)` axis.
pub fn circle_vs_circle(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> Option<Contact> {
    let direction = pos_b - pos_a;
    let distance_squared = direction.length_squared();
    let radius_sum = radius_a + radius_b;

    if distance_squared > radius_sum * radius_sum {
        return None;
    }

    let distance = distance_squared.sqrt();
    let normal = if distance > 0.0 {
        direction / distance
    } else {
        Vec2::X
    };

    Some(Contact {
        normal,
        penetration: radius_sum - distance,
        contact_point: pos_a + normal * radius_a,
    })
}

/// Axis-aligned rectangle against axis-aligned rectangle
///
/// The normal is the axis of least overlap, signed towards B. The contact
/// point is the corner of A facing B. Centers level on the chosen axis give
/// no direction and resolve to the positive axis for either ordering.
pub fn rectangle_vs_rectangle(
    pos_a: Vec2,
    half_a: Vec2,
    pos_b: Vec2,
    half_b: Vec2,
) -> Option<Contact> {
    let diff = pos_b - pos_a;
    let overlap = half_a + half_b - diff.abs();

    if overlap.x <= 0.0 || overlap.y <= 0.0 {
        return None;
    }

    let sign = Vec2::new(sign_toward(diff.x), sign_toward(diff.y));
    let (normal, penetration) = if overlap.x < overlap.y {
        (Vec2::new(sign.x, 0.0), overlap.x)
    } else {
        (Vec2::new(0.0, sign.y), overlap.y)
    };

    Some(Contact {
        normal,
        penetration,
        contact_point: pos_a + half_a * sign,
    })
}

/// Circle (A) against axis-aligned rectangle (B)
///
/// Uses the closest point on the rectangle to the circle center. The normal
/// points from the circle into the rectangle, like every other A to B normal.
/// When the center is inside the rectangle the normal follows the axis with
/// the smaller distance to an edge.
pub fn circle_vs_rectangle(
    circle_pos: Vec2,
    radius: f32,
    rect_pos: Vec2,
    half_extent: Vec2,
) -> Option<Contact> {
    let local = circle_pos - rect_pos;
    let closest = local.clamp(-half_extent, half_extent);
    let to_circle = local - closest;
    let distance_squared = to_circle.length_squared();

    if distance_squared > radius * radius {
        return None;
    }

    let distance = distance_squared.sqrt();

    // Direction from the rectangle surface out to the circle center
    let outward = if distance > 0.0 {
        to_circle / distance
    } else {
        let edge_gap = half_extent - local.abs();
        if edge_gap.x < edge_gap.y {
            Vec2::new(sign_toward(local.x), 0.0)
        } else {
            Vec2::new(0.0, sign_toward(local.y))
        }
    };

    Some(Contact {
        normal: -outward,
        penetration: radius - distance,
        contact_point: circle_pos - outward * radius,
    })
}
