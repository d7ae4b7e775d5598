use super::body::{BodyType, RigidBody};
use super::shape::{Aabb, Shape};
use super::world::DebugData;
use crate::common::math::rotate;
use glam::Vec2;

/// Segments used to approximate a circle outline
const CIRCLE_SEGMENTS: usize = 16;

const DYNAMIC_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 0.8];
const STATIC_COLOR: [f32; 4] = [0.5, 0.5, 0.5, 0.8];
const INACTIVE_COLOR: [f32; 4] = [0.3, 0.3, 0.3, 0.4];
const AABB_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 0.5];

/// Line-list vertex for debug drawing
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DebugVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// Builds line geometry for physics bodies
///
/// Produces indexed line lists (two indices per segment) that a renderer can
/// upload as-is. Shapes are drawn with their rotation; AABB outlines are
/// optional.
#[derive(Debug, Default)]
pub struct DebugRenderer {
    vertices: Vec<DebugVertex>,
    indices: Vec<u32>,
    enabled: bool,
    draw_aabbs: bool,
}

impl DebugRenderer {
    /// Create a disabled debug renderer
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable debug geometry generation
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Check if debug geometry generation is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Also outline each body's cached AABB
    pub fn set_draw_aabbs(&mut self, draw_aabbs: bool) {
        self.draw_aabbs = draw_aabbs;
    }

    /// Rebuild debug geometry from the current world state
    pub fn prepare(&mut self, data: &DebugData<'_>) {
        self.vertices.clear();
        self.indices.clear();

        if !self.enabled {
            return;
        }

        for (_, body) in data.bodies.iter() {
            let color = body_color(body);

            match *body.shape() {
                Shape::Circle { radius } => {
                    self.draw_circle(body.position, radius, color);
                    // Radius line shows the current rotation
                    let tip = body.position + rotate(Vec2::new(radius, 0.0), body.rotation);
                    self.draw_line(body.position, tip, color);
                }
                Shape::Rectangle { half_extent } => {
                    self.draw_box(body.position, half_extent, body.rotation, color);
                }
            }

            if self.draw_aabbs {
                self.draw_aabb(body.aabb(), AABB_COLOR);
            }
        }
    }

    /// Vertices from the last `prepare`
    pub fn vertices(&self) -> &[DebugVertex] {
        &self.vertices
    }

    /// Line-list indices from the last `prepare`
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Vertex data as raw bytes for buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw bytes for buffer upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    fn push_vertex(&mut self, position: Vec2, color: [f32; 4]) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(DebugVertex {
            position: position.to_array(),
            color,
        });
        index
    }

    /// Connect `points` into a closed loop
    fn draw_loop(&mut self, points: &[Vec2], color: [f32; 4]) {
        let start = self.vertices.len() as u32;
        for &point in points {
            self.push_vertex(point, color);
        }

        let count = points.len() as u32;
        for i in 0..count {
            self.indices.push(start + i);
            self.indices.push(start + (i + 1) % count);
        }
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: [f32; 4]) {
        let a = self.push_vertex(from, color);
        let b = self.push_vertex(to, color);
        self.indices.push(a);
        self.indices.push(b);
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        let points: Vec<Vec2> = (0..CIRCLE_SEGMENTS)
            .map(|i| {
                let angle = (i as f32 / CIRCLE_SEGMENTS as f32) * std::f32::consts::TAU;
                center + Vec2::from_angle(angle) * radius
            })
            .collect();
        self.draw_loop(&points, color);
    }

    fn draw_box(&mut self, center: Vec2, half_extent: Vec2, rotation: f32, color: [f32; 4]) {
        let corners = [
            Vec2::new(-half_extent.x, -half_extent.y),
            Vec2::new(half_extent.x, -half_extent.y),
            Vec2::new(half_extent.x, half_extent.y),
            Vec2::new(-half_extent.x, half_extent.y),
        ]
        .map(|corner| center + rotate(corner, rotation));
        self.draw_loop(&corners, color);
    }

    fn draw_aabb(&mut self, aabb: &Aabb, color: [f32; 4]) {
        let corners = [
            aabb.min,
            Vec2::new(aabb.max.x, aabb.min.y),
            aabb.max,
            Vec2::new(aabb.min.x, aabb.max.y),
        ];
        self.draw_loop(&corners, color);
    }
}

fn body_color(body: &RigidBody) -> [f32; 4] {
    if !body.active {
        return INACTIVE_COLOR;
    }
    match body.body_type() {
        BodyType::Dynamic => DYNAMIC_COLOR,
        BodyType::Static => STATIC_COLOR,
    }
}
