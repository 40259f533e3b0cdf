//! Wireframe view: collider outlines written as a line list for the page.
//!
//! Every active entity with a [`WireStyle`] and a physics body contributes its
//! collider outline, plus an optional angle indicator and velocity line.
//! Bodies outside the camera viewport are culled.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::core::physics::{ColliderDesc, PhysicsWorld};
use crate::core::scene::Scene;
use crate::renderer::camera::Camera2D;

/// Length multiplier for the velocity line, in ticks of travel.
const VELOCITY_LINE_TICKS: f32 = 2.0;

/// Segments used to approximate a circle outline.
const CIRCLE_SEGMENTS: usize = 32;

/// Straight-alpha RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl WireColor {
    pub const WHITE: WireColor = WireColor::new(1.0, 1.0, 1.0, 1.0);
    pub const GREY: WireColor = WireColor::new(0.6, 0.6, 0.6, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// How an entity is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireStyle {
    pub color: WireColor,
    /// Draw a line from the body center along its local −X axis.
    pub show_angle: bool,
    /// Draw a line from the body center along its velocity.
    pub show_velocity: bool,
}

impl WireStyle {
    pub fn outline(color: WireColor) -> Self {
        Self {
            color,
            show_angle: false,
            show_velocity: false,
        }
    }

    pub fn with_indicators(mut self) -> Self {
        self.show_angle = true;
        self.show_velocity = true;
        self
    }
}

/// One end of a line segment. Must match the page's vertex layout:
/// 6 floats = 24 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct WireVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl WireVertex {
    pub const FLOATS: usize = 6;

    fn new(p: Vec2, color: WireColor) -> Self {
        Self {
            x: p.x,
            y: p.y,
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        }
    }
}

/// Line-list vertex buffer (pairs of vertices), capped at a fixed capacity.
pub struct WireframeBuffer {
    vertices: Vec<WireVertex>,
    capacity: usize,
    overflowed: bool,
}

impl WireframeBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            capacity,
            overflowed: false,
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.overflowed = false;
    }

    /// Add one segment. Dropped silently once the buffer is full.
    pub fn push_line(&mut self, a: Vec2, b: Vec2, color: WireColor) {
        if self.vertices.len() + 2 > self.capacity {
            self.overflowed = true;
            return;
        }
        self.vertices.push(WireVertex::new(a, color));
        self.vertices.push(WireVertex::new(b, color));
    }

    /// Add a closed polyline through `points`.
    pub fn push_loop(&mut self, points: &[Vec2], color: WireColor) {
        if points.len() < 2 {
            return;
        }
        for (i, &p) in points.iter().enumerate() {
            let next = points[(i + 1) % points.len()];
            self.push_line(p, next, color);
        }
    }

    pub fn vertices(&self) -> &[WireVertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Whether any segment was dropped since the last clear.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Raw pointer to vertex data for reads from JS memory.
    pub fn vertices_ptr(&self) -> *const f32 {
        self.vertices.as_ptr() as *const f32
    }
}

/// Rebuild `buffer` from every visible, styled entity.
pub fn build_wireframe(
    scene: &Scene,
    physics: &PhysicsWorld,
    camera: &Camera2D,
    buffer: &mut WireframeBuffer,
) {
    buffer.clear();
    for entity in scene.iter() {
        if !entity.active {
            continue;
        }
        let (Some(style), Some(body)) = (&entity.wire, &entity.body) else {
            continue;
        };
        if let Some((min, max)) = physics.body_bounds(body) {
            if !camera.is_rect_visible(min, max) {
                continue;
            }
        }
        let Some(shape) = physics.collider_shape(body) else {
            continue;
        };
        let (pos, rot) = physics.body_position(body);

        buffer.push_loop(&collider_outline(pos, rot, &shape), style.color);

        if style.show_angle {
            let reach = shape_reach(&shape);
            let tip = pos + Vec2::from_angle(rot).rotate(Vec2::new(-reach, 0.0));
            buffer.push_line(pos, tip, style.color);
        }
        if style.show_velocity {
            let vel = physics.velocity(body) * physics.dt() * VELOCITY_LINE_TICKS;
            if vel.length_squared() > f32::EPSILON {
                buffer.push_line(pos, pos + vel, WireColor::GREY);
            }
        }
    }
    if buffer.overflowed() {
        log::warn!("wireframe: buffer full at {} vertices", buffer.vertex_count());
    }
}

/// Distance from the body origin to its farthest outline point.
fn shape_reach(shape: &ColliderDesc) -> f32 {
    match *shape {
        ColliderDesc::Ball { radius } => radius,
        ColliderDesc::Triangle { a, b, c } => a.length().max(b.length()).max(c.length()),
    }
}

/// Outline points (open loop) for a collider at a given pose.
fn collider_outline(center: Vec2, rot: f32, shape: &ColliderDesc) -> Vec<Vec2> {
    let rotation = Vec2::from_angle(rot);
    let place = |local: Vec2| center + rotation.rotate(local);

    match *shape {
        ColliderDesc::Ball { radius } => (0..CIRCLE_SEGMENTS)
            .map(|i| {
                let angle = (i as f32 / CIRCLE_SEGMENTS as f32) * std::f32::consts::TAU;
                place(Vec2::from_angle(angle) * radius)
            })
            .collect(),
        ColliderDesc::Triangle { a, b, c } => vec![place(a), place(b), place(c)],
    }
}
