use glam::Vec2;

/// Axis-aligned world-space rectangle visible on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub min: Vec2,
    pub max: Vec2,
}

impl Viewport {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Check if a world-space rectangle overlaps this one.
    pub fn overlaps(&self, min: Vec2, max: Vec2) -> bool {
        max.x >= self.min.x && min.x <= self.max.x && max.y >= self.min.y && min.y <= self.max.y
    }

    /// Flat `[min_x, min_y, max_x, max_y]`, the order the page reads it in.
    pub fn to_array(&self) -> [f32; 4] {
        [self.min.x, self.min.y, self.max.x, self.max.y]
    }
}

/// 2D camera for the wireframe view.
///
/// The camera is just the visible rectangle. Games that follow a body
/// recompute it wholesale each tick with [`set_viewport`](Self::set_viewport).
#[derive(Debug, Clone)]
pub struct Camera2D {
    viewport: Viewport,
}

impl Camera2D {
    /// Camera showing `(0, 0)–(width, height)`.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Viewport::new(Vec2::ZERO, Vec2::new(width, height)),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Change the visible size, keeping the top-left corner in place.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.max = self.viewport.min + Vec2::new(width, height);
    }

    pub fn width(&self) -> f32 {
        self.viewport.width()
    }

    pub fn height(&self) -> f32 {
        self.viewport.height()
    }

    /// Check if a world-space rectangle overlaps the viewport.
    pub fn is_rect_visible(&self, min: Vec2, max: Vec2) -> bool {
        self.viewport.overlaps(min, max)
    }
}
