//! Game-specific components

use game_core::ecs::{Component, EntityId};
use nalgebra::Vector2;

/// Position that moves by a fixed step every tick
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// Current position in pixels
    pub position: Vector2<f32>,

    /// Step applied each tick
    pub velocity: Vector2<f32>,
}

impl Position {
    /// Create a position at `(x, y)` moving by `velocity` per tick
    pub fn new(x: f32, y: f32, velocity: Vector2<f32>) -> Self {
        Self {
            position: Vector2::new(x, y),
            velocity,
        }
    }
}

impl Component for Position {
    fn update(&mut self) {
        self.position += self.velocity;
    }
}

/// Textured quad drawn once per tick
#[derive(Debug, Clone)]
pub struct Sprite {
    /// Texture path
    pub texture: String,

    /// Destination size in pixels
    pub size: (u32, u32),

    /// Number of draw calls issued
    pub draws: u64,

    owner: Option<EntityId>,
}

impl Sprite {
    /// Create a sprite for `texture` drawn at `width` x `height`
    pub fn new(texture: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            texture: texture.into(),
            size: (width, height),
            draws: 0,
            owner: None,
        }
    }
}

impl Component for Sprite {
    fn init(&mut self, owner: EntityId) {
        self.owner = Some(owner);
        log::debug!("Sprite {} attached to {:?}", self.texture, owner);
    }

    fn draw(&mut self) {
        self.draws += 1;
        log::trace!(
            "draw {} {}x{} for {:?}",
            self.texture,
            self.size.0,
            self.size.1,
            self.owner
        );
    }
}

/// Counts ticks
#[derive(Debug, Clone, Default)]
pub struct FrameCounter {
    /// Ticks seen so far
    pub count: u64,
}

impl Component for FrameCounter {
    fn update(&mut self) {
        self.count += 1;
        log::trace!("tick {}", self.count);
    }
}

/// Ticks left before the owning entity should be destroyed
#[derive(Debug, Clone)]
pub struct Lifetime {
    /// Remaining ticks
    pub remaining: u32,
}

impl Lifetime {
    /// Lifetime of `ticks` updates
    pub fn new(ticks: u32) -> Self {
        Self { remaining: ticks }
    }

    /// Whether the lifetime has run out
    pub fn expired(&self) -> bool {
        self.remaining == 0
    }
}

impl Component for Lifetime {
    fn update(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}
