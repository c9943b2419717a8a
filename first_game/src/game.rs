//! The demo game: a sprite walking right while short-lived sparks come and go

use game_core::prelude::*;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::components::{FrameCounter, Lifetime, Position, Sprite};

/// Game settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Frames between two spark spawns (0 disables sparks)
    pub spark_interval: u64,

    /// Ticks a spark lives
    pub spark_lifetime: u32,

    /// Engine settings
    pub engine: EngineConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spark_interval: 30,
            spark_lifetime: 45,
            engine: EngineConfig {
                title: "First Game".to_string(),
                max_frames: Some(300),
                ..EngineConfig::default()
            },
        }
    }
}

impl Config for GameConfig {}

/// Demo application
pub struct FirstGame {
    config: GameConfig,
    player: Option<EntityId>,
    sparks_spawned: u64,
    sparks_destroyed: u64,
    final_player_x: Option<f32>,
    final_population: usize,
}

impl FirstGame {
    /// Create the game from its settings
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            player: None,
            sparks_spawned: 0,
            sparks_destroyed: 0,
            final_player_x: None,
            final_population: 0,
        }
    }

    /// Sparks spawned so far
    pub fn sparks_spawned(&self) -> u64 {
        self.sparks_spawned
    }

    /// Sparks destroyed so far
    pub fn sparks_destroyed(&self) -> u64 {
        self.sparks_destroyed
    }

    /// Player x coordinate captured at shutdown
    pub fn final_player_x(&self) -> Option<f32> {
        self.final_player_x
    }

    /// Entity count captured at shutdown
    pub fn final_population(&self) -> usize {
        self.final_population
    }

    fn spawn_spark(&mut self, manager: &mut Manager, frame: u64) -> Result<(), AppError> {
        let spark = manager.add_entity();
        // Stack sparks vertically so consecutive ones do not overlap
        let row = (self.sparks_spawned % 8) as f32;
        spark.add_component(Position::new(0.0, 64.0 + row * 16.0, Vector2::new(2.0, 0.0)))?;
        spark.add_component(Sprite::new("assets/spark.png", 16, 16))?;
        spark.add_component(Lifetime::new(self.config.spark_lifetime))?;
        self.sparks_spawned += 1;
        log::debug!("Frame {}: spark {:?} spawned", frame, spark.id());
        Ok(())
    }
}

impl Application for FirstGame {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let player = engine.manager_mut().add_entity();
        player.add_component(Position::new(0.0, 0.0, Vector2::new(1.0, 0.0)))?;
        player.add_component(Sprite::new("assets/character1.png", 128, 128))?;
        player.add_component(FrameCounter::default())?;
        self.player = Some(player.id());

        log::info!("Player {:?} spawned", player.id());
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let frame = engine.frame();

        let expired: Vec<EntityId> = engine
            .manager()
            .iter()
            .filter(|entity| entity.is_active())
            .filter(|entity| entity.get_component::<Lifetime>().is_ok_and(Lifetime::expired))
            .map(Entity::id)
            .collect();
        for id in expired {
            engine
                .manager_mut()
                .entity_mut(id)
                .ok_or(EcsError::EntityNotFound)?
                .destroy();
            self.sparks_destroyed += 1;
        }

        if self.config.spark_interval > 0 && frame % self.config.spark_interval == 0 {
            self.spawn_spark(engine.manager_mut(), frame)?;
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        self.final_population = engine.manager().len();

        let Some(player) = self.player.and_then(|id| engine.manager().entity(id)) else {
            log::warn!("Player entity is gone");
            return;
        };
        if let Ok(position) = player.get_component::<Position>() {
            self.final_player_x = Some(position.position.x);
        }
        let ticks = player
            .get_component::<FrameCounter>()
            .map(|counter| counter.count)
            .unwrap_or_default();

        log::info!(
            "Game cleaned: {} ticks, {} sparks spawned, {} destroyed, {} entities left",
            ticks,
            self.sparks_spawned,
            self.sparks_destroyed,
            self.final_population
        );
    }
}
