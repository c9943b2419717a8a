//! Application trait and lifecycle management

use crate::ecs::EcsError;
use crate::engine::{Engine, EngineError};
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to create your game using the engine.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once before the first frame. Spawn the initial entities here.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Handle an event pulled from the event source
    ///
    /// The default implementation stops the engine on [`AppEvent::Quit`].
    fn handle_event(&mut self, engine: &mut Engine, event: AppEvent) -> Result<(), AppError> {
        engine.handle_event(&event);
        Ok(())
    }

    /// Update the application
    ///
    /// Called every frame before the entity sweep. Entities destroyed here
    /// are still updated and drawn this frame and reclaimed on the next one.
    fn update(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Render the application
    ///
    /// The default implementation runs the entity draw sweep.
    fn render(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        engine.render();
        Ok(())
    }

    /// Cleanup the application
    ///
    /// Called once after the last frame.
    fn cleanup(&mut self, engine: &mut Engine);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Entity/component error
    #[error("ECS error: {0}")]
    Ecs(#[from] EcsError),

    /// Game logic error
    #[error("Game logic error: {0}")]
    GameLogic(String),
}

/// Application events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The user asked to close the game
    Quit,
}
