//! Core engine implementation
//!
//! One frame of the loop:
//!
//! 1. reclaim entities destroyed during the previous frame
//! 2. drain the event source into [`Application::handle_event`]
//! 3. [`Application::update`], then update every entity
//! 4. [`Application::render`] (draws every entity by default)
//! 5. sleep out the rest of the frame budget
//!
//! Entities destroyed at any point of a frame are still updated and drawn in
//! that frame. A quit request also lets the current frame finish.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    application::{AppEvent, Application},
    config::{Config, ConfigError},
    ecs::{EcsError, Manager},
    events::EventSource,
    foundation::time::FrameLimiter,
};

/// Main engine struct
///
/// The engine owns the entity manager and drives the main loop.
pub struct Engine {
    /// Entity manager holding the whole population
    pub manager: Manager,

    /// Frame rate cap
    limiter: FrameLimiter,

    /// Engine configuration
    config: EngineConfig,

    /// Frames completed so far
    frame: u64,

    /// Whether the engine should continue running
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!(
            "Initializing engine \"{}\" at {} FPS{}",
            config.title,
            config.target_fps,
            if config.paced { "" } else { " (unpaced)" }
        );

        let limiter = if config.paced {
            FrameLimiter::new(config.target_fps)
        } else {
            FrameLimiter::unpaced()
        };

        Ok(Self {
            manager: Manager::new(),
            limiter,
            config,
            frame: 0,
            running: true,
        })
    }

    /// Run the engine main loop with the given application
    ///
    /// Returns the number of frames executed.
    pub fn run<A: Application, E: EventSource>(
        config: EngineConfig,
        app: &mut A,
        events: &mut E,
    ) -> Result<u64, EngineError> {
        let mut engine = Self::new(config)?;

        app.initialize(&mut engine)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {}", e)))?;

        log::info!("Starting main loop...");

        while engine.running && !engine.frame_limit_reached() {
            engine.limiter.begin_frame();
            engine.manager.refresh();

            while let Some(event) = events.poll_event(engine.frame) {
                log::debug!("Frame {}: {:?}", engine.frame, event);
                app.handle_event(&mut engine, event)
                    .map_err(|e| EngineError::ApplicationError(format!("App event: {}", e)))?;
            }

            app.update(&mut engine)
                .map_err(|e| EngineError::ApplicationError(format!("App update: {}", e)))?;
            engine.manager.update();

            app.render(&mut engine)
                .map_err(|e| EngineError::ApplicationError(format!("App render: {}", e)))?;

            engine.frame += 1;
            engine.limiter.end_frame();
        }

        app.cleanup(&mut engine);

        log::info!(
            "Engine shutdown complete after {} frames ({} entities alive)",
            engine.frame,
            engine.manager.len()
        );
        Ok(engine.frame)
    }

    fn frame_limit_reached(&self) -> bool {
        self.config
            .max_frames
            .is_some_and(|max_frames| self.frame >= max_frames)
    }

    /// Draw every entity
    pub fn render(&mut self) {
        self.manager.draw();
    }

    /// Apply the default reaction to an event
    pub fn handle_event(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Quit => self.quit(),
        }
    }

    /// Request engine shutdown
    ///
    /// The current frame still runs its update and draw phases; no further
    /// frame starts.
    pub fn quit(&mut self) {
        if self.running {
            log::info!("Engine shutdown requested");
            self.running = false;
        }
    }

    /// Whether the loop keeps going after this frame
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames completed so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Get the entity manager
    pub fn manager(&self) -> &Manager {
        &self.manager
    }

    /// Get mutable access to the entity manager
    pub fn manager_mut(&mut self) -> &mut Manager {
        &mut self.manager
    }

    /// Get the engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Game title, used in log output
    pub title: String,

    /// Frame rate cap
    pub target_fps: u32,

    /// Stop after this many frames
    pub max_frames: Option<u64>,

    /// Sleep out unused frame time
    pub paced: bool,

    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "Game".to_string(),
            target_fps: 60,
            max_frames: None,
            paced: true,
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_fps == 0 {
            return Err(ConfigError::Invalid("target_fps must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Config for EngineConfig {}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Error returned by the application callbacks
    #[error("Application error: {0}")]
    ApplicationError(String),

    /// Entity/component error
    #[error("ECS error: {0}")]
    Ecs(#[from] EcsError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::AppError;
    use crate::ecs::{Component, EntityId};
    use crate::events::{NoEvents, ScriptedEvents};
    use std::cell::Cell;
    use std::rc::Rc;

    struct Pulse {
        updates: Rc<Cell<u32>>,
        draws: Rc<Cell<u32>>,
    }

    impl Component for Pulse {
        fn update(&mut self) {
            self.updates.set(self.updates.get() + 1);
        }

        fn draw(&mut self) {
            self.draws.set(self.draws.get() + 1);
        }
    }

    #[derive(Default)]
    struct Harness {
        updates: Rc<Cell<u32>>,
        draws: Rc<Cell<u32>>,
        spawned: Option<EntityId>,
        destroy_on_frame: Option<u64>,
        population_seen: Vec<usize>,
        cleaned_up: bool,
    }

    impl Application for Harness {
        fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
            let entity = engine.manager_mut().add_entity();
            entity.add_component(Pulse {
                updates: Rc::clone(&self.updates),
                draws: Rc::clone(&self.draws),
            })?;
            self.spawned = Some(entity.id());
            Ok(())
        }

        fn update(&mut self, engine: &mut Engine) -> Result<(), AppError> {
            self.population_seen.push(engine.manager().len());
            if self.destroy_on_frame == Some(engine.frame()) {
                let id = self.spawned.ok_or_else(|| AppError::GameLogic("nothing spawned".into()))?;
                engine
                    .manager_mut()
                    .entity_mut(id)
                    .ok_or(EcsError::EntityNotFound)?
                    .destroy();
            }
            Ok(())
        }

        fn cleanup(&mut self, _engine: &mut Engine) {
            self.cleaned_up = true;
        }
    }

    fn unpaced(max_frames: Option<u64>) -> EngineConfig {
        EngineConfig {
            max_frames,
            paced: false,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_runs_until_frame_limit() {
        let mut app = Harness::default();
        let frames = Engine::run(unpaced(Some(5)), &mut app, &mut NoEvents).unwrap();

        assert_eq!(frames, 5);
        assert_eq!(app.updates.get(), 5);
        assert_eq!(app.draws.get(), 5);
        assert!(app.cleaned_up);
    }

    #[test]
    fn test_quit_event_finishes_current_frame() {
        let mut app = Harness::default();
        let mut events = ScriptedEvents::new().at(3, AppEvent::Quit);
        let frames = Engine::run(unpaced(None), &mut app, &mut events).unwrap();

        // Frame 3 polls the quit and still updates and draws
        assert_eq!(frames, 4);
        assert_eq!(app.updates.get(), 4);
        assert_eq!(app.draws.get(), 4);
        assert_eq!(app.population_seen.len(), 4);
        assert!(app.cleaned_up);
    }

    #[test]
    fn test_destroyed_entity_reclaimed_next_frame() {
        let mut app = Harness {
            destroy_on_frame: Some(1),
            ..Harness::default()
        };
        let frames = Engine::run(unpaced(Some(4)), &mut app, &mut NoEvents).unwrap();

        assert_eq!(frames, 4);
        // Destroyed during frame 1: still swept in frame 1, gone from frame 2
        assert_eq!(app.updates.get(), 2);
        assert_eq!(app.draws.get(), 2);
        assert_eq!(app.population_seen, vec![1, 1, 0, 0]);
    }

    #[test]
    fn test_zero_fps_rejected() {
        let config = EngineConfig {
            target_fps: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            Engine::new(config),
            Err(EngineError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: EngineConfig = toml::from_str("title = \"Demo\"\nmax_frames = 10").unwrap();
        assert_eq!(config.title, "Demo");
        assert_eq!(config.max_frames, Some(10));
        assert_eq!(config.target_fps, 60);
        assert!(config.paced);
    }

    #[test]
    fn test_quit_is_idempotent() {
        let mut engine = Engine::new(unpaced(None)).unwrap();
        assert!(engine.is_running());
        engine.quit();
        engine.handle_event(&AppEvent::Quit);
        assert!(!engine.is_running());
    }
}
