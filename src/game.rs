//! Frame driver
//!
//! Binds the frame clock, the simulation, the best-score store and the render
//! pipeline. The platform calls `frame` once per display refresh and forwards
//! input between frames.

use crate::persistence::BestScoreStore;
use crate::render::{Surface, render};
use crate::sim::{FrameClock, GameEvent, GameState, handle_pointer_down, handle_tap, tick};

pub struct Game<S: BestScoreStore> {
    pub state: GameState,
    clock: FrameClock,
    store: S,
}

impl<S: BestScoreStore> Game<S> {
    /// Start a session on the title screen with the stored best score
    pub fn new(seed: u64, store: S) -> Self {
        let best = store.best_score();
        log::info!("Game initialized with seed {seed}, best score {best}");
        Self {
            state: GameState::new(seed, best),
            clock: FrameClock::new(),
            store,
        }
    }

    /// Update and draw one frame.
    ///
    /// Returns the events produced since the previous frame (including those
    /// raised by input) for the platform to act on.
    pub fn frame(&mut self, timestamp_ms: f64, surface: &mut dyn Surface) -> Vec<GameEvent> {
        self.state.viewport = surface.viewport();
        let dt = self.clock.delta(timestamp_ms);
        tick(&mut self.state, dt);
        render(&self.state, surface);

        let events = self.state.drain_events();
        for event in &events {
            if let GameEvent::NewRecord(best) = event {
                self.store.set_best_score(*best);
            }
        }
        events
    }

    /// Pointer pressed at surface pixel coordinates
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        handle_pointer_down(&mut self.state, x, y)
    }

    /// Flap key pressed
    pub fn tap(&mut self) -> bool {
        handle_tap(&mut self.state)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
