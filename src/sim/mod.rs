//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Frame-rate independent steps (`dt` scaled to 60 Hz frames)
//! - Seeded RNG only
//! - Side effects leave as `GameEvent`s
//! - No rendering or platform dependencies

pub mod bird;
pub mod clock;
pub mod collision;
pub mod layout;
pub mod scenery;
pub mod sequence;
pub mod state;
pub mod tick;

pub use bird::Bird;
pub use clock::FrameClock;
pub use collision::overlaps;
pub use layout::{Medal, Rect, Sprite, Viewport};
pub use scenery::{Glitter, GroundScroller, ObstacleColumn, ObstaclePair};
pub use sequence::{Sequence, SequenceKind, Step};
pub use state::{GameEvent, GameOverPhase, GameState, SoundCue, Stage};
pub use tick::{bird_rect, handle_pointer_down, handle_tap, start_button_rect, tick};
