//! Skyflap - a single-screen tap-to-fly arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, stage machine)
//! - `render`: Stage-dependent compositing onto a 2D surface
//! - `persistence`: Best score storage
//! - `settings`: User preferences
//! - `game`: Frame driver tying clock, simulation, storage and rendering

pub mod game;
pub mod persistence;
pub mod render;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;

pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
///
/// Positions are offsets from the viewport centre, expressed as a fraction of
/// the viewport size. Positive x moves left, positive y moves up.
pub mod consts {
    /// Frames per second the per-frame constants are tuned for
    pub const BASE_FPS: f32 = 60.0;
    /// Delta used when no previous frame exists (or the delta is bogus)
    pub const DEFAULT_FRAME_DT: f32 = 1.0 / BASE_FPS;
    /// Longest delta a single frame may simulate (tab switches, stalls)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Sprite widths are authored against this surface width (px)
    pub const REFERENCE_WIDTH: f32 = 288.0;

    /// Bird physics (per 60 Hz frame)
    pub const GRAVITY: f32 = 0.0006;
    pub const MAX_FALL_VELOCITY: f32 = 0.02;
    pub const FLAP_VELOCITY: f32 = -0.0108;
    pub const FLOOR_Y: f32 = -0.26;
    pub const CEILING_Y: f32 = 0.52;

    /// Bird rotation
    pub const MAX_TILT: f32 = std::f32::consts::FRAC_PI_2;
    pub const NOSE_UP_ANGLE: f32 = -std::f32::consts::PI / 10.0;
    /// Downward velocity above which the bird dives
    pub const DIVE_VELOCITY: f32 = 0.008;
    pub const DIVE_ROTATION_STEP: f32 = 0.1;
    pub const RECOVER_FACTOR: f32 = 0.2;

    /// Wing animation intervals (frames per wing step)
    pub const WING_INTERVAL_IDLE: f32 = 7.0;
    pub const WING_INTERVAL_PLAYING: f32 = 3.0;
    pub const WING_FRAMES: u8 = 3;

    /// Idle bobbing
    pub const BOB_RANGE: f32 = 0.012;
    pub const BOB_STEP: f32 = 0.00056;
    pub const INIT_BOB_BASE: f32 = 0.0;
    pub const READY_BOB_BASE: f32 = -0.05;

    /// Bird placement for a round
    pub const BIRD_X: f32 = 0.19;
    pub const BIRD_START_Y: f32 = -0.05;

    /// Obstacles
    pub const OBSTACLE_SPEED: f32 = 0.007;
    pub const OBSTACLE_START_X: [f32; 2] = [-1.59, -2.19];
    pub const OBSTACLE_SPAWN_X: f32 = -0.59;
    pub const OBSTACLE_RECYCLE_X: f32 = 0.59;
    /// Column x past which the bird has cleared it
    pub const SCORE_THRESHOLD_X: f32 = 0.19;
    pub const GAP_HEIGHT: f32 = 0.82;
    pub const GAP_MIN_Y: f32 = -0.51;
    pub const GAP_MAX_Y: f32 = GAP_HEIGHT - 0.51 + GAP_MIN_Y;

    /// Ground
    pub const GROUND_SPEED: f32 = 0.007;
    pub const GROUND_WRAP_X: f32 = 1.083;
    pub const GROUND_Y: f32 = -0.391;

    /// Glitter sparkle on the medal
    pub const GLITTER_INTERVAL: f32 = 5.0;
    pub const GLITTER_X_MIN: f32 = 0.13;
    pub const GLITTER_X_SPAN: f32 = 0.19;
    pub const GLITTER_Y_MAX: f32 = 0.044;
    pub const GLITTER_Y_SPAN: f32 = 0.105;

    /// Scripted sequence durations (frames)
    pub const START_FADE_FRAMES: f32 = 20.0;
    pub const READY_FADE_FRAMES: f32 = 20.0;
    pub const OVERLAY_FADE_FRAMES: f32 = 30.0;
    pub const FLASH_FRAMES: f32 = 10.0;
    pub const BANNER_FRAMES: f32 = 20.0;
    /// 500 ms hold before the score board slides in
    pub const BOARD_HOLD_FRAMES: f32 = 30.0;
    pub const BOARD_FRAMES: f32 = 40.0;
    pub const TALLY_FRAMES: f32 = 20.0;
    pub const RESTART_FADE_FRAMES: f32 = 20.0;

    /// Number of background variants and bird costumes
    pub const BACKGROUNDS: u8 = 2;
    pub const COSTUMES: u8 = 3;
}

/// Convert an elapsed time in seconds into 60 Hz frame ticks
#[inline]
pub fn frames(dt: f32) -> f32 {
    dt * consts::BASE_FPS
}
