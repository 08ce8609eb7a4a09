//! The player character: vertical-fall physics, tilt and wing animation

use crate::consts::*;
use crate::frames;

/// The flying character
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    /// Horizontal offset from the viewport centre (positive = left)
    pub x: f32,
    /// Vertical offset from the viewport centre (positive = up)
    pub y: f32,
    /// Downward speed per 60 Hz frame (positive = falling)
    pub velocity: f32,
    /// Rotation in radians, positive = nose down
    pub rotation: f32,
    /// Skin chosen for the round
    pub costume: u8,
    /// Current wing frame (0..WING_FRAMES)
    pub wing: u8,
    wing_backward: bool,
    wing_ticks: f32,
    /// Idle bobbing direction
    bob_up: bool,
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}

impl Bird {
    pub fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            velocity: 0.0,
            rotation: 0.0,
            costume: 0,
            wing: 0,
            wing_backward: false,
            wing_ticks: 0.0,
            bob_up: true,
        }
    }

    /// Put the bird back at its round start position, level and at rest
    pub fn reset_for_round(&mut self) {
        self.x = BIRD_X;
        self.y = BIRD_START_Y;
        self.velocity = 0.0;
        self.rotation = 0.0;
    }

    /// Upward impulse. Replaces the current velocity rather than adding to it.
    pub fn flap(&mut self) {
        self.velocity = FLAP_VELOCITY;
    }

    /// Accelerate downward, capped at terminal velocity
    pub fn apply_gravity(&mut self, dt: f32) {
        self.velocity = (self.velocity + GRAVITY * frames(dt)).min(MAX_FALL_VELOCITY);
    }

    /// Move by the current velocity and clamp to the floor and ceiling.
    ///
    /// Returns true when the bird went below the floor this step.
    pub fn integrate(&mut self, dt: f32) -> bool {
        self.y -= self.velocity * frames(dt);

        if self.y < FLOOR_Y {
            self.y = FLOOR_Y;
            true
        } else {
            if self.y > CEILING_Y {
                self.y = CEILING_Y;
            }
            false
        }
    }

    pub fn on_floor(&self) -> bool {
        self.y <= FLOOR_Y
    }

    pub fn nose_down(&self) -> bool {
        self.rotation >= MAX_TILT
    }

    /// Ping-pong the wing frame 0→1→2→1→0 every `interval` frame ticks
    pub fn advance_wing_frame(&mut self, dt: f32, interval: f32) {
        if self.wing_ticks >= interval {
            if self.wing_backward {
                self.wing = self.wing.saturating_sub(1);
                if self.wing == 0 {
                    self.wing_backward = false;
                }
            } else {
                self.wing = (self.wing + 1).min(WING_FRAMES - 1);
                if self.wing == WING_FRAMES - 1 {
                    self.wing_backward = true;
                }
            }
            self.wing_ticks = 0.0;
        }
        self.wing_ticks += frames(dt);
    }

    /// In-flight attitude: dive when falling fast, otherwise flap and spring
    /// back toward a slight nose-up angle
    pub fn tilt(&mut self, dt: f32) {
        if self.velocity > DIVE_VELOCITY {
            self.dive(dt);
            self.wing = 1;
        } else {
            self.advance_wing_frame(dt, WING_INTERVAL_PLAYING);
            let keep = (1.0 - RECOVER_FACTOR).powf(frames(dt));
            self.rotation += (NOSE_UP_ANGLE - self.rotation) * (1.0 - keep);
        }
        self.rotation = self.rotation.clamp(-MAX_TILT, MAX_TILT);
    }

    /// Rotate toward straight down at a constant rate
    pub fn dive(&mut self, dt: f32) {
        self.rotation = (self.rotation + DIVE_ROTATION_STEP * frames(dt)).min(MAX_TILT);
    }

    /// Idle triangle-wave bobbing between `base ± BOB_RANGE / 2`
    pub fn bob(&mut self, dt: f32, base: f32) {
        let step = BOB_STEP * frames(dt);
        let top = base + BOB_RANGE / 2.0;
        let bottom = base - BOB_RANGE / 2.0;

        if self.bob_up {
            self.y += step;
            if self.y > top {
                self.bob_up = false;
                self.y = top;
            }
        } else {
            self.y -= step;
            if self.y < bottom {
                self.bob_up = true;
                self.y = bottom;
            }
        }
        self.advance_wing_frame(dt, WING_INTERVAL_IDLE);
    }
}
