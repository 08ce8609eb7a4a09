//! Scripted sequences
//!
//! A sequence is a fixed-length timed ramp (fade, flash, slide-in) that owns
//! the frame while it runs. Its frame counter advances by `dt * 60` per frame
//! so the real duration is the same at any refresh rate. What happens when a
//! sequence completes is decided by its kind (see `tick::finish_sequence`).

use super::state::SoundCue;
use crate::consts::*;
use crate::frames;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    /// Start screen fades to black after the start button is pressed
    StartFadeOut,
    /// Black fades away to reveal the ready screen
    ReadyFadeIn,
    /// Instructions fade out while play has already begun
    OverlayFadeOut,
    /// White flash after a crash
    Flash,
    /// Bird drops to the ground; ends on a condition, not a frame count
    Fall,
    /// "Game Over" banner fades and bobs in
    Banner,
    /// Score board slides up after a short hold
    Board,
    /// Round score counts up on the board
    Tally,
    /// End screen fades to black before the next round
    RestartFadeOut,
}

impl SequenceKind {
    /// Length of the ramp in 60 Hz frames
    pub fn frame_threshold(self) -> f32 {
        match self {
            SequenceKind::StartFadeOut => START_FADE_FRAMES,
            SequenceKind::ReadyFadeIn => READY_FADE_FRAMES,
            SequenceKind::OverlayFadeOut => OVERLAY_FADE_FRAMES,
            SequenceKind::Flash => FLASH_FRAMES,
            SequenceKind::Fall => f32::INFINITY,
            SequenceKind::Banner => BANNER_FRAMES,
            SequenceKind::Board => BOARD_FRAMES,
            SequenceKind::Tally => TALLY_FRAMES,
            SequenceKind::RestartFadeOut => RESTART_FADE_FRAMES,
        }
    }

    /// Frames to wait before the ramp starts
    pub fn hold_frames(self) -> f32 {
        match self {
            SequenceKind::Board => BOARD_HOLD_FRAMES,
            _ => 0.0,
        }
    }

    /// Sound played when the ramp starts
    pub fn start_cue(self) -> Option<SoundCue> {
        match self {
            SequenceKind::StartFadeOut
            | SequenceKind::RestartFadeOut
            | SequenceKind::Banner
            | SequenceKind::Board => Some(SoundCue::Swoosh),
            _ => None,
        }
    }
}

/// Outcome of advancing a sequence by one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Still waiting out the hold
    Holding,
    /// The hold just ended and the ramp begins
    Started,
    Running,
    /// Frame counter went past the threshold
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    pub kind: SequenceKind,
    pub frame: f32,
    pub threshold: f32,
    pub hold: f32,
}

impl Sequence {
    pub fn new(kind: SequenceKind) -> Self {
        Self {
            kind,
            frame: 0.0,
            threshold: kind.frame_threshold(),
            hold: kind.hold_frames(),
        }
    }

    pub fn holding(&self) -> bool {
        self.hold > 0.0
    }

    /// Ramp position in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.holding() || !self.threshold.is_finite() {
            return 0.0;
        }
        (self.frame / self.threshold).clamp(0.0, 1.0)
    }

    pub fn step(&mut self, dt: f32) -> Step {
        let ticks = frames(dt);
        if self.holding() {
            self.hold -= ticks;
            if self.hold <= 0.0 {
                self.hold = 0.0;
                return Step::Started;
            }
            return Step::Holding;
        }

        self.frame += ticks;
        if self.frame > self.threshold {
            Step::Finished
        } else {
            Step::Running
        }
    }
}
