//! Game state and core simulation types
//!
//! One `GameState` lives for the whole session. Round-scoped parts (bird,
//! obstacles, score) are reset in place between rounds.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bird::Bird;
use super::layout::Viewport;
use super::scenery::{Glitter, GroundScroller, ObstaclePair};
use super::sequence::{Sequence, SequenceKind};
use crate::consts::*;

/// Sub-phases of the end-of-round sequence, in the order they play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverPhase {
    Flash,
    Fall,
    Banner,
    Board,
    Tally,
    /// Final end screen, waiting for a restart
    Settled,
}

/// Current stage of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Title screen with the start button
    Init,
    /// Instructions shown, waiting for the first tap
    Ready,
    /// Active gameplay
    Playing,
    GameOver(GameOverPhase),
}

/// Named sound cues played by the audio layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Flap,
    Swoosh,
    Score,
    Hit,
    Die,
}

/// Side effects the simulation asks the outside world to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Sound(SoundCue),
    StageChanged(Stage),
    /// Bird passed a column; carries the new score
    Scored(u32),
    /// Round ended above the stored best; carries the new best
    NewRecord(u32),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    rng: Pcg32,
    pub stage: Stage,
    /// Round score
    pub score: u32,
    /// Best score across sessions
    pub best_score: u32,
    /// The last round beat the previous best
    pub broke_record: bool,
    /// Scripted sequence currently owning the frame
    pub sequence: Option<Sequence>,
    /// Seconds simulated by the last frame
    pub elapsed: f32,
    /// Background variant for the round
    pub background: u8,
    pub bird: Bird,
    pub obstacles: ObstaclePair,
    pub ground: GroundScroller,
    pub glitter: Glitter,
    /// Surface size used for layout and collision
    pub viewport: Viewport,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create the session state on the title screen
    pub fn new(seed: u64, best_score: u32) -> Self {
        let mut state = Self {
            rng: Pcg32::seed_from_u64(seed),
            stage: Stage::Init,
            score: 0,
            best_score,
            broke_record: false,
            sequence: None,
            elapsed: 0.0,
            background: 0,
            bird: Bird::new(),
            obstacles: ObstaclePair::new(),
            ground: GroundScroller::default(),
            glitter: Glitter::default(),
            viewport: Viewport::default(),
            events: Vec::new(),
        };
        state.randomize_look();
        state
    }

    /// True while a scripted sequence owns the frame
    pub fn paused(&self) -> bool {
        self.sequence.is_some()
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn play(&mut self, cue: SoundCue) {
        self.emit(GameEvent::Sound(cue));
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn set_stage(&mut self, stage: Stage) {
        if self.stage != stage {
            log::info!("Stage {:?} -> {:?}", self.stage, stage);
            self.stage = stage;
            self.emit(GameEvent::StageChanged(stage));
        }
    }

    /// Start a scripted sequence, replacing any that is still running
    pub fn begin(&mut self, kind: SequenceKind) {
        if let Some(previous) = &self.sequence {
            log::debug!("Sequence {:?} replaced by {:?}", previous.kind, kind);
        }
        let sequence = Sequence::new(kind);
        if !sequence.holding() {
            if let Some(cue) = kind.start_cue() {
                self.play(cue);
            }
        }
        self.sequence = Some(sequence);
    }

    /// Pick a background and bird costume for the next round
    pub fn randomize_look(&mut self) {
        self.background = self.rng.random_range(0..BACKGROUNDS);
        self.bird.costume = self.rng.random_range(0..COSTUMES);
    }

    /// Reset everything that belongs to a single round
    pub fn reset_round(&mut self) {
        self.score = 0;
        self.broke_record = false;
        self.bird.reset_for_round();
        self.obstacles.reset();
        self.randomize_look();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_on_title() {
        let state = GameState::new(1, 7);
        assert_eq!(state.stage, Stage::Init);
        assert_eq!(state.score, 0);
        assert_eq!(state.best_score, 7);
        assert!(!state.paused());
        assert!(state.background < BACKGROUNDS);
        assert!(state.bird.costume < COSTUMES);
    }

    #[test]
    fn test_same_seed_same_look() {
        let a = GameState::new(42, 0);
        let b = GameState::new(42, 0);
        assert_eq!(a.background, b.background);
        assert_eq!(a.bird.costume, b.bird.costume);
    }

    #[test]
    fn test_begin_emits_start_cue_and_pauses() {
        let mut state = GameState::new(1, 0);
        state.begin(SequenceKind::StartFadeOut);
        assert!(state.paused());
        assert_eq!(state.drain_events(), vec![GameEvent::Sound(SoundCue::Swoosh)]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_held_sequence_defers_cue() {
        let mut state = GameState::new(1, 0);
        state.begin(SequenceKind::Board);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_set_stage_emits_only_on_change() {
        let mut state = GameState::new(1, 0);
        state.set_stage(Stage::Init);
        assert!(state.drain_events().is_empty());
        state.set_stage(Stage::Ready);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::StageChanged(Stage::Ready)]
        );
    }

    #[test]
    fn test_reset_round_clears_round_state() {
        let mut state = GameState::new(1, 0);
        state.score = 14;
        state.broke_record = true;
        state.bird.velocity = 0.02;
        state.bird.rotation = 1.0;
        state.obstacles.columns[0].x = 0.3;
        state.obstacles.columns[0].credit = false;

        state.reset_round();

        assert_eq!(state.score, 0);
        assert!(!state.broke_record);
        assert_eq!(state.bird.x, BIRD_X);
        assert_eq!(state.bird.y, BIRD_START_Y);
        assert_eq!(state.bird.velocity, 0.0);
        assert_eq!(state.bird.rotation, 0.0);
        assert_eq!(state.obstacles.columns[0].x, OBSTACLE_START_X[0]);
        assert!(state.obstacles.columns[0].credit);
    }
}
