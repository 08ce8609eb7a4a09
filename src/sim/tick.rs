//! Per-frame simulation and input handling
//!
//! `tick` advances the game by one display frame. When a scripted sequence
//! owns the frame it drives the page update instead of the stage's normal
//! loop, and its completion decides the next transition.

use glam::Vec2;

use super::collision::overlaps;
use super::layout::{Medal, Rect, Sprite, Viewport};
use super::sequence::{SequenceKind, Step};
use super::state::{GameEvent, GameOverPhase, GameState, SoundCue, Stage};
use crate::consts::*;

/// Start/restart button rectangle (the click target on title and end screens)
pub fn start_button_rect(viewport: &Viewport, pressed: bool) -> Rect {
    let offset = if pressed { -0.237 } else { -0.23 };
    viewport.locate(Sprite::StartButton, 0.0, offset)
}

/// Screen rectangle of the bird before rotation
pub fn bird_rect(state: &GameState) -> Rect {
    let sprite = Sprite::Bird {
        costume: state.bird.costume,
        wing: state.bird.wing,
    };
    state.viewport.locate(sprite, state.bird.x, state.bird.y)
}

/// Advance the game by one frame of `dt` seconds
pub fn tick(state: &mut GameState, dt: f32) {
    state.elapsed = dt;

    if state.paused() {
        run_sequence(state, dt);
        return;
    }

    match state.stage {
        Stage::Init => update_init(state, dt),
        Stage::Ready => update_ready(state, dt),
        Stage::Playing => update_playing(state, dt),
        Stage::GameOver(_) => update_game_over(state, dt),
    }
}

/// Pointer pressed at `(x, y)` in surface pixels
///
/// Returns true when the press did something.
pub fn handle_pointer_down(state: &mut GameState, x: f32, y: f32) -> bool {
    let point = Vec2::new(x, y);
    match state.stage {
        Stage::Init if !state.paused() => {
            if start_button_rect(&state.viewport, false).contains(point) {
                state.begin(SequenceKind::StartFadeOut);
                return true;
            }
        }
        Stage::Ready | Stage::Playing => return handle_tap(state),
        Stage::GameOver(GameOverPhase::Settled) if !state.paused() => {
            if start_button_rect(&state.viewport, false).contains(point) {
                state.begin(SequenceKind::RestartFadeOut);
                return true;
            }
        }
        _ => {}
    }
    log::debug!("Pointer ({x}, {y}) ignored in {:?}", state.stage);
    false
}

/// Tap anywhere / flap key: start the round from Ready, flap while Playing
pub fn handle_tap(state: &mut GameState) -> bool {
    match state.stage {
        Stage::Ready if !state.paused() => {
            start_playing(state);
            true
        }
        Stage::Playing => {
            flap(state);
            true
        }
        _ => false,
    }
}

fn flap(state: &mut GameState) {
    state.bird.flap();
    state.play(SoundCue::Flap);
}

fn start_playing(state: &mut GameState) {
    state.set_stage(Stage::Playing);
    let mut obstacles = std::mem::take(&mut state.obstacles);
    obstacles.randomize_gaps(state.rng());
    state.obstacles = obstacles;
    flap(state);
    state.begin(SequenceKind::OverlayFadeOut);
}

fn update_init(state: &mut GameState, dt: f32) {
    state.bird.bob(dt, INIT_BOB_BASE);
    state.ground.advance(dt);
}

fn update_ready(state: &mut GameState, dt: f32) {
    state.bird.bob(dt, READY_BOB_BASE);
    state.ground.advance(dt);
}

fn update_playing(state: &mut GameState, dt: f32) {
    let mut obstacles = std::mem::take(&mut state.obstacles);
    let passed = obstacles.advance(dt, state.rng());
    state.obstacles = obstacles;
    for _ in 0..passed {
        state.score += 1;
        state.play(SoundCue::Score);
        state.emit(GameEvent::Scored(state.score));
    }

    state.bird.apply_gravity(dt);
    if state.bird.integrate(dt) {
        enter_game_over(state);
        return;
    }
    state.bird.tilt(dt);
    state.ground.advance(dt);

    if hits_obstacle(state) {
        enter_game_over(state);
    }
}

/// Rotated bird against every obstacle segment
pub fn hits_obstacle(state: &GameState) -> bool {
    let bird = bird_rect(state);
    let rotation = state.bird.rotation.to_degrees();
    state
        .obstacles
        .segments(&state.viewport)
        .iter()
        .any(|(_, segment)| overlaps(&bird, segment, rotation, 0.0))
}

fn enter_game_over(state: &mut GameState) {
    if matches!(state.stage, Stage::GameOver(_)) {
        return;
    }
    log::info!("Crashed with score {}", state.score);
    state.play(SoundCue::Hit);
    state.set_stage(Stage::GameOver(GameOverPhase::Flash));
    state.begin(SequenceKind::Flash);
}

fn update_game_over(state: &mut GameState, dt: f32) {
    let Stage::GameOver(phase) = state.stage else {
        return;
    };
    match phase {
        GameOverPhase::Flash => {
            // Already on the ground: finish turning nose-down in place
            if state.bird.on_floor() && !state.bird.nose_down() {
                state.bird.dive(dt);
            }
        }
        GameOverPhase::Fall => {
            state.bird.apply_gravity(dt);
            state.bird.integrate(dt);
            state.bird.dive(dt);
        }
        GameOverPhase::Settled => {
            if Medal::for_score(state.score).is_some() {
                let mut glitter = std::mem::take(&mut state.glitter);
                glitter.advance(dt, state.rng());
                state.glitter = glitter;
            }
        }
        GameOverPhase::Banner | GameOverPhase::Board | GameOverPhase::Tally => {}
    }
}

fn run_sequence(state: &mut GameState, dt: f32) {
    let Some(mut sequence) = state.sequence.take() else {
        return;
    };

    let step = sequence.step(dt);
    if step == Step::Started {
        if let Some(cue) = sequence.kind.start_cue() {
            state.play(cue);
        }
    }

    match sequence.kind {
        SequenceKind::StartFadeOut => update_init(state, dt),
        SequenceKind::ReadyFadeIn => update_ready(state, dt),
        SequenceKind::OverlayFadeOut => update_playing(state, dt),
        _ => update_game_over(state, dt),
    }

    // The page update started a newer sequence (crash during the overlay fade)
    if state.sequence.is_some() {
        return;
    }

    let finished = match sequence.kind {
        SequenceKind::Fall => state.bird.on_floor() && state.bird.nose_down(),
        _ => step == Step::Finished,
    };

    if finished {
        finish_sequence(state, sequence.kind);
    } else {
        state.sequence = Some(sequence);
    }
}

/// Transition taken when a sequence of the given kind completes
fn finish_sequence(state: &mut GameState, kind: SequenceKind) {
    match kind {
        SequenceKind::StartFadeOut => {
            state.randomize_look();
            state.bird.reset_for_round();
            state.set_stage(Stage::Ready);
            state.begin(SequenceKind::ReadyFadeIn);
        }
        SequenceKind::ReadyFadeIn | SequenceKind::OverlayFadeOut => {}
        SequenceKind::Flash => {
            state.bird.wing = 1;
            if !state.bird.on_floor() {
                state.play(SoundCue::Die);
            }
            state.set_stage(Stage::GameOver(GameOverPhase::Fall));
            state.begin(SequenceKind::Fall);
        }
        SequenceKind::Fall => {
            state.set_stage(Stage::GameOver(GameOverPhase::Banner));
            state.begin(SequenceKind::Banner);
        }
        SequenceKind::Banner => {
            state.set_stage(Stage::GameOver(GameOverPhase::Board));
            state.begin(SequenceKind::Board);
        }
        SequenceKind::Board => {
            state.set_stage(Stage::GameOver(GameOverPhase::Tally));
            state.begin(SequenceKind::Tally);
        }
        SequenceKind::Tally => {
            if state.score > state.best_score {
                log::info!("New best score {} (was {})", state.score, state.best_score);
                state.best_score = state.score;
                state.broke_record = true;
                state.emit(GameEvent::NewRecord(state.score));
            }
            let mut glitter = std::mem::take(&mut state.glitter);
            glitter.relocate(state.rng());
            state.glitter = glitter;
            state.set_stage(Stage::GameOver(GameOverPhase::Settled));
        }
        SequenceKind::RestartFadeOut => {
            state.reset_round();
            state.set_stage(Stage::Ready);
            state.begin(SequenceKind::ReadyFadeIn);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = DEFAULT_FRAME_DT;

    fn run_until(state: &mut GameState, max_frames: usize, done: impl Fn(&GameState) -> bool) {
        for _ in 0..max_frames {
            if done(state) {
                return;
            }
            tick(state, DT);
        }
        assert!(done(state), "condition not reached, stage {:?}", state.stage);
    }

    fn press_start(state: &mut GameState) -> bool {
        let center = start_button_rect(&state.viewport, false).center();
        handle_pointer_down(state, center.x, center.y)
    }

    /// A state on the ready screen with no sequence running
    fn ready_state(seed: u64, best: u32) -> GameState {
        let mut state = GameState::new(seed, best);
        assert!(press_start(&mut state));
        run_until(&mut state, 200, |s| s.stage == Stage::Ready && !s.paused());
        state.drain_events();
        state
    }

    /// A state mid-round, overlay fade finished
    fn playing_state(seed: u64, best: u32) -> GameState {
        let mut state = ready_state(seed, best);
        assert!(handle_tap(&mut state));
        run_until(&mut state, 100, |s| !s.paused());
        state.drain_events();
        state
    }

    fn crash_on_floor(state: &mut GameState) {
        state.bird.y = FLOOR_Y + 0.001;
        state.bird.velocity = MAX_FALL_VELOCITY;
        tick(state, DT);
    }

    fn stage_changes(events: &[GameEvent]) -> Vec<Stage> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::StageChanged(stage) => Some(*stage),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_init_bobs_and_scrolls() {
        let mut state = GameState::new(3, 0);
        let ground = state.ground.offsets[0];
        for _ in 0..30 {
            tick(&mut state, DT);
        }
        assert_eq!(state.stage, Stage::Init);
        assert_eq!(state.elapsed, DT);
        assert!(state.ground.offsets[0] > ground);
        assert!(state.bird.y.abs() <= BOB_RANGE / 2.0 + 1e-6);
    }

    #[test]
    fn test_pointer_outside_start_button_is_ignored() {
        let mut state = GameState::new(3, 0);
        assert!(!handle_pointer_down(&mut state, 1.0, 1.0));
        assert!(!state.paused());
        assert_eq!(state.stage, Stage::Init);
    }

    #[test]
    fn test_start_fades_into_ready() {
        let mut state = GameState::new(3, 0);
        assert!(press_start(&mut state));
        assert_eq!(
            state.sequence.as_ref().map(|s| s.kind),
            Some(SequenceKind::StartFadeOut)
        );
        // Second press while fading does nothing
        assert!(!press_start(&mut state));

        run_until(&mut state, 100, |s| s.stage == Stage::Ready);
        assert_eq!(
            state.sequence.as_ref().map(|s| s.kind),
            Some(SequenceKind::ReadyFadeIn)
        );
        assert_eq!(state.bird.x, BIRD_X);

        run_until(&mut state, 100, |s| !s.paused());
        assert_eq!(state.stage, Stage::Ready);
    }

    #[test]
    fn test_tap_ignored_during_ready_fade_in() {
        let mut state = GameState::new(3, 0);
        press_start(&mut state);
        run_until(&mut state, 100, |s| s.stage == Stage::Ready);
        assert!(state.paused());
        assert!(!handle_tap(&mut state));
        assert_eq!(state.stage, Stage::Ready);
    }

    #[test]
    fn test_ready_tap_starts_playing_with_flap() {
        let mut state = ready_state(5, 0);
        assert!(handle_pointer_down(&mut state, 0.0, 0.0));

        assert_eq!(state.stage, Stage::Playing);
        assert_eq!(state.bird.velocity, FLAP_VELOCITY);
        assert_eq!(
            state.sequence.as_ref().map(|s| s.kind),
            Some(SequenceKind::OverlayFadeOut)
        );
        for column in state.obstacles.columns {
            assert!(column.gap_y >= GAP_MIN_Y && column.gap_y < GAP_MAX_Y);
        }
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Sound(SoundCue::Flap)));

        // Physics runs under the overlay fade and taps still flap
        tick(&mut state, DT);
        assert!(state.bird.velocity > FLAP_VELOCITY);
        assert!(handle_tap(&mut state));
        assert_eq!(state.bird.velocity, FLAP_VELOCITY);
    }

    #[test]
    fn test_crash_during_overlay_fade_replaces_sequence() {
        let mut state = ready_state(9, 0);
        assert!(handle_tap(&mut state));
        assert_eq!(
            state.sequence.as_ref().map(|s| s.kind),
            Some(SequenceKind::OverlayFadeOut)
        );

        crash_on_floor(&mut state);
        assert_eq!(state.stage, Stage::GameOver(GameOverPhase::Flash));
        assert_eq!(
            state.sequence.as_ref().map(|s| s.kind),
            Some(SequenceKind::Flash)
        );

        run_until(&mut state, 1_000, |s| {
            s.stage == Stage::GameOver(GameOverPhase::Settled)
        });
        assert!(!state.paused());
    }

    #[test]
    fn test_floor_crash_runs_game_over_phases_in_order() {
        let mut state = playing_state(11, 5);
        crash_on_floor(&mut state);
        assert_eq!(state.stage, Stage::GameOver(GameOverPhase::Flash));
        assert!(state.paused());

        run_until(&mut state, 1_000, |s| {
            s.stage == Stage::GameOver(GameOverPhase::Settled)
        });
        assert!(!state.paused());

        let events = state.drain_events();
        assert_eq!(
            stage_changes(&events),
            vec![
                Stage::GameOver(GameOverPhase::Flash),
                Stage::GameOver(GameOverPhase::Fall),
                Stage::GameOver(GameOverPhase::Banner),
                Stage::GameOver(GameOverPhase::Board),
                Stage::GameOver(GameOverPhase::Tally),
                Stage::GameOver(GameOverPhase::Settled),
            ]
        );
        assert_eq!(events[0], GameEvent::Sound(SoundCue::Hit));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::NewRecord(_))));
        // Bird was already down, so no die cue
        assert!(!events.contains(&GameEvent::Sound(SoundCue::Die)));
        let swooshes = events
            .iter()
            .filter(|e| **e == GameEvent::Sound(SoundCue::Swoosh))
            .count();
        assert_eq!(swooshes, 2);

        assert_eq!(state.best_score, 5);
        assert!(!state.broke_record);
        assert!(state.bird.on_floor());
        assert!(state.bird.nose_down());
    }

    #[test]
    fn test_airborne_crash_plays_die_and_falls() {
        let mut state = playing_state(12, 0);
        // Drop an obstacle segment right onto the bird
        state.obstacles.columns[0].x = BIRD_X;
        state.obstacles.columns[0].gap_y = GAP_MAX_Y;
        state.bird.y = BIRD_START_Y;
        state.bird.velocity = 0.0;
        assert!(hits_obstacle(&state));

        tick(&mut state, DT);
        assert_eq!(state.stage, Stage::GameOver(GameOverPhase::Flash));

        run_until(&mut state, 1_000, |s| {
            s.stage == Stage::GameOver(GameOverPhase::Banner)
        });
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Sound(SoundCue::Die)));
        assert!(state.bird.on_floor());
    }

    #[test]
    fn test_open_gap_is_not_a_collision() {
        let mut state = playing_state(12, 0);
        state.obstacles.columns[0].x = BIRD_X;
        state.obstacles.columns[0].gap_y = GAP_MIN_Y;
        state.bird.y = BIRD_START_Y;
        state.bird.rotation = 0.0;
        assert!(!hits_obstacle(&state));
    }

    #[test]
    fn test_new_record_updates_best() {
        let mut state = playing_state(13, 7);
        state.score = 12;
        crash_on_floor(&mut state);
        run_until(&mut state, 1_000, |s| {
            s.stage == Stage::GameOver(GameOverPhase::Settled)
        });

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::NewRecord(12)));
        assert_eq!(state.best_score, 12);
        assert!(state.broke_record);
    }

    #[test]
    fn test_equal_score_is_not_a_record() {
        let mut state = playing_state(13, 7);
        state.score = 7;
        crash_on_floor(&mut state);
        run_until(&mut state, 1_000, |s| {
            s.stage == Stage::GameOver(GameOverPhase::Settled)
        });
        assert_eq!(state.best_score, 7);
        assert!(!state.broke_record);
    }

    #[test]
    fn test_input_ignored_until_settled() {
        let mut state = playing_state(14, 0);
        crash_on_floor(&mut state);
        run_until(&mut state, 1_000, |s| {
            s.stage == Stage::GameOver(GameOverPhase::Board)
        });
        assert!(!press_start(&mut state));
        assert!(!handle_tap(&mut state));
        assert_eq!(state.stage, Stage::GameOver(GameOverPhase::Board));
    }

    #[test]
    fn test_restart_resets_round() {
        let mut state = playing_state(15, 0);
        state.score = 3;
        crash_on_floor(&mut state);
        run_until(&mut state, 1_000, |s| {
            s.stage == Stage::GameOver(GameOverPhase::Settled)
        });
        assert_eq!(state.best_score, 3);

        // Outside the button: nothing
        assert!(!handle_pointer_down(&mut state, 0.0, 0.0));
        assert!(press_start(&mut state));
        assert!(!press_start(&mut state));

        run_until(&mut state, 200, |s| s.stage == Stage::Ready && !s.paused());
        assert_eq!(state.score, 0);
        assert!(!state.broke_record);
        assert_eq!(state.best_score, 3);
        assert!((state.bird.y - READY_BOB_BASE).abs() <= BOB_RANGE / 2.0 + 1e-6);
        assert_eq!(state.bird.velocity, 0.0);
        assert_eq!(state.bird.rotation, 0.0);
        assert!(state.obstacles.columns.iter().all(|c| c.credit));
        assert_eq!(state.obstacles.columns[1].x, OBSTACLE_START_X[1]);
    }

    #[test]
    fn test_passing_a_column_scores_once() {
        let mut state = playing_state(16, 0);
        state.obstacles.columns[0].x = SCORE_THRESHOLD_X - 0.001;
        state.obstacles.columns[0].gap_y = GAP_MIN_Y;
        state.bird.y = -0.1;
        state.bird.velocity = FLAP_VELOCITY;

        tick(&mut state, DT);
        tick(&mut state, DT);
        tick(&mut state, DT);

        assert_eq!(state.score, 1);
        let events = state.drain_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| **e == GameEvent::Sound(SoundCue::Score))
                .count(),
            1
        );
        assert!(events.contains(&GameEvent::Scored(1)));
    }

    #[test]
    fn test_settled_glitter_animates_with_medal() {
        let mut state = playing_state(17, 0);
        state.score = 25;
        crash_on_floor(&mut state);
        run_until(&mut state, 1_000, |s| {
            s.stage == Stage::GameOver(GameOverPhase::Settled)
        });
        let start = state.glitter.clone();
        for _ in 0..60 {
            tick(&mut state, DT);
        }
        assert_ne!(state.glitter, start);
    }

    #[test]
    fn test_determinism() {
        let run = |seed| {
            let mut state = playing_state(seed, 0);
            for i in 0..300 {
                if i % 20 == 0 {
                    handle_tap(&mut state);
                }
                tick(&mut state, DT);
            }
            (state.stage, state.score, state.bird.y, state.obstacles.clone())
        };
        assert_eq!(run(99), run(99));
    }
}
