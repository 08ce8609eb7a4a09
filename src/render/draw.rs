//! Stage-dependent compositing
//!
//! Back to front: background, obstacles, score, bird, ground, then overlays
//! and full-screen fades.

use super::score::{large_score, small_score};
use super::{Color, Surface};
use crate::sim::{
    GameOverPhase, GameState, Medal, SequenceKind, Sprite, Stage, Viewport, start_button_rect,
};

const LOGO_Y: f32 = 0.2;
const READY_Y: f32 = 0.15;
const TAP_Y: f32 = -0.075;
const BANNER_Y: f32 = 0.2;
const BANNER_BOB: f32 = 0.02;
const MEDAL_POS: (f32, f32) = (0.226, -0.01);
const NEW_BADGE_POS: (f32, f32) = (-0.134, -0.012);
const SCORE_ROW_Y: f32 = 0.03;
const BEST_ROW_Y: f32 = -0.052;

/// Draw one frame of the current state
pub fn render(state: &GameState, surface: &mut dyn Surface) {
    let viewport = state.viewport;
    surface.clear();
    surface.set_alpha(1.0);

    match state.stage {
        Stage::Init => draw_init(state, surface, &viewport),
        Stage::Ready => draw_ready(state, surface, &viewport),
        Stage::Playing => draw_playing(state, surface, &viewport),
        Stage::GameOver(phase) => draw_game_over(state, phase, surface, &viewport),
    }
}

/// Progress of the running sequence if it is of `kind`
fn progress_of(state: &GameState, kind: SequenceKind) -> Option<f32> {
    state
        .sequence
        .as_ref()
        .filter(|s| s.kind == kind)
        .map(|s| s.progress())
}

fn place(surface: &mut dyn Surface, viewport: &Viewport, sprite: Sprite, x: f32, y: f32) {
    surface.draw_sprite(sprite, &viewport.locate(sprite, x, y));
}

fn fade(surface: &mut dyn Surface, viewport: &Viewport, color: Color, alpha: f32) {
    surface.fill_rect(&viewport.bounds(), color, alpha);
}

fn draw_background(state: &GameState, surface: &mut dyn Surface, viewport: &Viewport) {
    place(surface, viewport, Sprite::Background(state.background), 0.0, 0.0);
}

fn draw_ground(state: &GameState, surface: &mut dyn Surface, viewport: &Viewport) {
    for tile in state.ground.tiles(viewport) {
        surface.draw_sprite(Sprite::Ground, &tile);
    }
}

fn draw_obstacles(state: &GameState, surface: &mut dyn Surface, viewport: &Viewport) {
    for (sprite, rect) in state.obstacles.segments(viewport) {
        surface.draw_sprite(sprite, &rect);
    }
}

fn bird_sprite(state: &GameState) -> Sprite {
    Sprite::Bird {
        costume: state.bird.costume,
        wing: state.bird.wing,
    }
}

fn draw_bird(state: &GameState, surface: &mut dyn Surface, viewport: &Viewport, rotated: bool) {
    let sprite = bird_sprite(state);
    let rect = viewport.locate(sprite, state.bird.x, state.bird.y);
    if rotated {
        surface.draw_sprite_rotated(sprite, &rect, state.bird.rotation);
    } else {
        surface.draw_sprite(sprite, &rect);
    }
}

fn draw_large_score(state: &GameState, surface: &mut dyn Surface, viewport: &Viewport) {
    for (sprite, rect) in large_score(state.score, viewport) {
        surface.draw_sprite(sprite, &rect);
    }
}

fn draw_small_score(surface: &mut dyn Surface, viewport: &Viewport, value: u32, y: f32) {
    for (sprite, rect) in small_score(value, y, viewport) {
        surface.draw_sprite(sprite, &rect);
    }
}

fn draw_instructions(surface: &mut dyn Surface, viewport: &Viewport) {
    place(surface, viewport, Sprite::GetReady, 0.0, READY_Y);
    place(surface, viewport, Sprite::TapHint, 0.0, TAP_Y);
}

fn draw_init(state: &GameState, surface: &mut dyn Surface, viewport: &Viewport) {
    let fading = progress_of(state, SequenceKind::StartFadeOut);

    draw_background(state, surface, viewport);
    place(surface, viewport, Sprite::Logo, 0.0, LOGO_Y);
    draw_bird(state, surface, viewport, false);
    let button = start_button_rect(viewport, fading.is_some());
    surface.draw_sprite(Sprite::StartButton, &button);
    draw_ground(state, surface, viewport);

    if let Some(p) = fading {
        fade(surface, viewport, Color::BLACK, p);
    }
}

fn draw_ready(state: &GameState, surface: &mut dyn Surface, viewport: &Viewport) {
    draw_background(state, surface, viewport);
    place(surface, viewport, Sprite::LargeDigit(0), -0.008, 0.35);
    draw_instructions(surface, viewport);
    draw_bird(state, surface, viewport, false);
    draw_ground(state, surface, viewport);

    if let Some(p) = progress_of(state, SequenceKind::ReadyFadeIn) {
        fade(surface, viewport, Color::BLACK, 1.0 - p);
    }
}

fn draw_playing(state: &GameState, surface: &mut dyn Surface, viewport: &Viewport) {
    draw_background(state, surface, viewport);

    if let Some(p) = progress_of(state, SequenceKind::OverlayFadeOut) {
        surface.set_alpha(1.0 - p);
        draw_instructions(surface, viewport);
        surface.set_alpha(1.0);
    }

    draw_obstacles(state, surface, viewport);
    draw_large_score(state, surface, viewport);
    draw_bird(state, surface, viewport, true);
    draw_ground(state, surface, viewport);
}

fn draw_game_over(
    state: &GameState,
    phase: GameOverPhase,
    surface: &mut dyn Surface,
    viewport: &Viewport,
) {
    draw_background(state, surface, viewport);
    draw_obstacles(state, surface, viewport);
    if matches!(phase, GameOverPhase::Flash | GameOverPhase::Fall) {
        draw_large_score(state, surface, viewport);
    }
    draw_bird(state, surface, viewport, true);

    match phase {
        GameOverPhase::Banner => {
            let p = progress_of(state, SequenceKind::Banner).unwrap_or(1.0);
            // Fades in over the first half, bobs up then back down
            let half = p * 2.0;
            let bob = if half > 1.0 { 2.0 - half } else { half };
            surface.set_alpha(half.min(1.0));
            place(surface, viewport, Sprite::GameOver, 0.0, BANNER_Y + BANNER_BOB * bob);
            surface.set_alpha(1.0);
        }
        GameOverPhase::Board | GameOverPhase::Tally | GameOverPhase::Settled => {
            place(surface, viewport, Sprite::GameOver, 0.0, BANNER_Y);
        }
        GameOverPhase::Flash | GameOverPhase::Fall => {}
    }

    if phase == GameOverPhase::Settled {
        let pressed = progress_of(state, SequenceKind::RestartFadeOut).is_some();
        surface.draw_sprite(Sprite::StartButton, &start_button_rect(viewport, pressed));
    }

    draw_ground(state, surface, viewport);

    match phase {
        GameOverPhase::Board => draw_board_sliding(state, surface, viewport),
        GameOverPhase::Tally => {
            place(surface, viewport, Sprite::Board, 0.0, 0.0);
            let p = progress_of(state, SequenceKind::Tally).unwrap_or(1.0);
            let shown = (state.score as f32 * p).floor() as u32;
            draw_small_score(surface, viewport, shown, SCORE_ROW_Y);
            draw_small_score(surface, viewport, state.best_score, BEST_ROW_Y);
        }
        GameOverPhase::Settled => draw_board_settled(state, surface, viewport),
        _ => {}
    }

    if phase == GameOverPhase::Flash {
        let p = progress_of(state, SequenceKind::Flash).unwrap_or(1.0);
        fade(surface, viewport, Color::WHITE, 1.0 - p);
    }
    if let Some(p) = progress_of(state, SequenceKind::RestartFadeOut) {
        fade(surface, viewport, Color::BLACK, p);
    }
}

fn draw_board_sliding(state: &GameState, surface: &mut dyn Surface, viewport: &Viewport) {
    let Some(sequence) = state.sequence.as_ref().filter(|s| s.kind == SequenceKind::Board)
    else {
        return;
    };
    if sequence.holding() {
        return;
    }
    // Ease-out cubic from below the screen
    let offset = -(1.0 - sequence.progress()).powi(3);
    place(surface, viewport, Sprite::Board, 0.0, offset);
    draw_small_score(surface, viewport, 0, offset + SCORE_ROW_Y);
    draw_small_score(surface, viewport, state.best_score, offset + BEST_ROW_Y);
}

fn draw_board_settled(state: &GameState, surface: &mut dyn Surface, viewport: &Viewport) {
    place(surface, viewport, Sprite::Board, 0.0, 0.0);

    if let Some(medal) = Medal::for_score(state.score) {
        place(surface, viewport, Sprite::Medal(medal), MEDAL_POS.0, MEDAL_POS.1);
        place(
            surface,
            viewport,
            Sprite::Glitter(state.glitter.frame()),
            state.glitter.x,
            state.glitter.y,
        );
    }

    draw_small_score(surface, viewport, state.score, SCORE_ROW_Y);
    if state.broke_record {
        place(surface, viewport, Sprite::NewBadge, NEW_BADGE_POS.0, NEW_BADGE_POS.1);
    }
    draw_small_score(surface, viewport, state.best_score, BEST_ROW_Y);
}
