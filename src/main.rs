//! Skyflap entry point
//!
//! In the browser this wires the canvas, input and animation-frame loop. The
//! native build plays a headless autopilot round through the whole stage
//! machine and keeps the best score in a text file.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use skyflap::audio::AudioPlayer;
    use skyflap::persistence::LocalStorageStore;
    use skyflap::render::canvas::{CanvasSurface, load_sprites};
    use skyflap::sim::GameEvent;
    use skyflap::{Game, Settings};

    /// Everything the browser callbacks share
    struct App {
        game: Game<LocalStorageStore>,
        surface: CanvasSurface,
        audio: AudioPlayer,
        settings: Settings,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            for event in self.game.frame(time, &mut self.surface) {
                match event {
                    GameEvent::Sound(cue) => self.audio.play(cue),
                    GameEvent::NewRecord(best) => log::info!("New record: {best}"),
                    _ => {}
                }
            }
        }

        fn toggle_mute(&mut self) {
            self.settings.toggle_mute();
            self.settings.save();
            self.audio.apply_settings(&self.settings);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Skyflap starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Fill the window height, keeping the 288:512 playfield aspect
        let dpr = window.device_pixel_ratio();
        let inner_w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(288.0);
        let inner_h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(512.0);
        let css_h = inner_h.min(inner_w * 512.0 / 288.0);
        let css_w = css_h * 288.0 / 512.0;
        canvas.set_width((css_w * dpr) as u32);
        canvas.set_height((css_h * dpr) as u32);

        let sprites = load_sprites().await.expect("Failed to load sprites");
        let surface = CanvasSurface::new(canvas.clone(), sprites).expect("Failed to get 2d context");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            game: Game::new(seed, LocalStorageStore),
            surface,
            audio: AudioPlayer::new(&settings),
            settings,
        }));

        setup_input_handlers(&canvas, app.clone());
        request_animation_frame(app);

        log::info!("Skyflap running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Pointer (mouse and touch), scaled from CSS pixels to canvas pixels
        {
            let app = app.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let rect = target.get_bounding_client_rect();
                if rect.width() <= 0.0 || rect.height() <= 0.0 {
                    return;
                }
                let sx = target.width() as f64 / rect.width();
                let sy = target.height() as f64 / rect.height();
                let x = (event.client_x() as f64 - rect.left()) * sx;
                let y = (event.client_y() as f64 - rect.top()) * sy;

                let mut a = app.borrow_mut();
                a.audio.resume();
                if a.game.pointer_down(x as f32, y as f32) {
                    event.prevent_default();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                match event.key().as_str() {
                    " " | "Enter" | "ArrowUp" => {
                        event.prevent_default();
                        if event.repeat() {
                            return;
                        }
                        a.audio.resume();
                        a.game.tap();
                    }
                    "m" | "M" => a.toggle_mute(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use skyflap::consts::{BIRD_X, REFERENCE_WIDTH};
    use skyflap::persistence::BestScoreStore;
    use skyflap::render::NullSurface;
    use skyflap::sim::{GameEvent, GameOverPhase, GameState, Sprite, Stage, start_button_rect};
    use skyflap::Game;

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Hard stop so a lucky autopilot cannot run forever
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    /// Horizontal distance, as a fraction of the viewport width, at which a
    /// column and the bird stop overlapping
    fn clearance() -> f32 {
        let column = Sprite::ObstacleTop.native_size().x;
        let bird = Sprite::Bird { costume: 0, wing: 0 }.native_size().x;
        (column + bird) / 2.0 / REFERENCE_WIDTH
    }

    /// Vertical offset the bird should hold to thread the next opening
    fn target_y(state: &GameState) -> f32 {
        // Columns move toward +x; the next one is the furthest-left column
        // that has not fully passed the bird
        let reach = BIRD_X + clearance();
        state
            .obstacles
            .columns
            .iter()
            .filter(|c| c.x < reach)
            .max_by(|a, b| a.x.total_cmp(&b.x))
            .map(|c| c.gap_y + state.obstacles.gap_height / 2.0)
            .unwrap_or(0.0)
    }

    fn wants_flap(state: &GameState) -> bool {
        state.bird.velocity >= 0.0 && state.bird.y < target_y(state) - 0.03
    }

    /// Play one round, giving up once `stop_at` points are reached
    pub fn play<S: BestScoreStore>(game: &mut Game<S>, stop_at: u32) {
        let mut surface = NullSurface::default();
        let mut now = 0.0;

        for _ in 0..MAX_FRAMES {
            let state = &game.state;
            match state.stage {
                Stage::Init if !state.paused() => {
                    let center = start_button_rect(&state.viewport, false).center();
                    game.pointer_down(center.x, center.y);
                }
                Stage::Ready if !state.paused() => {
                    game.tap();
                }
                Stage::Playing if state.score < stop_at && wants_flap(state) => {
                    game.tap();
                }
                Stage::GameOver(GameOverPhase::Settled) => break,
                _ => {}
            }

            now += FRAME_MS;
            for event in game.frame(now, &mut surface) {
                match event {
                    GameEvent::Scored(score) => log::debug!("Scored {score}"),
                    GameEvent::NewRecord(best) => log::info!("New record: {best}"),
                    _ => {}
                }
            }
        }

        log::info!(
            "Round over in {:?}: score {}, best {}",
            game.state.stage,
            game.state.score,
            game.state.best_score
        );
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use skyflap::persistence::MemoryStore;

        fn with_columns(xs: [f32; 2], gaps: [f32; 2]) -> GameState {
            let mut state = GameState::new(3, 0);
            for ((column, x), gap_y) in state.obstacles.columns.iter_mut().zip(xs).zip(gaps) {
                column.x = x;
                column.gap_y = gap_y;
            }
            state
        }

        #[test]
        fn test_clearance_covers_column_and_bird() {
            let expected = (52.0 + 34.0) / 2.0 / 288.0;
            assert!((clearance() - expected).abs() < 1e-6);
            assert!(clearance() > 0.14);
        }

        #[test]
        fn test_targets_column_still_overlapping_bird() {
            // Overlapping the bird horizontally, not yet cleared
            let state = with_columns([BIRD_X + 0.12, BIRD_X - 0.5], [-0.3, -0.4]);
            let expected = -0.3 + state.obstacles.gap_height / 2.0;
            assert!((target_y(&state) - expected).abs() < 1e-6);
        }

        #[test]
        fn test_retargets_once_column_cleared() {
            let state = with_columns([BIRD_X + 0.2, BIRD_X - 0.4], [-0.3, -0.4]);
            let expected = -0.4 + state.obstacles.gap_height / 2.0;
            assert!((target_y(&state) - expected).abs() < 1e-6);
        }

        #[test]
        fn test_play_ends_settled_without_flaps() {
            let mut game = Game::new(5, MemoryStore::default());
            play(&mut game, 0);
            assert_eq!(game.state.stage, Stage::GameOver(GameOverPhase::Settled));
            assert_eq!(game.state.score, 0);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use skyflap::Game;
    use skyflap::persistence::FileStore;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Skyflap (native) starting headless autopilot...");

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "skyflap_best.txt".to_string());
    let stop_at = args.next().and_then(|s| s.parse().ok()).unwrap_or(10);

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    let mut game = Game::new(seed, FileStore::new(path));
    autopilot::play(&mut game, stop_at);
}
