//! JavaScript bindings
//!
//! The page owns the DOM, canvas and audio. It forwards pointer events and
//! animation-frame timestamps here and reads JSON snapshots back.

use wasm_bindgen::prelude::*;

use crate::config::{DodgeConfig, SliceConfig};
use crate::dodge::DodgeGame;
use crate::sim::SliceGame;

/// Install the panic hook and console logger
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    // Already initialized on a second call
    let _ = console_log::init_with_level(log::Level::Info);
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::warn!("Snapshot serialization failed: {e}");
        "null".to_string()
    })
}

fn seed_from_clock() -> u64 {
    js_sys::Date::now() as u64
}

#[wasm_bindgen]
pub struct WebSliceGame {
    game: SliceGame,
}

#[wasm_bindgen]
impl WebSliceGame {
    /// Create a game; `tuning_json` may be empty for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: &str) -> WebSliceGame {
        let config = if tuning_json.trim().is_empty() {
            SliceConfig::default()
        } else {
            SliceConfig::load_or_default(tuning_json)
        };
        let seed = seed_from_clock();
        log::info!("Game initialized with seed: {}", seed);
        WebSliceGame {
            game: SliceGame::new(seed, config),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.game.resize(width, height);
    }

    pub fn start(&mut self) {
        self.game.start();
    }

    pub fn pause(&mut self) {
        self.game.pause();
    }

    pub fn restart(&mut self) {
        self.game.restart();
    }

    pub fn frame(&mut self, now_ms: f64) {
        self.game.frame(now_ms);
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f32, y: f32, now_ms: f64) {
        self.game.pointer_down(x, y, now_ms);
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32, now_ms: f64) -> u32 {
        self.game.pointer_move(x, y, now_ms) as u32
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) {
        self.game.pointer_up();
    }

    /// Live entities as a JSON array
    pub fn entities(&self) -> String {
        to_json(&self.game.entities())
    }

    /// HUD counters as a JSON object
    pub fn hud(&self) -> String {
        to_json(&self.game.hud())
    }

    /// Pending events as a JSON array (drained)
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> String {
        to_json(&self.game.drain_events())
    }

    /// Blade trail points as a JSON array of `[x, y]`
    pub fn trail(&self) -> String {
        to_json(&self.game.gesture_trail())
    }
}

#[wasm_bindgen]
pub struct WebDodgeGame {
    game: DodgeGame,
}

#[wasm_bindgen]
impl WebDodgeGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebDodgeGame {
        let config = DodgeConfig {
            width,
            height,
            ..Default::default()
        };
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("Canvas rejected ({e}), using default road");
                DodgeConfig::default()
            }
        };
        WebDodgeGame {
            game: DodgeGame::new(seed_from_clock(), config),
        }
    }

    pub fn tick(&mut self) {
        self.game.tick();
    }

    #[wasm_bindgen(js_name = moveLeft)]
    pub fn move_left(&mut self) {
        self.game.move_left();
    }

    #[wasm_bindgen(js_name = moveRight)]
    pub fn move_right(&mut self) {
        self.game.move_right();
    }

    pub fn reset(&mut self) {
        self.game.reset();
    }

    pub fn snapshot(&self) -> String {
        to_json(&self.game.snapshot())
    }

    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> String {
        to_json(&self.game.drain_events())
    }
}
