//! Slice Arc - deterministic cores for two browser minigames
//!
//! Core modules:
//! - `sim`: Fruit-slicing game (spawning, ballistic physics, gesture slicing, game state)
//! - `dodge`: Lane-dodging car game
//! - `config`: Data-driven game tuning and difficulty presets
//! - `platform`: Browser bindings (wasm32 only)

pub mod config;
pub mod dodge;
pub mod platform;
pub mod sim;

pub use config::{ConfigError, Difficulty, DodgeConfig, GestureConfig, SliceConfig};
pub use dodge::DodgeGame;
pub use sim::SliceGame;

/// Game configuration constants
pub mod consts {
    /// Play area used until the host reports a real size
    pub const DEFAULT_AREA_WIDTH: f32 = 480.0;
    pub const DEFAULT_AREA_HEIGHT: f32 = 640.0;

    /// Host frame length the headless driver simulates (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
