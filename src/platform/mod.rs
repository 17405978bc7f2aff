//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logger setup
//! - JavaScript bindings for the game cores (wasm32)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Install the native logger. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[cfg(target_arch = "wasm32")]
pub use web::init_logging;
