//! Game tuning and difficulty presets
//!
//! Everything here is plain data. Hosts may ship a partial JSON override;
//! missing fields fall back to the defaults below.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating tuning data
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("{low} must not exceed {high}")]
    Inverted {
        low: &'static str,
        high: &'static str,
    },
}

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Chance that a spawned entity is a hazard
    pub fn hazard_chance(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.05,
            Difficulty::Normal => 0.10,
            Difficulty::Hard => 0.15,
        }
    }

    /// Base spawn interval in milliseconds
    pub fn spawn_interval_ms(&self) -> f32 {
        match self {
            Difficulty::Easy => 1100.0,
            Difficulty::Normal => 900.0,
            Difficulty::Hard => 700.0,
        }
    }

    /// Lives at the start of a run
    pub fn starting_lives(&self) -> u8 {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Normal | Difficulty::Hard => 3,
        }
    }
}

/// Pointer history tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Maximum samples kept
    pub capacity: usize,
    /// Samples older than this are evicted (ms)
    pub max_age_ms: f64,
    /// Moves arriving sooner than this after the last sample are dropped (ms, 0 = off)
    pub min_sample_interval_ms: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            capacity: 18,
            max_age_ms: 250.0,
            min_sample_interval_ms: 0.0,
        }
    }
}

/// Slice-arc tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceConfig {
    pub difficulty: Difficulty,

    // === Scheduling ===
    /// Spawn interval at level 0 (ms)
    pub spawn_interval_ms: f32,
    /// Interval reduction per level (ms)
    pub spawn_interval_step_ms: f32,
    /// Floor for the spawn interval (ms)
    pub min_spawn_interval_ms: f32,
    /// Frame duration that maps to dt = 1.0 (ms)
    pub target_frame_ms: f32,
    /// Longest frame gap fed to physics (ms)
    pub max_frame_ms: f32,

    // === Spawning ===
    pub max_active: usize,
    pub hazard_chance: f32,
    /// Vertical start, below the baseline
    pub spawn_y: f32,
    pub launch_vy_min: f32,
    pub launch_vy_max: f32,
    /// Horizontal drift magnitude
    pub drift_vx: f32,
    /// Initial rotation magnitude (degrees)
    pub spawn_rotation: f32,
    /// Horizontal inset from the play-area edges
    pub spawn_inset: f32,
    /// Sprite size as a fraction of play-area width, then clamped
    pub size_ratio: f32,
    pub min_size: f32,
    pub max_size: f32,

    // === Physics ===
    pub gravity: f32,
    pub rotation_factor: f32,
    pub ceiling_margin: f32,
    /// Multiplier applied to vy on a ceiling bounce (< 1)
    pub ceiling_damping: f32,
    pub cull_margin_x: f32,
    pub cull_floor: f32,

    // === Scoring ===
    pub starting_lives: u8,
    pub slice_score: u64,
    pub slice_coins: u64,
    pub combo_window_ms: f64,
    pub max_combo: u32,
    /// Score needed per level step
    pub score_per_level: u64,

    pub gesture: GestureConfig,
}

impl Default for SliceConfig {
    fn default() -> Self {
        Self::from_preset(Difficulty::Normal)
    }
}

impl SliceConfig {
    /// Create a config from a difficulty preset (applies preset defaults)
    pub fn from_preset(difficulty: Difficulty) -> Self {
        Self {
            difficulty,

            spawn_interval_ms: difficulty.spawn_interval_ms(),
            spawn_interval_step_ms: 30.0,
            min_spawn_interval_ms: 380.0,
            target_frame_ms: 16.666,
            max_frame_ms: 40.0,

            max_active: 16,
            hazard_chance: difficulty.hazard_chance(),
            spawn_y: -120.0,
            launch_vy_min: 10.0,
            launch_vy_max: 16.0,
            drift_vx: 2.2,
            spawn_rotation: 25.0,
            spawn_inset: 16.0,
            size_ratio: 0.13,
            min_size: 48.0,
            max_size: 96.0,

            gravity: 0.36,
            rotation_factor: 0.8,
            ceiling_margin: 40.0,
            ceiling_damping: 0.5,
            cull_margin_x: 200.0,
            cull_floor: 300.0,

            starting_lives: difficulty.starting_lives(),
            slice_score: 10,
            slice_coins: 2,
            combo_window_ms: 600.0,
            max_combo: 5,
            score_per_level: 100,

            gesture: GestureConfig::default(),
        }
    }

    /// Apply a difficulty preset, keeping non-preset fields
    pub fn apply_preset(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.spawn_interval_ms = difficulty.spawn_interval_ms();
        self.hazard_chance = difficulty.hazard_chance();
        self.starting_lives = difficulty.starting_lives();
    }

    /// Spawn interval for a level, floored at the minimum
    pub fn spawn_interval_for(&self, level: u32) -> f32 {
        (self.spawn_interval_ms - level as f32 * self.spawn_interval_step_ms)
            .max(self.min_spawn_interval_ms)
    }

    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse JSON, falling back to defaults on any error
    pub fn load_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => {
                log::info!("Loaded {} tuning", config.difficulty.as_str());
                config
            }
            Err(e) => {
                log::warn!("Rejected tuning ({e}), using defaults");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("spawn_interval_ms", self.spawn_interval_ms)?;
        positive("min_spawn_interval_ms", self.min_spawn_interval_ms)?;
        positive("target_frame_ms", self.target_frame_ms)?;
        positive("max_frame_ms", self.max_frame_ms)?;
        positive("gravity", self.gravity)?;

        if !(0.0..=1.0).contains(&self.hazard_chance) {
            return Err(ConfigError::OutOfRange {
                field: "hazard_chance",
                value: self.hazard_chance as f64,
            });
        }
        if !(0.0..1.0).contains(&self.ceiling_damping) {
            return Err(ConfigError::OutOfRange {
                field: "ceiling_damping",
                value: self.ceiling_damping as f64,
            });
        }
        if self.launch_vy_min > self.launch_vy_max {
            return Err(ConfigError::Inverted {
                low: "launch_vy_min",
                high: "launch_vy_max",
            });
        }
        if self.min_size > self.max_size {
            return Err(ConfigError::Inverted {
                low: "min_size",
                high: "max_size",
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::OutOfRange {
                field: "starting_lives",
                value: 0.0,
            });
        }
        if self.max_combo == 0 {
            return Err(ConfigError::OutOfRange {
                field: "max_combo",
                value: 0.0,
            });
        }
        if self.score_per_level == 0 {
            return Err(ConfigError::OutOfRange {
                field: "score_per_level",
                value: 0.0,
            });
        }
        non_negative("size_ratio", self.size_ratio)?;
        non_negative("min_size", self.min_size)?;
        non_negative("combo_window_ms", self.combo_window_ms)?;
        self.gesture.validate()
    }
}

/// Longest pointer history a host may ask for
pub const MAX_GESTURE_CAPACITY: usize = 256;

impl GestureConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_GESTURE_CAPACITY).contains(&self.capacity) {
            return Err(ConfigError::OutOfRange {
                field: "gesture.capacity",
                value: self.capacity as f64,
            });
        }
        positive("gesture.max_age_ms", self.max_age_ms)?;
        non_negative("gesture.min_sample_interval_ms", self.min_sample_interval_ms)
    }
}

fn positive(field: &'static str, value: impl Into<f64>) -> Result<(), ConfigError> {
    let value = value.into();
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn non_negative(field: &'static str, value: impl Into<f64>) -> Result<(), ConfigError> {
    let value = value.into();
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

/// Lane dodge tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DodgeConfig {
    pub width: f32,
    pub height: f32,

    pub car_width: f32,
    pub car_height: f32,
    /// Car distance from the bottom edge
    pub car_offset: f32,
    pub car_speed: f32,
    /// Step multiplier for a single move press
    pub move_factor: f32,
    /// Clamp inset from the road edges
    pub edge_inset: f32,

    pub enemy_min_width: f32,
    pub enemy_width_range: f32,
    pub enemy_height: f32,
    pub enemy_base_speed: f32,
    pub enemy_speed_range: f32,

    /// Frames between spawns at the start
    pub spawn_interval: u32,
    pub min_spawn_interval: u32,
    pub spawn_interval_step: u32,
    /// Distance below the bottom edge at which an enemy counts as passed
    pub pass_margin: f32,
    pub pass_score: u64,
    /// Score multiple that triggers a speed bump
    pub speed_up_every: u64,
    pub speed_up_step: f32,
}

impl Default for DodgeConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 600.0,

            car_width: 50.0,
            car_height: 90.0,
            car_offset: 120.0,
            car_speed: 6.0,
            move_factor: 1.6,
            edge_inset: 10.0,

            enemy_min_width: 40.0,
            enemy_width_range: 40.0,
            enemy_height: 70.0,
            enemy_base_speed: 1.5,
            enemy_speed_range: 1.8,

            spawn_interval: 90,
            min_spawn_interval: 40,
            spawn_interval_step: 2,
            pass_margin: 50.0,
            pass_score: 10,
            speed_up_every: 100,
            speed_up_step: 0.5,
        }
    }
}

impl DodgeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("width", self.width)?;
        positive("height", self.height)?;
        if self.car_width + 2.0 * self.edge_inset > self.width {
            return Err(ConfigError::OutOfRange {
                field: "car_width",
                value: self.car_width as f64,
            });
        }
        if self.min_spawn_interval > self.spawn_interval {
            return Err(ConfigError::Inverted {
                low: "min_spawn_interval",
                high: "spawn_interval",
            });
        }
        if self.speed_up_every == 0 {
            return Err(ConfigError::OutOfRange {
                field: "speed_up_every",
                value: 0.0,
            });
        }
        Ok(())
    }
}
