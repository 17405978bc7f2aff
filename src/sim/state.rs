//! Game state and the transitions that mutate it
//!
//! Counters only change through the named methods on [`GameState`], so the
//! lives/phase invariants are checked in one place.

use serde::{Deserialize, Serialize};

use super::entity::{EntityId, EntityKind};
use crate::config::SliceConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for start
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Run ended, waiting for restart
    GameOver,
}

/// Discrete events for audio/UI side effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    EntitySliced { id: EntityId, kind: EntityKind },
    LevelUp { level: u32 },
    GameOver { final_score: u64 },
}

/// What a slice did to the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceOutcome {
    Scored { points: u64, combo: u32 },
    LifeLost { lives: u8 },
    /// The last life went; the caller must stop the run
    Died,
}

/// Score, lives, coins, level and phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub score: u64,
    pub lives: u8,
    pub coins: u64,
    pub level: u32,
    /// Current combo multiplier (1 when no chain is active)
    pub combo: u32,
    pub phase: GamePhase,
    /// Time of the last normal slice, for the combo window
    last_slice_ms: Option<f64>,
}

impl GameState {
    pub fn new(config: &SliceConfig) -> Self {
        Self {
            score: 0,
            lives: config.starting_lives,
            coins: 0,
            level: 1,
            combo: 1,
            phase: GamePhase::Idle,
            last_slice_ms: None,
        }
    }

    pub fn running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Reset every counter and return to Idle
    pub fn reset(&mut self, config: &SliceConfig) {
        *self = Self::new(config);
    }

    /// Apply a normal slice at `now_ms`
    pub fn record_slice(&mut self, config: &SliceConfig, now_ms: f64) -> SliceOutcome {
        let chained = self
            .last_slice_ms
            .is_some_and(|t| now_ms - t <= config.combo_window_ms);
        self.combo = if chained {
            (self.combo + 1).min(config.max_combo)
        } else {
            1
        };
        self.last_slice_ms = Some(now_ms);

        let points = config.slice_score * self.combo as u64;
        self.score += points;
        self.coins += config.slice_coins;
        SliceOutcome::Scored {
            points,
            combo: self.combo,
        }
    }

    /// Apply a hazard slice; lives never go below zero
    pub fn record_hazard(&mut self) -> SliceOutcome {
        self.lives = self.lives.saturating_sub(1);
        self.combo = 1;
        self.last_slice_ms = None;
        if self.lives == 0 {
            SliceOutcome::Died
        } else {
            SliceOutcome::LifeLost { lives: self.lives }
        }
    }

    /// Raise the level to match the score; returns the new level if it changed
    pub fn update_level(&mut self, config: &SliceConfig) -> Option<u32> {
        let target = 1 + (self.score / config.score_per_level) as u32;
        if target > self.level {
            self.level = target;
            Some(target)
        } else {
            None
        }
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.score,
            lives: self.lives,
            coins: self.coins,
            level: self.level,
            combo: self.combo,
            running: self.running(),
            phase: self.phase,
        }
    }
}

/// Read-only counters for HUD updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub lives: u8,
    pub coins: u64,
    pub level: u32,
    pub combo: u32,
    pub running: bool,
    pub phase: GamePhase,
}

/// Read-only entity data for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub size: f32,
}
