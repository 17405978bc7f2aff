//! Frame driver and scheduler for the slice game
//!
//! The host calls [`SliceGame::frame`] once per animation frame and forwards
//! pointer events as they arrive. Each frame runs in a fixed order: staged
//! removals, then the spawn trigger, then the physics pass.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::segment_intersects_rect;
use super::entity::{Entity, EntityId, EntityKind, EntityStore};
use super::gesture::{GestureSegment, GestureTracker};
use super::physics::{frame_dt, physics_pass};
use super::spawn;
use super::state::{EntityView, GameEvent, GamePhase, GameState, HudSnapshot, SliceOutcome};
use super::timer::SpawnTimer;
use crate::config::SliceConfig;
use crate::consts::{DEFAULT_AREA_HEIGHT, DEFAULT_AREA_WIDTH};

/// The slice-arc game core
#[derive(Debug, Clone)]
pub struct SliceGame {
    config: SliceConfig,
    seed: u64,
    rng: Pcg32,
    state: GameState,
    store: EntityStore,
    gesture: GestureTracker,
    timer: SpawnTimer,
    /// Play area (width, height)
    area: Vec2,
    last_frame_ms: Option<f64>,
    events: Vec<GameEvent>,
}

impl SliceGame {
    /// Create a game with the given seed and tuning
    ///
    /// `config` must pass [`SliceConfig::validate`]. Host-supplied tuning
    /// should come through [`SliceConfig::from_json`] or
    /// [`SliceConfig::load_or_default`].
    pub fn new(seed: u64, config: SliceConfig) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "unvalidated slice config: {:?}",
            config.validate()
        );
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            state: GameState::new(&config),
            store: EntityStore::new(),
            gesture: GestureTracker::new(config.gesture.clone()),
            timer: SpawnTimer::new(),
            area: Vec2::new(DEFAULT_AREA_WIDTH, DEFAULT_AREA_HEIGHT),
            last_frame_ms: None,
            events: Vec::new(),
            config,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SliceConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn area(&self) -> Vec2 {
        self.area
    }

    /// Update the play area size (host resize)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.area = Vec2::new(width.max(0.0), height.max(0.0));
    }

    // === Scheduler ===

    /// Begin or resume the run. Calling it while running does nothing.
    pub fn start(&mut self) {
        match self.state.phase {
            GamePhase::Running => {}
            GamePhase::GameOver => {
                log::info!("Start ignored after game over, restart first");
            }
            GamePhase::Idle => {
                self.begin_running();
                log::info!("Run started (seed {})", self.seed);
                self.spawn();
            }
            GamePhase::Paused => {
                self.begin_running();
                log::info!("Run resumed");
            }
        }
    }

    /// Toggle between running and paused
    pub fn pause(&mut self) {
        match self.state.phase {
            GamePhase::Running => {
                self.timer.disarm();
                self.gesture.clear();
                self.state.phase = GamePhase::Paused;
                log::info!("Paused");
            }
            GamePhase::Paused => {
                self.begin_running();
                log::info!("Run resumed");
            }
            GamePhase::Idle | GamePhase::GameOver => {}
        }
    }

    /// Clear everything and return to Idle
    pub fn restart(&mut self) {
        self.timer.disarm();
        self.store.clear();
        self.gesture.clear();
        self.state.reset(&self.config);
        self.last_frame_ms = None;
        log::info!("Game reset");
    }

    fn begin_running(&mut self) {
        self.timer
            .arm(self.config.spawn_interval_for(self.state.level));
        self.state.phase = GamePhase::Running;
        self.last_frame_ms = None;
    }

    /// Lives ran out: freeze the run and report the final score
    fn stop(&mut self) {
        self.timer.disarm();
        self.gesture.clear();
        self.state.phase = GamePhase::GameOver;
        let final_score = self.state.score;
        self.events.push(GameEvent::GameOver { final_score });
        log::info!("Game over, final score {}", final_score);
    }

    // === Frame ===

    /// Advance one host frame at `now_ms`
    pub fn frame(&mut self, now_ms: f64) {
        let elapsed = match self.last_frame_ms {
            Some(last) => (now_ms - last) as f32,
            None => self.config.target_frame_ms,
        };
        self.last_frame_ms = Some(now_ms);
        self.gesture.evict(now_ms);

        if !self.state.running() {
            return;
        }

        self.store.flush_removals();

        if self.timer.advance(elapsed) {
            self.spawn();
        }

        let dt = frame_dt(elapsed, &self.config);
        physics_pass(&mut self.store, self.area, &self.config, dt);
    }

    // === Entities ===

    /// Roll and spawn one entity. No-op unless running or when at capacity.
    pub fn spawn(&mut self) -> Option<EntityId> {
        if !self.state.running() {
            return None;
        }
        spawn::spawn(&mut self.store, &mut self.rng, self.area, &self.config)
    }

    /// Place a specific entity, still respecting the capacity cap
    #[cfg(test)]
    pub(crate) fn insert_entity(&mut self, entity: Entity) -> Option<EntityId> {
        if self.store.len() >= self.config.max_active {
            return None;
        }
        Some(self.store.insert(entity))
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.store.get(id)
    }

    /// Snapshot of live entities for rendering
    pub fn entities(&self) -> Vec<EntityView> {
        self.store
            .iter()
            .map(|(id, e)| EntityView {
                id,
                kind: e.kind,
                x: e.pos.x,
                y: e.pos.y,
                rotation: e.rotation,
                size: e.size,
            })
            .collect()
    }

    pub fn hud(&self) -> HudSnapshot {
        self.state.hud()
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current blade trail, oldest first
    pub fn gesture_trail(&self) -> Vec<Vec2> {
        self.gesture.samples().map(|s| s.pos).collect()
    }

    // === Gestures ===

    pub fn pointer_down(&mut self, x: f32, y: f32, now_ms: f64) {
        self.gesture.pointer_down(Vec2::new(x, y), now_ms);
    }

    /// Extend the gesture; returns how many entities were sliced
    pub fn pointer_move(&mut self, x: f32, y: f32, now_ms: f64) -> usize {
        match self.gesture.pointer_move(Vec2::new(x, y), now_ms) {
            Some(segment) if self.state.running() => self.slice_segment(segment, now_ms),
            _ => 0,
        }
    }

    pub fn pointer_up(&mut self) {
        self.gesture.pointer_up();
    }

    /// Resolve every entity whose box the segment touches
    fn slice_segment(&mut self, segment: GestureSegment, now_ms: f64) -> usize {
        let height = self.area.y;
        let hits: Vec<EntityId> = self
            .store
            .iter()
            .filter(|(_, e)| {
                segment_intersects_rect(segment.from, segment.to, &e.screen_bounds(height))
            })
            .map(|(id, _)| id)
            .collect();

        let mut sliced = 0;
        for id in hits {
            if !self.state.running() {
                break;
            }
            if self.resolve_slice(id, now_ms) {
                sliced += 1;
            }
        }
        sliced
    }

    /// Apply a slice to one entity
    ///
    /// Removal and the counter change happen together. Returns false for a
    /// stale handle or when the run is not active.
    pub fn resolve_slice(&mut self, id: EntityId, now_ms: f64) -> bool {
        if !self.state.running() {
            return false;
        }
        let Some(entity) = self.store.remove(id) else {
            return false;
        };

        let outcome = match entity.kind {
            EntityKind::Hazard => self.state.record_hazard(),
            EntityKind::Normal => self.state.record_slice(&self.config, now_ms),
        };
        self.events.push(GameEvent::EntitySliced {
            id,
            kind: entity.kind,
        });
        log::debug!("Sliced {:?}: {:?}", entity.kind, outcome);

        match outcome {
            SliceOutcome::Died => self.stop(),
            SliceOutcome::Scored { .. } => {
                if let Some(level) = self.state.update_level(&self.config) {
                    let interval = self.config.spawn_interval_for(level);
                    self.timer.rearm(interval);
                    self.events.push(GameEvent::LevelUp { level });
                    log::info!("Level {} (spawn every {}ms)", level, interval);
                }
            }
            SliceOutcome::LifeLost { .. } => {}
        }
        true
    }
}
