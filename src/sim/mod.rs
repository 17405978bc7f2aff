//! Deterministic slice-arc simulation
//!
//! All gameplay logic for the slicing game lives here. This module must stay
//! pure and deterministic:
//! - Time comes from the host as milliseconds
//! - Seeded RNG only
//! - Stable iteration order (by arena slot)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod gesture;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{Rect, rects_overlap, segment_intersects_rect};
pub use entity::{Entity, EntityId, EntityKind, EntityStore};
pub use gesture::{GestureSample, GestureSegment, GestureTracker};
pub use physics::{StepResult, frame_dt, physics_pass, step_entity};
pub use state::{EntityView, GameEvent, GamePhase, GameState, HudSnapshot, SliceOutcome};
pub use tick::SliceGame;
pub use timer::SpawnTimer;
