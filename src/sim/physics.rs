//! Per-frame ballistic integration with ceiling clamp and culling

use glam::Vec2;

use super::entity::{Entity, EntityStore};
use crate::config::SliceConfig;

/// Normalize a host frame gap into integration steps
///
/// Gaps are clamped to `max_frame_ms` so a stalled tab does not teleport
/// everything on resume.
pub fn frame_dt(elapsed_ms: f32, config: &SliceConfig) -> f32 {
    elapsed_ms.clamp(0.0, config.max_frame_ms) / config.target_frame_ms
}

/// Outcome of a single entity step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    Moved,
    /// Hit the ceiling this step and had its vertical velocity reflected
    Clamped,
    /// Left the play bounds
    Culled,
}

/// Advance one entity by `dt` frames inside a play area of `area` size
pub fn step_entity(entity: &mut Entity, area: Vec2, config: &SliceConfig, dt: f32) -> StepResult {
    entity.vel.y -= config.gravity * dt;
    entity.pos += entity.vel * dt;
    entity.rotation += entity.vel.x * config.rotation_factor * dt;

    let mut result = StepResult::Moved;

    let ceiling = area.y - config.ceiling_margin;
    if entity.pos.y > ceiling {
        entity.pos.y = ceiling;
        entity.vel.y = -entity.vel.y.abs() * config.ceiling_damping;
        result = StepResult::Clamped;
    }

    let out_x = entity.pos.x < -config.cull_margin_x || entity.pos.x > area.x + config.cull_margin_x;
    let out_y = entity.pos.y < -config.cull_floor;
    if out_x || out_y {
        result = StepResult::Culled;
    }

    result
}

/// Run the physics pass over every live entity
///
/// Culled entities are staged during iteration and flushed afterwards.
/// Returns the number of entities culled.
pub fn physics_pass(store: &mut EntityStore, area: Vec2, config: &SliceConfig, dt: f32) -> usize {
    let mut culled = Vec::new();
    for (id, entity) in store.iter_mut() {
        if step_entity(entity, area, config, dt) == StepResult::Culled {
            culled.push(id);
        }
    }
    for id in culled {
        store.stage_removal(id);
    }
    let removed = store.flush_removals();
    if removed > 0 {
        log::trace!("Culled {} entities", removed);
    }
    removed
}
