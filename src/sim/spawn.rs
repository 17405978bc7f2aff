//! Spawn policy: where new sprites appear and how they launch

use glam::Vec2;
use rand::Rng;

use super::entity::{Entity, EntityId, EntityKind, EntityStore};
use crate::config::SliceConfig;

/// Sprite size for a play area width
pub fn sprite_size(area_width: f32, config: &SliceConfig) -> f32 {
    (area_width * config.size_ratio).clamp(config.min_size, config.max_size)
}

/// Uniform draw in `[lo, hi)`, or `lo` when the range is empty
fn range<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// Roll a new entity for a play area of `area` size
pub fn roll_entity<R: Rng>(rng: &mut R, area: Vec2, config: &SliceConfig) -> Entity {
    let kind = if rng.random_bool(config.hazard_chance as f64) {
        EntityKind::Hazard
    } else {
        EntityKind::Normal
    };

    let size = sprite_size(area.x, config);
    let x = range(
        rng,
        config.spawn_inset,
        area.x - size - config.spawn_inset,
    );
    let vy = range(rng, config.launch_vy_min, config.launch_vy_max);
    let vx = range(rng, -config.drift_vx, config.drift_vx);
    let rotation = range(rng, -config.spawn_rotation, config.spawn_rotation);

    let mut entity = Entity::new(kind, Vec2::new(x, config.spawn_y), Vec2::new(vx, vy), size);
    entity.rotation = rotation;
    entity
}

/// Spawn one entity unless the store is at capacity
pub fn spawn<R: Rng>(
    store: &mut EntityStore,
    rng: &mut R,
    area: Vec2,
    config: &SliceConfig,
) -> Option<EntityId> {
    if store.len() >= config.max_active {
        log::trace!("Spawn skipped, {} active", store.len());
        return None;
    }
    let entity = roll_entity(rng, area, config);
    let kind = entity.kind;
    let id = store.insert(entity);
    log::debug!("Spawned {:?} {:?}", kind, id);
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_size_clamped() {
        let config = SliceConfig::default();
        assert_eq!(sprite_size(100.0, &config), 48.0);
        assert!((sprite_size(500.0, &config) - 65.0).abs() < 1e-4);
        assert_eq!(sprite_size(2_000.0, &config), 96.0);
    }

    #[test]
    fn test_rolled_entities_within_ranges() {
        let config = SliceConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let area = Vec2::new(500.0, 700.0);
        for _ in 0..500 {
            let e = roll_entity(&mut rng, area, &config);
            assert!(e.pos.x >= 16.0 && e.pos.x <= area.x - e.size - 16.0);
            assert_eq!(e.pos.y, -120.0);
            assert!(e.vel.y >= 10.0 && e.vel.y <= 16.0);
            assert!(e.vel.x >= -2.2 && e.vel.x <= 2.2);
            assert!(e.rotation >= -25.0 && e.rotation <= 25.0);
        }
    }

    #[test]
    fn test_narrow_area_falls_back_to_inset() {
        let config = SliceConfig::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let e = roll_entity(&mut rng, Vec2::new(40.0, 300.0), &config);
        assert_eq!(e.pos.x, 16.0);
    }

    #[test]
    fn test_hazard_chance_extremes() {
        let mut config = SliceConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let area = Vec2::new(400.0, 600.0);

        config.hazard_chance = 0.0;
        assert!((0..100).all(|_| roll_entity(&mut rng, area, &config).kind == EntityKind::Normal));

        config.hazard_chance = 1.0;
        assert!((0..100).all(|_| roll_entity(&mut rng, area, &config).kind == EntityKind::Hazard));
    }

    #[test]
    fn test_spawn_at_capacity_is_noop() {
        let mut config = SliceConfig::default();
        config.max_active = 3;
        let mut rng = Pcg32::seed_from_u64(11);
        let mut store = EntityStore::new();
        let area = Vec2::new(400.0, 600.0);

        for _ in 0..3 {
            assert!(spawn(&mut store, &mut rng, area, &config).is_some());
        }
        let before = store.ids();
        assert!(spawn(&mut store, &mut rng, area, &config).is_none());
        assert_eq!(store.len(), 3);
        assert_eq!(store.ids(), before);
    }
}
