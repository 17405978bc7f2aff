//! Lane-dodging car game
//!
//! A car at the bottom of a fixed canvas steps left and right while blocks
//! fall from the top. Blocks that get past the car score; touching one ends
//! the run. Ticks are frame-counted rather than time-based, so the host calls
//! [`DodgeGame::tick`] once per animation frame.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::DodgeConfig;
use crate::sim::collision::{Rect, rects_overlap};

/// A falling block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub rect: Rect,
    /// Base fall speed (pixels per frame before the game-speed factor)
    pub speed: f32,
}

/// Events for audio/UI side effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DodgeEvent {
    Passed { score: u64 },
    SpeedUp { game_speed: f32 },
    Crashed { score: u64 },
}

/// Read-only view for rendering and HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DodgeSnapshot {
    pub car: Rect,
    pub enemies: Vec<Rect>,
    pub score: u64,
    pub game_speed: f32,
    pub running: bool,
}

#[derive(Debug, Clone)]
pub struct DodgeGame {
    config: DodgeConfig,
    rng: Pcg32,
    car: Rect,
    enemies: Vec<Enemy>,
    spawn_counter: u32,
    spawn_interval: u32,
    game_speed: f32,
    score: u64,
    running: bool,
    next_id: u32,
    events: Vec<DodgeEvent>,
}

impl DodgeGame {
    /// `config` must pass [`DodgeConfig::validate`]
    pub fn new(seed: u64, config: DodgeConfig) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "unvalidated dodge config: {:?}",
            config.validate()
        );
        let car = Self::start_car(&config);
        Self {
            rng: Pcg32::seed_from_u64(seed),
            car,
            enemies: Vec::new(),
            spawn_counter: 0,
            spawn_interval: config.spawn_interval,
            game_speed: 1.0,
            score: 0,
            running: true,
            next_id: 1,
            events: Vec::new(),
            config,
        }
    }

    fn start_car(config: &DodgeConfig) -> Rect {
        Rect::from_xywh(
            (config.width - config.car_width) / 2.0,
            config.height - config.car_offset,
            config.car_width,
            config.car_height,
        )
    }

    pub fn car(&self) -> Rect {
        self.car
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn game_speed(&self) -> f32 {
        self.game_speed
    }

    pub fn spawn_interval(&self) -> u32 {
        self.spawn_interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn step(&self) -> f32 {
        self.config.car_speed * self.config.move_factor
    }

    fn shift_car(&mut self, dx: f32) {
        if !self.running {
            return;
        }
        let min_x = self.config.edge_inset;
        let max_x = self.config.width - self.config.car_width - self.config.edge_inset;
        let x = (self.car.left + dx).clamp(min_x, max_x);
        self.car = Rect::from_xywh(x, self.car.top, self.config.car_width, self.config.car_height);
    }

    pub fn move_left(&mut self) {
        self.shift_car(-self.step());
    }

    pub fn move_right(&mut self) {
        self.shift_car(self.step());
    }

    /// Drop a new block at the top edge
    pub fn spawn_enemy(&mut self) {
        let c = &self.config;
        let w = c.enemy_min_width + self.rng.random::<f32>() * c.enemy_width_range;
        let span = (c.width - w - 2.0 * c.edge_inset).max(0.0);
        let x = c.edge_inset + self.rng.random::<f32>() * span;
        let h = c.enemy_height;
        let speed = c.enemy_base_speed
            + self.rng.random::<f32>() * (c.enemy_speed_range + self.game_speed * 0.2);

        let id = self.next_id;
        self.next_id += 1;
        self.enemies.push(Enemy {
            id,
            rect: Rect::from_xywh(x, -h, w, h),
            speed,
        });
        log::debug!(
            "Spawned enemy {} (interval {}, {} on road)",
            id,
            self.spawn_interval,
            self.enemies.len()
        );
    }

    /// Advance one frame
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }

        self.spawn_counter += 1;
        if self.spawn_counter > self.spawn_interval {
            self.spawn_enemy();
            self.spawn_counter = 0;
            if self.spawn_interval > self.config.min_spawn_interval {
                self.spawn_interval = self
                    .spawn_interval
                    .saturating_sub(self.config.spawn_interval_step)
                    .max(self.config.min_spawn_interval);
            }
        }

        let factor = 1.0 + self.game_speed * 0.2;
        for enemy in &mut self.enemies {
            let dy = enemy.speed * factor;
            enemy.rect.top += dy;
            enemy.rect.bottom += dy;
        }

        if let Some(hit) = self.enemies.iter().find(|e| rects_overlap(&self.car, &e.rect)) {
            self.running = false;
            self.events.push(DodgeEvent::Crashed { score: self.score });
            log::info!("Crashed into enemy {}, score {}", hit.id, self.score);
            return;
        }

        let limit = self.config.height + self.config.pass_margin;
        let passed = self.enemies.iter().filter(|e| e.rect.top > limit).count();
        self.enemies.retain(|e| e.rect.top <= limit);
        for _ in 0..passed {
            self.score += self.config.pass_score + (self.game_speed * 2.0).floor() as u64;
            self.events.push(DodgeEvent::Passed { score: self.score });
            if self.score % self.config.speed_up_every == 0 {
                self.game_speed += self.config.speed_up_step;
                self.events.push(DodgeEvent::SpeedUp {
                    game_speed: self.game_speed,
                });
                log::info!("Speed up to {:.1}", self.game_speed);
            }
        }
    }

    /// Clear the road and start over
    pub fn reset(&mut self) {
        self.enemies.clear();
        self.spawn_counter = 0;
        self.spawn_interval = self.config.spawn_interval;
        self.game_speed = 1.0;
        self.score = 0;
        self.running = true;
        self.car = Self::start_car(&self.config);
        log::info!("Dodge reset");
    }

    pub fn drain_events(&mut self) -> Vec<DodgeEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> DodgeSnapshot {
        DodgeSnapshot {
            car: self.car,
            enemies: self.enemies.iter().map(|e| e.rect).collect(),
            score: self.score,
            game_speed: self.game_speed,
            running: self.running,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> DodgeGame {
        DodgeGame::new(42, DodgeConfig::default())
    }

    fn place_enemy(game: &mut DodgeGame, x: f32, y: f32, speed: f32) {
        let id = game.next_id;
        game.next_id += 1;
        game.enemies.push(Enemy {
            id,
            rect: Rect::from_xywh(x, y, 40.0, 70.0),
            speed,
        });
    }

    #[test]
    fn test_car_starts_centered() {
        let game = game();
        assert_eq!(game.car(), Rect::from_xywh(175.0, 480.0, 50.0, 90.0));
        assert!(game.is_running());
    }

    #[test]
    fn test_moves_clamp_to_road() {
        let mut game = game();
        for _ in 0..100 {
            game.move_left();
        }
        assert_eq!(game.car().left, 10.0);
        for _ in 0..100 {
            game.move_right();
        }
        assert_eq!(game.car().left, 340.0);
    }

    #[test]
    fn test_spawn_interval_shrinks_to_floor() {
        let mut game = game();
        // Keep the car out of the way by emptying the road each frame
        for _ in 0..20_000 {
            game.tick();
            game.enemies.clear();
        }
        assert_eq!(game.spawn_interval(), 40);
        assert!(game.is_running());
    }

    #[test]
    fn test_first_spawn_after_interval() {
        let mut game = game();
        for _ in 0..90 {
            game.tick();
        }
        assert!(game.enemies().is_empty());
        game.tick();
        assert_eq!(game.enemies().len(), 1);
        assert_eq!(game.spawn_interval(), 88);

        let e = game.enemies()[0];
        assert!(e.rect.width() >= 40.0 && e.rect.width() <= 80.0);
        assert!(e.rect.left >= 10.0);
        assert!(e.rect.right <= 390.0 + 1e-3);
    }

    #[test]
    fn test_overlap_ends_run() {
        let mut game = game();
        let car = game.car();
        place_enemy(&mut game, car.left, car.top - 70.0, 1.0);
        game.tick();
        assert!(!game.is_running());
        assert_eq!(game.drain_events(), vec![DodgeEvent::Crashed { score: 0 }]);

        // Frozen after the crash
        let snapshot = game.snapshot();
        game.tick();
        game.move_left();
        assert_eq!(game.snapshot(), snapshot);
    }

    #[test]
    fn test_passing_scores_and_speeds_up() {
        let mut game = game();
        // Far to the left of the car, just above the pass line
        for _ in 0..8 {
            place_enemy(&mut game, 10.0, 650.0, 1.0);
        }
        game.tick();
        assert!(game.enemies().is_empty());
        // 12 points each at speed 1.0
        assert_eq!(game.score(), 96);

        place_enemy(&mut game, 10.0, 650.0, 1.0);
        game.tick();
        assert_eq!(game.score(), 108);
        assert_eq!(game.game_speed(), 1.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "unvalidated dodge config")]
    fn test_new_rejects_unvalidated_config() {
        let config = DodgeConfig {
            speed_up_every: 0,
            ..Default::default()
        };
        DodgeGame::new(1, config);
    }

    #[test]
    fn test_speed_up_on_hundred() {
        let mut config = DodgeConfig::default();
        config.pass_score = 48;
        let mut game = DodgeGame::new(1, config);
        // 48 + 2 = 50 points per pass
        place_enemy(&mut game, 10.0, 650.0, 1.0);
        place_enemy(&mut game, 10.0, 650.0, 1.0);
        game.tick();
        assert_eq!(game.score(), 100);
        assert_eq!(game.game_speed(), 1.5);
        assert!(
            game.drain_events()
                .contains(&DodgeEvent::SpeedUp { game_speed: 1.5 })
        );
    }

    #[test]
    fn test_reset() {
        let mut game = game();
        let car = game.car();
        game.move_left();
        place_enemy(&mut game, car.left, car.top - 70.0, 1.0);
        game.tick();
        assert!(!game.is_running());

        game.reset();
        assert!(game.is_running());
        assert_eq!(game.score(), 0);
        assert_eq!(game.game_speed(), 1.0);
        assert_eq!(game.spawn_interval(), 90);
        assert!(game.enemies().is_empty());
        assert_eq!(game.car(), car);
    }
}
