use glam::Vec2;
use proptest::prelude::*;

use slice_arc::sim::{GamePhase, Rect, segment_intersects_rect};
use slice_arc::{SliceConfig, SliceGame};

const FRAME_MS: f64 = 16.666;

#[derive(Debug, Clone)]
enum Action {
    Frame(f64),
    Swipe { x0: f32, y0: f32, x1: f32, y1: f32 },
    Pause,
    Start,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        8 => (1.0f64..120.0).prop_map(Action::Frame),
        3 => (0.0f32..480.0, 0.0f32..640.0, 0.0f32..480.0, 0.0f32..640.0)
            .prop_map(|(x0, y0, x1, y1)| Action::Swipe { x0, y0, x1, y1 }),
        1 => Just(Action::Pause),
        1 => Just(Action::Start),
    ]
}

fn apply(game: &mut SliceGame, now: &mut f64, action: &Action) {
    match *action {
        Action::Frame(ms) => {
            *now += ms;
            game.frame(*now);
        }
        Action::Swipe { x0, y0, x1, y1 } => {
            game.pointer_down(x0, y0, *now);
            game.pointer_move(x1, y1, *now + 1.0);
            game.pointer_up();
        }
        Action::Pause => game.pause(),
        Action::Start => game.start(),
    }
}

proptest! {
    #[test]
    fn store_never_exceeds_capacity(
        seed in any::<u64>(),
        max_active in 1usize..8,
        actions in prop::collection::vec(action(), 1..300),
    ) {
        let config = SliceConfig {
            max_active,
            spawn_interval_ms: 50.0,
            min_spawn_interval_ms: 20.0,
            ..SliceConfig::default()
        };
        let mut game = SliceGame::new(seed, config);
        game.resize(480.0, 640.0);
        game.start();

        let mut now = 0.0;
        for a in &actions {
            apply(&mut game, &mut now, a);
            prop_assert!(game.store().len() <= max_active);
            prop_assert_eq!(game.store().len(), game.entities().len());
        }
    }

    #[test]
    fn ceiling_clamp_holds(
        seed in any::<u64>(),
        width in 200.0f32..1200.0,
        height in 120.0f32..900.0,
        frames in 1usize..600,
    ) {
        let mut game = SliceGame::new(seed, SliceConfig::default());
        game.resize(width, height);
        game.start();

        let ceiling = height - game.config().ceiling_margin;
        let mut now = 0.0;
        for _ in 0..frames {
            now += FRAME_MS;
            game.frame(now);
            for e in game.entities() {
                prop_assert!(e.y <= ceiling);
            }
        }
    }

    #[test]
    fn lives_never_underflow_and_game_over_freezes(
        seed in any::<u64>(),
        actions in prop::collection::vec(action(), 1..300),
    ) {
        let config = SliceConfig {
            hazard_chance: 0.5,
            spawn_interval_ms: 100.0,
            min_spawn_interval_ms: 50.0,
            ..SliceConfig::default()
        };
        let mut game = SliceGame::new(seed, config);
        game.resize(480.0, 640.0);
        game.start();

        let mut now = 0.0;
        let mut game_overs = 0;
        for a in &actions {
            apply(&mut game, &mut now, a);
            game_overs += game
                .drain_events()
                .iter()
                .filter(|e| matches!(e, slice_arc::sim::GameEvent::GameOver { .. }))
                .count();
            let hud = game.hud();
            prop_assert!(hud.lives <= 3);
            prop_assert_eq!(hud.lives == 0, hud.phase == GamePhase::GameOver);
        }
        prop_assert!(game_overs <= 1);
    }

    #[test]
    fn restart_always_resets(
        seed in any::<u64>(),
        actions in prop::collection::vec(action(), 0..200),
    ) {
        let mut game = SliceGame::new(seed, SliceConfig::default());
        game.resize(480.0, 640.0);
        game.start();
        let mut now = 0.0;
        for a in &actions {
            apply(&mut game, &mut now, a);
        }

        game.restart();
        let hud = game.hud();
        prop_assert_eq!(hud.score, 0);
        prop_assert_eq!(hud.lives, 3);
        prop_assert_eq!(hud.coins, 0);
        prop_assert_eq!(hud.level, 1);
        prop_assert!(!hud.running);
        prop_assert!(game.store().is_empty());
    }

    #[test]
    fn segment_inside_box_always_hits(
        left in -500.0f32..500.0,
        top in -500.0f32..500.0,
        w in 1.0f32..200.0,
        h in 1.0f32..200.0,
        ax in 0.0f32..1.0, ay in 0.0f32..1.0,
        bx in 0.0f32..1.0, by in 0.0f32..1.0,
    ) {
        let rect = Rect::from_xywh(left, top, w, h);
        let a = Vec2::new(left + ax * w, top + ay * h);
        let b = Vec2::new(left + bx * w, top + by * h);
        prop_assert!(segment_intersects_rect(a, b, &rect));
    }

    #[test]
    fn segment_left_of_box_never_hits(
        left in -500.0f32..500.0,
        top in -500.0f32..500.0,
        gap_a in 0.1f32..300.0,
        gap_b in 0.1f32..300.0,
        ya in -1000.0f32..1000.0,
        yb in -1000.0f32..1000.0,
    ) {
        let rect = Rect::from_xywh(left, top, 40.0, 40.0);
        let a = Vec2::new(left - gap_a, ya);
        let b = Vec2::new(left - gap_b, yb);
        prop_assert!(!segment_intersects_rect(a, b, &rect));
    }
}
