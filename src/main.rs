//! Slice Arc entry point
//!
//! On the web the page drives the cores through `platform::web`. Natively this
//! runs a headless scripted session of each game and prints the final HUD.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use slice_arc::consts::FRAME_MS;
    use slice_arc::sim::{EntityKind, GameEvent};
    use slice_arc::{DodgeConfig, DodgeGame, SliceConfig, SliceGame};

    slice_arc::platform::init_logging();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(12345);
    log::info!("Slice Arc (native) starting with seed {}", seed);

    // --- Slice session: swipe through the lowest fruit every few frames ---
    let mut game = SliceGame::new(seed, SliceConfig::default());
    game.resize(480.0, 640.0);
    game.start();

    let height = game.area().y;
    let mut now = 0.0;
    let mut sliced = 0;
    for frame in 0..(60 * 60) {
        now += FRAME_MS;
        game.frame(now);

        if frame % 12 == 0 {
            let target = game
                .entities()
                .into_iter()
                .filter(|e| e.kind == EntityKind::Normal && e.y > 0.0)
                .min_by(|a, b| a.y.total_cmp(&b.y));
            if let Some(e) = target {
                let row = height - e.y - e.size / 2.0;
                game.pointer_down(e.x - 20.0, row, now);
                game.pointer_move(e.x + e.size / 2.0, row, now + 4.0);
                game.pointer_move(e.x + e.size + 20.0, row, now + 8.0);
                game.pointer_up();
            }
        }

        for event in game.drain_events() {
            match event {
                GameEvent::EntitySliced { .. } => sliced += 1,
                GameEvent::LevelUp { level } => log::info!("Reached level {}", level),
                GameEvent::GameOver { final_score } => {
                    log::info!("Session over with {} points", final_score)
                }
            }
        }
        if !game.hud().running {
            break;
        }
    }
    let hud = game.hud();
    log::info!("Slice session: {} slices", sliced);
    println!("{}", serde_json::to_string(&hud).unwrap_or_default());

    // --- Dodge session: sidestep whatever is falling toward the car ---
    let mut dodge = DodgeGame::new(seed, DodgeConfig::default());
    for _ in 0..(60 * 60) {
        let car = dodge.car();
        let threat = dodge
            .enemies()
            .iter()
            .filter(|e| e.rect.bottom > car.top - 200.0 && e.rect.top < car.bottom)
            .find(|e| e.rect.right >= car.left - 10.0 && e.rect.left <= car.right + 10.0);
        if let Some(e) = threat {
            let enemy_mid = (e.rect.left + e.rect.right) / 2.0;
            if enemy_mid > (car.left + car.right) / 2.0 {
                dodge.move_left();
            } else {
                dodge.move_right();
            }
        }
        dodge.tick();
        if !dodge.is_running() {
            break;
        }
    }
    log::info!("Dodge session: {} points", dodge.score());
    println!(
        "{}",
        serde_json::to_string(&dodge.snapshot()).unwrap_or_default()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry points live in platform::web, this is just to satisfy the compiler
}
