//! Marcy Run entry point
//!
//! Native builds run a headless demo: the simulation is driven with synthetic
//! 60 Hz timestamps and a simple autopilot that jumps over obstacles.
//!
//! Usage: `marcy-run [tuning.json]`

#![cfg_attr(target_arch = "wasm32", allow(dead_code, unused_imports))]

use marcy_run::consts::FRAME_MS;
use marcy_run::sim::{GameEvent, GamePhase};
use marcy_run::{Game, InputEvent, Tuning};

/// Longest demo run (two minutes of game time)
const MAX_FRAMES: u32 = 60 * 120;
/// Frames the autopilot keeps the jump input held
const JUMP_HOLD_FRAMES: u32 = 8;

fn load_tuning() -> Tuning {
    let Some(path) = std::env::args().nth(1) else {
        log::info!("Using default tuning");
        return Tuning::default();
    };

    match std::fs::read_to_string(&path) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::error!("Invalid tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        Err(e) => {
            log::error!("Cannot read {}: {}", path, e);
            Tuning::default()
        }
    }
}

/// Distance ahead of the character at which the autopilot jumps
fn jump_trigger_distance(tuning: &Tuning) -> f64 {
    // Take off roughly a quarter of the airtime before reaching the obstacle
    let airtime = 2.0 * tuning.jump_impulse / tuning.gravity;
    tuning.game_speed * airtime * 0.25
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Marcy Run (native) starting headless demo...");

    let tuning = load_tuning();
    let trigger = jump_trigger_distance(&tuning);
    let mut game = Game::new(tuning);

    game.push_input(InputEvent::StartRequested);

    let mut now = 0.0;
    let mut hold = 0u32;
    let mut jumps = 0u32;
    let mut frames = 0u32;

    while frames < MAX_FRAMES {
        // Autopilot
        let character = game.character_box();
        let front = character.max().x;
        let threat = game
            .obstacles()
            .iter()
            .filter(|o| !o.hit && o.pos.x >= front)
            .any(|o| o.pos.x - front <= trigger);
        if hold > 0 {
            hold -= 1;
            if hold == 0 {
                game.jump_released();
            }
        } else if threat && game.world().body.is_grounded() {
            game.jump_pressed();
            hold = JUMP_HOLD_FRAMES;
        }

        game.tick(now);
        now += FRAME_MS;
        frames += 1;

        for event in game.drain_events() {
            match event {
                GameEvent::Jump => jumps += 1,
                GameEvent::CoinCollected { coins } => log::debug!("coin! total {}", coins),
                GameEvent::GameOver { score, coins } => {
                    log::info!("crashed at score {} with {} coins", score, coins)
                }
                GameEvent::PhaseChanged { from, to } => log::debug!("{:?} -> {:?}", from, to),
                GameEvent::Land | GameEvent::ScoreTick { .. } => {}
            }
        }

        if game.phase() == GamePhase::GameOver {
            break;
        }
    }

    println!("\nRun summary");
    println!("  frames:    {}", frames);
    println!("  outcome:   {:?}", game.phase());
    println!("  score:     {}", game.score());
    println!("  coins:     {}", game.coins());
    println!("  jumps:     {}", jumps);
    println!("  on screen: {} coins, {} obstacles", game.coin_entities().len(), game.obstacles().len());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts embed the library and drive `Game::tick` from requestAnimationFrame
}
