//! Meteor Drop headless runner
//!
//! Loads a pasted question set and plays it with a scripted player at a
//! fixed 60 fps, then prints the run summary. Useful for checking a question
//! set and for tuning.
//!
//! Usage: meteor-drop <questions.json> [seed]

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use meteor_drop::collab::ProgressTally;
use meteor_drop::{Game, GameEvent, JsonContentStore, Tuning};

const FRAME_MS: f64 = 1000.0 / 60.0;
/// Five minutes of play
const MAX_FRAMES: u32 = 60 * 60 * 5;
/// How often the scripted player picks the right option
const PLAYER_ACCURACY: f64 = 0.8;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: meteor-drop <questions.json> [seed]");
        std::process::exit(2);
    };
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(rand::random);

    let store = match JsonContentStore::from_path(&path) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Failed to load {}: {}", path, e);
            std::process::exit(1);
        }
    };
    for problem in store.loaded().problems() {
        log::warn!("{}", problem);
    }

    let tally = ProgressTally::default();
    let mut game = match Game::from_store(&store, tally, Tuning::default(), seed, 0.0) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Cannot start: {}", e);
            std::process::exit(1);
        }
    };

    let mut player = Pcg32::seed_from_u64(seed.wrapping_add(1));
    // Position at which the player commits to an answer for the active meteor
    let mut think_until: Option<(u32, f32)> = None;

    for frame in 1..=MAX_FRAMES {
        game.frame(frame as f64 * FRAME_MS);
        if game.session().is_over() {
            break;
        }

        let choice = game.active_entity().and_then(|meteor| {
            let (id, wait_for) = match think_until {
                Some((id, pos)) if id == meteor.id => (id, pos),
                _ => (meteor.id, player.random_range(0.0..70.0)),
            };
            think_until = Some((id, wait_for));
            if meteor.position < wait_for || game.is_answer_locked() {
                return None;
            }
            let question = &meteor.question.question;
            let correct = question.correct_index()?;
            if player.random_bool(PLAYER_ACCURACY) || question.options.len() < 2 {
                Some(correct)
            } else {
                Some((correct + 1) % question.options.len())
            }
        });
        if let Some(option) = choice {
            think_until = None;
            game.submit_answer(option);
        }

        for event in game.drain_events() {
            match event {
                GameEvent::BonusLife => log::info!("frame {}: bonus life", frame),
                GameEvent::GroundImpact { entity_id, .. } => {
                    log::info!("frame {}: meteor {} hit the ground", frame, entity_id)
                }
                _ => {}
            }
        }
    }

    let (summary, tally) = game.return_to_menu();
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode summary: {}", e),
    }
    log::info!(
        "Progress reported: {} attempts, {} correct across {} questions",
        tally.total_attempts(),
        tally.total_correct(),
        tally.questions.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The game is driven by the host page on wasm; nothing to run here
}
