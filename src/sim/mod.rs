//! Meteor Drop simulation
//!
//! All gameplay logic lives here:
//! - Single-threaded; the host drives time through `Game::frame`
//! - Seeded RNG only
//! - Meteors kept in id order, the oldest live one is the answerable one
//! - No rendering or storage dependencies

pub mod clock;
pub mod game;
pub mod question;
pub mod registry;
pub mod schedule;
pub mod scoring;
pub mod state;
pub mod supply;
pub mod tick;

pub use clock::Clock;
pub use game::{AnswerOutcome, Game, StartError};
pub use question::{Difficulty, Question, QuestionInstance};
pub use registry::{Entity, EntityRegistry};
pub use schedule::{Scheduler, Task, TaskId};
pub use scoring::{calculate_score, should_earn_bonus_life, streak_multiplier};
pub use state::{GameEvent, GamePhase, SessionState};
pub use supply::QuestionSupply;
