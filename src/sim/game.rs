//! Meteor game controller
//!
//! Owns one session: counters, meteors, question supply, clock and
//! scheduled tasks. Player actions are the public methods here; the frame
//! loop lives in `tick`.
//!
//! Rules for lives:
//! - a meteor costs at most one life, whichever of a wrong answer or ground
//!   contact happens first
//! - a correct answer destroys the meteor at once, so a ground contact for
//!   it can no longer fire

use std::rc::Rc;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use thiserror::Error;

use super::clock::Clock;
use super::question::Question;
use super::registry::{Entity, EntityRegistry};
use super::schedule::{Scheduler, Task, TaskId};
use super::scoring::{calculate_score, should_earn_bonus_life};
use super::state::{GameEvent, GamePhase, SessionState};
use super::supply::QuestionSupply;
use crate::collab::{ContentStore, GameSource, ProgressSink};
use crate::consts::{LANE_MAX, LANE_MIN};
use crate::content::to_meteor_format;
use crate::summary::GameSummary;
use crate::tuning::Tuning;

/// Why a game could not start
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StartError {
    #[error("no topic selected")]
    NoTopic,

    #[error("topic not found: {0}")]
    TopicNotFound(String),

    #[error("question set is empty")]
    EmptyPool,
}

/// Result of an accepted answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct { points: u64 },
    /// The meteor keeps falling with a new question
    Incorrect { life_lost: bool },
}

/// Salt so lane rolls don't mirror the shuffle stream
const LANE_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// One Meteor Drop session
pub struct Game<P: ProgressSink> {
    pub(super) session: SessionState,
    pub(super) registry: EntityRegistry,
    pub(super) supply: QuestionSupply,
    pub(super) clock: Clock,
    pub(super) scheduler: Scheduler,
    pub(super) tuning: Tuning,
    pub(super) progress: P,
    /// Lane rolls
    pub(super) rng: Pcg32,
    /// Timestamp of the latest frame
    pub(super) now_ms: f64,
    pub(super) frame_task: Option<TaskId>,
    pub(super) spawn_task: Option<TaskId>,
    /// Meteor whose answer is still settling; released on the next frame
    pub(super) answer_lock: Option<u32>,
    pub(super) events: Vec<GameEvent>,
}

impl<P: ProgressSink> Game<P> {
    /// Start a game over an adapted question pool.
    ///
    /// The first meteor is spawned immediately; an empty pool is refused.
    pub fn start(
        pool: Vec<Question>,
        progress: P,
        tuning: Tuning,
        seed: u64,
        now_ms: f64,
    ) -> Result<Self, StartError> {
        if pool.is_empty() {
            return Err(StartError::EmptyPool);
        }

        let mut game = Self {
            session: SessionState::new(tuning.initial_lives.max(1)),
            registry: EntityRegistry::new(tuning.grace_period_ms),
            supply: QuestionSupply::new(pool, seed),
            clock: Clock::new(tuning.max_frame_secs),
            scheduler: Scheduler::new(),
            tuning,
            progress,
            rng: Pcg32::seed_from_u64(seed ^ LANE_SEED_SALT),
            now_ms,
            frame_task: None,
            spawn_task: None,
            answer_lock: None,
            events: Vec::new(),
        };

        log::info!(
            "Meteor game started: {} questions, {} lives (seed {})",
            game.supply.pool_len(),
            game.session.lives,
            seed
        );
        game.arm();
        game.ensure_active();
        Ok(game)
    }

    /// Start a game on the player's current topic
    pub fn from_store(
        store: &impl ContentStore,
        progress: P,
        tuning: Tuning,
        seed: u64,
        now_ms: f64,
    ) -> Result<Self, StartError> {
        let topic = store.current_topic().ok_or(StartError::NoTopic)?;
        let content = store
            .content(&topic)
            .ok_or_else(|| StartError::TopicNotFound(topic.clone()))?;
        let pool: Vec<Question> = content.items.iter().map(to_meteor_format).collect();
        log::info!("Loaded topic '{}' ({} items)", topic, pool.len());
        Self::start(pool, progress, tuning, seed, now_ms)
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    /// Meteors to draw, including destroyed ones still exploding
    pub fn entities(&self) -> &[Entity] {
        self.registry.entities()
    }

    pub fn active_entity(&self) -> Option<&Entity> {
        self.registry.active_entity()
    }

    pub fn is_answer_locked(&self) -> bool {
        self.answer_lock.is_some()
    }

    pub fn progress(&self) -> &P {
        &self.progress
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary::from_session(&self.session)
    }

    /// True while any frame or spawn task is registered
    pub fn has_scheduled_tasks(&self) -> bool {
        !self.scheduler.is_empty()
    }

    /// Events since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Answer the active meteor with the option at `option_index`.
    ///
    /// Returns `None` when the answer is ignored: not playing, no active
    /// meteor, the previous answer still settling, or no such option.
    pub fn submit_answer(&mut self, option_index: usize) -> Option<AnswerOutcome> {
        if !self.session.is_playing() {
            log::debug!("Answer ignored: game is {:?}", self.session.phase);
            return None;
        }
        if let Some(locked) = self.answer_lock {
            log::debug!("Answer ignored: meteor {} still settling", locked);
            return None;
        }
        let Some(entity) = self.registry.active_entity() else {
            log::debug!("Answer ignored: no active meteor");
            return None;
        };
        let entity_id = entity.id;
        let position = entity.position;
        let question = Rc::clone(&entity.question.question);
        let is_correct = question.is_correct_option(option_index)?;

        self.answer_lock = Some(entity_id);
        self.session.questions_answered += 1;

        let outcome = if is_correct {
            self.answer_correct(entity_id, position, &question)
        } else {
            self.answer_wrong(entity_id, &question)
        };
        Some(outcome)
    }

    fn answer_correct(&mut self, entity_id: u32, position: f32, question: &Question) -> AnswerOutcome {
        let points = calculate_score(question.difficulty, position, self.session.streak);
        self.registry.mark_destroyed(entity_id, self.now_ms);
        self.session.record_correct(points);
        log::debug!(
            "Meteor {} answered correctly at {:.1}: +{} (streak {})",
            entity_id,
            position,
            points,
            self.session.streak
        );
        self.events.push(GameEvent::Correct { entity_id, points });

        if should_earn_bonus_life(self.session.correct_answers) {
            self.session.lives += 1;
            log::info!("Bonus life! Lives: {}", self.session.lives);
            self.events.push(GameEvent::BonusLife);
        }

        self.progress
            .update_progress(&question.id, true, GameSource::Meteor);
        self.ensure_active();
        AnswerOutcome::Correct { points }
    }

    fn answer_wrong(&mut self, entity_id: u32, question: &Question) -> AnswerOutcome {
        self.session.streak = 0;
        if let Some(fresh) = self.supply.next_question() {
            self.registry.replace_question(entity_id, fresh);
        }
        let life_lost = self.registry.charge_life(entity_id);
        log::debug!(
            "Meteor {} answered wrong (life lost: {})",
            entity_id,
            life_lost
        );
        self.progress
            .update_progress(&question.id, false, GameSource::Meteor);
        self.events.push(GameEvent::Wrong {
            entity_id,
            life_lost,
        });

        if life_lost && self.session.lose_life() {
            self.on_game_over();
        }
        AnswerOutcome::Incorrect { life_lost }
    }

    /// A meteor reached the ground (reported once per meteor by the clock)
    pub(super) fn handle_ground_impact(&mut self, entity_id: u32) {
        let Some(entity) = self.registry.get(entity_id) else {
            return;
        };
        if entity.destroyed {
            log::debug!("Ground impact for destroyed meteor {} ignored", entity_id);
            return;
        }
        let question = Rc::clone(&entity.question.question);

        self.session.streak = 0;
        let life_lost = self.registry.charge_life(entity_id);
        self.registry.mark_destroyed(entity_id, self.now_ms);
        log::debug!(
            "Meteor {} hit the ground (life lost: {})",
            entity_id,
            life_lost
        );
        self.progress
            .update_progress(&question.id, false, GameSource::Meteor);
        self.events.push(GameEvent::GroundImpact {
            entity_id,
            life_lost,
        });

        if life_lost && self.session.lose_life() {
            self.on_game_over();
            return;
        }
        self.ensure_active();
    }

    /// Toggle between playing and paused. No effect after game over.
    pub fn pause(&mut self) {
        match self.session.phase {
            GamePhase::Playing => {
                self.session.phase = GamePhase::Paused;
                self.disarm();
                log::info!("Paused");
                self.events.push(GameEvent::Paused);
            }
            GamePhase::Paused => {
                self.session.phase = GamePhase::Playing;
                self.arm();
                log::info!("Resumed");
                self.events.push(GameEvent::Resumed);
                self.ensure_active();
            }
            GamePhase::GameOver => {}
        }
    }

    /// Fresh run on the same question set
    pub fn play_again(&mut self) {
        self.disarm();
        self.scheduler.cancel_all();
        self.session = SessionState::new(self.tuning.initial_lives.max(1));
        self.registry.clear();
        self.answer_lock = None;
        self.supply.reshuffle();
        self.events.clear();
        log::info!("Play again");
        self.arm();
        self.ensure_active();
    }

    /// Leave the game. Nothing is saved; the progress sink is handed back.
    pub fn return_to_menu(mut self) -> (GameSummary, P) {
        self.disarm();
        self.scheduler.cancel_all();
        let summary = self.summary();
        log::info!(
            "Returned to menu (score {}, {} answered)",
            summary.score,
            summary.questions_answered
        );
        (summary, self.progress)
    }

    /// Register the frame callback.
    ///
    /// The host may have sent no frames while paused, so `now_ms` can be
    /// stale here. The clock measures from the next frame and the spawn
    /// timer is started by it.
    fn arm(&mut self) {
        self.clock.stop();
        self.frame_task = Some(self.scheduler.schedule(Task::AnimationFrame, self.now_ms));
    }

    /// Cancel the frame callback and spawn timer
    fn disarm(&mut self) {
        if let Some(id) = self.frame_task.take() {
            self.scheduler.cancel(id);
        }
        if let Some(id) = self.spawn_task.take() {
            self.scheduler.cancel(id);
        }
        self.clock.stop();
    }

    fn on_game_over(&mut self) {
        self.disarm();
        self.scheduler.cancel_all();
        log::info!(
            "Game over: score {}, {} correct of {}",
            self.session.score,
            self.session.correct_answers,
            self.session.questions_answered
        );
        self.events.push(GameEvent::GameOver);
    }

    /// Spawn a replacement when nothing is answerable.
    ///
    /// Checks the registry first, so repeated calls for one vacancy spawn
    /// one meteor.
    pub(super) fn ensure_active(&mut self) {
        if !self.session.is_playing() || self.session.lives == 0 {
            return;
        }
        if self.registry.active_entity().is_none() {
            self.spawn_entity();
        }
    }

    pub(super) fn spawn_entity(&mut self) -> Option<u32> {
        let Some(question) = self.supply.next_question() else {
            log::warn!("No question available to spawn");
            return None;
        };
        let x = self.rng.random_range(LANE_MIN..LANE_MAX);
        let entity = self.registry.spawn(question, x);
        let entity_id = entity.id;
        log::debug!(
            "Spawned meteor {} ({}, active: {})",
            entity_id,
            entity.difficulty().as_str(),
            entity.is_active
        );
        self.events.push(GameEvent::Spawned { entity_id });
        Some(entity_id)
    }
}
