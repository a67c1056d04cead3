//! Per-frame processing
//!
//! The host calls `Game::frame` once per animation frame with its clock
//! (e.g. `performance.now()`). Everything time-driven happens here: the
//! answer lock release, purging exploded meteors, moving meteors and the
//! spawn timer.

use super::game::Game;
use super::schedule::{Task, TaskId};
use crate::collab::ProgressSink;

impl<P: ProgressSink> Game<P> {
    /// Process one animation frame at host time `now_ms`
    pub fn frame(&mut self, now_ms: f64) {
        self.now_ms = now_ms;

        // Answers submitted since the last frame have settled
        self.answer_lock = None;

        // Purge runs regardless of phase so explosions finish while paused
        let purged = self.registry.purge_destroyed(now_ms);
        if purged > 0 {
            log::trace!("Purged {} meteors", purged);
        }

        for (id, task) in self.scheduler.take_due(now_ms) {
            match task {
                Task::AnimationFrame => self.on_animation_frame(id, now_ms),
                Task::SpawnTimer => self.on_spawn_timer(id, now_ms),
            }
        }
    }

    fn on_animation_frame(&mut self, id: TaskId, now_ms: f64) {
        // Cancelled earlier in this batch (pause, game over)
        if self.frame_task != Some(id) {
            return;
        }
        self.frame_task = None;

        let impacts = self
            .clock
            .advance(&mut self.registry, now_ms, &self.tuning.fall_speeds);
        for entity_id in impacts {
            if !self.session.is_playing() {
                break;
            }
            self.handle_ground_impact(entity_id);
        }

        if !self.session.is_playing() {
            return;
        }
        self.frame_task = Some(self.scheduler.schedule(Task::AnimationFrame, now_ms));
        // First frame after start or resume
        if self.spawn_task.is_none() {
            self.schedule_spawn(now_ms);
        }
    }

    fn on_spawn_timer(&mut self, id: TaskId, now_ms: f64) {
        if self.spawn_task != Some(id) {
            return;
        }
        self.spawn_task = None;
        if !self.session.is_playing() {
            return;
        }

        if self.session.lives > 0 {
            self.spawn_entity();
        }
        self.schedule_spawn(now_ms);
    }

    fn schedule_spawn(&mut self, now_ms: f64) {
        self.spawn_task = Some(
            self.scheduler
                .schedule(Task::SpawnTimer, now_ms + self.tuning.spawn_interval_ms),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::NullProgress;
    use crate::consts::SPAWN_POSITION;
    use crate::sim::{Difficulty, GamePhase, Question};
    use crate::tuning::Tuning;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn pool() -> Vec<Question> {
        ["alpha", "beta", "gamma"]
            .iter()
            .map(|name| Question {
                id: name.to_string(),
                question: format!("Pick {name}"),
                options: vec![name.to_string(), "wrong".to_string()],
                acceptable_answers: vec![name.to_string()],
                difficulty: Difficulty::Medium,
            })
            .collect()
    }

    fn new_game() -> Game<NullProgress> {
        Game::start(pool(), NullProgress, Tuning::default(), 12345, 0.0).unwrap()
    }

    #[test]
    fn test_frames_advance_active_meteor() {
        let mut game = new_game();
        for i in 1..=60 {
            game.frame(i as f64 * FRAME_MS);
        }
        // The first frame only anchors the clock
        let expected = SPAWN_POSITION + 0.25 * 59.0;
        let position = game.active_entity().unwrap().position;
        assert!((position - expected).abs() < 0.01, "position {position}");
    }

    #[test]
    fn test_spawn_timer_adds_passive_meteors() {
        let mut game = new_game();
        assert_eq!(game.entities().len(), 1);

        // Just past one spawn interval from the first frame
        let mut now = 0.0;
        while now < 3000.0 + 2.0 * FRAME_MS {
            now += FRAME_MS;
            game.frame(now);
        }
        assert_eq!(game.entities().len(), 2);
        let active: Vec<u32> = game
            .entities()
            .iter()
            .filter(|e| e.is_active)
            .map(|e| e.id)
            .collect();
        assert_eq!(active, vec![1]);
    }

    #[test]
    fn test_pause_toggles_and_cancels_tasks() {
        let mut game = new_game();
        game.frame(FRAME_MS);
        assert!(game.has_scheduled_tasks());

        game.pause();
        assert_eq!(game.phase(), GamePhase::Paused);
        assert!(!game.has_scheduled_tasks());

        game.pause();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert!(game.has_scheduled_tasks());
    }

    #[test]
    fn test_spawn_timer_waits_for_first_frame() {
        let mut game = new_game();
        // No frames for a long while after start
        game.frame(10_000.0);
        assert_eq!(game.entities().len(), 1);
        assert_eq!(game.active_entity().unwrap().position, SPAWN_POSITION);

        game.frame(10_000.0 + 2900.0);
        assert_eq!(game.entities().len(), 1);
        game.frame(10_000.0 + 3000.0);
        assert_eq!(game.entities().len(), 2);
    }

    #[test]
    fn test_lock_released_on_next_frame() {
        let mut game = new_game();
        game.frame(FRAME_MS);
        // Wrong answer keeps the meteor alive
        let wrong = game
            .active_entity()
            .unwrap()
            .question
            .question
            .options
            .iter()
            .position(|o| o == "wrong")
            .unwrap();
        assert!(game.submit_answer(wrong).is_some());
        assert!(game.is_answer_locked());
        assert!(game.submit_answer(0).is_none());

        game.frame(2.0 * FRAME_MS);
        assert!(!game.is_answer_locked());
    }
}
