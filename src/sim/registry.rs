//! Meteor registry
//!
//! Single owner of every in-flight meteor. Keeps entities sorted by id and
//! maintains the rule that exactly the oldest surviving meteor is active.

use super::question::{Difficulty, QuestionInstance};
use crate::consts::SPAWN_POSITION;

/// A falling, question-bearing meteor
#[derive(Debug, Clone)]
pub struct Entity {
    /// Monotonic id, never reused within a game
    pub id: u32,
    pub question: QuestionInstance,
    /// Vertical progress, SPAWN_POSITION..=100 (percent from top)
    pub position: f32,
    /// Horizontal lane (percent from left), fixed at spawn
    pub x: f32,
    pub destroyed: bool,
    /// The one meteor the player can answer
    pub is_active: bool,
    /// Set when destroyed; drives the purge after the grace period
    pub destroyed_at_ms: Option<f64>,
    /// This meteor already cost the player a life
    pub life_charged: bool,
    /// Ground contact already reported
    pub impacted: bool,
}

impl Entity {
    pub fn difficulty(&self) -> Difficulty {
        self.question.difficulty()
    }
}

/// Owner of all meteors in the current game
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    /// Sorted by id (spawn order)
    entities: Vec<Entity>,
    next_id: u32,
    grace_period_ms: f64,
}

impl EntityRegistry {
    pub fn new(grace_period_ms: f64) -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
            grace_period_ms,
        }
    }

    /// Allocate a new entity id
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// All meteors still held, destroyed ones included until purged
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn get(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    fn get_mut(&mut self, id: u32) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// The answerable meteor, if any
    pub fn active_entity(&self) -> Option<&Entity> {
        self.entities.iter().find(|e| e.is_active && !e.destroyed)
    }

    /// Create a meteor at the spawn position
    pub fn spawn(&mut self, question: QuestionInstance, x: f32) -> &Entity {
        let id = self.next_entity_id();
        self.entities.push(Entity {
            id,
            question,
            position: SPAWN_POSITION,
            x,
            destroyed: false,
            is_active: false,
            destroyed_at_ms: None,
            life_charged: false,
            impacted: false,
        });
        self.recompute_active();
        &self.entities[self.entities.len() - 1]
    }

    /// Destroy a meteor. Returns false if it was unknown or already destroyed.
    pub fn mark_destroyed(&mut self, id: u32, now_ms: f64) -> bool {
        let Some(entity) = self.get_mut(id) else {
            return false;
        };
        if entity.destroyed {
            return false;
        }
        entity.destroyed = true;
        entity.is_active = false;
        entity.destroyed_at_ms = Some(now_ms);
        self.recompute_active();
        true
    }

    /// Swap the question on a live meteor, keeping its id and position
    pub fn replace_question(&mut self, id: u32, question: QuestionInstance) -> bool {
        match self.get_mut(id) {
            Some(entity) if !entity.destroyed => {
                entity.question = question;
                true
            }
            _ => false,
        }
    }

    /// Record that this meteor cost a life. Returns false if it already had.
    pub fn charge_life(&mut self, id: u32) -> bool {
        match self.get_mut(id) {
            Some(entity) if !entity.life_charged => {
                entity.life_charged = true;
                true
            }
            _ => false,
        }
    }

    /// Move every live meteor by `delta_for(difficulty)`.
    ///
    /// Returns ids that reached `ground` on this call, each reported once in
    /// its lifetime.
    pub fn advance_positions(
        &mut self,
        delta_for: impl Fn(Difficulty) -> f32,
        ground: f32,
    ) -> Vec<u32> {
        let mut impacts = Vec::new();
        for entity in self.entities.iter_mut().filter(|e| !e.destroyed) {
            entity.position += delta_for(entity.difficulty());
            if entity.position >= ground && !entity.impacted {
                entity.impacted = true;
                impacts.push(entity.id);
            }
        }
        impacts
    }

    /// Drop meteors destroyed at least one grace period ago
    pub fn purge_destroyed(&mut self, now_ms: f64) -> usize {
        let grace = self.grace_period_ms;
        let before = self.entities.len();
        self.entities.retain(|e| match e.destroyed_at_ms {
            Some(at) => now_ms - at < grace,
            None => true,
        });
        before - self.entities.len()
    }

    /// Remove everything (ids keep counting up)
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Oldest surviving meteor becomes the only active one
    fn recompute_active(&mut self) {
        let active_id = self.entities.iter().find(|e| !e.destroyed).map(|e| e.id);
        for entity in &mut self.entities {
            entity.is_active = Some(entity.id) == active_id;
        }
    }
}
