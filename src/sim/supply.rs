//! Endless shuffled question supply
//!
//! The pool is dealt out in a fresh random order each cycle, so every
//! question is seen once before any repeats.

use std::collections::VecDeque;
use std::rc::Rc;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

use super::question::{Question, QuestionInstance};

/// Shuffled working queue over a fixed question pool
#[derive(Debug, Clone)]
pub struct QuestionSupply {
    pool: Vec<Rc<Question>>,
    buffer: VecDeque<QuestionInstance>,
    rng: Pcg32,
    next_instance_id: u64,
    /// Number of refills so far
    cycles: u32,
}

impl QuestionSupply {
    pub fn new(pool: Vec<Question>, seed: u64) -> Self {
        Self {
            pool: pool.into_iter().map(Rc::new).collect(),
            buffer: VecDeque::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_instance_id: 1,
            cycles: 0,
        }
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Append one shuffled pass over the whole pool to the buffer
    pub fn refill_buffer(&mut self) {
        if self.pool.is_empty() {
            return;
        }
        let mut order: Vec<usize> = (0..self.pool.len()).collect();
        order.shuffle(&mut self.rng);
        for idx in order {
            let instance_id = self.next_instance_id;
            self.next_instance_id += 1;
            self.buffer.push_back(QuestionInstance {
                instance_id,
                question: Rc::clone(&self.pool[idx]),
            });
        }
        self.cycles += 1;
        log::debug!(
            "Question buffer refilled (cycle {}, {} questions)",
            self.cycles,
            self.pool.len()
        );
    }

    /// Next question, refilling first if the buffer ran dry.
    /// Only `None` for an empty pool.
    pub fn next_question(&mut self) -> Option<QuestionInstance> {
        if self.buffer.is_empty() {
            self.refill_buffer();
        }
        self.buffer.pop_front()
    }

    /// Throw away the current buffer and deal a new shuffled cycle
    pub fn reshuffle(&mut self) {
        self.buffer.clear();
        self.refill_buffer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Difficulty;
    use std::collections::HashSet;

    fn pool(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question {
                id: format!("q{i}"),
                question: format!("Question {i}?"),
                options: vec![format!("answer {i}")],
                acceptable_answers: vec![format!("answer {i}")],
                difficulty: Difficulty::Medium,
            })
            .collect()
    }

    #[test]
    fn test_exhausted_buffer_reshuffles() {
        let mut supply = QuestionSupply::new(pool(3), 7);

        let first_cycle: Vec<String> = (0..3)
            .map(|_| supply.next_question().unwrap().question.id.clone())
            .collect();
        let unique: HashSet<_> = first_cycle.iter().collect();
        assert_eq!(unique.len(), 3, "each question once per cycle");
        assert_eq!(supply.cycles(), 1);
        assert_eq!(supply.buffered(), 0);

        let fourth = supply.next_question();
        assert!(fourth.is_some());
        assert_eq!(supply.cycles(), 2);
        assert_eq!(supply.buffered(), 2);
    }

    #[test]
    fn test_instance_ids_are_unique_across_cycles() {
        let mut supply = QuestionSupply::new(pool(2), 1);
        let ids: HashSet<u64> = (0..10)
            .map(|_| supply.next_question().unwrap().instance_id)
            .collect();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_empty_pool_yields_nothing() {
        let mut supply = QuestionSupply::new(Vec::new(), 1);
        assert!(supply.next_question().is_none());
        assert_eq!(supply.cycles(), 0);
    }

    #[test]
    fn test_shuffle_is_not_pool_order() {
        // With 20 questions some seed in a handful must break source order
        let ids: Vec<String> = pool(20).into_iter().map(|q| q.id).collect();
        let shuffled_somewhere = (0..5u64).any(|seed| {
            let mut supply = QuestionSupply::new(pool(20), seed);
            let drawn: Vec<String> = (0..20)
                .map(|_| supply.next_question().unwrap().question.id.clone())
                .collect();
            drawn != ids
        });
        assert!(shuffled_somewhere);
    }

    #[test]
    fn test_reshuffle_discards_buffer() {
        let mut supply = QuestionSupply::new(pool(4), 3);
        supply.next_question();
        assert_eq!(supply.buffered(), 3);
        supply.reshuffle();
        assert_eq!(supply.buffered(), 4);
        assert_eq!(supply.cycles(), 2);
    }
}
