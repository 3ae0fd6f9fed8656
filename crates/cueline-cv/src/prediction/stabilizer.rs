//! Motion-gated display of shot predictions

use super::ShotPrediction;
use cueline_core::Point;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Phase of the current shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotPhase {
    /// Cue ball at rest; predictions are collected as votes
    #[default]
    Aiming,
    /// Cue ball rolling; the voted prediction is frozen on display
    InMotion,
}

/// What an observation did to the phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseTransition {
    Unchanged,
    /// Aiming -> InMotion
    StartedMoving,
    /// InMotion -> Aiming; the caller resets its contact history
    Settled,
}

/// Two-phase state machine over the cue-ball center history
#[derive(Debug, Clone)]
pub struct ShotStabilizer {
    phase: ShotPhase,
    history: VecDeque<Point>,
    capacity: usize,
    threshold: f64,
    votes: Vec<Option<ShotPrediction>>,
    displayed: Option<ShotPrediction>,
}

impl ShotStabilizer {
    /// `capacity` is raised to 3, the minimum needed to see a settle edge.
    pub fn new(threshold: f64, capacity: usize) -> Self {
        Self {
            phase: ShotPhase::Aiming,
            history: VecDeque::with_capacity(capacity.max(3)),
            capacity: capacity.max(3),
            threshold,
            votes: Vec::new(),
            displayed: None,
        }
    }

    pub fn phase(&self) -> ShotPhase {
        self.phase
    }

    pub fn history(&self) -> &VecDeque<Point> {
        &self.history
    }

    pub fn votes(&self) -> &[Option<ShotPrediction>] {
        &self.votes
    }

    /// The frozen prediction, only while the ball is in motion.
    pub fn displayed(&self) -> Option<&ShotPrediction> {
        match self.phase {
            ShotPhase::InMotion => self.displayed.as_ref(),
            ShotPhase::Aiming => None,
        }
    }

    /// Feed the cue-ball center of a frame where both the cue ball and the
    /// cue were seen.
    pub fn observe(&mut self, center: Point) -> PhaseTransition {
        if self.history.is_empty() {
            self.history.push_back(center);
        }
        self.history.push_back(center);
        while self.history.len() > self.capacity {
            self.history.pop_front();
        }

        let n = self.history.len();
        let step = |i: usize| self.history[i].distance(&self.history[i - 1]);
        let moving_now = step(n - 1) >= self.threshold;
        let moving_before = n > 2 && step(n - 2) >= self.threshold;

        match self.phase {
            ShotPhase::Aiming if moving_now => {
                self.phase = ShotPhase::InMotion;
                self.displayed = majority_vote(&self.votes).cloned();
                debug!(
                    "Cue ball moving, freezing prediction from {} votes",
                    self.votes.len()
                );
                PhaseTransition::StartedMoving
            }
            ShotPhase::InMotion if moving_before && !moving_now => {
                self.phase = ShotPhase::Aiming;
                self.votes.clear();
                self.displayed = None;
                debug!("Cue ball settled, collecting new votes");
                PhaseTransition::Settled
            }
            _ => PhaseTransition::Unchanged,
        }
    }

    /// Buffer one frame's prediction while aiming. Ignored in motion.
    pub fn record(&mut self, prediction: Option<ShotPrediction>) {
        if self.phase == ShotPhase::Aiming {
            self.votes.push(prediction);
        }
    }
}

/// Most frequent prediction, earliest first among equals. Frames without a
/// prediction do not vote.
pub fn majority_vote(votes: &[Option<ShotPrediction>]) -> Option<&ShotPrediction> {
    let mut slots: HashMap<&ShotPrediction, usize> = HashMap::new();
    let mut tallies: Vec<(&ShotPrediction, usize)> = Vec::new();

    for vote in votes.iter().flatten() {
        match slots.get(vote) {
            Some(&slot) => tallies[slot].1 += 1,
            None => {
                slots.insert(vote, tallies.len());
                tallies.push((vote, 1));
            }
        }
    }

    let mut best: Option<(&ShotPrediction, usize)> = None;
    for (prediction, count) in tallies {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((prediction, count));
        }
    }
    best.map(|(prediction, _)| prediction)
}
