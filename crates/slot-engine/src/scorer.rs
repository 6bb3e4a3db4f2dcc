//! Slot scoring and selection.
//!
//! Each candidate gets an additive integer score (lower is better) built from
//! its civil start hour and its distance to every existing commitment of every
//! participant. Scores are coarse, so ties are common; the earliest candidate
//! in generation order wins a tie.

use std::collections::HashSet;

use chrono::Timelike;
use serde::Serialize;

use crate::error::{Result, SchedulerError};
use crate::finder::BusyMap;
use crate::interval::{minutes_between, BusyInterval, TimeSlot};
use crate::policy::ScoreWeights;

/// A candidate together with its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoredSlot {
    pub slot: TimeSlot,
    pub score: u32,
}

/// Score a single candidate.
///
/// - `hour_weight * hour` for the civil start hour.
/// - `off_hours_penalty` if the start hour is before `working_hours_start` or
///   after `working_hours_end`.
/// - For each busy interval `e` of each participant:
///   - `buffer_penalty` if `|start - e.end|` or `|e.start - end|`, in whole
///     minutes, is below `buffer_minutes`;
///   - `awkward_gap_penalty` if `start - e.end` is strictly between zero and
///     `awkward_gap_minutes`.
///
/// Per-interval penalties are not capped: a slot wedged between two nearby
/// commitments pays for both. A participant listed twice is counted once.
/// The total saturates at `u32::MAX`.
pub fn score_slot(
    slot: &TimeSlot,
    participants: &[String],
    busy: &BusyMap,
    weights: &ScoreWeights,
) -> u32 {
    let hour = slot.start.hour();
    let mut score = weights.hour_weight.saturating_mul(hour);

    if hour < weights.working_hours_start || hour > weights.working_hours_end {
        score = score.saturating_add(weights.off_hours_penalty);
    }

    let mut seen = HashSet::new();
    for id in participants {
        if !seen.insert(id.as_str()) {
            continue;
        }
        if let Some(intervals) = busy.get(id) {
            score = intervals
                .iter()
                .map(|e| proximity_penalty(slot, e, weights))
                .fold(score, u32::saturating_add);
        }
    }

    score
}

fn proximity_penalty(slot: &TimeSlot, event: &BusyInterval, weights: &ScoreWeights) -> u32 {
    let since_event_end = minutes_between(&slot.start, &event.end);
    let until_event_start = minutes_between(&event.start, &slot.end);

    let mut penalty = 0u32;
    if since_event_end.abs() < weights.buffer_minutes
        || until_event_start.abs() < weights.buffer_minutes
    {
        penalty = penalty.saturating_add(weights.buffer_penalty);
    }
    if since_event_end > 0 && since_event_end < weights.awkward_gap_minutes {
        penalty = penalty.saturating_add(weights.awkward_gap_penalty);
    }
    penalty
}

/// Score every candidate, preserving input order.
pub fn score_candidates(
    candidates: &[TimeSlot],
    participants: &[String],
    busy: &BusyMap,
    weights: &ScoreWeights,
) -> Vec<ScoredSlot> {
    candidates
        .iter()
        .map(|slot| ScoredSlot {
            slot: *slot,
            score: score_slot(slot, participants, busy, weights),
        })
        .collect()
}

/// Pick the lowest-scoring candidate; among equal scores the first one in
/// `candidates` wins.
///
/// # Errors
///
/// Returns [`SchedulerError::NoCandidates`] if `candidates` is empty. Callers
/// are expected to turn an empty discovery result into a conflict before
/// reaching this point.
pub fn select_best(
    candidates: &[TimeSlot],
    participants: &[String],
    busy: &BusyMap,
    weights: &ScoreWeights,
) -> Result<TimeSlot> {
    let scored = score_candidates(candidates, participants, busy, weights);
    let min = scored
        .iter()
        .map(|s| s.score)
        .min()
        .ok_or(SchedulerError::NoCandidates)?;

    scored
        .into_iter()
        .find(|s| s.score == min)
        .map(|s| s.slot)
        .ok_or(SchedulerError::NoCandidates)
}
