//! Scheduling policy: the enumeration grid, the exclusion rules, and the
//! scoring weights.
//!
//! Every constant that shapes slot selection lives here so the policy can be
//! tuned (or loaded from a config file) without touching the algorithms.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};

/// Upper bound accepted for [`SlotPolicy::max_window_days`].
pub const MAX_WINDOW_DAYS_LIMIT: i64 = 366;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Weights for the additive slot score. Lower scores win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Multiplied by the civil start hour (0-23).
    pub hour_weight: u32,
    /// Added when the start hour falls outside working hours.
    pub off_hours_penalty: u32,
    /// First working hour (inclusive).
    pub working_hours_start: u32,
    /// Last working hour (inclusive).
    pub working_hours_end: u32,
    /// Gap, in minutes, below which a neighbouring commitment is "too close".
    pub buffer_minutes: i64,
    pub buffer_penalty: u32,
    /// Forward gaps strictly between zero and this many minutes are awkward.
    pub awkward_gap_minutes: i64,
    pub awkward_gap_penalty: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            hour_weight: 2,
            off_hours_penalty: 20,
            working_hours_start: 9,
            working_hours_end: 17,
            buffer_minutes: 15,
            buffer_penalty: 10,
            awkward_gap_minutes: 30,
            awkward_gap_penalty: 5,
        }
    }
}

/// Grid, exclusions and bounds for candidate discovery, plus the scoring
/// weights.
///
/// # Examples
///
/// ```
/// use slot_engine::SlotPolicy;
///
/// let policy = SlotPolicy::default();
/// assert_eq!(policy.step().num_minutes(), 15);
/// assert_eq!(policy.excluded_start_hour, Some(12));
/// assert!(policy.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotPolicy {
    /// Distance between consecutive candidate starts.
    pub step_minutes: i64,
    /// Daily exclusion window `[lunch_start, lunch_end)` on the slot's start day.
    pub lunch_start: NaiveTime,
    pub lunch_end: NaiveTime,
    /// Candidates whose civil start hour equals this are dropped. Checked
    /// independently of the lunch window.
    pub excluded_start_hour: Option<u32>,
    /// Longest search window accepted, in days.
    pub max_window_days: i64,
    pub weights: ScoreWeights,
}

impl Default for SlotPolicy {
    fn default() -> Self {
        Self {
            step_minutes: 15,
            lunch_start: NaiveTime::from_hms_opt(13, 0, 0).unwrap_or(NaiveTime::MIN),
            lunch_end: NaiveTime::from_hms_opt(14, 0, 0).unwrap_or(NaiveTime::MIN),
            excluded_start_hour: Some(12),
            max_window_days: 31,
            weights: ScoreWeights::default(),
        }
    }
}

impl SlotPolicy {
    pub fn step(&self) -> Duration {
        Duration::minutes(self.step_minutes)
    }

    pub fn max_window(&self) -> Duration {
        Duration::days(self.max_window_days)
    }

    /// Reject settings under which discovery would loop forever or the
    /// exclusion rules would be meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.step_minutes <= 0 {
            return Err(SchedulerError::InvalidPolicy(format!(
                "step must be positive, got {} minutes",
                self.step_minutes
            )));
        }
        if self.lunch_end <= self.lunch_start {
            return Err(SchedulerError::InvalidPolicy(format!(
                "lunch window end {} must be after start {}",
                self.lunch_end, self.lunch_start
            )));
        }
        if let Some(hour) = self.excluded_start_hour {
            if hour > 23 {
                return Err(SchedulerError::InvalidPolicy(format!(
                    "excluded start hour must be 0-23, got {hour}"
                )));
            }
        }
        if self.max_window_days <= 0 || self.max_window_days > MAX_WINDOW_DAYS_LIMIT {
            return Err(SchedulerError::InvalidPolicy(format!(
                "max window must be 1-{MAX_WINDOW_DAYS_LIMIT} days, got {}",
                self.max_window_days
            )));
        }
        if self.step_minutes > self.max_window_days * MINUTES_PER_DAY {
            return Err(SchedulerError::InvalidPolicy(format!(
                "step of {} minutes exceeds the {} day max window",
                self.step_minutes, self.max_window_days
            )));
        }
        if self.weights.working_hours_start > self.weights.working_hours_end {
            return Err(SchedulerError::InvalidPolicy(format!(
                "working hours {}-{} are inverted",
                self.weights.working_hours_start, self.weights.working_hours_end
            )));
        }
        Ok(())
    }
}
