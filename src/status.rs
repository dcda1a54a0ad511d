//! Processing status and the progress steps shown while a run is pending.

use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};

/// Where a humanize run currently stands.
///
/// The machine is linear: `Idle -> Analyzing -> Processing -> Completed`,
/// with `Error` reachable from the two busy states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProcessingStatus {
    /// Nothing running.
    #[default]
    Idle,
    /// Simulated analysis pause before the request.
    Analyzing,
    /// Request in flight.
    Processing,
    /// Result available.
    Completed,
    /// Last run failed.
    Error,
}

impl ProcessingStatus {
    /// True while a run is pending and controls should be disabled.
    #[must_use]
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Analyzing | Self::Processing)
    }

    /// Whether moving to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        use ProcessingStatus::{Analyzing, Completed, Error, Idle, Processing};
        matches!(
            (self, next),
            (_, Idle)
                | (Idle | Completed | Error, Analyzing)
                | (Analyzing, Processing)
                | (Processing, Completed)
                | (Analyzing | Processing, Error)
        )
    }

    /// Validate and return the next status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] if the move is not allowed.
    pub fn transition(self, next: Self) -> Result<Self> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(Error::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A cosmetic progress step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingStep {
    /// Stable identifier, `"1"` to `"5"`.
    pub id: &'static str,
    /// Text shown to the user.
    pub label: &'static str,
    /// Whether the step has been ticked off.
    pub completed: bool,
}

const STEP_LABELS: [&str; 5] = [
    "Analyzing AI metadata patterns...",
    "Removing synthetic smoothness...",
    "Injecting natural optical imperfections...",
    "Simulating sensor noise and grain...",
    "Finalizing organic texture reconstruction...",
];

const STEP_IDS: [&str; 5] = ["1", "2", "3", "4", "5"];

/// The step list, all unticked.
#[must_use]
pub fn processing_steps() -> Vec<ProcessingStep> {
    STEP_IDS
        .into_iter()
        .zip(STEP_LABELS)
        .map(|(id, label)| ProcessingStep {
            id,
            label,
            completed: false,
        })
        .collect()
}

/// When step `index` is ticked, measured from the moment the steps appear.
#[must_use]
pub fn step_due_at(index: usize) -> Duration {
    let index = u64::try_from(index).unwrap_or(u64::MAX / 1000);
    Duration::from_millis(index.saturating_mul(1000).saturating_add(500))
}

/// Tick every step that is due after `elapsed`.
pub fn advance_steps(steps: &mut [ProcessingStep], elapsed: Duration) {
    for (i, step) in steps.iter_mut().enumerate() {
        if elapsed >= step_due_at(i) {
            step.completed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ProcessingStatus::{Analyzing, Completed, Error as Failed, Idle, Processing};

    #[test]
    fn happy_path_is_allowed() {
        let s = Idle.transition(Analyzing).unwrap();
        let s = s.transition(Processing).unwrap();
        let s = s.transition(Completed).unwrap();
        assert_eq!(s, Completed);
    }

    #[test]
    fn skipping_states_is_rejected() {
        assert!(Idle.transition(Processing).is_err());
        assert!(Idle.transition(Completed).is_err());
        assert!(Analyzing.transition(Completed).is_err());
        assert!(Completed.transition(Processing).is_err());
        assert!(Idle.transition(Failed).is_err());
    }

    #[test]
    fn busy_states_can_fail_and_finished_states_can_rerun() {
        assert!(Analyzing.can_transition_to(Failed));
        assert!(Processing.can_transition_to(Failed));
        assert!(Failed.can_transition_to(Analyzing));
        assert!(Completed.can_transition_to(Analyzing));
        assert!(!Analyzing.can_transition_to(Analyzing));
    }

    #[test]
    fn any_state_resets_to_idle() {
        for s in [Idle, Analyzing, Processing, Completed, Failed] {
            assert!(s.can_transition_to(Idle));
        }
    }

    #[test]
    fn busy_only_while_pending() {
        assert!(Analyzing.is_busy());
        assert!(Processing.is_busy());
        assert!(!Idle.is_busy());
        assert!(!Completed.is_busy());
        assert!(!Failed.is_busy());
    }

    #[test]
    fn steps_tick_on_half_second_offsets() {
        let mut steps = processing_steps();
        assert_eq!(steps.len(), 5);
        assert!(steps.iter().all(|s| !s.completed));

        advance_steps(&mut steps, Duration::from_millis(499));
        assert!(steps.iter().all(|s| !s.completed));

        advance_steps(&mut steps, Duration::from_millis(1500));
        let done: Vec<_> = steps.iter().map(|s| s.completed).collect();
        assert_eq!(done, [true, true, false, false, false]);

        advance_steps(&mut steps, Duration::from_millis(4500));
        assert!(steps.iter().all(|s| s.completed));
    }
}
