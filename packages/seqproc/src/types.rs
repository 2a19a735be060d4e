// Run vocabulary shared by the processor and its consumers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single unit of work. Only its numeric value is carried.
pub type WorkItem = f64;

/// Lifecycle of a run: `NotStarted -> Running -> {Completed | Cancelled | Failed}`.
///
/// A [`RunOutcome`] only ever carries `Completed` or `Cancelled`; `Failed`
/// is the state of a batch rejected by validation, and `NotStarted` the
/// state of one that passed validation but has not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    NotStarted,
    Running,
    Completed,
    Cancelled,
    Failed,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunState::Completed | RunState::Cancelled | RunState::Failed
        )
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::NotStarted => write!(f, "not_started"),
            RunState::Running => write!(f, "running"),
            RunState::Completed => write!(f, "completed"),
            RunState::Cancelled => write!(f, "cancelled"),
            RunState::Failed => write!(f, "failed"),
        }
    }
}

/// Reported after each processed item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    /// Items processed so far, including the one just finished
    pub processed: usize,
    /// Size of the batch
    pub total: usize,
    pub percentage: f64,
}

impl ProgressEvent {
    pub fn new(processed: usize, total: usize) -> Self {
        let percentage = if total > 0 {
            (processed as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        Self {
            processed,
            total,
            percentage,
        }
    }

    pub fn is_last(&self) -> bool {
        self.processed == self.total
    }
}

impl std::fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.processed, self.total)
    }
}

/// Terminal report of a run that did not fail validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutcome {
    pub run_id: String,
    pub state: RunState,
    pub processed: usize,
    pub total: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        self.state == RunState::Completed
    }

    pub fn is_cancelled(&self) -> bool {
        self.state == RunState::Cancelled
    }

    /// Items left untouched because the run was cancelled.
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.processed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percentage() {
        let event = ProgressEvent::new(2, 5);
        assert_eq!(event.percentage, 40.0);
        assert!(!event.is_last());
        assert_eq!(event.to_string(), "2/5");

        assert!(ProgressEvent::new(5, 5).is_last());
        assert_eq!(ProgressEvent::new(0, 0).percentage, 0.0);
    }

    #[test]
    fn test_remaining_with_inconsistent_counts() {
        let outcome: RunOutcome = serde_json::from_value(serde_json::json!({
            "runId": "r",
            "state": "completed",
            "processed": 3,
            "total": 2,
            "startedAt": "2026-01-01T00:00:00Z",
            "finishedAt": "2026-01-01T00:00:01Z",
            "elapsedMs": 1000,
        }))
        .unwrap();
        assert_eq!(outcome.remaining(), 0);
    }

    #[test]
    fn test_state_terminality() {
        assert!(!RunState::NotStarted.is_terminal());
        assert!(!RunState::Running.is_terminal());
        assert!(RunState::Completed.is_terminal());
        assert!(RunState::Cancelled.is_terminal());
        assert!(RunState::Failed.is_terminal());
    }

    #[test]
    fn test_state_serialization_matches_display() {
        for state in [
            RunState::NotStarted,
            RunState::Running,
            RunState::Completed,
            RunState::Cancelled,
            RunState::Failed,
        ] {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{}\"", state));
        }
    }
}
