//! Pipeline lifecycle states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The lifecycle state of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    /// Not started.
    #[default]
    Idle,
    /// Request issued, waiting for the response or its decode.
    Loading,
    /// The log pipeline logged every record.
    LoggedSuccess,
    /// The render pipeline updated the view.
    Rendered,
    /// The run failed and the error was reported.
    Failed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::LoggedSuccess => write!(f, "logged_success"),
            Self::Rendered => write!(f, "rendered"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

impl PipelineState {
    /// Returns true if the run has finished.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::LoggedSuccess | Self::Rendered | Self::Failed)
    }

    /// Returns true if the run finished without an error.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::LoggedSuccess | Self::Rendered)
    }

    /// Whether `next` may follow this state.
    #[must_use]
    pub fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Loading)
                | (Self::Loading, Self::LoggedSuccess | Self::Rendered | Self::Failed)
        )
    }

    /// Moves to `next`, logging the transition.
    #[must_use]
    pub fn advance(self, next: Self) -> Self {
        debug_assert!(self.can_transition_to(next), "invalid transition {self} -> {next}");
        tracing::debug!(from = %self, to = %next, "Pipeline state transition");
        next
    }
}
