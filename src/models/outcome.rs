use std::fmt::{Display, Formatter, Result};

use crate::error::SyncError;

/// What a template needs in order to match its local definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    Create,
    Activate { version_id: String },
    AlreadyActive { version_id: String },
}

impl SyncAction {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, SyncAction::AlreadyActive { .. })
    }
}

impl Display for SyncAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            SyncAction::Create => write!(f, "create new version"),
            SyncAction::Activate { version_id } => write!(f, "activate version {}", version_id),
            SyncAction::AlreadyActive { version_id } => {
                write!(f, "in sync (version {} active)", version_id)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub template_id: String,
    pub name: String,
    pub action: SyncAction,
    /// False when the action was only planned (dry run) or needed no call.
    pub applied: bool,
}

#[derive(Debug)]
pub struct SyncFailure {
    pub template_id: String,
    pub name: String,
    pub error: SyncError,
}

/// Outcome of every reconciliation in one run, in manifest order.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub outcomes: Vec<SyncOutcome>,
    pub failures: Vec<SyncFailure>,
}

impl SyncReport {
    pub fn total(&self) -> usize {
        self.outcomes.len() + self.failures.len()
    }

    pub fn created(&self) -> usize {
        self.count(|action| matches!(action, SyncAction::Create))
    }

    pub fn activated(&self) -> usize {
        self.count(|action| matches!(action, SyncAction::Activate { .. }))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|action| matches!(action, SyncAction::AlreadyActive { .. }))
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn count(&self, predicate: impl Fn(&SyncAction) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| predicate(&outcome.action))
            .count()
    }

    /// Collapses every per-template failure into a single error.
    pub fn into_result(self) -> std::result::Result<Self, SyncError> {
        if self.failures.is_empty() {
            return Ok(self);
        }

        let details = self
            .failures
            .iter()
            .map(|failure| format!("{} ({}): {}", failure.name, failure.template_id, failure.error))
            .collect::<Vec<_>>()
            .join("; ");

        Err(SyncError::Incomplete {
            failed: self.failures.len(),
            total: self.total(),
            details,
        })
    }
}
