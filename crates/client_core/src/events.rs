//! Events the core emits towards its host adapter.

use chrono::{DateTime, Utc};
use shared::domain::Problem;

use crate::{
    gateway::{FailureKind, GatewayError},
    view::AggregateVerdict,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowLayout {
    /// No project open: the small project picker window.
    Landing,
    /// A project is open: the full working window.
    Workspace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Info,
    Error,
}

/// Non-blocking, identifier-keyed notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub id: String,
    pub level: DiagnosticLevel,
    pub kind: Option<FailureKind>,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Diagnostic {
    pub fn info(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            level: DiagnosticLevel::Info,
            kind: None,
            message: message.into(),
            raised_at: Utc::now(),
        }
    }

    pub fn error(id: impl Into<String>, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            level: DiagnosticLevel::Error,
            kind: Some(kind),
            message: message.into(),
            raised_at: Utc::now(),
        }
    }

    pub fn from_gateway(id: impl Into<String>, err: &GatewayError) -> Self {
        Self::error(id, err.kind(), err.message())
    }
}

#[derive(Debug, Clone)]
pub enum ClientEvent {
    WindowLayout(WindowLayout),
    Diagnostic(Diagnostic),
    ProblemReplaced(Problem),
    VerdictsApplied {
        aggregate: AggregateVerdict,
        cases: usize,
    },
}

/// Host-side list of visible diagnostics. Posting an id that is already
/// shown replaces that entry in place.
#[derive(Debug, Default)]
pub struct DiagnosticBoard {
    entries: Vec<Diagnostic>,
}

impl DiagnosticBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when an entry with the same id was replaced.
    pub fn post(&mut self, diagnostic: Diagnostic) -> bool {
        if let Some(existing) = self.entries.iter_mut().find(|d| d.id == diagnostic.id) {
            *existing = diagnostic;
            return true;
        }
        self.entries.push(diagnostic);
        false
    }

    pub fn dismiss(&mut self, id: &str) -> Option<Diagnostic> {
        let position = self.entries.iter().position(|d| d.id == id)?;
        Some(self.entries.remove(position))
    }

    pub fn get(&self, id: &str) -> Option<&Diagnostic> {
        self.entries.iter().find(|d| d.id == id)
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_identical_failures_replace_instead_of_stacking() {
        let mut board = DiagnosticBoard::new();
        let err = GatewayError::transport("next", "connection refused");

        assert!(!board.post(Diagnostic::from_gateway("cannot_next", &err)));
        assert!(board.post(Diagnostic::from_gateway("cannot_next", &err)));
        assert_eq!(board.len(), 1);
        assert_eq!(
            board.get("cannot_next").and_then(|d| d.kind),
            Some(FailureKind::Transport)
        );
    }

    #[test]
    fn distinct_ids_stack_in_post_order() {
        let mut board = DiagnosticBoard::new();
        board.post(Diagnostic::info("contest_set", "contest type set to ARC"));
        board.post(Diagnostic::error(
            "directory_not_set",
            FailureKind::Validation,
            "The specified directory was not found",
        ));

        let ids: Vec<_> = board.entries().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["contest_set", "directory_not_set"]);
        assert!(board.dismiss("contest_set").is_some());
        assert_eq!(board.len(), 1);
    }
}
