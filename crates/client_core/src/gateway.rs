//! Command boundary between the client core and the contest backend.

use async_trait::async_trait;
use shared::domain::{ContestType, Language, Problem, ProblemSelection, Verdict};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The backend refused the command (bad path, invalid value, no neighbor).
    Validation,
    /// The command channel itself failed.
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("{command} rejected by backend: {message}")]
    Rejected {
        command: &'static str,
        message: String,
    },
    #[error("{command} transport failure: {message}")]
    Transport {
        command: &'static str,
        message: String,
    },
}

impl GatewayError {
    pub fn rejected(command: &'static str, message: impl Into<String>) -> Self {
        Self::Rejected {
            command,
            message: message.into(),
        }
    }

    pub fn transport(command: &'static str, message: impl Into<String>) -> Self {
        Self::Transport {
            command,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Rejected { .. } => FailureKind::Validation,
            Self::Transport { .. } => FailureKind::Transport,
        }
    }

    pub fn command(&self) -> &'static str {
        match self {
            Self::Rejected { command, .. } | Self::Transport { command, .. } => command,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Rejected { message, .. } | Self::Transport { message, .. } => message,
        }
    }
}

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Backend operations reachable from the core.
///
/// Setters resolve to `Ok(())` when the backend accepted and persisted the
/// value. `get_problem` keeps "nothing available" (`Ok(None)`) apart from
/// failures (`Err`).
#[async_trait]
pub trait CommandGateway: Send + Sync {
    async fn get_directory(&self) -> GatewayResult<String>;
    async fn set_directory(&self, directory: &str) -> GatewayResult<()>;
    async fn get_editor(&self) -> GatewayResult<String>;
    async fn set_editor(&self, editor: &str) -> GatewayResult<()>;
    async fn get_language(&self) -> GatewayResult<Language>;
    async fn set_language(&self, language: Language) -> GatewayResult<()>;
    async fn get_contest_type(&self) -> GatewayResult<ContestType>;
    async fn set_contest_type(&self, contest_type: ContestType) -> GatewayResult<()>;
    async fn get_problem_type(&self) -> GatewayResult<ProblemSelection>;
    async fn set_problem_type(&self, selection: &ProblemSelection) -> GatewayResult<()>;
    async fn get_show_solved(&self) -> GatewayResult<bool>;
    /// The backend parameter is `show_solved`, the inverse of the "hide solved" toggle.
    async fn set_show_solved(&self, show_solved: bool) -> GatewayResult<()>;
    async fn next(&self) -> GatewayResult<()>;
    async fn previous(&self) -> GatewayResult<()>;
    async fn get_problem(&self) -> GatewayResult<Option<Problem>>;
    async fn run(&self) -> GatewayResult<Vec<Verdict>>;
    async fn submit(&self) -> GatewayResult<Vec<Verdict>>;
    async fn create_file(&self) -> GatewayResult<()>;
    async fn open_file(&self) -> GatewayResult<()>;
    async fn update_problems_list(&self) -> GatewayResult<()>;
    async fn save_state(&self) -> GatewayResult<()>;
}
