//! Current-problem tracking: refresh, cursor movement and filter changes.

use shared::domain::{ContestType, Language, Problem, ProblemSelection};
use tracing::{debug, info};

use crate::{gateway::GatewayResult, state::SessionState, ClientEvent, ContestClient};

/// A persisted selector change. Applying one always ends with a refresh of
/// the current problem, whatever the backend said about the change itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FilterChange {
    ContestType(ContestType),
    ProblemTypes(ProblemSelection),
    ShowSolved(bool),
    Language(Language),
}

impl FilterChange {
    async fn persist(&self, client: &ContestClient) -> GatewayResult<()> {
        match self {
            FilterChange::ContestType(contest_type) => {
                client.gateway.set_contest_type(*contest_type).await
            }
            FilterChange::ProblemTypes(selection) => client.gateway.set_problem_type(selection).await,
            FilterChange::ShowSolved(show_solved) => {
                client.gateway.set_show_solved(*show_solved).await
            }
            FilterChange::Language(language) => client.gateway.set_language(*language).await,
        }
    }

    fn apply(&self, state: &mut SessionState) {
        match self {
            FilterChange::ContestType(contest_type) => state.filter.contest_type = *contest_type,
            FilterChange::ProblemTypes(selection) => state.filter.problem_ids = selection.clone(),
            FilterChange::ShowSolved(show_solved) => state.filter.show_solved = *show_solved,
            FilterChange::Language(language) => state.language = *language,
        }
    }

    fn notice(&self) -> Option<(&'static str, String)> {
        match self {
            FilterChange::ContestType(contest_type) => {
                Some(("contest_set", format!("contest type set to {contest_type}")))
            }
            FilterChange::ProblemTypes(selection) => {
                let labels: Vec<_> = selection.ids().iter().map(|id| id.as_str()).collect();
                Some((
                    "problem_set",
                    format!("problem types set to {}", labels.join(", ")),
                ))
            }
            FilterChange::ShowSolved(_) => None,
            FilterChange::Language(language) => {
                Some(("language_set", format!("language set to {}", language.id())))
            }
        }
    }
}

impl ContestClient {
    /// Fetches the backend's current problem.
    ///
    /// A new snapshot replaces the problem and resets the result view. When
    /// the backend has no problem, or the call fails, the displayed problem
    /// and view are left untouched and `None` is returned.
    pub async fn refresh_current_problem(&self) -> Option<Problem> {
        match self.gateway.get_problem().await {
            Ok(Some(problem)) => {
                {
                    let mut state = self.state.lock().await;
                    state.replace_problem(problem.clone());
                }
                info!(problem = %problem.heading(), "current problem replaced");
                self.emit(ClientEvent::ProblemReplaced(problem.clone()));
                Some(problem)
            }
            Ok(None) => {
                debug!("backend has no current problem; keeping displayed problem");
                None
            }
            Err(err) => {
                self.report_failure(&err);
                None
            }
        }
    }

    /// Moves the backend cursor forward, then refreshes.
    pub async fn advance(&self) -> bool {
        let moved = self.gateway.next().await;
        self.after_move(moved).await
    }

    /// Moves the backend cursor back, then refreshes.
    pub async fn retreat(&self) -> bool {
        let moved = self.gateway.previous().await;
        self.after_move(moved).await
    }

    async fn after_move(&self, moved: GatewayResult<()>) -> bool {
        let moved = match moved {
            Ok(()) => true,
            Err(err) => {
                self.report_failure(&err);
                false
            }
        };
        self.refresh_current_problem().await;
        moved
    }

    pub async fn set_contest_type(&self, contest_type: ContestType) -> bool {
        self.apply_filter_change(FilterChange::ContestType(contest_type))
            .await
    }

    /// The selection is capped at [`ProblemSelection::MAX_SELECTED`] ids before
    /// anything is sent.
    pub async fn set_problem_type_filter(&self, ids: impl Into<ProblemSelection>) -> bool {
        self.apply_filter_change(FilterChange::ProblemTypes(ids.into()))
            .await
    }

    pub async fn set_show_solved(&self, show_solved: bool) -> bool {
        self.apply_filter_change(FilterChange::ShowSolved(show_solved))
            .await
    }

    /// Inverse view of [`ContestClient::set_show_solved`], matching the
    /// "hide solved" toggle.
    pub async fn set_hide_solved(&self, hide_solved: bool) -> bool {
        self.set_show_solved(!hide_solved).await
    }

    pub async fn set_language(&self, language: Language) -> bool {
        self.apply_filter_change(FilterChange::Language(language))
            .await
    }

    pub(crate) async fn apply_filter_change(&self, change: FilterChange) -> bool {
        let persisted = match change.persist(self).await {
            Ok(()) => {
                change.apply(&mut *self.state.lock().await);
                if let Some((id, message)) = change.notice() {
                    self.notify(id, message);
                }
                true
            }
            Err(err) => {
                self.report_failure(&err);
                false
            }
        };
        self.refresh_current_problem().await;
        persisted
    }
}

#[cfg(test)]
#[path = "tests/navigator_tests.rs"]
mod tests;
