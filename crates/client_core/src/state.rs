//! The explicit session state owned by a [`crate::ContestClient`].

use shared::domain::{ContestType, Language, Problem, ProblemSelection};

use crate::view::SessionViewState;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectSession {
    /// Project root; empty while no project is open.
    pub directory: String,
    /// Editor executable; empty until one is chosen.
    pub editor: String,
}

impl ProjectSession {
    pub fn is_open(&self) -> bool {
        !self.directory.is_empty()
    }

    pub fn has_editor(&self) -> bool {
        !self.editor.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemFilter {
    pub contest_type: ContestType,
    pub problem_ids: ProblemSelection,
    pub show_solved: bool,
}

impl ProblemFilter {
    pub fn hide_solved(&self) -> bool {
        !self.show_solved
    }
}

impl Default for ProblemFilter {
    fn default() -> Self {
        Self {
            contest_type: ContestType::default(),
            problem_ids: ProblemSelection::default(),
            show_solved: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub project: ProjectSession,
    pub filter: ProblemFilter,
    pub language: Language,
    pub problem: Option<Problem>,
    pub view: SessionViewState,
}

impl SessionState {
    pub(crate) fn replace_problem(&mut self, problem: Problem) {
        self.problem = Some(problem);
        self.view.reset();
    }
}
