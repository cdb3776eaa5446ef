//! Project directory/editor settings, startup restore and file actions.

use tracing::{debug, info};

use crate::{
    events::{Diagnostic, WindowLayout},
    gateway::FailureKind,
    ClientEvent, ContestClient,
};

impl ContestClient {
    /// Restores persisted settings at process start, then loads the current
    /// problem. Each value falls back to its default when its call fails.
    pub async fn restore(&self) {
        let directory = self.gateway.get_directory().await.unwrap_or_else(|err| {
            self.report_failure(&err);
            String::new()
        });
        self.apply_directory(directory).await;

        let editor = self.gateway.get_editor().await.unwrap_or_else(|err| {
            self.report_failure(&err);
            String::new()
        });
        self.state.lock().await.project.editor = editor;

        match self.gateway.get_language().await {
            Ok(language) => self.state.lock().await.language = language,
            Err(err) => self.report_failure(&err),
        }
        match self.gateway.get_contest_type().await {
            Ok(contest_type) => self.state.lock().await.filter.contest_type = contest_type,
            Err(err) => self.report_failure(&err),
        }
        match self.gateway.get_problem_type().await {
            Ok(selection) => self.state.lock().await.filter.problem_ids = selection,
            Err(err) => self.report_failure(&err),
        }
        match self.gateway.get_show_solved().await {
            Ok(show_solved) => self.state.lock().await.filter.show_solved = show_solved,
            Err(err) => self.report_failure(&err),
        }

        self.refresh_current_problem().await;
        debug!("session restored");
    }

    /// Validates and persists a project directory. `""` closes the project.
    pub async fn set_directory(&self, directory: &str) -> bool {
        match self.gateway.set_directory(directory).await {
            Ok(()) => {
                self.apply_directory(directory.to_string()).await;
                true
            }
            Err(err) => {
                self.report_failure_as("directory_not_set", &err);
                false
            }
        }
    }

    pub async fn close_project(&self) -> bool {
        self.set_directory("").await
    }

    /// Emits one layout request per open/closed transition, none otherwise.
    async fn apply_directory(&self, directory: String) {
        let layout = {
            let mut state = self.state.lock().await;
            let was_open = state.project.is_open();
            state.project.directory = directory;
            let is_open = state.project.is_open();
            match (was_open, is_open) {
                (false, true) => Some(WindowLayout::Workspace),
                (true, false) => Some(WindowLayout::Landing),
                _ => None,
            }
        };
        if let Some(layout) = layout {
            info!(?layout, "project open state changed");
            self.emit(ClientEvent::WindowLayout(layout));
        }
    }

    /// Path separators are normalized to `/` before persisting.
    pub async fn set_editor(&self, editor: &str) -> bool {
        let editor = editor.replace('\\', "/");
        match self.gateway.set_editor(&editor).await {
            Ok(()) => {
                self.state.lock().await.project.editor = editor;
                true
            }
            Err(err) => {
                self.report_failure(&err);
                false
            }
        }
    }

    /// Scaffolds the solution file for the current problem and language.
    pub async fn create_file(&self) -> bool {
        match self.gateway.create_file().await {
            Ok(()) => {
                self.notify("file_created", "file created");
                true
            }
            Err(err) => {
                self.report_failure(&err);
                false
            }
        }
    }

    /// Opens the solution file in the configured editor.
    pub async fn open_file(&self) -> bool {
        if !self.state.lock().await.project.has_editor() {
            self.emit(ClientEvent::Diagnostic(Diagnostic::error(
                "editor_not_set",
                FailureKind::Validation,
                "choose an editor before opening the solution file",
            )));
            return false;
        }
        match self.gateway.open_file().await {
            Ok(()) => true,
            Err(err) => {
                self.report_failure(&err);
                false
            }
        }
    }

    pub async fn update_problems_list(&self) -> bool {
        match self.gateway.update_problems_list().await {
            Ok(()) => {
                self.notify("problems_list_updated", "problems list updated");
                true
            }
            Err(err) => {
                self.report_failure(&err);
                false
            }
        }
    }

    /// Called by the host when the window is asked to close.
    pub async fn save_state(&self) -> bool {
        match self.gateway.save_state().await {
            Ok(()) => true,
            Err(err) => {
                self.report_failure(&err);
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
