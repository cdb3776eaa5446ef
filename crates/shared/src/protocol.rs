use serde::{Deserialize, Serialize};

use crate::domain::{ContestType, Language, ProblemSelection};

/// A single backend command, encoded as `{"command": "<name>", "args": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "args", rename_all = "snake_case")]
pub enum CommandRequest {
    GetDirectory,
    SetDirectory {
        directory: String,
    },
    GetEditor,
    SetEditor {
        editor: String,
    },
    GetLanguage,
    SetLanguage {
        language: Language,
    },
    GetContestType,
    SetContestType {
        contest_type: ContestType,
    },
    GetProblemType,
    SetProblemType {
        problem_types: ProblemSelection,
    },
    GetShowSolved,
    SetShowSolved {
        show_solved: bool,
    },
    Next,
    Previous,
    GetProblem,
    Run,
    Submit,
    CreateFile,
    OpenFile,
    UpdateProblemsList,
    SaveState,
}

impl CommandRequest {
    pub fn name(&self) -> &'static str {
        match self {
            CommandRequest::GetDirectory => "get_directory",
            CommandRequest::SetDirectory { .. } => "set_directory",
            CommandRequest::GetEditor => "get_editor",
            CommandRequest::SetEditor { .. } => "set_editor",
            CommandRequest::GetLanguage => "get_language",
            CommandRequest::SetLanguage { .. } => "set_language",
            CommandRequest::GetContestType => "get_contest_type",
            CommandRequest::SetContestType { .. } => "set_contest_type",
            CommandRequest::GetProblemType => "get_problem_type",
            CommandRequest::SetProblemType { .. } => "set_problem_type",
            CommandRequest::GetShowSolved => "get_show_solved",
            CommandRequest::SetShowSolved { .. } => "set_show_solved",
            CommandRequest::Next => "next",
            CommandRequest::Previous => "previous",
            CommandRequest::GetProblem => "get_problem",
            CommandRequest::Run => "run",
            CommandRequest::Submit => "submit",
            CommandRequest::CreateFile => "create_file",
            CommandRequest::OpenFile => "open_file",
            CommandRequest::UpdateProblemsList => "update_problems_list",
            CommandRequest::SaveState => "save_state",
        }
    }
}
