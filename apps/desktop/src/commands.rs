//! Prompt commands typed by the user and queued to the client core.

use anyhow::{bail, Context, Result};
use client_core::ResultTab;
use shared::domain::{ContestType, Language, ProblemSelection};

#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    Open { directory: String },
    Close,
    Editor { path: String },
    Language(Language),
    Contest(ContestType),
    Problems(ProblemSelection),
    HideSolved(bool),
    Next,
    Previous,
    Show,
    Run,
    Submit,
    CreateFile,
    OpenFile,
    UpdateList,
    Tab(ResultTab),
    Case(i64),
    Languages,
    Help,
    Quit,
}

impl HostCommand {
    pub fn name(&self) -> &'static str {
        match self {
            HostCommand::Open { .. } => "open",
            HostCommand::Close => "close",
            HostCommand::Editor { .. } => "editor",
            HostCommand::Language(_) => "lang",
            HostCommand::Contest(_) => "contest",
            HostCommand::Problems(_) => "problems",
            HostCommand::HideSolved(_) => "hide-solved",
            HostCommand::Next => "next",
            HostCommand::Previous => "prev",
            HostCommand::Show => "show",
            HostCommand::Run => "run",
            HostCommand::Submit => "submit",
            HostCommand::CreateFile => "create",
            HostCommand::OpenFile => "edit",
            HostCommand::UpdateList => "update",
            HostCommand::Tab(_) => "tab",
            HostCommand::Case(_) => "case",
            HostCommand::Languages => "languages",
            HostCommand::Help => "help",
            HostCommand::Quit => "quit",
        }
    }
}

pub const HELP: &str = "\
commands:
  open <dir>            open a project directory
  close                 close the project
  editor <path>         set the editor executable
  lang <language>       set the solution language (see `languages`)
  contest <abc|arc|agc> set the contest type
  problems <id>...      filter problem ids (at most 3, e.g. `problems a b ex`)
  hide-solved <on|off>  hide or show solved problems
  next | prev           move through problems
  show                  print the current problem
  run | submit          judge the solution file
  create | edit         create or open the solution file
  update                refresh the problems list
  tab <desc|result>     switch the result pane
  case <n>              select a test case (1-based)
  quit                  save state and exit";

/// `Ok(None)` for blank lines.
pub fn parse(line: &str) -> Result<Option<HostCommand>> {
    let line = line.trim();
    let Some((head, rest)) = split_head(line) else {
        return Ok(None);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "open" => HostCommand::Open {
            directory: required(rest, "open <dir>")?.to_string(),
        },
        "close" => HostCommand::Close,
        "editor" => HostCommand::Editor {
            path: required(rest, "editor <path>")?.to_string(),
        },
        "lang" | "language" => HostCommand::Language(required(rest, "lang <language>")?.parse()?),
        "contest" => HostCommand::Contest(required(rest, "contest <abc|arc|agc>")?.parse()?),
        "problems" => {
            let labels: Vec<&str> = rest.split_whitespace().collect();
            if labels.is_empty() {
                bail!("usage: problems <id>...");
            }
            HostCommand::Problems(ProblemSelection::parse(&labels)?)
        }
        "hide-solved" => HostCommand::HideSolved(switch(required(rest, "hide-solved <on|off>")?)?),
        "next" => HostCommand::Next,
        "prev" | "previous" => HostCommand::Previous,
        "show" => HostCommand::Show,
        "run" => HostCommand::Run,
        "submit" => HostCommand::Submit,
        "create" => HostCommand::CreateFile,
        "edit" => HostCommand::OpenFile,
        "update" => HostCommand::UpdateList,
        "tab" => HostCommand::Tab(match required(rest, "tab <desc|result>")? {
            "desc" | "description" => ResultTab::Description,
            "result" | "results" => ResultTab::Result,
            other => bail!("unknown tab '{other}'"),
        }),
        "case" => {
            let raw = required(rest, "case <n>")?;
            let number: i64 = raw
                .parse()
                .with_context(|| format!("case number must be an integer, got '{raw}'"))?;
            HostCommand::Case(number.saturating_sub(1))
        }
        "languages" => HostCommand::Languages,
        "help" | "?" => HostCommand::Help,
        "quit" | "exit" => HostCommand::Quit,
        other => bail!("unknown command '{other}' (try `help`)"),
    };
    Ok(Some(command))
}

fn split_head(line: &str) -> Option<(&str, &str)> {
    if line.is_empty() {
        return None;
    }
    match line.split_once(char::is_whitespace) {
        Some((head, rest)) => Some((head, rest.trim())),
        None => Some((line, "")),
    }
}

fn required<'a>(rest: &'a str, usage: &str) -> Result<&'a str> {
    if rest.is_empty() {
        bail!("usage: {usage}");
    }
    Ok(rest)
}

fn switch(raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        other => bail!("expected on/off, got '{other}'"),
    }
}
