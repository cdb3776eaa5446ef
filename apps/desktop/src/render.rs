use std::fmt::Write as _;

use client_core::{
    config::WindowSize, Diagnostic, DiagnosticLevel, Presentation, ResultTab, SessionState,
};
use shared::domain::{Language, Problem};

pub fn problem(problem: &Problem) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", problem.heading());
    let _ = writeln!(out, "  {}", problem.task_url());
    let _ = writeln!(
        out,
        "  time limit {} s | memory limit {} MB",
        problem.time_limit, problem.memory_limit
    );
    if !problem.test_cases_link.is_empty() {
        let _ = writeln!(out, "  test cases: {}", problem.test_cases_link);
    }
    out.push_str(problem.description.trim_end());
    out
}

pub fn presentation(view: &Presentation) -> String {
    let mut out = String::new();
    let tab = match view.tab {
        ResultTab::Description => "description",
        ResultTab::Result => "result",
    };
    let _ = write!(out, "[{}] tab={tab}", view.aggregate.label());
    if view.busy {
        out.push_str(" (judging...)");
    }
    if !view.result_tab_enabled {
        return out;
    }
    let _ = write!(out, "\n  {}", view.case_labels.join("  "));
    if let Some(case) = &view.selected_case {
        let status = case
            .status
            .as_ref()
            .map_or_else(|| "not judged".to_string(), ToString::to_string);
        let _ = write!(
            out,
            "\n  case {}: {} in {} s, {} MB\n  input:\n{}\n  expected:\n{}\n  got:\n{}",
            case.index + 1,
            status,
            case.time,
            case.memory_mb,
            case.input.trim_end(),
            case.answer.trim_end(),
            case.output.trim_end()
        );
    }
    out
}

pub fn status(state: &SessionState) -> String {
    let directory = if state.project.is_open() {
        state.project.directory.as_str()
    } else {
        "(no project)"
    };
    let ids: Vec<&str> = state
        .filter
        .problem_ids
        .ids()
        .iter()
        .map(|id| id.as_str())
        .collect();
    format!(
        "{directory} | {} | {} [{}] | solved {}",
        state.language,
        state.filter.contest_type,
        ids.join(","),
        if state.filter.hide_solved() { "hidden" } else { "shown" }
    )
}

pub fn diagnostic(diagnostic: &Diagnostic) -> String {
    let level = match diagnostic.level {
        DiagnosticLevel::Info => "info",
        DiagnosticLevel::Error => "error",
    };
    format!(
        "[{level} {}] {}: {}",
        diagnostic.raised_at.format("%H:%M:%S"),
        diagnostic.id,
        diagnostic.message
    )
}

pub fn window(size: WindowSize) -> String {
    format!("(window {}x{})", size.width, size.height)
}

pub fn languages() -> String {
    Language::CATALOG
        .iter()
        .map(|lang| format!("{} ({})", lang.label(), lang.id()))
        .collect::<Vec<_>>()
        .join(", ")
}
