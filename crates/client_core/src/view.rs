//! Result view state and the pure rules deciding what is presentable.

use shared::domain::{JudgeStatus, Verdict};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResultTab {
    #[default]
    Description,
    Result,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AggregateVerdict {
    #[default]
    RunCode,
    Accepted,
    WrongAnswer,
}

impl AggregateVerdict {
    /// `None` for an empty sequence: there is nothing to summarize.
    pub fn from_verdicts(verdicts: &[Verdict]) -> Option<Self> {
        if verdicts.is_empty() {
            return None;
        }
        if verdicts.iter().all(Verdict::is_accepted) {
            Some(Self::Accepted)
        } else {
            Some(Self::WrongAnswer)
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::RunCode => "Run Code",
            Self::Accepted => "Accepted",
            Self::WrongAnswer => "Wrong Answer",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionViewState {
    pub(crate) current_tab: ResultTab,
    pub(crate) result_tab_enabled: bool,
    pub(crate) selected_case_index: usize,
    pub(crate) aggregate: AggregateVerdict,
    pub(crate) testing: bool,
    pub(crate) verdicts: Vec<Verdict>,
}

/// Clamps `index` into `[0, len - 1]`; an empty range resolves to 0.
pub fn clamp_case_index(index: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let last = i64::try_from(len - 1).unwrap_or(i64::MAX);
    usize::try_from(index.clamp(0, last)).unwrap_or(0)
}

impl SessionViewState {
    pub fn current_tab(&self) -> ResultTab {
        self.current_tab
    }

    pub fn result_tab_enabled(&self) -> bool {
        self.result_tab_enabled
    }

    pub fn selected_case_index(&self) -> usize {
        self.selected_case_index
    }

    pub fn aggregate(&self) -> AggregateVerdict {
        self.aggregate
    }

    pub fn testing(&self) -> bool {
        self.testing
    }

    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }

    /// Returns whether the tab actually changed.
    pub fn switch_tab(&mut self, tab: ResultTab) -> bool {
        if tab == ResultTab::Result && !self.result_tab_enabled {
            return false;
        }
        let changed = self.current_tab != tab;
        self.current_tab = tab;
        changed
    }

    pub fn set_selected_case(&mut self, index: i64) -> usize {
        self.selected_case_index = clamp_case_index(index, self.verdicts.len());
        self.selected_case_index
    }

    pub fn selected_verdict(&self) -> Option<&Verdict> {
        self.verdicts.get(self.selected_case_index)
    }

    /// Applies a resolved verdict sequence. Empty sequences leave everything as is.
    pub fn apply_verdicts(&mut self, verdicts: Vec<Verdict>) -> Option<AggregateVerdict> {
        let aggregate = AggregateVerdict::from_verdicts(&verdicts)?;
        self.aggregate = aggregate;
        self.selected_case_index =
            clamp_case_index(self.selected_case_index as i64, verdicts.len());
        self.verdicts = verdicts;
        self.result_tab_enabled = true;
        self.current_tab = ResultTab::Result;
        Some(aggregate)
    }

    /// Back to the description of a freshly loaded problem. The testing lock
    /// is owned by the in-flight run/submit and survives the reset.
    pub(crate) fn reset(&mut self) {
        self.current_tab = ResultTab::Description;
        self.result_tab_enabled = false;
        self.selected_case_index = 0;
        self.aggregate = AggregateVerdict::RunCode;
        self.verdicts.clear();
    }

    pub fn case_labels(&self) -> Vec<String> {
        self.verdicts
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let mark = if v.is_accepted() { "✔" } else { "✘" };
                format!("Case {} {mark}", i + 1)
            })
            .collect()
    }

    pub fn present(&self) -> Presentation {
        Presentation {
            tab: self.current_tab,
            result_tab_enabled: self.result_tab_enabled,
            busy: self.testing,
            aggregate: self.aggregate,
            case_labels: self.case_labels(),
            selected_case: self.selected_verdict().map(|v| CaseView {
                index: self.selected_case_index,
                status: v.status.clone(),
                time: format!("{:.2}", v.time),
                memory_mb: v.memory,
                input: v.input.clone(),
                answer: v.answer.clone(),
                output: v.output.clone().unwrap_or_default(),
            }),
        }
    }
}

/// Everything a host needs to draw the problem/result area.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub tab: ResultTab,
    pub result_tab_enabled: bool,
    pub busy: bool,
    pub aggregate: AggregateVerdict,
    pub case_labels: Vec<String>,
    pub selected_case: Option<CaseView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseView {
    pub index: usize,
    /// `None` for a case the judge never ran.
    pub status: Option<JudgeStatus>,
    pub time: String,
    pub memory_mb: u64,
    pub input: String,
    pub answer: String,
    pub output: String,
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
