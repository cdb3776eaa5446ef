use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex as StdMutex},
};

use async_trait::async_trait;
use shared::domain::{
    ContestType, JudgeStatus, Language, Problem, ProblemId, ProblemSelection, Verdict,
};
use tokio::sync::{broadcast, Notify};

use crate::{
    gateway::{CommandGateway, GatewayError, GatewayResult},
    ClientEvent,
};

#[derive(Default)]
struct Backend {
    directory: String,
    editor: String,
    language: Language,
    contest_type: ContestType,
    selection: ProblemSelection,
    show_solved: bool,
    problem: Option<Problem>,
    test_results: VecDeque<GatewayResult<Vec<Verdict>>>,
    failures: HashMap<&'static str, GatewayError>,
    calls: Vec<&'static str>,
    sent_selections: Vec<ProblemSelection>,
}

/// Scripted in-memory backend recording every command it receives.
#[derive(Default)]
pub(crate) struct FakeGateway {
    backend: StdMutex<Backend>,
    gate_tests: StdMutex<bool>,
    pub(crate) test_started: Notify,
    pub(crate) release_test: Notify,
}

impl FakeGateway {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn with_problem(problem: Problem) -> Arc<Self> {
        let gateway = Self::new();
        gateway.set_problem(Some(problem));
        gateway
    }

    pub(crate) fn set_problem(&self, problem: Option<Problem>) {
        self.backend.lock().expect("backend").problem = problem;
    }

    pub(crate) fn set_directory(&self, directory: &str) {
        self.backend.lock().expect("backend").directory = directory.to_string();
    }

    pub(crate) fn set_editor(&self, editor: &str) {
        self.backend.lock().expect("backend").editor = editor.to_string();
    }

    pub(crate) fn set_selection(&self, selection: ProblemSelection) {
        self.backend.lock().expect("backend").selection = selection;
    }

    pub(crate) fn fail(&self, command: &'static str, err: GatewayError) {
        self.backend
            .lock()
            .expect("backend")
            .failures
            .insert(command, err);
    }

    pub(crate) fn push_test_result(&self, result: GatewayResult<Vec<Verdict>>) {
        self.backend
            .lock()
            .expect("backend")
            .test_results
            .push_back(result);
    }

    /// Makes run/submit wait for `release_test` after signalling `test_started`.
    pub(crate) fn gate_tests(&self) {
        *self.gate_tests.lock().expect("gate") = true;
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.backend.lock().expect("backend").calls.clone()
    }

    pub(crate) fn count(&self, command: &str) -> usize {
        self.calls().iter().filter(|c| **c == command).count()
    }

    pub(crate) fn sent_selections(&self) -> Vec<ProblemSelection> {
        self.backend.lock().expect("backend").sent_selections.clone()
    }

    fn record(&self, command: &'static str) -> GatewayResult<()> {
        let mut backend = self.backend.lock().expect("backend");
        backend.calls.push(command);
        match backend.failures.get(command) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn read<T>(&self, command: &'static str, f: impl FnOnce(&Backend) -> T) -> GatewayResult<T> {
        self.record(command)?;
        Ok(f(&self.backend.lock().expect("backend")))
    }

    fn write(&self, command: &'static str, f: impl FnOnce(&mut Backend)) -> GatewayResult<()> {
        self.record(command)?;
        f(&mut self.backend.lock().expect("backend"));
        Ok(())
    }

    async fn judge(&self, command: &'static str) -> GatewayResult<Vec<Verdict>> {
        let recorded = self.record(command);
        let gated = *self.gate_tests.lock().expect("gate");
        if gated {
            self.test_started.notify_one();
            self.release_test.notified().await;
        }
        recorded?;
        self.backend
            .lock()
            .expect("backend")
            .test_results
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[async_trait]
impl CommandGateway for FakeGateway {
    async fn get_directory(&self) -> GatewayResult<String> {
        self.read("get_directory", |b| b.directory.clone())
    }

    async fn set_directory(&self, directory: &str) -> GatewayResult<()> {
        self.write("set_directory", |b| b.directory = directory.to_string())
    }

    async fn get_editor(&self) -> GatewayResult<String> {
        self.read("get_editor", |b| b.editor.clone())
    }

    async fn set_editor(&self, editor: &str) -> GatewayResult<()> {
        self.write("set_editor", |b| b.editor = editor.to_string())
    }

    async fn get_language(&self) -> GatewayResult<Language> {
        self.read("get_language", |b| b.language)
    }

    async fn set_language(&self, language: Language) -> GatewayResult<()> {
        self.write("set_language", |b| b.language = language)
    }

    async fn get_contest_type(&self) -> GatewayResult<ContestType> {
        self.read("get_contest_type", |b| b.contest_type)
    }

    async fn set_contest_type(&self, contest_type: ContestType) -> GatewayResult<()> {
        self.write("set_contest_type", |b| b.contest_type = contest_type)
    }

    async fn get_problem_type(&self) -> GatewayResult<ProblemSelection> {
        self.read("get_problem_type", |b| b.selection.clone())
    }

    async fn set_problem_type(&self, selection: &ProblemSelection) -> GatewayResult<()> {
        self.backend
            .lock()
            .expect("backend")
            .sent_selections
            .push(selection.clone());
        self.write("set_problem_type", |b| b.selection = selection.clone())
    }

    async fn get_show_solved(&self) -> GatewayResult<bool> {
        self.read("get_show_solved", |b| b.show_solved)
    }

    async fn set_show_solved(&self, show_solved: bool) -> GatewayResult<()> {
        self.write("set_show_solved", |b| b.show_solved = show_solved)
    }

    async fn next(&self) -> GatewayResult<()> {
        self.record("next")
    }

    async fn previous(&self) -> GatewayResult<()> {
        self.record("previous")
    }

    async fn get_problem(&self) -> GatewayResult<Option<Problem>> {
        self.read("get_problem", |b| b.problem.clone())
    }

    async fn run(&self) -> GatewayResult<Vec<Verdict>> {
        self.judge("run").await
    }

    async fn submit(&self) -> GatewayResult<Vec<Verdict>> {
        self.judge("submit").await
    }

    async fn create_file(&self) -> GatewayResult<()> {
        self.record("create_file")
    }

    async fn open_file(&self) -> GatewayResult<()> {
        self.record("open_file")
    }

    async fn update_problems_list(&self) -> GatewayResult<()> {
        self.record("update_problems_list")
    }

    async fn save_state(&self) -> GatewayResult<()> {
        self.record("save_state")
    }
}

pub(crate) fn problem(contest_id: u16, problem_id: ProblemId, title: &str) -> Problem {
    Problem {
        contest_id,
        contest_type: ContestType::Abc,
        problem_id,
        title: title.to_string(),
        description: format!("<p>{title}</p><p>statement</p>"),
        time_limit: 2.0,
        memory_limit: 1024,
        test_cases_link: format!("https://example.test/abc{contest_id:03}"),
    }
}

pub(crate) fn verdict(status: JudgeStatus) -> Verdict {
    Verdict {
        input: "3\n1 2 3\n".into(),
        output: Some("6\n".into()),
        answer: "6\n".into(),
        status: Some(status),
        time: 0.0125,
        memory: 4,
    }
}

pub(crate) fn drain(rx: &mut broadcast::Receiver<ClientEvent>) -> Vec<ClientEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub(crate) fn diagnostic_ids(events: &[ClientEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            ClientEvent::Diagnostic(d) => Some(d.id.clone()),
            _ => None,
        })
        .collect()
}
