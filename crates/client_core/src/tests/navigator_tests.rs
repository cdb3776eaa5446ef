use std::sync::Arc;

use shared::domain::{ContestType, JudgeStatus, Language, ProblemId, ProblemSelection};

use crate::{
    gateway::GatewayError,
    test_support::{diagnostic_ids, drain, problem, verdict, FakeGateway},
    view::{AggregateVerdict, ResultTab},
    ClientEvent, ContestClient, FailureKind, ProblemFilter,
};

async fn judged_client(gateway: &Arc<FakeGateway>) -> ContestClient {
    let client = ContestClient::new(gateway.clone());
    client.refresh_current_problem().await;
    gateway.push_test_result(Ok(vec![verdict(JudgeStatus::AC)]));
    client.run().await;
    client
}

#[tokio::test]
async fn refresh_replaces_problem_and_resets_view() {
    let gateway = FakeGateway::with_problem(problem(300, ProblemId::A, "First"));
    let client = judged_client(&gateway).await;
    assert!(client.snapshot().await.view.result_tab_enabled());

    gateway.set_problem(Some(problem(300, ProblemId::B, "Second")));
    let refreshed = client.refresh_current_problem().await;

    assert_eq!(refreshed.map(|p| p.title), Some("Second".to_string()));
    let state = client.snapshot().await;
    assert_eq!(state.problem.map(|p| p.problem_id), Some(ProblemId::B));
    assert_eq!(state.view.current_tab(), ResultTab::Description);
    assert!(!state.view.result_tab_enabled());
    assert!(state.view.verdicts().is_empty());
    assert_eq!(state.view.selected_case_index(), 0);
    assert_eq!(state.view.aggregate(), AggregateVerdict::RunCode);
}

#[tokio::test]
async fn consecutive_refreshes_are_idempotent() {
    let gateway = FakeGateway::with_problem(problem(301, ProblemId::C, "Same"));
    let client = ContestClient::new(gateway.clone());

    let first = client.refresh_current_problem().await;
    let after_first = client.snapshot().await;
    let second = client.refresh_current_problem().await;
    let after_second = client.snapshot().await;

    assert_eq!(first, second);
    assert_eq!(after_first, after_second);
    assert!(!after_second.view.result_tab_enabled());
}

#[tokio::test]
async fn absent_problem_keeps_displayed_problem_and_view() {
    let gateway = FakeGateway::with_problem(problem(302, ProblemId::D, "Kept"));
    let client = judged_client(&gateway).await;
    let before = client.snapshot().await;

    gateway.set_problem(None);
    let mut events = client.subscribe_events();
    assert!(client.advance().await);

    let after = client.snapshot().await;
    assert_eq!(after.problem, before.problem);
    assert_eq!(after.view, before.view);
    let calls = gateway.calls();
    assert_eq!(&calls[calls.len() - 2..], ["next", "get_problem"]);
    assert!(diagnostic_ids(&drain(&mut events)).is_empty());
}

#[tokio::test]
async fn transport_failure_on_refresh_reports_and_keeps_state() {
    let gateway = FakeGateway::with_problem(problem(303, ProblemId::E, "Kept"));
    let client = ContestClient::new(gateway.clone());
    client.refresh_current_problem().await;

    gateway.fail(
        "get_problem",
        GatewayError::transport("get_problem", "connection reset"),
    );
    let mut events = client.subscribe_events();
    assert!(client.refresh_current_problem().await.is_none());

    assert_eq!(
        client.snapshot().await.problem.map(|p| p.title),
        Some("Kept".to_string())
    );
    let events = drain(&mut events);
    let failure = events.iter().find_map(|event| match event {
        ClientEvent::Diagnostic(d) => Some(d.clone()),
        _ => None,
    });
    let failure = failure.expect("diagnostic");
    assert_eq!(failure.id, "cannot_get_problem");
    assert_eq!(failure.kind, Some(FailureKind::Transport));
}

#[tokio::test]
async fn failed_move_still_refreshes() {
    let gateway = FakeGateway::with_problem(problem(304, ProblemId::A, "Edge"));
    gateway.fail(
        "previous",
        GatewayError::rejected("previous", "no previous problem"),
    );
    let client = ContestClient::new(gateway.clone());
    let mut events = client.subscribe_events();

    assert!(!client.retreat().await);

    assert_eq!(gateway.calls(), ["previous", "get_problem"]);
    assert!(client.snapshot().await.problem.is_some());
    assert_eq!(diagnostic_ids(&drain(&mut events)), ["cannot_previous"]);
}

#[tokio::test]
async fn every_filter_setter_refreshes_exactly_once_on_success() {
    let gateway = FakeGateway::with_problem(problem(305, ProblemId::A, "Filtered"));
    let client = ContestClient::new(gateway.clone());

    assert!(client.set_contest_type(ContestType::Arc).await);
    assert!(
        client
            .set_problem_type_filter([ProblemId::B, ProblemId::Ex])
            .await
    );
    assert!(client.set_show_solved(false).await);

    assert_eq!(
        gateway.calls(),
        [
            "set_contest_type",
            "get_problem",
            "set_problem_type",
            "get_problem",
            "set_show_solved",
            "get_problem",
        ]
    );
    let state = client.snapshot().await;
    assert_eq!(state.filter.contest_type, ContestType::Arc);
    assert_eq!(state.filter.problem_ids.ids(), &[ProblemId::B, ProblemId::Ex]);
    assert!(state.filter.hide_solved());
}

#[tokio::test]
async fn every_filter_setter_refreshes_exactly_once_on_failure() {
    let gateway = FakeGateway::with_problem(problem(306, ProblemId::A, "Filtered"));
    for command in ["set_contest_type", "set_problem_type", "set_show_solved"] {
        gateway.fail(command, GatewayError::rejected(command, "invalid value"));
    }
    let client = ContestClient::new(gateway.clone());
    let mut events = client.subscribe_events();

    assert!(!client.set_contest_type(ContestType::Agc).await);
    assert!(!client.set_problem_type_filter([ProblemId::H]).await);
    assert!(!client.set_hide_solved(true).await);

    assert_eq!(gateway.count("get_problem"), 3);
    let state = client.snapshot().await;
    assert_eq!(state.filter, ProblemFilter::default());
    assert!(state.problem.is_some());
    assert_eq!(
        diagnostic_ids(&drain(&mut events)),
        [
            "cannot_set_contest_type",
            "cannot_set_problem_type",
            "cannot_set_show_solved",
        ]
    );
}

#[tokio::test]
async fn oversized_problem_filter_is_truncated_before_the_backend() {
    let gateway = FakeGateway::new();
    let client = ContestClient::new(gateway.clone());

    let selection = ProblemSelection::parse(&["A", "B", "C", "D"]).expect("parse");
    client.set_problem_type_filter(selection).await;

    let sent = gateway.sent_selections();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].ids(), &[ProblemId::A, ProblemId::B, ProblemId::C]);
}

#[tokio::test]
async fn successful_setters_post_info_notifications() {
    let gateway = FakeGateway::new();
    let client = ContestClient::new(gateway.clone());
    let mut events = client.subscribe_events();

    client.set_contest_type(ContestType::Agc).await;
    client.set_language(Language::Rust).await;
    client.set_show_solved(true).await;

    assert_eq!(
        diagnostic_ids(&drain(&mut events)),
        ["contest_set", "language_set"]
    );
    assert_eq!(client.snapshot().await.language, Language::Rust);
    assert_eq!(gateway.count("get_problem"), 3);
}
