//! Validate and suggest-fix round trips against mock HTTP services

use querylens_engine::{Completion, SessionState, Workbench};
use querylens_types::{
    NO_SUGGESTION_MESSAGE, RawIssue, SUGGESTION_FAILED_MESSAGE, SuggestionOrigin,
    VALIDATION_FAILED_MESSAGE,
};
use wiremock::MockServer;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{
    SUGGEST_FIX_PATH, VALIDATE_PATH, mount_issues, mount_status, mount_suggestion, service_for,
};

#[tokio::test]
async fn findings_land_on_their_lines() {
    let server = MockServer::start().await;
    mount_issues(
        &server,
        &[
            "Line 1: Avoid SELECT *",
            "Missing valid history comment.",
            "Line 3: Table hint missing",
            "Line 3: Use schema prefix",
            "Line 7: Beyond the end",
        ],
    )
    .await;

    let text = "SELECT *\nFROM t\nJOIN u ON t.id = u.id\n";
    let mut bench = Workbench::new(service_for(&server), text);
    assert!(bench.validate());
    bench.settle().await;

    let session = bench.session();
    assert_eq!(session.state(), SessionState::Validated);
    assert_eq!(session.issues().len(), 5);

    let ranges: Vec<_> = session.diagnostics().iter().map(|d| d.range()).collect();
    assert_eq!(ranges, vec![0..8, 16..37, 16..37]);
    for diagnostic in session.diagnostics() {
        let covered = session
            .document()
            .slice(diagnostic.from(), diagnostic.to())
            .unwrap();
        assert!(!covered.contains('\n'));
    }

    let gutter: Vec<u32> = session.gutter().iter().map(|m| m.line().get()).collect();
    assert_eq!(gutter, vec![1, 3]);
    assert_eq!(session.overlay().status_string(), "W:3");
}

#[tokio::test]
async fn suggest_fix_sends_the_visible_issues() {
    let server = MockServer::start().await;
    mount_issues(&server, &["Line 1: Avoid SELECT *", "Missing valid history comment."]).await;
    Mock::given(method("POST"))
        .and(path(SUGGEST_FIX_PATH))
        .and(body_json(serde_json::json!({
            "query": "SELECT * FROM t",
            "issues": ["Line 1: Avoid SELECT *", "Missing valid history comment."]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "answer": "-- history: initial\nSELECT id FROM dbo.t WITH (NOLOCK)"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut bench = Workbench::new(service_for(&server), "SELECT * FROM t");
    bench.validate();
    bench.settle().await;
    assert!(bench.suggest_fix());
    assert_eq!(bench.session().state(), SessionState::SuggestingFix);
    bench.settle().await;

    let suggestion = bench.session().suggestion().unwrap();
    assert_eq!(suggestion.origin(), SuggestionOrigin::Service);
    assert!(suggestion.text().starts_with("-- history: initial"));
    assert_eq!(bench.session().state(), SessionState::FixSuggested);
}

#[tokio::test]
async fn suggest_fix_is_gated_on_diagnostics() {
    let server = MockServer::start().await;
    mount_issues(&server, &["Missing valid history comment."]).await;
    Mock::given(method("POST"))
        .and(path(SUGGEST_FIX_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let mut bench = Workbench::new(service_for(&server), "SELECT 1");
    assert!(!bench.session().can_suggest_fix());
    bench.validate();
    bench.settle().await;
    assert_eq!(bench.session().issues().len(), 1);
    assert!(!bench.session().can_suggest_fix());
    assert!(!bench.suggest_fix());
}

#[tokio::test]
async fn validator_outage_shows_fallback_issue() {
    let server = MockServer::start().await;
    mount_status(&server, VALIDATE_PATH, 503).await;

    let mut bench = Workbench::new(service_for(&server), "SELECT 1");
    bench.validate();
    bench.settle().await;

    let session = bench.session();
    assert_eq!(session.state(), SessionState::Validated);
    assert_eq!(session.issues(), &[RawIssue::from(VALIDATION_FAILED_MESSAGE)]);
    assert!(session.diagnostics().is_empty());
    assert!(session.gutter().is_empty());
}

#[tokio::test]
async fn suggestion_outage_and_empty_answer_use_fallbacks() {
    let server = MockServer::start().await;
    mount_issues(&server, &["Line 1: x"]).await;
    mount_status(&server, SUGGEST_FIX_PATH, 500).await;

    let mut bench = Workbench::new(service_for(&server), "SELECT 1");
    bench.validate();
    bench.settle().await;
    bench.suggest_fix();
    bench.settle().await;
    let suggestion = bench.session().suggestion().unwrap();
    assert_eq!(suggestion.text(), SUGGESTION_FAILED_MESSAGE);
    assert!(suggestion.is_fallback());

    let server = MockServer::start().await;
    mount_issues(&server, &["Line 1: x"]).await;
    mount_suggestion(&server, "   ").await;

    let mut bench = Workbench::new(service_for(&server), "SELECT 1");
    bench.validate();
    bench.settle().await;
    bench.suggest_fix();
    assert_eq!(bench.next_event().await, Some(Completion::Applied));
    assert_eq!(
        bench.session().suggestion().unwrap().text(),
        NO_SUGGESTION_MESSAGE
    );
}
