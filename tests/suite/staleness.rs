//! Results that arrive after the document changed are never shown

use std::time::Duration;

use querylens_engine::{Completion, SessionState, Workbench};
use wiremock::MockServer;

use crate::common::{mount_issues, mount_slow_issues, mount_suggestion, service_for};

const SLOW: Duration = Duration::from_millis(200);

#[tokio::test]
async fn edit_during_validation_drops_the_result() {
    let server = MockServer::start().await;
    mount_slow_issues(&server, &["Line 1: stale finding"], SLOW).await;

    let mut bench = Workbench::new(service_for(&server), "SELECT *");
    assert!(bench.validate());
    bench.edit("SELECT id");
    assert_eq!(bench.session().state(), SessionState::Idle);

    tokio::time::sleep(SLOW * 3).await;
    assert_eq!(bench.poll_events(), vec![Completion::Discarded]);
    assert!(bench.session().diagnostics().is_empty());
    assert!(bench.session().issues().is_empty());
    assert_eq!(bench.session().state(), SessionState::Idle);
}

#[tokio::test]
async fn revalidating_after_edit_applies_only_the_fresh_result() {
    let server = MockServer::start().await;
    mount_slow_issues(&server, &["Line 2: finding"], SLOW).await;

    let mut bench = Workbench::new(service_for(&server), "SELECT *\nFROM t");
    bench.validate();
    bench.edit("SELECT id\nFROM t");
    bench.validate();
    bench.settle().await;

    assert_eq!(bench.session().state(), SessionState::Validated);
    assert_eq!(bench.session().diagnostics().len(), 1);
    assert_eq!(bench.session().diagnostics()[0].range(), 10..16);

    // The orphaned first response may already have been drained while
    // settling; either way it must not have been applied.
    tokio::time::sleep(SLOW * 3).await;
    assert!(
        bench
            .poll_events()
            .iter()
            .all(|completion| *completion == Completion::Discarded)
    );
    assert_eq!(bench.session().diagnostics().len(), 1);
}

#[tokio::test]
async fn edit_during_suggestion_drops_the_suggestion() {
    let server = MockServer::start().await;
    mount_issues(&server, &["Line 1: Avoid SELECT *"]).await;
    mount_suggestion(&server, "SELECT id FROM t").await;

    let mut bench = Workbench::new(service_for(&server), "SELECT * FROM t");
    bench.validate();
    bench.settle().await;
    assert!(bench.suggest_fix());
    bench.edit("SELECT * FROM t ");

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(bench.poll_events(), vec![Completion::Discarded]);
    assert!(bench.session().suggestion().is_none());
    assert!(bench.session().diagnostics().is_empty());
    assert!(!bench.session().can_suggest_fix());
}
