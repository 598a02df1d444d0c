//! Config file loading and endpoint resolution

use std::time::Duration;

use querylens_engine::{ConfigError, QuerylensConfig};
use querylens_types::ValidationOutcome;
use querylens_services::{HttpQueryService, QueryService};
use wiremock::MockServer;

use crate::common::mount_issues;

#[tokio::test]
async fn config_file_points_service_at_mock() {
    let server = MockServer::start().await;
    mount_issues(&server, &["Line 1: from config"]).await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        format!(
            "[app]\nascii_only = true\n\n[service]\nbase_url = \"{}\"\ntimeout_seconds = 5\n",
            server.uri()
        ),
    )
    .unwrap();

    let config = QuerylensConfig::load_from(&path).unwrap();
    assert!(config.ascii_only());
    let service_config = config.service_config_with_override(None).unwrap();
    assert_eq!(service_config.timeout(), Duration::from_secs(5));

    let service = HttpQueryService::new(service_config).unwrap();
    match service.validate("SELECT 1").await {
        ValidationOutcome::Completed(issues) => {
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].as_str(), "Line 1: from config");
        }
        ValidationOutcome::Failed => panic!("validate against mock failed"),
    }
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[service]\ntimeout_seconds = \"soon\"\n").unwrap();

    let err = QuerylensConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn non_http_base_url_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[service]\nbase_url = \"file:///tmp/validator\"\n").unwrap();

    let config = QuerylensConfig::load_from(&path).unwrap();
    let err = config.service_config_with_override(None).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidUrl(_)));
}
