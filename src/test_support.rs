//! Shared fixtures for pipeline tests.

use std::sync::Arc;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::{ApiConfig, DEFAULT_PROBE_PATH};
use crate::routing::LoggingNavigator;
use crate::state::AppContext;
use crate::storage::StorageBackend;

pub(crate) const START_ROUTE: &str = "/invoices";

pub(crate) fn test_config(candidates: Vec<String>) -> ApiConfig {
    ApiConfig {
        candidates,
        default_url: "http://fallback.invalid:5239".to_owned(),
        probe_path: DEFAULT_PROBE_PATH.to_owned(),
        probe_timeout_ms: 1000,
        storage: StorageBackend::Memory,
    }
}

/// Answer the reachability probe so the resolver settles on `server`.
pub(crate) async fn mount_probe(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(DEFAULT_PROBE_PATH))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

/// Context whose only candidate is `server`, starting on [`START_ROUTE`].
pub(crate) async fn context_for(server: &MockServer) -> (AppContext, Arc<LoggingNavigator>) {
    mount_probe(server).await;
    let nav = Arc::new(LoggingNavigator::new(START_ROUTE));
    let ctx = AppContext::new(&test_config(vec![server.uri()]), nav.clone()).unwrap();
    (ctx, nav)
}
