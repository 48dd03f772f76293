//! API base-URL detection.
//!
//! DESIGN
//! ======
//! Candidates are probed strictly in priority order, one at a time, each
//! `GET <origin><probe_path>` raced against the probe timeout. The first
//! HTTP 200 wins, is cached for the life of the resolver and mirrored into
//! storage under `detectedApiUrl`. When every candidate fails the default
//! origin is cached in memory only, so a later `reset` re-probes instead of
//! trusting an unconfirmed value.
//!
//! Concurrent `resolve` calls are coalesced: the probe sequence runs under an
//! async lock, and callers that waited on it find the cache filled.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here returns an error. Probe failures are logged and skipped;
//! exhaustion is reported only by falling back to the default.

#[cfg(test)]
#[path = "resolver_test.rs"]
mod resolver_test;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::storage::{DETECTED_API_URL_KEY, KeyValueStore};

/// Origin the pipeline is using and whether a probe confirmed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiStatus {
    pub origin: String,
    pub confirmed: bool,
}

pub struct ApiResolver {
    http: reqwest::Client,
    candidates: Vec<String>,
    default_origin: String,
    probe_path: String,
    probe_timeout: Duration,
    store: Arc<dyn KeyValueStore>,
    cache: RwLock<Option<ApiStatus>>,
    in_flight: tokio::sync::Mutex<()>,
}

impl ApiResolver {
    /// Build a resolver with its own probe client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ApiConfig, store: Arc<dyn KeyValueStore>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self::with_client(http, config, store))
    }

    #[must_use]
    pub fn with_client(http: reqwest::Client, config: &ApiConfig, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            http,
            candidates: config.candidates.clone(),
            default_origin: config.default_url.clone(),
            probe_path: config.probe_path.clone(),
            probe_timeout: config.probe_timeout(),
            store,
            cache: RwLock::new(None),
            in_flight: tokio::sync::Mutex::new(()),
        }
    }

    #[must_use]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Return the cached origin, probing candidates on first use.
    pub async fn resolve(&self) -> String {
        if let Some(status) = self.cached() {
            return status.origin;
        }

        let _flight = self.in_flight.lock().await;
        if let Some(status) = self.cached() {
            return status.origin;
        }

        let status = self.probe_candidates().await;
        *self.cache.write() = Some(status.clone());
        status.origin
    }

    /// Best known origin without touching the network: memory cache, then
    /// storage, then the default.
    #[must_use]
    pub fn current_origin(&self) -> String {
        self.status().origin
    }

    #[must_use]
    pub fn status(&self) -> ApiStatus {
        if let Some(status) = self.cached() {
            return status;
        }
        match self.stored_origin() {
            Some(origin) => ApiStatus { origin, confirmed: true },
            None => ApiStatus { origin: self.default_origin.clone(), confirmed: false },
        }
    }

    /// Forget the detected origin so the next `resolve` probes again.
    pub fn reset(&self) {
        *self.cache.write() = None;
        self.store.remove(DETECTED_API_URL_KEY);
        debug!("api detection reset");
    }

    /// Reset and probe again.
    pub async fn refresh(&self) -> ApiStatus {
        self.reset();
        self.resolve().await;
        self.status()
    }

    fn cached(&self) -> Option<ApiStatus> {
        self.cache.read().clone()
    }

    fn stored_origin(&self) -> Option<String> {
        self.store
            .get(DETECTED_API_URL_KEY)
            .filter(|origin| !origin.trim().is_empty())
    }

    async fn probe_candidates(&self) -> ApiStatus {
        info!(candidates = self.candidates.len(), "detecting backend API");

        for origin in &self.candidates {
            if self.probe(origin).await {
                info!(%origin, "backend found");
                self.store.set(DETECTED_API_URL_KEY, origin);
                return ApiStatus { origin: origin.clone(), confirmed: true };
            }
        }

        warn!(default = %self.default_origin, "no backend detected; using default");
        ApiStatus { origin: self.default_origin.clone(), confirmed: false }
    }

    async fn probe(&self, origin: &str) -> bool {
        let url = probe_url(origin, &self.probe_path);
        debug!(%url, "probing");

        match tokio::time::timeout(self.probe_timeout, self.http.get(&url).send()).await {
            Ok(Ok(response)) if response.status() == StatusCode::OK => true,
            Ok(Ok(response)) => {
                debug!(%origin, status = response.status().as_u16(), "probe rejected");
                false
            }
            Ok(Err(e)) => {
                debug!(%origin, error = %e, "probe failed");
                false
            }
            Err(_) => {
                debug!(%origin, timeout = ?self.probe_timeout, "probe timed out");
                false
            }
        }
    }
}

fn probe_url(origin: &str, probe_path: &str) -> String {
    format!("{}{}", origin.trim_end_matches('/'), probe_path)
}
