use std::collections::BTreeMap;

use serde::Serialize;

pub(crate) mod quiz;
pub(crate) mod session;

/// Overall service health; the worst component wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) service: &'static str,
    pub(crate) status: HealthStatus,
    pub(crate) components: BTreeMap<&'static str, String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RootResponse {
    pub(crate) message: String,
    pub(crate) version: String,
    pub(crate) quizzes_url: &'static str,
    pub(crate) random_play_url: &'static str,
}
