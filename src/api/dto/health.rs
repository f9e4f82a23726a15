//! Health probe DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "healthy",
    "version": "0.1.0",
    "timestamp": "2026-01-01T12:00:00Z",
    "checks": {
        "storage": {
            "status": "healthy",
            "message": "postgres reachable",
            "response_time_ms": 3
        }
    }
}))]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    /// RFC 3339 time the check ran
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: String,
    pub checks: BTreeMap<String, ComponentHealth>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Result of probing a single dependency
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    pub message: Option<String>,
    pub response_time_ms: Option<u64>,
}

impl HealthResponse {
    /// Overall status is unhealthy as soon as one component is.
    pub fn from_checks(
        version: impl Into<String>,
        timestamp: impl Into<String>,
        checks: BTreeMap<String, ComponentHealth>,
    ) -> Self {
        let status = if checks
            .values()
            .any(|c| c.status == HealthStatus::Unhealthy)
        {
            HealthStatus::Unhealthy
        } else {
            HealthStatus::Healthy
        };

        Self {
            status,
            version: version.into(),
            timestamp: timestamp.into(),
            checks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(status: HealthStatus) -> ComponentHealth {
        ComponentHealth {
            status,
            message: None,
            response_time_ms: Some(1),
        }
    }

    #[test]
    fn test_health_status_serialization() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Unhealthy).unwrap(),
            "\"unhealthy\""
        );
    }

    #[test]
    fn test_overall_status_follows_components() {
        let mut checks = BTreeMap::new();
        checks.insert("storage".to_string(), component(HealthStatus::Healthy));
        let healthy = HealthResponse::from_checks("0.1.0", "now", checks);
        assert_eq!(healthy.status, HealthStatus::Healthy);

        let mut checks = BTreeMap::new();
        checks.insert("storage".to_string(), component(HealthStatus::Unhealthy));
        let unhealthy = HealthResponse::from_checks("0.1.0", "now", checks);
        assert_eq!(unhealthy.status, HealthStatus::Unhealthy);
    }
}
