use tracing::{info, warn};

use crate::model::{HealthReport, HealthStatus};
use scripture_common::error::CommonError;
use scripture_common::upstream::UpstreamClient;

/// Posts degraded health reports as JSON to a webhook.
#[derive(Clone)]
pub struct WebhookNotifier {
    client: UpstreamClient,
    url: String,
}

impl WebhookNotifier {
    pub fn new(client: UpstreamClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Sends the report if it is degraded. Returns whether anything was sent.
    pub async fn notify(&self, report: &HealthReport) -> Result<bool, CommonError> {
        if report.status == HealthStatus::Healthy {
            return Ok(false);
        }
        self.client
            .post_json(&self.url, report)
            .await
            .inspect_err(|e| warn!(url = %self.url, error = %e, "health webhook failed"))?;
        info!(url = %self.url, failures = report.failures().count(), "degraded health report sent");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::SampleResult;
    use scripture_common::upstream::UpstreamConfig;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn report(status: HealthStatus) -> HealthReport {
        HealthReport {
            status,
            samples: vec![SampleResult {
                reference: "Psaume 23".to_string(),
                code: Some("Ps".to_string()),
                success: status == HealthStatus::Healthy,
                verse_count: None,
                error_kind: Some(ErrorKind::Extraction),
                error: Some("extraction error: container not found".to_string()),
                latency_ms: 12,
            }],
            total_ms: 12,
        }
    }

    #[tokio::test]
    async fn only_degraded_reports_are_posted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hook"))
            .and(body_partial_json(serde_json::json!({ "status": "degraded" })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = UpstreamClient::new(UpstreamConfig::default()).unwrap();
        let notifier = WebhookNotifier::new(client, format!("{}/hook", server.uri()));

        assert!(!notifier.notify(&report(HealthStatus::Healthy)).await.unwrap());
        assert!(notifier.notify(&report(HealthStatus::Degraded)).await.unwrap());
    }
}
