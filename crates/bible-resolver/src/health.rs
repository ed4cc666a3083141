//! Health Monitor: runs the pipeline over a fixed sample of references and
//! reports whether the upstream site still parses.
//!
//! Samples run one after another in the given order, with a courtesy delay
//! between calls. A run never retries.
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::model::{HealthReport, HealthStatus, SampleResult};
use crate::notify::WebhookNotifier;
use crate::resolver::Resolver;

/// One reference per markup category: gospel, psalm, narrative, epistle, apocalypse.
pub const DEFAULT_SAMPLES: &[&str] = &[
    "Matthieu 5",
    "Psaume 23",
    "Genèse 1",
    "Romains 8",
    "Apocalypse 21",
];

#[derive(Clone)]
pub struct HealthMonitor {
    resolver: Resolver,
    samples: Vec<String>,
    delay: Duration,
    notifier: Option<WebhookNotifier>,
}

impl HealthMonitor {
    pub fn new(resolver: Resolver, samples: Vec<String>, delay: Duration) -> Self {
        Self {
            resolver,
            samples,
            delay,
            notifier: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Option<WebhookNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Run the configured samples and, when degraded, hand the report to the notifier.
    pub async fn check(&self) -> HealthReport {
        let report = self.run(&self.samples).await;
        if let Some(notifier) = &self.notifier {
            // Notification failures are logged by the notifier and never change the report.
            let _ = notifier.notify(&report).await;
        }
        report
    }

    pub async fn run<S: AsRef<str>>(&self, samples: &[S]) -> HealthReport {
        let started = Instant::now();
        let mut results = Vec::with_capacity(samples.len());

        for (i, sample) in samples.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            results.push(self.run_sample(sample.as_ref()).await);
        }

        let status = if results.iter().all(|r| r.success) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        };
        let report = HealthReport {
            status,
            samples: results,
            total_ms: started.elapsed().as_millis() as u64,
        };

        match report.status {
            HealthStatus::Healthy => {
                info!(samples = report.samples.len(), total_ms = report.total_ms, "health check passed")
            }
            HealthStatus::Degraded => warn!(
                samples = report.samples.len(),
                failures = report.failures().count(),
                total_ms = report.total_ms,
                "health check degraded"
            ),
        }
        report
    }

    async fn run_sample(&self, reference: &str) -> SampleResult {
        let started = Instant::now();
        let (code, outcome) = match self.resolver.resolve(reference) {
            Ok((book, chapter)) => (
                Some(book.code.to_string()),
                self.resolver.scraper().fetch(book, chapter).await,
            ),
            Err(e) => (None, Err(e)),
        };
        let latency_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(chapter) => SampleResult {
                reference: reference.to_string(),
                code,
                success: true,
                verse_count: Some(chapter.verses.len()),
                error_kind: None,
                error: None,
                latency_ms,
            },
            Err(e) => {
                warn!(reference, kind = ?e.kind(), error = %e, "health sample failed");
                SampleResult {
                    reference: reference.to_string(),
                    code,
                    success: false,
                    verse_count: None,
                    error_kind: Some(e.kind()),
                    error: Some(e.to_string()),
                    latency_ms,
                }
            }
        }
    }
}
