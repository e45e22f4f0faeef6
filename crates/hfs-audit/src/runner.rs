//! Audit Runner
//!
//! Order of a run:
//! 1. Every configured rule at the live viewport
//! 2. The same rules once per configured device, under emulation
//! 3. Frame sampling, when a window and a frame source are both given
//! 4. Aggregation

use hfs_a11y::{AuditOutcome, AuditScope, auditor_for};
use hfs_devtools::{CancelHandle, FrameSource, PerformanceSampler, summarize, with_device};
use hfs_dom::{Document, Window};

use crate::{AuditConfig, AuditError, AuditReport, ViewportRun, aggregate};

/// Drives one audit of a page.
///
/// Clones share one cancel flag.
#[derive(Debug, Clone, Default)]
pub struct AuditRunner {
    config: AuditConfig,
    cancel: CancelHandle,
}

impl AuditRunner {
    pub fn new(config: AuditConfig) -> Self {
        Self { config, cancel: CancelHandle::default() }
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Stops frame sampling in a running audit. The rest of the report
    /// is still built from the samples taken so far. Once stopped, later
    /// runs on this runner skip sampling.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Run the configured rules once at the window's current state
    pub fn audit_static(&self, document: &Document, window: &Window) -> AuditOutcome {
        let scope = AuditScope::document(document, window);
        let mut outcome = AuditOutcome::new();
        for rule in self.config.rules() {
            let auditor = auditor_for(rule);
            let result = auditor.audit(&scope);
            tracing::debug!(
                rule = %rule,
                passed = result.passed_count(),
                failed = result.failed_count(),
                skipped = result.skipped.len(),
                "rule finished"
            );
            outcome.merge(result);
        }
        outcome
    }

    /// Full audit
    pub async fn run<S: FrameSource>(
        &self,
        document: &Document,
        window: &Window,
        frames: Option<&mut S>,
    ) -> Result<AuditReport, AuditError> {
        self.config.validate()?;
        tracing::info!(url = document.url(), rules = self.config.rules().len(), "starting audit");

        let mut outcome = self.audit_static(document, window);

        let mut viewports = Vec::new();
        for device in self.config.viewport_sizes.iter().flatten() {
            let scan = with_device(window, device, || async { self.audit_static(document, window) }).await;
            match scan {
                Ok(device_outcome) => {
                    outcome.merge(device_outcome.with_context(&device.name));
                    viewports.push(ViewportRun::completed(device.clone()));
                }
                Err(err) => {
                    tracing::warn!("scan for {} aborted: {err}", device.name);
                    viewports.push(ViewportRun::aborted(device.clone(), err));
                }
            }
        }

        let performance = match (self.config.sampling_window_ms, frames) {
            (Some(window_ms), Some(source)) => {
                let mut sampler = PerformanceSampler::with_cancel(source, self.cancel.clone());
                let run = sampler.sample(window_ms as f64).await;
                if run.cancelled || run.truncated {
                    tracing::info!("frame sampling stopped early after {} frames", run.samples.len());
                }
                (!run.samples.is_empty()).then(|| summarize(&run.samples))
            }
            (Some(_), None) => {
                tracing::debug!("sampling window configured but no frame source given");
                None
            }
            (None, _) => None,
        };

        let mut report = aggregate(&outcome.findings)
            .with_skipped(outcome.skipped)
            .with_viewports(viewports);
        if let Some(performance) = performance {
            report = report.with_performance(performance);
        }
        Ok(report)
    }
}
