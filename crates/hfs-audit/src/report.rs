//! Audit Report
//!
//! Aggregation is a pure function of the findings; only the timestamp
//! depends on when it runs.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use hfs_a11y::{Finding, IssueSeverity, RuleId, Skipped};
use hfs_devtools::{DeviceProfile, PerformanceSummary};
use serde::{Deserialize, Serialize};

/// Headline numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    /// Percentage of evaluated findings that passed, 0 to 100
    pub score: u32,
    /// Failed findings
    pub total_issues: usize,
    pub passed: usize,
    /// Elements that could not be evaluated
    pub skipped: usize,
}

/// One entry per failing rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub rule: RuleId,
    pub title: String,
    pub occurrences: usize,
    pub remedy: String,
    pub wcag_criterion: String,
    pub severity: IssueSeverity,
}

impl Recommendation {
    fn for_rule(rule: RuleId, occurrences: usize) -> Self {
        Self {
            rule,
            title: rule.title().to_string(),
            occurrences,
            remedy: rule.remedy().to_string(),
            wcag_criterion: rule.wcag_criterion().to_string(),
            severity: rule.severity(),
        }
    }
}

/// How a device scan ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum RunStatus {
    Completed,
    Aborted { reason: String },
}

/// One device pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportRun {
    pub device: DeviceProfile,
    pub status: RunStatus,
}

impl ViewportRun {
    pub fn completed(device: DeviceProfile) -> Self {
        Self { device, status: RunStatus::Completed }
    }

    pub fn aborted(device: DeviceProfile, reason: impl ToString) -> Self {
        Self { device, status: RunStatus::Aborted { reason: reason.to_string() } }
    }

    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }
}

/// Complete audit result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    pub summary: AuditSummary,
    pub findings: Vec<Finding>,
    #[serde(default)]
    pub skipped: Vec<Skipped>,
    pub recommendations: Vec<Recommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<PerformanceSummary>,
    #[serde(default)]
    pub viewports: Vec<ViewportRun>,
}

impl AuditReport {
    pub fn with_skipped(mut self, skipped: Vec<Skipped>) -> Self {
        self.summary.skipped = skipped.len();
        self.skipped = skipped;
        self
    }

    pub fn with_performance(mut self, performance: PerformanceSummary) -> Self {
        self.performance = Some(performance);
        self
    }

    pub fn with_viewports(mut self, viewports: Vec<ViewportRun>) -> Self {
        self.viewports = viewports;
        self
    }

    /// Failed findings
    pub fn issues(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| !f.passed)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Summary at info level, one warning per failing rule
    pub fn log_report(&self) {
        tracing::info!(
            score = self.summary.score,
            issues = self.summary.total_issues,
            passed = self.summary.passed,
            skipped = self.summary.skipped,
            "accessibility audit complete"
        );
        for rec in &self.recommendations {
            tracing::warn!(
                rule = %rec.rule,
                occurrences = rec.occurrences,
                "{} ({}): {}",
                rec.title,
                rec.wcag_criterion,
                rec.remedy
            );
        }
        if let Some(perf) = &self.performance {
            tracing::info!(
                avg_fps = perf.avg_fps,
                min_fps = perf.min_fps,
                consistency = perf.consistency,
                "performance grade {}",
                perf.grade.as_str()
            );
        }
        for run in self.viewports.iter().filter(|run| !run.is_completed()) {
            tracing::warn!("device scan {} did not complete: {:?}", run.device.name, run.status);
        }
    }
}

/// Aggregate findings at the current time
pub fn aggregate(findings: &[Finding]) -> AuditReport {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    aggregate_at(findings, timestamp)
}

/// Aggregate findings with a fixed timestamp
pub fn aggregate_at(findings: &[Finding], timestamp: u64) -> AuditReport {
    let total = findings.len();
    let passed = findings.iter().filter(|f| f.passed).count();
    let score = if total == 0 {
        0
    } else {
        (100.0 * passed as f64 / total as f64).round() as u32
    };

    let mut failing: BTreeMap<RuleId, usize> = BTreeMap::new();
    for finding in findings.iter().filter(|f| !f.passed) {
        *failing.entry(finding.rule).or_default() += 1;
    }
    let recommendations = failing
        .into_iter()
        .map(|(rule, occurrences)| Recommendation::for_rule(rule, occurrences))
        .collect();

    AuditReport {
        timestamp,
        summary: AuditSummary { score, total_issues: total - passed, passed, skipped: 0 },
        findings: findings.to_vec(),
        skipped: Vec::new(),
        recommendations,
        performance: None,
        viewports: Vec::new(),
    }
}
