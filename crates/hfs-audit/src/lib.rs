//! HFS Audit
//!
//! Runs the accessibility auditors against a page, repeats them under
//! each configured device, optionally samples the frame rate, and folds
//! everything into one [`AuditReport`].
//!
//! ```no_run
//! use hfs_audit::{AuditConfig, AuditRunner};
//! use hfs_devtools::TimerFrameSource;
//! use hfs_dom::{Document, Window};
//!
//! let doc = Document::new("https://example.com/");
//! let window = Window::default();
//! let runner = AuditRunner::new(AuditConfig::default());
//! let report = smol::block_on(runner.run(&doc, &window, None::<&mut TimerFrameSource>))?;
//! println!("score {}", report.summary.score);
//! # Ok::<(), hfs_audit::AuditError>(())
//! ```

mod config;
mod report;
mod runner;
mod storage;

pub use config::AuditConfig;
pub use report::{
    AuditReport, AuditSummary, Recommendation, RunStatus, ViewportRun, aggregate, aggregate_at,
};
pub use runner::AuditRunner;
pub use storage::{MemoryStorage, REPORT_STORAGE_KEY, ReportStore, load_report, persist_report};

/// Audit error
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("configuration is not valid JSON: {0}")]
    ConfigFormat(#[from] serde_json::Error),
}

/// Report storage error
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage quota exceeded writing {key:?} ({size} bytes)")]
    QuotaExceeded { key: String, size: usize },

    #[error("report serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("stored report is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
}
