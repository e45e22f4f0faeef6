//! HFS DevTools
//!
//! The two tools the audit drives against a live window:
//! - Device emulation (scoped viewport override with guaranteed restore)
//! - Performance sampling (per-frame FPS with cancellation)

pub mod emulation;
pub mod performance;

pub use emulation::{DeviceProfile, with_device, with_simulated_viewport};
pub use performance::{
    CancelHandle, FrameSource, Grade, MAX_FRAMES, MAX_STALLED_FRAMES, PerformanceSample, PerformanceSampler, PerformanceSummary,
    SampleRun, SyntheticClock, TimerFrameSource, summarize,
};

use hfs_dom::DomError;

/// Viewport emulation error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    #[error("another viewport simulation is already active on this window")]
    AlreadyActive,

    #[error("viewport override blocked: {0}")]
    OverrideBlocked(DomError),

    #[error("viewport restore failed: {0}")]
    RestoreFailed(DomError),
}
