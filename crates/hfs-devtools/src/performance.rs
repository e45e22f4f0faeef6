//! Performance Sampler
//!
//! Per-frame timing in the style of a requestAnimationFrame loop. Each
//! sample carries the instantaneous FPS (`1000 / delta`), never a
//! smoothed one; [`summarize`] does the aggregation.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use smol::Timer;

/// Frame interval of a 60Hz display
pub const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Frames one run may pull from its source (ten minutes at 60Hz)
pub const MAX_FRAMES: usize = 36_000;

/// Consecutive frames without a later timestamp before a run gives up
pub const MAX_STALLED_FRAMES: u32 = 120;

// Grade thresholds: (minimum average FPS, consistency strictly above)
const GRADE_A_PLUS: (f64, f64) = (58.0, 0.9);
const GRADE_A: (f64, f64) = (55.0, 0.8);
const GRADE_B: (f64, f64) = (50.0, 0.7);
const GRADE_C: (f64, f64) = (40.0, 0.6);
const GRADE_D_MIN_FPS: f64 = 30.0;

/// A source of animation frames
pub trait FrameSource {
    /// Wait for the next frame and return its timestamp in ms
    fn next_frame(&mut self) -> impl Future<Output = f64>;

    /// Heap in use, when the platform reports it
    fn memory_used(&self) -> Option<u64> {
        None
    }
}

impl<S: FrameSource> FrameSource for &mut S {
    fn next_frame(&mut self) -> impl Future<Output = f64> {
        (**self).next_frame()
    }

    fn memory_used(&self) -> Option<u64> {
        (**self).memory_used()
    }
}

/// Real frames paced by a timer at [`FRAME_INTERVAL`]
#[derive(Debug)]
pub struct TimerFrameSource {
    origin: Instant,
    interval: Duration,
}

impl TimerFrameSource {
    pub fn new() -> Self {
        Self::with_interval(FRAME_INTERVAL)
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self { origin: Instant::now(), interval }
    }
}

impl Default for TimerFrameSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for TimerFrameSource {
    async fn next_frame(&mut self) -> f64 {
        Timer::after(self.interval).await;
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Deterministic clock advancing a fixed step per frame
#[derive(Debug, Clone)]
pub struct SyntheticClock {
    start_ms: f64,
    step_ms: f64,
    frames: u64,
    memory: Option<u64>,
}

impl SyntheticClock {
    pub fn new(step_ms: f64) -> Self {
        Self { start_ms: 0.0, step_ms, frames: 0, memory: None }
    }

    pub fn starting_at(mut self, start_ms: f64) -> Self {
        self.start_ms = start_ms;
        self
    }

    pub fn with_memory(mut self, bytes: u64) -> Self {
        self.memory = Some(bytes);
        self
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl FrameSource for SyntheticClock {
    async fn next_frame(&mut self) -> f64 {
        // Multiply instead of accumulating so long runs do not drift
        let t = self.start_ms + self.step_ms * self.frames as f64;
        self.frames += 1;
        t
    }

    fn memory_used(&self) -> Option<u64> {
        self.memory
    }
}

/// One frame measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSample {
    pub timestamp_ms: f64,
    pub fps: f64,
    pub frame_time_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_used_bytes: Option<u64>,
}

/// Stops a running sampler at its next tick
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    stopped: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

/// Samples collected by one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleRun {
    pub samples: Vec<PerformanceSample>,
    /// Stopped through a [`CancelHandle`] before the window elapsed
    pub cancelled: bool,
    /// Ended early because the clock stalled or [`MAX_FRAMES`] was reached
    pub truncated: bool,
}

/// Frame-rate sampler over a [`FrameSource`]
#[derive(Debug)]
pub struct PerformanceSampler<S> {
    source: S,
    cancel: CancelHandle,
}

impl<S: FrameSource> PerformanceSampler<S> {
    pub fn new(source: S) -> Self {
        Self::with_cancel(source, CancelHandle::default())
    }

    /// Sampler that stops when `cancel` is stopped
    pub fn with_cancel(source: S, cancel: CancelHandle) -> Self {
        Self { source, cancel }
    }

    /// Handle that stops this sampler; once stopped it stays stopped
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Record frames for `window_ms` milliseconds.
    ///
    /// The cancel flag is checked before every frame; cancelling is a
    /// normal end and returns whatever was collected. The run also ends
    /// after [`MAX_FRAMES`] frames, or after [`MAX_STALLED_FRAMES`]
    /// frames in a row whose timestamp did not move forward.
    pub async fn sample(&mut self, window_ms: f64) -> SampleRun {
        let mut run = SampleRun::default();
        if self.cancel.is_stopped() {
            run.cancelled = true;
            return run;
        }

        let start = self.source.next_frame().await;
        let mut last = start;
        let mut frames = 0;
        let mut stalled = 0;
        loop {
            if self.cancel.is_stopped() {
                run.cancelled = true;
                break;
            }
            if frames >= MAX_FRAMES || stalled >= MAX_STALLED_FRAMES {
                tracing::warn!(frames, stalled, "frame source did not finish the window, ending run");
                run.truncated = true;
                break;
            }
            // Let a canceller on the same executor run between frames
            smol::future::yield_now().await;

            let now = self.source.next_frame().await;
            frames += 1;
            if now - start > window_ms {
                break;
            }
            let delta = now - last;
            last = now;
            if delta <= 0.0 {
                stalled += 1;
                continue;
            }
            stalled = 0;
            run.samples.push(PerformanceSample {
                timestamp_ms: now,
                fps: 1000.0 / delta,
                frame_time_ms: delta,
                memory_used_bytes: self.source.memory_used(),
            });
        }

        tracing::debug!(
            samples = run.samples.len(),
            cancelled = run.cancelled,
            truncated = run.truncated,
            "sampling finished"
        );
        run
    }
}

/// Letter grade for a frame-rate profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_metrics(avg_fps: f64, consistency: f64) -> Self {
        let meets = |(fps, cons): (f64, f64)| avg_fps >= fps && consistency > cons;
        if meets(GRADE_A_PLUS) {
            Self::APlus
        } else if meets(GRADE_A) {
            Self::A
        } else if meets(GRADE_B) {
            Self::B
        } else if meets(GRADE_C) {
            Self::C
        } else if avg_fps >= GRADE_D_MIN_FPS {
            Self::D
        } else {
            Self::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

/// Aggregated frame-rate statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    #[serde(rename = "avgFPS")]
    pub avg_fps: f64,
    #[serde(rename = "minFPS")]
    pub min_fps: f64,
    #[serde(rename = "maxFPS")]
    pub max_fps: f64,
    pub avg_frame_time_ms: f64,
    /// `max(0, 1 - stddev(fps) / mean(fps))`
    pub consistency: f64,
    pub grade: Grade,
    pub sample_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_memory_bytes: Option<u64>,
}

/// Summarize samples; no samples gives zeros and grade F
pub fn summarize(samples: &[PerformanceSample]) -> PerformanceSummary {
    if samples.is_empty() {
        return PerformanceSummary {
            avg_fps: 0.0,
            min_fps: 0.0,
            max_fps: 0.0,
            avg_frame_time_ms: 0.0,
            consistency: 0.0,
            grade: Grade::F,
            sample_count: 0,
            peak_memory_bytes: None,
        };
    }

    let n = samples.len() as f64;
    let avg_fps = samples.iter().map(|s| s.fps).sum::<f64>() / n;
    let min_fps = samples.iter().map(|s| s.fps).fold(f64::INFINITY, f64::min);
    let max_fps = samples.iter().map(|s| s.fps).fold(f64::NEG_INFINITY, f64::max);
    let avg_frame_time_ms = samples.iter().map(|s| s.frame_time_ms).sum::<f64>() / n;

    let variance = samples.iter().map(|s| (s.fps - avg_fps).powi(2)).sum::<f64>() / n;
    let consistency = if avg_fps > 0.0 { (1.0 - variance.sqrt() / avg_fps).max(0.0) } else { 0.0 };

    PerformanceSummary {
        avg_fps,
        min_fps,
        max_fps,
        avg_frame_time_ms,
        consistency,
        grade: Grade::from_metrics(avg_fps, consistency),
        sample_count: samples.len(),
        peak_memory_bytes: samples.iter().filter_map(|s| s.memory_used_bytes).max(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steady(fps: f64, count: usize) -> Vec<PerformanceSample> {
        (0..count)
            .map(|i| PerformanceSample {
                timestamp_ms: i as f64 * 1000.0 / fps,
                fps,
                frame_time_ms: 1000.0 / fps,
                memory_used_bytes: None,
            })
            .collect()
    }

    #[test]
    fn test_steady_60fps_is_perfectly_consistent() {
        let summary = summarize(&steady(60.0, 120));
        assert_eq!(summary.avg_fps, 60.0);
        assert_eq!(summary.consistency, 1.0);
        assert_eq!(summary.grade, Grade::APlus);
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.sample_count, 0);
        assert_eq!(summary.avg_fps, 0.0);
        assert_eq!(summary.grade, Grade::F);
    }

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(Grade::from_metrics(59.0, 0.95), Grade::APlus);
        assert_eq!(Grade::from_metrics(59.0, 0.85), Grade::A);
        assert_eq!(Grade::from_metrics(52.0, 0.75), Grade::B);
        assert_eq!(Grade::from_metrics(45.0, 0.65), Grade::C);
        assert_eq!(Grade::from_metrics(45.0, 0.2), Grade::D);
        assert_eq!(Grade::from_metrics(29.9, 1.0), Grade::F);
    }

    #[test]
    fn test_jank_lowers_consistency() {
        let mut samples = steady(60.0, 10);
        samples.extend(steady(20.0, 10));
        let summary = summarize(&samples);
        assert_eq!(summary.min_fps, 20.0);
        assert_eq!(summary.max_fps, 60.0);
        assert!((summary.avg_fps - 40.0).abs() < 1e-9);
        assert!((summary.consistency - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_grade_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Grade::APlus).unwrap(), "\"A+\"");
        let summary = summarize(&steady(60.0, 3));
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["avgFPS"], 60.0);
        assert_eq!(json["grade"], "A+");
    }

    #[test]
    fn test_sampler_reports_memory_peak() {
        let clock = SyntheticClock::new(20.0).with_memory(48 * 1024 * 1024);
        let mut sampler = PerformanceSampler::new(clock);
        let run = smol::block_on(sampler.sample(100.0));

        assert_eq!(run.samples.len(), 5);
        assert!(!run.cancelled);
        assert_eq!(summarize(&run.samples).peak_memory_bytes, Some(48 * 1024 * 1024));
    }

    #[test]
    fn test_stopped_before_start_collects_nothing() {
        let mut sampler = PerformanceSampler::new(SyntheticClock::new(16.0));
        sampler.cancel_handle().stop();
        let run = smol::block_on(sampler.sample(1000.0));

        assert!(run.cancelled);
        assert!(run.samples.is_empty());
        assert_eq!(sampler.source().frames(), 0);
    }

    #[test]
    fn test_timer_source_advances() {
        let mut source = TimerFrameSource::with_interval(Duration::from_millis(2));
        let (a, b) = smol::block_on(async { (source.next_frame().await, source.next_frame().await) });
        assert!(b > a);
    }
}
