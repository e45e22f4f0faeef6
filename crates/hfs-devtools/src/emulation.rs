//! Device Emulation
//!
//! Temporarily rewrites the window's viewport the way the responsive
//! panel of a browser's devtools does. The original size is always put
//! back: on success, on error, on panic, and when the future is dropped
//! half way through.

use std::future::Future;

use hfs_dom::{DomError, EmulationClaim, Window};
use serde::{Deserialize, Serialize};

use crate::SimulationError;

/// Device preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProfile {
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_pixel_ratio")]
    pub pixel_ratio: f64,
}

fn default_pixel_ratio() -> f64 {
    1.0
}

/// Built-in presets: (name, width, height, pixel ratio)
const CATALOG: &[(&str, u32, u32, f64)] = &[
    ("iPhone SE", 375, 667, 2.0),
    ("iPhone 12 Pro", 390, 844, 3.0),
    ("Pixel 5", 393, 851, 2.75),
    ("iPad Mini", 768, 1024, 2.0),
    ("iPad Pro", 1024, 1366, 2.0),
    ("Laptop", 1366, 768, 1.0),
    ("Desktop", 1920, 1080, 1.0),
];

impl DeviceProfile {
    pub fn new(name: &str, width: u32, height: u32, pixel_ratio: f64) -> Self {
        Self { name: name.to_string(), width, height, pixel_ratio }
    }

    /// All built-in presets, narrowest first
    pub fn catalog() -> Vec<DeviceProfile> {
        CATALOG
            .iter()
            .map(|&(name, width, height, ratio)| Self::new(name, width, height, ratio))
            .collect()
    }

    /// Look up a preset by name (case-insensitive)
    pub fn find(name: &str) -> Option<DeviceProfile> {
        CATALOG
            .iter()
            .find(|(preset, ..)| preset.eq_ignore_ascii_case(name.trim()))
            .map(|&(name, width, height, ratio)| Self::new(name, width, height, ratio))
    }
}

/// Puts the captured viewport back, at the latest when dropped
struct RestoreGuard<'w> {
    claim: EmulationClaim<'w>,
    width: u32,
    height: u32,
    pixel_ratio: f64,
    restored: bool,
}

impl<'w> RestoreGuard<'w> {
    fn capture(claim: EmulationClaim<'w>) -> Self {
        let window = claim.window();
        let (width, height, pixel_ratio) =
            (window.inner_width(), window.inner_height(), window.device_pixel_ratio());
        Self { claim, width, height, pixel_ratio, restored: false }
    }

    fn window(&self) -> &Window {
        self.claim.window()
    }

    fn restore(&mut self) -> Result<(), DomError> {
        self.restored = true;
        let window = self.claim.window();
        let size = window.define_inner_size(self.width, self.height);
        let ratio = window.define_device_pixel_ratio(self.pixel_ratio);
        window.dispatch_resize();
        tracing::debug!("viewport restored to {}x{}", self.width, self.height);
        size.and(ratio)
    }
}

impl Drop for RestoreGuard<'_> {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        if let Err(err) = self.restore() {
            tracing::error!("failed to restore viewport: {err}");
        }
    }
}

/// Run `f` with the window resized to `width` x `height`.
///
/// Not reentrant: a second call on the same window while one is in
/// flight fails with [`SimulationError::AlreadyActive`].
pub async fn with_simulated_viewport<F, Fut, T>(
    window: &Window,
    width: u32,
    height: u32,
    f: F,
) -> Result<T, SimulationError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    emulate(window, width, height, None, f).await
}

/// Run `f` emulating a device, including its pixel ratio
pub async fn with_device<F, Fut, T>(window: &Window, device: &DeviceProfile, f: F) -> Result<T, SimulationError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    tracing::info!("emulating {} ({}x{} @{}x)", device.name, device.width, device.height, device.pixel_ratio);
    emulate(window, device.width, device.height, Some(device.pixel_ratio), f).await
}

async fn emulate<F, Fut, T>(
    window: &Window,
    width: u32,
    height: u32,
    pixel_ratio: Option<f64>,
    f: F,
) -> Result<T, SimulationError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    let claim = window.claim_emulation().map_err(|_| SimulationError::AlreadyActive)?;
    let mut guard = RestoreGuard::capture(claim);

    let applied = guard.window().define_inner_size(width, height).and_then(|()| match pixel_ratio {
        Some(ratio) => guard.window().define_device_pixel_ratio(ratio),
        None => Ok(()),
    });
    if let Err(err) = applied {
        tracing::warn!("viewport override to {width}x{height} blocked: {err}");
        if let Err(restore_err) = guard.restore() {
            tracing::error!("failed to restore viewport: {restore_err}");
        }
        return Err(SimulationError::OverrideBlocked(err));
    }
    guard.window().dispatch_resize();

    let value = f().await;

    guard.restore().map_err(SimulationError::RestoreFailed)?;
    Ok(value)
}
