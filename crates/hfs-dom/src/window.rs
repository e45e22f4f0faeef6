//! Window
//!
//! The page's `window`: viewport size, device pixel ratio, the
//! `prefers-reduced-motion` media state and `resize` listeners.
//!
//! The window is shared by everything that inspects the page, so all
//! state sits behind `Cell`/`RefCell` and every method takes `&self`.
//! Only device emulation writes the viewport, and it must hold the
//! single [`EmulationClaim`] while doing so.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::DomError;

/// Payload delivered to `resize` listeners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeEvent {
    pub inner_width: u32,
    pub inner_height: u32,
    pub device_pixel_ratio: f64,
}

/// Handle returned by [`Window::add_resize_listener`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type ResizeListener = Rc<dyn Fn(&ResizeEvent)>;

/// Browser window
pub struct Window {
    inner_width: Cell<u32>,
    inner_height: Cell<u32>,
    device_pixel_ratio: Cell<f64>,
    prefers_reduced_motion: Cell<bool>,
    /// Whether the viewport properties may be redefined
    configurable: Cell<bool>,
    emulation_active: Cell<bool>,
    resize_count: Cell<u64>,
    next_listener: Cell<u64>,
    listeners: RefCell<Vec<(ListenerId, ResizeListener)>>,
}

impl Window {
    /// Create a window with the given viewport
    pub fn new(inner_width: u32, inner_height: u32) -> Self {
        Self {
            inner_width: Cell::new(inner_width),
            inner_height: Cell::new(inner_height),
            device_pixel_ratio: Cell::new(1.0),
            prefers_reduced_motion: Cell::new(false),
            configurable: Cell::new(true),
            emulation_active: Cell::new(false),
            resize_count: Cell::new(0),
            next_listener: Cell::new(1),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn inner_width(&self) -> u32 {
        self.inner_width.get()
    }

    pub fn inner_height(&self) -> u32 {
        self.inner_height.get()
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio.get()
    }

    /// Current `(prefers-reduced-motion: reduce)` state
    pub fn prefers_reduced_motion(&self) -> bool {
        self.prefers_reduced_motion.get()
    }

    pub fn set_prefers_reduced_motion(&self, reduce: bool) {
        self.prefers_reduced_motion.set(reduce);
    }

    /// Redefine `innerWidth`/`innerHeight`
    pub fn define_inner_size(&self, width: u32, height: u32) -> Result<(), DomError> {
        if !self.configurable.get() {
            return Err(DomError::PropertyNotConfigurable("innerWidth"));
        }
        if width == 0 || height == 0 {
            return Err(DomError::InvalidDimensions { width, height });
        }
        self.inner_width.set(width);
        self.inner_height.set(height);
        Ok(())
    }

    /// Redefine `devicePixelRatio`
    pub fn define_device_pixel_ratio(&self, ratio: f64) -> Result<(), DomError> {
        if !self.configurable.get() {
            return Err(DomError::PropertyNotConfigurable("devicePixelRatio"));
        }
        if !(ratio.is_finite() && ratio > 0.0) {
            return Err(DomError::InvalidDimensions {
                width: self.inner_width.get(),
                height: self.inner_height.get(),
            });
        }
        self.device_pixel_ratio.set(ratio);
        Ok(())
    }

    /// Make the viewport properties read-only, like a page that froze them
    pub fn freeze_dimensions(&self) {
        self.configurable.set(false);
    }

    pub fn is_configurable(&self) -> bool {
        self.configurable.get()
    }

    /// Register a `resize` listener
    pub fn add_resize_listener(&self, listener: impl Fn(&ResizeEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Remove a `resize` listener; returns false if it was not registered
    pub fn remove_resize_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    /// Fire a `resize` event at every listener
    pub fn dispatch_resize(&self) {
        let event = ResizeEvent {
            inner_width: self.inner_width.get(),
            inner_height: self.inner_height.get(),
            device_pixel_ratio: self.device_pixel_ratio.get(),
        };
        self.resize_count.set(self.resize_count.get() + 1);

        // Snapshot so listeners may (un)register while being called
        let listeners: Vec<ResizeListener> =
            self.listeners.borrow().iter().map(|(_, l)| Rc::clone(l)).collect();
        tracing::debug!(
            "resize to {}x{} ({} listeners)",
            event.inner_width,
            event.inner_height,
            listeners.len()
        );
        for listener in listeners {
            listener(&event);
        }
    }

    /// Number of `resize` events dispatched so far
    pub fn resize_count(&self) -> u64 {
        self.resize_count.get()
    }

    /// Take the single emulation slot for this window
    pub fn claim_emulation(&self) -> Result<EmulationClaim<'_>, DomError> {
        if self.emulation_active.replace(true) {
            return Err(DomError::EmulationInProgress);
        }
        Ok(EmulationClaim { window: self })
    }

    pub fn is_emulating(&self) -> bool {
        self.emulation_active.get()
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new(1280, 800)
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("inner_width", &self.inner_width.get())
            .field("inner_height", &self.inner_height.get())
            .field("device_pixel_ratio", &self.device_pixel_ratio.get())
            .field("prefers_reduced_motion", &self.prefers_reduced_motion.get())
            .field("configurable", &self.configurable.get())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

/// Exclusive right to rewrite the viewport; released on drop
#[derive(Debug)]
pub struct EmulationClaim<'w> {
    window: &'w Window,
}

impl EmulationClaim<'_> {
    pub fn window(&self) -> &Window {
        self.window
    }
}

impl Drop for EmulationClaim<'_> {
    fn drop(&mut self) {
        self.window.emulation_active.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_inner_size() {
        let window = Window::new(1440, 900);
        window.define_inner_size(375, 667).unwrap();
        assert_eq!((window.inner_width(), window.inner_height()), (375, 667));
    }

    #[test]
    fn test_frozen_window_rejects_redefinition() {
        let window = Window::new(1440, 900);
        window.freeze_dimensions();
        assert_eq!(
            window.define_inner_size(375, 667),
            Err(DomError::PropertyNotConfigurable("innerWidth"))
        );
        assert_eq!(window.inner_width(), 1440);
    }

    #[test]
    fn test_zero_size_rejected() {
        let window = Window::default();
        assert!(matches!(
            window.define_inner_size(0, 600),
            Err(DomError::InvalidDimensions { width: 0, height: 600 })
        ));
    }

    #[test]
    fn test_resize_listeners() {
        let window = Window::new(1024, 768);
        let seen = Rc::new(Cell::new(0u32));
        let seen_in = Rc::clone(&seen);
        let id = window.add_resize_listener(move |e| seen_in.set(e.inner_width));

        window.define_inner_size(390, 844).unwrap();
        window.dispatch_resize();
        assert_eq!(seen.get(), 390);

        assert!(window.remove_resize_listener(id));
        assert!(!window.remove_resize_listener(id));
        window.define_inner_size(800, 600).unwrap();
        window.dispatch_resize();
        assert_eq!(seen.get(), 390);
        assert_eq!(window.resize_count(), 2);
    }

    #[test]
    fn test_single_emulation_claim() {
        let window = Window::default();
        let claim = window.claim_emulation().unwrap();
        assert!(window.is_emulating());
        assert!(matches!(window.claim_emulation(), Err(DomError::EmulationInProgress)));

        drop(claim);
        assert!(!window.is_emulating());
        assert!(window.claim_emulation().is_ok());
    }
}
