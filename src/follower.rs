//! Mouse Follower - a halo and a dot that trail the pointer.
//!
//! Both markers move a fixed fraction of the remaining distance to the
//! pointer once per frame (halo 0.1, dot 0.2), so they converge without ever
//! overshooting. While a link or button is hovered the halo grows and takes
//! the highlight color.
//!
//! The per-frame work runs as a [`FrameTask`] owned by the follower; dropping
//! the follower (or calling [`MouseFollower::unmount`]) stops it.
//!
//! ```ignore
//! let follower = MouseFollower::mount(&store, &config.follower, 768.0, &theme);
//! run_frame(1.0 / 60.0);
//! scene.overlays = follower.overlays();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::Ease;
use crate::config::FollowerConfig;
use crate::renderer::Overlay;
use crate::state::frame::{request_frames, FrameTask};
use crate::state::AppStore;
use crate::theme::Theme;
use crate::types::{Point, Rgba};

/// Seconds for the halo to change between its idle and hover looks.
pub const HOVER_TRANSITION: f64 = 0.3;

const HALO_GLYPH: char = '◯';
const HALO_SMALL_GLYPH: char = '○';
const DOT_GLYPH: char = '•';
const DOT_OPACITY: f64 = 0.7;

/// Halo look at rest and while hovering an interactive node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HaloLook {
    pub scale: f64,
    pub opacity: f64,
    pub color: Rgba,
}

impl HaloLook {
    fn mix(a: &HaloLook, b: &HaloLook, t: f64) -> HaloLook {
        if t <= 0.0 {
            return *a;
        }
        if t >= 1.0 {
            return *b;
        }
        HaloLook {
            scale: a.scale + (b.scale - a.scale) * t,
            opacity: a.opacity + (b.opacity - a.opacity) * t,
            color: Rgba::lerp(a.color, b.color, t as f32),
        }
    }
}

/// Move `current` `factor` of the way to `target`.
pub fn lerp_toward(current: Point, target: Point, factor: f64) -> Point {
    let factor = factor.clamp(0.0, 1.0);
    Point::new(
        current.x + (target.x - current.x) * factor,
        current.y + (target.y - current.y) * factor,
    )
}

/// Marker positions and hover progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Markers {
    pub halo: Point,
    pub dot: Point,
    /// 0 = idle look, 1 = hover look
    pub hover: f64,
    /// Set once the pointer has been seen
    pub tracking: bool,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            halo: Point::default(),
            dot: Point::default(),
            hover: 0.0,
            tracking: false,
        }
    }
}

impl Markers {
    /// One frame: chase `target` and move the hover look toward `hovering`.
    pub fn step(&mut self, target: Point, hovering: bool, dt: f64, config: &FollowerConfig) {
        self.tracking = true;
        self.halo = lerp_toward(self.halo, target, config.halo_factor);
        self.dot = lerp_toward(self.dot, target, config.dot_factor);

        let step = if HOVER_TRANSITION > 0.0 { dt / HOVER_TRANSITION } else { 1.0 };
        self.hover = if hovering {
            (self.hover + step).min(1.0)
        } else {
            (self.hover - step).max(0.0)
        };
    }
}

/// The mounted follower.
pub struct MouseFollower {
    markers: Rc<RefCell<Markers>>,
    store: AppStore,
    breakpoint_px: f64,
    idle: HaloLook,
    hovered: HaloLook,
    dot_color: Rgba,
    task: Option<FrameTask>,
}

impl MouseFollower {
    /// Start following the store's pointer. A disabled follower mounts
    /// without a frame task and draws nothing.
    pub fn mount(store: &AppStore, config: &FollowerConfig, breakpoint_px: f64, theme: &Theme) -> Self {
        let markers = Rc::new(RefCell::new(Markers::default()));

        let task = config.enabled.then(|| {
            let markers = markers.clone();
            let store = store.clone();
            let config = config.clone();
            request_frames(move |dt| {
                if store.viewport.get().is_narrow(breakpoint_px) {
                    return;
                }
                let Some(pointer) = store.pointer.get() else {
                    return;
                };
                let hovering = store.hovered.get().is_some();
                markers.borrow_mut().step(pointer, hovering, dt, &config);
            })
        });
        tracing::debug!(enabled = config.enabled, "mouse follower mounted");

        Self {
            markers,
            store: store.clone(),
            breakpoint_px,
            idle: HaloLook {
                scale: 1.0,
                opacity: 0.15,
                color: theme.text_muted,
            },
            hovered: HaloLook {
                scale: 1.5,
                opacity: 0.6,
                color: theme.highlight,
            },
            dot_color: theme.primary,
            task,
        }
    }

    pub fn markers(&self) -> Markers {
        *self.markers.borrow()
    }

    pub fn is_mounted(&self) -> bool {
        self.task.as_ref().is_some_and(FrameTask::is_active)
    }

    /// Current halo look, eased between idle and hover.
    pub fn halo_look(&self) -> HaloLook {
        let t = Ease::Power2Out.apply(self.markers.borrow().hover);
        HaloLook::mix(&self.idle, &self.hovered, t)
    }

    /// Glyphs to draw over the page this frame.
    pub fn overlays(&self) -> Vec<Overlay> {
        let markers = self.markers();
        if self.task.is_none()
            || !markers.tracking
            || self.store.viewport.get().is_narrow(self.breakpoint_px)
        {
            return Vec::new();
        }
        let look = self.halo_look();
        vec![
            Overlay {
                position: markers.halo,
                glyph: if look.scale >= 1.25 { HALO_GLYPH } else { HALO_SMALL_GLYPH },
                color: look.color,
                opacity: look.opacity,
            },
            Overlay {
                position: markers.dot,
                glyph: DOT_GLYPH,
                color: self.dot_color,
                opacity: DOT_OPACITY,
            },
        ]
    }

    /// Stop the per-frame task.
    pub fn unmount(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
            tracing::debug!("mouse follower unmounted");
        }
    }
}

impl Drop for MouseFollower {
    fn drop(&mut self) {
        self.unmount();
    }
}
