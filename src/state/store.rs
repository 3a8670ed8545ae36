//! Application Store - the one observable object for page-wide state
//!
//! Event handling writes here; sections, the follower and the renderer read
//! from here. Every field is a spark-signals [`Signal`], so deriveds and
//! effects that read a field re-run when it changes.
//!
//! # Example
//!
//! ```ignore
//! let store = AppStore::new(Viewport::new(120, 40, metrics));
//! AppStore::update(&store.scroll_y, 150.0);
//! let top = store.scroll_y.get() <= 20.0;
//! ```

use spark_signals::{signal, Signal};

use crate::layout::NodeId;
use crate::types::{CellMetrics, Point};

/// Visible terminal area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub metrics: CellMetrics,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, metrics: CellMetrics) -> Self {
        Self { cols, rows, metrics }
    }

    pub fn width_px(&self) -> f64 {
        self.metrics.cols_to_px(self.cols)
    }

    pub fn height_px(&self) -> f64 {
        self.metrics.rows_to_px(self.rows)
    }

    /// Mobile-sized: at most `breakpoint_px` wide.
    pub fn is_narrow(&self, breakpoint_px: f64) -> bool {
        self.width_px() <= breakpoint_px
    }
}

/// Page-wide observable state.
#[derive(Clone)]
pub struct AppStore {
    /// Page scroll offset in pixels
    pub scroll_y: Signal<f64>,
    pub viewport: Signal<Viewport>,
    /// Pointer position in viewport pixels (None until the first move)
    pub pointer: Signal<Option<Point>>,
    /// Nearest link or button under the pointer
    pub hovered: Signal<Option<NodeId>>,
    /// Element id of the section under the scroll offset
    pub active_section: Signal<String>,
    /// Navbar chrome: past the scrolled threshold
    pub scrolled: Signal<bool>,
    pub menu_open: Signal<bool>,
    /// Bumped whenever something visual changed outside the signals above
    pub generation: Signal<u64>,
}

impl AppStore {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            scroll_y: signal(0.0),
            viewport: signal(viewport),
            pointer: signal(None),
            hovered: signal(None),
            active_section: signal(String::from("home")),
            scrolled: signal(false),
            menu_open: signal(false),
            generation: signal(0),
        }
    }

    /// Request a redraw.
    pub fn bump(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }

    /// Set a signal only when the value differs, so readers don't re-run.
    pub fn update<T: Clone + PartialEq + 'static>(signal: &Signal<T>, value: T) -> bool {
        if signal.get() == value {
            return false;
        }
        signal.set(value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let store = AppStore::new(Viewport::new(80, 24, CellMetrics::default()));
        assert_eq!(store.active_section.get(), "home");
        assert!(!store.scrolled.get());
        assert!(!store.menu_open.get());
        assert_eq!(store.pointer.get(), None);
    }

    #[test]
    fn test_viewport_pixels() {
        let vp = Viewport::new(96, 30, CellMetrics::default());
        assert_eq!(vp.width_px(), 768.0);
        assert_eq!(vp.height_px(), 480.0);
        assert!(vp.is_narrow(768.0));
        assert!(!Viewport::new(97, 30, CellMetrics::default()).is_narrow(768.0));
    }

    #[test]
    fn test_update_skips_equal_values() {
        let store = AppStore::new(Viewport::new(80, 24, CellMetrics::default()));
        assert!(!AppStore::update(&store.scrolled, false));
        assert!(AppStore::update(&store.scrolled, true));
        assert!(store.scrolled.get());

        assert!(!AppStore::update(&store.active_section, "home".to_string()));
        assert!(AppStore::update(&store.active_section, "skills".to_string()));
        assert_eq!(store.active_section.get(), "skills");
    }

    #[test]
    fn test_clones_share_state() {
        let store = AppStore::new(Viewport::new(80, 24, CellMetrics::default()));
        let other = store.clone();
        other.menu_open.set(true);
        assert!(store.menu_open.get());
        store.bump();
        assert_eq!(other.generation.get(), 1);
    }
}
