//! Mount API - terminal lifecycle, render effect and event loop.
//!
//! The page publishes a [`Scene`] into one signal; a derived paints it into a
//! [`Frame`]; the ONE render effect installs the frame's hit grid and diffs
//! the buffer onto the terminal. Identical scenes never repaint.
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::pipeline::{mount, run};
//!
//! let mut page = Page::new(config, cols, rows)?;
//! let handle = mount(&page)?;
//! run(&mut page, &handle)?;  // until `q` or Ctrl+C
//! handle.unmount();
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use spark_signals::{derived, effect, signal, Signal};

use crate::config::AppConfig;
use crate::error::Result;
use crate::page::{Flow, Page};
use crate::renderer::{paint, DiffRenderer, Scene};
use crate::state::input::{self, InputEvent};
use crate::state::mouse;

use super::terminal::RawMode;

/// Longest step fed to the page in one frame (after a stall or suspend).
const MAX_FRAME_DT: f64 = 0.1;

// =============================================================================
// Mount Handle
// =============================================================================

/// Returned by [`mount`]. Dropping it restores the terminal.
pub struct MountHandle {
    stop_effect: Option<Box<dyn FnOnce()>>,
    running: Arc<AtomicBool>,
    scene: Signal<Scene>,
    renderer: Rc<RefCell<DiffRenderer>>,
    raw_mode: RawMode,
    frame_interval: Duration,
    last_frame: Cell<Instant>,
}

impl MountHandle {
    /// Stop rendering and restore the terminal.
    pub fn unmount(mut self) {
        self.restore();
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Ask the loop to exit after the current frame.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Hand a new scene to the render effect.
    pub fn publish(&self, scene: Scene) {
        self.scene.set(scene);
    }

    /// Seconds since the previous call, capped.
    fn frame_dt(&self) -> f64 {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame.replace(now)).as_secs_f64();
        dt.min(MAX_FRAME_DT)
    }

    fn restore(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        let Some(stop) = self.stop_effect.take() else {
            return;
        };
        stop();
        if self.raw_mode.is_active() {
            let _ = input::disable_mouse();
            if let Ok(mut renderer) = self.renderer.try_borrow_mut() {
                let _ = renderer.exit_fullscreen();
            }
        }
        self.raw_mode.disable();
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        self.restore();
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Take over the terminal and start rendering `page`.
///
/// Sets up raw mode, the alternate screen, mouse capture and the render
/// pipeline (scene signal → painted frame derived → render effect).
pub fn mount(page: &Page) -> Result<MountHandle> {
    let raw_mode = RawMode::enable()?;
    let renderer = Rc::new(RefCell::new(DiffRenderer::new()));
    renderer.borrow_mut().enter_fullscreen()?;

    let scene = signal(page.scene());
    let frame = {
        let scene = scene.clone();
        derived(move || paint(&scene.get()))
    };

    let running = Arc::new(AtomicBool::new(true));
    let running_effect = running.clone();
    let renderer_effect = renderer.clone();

    let stop_fn = effect(move || {
        if !running_effect.load(Ordering::SeqCst) {
            return;
        }

        // Read from derived (creates dependency)
        let frame = frame.get();

        // Hit grid first, so the next pointer event sees this frame
        mouse::set_hit_grid(frame.hits.clone());

        if let Ok(mut renderer) = renderer_effect.try_borrow_mut() {
            if let Err(err) = renderer.render(&frame.buffer) {
                tracing::warn!(%err, "render failed");
            }
        }
    });

    let fps = page_fps(page);
    let handle = MountHandle {
        stop_effect: Some(Box::new(stop_fn)),
        running,
        scene,
        renderer,
        raw_mode,
        frame_interval: Duration::from_secs_f64(1.0 / fps as f64),
        last_frame: Cell::new(Instant::now()),
    };
    let handle = capture_mouse(handle, input::enable_mouse)?;
    tracing::info!(fps, "mounted");
    Ok(handle)
}

/// Enable mouse capture on a live handle. On failure the handle is dropped,
/// which stops the effect and restores the terminal.
fn capture_mouse(handle: MountHandle, enable: impl FnOnce() -> std::io::Result<()>) -> Result<MountHandle> {
    enable()?;
    Ok(handle)
}

fn page_fps(page: &Page) -> u16 {
    page.config().animation.fps.max(1)
}

// =============================================================================
// Event Loop
// =============================================================================

/// Run one frame: wait up to one frame interval for input, route it, advance
/// the page and publish its scene.
///
/// Returns `Ok(false)` once the page asked to quit or the handle was stopped.
pub fn tick(page: &mut Page, handle: &MountHandle) -> Result<bool> {
    if !handle.is_running() {
        return Ok(false);
    }

    let metrics = page.store().viewport.get().metrics;
    if let Some(event) = input::poll_event(handle.frame_interval, &metrics)? {
        match event {
            InputEvent::Pointer(pointer) => page.handle_pointer(pointer)?,
            InputEvent::Command(command) => {
                if page.handle_command(command)? == Flow::Quit {
                    handle.stop();
                }
            }
            InputEvent::Resize(cols, rows) => {
                tracing::debug!(cols, rows, "resize");
                page.resize(cols, rows)?;
            }
            InputEvent::None => {}
        }
    }

    page.tick(handle.frame_dt())?;
    handle.publish(page.scene());
    Ok(handle.is_running())
}

/// Run the event loop until the page quits.
pub fn run(page: &mut Page, handle: &MountHandle) -> Result<()> {
    while tick(page, handle)? {}
    Ok(())
}

// =============================================================================
// Static Frames
// =============================================================================

/// Render one frame of the page at `offset` without touching the terminal.
///
/// Animations are disabled, so every triggered animation shows its end
/// state and everything below the fold its starting state.
pub fn dump(mut config: AppConfig, offset: f64, cols: u16, rows: u16) -> Result<Vec<String>> {
    config.animation.enabled = false;
    config.follower.enabled = false;
    let mut page = Page::new(config, cols, rows)?;
    page.scroll_by(offset)?;
    page.tick(0.0)?;
    let lines = page.paint().buffer.to_lines();
    page.unmount();
    Ok(lines)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::reset_animations;
    use crate::content::{HERO_TITLE, LOGO_TEXT};
    use crate::state::frame::reset_frame_tasks;
    use crate::state::mouse::reset_mouse_state;

    fn setup() {
        reset_animations();
        reset_mouse_state();
        reset_frame_tasks();
    }

    #[test]
    fn test_dump_top_of_page() {
        setup();
        let lines = dump(AppConfig::default(), 0.0, 120, 40).unwrap();
        assert_eq!(lines.len(), 40);
        let text = lines.join("\n");
        assert!(text.contains(LOGO_TEXT));
        // Title glyphs are drawn one by one; the first word survives intact
        assert!(text.contains(&HERO_TITLE[..3]));
    }

    #[test]
    fn test_dump_scrolled_keeps_navbar() {
        setup();
        // Hero is one viewport (640 px); the skills title sits near 688
        let lines = dump(AppConfig::default(), 600.0, 120, 40).unwrap();
        assert!(lines[0].contains(LOGO_TEXT) || lines[1].contains(LOGO_TEXT));
        assert!(lines.join("\n").contains("Technical Skills"));
    }

    fn detached_handle(page: &Page, stopped: Rc<Cell<bool>>) -> MountHandle {
        MountHandle {
            stop_effect: Some(Box::new(move || stopped.set(true))),
            running: Arc::new(AtomicBool::new(true)),
            scene: signal(page.scene()),
            renderer: Rc::new(RefCell::new(DiffRenderer::new())),
            raw_mode: RawMode::inactive(),
            frame_interval: Duration::from_millis(16),
            last_frame: Cell::new(Instant::now()),
        }
    }

    #[test]
    fn test_mouse_capture_failure_tears_down() {
        setup();
        let mut page = Page::new(AppConfig::default(), 120, 40).unwrap();
        let stopped = Rc::new(Cell::new(false));
        let handle = detached_handle(&page, stopped.clone());

        let result = capture_mouse(handle, || Err(std::io::Error::other("no mouse")));
        assert!(result.is_err());
        assert!(stopped.get());
        page.unmount();
    }

    #[test]
    fn test_mouse_capture_keeps_handle() {
        setup();
        let mut page = Page::new(AppConfig::default(), 120, 40).unwrap();
        let stopped = Rc::new(Cell::new(false));
        let handle = capture_mouse(detached_handle(&page, stopped.clone()), || Ok(())).unwrap();
        assert!(handle.is_running());
        assert!(!stopped.get());

        handle.unmount();
        assert!(stopped.get());
        page.unmount();
    }

    #[test]
    fn test_running_flag() {
        let running = Arc::new(AtomicBool::new(true));
        assert!(running.load(Ordering::SeqCst));
        running.store(false, Ordering::SeqCst);
        assert!(!running.load(Ordering::SeqCst));
    }
}
