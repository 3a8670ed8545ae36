//! Frame Tasks - Cancellable per-frame callbacks on one shared clock
//!
//! Every task subscribed here runs once per frame, in subscription order,
//! with the elapsed seconds since the previous frame. The event loop drives
//! the clock through [`run_frame`].
//!
//! # Pattern
//!
//! - A task keeps running until its [`FrameTask`] handle is cancelled or dropped
//! - The frame counter signal bumps once per frame, so effects can track it
//! - Tasks may cancel themselves or subscribe new tasks while running
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::state::frame::{request_frames, run_frame};
//!
//! let task = request_frames(|dt| follower.step(dt));
//! run_frame(1.0 / 60.0);
//! task.cancel();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{signal, Signal};

// =============================================================================
// FRAME REGISTRY
// =============================================================================

type Callback = Rc<RefCell<dyn FnMut(f64)>>;

struct FrameRegistry {
    tasks: Vec<(usize, Callback)>,
    next_id: usize,
    /// Frames run so far
    frame: Signal<u64>,
}

impl FrameRegistry {
    fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
            frame: signal(0),
        }
    }
}

thread_local! {
    static FRAME_REGISTRY: RefCell<FrameRegistry> = RefCell::new(FrameRegistry::new());
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Owns a per-frame task. Dropping it stops the task.
#[must_use = "dropping the task cancels it"]
#[derive(Debug)]
pub struct FrameTask {
    id: Option<usize>,
}

impl FrameTask {
    /// Stop the task now.
    pub fn cancel(mut self) {
        self.stop();
    }

    pub fn is_active(&self) -> bool {
        let Some(id) = self.id else {
            return false;
        };
        FRAME_REGISTRY.with(|reg| reg.borrow().tasks.iter().any(|(task_id, _)| *task_id == id))
    }

    fn stop(&mut self) {
        if let Some(id) = self.id.take() {
            let _ = FRAME_REGISTRY.try_with(|reg| {
                reg.borrow_mut().tasks.retain(|(task_id, _)| *task_id != id);
            });
        }
    }
}

impl Drop for FrameTask {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Run `callback` once per frame until the returned task is dropped.
pub fn request_frames<F>(callback: F) -> FrameTask
where
    F: FnMut(f64) + 'static,
{
    let id = FRAME_REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id;
        reg.next_id += 1;
        let callback: Callback = Rc::new(RefCell::new(callback));
        reg.tasks.push((id, callback));
        id
    });
    FrameTask { id: Some(id) }
}

/// Advance the frame clock: run every task with `dt` seconds.
///
/// Returns how many tasks ran.
pub fn run_frame(dt: f64) -> usize {
    let tasks: Vec<Callback> = FRAME_REGISTRY.with(|reg| {
        reg.borrow().tasks.iter().map(|(_, cb)| cb.clone()).collect()
    });

    for task in &tasks {
        // A task re-entering run_frame from inside itself is skipped
        if let Ok(mut callback) = task.try_borrow_mut() {
            (*callback)(dt);
        }
    }

    FRAME_REGISTRY.with(|reg| {
        let frame = reg.borrow().frame.clone();
        frame.set(frame.get() + 1);
    });
    tasks.len()
}

/// Number of live tasks.
pub fn task_count() -> usize {
    FRAME_REGISTRY.with(|reg| reg.borrow().tasks.len())
}

/// Frames run since the last reset.
pub fn frame_count() -> u64 {
    FRAME_REGISTRY.with(|reg| reg.borrow().frame.get())
}

/// Frame counter signal, for effects that should re-run every frame.
pub fn frame_signal() -> Signal<u64> {
    FRAME_REGISTRY.with(|reg| reg.borrow().frame.clone())
}

/// Drop every task and reset the counter (for testing).
pub fn reset_frame_tasks() {
    FRAME_REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        reg.tasks.clear();
        reg.next_id = 0;
        reg.frame.set(0);
    });
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn setup() {
        reset_frame_tasks();
    }

    #[test]
    fn test_task_runs_every_frame() {
        setup();
        let total = Rc::new(Cell::new(0.0));
        let t = total.clone();
        let _task = request_frames(move |dt| t.set(t.get() + dt));

        run_frame(0.5);
        run_frame(0.25);
        assert_eq!(total.get(), 0.75);
        assert_eq!(frame_count(), 2);
    }

    #[test]
    fn test_cancel_stops_task() {
        setup();
        let runs = Rc::new(Cell::new(0));
        let r = runs.clone();
        let task = request_frames(move |_| r.set(r.get() + 1));
        assert!(task.is_active());

        run_frame(0.016);
        task.cancel();
        run_frame(0.016);
        assert_eq!(runs.get(), 1);
        assert_eq!(task_count(), 0);
    }

    #[test]
    fn test_drop_stops_task() {
        setup();
        {
            let _task = request_frames(|_| {});
            assert_eq!(task_count(), 1);
        }
        assert_eq!(task_count(), 0);
    }

    #[test]
    fn test_task_can_cancel_itself() {
        setup();
        let slot: Rc<RefCell<Option<FrameTask>>> = Rc::new(RefCell::new(None));
        let runs = Rc::new(Cell::new(0));

        let s = slot.clone();
        let r = runs.clone();
        *slot.borrow_mut() = Some(request_frames(move |_| {
            r.set(r.get() + 1);
            s.borrow_mut().take();
        }));

        run_frame(0.016);
        run_frame(0.016);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_tasks_run_in_subscription_order() {
        setup();
        let order = Rc::new(RefCell::new(Vec::new()));
        let a = order.clone();
        let _first = request_frames(move |_| a.borrow_mut().push("first"));
        let b = order.clone();
        let _second = request_frames(move |_| b.borrow_mut().push("second"));

        run_frame(0.016);
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }
}
