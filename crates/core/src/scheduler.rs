//! Frame scheduling capability.
//!
//! The host decides when frames happen (in a browser, on
//! `requestAnimationFrame`). The animator only sees a [`Scheduler`]: hand it a
//! callback, get back a [`FrameHandle`] that can cancel it. Callbacks run one
//! at a time on the host thread and are never reentrant.

use std::cell::RefCell;
use std::rc::Rc;

/// Callback run once on the next frame, receiving the frame timestamp in
/// milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Identifies a pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

pub trait Scheduler {
    /// Schedules `callback` for the next frame.
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Cancels a pending request. Cancelling a handle that already ran or
    /// was already cancelled is a no-op.
    fn cancel_frame(&self, handle: FrameHandle);
}

/// Frame interval used by [`ManualScheduler`], matching a 60 Hz display.
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

#[derive(Default)]
struct ManualState {
    next_id: u64,
    now: f64,
    pending: Vec<(FrameHandle, FrameCallback)>,
}

/// A [`Scheduler`] driven explicitly by the caller.
///
/// Used by tests and by the CLI renderer: each [`run_frame`](Self::run_frame)
/// fires every callback that was pending when it was called. Callbacks
/// scheduled during a frame wait for the next one. Clones share state.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Timestamp of the most recently run frame, in milliseconds.
    pub fn now(&self) -> f64 {
        self.state.borrow().now
    }

    /// Runs one frame. Returns the number of callbacks fired.
    pub fn run_frame(&self) -> usize {
        let (now, due) = {
            let mut state = self.state.borrow_mut();
            state.now += FRAME_INTERVAL_MS;
            (state.now, std::mem::take(&mut state.pending))
        };
        let fired = due.len();
        for (_, callback) in due {
            callback(now);
        }
        fired
    }

    /// Runs `n` frames. Returns the total number of callbacks fired.
    pub fn run_frames(&self, n: usize) -> usize {
        (0..n).map(|_| self.run_frame()).sum()
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let handle = FrameHandle(state.next_id);
        state.pending.push((handle, callback));
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.state
            .borrow_mut()
            .pending
            .retain(|(pending, _)| *pending != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn callbacks_run_on_next_frame_only() {
        let scheduler = ManualScheduler::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        scheduler.request_frame(Box::new(move |_| h.set(h.get() + 1)));
        assert_eq!(hits.get(), 0);
        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(scheduler.run_frame(), 0);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn cancelled_callback_never_runs() {
        let scheduler = ManualScheduler::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let handle = scheduler.request_frame(Box::new(move |_| h.set(h.get() + 1)));
        scheduler.cancel_frame(handle);
        assert_eq!(scheduler.pending(), 0);
        scheduler.run_frame();
        assert_eq!(hits.get(), 0);
        // second cancel is harmless
        scheduler.cancel_frame(handle);
    }

    #[test]
    fn rescheduling_from_a_callback_defers_to_next_frame() {
        let scheduler = ManualScheduler::new();
        let inner = scheduler.clone();
        scheduler.request_frame(Box::new(move |_| {
            inner.request_frame(Box::new(|_| {}));
        }));
        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn timestamps_advance_per_frame() {
        let scheduler = ManualScheduler::new();
        let seen = Rc::new(Cell::new(0.0));
        let s = seen.clone();
        scheduler.run_frame();
        scheduler.request_frame(Box::new(move |t| s.set(t)));
        scheduler.run_frame();
        assert!((seen.get() - 2.0 * FRAME_INTERVAL_MS).abs() < 1e-9);
        assert!((scheduler.now() - 2.0 * FRAME_INTERVAL_MS).abs() < 1e-9);
    }

    #[test]
    fn handles_are_unique() {
        let scheduler = ManualScheduler::new();
        let a = scheduler.request_frame(Box::new(|_| {}));
        let b = scheduler.request_frame(Box::new(|_| {}));
        assert_ne!(a, b);
    }
}
