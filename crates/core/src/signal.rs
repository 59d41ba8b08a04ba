//! Single-threaded publish/subscribe for host events.
//!
//! Pointer moves, viewport resizes and theme changes reach the animator
//! through a [`Signal`]. Subscribing returns a [`Subscription`] guard;
//! dropping the guard detaches the listener, so a component that owns its
//! guards cannot leak listeners past its own lifetime.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct SignalInner<T> {
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
}

/// A broadcast channel of `T` values. Clones share the listener list.
pub struct Signal<T> {
    inner: Rc<RefCell<SignalInner<T>>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SignalInner {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }
}

impl<T: 'static> Signal<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `listener`. It stays attached until the returned guard is
    /// dropped or [`Subscription::cancel`]led.
    #[must_use = "dropping the Subscription detaches the listener immediately"]
    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            inner.next_id += 1;
            let id = inner.next_id;
            inner
                .listeners
                .push((id, Rc::new(RefCell::new(listener)) as Listener<T>));
            id
        };
        let weak: Weak<RefCell<SignalInner<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
                }
            })),
        }
    }

    /// Delivers `value` to every listener attached when `emit` was called.
    ///
    /// A listener that is already running (the signal was re-emitted from
    /// inside it) is skipped for the nested emission.
    pub fn emit(&self, value: &T) {
        let listeners: Vec<Listener<T>> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            if let Ok(mut f) = listener.try_borrow_mut() {
                f(value);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Guard that keeps a listener attached to a [`Signal`].
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Detaches the listener now.
    pub fn cancel(mut self) {
        self.detach_now();
    }

    fn detach_now(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach_now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn emit_reaches_every_listener() {
        let signal = Signal::<u32>::new();
        let total = Rc::new(Cell::new(0));
        let (a, b) = (total.clone(), total.clone());
        let _s1 = signal.subscribe(move |v| a.set(a.get() + v));
        let _s2 = signal.subscribe(move |v| b.set(b.get() + v * 10));
        signal.emit(&2);
        assert_eq!(total.get(), 22);
    }

    #[test]
    fn dropping_subscription_detaches() {
        let signal = Signal::<()>::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let sub = signal.subscribe(move |_| h.set(h.get() + 1));
        assert_eq!(signal.listener_count(), 1);
        drop(sub);
        assert_eq!(signal.listener_count(), 0);
        signal.emit(&());
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn cancel_detaches_only_that_listener() {
        let signal = Signal::<()>::new();
        let keep = signal.subscribe(|_| {});
        let gone = signal.subscribe(|_| {});
        gone.cancel();
        assert_eq!(signal.listener_count(), 1);
        drop(keep);
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn subscription_outliving_signal_is_harmless() {
        let signal = Signal::<()>::new();
        let sub = signal.subscribe(|_| {});
        drop(signal);
        drop(sub);
    }

    #[test]
    fn clones_share_listeners() {
        let signal = Signal::<i32>::new();
        let other = signal.clone();
        let seen = Rc::new(Cell::new(0));
        let s = seen.clone();
        let _sub = signal.subscribe(move |v| s.set(*v));
        other.emit(&7);
        assert_eq!(seen.get(), 7);
    }

    #[test]
    fn listener_may_unsubscribe_others_during_emit() {
        let signal = Signal::<()>::new();
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let v = victim.clone();
        let _killer = signal.subscribe(move |_| {
            v.borrow_mut().take();
        });
        *victim.borrow_mut() = Some(signal.subscribe(|_| {}));
        signal.emit(&());
        assert_eq!(signal.listener_count(), 1);
    }
}
