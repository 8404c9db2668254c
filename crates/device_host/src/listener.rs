//! Scoped listener registrations.
//!
//! Browser event listeners and watch handles are represented as [`Subscription`] guards that
//! release the underlying registration when dropped. [`ListenerRegistry`] is the in-process
//! listener list used by the in-memory adapters.

use std::{cell::RefCell, fmt, rc::Rc};

/// Guard for one listener registration. Dropping it detaches the listener.
#[must_use = "dropping a Subscription immediately detaches its listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Creates a guard that runs `release` exactly once when dropped or released.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Creates a guard with nothing to release.
    pub fn detached() -> Self {
        Self { release: None }
    }

    /// Returns whether the guard still owns a registration.
    pub fn is_attached(&self) -> bool {
        self.release.is_some()
    }

    /// Detaches the listener now.
    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("attached", &self.is_attached())
            .finish()
    }
}

type Listener<T> = Rc<dyn Fn(T)>;

struct RegistryInner<T> {
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
}

/// Ordered list of listeners that can be notified with a cloned value.
pub struct ListenerRegistry<T> {
    inner: Rc<RefCell<RegistryInner<T>>>,
}

impl<T> Clone for ListenerRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Default for ListenerRegistry<T> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(RegistryInner {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }
}

impl<T> fmt::Debug for ListenerRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("len", &self.len())
            .finish()
    }
}

impl<T: Clone + 'static> ListenerRegistry<T> {
    /// Registers a listener and returns the guard that removes it.
    pub fn add(&self, listener: Rc<dyn Fn(T)>) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, listener));
            id
        };
        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .borrow_mut()
                    .listeners
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }

    /// Notifies every registered listener in registration order.
    ///
    /// Listeners may add or remove registrations while being notified; the set notified is the
    /// one registered when `emit` was called.
    pub fn emit(&self, value: T) {
        let snapshot: Vec<Listener<T>> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(value.clone());
        }
    }
}

impl<T> ListenerRegistry<T> {
    /// Number of attached listeners.
    pub fn len(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Returns whether no listener is attached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn subscription_runs_release_once() {
        let released = Rc::new(Cell::new(0));
        let counter = Rc::clone(&released);
        let subscription = Subscription::new(move || counter.set(counter.get() + 1));
        assert!(subscription.is_attached());
        subscription.release();
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn registry_detaches_on_drop() {
        let registry = ListenerRegistry::<u32>::default();
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let subscription = registry.add(Rc::new(move |value| sink.set(sink.get() + value)));

        registry.emit(2);
        assert_eq!(registry.len(), 1);
        drop(subscription);
        registry.emit(5);

        assert_eq!(seen.get(), 2);
        assert!(registry.is_empty());
    }

    #[test]
    fn listener_may_detach_itself_during_emit() {
        let registry = ListenerRegistry::<()>::default();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let slot_for_listener = Rc::clone(&slot);
        let subscription = registry.add(Rc::new(move |()| {
            slot_for_listener.borrow_mut().take();
        }));
        *slot.borrow_mut() = Some(subscription);

        registry.emit(());
        assert!(registry.is_empty());
    }
}
