//! Interval timer contracts.

use std::rc::Rc;

use crate::{ListenerRegistry, Subscription};

/// Host service for repeating timers (`setInterval`).
pub trait TimerService {
    /// Calls `tick` every `period_ms` until the returned guard is dropped.
    fn set_interval(&self, period_ms: u32, tick: Rc<dyn Fn()>) -> Subscription;
}

#[derive(Debug, Clone, Copy, Default)]
/// Timer service whose intervals never fire.
pub struct NoopTimerService;

impl TimerService for NoopTimerService {
    fn set_interval(&self, _period_ms: u32, _tick: Rc<dyn Fn()>) -> Subscription {
        Subscription::detached()
    }
}

#[derive(Debug, Clone, Default)]
/// Timer whose intervals fire only when [`ManualTimerService::fire`] is called.
pub struct ManualTimerService {
    intervals: ListenerRegistry<()>,
}

impl ManualTimerService {
    /// Fires every active interval once.
    pub fn fire(&self) {
        self.intervals.emit(());
    }

    /// Number of active intervals.
    pub fn active_count(&self) -> usize {
        self.intervals.len()
    }
}

impl TimerService for ManualTimerService {
    fn set_interval(&self, _period_ms: u32, tick: Rc<dyn Fn()>) -> Subscription {
        self.intervals.add(Rc::new(move |()| tick()))
    }
}
