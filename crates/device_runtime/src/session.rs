//! Per-dispatch resource scope.
//!
//! Every selection opens a session. Handlers receive a [`HandlerContext`] for it and route
//! all output, listeners, control callbacks and async work through that context. Ending the
//! session cancels its token, aborts its tasks, releases its subscriptions and drops its
//! callbacks, so nothing from a previous selection can touch the surface again.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    future::Future,
    rc::Rc,
};

use device_host::{DeviceServices, Subscription};
use futures::future::{abortable, AbortHandle};

use crate::{
    config::DemoConfig,
    selection::Feature,
    spawner::TaskSpawner,
    surface::{BlockId, BlockKind, OutputDocument, OutputSink},
};

#[derive(Debug, Clone, Default)]
/// Shared flag flipped when a session ends.
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    /// Marks the token cancelled.
    pub fn cancel(&self) {
        self.0.set(true);
    }

    /// Returns whether the token was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Lifecycle of the handler driving a session.
pub enum HandlerState {
    /// The capability has not been probed yet.
    Unprobed,
    /// The probe failed; the fixed message was rendered.
    Unsupported,
    /// The probe succeeded and the handler is wired up.
    Active,
}

/// The shared output document and its sink.
#[derive(Clone)]
pub(crate) struct Surface {
    document: Rc<RefCell<OutputDocument>>,
    sink: Rc<dyn OutputSink>,
}

impl Surface {
    pub(crate) fn new(sink: Rc<dyn OutputSink>) -> Self {
        Self {
            document: Rc::default(),
            sink,
        }
    }

    /// Applies `edit` and publishes the result.
    pub(crate) fn write<R>(&self, edit: impl FnOnce(&mut OutputDocument) -> R) -> R {
        let result = edit(&mut self.document.borrow_mut());
        self.sink.publish(&self.document.borrow());
        result
    }

    pub(crate) fn snapshot(&self) -> OutputDocument {
        self.document.borrow().clone()
    }
}

type ClickCallback = Rc<dyn Fn()>;
type ChangeCallback = Rc<dyn Fn(String)>;

struct SessionInner {
    feature: Feature,
    token: CancelToken,
    state: Cell<HandlerState>,
    surface: Surface,
    services: DeviceServices,
    config: Rc<DemoConfig>,
    spawner: Rc<dyn TaskSpawner>,
    next_task: Cell<u64>,
    tasks: RefCell<HashMap<u64, AbortHandle>>,
    subscriptions: RefCell<Vec<Subscription>>,
    keyed: RefCell<HashMap<&'static str, Subscription>>,
    clicks: RefCell<HashMap<BlockId, ClickCallback>>,
    changes: RefCell<HashMap<BlockId, ChangeCallback>>,
}

#[derive(Clone)]
/// Handle a handler uses to reach its session.
///
/// Surface writes through a context whose session has ended are dropped and return `None`.
pub struct HandlerContext {
    inner: Rc<SessionInner>,
}

impl HandlerContext {
    /// Feature this session was opened for.
    pub fn feature(&self) -> Feature {
        self.inner.feature
    }

    /// Capability providers.
    pub fn services(&self) -> &DeviceServices {
        &self.inner.services
    }

    /// Demo configuration.
    pub fn config(&self) -> &DemoConfig {
        &self.inner.config
    }

    /// Returns whether the session has ended.
    pub fn is_cancelled(&self) -> bool {
        self.inner.token.is_cancelled()
    }

    /// Edits the output document unless the session has ended.
    pub fn write<R>(&self, edit: impl FnOnce(&mut OutputDocument) -> R) -> Option<R> {
        if self.is_cancelled() {
            return None;
        }
        Some(self.inner.surface.write(edit))
    }

    /// Replaces the output with plain text.
    pub fn replace_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.write(|document| document.replace_text(text));
    }

    /// Replaces the output with markup.
    pub fn replace_markup(&self, markup: impl Into<String>) {
        let markup = markup.into();
        self.write(|document| document.replace_markup(markup));
    }

    /// Appends a text block.
    pub fn text(&self, text: impl Into<String>) -> Option<BlockId> {
        let text = text.into();
        self.write(|document| document.append(BlockKind::Text(text)))
    }

    /// Appends an enabled button.
    pub fn button(&self, label: impl Into<String>) -> Option<BlockId> {
        let label = label.into();
        self.write(|document| {
            document.append(BlockKind::Button {
                label,
                disabled: false,
            })
        })
    }

    /// Sets a block to plain text.
    pub fn set_text(&self, id: BlockId, text: impl Into<String>) {
        let text = text.into();
        self.write(|document| document.set_text(id, text));
    }

    /// Sets a block to markup.
    pub fn set_markup(&self, id: BlockId, markup: impl Into<String>) {
        let markup = markup.into();
        self.write(|document| document.set_markup(id, markup));
    }

    /// Appends markup to a block.
    pub fn append_markup(&self, id: BlockId, markup: &str) {
        self.write(|document| document.append_markup(id, markup));
    }

    /// Changes a button caption.
    pub fn set_label(&self, id: BlockId, label: impl Into<String>) {
        let label = label.into();
        self.write(|document| document.set_label(id, label));
    }

    /// Enables or disables a button.
    pub fn set_disabled(&self, id: BlockId, disabled: bool) {
        self.write(|document| document.set_disabled(id, disabled));
    }

    /// Runs `task` on the spawner; it is aborted when the session ends.
    pub fn spawn(&self, task: impl Future<Output = ()> + 'static) {
        if self.is_cancelled() {
            return;
        }
        let (task, handle) = abortable(task);
        let id = self.inner.next_task.get();
        self.inner.next_task.set(id.wrapping_add(1));
        self.inner.tasks.borrow_mut().insert(id, handle);

        // Finished tasks drop their abort handle.
        let session = Rc::downgrade(&self.inner);
        self.inner.spawner.spawn(Box::pin(async move {
            let _ = task.await;
            if let Some(session) = session.upgrade() {
                session.tasks.borrow_mut().remove(&id);
            }
        }));
    }

    /// Keeps `subscription` attached until the session ends.
    pub fn hold(&self, subscription: Subscription) {
        if self.is_cancelled() {
            return;
        }
        self.inner.subscriptions.borrow_mut().push(subscription);
    }

    /// Keeps `subscription` under `key`, releasing whatever was held there before.
    pub fn hold_keyed(&self, key: &'static str, subscription: Subscription) {
        if self.is_cancelled() {
            return;
        }
        let previous = self.inner.keyed.borrow_mut().insert(key, subscription);
        drop(previous);
    }

    /// Releases the subscription held under `key`, if any.
    pub fn release_keyed(&self, key: &'static str) {
        let previous = self.inner.keyed.borrow_mut().remove(key);
        drop(previous);
    }

    /// Routes clicks on `control` to `callback`.
    pub fn on_click(&self, control: BlockId, callback: impl Fn() + 'static) {
        if self.is_cancelled() {
            return;
        }
        self.inner
            .clicks
            .borrow_mut()
            .insert(control, Rc::new(callback));
    }

    /// Routes value changes of `control` to `callback`.
    pub fn on_change(&self, control: BlockId, callback: impl Fn(String) + 'static) {
        if self.is_cancelled() {
            return;
        }
        self.inner
            .changes
            .borrow_mut()
            .insert(control, Rc::new(callback));
    }
}

/// Owner side of a session, kept by the dispatcher.
pub(crate) struct Session {
    ctx: HandlerContext,
}

impl Session {
    pub(crate) fn open(
        feature: Feature,
        surface: Surface,
        services: DeviceServices,
        config: Rc<DemoConfig>,
        spawner: Rc<dyn TaskSpawner>,
    ) -> Self {
        Self {
            ctx: HandlerContext {
                inner: Rc::new(SessionInner {
                    feature,
                    token: CancelToken::default(),
                    state: Cell::new(HandlerState::Unprobed),
                    surface,
                    services,
                    config,
                    spawner,
                    next_task: Cell::new(0),
                    tasks: RefCell::default(),
                    subscriptions: RefCell::default(),
                    keyed: RefCell::default(),
                    clicks: RefCell::default(),
                    changes: RefCell::default(),
                }),
            },
        }
    }

    pub(crate) fn context(&self) -> &HandlerContext {
        &self.ctx
    }

    pub(crate) fn feature(&self) -> Feature {
        self.ctx.inner.feature
    }

    pub(crate) fn state(&self) -> HandlerState {
        self.ctx.inner.state.get()
    }

    pub(crate) fn set_state(&self, state: HandlerState) {
        self.ctx.inner.state.set(state);
    }

    pub(crate) fn click_callback(&self, control: BlockId) -> Option<ClickCallback> {
        self.ctx.inner.clicks.borrow().get(&control).cloned()
    }

    pub(crate) fn change_callback(&self, control: BlockId) -> Option<ChangeCallback> {
        self.ctx.inner.changes.borrow().get(&control).cloned()
    }

    /// Tears the session down. Resources are moved out of their cells before being dropped so
    /// release hooks may freely use the context.
    pub(crate) fn end(self) {
        let inner = &self.ctx.inner;
        inner.token.cancel();

        let tasks = std::mem::take(&mut *inner.tasks.borrow_mut());
        for task in tasks.into_values() {
            task.abort();
        }

        let subscriptions = std::mem::take(&mut *inner.subscriptions.borrow_mut());
        drop(subscriptions);
        let keyed = std::mem::take(&mut *inner.keyed.borrow_mut());
        drop(keyed);
        let clicks = std::mem::take(&mut *inner.clicks.borrow_mut());
        drop(clicks);
        let changes = std::mem::take(&mut *inner.changes.borrow_mut());
        drop(changes);
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::LocalPool;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::surface::NullSink;

    fn open(pool: &LocalPool) -> Session {
        Session::open(
            Feature::Vibration,
            Surface::new(Rc::new(NullSink)),
            DeviceServices::unsupported(),
            Rc::new(DemoConfig::default()),
            Rc::new(pool.spawner()),
        )
    }

    #[test]
    fn ended_session_drops_writes() {
        let pool = LocalPool::new();
        let session = open(&pool);
        let ctx = session.context().clone();
        let surface = ctx.inner.surface.clone();

        assert!(ctx.text("live").is_some());
        session.end();
        assert!(ctx.text("stale").is_none());
        assert_eq!(surface.snapshot().text_content(), "live");
    }

    #[test]
    fn ending_releases_subscriptions_and_aborts_tasks() {
        let mut pool = LocalPool::new();
        let session = open(&pool);
        let ctx = session.context().clone();

        let released = Rc::new(Cell::new(0));
        let counter = Rc::clone(&released);
        ctx.hold(Subscription::new(move || counter.set(counter.get() + 1)));
        let counter = Rc::clone(&released);
        ctx.hold_keyed("watch", Subscription::new(move || counter.set(counter.get() + 1)));

        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        ctx.spawn(async move { flag.set(true) });

        session.end();
        pool.run_until_stalled();

        assert_eq!(released.get(), 2);
        assert!(!ran.get());
    }

    #[test]
    fn finished_tasks_do_not_accumulate() {
        let mut pool = LocalPool::new();
        let session = open(&pool);
        let ctx = session.context().clone();

        let completed = Rc::new(Cell::new(0));
        for _ in 0..1000 {
            let counter = Rc::clone(&completed);
            ctx.spawn(async move { counter.set(counter.get() + 1) });
        }
        assert_eq!(ctx.inner.tasks.borrow().len(), 1000);
        pool.run_until_stalled();

        assert_eq!(completed.get(), 1000);
        assert!(ctx.inner.tasks.borrow().is_empty());
        session.end();
    }

    #[test]
    fn keyed_subscription_replaces_previous() {
        let pool = LocalPool::new();
        let session = open(&pool);
        let ctx = session.context();

        let released = Rc::new(Cell::new(0));
        let counter = Rc::clone(&released);
        ctx.hold_keyed("clock", Subscription::new(move || counter.set(counter.get() + 1)));
        ctx.hold_keyed("clock", Subscription::detached());
        assert_eq!(released.get(), 1);

        ctx.release_keyed("clock");
        session.end();
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn callbacks_are_dropped_on_end() {
        let pool = LocalPool::new();
        let session = open(&pool);
        let ctx = session.context().clone();
        let button = ctx.button("Single Vibration").expect("live session");
        ctx.on_click(button, || {});

        assert!(session.click_callback(button).is_some());
        assert_eq!(session.state(), HandlerState::Unprobed);
        let callbacks = Rc::clone(&ctx.inner);
        session.end();
        assert!(callbacks.clicks.borrow().is_empty());
    }
}
