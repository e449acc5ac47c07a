// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic host double for unit tests.
//!
//! [`TestHost`] records every registration and lets a test fire ancestor
//! events, size watcher batches and animation frames by hand. One call to
//! [`TestHost::advance_frame`] models one rendering opportunity: requested
//! frame callbacks run first, then pending intersection triggers deliver
//! the rectangles set with [`TestHost::set_rect`].
//!
//! Callbacks always run with the host state released, so they may register
//! or disconnect again.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use kurbo::Rect;

use crate::host::{AncestorEvent, Callback, Disconnect, FrameLoop, Host, RectCallback};
use crate::reference::VirtualElement;

pub(crate) fn rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect::from_origin_size((x, y), (width, height))
}

/// A listener target in the test tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TestNode {
    Element(u32),
    Window,
}

#[derive(Debug)]
pub(crate) struct TestError;

struct ListenerRecord {
    id: u64,
    target: TestNode,
    event: AncestorEvent,
    callback: Callback,
}

struct WatcherRecord {
    id: u64,
    targets: Vec<u32>,
    callback: Callback,
}

struct TriggerRecord {
    id: u64,
    target: u32,
    on_rect: RectCallback,
}

struct LoopRecord {
    id: u64,
    tick: Callback,
    requested: bool,
}

#[derive(Default)]
struct State {
    next_id: u64,
    ancestors: Vec<(u32, Vec<TestNode>)>,
    rects: Vec<(u32, Rect)>,
    listeners: Vec<ListenerRecord>,
    watchers: Vec<WatcherRecord>,
    triggers: Vec<TriggerRecord>,
    loops: Vec<LoopRecord>,
    listen_calls: usize,
    fail_listen_after: Option<usize>,
    fail_triggers: bool,
    no_intersection: bool,
    leaky_listeners: bool,
    samples_delivered: usize,
    trigger_disconnects: usize,
}

impl State {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn rect_of(&self, element: u32) -> Rect {
        self.rects
            .iter()
            .find(|(id, _)| *id == element)
            .map_or(Rect::ZERO, |(_, rect)| *rect)
    }
}

#[derive(Clone, Default)]
pub(crate) struct TestHost {
    state: Rc<RefCell<State>>,
}

impl TestHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_ancestors(&self, element: u32, ancestors: &[TestNode]) {
        let mut state = self.state.borrow_mut();
        state.ancestors.retain(|(id, _)| *id != element);
        state.ancestors.push((element, ancestors.to_vec()));
    }

    pub(crate) fn set_rect(&self, element: u32, rect: Rect) {
        let mut state = self.state.borrow_mut();
        state.rects.retain(|(id, _)| *id != element);
        state.rects.push((element, rect));
    }

    /// Makes every `listen` call after the first `count` fail.
    pub(crate) fn fail_listen_after(&self, count: usize) {
        self.state.borrow_mut().fail_listen_after = Some(count);
    }

    pub(crate) fn fail_triggers(&self, fail: bool) {
        self.state.borrow_mut().fail_triggers = fail;
    }

    pub(crate) fn set_intersection_supported(&self, supported: bool) {
        self.state.borrow_mut().no_intersection = !supported;
    }

    /// Keeps listener records alive across `disconnect`, to model a host
    /// that still delivers events after removal.
    pub(crate) fn set_leaky_listeners(&self, leaky: bool) {
        self.state.borrow_mut().leaky_listeners = leaky;
    }

    pub(crate) fn listener_count(&self, target: &TestNode, event: AncestorEvent) -> usize {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.target == *target && l.event == event)
            .count()
    }

    pub(crate) fn total_listeners(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Targets of every connected size watcher.
    pub(crate) fn watched(&self) -> Vec<Vec<u32>> {
        self.state
            .borrow()
            .watchers
            .iter()
            .map(|w| w.targets.clone())
            .collect()
    }

    pub(crate) fn pending_triggers(&self) -> usize {
        self.state.borrow().triggers.len()
    }

    pub(crate) fn samples_delivered(&self) -> usize {
        self.state.borrow().samples_delivered
    }

    pub(crate) fn trigger_disconnects(&self) -> usize {
        self.state.borrow().trigger_disconnects
    }

    pub(crate) fn frame_requested(&self) -> bool {
        self.state.borrow().loops.iter().any(|l| l.requested)
    }

    pub(crate) fn dispatch(&self, target: &TestNode, event: AncestorEvent) {
        let callbacks: Vec<Callback> = self
            .state
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.target == *target && l.event == event)
            .map(|l| Rc::clone(&l.callback))
            .collect();
        for callback in callbacks {
            callback();
        }
    }

    /// Fires every watcher once, as one initial observation batch.
    pub(crate) fn deliver_initial_observations(&self) {
        let callbacks: Vec<Callback> = self
            .state
            .borrow()
            .watchers
            .iter()
            .map(|w| Rc::clone(&w.callback))
            .collect();
        for callback in callbacks {
            callback();
        }
    }

    /// Fires every watcher observing `element`.
    pub(crate) fn resize_element(&self, element: u32) {
        let callbacks: Vec<Callback> = self
            .state
            .borrow()
            .watchers
            .iter()
            .filter(|w| w.targets.contains(&element))
            .map(|w| Rc::clone(&w.callback))
            .collect();
        for callback in callbacks {
            callback();
        }
    }

    /// Runs one rendering opportunity.
    pub(crate) fn advance_frame(&self) {
        let ticks: Vec<Callback> = {
            let mut state = self.state.borrow_mut();
            state
                .loops
                .iter_mut()
                .filter(|l| l.requested)
                .map(|l| {
                    l.requested = false;
                    Rc::clone(&l.tick)
                })
                .collect()
        };
        for tick in ticks {
            tick();
        }

        let deliveries: Vec<(RectCallback, Rect)> = {
            let mut state = self.state.borrow_mut();
            let triggers = core::mem::take(&mut state.triggers);
            state.samples_delivered += triggers.len();
            triggers
                .into_iter()
                .map(|t| {
                    let rect = state.rect_of(t.target);
                    (t.on_rect, rect)
                })
                .collect()
        };
        for (on_rect, rect) in deliveries {
            on_rect(rect);
        }
    }
}

pub(crate) struct TestListener {
    id: u64,
    state: Rc<RefCell<State>>,
}

impl Disconnect for TestListener {
    fn disconnect(&mut self) {
        let mut state = self.state.borrow_mut();
        if !state.leaky_listeners {
            state.listeners.retain(|l| l.id != self.id);
        }
    }
}

pub(crate) struct TestWatcher {
    id: u64,
    state: Rc<RefCell<State>>,
}

impl Disconnect for TestWatcher {
    fn disconnect(&mut self) {
        self.state.borrow_mut().watchers.retain(|w| w.id != self.id);
    }
}

pub(crate) struct TestTrigger {
    id: u64,
    state: Rc<RefCell<State>>,
}

impl Disconnect for TestTrigger {
    fn disconnect(&mut self) {
        let mut state = self.state.borrow_mut();
        state.trigger_disconnects += 1;
        state.triggers.retain(|t| t.id != self.id);
    }
}

pub(crate) struct TestFrames {
    id: u64,
    state: Rc<RefCell<State>>,
}

impl TestFrames {
    fn set_requested(&self, requested: bool) {
        if let Some(record) = self
            .state
            .borrow_mut()
            .loops
            .iter_mut()
            .find(|l| l.id == self.id)
        {
            record.requested = requested;
        }
    }
}

impl FrameLoop for TestFrames {
    fn request(&self) {
        self.set_requested(true);
    }

    fn cancel(&self) {
        self.set_requested(false);
    }
}

impl Drop for TestFrames {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.loops.retain(|l| l.id != self.id);
        }
    }
}

impl Host for TestHost {
    type Element = u32;
    type Ancestor = TestNode;
    type Listener = TestListener;
    type SizeWatcher = TestWatcher;
    type Trigger = TestTrigger;
    type FrameLoop = TestFrames;
    type Error = TestError;

    fn bounding_rect(&self, element: &u32) -> Rect {
        self.state.borrow().rect_of(*element)
    }

    fn overflow_ancestors(&self, element: &u32) -> Vec<TestNode> {
        self.state
            .borrow()
            .ancestors
            .iter()
            .find(|(id, _)| id == element)
            .map(|(_, ancestors)| ancestors.clone())
            .unwrap_or_default()
    }

    fn listen(
        &self,
        target: &TestNode,
        event: AncestorEvent,
        callback: Callback,
    ) -> Result<TestListener, TestError> {
        let mut state = self.state.borrow_mut();
        let call = state.listen_calls;
        state.listen_calls += 1;
        if state.fail_listen_after.is_some_and(|limit| call >= limit) {
            return Err(TestError);
        }
        let id = state.next_id();
        state.listeners.push(ListenerRecord {
            id,
            target: *target,
            event,
            callback,
        });
        Ok(TestListener {
            id,
            state: Rc::clone(&self.state),
        })
    }

    fn watch_sizes(&self, targets: &[u32], callback: Callback) -> Result<TestWatcher, TestError> {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.watchers.push(WatcherRecord {
            id,
            targets: targets.to_vec(),
            callback,
        });
        Ok(TestWatcher {
            id,
            state: Rc::clone(&self.state),
        })
    }

    fn supports_intersection(&self) -> bool {
        !self.state.borrow().no_intersection
    }

    fn observe_rect_once(
        &self,
        target: &u32,
        on_rect: RectCallback,
    ) -> Result<TestTrigger, TestError> {
        let mut state = self.state.borrow_mut();
        if state.fail_triggers {
            return Err(TestError);
        }
        let id = state.next_id();
        state.triggers.push(TriggerRecord {
            id,
            target: *target,
            on_rect,
        });
        Ok(TestTrigger {
            id,
            state: Rc::clone(&self.state),
        })
    }

    fn frame_loop(&self, tick: Callback) -> TestFrames {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.loops.push(LoopRecord {
            id,
            tick,
            requested: false,
        });
        TestFrames {
            id,
            state: Rc::clone(&self.state),
        }
    }
}

/// Counts update calls.
#[derive(Clone, Default)]
pub(crate) struct Counter {
    calls: Rc<Cell<u32>>,
}

impl Counter {
    pub(crate) fn get(&self) -> u32 {
        self.calls.get()
    }

    pub(crate) fn callback(&self) -> impl Fn() + 'static {
        let calls = Rc::clone(&self.calls);
        move || calls.set(calls.get() + 1)
    }
}

/// A virtual reference whose rectangle the test controls.
#[derive(Clone)]
pub(crate) struct Tracked {
    rect: Rc<Cell<Rect>>,
    reads: Rc<Cell<usize>>,
    context: Option<u32>,
}

impl Tracked {
    pub(crate) fn new(context: Option<u32>) -> Self {
        Self {
            rect: Rc::new(Cell::new(Rect::ZERO)),
            reads: Rc::new(Cell::new(0)),
            context,
        }
    }

    pub(crate) fn set(&self, rect: Rect) {
        self.rect.set(rect);
    }

    pub(crate) fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl VirtualElement<u32> for Tracked {
    fn bounding_rect(&self) -> Rect {
        self.reads.set(self.reads.get() + 1);
        self.rect.get()
    }

    fn context_element(&self) -> Option<u32> {
        self.context
    }
}

#[cfg(feature = "trace")]
pub(crate) use trace_log::TraceLog;

#[cfg(feature = "trace")]
mod trace_log {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::{Ref, RefCell};

    use crate::trace::{
        DisposeEvent, FrameSampleEvent, SubscribeEvent, TraceSink, UpdateEvent, UpdateSource,
    };

    #[derive(Default)]
    pub(crate) struct Log {
        pub(crate) subscribe: Vec<SubscribeEvent>,
        pub(crate) updates: Vec<UpdateSource>,
        pub(crate) samples: Vec<FrameSampleEvent>,
        pub(crate) disposes: Vec<DisposeEvent>,
    }

    /// Trace sink whose events stay readable after it is moved into a
    /// handle.
    #[derive(Clone, Default)]
    pub(crate) struct TraceLog {
        log: Rc<RefCell<Log>>,
    }

    impl TraceLog {
        pub(crate) fn borrow(&self) -> Ref<'_, Log> {
            self.log.borrow()
        }
    }

    impl TraceSink for TraceLog {
        fn on_subscribe(&mut self, e: &SubscribeEvent) {
            self.log.borrow_mut().subscribe.push(*e);
        }

        fn on_update(&mut self, e: &UpdateEvent) {
            self.log.borrow_mut().updates.push(e.source);
        }

        fn on_frame_sample(&mut self, e: &FrameSampleEvent) {
            self.log.borrow_mut().samples.push(*e);
        }

        fn on_dispose(&mut self, e: &DisposeEvent) {
            self.log.borrow_mut().disposes.push(*e);
        }
    }
}
