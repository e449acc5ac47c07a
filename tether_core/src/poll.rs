// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation-frame polling of the reference rectangle.
//!
//! Each iteration samples the reference, compares the sample with the
//! previous one, stores it, and requests the next frame. Sampling takes one
//! of two paths:
//!
//! - A concrete element gets a one-shot intersection trigger. The trigger
//!   reports the rectangle computed by the intersection pass, which avoids
//!   forcing a layout read every frame. The comparison and the next frame
//!   request happen inside the trigger callback.
//! - A virtual element (or any element on a host without intersection
//!   support) is read directly.
//!
//! The loop never ends on its own; [`FramePoller::halt`] stops it.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};

use kurbo::Rect;

use crate::host::{Disconnect, FrameLoop, Host};
use crate::notify::Notifier;
use crate::reference::Reference;
use crate::trace::{FrameSampleEvent, PollHaltedEvent, SampleStrategy, UpdateSource};

/// Returns `true` if any of x, y, width or height differs.
///
/// Width and height are derived from the stored edges. A size change too
/// small to move the far edge by one float step is not detected.
pub(crate) fn rect_changed(prev: &Rect, next: &Rect) -> bool {
    prev.x0 != next.x0
        || prev.y0 != next.y0
        || prev.width() != next.width()
        || prev.height() != next.height()
}

/// What [`FramePoller::halt`] released.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Released {
    pub(crate) trigger: bool,
    pub(crate) frame_loop: bool,
}

pub(crate) struct FramePoller<H: Host> {
    host: H,
    reference: Reference<H::Element>,
    notifier: Rc<Notifier>,
    this: Weak<Self>,
    frames: RefCell<Option<H::FrameLoop>>,
    trigger: RefCell<Option<H::Trigger>>,
    snapshot: Cell<Option<Rect>>,
    frame_index: Cell<u64>,
    running: Cell<bool>,
}

impl<H: Host> FramePoller<H> {
    /// Creates the poller and runs its first iteration.
    pub(crate) fn start(
        host: H,
        reference: Reference<H::Element>,
        notifier: Rc<Notifier>,
    ) -> Result<Rc<Self>, H::Error> {
        let poller = Rc::new_cyclic(|this: &Weak<Self>| {
            let weak = this.clone();
            let frames = host.frame_loop(Rc::new(move || {
                if let Some(poller) = weak.upgrade() {
                    poller.run_tick();
                }
            }));
            Self {
                host: host.clone(),
                reference,
                notifier,
                this: this.clone(),
                frames: RefCell::new(Some(frames)),
                trigger: RefCell::new(None),
                snapshot: Cell::new(None),
                frame_index: Cell::new(0),
                running: Cell::new(true),
            }
        });
        poller.tick()?;
        Ok(poller)
    }

    /// Stops the loop and releases the pending trigger and frame request.
    ///
    /// Safe to call from inside a tick or trigger callback, and more than
    /// once.
    pub(crate) fn halt(&self) -> Released {
        self.running.set(false);
        let trigger = self.trigger.borrow_mut().take();
        let frames = self.frames.borrow_mut().take();
        let released = Released {
            trigger: trigger.is_some(),
            frame_loop: frames.is_some(),
        };
        if let Some(mut trigger) = trigger {
            trigger.disconnect();
        }
        if let Some(frames) = frames {
            frames.cancel();
        }
        released
    }

    fn run_tick(&self) {
        let frame_index = self.frame_index.get();
        if self.tick().is_err() {
            self.halt();
            self.notifier
                .trace(|tracer| tracer.poll_halted(&PollHaltedEvent { frame_index }));
        }
    }

    fn tick(&self) -> Result<(), H::Error> {
        if !self.running.get() {
            return Ok(());
        }
        let frame_index = self.frame_index.get();
        self.frame_index.set(frame_index + 1);

        match &self.reference {
            Reference::Element(element) if self.host.supports_intersection() => {
                let this = self.this.clone();
                let trigger = self.host.observe_rect_once(
                    element,
                    Box::new(move |rect| {
                        if let Some(poller) = this.upgrade() {
                            poller.on_trigger(frame_index, rect);
                        }
                    }),
                )?;
                *self.trigger.borrow_mut() = Some(trigger);
            }
            Reference::Element(element) => {
                let rect = self.host.bounding_rect(element);
                self.settle(frame_index, rect, SampleStrategy::Direct);
            }
            Reference::Virtual(element) => {
                let rect = element.bounding_rect();
                self.settle(frame_index, rect, SampleStrategy::Direct);
            }
        }
        Ok(())
    }

    fn on_trigger(&self, frame_index: u64, rect: Rect) {
        // One-shot: release the trigger before acting on its sample.
        let trigger = self.trigger.borrow_mut().take();
        if let Some(mut trigger) = trigger {
            trigger.disconnect();
        }
        self.settle(frame_index, rect, SampleStrategy::Intersection);
    }

    fn settle(&self, frame_index: u64, rect: Rect, strategy: SampleStrategy) {
        if !self.running.get() {
            return;
        }
        let changed = self
            .snapshot
            .get()
            .is_some_and(|prev| rect_changed(&prev, &rect));
        self.notifier.trace(|tracer| {
            tracer.frame_sample(&FrameSampleEvent {
                frame_index,
                rect,
                changed,
                strategy,
            });
        });
        if changed {
            self.notifier.notify(UpdateSource::AnimationFrame);
        }
        self.snapshot.set(Some(rect));

        // The update callback may have disposed the handle.
        if self.running.get()
            && let Some(frames) = &*self.frames.borrow()
        {
            frames.request();
        }
    }
}

impl<H: Host> core::fmt::Debug for FramePoller<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FramePoller")
            .field("running", &self.running.get())
            .field("frame_index", &self.frame_index.get())
            .field("snapshot", &self.snapshot.get())
            .finish_non_exhaustive()
    }
}
