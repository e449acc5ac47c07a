// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The activity gate in front of the update callback.

use alloc::boxed::Box;
use core::cell::{Cell, RefCell};

use crate::trace::{Tracer, UpdateEvent, UpdateSource};

/// Shared by every mechanism of one handle.
///
/// Once [`close`](Self::close) has run, [`notify`](Self::notify) never
/// reaches the callback again, whichever host callback is still in flight.
pub(crate) struct Notifier {
    update: Box<dyn Fn()>,
    active: Cell<bool>,
    tracer: RefCell<Tracer>,
}

impl Notifier {
    pub(crate) fn new(update: impl Fn() + 'static, tracer: Tracer) -> Self {
        Self {
            update: Box::new(update),
            active: Cell::new(true),
            tracer: RefCell::new(tracer),
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Closes the gate. Returns `false` if it was already closed.
    pub(crate) fn close(&self) -> bool {
        self.active.replace(false)
    }

    pub(crate) fn notify(&self, source: UpdateSource) {
        if !self.active.get() {
            return;
        }
        self.trace(|tracer| tracer.update(&UpdateEvent { source }));
        (self.update)();
    }

    /// Runs `emit` against the tracer.
    ///
    /// Skipped if a sink re-enters the handle while it is already emitting.
    pub(crate) fn trace(&self, emit: impl FnOnce(&mut Tracer)) {
        if let Ok(mut tracer) = self.tracer.try_borrow_mut() {
            emit(&mut tracer);
        }
    }
}

impl core::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Notifier")
            .field("active", &self.active.get())
            .finish_non_exhaustive()
    }
}
