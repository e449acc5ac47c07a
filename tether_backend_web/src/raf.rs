// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `requestAnimationFrame` frame loop.
//!
//! [`RafLoop`] owns a single JS closure that is re-registered with
//! `requestAnimationFrame` each time the poller asks for another frame.
//! Requests coalesce: while one is pending, further requests are no-ops.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use tether_core::host::{Callback, FrameLoop};

// Global bindings, so ticks never have to look up the Window.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

type RafClosure = Closure<dyn FnMut(f64)>;

/// A `requestAnimationFrame` loop driving one tick callback.
///
/// Created idle by [`WebHost`](crate::WebHost); each
/// [`request`](FrameLoop::request) schedules exactly one tick.
pub struct RafLoop {
    inner: Rc<RafInner>,
}

struct RafInner {
    /// The JS closure registered with `requestAnimationFrame`.
    closure: RefCell<Option<RafClosure>>,

    /// The ID of the pending request, if any.
    pending: Cell<Option<i32>>,

    /// Ticks delivered so far.
    frame_counter: Cell<u64>,
}

impl RafLoop {
    pub(crate) fn new(tick: Callback) -> Self {
        let inner = Rc::new(RafInner {
            closure: RefCell::new(None),
            pending: Cell::new(None),
            frame_counter: Cell::new(0),
        });

        // The closure holds the loop weakly so dropping the `RafLoop` frees
        // both.
        let weak: Weak<RafInner> = Rc::downgrade(&inner);
        let closure = Closure::wrap(Box::new(move |_timestamp_ms: f64| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.pending.set(None);
            inner.frame_counter.set(inner.frame_counter.get() + 1);
            tick();
        }) as Box<dyn FnMut(f64)>);
        *inner.closure.borrow_mut() = Some(closure);

        Self { inner }
    }

    /// Returns `true` while a frame request is pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.pending.get().is_some()
    }

    /// Number of ticks delivered so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.inner.frame_counter.get()
    }
}

impl FrameLoop for RafLoop {
    fn request(&self) {
        if self.inner.pending.get().is_some() {
            return;
        }
        if let Some(ref closure) = *self.inner.closure.borrow() {
            let id = request_animation_frame(closure.as_ref().unchecked_ref());
            self.inner.pending.set(Some(id));
        }
    }

    fn cancel(&self) {
        if let Some(id) = self.inner.pending.take() {
            cancel_animation_frame(id);
        }
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.cancel();
        // Drop the JS closure so it doesn't leak.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for RafLoop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RafLoop")
            .field("pending", &self.inner.pending.get())
            .field("frame_counter", &self.inner.frame_counter.get())
            .finish()
    }
}
