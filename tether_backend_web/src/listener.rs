// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM event listeners on overflow ancestors.

use alloc::boxed::Box;

use js_sys::Function;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, EventTarget};

use tether_core::host::{AncestorEvent, Callback, Disconnect};

/// One `scroll` or `resize` listener.
///
/// The JS closure lives as long as the listener, so removal can pass the
/// same function object `addEventListener` received.
pub struct EventListener {
    target: EventTarget,
    event: AncestorEvent,
    closure: Closure<dyn FnMut()>,
    attached: bool,
}

impl EventListener {
    pub(crate) fn add(
        target: &EventTarget,
        event: AncestorEvent,
        callback: Callback,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(move || callback()) as Box<dyn FnMut()>);
        let options = AddEventListenerOptions::new();
        options.set_passive(event.is_passive());
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event.as_str(),
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
            attached: true,
        })
    }
}

impl Disconnect for EventListener {
    fn disconnect(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        // Removing from a detached node is fine; anything else the browser
        // reports is ignored.
        let callback: &Function = self.closure.as_ref().unchecked_ref();
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event.as_str(), callback);
    }
}

impl core::fmt::Debug for EventListener {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventListener")
            .field("event", &self.event)
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}
