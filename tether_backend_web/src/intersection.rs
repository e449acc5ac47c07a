// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot `IntersectionObserver` rectangle sampling.
//!
//! Observing an element makes the browser deliver an initial entry on its
//! next intersection pass. That entry's `boundingClientRect` is the sample;
//! reading it costs no extra layout flush.

use alloc::boxed::Box;
use core::cell::Cell;

use js_sys::Array;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry};

use tether_core::host::{Disconnect, RectCallback};

use crate::rect_from_dom;

type EntriesClosure = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// A pending one-shot intersection observation.
pub struct IntersectionTrigger {
    observer: Option<IntersectionObserver>,
    _closure: EntriesClosure,
}

impl IntersectionTrigger {
    pub(crate) fn install(target: &Element, on_rect: RectCallback) -> Result<Self, JsValue> {
        let on_rect = Cell::new(Some(on_rect));
        let element = target.clone();
        let on_entries = move |entries: Array, observer: IntersectionObserver| {
            observer.disconnect();
            let Some(on_rect) = on_rect.take() else {
                return;
            };
            // Without an entry, fall back to a direct read so the poller
            // keeps running.
            let rect = match entries.get(0).dyn_into::<IntersectionObserverEntry>() {
                Ok(entry) => rect_from_dom(&entry.bounding_client_rect()),
                Err(_) => rect_from_dom(&element.get_bounding_client_rect()),
            };
            on_rect(rect);
        };
        let closure = EntriesClosure::wrap(Box::new(on_entries));

        let observer = IntersectionObserver::new(closure.as_ref().unchecked_ref())?;
        observer.observe(target);
        Ok(Self {
            observer: Some(observer),
            _closure: closure,
        })
    }
}

impl Disconnect for IntersectionTrigger {
    fn disconnect(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
    }
}

impl core::fmt::Debug for IntersectionTrigger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IntersectionTrigger")
            .field("connected", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}
