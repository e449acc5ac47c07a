// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `ResizeObserver` size watching.

use alloc::boxed::Box;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, ResizeObserver};

use tether_core::host::{Callback, Disconnect};

/// A `ResizeObserver` watching a batch of elements.
///
/// The observer fires once per notification batch; the entries are not
/// inspected.
pub struct ResizeWatch {
    observer: Option<ResizeObserver>,
    _closure: Closure<dyn FnMut()>,
}

impl ResizeWatch {
    pub(crate) fn observe(targets: &[Element], callback: Callback) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(move || callback()) as Box<dyn FnMut()>);
        let observer = ResizeObserver::new(closure.as_ref().unchecked_ref())?;
        for target in targets {
            observer.observe(target);
        }
        Ok(Self {
            observer: Some(observer),
            _closure: closure,
        })
    }
}

impl Disconnect for ResizeWatch {
    fn disconnect(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
    }
}

impl core::fmt::Debug for ResizeWatch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResizeWatch")
            .field("connected", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}
