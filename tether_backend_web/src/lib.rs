// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser host for tether.
//!
//! [`WebHost`] implements [`Host`] on top of browser APIs:
//!
//! - `scroll` / `resize` listeners on overflow ancestors ([`EventListener`])
//! - `ResizeObserver` size watching ([`ResizeWatch`])
//! - one-shot `IntersectionObserver` rectangle sampling ([`IntersectionTrigger`])
//! - `requestAnimationFrame` frame polling ([`RafLoop`])
//!
//! ```rust,ignore
//! let handle = tether_backend_web::auto_update(
//!     button.into(),
//!     tooltip,
//!     move || reposition(),
//!     Options::default(),
//! )?;
//! ```

#![no_std]

extern crate alloc;

mod ancestors;
mod intersection;
mod listener;
mod raf;
mod resize;

pub use intersection::IntersectionTrigger;
pub use listener::EventListener;
pub use raf::RafLoop;
pub use resize::ResizeWatch;
pub use tether_core::host::Host;

use alloc::vec::Vec;

use kurbo::Rect;
use tether_core::host::{AncestorEvent, Callback, RectCallback};
use tether_core::{AutoUpdate, Options, Reference};
use wasm_bindgen::JsValue;
use web_sys::{DomRectReadOnly, Element, EventTarget};

/// Converts a DOM rectangle to viewport-space [`Rect`].
pub(crate) fn rect_from_dom(rect: &DomRectReadOnly) -> Rect {
    Rect::from_origin_size((rect.x(), rect.y()), (rect.width(), rect.height()))
}

/// The browser [`Host`].
#[derive(Clone, Copy, Debug)]
pub struct WebHost {
    intersection_observer: bool,
}

impl WebHost {
    /// Creates a host, detecting `IntersectionObserver` support.
    ///
    /// Without it, frame polling reads `getBoundingClientRect` every frame.
    #[must_use]
    pub fn new() -> Self {
        let supported = js_sys::Reflect::has(
            &js_sys::global(),
            &JsValue::from_str("IntersectionObserver"),
        )
        .unwrap_or(false);
        Self::with_intersection(supported)
    }

    /// Creates a host with `IntersectionObserver` sampling forced on or off.
    #[must_use]
    pub const fn with_intersection(supported: bool) -> Self {
        Self {
            intersection_observer: supported,
        }
    }
}

impl Default for WebHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for WebHost {
    type Element = Element;
    type Ancestor = EventTarget;
    type Listener = EventListener;
    type SizeWatcher = ResizeWatch;
    type Trigger = IntersectionTrigger;
    type FrameLoop = RafLoop;
    type Error = JsValue;

    fn bounding_rect(&self, element: &Element) -> Rect {
        rect_from_dom(&element.get_bounding_client_rect())
    }

    fn overflow_ancestors(&self, element: &Element) -> Vec<EventTarget> {
        ancestors::overflow_ancestors(element)
    }

    fn listen(
        &self,
        target: &EventTarget,
        event: AncestorEvent,
        callback: Callback,
    ) -> Result<EventListener, JsValue> {
        EventListener::add(target, event, callback)
    }

    fn watch_sizes(&self, targets: &[Element], callback: Callback) -> Result<ResizeWatch, JsValue> {
        ResizeWatch::observe(targets, callback)
    }

    fn supports_intersection(&self) -> bool {
        self.intersection_observer
    }

    fn observe_rect_once(
        &self,
        target: &Element,
        on_rect: RectCallback,
    ) -> Result<IntersectionTrigger, JsValue> {
        IntersectionTrigger::install(target, on_rect)
    }

    fn frame_loop(&self, tick: Callback) -> RafLoop {
        RafLoop::new(tick)
    }
}

/// Starts auto-updating `floating` against `reference` on a fresh
/// [`WebHost`].
///
/// # Errors
///
/// Returns the browser's exception if a listener or observer could not be
/// registered.
pub fn auto_update(
    reference: Reference<Element>,
    floating: Element,
    update: impl Fn() + 'static,
    options: Options,
) -> Result<AutoUpdate<WebHost>, JsValue> {
    AutoUpdate::start(WebHost::new(), reference, floating, update, options)
}
