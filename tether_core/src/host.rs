// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform contract.
//!
//! Tether splits platform-specific work into *host* implementations. The
//! core owns the decision logic (which signals to subscribe to, which
//! firings to drop, when a rectangle changed); a host provides the
//! primitives:
//!
//! - **Geometry**: [`Host::bounding_rect`] reads an element's rectangle.
//! - **Ancestor discovery**: [`Host::overflow_ancestors`] lists the nodes
//!   whose scrolling or resizing can move an element.
//! - **Listeners**: [`Host::listen`] registers a `scroll` or `resize`
//!   listener on one ancestor.
//! - **Size watcher**: [`Host::watch_sizes`] observes native size changes
//!   of a batch of elements. Hosts are expected to fire once on initial
//!   observation, as `ResizeObserver` does; the core drops that firing.
//! - **Intersection trigger**: [`Host::observe_rect_once`] delivers an
//!   element's rectangle once, as a side effect of intersection
//!   computation.
//! - **Frame loop**: [`Host::frame_loop`] runs a tick callback once per
//!   requested animation frame.
//!
//! Every registration is returned as a handle the core keeps until
//! disposal. Handles are disconnected explicitly through [`Disconnect`] and
//! [`FrameLoop::cancel`]; dropping a handle only frees it.
//!
//! All callbacks run on the host's single event-processing thread.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;

use kurbo::Rect;

/// Callback shared between the core and a host registration.
pub type Callback = Rc<dyn Fn()>;

/// Receives the rectangle sampled by an intersection trigger.
pub type RectCallback = Box<dyn FnOnce(Rect)>;

/// Ancestor event kinds the core listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AncestorEvent {
    /// The ancestor scrolled. Registered as a passive listener.
    Scroll,
    /// The ancestor resized.
    Resize,
}

impl AncestorEvent {
    /// The DOM event type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::Resize => "resize",
        }
    }

    /// Whether the listener is registered as passive.
    #[must_use]
    pub const fn is_passive(self) -> bool {
        matches!(self, Self::Scroll)
    }
}

/// A registration that can be undone.
pub trait Disconnect {
    /// Undoes the registration.
    ///
    /// Must not fail or panic, including when the target has since been
    /// detached, and must tolerate being called more than once.
    fn disconnect(&mut self);
}

/// A repeating animation-frame source driving one tick callback.
pub trait FrameLoop {
    /// Requests one call of the tick callback on the next animation frame.
    ///
    /// Requesting again before that frame fires is a no-op.
    fn request(&self);

    /// Cancels the pending request, if any.
    fn cancel(&self);
}

/// Platform primitives consumed by [`AutoUpdate`](crate::AutoUpdate).
pub trait Host: Clone + 'static {
    /// A concrete element.
    type Element: Clone + 'static;
    /// A listener target (element, window, viewport).
    ///
    /// Compared with `PartialEq` to register at most one listener of each
    /// kind per distinct ancestor.
    type Ancestor: Clone + PartialEq;
    /// Handle for one ancestor listener.
    type Listener: Disconnect;
    /// Handle for a size watcher.
    type SizeWatcher: Disconnect;
    /// Handle for a pending intersection trigger.
    type Trigger: Disconnect;
    /// Frame source handle.
    type FrameLoop: FrameLoop;
    /// Host failure.
    type Error;

    /// Reads the current rectangle of `element` in viewport coordinates.
    fn bounding_rect(&self, element: &Self::Element) -> Rect;

    /// Lists the overflow ancestors of `element`, nearest first.
    fn overflow_ancestors(&self, element: &Self::Element) -> Vec<Self::Ancestor>;

    /// Registers `callback` for `event` on `target`.
    fn listen(
        &self,
        target: &Self::Ancestor,
        event: AncestorEvent,
        callback: Callback,
    ) -> Result<Self::Listener, Self::Error>;

    /// Starts watching the sizes of `targets`.
    ///
    /// `callback` is called once per notification batch, including the
    /// initial batch that follows observation.
    fn watch_sizes(
        &self,
        targets: &[Self::Element],
        callback: Callback,
    ) -> Result<Self::SizeWatcher, Self::Error>;

    /// Whether [`observe_rect_once`](Self::observe_rect_once) is available.
    ///
    /// When `false`, the poller reads [`bounding_rect`](Self::bounding_rect)
    /// directly every frame.
    fn supports_intersection(&self) -> bool {
        true
    }

    /// Installs a one-shot intersection trigger on `target`.
    ///
    /// `on_rect` is called at most once, asynchronously, with the target's
    /// bounding rectangle as computed by the intersection pass.
    fn observe_rect_once(
        &self,
        target: &Self::Element,
        on_rect: RectCallback,
    ) -> Result<Self::Trigger, Self::Error>;

    /// Creates a frame source that calls `tick` on each requested frame.
    ///
    /// The loop starts idle.
    fn frame_loop(&self, tick: Callback) -> Self::FrameLoop;
}
