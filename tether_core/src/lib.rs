// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change-detection scheduling for floating elements.
//!
//! `tether_core` decides *when* a floating element (tooltip, menu, popover)
//! has to be repositioned relative to its reference element. It never
//! computes a position: it wires the platform's change signals to a single
//! caller-supplied `update` callback and tears them down again. It is
//! `no_std` compatible (with `alloc`) and talks to the platform through the
//! [`Host`](host::Host) trait.
//!
//! # Architecture
//!
//! Four mechanisms feed the same callback:
//!
//! ```text
//!   ancestor scroll/resize ──┐
//!   size watcher ────────────┤
//!   frame-rect poller ───────┼──► activity gate ──► update()
//!   initial call ────────────┘
//!
//!   AutoUpdate::stop() ──► listeners, watcher, trigger, frame request released
//! ```
//!
//! **[`options`]**: The four tracking flags and their resolution rules.
//! Frame polling supersedes ancestor scroll tracking and reference size
//! watching.
//!
//! **[`reference`]**: Concrete vs. virtual reference elements.
//!
//! **[`host`]**: The platform contract: geometry, ancestor discovery,
//! listeners, size watcher, one-shot intersection trigger, frame loop.
//!
//! **[`auto_update`]**: [`AutoUpdate`], the handle returned by setup. Its
//! [`stop`](AutoUpdate::stop) method (also run on drop) is the disposer.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types
//! for instrumentation, with a zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Example
//!
//! ```rust,ignore
//! let handle = AutoUpdate::start(
//!     host,
//!     Reference::from(button),
//!     tooltip,
//!     move || reposition(),
//!     Options::default(),
//! )?;
//! // ...
//! drop(handle); // or handle.stop()
//! ```
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod auto_update;
pub mod host;
pub mod options;
pub mod reference;
pub mod trace;

mod notify;
mod poll;
mod subscribe;
mod watch;

#[cfg(test)]
mod testing;

pub use auto_update::AutoUpdate;
pub use kurbo::Rect;
pub use options::Options;
pub use reference::{Reference, VirtualElement};
