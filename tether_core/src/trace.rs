// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for auto-update handles.
//!
//! This module provides a [`TraceSink`] trait with one method per event an
//! [`AutoUpdate`](crate::AutoUpdate) emits over its lifetime. All method
//! bodies default to no-ops, so implementing only the events you care about
//! is fine.
//!
//! [`Tracer`] owns an optional boxed sink. When the `trace` feature is
//! **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use alloc::boxed::Box;

use kurbo::Rect;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which mechanism invoked the update callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpdateSource {
    /// The unconditional call made during setup.
    Initial,
    /// An overflow ancestor scrolled.
    AncestorScroll,
    /// An overflow ancestor resized.
    AncestorResize,
    /// The size watcher reported a change.
    ElementResize,
    /// The frame poller saw the reference rectangle move.
    AnimationFrame,
}

/// How the frame poller obtained a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SampleStrategy {
    /// Delivered by a one-shot intersection trigger.
    Intersection,
    /// Read directly from the reference.
    Direct,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once during setup, after ancestor listeners are registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscribeEvent {
    /// Distinct overflow ancestors found.
    pub ancestors: usize,
    /// `scroll` listeners registered.
    pub scroll_listeners: usize,
    /// `resize` listeners registered.
    pub resize_listeners: usize,
    /// Elements observed by the size watcher.
    pub watched_elements: usize,
}

/// Emitted right before the update callback runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateEvent {
    /// What triggered the update.
    pub source: UpdateSource,
}

/// Emitted for every size watcher firing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WatcherFiringEvent {
    /// Zero-based firing counter.
    pub firing: u64,
    /// Whether the firing was dropped as the initial observation.
    pub suppressed: bool,
}

/// Emitted for every rectangle the frame poller samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSampleEvent {
    /// Poller iteration that produced the sample.
    pub frame_index: u64,
    /// The sampled rectangle.
    pub rect: Rect,
    /// Whether it differs from the previous sample.
    pub changed: bool,
    /// How the sample was obtained.
    pub strategy: SampleStrategy,
}

/// Emitted when the frame poller stops because the host failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollHaltedEvent {
    /// Poller iteration that failed.
    pub frame_index: u64,
}

/// Emitted once when the handle is disposed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisposeEvent {
    /// Ancestor listeners removed.
    pub listeners: usize,
    /// Whether a size watcher was disconnected.
    pub watcher: bool,
    /// Whether a pending intersection trigger was disconnected.
    pub trigger: bool,
    /// Whether a frame loop was cancelled.
    pub frame_loop: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from an auto-update handle.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after ancestor listeners and the size watcher are set up.
    fn on_subscribe(&mut self, e: &SubscribeEvent) {
        _ = e;
    }

    /// Called right before the update callback runs.
    fn on_update(&mut self, e: &UpdateEvent) {
        _ = e;
    }

    /// Called for every size watcher firing.
    fn on_watcher_firing(&mut self, e: &WatcherFiringEvent) {
        _ = e;
    }

    /// Called for every frame poller sample.
    fn on_frame_sample(&mut self, e: &FrameSampleEvent) {
        _ = e;
    }

    /// Called when the frame poller halts on a host failure.
    fn on_poll_halted(&mut self, e: &PollHaltedEvent) {
        _ = e;
    }

    /// Called when the handle is disposed.
    fn on_dispose(&mut self, e: &DisposeEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Owning wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing and
/// the sink passed to [`new`](Self::new) is dropped immediately. When **on**,
/// each method checks the inner `Option` (one branch) before dispatching to
/// the sink.
pub struct Tracer {
    #[cfg(feature = "trace")]
    sink: Option<Box<dyn TraceSink>>,
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::none()
    }
}

impl Tracer {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: impl TraceSink + 'static) -> Self {
        Self::boxed(Box::new(sink))
    }

    /// Creates a tracer from an already boxed sink.
    #[inline]
    #[must_use]
    pub fn boxed(sink: Box<dyn TraceSink>) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {}
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub const fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {}
        }
    }

    /// Emits a [`SubscribeEvent`].
    #[inline]
    pub fn subscribe(&mut self, e: &SubscribeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_subscribe(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`UpdateEvent`].
    #[inline]
    pub fn update(&mut self, e: &UpdateEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_update(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`WatcherFiringEvent`].
    #[inline]
    pub fn watcher_firing(&mut self, e: &WatcherFiringEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_watcher_firing(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FrameSampleEvent`].
    #[inline]
    pub fn frame_sample(&mut self, e: &FrameSampleEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame_sample(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PollHaltedEvent`].
    #[inline]
    pub fn poll_halted(&mut self, e: &PollHaltedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_poll_halted(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DisposeEvent`].
    #[inline]
    pub fn dispose(&mut self, e: &DisposeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_dispose(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
