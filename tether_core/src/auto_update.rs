// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The auto-update handle.
//!
//! [`AutoUpdate::start`] wires every enabled mechanism to the update
//! callback and returns a handle owning all registrations:
//!
//! 1. Overflow ancestors of the reference's effective element and of the
//!    floating element are collected once.
//! 2. `scroll` (passive) and `resize` listeners are registered on each.
//! 3. The size watcher observes the floating element and, unless frame
//!    polling is on, the reference's effective element.
//! 4. The update callback runs once.
//! 5. With frame polling on, the poller runs its first iteration.
//!
//! [`AutoUpdate::stop`] undoes all of it. Dropping the handle stops it too.
//! Each call to `start` creates an independent handle, even for the same
//! element pair.

use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::host::{Disconnect, Host};
use crate::notify::Notifier;
use crate::options::Options;
use crate::poll::FramePoller;
use crate::reference::Reference;
use crate::subscribe::{collect_ancestors, subscribe};
use crate::trace::{DisposeEvent, SubscribeEvent, Tracer, UpdateSource};
use crate::watch::{watch_sizes, watch_targets};

/// Keeps a floating element's update callback wired to every change signal
/// of its anchor pair.
///
/// Created by [`start`](Self::start). The registrations live until
/// [`stop`](Self::stop) is called or the handle is dropped.
pub struct AutoUpdate<H: Host> {
    notifier: Rc<Notifier>,
    options: Options,
    listeners: Vec<H::Listener>,
    watcher: Option<H::SizeWatcher>,
    poller: Option<Rc<FramePoller<H>>>,
}

impl<H: Host> AutoUpdate<H> {
    /// Subscribes `update` to the change signals selected by `options`.
    ///
    /// `update` runs once before this returns, then again whenever a
    /// tracked signal fires. It is never debounced.
    ///
    /// # Errors
    ///
    /// Returns the host's error if a registration fails. Registrations made
    /// before the failure are released first. `update` has only run if the
    /// failure came from the first poller iteration.
    pub fn start(
        host: H,
        reference: Reference<H::Element>,
        floating: H::Element,
        update: impl Fn() + 'static,
        options: Options,
    ) -> Result<Self, H::Error> {
        Self::start_with_tracer(host, reference, floating, update, options, Tracer::none())
    }

    /// Like [`start`](Self::start), reporting events to `tracer`.
    ///
    /// # Errors
    ///
    /// See [`start`](Self::start).
    pub fn start_with_tracer(
        host: H,
        reference: Reference<H::Element>,
        floating: H::Element,
        update: impl Fn() + 'static,
        options: Options,
        tracer: Tracer,
    ) -> Result<Self, H::Error> {
        let options = options.effective();
        let mut this = Self {
            notifier: Rc::new(Notifier::new(update, tracer)),
            options,
            listeners: Vec::new(),
            watcher: None,
            poller: None,
        };

        let ancestors = if options.tracks_ancestors() {
            collect_ancestors(&host, &reference, &floating)
        } else {
            Vec::new()
        };
        subscribe(
            &host,
            &ancestors,
            &options,
            &this.notifier,
            &mut this.listeners,
        )?;

        let targets = watch_targets::<H>(&reference, &floating, &options);
        this.watcher = watch_sizes(&host, &targets, &options, &this.notifier)?;

        let per_kind = |enabled: bool| if enabled { ancestors.len() } else { 0 };
        this.notifier.trace(|tracer| {
            tracer.subscribe(&SubscribeEvent {
                ancestors: ancestors.len(),
                scroll_listeners: per_kind(options.ancestor_scroll),
                resize_listeners: per_kind(options.ancestor_resize),
                watched_elements: this.watcher.as_ref().map_or(0, |_| targets.len()),
            });
        });

        this.notifier.notify(UpdateSource::Initial);

        if options.animation_frame && this.notifier.is_active() {
            let poller = FramePoller::start(host, reference, Rc::clone(&this.notifier))?;
            this.poller = Some(poller);
        }
        Ok(this)
    }

    /// Removes every registration. Afterwards the update callback is never
    /// called again by this handle.
    ///
    /// Calling it again is a no-op.
    pub fn stop(&mut self) {
        let first = self.notifier.close();

        let listeners = self.listeners.len();
        for mut listener in self.listeners.drain(..) {
            listener.disconnect();
        }
        let watcher = self.watcher.take();
        let had_watcher = watcher.is_some();
        if let Some(mut watcher) = watcher {
            watcher.disconnect();
        }
        let released = self
            .poller
            .take()
            .map(|poller| poller.halt())
            .unwrap_or_default();

        if first {
            self.notifier.trace(|tracer| {
                tracer.dispose(&DisposeEvent {
                    listeners,
                    watcher: had_watcher,
                    trigger: released.trigger,
                    frame_loop: released.frame_loop,
                });
            });
        }
    }

    /// Returns `true` until [`stop`](Self::stop) runs.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.notifier.is_active()
    }

    /// Number of ancestor listeners currently registered.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// The options in effect, after frame polling has overridden the flags
    /// it supersedes.
    #[must_use]
    pub fn options(&self) -> Options {
        self.options
    }
}

impl<H: Host> Drop for AutoUpdate<H> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<H: Host> core::fmt::Debug for AutoUpdate<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AutoUpdate")
            .field("active", &self.notifier.is_active())
            .field("options", &self.options)
            .field("listeners", &self.listeners.len())
            .field("watcher", &self.watcher.is_some())
            .field("poller", &self.poller)
            .finish()
    }
}
