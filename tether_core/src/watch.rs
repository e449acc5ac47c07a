// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Size watching of the reference and floating elements.
//!
//! Native size watchers fire once as soon as a node is observed. That
//! firing carries no change, so the first firing after setup is dropped.
//! One flag covers the whole batch of observed nodes, not each node: all
//! nodes are observed together during setup and their initial firings are
//! expected to arrive as one batch. A host that splits them across batches
//! gets the later initial firings forwarded as updates.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::host::Host;
use crate::notify::Notifier;
use crate::options::Options;
use crate::reference::Reference;
use crate::trace::{UpdateSource, WatcherFiringEvent};

/// Drops the first firing of a size watcher.
#[derive(Debug, Default)]
pub(crate) struct FirstFiringGate {
    firings: Cell<u64>,
}

impl FirstFiringGate {
    /// Records a firing. Returns `true` if it should be forwarded.
    pub(crate) fn admit(&self) -> bool {
        let firing = self.firings.get();
        self.firings.set(firing + 1);
        firing > 0
    }

    pub(crate) fn firings(&self) -> u64 {
        self.firings.get()
    }
}

/// Elements the watcher observes: the reference's effective element unless
/// frame polling covers it, then the floating element.
pub(crate) fn watch_targets<H: Host>(
    reference: &Reference<H::Element>,
    floating: &H::Element,
    options: &Options,
) -> Vec<H::Element> {
    let mut targets = Vec::with_capacity(2);
    if options.watches_reference()
        && let Some(element) = reference.effective_element()
    {
        targets.push(element);
    }
    targets.push(floating.clone());
    targets
}

/// Starts the size watcher, or returns `None` when element resize tracking
/// is off.
pub(crate) fn watch_sizes<H: Host>(
    host: &H,
    targets: &[H::Element],
    options: &Options,
    notifier: &Rc<Notifier>,
) -> Result<Option<H::SizeWatcher>, H::Error> {
    if !options.element_resize {
        return Ok(None);
    }
    let gate = FirstFiringGate::default();
    let notifier = Rc::clone(notifier);
    let callback = Rc::new(move || {
        let admitted = gate.admit();
        notifier.trace(|tracer| {
            tracer.watcher_firing(&WatcherFiringEvent {
                firing: gate.firings() - 1,
                suppressed: !admitted,
            });
        });
        if admitted {
            notifier.notify(UpdateSource::ElementResize);
        }
    });
    host.watch_sizes(targets, callback).map(Some)
}
