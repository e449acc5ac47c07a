// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ancestor scroll and resize listeners.

use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::host::{AncestorEvent, Callback, Host};
use crate::notify::Notifier;
use crate::options::Options;
use crate::reference::Reference;
use crate::trace::UpdateSource;

/// Collects the overflow ancestors of both elements.
///
/// The reference side comes first and is empty for a virtual reference
/// without a context element. Repeated ancestors (the window, typically)
/// are kept once, at their first position.
pub(crate) fn collect_ancestors<H: Host>(
    host: &H,
    reference: &Reference<H::Element>,
    floating: &H::Element,
) -> Vec<H::Ancestor> {
    let mut ancestors: Vec<H::Ancestor> = Vec::new();
    let reference_side = reference
        .effective_element()
        .map(|element| host.overflow_ancestors(&element))
        .unwrap_or_default();
    for ancestor in reference_side
        .into_iter()
        .chain(host.overflow_ancestors(floating))
    {
        if !ancestors.contains(&ancestor) {
            ancestors.push(ancestor);
        }
    }
    ancestors
}

/// Registers the listeners `options` asks for on every ancestor.
///
/// Listeners are pushed into `listeners` as they are registered, so a
/// failure part-way leaves the caller holding everything that needs
/// releasing.
pub(crate) fn subscribe<H: Host>(
    host: &H,
    ancestors: &[H::Ancestor],
    options: &Options,
    notifier: &Rc<Notifier>,
    listeners: &mut Vec<H::Listener>,
) -> Result<(), H::Error> {
    let options = options.effective();
    let on_scroll = options
        .ancestor_scroll
        .then(|| forward(notifier, UpdateSource::AncestorScroll));
    let on_resize = options
        .ancestor_resize
        .then(|| forward(notifier, UpdateSource::AncestorResize));

    for ancestor in ancestors {
        if let Some(callback) = &on_scroll {
            let listener = host.listen(ancestor, AncestorEvent::Scroll, Rc::clone(callback))?;
            listeners.push(listener);
        }
        if let Some(callback) = &on_resize {
            let listener = host.listen(ancestor, AncestorEvent::Resize, Rc::clone(callback))?;
            listeners.push(listener);
        }
    }
    Ok(())
}

fn forward(notifier: &Rc<Notifier>, source: UpdateSource) -> Callback {
    let notifier = Rc::clone(notifier);
    Rc::new(move || notifier.notify(source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TestHost, TestNode, Tracked};
    use crate::trace::Tracer;

    #[test]
    fn shared_ancestors_are_listed_once() {
        let host = TestHost::new();
        host.set_ancestors(1, &[TestNode::Element(10), TestNode::Window]);
        host.set_ancestors(2, &[TestNode::Element(20), TestNode::Window]);

        let ancestors = collect_ancestors(&host, &Reference::from(1), &2);
        assert_eq!(
            ancestors,
            [TestNode::Element(10), TestNode::Window, TestNode::Element(20)]
        );
    }

    #[test]
    fn contextless_virtual_reference_contributes_nothing() {
        let host = TestHost::new();
        host.set_ancestors(2, &[TestNode::Element(20), TestNode::Window]);
        let reference = Reference::virtual_element(Tracked::new(None));

        let ancestors = collect_ancestors(&host, &reference, &2);
        assert_eq!(ancestors, [TestNode::Element(20), TestNode::Window]);
    }

    #[test]
    fn listeners_follow_flags() {
        let host = TestHost::new();
        let notifier = Rc::new(Notifier::new(|| {}, Tracer::none()));
        let ancestors = [TestNode::Element(10), TestNode::Window];
        let mut listeners = Vec::new();

        let options = Options {
            ancestor_scroll: false,
            ..Options::default()
        };
        subscribe(&host, &ancestors, &options, &notifier, &mut listeners)
            .expect("test host never fails");

        assert_eq!(listeners.len(), 2);
        let window = TestNode::Window;
        assert_eq!(host.listener_count(&window, AncestorEvent::Scroll), 0);
        assert_eq!(host.listener_count(&window, AncestorEvent::Resize), 1);
    }

    #[test]
    fn failure_keeps_partial_registrations() {
        let host = TestHost::new();
        host.fail_listen_after(1);
        let notifier = Rc::new(Notifier::new(|| {}, Tracer::none()));
        let ancestors = [TestNode::Element(10), TestNode::Window];
        let mut listeners = Vec::new();

        let options = Options::default();
        let result = subscribe(&host, &ancestors, &options, &notifier, &mut listeners);
        assert!(result.is_err(), "second registration fails");
        assert_eq!(listeners.len(), 1);
    }
}
