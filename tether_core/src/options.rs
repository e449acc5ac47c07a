// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracking configuration.
//!
//! [`Options`] selects which change signals an [`AutoUpdate`] subscribes
//! to. The flags are independent except for one rule: frame polling
//! supersedes ancestor scroll tracking and size watching of the reference,
//! because the poller already observes every movement of the reference.
//! [`Options::effective`] applies that rule; the handle only ever stores
//! effective options.
//!
//! [`AutoUpdate`]: crate::AutoUpdate

/// Which change signals to track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Options {
    /// Listen for `scroll` on every overflow ancestor. Default `true`.
    ///
    /// Forced off when [`animation_frame`](Self::animation_frame) is set.
    pub ancestor_scroll: bool,
    /// Listen for `resize` on every overflow ancestor. Default `true`.
    pub ancestor_resize: bool,
    /// Watch native size changes of the floating element and, unless frame
    /// polling is on, of the reference. Default `true`.
    pub element_resize: bool,
    /// Poll the reference rectangle once per animation frame. Default
    /// `false`.
    pub animation_frame: bool,
}

impl Options {
    /// The default configuration: everything except frame polling.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ancestor_scroll: true,
            ancestor_resize: true,
            element_resize: true,
            animation_frame: false,
        }
    }

    /// Default configuration with frame polling enabled.
    ///
    /// Suited to references that move without scrolling or resizing, e.g.
    /// under CSS transform animations.
    #[must_use]
    pub const fn polling() -> Self {
        Self {
            animation_frame: true,
            ..Self::new()
        }
    }

    /// Resolves the flags against each other.
    #[must_use]
    pub const fn effective(self) -> Self {
        Self {
            ancestor_scroll: self.ancestor_scroll && !self.animation_frame,
            ..self
        }
    }

    /// Whether any ancestor listener will be registered.
    #[must_use]
    pub const fn tracks_ancestors(&self) -> bool {
        let resolved = self.effective();
        resolved.ancestor_scroll || resolved.ancestor_resize
    }

    /// Whether the size watcher observes the reference's element.
    #[must_use]
    pub const fn watches_reference(&self) -> bool {
        self.element_resize && !self.animation_frame
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}
