// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reference element model.
//!
//! A floating element is anchored either to a concrete element, or to a
//! [`VirtualElement`]: anything that can report a rectangle (a text
//! selection, a cursor position, a canvas region). A virtual element may
//! name a *context element* that stands in for it during ancestor discovery
//! and size watching.

use alloc::rc::Rc;
use core::fmt;

use kurbo::Rect;

/// A reference that is not a concrete element.
pub trait VirtualElement<E> {
    /// Current rectangle of the reference in viewport coordinates.
    fn bounding_rect(&self) -> Rect;

    /// Element used for ancestor discovery and size watching, if any.
    fn context_element(&self) -> Option<E> {
        None
    }
}

/// The element a floating element is anchored to.
pub enum Reference<E> {
    /// A concrete element.
    Element(E),
    /// A virtual element.
    Virtual(Rc<dyn VirtualElement<E>>),
}

impl<E> Reference<E> {
    /// Wraps a virtual element.
    pub fn virtual_element(element: impl VirtualElement<E> + 'static) -> Self {
        Self::Virtual(Rc::new(element))
    }

    /// Returns `true` for a concrete element.
    #[must_use]
    pub fn is_element(&self) -> bool {
        matches!(self, Self::Element(_))
    }

    /// Returns the concrete element, if this is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&E> {
        match self {
            Self::Element(element) => Some(element),
            Self::Virtual(_) => None,
        }
    }
}

impl<E: Clone> Reference<E> {
    /// The element that represents this reference in the tree: the element
    /// itself, or a virtual element's context element.
    #[must_use]
    pub fn effective_element(&self) -> Option<E> {
        match self {
            Self::Element(element) => Some(element.clone()),
            Self::Virtual(element) => element.context_element(),
        }
    }
}

impl<E> From<E> for Reference<E> {
    fn from(element: E) -> Self {
        Self::Element(element)
    }
}

impl<E: Clone> Clone for Reference<E> {
    fn clone(&self) -> Self {
        match self {
            Self::Element(element) => Self::Element(element.clone()),
            Self::Virtual(element) => Self::Virtual(Rc::clone(element)),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for Reference<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(element) => f.debug_tuple("Element").field(element).finish(),
            Self::Virtual(_) => f.debug_tuple("Virtual").finish_non_exhaustive(),
        }
    }
}
