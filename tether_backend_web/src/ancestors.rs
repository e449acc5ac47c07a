// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overflow ancestor discovery.
//!
//! Walks up from an element through parent nodes, assigned slots and
//! shadow-root hosts, collecting every element whose computed overflow can
//! clip or scroll its content. The walk ends at the body, which contributes
//! the window, the visual viewport, and the body itself when it overflows.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, EventTarget, HtmlElement, Node, ShadowRoot};

const OVERFLOW_KEYWORDS: [&str; 5] = ["auto", "scroll", "overlay", "hidden", "clip"];

/// Whether computed `overflow` values (concatenated) and `display` make an
/// element an overflow ancestor.
pub(crate) fn overflows(overflow: &str, display: &str) -> bool {
    OVERFLOW_KEYWORDS.iter().any(|k| overflow.contains(k))
        && !matches!(display, "inline" | "contents")
}

/// Lists the overflow ancestors of `element`, nearest first.
pub(crate) fn overflow_ancestors(element: &Element) -> Vec<EventTarget> {
    let mut list: Vec<EventTarget> = Vec::new();
    let mut node: Node = element.clone().into();

    while let Some(ancestor) = nearest_overflow_ancestor(&node) {
        let is_body = ancestor
            .owner_document()
            .and_then(|document| document.body())
            .is_some_and(|body| same_object(&body, &ancestor));
        if is_body {
            if let Some(window) = ancestor
                .owner_document()
                .and_then(|document| document.default_view())
            {
                let viewport = window.visual_viewport();
                list.push(window.into());
                if let Some(viewport) = viewport {
                    list.push(viewport.into());
                }
            }
            if is_overflow_element(&ancestor) {
                list.push(ancestor.into());
            }
            break;
        }
        list.push(ancestor.clone().into());
        node = ancestor.into();
    }
    list
}

/// Nearest overflow ancestor of `node`, or the body when there is none
/// below it.
fn nearest_overflow_ancestor(node: &Node) -> Option<Element> {
    let mut current = node.clone();
    loop {
        let parent = parent_of(&current)?;
        if is_last_traversable(&parent) {
            return body_of(&parent);
        }
        if let Some(element) = parent.dyn_ref::<HtmlElement>()
            && is_overflow_element(element)
        {
            return Some(element.clone().into());
        }
        current = parent;
    }
}

fn parent_of(node: &Node) -> Option<Node> {
    if node.node_name() == "HTML" {
        return Some(node.clone());
    }
    if let Some(slot) = node.dyn_ref::<Element>().and_then(Element::assigned_slot) {
        return Some(slot.into());
    }
    if let Some(parent) = node.parent_node() {
        return Some(parent);
    }
    if let Some(shadow) = node.dyn_ref::<ShadowRoot>() {
        return Some(shadow.host().into());
    }
    node.owner_document()
        .and_then(|document| document.document_element())
        .map(Into::into)
}

fn is_last_traversable(node: &Node) -> bool {
    matches!(node.node_name().as_str(), "HTML" | "BODY" | "#document")
}

fn body_of(node: &Node) -> Option<Element> {
    let document = match node.dyn_ref::<Document>() {
        Some(document) => document.clone(),
        None => node.owner_document()?,
    };
    document.body().map(Into::into)
}

fn is_overflow_element(element: &Element) -> bool {
    let Some(style) = element
        .owner_document()
        .and_then(|document| document.default_view())
        .and_then(|window| window.get_computed_style(element).ok().flatten())
    else {
        return false;
    };
    let value = |name: &str| -> String { style.get_property_value(name).unwrap_or_default() };
    let overflow = format!(
        "{}{}{}",
        value("overflow"),
        value("overflow-y"),
        value("overflow-x")
    );
    overflows(&overflow, &value("display"))
}

fn same_object(a: &JsValue, b: &JsValue) -> bool {
    a == b
}
