//! DOM focus helpers for window content.

use wasm_bindgen::JsCast;

use crate::{host::window_dom_id, model::WindowId};

const FOCUSABLE_SELECTOR: &str = concat!(
    "button:not([disabled]), [href], input:not([disabled]), select:not([disabled]), ",
    "textarea:not([disabled]), [tabindex]:not([tabindex=\"-1\"])"
);

fn window_element(window_id: &WindowId) -> Option<web_sys::HtmlElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(&window_dom_id(window_id))?
        .dyn_into::<web_sys::HtmlElement>()
        .ok()
}

fn active_html_element() -> Option<web_sys::HtmlElement> {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.active_element())
        .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok())
}

fn focusable_elements(root: &web_sys::Element) -> Vec<web_sys::HtmlElement> {
    let Ok(nodes) = root.query_selector_all(FOCUSABLE_SELECTOR) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .filter(|element| element.get_attribute("aria-hidden").as_deref() != Some("true"))
        .collect()
}

/// Index to focus next when cycling through `len` elements from `current`.
///
/// Wraps at both ends. Starting outside the list enters at the first or last element.
pub(crate) fn next_focus_index(len: usize, current: Option<usize>, backwards: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match (current, backwards) {
        (None, false) => 0,
        (None, true) => len - 1,
        (Some(index), false) => (index + 1) % len,
        (Some(index), true) => (index + len - 1) % len,
    })
}

/// Moves focus to the first focusable control in the window body, or to the window itself.
pub(crate) fn focus_window_content(window_id: &WindowId) {
    let Some(window) = window_element(window_id) else {
        return;
    };
    let body = window.query_selector(".window-body").ok().flatten();
    let first = body.as_ref().and_then(|body| focusable_elements(body).into_iter().next());
    let _ = match first {
        Some(element) => element.focus(),
        None => window.focus(),
    };
}

/// Cycles focus among the window's own focusable elements.
///
/// Returns `false` when the window has nothing to focus, leaving the browser default alone.
pub(crate) fn cycle_focus_within(window_id: &WindowId, backwards: bool) -> bool {
    let Some(window) = window_element(window_id) else {
        return false;
    };
    let items = focusable_elements(&window);
    let active = active_html_element();
    let current = active
        .as_ref()
        .and_then(|active| items.iter().position(|item| item == active));
    let Some(next) = next_focus_index(items.len(), current, backwards) else {
        return false;
    };
    let _ = items[next].focus();
    true
}
