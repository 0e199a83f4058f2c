#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

use crate::{interaction::ContainerBounds, model::WindowId};

/// DOM id of the chrome element for `window_id`.
pub(crate) fn window_dom_id(window_id: &WindowId) -> String {
    format!("desktop-window-{window_id}")
}

pub(super) fn focus_window_input(window_id: WindowId) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = Closure::once_into_js(move || {
            crate::components::focus_window_content(&window_id);
        });
        let _ = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0);
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = window_id;
}

pub(super) fn desktop_viewport_bounds() -> ContainerBounds {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let width = window
                .inner_width()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32);
            let height = window
                .inner_height()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32);
            if let (Some(width), Some(height)) = (width, height) {
                return ContainerBounds { width, height };
            }
        }
    }

    ContainerBounds::default()
}
