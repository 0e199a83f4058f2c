//! Desktop shell UI composition and interaction surfaces.

mod a11y;
mod dock;
mod window;

use leptos::*;

pub(crate) use self::a11y::focus_window_content;
use self::{a11y::cycle_focus_within, dock::Dock, window::DesktopWindow};

use crate::{
    icons::{IconName, IconSize, ShellIcon},
    interaction::{route_key, InteractionState, KeyChord, KeyRoute, PointerPosition},
    model::{DesktopState, OpenWindowRequest, WindowId, WindowRect},
    reducer::DesktopAction,
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

fn handle_global_keydown(runtime: DesktopRuntimeContext, ev: &web_sys::KeyboardEvent) {
    if ev.default_prevented() {
        return;
    }
    let chord = KeyChord::from(ev);
    match runtime.state.with_untracked(|state| route_key(&chord, state)) {
        KeyRoute::Dispatch(action) => {
            ev.prevent_default();
            runtime.dispatch_action(action);
        }
        KeyRoute::CycleFocus {
            window_id,
            backwards,
        } => {
            if cycle_focus_within(&window_id, backwards) {
                ev.prevent_default();
            }
        }
        KeyRoute::Ignore => {}
    }
}

#[component]
/// Full desktop surface: the window layer, the dock, and the global input listeners.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();

    let measure = move || {
        let bounds = runtime.host.with_value(|host| host.desktop_viewport_bounds());
        runtime
            .interaction
            .update(|interaction| interaction.set_container(bounds));
    };
    measure();

    let keydown_listener = window_event_listener(ev::keydown, move |ev| {
        handle_global_keydown(runtime, &ev);
    });
    let resize_listener = window_event_listener(ev::resize, move |_| measure());
    on_cleanup(move || {
        keydown_listener.remove();
        resize_listener.remove();
    });

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        if runtime.interaction.with_untracked(InteractionState::is_idle) {
            return;
        }
        let pointer = pointer_from_pointer_event(&ev);
        runtime.interaction.update(|interaction| {
            if interaction.drag_to(pointer).is_none() {
                interaction.resize_to(pointer, &runtime.config);
            }
        });
    };

    let on_pointer_up = move |ev: web_sys::PointerEvent| {
        if runtime.interaction.with_untracked(InteractionState::is_idle) {
            return;
        }
        let pointer = pointer_from_pointer_event(&ev);
        let mut committed = None;
        runtime
            .interaction
            .update(|interaction| committed = interaction.release(pointer, &runtime.config));
        if let Some(action) = committed {
            runtime.dispatch_action(action);
        }
    };

    let on_pointer_cancel = move |_: web_sys::PointerEvent| {
        if !runtime.interaction.with_untracked(InteractionState::is_idle) {
            runtime.interaction.update(InteractionState::cancel);
        }
    };

    let window_ids = move || {
        runtime
            .state
            .with(|state| state.windows.keys().cloned().collect::<Vec<_>>())
    };

    view! {
        <div
            class="desktop-shell"
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_up
            on:pointercancel=on_pointer_cancel
        >
            <div class="desktop-window-layer">
                <For each=window_ids key=|window_id| window_id.clone() let:window_id>
                    <DesktopWindow window_id=window_id />
                </For>
            </div>
            <Dock />
        </div>
    }
}
