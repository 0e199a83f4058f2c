use super::*;
use crate::{
    apps::render_window_contents,
    host::window_dom_id,
    interaction::ResizeEdge,
    model::{WindowPresentation, WindowRecord},
};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

fn window_style(window: &WindowRecord, preview: Option<WindowRect>) -> String {
    match window.presentation() {
        WindowPresentation::Maximized => format!("z-index:{};", window.z_index),
        WindowPresentation::Normal | WindowPresentation::Hidden => {
            let rect = preview.unwrap_or(window.rect);
            format!(
                "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
                rect.x, rect.y, rect.w, rect.h, window.z_index
            )
        }
    }
}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let dom_id = window_dom_id(&window_id);
    let id = store_value(window_id);

    let window = create_memo(move |_| runtime.state.with(|s| s.window(&id.get_value()).cloned()));
    let is_active = move || runtime.state.with(|s| s.is_active(&id.get_value()));
    let minimized = move || window.with(|w| w.as_ref().is_some_and(|w| w.minimized));
    let maximized = move || window.with(|w| w.as_ref().is_some_and(|w| w.maximized));
    let title = move || {
        window.with(|w| w.as_ref().map(|w| w.title.clone()).unwrap_or_default())
    };
    let icon = move || {
        window.with(|w| {
            w.as_ref()
                .map(|w| IconName::from_icon_id(&w.icon_id))
                .unwrap_or(IconName::AppTile)
        })
    };
    let style = move || {
        let preview = runtime
            .interaction
            .with(|interaction| interaction.preview_rect(&id.get_value()));
        window.with(|w| {
            w.as_ref()
                .map(|w| window_style(w, preview))
                .unwrap_or_default()
        })
    };

    // Mounted once; geometry changes must not remount app content.
    let contents = runtime
        .state
        .with_untracked(|s| s.window(&id.get_value()).map(render_window_contents));

    let focus = move |_: web_sys::PointerEvent| {
        runtime.dispatch_action(DesktopAction::FocusWindow {
            window_id: id.get_value(),
        });
    };
    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        runtime.dispatch_action(DesktopAction::FocusWindow {
            window_id: id.get_value(),
        });
        let Some(record) = window.get_untracked() else {
            return;
        };
        let pointer = pointer_from_pointer_event(&ev);
        let mut started = false;
        runtime
            .interaction
            .update(|interaction| started = interaction.begin_drag(&record, pointer));
        if started {
            try_set_pointer_capture(&ev);
            ev.prevent_default();
        }
    };
    let minimize = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::MinimizeWindow {
            window_id: id.get_value(),
        });
    };
    let toggle_maximize = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::ToggleMaximizeWindow {
            window_id: id.get_value(),
        });
    };
    let close = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::CloseWindow {
            window_id: id.get_value(),
        });
    };
    let stop_pointer = |ev: web_sys::PointerEvent| ev.stop_propagation();

    view! {
        <section
            id=dom_id
            class="desktop-window"
            class:is-active=is_active
            class:is-minimized=minimized
            class:is-maximized=maximized
            style=style
            tabindex="-1"
            role="dialog"
            aria-label=title
            aria-hidden=move || minimized().then_some("true")
            on:pointerdown=focus
        >
            <header class="titlebar" on:pointerdown=begin_move on:dblclick=toggle_maximize>
                <div class="titlebar-title">
                    <span class="titlebar-app-icon" aria-hidden="true">
                        {move || view! { <ShellIcon icon=icon() size=IconSize::Sm /> }}
                    </span>
                    <span>{title}</span>
                </div>
                <div class="titlebar-controls">
                    <button
                        type="button"
                        aria-label="Minimize window"
                        on:pointerdown=stop_pointer
                        on:click=minimize
                    >
                        <ShellIcon icon=IconName::WindowMinimize size=IconSize::Xs />
                    </button>
                    <button
                        type="button"
                        aria-label=move || {
                            if maximized() { "Restore window" } else { "Maximize window" }
                        }
                        on:pointerdown=stop_pointer
                        on:click=toggle_maximize
                    >
                        {move || {
                            let icon = if maximized() {
                                IconName::WindowRestore
                            } else {
                                IconName::WindowMaximize
                            };
                            view! { <ShellIcon icon=icon size=IconSize::Xs /> }
                        }}
                    </button>
                    <button
                        type="button"
                        class="titlebar-close"
                        aria-label="Close window"
                        on:pointerdown=stop_pointer
                        on:click=close
                    >
                        <ShellIcon icon=IconName::WindowClose size=IconSize::Xs />
                    </button>
                </div>
            </header>
            <div class="window-body">{contents}</div>
            <Show when=move || !maximized() fallback=|| ()>
                {ResizeEdge::ALL
                    .into_iter()
                    .map(|edge| view! { <WindowResizeHandle window_id=id.get_value() edge=edge /> })
                    .collect_view()}
            </Show>
        </section>
    }
}

#[component]
fn WindowResizeHandle(window_id: WindowId, edge: ResizeEdge) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let id = store_value(window_id);
    let class_name = format!("window-resize-handle edge-{}", edge.token());

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::FocusWindow {
            window_id: id.get_value(),
        });
        let Some(record) = runtime.state.with_untracked(|s| s.window(&id.get_value()).cloned())
        else {
            return;
        };
        let pointer = pointer_from_pointer_event(&ev);
        let mut started = false;
        runtime
            .interaction
            .update(|interaction| started = interaction.begin_resize(&record, edge, pointer));
        if started {
            try_set_pointer_capture(&ev);
        }
    };

    view! {
        <div class=class_name aria-hidden="true" on:pointerdown=on_pointerdown />
    }
}
