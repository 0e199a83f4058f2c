use desktop_app_contract::{AppRegistration, ApplicationId};

use super::*;

/// Any window for `app_id` exists, minimized or not.
pub(crate) fn is_app_open(state: &DesktopState, app_id: &ApplicationId) -> bool {
    state.window_for_app(app_id).is_some()
}

/// The active window belongs to `app_id`.
pub(crate) fn is_app_active(state: &DesktopState, app_id: &ApplicationId) -> bool {
    state
        .active_window()
        .is_some_and(|window| &window.app_id == app_id && !window.minimized)
}

/// Restores a minimized window for the app, otherwise opens (or focuses) one.
pub(crate) fn dock_click_action(state: &DesktopState, app_id: &ApplicationId) -> DesktopAction {
    match state.window_for_app(app_id) {
        Some(window) if window.minimized && state.visible_window_for_app(app_id).is_none() => {
            DesktopAction::RestoreWindow {
                window_id: window.id.clone(),
            }
        }
        _ => DesktopAction::OpenWindow(OpenWindowRequest::new(app_id.clone())),
    }
}

#[component]
pub(super) fn Dock() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let apps = runtime
        .registry
        .with_value(|registry| registry.dock_apps().cloned().collect::<Vec<_>>());

    view! {
        <nav class="desktop-dock" aria-label="Dock">
            {apps
                .into_iter()
                .map(|app| view! { <DockButton app=app /> })
                .collect_view()}
        </nav>
    }
}

#[component]
fn DockButton(app: AppRegistration) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let app_id = store_value(app.app_id.clone());
    let open = move || runtime.state.with(|s| is_app_open(s, &app_id.get_value()));
    let active = move || runtime.state.with(|s| is_app_active(s, &app_id.get_value()));

    let on_click = move |_| {
        let action = runtime
            .state
            .with_untracked(|s| dock_click_action(s, &app_id.get_value()));
        runtime.dispatch_action(action);
    };

    view! {
        <button
            type="button"
            class="dock-button"
            class:is-open=open
            class:is-active=active
            title=app.display_name.clone()
            aria-label=app.display_name.clone()
            aria-pressed=move || active().to_string()
            on:click=on_click
        >
            <ShellIcon icon=IconName::from_icon_id(&app.icon_id) size=IconSize::Md />
            <Show when=open fallback=|| ()>
                <span class="dock-indicator" aria-hidden="true"></span>
            </Show>
        </button>
    }
}
