//! Launcher grid: one tile per registry entry.

use desktop_app_contract::{AppMountContext, AppRegistration};
use leptos::*;

use crate::{
    icons::{IconName, IconSize, ShellIcon},
    model::OpenWindowRequest,
    reducer::DesktopAction,
    runtime_context::use_desktop_runtime,
};

pub(super) fn mount_launcher_app(_: AppMountContext) -> View {
    view! { <LauncherGrid /> }.into_view()
}

#[component]
fn LauncherGrid() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let entries = runtime
        .registry
        .with_value(|registry| registry.entries().to_vec());

    view! {
        <div class="app-shell app-launcher">
            <ul class="launcher-grid" role="list">
                {entries
                    .into_iter()
                    .map(|app| view! { <LauncherTile app=app /> })
                    .collect_view()}
            </ul>
        </div>
    }
}

#[component]
fn LauncherTile(app: AppRegistration) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let app_id = store_value(app.app_id.clone());
    let open = move |_| {
        runtime.dispatch_action(DesktopAction::OpenWindow(OpenWindowRequest::new(
            app_id.get_value(),
        )));
    };

    view! {
        <li class="launcher-tile">
            <button type="button" class="launcher-button" on:click=open>
                <ShellIcon icon=IconName::from_icon_id(&app.icon_id) size=IconSize::Lg />
                <span class="launcher-label">{app.display_name.clone()}</span>
                <span class="launcher-category">{app.category.label()}</span>
            </button>
        </li>
    }
}
