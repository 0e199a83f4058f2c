use leptos::{create_effect, spawn_local, Callable, Callback};

use crate::{apps::AppRegistry, host::DesktopHostContext, persistence, reducer::DesktopAction};

pub(super) fn install_boot_hydration(
    host: DesktopHostContext,
    registry: AppRegistry,
    dispatch: Callback<DesktopAction>,
) {
    create_effect(move |_| {
        let prefs = host.prefs_store();
        let registry = registry.clone();
        spawn_local(async move {
            if let Some(state) = persistence::load_layout_with(prefs.as_ref(), &registry).await {
                dispatch.call(DesktopAction::HydrateLayout { state });
            }
        });
    });
}
