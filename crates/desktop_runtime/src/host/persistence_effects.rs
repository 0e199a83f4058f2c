use leptos::{logging, spawn_local, SignalGetUntracked};

use crate::{host::DesktopHostContext, persistence, runtime_context::DesktopRuntimeContext};

pub(super) fn persist_layout(host: DesktopHostContext, runtime: DesktopRuntimeContext) {
    let snapshot = runtime.state.get_untracked();
    let prefs = host.prefs_store();
    spawn_local(async move {
        if let Err(err) = persistence::persist_layout_with(prefs.as_ref(), &snapshot).await {
            logging::warn!("persist window layout failed: {err}");
        }
    });
}
