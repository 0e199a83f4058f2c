//! Drains reducer-emitted runtime effects in order.

use leptos::*;

use crate::{reducer::RuntimeEffect, runtime_context::DesktopRuntimeContext};

/// Installs the executor that drains the runtime effect queue.
pub fn install(runtime: DesktopRuntimeContext) {
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        // Cleared first so effects dispatched while draining land in a fresh batch.
        runtime.effects.set(Vec::new());

        for effect in coalesce_effects(queued) {
            runtime.host.get_value().run_runtime_effect(runtime, effect);
        }
    });
}

/// Drops repeated layout writes within a batch; each write snapshots the latest state anyway.
fn coalesce_effects(queued: Vec<RuntimeEffect>) -> Vec<RuntimeEffect> {
    let mut persisted = false;
    queued
        .into_iter()
        .filter(|effect| match effect {
            RuntimeEffect::PersistLayout => !std::mem::replace(&mut persisted, true),
            RuntimeEffect::FocusWindowInput(_) => true,
        })
        .collect()
}
