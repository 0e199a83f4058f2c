//! Runtime provider and context wiring for the desktop shell.
//!
//! The provider is the composition root: it owns the one [`DesktopState`] signal, the effect
//! queue, and the registry, and exposes them to every shell component through context.

use leptos::*;

use crate::{
    apps::AppRegistry,
    effect_executor,
    host::DesktopHostContext,
    interaction::{InteractionConfig, InteractionState},
    model::DesktopState,
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host service bundle for executing runtime side effects.
    pub host: StoredValue<DesktopHostContext>,
    /// Application catalog consulted by the reducer and the dock.
    pub registry: StoredValue<AppRegistry>,
    /// Reactive window manager state. Components subscribe by reading it.
    pub state: RwSignal<DesktopState>,
    /// Pointer drag/resize sessions and container bounds.
    pub interaction: RwSignal<InteractionState>,
    pub config: InteractionConfig,
    /// Queue of runtime effects emitted by the reducer.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }
}

fn install_runtime_orchestration(runtime: DesktopRuntimeContext) {
    let registry = runtime.registry.get_value();
    runtime
        .host
        .with_value(|host| host.install_boot_hydration(registry, runtime.dispatch));
    effect_executor::install(runtime);
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components and restores the saved layout.
pub fn DesktopProvider(
    /// Injected host bundle; defaults to the compile-target host.
    #[prop(optional)]
    host: Option<DesktopHostContext>,
    /// Injected registry; defaults to the built-in catalog.
    #[prop(optional)]
    registry: Option<AppRegistry>,
    #[prop(optional)] config: Option<InteractionConfig>,
    children: Children,
) -> impl IntoView {
    let host = store_value(host.unwrap_or_default());
    let registry = store_value(registry.unwrap_or_else(AppRegistry::builtin));
    let state = create_rw_signal(DesktopState::default());
    let interaction = create_rw_signal(InteractionState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();
        let previous = desktop.clone();

        let outcome = registry.with_value(|registry| reduce_desktop(&mut desktop, registry, action));
        match outcome {
            Ok(new_effects) => {
                if desktop != previous {
                    state.set(desktop);
                }
                if !new_effects.is_empty() {
                    effects.update(|queue| queue.extend(new_effects));
                }
            }
            Err(err) => logging::warn!("desktop reducer: {err}"),
        }
    });

    let runtime = DesktopRuntimeContext {
        host,
        registry,
        state,
        interaction,
        config: config.unwrap_or_default(),
        effects,
        dispatch,
    };

    provide_context(runtime);

    install_runtime_orchestration(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
