//! Host-side services for executing reducer effects and querying the browser environment.

mod boot;
mod host_ui;
mod persistence_effects;

use std::rc::Rc;

use leptos::Callback;
use platform_host::PrefsStore;
use platform_host_web::{host_strategy_name, prefs_store};

use crate::{
    apps::AppRegistry,
    interaction::ContainerBounds,
    model::WindowId,
    reducer::{DesktopAction, RuntimeEffect},
    runtime_context::DesktopRuntimeContext,
};

pub(crate) use host_ui::window_dom_id;

#[derive(Clone)]
/// Host service bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    prefs: Rc<dyn PrefsStore>,
    host_strategy_name: &'static str,
}

impl Default for DesktopHostContext {
    fn default() -> Self {
        Self {
            prefs: Rc::new(prefs_store()),
            host_strategy_name: host_strategy_name(),
        }
    }
}

impl DesktopHostContext {
    /// Host backed by an explicit preference store.
    pub fn with_prefs(prefs: Rc<dyn PrefsStore>, host_strategy_name: &'static str) -> Self {
        Self {
            prefs,
            host_strategy_name,
        }
    }

    /// Returns the store that holds the window layout document.
    pub fn prefs_store(&self) -> Rc<dyn PrefsStore> {
        self.prefs.clone()
    }

    pub fn host_strategy_name(&self) -> &'static str {
        self.host_strategy_name
    }

    /// Loads the persisted layout once and dispatches it as [`DesktopAction::HydrateLayout`].
    pub fn install_boot_hydration(&self, registry: AppRegistry, dispatch: Callback<DesktopAction>) {
        boot::install_boot_hydration(self.clone(), registry, dispatch);
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::PersistLayout => {
                persistence_effects::persist_layout(self.clone(), runtime)
            }
            RuntimeEffect::FocusWindowInput(window_id) => self.focus_window_input(window_id),
        }
    }

    /// Moves DOM focus into the window's content after the next render.
    pub fn focus_window_input(&self, window_id: WindowId) {
        host_ui::focus_window_input(window_id);
    }

    /// Size of the surface windows may be dragged within.
    pub fn desktop_viewport_bounds(&self) -> ContainerBounds {
        host_ui::desktop_viewport_bounds()
    }
}
