//! Browser desktop window manager: window store, layout persistence, pointer and keyboard
//! interaction, and the Leptos shell that renders it.

pub mod apps;
pub mod components;
mod effect_executor;
pub mod host;
pub mod icons;
pub mod interaction;
pub mod model;
pub mod persistence;
pub mod reducer;
mod runtime_context;
mod window_manager;

pub use apps::AppRegistry;
pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use host::DesktopHostContext;
pub use interaction::{InteractionConfig, InteractionState};
pub use model::*;
pub use persistence::{load_layout_with, persist_layout_with, WINDOW_LAYOUT_KEY};
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
