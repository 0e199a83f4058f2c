//! Window Store actions, side-effect intents, and transition logic.

use thiserror::Error;

use crate::{
    apps::AppRegistry,
    model::{BoundsPatch, DesktopState, OpenWindowRequest, WindowId, WindowRecord, WindowRect},
    window_manager::{
        cascade_origin, claim_top_z_index, next_free_sequence, normalize_active_window,
        promote_next_active, raise_and_activate,
    },
};

#[derive(Debug, Clone, PartialEq)]
/// Mutations accepted by [`reduce_desktop`]. These are the only way to change [`DesktopState`].
pub enum DesktopAction {
    /// Open a window for a registry entry, or focus its visible window if one exists.
    OpenWindow(OpenWindowRequest),
    /// Close a window by id.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Raise and activate a visible window.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Hide a window without destroying it.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Un-minimize a window, then raise and activate it.
    RestoreWindow {
        /// Window to restore.
        window_id: WindowId,
    },
    /// Flip the maximized flag; maximizing also raises and activates.
    ToggleMaximizeWindow {
        /// Window to toggle.
        window_id: WindowId,
    },
    /// Merge geometry fields into a window. Inputs are trusted; no clamping happens here.
    UpdateBounds {
        /// Window to update.
        window_id: WindowId,
        /// Fields to overwrite.
        bounds: BoundsPatch,
    },
    /// Replace the whole state with a decoded persisted layout.
    HydrateLayout {
        /// Decoded layout.
        state: DesktopState,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Write the current layout to durable storage.
    PersistLayout,
    /// Move DOM focus into a newly focused window.
    FocusWindowInput(WindowId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Non-fatal reducer signals. The dispatcher logs these and carries on.
pub enum ReducerError {
    /// The open request named an app that is not in the registry.
    #[error("app `{0}` is not registered; open request skipped")]
    UnknownApp(String),
}

/// Applies a [`DesktopAction`] and returns the side effects it requires.
///
/// Actions naming a window that does not exist are silent no-ops. Actions that leave the state
/// unchanged return no effects.
///
/// # Errors
///
/// Returns [`ReducerError::UnknownApp`] when an open request names an unregistered app. The
/// state is untouched in that case.
pub fn reduce_desktop(
    state: &mut DesktopState,
    registry: &AppRegistry,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::OpenWindow(req) => {
            let Some(app) = registry.get(req.app_id.as_str()) else {
                return Err(ReducerError::UnknownApp(req.app_id.to_string()));
            };

            if let Some(existing) = state.visible_window_for_app(&req.app_id) {
                let window_id = existing.id.clone();
                if raise_and_activate(state, &window_id) {
                    effects.push(RuntimeEffect::PersistLayout);
                    effects.push(RuntimeEffect::FocusWindowInput(window_id));
                }
                return Ok(effects);
            }

            let seq = next_free_sequence(state);
            state.next_window_seq = seq.saturating_add(1);
            let window_id = WindowId::for_app(&req.app_id, seq);
            let (x, y) = cascade_origin(state.windows.len());
            let z_index = claim_top_z_index(state);
            let record = WindowRecord {
                id: window_id.clone(),
                app_id: app.app_id.clone(),
                title: app.display_name.clone(),
                icon_id: app.icon_id.clone(),
                kind: app.kind,
                rect: WindowRect {
                    x,
                    y,
                    w: app.default_size.width,
                    h: app.default_size.height,
                },
                minimized: false,
                maximized: false,
                z_index,
                props: req.props,
            };
            state.windows.insert(window_id.clone(), record);
            state.active_window_id = Some(window_id.clone());
            effects.push(RuntimeEffect::PersistLayout);
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::CloseWindow { window_id } => {
            if state.windows.remove(&window_id).is_none() {
                return Ok(effects);
            }
            if state.is_active(&window_id) {
                promote_next_active(state);
            }
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::FocusWindow { window_id } => {
            if raise_and_activate(state, &window_id) {
                effects.push(RuntimeEffect::PersistLayout);
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::MinimizeWindow { window_id } => {
            let Some(window) = state.windows.get_mut(&window_id) else {
                return Ok(effects);
            };
            if window.minimized {
                return Ok(effects);
            }
            window.minimized = true;
            if state.is_active(&window_id) {
                promote_next_active(state);
            }
            effects.push(RuntimeEffect::PersistLayout);
        }
        DesktopAction::RestoreWindow { window_id } => {
            let Some(window) = state.windows.get_mut(&window_id) else {
                return Ok(effects);
            };
            let was_minimized = std::mem::replace(&mut window.minimized, false);
            let raised = raise_and_activate(state, &window_id);
            if was_minimized || raised {
                effects.push(RuntimeEffect::PersistLayout);
            }
            if raised {
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::ToggleMaximizeWindow { window_id } => {
            let Some(window) = state.windows.get_mut(&window_id) else {
                return Ok(effects);
            };
            window.maximized = !window.maximized;
            let maximized = window.maximized;
            effects.push(RuntimeEffect::PersistLayout);
            if maximized && raise_and_activate(state, &window_id) {
                effects.push(RuntimeEffect::FocusWindowInput(window_id));
            }
        }
        DesktopAction::UpdateBounds { window_id, bounds } => {
            let Some(window) = state.windows.get_mut(&window_id) else {
                return Ok(effects);
            };
            let rect = bounds.apply(window.rect);
            if rect != window.rect {
                window.rect = rect;
                effects.push(RuntimeEffect::PersistLayout);
            }
        }
        DesktopAction::HydrateLayout { state: hydrated } => {
            *state = hydrated;
            state.next_window_seq = next_free_sequence(state);
            normalize_active_window(state);
        }
    }

    Ok(effects)
}
