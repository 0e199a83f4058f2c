//! Window-manager transition helpers shared by the reducer and boot hydration.

use crate::model::{DesktopState, WindowId, BASE_Z_INDEX, CASCADE_ORIGIN, CASCADE_STEP};

/// Position for a new window given how many windows are open right now.
pub fn cascade_origin(open_windows: usize) -> (i32, i32) {
    let step = i32::try_from(open_windows)
        .unwrap_or(i32::MAX)
        .saturating_mul(CASCADE_STEP);
    let offset = CASCADE_ORIGIN.saturating_add(step);
    (offset, offset)
}

/// Raises `window_id` to a fresh top stacking value and makes it active.
///
/// Returns `false` (and changes nothing) when the window is absent, minimized, or already active.
pub fn raise_and_activate(state: &mut DesktopState, window_id: &WindowId) -> bool {
    let raisable = state
        .window(window_id)
        .is_some_and(|window| !window.minimized);
    if !raisable || state.is_active(window_id) {
        return false;
    }
    let z_index = claim_top_z_index(state);
    let Some(window) = state.windows.get_mut(window_id) else {
        return false;
    };
    window.z_index = z_index;
    state.active_window_id = Some(window_id.clone());
    true
}

/// Renumbers stacking values from [`BASE_Z_INDEX`], keeping back-to-front order.
///
/// Equal values are ordered by window id, so every window ends up with its own value.
pub fn compact_stacking(state: &mut DesktopState) {
    let mut order = state
        .windows
        .values()
        .map(|window| (window.z_index, window.id.clone()))
        .collect::<Vec<_>>();
    order.sort();
    for (z_index, (_, window_id)) in (BASE_Z_INDEX..).zip(order) {
        if let Some(window) = state.windows.get_mut(&window_id) {
            window.z_index = z_index;
        }
    }
}

/// Next top stacking value. Compacts first when a window already sits at the ceiling.
pub fn claim_top_z_index(state: &mut DesktopState) -> u32 {
    if state.windows.values().any(|window| window.z_index == u32::MAX) {
        compact_stacking(state);
    }
    state.next_z_index()
}

/// Hands focus to the highest-stacked non-minimized window, or clears it.
pub fn promote_next_active(state: &mut DesktopState) {
    state.active_window_id = state.top_visible_window_id();
}

/// Restores the active-window invariant after a bulk state replacement.
///
/// Keeps the current active id when it still names a visible window.
pub fn normalize_active_window(state: &mut DesktopState) {
    let keep = state
        .active_window()
        .map(|window| !window.minimized)
        .unwrap_or(false);
    if !keep {
        promote_next_active(state);
    }
}

/// Next window sequence that cannot collide with any id already in `state`.
pub fn next_free_sequence(state: &DesktopState) -> u64 {
    let highest = state
        .windows
        .keys()
        .filter_map(WindowId::sequence)
        .max()
        .unwrap_or(0);
    highest
        .saturating_add(1)
        .max(state.next_window_seq)
        .max(state.windows.len() as u64 + 1)
}

#[cfg(test)]
pub(crate) mod test_support {
    use desktop_app_contract::{AppKind, ApplicationId};
    use serde_json::json;

    use crate::model::{DesktopState, WindowId, WindowRecord, WindowRect};

    /// Inserts a bare window record, bypassing the reducer.
    pub fn insert_window(state: &mut DesktopState, id: &str, z_index: u32, minimized: bool) {
        let id = WindowId(id.to_string());
        state.windows.insert(
            id.clone(),
            WindowRecord {
                id,
                app_id: ApplicationId::trusted("terminal"),
                title: "Terminal".to_string(),
                icon_id: "terminal-square".to_string(),
                kind: AppKind::Terminal,
                rect: WindowRect {
                    x: 100,
                    y: 100,
                    w: 700,
                    h: 450,
                },
                minimized,
                maximized: false,
                z_index,
                props: json!({}),
            },
        );
    }

    /// Checks the active-window and unique-stacking invariants.
    pub fn assert_invariants(state: &DesktopState) {
        match &state.active_window_id {
            Some(id) => {
                let window = state
                    .windows
                    .get(id)
                    .unwrap_or_else(|| panic!("active window {id} is not open"));
                assert!(!window.minimized, "active window {id} is minimized");
            }
            None => assert!(
                state.windows.values().all(|w| w.minimized),
                "no active window while a visible window exists"
            ),
        }
        let mut z = state.windows.values().map(|w| w.z_index).collect::<Vec<_>>();
        let total = z.len();
        z.sort_unstable();
        z.dedup();
        assert_eq!(z.len(), total, "z-index values must be unique");
    }
}
