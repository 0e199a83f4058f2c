use std::collections::BTreeMap;

use desktop_app_contract::{AppKind, ApplicationId};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Minimum window width the interaction controller may commit.
pub const MIN_WINDOW_WIDTH: i32 = 300;
/// Minimum window height the interaction controller may commit.
pub const MIN_WINDOW_HEIGHT: i32 = 200;
/// Stacking value assigned to the first window when none are open.
pub const BASE_Z_INDEX: u32 = 10;
/// Top-left position of the first cascaded window.
pub const CASCADE_ORIGIN: i32 = 100;
/// Per-open-window offset applied to new window positions.
pub const CASCADE_STEP: i32 = 30;

/// Opaque window identifier, unique for the lifetime of the layout.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub String);

impl WindowId {
    /// Builds the id for the `seq`-th window opened for `app_id`.
    pub fn for_app(app_id: &ApplicationId, seq: u64) -> Self {
        Self(format!("win_{app_id}_{seq}"))
    }

    /// Returns the trailing numeric sequence, if the id carries one.
    pub fn sequence(&self) -> Option<u64> {
        self.0.rsplit('_').next()?.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

/// Partial geometry update; `None` fields are left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoundsPatch {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl BoundsPatch {
    pub fn position(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn size(width: i32, height: i32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn rect(rect: WindowRect) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            width: Some(rect.w),
            height: Some(rect.h),
        }
    }

    /// Merges the present fields into `rect` without any clamping.
    pub fn apply(self, rect: WindowRect) -> WindowRect {
        WindowRect {
            x: self.x.unwrap_or(rect.x),
            y: self.y.unwrap_or(rect.y),
            w: self.width.unwrap_or(rect.w),
            h: self.height.unwrap_or(rect.h),
        }
    }
}

/// How the shell should draw a window given its two independent flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPresentation {
    Normal,
    Maximized,
    /// Minimized takes precedence over maximized.
    Hidden,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowRecord {
    pub id: WindowId,
    pub app_id: ApplicationId,
    /// Copied from the registry at creation time.
    pub title: String,
    /// Re-joined from the registry, never persisted.
    pub icon_id: String,
    /// Re-joined from the registry, never persisted.
    pub kind: AppKind,
    pub rect: WindowRect,
    pub minimized: bool,
    pub maximized: bool,
    pub z_index: u32,
    /// Forwarded verbatim to the hosted app.
    pub props: Value,
}

impl WindowRecord {
    pub fn presentation(&self) -> WindowPresentation {
        if self.minimized {
            WindowPresentation::Hidden
        } else if self.maximized {
            WindowPresentation::Maximized
        } else {
            WindowPresentation::Normal
        }
    }
}

/// Process-wide window manager state: every open window plus the focused one.
#[derive(Debug, Clone, PartialEq)]
pub struct DesktopState {
    /// Keyed by id; stacking comes from `z_index`, not map order.
    pub windows: BTreeMap<WindowId, WindowRecord>,
    /// `None` only when no non-minimized window exists.
    pub active_window_id: Option<WindowId>,
    /// Sequence used for the next window id.
    pub next_window_seq: u64,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            windows: BTreeMap::new(),
            active_window_id: None,
            next_window_seq: 1,
        }
    }
}

impl DesktopState {
    pub fn window(&self, window_id: &WindowId) -> Option<&WindowRecord> {
        self.windows.get(window_id)
    }

    pub fn active_window(&self) -> Option<&WindowRecord> {
        self.active_window_id
            .as_ref()
            .and_then(|id| self.windows.get(id))
    }

    /// Windows in ascending stacking order (back to front).
    pub fn windows_by_stack(&self) -> Vec<&WindowRecord> {
        let mut windows = self.windows.values().collect::<Vec<_>>();
        windows.sort_by_key(|w| w.z_index);
        windows
    }

    /// Next stacking value: one above the current maximum, or [`BASE_Z_INDEX`] when empty.
    pub fn next_z_index(&self) -> u32 {
        self.windows
            .values()
            .map(|w| w.z_index)
            .max()
            .map_or(BASE_Z_INDEX, |z| z.saturating_add(1))
    }

    /// Highest-stacked window that is not minimized.
    pub fn top_visible_window_id(&self) -> Option<WindowId> {
        self.windows
            .values()
            .filter(|w| !w.minimized)
            .max_by_key(|w| w.z_index)
            .map(|w| w.id.clone())
    }

    /// Any window for `app_id`, preferring the highest-stacked one.
    pub fn window_for_app(&self, app_id: &ApplicationId) -> Option<&WindowRecord> {
        self.windows
            .values()
            .filter(|w| &w.app_id == app_id)
            .max_by_key(|w| w.z_index)
    }

    /// A non-minimized window for `app_id`, which blocks opening a second one.
    pub fn visible_window_for_app(&self, app_id: &ApplicationId) -> Option<&WindowRecord> {
        self.windows
            .values()
            .filter(|w| &w.app_id == app_id && !w.minimized)
            .max_by_key(|w| w.z_index)
    }

    pub fn is_active(&self, window_id: &WindowId) -> bool {
        self.active_window_id.as_ref() == Some(window_id)
    }
}

/// Request to open a window for a registry entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenWindowRequest {
    pub app_id: ApplicationId,
    pub props: Value,
}

impl OpenWindowRequest {
    pub fn new(app_id: ApplicationId) -> Self {
        Self {
            app_id,
            props: json!({}),
        }
    }

    pub fn with_props(mut self, props: Value) -> Self {
        self.props = props;
        self
    }
}
