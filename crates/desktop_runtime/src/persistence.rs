//! Persistence Adapter: window layout <-> JSON document stored through [`PrefsStore`].
//!
//! Only window chrome state is stored. Icons and content kinds are re-joined from the
//! [`AppRegistry`] on load, so a stored window whose app is no longer registered is dropped.

use std::collections::BTreeMap;

use desktop_app_contract::ApplicationId;
use leptos::logging;
use platform_host::PrefsStore;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::{
    apps::AppRegistry,
    model::{DesktopState, WindowId, WindowRecord, WindowRect},
    window_manager::{compact_stacking, next_free_sequence, normalize_active_window},
};

/// Storage key of the window layout document.
pub const WINDOW_LAYOUT_KEY: &str = "selfos-window-manager-storage";

fn empty_props() -> Value {
    json!({})
}

// Stored geometry may be fractional or out of range; it is rounded and saturated.
fn rounded_i32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    f64::deserialize(deserializer).map(|value| value.round() as i32)
}

fn rounded_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    f64::deserialize(deserializer).map(|value| value.round() as u32)
}

/// One stored window entry. The map key that holds it is the window id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedWindow {
    pub app_id: ApplicationId,
    pub title: String,
    #[serde(deserialize_with = "rounded_i32")]
    pub x: i32,
    #[serde(deserialize_with = "rounded_i32")]
    pub y: i32,
    #[serde(deserialize_with = "rounded_i32")]
    pub width: i32,
    #[serde(deserialize_with = "rounded_i32")]
    pub height: i32,
    pub is_minimized: bool,
    pub is_maximized: bool,
    #[serde(deserialize_with = "rounded_u32")]
    pub z_index: u32,
    #[serde(default = "empty_props")]
    pub props: Value,
}

impl From<&WindowRecord> for PersistedWindow {
    fn from(window: &WindowRecord) -> Self {
        Self {
            app_id: window.app_id.clone(),
            title: window.title.clone(),
            x: window.rect.x,
            y: window.rect.y,
            width: window.rect.w,
            height: window.rect.h,
            is_minimized: window.minimized,
            is_maximized: window.maximized,
            z_index: window.z_index,
            props: window.props.clone(),
        }
    }
}

/// Stored layout document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDocument {
    pub windows: BTreeMap<String, PersistedWindow>,
    pub active_window_id: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reasons the whole stored document is discarded.
pub enum LayoutDecodeError {
    #[error("layout document is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("layout document is not a JSON object")]
    NotAnObject,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reasons a single stored window entry is dropped while the rest are kept.
pub enum LayoutEntryError {
    #[error("window `{window_id}` is malformed: {reason}")]
    Malformed { window_id: String, reason: String },
    #[error("window `{window_id}` names unregistered app `{app_id}`")]
    UnknownApp { window_id: String, app_id: String },
}

/// Result of decoding a stored layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutRestore {
    pub state: DesktopState,
    /// Entries that were skipped.
    pub dropped: Vec<LayoutEntryError>,
}

/// Builds the stored document for `state`.
pub fn encode_layout(state: &DesktopState) -> LayoutDocument {
    LayoutDocument {
        windows: state
            .windows
            .iter()
            .map(|(id, window)| (id.to_string(), PersistedWindow::from(window)))
            .collect(),
        active_window_id: state.active_window_id.as_ref().map(ToString::to_string),
    }
}

/// Serializes `state` to the stored JSON text.
pub fn layout_to_json(state: &DesktopState) -> Result<String, serde_json::Error> {
    serde_json::to_string(&encode_layout(state))
}

/// Decodes stored JSON text entry by entry.
///
/// Also accepts the older `{"state": {...}, "version": n}` envelope written by earlier builds.
///
/// # Errors
///
/// Fails only when the text is not JSON or the document is not an object. Bad window entries
/// are reported in [`LayoutRestore::dropped`] instead.
pub fn decode_layout(
    raw: &str,
    registry: &AppRegistry,
) -> Result<LayoutRestore, LayoutDecodeError> {
    let document: Value =
        serde_json::from_str(raw).map_err(|err| LayoutDecodeError::InvalidJson(err.to_string()))?;
    let document = unwrap_legacy_envelope(document);
    let Value::Object(mut document) = document else {
        return Err(LayoutDecodeError::NotAnObject);
    };

    let mut state = DesktopState::default();
    let mut dropped = Vec::new();

    if let Some(Value::Object(windows)) = document.remove("windows") {
        for (key, entry) in windows {
            match decode_window(key, entry, registry) {
                Ok(window) => {
                    state.windows.insert(window.id.clone(), window);
                }
                Err(err) => dropped.push(err),
            }
        }
    }
    compact_stacking(&mut state);

    state.active_window_id = document
        .get("activeWindowId")
        .and_then(Value::as_str)
        .map(|id| WindowId(id.to_string()));
    normalize_active_window(&mut state);
    state.next_window_seq = next_free_sequence(&state);

    Ok(LayoutRestore { state, dropped })
}

fn unwrap_legacy_envelope(document: Value) -> Value {
    match document {
        Value::Object(mut outer)
            if outer.contains_key("version")
                && !outer.contains_key("windows")
                && matches!(outer.get("state"), Some(Value::Object(_))) =>
        {
            outer.remove("state").unwrap_or(Value::Object(Map::new()))
        }
        other => other,
    }
}

fn decode_window(
    key: String,
    entry: Value,
    registry: &AppRegistry,
) -> Result<WindowRecord, LayoutEntryError> {
    let stored = serde_json::from_value::<PersistedWindow>(entry).map_err(|err| {
        LayoutEntryError::Malformed {
            window_id: key.clone(),
            reason: err.to_string(),
        }
    })?;
    let Some(app) = registry.get(stored.app_id.as_str()) else {
        return Err(LayoutEntryError::UnknownApp {
            window_id: key,
            app_id: stored.app_id.to_string(),
        });
    };

    Ok(WindowRecord {
        id: WindowId(key),
        app_id: stored.app_id,
        title: stored.title,
        icon_id: app.icon_id.clone(),
        kind: app.kind,
        rect: WindowRect {
            x: stored.x,
            y: stored.y,
            w: stored.width,
            h: stored.height,
        },
        minimized: stored.is_minimized,
        maximized: stored.is_maximized,
        z_index: stored.z_index,
        props: stored.props,
    })
}

/// Loads the stored layout, logging and recovering from every failure.
///
/// Returns `None` when nothing usable is stored.
pub async fn load_layout_with<S: PrefsStore + ?Sized>(
    store: &S,
    registry: &AppRegistry,
) -> Option<DesktopState> {
    let raw = match store.load_pref(WINDOW_LAYOUT_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            logging::warn!("window layout load failed: {err}");
            return None;
        }
    };

    match decode_layout(&raw, registry) {
        Ok(restore) => {
            for dropped in &restore.dropped {
                logging::warn!("dropping persisted {dropped}");
            }
            Some(restore.state)
        }
        Err(err) => {
            logging::warn!("discarding persisted window layout: {err}");
            None
        }
    }
}

/// Writes the layout for `state`.
///
/// # Errors
///
/// Returns the serializer or store error text.
pub async fn persist_layout_with<S: PrefsStore + ?Sized>(
    store: &S,
    state: &DesktopState,
) -> Result<(), String> {
    let raw = layout_to_json(state).map_err(|err| err.to_string())?;
    store.save_pref(WINDOW_LAYOUT_KEY, &raw).await
}
