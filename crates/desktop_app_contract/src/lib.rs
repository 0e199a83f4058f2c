//! Shared contract types between the desktop window manager runtime and hosted apps.
//!
//! The window manager only ever reads [`AppRegistration`] values; it threads each window's opaque
//! `props` payload into the app's [`AppModule`] without inspecting it.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use leptos::View;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable identifier for a runtime-managed window, as passed to mounted apps.
pub type WindowRuntimeId = String;

/// Stable identifier for a registered application (`terminal`, `fileManager`, ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Returns an app identifier when `raw` is a lower-camel-case ASCII identifier.
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_application_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!(
                "invalid application id `{raw}`; expected a lower-camel-case identifier"
            ))
        }
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creates an id without validation for trusted constants and persisted payloads.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ApplicationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn is_valid_application_id(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    match bytes.first() {
        Some(first) if first.is_ascii_lowercase() => {}
        _ => return false,
    }
    raw.len() <= 64 && bytes.iter().all(u8::is_ascii_alphanumeric)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Launcher grouping for a registered application.
pub enum AppCategory {
    /// General desktop utilities.
    Utilities,
    /// Security tooling.
    Security,
    /// Photo and media apps.
    Media,
    /// Assistant/chat apps.
    #[serde(rename = "AI")]
    Ai,
}

impl AppCategory {
    /// Returns the display label used by launcher surfaces.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Utilities => "Utilities",
            Self::Security => "Security",
            Self::Media => "Media",
            Self::Ai => "AI",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Default window size declared by an application.
pub struct WindowSize {
    /// Width in CSS pixels.
    pub width: i32,
    /// Height in CSS pixels.
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Content handle for a registered application.
///
/// Each kind resolves to exactly one [`AppModule`] in the runtime; only the kind is ever stored
/// on a window, never the module itself.
pub enum AppKind {
    /// Grid of every registered application.
    Launcher,
    /// Virtual file browser.
    FileManager,
    /// Photo gallery.
    PhotoManager,
    /// Command terminal.
    Terminal,
    /// Chat assistant.
    AiHub,
    /// Security scan dashboard.
    CybersecuritySuite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Manifest-backed registration metadata for an application registry entry.
pub struct AppRegistration {
    /// Registry key.
    pub app_id: ApplicationId,
    /// Human-readable name, copied into each window title at creation time.
    pub display_name: String,
    /// Opaque icon reference resolved by the shell's icon set.
    pub icon_id: String,
    /// Geometry assigned to freshly opened windows.
    pub default_size: WindowSize,
    /// Launcher grouping.
    pub category: AppCategory,
    /// Content handle.
    pub kind: AppKind,
    /// Whether the dock shows a button for this app.
    #[serde(default)]
    pub show_in_dock: bool,
}

#[derive(Debug, Clone)]
/// Mount context injected by the desktop runtime per window instance.
pub struct AppMountContext {
    /// Registry key of the mounted app.
    pub app_id: ApplicationId,
    /// Runtime window id hosting the app.
    pub window_id: WindowRuntimeId,
    /// Opaque props supplied at open time, forwarded verbatim.
    pub props: Value,
}

/// Static app mount function used by the runtime registry.
pub type AppMountFn = fn(AppMountContext) -> View;

#[derive(Debug, Clone, Copy)]
/// Mountable app module: the uniform "renders given props" capability of every [`AppKind`].
pub struct AppModule {
    mount_fn: AppMountFn,
}

impl AppModule {
    /// Creates a module from a mount function.
    pub const fn new(mount_fn: AppMountFn) -> Self {
        Self { mount_fn }
    }

    /// Mounts the app view with a runtime-provided context.
    pub fn mount(self, context: AppMountContext) -> View {
        (self.mount_fn)(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_id_requires_lower_camel_case() {
        assert!(ApplicationId::new("terminal").is_ok());
        assert!(ApplicationId::new("cybersecuritySuite").is_ok());
        assert!(ApplicationId::new("aiHub2").is_ok());
        assert!(ApplicationId::new("").is_err());
        assert!(ApplicationId::new("Terminal").is_err());
        assert!(ApplicationId::new("file-manager").is_err());
        assert!(ApplicationId::new("system.calc").is_err());
        assert!(ApplicationId::new("a".repeat(65)).is_err());
    }

    #[test]
    fn registration_decodes_manifest_shaped_json() {
        let raw = r#"{
            "app_id": "aiHub",
            "display_name": "AI Hub",
            "icon_id": "bot",
            "default_size": { "width": 500, "height": 700 },
            "category": "AI",
            "kind": "ai-hub"
        }"#;
        let registration: AppRegistration = serde_json::from_str(raw).expect("decode");
        assert_eq!(registration.app_id.as_str(), "aiHub");
        assert_eq!(registration.category, AppCategory::Ai);
        assert_eq!(registration.kind, AppKind::AiHub);
        assert!(!registration.show_in_dock);
        assert_eq!(registration.category.label(), "AI");
    }
}
