//! Application Registry: the static catalog of launchable apps and their window content.

mod launcher;
mod placeholders;

use desktop_app_contract::{AppKind, AppModule, AppMountContext, AppRegistration};
use leptos::*;

use crate::model::WindowRecord;

include!(concat!(env!("OUT_DIR"), "/app_registry_generated.rs"));

/// Registry id of the launcher grid app.
pub const LAUNCHER_APP_ID: &str = "launcher";

/// Ordered, read-only collection of [`AppRegistration`] entries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppRegistry {
    entries: Vec<AppRegistration>,
}

impl AppRegistry {
    /// Registry built from the compiled-in manifest.
    ///
    /// A manifest that fails to decode yields an empty registry and a warning. Every open
    /// request is then rejected as unknown rather than crashing the shell.
    pub fn builtin() -> Self {
        match Self::from_catalog_json(APP_REGISTRY_CATALOG_JSON) {
            Ok(registry) => registry,
            Err(err) => {
                logging::warn!("app registry manifest is invalid: {err}");
                Self::default()
            }
        }
    }

    /// Decodes a JSON array of registrations.
    pub fn from_catalog_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Vec<AppRegistration>>(raw).map(Self::from_entries)
    }

    /// Builds a registry from explicit entries. The first entry wins on duplicate ids.
    pub fn from_entries(entries: Vec<AppRegistration>) -> Self {
        let mut kept: Vec<AppRegistration> = Vec::with_capacity(entries.len());
        for entry in entries {
            if kept.iter().any(|existing| existing.app_id == entry.app_id) {
                logging::warn!("duplicate app id `{}` ignored", entry.app_id);
                continue;
            }
            kept.push(entry);
        }
        Self { entries: kept }
    }

    pub fn get(&self, app_id: &str) -> Option<&AppRegistration> {
        self.entries
            .iter()
            .find(|entry| entry.app_id.as_str() == app_id)
    }

    pub fn contains(&self, app_id: &str) -> bool {
        self.get(app_id).is_some()
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> &[AppRegistration] {
        &self.entries
    }

    /// Entries pinned to the dock, in declaration order.
    pub fn dock_apps(&self) -> impl Iterator<Item = &AppRegistration> + '_ {
        self.entries.iter().filter(|entry| entry.show_in_dock)
    }
}

/// Content module hosted inside windows of the given kind.
pub fn app_module(kind: AppKind) -> AppModule {
    match kind {
        AppKind::Launcher => AppModule::new(launcher::mount_launcher_app),
        AppKind::FileManager => AppModule::new(placeholders::mount_file_manager_app),
        AppKind::PhotoManager => AppModule::new(placeholders::mount_photo_manager_app),
        AppKind::Terminal => AppModule::new(placeholders::mount_terminal_app),
        AppKind::AiHub => AppModule::new(placeholders::mount_ai_hub_app),
        AppKind::CybersecuritySuite => AppModule::new(placeholders::mount_security_suite_app),
    }
}

/// Mounts the content for `window`, forwarding its props unchanged.
pub fn render_window_contents(window: &WindowRecord) -> View {
    app_module(window.kind).mount(AppMountContext {
        app_id: window.app_id.clone(),
        window_id: window.id.to_string(),
        props: window.props.clone(),
    })
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::{AppCategory, ApplicationId, WindowSize};
    use pretty_assertions::assert_eq;

    use super::*;

    fn registration(app_id: &str, display_name: &str) -> AppRegistration {
        AppRegistration {
            app_id: ApplicationId::trusted(app_id),
            display_name: display_name.to_string(),
            icon_id: "grid".to_string(),
            default_size: WindowSize {
                width: 400,
                height: 300,
            },
            category: AppCategory::Utilities,
            kind: AppKind::Launcher,
            show_in_dock: false,
        }
    }

    #[test]
    fn builtin_registry_lists_the_six_apps_in_dock_order() {
        let registry = AppRegistry::builtin();
        let ids = registry
            .dock_apps()
            .map(|entry| entry.app_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            ids,
            vec![
                "launcher",
                "fileManager",
                "photoManager",
                "terminal",
                "aiHub",
                "cybersecuritySuite"
            ]
        );
    }

    #[test]
    fn builtin_registry_carries_window_defaults() {
        let registry = AppRegistry::builtin();
        let sizes = registry
            .entries()
            .iter()
            .map(|entry| {
                (
                    entry.app_id.as_str(),
                    entry.default_size.width,
                    entry.default_size.height,
                )
            })
            .collect::<Vec<_>>();
        assert_eq!(
            sizes,
            vec![
                ("launcher", 800, 600),
                ("fileManager", 800, 600),
                ("photoManager", 900, 650),
                ("terminal", 700, 450),
                ("aiHub", 500, 700),
                ("cybersecuritySuite", 1000, 700),
            ]
        );
        let security = registry.get("cybersecuritySuite").expect("security suite");
        assert_eq!(security.category, AppCategory::Security);
        assert_eq!(registry.get("aiHub").unwrap().category, AppCategory::Ai);
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        let registry = AppRegistry::builtin();
        assert!(registry.contains("terminal"));
        assert!(!registry.contains("Terminal"));
        assert!(registry.get("paint").is_none());
    }

    #[test]
    fn duplicate_ids_keep_the_first_entry() {
        let registry = AppRegistry::from_entries(vec![
            registration("notes", "First"),
            registration("notes", "Second"),
        ]);
        assert_eq!(registry.entries().len(), 1);
        assert_eq!(registry.get("notes").unwrap().display_name, "First");
    }

    #[test]
    fn malformed_catalog_is_reported() {
        assert!(AppRegistry::from_catalog_json("{\"apps\": 1}").is_err());
    }
}
