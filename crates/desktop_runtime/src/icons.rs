//! Shell icon catalog.
//!
//! Registry entries name their icon with an opaque `icon_id`; [`IconName::from_icon_id`] resolves
//! it here so components never embed raw SVG. Unknown ids fall back to a generic app tile.

use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Semantic icon identifiers used by shell components.
pub enum IconName {
    /// Launcher grid.
    Grid,
    Folder,
    Image,
    TerminalSquare,
    Bot,
    ShieldCheck,
    /// Fallback for icon ids the catalog does not know.
    AppTile,
    WindowMinimize,
    WindowMaximize,
    WindowRestore,
    WindowClose,
}

impl IconName {
    /// Resolves a registry `icon_id`.
    pub fn from_icon_id(icon_id: &str) -> Self {
        match icon_id {
            "grid" => Self::Grid,
            "folder" => Self::Folder,
            "image" => Self::Image,
            "terminal-square" => Self::TerminalSquare,
            "bot" => Self::Bot,
            "shield-check" => Self::ShieldCheck,
            _ => Self::AppTile,
        }
    }

    /// Stable token used for CSS hooks.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Folder => "folder",
            Self::Image => "image",
            Self::TerminalSquare => "terminal-square",
            Self::Bot => "bot",
            Self::ShieldCheck => "shield-check",
            Self::AppTile => "app-tile",
            Self::WindowMinimize => "window-minimize",
            Self::WindowMaximize => "window-maximize",
            Self::WindowRestore => "window-restore",
            Self::WindowClose => "window-close",
        }
    }

    // Stroke-only shapes on a 24px grid.
    fn svg_body(self) -> &'static str {
        match self {
            Self::Grid => {
                r#"<rect x="3.5" y="3.5" width="7" height="7" rx="1.5"/><rect x="13.5" y="3.5" width="7" height="7" rx="1.5"/><rect x="3.5" y="13.5" width="7" height="7" rx="1.5"/><rect x="13.5" y="13.5" width="7" height="7" rx="1.5"/>"#
            }
            Self::Folder => {
                r#"<path d="M3 6.5A1.5 1.5 0 0 1 4.5 5H9l2 2h8.5A1.5 1.5 0 0 1 21 8.5v9a1.5 1.5 0 0 1-1.5 1.5h-15A1.5 1.5 0 0 1 3 17.5Z"/>"#
            }
            Self::Image => {
                r#"<rect x="3" y="4" width="18" height="16" rx="2"/><circle cx="9" cy="9.5" r="1.75"/><path d="m21 15.5-4.5-4.5L6 20"/>"#
            }
            Self::TerminalSquare => {
                r#"<rect x="3" y="3" width="18" height="18" rx="2"/><path d="m7.5 9 3 3-3 3"/><path d="M13 15h4"/>"#
            }
            Self::Bot => {
                r#"<rect x="4.5" y="8" width="15" height="11.5" rx="2.5"/><path d="M12 4.5V8"/><circle cx="12" cy="3.75" r="0.75"/><path d="M9 13v1.5"/><path d="M15 13v1.5"/><path d="M2.5 13.5h2"/><path d="M19.5 13.5h2"/>"#
            }
            Self::ShieldCheck => {
                r#"<path d="M12 3 5 6v5.5c0 4.3 2.9 7.7 7 9.5 4.1-1.8 7-5.2 7-9.5V6Z"/><path d="m9 12 2 2 4-4"/>"#
            }
            Self::AppTile => r#"<rect x="4" y="4" width="16" height="16" rx="3.5"/>"#,
            Self::WindowMinimize => r#"<path d="M5 12.5h14"/>"#,
            Self::WindowMaximize => r#"<rect x="5" y="5" width="14" height="14" rx="1.5"/>"#,
            Self::WindowRestore => {
                r#"<rect x="4.5" y="8.5" width="11" height="11" rx="1.5"/><path d="M8.5 5.5h8.5a1.5 1.5 0 0 1 1.5 1.5v8.5"/>"#
            }
            Self::WindowClose => r#"<path d="m6 6 12 12"/><path d="M18 6 6 18"/>"#,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconSize {
    /// Window chrome controls.
    Xs,
    /// Title bars.
    #[default]
    Sm,
    /// Dock buttons.
    Md,
    /// Launcher tiles.
    Lg,
}

impl IconSize {
    pub const fn px(self) -> u16 {
        match self {
            Self::Xs => 12,
            Self::Sm => 16,
            Self::Md => 24,
            Self::Lg => 40,
        }
    }
}

#[component]
/// Renders an icon from the shell catalog.
pub fn ShellIcon(
    icon: IconName,
    #[prop(default = IconSize::Sm)] size: IconSize,
) -> impl IntoView {
    let size_px = size.px().to_string();

    view! {
        <svg
            class="shell-icon"
            data-icon=icon.token()
            xmlns="http://www.w3.org/2000/svg"
            viewBox="0 0 24 24"
            width=size_px.clone()
            height=size_px
            fill="none"
            stroke="currentColor"
            stroke-width="1.75"
            stroke-linecap="round"
            stroke-linejoin="round"
            focusable="false"
            aria-hidden="true"
            inner_html=icon.svg_body()
        />
    }
}
