//! Stand-in content for the built-in mini-apps.
//!
//! Each view reads only the props it understands and ignores the rest.

use desktop_app_contract::AppMountContext;
use leptos::*;
use serde_json::Value;

fn prop_str<'a>(props: &'a Value, key: &str) -> Option<&'a str> {
    props.get(key).and_then(Value::as_str)
}

fn props_summary(props: &Value) -> Option<String> {
    match props {
        Value::Object(map) if map.is_empty() => None,
        Value::Null => None,
        other => serde_json::to_string_pretty(other).ok(),
    }
}

#[component]
fn PlaceholderFrame(
    shell_class: &'static str,
    heading: &'static str,
    context: AppMountContext,
    children: Children,
) -> impl IntoView {
    let summary = props_summary(&context.props);
    view! {
        <div class=format!("app-shell {shell_class}") data-window-id=context.window_id.clone()>
            <p><strong>{heading}</strong></p>
            {children()}
            {summary.map(|raw| view! {
                <details class="app-props">
                    <summary>"Launch props"</summary>
                    <pre>{raw}</pre>
                </details>
            })}
        </div>
    }
}

pub(super) fn mount_file_manager_app(context: AppMountContext) -> View {
    let path = prop_str(&context.props, "path").unwrap_or("/").to_string();
    view! {
        <PlaceholderFrame shell_class="app-file-manager" heading="File Manager" context=context>
            <div class="app-toolbar" role="group" aria-label="File manager controls">
                <button type="button" class="app-action">"Up"</button>
                <button type="button" class="app-action">"New Folder"</button>
            </div>
            <p class="app-path">{path}</p>
        </PlaceholderFrame>
    }
    .into_view()
}

pub(super) fn mount_photo_manager_app(context: AppMountContext) -> View {
    let album = prop_str(&context.props, "album")
        .unwrap_or("All Photos")
        .to_string();
    view! {
        <PlaceholderFrame shell_class="app-photo-manager" heading="Photo Manager" context=context>
            <p>{album}</p>
            <div class="app-photo-grid" aria-hidden="true">
                {(0..6).map(|_| view! { <div class="app-photo-tile"></div> }).collect_view()}
            </div>
        </PlaceholderFrame>
    }
    .into_view()
}

pub(super) fn mount_terminal_app(context: AppMountContext) -> View {
    let cwd = prop_str(&context.props, "cwd").unwrap_or("~").to_string();
    view! {
        <PlaceholderFrame shell_class="app-terminal" heading="Terminal" context=context>
            <pre class="app-terminal-output">{format!("guest@selfos:{cwd}$ ")}</pre>
            <input class="app-terminal-input" type="text" aria-label="Command input" />
        </PlaceholderFrame>
    }
    .into_view()
}

pub(super) fn mount_ai_hub_app(context: AppMountContext) -> View {
    view! {
        <PlaceholderFrame shell_class="app-ai-hub" heading="AI Hub" context=context>
            <p>"Ask a question to get started."</p>
            <textarea class="app-ai-input" aria-label="Message"></textarea>
            <button type="button" class="app-action">"Send"</button>
        </PlaceholderFrame>
    }
    .into_view()
}

pub(super) fn mount_security_suite_app(context: AppMountContext) -> View {
    let target = prop_str(&context.props, "target")
        .unwrap_or("localhost")
        .to_string();
    view! {
        <PlaceholderFrame shell_class="app-security-suite" heading="Cybersecurity Suite" context=context>
            <div class="app-toolbar" role="group" aria-label="Scan controls">
                <button type="button" class="app-action">"Start Scan"</button>
            </div>
            <div class="app-statusbar">
                <span>{format!("Target: {target}")}</span>
                <span>"Status: idle"</span>
            </div>
        </PlaceholderFrame>
    }
    .into_view()
}
