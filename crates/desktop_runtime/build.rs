use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const MIN_DEFAULT_WIDTH: i32 = 300;
const MIN_DEFAULT_HEIGHT: i32 = 200;
const KNOWN_KINDS: [&str; 6] = [
    "launcher",
    "file-manager",
    "photo-manager",
    "terminal",
    "ai-hub",
    "cybersecurity-suite",
];
const KNOWN_CATEGORIES: [&str; 4] = ["Utilities", "Security", "Media", "AI"];

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WindowDefaults {
    width: i32,
    height: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppEntry {
    app_id: String,
    display_name: String,
    icon_id: String,
    category: String,
    kind: String,
    #[serde(default)]
    show_in_dock: bool,
    default_size: WindowDefaults,
}

#[derive(Debug, Deserialize)]
struct RegistryManifest {
    schema_version: u32,
    apps: Vec<AppEntry>,
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("app_registry.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let manifest: RegistryManifest = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if manifest.schema_version != 1 {
        panic!(
            "registry schema mismatch in {}: expected 1 found {}",
            path.display(),
            manifest.schema_version
        );
    }

    let mut seen = HashSet::new();
    for entry in &manifest.apps {
        if !seen.insert(entry.app_id.clone()) {
            panic!("duplicate app id `{}` in {}", entry.app_id, path.display());
        }
        if !KNOWN_KINDS.contains(&entry.kind.as_str()) {
            panic!("app `{}` declares unknown kind `{}`", entry.app_id, entry.kind);
        }
        if !KNOWN_CATEGORIES.contains(&entry.category.as_str()) {
            panic!(
                "app `{}` declares unknown category `{}`",
                entry.app_id, entry.category
            );
        }
        if entry.default_size.width < MIN_DEFAULT_WIDTH
            || entry.default_size.height < MIN_DEFAULT_HEIGHT
        {
            panic!(
                "app `{}` default size {}x{} is below the {}x{} window floor",
                entry.app_id,
                entry.default_size.width,
                entry.default_size.height,
                MIN_DEFAULT_WIDTH,
                MIN_DEFAULT_HEIGHT
            );
        }
    }

    let json =
        serde_json::to_string_pretty(&manifest.apps).expect("serialize app registry catalog");
    let generated = format!(
        "/// Build-time generated application registry catalog JSON, in declaration order.\n\
pub const APP_REGISTRY_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("app_registry_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
