use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub diff: DiffConfig,
}

/// [display] section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub line_numbers: bool,
}

/// [sync] section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Couple horizontal scrolling between the panes as well as vertical
    #[serde(default)]
    pub columns: bool,
}

/// [diff] section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Context lines passed to git diff (-U<n>)
    #[serde(default)]
    pub context_lines: usize,
}

fn default_true() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { line_numbers: true }
    }
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self { context_lines: 0 }
    }
}

/// Load config by merging global defaults with per-repo overrides.
/// Priority: per-repo `.ddiff.toml` > global `~/.config/ddiff/config.toml`
/// > built-in defaults. Merging is deep: individual fields within sections
/// override independently.
pub fn load_config(repo_root: &str) -> Config {
    let local_path = format!("{repo_root}/.ddiff.toml");
    let global_path = dirs::config_dir()
        .map(|d| d.join("ddiff/config.toml").to_string_lossy().to_string());

    let global_table = global_path
        .and_then(|p| std::fs::read_to_string(p).ok())
        .and_then(|c| c.parse::<toml::Value>().ok())
        .and_then(|v| match v {
            toml::Value::Table(t) => Some(t),
            _ => None,
        });

    let local_table = std::fs::read_to_string(&local_path)
        .ok()
        .and_then(|c| c.parse::<toml::Value>().ok())
        .and_then(|v| match v {
            toml::Value::Table(t) => Some(t),
            _ => None,
        });

    let merged = match (global_table, local_table) {
        (Some(mut global), Some(local)) => {
            deep_merge(&mut global, local);
            toml::Value::Table(global)
        }
        (Some(global), None) => toml::Value::Table(global),
        (None, Some(local)) => toml::Value::Table(local),
        (None, None) => return Config::default(),
    };

    merged.try_into().unwrap_or_default()
}

/// Recursively merge `overlay` into `base`. Overlay values win; nested
/// tables are merged recursively.
fn deep_merge(
    base: &mut toml::map::Map<String, toml::Value>,
    overlay: toml::map::Map<String, toml::Value>,
) {
    for (key, value) in overlay {
        match (base.get_mut(&key), &value) {
            (Some(toml::Value::Table(base_table)), toml::Value::Table(overlay_table)) => {
                deep_merge(base_table, overlay_table.clone());
            }
            _ => {
                base.insert(key, value);
            }
        }
    }
}
