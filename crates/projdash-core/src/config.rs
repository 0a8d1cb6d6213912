use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::columns::ColumnSelection;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Projects JSON file; relative paths resolve against `data_dir`
    #[serde(default = "default_projects_file")]
    pub projects_file: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            projects_file: default_projects_file(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Row entrance animation
    #[serde(default)]
    pub motion: MotionConfig,
    /// Project table
    #[serde(default)]
    pub table: TableConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            theme: ThemeConfig::default(),
            motion: MotionConfig::default(),
            table: TableConfig::default(),
        }
    }
}

/// Easing curve for row entrance transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EasingType {
    /// Jump straight to the settled state
    None,
    Linear,
    /// 1 - (1-t)^3
    #[default]
    Cubic,
    /// 1 - (1-t)^5
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

/// Row entrance animation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Play entrance animations at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Honor a reduced-motion preference: rows appear settled
    #[serde(default)]
    pub reduced_motion: bool,
    /// Delay added per row index
    #[serde(default = "default_stagger_ms")]
    pub stagger_ms: u64,
    /// Duration of a single row's transition
    #[serde(default = "default_motion_duration")]
    pub duration_ms: u64,
    /// Horizontal offset (columns) a row starts from
    #[serde(default = "default_offset_cols")]
    pub offset_cols: u16,
    #[serde(default)]
    pub easing: EasingType,
    /// Frame rate while rows are entering
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            reduced_motion: false,
            stagger_ms: default_stagger_ms(),
            duration_ms: default_motion_duration(),
            offset_cols: default_offset_cols(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Column keys shown at startup; unknown keys are ignored
    #[serde(default = "default_visible_columns")]
    pub visible_columns: Vec<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            visible_columns: default_visible_columns(),
        }
    }
}

impl TableConfig {
    pub fn selection(&self) -> ColumnSelection {
        ColumnSelection::from_keys(&self.visible_columns)
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "gruvbox-dark", "nord")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Custom deserializer to accept either a string or a struct
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a theme name or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

fn default_theme_name() -> String {
    "gruvbox-dark".to_string()
}

/// Optional color overrides, each a hex string ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    pub bg0: Option<String>,
    pub fg0: Option<String>,
    pub accent: Option<String>,
    pub selection: Option<String>,
    /// Link text color
    pub link: Option<String>,
    /// Active badge
    pub positive: Option<String>,
    /// In-progress badge
    pub caution: Option<String>,
    /// On-hold badge
    pub negative: Option<String>,
    /// Unrecognized status badge
    pub neutral: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-j>" (Ctrl+j), "G" (Shift+g), "<CR>" (Enter), "<Esc>", "<Tab>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default = "default_key_quit")]
    pub quit: String,
    #[serde(default = "default_key_move_down")]
    pub move_down: String,
    #[serde(default = "default_key_move_up")]
    pub move_up: String,
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,
    /// Open/close the column picker
    #[serde(default = "default_key_column_picker")]
    pub column_picker: String,
    /// Show every column again
    #[serde(default = "default_key_show_all_columns")]
    pub show_all_columns: String,
    /// Filter rows by name, team or stack
    #[serde(default = "default_key_filter")]
    pub filter: String,
    /// Open the selected repository in the browser
    #[serde(default = "default_key_open_repository")]
    pub open_repository: String,
    /// Toggle entrance animations
    #[serde(default = "default_key_toggle_motion")]
    pub toggle_motion: String,
    /// Reload the projects file
    #[serde(default = "default_key_reload")]
    pub reload: String,
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            move_down: default_key_move_down(),
            move_up: default_key_move_up(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
            column_picker: default_key_column_picker(),
            show_all_columns: default_key_show_all_columns(),
            filter: default_key_filter(),
            open_repository: default_key_open_repository(),
            toggle_motion: default_key_toggle_motion(),
            reload: default_key_reload(),
            help: default_key_help(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_move_down() -> String { "j".to_string() }
fn default_key_move_up() -> String { "k".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }
fn default_key_column_picker() -> String { "c".to_string() }
fn default_key_show_all_columns() -> String { "a".to_string() }
fn default_key_filter() -> String { "/".to_string() }
fn default_key_open_repository() -> String { "o".to_string() }
fn default_key_toggle_motion() -> String { "m".to_string() }
fn default_key_reload() -> String { "r".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("projdash")
}

fn default_projects_file() -> PathBuf {
    PathBuf::from("projects.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    250
}

fn default_stagger_ms() -> u64 {
    50
}

fn default_motion_duration() -> u64 {
    300
}

fn default_offset_cols() -> u16 {
    2
}

fn default_animation_fps() -> u32 {
    60
}

fn default_visible_columns() -> Vec<String> {
    ["name", "repository", "team", "techStack", "createdAt", "contributors", "status"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/projdash/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("projdash")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the projects file path, resolved against the data directory
    pub fn projects_path(&self) -> PathBuf {
        let path = expand_tilde(&self.general.projects_file);
        if path.is_absolute() {
            path
        } else {
            self.data_dir().join(path)
        }
    }

    /// Get the TUI log file path
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("projdash.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::ColumnKey;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.ui.motion.stagger_ms, 50);
        assert_eq!(config.ui.motion.duration_ms, 300);
        assert!(config.ui.motion.enabled);
        assert!(!config.ui.motion.reduced_motion);
        assert_eq!(config.ui.table.selection(), ColumnSelection::all());
        assert_eq!(config.ui.theme.name, "gruvbox-dark");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [ui.motion]
            stagger_ms = 80
            easing = "quintic"

            [ui.table]
            visible_columns = ["status", "name", "bogus"]
            "#,
        )
        .unwrap();
        assert_eq!(config.ui.motion.stagger_ms, 80);
        assert_eq!(config.ui.motion.duration_ms, 300);
        assert_eq!(config.ui.motion.easing, EasingType::Quintic);

        let selection = config.ui.table.selection();
        assert_eq!(selection.len(), 2);
        assert!(selection.contains(ColumnKey::Name));
        assert!(selection.contains(ColumnKey::Status));
    }

    #[test]
    fn test_theme_as_string_or_table() {
        let config = AppConfig::from_toml("[ui]\ntheme = \"nord\"\n").unwrap();
        assert_eq!(config.ui.theme.name, "nord");

        let config = AppConfig::from_toml(
            "[ui.theme]\nname = \"dracula\"\n[ui.theme.colors]\npositive = \"#00ff00\"\n",
        )
        .unwrap();
        assert_eq!(config.ui.theme.name, "dracula");
        assert_eq!(config.ui.theme.colors.positive.as_deref(), Some("#00ff00"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(
            AppConfig::from_toml("[ui\n"),
            Err(crate::Error::Config(_))
        ));
    }

    #[test]
    fn test_projects_path_relative_to_data_dir() {
        let mut config = AppConfig::default();
        config.general.data_dir = PathBuf::from("/tmp/projdash");
        assert_eq!(config.projects_path(), PathBuf::from("/tmp/projdash/projects.json"));

        config.general.projects_file = PathBuf::from("/srv/projects.json");
        assert_eq!(config.projects_path(), PathBuf::from("/srv/projects.json"));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.ui.motion.stagger_ms, config.ui.motion.stagger_ms);
        assert_eq!(parsed.keymap.quit, "q");
    }
}
