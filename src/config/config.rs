use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::data::data_view::TableOptions;
use crate::state::table_state::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub table: TableConfig,
    pub display: DisplayConfig,
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Rows per page
    pub page_size: usize,

    /// Show the search box and apply the search query
    pub searchable: bool,

    /// Placeholder text for the search box
    pub search_placeholder: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use Unicode glyphs for sort indicators (▲/▼ instead of ^/v)
    pub use_glyphs: bool,

    /// Text shown for empty cells
    pub null_display: String,

    /// Show the source row number next to each row
    pub show_row_numbers: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Keep history for the interactive mode
    pub enable_history: bool,

    /// Maximum history entries
    pub max_history_entries: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            searchable: true,
            search_placeholder: "Search...".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            use_glyphs: true,
            null_display: String::new(),
            show_row_numbers: false,
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            enable_history: true,
            max_history_entries: 1000,
        }
    }
}

impl From<&TableConfig> for TableOptions {
    fn from(config: &TableConfig) -> Self {
        TableOptions {
            searchable: config.searchable,
            search_placeholder: config.search_placeholder.clone(),
            page_size: config.page_size.max(1),
        }
    }
}

impl Config {
    /// Load config from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            // Create default config if it doesn't exist
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save config to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("record-table").join("config.toml"))
    }

    /// Table options derived from the `[table]` section
    pub fn table_options(&self) -> TableOptions {
        TableOptions::from(&self.table)
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        format!(
            r#"# Record Table Configuration File
# Location: ~/.config/record-table/config.toml (Linux)
#           ~/Library/Application Support/record-table/config.toml (macOS)
#           %APPDATA%\record-table\config.toml (Windows)

[table]
# Rows shown per page
page_size = {page_size}

# Show the search box; when false any search text is ignored
searchable = true

# Placeholder text for the search box
search_placeholder = "Search..."

[display]
# Use Unicode glyphs for sort indicators (set to false for ASCII ^ and v)
use_glyphs = true

# Text shown for empty/null cells
null_display = ""

# Show the source row number next to each row
show_row_numbers = false

[behavior]
# Keep a history of interactive commands
enable_history = true

# Maximum number of history entries to keep
max_history_entries = 1000
"#,
            page_size = DEFAULT_PAGE_SIZE
        )
    }
}
