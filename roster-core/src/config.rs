//! Process-wide roster configuration.

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::choices::Choices;
use crate::error::{RosterError, RosterResult};

static DEFAULT_TABLE: &str = "schedules";
static DEFAULT_TABLE_DATE_FORMAT: &str = "%m/%d/%Y";
static DEFAULT_TIMESTAMP_FORMAT: &str = "%m/%d/%Y, %I:%M %p";

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_timezone() -> Tz {
    crate::date::DEFAULT_TIMEZONE
}

fn default_table_date_format() -> String {
    DEFAULT_TABLE_DATE_FORMAT.to_string()
}

fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

/// Configuration at ~/.config/roster/config.toml, overridable with
/// `ROSTER_*` environment variables (e.g. `ROSTER_API_KEY`).
///
/// Loaded once at startup and shared read-only (usually behind an `Arc`).
#[derive(Debug, Deserialize, Clone)]
pub struct RosterConfig {
    /// Base URL of the hosted schedule store, e.g. `https://xyz.supabase.co`
    #[serde(default)]
    pub store_url: Option<String>,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_table")]
    pub table: String,

    /// Timezone used to turn stored timestamps into civil dates for display.
    #[serde(default = "default_timezone")]
    pub timezone: Tz,

    #[serde(default = "default_table_date_format")]
    pub table_date_format: String,

    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    #[serde(default)]
    pub choices: Choices,
}

impl Default for RosterConfig {
    fn default() -> Self {
        RosterConfig {
            store_url: None,
            api_key: None,
            table: default_table(),
            timezone: default_timezone(),
            table_date_format: default_table_date_format(),
            timestamp_format: default_timestamp_format(),
            choices: Choices::default(),
        }
    }
}

impl RosterConfig {
    pub fn config_path() -> RosterResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RosterError::Config("Could not determine config directory".into()))?
            .join("roster");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default config path plus the environment.
    pub fn load() -> RosterResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path` (optional) plus the environment.
    pub fn load_from(path: &Path) -> RosterResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("ROSTER"))
            .build()
            .map_err(|e| RosterError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| RosterError::Config(e.to_string()))
    }

    /// Store URL and API key, both required to reach the remote store.
    pub fn credentials(&self) -> RosterResult<(&str, &str)> {
        let url = self.store_url.as_deref().filter(|s| !s.is_empty()).ok_or_else(|| {
            RosterError::Config(
                "No store_url configured. Set it in config.toml or ROSTER_STORE_URL".into(),
            )
        })?;
        let key = self.api_key.as_deref().filter(|s| !s.is_empty()).ok_or_else(|| {
            RosterError::Config(
                "No api_key configured. Set it in config.toml or ROSTER_API_KEY".into(),
            )
        })?;
        Ok((url, key))
    }

    /// Write a starter config at `path`. Every setting is present but
    /// commented out, so the file loads to the same values as no file.
    pub fn create_default_config(path: &Path) -> RosterResult<()> {
        let dir = path.parent().filter(|d| !d.as_os_str().is_empty());
        if let Some(dir) = dir {
            std::fs::create_dir_all(dir).map_err(|e| io_failure("create", dir, e))?;
        }
        std::fs::write(path, starter_config()).map_err(|e| io_failure("write", path, e))
    }
}

fn io_failure(action: &str, path: &Path, err: std::io::Error) -> RosterError {
    RosterError::Config(format!("Cannot {action} {}: {err}", path.display()))
}

/// Commented-out starter file listing each setting with its default.
fn starter_config() -> String {
    let choices = Choices::default();
    let list = |items: &[String]| {
        let quoted: Vec<String> = items.iter().map(|i| format!("\"{i}\"")).collect();
        format!("[{}]", quoted.join(", "))
    };

    let lines = [
        "# roster settings. Any value here can also come from a ROSTER_<KEY>".to_string(),
        "# environment variable, e.g. ROSTER_API_KEY.".to_string(),
        String::new(),
        "# store_url = \"https://<project>.supabase.co\"".to_string(),
        "# api_key = \"<anon key>\"".to_string(),
        format!("# table = \"{DEFAULT_TABLE}\""),
        format!("# timezone = \"{}\"", crate::date::DEFAULT_TIMEZONE.name()),
        format!("# table_date_format = \"{DEFAULT_TABLE_DATE_FORMAT}\""),
        format!("# timestamp_format = \"{DEFAULT_TIMESTAMP_FORMAT}\""),
        String::new(),
        "# [choices]".to_string(),
        format!("# names = {}", list(choices.names())),
        format!("# events = {}", list(choices.events())),
    ];

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RosterConfig::load_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.table, "schedules");
        assert_eq!(config.timezone, chrono_tz::Asia::Manila);
        assert_eq!(config.choices, Choices::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
store_url = "https://example.test"
api_key = "secret"
timezone = "UTC"

[choices]
names = ["Amy", "John"]
events = ["Sunday"]
"#,
        )
        .unwrap();

        let config = RosterConfig::load_from(&path).unwrap();
        assert_eq!(config.credentials().unwrap(), ("https://example.test", "secret"));
        assert_eq!(config.timezone, chrono_tz::UTC);
        assert_eq!(config.choices.names(), ["Amy".to_string(), "John".to_string()]);
        assert_eq!(config.choices.events(), ["SUNDAY".to_string()]);
    }

    #[test]
    fn credentials_are_required_for_the_store() {
        let config = RosterConfig::default();
        assert!(matches!(config.credentials(), Err(RosterError::Config(_))));
    }

    #[test]
    fn default_config_template_is_loadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        RosterConfig::create_default_config(&path).unwrap();

        let config = RosterConfig::load_from(&path).unwrap();
        assert_eq!(config.table, "schedules");

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("# timezone = \"Asia/Manila\""));
        assert!(text.contains("\"SUNDAY\""));
        assert!(text.lines().all(|l| l.is_empty() || l.starts_with('#')));
    }
}
