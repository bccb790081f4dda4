use super::error::ShimError;
use serde::{Deserialize, Serialize};
use std::{fs, io::ErrorKind, path::Path, str::FromStr};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lives in the activity's files directory, next to the game's own data.
/// If a key exists multiple times inside a section, the first entry is applied.
/// If a `try_` key exists multiple times inside a section, the last entry is applied.
pub const CONFIG_FILE_NAME: &str = "tuxracer-activity.toml";

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ActivityConfig {
    /// Every group carries `#[serde(default)]`, otherwise a single broken group
    /// fails the whole file and valid settings elsewhere get reset too.
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub crash_report: CrashReportConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Request fullscreen with hidden navigation at all
    #[serde(default = "default_true")]
    pub immersive: bool,
    /// Allow `IMMERSIVE_STICKY` on devices that support it
    #[serde(default = "default_true")]
    pub sticky: bool,
    #[serde(default)]
    pub keep_screen_on: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            immersive: true,
            sticky: true,
            keep_screen_on: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LogConfig {
    pub fn level_filter(&self) -> log::LevelFilter {
        log::LevelFilter::from_str(self.level.trim()).unwrap_or(log::LevelFilter::Info)
    }
}

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct CrashReportConfig {
    /// Sentry DSN, empty disables crash reporting
    #[serde(default)]
    pub dsn: String,
}

impl CrashReportConfig {
    pub fn dsn(&self) -> Option<&str> {
        Some(self.dsn.trim()).filter(|dsn| !dsn.is_empty())
    }
}

fn find_key(lines: &[String], key: &str) -> Option<usize> {
    let prefix = format!("{}=", key);
    lines.iter().position(|line| line.starts_with(&prefix))
}

/// This function does 2 major tasks:
/// - Read the config file, override keys with their `try_*` versions, and return the effective config line by line
/// - Write back to the config file, with `try_*` keys commented out
///
/// **Important**: As each call comments out the `try_*` keys, it is **non-idempotent**.
fn process_config_file(path: &Path) -> Result<Vec<String>, ShimError> {
    let content = fs::read_to_string(path).map_err(|source| ShimError::ConfigIo {
        path: path.to_path_buf(),
        source,
    })?;

    let mut write_back_lines: Vec<String> = vec![];
    let mut effective_config: Vec<String> = vec![];
    let mut has_try_keys = false;
    // Keys are looked up from here, so `level` in `[log]` never collides with a key of another group
    let mut section_start = 0;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') {
            section_start = effective_config.len();
            write_back_lines.push(trimmed.to_string());
            effective_config.push(trimmed.to_string());
            continue;
        }

        match trimmed.split_once('=') {
            Some((key, value)) if !trimmed.starts_with('#') => {
                let key = key.trim();
                let value = value.trim();

                if let Some(actual_key) = key.strip_prefix("try_") {
                    has_try_keys = true;
                    write_back_lines.push(format!("# {}", trimmed));

                    // No spaces around `=` so that `find_key` keeps working
                    let entry = format!("{}={}", actual_key, value);
                    match find_key(&effective_config[section_start..], actual_key) {
                        Some(index) => effective_config[section_start + index] = entry,
                        None => effective_config.push(entry),
                    }
                } else {
                    write_back_lines.push(trimmed.to_string());

                    if find_key(&effective_config[section_start..], key).is_none() {
                        effective_config.push(format!("{}={}", key, value));
                    }
                }
            }
            _ => {
                write_back_lines.push(trimmed.to_string());
                effective_config.push(trimmed.to_string());
            }
        }
    }

    if has_try_keys {
        let mut rewritten = write_back_lines.join("\n");
        rewritten.push('\n');
        fs::write(path, rewritten).map_err(|source| ShimError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
    }

    Ok(effective_config)
}

pub fn save_config(config: &ActivityConfig, path: &Path) -> Result<(), ShimError> {
    let io_error = |source: std::io::Error| ShimError::ConfigIo {
        path: path.to_path_buf(),
        source,
    };

    // Keep the previous file around, it may hold settings the user wants to fix by hand
    if path.exists() {
        let backup_path = path.with_extension("bak");
        if let Err(err) = fs::rename(path, &backup_path) {
            log::warn!("Failed to create backup of existing config: {}", err);
        }
    }

    if let Some(config_dir) = path.parent() {
        fs::create_dir_all(config_dir).map_err(io_error)?;
    }

    let config_str = toml::to_string(config)?;
    fs::write(path, config_str).map_err(io_error)
}

/// Reads the config, applying and consuming `try_*` overrides on the way
pub fn read_config(path: &Path) -> Result<ActivityConfig, ShimError> {
    let lines = process_config_file(path)?;
    Ok(toml::from_str(&lines.join("\n"))?)
}

/// Never fails: a missing or malformed file is replaced by the defaults
pub fn parse_config(path: &Path) -> ActivityConfig {
    match read_config(path) {
        Ok(config) => config,
        Err(ShimError::ConfigIo { ref source, .. }) if source.kind() == ErrorKind::NotFound => {
            // First launch, lay down the defaults so there is something to edit
            reset_config(path)
        }
        Err(ShimError::ConfigParse(err)) => {
            // Config malformed, giving back the default config so that the user can modify it again
            log::warn!("Malformed config {}: {}", path.display(), err);
            reset_config(path)
        }
        Err(err) => {
            log::warn!("{}", err);
            ActivityConfig::default()
        }
    }
}

fn reset_config(path: &Path) -> ActivityConfig {
    let default_config = ActivityConfig::default();
    if let Err(err) = save_config(&default_config, path) {
        log::warn!("{}", err);
    }
    default_config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn with_config_file(content: &str, f: impl Fn(&Path)) {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&file_path, content).unwrap();
        f(&file_path)
    }

    #[test]
    fn should_handle_configs_without_try() {
        with_config_file(
            r#"
                [display]
                immersive = true
                sticky = false
                keep_screen_on = true

                [log]
                level = "debug"
            "#,
            |path| {
                let config = parse_config(path);
                assert!(config.display.immersive);
                assert!(!config.display.sticky);
                assert!(config.display.keep_screen_on);
                assert_eq!(config.log.level_filter(), log::LevelFilter::Debug);
                assert_eq!(config.crash_report.dsn(), None);
            },
        );
    }

    #[test]
    fn should_handle_configs_with_try() {
        with_config_file(
            r#"
                [display]
                immersive = true
                try_immersive = false
                sticky = true

                [log]
                level = "info"
                try_level = "trace"
            "#,
            |path| {
                let config = parse_config(path);
                assert!(!config.display.immersive);
                assert!(config.display.sticky);
                assert_eq!(config.log.level, "trace");
            },
        );
    }

    #[test]
    fn should_comment_out_try_configs() {
        with_config_file(
            r#"
                [display]
                sticky = true
                try_sticky = false
            "#,
            |path| {
                let _ = parse_config(path); // This triggers rewriting the config file
                let content = fs::read_to_string(path).unwrap();

                assert!(
                    content.contains("# try_sticky = false"),
                    "❌ `try_sticky` is not commented out after being applied"
                );
                assert!(content.contains("sticky = true"));

                let second = parse_config(path);
                assert!(second.display.sticky, "❌ `try_sticky` applied twice");
            },
        );
    }

    #[test]
    fn should_scope_keys_to_their_section() {
        with_config_file(
            r#"
                [display]
                immersive = false

                [crash_report]
                try_immersive = true
                dsn = "https://key@sentry.example/1"
            "#,
            |path| {
                let config = parse_config(path);
                assert!(!config.display.immersive);
                assert_eq!(config.crash_report.dsn(), Some("https://key@sentry.example/1"));
            },
        );
    }

    #[test]
    fn should_apply_first_duplicate_key() {
        with_config_file(
            r#"
                [log]
                level = "warn"
                level = "trace"
            "#,
            |path| {
                let config = parse_config(path);
                assert_eq!(config.log.level_filter(), log::LevelFilter::Warn);
            },
        );
    }

    #[test]
    fn should_keep_valid_groups_when_one_is_missing() {
        with_config_file(
            r#"
                [log]
                level = "error"
            "#,
            |path| {
                let config = parse_config(path);
                assert_eq!(config.display, DisplayConfig::default());
                assert_eq!(config.log.level_filter(), log::LevelFilter::Error);
            },
        );
    }

    #[test]
    fn should_report_malformed_config_as_parse_error() {
        with_config_file("[display]\nsticky = 3\n", |path| {
            assert!(matches!(read_config(path), Err(ShimError::ConfigParse(_))));
        });
    }

    #[test]
    fn should_report_missing_config_as_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        match read_config(&path) {
            Err(ShimError::ConfigIo { path: reported, source }) => {
                assert_eq!(reported, path);
                assert_eq!(source.kind(), ErrorKind::NotFound);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn should_reset_malformed_config_and_keep_backup() {
        with_config_file("[display]\nimmersive = maybe\n", |path| {
            let config = parse_config(path);
            assert_eq!(config, ActivityConfig::default());

            let backup = fs::read_to_string(path.with_extension("bak")).unwrap();
            assert!(backup.contains("immersive = maybe"));

            let rewritten: ActivityConfig =
                toml::from_str(&fs::read_to_string(path).unwrap()).unwrap();
            assert_eq!(rewritten, ActivityConfig::default());
        });
    }

    #[test]
    fn should_create_default_config_when_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("files").join(CONFIG_FILE_NAME);

        let config = parse_config(&path);
        assert_eq!(config, ActivityConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn should_fall_back_to_info_for_unknown_level() {
        let config = LogConfig {
            level: "loud".to_string(),
        };
        assert_eq!(config.level_filter(), log::LevelFilter::Info);
    }
}
