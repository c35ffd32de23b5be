use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::error::{Result, SinkError};
use crate::level::LogLevel;

/// Fallback directory for log files when none is configured.
pub const DEFAULT_DIRECTORY: &str = "logs";
/// Fallback primary file name when none is configured.
pub const DEFAULT_FILE_NAME: &str = "app.log";
/// Size at which a log file is rotated out, in bytes.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
/// Records the queue holds before further enqueues are dropped.
pub const DEFAULT_QUEUE_CAPACITY: usize = 50_000;

#[derive(Debug)]
pub struct Config {
    pub globals: HashMap<String, String>,
    pub sections: HashMap<String, HashMap<String, String>>,
}

impl Config {
    /// Parses an INI-style file: `key = value` pairs, optional `[section]`
    /// headers, `#` comments, double quotes around values stripped.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::ConfigRead`] if the file cannot be read.
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| SinkError::ConfigRead {
            path: PathBuf::from(path),
            source: e,
        })?;

        let mut globals = HashMap::new();
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current_section: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let name = &line[1..line.len() - 1];
                current_section = Some(name.to_string());
                continue;
            }

            if let Some(pos) = line.find('=') {
                let key = line[..pos].trim().to_string();
                let value = line[pos + 1..].trim().trim_matches('"').to_string();

                match &current_section {
                    None => {
                        globals.insert(key, value);
                    }
                    Some(sec) => {
                        sections.entry(sec.clone()).or_default().insert(key, value);
                    }
                }
            }
        }
        Ok(Config { globals, sections })
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            globals: HashMap::new(),
            sections: HashMap::new(),
        }
    }

    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|sec| sec.get(key))
            .map(|s| s.as_str())
    }

    #[must_use]
    pub fn get_non_empty(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key).filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn get_global(&self, key: &str) -> Option<&str> {
        self.globals.get(key).map(|s| s.as_str())
    }

    #[must_use]
    pub fn get_or_default<'a>(&'a self, section: &str, key: &str, default: &'a str) -> &'a str {
        self.get(section, key)
            .or_else(|| self.get_global(key))
            .unwrap_or(default)
    }

    #[must_use]
    pub fn get_non_empty_or_default<'a>(
        &'a self,
        section: &str,
        key: &str,
        default: &'a str,
    ) -> &'a str {
        self.get_non_empty(section, key)
            .or_else(|| self.get_global(key).filter(|s| !s.is_empty()))
            .unwrap_or(default)
    }
}

/// Expands tilde (`~`) in file paths to the user's home directory.
pub fn expand_path(path_str: &str) -> PathBuf {
    if let Some(rest) = path_str.strip_prefix('~') {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .ok()
            .map(PathBuf::from);

        if let Some(mut home_path) = home {
            if rest.is_empty() {
                return home_path;
            }
            if let Some(tail) = rest.strip_prefix('/').or_else(|| rest.strip_prefix('\\')) {
                home_path.push(tail);
                return home_path;
            }
        }
    }
    PathBuf::from(path_str)
}

/// Everything a file sink needs to start.
///
/// Built by hand, from the positional [`FileLogger::new`](crate::file_sink::FileLogger::new)
/// arguments, or from a `[logging]` config section via [`SinkOptions::from_config`].
#[derive(Debug, Clone)]
pub struct SinkOptions {
    /// Records strictly below this level never reach the queue.
    pub min_level: LogLevel,
    /// Directory holding the primary file, its mirror, and their backups.
    /// Created on startup if absent.
    pub directory: PathBuf,
    /// Primary file name; the error mirror appends `.err` to it.
    pub file_name: String,
    /// Rotation threshold in bytes for each file independently.
    pub max_file_size: u64,
    /// Queue capacity; at least 1 is always used.
    pub queue_capacity: usize,
}

impl Default for SinkOptions {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Debug,
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            file_name: DEFAULT_FILE_NAME.to_string(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl SinkOptions {
    /// Reads the `[logging]` section, falling back to defaults key by key.
    ///
    /// Recognized keys: `minimum_level`, `directory` (tilde expanded),
    /// `file_name`, `max_file_size_bytes`, `queue_capacity`. Unparseable
    /// numbers fall back silently, matching how an absent key behaves.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let defaults = Self::default();

        let min_level =
            LogLevel::parse(config.get_non_empty_or_default("logging", "minimum_level", "debug"));
        let directory = config
            .get_non_empty("logging", "directory")
            .map_or(defaults.directory, expand_path);
        let file_name = config
            .get_non_empty_or_default("logging", "file_name", DEFAULT_FILE_NAME)
            .to_string();
        let max_file_size = config
            .get_non_empty("logging", "max_file_size_bytes")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_file_size);
        let queue_capacity = config
            .get_non_empty("logging", "queue_capacity")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.queue_capacity);

        Self {
            min_level,
            directory,
            file_name,
            max_file_size,
            queue_capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn write_temp_ini(tag: &str, content: &str) -> String {
        let mut path = std::env::temp_dir();
        path.push(format!("sinklog_cfg_{}_{tag}.ini", std::process::id()));
        fs::write(&path, content).expect("write test config");
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn load_splits_globals_and_sections() {
        let path = write_temp_ini(
            "split",
            "answer = 42\n# comment\n[logging]\nminimum_level = \"warn\"\nfile_name = net.log\n",
        );
        let config = Config::load(&path).expect("config must load");
        let _ = fs::remove_file(&path);

        assert_eq!(config.get_global("answer"), Some("42"));
        assert_eq!(config.get("logging", "minimum_level"), Some("warn"));
        assert_eq!(config.get("logging", "file_name"), Some("net.log"));
        assert_eq!(config.get("logging", "missing"), None);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load("/definitely/not/here.ini");
        assert!(matches!(err, Err(SinkError::ConfigRead { .. })));
    }

    #[test]
    fn lookups_fall_back_in_order() {
        let path = write_temp_ini("fallback", "shared = global\n[logging]\nempty =\n");
        let config = Config::load(&path).expect("config must load");
        let _ = fs::remove_file(&path);

        assert_eq!(config.get_or_default("logging", "shared", "d"), "global");
        assert_eq!(config.get_or_default("logging", "none", "d"), "d");
        // An empty sectioned value is skipped by the non-empty variant.
        assert_eq!(config.get("logging", "empty"), Some(""));
        assert_eq!(config.get_non_empty("logging", "empty"), None);
        assert_eq!(config.get_non_empty_or_default("logging", "empty", "d"), "d");
    }

    #[test]
    fn options_default_when_config_is_empty() {
        let options = SinkOptions::from_config(&Config::empty());
        assert_eq!(options.min_level, LogLevel::Debug);
        assert_eq!(options.directory, PathBuf::from(DEFAULT_DIRECTORY));
        assert_eq!(options.file_name, DEFAULT_FILE_NAME);
        assert_eq!(options.max_file_size, DEFAULT_MAX_FILE_SIZE);
        assert_eq!(options.queue_capacity, DEFAULT_QUEUE_CAPACITY);
    }

    #[test]
    fn options_read_the_logging_section() {
        let path = write_temp_ini(
            "options",
            "[logging]\nminimum_level = ERROR\ndirectory = /var/tmp/sink\nfile_name = svc.log\nmax_file_size_bytes = 100\nqueue_capacity = 8\n",
        );
        let config = Config::load(&path).expect("config must load");
        let _ = fs::remove_file(&path);

        let options = SinkOptions::from_config(&config);
        assert_eq!(options.min_level, LogLevel::Error);
        assert_eq!(options.directory, PathBuf::from("/var/tmp/sink"));
        assert_eq!(options.file_name, "svc.log");
        assert_eq!(options.max_file_size, 100);
        assert_eq!(options.queue_capacity, 8);
    }

    #[test]
    fn unparseable_numbers_fall_back() {
        let path = write_temp_ini("badnum", "[logging]\nmax_file_size_bytes = huge\n");
        let config = Config::load(&path).expect("config must load");
        let _ = fs::remove_file(&path);

        let options = SinkOptions::from_config(&config);
        assert_eq!(options.max_file_size, DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn tilde_expands_to_home() {
        let home = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE"));
        if let Ok(home) = home {
            assert_eq!(expand_path("~"), PathBuf::from(&home));
            assert_eq!(expand_path("~/logs"), PathBuf::from(home).join("logs"));
        }
        assert_eq!(expand_path("/abs/logs"), PathBuf::from("/abs/logs"));
    }
}
