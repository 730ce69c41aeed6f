use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::issues::IssueType;

pub const CONFIG_FILE_NAME: &str = ".mfvrc.json";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_locale")]
    pub source_locale: String,
    /// Allowed target locales; `None` loads every resource file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locales: Option<Vec<String>>,
    /// Glob of locale directories, relative to the config file.
    #[serde(default = "default_path")]
    pub path: String,
    /// Values are objects holding the text in a `message` field.
    #[serde(default)]
    pub json_obj: bool,
    /// Issue types hidden from the report and not counted.
    #[serde(default)]
    pub ignore: Vec<String>,
    #[serde(default)]
    pub strict_plural_keys: bool,
}

fn default_source_locale() -> String {
    "en".to_string()
}

fn default_path() -> String {
    "locales".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_locale: default_source_locale(),
            locales: None,
            path: default_path(),
            json_obj: false,
            ignore: Vec::new(),
            strict_plural_keys: false,
        }
    }
}

/// Partial config: a per-directory `.mfvrc.json` or command line flags.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    pub source_locale: Option<String>,
    pub locales: Option<Vec<String>>,
    pub path: Option<String>,
    pub json_obj: Option<bool>,
    pub ignore: Option<Vec<String>>,
    pub strict_plural_keys: Option<bool>,
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for an invalid `path` glob, an unknown issue type in
    /// `ignore` or an empty locale code.
    pub fn validate(&self) -> Result<()> {
        Pattern::new(&self.path)
            .with_context(|| format!("Invalid glob pattern in 'path': \"{}\"", self.path))?;

        self.ignored_types()?;

        if self.source_locale.trim().is_empty() {
            bail!("'sourceLocale' must not be empty.");
        }
        if let Some(locales) = &self.locales
            && locales.iter().any(|locale| locale.trim().is_empty())
        {
            bail!("'locales' must not contain empty locale codes.");
        }

        Ok(())
    }

    /// Parsed `ignore` list.
    pub fn ignored_types(&self) -> Result<Vec<IssueType>> {
        self.ignore
            .iter()
            .map(|name| {
                name.parse::<IssueType>()
                    .with_context(|| format!("Invalid issue type in 'ignore': \"{}\"", name))
            })
            .collect()
    }

    /// Apply every set field of `overrides`.
    pub fn merge(&mut self, overrides: &ConfigOverrides) {
        if let Some(source_locale) = &overrides.source_locale {
            self.source_locale = source_locale.clone();
        }
        if let Some(locales) = &overrides.locales {
            self.locales = Some(locales.clone());
        }
        if let Some(path) = &overrides.path {
            self.path = path.clone();
        }
        if let Some(json_obj) = overrides.json_obj {
            self.json_obj = json_obj;
        }
        if let Some(ignore) = &overrides.ignore {
            self.ignore = ignore.clone();
        }
        if let Some(strict_plural_keys) = overrides.strict_plural_keys {
            self.strict_plural_keys = strict_plural_keys;
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Config file used, `None` when running on defaults.
    pub file: Option<PathBuf>,
    /// Directory that relative paths in the config resolve against.
    pub root_dir: PathBuf,
}

impl ConfigLoadResult {
    pub fn from_file(&self) -> bool {
        self.file.is_some()
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let root_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                file: Some(path),
                root_dir,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            file: None,
            root_dir: start_dir.to_path_buf(),
        }),
    }
}

/// Overrides from a `.mfvrc.json` inside a locale directory, if any.
pub fn load_dir_overrides(dir: &Path) -> Result<Option<ConfigOverrides>> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let overrides = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    Ok(Some(overrides))
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.source_locale, "en");
        assert_eq!(config.path, "locales");
        assert!(config.locales.is_none());
        assert!(config.ignore.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "sourceLocale": "en-us",
              "locales": ["fr", "de"],
              "path": "packages/*/locales",
              "jsonObj": true,
              "ignore": ["untranslated"],
              "strictPluralKeys": true
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.source_locale, "en-us");
        assert_eq!(config.locales, Some(vec!["fr".to_string(), "de".to_string()]));
        assert_eq!(config.path, "packages/*/locales");
        assert!(config.json_obj);
        assert!(config.strict_plural_keys);
        assert_eq!(config.ignored_types().unwrap(), vec![IssueType::Untranslated]);
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{ "ignore": ["nest-ideal"] }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.ignore, vec!["nest-ideal"]);
        assert_eq!(config.source_locale, default_source_locale());
        assert_eq!(config.path, default_path());
    }

    #[test]
    fn test_default_config_json_omits_locales() {
        let json = default_config_json().unwrap();
        assert!(json.contains("\"sourceLocale\": \"en\""));
        assert!(json.contains("\"strictPluralKeys\": false"));
        assert!(!json.contains("locales\":"));
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("src").join("app");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_stops_at_git_root() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        assert!(find_config_file(dir.path()).is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "sourceLocale": "fr" }"#,
        )
        .unwrap();
        let nested = dir.path().join("web");
        fs::create_dir(&nested).unwrap();

        let result = load_config(&nested).unwrap();
        assert!(result.from_file());
        assert_eq!(result.config.source_locale, "fr");
        assert_eq!(result.root_dir, dir.path());
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file());
        assert_eq!(result.config, Config::default());
    }

    #[test]
    fn test_validate_rejects_unknown_issue_type() {
        let config = Config {
            ignore: vec!["typo".to_string()],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ignore"));
    }

    #[test]
    fn test_validate_rejects_bad_glob_and_empty_locale() {
        let config = Config {
            path: "locales/[invalid".to_string(),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("path"));

        let config = Config {
            locales: Some(vec!["fr".to_string(), " ".to_string()]),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_overrides() {
        let mut config = Config::default();
        config.merge(&ConfigOverrides {
            source_locale: Some("de".to_string()),
            json_obj: Some(true),
            ..Default::default()
        });
        assert_eq!(config.source_locale, "de");
        assert!(config.json_obj);
        assert_eq!(config.path, "locales");
    }

    #[test]
    fn test_load_dir_overrides() {
        let dir = tempdir().unwrap();
        assert!(load_dir_overrides(dir.path()).unwrap().is_none());

        fs::write(dir.path().join(CONFIG_FILE_NAME), r#"{ "sourceLocale": "ja" }"#).unwrap();
        let overrides = load_dir_overrides(dir.path()).unwrap().unwrap();
        assert_eq!(overrides.source_locale.as_deref(), Some("ja"));
    }
}
