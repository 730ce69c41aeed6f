use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};
use colored::Colorize;
use rayon::prelude::*;

use crate::{
    cli::args::CommonArgs,
    config::{Config, ConfigOverrides, load_config, load_dir_overrides},
    core::{
        data::{LocaleResource, LocaleResources},
        parsers::{LocaleFilter, ScanOptions, scan_resource_dir},
    },
    issues::IssueType,
    rules::{ValidateOptions, find_source},
};

/// One locale directory with its effective configuration.
pub struct LocaleDir {
    pub dir: PathBuf,
    /// Global config, then the directory's `.mfvrc.json`, then CLI flags.
    pub config: Config,
    pub resources: LocaleResources,
}

impl LocaleDir {
    pub fn source(&self) -> Option<&LocaleResource> {
        find_source(&self.resources, &self.config.source_locale)
    }

    /// Source resource, or an error naming the directory.
    pub fn require_source(&self) -> Result<&LocaleResource> {
        match self.source() {
            Some(source) => Ok(source),
            None => bail!(
                "Source locale \"{}\" has no resource file in '{}'.\n\
                 Hint: Check the 'sourceLocale' setting in .mfvrc.json.",
                self.config.source_locale,
                self.dir.display()
            ),
        }
    }

    pub fn validate_options(&self) -> ValidateOptions<'_> {
        ValidateOptions {
            source_locale: &self.config.source_locale,
            strict_plural_keys: self.config.strict_plural_keys,
        }
    }

    /// Whether `locale` is reported on and rewritten.
    ///
    /// The source locale is loaded even when `locales` excludes it, but only
    /// acts as a reference then.
    pub fn is_target(&self, locale: &str) -> bool {
        self.config.locales.as_ref().is_none_or(|allowed| {
            allowed
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(locale))
        })
    }

    pub fn targets(&self) -> impl Iterator<Item = &LocaleResource> {
        self.resources
            .values()
            .filter(|resource| self.is_target(&resource.locale))
    }

    pub fn ignored_types(&self) -> Vec<IssueType> {
        // Validated when the directory was loaded.
        self.config.ignored_types().unwrap_or_default()
    }
}

/// Configuration and locale data of the current project.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g., `--source-locale en`)
/// 2. `.mfvrc.json` inside the locale directory
/// 3. `.mfvrc.json` found walking up from the working directory
/// 4. Built-in defaults
pub struct ProjectContext {
    /// Global config merged with CLI flags.
    pub config: Config,
    pub config_file: Option<PathBuf>,
    pub dirs: Vec<LocaleDir>,
    pub verbose: bool,
}

impl ProjectContext {
    pub fn new(args: &CommonArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read the working directory")?;
        Self::load(&cwd, &args.overrides(), args.verbose)
    }

    pub fn load(start_dir: &Path, cli: &ConfigOverrides, verbose: bool) -> Result<Self> {
        let loaded = load_config(start_dir)?;
        if verbose && let Some(file) = &loaded.file {
            eprintln!("{} using {}", "note:".bold(), file.display());
        }

        let mut config = loaded.config.clone();
        config.merge(cli);
        config.validate()?;

        let cwd = std::env::current_dir().ok();
        let dirs = find_locale_dirs(&loaded.root_dir, &config.path)?
            .into_par_iter()
            .map(|dir| {
                let dir = match &cwd {
                    Some(cwd) => relative_to(&dir, cwd),
                    None => dir,
                };
                let mut dir_config = loaded.config.clone();
                if let Some(overrides) = load_dir_overrides(&dir)? {
                    dir_config.merge(&overrides);
                }
                dir_config.merge(cli);
                dir_config.validate()?;

                let filter = LocaleFilter {
                    source_locale: &dir_config.source_locale,
                    locales: dir_config.locales.as_deref(),
                };
                let options = ScanOptions {
                    json_obj: dir_config.json_obj,
                };
                let resources = scan_resource_dir(&dir, &filter, &options)?;
                if verbose {
                    eprintln!(
                        "{} loaded {} locale file(s) from {}",
                        "note:".bold(),
                        resources.len(),
                        dir.display()
                    );
                }
                Ok(LocaleDir {
                    dir,
                    config: dir_config,
                    resources,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            config,
            config_file: loaded.file,
            dirs,
            verbose,
        })
    }

    pub fn file_count(&self) -> usize {
        self.dirs.iter().map(|dir| dir.resources.len()).sum()
    }
}

/// `path` relative to `base` when it lies inside it, for shorter report paths.
fn relative_to(path: &Path, base: &Path) -> PathBuf {
    match path.strip_prefix(base) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative.to_path_buf(),
        _ => path.to_path_buf(),
    }
}

/// Locale directories matched by the `path` glob.
pub fn find_locale_dirs(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full = root.join(pattern);
    if !pattern.contains(['*', '?', '[']) {
        return Ok(vec![full]);
    }

    let full_pattern = full
        .to_str()
        .with_context(|| format!("Invalid path: {:?}", full))?;
    let mut dirs: Vec<PathBuf> = glob::glob(full_pattern)
        .with_context(|| format!("Invalid glob pattern in 'path': \"{}\"", pattern))?
        .filter_map(Result::ok)
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();

    if dirs.is_empty() {
        bail!(
            "No locale directories match '{}'.\n\
             Hint: Check the 'path' setting in .mfvrc.json.",
            pattern
        );
    }
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_find_locale_dirs_glob() {
        let dir = tempdir().unwrap();
        for package in ["b", "a"] {
            fs::create_dir_all(dir.path().join("packages").join(package).join("locales")).unwrap();
        }
        fs::write(dir.path().join("packages/readme.md"), "").unwrap();

        let dirs = find_locale_dirs(dir.path(), "packages/*/locales").unwrap();
        assert_eq!(
            dirs,
            vec![
                dir.path().join("packages/a/locales"),
                dir.path().join("packages/b/locales"),
            ]
        );
        assert!(find_locale_dirs(dir.path(), "nothing/*").is_err());
    }

    #[test]
    fn test_load_applies_directory_and_cli_overrides() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(
            dir.path().join(".mfvrc.json"),
            r#"{ "path": "*/locales", "locales": ["fr"] }"#,
        )
        .unwrap();
        for package in ["app", "web"] {
            let locales = dir.path().join(package).join("locales");
            fs::create_dir_all(&locales).unwrap();
            fs::write(locales.join("en.json"), r#"{"a": "A"}"#).unwrap();
            fs::write(locales.join("fr.json"), r#"{"a": "Ah"}"#).unwrap();
            fs::write(locales.join("de.json"), r#"{"a": "Äh"}"#).unwrap();
        }
        fs::write(
            dir.path().join("web/locales/.mfvrc.json"),
            r#"{ "locales": ["de"] }"#,
        )
        .unwrap();

        let ctx = ProjectContext::load(dir.path(), &ConfigOverrides::default(), false).unwrap();
        assert_eq!(ctx.dirs.len(), 2);
        let loaded: Vec<Vec<&str>> = ctx
            .dirs
            .iter()
            .map(|d| d.resources.keys().map(String::as_str).collect())
            .collect();
        assert_eq!(loaded, vec![vec!["en", "fr"], vec!["de", "en"]]);
        assert_eq!(ctx.dirs[0].dir, dir.path().join("app/locales"));
        assert!(ctx.dirs[1].is_target("de"));
        assert!(!ctx.dirs[1].is_target("en"));
        assert_eq!(ctx.file_count(), 4);

        let cli = ConfigOverrides {
            locales: Some(vec!["fr".to_string(), "de".to_string()]),
            ..Default::default()
        };
        let ctx = ProjectContext::load(dir.path(), &cli, false).unwrap();
        assert_eq!(ctx.file_count(), 6);
    }
}
