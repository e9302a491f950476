use crate::app::cli::Cli;
use crate::app::error::{Result, RetrieverError};
use crate::app::models::{Config, DEFAULT_EXCLUDES};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Table name the options may be nested under; a flat document works too.
pub const CONFIG_SECTION: &str = "md_retriever";
pub const LOCAL_CONFIG_DIR: &str = ".md-retriever";
pub const CONFIG_FILENAME: &str = "config.toml";

/// Options as they appear in a TOML file. Every key is optional.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    pub output: Option<String>,
    pub marker_start: Option<String>,
    pub marker_end: Option<String>,
    pub title: Option<String>,
    pub no_default_excludes: Option<bool>,
    pub excludes: Option<Vec<String>>,
    pub respect_gitignore: Option<bool>,
}

/// Picks the config file for this run: the explicit `--config` path, else
/// `ROOT/.md-retriever/config.toml` when it exists.
pub fn locate_config(explicit: Option<&Path>, root: &Path) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(RetrieverError::ConfigNotFound(path.to_path_buf()));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = root.join(LOCAL_CONFIG_DIR).join(CONFIG_FILENAME);
    Ok(local.is_file().then_some(local))
}

/// Whether this build can read TOML config files.
pub const fn toml_supported() -> bool {
    cfg!(feature = "toml-config")
}

pub fn load_config_file(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Err(RetrieverError::ConfigNotFound(path.to_path_buf()));
    }
    if !toml_supported() {
        return Err(RetrieverError::MissingTomlReader);
    }

    let content = fs::read_to_string(path).map_err(|source| RetrieverError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&content).map_err(|message| RetrieverError::ConfigParse {
        path: path.to_path_buf(),
        message,
    })
}

#[cfg(feature = "toml-config")]
pub fn parse_config_str(content: &str) -> std::result::Result<FileConfig, String> {
    let mut document: toml::Table = toml::from_str(content).map_err(|e| e.to_string())?;

    let section = match document.remove(CONFIG_SECTION) {
        Some(toml::Value::Table(section)) => section,
        Some(other) => return Err(format!("[{CONFIG_SECTION}] must be a table, found {}", other.type_str())),
        None => document,
    };

    toml::Value::Table(section)
        .try_into()
        .map_err(|e: toml::de::Error| e.to_string())
}

#[cfg(not(feature = "toml-config"))]
pub fn parse_config_str(_content: &str) -> std::result::Result<FileConfig, String> {
    Err(RetrieverError::MissingTomlReader.to_string())
}

/// Appends the items of `extra` that are not already in `base`, keeping order.
fn append_unique(base: &mut Vec<String>, extra: &[String]) {
    for item in extra {
        if !base.contains(item) {
            base.push(item.clone());
        }
    }
}

/// Layers CLI values over file values over built-in defaults.
pub fn merge_config(cli: &Cli, file: &FileConfig) -> Config {
    let defaults = Config::default();

    let no_default_excludes =
        cli.no_default_excludes || file.no_default_excludes.unwrap_or(defaults.no_default_excludes);

    let mut excludes = if no_default_excludes {
        Vec::new()
    } else {
        DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect()
    };
    append_unique(&mut excludes, file.excludes.as_deref().unwrap_or_default());
    append_unique(&mut excludes, &cli.exclude);

    Config {
        output: cli
            .output
            .clone()
            .or_else(|| file.output.clone())
            .unwrap_or(defaults.output),
        marker_start: cli
            .marker_start
            .clone()
            .or_else(|| file.marker_start.clone())
            .unwrap_or(defaults.marker_start),
        marker_end: cli
            .marker_end
            .clone()
            .or_else(|| file.marker_end.clone())
            .unwrap_or(defaults.marker_end),
        title: cli.title.clone().or_else(|| file.title.clone()),
        no_default_excludes,
        excludes,
        respect_gitignore: cli
            .gitignore_override()
            .or(file.respect_gitignore)
            .unwrap_or(defaults.respect_gitignore),
    }
}

pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let file = match locate_config(cli.config.as_deref(), &cli.root)? {
        Some(path) => {
            log::info!("Using config {}", path.display());
            load_config_file(&path)?
        }
        None => FileConfig::default(),
    };

    Ok(merge_config(cli, &file))
}
