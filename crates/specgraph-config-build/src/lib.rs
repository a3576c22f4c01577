//! `specgraph.toml` loading. Every field is optional and falls back to the
//! build defaults.

use serde::Deserialize;
use specgraph_core::options::{BuildOptions, NamingTemplates};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;
use tracing::debug;

/// File name looked up by [`discover`].
pub const CONFIG_FILE_NAME: &str = "specgraph.toml";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("cannot read config '{}': {error}", path.display())]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("invalid config '{}': {error}", path.display())]
    Toml {
        path: PathBuf,
        error: toml::de::Error,
    },
}

///
/// ConfigFile
///
/// On-disk shape; unknown keys are rejected so typos surface.
///

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub default_namespace: Option<String>,
    pub primary_key: Option<String>,
    pub naming: Option<NamingSection>,
    pub table_names: BTreeMap<String, String>,
    pub base_classes: BTreeMap<String, String>,
}

///
/// NamingSection
///

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingSection {
    pub model: Option<String>,
    pub schema: Option<String>,
    pub controller: Option<String>,
}

impl ConfigFile {
    /// Layer the file over the build defaults.
    #[must_use]
    pub fn into_options(self) -> BuildOptions {
        let defaults = BuildOptions::default();
        let naming = self.naming.unwrap_or_default();
        let default_naming = NamingTemplates::default();

        BuildOptions {
            default_namespace: self
                .default_namespace
                .unwrap_or(defaults.default_namespace),
            primary_key: self.primary_key.unwrap_or(defaults.primary_key),
            naming: NamingTemplates {
                model: naming.model.unwrap_or(default_naming.model),
                schema: naming.schema.unwrap_or(default_naming.schema),
                controller: naming.controller.unwrap_or(default_naming.controller),
            },
            table_names: self.table_names,
            base_classes: self.base_classes,
        }
    }
}

/// Parse config text. `path` is only used in errors.
pub fn parse_config(path: &Path, text: &str) -> Result<BuildOptions, ConfigError> {
    let file: ConfigFile = toml::from_str(text).map_err(|error| ConfigError::Toml {
        path: path.to_path_buf(),
        error,
    })?;

    Ok(file.into_options())
}

/// Read and parse a config file.
pub fn load_config(path: &Path) -> Result<BuildOptions, ConfigError> {
    let text = fs::read_to_string(path).map_err(|error| ConfigError::Io {
        path: path.to_path_buf(),
        error,
    })?;
    debug!(path = %path.display(), "loaded config");

    parse_config(path, &text)
}

/// Load `specgraph.toml` from `dir` if present, else the defaults.
pub fn discover(dir: &Path) -> Result<BuildOptions, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);

    if path.is_file() {
        load_config(&path)
    } else {
        debug!(dir = %dir.display(), "no config file, using defaults");
        Ok(BuildOptions::default())
    }
}
