//! Settings of the command line tool, optionally read from a `c55.conf` file.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use c55_core::{
    SerializationVersions,
    serialization::{SER_FMT_VER_HIGHEST, SER_FMT_VER_LOWEST},
};
use log::{debug, warn};

use crate::config_file::{Config, ConfigValue};

pub(crate) const CONFIG_FILE_NAME: &str = "c55.conf";

const KEY_VERSION_LOWEST: &str = "serialization_version_lowest";
const KEY_VERSION_HIGHEST: &str = "serialization_version_highest";
const KEY_DEFAULT_VERSION: &str = "default_serialization_version";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    /// versions the node serializer accepts
    pub(crate) versions: SerializationVersions,
    /// version used by commands that aren't given one explicitly
    pub(crate) default_version: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            versions: SerializationVersions::DEFAULT,
            default_version: SER_FMT_VER_HIGHEST,
        }
    }
}

impl Settings {
    /// Loads the settings from the given file or, if none is given, from the nearest
    /// `c55.conf`. Falls back to the defaults if there's no config file at all.
    pub(crate) fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = match explicit_path {
            Some(path) => path.to_owned(),
            None => match find_config_file() {
                Some(path) => path,
                None => {
                    debug!("no {CONFIG_FILE_NAME} found; using default settings");
                    return Ok(Self::default());
                }
            },
        };

        let config = Config::load(&path)?;
        Self::from_config(&config).with_context(|| format!("invalid settings in {}", path.display()))
    }

    pub(crate) fn from_config(config: &Config) -> Result<Self> {
        let mut lowest = SER_FMT_VER_LOWEST;
        let mut highest = SER_FMT_VER_HIGHEST;
        let mut default_version = None;

        for (key, value) in config.entries() {
            match key {
                KEY_VERSION_LOWEST => lowest = parse_version(key, value)?,
                KEY_VERSION_HIGHEST => highest = parse_version(key, value)?,
                KEY_DEFAULT_VERSION => default_version = Some(parse_version(key, value)?),
                _ => warn!("ignoring unknown setting `{key}`"),
            }
        }

        let Some(versions) = SerializationVersions::new(lowest, highest) else {
            bail!("{KEY_VERSION_LOWEST} ({lowest}) exceeds {KEY_VERSION_HIGHEST} ({highest})");
        };

        let default_version = default_version.unwrap_or(highest);
        if !versions.contains(default_version) {
            bail!(
                "{KEY_DEFAULT_VERSION} ({default_version}) is outside of the supported versions {lowest}..={highest}"
            );
        }

        Ok(Self {
            versions,
            default_version,
        })
    }
}

fn parse_version(key: &str, value: &ConfigValue) -> Result<u8> {
    let Some(value) = value.as_str() else {
        bail!("`{key}` must be a number, not a group");
    };
    value
        .parse()
        .with_context(|| format!("`{key}` must be a number from 0 to 255, got `{value}`"))
}

/// Searches the current directory and all of its parents for a config file.
fn find_config_file() -> Option<PathBuf> {
    let current_dir = match env::current_dir() {
        Ok(current_dir) => current_dir,
        Err(error) => {
            debug!("could not determine current working directory: {error}");
            return None;
        }
    };

    for dir in current_dir.ancestors() {
        debug!("searching for {CONFIG_FILE_NAME} in {}", dir.display());
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            debug!("found settings at {}", candidate.display());
            return Some(candidate);
        }
    }
    None
}
