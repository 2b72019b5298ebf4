//! Reader for `c55.conf`, which uses the same format as `minetest.conf`:
//!
//! ```text
//! # comment
//! key = value
//! group = {
//!     nested = value
//! }
//! text = """
//! multiple
//! lines
//! """
//! ```

use std::{
    fs,
    io::{BufRead, BufReader},
    mem,
    path::Path,
};

use anyhow::{Context, Result, bail};
use flexstr::SharedStr;

const GROUP_START: &str = "{";
const GROUP_END: &str = "}";
const MULTILINE_TAG: &str = r#"""""#;

/// The parsed contents of a config file. Comments are dropped.
#[derive(Debug, Default)]
pub(crate) struct Config {
    entries: Vec<(SharedStr, ConfigValue)>,
}

#[derive(Debug)]
pub(crate) enum ConfigValue {
    String(SharedStr),
    Group(Config),
}

impl Config {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let reader = fs::File::open(path)
            .with_context(|| format!("cannot open config file {}", path.display()))?;
        let reader = BufReader::new(reader);

        let mut builder = ConfigBuilder::default();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            builder
                .parse_line(&line)
                .with_context(|| format!("{}:{}", path.display(), index + 1))?;
        }
        builder.finish()
    }

    #[cfg(test)]
    pub(crate) fn parse(text: &str) -> Result<Self> {
        let mut builder = ConfigBuilder::default();
        for line in text.lines() {
            builder.parse_line(line)?;
        }
        builder.finish()
    }

    /// All entries in the order of their appearance.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(key, value)| (&**key, value))
    }

    /// Returns the value of the given key. If a key appears several times, the last one wins.
    #[cfg(test)]
    pub(crate) fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries()
            .filter(|&(entry_key, _)| entry_key == key)
            .map(|(_, value)| value)
            .last()
    }
}

impl ConfigValue {
    pub(crate) fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(value) => Some(&**value),
            ConfigValue::Group(_) => None,
        }
    }
}

#[derive(Default)]
struct ConfigBuilder {
    config: Config,
    state: ConfigBuilderState,
    /// whether this builds a group which is terminated by `}`
    nested: bool,
}

#[derive(Default)]
enum ConfigBuilderState {
    #[default]
    Default,
    Group {
        key: SharedStr,
        builder: Box<ConfigBuilder>,
    },
    Multiline {
        key: SharedStr,
        multiline: String,
    },
    Complete,
}

impl ConfigBuilder {
    fn nested() -> Self {
        Self {
            nested: true,
            ..Self::default()
        }
    }

    fn push(&mut self, key: SharedStr, value: ConfigValue) {
        self.config.entries.push((key, value));
    }

    /// Returns `true` once the terminating line of a group has been consumed.
    fn parse_line(&mut self, line: &str) -> Result<bool> {
        let trimmed = line.trim();

        self.state = match mem::take(&mut self.state) {
            ConfigBuilderState::Default => {
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    ConfigBuilderState::Default
                } else if self.nested && trimmed == GROUP_END {
                    ConfigBuilderState::Complete
                } else {
                    let Some((key, value)) = trimmed.split_once('=') else {
                        bail!("invalid config line: {line}");
                    };
                    let key = key.trim();
                    let value = value.trim();
                    if key.is_empty() {
                        bail!("missing key in config line: {line}");
                    }
                    let key = SharedStr::from(key.to_owned());

                    match value {
                        GROUP_START => ConfigBuilderState::Group {
                            key,
                            builder: Box::new(Self::nested()),
                        },
                        MULTILINE_TAG => ConfigBuilderState::Multiline {
                            key,
                            multiline: String::new(),
                        },
                        _ => {
                            self.push(key, ConfigValue::String(value.to_owned().into()));
                            ConfigBuilderState::Default
                        }
                    }
                }
            }
            ConfigBuilderState::Group { key, mut builder } => {
                if builder.parse_line(line)? {
                    self.push(key, ConfigValue::Group(builder.finish()?));
                    ConfigBuilderState::Default
                } else {
                    ConfigBuilderState::Group { key, builder }
                }
            }
            ConfigBuilderState::Multiline { key, mut multiline } => {
                if trimmed == MULTILINE_TAG {
                    self.push(key, ConfigValue::String(multiline.into()));
                    ConfigBuilderState::Default
                } else {
                    if !multiline.is_empty() {
                        multiline.push('\n');
                    }
                    multiline.push_str(line);
                    ConfigBuilderState::Multiline { key, multiline }
                }
            }
            ConfigBuilderState::Complete => {
                bail!("unexpected line after completion");
            }
        };

        Ok(matches!(self.state, ConfigBuilderState::Complete))
    }

    fn finish(self) -> Result<Config> {
        match self.state {
            ConfigBuilderState::Default if self.nested => {
                bail!("missing termination tag for group: '{GROUP_END}'");
            }
            ConfigBuilderState::Default | ConfigBuilderState::Complete => {}
            ConfigBuilderState::Group { key, .. } => {
                bail!("missing termination tag for group value of `{key}`: '{GROUP_END}'");
            }
            ConfigBuilderState::Multiline { key, .. } => {
                bail!("missing termination tag for multiline value of `{key}`: '{MULTILINE_TAG}'");
            }
        }

        Ok(self.config)
    }
}
