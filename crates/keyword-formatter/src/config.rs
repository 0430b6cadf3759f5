use crate::errors::{Error, Result};
use crate::keywords::{normalize_prefix, KeywordRule, KeywordSource};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file read from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = ".kwfmt.toml";

/// Default location of the JSON title store
pub const DEFAULT_STORE: &str = ".kwfmt/titles.json";

/// Prefix as written in a config file: `prefix = "ui/"` or `prefix = false`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PrefixSetting {
    Flag(bool),
    Text(String),
}

impl PrefixSetting {
    /// Only a string is a usable prefix; booleans mean "none"
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PrefixSetting::Flag(_) => None,
            PrefixSetting::Text(text) => Some(text),
        }
    }
}

/// Application configuration with layered defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Inline keywords (comma/newline separated, or a /regex/ literal)
    pub keywords: Option<String>,

    /// Keyword file, or directory whose entry names are keywords
    pub keywords_path: Option<PathBuf>,

    /// Prefix that may precede a keyword
    pub prefix: Option<PrefixSetting>,

    /// Report the new title without writing it back
    pub dry_run: bool,

    /// JSON title store
    pub store: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keywords: None,
            keywords_path: None,
            prefix: None,
            dry_run: false,
            store: PathBuf::from(DEFAULT_STORE),
        }
    }
}

/// Values given on the command line (highest precedence)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub keywords: Option<String>,
    pub keywords_path: Option<PathBuf>,
    pub prefix: Option<String>,
    pub dry_run: bool,
    pub store: Option<PathBuf>,
}

/// Normalized inputs for a formatting run
#[derive(Debug, Clone)]
pub struct ProcessedInputs {
    pub rule: KeywordRule,
    pub prefix: Option<String>,
    pub dry_run: bool,
}

impl Config {
    /// Load configuration from all sources with proper precedence:
    /// defaults, config file, `INPUT_*` environment, command line
    pub fn load(config_file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        Self::load_with_env(config_file, overrides, |name| std::env::var(name).ok())
    }

    /// Same as [`Config::load`] with a custom environment lookup
    pub fn load_with_env(
        config_file: Option<&Path>,
        overrides: &Overrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        // Start with defaults
        let mut config = Config::default();

        let (path, required) = match config_file {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG_FILE), false),
        };
        if let Some(file_config) = Self::load_from_file(path, required)? {
            config.merge(file_config);
        }

        config.merge(PartialConfig::from_env(lookup)?);
        config.merge(PartialConfig::from(overrides));

        debug!("Configuration: {:?}", config);
        Ok(config)
    }

    /// Load configuration from a TOML file
    fn load_from_file(path: &Path, required: bool) -> Result<Option<PartialConfig>> {
        if !required && !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path).map_err(|source| Error::io(path, source))?;
        let config: PartialConfig = toml::from_str(&contents)
            .map_err(|source| Error::Toml { path: path.to_path_buf(), source })?;

        debug!("Loaded config file {}", path.display());
        Ok(Some(config))
    }

    /// Merge partial config into this one (partial takes precedence for specified fields)
    fn merge(&mut self, other: PartialConfig) {
        // The keyword source is one setting: a layer naming either field replaces both
        if other.keywords.is_some() || other.keywords_path.is_some() {
            self.keywords = other.keywords;
            self.keywords_path = other.keywords_path;
        }
        if let Some(val) = other.prefix {
            self.prefix = Some(val);
        }
        if let Some(val) = other.dry_run {
            self.dry_run = val;
        }
        if let Some(val) = other.store {
            self.store = val;
        }
    }

    /// Resolve the keyword source and prefix
    pub fn process(&self) -> Result<ProcessedInputs> {
        let source =
            KeywordSource::from_inputs(self.keywords.as_deref(), self.keywords_path.as_deref())?;
        let rule = source.load()?;
        let prefix = normalize_prefix(self.prefix.as_ref().and_then(PrefixSetting::as_text));

        Ok(ProcessedInputs { rule, prefix, dry_run: self.dry_run })
    }
}

/// Partial configuration for deserializing from TOML with optional fields
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct PartialConfig {
    keywords: Option<String>,
    keywords_path: Option<PathBuf>,
    prefix: Option<PrefixSetting>,
    dry_run: Option<bool>,
    store: Option<PathBuf>,
}

impl PartialConfig {
    /// Action inputs, e.g. `INPUT_KEYWORDS-PATH`; empty values count as unset
    fn from_env(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let input = |names: &[&str]| {
            names.iter().find_map(|&name| lookup(name).filter(|value| !value.is_empty()))
        };

        let dry_run = match input(&["INPUT_DRY-RUN", "INPUT_DRY_RUN"]) {
            Some(value) => Some(parse_bool_input("dry-run", &value)?),
            None => None,
        };

        Ok(PartialConfig {
            keywords: input(&["INPUT_KEYWORDS"]),
            keywords_path: input(&["INPUT_KEYWORDS-PATH", "INPUT_KEYWORDS_PATH"])
                .map(PathBuf::from),
            prefix: input(&["INPUT_PREFIX"]).map(PrefixSetting::Text),
            dry_run,
            store: None,
        })
    }
}

impl From<&Overrides> for PartialConfig {
    fn from(overrides: &Overrides) -> Self {
        PartialConfig {
            keywords: overrides.keywords.clone(),
            keywords_path: overrides.keywords_path.clone(),
            prefix: overrides.prefix.clone().map(PrefixSetting::Text),
            dry_run: overrides.dry_run.then_some(true),
            store: overrides.store.clone(),
        }
    }
}

/// Parse a boolean input the way workflow inputs are written
pub fn parse_bool_input(name: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "true" | "True" | "TRUE" => Ok(true),
        "false" | "False" | "FALSE" => Ok(false),
        other => Err(Error::InvalidBoolean { name: name.to_string(), value: other.to_string() }),
    }
}
