use std::path::PathBuf;

use anyhow::Context;
use log::{debug, info};
use serde::Deserialize;

use crate::enclosure::EnclosureRegistry;
use crate::extract::{ExtractOptions, UrlExtractor};

// ---------------------------------------------------------------------------
// ConfigFile: deserialized from TOML (all fields optional)
// ---------------------------------------------------------------------------

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub unique: Option<bool>,
    pub scheme_only: Option<bool>,
    pub indices: Option<bool>,
    #[serde(default)]
    pub enclosures: EnclosuresConfigFile,
}

/// `[enclosures]` table: pairs applied on top of the default set.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct EnclosuresConfigFile {
    pub add: Vec<(String, String)>,
    pub remove: Vec<(String, String)>,
}

// ---------------------------------------------------------------------------
// Config: resolved (all fields concrete)
// ---------------------------------------------------------------------------

pub struct Config {
    pub options: ExtractOptions,
    pub indices: bool,
    pub enclosures: EnclosureRegistry,
}

/// Values given on the command line; `false` or empty means "not given".
#[derive(Default)]
pub struct CliOverrides {
    pub unique: bool,
    pub scheme_only: bool,
    pub indices: bool,
    pub add_enclosures: Vec<(String, String)>,
    pub remove_enclosures: Vec<(String, String)>,
}

impl ConfigFile {
    /// Merge CLI values. Flags only ever switch options on; enclosure edits
    /// are appended after the ones from the file.
    pub fn merge_cli(&mut self, cli: CliOverrides) {
        if cli.unique {
            debug!("config: CLI override unique=true");
            self.unique = Some(true);
        }
        if cli.scheme_only {
            debug!("config: CLI override scheme_only=true");
            self.scheme_only = Some(true);
        }
        if cli.indices {
            debug!("config: CLI override indices=true");
            self.indices = Some(true);
        }
        for (open, close) in cli.add_enclosures {
            debug!("config: CLI add enclosure {open:?} {close:?}");
            self.enclosures.add.push((open, close));
        }
        for (open, close) in cli.remove_enclosures {
            debug!("config: CLI remove enclosure {open:?} {close:?}");
            self.enclosures.remove.push((open, close));
        }
    }

    /// Resolve to a Config by applying defaults to missing fields.
    ///
    /// Fails if an enclosure entry is not a pair of single characters, or if
    /// a removed pair is not registered at that point.
    pub fn resolve(self) -> anyhow::Result<Config> {
        let mut enclosures = EnclosureRegistry::default();
        for (open, close) in &self.enclosures.add {
            enclosures
                .add_str(open, close)
                .with_context(|| format!("invalid enclosure to add: {open:?} {close:?}"))?;
        }
        for (open, close) in &self.enclosures.remove {
            enclosures
                .remove_str(open, close)
                .context("invalid enclosure to remove")?;
        }

        let config = Config {
            options: ExtractOptions {
                unique: self.unique.unwrap_or(false),
                scheme_only: self.scheme_only.unwrap_or(false),
            },
            indices: self.indices.unwrap_or(false),
            enclosures,
        };
        info!(
            "config: resolved unique={}, scheme_only={}, indices={}, enclosures={}",
            config.options.unique,
            config.options.scheme_only,
            config.indices,
            config.enclosures.len(),
        );
        Ok(config)
    }
}

impl Config {
    /// Build the extractor described by this config.
    pub fn extractor(&self) -> UrlExtractor {
        UrlExtractor::with_registry(self.enclosures.clone()).with_options(self.options)
    }
}

/// Resolve the XDG config path for urlfence.
fn config_path() -> Option<PathBuf> {
    let config_dir = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config"))
        })?;
    Some(config_dir.join("urlfence").join("config.toml"))
}

/// Load config file. Returns `ConfigFile::default()` if no file exists.
/// Returns an error if the file exists but cannot be parsed.
pub fn load_config() -> anyhow::Result<ConfigFile> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            info!("config: no HOME or XDG_CONFIG_HOME set, using defaults");
            return Ok(ConfigFile::default());
        }
    };
    debug!("config: looking for {}", path.display());
    match std::fs::read_to_string(&path) {
        Ok(text) => {
            info!("config: loaded from {}", path.display());
            let cfg: ConfigFile = toml::from_str(&text)
                .map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", path.display()))?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("config: {} not found, using defaults", path.display());
            Ok(ConfigFile::default())
        }
        Err(e) => Err(anyhow::anyhow!("failed to read {}: {e}", path.display())),
    }
}
