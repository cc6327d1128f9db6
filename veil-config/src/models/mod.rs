pub mod classes;

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use veil_model::{BlurStrength, ObserverConfiguration};

use crate::util::{non_empty_var, parse_bool, parse_csv};
use classes::ClassNames;

pub const CONFIG_PATH_VAR: &str = "VEIL_CONFIG_PATH";
pub const CONFIG_JSON_VAR: &str = "VEIL_CONFIG_JSON";
pub const BLUR_STRENGTH_VAR: &str = "VEIL_BLUR_STRENGTH";
pub const TRIGGER_ONCE_VAR: &str = "VEIL_TRIGGER_ONCE";
pub const ROOT_MARGIN_VAR: &str = "VEIL_ROOT_MARGIN";
pub const THRESHOLD_VAR: &str = "VEIL_THRESHOLD";

/// Source that produced the reveal configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RevealConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// Defaults applied to every reveal a host creates.
///
/// Individual reveals may still override any of these through their props;
/// this only seeds the values a host does not set explicitly.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Standard deviation of the placeholder blur. `"0"` disables the
    /// cross-fade and swaps layers instantly once content has loaded.
    pub blur_strength: BlurStrength,
    /// Latch visibility after the first positive observation. Turning this
    /// off makes the tracker follow the element in and out of the viewport;
    /// mounted content still stays mounted.
    pub trigger_once: bool,
    /// Options forwarded to the platform visibility observer.
    pub observer: ObserverConfiguration,
    /// Presentation tokens for the rendered layers.
    pub classes: ClassNames,
    /// Optional `env_logger` filter used by veil binaries when `RUST_LOG`
    /// is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            blur_strength: BlurStrength::default(),
            trigger_once: true,
            observer: ObserverConfiguration::default(),
            classes: ClassNames::default(),
            log_filter: None,
        }
    }
}

impl RevealConfig {
    /// Load reveal configuration using environment variables.
    /// Evaluation order:
    /// 1) `$VEIL_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$VEIL_CONFIG_JSON` (inline JSON),
    /// 3) the first default file candidate that exists,
    /// 4) defaults if none of the above is set.
    ///
    /// Scalar `VEIL_*` overrides are applied on top of whichever base won.
    pub fn load_from_env() -> anyhow::Result<(Self, RevealConfigSource)> {
        let (mut config, source) = Self::load_base_from_env()?;
        config.apply_overrides_with(non_empty_var);
        log::debug!("reveal config loaded from {:?}", source);
        Ok((config, source))
    }

    fn load_base_from_env() -> anyhow::Result<(Self, RevealConfigSource)> {
        if let Some(path_str) = non_empty_var(CONFIG_PATH_VAR) {
            let path = PathBuf::from(path_str);
            let config = Self::load_from_file(&path)?;
            return Ok((config, RevealConfigSource::EnvPath(path)));
        }

        if let Some(raw) = non_empty_var(CONFIG_JSON_VAR) {
            let parsed = Self::parse_json(&raw)
                .with_context(|| format!("failed to parse {CONFIG_JSON_VAR}"))?;
            return Ok((parsed, RevealConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file() {
            let config = Self::load_from_file(&path)?;
            return Ok((config, RevealConfigSource::File(path)));
        }

        Ok((Self::default(), RevealConfigSource::Default))
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read reveal config from {}", path.display())
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents).with_context(|| {
                format!("invalid reveal config {}", path.display())
            }),
            Some("toml") | Some("tml") => {
                toml::from_str(&contents).map_err(|err| {
                    anyhow!(
                        "invalid reveal config {}: {}",
                        path.display(),
                        err
                    )
                })
            }
            _ => Self::parse_from_str(&contents, &path.display().to_string()),
        }
    }

    pub fn parse_from_str(
        contents: &str,
        origin: &str,
    ) -> anyhow::Result<Self> {
        // Try TOML first, then JSON for convenience.
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse reveal config {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw)
            .map_err(|err| anyhow!("invalid reveal config json: {err}"))
    }

    /// Apply scalar overrides looked up through `lookup`.
    ///
    /// `load_from_env` passes an environment lookup; tests pass a map.
    /// Values that do not parse are logged and ignored.
    pub fn apply_overrides_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(BLUR_STRENGTH_VAR) {
            self.blur_strength = BlurStrength::new(raw.trim());
        }

        if let Some(raw) = lookup(TRIGGER_ONCE_VAR) {
            match parse_bool(&raw) {
                Some(value) => self.trigger_once = value,
                None => log::warn!(
                    "ignoring {TRIGGER_ONCE_VAR}={raw:?}: expected a boolean"
                ),
            }
        }

        if let Some(raw) = lookup(ROOT_MARGIN_VAR) {
            self.observer.root_margin = Some(raw.trim().to_string());
        }

        if let Some(raw) = lookup(THRESHOLD_VAR) {
            let parsed: Result<Vec<f64>, _> = parse_csv(&raw)
                .iter()
                .map(|part| part.parse::<f64>())
                .collect();
            match parsed {
                Ok(threshold) => self.observer.threshold = threshold,
                Err(err) => log::warn!(
                    "ignoring {THRESHOLD_VAR}={raw:?}: {err}"
                ),
            }
        }
    }

    fn find_default_file() -> Option<PathBuf> {
        const CANDIDATES: &[&str] = &[
            "veil.toml",
            "veil.json",
            "config/veil.toml",
            "config/veil.json",
        ];

        CANDIDATES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(|path| path.to_path_buf())
    }
}
