use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::report::ReportFormat;

pub const DEFAULT_CONFIG_FILE: &str = "egf.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdvisorConfig {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub scenarios: ScenariosConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// File the settings were read from; `None` when defaults apply.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl AdvisorConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `egf.toml` in the working directory is
    /// used when present, otherwise defaults apply. Emits no events; call
    /// [`Self::log_source`] after the subscriber is installed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => {
                if !p.exists() {
                    bail!("config file {} does not exist", p.display());
                }
                p.to_path_buf()
            }
            None => {
                let p = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !p.exists() {
                    return Ok(AdvisorConfig::default());
                }
                p
            }
        };

        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let mut cfg = Self::from_toml_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        if let Some(root) = path.parent() {
            cfg.resolve_paths(root);
        }
        cfg.source = Some(path);
        Ok(cfg)
    }

    /// Report where the settings came from.
    pub fn log_source(&self) {
        match &self.source {
            Some(path) => tracing::info!(path = %path.display(), "loaded advisor config"),
            None => tracing::info!(
                "No config file found at {}. Using AdvisorConfig::default().",
                DEFAULT_CONFIG_FILE
            ),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg = toml::from_str::<AdvisorConfig>(text)?;
        Ok(cfg)
    }

    fn resolve_paths(&mut self, root: &Path) {
        if let Some(p) = self.scenarios.path.take() {
            self.scenarios.path = Some(absolutize(root, &p));
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: ReportFormat,
    #[serde(default = "ReportConfig::default_show_narrative")]
    pub show_narrative: bool,
    #[serde(default = "ReportConfig::default_separator_width")]
    pub separator_width: usize,
}

impl ReportConfig {
    fn default_show_narrative() -> bool {
        true
    }

    fn default_separator_width() -> usize {
        70
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            show_narrative: Self::default_show_narrative(),
            separator_width: Self::default_separator_width(),
        }
    }
}

/// Where demonstration scenarios come from. `None` means the embedded pack.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScenariosConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_filter")]
    pub filter: String,
}

impl LoggingConfig {
    fn default_filter() -> String {
        "warn".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: Self::default_filter(),
        }
    }
}

fn absolutize(root: &Path, value: &Path) -> PathBuf {
    if value.is_absolute() {
        value.to_path_buf()
    } else {
        root.join(value)
    }
}
