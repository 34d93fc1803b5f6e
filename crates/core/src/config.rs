use chrono::FixedOffset;
use serde::Deserialize;

/// Root application configuration. Loaded from an optional TOML file and
/// environment variables with the prefix `PRODIALER__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_product_name")]
    pub product_name: String,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Range code used when the caller does not pick one ("7d", "30d", "90d").
    #[serde(default = "default_range")]
    pub default_range: String,
    /// Fixed offset of the reporting calendar from UTC. Day bins and printed
    /// dates follow this calendar; unset means the host's local time zone,
    /// daylight saving included.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default)]
    pub include_json: bool,
}

/// Which export files a report run produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Csv,
    #[default]
    Both,
}

impl ExportFormat {
    pub fn includes_pdf(self) -> bool {
        matches!(self, Self::Pdf | Self::Both)
    }

    pub fn includes_csv(self) -> bool {
        matches!(self, Self::Csv | Self::Both)
    }
}

// Default functions
fn default_product_name() -> String {
    "prodialer".to_string()
}
fn default_range() -> String {
    "7d".to_string()
}
fn default_output_dir() -> String {
    ".".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_range: default_range(),
            utc_offset_minutes: None,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            output_dir: default_output_dir(),
            include_json: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            product_name: default_product_name(),
            report: ReportConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Configured fixed calendar offset. `None` selects the host's local
    /// time zone; so does an out-of-range offset, with a warning.
    pub fn fixed_offset(&self) -> Option<FixedOffset> {
        let minutes = self.utc_offset_minutes?;
        let offset = minutes.checked_mul(60).and_then(FixedOffset::east_opt);
        if offset.is_none() {
            tracing::warn!(
                utc_offset_minutes = minutes,
                "Invalid calendar offset, using the local time zone"
            );
        }
        offset
    }
}

impl AppConfig {
    /// Load configuration from environment variables and optional config file.
    pub fn load(file: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }
        builder = builder.add_source(
            config::Environment::with_prefix("PRODIALER")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
