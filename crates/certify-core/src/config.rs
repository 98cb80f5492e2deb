use crate::errors::ConfigError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;
pub const DEFAULT_CONFIG_PATH: &str = "certify.yaml";

const MIB: u64 = 1024 * 1024;

const SAMPLE_CONFIG: &str = r#"# certify configuration
version: 1

integrity:
  # Files must be strictly smaller than this to pass the integrity check.
  max_file_bytes: 52428800
  allowed_mime_types: [application/pdf, image/jpeg, image/png, image/jpg]
  denied_extensions: [.exe, .bat, .cmd, .scr, .pif, .com, .vbs, .js, .jar, .msi, .dll, .sys]

timestamps:
  earliest_issue_date: 2020-01-01

# Stand-ins for ledger and signature verification.
simulation:
  ledger_record_probability: 0.8
  ledger_recency_probability: 0.9
  signature_probability: 0.85
  block_height_min: 1000000
  block_height_max: 2000000

intake:
  max_file_bytes: 5242880
  allowed_mime_types: [application/pdf, image/jpeg, image/png, image/jpg]
  require_wallet: true
"#;

fn default_version() -> u32 {
    SUPPORTED_CONFIG_VERSION
}

fn certificate_mime_types() -> Vec<String> {
    ["application/pdf", "image/jpeg", "image/png", "image/jpg"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CertifyConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub integrity: IntegrityConfig,
    #[serde(default)]
    pub timestamps: TimestampConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub intake: IntakeConfig,
}

impl Default for CertifyConfig {
    fn default() -> Self {
        Self {
            version: SUPPORTED_CONFIG_VERSION,
            integrity: IntegrityConfig::default(),
            timestamps: TimestampConfig::default(),
            simulation: SimulationConfig::default(),
            intake: IntakeConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntegrityConfig {
    pub max_file_bytes: u64,
    pub allowed_mime_types: Vec<String>,
    pub denied_extensions: Vec<String>,
}

impl Default for IntegrityConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 50 * MIB,
            allowed_mime_types: certificate_mime_types(),
            denied_extensions: [
                ".exe", ".bat", ".cmd", ".scr", ".pif", ".com", ".vbs", ".js", ".jar", ".msi",
                ".dll", ".sys",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimestampConfig {
    pub earliest_issue_date: NaiveDate,
}

impl Default for TimestampConfig {
    fn default() -> Self {
        Self {
            earliest_issue_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or(NaiveDate::MIN),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub ledger_record_probability: f64,
    pub ledger_recency_probability: f64,
    pub signature_probability: f64,
    /// Inclusive lower bound of the simulated block height.
    pub block_height_min: u64,
    /// Exclusive upper bound of the simulated block height.
    pub block_height_max: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ledger_record_probability: 0.8,
            ledger_recency_probability: 0.9,
            signature_probability: 0.85,
            block_height_min: 1_000_000,
            block_height_max: 2_000_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntakeConfig {
    /// Inclusive upload limit.
    pub max_file_bytes: u64,
    pub allowed_mime_types: Vec<String>,
    pub require_wallet: bool,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 5 * MIB,
            allowed_mime_types: certificate_mime_types(),
            require_wallet: true,
        }
    }
}

impl CertifyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != SUPPORTED_CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: SUPPORTED_CONFIG_VERSION,
            });
        }

        let probabilities = [
            (
                "simulation.ledger_record_probability",
                self.simulation.ledger_record_probability,
            ),
            (
                "simulation.ledger_recency_probability",
                self.simulation.ledger_recency_probability,
            ),
            (
                "simulation.signature_probability",
                self.simulation.signature_probability,
            ),
        ];
        for (field, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::invalid(field, format!("{p} is outside [0, 1]")));
            }
        }

        if self.simulation.block_height_min >= self.simulation.block_height_max {
            return Err(ConfigError::invalid(
                "simulation.block_height_min",
                format!(
                    "must be below block_height_max ({} >= {})",
                    self.simulation.block_height_min, self.simulation.block_height_max
                ),
            ));
        }
        if self.integrity.max_file_bytes == 0 {
            return Err(ConfigError::invalid("integrity.max_file_bytes", "must be > 0"));
        }
        if self.intake.max_file_bytes == 0 {
            return Err(ConfigError::invalid("intake.max_file_bytes", "must be > 0"));
        }
        if self.integrity.allowed_mime_types.is_empty() {
            return Err(ConfigError::invalid(
                "integrity.allowed_mime_types",
                "must list at least one type",
            ));
        }
        if self.intake.allowed_mime_types.is_empty() {
            return Err(ConfigError::invalid(
                "intake.allowed_mime_types",
                "must list at least one type",
            ));
        }
        if let Some(ext) = self
            .integrity
            .denied_extensions
            .iter()
            .find(|e| !e.starts_with('.') || e.len() < 2)
        {
            return Err(ConfigError::invalid(
                "integrity.denied_extensions",
                format!("'{ext}' must look like '.ext'"),
            ));
        }
        Ok(())
    }
}

pub fn parse_config(raw: &str) -> Result<CertifyConfig, ConfigError> {
    let cfg: CertifyConfig = serde_yaml::from_str(raw)?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_config(path: &Path) -> Result<CertifyConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&raw)
}

/// Loads `path` when it exists, otherwise falls back to the built-in defaults.
pub fn load_config_or_default(path: &Path) -> Result<CertifyConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config not found, using defaults");
        return Ok(CertifyConfig::default());
    }
    load_config(path)
}

pub fn write_sample_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    std::fs::write(path, SAMPLE_CONFIG).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
