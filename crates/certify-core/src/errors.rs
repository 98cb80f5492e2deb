//! Error types for config loading and upload intake.
//!
//! A failed check is never an error; these cover input that cannot be scored
//! at all.

use std::path::PathBuf;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("unsupported config version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("refusing to overwrite existing config {}", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Reasons an upload form is turned away before a record is created.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("wallet not connected")]
    WalletNotConnected,

    #[error("missing required fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    #[error("no certificate file selected")]
    MissingFile,

    #[error("unsupported file type '{mime_type}' (allowed: {})", allowed.join(", "))]
    UnsupportedType {
        mime_type: String,
        allowed: Vec<String>,
    },

    #[error("file too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("certificate id already in session: {id}")]
    DuplicateId { id: String },
}

impl IntakeError {
    /// Stable machine-readable code used in reports.
    pub fn code(&self) -> &'static str {
        match self {
            Self::WalletNotConnected => "E_WALLET_NOT_CONNECTED",
            Self::MissingFields { .. } => "E_MISSING_FIELDS",
            Self::MissingFile => "E_MISSING_FILE",
            Self::UnsupportedType { .. } => "E_UNSUPPORTED_TYPE",
            Self::FileTooLarge { .. } => "E_FILE_TOO_LARGE",
            Self::DuplicateId { .. } => "E_DUPLICATE_ID",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_message_lists_fields() {
        let err = IntakeError::MissingFields {
            fields: vec!["title", "issuer"],
        };
        assert_eq!(err.to_string(), "missing required fields: title, issuer");
        assert_eq!(err.code(), "E_MISSING_FIELDS");
    }

    #[test]
    fn version_error_names_both_versions() {
        let err = ConfigError::UnsupportedVersion {
            found: 3,
            supported: 1,
        };
        assert!(err.to_string().contains("3"));
        assert!(err.to_string().contains("supported: 1"));
    }
}
