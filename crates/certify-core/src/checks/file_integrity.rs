use serde::{Deserialize, Serialize};

use super::{Check, CheckContext, CheckDetails, CheckKind, CheckResult};
use crate::config::IntegrityConfig;
use crate::model::CertificateRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileIntegrityDetails {
    /// Human-readable size, e.g. "1.25 MB".
    pub file_size: String,
    pub file_type: String,
    pub has_suspicious_extension: bool,
    pub is_reasonable_size: bool,
    pub has_valid_type: bool,
}

/// Rejects executable-looking names, empty or oversized files, and
/// undeclared document types. The declared mime type is trusted as given.
pub struct FileIntegrityCheck {
    max_file_bytes: u64,
    allowed_mime_types: Vec<String>,
    denied_extensions: Vec<String>,
}

impl FileIntegrityCheck {
    pub fn new(cfg: &IntegrityConfig) -> Self {
        Self {
            max_file_bytes: cfg.max_file_bytes,
            allowed_mime_types: cfg.allowed_mime_types.clone(),
            denied_extensions: cfg
                .denied_extensions
                .iter()
                .map(|e| e.to_ascii_lowercase())
                .collect(),
        }
    }

    fn has_suspicious_extension(&self, file_name: &str) -> bool {
        let lowered = file_name.to_lowercase();
        self.denied_extensions
            .iter()
            .any(|ext| lowered.ends_with(ext.as_str()))
    }
}

impl Default for FileIntegrityCheck {
    fn default() -> Self {
        Self::new(&IntegrityConfig::default())
    }
}

pub(crate) fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

impl Check for FileIntegrityCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::FileIntegrity
    }

    fn evaluate(&self, cert: &CertificateRecord, _ctx: &mut CheckContext<'_>) -> CheckResult {
        let file = &cert.file;
        let has_suspicious_extension = self.has_suspicious_extension(&file.name);
        let is_reasonable_size = file.size > 0 && file.size < self.max_file_bytes;
        let has_valid_type = self.allowed_mime_types.iter().any(|t| *t == file.mime_type);

        let passed = !has_suspicious_extension && is_reasonable_size && has_valid_type;
        tracing::debug!(
            certificate = %cert.id,
            file = %file.name,
            has_suspicious_extension,
            is_reasonable_size,
            has_valid_type,
            passed,
            "file integrity check"
        );

        CheckResult::new(
            passed,
            CheckDetails::FileIntegrity(FileIntegrityDetails {
                file_size: format_megabytes(file.size),
                file_type: file.mime_type.clone(),
                has_suspicious_extension,
                is_reasonable_size,
                has_valid_type,
            }),
        )
    }
}
