//! Upload-form validation. Produces the immutable `CertificateRecord` the
//! scorer works on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::IntakeConfig;
use crate::errors::IntakeError;
use crate::model::{CertificateRecord, FileRef};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UploadForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub recipient: String,
    #[serde(default)]
    pub issuer: String,
    /// Issue date as typed into the form.
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub file: Option<FileRef>,
}

pub fn certificate_id(now: DateTime<Utc>) -> String {
    format!("CERT-{}", now.timestamp_millis())
}

/// Validates the selected file on its own, as the picker does before the
/// form is submitted.
pub fn validate_file(file: &FileRef, cfg: &IntakeConfig) -> Result<(), IntakeError> {
    if !cfg.allowed_mime_types.iter().any(|t| *t == file.mime_type) {
        return Err(IntakeError::UnsupportedType {
            mime_type: file.mime_type.clone(),
            allowed: cfg.allowed_mime_types.clone(),
        });
    }
    if file.size > cfg.max_file_bytes {
        return Err(IntakeError::FileTooLarge {
            size: file.size,
            limit: cfg.max_file_bytes,
        });
    }
    Ok(())
}

pub fn intake(
    form: &UploadForm,
    wallet: Option<&str>,
    cfg: &IntakeConfig,
    now: DateTime<Utc>,
) -> Result<CertificateRecord, IntakeError> {
    let wallet = wallet.map(str::trim).filter(|w| !w.is_empty());
    if cfg.require_wallet && wallet.is_none() {
        return Err(IntakeError::WalletNotConnected);
    }

    let missing: Vec<&'static str> = [
        ("title", form.title.as_str()),
        ("recipient", form.recipient.as_str()),
        ("issuer", form.issuer.as_str()),
        ("date", form.date.as_str()),
    ]
    .into_iter()
    .filter(|(_, v)| v.trim().is_empty())
    .map(|(name, _)| name)
    .collect();
    if !missing.is_empty() {
        return Err(IntakeError::MissingFields { fields: missing });
    }

    let file = form.file.as_ref().ok_or(IntakeError::MissingFile)?;
    validate_file(file, cfg)?;

    Ok(CertificateRecord {
        id: certificate_id(now),
        title: form.title.clone(),
        recipient: form.recipient.clone(),
        issuer: form.issuer.clone(),
        issue_date: form.date.clone(),
        upload_date: now,
        file: file.clone(),
        wallet_address: wallet.map(str::to_string),
        description: form.description.clone().filter(|d| !d.trim().is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const WALLET: &str = "SP1K1A1PMGW2ZJMTGJB8J8GES8MSVDCT6MZ3M4Z0";

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_717_243_200_123).unwrap()
    }

    fn form() -> UploadForm {
        UploadForm {
            title: "Smart Contract Auditor".to_string(),
            recipient: "Jane Smith".to_string(),
            issuer: "CryptoAcademy".to_string(),
            date: "2024-02-20".to_string(),
            description: Some("  ".to_string()),
            file: Some(FileRef {
                name: "auditor.pdf".to_string(),
                size: 200_000,
                mime_type: "application/pdf".to_string(),
            }),
        }
    }

    #[test]
    fn accepted_form_becomes_record() {
        let record = intake(&form(), Some(WALLET), &IntakeConfig::default(), now()).unwrap();
        assert_eq!(record.id, "CERT-1717243200123");
        assert_eq!(record.upload_date, now());
        assert_eq!(record.issue_date, "2024-02-20");
        assert_eq!(record.wallet_address.as_deref(), Some(WALLET));
        assert_eq!(record.description, None);
    }

    #[test]
    fn wallet_is_checked_first() {
        let empty = UploadForm::default();
        let err = intake(&empty, None, &IntakeConfig::default(), now()).unwrap_err();
        assert_eq!(err, IntakeError::WalletNotConnected);

        let err = intake(&empty, Some("  "), &IntakeConfig::default(), now()).unwrap_err();
        assert_eq!(err, IntakeError::WalletNotConnected);
    }

    #[test]
    fn wallet_optional_when_not_required() {
        let cfg = IntakeConfig {
            require_wallet: false,
            ..IntakeConfig::default()
        };
        let record = intake(&form(), None, &cfg, now()).unwrap();
        assert_eq!(record.wallet_address, None);
    }

    #[test]
    fn lists_missing_fields_in_form_order() {
        let mut f = form();
        f.title = " ".to_string();
        f.date = String::new();
        let err = intake(&f, Some(WALLET), &IntakeConfig::default(), now()).unwrap_err();
        assert_eq!(
            err,
            IntakeError::MissingFields {
                fields: vec!["title", "date"]
            }
        );
    }

    #[test]
    fn requires_a_file() {
        let mut f = form();
        f.file = None;
        let err = intake(&f, Some(WALLET), &IntakeConfig::default(), now()).unwrap_err();
        assert_eq!(err, IntakeError::MissingFile);
    }

    #[test]
    fn rejects_disallowed_type() {
        let mut f = form();
        f.file.as_mut().unwrap().mime_type = "text/plain".to_string();
        let err = intake(&f, Some(WALLET), &IntakeConfig::default(), now()).unwrap_err();
        assert_eq!(err.code(), "E_UNSUPPORTED_TYPE");
    }

    #[test]
    fn five_megabytes_is_the_inclusive_limit() {
        let cfg = IntakeConfig::default();
        let mut file = form().file.unwrap();
        file.size = 5 * 1024 * 1024;
        assert!(validate_file(&file, &cfg).is_ok());
        file.size += 1;
        assert_eq!(
            validate_file(&file, &cfg),
            Err(IntakeError::FileTooLarge {
                size: 5 * 1024 * 1024 + 1,
                limit: 5 * 1024 * 1024
            })
        );
    }
}
