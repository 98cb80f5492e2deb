//! The five independent checks that feed a verification verdict.
//!
//! Checks never fail with an error: every outcome is a `CheckResult` with a
//! boolean and check-specific details. Randomised checks draw from the
//! context's RNG so callers control reproducibility.

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::model::CertificateRecord;

pub mod file_integrity;
pub mod ledger;
pub mod metadata;
pub mod signature;
pub mod timestamp;

pub use file_integrity::{FileIntegrityCheck, FileIntegrityDetails};
pub use ledger::{LedgerDetails, SimulatedLedgerCheck};
pub use metadata::{MetadataCheck, MetadataDetails};
pub use signature::{SignatureDetails, SimulatedSignatureCheck, SIGNATURE_ALGORITHM};
pub use timestamp::{TimestampCheck, TimestampDetails};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    FileIntegrity,
    MetadataValidation,
    BlockchainVerification,
    DigitalSignature,
    TimestampValidation,
}

impl CheckKind {
    pub const ALL: [CheckKind; 5] = [
        CheckKind::FileIntegrity,
        CheckKind::MetadataValidation,
        CheckKind::BlockchainVerification,
        CheckKind::DigitalSignature,
        CheckKind::TimestampValidation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FileIntegrity => "file_integrity",
            Self::MetadataValidation => "metadata_validation",
            Self::BlockchainVerification => "blockchain_verification",
            Self::DigitalSignature => "digital_signature",
            Self::TimestampValidation => "timestamp_validation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FileIntegrity => "File integrity",
            Self::MetadataValidation => "Metadata validation",
            Self::BlockchainVerification => "Blockchain verification",
            Self::DigitalSignature => "Digital signature",
            Self::TimestampValidation => "Timestamp validation",
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheckDetails {
    FileIntegrity(FileIntegrityDetails),
    Metadata(MetadataDetails),
    Ledger(LedgerDetails),
    Signature(SignatureDetails),
    Timestamp(TimestampDetails),
    /// Free-form details for checks supplied by embedders.
    Other(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub passed: bool,
    pub details: CheckDetails,
}

impl CheckResult {
    pub fn new(passed: bool, details: CheckDetails) -> Self {
        Self { passed, details }
    }
}

/// Per-run inputs shared by all checks of one verification.
pub struct CheckContext<'a> {
    pub rng: &'a mut dyn RngCore,
    pub now: DateTime<Utc>,
}

impl<'a> CheckContext<'a> {
    pub fn new(rng: &'a mut dyn RngCore, now: DateTime<Utc>) -> Self {
        Self { rng, now }
    }
}

/// Clamps a draw probability into `[0, 1]`; NaN and infinities never pass.
pub(crate) fn draw_probability(p: f64) -> f64 {
    if p.is_finite() {
        p.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

pub trait Check: Send + Sync {
    fn kind(&self) -> CheckKind;
    fn evaluate(&self, cert: &CertificateRecord, ctx: &mut CheckContext<'_>) -> CheckResult;
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::model::{CertificateRecord, FileRef};
    use chrono::{DateTime, TimeZone, Utc};

    pub const RECIPIENT_ADDRESS: &str = "SP1K1A1PMGW2ZJMTGJB8J8GES8MSVDCT6MZ3M4Z0";

    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    pub fn record() -> CertificateRecord {
        CertificateRecord {
            id: "CERT-1".to_string(),
            title: "X".to_string(),
            recipient: RECIPIENT_ADDRESS.to_string(),
            issuer: "Y".to_string(),
            issue_date: "2024-01-01".to_string(),
            upload_date: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
            file: FileRef {
                name: "c.pdf".to_string(),
                size: 1000,
                mime_type: "application/pdf".to_string(),
            },
            wallet_address: Some(RECIPIENT_ADDRESS.to_string()),
            description: None,
        }
    }
}
