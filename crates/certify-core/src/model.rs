use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::checks::{CheckKind, CheckResult};

/// File attached to an uploaded certificate. Only metadata is kept; the
/// payload itself never reaches the scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileRef {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CertificateRecord {
    pub id: String,
    pub title: String,
    pub recipient: String,
    pub issuer: String,
    /// Raw form value; parsed lazily by the checks so a malformed date is a
    /// failed check rather than a rejected record.
    pub issue_date: String,
    pub upload_date: DateTime<Utc>,
    pub file: FileRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Verified,
    Pending,
    Invalid,
}

impl VerificationStatus {
    pub const VERIFIED_MIN_SCORE: u8 = 80;
    pub const PENDING_MIN_SCORE: u8 = 60;

    pub fn from_score(score: u8) -> Self {
        if score >= Self::VERIFIED_MIN_SCORE {
            Self::Verified
        } else if score >= Self::PENDING_MIN_SCORE {
            Self::Pending
        } else {
            Self::Invalid
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::Pending => "pending",
            Self::Invalid => "invalid",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Verified => "Certificate is authentic and verified on blockchain",
            Self::Pending => "Certificate verification pending - some checks inconclusive",
            Self::Invalid => "Certificate verification failed - multiple security issues detected",
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated outcome of one verification run for one certificate.
///
/// `block_hash` and `transaction_id` are presentation-only placeholders
/// generated when the ledger check passes. They do not identify anything on a
/// real chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationVerdict {
    pub certificate_id: String,
    pub is_verified: bool,
    pub status: VerificationStatus,
    pub message: String,
    pub verification_date: DateTime<Utc>,
    pub score: u8,
    pub block_hash: Option<String>,
    pub transaction_id: Option<String>,
    pub detailed_results: BTreeMap<CheckKind, CheckResult>,
}

impl VerificationVerdict {
    pub fn check(&self, kind: CheckKind) -> Option<&CheckResult> {
        self.detailed_results.get(&kind)
    }

    pub fn passed_checks(&self) -> usize {
        self.detailed_results.values().filter(|r| r.passed).count()
    }
}

/// Lenient calendar-date parsing for form input: RFC 3339 timestamps,
/// `YYYY-MM-DD` (midnight UTC) and naive `YYYY-MM-DDTHH:MM:SS` (UTC).
pub fn parse_calendar_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    }
    None
}
