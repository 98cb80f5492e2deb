//! Verification report shared by the text and JSON renderers.

pub mod console;
pub mod json;

use serde::{Deserialize, Serialize};

use crate::errors::IntakeError;
use crate::model::{VerificationStatus, VerificationVerdict};

/// Current schema version for the JSON report.
pub const SCHEMA_VERSION: u32 = 1;

/// An upload form turned away at intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// Position of the form in the input file, starting at 0. The text report
    /// prints it 1-based.
    pub index: usize,
    pub title: String,
    pub code: String,
    pub message: String,
}

impl Rejection {
    pub fn new(index: usize, title: impl Into<String>, err: &IntakeError) -> Self {
        Self {
            index,
            title: title.into(),
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub verified: usize,
    pub pending: usize,
    pub invalid: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub schema_version: u32,
    pub summary: ReportSummary,
    /// Seed used for the simulated checks, when one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub verdicts: Vec<VerificationVerdict>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<Rejection>,
}

impl Report {
    pub fn new(verdicts: Vec<VerificationVerdict>, rejected: Vec<Rejection>) -> Self {
        let mut summary = ReportSummary {
            total: verdicts.len() + rejected.len(),
            rejected: rejected.len(),
            ..ReportSummary::default()
        };
        for v in &verdicts {
            match v.status {
                VerificationStatus::Verified => summary.verified += 1,
                VerificationStatus::Pending => summary.pending += 1,
                VerificationStatus::Invalid => summary.invalid += 1,
            }
        }
        Self {
            schema_version: SCHEMA_VERSION,
            summary,
            seed: None,
            verdicts,
            rejected,
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// True when every input produced a verified verdict.
    pub fn all_verified(&self) -> bool {
        self.summary.rejected == 0 && self.summary.verified == self.summary.total
    }
}
