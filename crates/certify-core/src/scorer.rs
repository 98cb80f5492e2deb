//! Combines the individual checks into a verdict.

use chrono::{DateTime, Utc};
use rand::{Rng, RngCore};
use std::collections::BTreeMap;

use crate::checks::{
    Check, CheckContext, CheckKind, FileIntegrityCheck, MetadataCheck, SimulatedLedgerCheck,
    SimulatedSignatureCheck, TimestampCheck,
};
use crate::config::CertifyConfig;
use crate::model::{CertificateRecord, VerificationStatus, VerificationVerdict};

/// Percentage of passed checks, rounded half away from zero. No checks → 0.
pub fn score_for(passed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (passed.min(total) as f64 / total as f64) * 100.0;
    pct.round() as u8
}

/// `0x` followed by 40 lowercase hex characters. Display only.
pub fn pseudo_block_hash(rng: &mut dyn RngCore) -> String {
    let mut bytes = [0u8; 20];
    rng.fill_bytes(&mut bytes);
    format!("0x{}", hex::encode(bytes))
}

/// `SP` followed by 8 uppercase hex characters. Display only.
pub fn pseudo_transaction_id(rng: &mut dyn RngCore) -> String {
    let bytes: [u8; 4] = rng.gen();
    format!("SP{}", hex::encode_upper(bytes))
}

pub struct VerificationScorer {
    checks: Vec<Box<dyn Check>>,
}

impl VerificationScorer {
    pub fn new(cfg: &CertifyConfig) -> Self {
        Self::with_checks(vec![
            Box::new(FileIntegrityCheck::new(&cfg.integrity)),
            Box::new(MetadataCheck),
            Box::new(SimulatedLedgerCheck::new(&cfg.simulation)),
            Box::new(SimulatedSignatureCheck::new(&cfg.simulation)),
            Box::new(TimestampCheck::new(&cfg.timestamps)),
        ])
    }

    /// Builds a scorer over an explicit check list, e.g. to swap the
    /// simulated ledger for a real one. A later check of the same kind
    /// replaces an earlier one.
    pub fn with_checks(checks: Vec<Box<dyn Check>>) -> Self {
        Self { checks }
    }

    pub fn check_kinds(&self) -> Vec<CheckKind> {
        self.checks.iter().map(|c| c.kind()).collect()
    }

    /// Verifies against the wall clock with an entropy-seeded RNG.
    pub fn verify(&self, cert: &CertificateRecord) -> VerificationVerdict {
        let mut rng = rand::thread_rng();
        self.verify_at(cert, &mut rng, Utc::now())
    }

    pub fn verify_at(
        &self,
        cert: &CertificateRecord,
        rng: &mut dyn RngCore,
        now: DateTime<Utc>,
    ) -> VerificationVerdict {
        let mut detailed_results = BTreeMap::new();
        {
            let mut ctx = CheckContext::new(&mut *rng, now);
            for check in &self.checks {
                let result = check.evaluate(cert, &mut ctx);
                detailed_results.insert(check.kind(), result);
            }
        }

        let total = detailed_results.len();
        let passed = detailed_results.values().filter(|r| r.passed).count();
        let score = score_for(passed, total);
        let status = VerificationStatus::from_score(score);

        let ledger_passed = detailed_results
            .get(&CheckKind::BlockchainVerification)
            .is_some_and(|r| r.passed);
        let (block_hash, transaction_id) = if ledger_passed {
            (
                Some(pseudo_block_hash(rng)),
                Some(pseudo_transaction_id(rng)),
            )
        } else {
            (None, None)
        };

        tracing::info!(
            certificate = %cert.id,
            passed,
            total,
            score,
            status = %status,
            "certificate verified"
        );

        VerificationVerdict {
            certificate_id: cert.id.clone(),
            is_verified: status == VerificationStatus::Verified,
            status,
            message: status.message().to_string(),
            verification_date: now,
            score,
            block_hash,
            transaction_id,
            detailed_results,
        }
    }
}

impl Default for VerificationScorer {
    fn default() -> Self {
        Self::new(&CertifyConfig::default())
    }
}
