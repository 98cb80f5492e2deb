use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{draw_probability, Check, CheckContext, CheckDetails, CheckKind, CheckResult};
use crate::config::SimulationConfig;
use crate::model::CertificateRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerDetails {
    pub has_blockchain_record: bool,
    pub is_recent_transaction: bool,
    pub block_height: Option<u64>,
}

/// Stand-in for a ledger lookup. Two independent draws decide whether a
/// record exists and whether it is recent; the block height is synthetic.
pub struct SimulatedLedgerCheck {
    record_probability: f64,
    recency_probability: f64,
    block_heights: std::ops::Range<u64>,
}

impl SimulatedLedgerCheck {
    pub fn new(cfg: &SimulationConfig) -> Self {
        Self {
            record_probability: draw_probability(cfg.ledger_record_probability),
            recency_probability: draw_probability(cfg.ledger_recency_probability),
            block_heights: cfg.block_height_min..cfg.block_height_max,
        }
    }
}

impl Default for SimulatedLedgerCheck {
    fn default() -> Self {
        Self::new(&SimulationConfig::default())
    }
}

impl Check for SimulatedLedgerCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::BlockchainVerification
    }

    fn evaluate(&self, cert: &CertificateRecord, ctx: &mut CheckContext<'_>) -> CheckResult {
        let has_blockchain_record = ctx.rng.gen_bool(self.record_probability);
        let is_recent_transaction = ctx.rng.gen_bool(self.recency_probability);
        let passed = has_blockchain_record && is_recent_transaction;

        let block_height = if passed && !self.block_heights.is_empty() {
            Some(ctx.rng.gen_range(self.block_heights.clone()))
        } else {
            None
        };

        tracing::debug!(
            certificate = %cert.id,
            has_blockchain_record,
            is_recent_transaction,
            ?block_height,
            "simulated ledger check"
        );

        CheckResult::new(
            passed,
            CheckDetails::Ledger(LedgerDetails {
                has_blockchain_record,
                is_recent_transaction,
                block_height,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::fixtures;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn check(record: f64, recency: f64) -> SimulatedLedgerCheck {
        SimulatedLedgerCheck::new(&SimulationConfig {
            ledger_record_probability: record,
            ledger_recency_probability: recency,
            ..SimulationConfig::default()
        })
    }

    fn details(result: &CheckResult) -> &LedgerDetails {
        match &result.details {
            CheckDetails::Ledger(d) => d,
            other => panic!("unexpected details: {other:?}"),
        }
    }

    #[test]
    fn certain_pass_attaches_height_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let mut ctx = CheckContext::new(&mut rng, fixtures::now());
            let result = check(1.0, 1.0).evaluate(&fixtures::record(), &mut ctx);
            assert!(result.passed);
            let height = details(&result).block_height.unwrap();
            assert!((1_000_000..2_000_000).contains(&height));
        }
    }

    #[test]
    fn stale_record_fails_without_height() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut ctx = CheckContext::new(&mut rng, fixtures::now());
        let result = check(1.0, 0.0).evaluate(&fixtures::record(), &mut ctx);
        assert!(!result.passed);
        let d = details(&result);
        assert!(d.has_blockchain_record);
        assert!(!d.is_recent_transaction);
        assert_eq!(d.block_height, None);
    }

    #[test]
    fn default_pass_rate_is_about_seventy_two_percent() {
        let mut rng = StdRng::seed_from_u64(2024);
        let ledger = SimulatedLedgerCheck::default();
        let trials = 20_000;
        let mut passes = 0;
        for _ in 0..trials {
            let mut ctx = CheckContext::new(&mut rng, fixtures::now());
            if ledger.evaluate(&fixtures::record(), &mut ctx).passed {
                passes += 1;
            }
        }
        let rate = passes as f64 / trials as f64;
        assert!((0.69..0.75).contains(&rate), "rate={rate}");
    }

    #[test]
    fn same_seed_same_outcome() {
        let ledger = SimulatedLedgerCheck::default();
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        let ra = ledger.evaluate(
            &fixtures::record(),
            &mut CheckContext::new(&mut a, fixtures::now()),
        );
        let rb = ledger.evaluate(
            &fixtures::record(),
            &mut CheckContext::new(&mut b, fixtures::now()),
        );
        assert_eq!(ra, rb);
    }

    #[test]
    fn nan_probability_never_passes() {
        let ledger = check(f64::NAN, 1.0);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let mut ctx = CheckContext::new(&mut rng, fixtures::now());
            let result = ledger.evaluate(&fixtures::record(), &mut ctx);
            assert!(!result.passed);
            assert!(!details(&result).has_blockchain_record);
        }
    }
}
