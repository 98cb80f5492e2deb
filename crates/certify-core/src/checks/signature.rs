use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{draw_probability, Check, CheckContext, CheckDetails, CheckKind, CheckResult};
use crate::config::SimulationConfig;
use crate::model::CertificateRecord;

pub const SIGNATURE_ALGORITHM: &str = "ECDSA-SHA256";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignatureDetails {
    pub has_valid_signature: bool,
    pub signature_algorithm: Option<String>,
    pub signature_timestamp: Option<DateTime<Utc>>,
}

/// Stand-in for signature verification: a single weighted draw.
pub struct SimulatedSignatureCheck {
    probability: f64,
}

impl SimulatedSignatureCheck {
    pub fn new(cfg: &SimulationConfig) -> Self {
        Self {
            probability: draw_probability(cfg.signature_probability),
        }
    }
}

impl Default for SimulatedSignatureCheck {
    fn default() -> Self {
        Self::new(&SimulationConfig::default())
    }
}

impl Check for SimulatedSignatureCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::DigitalSignature
    }

    fn evaluate(&self, cert: &CertificateRecord, ctx: &mut CheckContext<'_>) -> CheckResult {
        let has_valid_signature = ctx.rng.gen_bool(self.probability);
        tracing::debug!(certificate = %cert.id, has_valid_signature, "simulated signature check");

        let details = if has_valid_signature {
            SignatureDetails {
                has_valid_signature,
                signature_algorithm: Some(SIGNATURE_ALGORITHM.to_string()),
                signature_timestamp: Some(ctx.now),
            }
        } else {
            SignatureDetails {
                has_valid_signature,
                signature_algorithm: None,
                signature_timestamp: None,
            }
        };
        CheckResult::new(has_valid_signature, CheckDetails::Signature(details))
    }
}
