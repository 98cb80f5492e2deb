//! Per-session state: uploaded certificates and their latest verdicts.
//!
//! Owned by the caller and passed by reference; nothing here is global.

use chrono::{DateTime, Utc};
use rand::RngCore;
use std::collections::HashMap;

use crate::config::IntakeConfig;
use crate::errors::IntakeError;
use crate::intake::{intake, UploadForm};
use crate::model::{CertificateRecord, VerificationVerdict};
use crate::scorer::VerificationScorer;

#[derive(Debug, Default)]
pub struct Session {
    certificates: Vec<CertificateRecord>,
    verdicts: HashMap<String, VerificationVerdict>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: CertificateRecord) -> Result<&CertificateRecord, IntakeError> {
        if self.get(&record.id).is_some() {
            return Err(IntakeError::DuplicateId { id: record.id });
        }
        self.certificates.push(record);
        Ok(&self.certificates[self.certificates.len() - 1])
    }

    /// Runs intake and stores the record. Ids derive from the upload time, so
    /// uploads landing in the same millisecond get a `-N` suffix.
    pub fn upload(
        &mut self,
        form: &UploadForm,
        wallet: Option<&str>,
        cfg: &IntakeConfig,
        now: DateTime<Utc>,
    ) -> Result<&CertificateRecord, IntakeError> {
        let mut record = match intake(form, wallet, cfg, now) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(code = e.code(), error = %e, "upload rejected");
                return Err(e);
            }
        };

        if self.get(&record.id).is_some() {
            let base = record.id.clone();
            let mut n = 1;
            while self.get(&format!("{base}-{n}")).is_some() {
                n += 1;
            }
            record.id = format!("{base}-{n}");
        }
        tracing::info!(certificate = %record.id, file = %record.file.name, "certificate uploaded");
        self.add(record)
    }

    pub fn certificates(&self) -> &[CertificateRecord] {
        &self.certificates
    }

    pub fn get(&self, id: &str) -> Option<&CertificateRecord> {
        self.certificates.iter().find(|c| c.id == id)
    }

    pub fn verdict(&self, id: &str) -> Option<&VerificationVerdict> {
        self.verdicts.get(id)
    }

    /// Scores one stored certificate. The new verdict replaces any earlier
    /// one for the same id.
    pub fn verify(
        &mut self,
        id: &str,
        scorer: &VerificationScorer,
        rng: &mut dyn RngCore,
        now: DateTime<Utc>,
    ) -> Option<&VerificationVerdict> {
        let cert = self.certificates.iter().find(|c| c.id == id)?;
        let verdict = scorer.verify_at(cert, rng, now);
        self.verdicts.insert(id.to_string(), verdict);
        self.verdicts.get(id)
    }

    /// Scores every stored certificate in upload order.
    pub fn verify_all(
        &mut self,
        scorer: &VerificationScorer,
        rng: &mut dyn RngCore,
        now: DateTime<Utc>,
    ) -> Vec<VerificationVerdict> {
        let mut out = Vec::with_capacity(self.certificates.len());
        for cert in &self.certificates {
            let verdict = scorer.verify_at(cert, rng, now);
            self.verdicts.insert(cert.id.clone(), verdict.clone());
            out.push(verdict);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::fixtures;
    use crate::config::{CertifyConfig, SimulationConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn certain_scorer(signature_probability: f64) -> VerificationScorer {
        let mut cfg = CertifyConfig::default();
        cfg.simulation = SimulationConfig {
            ledger_record_probability: 1.0,
            ledger_recency_probability: 1.0,
            signature_probability,
            ..SimulationConfig::default()
        };
        VerificationScorer::new(&cfg)
    }

    fn form() -> UploadForm {
        UploadForm {
            title: "DeFi Specialist".to_string(),
            recipient: "Mike Johnson".to_string(),
            issuer: "Web3 Institute".to_string(),
            date: "2024-03-10".to_string(),
            description: None,
            file: Some(fixtures::record().file),
        }
    }

    #[test]
    fn duplicate_ids_are_rejected_on_add() {
        let mut session = Session::new();
        session.add(fixtures::record()).unwrap();
        let err = session.add(fixtures::record()).unwrap_err();
        assert_eq!(
            err,
            IntakeError::DuplicateId {
                id: "CERT-1".to_string()
            }
        );
        assert_eq!(session.certificates().len(), 1);
    }

    #[test]
    fn same_millisecond_uploads_get_suffixes() {
        let mut session = Session::new();
        let cfg = IntakeConfig::default();
        let now = fixtures::now();
        let wallet = Some(fixtures::RECIPIENT_ADDRESS);

        let a = session.upload(&form(), wallet, &cfg, now).unwrap().id.clone();
        let b = session.upload(&form(), wallet, &cfg, now).unwrap().id.clone();
        let c = session.upload(&form(), wallet, &cfg, now).unwrap().id.clone();
        assert_eq!(b, format!("{a}-1"));
        assert_eq!(c, format!("{a}-2"));
        assert_eq!(session.certificates().len(), 3);
    }

    #[test]
    fn rejected_upload_leaves_session_unchanged() {
        let mut session = Session::new();
        let err = session
            .upload(&form(), None, &IntakeConfig::default(), fixtures::now())
            .unwrap_err();
        assert_eq!(err, IntakeError::WalletNotConnected);
        assert!(session.certificates().is_empty());
    }

    #[test]
    fn later_verdict_replaces_earlier() {
        let mut session = Session::new();
        session.add(fixtures::record()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let first = session
            .verify("CERT-1", &certain_scorer(1.0), &mut rng, fixtures::now())
            .unwrap()
            .score;
        assert_eq!(first, 100);

        let second = session
            .verify("CERT-1", &certain_scorer(0.0), &mut rng, fixtures::now())
            .unwrap()
            .score;
        assert_eq!(second, 80);
        assert_eq!(session.verdict("CERT-1").unwrap().score, 80);
    }

    #[test]
    fn unknown_id_has_no_verdict() {
        let mut session = Session::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(session
            .verify("missing", &VerificationScorer::default(), &mut rng, fixtures::now())
            .is_none());
        assert!(session.verdict("missing").is_none());
    }

    #[test]
    fn verify_all_keeps_upload_order() {
        let mut session = Session::new();
        let mut second = fixtures::record();
        second.id = "CERT-2".to_string();
        session.add(fixtures::record()).unwrap();
        session.add(second).unwrap();

        let mut rng = StdRng::seed_from_u64(1);
        let verdicts = session.verify_all(&certain_scorer(1.0), &mut rng, fixtures::now());
        let ids: Vec<_> = verdicts.iter().map(|v| v.certificate_id.as_str()).collect();
        assert_eq!(ids, ["CERT-1", "CERT-2"]);
        assert!(session.verdict("CERT-2").is_some());
    }
}
