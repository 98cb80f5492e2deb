use certify_core::checks::{CheckDetails, CheckKind};
use certify_core::model::{CertificateRecord, FileRef, VerificationStatus};
use certify_core::scorer::VerificationScorer;
use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

fn record(name: &str, mime: &str, recipient: &str) -> CertificateRecord {
    CertificateRecord {
        id: "CERT-1718000000000".to_string(),
        title: "X".to_string(),
        recipient: recipient.to_string(),
        issuer: "Y".to_string(),
        issue_date: "2024-01-01".to_string(),
        upload_date: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
        file: FileRef {
            name: name.to_string(),
            size: 1000,
            mime_type: mime.to_string(),
        },
        wallet_address: None,
        description: None,
    }
}

#[test]
fn reference_certificate_passes_deterministic_checks() {
    let cert = record(
        "c.pdf",
        "application/pdf",
        "SP1234567890ABCDEFGHIJKLMNOPQRSTUVWXYZ12",
    );
    let mut rng = StdRng::seed_from_u64(0);
    let verdict = VerificationScorer::default().verify_at(&cert, &mut rng, now());

    for kind in [
        CheckKind::MetadataValidation,
        CheckKind::FileIntegrity,
        CheckKind::TimestampValidation,
    ] {
        assert!(verdict.check(kind).unwrap().passed, "{kind} should pass");
    }
    assert!(verdict.score >= 60);
}

#[test]
fn executable_name_fails_integrity_for_any_declared_type() {
    for mime in ["application/pdf", "image/png", "application/octet-stream"] {
        let cert = record("cert.exe", mime, "Jane Smith");
        let mut rng = StdRng::seed_from_u64(0);
        let verdict = VerificationScorer::default().verify_at(&cert, &mut rng, now());
        let integrity = verdict.check(CheckKind::FileIntegrity).unwrap();
        assert!(!integrity.passed);
        match &integrity.details {
            CheckDetails::FileIntegrity(d) => assert!(d.has_suspicious_extension),
            other => panic!("unexpected details: {other:?}"),
        }
    }
}

proptest! {
    #[test]
    fn status_and_identifiers_follow_the_checks(seed in any::<u64>()) {
        let cert = record("c.pdf", "application/pdf", "Jane Smith");
        let mut rng = StdRng::seed_from_u64(seed);
        let verdict = VerificationScorer::default().verify_at(&cert, &mut rng, now());

        prop_assert_eq!(verdict.detailed_results.len(), 5);
        prop_assert_eq!(verdict.score as usize, verdict.passed_checks() * 20);
        prop_assert_eq!(verdict.status, VerificationStatus::from_score(verdict.score));
        prop_assert_eq!(verdict.is_verified, verdict.status == VerificationStatus::Verified);

        let ledger = verdict.check(CheckKind::BlockchainVerification).unwrap().passed;
        prop_assert_eq!(verdict.block_hash.is_some(), ledger);
        prop_assert_eq!(verdict.transaction_id.is_some(), ledger);
    }

    #[test]
    fn score_bands_partition_the_range(score in 0u8..=100) {
        let status = VerificationStatus::from_score(score);
        let expected = if score >= 80 {
            VerificationStatus::Verified
        } else if score >= 60 {
            VerificationStatus::Pending
        } else {
            VerificationStatus::Invalid
        };
        prop_assert_eq!(status, expected);
    }
}
