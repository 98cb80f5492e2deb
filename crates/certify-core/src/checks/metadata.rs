use serde::{Deserialize, Serialize};

use super::{Check, CheckContext, CheckDetails, CheckKind, CheckResult};
use crate::address::is_stacks_address;
use crate::model::{parse_calendar_date, CertificateRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetadataDetails {
    pub has_all_required_fields: bool,
    pub has_valid_date: bool,
    pub has_valid_recipient: bool,
    pub missing_fields: Vec<String>,
}

#[derive(Debug, Default)]
pub struct MetadataCheck;

fn required_fields(cert: &CertificateRecord) -> [(&'static str, &str); 4] {
    [
        ("title", cert.title.as_str()),
        ("recipient", cert.recipient.as_str()),
        ("issuer", cert.issuer.as_str()),
        ("issue_date", cert.issue_date.as_str()),
    ]
}

/// A recipient is acceptable as a wallet principal, an e-mail-ish string, or
/// any name longer than five characters. Checked on the raw value.
fn is_valid_recipient(recipient: &str) -> bool {
    is_stacks_address(recipient) || recipient.contains('@') || recipient.chars().count() > 5
}

impl Check for MetadataCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::MetadataValidation
    }

    fn evaluate(&self, cert: &CertificateRecord, _ctx: &mut CheckContext<'_>) -> CheckResult {
        let missing_fields: Vec<String> = required_fields(cert)
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name.to_string())
            .collect();

        let has_all_required_fields = missing_fields.is_empty();
        let has_valid_date = parse_calendar_date(&cert.issue_date).is_some();
        let has_valid_recipient = is_valid_recipient(&cert.recipient);

        let passed = has_all_required_fields && has_valid_date && has_valid_recipient;
        tracing::debug!(
            certificate = %cert.id,
            missing = ?missing_fields,
            has_valid_date,
            has_valid_recipient,
            passed,
            "metadata check"
        );

        CheckResult::new(
            passed,
            CheckDetails::Metadata(MetadataDetails {
                has_all_required_fields,
                has_valid_date,
                has_valid_recipient,
                missing_fields,
            }),
        )
    }
}
