use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::{Check, CheckContext, CheckDetails, CheckKind, CheckResult};
use crate::config::TimestampConfig;
use crate::model::{parse_calendar_date, CertificateRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimestampDetails {
    pub is_issue_date_valid: bool,
    pub is_upload_date_valid: bool,
    pub is_time_sequence_valid: bool,
    /// `None` when the issue date does not parse.
    pub issue_date: Option<DateTime<Utc>>,
    pub upload_date: DateTime<Utc>,
}

/// Issue date must fall in `[earliest, now]`; upload date in `[issue, now]`.
pub struct TimestampCheck {
    earliest_issue: DateTime<Utc>,
}

impl TimestampCheck {
    pub fn new(cfg: &TimestampConfig) -> Self {
        Self {
            earliest_issue: midnight_utc(cfg.earliest_issue_date),
        }
    }
}

impl Default for TimestampCheck {
    fn default() -> Self {
        Self::new(&TimestampConfig::default())
    }
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

impl Check for TimestampCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::TimestampValidation
    }

    fn evaluate(&self, cert: &CertificateRecord, ctx: &mut CheckContext<'_>) -> CheckResult {
        let now = ctx.now;
        let issue = parse_calendar_date(&cert.issue_date);
        let upload = cert.upload_date;

        let is_issue_date_valid = issue.is_some_and(|d| d <= now && d >= self.earliest_issue);
        let is_time_sequence_valid = issue.is_some_and(|d| upload >= d);
        let is_upload_date_valid = upload <= now && is_time_sequence_valid;

        let passed = is_issue_date_valid && is_upload_date_valid && is_time_sequence_valid;
        tracing::debug!(
            certificate = %cert.id,
            is_issue_date_valid,
            is_upload_date_valid,
            is_time_sequence_valid,
            passed,
            "timestamp check"
        );

        CheckResult::new(
            passed,
            CheckDetails::Timestamp(TimestampDetails {
                is_issue_date_valid,
                is_upload_date_valid,
                is_time_sequence_valid,
                issue_date: issue,
                upload_date: upload,
            }),
        )
    }
}
