use std::fmt::Write as _;

use super::Report;
use crate::address::short_address;
use crate::catalog::CatalogEntry;
use crate::checks::{CheckDetails, CheckKind};
use crate::model::{VerificationStatus, VerificationVerdict};

fn status_icon(status: VerificationStatus) -> &'static str {
    match status {
        VerificationStatus::Verified => "✅",
        VerificationStatus::Pending => "⏳",
        VerificationStatus::Invalid => "❌",
    }
}

fn detail_line(details: &CheckDetails) -> String {
    match details {
        CheckDetails::FileIntegrity(d) => format!(
            "{} {} (suspicious_ext={} size_ok={} type_ok={})",
            d.file_size,
            d.file_type,
            d.has_suspicious_extension,
            d.is_reasonable_size,
            d.has_valid_type
        ),
        CheckDetails::Metadata(d) if !d.missing_fields.is_empty() => {
            format!("missing: {}", d.missing_fields.join(", "))
        }
        CheckDetails::Metadata(d) => format!(
            "date_ok={} recipient_ok={}",
            d.has_valid_date, d.has_valid_recipient
        ),
        CheckDetails::Ledger(d) => match d.block_height {
            Some(h) => format!("block height {h}"),
            None => format!(
                "record={} recent={}",
                d.has_blockchain_record, d.is_recent_transaction
            ),
        },
        CheckDetails::Signature(d) => d
            .signature_algorithm
            .clone()
            .unwrap_or_else(|| "no valid signature".to_string()),
        CheckDetails::Timestamp(d) => format!(
            "issue_ok={} upload_ok={} sequence_ok={}",
            d.is_issue_date_valid, d.is_upload_date_valid, d.is_time_sequence_valid
        ),
        CheckDetails::Other(v) => v.to_string(),
    }
}

pub fn render_verdict(verdict: &VerificationVerdict) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}  score={} status={}",
        status_icon(verdict.status),
        verdict.certificate_id,
        verdict.score,
        verdict.status
    );
    let _ = writeln!(out, "   {}", verdict.message);
    for kind in CheckKind::ALL {
        if let Some(result) = verdict.check(kind) {
            let mark = if result.passed { "pass" } else { "FAIL" };
            let _ = writeln!(
                out,
                "   [{mark}] {:<24} {}",
                kind.label(),
                detail_line(&result.details)
            );
        }
    }
    if let (Some(hash), Some(tx)) = (&verdict.block_hash, &verdict.transaction_id) {
        let _ = writeln!(out, "   block {}  tx {}", short_address(hash), tx);
    }
    out
}

pub fn render_report(report: &Report) -> String {
    let mut out = String::new();
    for verdict in &report.verdicts {
        out.push_str(&render_verdict(verdict));
    }
    for r in &report.rejected {
        let _ = writeln!(
            out,
            "🚫 form #{} ({}): {} [{}]",
            r.index + 1,
            r.title,
            r.message,
            r.code
        );
    }
    let s = &report.summary;
    let _ = writeln!(
        out,
        "Results: total={} verified={} pending={} invalid={} rejected={}",
        s.total, s.verified, s.pending, s.invalid, s.rejected
    );
    out
}

pub fn render_catalog_entry(entry: &CatalogEntry) -> String {
    format!(
        "{} {}\n   issuer: {}\n   recipient: {}\n   issued: {}\n   status: {}\n   block: {}  tx: {}\n",
        status_icon(entry.status),
        entry.title,
        entry.issuer,
        entry.recipient,
        entry.issue_date,
        entry.status,
        entry.block_hash,
        entry.transaction_id
    )
}
