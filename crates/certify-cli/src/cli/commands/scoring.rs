//! Setup and output shared by `verify` and `upload`.

use anyhow::Context;
use certify_core::config::load_config_or_default;
use certify_core::model::parse_calendar_date;
use certify_core::report::{console, json, Report};
use certify_core::{CertifyConfig, VerificationScorer};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cli::args::{OutputFormat, ScoringArgs};
use crate::exit_codes;

pub(crate) struct ScoringContext {
    pub cfg: CertifyConfig,
    pub scorer: VerificationScorer,
    pub rng: StdRng,
    pub now: DateTime<Utc>,
}

pub(crate) fn prepare(args: &ScoringArgs) -> anyhow::Result<ScoringContext> {
    let cfg = load_config_or_default(&args.config)
        .with_context(|| format!("config error in {}", args.config.display()))?;

    let now = match &args.now {
        Some(raw) => parse_calendar_date(raw)
            .ok_or_else(|| anyhow::anyhow!("invalid --now value '{raw}'"))?,
        None => Utc::now(),
    };

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    tracing::debug!(
        config = %args.config.display(),
        seed = ?args.seed,
        %now,
        "scoring context ready"
    );
    Ok(ScoringContext {
        scorer: VerificationScorer::new(&cfg),
        cfg,
        rng,
        now,
    })
}

pub(crate) fn emit(report: &Report, args: &ScoringArgs) -> anyhow::Result<()> {
    let rendered = match args.format {
        OutputFormat::Text => console::render_report(report),
        OutputFormat::Json => json::to_json_string(report)?,
    };

    if let Some(path) = &args.output {
        std::fs::write(path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("Report written to {}", path.display());
    } else if args.format == OutputFormat::Text {
        print!("{rendered}");
    } else {
        println!("{rendered}");
    }
    Ok(())
}

pub(crate) fn exit_code(report: &Report) -> i32 {
    if report.all_verified() {
        exit_codes::OK
    } else {
        exit_codes::NOT_VERIFIED
    }
}
