use anyhow::Context;
use certify_core::report::Report;
use certify_core::{CertificateRecord, Session};
use serde::Deserialize;

use super::scoring;
use crate::cli::args::VerifyArgs;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecordManifest {
    certificates: Vec<CertificateRecord>,
}

pub fn run(args: VerifyArgs) -> anyhow::Result<i32> {
    let raw = std::fs::read_to_string(&args.manifest)
        .with_context(|| format!("failed to read manifest {}", args.manifest.display()))?;
    // YAML is a superset of JSON, so one parser covers both.
    let manifest: RecordManifest = serde_yaml::from_str(&raw)
        .with_context(|| format!("invalid manifest {}", args.manifest.display()))?;

    let mut ctx = scoring::prepare(&args.scoring)?;

    let mut session = Session::new();
    for record in manifest.certificates {
        session
            .add(record)
            .with_context(|| format!("invalid manifest {}", args.manifest.display()))?;
    }

    let verdicts = session.verify_all(&ctx.scorer, &mut ctx.rng, ctx.now);
    let report = Report::new(verdicts, Vec::new()).with_seed(args.scoring.seed);

    scoring::emit(&report, &args.scoring)?;
    Ok(scoring::exit_code(&report))
}
