use anyhow::Context;
use certify_core::intake::UploadForm;
use certify_core::report::{Rejection, Report};
use certify_core::{FileRef, Session};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::scoring;
use crate::cli::args::UploadArgs;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct UploadBatch {
    #[serde(default)]
    wallet: Option<String>,
    uploads: Vec<UploadEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct UploadEntry {
    #[serde(default)]
    title: String,
    #[serde(default)]
    recipient: String,
    #[serde(default)]
    issuer: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    description: Option<String>,
    /// Relative paths resolve against the forms file's directory.
    #[serde(default)]
    file: Option<PathBuf>,
    /// Declared type; guessed from the extension when absent.
    #[serde(default)]
    mime_type: Option<String>,
}

pub(crate) fn guess_mime_type(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

/// Describes the selected file the way a browser file picker would. A path
/// that does not name a readable file counts as no file selected.
fn describe_file(base: &Path, path: &Path, declared: Option<&str>) -> Option<FileRef> {
    let full = base.join(path);
    let meta = match std::fs::metadata(&full) {
        Ok(m) if m.is_file() => m,
        Ok(_) => {
            tracing::warn!(path = %full.display(), "not a regular file");
            return None;
        }
        Err(e) => {
            tracing::warn!(path = %full.display(), error = %e, "cannot stat certificate file");
            return None;
        }
    };
    let name = full.file_name()?.to_string_lossy().into_owned();
    let mime_type = declared
        .map(str::to_string)
        .unwrap_or_else(|| guess_mime_type(&name).to_string());
    Some(FileRef {
        name,
        size: meta.len(),
        mime_type,
    })
}

pub fn run(args: UploadArgs) -> anyhow::Result<i32> {
    let raw = std::fs::read_to_string(&args.forms)
        .with_context(|| format!("failed to read forms {}", args.forms.display()))?;
    let batch: UploadBatch = serde_yaml::from_str(&raw)
        .with_context(|| format!("invalid forms file {}", args.forms.display()))?;
    let base = args
        .forms
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let mut ctx = scoring::prepare(&args.scoring)?;
    let wallet = args.wallet.clone().or(batch.wallet);

    let mut session = Session::new();
    let mut rejected = Vec::new();
    for (index, entry) in batch.uploads.into_iter().enumerate() {
        let file = entry
            .file
            .as_deref()
            .and_then(|p| describe_file(&base, p, entry.mime_type.as_deref()));
        let form = UploadForm {
            title: entry.title,
            recipient: entry.recipient,
            issuer: entry.issuer,
            date: entry.date,
            description: entry.description,
            file,
        };
        if let Err(e) = session.upload(&form, wallet.as_deref(), &ctx.cfg.intake, ctx.now) {
            rejected.push(Rejection::new(index, form.title.clone(), &e));
        }
    }

    let verdicts = session.verify_all(&ctx.scorer, &mut ctx.rng, ctx.now);
    let report = Report::new(verdicts, rejected).with_seed(args.scoring.seed);

    scoring::emit(&report, &args.scoring)?;
    Ok(scoring::exit_code(&report))
}
