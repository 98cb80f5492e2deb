use anyhow::Context;
use certify_core::config::write_sample_config;

use crate::cli::args::InitArgs;
use crate::exit_codes;

pub fn run(args: InitArgs) -> anyhow::Result<i32> {
    write_sample_config(&args.config)
        .with_context(|| format!("could not initialise {}", args.config.display()))?;
    eprintln!("Created {}", args.config.display());
    Ok(exit_codes::OK)
}
