use certify_core::catalog::Catalog;
use certify_core::report::console;

use crate::cli::args::{LookupArgs, OutputFormat};
use crate::exit_codes;

pub fn run(args: LookupArgs) -> anyhow::Result<i32> {
    let catalog = Catalog::demo();
    let Some(entry) = catalog.search(&args.query) else {
        eprintln!("No certificate matches '{}'", args.query.trim());
        return Ok(exit_codes::NOT_VERIFIED);
    };

    match args.format {
        OutputFormat::Text => print!("{}", console::render_catalog_entry(entry)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(entry)?),
    }
    Ok(exit_codes::OK)
}
