//! Extract command implementation.

use anyhow::Result;
use quotescan_engine::extract::extract_procurement_fields;

use crate::cli::ExtractArgs;
use crate::output::Output;

pub fn run(args: ExtractArgs, output: &Output) -> Result<()> {
    let text = super::read_text(args.text, args.file.as_deref())?;
    let record = extract_procurement_fields(&text);
    output.print_record(&record);
    Ok(())
}
