//! Demo command - run the built-in sample scenario

use anyhow::Result;

use super::get_context;
use super::run::print_report;
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let report = ctx.demo_service.run()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::info("Demo mode: sample bank, nothing is saved");
    println!();
    print_report(&report);

    Ok(())
}
