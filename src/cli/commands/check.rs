//! `sangam check` - verify the registered step schemas
//!
//! Misconfiguration is normally fatal at wizard startup; this command
//! surfaces the same diagnostics without entering the wizard.

use clap::Args;
use console::style;
use miette::Result;

use crate::cli::args::GlobalOpts;
use crate::schema::registry::StepRegistry;

#[derive(Args, Debug)]
pub struct CheckArgs {}

pub fn run(_args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let registry = StepRegistry::standard()?;

    if !global.quiet {
        let fields: usize = registry.iter().map(|s| s.fields.len()).sum();
        let rules: usize = registry.iter().map(|s| s.rules.len()).sum();
        println!(
            "{} {} step(s), {} field(s), {} conditional rule(s) - all consistent",
            style("✓").green(),
            registry.len(),
            fields,
            rules
        );
    }

    Ok(())
}
