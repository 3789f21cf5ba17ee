//! `sangam schema` - dump a step schema

use clap::Args;
use miette::{IntoDiagnostic, Result};

use crate::cli::args::{GlobalOpts, OutputFormat};
use crate::schema::registry::StepRegistry;

#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Step id (see `sangam steps`)
    pub step: String,
}

pub fn run(args: SchemaArgs, global: &GlobalOpts) -> Result<()> {
    let registry = StepRegistry::standard()?;

    let Some(step) = registry.get(&args.step) else {
        let known = registry.step_order().join(", ");
        return Err(miette::miette!(
            "Unknown step '{}'. Known steps: {}",
            args.step,
            known
        ));
    };

    let rendered = match global.format {
        OutputFormat::Yaml => serde_yml::to_string(step).into_diagnostic()?,
        OutputFormat::Json | OutputFormat::Auto => {
            serde_json::to_string_pretty(step).into_diagnostic()?
        }
    };
    println!("{}", rendered);

    Ok(())
}
