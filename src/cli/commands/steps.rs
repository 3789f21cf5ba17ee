//! `sangam steps` - list the wizard steps

use clap::Args;
use miette::Result;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::args::GlobalOpts;
use crate::cli::helpers::truncate_str;
use crate::schema::registry::StepRegistry;

#[derive(Args, Debug)]
pub struct StepsArgs {}

#[derive(Tabled)]
struct StepRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "TITLE")]
    title: String,
    #[tabled(rename = "FIELDS")]
    fields: usize,
    #[tabled(rename = "REQUIRED")]
    required: usize,
    #[tabled(rename = "RULES")]
    rules: usize,
}

pub fn run(_args: StepsArgs, global: &GlobalOpts) -> Result<()> {
    let registry = StepRegistry::standard()?;

    let rows: Vec<StepRow> = registry
        .iter()
        .enumerate()
        .map(|(i, step)| StepRow {
            position: i + 1,
            id: step.id.clone(),
            title: truncate_str(&step.title, 32),
            fields: step.fields.len(),
            required: step.fields.iter().filter(|f| f.required).count(),
            rules: step.rules.len(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);

    if !global.quiet {
        println!("{} step(s)", registry.len());
    }

    Ok(())
}
