//! `sangam run` - the interactive wizard
//!
//! With `--answers`, the wizard is driven from a file of per-step patches
//! instead of terminal prompts, which makes the whole flow scriptable.

use clap::Args;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::cli::args::{GlobalOpts, OutputFormat};
use crate::cli::presenter::TerminalPresenter;
use crate::core::config::Config;
use crate::core::session::{SubmitOutcome, WizardController};
use crate::core::value::FieldValues;
use crate::schema::registry::StepRegistry;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Write the completed profile to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Read per-step answers from a YAML/JSON file instead of prompting
    #[arg(long)]
    pub answers: Option<PathBuf>,
}

pub fn run(args: RunArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let registry = StepRegistry::standard()?;
    let mut controller = WizardController::new(registry);

    if !global.quiet {
        println!(
            "{} Creating a new profile ({} steps)",
            style("◆").cyan(),
            controller.step_count()
        );
    }

    let profile = match args.answers {
        Some(ref path) => Some(run_scripted(&mut controller, path)?),
        None => TerminalPresenter::new().run(&mut controller)?,
    };

    let Some(profile) = profile else {
        if !global.quiet {
            println!("{} Wizard abandoned, nothing saved", style("✗").yellow());
        }
        return Ok(());
    };

    let format = resolve_format(global, &config);
    let rendered = render(&profile, format)?;

    let output = args.output.or(config.output);
    match output {
        Some(path) => {
            std::fs::write(&path, rendered).into_diagnostic()?;
            if !global.quiet {
                println!(
                    "{} Profile written to {}",
                    style("✓").green(),
                    path.display()
                );
            }
        }
        None => {
            println!("{}", rendered);
        }
    }

    Ok(())
}

/// Drive the controller from a file mapping step id to field values.
/// Any validation failure aborts with a field-by-field diagnostic.
fn run_scripted(controller: &mut WizardController, path: &Path) -> Result<FieldValues> {
    let contents = std::fs::read_to_string(path).into_diagnostic()?;
    let answers: BTreeMap<String, FieldValues> =
        serde_yml::from_str(&contents).into_diagnostic()?;

    loop {
        let view = controller.current_step_view().into_diagnostic()?;
        let empty = FieldValues::new();
        let patch = answers.get(&view.step_id).unwrap_or(&empty);

        match controller.submit_next(patch).into_diagnostic()? {
            SubmitOutcome::Advanced => {}
            SubmitOutcome::Completed => break,
            SubmitOutcome::Invalid(errors) => {
                let detail: Vec<String> = errors
                    .iter()
                    .map(|(field, message)| format!("  {}: {}", field, message))
                    .collect();
                return Err(miette::miette!(
                    "Step '{}' failed validation:\n{}",
                    view.step_id,
                    detail.join("\n")
                ));
            }
        }
    }

    controller
        .completed_profile()
        .cloned()
        .ok_or_else(|| miette::miette!("Wizard did not reach completion"))
}

/// An explicit CLI flag wins; `Auto` defers to the config, then to JSON
fn resolve_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    match global.format {
        OutputFormat::Auto => config.format().parse().unwrap_or(OutputFormat::Json),
        explicit => explicit,
    }
}

fn render(profile: &FieldValues, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yml::to_string(profile).into_diagnostic(),
        OutputFormat::Json | OutputFormat::Auto => {
            serde_json::to_string_pretty(profile).into_diagnostic()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(format: OutputFormat) -> GlobalOpts {
        GlobalOpts { format, quiet: false }
    }

    #[test]
    fn test_explicit_flag_beats_config() {
        let config = Config { output: None, format: Some("yaml".into()) };
        assert_eq!(
            resolve_format(&global(OutputFormat::Json), &config),
            OutputFormat::Json
        );
        assert_eq!(
            resolve_format(&global(OutputFormat::Yaml), &config),
            OutputFormat::Yaml
        );
    }

    #[test]
    fn test_auto_defers_to_config_then_json() {
        let yaml = Config { output: None, format: Some("yaml".into()) };
        assert_eq!(resolve_format(&global(OutputFormat::Auto), &yaml), OutputFormat::Yaml);

        let unset = Config::default();
        assert_eq!(resolve_format(&global(OutputFormat::Auto), &unset), OutputFormat::Json);
    }
}
