//! Terminal presenter for the wizard
//!
//! Renders whatever the controller's step view marks active, collects user
//! input with dialoguer, and feeds patches back through `submit_next`. All
//! decision logic (visibility, required-ness, validation) stays in the core;
//! this module only prompts and prints.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::format_value;
use crate::core::session::{StepView, SubmitOutcome, WizardController, WizardState};
use crate::core::value::{FieldValue, FieldValues};
use crate::schema::field::{FieldDescriptor, FieldKind};
use crate::schema::step::StepSchema;

/// Interactive step-by-step presenter
pub struct TerminalPresenter {
    theme: ColorfulTheme,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self { theme: ColorfulTheme::default() }
    }

    /// Drive the controller to completion or abandonment. Returns the final
    /// profile, or `None` when the user abandoned the wizard.
    pub fn run(&self, controller: &mut WizardController) -> Result<Option<FieldValues>> {
        loop {
            match controller.state() {
                WizardState::Completed => {
                    return Ok(controller.completed_profile().cloned());
                }
                WizardState::Abandoned => return Ok(None),
                WizardState::Active(_) => {}
            }

            let view = controller.current_step_view().into_diagnostic()?;
            let schema = controller.current_schema().into_diagnostic()?.clone();

            self.print_header(&view);
            self.print_errors(&view);

            if view.index > 0 && !self.navigate(controller)? {
                continue;
            }

            let patch = self.collect(&schema, &view)?;
            match controller.submit_next(&patch).into_diagnostic()? {
                SubmitOutcome::Invalid(errors) => {
                    println!();
                    println!(
                        "{} {} field(s) need attention",
                        style("✗").red(),
                        errors.len()
                    );
                }
                SubmitOutcome::Advanced | SubmitOutcome::Completed => {
                    println!("{} Step saved", style("✓").green());
                }
            }
        }
    }

    fn print_header(&self, view: &StepView) {
        println!();
        println!(
            "{} {} {}",
            style("◆").cyan(),
            style(&view.title).bold(),
            style(format!("(step {} of {})", view.index + 1, view.step_count)).dim()
        );
        println!("{}", style("─".repeat(50)).dim());
    }

    fn print_errors(&self, view: &StepView) {
        for (field, message) in &view.errors {
            println!("  {} {}: {}", style("✗").red(), style(field).bold(), message);
        }
        if !view.errors.is_empty() {
            println!();
        }
    }

    /// Offer back/abandon navigation. Returns true to proceed with the step.
    fn navigate(&self, controller: &mut WizardController) -> Result<bool> {
        let choice = Select::with_theme(&self.theme)
            .with_prompt("Continue?")
            .items(&["Fill this step", "Go back", "Abandon"])
            .default(0)
            .interact()
            .into_diagnostic()?;

        match choice {
            1 => {
                // At step 0 this arm is unreachable; the boundary signal is
                // still tolerated rather than bubbled up
                let _ = controller.go_back();
                Ok(false)
            }
            2 => {
                controller.abandon();
                Ok(false)
            }
            _ => Ok(true),
        }
    }

    /// Prompt for every visible field of the step, prefilled from the draft
    fn collect(&self, schema: &StepSchema, view: &StepView) -> Result<FieldValues> {
        let mut patch = FieldValues::new();

        for field in &schema.fields {
            let active = match view.active.get(&field.name) {
                Some(a) if a.visible => *a,
                _ => continue,
            };

            let previous = view.values.get(&field.name);
            if let Some(value) = self.prompt_field(field, active.required, previous)? {
                patch.insert(field.name.clone(), value);
            }
        }

        Ok(patch)
    }

    fn prompt_field(
        &self,
        field: &FieldDescriptor,
        required: bool,
        previous: Option<&FieldValue>,
    ) -> Result<Option<FieldValue>> {
        let prompt = if required {
            field.display_label()
        } else {
            format!("{} (optional)", field.display_label())
        };

        match &field.kind {
            FieldKind::SingleChoice { options } => {
                let mut items: Vec<&str> = options.iter().map(String::as_str).collect();
                if !required {
                    items.push("(skip)");
                }
                let default_idx = previous
                    .and_then(|v| v.as_text())
                    .and_then(|t| options.iter().position(|o| o == t))
                    .unwrap_or(0);

                let selection = Select::with_theme(&self.theme)
                    .with_prompt(&prompt)
                    .items(&items)
                    .default(default_idx)
                    .interact()
                    .into_diagnostic()?;

                if selection >= options.len() {
                    Ok(None)
                } else {
                    Ok(Some(FieldValue::from(options[selection].as_str())))
                }
            }

            FieldKind::MultiChoice { options } => {
                let chosen: Vec<&str> = previous.map(|v| v.as_choices()).unwrap_or_default();
                let defaults: Vec<bool> =
                    options.iter().map(|o| chosen.contains(&o.as_str())).collect();

                let selections = MultiSelect::with_theme(&self.theme)
                    .with_prompt(&prompt)
                    .items(options)
                    .defaults(&defaults)
                    .interact()
                    .into_diagnostic()?;

                if selections.is_empty() {
                    Ok(None)
                } else {
                    let items: Vec<String> =
                        selections.into_iter().map(|i| options[i].clone()).collect();
                    Ok(Some(FieldValue::List(items)))
                }
            }

            // Text, numbers, and dates are typed in as-is; the validation
            // engine parses and range-checks on submit
            _ => {
                let default_text = previous.map(format_value).unwrap_or_default();
                let value: String = if default_text.is_empty() {
                    Input::with_theme(&self.theme)
                        .with_prompt(&prompt)
                        .allow_empty(true)
                        .interact_text()
                        .into_diagnostic()?
                } else {
                    Input::with_theme(&self.theme)
                        .with_prompt(&prompt)
                        .default(default_text)
                        .allow_empty(true)
                        .interact_text()
                        .into_diagnostic()?
                };

                if value.trim().is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(FieldValue::from(value)))
                }
            }
        }
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}
