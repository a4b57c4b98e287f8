//! Templates command.

use console::style;
use serde::Serialize;

use crate::models::{FieldDescriptor, FormType};

#[derive(Serialize)]
struct TemplateOutput {
    form_type: FormType,
    title: &'static str,
    fields: &'static [FieldDescriptor],
}

pub fn cmd_templates(form: Option<FormType>, json: bool) -> anyhow::Result<()> {
    let forms: Vec<FormType> = match form {
        Some(form_type) => vec![form_type],
        None => FormType::ALL.to_vec(),
    };

    if json {
        let output: Vec<TemplateOutput> = forms
            .iter()
            .map(|form_type| TemplateOutput {
                form_type: *form_type,
                title: form_type.title(),
                fields: form_type.template(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for form_type in forms {
        println!(
            "\n{} {}",
            style(form_type.as_str()).bold(),
            style(form_type.title()).cyan()
        );
        println!("{}", "-".repeat(70));
        for field in form_type.template() {
            let required = if field.required {
                style("required").yellow()
            } else {
                style("optional").dim()
            };
            println!("  {:<26} {:<45} {}", field.key, field.label, required);
        }
    }
    println!();

    Ok(())
}
