//! Extract command: classify, extract and validate recognized text.

use std::path::Path;

use anyhow::Context;

use super::ClaimArgs;
use crate::cli::helpers;
use crate::config::Config;
use crate::pipeline::Digitization;
use crate::validation::Validator;

pub async fn cmd_extract(
    config: &Config,
    file: &Path,
    claim_args: &ClaimArgs,
    json: bool,
) -> anyhow::Result<()> {
    let validator = Validator::new(config.validation.rules()?);

    let text = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let mut digitization = Digitization::from_text(text);
    if let Some(form_type) = claim_args.form {
        digitization.reclassify(form_type);
    }

    let claim = claim_args.apply(digitization.claim_data());
    let report = validator.generate_validation_report(&claim);

    if json {
        helpers::print_json(&digitization, &report)?;
    } else {
        helpers::print_fields(&digitization);
        helpers::print_report(&report);
    }

    Ok(())
}
