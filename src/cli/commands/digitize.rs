//! Digitize command: recognize pages, then extract and validate.

use std::path::PathBuf;

use anyhow::Context;
use console::style;
use tokio::sync::mpsc;
use tracing::warn;

use super::ClaimArgs;
use crate::cli::{helpers, progress};
use crate::config::Config;
use crate::ocr::{RecognitionBackend, RecognitionEngine, TesseractBackend};
use crate::pipeline::{process_pages, BatchEvent, Digitization};
use crate::validation::Validator;

pub async fn cmd_digitize(
    config: &Config,
    files: &[PathBuf],
    claim_args: &ClaimArgs,
    json: bool,
) -> anyhow::Result<()> {
    let validator = Validator::new(config.validation.rules()?);

    let pages = helpers::load_pages(files).await?;
    if pages.is_empty() {
        println!("{} No pages to digitize", style("!").yellow());
        return Ok(());
    }

    let backend = TesseractBackend::with_config(config.ocr.tesseract_config());
    if !backend.is_available() {
        anyhow::bail!("{}", backend.availability_hint());
    }

    let mut engine = RecognitionEngine::new(backend);
    let shutdown = engine.shutdown_handle();

    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, finishing current page");
            shutdown.request();
        }
    });

    let (event_tx, event_rx) = mpsc::unbounded_channel::<BatchEvent>();
    let renderer = progress::spawn_renderer(event_rx, !json);

    // The engine is synchronous; keep it off the async workers.
    let outcome = tokio::task::spawn_blocking(move || {
        let sink = move |event: BatchEvent| {
            let _ = event_tx.send(event);
        };
        let outcome = process_pages(&mut engine, &pages, &sink);
        engine.shutdown();
        outcome
    })
    .await
    .context("Recognition task failed")??;

    interrupt.abort();
    let _ = renderer.await;

    let mut digitization = Digitization::from_outcome(outcome);
    if let Some(form_type) = claim_args.form {
        digitization.reclassify(form_type);
    }

    let claim = claim_args.apply(digitization.claim_data());
    let report = validator.generate_validation_report(&claim);

    if json {
        helpers::print_json(&digitization, &report)?;
    } else {
        helpers::print_pages(&digitization);
        helpers::print_fields(&digitization);
        helpers::print_report(&report);
    }

    Ok(())
}
