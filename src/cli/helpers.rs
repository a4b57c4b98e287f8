//! Shared helper functions for CLI commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use console::style;
use serde::Serialize;

use crate::models::{MediaKind, Page};
use crate::ocr::pdf_utils::pdf_page_count;
use crate::pipeline::Digitization;
use crate::validation::ValidationReport;

/// MIME type from content sniffing, falling back to the file extension.
pub fn detect_media_type(path: &Path, content: &[u8]) -> String {
    infer::get(content)
        .map(|t| t.mime_type().to_string())
        .or_else(|| mime_guess::from_path(path).first().map(|m| m.essence_str().to_string()))
        .unwrap_or_else(|| "application/octet-stream".to_string())
}

/// Read files into pages, numbered in argument order. Each PDF page becomes
/// its own page.
pub async fn load_pages(files: &[PathBuf]) -> anyhow::Result<Vec<Page>> {
    let mut pages = Vec::new();

    for path in files {
        let content: Arc<[u8]> = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?
            .into();
        let media_type = detect_media_type(path, &content);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        if MediaKind::from_mime(&media_type) == Some(MediaKind::Pdf) {
            let pdf_path = path.clone();
            let count = tokio::task::spawn_blocking(move || pdf_page_count(&pdf_path))
                .await
                .context("Page count task panicked")?
                .with_context(|| format!("Failed to count pages of {}", path.display()))?;
            for pdf_page in 1..=count {
                pages.push(
                    Page::new(pages.len() as u32 + 1, Arc::clone(&content), media_type.clone())
                        .with_file_name(file_name.clone())
                        .with_pdf_page(pdf_page),
                );
            }
        } else {
            pages.push(
                Page::new(pages.len() as u32 + 1, content, media_type)
                    .with_file_name(file_name),
            );
        }
    }

    Ok(pages)
}

#[derive(Serialize)]
struct Output<'a> {
    #[serde(flatten)]
    digitization: &'a Digitization,
    validation: &'a ValidationReport,
}

/// Print the digitization and its validation report as pretty JSON.
pub fn print_json(digitization: &Digitization, report: &ValidationReport) -> anyhow::Result<()> {
    let output = Output {
        digitization,
        validation: report,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Per-page recognition summary.
pub fn print_pages(digitization: &Digitization) {
    if digitization.results().is_empty() {
        return;
    }

    println!("\n{}", style("Pages").bold());
    for result in digitization.results() {
        let name = result
            .file_name
            .clone()
            .unwrap_or_else(|| format!("page_{}", result.page_number));
        if result.success {
            println!(
                "  {} {:>3}  {:<30} {:>5.1}%",
                style("✓").green(),
                result.page_number,
                name,
                result.confidence
            );
        } else {
            println!(
                "  {} {:>3}  {:<30} {}",
                style("✗").red(),
                result.page_number,
                name,
                style(result.error.as_deref().unwrap_or("failed")).dim()
            );
        }
    }
}

/// Extracted fields in template order.
pub fn print_fields(digitization: &Digitization) {
    let form_type = digitization.form_type();
    println!(
        "\n{} {} ({})",
        style("Form:").bold(),
        form_type,
        form_type.title()
    );

    for (field, value) in digitization.fields().iter_template() {
        let marker = if field.required { "*" } else { " " };
        if value.is_empty() {
            println!("  {}{:<45} {}", marker, field.label, style("-").dim());
        } else {
            println!("  {}{:<45} {}", marker, field.label, value);
        }
    }

    if !digitization.dates().is_empty() {
        println!(
            "\n{} {}",
            style("Dates found:").bold(),
            digitization.dates().join(", ")
        );
    }
}

/// Errors and warnings, followed by the verdict.
pub fn print_report(report: &ValidationReport) {
    println!("\n{}", style("Validation").bold());

    for error in &report.overall.errors {
        println!("  {} {}", style("✗").red(), error);
    }
    for warning in &report.overall.warnings {
        println!("  {} {}", style("!").yellow(), warning);
    }

    println!();
    if report.is_valid() {
        println!("{} Claim passes statutory validation", style("✓").green());
    } else {
        println!(
            "{} Claim has {} blocking error(s)",
            style("✗").red(),
            report.overall.errors.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_media_type_sniffs_content() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        assert_eq!(detect_media_type(Path::new("scan.bin"), &png), "image/png");
        assert_eq!(detect_media_type(Path::new("claim.pdf"), b"%PDF-1.7\n"), "application/pdf");
    }

    #[test]
    fn test_detect_media_type_falls_back_to_extension() {
        assert_eq!(detect_media_type(Path::new("page.jpg"), b"??"), "image/jpeg");
        assert_eq!(
            detect_media_type(Path::new("notes"), b"??"),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_load_images_in_argument_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("b.png");
        let second = dir.path().join("a.jpg");
        std::fs::write(&first, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]).unwrap();
        std::fs::write(&second, b"jpeg?").unwrap();

        let pages = load_pages(&[first, second]).await.unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].ordinal, 1);
        assert_eq!(pages[0].file_name.as_deref(), Some("b.png"));
        assert_eq!(pages[0].media_type, "image/png");
        assert_eq!(pages[1].ordinal, 2);
        assert_eq!(pages[1].media_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = load_pages(&[PathBuf::from("/nonexistent/page.png")]).await;
        assert!(err.is_err());
    }
}
