//! Recognition tool availability check command.

use console::style;

use crate::config::Config;
use crate::ocr::tools::{check_binary, installed_languages};
use crate::ocr::{RecognitionBackend, TesseractBackend};

/// Check recognition tool availability.
pub async fn cmd_check(config: &Config) -> anyhow::Result<()> {
    let settings = &config.ocr;

    println!("\n{}", style("OCR Tool Status").bold());
    println!("{}", "-".repeat(50));

    println!("\n{}", style("Tools:").cyan());
    let mut all_found = true;
    for tool in [settings.tesseract_bin.as_str(), "pdftoppm", "pdfinfo"] {
        let status = if check_binary(tool) {
            style("✓ found").green()
        } else {
            all_found = false;
            style("✗ not found").red()
        };
        println!("  {:<15} {}", tool, status);
    }

    println!(
        "\n{} {}",
        style("Language profile:").cyan(),
        settings.language
    );
    match installed_languages(&settings.tesseract_bin) {
        Ok(installed) => {
            for language in settings.language.split('+').filter(|l| !l.is_empty()) {
                let status = if installed.iter().any(|l| l == language) {
                    style("✓ installed").green()
                } else {
                    all_found = false;
                    style("✗ missing").red()
                };
                println!("  {:<15} {}", language, status);
            }
        }
        Err(e) => {
            all_found = false;
            println!("  {}", style(e).dim());
        }
    }

    let backend = TesseractBackend::with_config(settings.tesseract_config());
    println!();
    if all_found {
        println!("{} {}", style("✓").green(), backend.availability_hint());
    } else {
        println!(
            "{} Some tools are missing. Install them for full OCR support:",
            style("!").yellow()
        );
        println!("  - pdftoppm, pdfinfo: poppler-utils package");
        println!("  - tesseract: tesseract-ocr package");
        println!("  - language data: tesseract-ocr-<lang> packages (e.g. tesseract-ocr-hin)");
    }

    Ok(())
}
