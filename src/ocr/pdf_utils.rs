//! PDF helpers backed by poppler-utils.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::backend::OcrError;

/// Rasterize one PDF page to PNG with `pdftoppm`.
pub fn pdf_page_to_image(
    pdf_path: &Path,
    page: u32,
    dpi: u32,
    output_dir: &Path,
) -> Result<PathBuf, OcrError> {
    let page_str = page.to_string();
    let dpi_str = dpi.to_string();
    let output_prefix = output_dir.join("page");

    let status = Command::new("pdftoppm")
        .args(["-png", "-r", &dpi_str, "-f", &page_str, "-l", &page_str])
        .arg(pdf_path)
        .arg(&output_prefix)
        .status();

    match status {
        Ok(s) if s.success() => find_page_image(output_dir, page)
            .ok_or_else(|| OcrError::OcrFailed(format!("No image generated for page {}", page))),
        Ok(_) => Err(OcrError::OcrFailed(
            "pdftoppm failed to convert PDF page".to_string(),
        )),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(OcrError::BackendNotAvailable(
            "pdftoppm not found (install poppler-utils)".to_string(),
        )),
        Err(e) => Err(OcrError::Io(e)),
    }
}

/// pdftoppm names files page-1.png, page-01.png, page-001.png, ... depending
/// on the document's page count.
fn find_page_image(dir: &Path, page: u32) -> Option<PathBuf> {
    (1..=4)
        .map(|digits| dir.join(format!("page-{:0width$}.png", page, width = digits)))
        .find(|path| path.exists())
}

/// Number of pages in a PDF, via `pdfinfo`.
pub fn pdf_page_count(pdf_path: &Path) -> Result<u32, OcrError> {
    let output = match Command::new("pdfinfo").arg(pdf_path).output() {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(OcrError::BackendNotAvailable(
                "pdfinfo not found (install poppler-utils)".to_string(),
            ))
        }
        Err(e) => return Err(OcrError::Io(e)),
    };

    if !output.status.success() {
        return Err(OcrError::OcrFailed(format!(
            "pdfinfo failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(pages_to_recognize(&String::from_utf8_lossy(&output.stdout)))
}

/// Pages to recognize for a PDF. Never zero, so a PDF that reports no pages
/// still yields a page whose recognition failure is visible.
fn pages_to_recognize(pdfinfo: &str) -> u32 {
    parse_page_count(pdfinfo).unwrap_or(1).max(1)
}

/// Value of the `Pages:` line in pdfinfo output.
pub fn parse_page_count(pdfinfo: &str) -> Option<u32> {
    pdfinfo
        .lines()
        .find(|line| line.starts_with("Pages:"))
        .and_then(|line| line.split(':').nth(1))
        .and_then(|count| count.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_count() {
        let output = "Title:          Claim\nProducer:       scanner\nPages:          7\nEncrypted:      no\n";
        assert_eq!(parse_page_count(output), Some(7));
        assert_eq!(parse_page_count("Title: x\n"), None);
        assert_eq!(parse_page_count("Pages: many\n"), None);
    }

    #[test]
    fn test_pages_to_recognize_is_never_zero() {
        assert_eq!(pages_to_recognize("Pages:          3\n"), 3);
        assert_eq!(pages_to_recognize("Pages:          0\n"), 1);
        assert_eq!(pages_to_recognize("Title: scan\n"), 1);
    }

    #[test]
    fn test_find_page_image_widths() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(find_page_image(dir.path(), 3), None);

        let path = dir.path().join("page-003.png");
        std::fs::write(&path, b"png").unwrap();
        assert_eq!(find_page_image(dir.path(), 3), Some(path));
    }
}
