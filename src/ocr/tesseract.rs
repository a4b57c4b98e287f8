//! Tesseract OCR backend implementation.
//!
//! Runs Tesseract via command-line with TSV output, so one invocation
//! yields both the text and per-word confidences.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use tracing::debug;

use super::backend::{OcrError, RecognitionBackend, RecognizedText};
use super::pdf_utils;
use super::tools::{check_binary, installed_languages};

/// Tesseract invocation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TesseractConfig {
    /// Executable name or path.
    pub binary: String,
    /// Language profile, `+`-separated (e.g. "eng+hin").
    pub language: String,
    /// `--oem` value.
    pub engine_mode: u8,
    /// `--psm` value.
    pub page_segmentation: u8,
    /// Resolution PDF pages are rasterized at.
    pub pdf_dpi: u32,
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            binary: "tesseract".to_string(),
            language: "eng+hin".to_string(),
            engine_mode: 1,
            page_segmentation: 3,
            pdf_dpi: 300,
        }
    }
}

/// Tesseract OCR backend.
pub struct TesseractBackend {
    config: TesseractConfig,
    /// Scratch space for page images; present while initialized.
    workdir: Option<TempDir>,
}

impl TesseractBackend {
    pub fn new() -> Self {
        Self::with_config(TesseractConfig::default())
    }

    pub fn with_config(config: TesseractConfig) -> Self {
        Self {
            config,
            workdir: None,
        }
    }

    fn workdir(&self) -> Result<&Path, OcrError> {
        self.workdir
            .as_ref()
            .map(|dir| dir.path())
            .ok_or_else(|| OcrError::OcrFailed("tesseract backend not initialized".to_string()))
    }

    /// Run Tesseract on an image file.
    fn run_tesseract(&self, image_path: &Path) -> Result<RecognizedText, OcrError> {
        let output = Command::new(&self.config.binary)
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.config.language])
            .args(["--oem", &self.config.engine_mode.to_string()])
            .args(["--psm", &self.config.page_segmentation.to_string()])
            .arg("tsv")
            .output();

        match output {
            Ok(output) => {
                if output.status.success() {
                    Ok(parse_tsv(&String::from_utf8_lossy(&output.stdout)))
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    Err(OcrError::OcrFailed(format!(
                        "tesseract failed: {}",
                        stderr.trim()
                    )))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(OcrError::BackendNotAvailable(
                    "tesseract not found (install tesseract-ocr)".to_string(),
                ))
            }
            Err(e) => Err(OcrError::Io(e)),
        }
    }

    /// Write `bytes` to a fresh file under a per-call scratch directory.
    fn stage(&self, bytes: &[u8], name: &str) -> Result<(TempDir, PathBuf), OcrError> {
        let scratch = tempfile::tempdir_in(self.workdir()?)?;
        let path = scratch.path().join(name);
        std::fs::write(&path, bytes)?;
        Ok((scratch, path))
    }
}

impl Default for TesseractBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RecognitionBackend for TesseractBackend {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn is_available(&self) -> bool {
        check_binary(&self.config.binary)
    }

    fn availability_hint(&self) -> String {
        if !check_binary(&self.config.binary) {
            "Tesseract not installed. Install with: apt install tesseract-ocr".to_string()
        } else if !check_binary("pdftoppm") {
            "pdftoppm not installed. Install with: apt install poppler-utils".to_string()
        } else {
            "Tesseract is available".to_string()
        }
    }

    fn initialize(&mut self) -> Result<(), OcrError> {
        if !check_binary(&self.config.binary) {
            return Err(OcrError::BackendNotAvailable(format!(
                "{} not found (install tesseract-ocr)",
                self.config.binary
            )));
        }

        let installed = installed_languages(&self.config.binary)?;
        for language in self.config.language.split('+').filter(|l| !l.is_empty()) {
            if !installed.iter().any(|l| l == language) {
                return Err(OcrError::LanguageDataMissing(format!(
                    "'{}' (install tesseract-ocr-{})",
                    language, language
                )));
            }
        }

        self.workdir = Some(TempDir::new()?);
        debug!(
            "Tesseract ready: -l {} --oem {} --psm {}",
            self.config.language, self.config.engine_mode, self.config.page_segmentation
        );
        Ok(())
    }

    fn recognize_image(
        &mut self,
        image: &[u8],
        progress: &mut dyn FnMut(u8),
    ) -> Result<RecognizedText, OcrError> {
        progress(0);
        let (_scratch, image_path) = self.stage(image, "image")?;
        let recognized = self.run_tesseract(&image_path)?;
        progress(100);
        Ok(recognized)
    }

    fn recognize_pdf_page(
        &mut self,
        pdf: &[u8],
        page: u32,
        progress: &mut dyn FnMut(u8),
    ) -> Result<RecognizedText, OcrError> {
        progress(0);
        let (scratch, pdf_path) = self.stage(pdf, "document.pdf")?;
        let image_path =
            pdf_utils::pdf_page_to_image(&pdf_path, page, self.config.pdf_dpi, scratch.path())?;
        progress(30);
        let recognized = self.run_tesseract(&image_path)?;
        progress(100);
        Ok(recognized)
    }

    fn terminate(&mut self) {
        self.workdir = None;
    }
}

/// Parse Tesseract TSV output into text and mean word confidence.
///
/// Words on the same line are joined by spaces; a new block or paragraph
/// starts a new line. Rows with negative confidence carry layout only.
pub fn parse_tsv(tsv: &str) -> RecognizedText {
    let mut lines: Vec<String> = Vec::new();
    let mut current_line: Option<(&str, &str, &str, &str)> = None;
    let mut confidences: Vec<f32> = Vec::new();

    for row in tsv.lines().skip(1) {
        let columns: Vec<&str> = row.split('\t').collect();
        if columns.len() < 12 || columns[0] != "5" {
            continue;
        }

        let text = columns[11].trim();
        let Ok(confidence) = columns[10].trim().parse::<f32>() else {
            continue;
        };
        if text.is_empty() || confidence < 0.0 {
            continue;
        }
        confidences.push(confidence);

        let line_key = (columns[1], columns[2], columns[3], columns[4]);
        if current_line == Some(line_key) {
            if let Some(line) = lines.last_mut() {
                line.push(' ');
                line.push_str(text);
                continue;
            }
        }
        lines.push(text.to_string());
        current_line = Some(line_key);
    }

    let confidence = if confidences.is_empty() {
        0.0
    } else {
        confidences.iter().sum::<f32>() / confidences.len() as f32
    };

    RecognizedText {
        text: lines.join("\n"),
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    fn word(block: u32, line: u32, word: u32, conf: &str, text: &str) -> String {
        format!(
            "5\t1\t{}\t1\t{}\t{}\t0\t0\t10\t10\t{}\t{}",
            block, line, word, conf, text
        )
    }

    #[test]
    fn test_parse_tsv_lines_and_confidence() {
        let tsv = [
            HEADER.to_string(),
            "1\t1\t0\t0\t0\t0\t0\t0\t100\t100\t-1\t".to_string(),
            word(1, 1, 1, "90", "Village:"),
            word(1, 1, 2, "80", "Jagdalpur"),
            word(1, 2, 1, "70.5", "District:"),
            word(2, 1, 1, "95.5", "Bastar"),
        ]
        .join("\n");

        let recognized = parse_tsv(&tsv);
        assert_eq!(recognized.text, "Village: Jagdalpur\nDistrict:\nBastar");
        assert!((recognized.confidence - 84.0).abs() < 0.01);
    }

    #[test]
    fn test_parse_tsv_skips_blank_words() {
        let tsv = [HEADER.to_string(), word(1, 1, 1, "-1", " "), word(1, 1, 2, "60", "")].join("\n");
        let recognized = parse_tsv(&tsv);
        assert_eq!(recognized.text, "");
        assert_eq!(recognized.confidence, 0.0);
    }

    #[test]
    fn test_parse_tsv_empty_output() {
        assert_eq!(parse_tsv("").text, "");
        assert_eq!(parse_tsv(HEADER).confidence, 0.0);
    }

    #[test]
    fn test_default_config() {
        let config = TesseractConfig::default();
        assert_eq!(config.language, "eng+hin");
        assert_eq!(config.pdf_dpi, 300);
    }

    #[test]
    fn test_recognize_before_initialize_fails() {
        let mut backend = TesseractBackend::new();
        let result = backend.recognize_image(b"png", &mut |_| {});
        assert!(matches!(result, Err(OcrError::OcrFailed(_))));
    }
}
