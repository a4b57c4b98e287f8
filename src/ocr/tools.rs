//! External tool discovery.

use std::process::Command;

use super::backend::OcrError;

/// Check if a binary is available in PATH (or exists, for explicit paths).
pub fn check_binary(name: &str) -> bool {
    which::which(name).is_ok()
}

/// Languages reported by `tesseract --list-langs`.
pub fn installed_languages(binary: &str) -> Result<Vec<String>, OcrError> {
    let output = match Command::new(binary).arg("--list-langs").output() {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(OcrError::BackendNotAvailable(format!("{} not found", binary)))
        }
        Err(e) => return Err(OcrError::Io(e)),
    };

    if !output.status.success() {
        return Err(OcrError::OcrFailed(format!(
            "{} --list-langs failed: {}",
            binary,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    // Older releases print the list on stderr.
    let listing = format!(
        "{}\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(parse_language_list(&listing))
}

/// Language codes from `--list-langs` output, skipping the heading line.
pub fn parse_language_list(listing: &str) -> Vec<String> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.ends_with(':') && !line.contains(' '))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language_list() {
        let listing = "List of available languages in \"/usr/share/tesseract-ocr/5/tessdata/\" (3):\neng\nhin\nosd\n";
        assert_eq!(parse_language_list(listing), vec!["eng", "hin", "osd"]);
    }

    #[test]
    fn test_parse_language_list_empty() {
        assert!(parse_language_list("List of available languages (0):\n").is_empty());
    }

    #[test]
    fn test_missing_binary() {
        assert!(!check_binary("adhikar-no-such-binary"));
        assert!(matches!(
            installed_languages("adhikar-no-such-binary"),
            Err(OcrError::BackendNotAvailable(_))
        ));
    }
}
