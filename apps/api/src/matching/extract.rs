//! Plain-text extraction from uploaded documents, dispatched on file extension.

use std::fmt::Display;
use std::fs;
use std::path::Path;

use docx_rs::read_docx;

use crate::errors::AppError;

/// Extracts UTF-8 text from a file based on its extension.
///
/// Supported: `.pdf`, `.docx`, `.txt` (case-insensitive). Anything else is
/// rejected as `UnsupportedFormat`, naming the offending path. Layout is not
/// preserved: headings and tables collapse to flat text, images are
/// discarded.
pub fn extract_text_from_file(path: &Path) -> Result<String, AppError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("pdf") => extract_pdf(path),
        Some("docx") => extract_docx(path),
        Some("txt") => extract_txt(path),
        _ => Err(AppError::UnsupportedFormat(path.display().to_string())),
    }
}

fn extract_pdf(path: &Path) -> Result<String, AppError> {
    // Concatenated page text, layout-agnostic.
    pdf_extract::extract_text(path).map_err(|e| extraction_error(path, e))
}

fn extract_docx(path: &Path) -> Result<String, AppError> {
    let data = fs::read(path).map_err(|e| extraction_error(path, e))?;
    let docx = read_docx(&data).map_err(|e| extraction_error(path, e))?;

    let mut text = String::new();
    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            for child in paragraph.children {
                if let docx_rs::ParagraphChild::Run(run) = child {
                    for child in run.children {
                        if let docx_rs::RunChild::Text(t) = child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }
    Ok(text)
}

fn extract_txt(path: &Path) -> Result<String, AppError> {
    let bytes = fs::read(path).map_err(|e| extraction_error(path, e))?;
    String::from_utf8(bytes).map_err(|e| extraction_error(path, e))
}

fn extraction_error(path: &Path, reason: impl Display) -> AppError {
    AppError::Extraction {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_txt_round_trips_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "resume.txt", "I know Python and AWS".as_bytes());
        let text = extract_text_from_file(&path).unwrap();
        assert_eq!(text, "I know Python and AWS");
    }

    #[test]
    fn test_txt_extension_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "resume.TXT", b"hello");
        assert_eq!(extract_text_from_file(&path).unwrap(), "hello");
    }

    #[test]
    fn test_docx_paragraph_text_is_extracted() {
        use docx_rs::{Docx, Paragraph, Run};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        let file = fs::File::create(&path).unwrap();
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Python and AWS")))
            .build()
            .pack(file)
            .unwrap();

        let text = extract_text_from_file(&path).unwrap();
        assert_eq!(text, "Python and AWS\n");
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "resume.odt", b"whatever");
        let err = extract_text_from_file(&path).unwrap_err();
        match err {
            AppError::UnsupportedFormat(named) => assert!(named.ends_with("resume.odt")),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_extension_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "resume", b"whatever");
        assert!(matches!(
            extract_text_from_file(&path),
            Err(AppError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_invalid_utf8_txt_fails_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "resume.txt", &[0xff, 0xfe, 0x80]);
        assert!(matches!(
            extract_text_from_file(&path),
            Err(AppError::Extraction { .. })
        ));
    }

    #[test]
    fn test_corrupt_pdf_fails_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "resume.pdf", b"not a pdf at all");
        assert!(matches!(
            extract_text_from_file(&path),
            Err(AppError::Extraction { .. })
        ));
    }

    #[test]
    fn test_corrupt_docx_fails_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "resume.docx", b"not a zip archive");
        assert!(matches!(
            extract_text_from_file(&path),
            Err(AppError::Extraction { .. })
        ));
    }
}
