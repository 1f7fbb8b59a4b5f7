//! Document Extractor: uploaded bytes + filename → plain text.
//!
//! Dispatches on the filename extension. PDF decoding is CPU-bound; callers on
//! the async runtime should run `extract_text` inside `spawn_blocking`.

use std::fmt;
use std::panic;
use std::path::Path;

use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};
use thiserror::Error;
use tracing::debug;

/// Supported résumé formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Detects the format from the filename extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_ascii_lowercase();

        match extension.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
            Self::Txt => "TXT",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Please provide a non-empty CV file.")]
    EmptyInput,

    #[error("Unsupported CV format '{filename}'. Please upload PDF, DOCX, or TXT.")]
    UnsupportedFormat { filename: String },

    #[error("Could not read {format} document: {message}")]
    Decode {
        format: DocumentFormat,
        message: String,
    },
}

/// Converts an uploaded payload into plain text.
pub fn extract_text(filename: &str, payload: &[u8]) -> Result<String, ExtractError> {
    if payload.is_empty() {
        return Err(ExtractError::EmptyInput);
    }

    let format =
        DocumentFormat::from_filename(filename).ok_or_else(|| ExtractError::UnsupportedFormat {
            filename: filename.to_string(),
        })?;

    debug!(%format, bytes = payload.len(), "Extracting résumé text");

    match format {
        DocumentFormat::Pdf => extract_pdf(payload),
        DocumentFormat::Docx => extract_docx(payload),
        DocumentFormat::Txt => Ok(decode_utf8(payload)),
    }
}

fn extract_pdf(payload: &[u8]) -> Result<String, ExtractError> {
    // pdf-extract panics on some malformed inputs instead of returning Err.
    let result = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(payload));

    match result {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractError::Decode {
            format: DocumentFormat::Pdf,
            message: e.to_string(),
        }),
        Err(_) => Err(ExtractError::Decode {
            format: DocumentFormat::Pdf,
            message: "malformed PDF structure".to_string(),
        }),
    }
}

/// One line per top-level paragraph; tabs and breaks inside runs are kept.
fn extract_docx(payload: &[u8]) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(payload).map_err(|e| ExtractError::Decode {
        format: DocumentFormat::Docx,
        message: e.to_string(),
    })?;

    let lines: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
            _ => None,
        })
        .collect();

    Ok(lines.join("\n"))
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Tab(_) => text.push('\t'),
                    RunChild::Break(_) => text.push('\n'),
                    _ => {}
                }
            }
        }
    }
    text
}

fn decode_utf8(payload: &[u8]) -> String {
    let payload = payload.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(payload);
    String::from_utf8_lossy(payload).into_owned()
}
