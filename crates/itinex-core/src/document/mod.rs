//! Document text acquisition.

mod extractor;

pub use extractor::extract_text;

use crate::error::DocumentError;

/// Document formats accepted by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Page-description document (PDF).
    Pdf,
    /// Word-processor document (DOCX).
    Docx,
}

impl DocumentFormat {
    /// Detect the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    /// Detect the format from a declared content type.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type.split(';').next().unwrap_or("").trim() {
            "application/pdf" => Some(Self::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::Docx)
            }
            _ => None,
        }
    }

    /// Detect from a filename, falling back to the declared content type.
    pub fn detect(filename: &str, content_type: Option<&str>) -> Result<Self> {
        filename
            .rsplit('.')
            .next()
            .and_then(Self::from_extension)
            .or_else(|| content_type.and_then(Self::from_content_type))
            .ok_or_else(|| DocumentError::UnsupportedFormat(filename.to_string()))
    }
}

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_extension("pdf"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_extension("PDF"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_extension("docx"), Some(DocumentFormat::Docx));
        assert_eq!(DocumentFormat::from_extension("doc"), None);
        assert_eq!(DocumentFormat::from_extension("png"), None);
    }

    #[test]
    fn test_format_from_content_type() {
        assert_eq!(
            DocumentFormat::from_content_type("application/pdf"),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::from_content_type(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            ),
            Some(DocumentFormat::Docx)
        );
        assert_eq!(DocumentFormat::from_content_type("text/plain"), None);
    }

    #[test]
    fn test_detect_prefers_extension_then_content_type() {
        let detected = DocumentFormat::detect("tour.pdf", Some("text/plain")).unwrap();
        assert_eq!(detected, DocumentFormat::Pdf);

        let detected = DocumentFormat::detect("upload", Some("application/pdf")).unwrap();
        assert_eq!(detected, DocumentFormat::Pdf);

        assert!(DocumentFormat::detect("tour.txt", None).is_err());
    }
}
