//! Document format detection

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    /// Map a `Content-Type` header value, ignoring parameters such as `charset`
    pub fn from_content_type(content_type: &str) -> Self {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        match mime.as_str() {
            "application/pdf" | "application/x-pdf" => FileType::Pdf,
            "text/plain" => FileType::Text,
            "text/markdown" | "text/x-markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    /// Extension of the last path segment of a locator, if any
    pub fn from_path(path: &str) -> Self {
        path.rsplit('/')
            .next()
            .and_then(|segment| segment.rsplit_once('.'))
            .map(|(_, ext)| Self::from_extension(ext))
            .unwrap_or(FileType::Unknown)
    }

    /// Header first, then path, then PDF: uploaded CVs without a hint are PDFs.
    pub fn detect(content_type: Option<&str>, path: &str) -> Self {
        let from_header = content_type.map(Self::from_content_type);
        match from_header {
            Some(file_type) if file_type != FileType::Unknown => file_type,
            _ => match Self::from_path(path) {
                FileType::Unknown => FileType::Pdf,
                file_type => file_type,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_detection() {
        assert_eq!(FileType::from_content_type("application/pdf"), FileType::Pdf);
        assert_eq!(FileType::from_content_type("text/plain; charset=utf-8"), FileType::Text);
        assert_eq!(FileType::from_content_type("TEXT/MARKDOWN"), FileType::Markdown);
        assert_eq!(FileType::from_content_type("application/octet-stream"), FileType::Unknown);
    }

    #[test]
    fn test_detect_prefers_header_then_path() {
        assert_eq!(FileType::detect(Some("text/plain"), "/cv/resume.pdf"), FileType::Text);
        assert_eq!(
            FileType::detect(Some("application/octet-stream"), "/cv/resume.md"),
            FileType::Markdown
        );
        assert_eq!(FileType::detect(None, "/uploads/abc123"), FileType::Pdf);
        assert_eq!(FileType::detect(None, "/uploads/v1.2/cv"), FileType::Pdf);
    }
}
