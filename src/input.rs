//! Scan input shapes and content normalization
//!
//! A scan targets one of three input kinds: a URL, a free-text message, or
//! the metadata of a local file. File contents are never read or uploaded;
//! only name, type, size and modification time are used.

use std::fmt;
use std::path::Path;
use std::time::UNIX_EPOCH;

use miette::{Context as _, IntoDiagnostic as _};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanKind {
    Url,
    Text,
    File,
}

impl fmt::Display for ScanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url => write!(f, "URL"),
            Self::Text => write!(f, "text message"),
            Self::File => write!(f, "file"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub last_modified_epoch: u64,
}

impl FileMetadata {
    /// Reads file metadata from disk. The file itself is never opened.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let metadata = std::fs::metadata(path)
            .into_diagnostic()
            .with_context(|| format!("reading metadata of {}", path.display()))?;

        if metadata.is_dir() {
            return Err(miette::miette!(
                "{} is a directory, expected a file",
                path.display()
            ));
        }

        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(ToString::to_string)
            .ok_or_else(|| miette::miette!("{} has no usable file name", path.display()))?;

        let mime_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(mime_for_extension)
            .unwrap_or("application/octet-stream")
            .to_string();

        let last_modified_epoch = metadata
            .modified()
            .ok()
            .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
            .map(|duration| duration.as_secs())
            .unwrap_or_default();

        Ok(Self {
            name,
            size_bytes: metadata.len(),
            mime_type,
            last_modified_epoch,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanInput {
    Url(String),
    Text(String),
    FileRef(FileMetadata),
}

impl ScanInput {
    pub fn kind(&self) -> ScanKind {
        match self {
            Self::Url(_) => ScanKind::Url,
            Self::Text(_) => ScanKind::Text,
            Self::FileRef(_) => ScanKind::File,
        }
    }

    /// Shapes the input into the descriptive text embedded in the analysis
    /// prompt. Raw values are quoted verbatim.
    pub fn normalize(&self) -> String {
        match self {
            Self::Url(raw) => format!("URL to analyze: \"{raw}\""),
            Self::Text(raw) => format!("Email/SMS Text content to analyze: \"{raw}\""),
            Self::FileRef(meta) => format!(
                "File Metadata: Name=\"{}\", Type=\"{}\", Size=\"{} bytes\".",
                meta.name, meta.mime_type, meta.size_bytes
            ),
        }
    }
}

fn mime_for_extension(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "html" | "htm" => "text/html",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "js" => "text/javascript",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "7z" => "application/x-7z-compressed",
        "rar" => "application/vnd.rar",
        "gz" => "application/gzip",
        "exe" | "scr" | "com" => "application/x-msdownload",
        "dll" => "application/x-msdownload",
        "msi" => "application/x-msi",
        "bat" | "cmd" => "application/x-bat",
        "sh" => "application/x-sh",
        "apk" => "application/vnd.android.package-archive",
        "iso" => "application/x-iso9660-image",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
