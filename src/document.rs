//! Document selection: turn a user-supplied path or URL into a [`SelectedFile`].
//!
//! The service accepts the whole file in a single multipart request, so the
//! selection is buffered in memory. URLs are downloaded up front; local files
//! are read after checking existence and permissions so callers get a
//! meaningful error instead of an I/O string.
//!
//! The MIME type is sniffed from the leading bytes (`%PDF`, image magic) and
//! only falls back to the extension; the server does not trust the client's
//! content type either.

use crate::error::DotOcrError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Extensions the service accepts, lower-case with leading dot.
pub const ALLOWED_EXTENSIONS: &[&str] = &[".bmp", ".jpeg", ".jpg", ".pdf", ".png", ".tiff"];

const PDF_MIME: &str = "application/pdf";
const FALLBACK_MIME: &str = "application/octet-stream";

/// A user-chosen local blob, owned for one upload/parse cycle.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("mime_type", &self.mime_type)
            .field("bytes", &format_args!("<{} bytes>", self.bytes.len()))
            .finish()
    }
}

impl SelectedFile {
    /// Wrap an in-memory blob, sniffing its MIME type.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime_type = detect_mime(&name, &bytes).to_string();
        Self {
            size: bytes.len() as u64,
            name,
            mime_type,
            bytes,
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.mime_type == PDF_MIME
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// Size in kilobytes, the unit the service reports back.
    pub fn size_kb(&self) -> f64 {
        self.size as f64 / 1024.0
    }

    /// Lower-cased extension including the dot, or `""`.
    pub fn extension(&self) -> String {
        extension_of(&self.name)
    }

    /// Check the extension against [`ALLOWED_EXTENSIONS`].
    pub fn validate(&self) -> Result<(), DotOcrError> {
        let extension = self.extension();
        if ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            Ok(())
        } else {
            Err(DotOcrError::UnsupportedFileType {
                name: self.name.clone(),
                extension,
                allowed: ALLOWED_EXTENSIONS.join(", "),
            })
        }
    }
}

fn extension_of(name: &str) -> String {
    Path::new(&name.to_lowercase())
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}

/// Determine the MIME type from content first, then from the file name.
pub fn detect_mime(name: &str, bytes: &[u8]) -> &'static str {
    if bytes.starts_with(b"%PDF") {
        return PDF_MIME;
    }
    match image::guess_format(bytes) {
        Ok(image::ImageFormat::Png) => return "image/png",
        Ok(image::ImageFormat::Jpeg) => return "image/jpeg",
        Ok(image::ImageFormat::Tiff) => return "image/tiff",
        Ok(image::ImageFormat::Bmp) => return "image/bmp",
        _ => {}
    }
    match extension_of(name).as_str() {
        ".pdf" => PDF_MIME,
        ".png" => "image/png",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".tiff" | ".tif" => "image/tiff",
        ".bmp" => "image/bmp",
        _ => FALLBACK_MIME,
    }
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Resolve a path or URL into a validated [`SelectedFile`].
pub async fn resolve_input(input: &str, download_timeout_secs: u64) -> Result<SelectedFile, DotOcrError> {
    let file = if is_url(input) {
        download_url(input, download_timeout_secs).await?
    } else if input.trim().is_empty() {
        return Err(DotOcrError::InvalidInput {
            input: input.to_string(),
        });
    } else {
        read_local(Path::new(input)).await?
    };
    file.validate()?;
    Ok(file)
}

/// Read a local file into memory.
pub async fn read_local(path: &Path) -> Result<SelectedFile, DotOcrError> {
    let path: PathBuf = path.to_path_buf();
    if !path.exists() {
        return Err(DotOcrError::FileNotFound { path });
    }

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(DotOcrError::PermissionDenied { path });
        }
        Err(_) => return Err(DotOcrError::FileNotFound { path }),
    };

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());

    debug!("Selected local file: {} ({} bytes)", path.display(), bytes.len());
    Ok(SelectedFile::from_bytes(name, bytes))
}

/// Download a URL into memory.
async fn download_url(url: &str, timeout_secs: u64) -> Result<SelectedFile, DotOcrError> {
    info!("Downloading document from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| DotOcrError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| DotOcrError::DownloadFailed {
            url: url.to_string(),
            reason: if e.is_timeout() {
                format!("timed out after {timeout_secs}s")
            } else {
                e.to_string()
            },
        })?;

    if !response.status().is_success() {
        return Err(DotOcrError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let name = filename_from_url(url);
    let bytes = response
        .bytes()
        .await
        .map_err(|e| DotOcrError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    info!("Downloaded {} ({} bytes)", name, bytes.len());
    Ok(SelectedFile::from_bytes(name, bytes.to_vec()))
}

/// Last path segment of the URL if it looks like a file name.
fn filename_from_url(url: &str) -> String {
    if let Ok(parsed) = reqwest::Url::parse(url) {
        if let Some(mut segments) = parsed.path_segments() {
            if let Some(last) = segments.next_back() {
                if !last.is_empty() && last.contains('.') {
                    return last.to_string();
                }
            }
        }
    }

    "downloaded.pdf".to_string()
}
