//! Local document preview.
//!
//! Purely local: nothing here touches the network or depends on a parse
//! result.
//!
//! * PDFs are written to a named temp file whose path is handed to an
//!   external viewer. The temp file is the panel's only resource.
//! * Images are encoded into a `data:` URL on the blocking pool.
//! * Anything else gets a file-name placeholder.
//!
//! The panel owns at most one temp file at a time. Showing a new file,
//! calling [`PreviewPanel::clear`] or dropping the panel deletes the previous
//! one, so repeated selections never accumulate files on disk.

use crate::document::SelectedFile;
use crate::error::DotOcrError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// What the preview area currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Preview {
    #[default]
    Empty,
    /// Local reference to an embedded PDF.
    Pdf { path: PathBuf },
    /// Inline image.
    Image { data_url: String },
    /// Neither PDF nor image.
    Placeholder { file_name: String },
}

#[derive(Debug, Default)]
pub struct PreviewPanel {
    current: Preview,
    temp: Option<NamedTempFile>,
}

impl PreviewPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Preview {
        &self.current
    }

    /// Number of temp files this panel currently holds (0 or 1).
    pub fn live_resources(&self) -> usize {
        usize::from(self.temp.is_some())
    }

    /// Replace the preview with one for `file`, releasing the previous resource first.
    pub async fn show(&mut self, file: &SelectedFile) -> Result<&Preview, DotOcrError> {
        self.clear();

        self.current = if file.is_pdf() {
            let bytes = file.bytes.clone();
            let temp = tokio::task::spawn_blocking(move || write_temp_pdf(&bytes))
                .await
                .map_err(|e| DotOcrError::Internal(format!("preview task failed: {e}")))??;
            let path = temp.path().to_path_buf();
            debug!("PDF preview for '{}' at {}", file.name, path.display());
            self.temp = Some(temp);
            Preview::Pdf { path }
        } else if file.is_image() {
            let bytes = file.bytes.clone();
            let mime = file.mime_type.clone();
            let data_url = tokio::task::spawn_blocking(move || data_url(&mime, &bytes))
                .await
                .map_err(|e| DotOcrError::Internal(format!("preview task failed: {e}")))?;
            debug!("Image preview for '{}' ({} chars)", file.name, data_url.len());
            Preview::Image { data_url }
        } else {
            Preview::Placeholder {
                file_name: file.name.clone(),
            }
        };

        Ok(&self.current)
    }

    /// Drop the current preview and delete its temp file, if any.
    pub fn clear(&mut self) {
        if let Some(temp) = self.temp.take() {
            let path = temp.path().to_path_buf();
            match temp.close() {
                Ok(()) => debug!("Released preview {}", path.display()),
                Err(e) => debug!("Preview {} already gone: {}", path.display(), e),
            }
        }
        self.current = Preview::Empty;
    }

    /// Path of the embedded PDF, when one is shown.
    pub fn pdf_path(&self) -> Option<&Path> {
        match &self.current {
            Preview::Pdf { path } => Some(path),
            _ => None,
        }
    }
}

fn write_temp_pdf(bytes: &[u8]) -> Result<NamedTempFile, DotOcrError> {
    let mut temp = tempfile::Builder::new()
        .prefix("dotocr-preview-")
        .suffix(".pdf")
        .tempfile()
        .map_err(|e| DotOcrError::Internal(format!("cannot create preview file: {e}")))?;
    temp.write_all(bytes).map_err(|source| DotOcrError::Io {
        path: temp.path().to_path_buf(),
        source,
    })?;
    temp.flush().map_err(|source| DotOcrError::Io {
        path: temp.path().to_path_buf(),
        source,
    })?;
    Ok(temp)
}

/// `data:<mime>;base64,<payload>`.
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}
