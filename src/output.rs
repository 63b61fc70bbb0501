//! Output panel: tabs, copy, download and the metadata summary.
//!
//! The panel borrows the [`ParseResponse`] held by the orchestrator and
//! never mutates it. Two tabs exist, Markdown and raw text; copy and download
//! always act on the active tab's content.

use crate::error::DotOcrError;
use crate::render::markdown_to_html;
use crate::types::{ParseMetadata, ParseResponse};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// How long a copy confirmation stays visible.
pub const COPY_CONFIRMATION_TTL: Duration = Duration::from_secs(2);

/// Base name shared by every downloaded file.
pub const DOWNLOAD_STEM: &str = "output";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputTab {
    #[default]
    Markdown,
    RawText,
}

impl OutputTab {
    pub fn extension(self) -> &'static str {
        match self {
            OutputTab::Markdown => "md",
            OutputTab::RawText => "txt",
        }
    }

    /// `output.md` or `output.txt`.
    pub fn file_name(self) -> String {
        format!("{DOWNLOAD_STEM}.{}", self.extension())
    }

    pub fn label(self) -> &'static str {
        match self {
            OutputTab::Markdown => "Markdown",
            OutputTab::RawText => "Raw text",
        }
    }
}

/// Destination for the copy action.
///
/// The binary backs this with the system clipboard; tests use
/// [`MemoryClipboard`].
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), DotOcrError>;
}

/// In-process clipboard holding the last copied text.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), DotOcrError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Transient "copied!" signal returned by [`OutputPanel::copy`].
#[derive(Debug, Clone, Copy)]
pub struct CopyConfirmation {
    pub tab: OutputTab,
    copied_at: Instant,
}

impl CopyConfirmation {
    pub fn is_visible(&self) -> bool {
        self.is_visible_at(Instant::now())
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.copied_at) < COPY_CONFIRMATION_TTL
    }
}

/// View over one parse result.
#[derive(Debug, Clone)]
pub struct OutputPanel<'a> {
    response: &'a ParseResponse,
    active: OutputTab,
}

impl<'a> OutputPanel<'a> {
    pub fn new(response: &'a ParseResponse) -> Self {
        Self {
            response,
            active: OutputTab::default(),
        }
    }

    pub fn with_tab(mut self, tab: OutputTab) -> Self {
        self.active = tab;
        self
    }

    pub fn active_tab(&self) -> OutputTab {
        self.active
    }

    pub fn set_tab(&mut self, tab: OutputTab) {
        self.active = tab;
    }

    /// Raw content of the active tab.
    pub fn content(&self) -> &'a str {
        match self.active {
            OutputTab::Markdown => &self.response.data.markdown,
            OutputTab::RawText => &self.response.data.raw_text,
        }
    }

    /// Display form of the active tab: rendered HTML for Markdown, the text
    /// itself for raw text.
    pub fn rendered(&self) -> String {
        match self.active {
            OutputTab::Markdown => markdown_to_html(self.content()),
            OutputTab::RawText => self.content().to_string(),
        }
    }

    /// Copy the active tab's content.
    pub fn copy(&self, clipboard: &mut dyn Clipboard) -> Result<CopyConfirmation, DotOcrError> {
        clipboard.set_text(self.content())?;
        debug!("Copied {} chars from {} tab", self.content().len(), self.active.label());
        Ok(CopyConfirmation {
            tab: self.active,
            copied_at: Instant::now(),
        })
    }

    /// Write the active tab's content to `dir/output.{md,txt}`.
    pub fn download(&self, dir: &Path) -> Result<PathBuf, DotOcrError> {
        let path = dir.join(self.active.file_name());
        std::fs::write(&path, self.content().as_bytes()).map_err(|source| DotOcrError::Io {
            path: path.clone(),
            source,
        })?;
        info!("Saved {} tab to {}", self.active.label(), path.display());
        Ok(path)
    }

    pub fn summary(&self) -> Option<MetadataSummary<'a>> {
        self.response.metadata.as_ref().map(MetadataSummary)
    }
}

/// Human-readable metadata block.
#[derive(Debug, Clone, Copy)]
pub struct MetadataSummary<'a>(pub &'a ParseMetadata);

impl fmt::Display for MetadataSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        writeln!(f, "Model:        {}", m.model)?;
        writeln!(
            f,
            "Processing:   {} ms ({:.2} s)",
            m.processing_time_ms,
            m.processing_time_ms as f64 / 1000.0
        )?;
        writeln!(f, "File size:    {:.2} KB", m.file_size_kb)?;
        writeln!(f, "Request ID:   {}", m.request_id)?;
        write!(f, "Storage key:  {}", m.storage_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParseData;

    fn response() -> ParseResponse {
        ParseResponse {
            success: true,
            data: ParseData {
                markdown: "# Invoice\n**Total**: 42".into(),
                raw_text: "Invoice\nTotal: 42\n\tüñí".into(),
            },
            metadata: Some(ParseMetadata {
                storage_key: "20250101_120000_abcd1234_invoice.pdf".into(),
                model: "mistral-ocr-latest".into(),
                processing_time_ms: 1250,
                request_id: "ocr_abcd1234".into(),
                file_size_kb: 18.75,
            }),
        }
    }

    #[test]
    fn file_names_follow_tab() {
        assert_eq!(OutputTab::Markdown.file_name(), "output.md");
        assert_eq!(OutputTab::RawText.file_name(), "output.txt");
    }

    #[test]
    fn content_follows_active_tab() {
        let r = response();
        let mut panel = OutputPanel::new(&r);
        assert_eq!(panel.content(), r.data.markdown);
        panel.set_tab(OutputTab::RawText);
        assert_eq!(panel.content(), r.data.raw_text);
    }

    #[test]
    fn rendered_markdown_is_html() {
        let r = response();
        let html = OutputPanel::new(&r).rendered();
        assert_eq!(html, "<h1>Invoice<br><strong>Total</strong>: 42</h1>");
    }

    #[test]
    fn copy_writes_active_tab_and_confirms() {
        let r = response();
        let panel = OutputPanel::new(&r).with_tab(OutputTab::RawText);
        let mut clip = MemoryClipboard::default();
        let confirmation = panel.copy(&mut clip).unwrap();
        assert_eq!(clip.contents.as_deref(), Some(r.data.raw_text.as_str()));
        assert_eq!(confirmation.tab, OutputTab::RawText);
        assert!(confirmation.is_visible());
        assert!(!confirmation.is_visible_at(Instant::now() + COPY_CONFIRMATION_TTL));
    }

    #[test]
    fn raw_text_download_is_byte_exact() {
        let r = response();
        let dir = tempfile::tempdir().unwrap();
        let path = OutputPanel::new(&r)
            .with_tab(OutputTab::RawText)
            .download(dir.path())
            .unwrap();
        assert_eq!(path.file_name().unwrap(), "output.txt");
        assert_eq!(std::fs::read(&path).unwrap(), r.data.raw_text.as_bytes());
    }

    #[test]
    fn markdown_download_uses_md_extension() {
        let r = response();
        let dir = tempfile::tempdir().unwrap();
        let path = OutputPanel::new(&r).download(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "output.md");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), r.data.markdown);
    }

    #[test]
    fn download_into_missing_dir_is_io_error() {
        let r = response();
        let err = OutputPanel::new(&r)
            .download(Path::new("/definitely/not/a/dir"))
            .unwrap_err();
        assert!(matches!(err, DotOcrError::Io { .. }));
    }

    #[test]
    fn summary_formats_units() {
        let r = response();
        let text = OutputPanel::new(&r).summary().unwrap().to_string();
        assert!(text.contains("1250 ms (1.25 s)"), "got: {text}");
        assert!(text.contains("18.75 KB"), "got: {text}");
        assert!(text.contains("ocr_abcd1234"));
    }
}
