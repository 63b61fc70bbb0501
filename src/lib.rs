//! # dotocr-client
//!
//! Client for the DotOCR document-parsing service.
//!
//! The service does all the real work (OCR, layout analysis, text
//! extraction). This crate is the client side: pick an image or PDF, pick a
//! server-defined prompt, submit, and look at the returned Markdown, raw text
//! and metadata.
//!
//! ## Components
//!
//! ```text
//! document ──▶ app::Orchestrator ──▶ client::ApiClient ──▶ DotOCR service
//!    │               │
//!    │               └──▶ output::OutputPanel (render, copy, download)
//!    └──▶ preview::PreviewPanel (local only)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dotocr_client::{document, ApiClient, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Base URL from DOTOCR_API_BASE_URL, default http://localhost:8000
//!     let mut app = Orchestrator::new(ApiClient::from_env()?);
//!     app.load_prompts().await?;
//!     app.select_file(document::resolve_input("scan.pdf", 120).await?).await;
//!     let output = app.handle_parse().await?;
//!     println!("{}", output.data.markdown);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `dotocr` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod app;
pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod notify;
pub mod output;
pub mod preview;
pub mod prompts;
pub mod render;
pub mod types;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use app::{AppState, Orchestrator};
pub use client::ApiClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use document::SelectedFile;
pub use error::DotOcrError;
pub use notify::{Level, NoopNotifier, Notification, Notifier, RecordingNotifier};
pub use output::{Clipboard, CopyConfirmation, MemoryClipboard, MetadataSummary, OutputPanel, OutputTab};
pub use preview::{Preview, PreviewPanel};
pub use render::markdown_to_html;
pub use types::{HealthStatus, ParseData, ParseMetadata, ParseResponse, Prompt};
