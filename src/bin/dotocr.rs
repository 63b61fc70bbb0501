//! CLI binary for dotocr-client.
//!
//! A thin shim over the library crate: maps subcommands onto the
//! orchestrator and prints results.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotocr_client::config::BASE_URL_ENV;
use dotocr_client::{
    document, prompts, ApiClient, ClientConfig, Clipboard, DotOcrError, Level, Notification,
    Notifier, Orchestrator, OutputTab, Preview,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── Notifications ────────────────────────────────────────────────────────────

/// Prints orchestrator notifications to stderr.
struct StderrNotifier {
    quiet: bool,
}

impl Notifier for StderrNotifier {
    fn notify(&self, n: &Notification) {
        match n.level {
            Level::Success if !self.quiet => eprintln!("{} {}", green("✔"), n.message),
            Level::Success => {}
            Level::Error => eprintln!("{} {}", red("✘"), n.message),
        }
    }
}

/// System clipboard via arboard.
struct SystemClipboard(arboard::Clipboard);

impl SystemClipboard {
    fn open() -> Result<Self, DotOcrError> {
        arboard::Clipboard::new()
            .map(Self)
            .map_err(|e| DotOcrError::Clipboard(e.to_string()))
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), DotOcrError> {
        self.0
            .set_text(text.to_string())
            .map_err(|e| DotOcrError::Clipboard(e.to_string()))
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Is the service up?
  dotocr health

  # List server prompts
  dotocr prompts

  # Parse with the first prompt, print Markdown
  dotocr parse invoice.pdf

  # Parse with a given prompt, print raw text and save output.txt
  dotocr parse scan.png --prompt general --tab raw --download ./out

  # Parse a remote document and copy the Markdown to the clipboard
  dotocr parse https://example.com/report.pdf --copy

  # Show what the preview panel would display
  dotocr preview scan.png

ENVIRONMENT VARIABLES:
  DOTOCR_API_BASE_URL   Service root (default http://localhost:8000)
  RUST_LOG              Log filter, overrides -v/-q

A .env file in the working directory is loaded before anything else.
"#;

/// Parse documents with the DotOCR service.
#[derive(Parser, Debug)]
#[command(
    name = "dotocr",
    version,
    about = "Parse images and PDFs with the DotOCR service",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Service base URL.
    #[arg(long, global = true, env = BASE_URL_ENV)]
    base_url: Option<String>,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "DOTOCR_VERBOSE")]
    verbose: bool,

    /// Suppress all output except results and errors.
    #[arg(short, long, global = true, env = "DOTOCR_QUIET")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the service is reachable.
    Health,

    /// List the prompts the service offers.
    Prompts {
        /// Output JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Upload a document and print the parse result.
    Parse {
        /// Local file path or HTTP/HTTPS URL.
        input: String,

        /// Prompt id. Defaults to the first prompt the server lists.
        #[arg(short, long, env = "DOTOCR_PROMPT")]
        prompt: Option<String>,

        /// Which output tab to print, copy and download.
        #[arg(long, value_enum, default_value = "markdown")]
        tab: TabArg,

        /// Print the Markdown tab rendered as HTML.
        #[arg(long)]
        html: bool,

        /// Save the active tab as output.md / output.txt in this directory.
        #[arg(short, long)]
        download: Option<PathBuf>,

        /// Copy the active tab to the system clipboard.
        #[arg(long)]
        copy: bool,

        /// Print the full ParseResponse as JSON.
        #[arg(long)]
        json: bool,

        /// Disable the spinner.
        #[arg(long, env = "DOTOCR_NO_PROGRESS")]
        no_progress: bool,

        /// Timeout in seconds when INPUT is a URL.
        #[arg(long, default_value_t = 120)]
        download_timeout: u64,
    },

    /// Show the local preview for a document (no network call to the service).
    Preview {
        /// Local file path or HTTP/HTTPS URL.
        input: String,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum TabArg {
    Markdown,
    Raw,
}

impl From<TabArg> for OutputTab {
    fn from(v: TabArg) -> Self {
        match v {
            TabArg::Markdown => OutputTab::Markdown,
            TabArg::Raw => OutputTab::RawText,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads `env = ...` defaults.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let client = build_client(&cli)?;

    match cli.command {
        Command::Health => health(&client).await,
        Command::Prompts { json } => list_prompts(&client, json).await,
        Command::Preview { ref input } => preview(client, input).await,
        Command::Parse {
            ref input,
            ref prompt,
            tab,
            html,
            ref download,
            copy,
            json,
            no_progress,
            download_timeout,
        } => {
            let opts = ParseOpts {
                input,
                prompt: prompt.as_deref(),
                tab: tab.into(),
                html,
                download: download.as_ref(),
                copy,
                json,
                show_progress: !cli.quiet && !no_progress && !json,
                download_timeout,
            };
            parse(client, opts, cli.quiet).await
        }
    }
}

/// Write `text` with a guaranteed trailing newline.
fn write_text(out: &mut impl Write, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())
        .context("Failed to write to stdout")?;
    if !text.ends_with('\n') {
        out.write_all(b"\n").context("Failed to write to stdout")?;
    }
    out.flush().context("Failed to write to stdout")
}

fn build_client(cli: &Cli) -> Result<ApiClient> {
    let config = match cli.base_url {
        Some(ref url) => ClientConfig::builder().base_url(url.as_str()).build(),
        None => ClientConfig::from_env(),
    }
    .context("Invalid configuration")?;
    ApiClient::new(config).context("Failed to create HTTP client")
}

async fn health(client: &ApiClient) -> Result<()> {
    let status = client
        .health_check()
        .await
        .with_context(|| format!("Service at {} is not reachable", client.base_url()))?;
    let mark = if status.is_ok() { green("✔") } else { red("✘") };
    println!("{} {}  {}", mark, bold(&status.status), status.message);
    if !status.is_ok() {
        anyhow::bail!("service reported status '{}'", status.status);
    }
    Ok(())
}

async fn list_prompts(client: &ApiClient, json: bool) -> Result<()> {
    let list = client.get_prompts().await.context("Failed to load prompts")?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&list).context("Failed to serialise prompts")?
        );
    } else {
        print!("{}", prompts::format_prompt_table(&list));
    }
    Ok(())
}

async fn preview(client: ApiClient, input: &str) -> Result<()> {
    let file = document::resolve_input(input, 120)
        .await
        .context("Failed to open document")?;
    let mut app = Orchestrator::new(client);
    app.select_file(file).await;

    match app.preview().current() {
        Preview::Pdf { path } => println!("PDF preview: {}", path.display()),
        Preview::Image { data_url } => println!("{data_url}"),
        Preview::Placeholder { file_name } => println!("No preview available for {file_name}"),
        Preview::Empty => println!("No preview"),
    }
    Ok(())
}

struct ParseOpts<'a> {
    input: &'a str,
    prompt: Option<&'a str>,
    tab: OutputTab,
    html: bool,
    download: Option<&'a PathBuf>,
    copy: bool,
    json: bool,
    show_progress: bool,
    download_timeout: u64,
}

async fn parse(client: ApiClient, opts: ParseOpts<'_>, quiet: bool) -> Result<()> {
    let notifier = Arc::new(StderrNotifier { quiet });
    let mut app = Orchestrator::new(client).with_notifier(notifier);

    // Errors are already shown by the notifier; keep anyhow context short.
    app.load_prompts().await.context("Failed to load prompts")?;
    if let Some(id) = opts.prompt {
        app.select_prompt(id)?;
    }

    let file = document::resolve_input(opts.input, opts.download_timeout)
        .await
        .context("Failed to open document")?;
    if !quiet {
        eprintln!(
            "{} {}  {}",
            dim("◆"),
            bold(&file.name),
            dim(&format!("{:.2} KB, {}", file.size_kb(), file.mime_type))
        );
    }
    app.select_file(file).await;

    let spinner = opts.show_progress.then(|| {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}  {elapsed:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_message(format!(
            "Parsing with prompt '{}'…",
            app.state().selected_prompt.as_deref().unwrap_or("")
        ));
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    });

    let result = app.handle_parse().await.map(|_| ());
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    result.context("Parse failed")?;

    let panel = app
        .output_panel()
        .context("Parse succeeded but produced no output")?
        .with_tab(opts.tab);

    if opts.json {
        let json = serde_json::to_string_pretty(&app.state().output_data)
            .context("Failed to serialise output")?;
        println!("{json}");
    } else {
        let text = if opts.html && opts.tab == OutputTab::Markdown {
            panel.rendered()
        } else {
            panel.content().to_string()
        };
        write_text(&mut io::stdout().lock(), &text)?;
    }

    if let Some(dir) = opts.download {
        let path = panel.download(dir).context("Download failed")?;
        if !quiet {
            eprintln!("{} saved {}", green("✔"), bold(&path.display().to_string()));
        }
    }

    if opts.copy {
        let mut clipboard = SystemClipboard::open().context("Clipboard unavailable")?;
        let confirmation = panel.copy(&mut clipboard).context("Copy failed")?;
        if !quiet && confirmation.is_visible() {
            eprintln!("{} copied {} to clipboard", green("✔"), confirmation.tab.label());
        }
    }

    if !quiet {
        if let Some(summary) = panel.summary() {
            for line in summary.to_string().lines() {
                eprintln!("   {}", dim(line));
            }
        }
    }

    Ok(())
}
